//
//  bitbucket-provider
//  state/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Resource State
//!
//! The host owns resource state; resources only see it through
//! [`ResourceData`]. Attribute values use the host's generic tree shape:
//! strings, booleans, and lists of objects for nested blocks.
//!
//! [`ResourceState`] is a plain in-memory implementation, serialised as
//!
//! ```json
//! { "id": "acme/widgets", "attributes": { "owner": "acme", "name": "widgets" } }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Accessors on a host-supplied resource state object.
pub trait ResourceData: Send {
    /// The resource identity, empty when the resource is not yet created.
    fn id(&self) -> &str;

    /// Sets the resource identity.
    fn set_id(&mut self, id: String);

    /// Returns an attribute value, `None` when unset.
    fn get(&self, key: &str) -> Option<&Value>;

    /// Writes an attribute value.
    fn set(&mut self, key: &str, value: Value);
}

/// In-memory resource state.
///
/// # Example
///
/// ```rust
/// use bitbucket_provider::state::{ResourceData, ResourceState};
/// use serde_json::json;
///
/// let mut state = ResourceState::new();
/// state.set("owner", json!("acme"));
/// assert_eq!(state.get("owner"), Some(&json!("acme")));
/// assert!(state.id().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceState {
    /// The resource identity.
    #[serde(default)]
    pub id: String,

    /// Attribute values keyed by attribute name.
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl ResourceState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a state with no id from a JSON object of attributes.
    ///
    /// Anything other than an object yields an empty state.
    pub fn from_attributes(attributes: Value) -> Self {
        match attributes {
            Value::Object(attributes) => Self {
                id: String::new(),
                attributes,
            },
            _ => Self::default(),
        }
    }

    /// Builds a state that only carries an identity, as used by import.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: Map::new(),
        }
    }
}

impl ResourceData for ResourceState {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key).filter(|v| !v.is_null())
    }

    fn set(&mut self, key: &str, value: Value) {
        self.attributes.insert(key.to_string(), value);
    }
}
