//
//  bitbucket-provider
//  schema/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Resource Schemas
//!
//! A schema declares each attribute a resource accepts: its type, whether it
//! is required, optional or computed, its default, and for nested blocks the
//! maximum number of entries.
//!
//! [`Schema::resolve`] reads the declared attributes out of a
//! [`ResourceData`], applies defaults and validates the result. Resources then
//! pull typed values out of the resolved map with [`get_string`],
//! [`get_bool`], [`get_blocks`] and [`get_block`].
//!
//! ## Example
//!
//! ```rust
//! use bitbucket_provider::schema::{Attribute, Schema};
//! use bitbucket_provider::state::ResourceState;
//! use serde_json::json;
//!
//! let schema = Schema::new(vec![
//!     Attribute::string("name").required(),
//!     Attribute::string("scm").optional().default("git"),
//! ]);
//!
//! let state = ResourceState::from_attributes(json!({"name": "widgets"}));
//! let resolved = schema.resolve(&state).unwrap();
//! assert_eq!(resolved["scm"], "git");
//! ```

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::state::ResourceData;

/// Errors raised while resolving attributes against a schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A required attribute is not set.
    #[error("The argument \"{0}\" is required, but no definition was found")]
    Missing(String),

    /// A required string attribute is set to an empty string.
    #[error("The argument \"{0}\" must not be empty")]
    Empty(String),

    /// An attribute value has the wrong type.
    #[error("Attribute \"{path}\" must be a {expected}")]
    TypeMismatch {
        /// Dotted path of the attribute
        path: String,
        /// Name of the declared type
        expected: &'static str,
    },

    /// A nested block has more entries than allowed.
    #[error("Attribute \"{path}\" supports at most {max} item(s), got {found}")]
    TooManyItems {
        /// Dotted path of the attribute
        path: String,
        /// Declared maximum
        max: usize,
        /// Number of entries provided
        found: usize,
    },

    /// A string attribute holds a value outside its allowed set.
    #[error("Attribute \"{path}\" must be one of [{}], got \"{value}\"", .allowed.join(", "))]
    NotAllowed {
        /// Dotted path of the attribute
        path: String,
        /// The rejected value
        value: String,
        /// The accepted values
        allowed: Vec<String>,
    },
}

/// The type of an attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    String,
    Bool,
    /// A list of nested blocks, each an object following the inner schema.
    List(Schema),
}

impl AttributeType {
    fn name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Bool => "bool",
            Self::List(_) => "list of blocks",
        }
    }

    fn zero_value(&self) -> Value {
        match self {
            Self::String => Value::String(String::new()),
            Self::Bool => Value::Bool(false),
            Self::List(_) => Value::Array(Vec::new()),
        }
    }
}

/// A single attribute declaration, built with chained modifiers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: AttributeType,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<&'static [&'static str]>,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub description: &'static str,
}

impl Attribute {
    fn new(name: &'static str, kind: AttributeType) -> Self {
        Self {
            name,
            kind,
            required: false,
            optional: false,
            computed: false,
            default: None,
            max_items: None,
            allowed_values: None,
            description: "",
        }
    }

    pub fn string(name: &'static str) -> Self {
        Self::new(name, AttributeType::String)
    }

    pub fn bool(name: &'static str) -> Self {
        Self::new(name, AttributeType::Bool)
    }

    pub fn list(name: &'static str, block: Schema) -> Self {
        Self::new(name, AttributeType::List(block))
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Marks the attribute as filled in by the resource on read.
    pub fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn max_items(mut self, max: usize) -> Self {
        self.max_items = Some(max);
        self
    }

    pub fn one_of(mut self, allowed: &'static [&'static str]) -> Self {
        self.allowed_values = Some(allowed);
        self
    }

    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    fn resolve_value(&self, value: &Value, path: &str) -> Result<Value, SchemaError> {
        match (&self.kind, value) {
            (AttributeType::String, Value::String(s)) => {
                if self.required && s.is_empty() {
                    return Err(SchemaError::Empty(path.to_string()));
                }
                if let Some(allowed) = self.allowed_values {
                    if !allowed.contains(&s.as_str()) {
                        return Err(SchemaError::NotAllowed {
                            path: path.to_string(),
                            value: s.clone(),
                            allowed: allowed.iter().map(|a| a.to_string()).collect(),
                        });
                    }
                }
                Ok(value.clone())
            }
            (AttributeType::Bool, Value::Bool(_)) => Ok(value.clone()),
            (AttributeType::List(block), Value::Array(items)) => {
                let items: Vec<&Value> = items.iter().filter(|v| !v.is_null()).collect();
                if let Some(max) = self.max_items {
                    if items.len() > max {
                        return Err(SchemaError::TooManyItems {
                            path: path.to_string(),
                            max,
                            found: items.len(),
                        });
                    }
                }

                let mut resolved = Vec::with_capacity(items.len());
                for (index, item) in items.into_iter().enumerate() {
                    let item_path = format!("{}.{}", path, index);
                    let object = item.as_object().ok_or_else(|| SchemaError::TypeMismatch {
                        path: item_path.clone(),
                        expected: "block",
                    })?;
                    resolved.push(Value::Object(block.resolve_object(object, &item_path)?));
                }
                Ok(Value::Array(resolved))
            }
            _ => Err(SchemaError::TypeMismatch {
                path: path.to_string(),
                expected: self.kind.name(),
            }),
        }
    }
}

/// An ordered set of attribute declarations; also used for nested blocks.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Schema {
    pub attributes: Vec<Attribute>,
}

impl Schema {
    pub fn new(attributes: Vec<Attribute>) -> Self {
        Self { attributes }
    }

    /// Looks up a top-level attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Reads every declared attribute from `data`, applies defaults and
    /// validates the values.
    ///
    /// The returned map holds every declared attribute. Unset optional
    /// attributes without a default get their type's zero value (empty string,
    /// `false`, empty list).
    pub fn resolve(&self, data: &dyn ResourceData) -> Result<Map<String, Value>, SchemaError> {
        let mut input = Map::new();
        for attribute in &self.attributes {
            if let Some(value) = data.get(attribute.name) {
                input.insert(attribute.name.to_string(), value.clone());
            }
        }
        self.resolve_object(&input, "")
    }

    fn resolve_object(
        &self,
        input: &Map<String, Value>,
        prefix: &str,
    ) -> Result<Map<String, Value>, SchemaError> {
        let mut out = Map::new();
        for attribute in &self.attributes {
            let path = if prefix.is_empty() {
                attribute.name.to_string()
            } else {
                format!("{}.{}", prefix, attribute.name)
            };

            // Optional strings read back as "" count as unset.
            let value = match input
                .get(attribute.name)
                .filter(|v| !v.is_null())
                .filter(|v| attribute.required || v.as_str() != Some(""))
            {
                Some(value) => attribute.resolve_value(value, &path)?,
                None if attribute.required => return Err(SchemaError::Missing(path)),
                None => attribute
                    .default
                    .clone()
                    .unwrap_or_else(|| attribute.kind.zero_value()),
            };
            out.insert(attribute.name.to_string(), value);
        }
        Ok(out)
    }

    /// Lists every attribute with its dotted path, nested blocks included.
    pub fn paths(&self) -> Vec<(String, &Attribute)> {
        let mut out = Vec::new();
        self.collect_paths("", &mut out);
        out
    }

    fn collect_paths<'a>(&'a self, prefix: &str, out: &mut Vec<(String, &'a Attribute)>) {
        for attribute in &self.attributes {
            let path = if prefix.is_empty() {
                attribute.name.to_string()
            } else {
                format!("{}.{}", prefix, attribute.name)
            };
            out.push((path.clone(), attribute));
            if let AttributeType::List(block) = &attribute.kind {
                block.collect_paths(&path, out);
            }
        }
    }
}

/// Reads a string from a resolved map.
pub fn get_string(map: &Map<String, Value>, key: &str) -> Result<String, SchemaError> {
    match map.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(SchemaError::TypeMismatch {
            path: key.to_string(),
            expected: "string",
        }),
        None => Err(SchemaError::Missing(key.to_string())),
    }
}

/// Reads a bool from a resolved map.
pub fn get_bool(map: &Map<String, Value>, key: &str) -> Result<bool, SchemaError> {
    match map.get(key) {
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(SchemaError::TypeMismatch {
            path: key.to_string(),
            expected: "bool",
        }),
        None => Err(SchemaError::Missing(key.to_string())),
    }
}

/// Reads a list of nested blocks from a resolved map.
pub fn get_blocks<'a>(
    map: &'a Map<String, Value>,
    key: &str,
) -> Result<Vec<&'a Map<String, Value>>, SchemaError> {
    let items = match map.get(key) {
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(SchemaError::TypeMismatch {
                path: key.to_string(),
                expected: "list of blocks",
            })
        }
        None => return Err(SchemaError::Missing(key.to_string())),
    };

    items
        .iter()
        .map(|item| {
            item.as_object().ok_or_else(|| SchemaError::TypeMismatch {
                path: key.to_string(),
                expected: "block",
            })
        })
        .collect()
}

/// Reads an optional single nested block (a list of at most one entry).
pub fn get_block<'a>(
    map: &'a Map<String, Value>,
    key: &str,
) -> Result<Option<&'a Map<String, Value>>, SchemaError> {
    let blocks = get_blocks(map, key)?;
    match blocks.len() {
        0 => Ok(None),
        1 => Ok(blocks.into_iter().next()),
        found => Err(SchemaError::TooManyItems {
            path: key.to_string(),
            max: 1,
            found,
        }),
    }
}
