//
//  bitbucket-provider
//  api/cloud/repositories.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Cloud repository wire types.
//!
//! The same [`Repository`] struct is sent on create/update and decoded from
//! `GET 2.0/repositories/{owner}/{slug}`. Empty strings and `false` flags are
//! left out of request bodies; `name` is always present.
//!
//! # Example
//!
//! ```rust
//! use bitbucket_provider::api::cloud::repositories::{ProjectKey, Repository};
//!
//! let repo = Repository {
//!     name: "backend-service".to_string(),
//!     is_private: true,
//!     project: Some(ProjectKey { key: "BACKEND".to_string() }),
//!     ..Default::default()
//! };
//!
//! let body = serde_json::to_value(&repo).unwrap();
//! assert_eq!(body["project"]["key"], "BACKEND");
//! assert!(body.get("description").is_none());
//! ```

use serde::{Deserialize, Deserializer, Serialize};

/// Represents a Bitbucket Cloud repository as sent to and returned by the API.
///
/// Fields the API may return as `null` decode to their empty value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    /// Source control kind, `git` on Bitbucket Cloud.
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub scm: String,

    /// Whether the wiki is enabled.
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub has_wiki: bool,

    /// Whether the issue tracker is enabled.
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub has_issues: bool,

    /// Project website URL.
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub website: String,

    /// Whether the repository is private.
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub is_private: bool,

    /// Fork policy: `allow_forks`, `no_public_forks` or `no_forks`.
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub fork_policy: String,

    /// Primary language tag.
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub language: String,

    /// Free-form description.
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Human-readable name of the repository.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    /// URL-safe identifier, derived from the name by the API when omitted.
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub slug: String,

    /// Unique identifier (with curly braces), only ever set by the API.
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub uuid: String,

    /// Project the repository belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectKey>,

    /// Hypermedia links; only the clone endpoints are modelled.
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "RepositoryLinks::is_empty")]
    pub links: RepositoryLinks,
}

/// Project key for assigning a repository to a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectKey {
    /// The short alphanumeric key identifying the project.
    #[serde(default, deserialize_with = "null_as_default")]
    pub key: String,
}

/// The `links` object of a repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepositoryLinks {
    /// Clone endpoints, one per protocol.
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub clone: Vec<CloneUrl>,
}

impl RepositoryLinks {
    fn is_empty(&self) -> bool {
        self.clone.is_empty()
    }
}

/// A clone endpoint, e.g. `{"name": "https", "href": "https://bitbucket.org/acme/widgets.git"}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CloneUrl {
    /// The clone URL.
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub href: String,

    /// The protocol name (`https`, `ssh`).
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub name: String,
}

impl Repository {
    /// Splits the clone links into `(https, ssh)` URLs.
    ///
    /// A link named exactly `https` fills the first slot; every other link
    /// fills the second, so with several non-https links the last one wins.
    pub fn clone_urls(&self) -> (Option<&str>, Option<&str>) {
        let mut https = None;
        let mut ssh = None;
        for link in &self.links.clone {
            if link.name == "https" {
                https = Some(link.href.as_str());
            } else {
                ssh = Some(link.href.as_str());
            }
        }
        (https, ssh)
    }
}

pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}

pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
