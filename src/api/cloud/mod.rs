//
//  bitbucket-provider
//  api/cloud/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Bitbucket Cloud API v2.0 wire types.
//!
//! # Module Organization
//!
//! - [`repositories`] - The primary repository body
//! - [`pipelines`] - The `pipelines_config` sub-resource
//! - [`branching_model`] - The `branching-model/settings` sub-resource
//!
//! # Notes
//!
//! - UUIDs are returned with curly braces (e.g., `{123e4567-e89b-...}`)
//! - Sub-resources live under the repository path and are replaced independently

pub mod branching_model;
pub mod pipelines;
pub mod repositories;

pub use branching_model::*;
pub use pipelines::*;
pub use repositories::*;

/// Path of the primary repository resource.
///
/// # Example
///
/// ```rust
/// use bitbucket_provider::api::cloud::repository_path;
///
/// assert_eq!(repository_path("acme", "widgets"), "2.0/repositories/acme/widgets");
/// ```
pub fn repository_path(owner: &str, slug: &str) -> String {
    format!("2.0/repositories/{}/{}", owner, slug)
}

/// Path of the pipelines configuration sub-resource.
pub fn pipelines_config_path(owner: &str, slug: &str) -> String {
    format!("{}/pipelines_config", repository_path(owner, slug))
}

/// Path of the branching model settings sub-resource.
pub fn branching_model_settings_path(owner: &str, slug: &str) -> String {
    format!("{}/branching-model/settings", repository_path(owner, slug))
}
