//
//  bitbucket-provider
//  api/cloud/pipelines.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pipelines configuration sub-resource.
//!
//! Bitbucket Pipelines is switched on or off per repository through
//! `2.0/repositories/{owner}/{slug}/pipelines_config`. The body is sent in
//! full on every create and update, `enabled: false` included.

use serde::{Deserialize, Serialize};

/// Body of `GET`/`PUT .../pipelines_config`.
///
/// # Example
///
/// ```rust
/// use bitbucket_provider::api::cloud::pipelines::PipelinesConfig;
///
/// let body = serde_json::to_string(&PipelinesConfig { enabled: false }).unwrap();
/// assert_eq!(body, r#"{"enabled":false}"#);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelinesConfig {
    /// Whether pipelines run for this repository.
    #[serde(default)]
    pub enabled: bool,
}
