//
//  bitbucket-provider
//  api/cloud/branching_model.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Branching model settings sub-resource.
//!
//! Read and replaced as a whole through
//! `2.0/repositories/{owner}/{slug}/branching-model/settings`.
//!
//! ```text
//! {
//!   "development":  {"is_valid": true, "name": "develop", "use_mainbranch": false},
//!   "production":   {"is_valid": true, "enabled": true, "name": "", "use_mainbranch": true},
//!   "branch_types": [{"kind": "feature", "enabled": true, "prefix": "feature/"}]
//! }
//! ```
//!
//! `is_valid` is computed by Bitbucket and only ever decoded.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::repositories::{is_false, null_as_default};

/// Body of `GET`/`PUT .../branching-model/settings`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BranchingModelSettings {
    /// Development branch; left out of the body when not configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub development: Option<DevelopmentBranch>,

    /// Production branch; left out of the body when not configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production: Option<ProductionBranch>,

    /// Branch type prefixes, in order.
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub branch_types: Vec<BranchType>,
}

/// Development branch descriptor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DevelopmentBranch {
    /// Whether the named branch exists. Computed by Bitbucket.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_valid: bool,

    /// Branch name, ignored when `use_mainbranch` is set.
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Track the repository's main branch instead of a named one.
    #[serde(default)]
    pub use_mainbranch: bool,
}

/// Production branch descriptor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductionBranch {
    /// Whether the named branch exists. Computed by Bitbucket.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_valid: bool,

    /// Whether a production branch is configured at all.
    #[serde(default)]
    pub enabled: bool,

    /// Branch name, ignored when `use_mainbranch` is set.
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Track the repository's main branch instead of a named one.
    #[serde(default)]
    pub use_mainbranch: bool,
}

/// A branch type and its prefix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchType {
    /// Which branch type this entry configures.
    pub kind: BranchKind,

    /// Whether the branch type is offered when creating branches.
    #[serde(default)]
    pub enabled: bool,

    /// Prefix prepended to branch names of this type, e.g. `feature/`.
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub prefix: String,
}

/// The four branch types Bitbucket knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchKind {
    Release,
    Hotfix,
    Feature,
    Bugfix,
}

impl BranchKind {
    /// Every accepted kind, in the order Bitbucket lists them.
    pub const ALL: [&'static str; 4] = ["release", "hotfix", "feature", "bugfix"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Release => "release",
            Self::Hotfix => "hotfix",
            Self::Feature => "feature",
            Self::Bugfix => "bugfix",
        }
    }
}

impl fmt::Display for BranchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BranchKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "release" => Ok(Self::Release),
            "hotfix" => Ok(Self::Hotfix),
            "feature" => Ok(Self::Feature),
            "bugfix" => Ok(Self::Bugfix),
            other => Err(format!(
                "unknown branch type '{}', expected one of: {}",
                other,
                Self::ALL.join(", ")
            )),
        }
    }
}
