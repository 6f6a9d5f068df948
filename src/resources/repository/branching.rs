//
//  bitbucket-provider
//  resources/repository/branching.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Branching model settings: the `branching_model_settings` block.
//!
//! The block is a list of at most one entry holding optional `development`
//! and `production` blocks (each a list of at most one entry) and up to four
//! `branch_types`:
//!
//! ```text
//! branching_model_settings = [{
//!   development  = [{ name = "develop", use_mainbranch = false }]
//!   production   = [{ enabled = true, name = "", use_mainbranch = true }]
//!   branch_types = [{ kind = "feature", enabled = true, prefix = "feature/" }]
//! }]
//! ```
//!
//! [`BranchingModelConfig::expand`] turns the typed block into the wire body
//! and [`BranchingModelConfig::flatten`] maps a decoded body back. Blocks
//! that are absent on one side stay absent on the other.

use serde_json::{json, Map, Value};

use crate::api::cloud::{
    BranchKind, BranchType, BranchingModelSettings, DevelopmentBranch, ProductionBranch,
};
use crate::schema::{get_block, get_blocks, get_bool, get_string, Attribute, Schema, SchemaError};

/// Bitbucket accepts one entry per branch kind.
pub const MAX_BRANCH_TYPES: usize = 4;

/// Schema of a single `branching_model_settings` entry.
pub fn branching_model_schema() -> Schema {
    Schema::new(vec![
        Attribute::list(
            "development",
            Schema::new(vec![
                Attribute::string("name").optional(),
                Attribute::bool("use_mainbranch").optional().default(true),
            ]),
        )
        .optional()
        .max_items(1),
        Attribute::list(
            "branch_types",
            Schema::new(vec![
                Attribute::string("kind").required().one_of(&BranchKind::ALL),
                Attribute::bool("enabled").optional().default(true),
                Attribute::string("prefix").optional(),
            ]),
        )
        .optional()
        .max_items(MAX_BRANCH_TYPES),
        Attribute::list(
            "production",
            Schema::new(vec![
                Attribute::bool("enabled").optional().default(false),
                Attribute::string("name").optional(),
                Attribute::bool("use_mainbranch").optional().default(true),
            ]),
        )
        .optional()
        .max_items(1),
    ])
}

/// Typed `branching_model_settings` block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BranchingModelConfig {
    pub development: Option<DevelopmentBranchConfig>,
    pub production: Option<ProductionBranchConfig>,
    /// At most [`MAX_BRANCH_TYPES`] entries, order preserved.
    pub branch_types: Vec<BranchTypeConfig>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DevelopmentBranchConfig {
    pub name: String,
    pub use_mainbranch: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductionBranchConfig {
    pub enabled: bool,
    pub name: String,
    pub use_mainbranch: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BranchTypeConfig {
    pub kind: BranchKind,
    pub enabled: bool,
    pub prefix: String,
}

impl BranchingModelConfig {
    /// Extracts the block from a schema-resolved entry.
    pub fn from_attributes(map: &Map<String, Value>) -> Result<Self, SchemaError> {
        let development = get_block(map, "development")?
            .map(|block| -> Result<_, SchemaError> {
                Ok(DevelopmentBranchConfig {
                    name: get_string(block, "name")?,
                    use_mainbranch: get_bool(block, "use_mainbranch")?,
                })
            })
            .transpose()?;

        let production = get_block(map, "production")?
            .map(|block| -> Result<_, SchemaError> {
                Ok(ProductionBranchConfig {
                    enabled: get_bool(block, "enabled")?,
                    name: get_string(block, "name")?,
                    use_mainbranch: get_bool(block, "use_mainbranch")?,
                })
            })
            .transpose()?;

        let blocks = get_blocks(map, "branch_types")?;
        if blocks.len() > MAX_BRANCH_TYPES {
            return Err(SchemaError::TooManyItems {
                path: "branching_model_settings.branch_types".to_string(),
                max: MAX_BRANCH_TYPES,
                found: blocks.len(),
            });
        }

        let mut branch_types = Vec::with_capacity(blocks.len());
        for block in blocks {
            let kind = get_string(block, "kind")?;
            let kind = kind.parse::<BranchKind>().map_err(|_| SchemaError::NotAllowed {
                path: "branching_model_settings.branch_types.kind".to_string(),
                value: kind.clone(),
                allowed: BranchKind::ALL.iter().map(|k| k.to_string()).collect(),
            })?;
            branch_types.push(BranchTypeConfig {
                kind,
                enabled: get_bool(block, "enabled")?,
                prefix: get_string(block, "prefix")?,
            });
        }

        Ok(Self {
            development,
            production,
            branch_types,
        })
    }

    /// Renders the block as an attribute tree entry.
    pub fn to_attributes(&self) -> Value {
        let development: Vec<Value> = self
            .development
            .iter()
            .map(|d| json!({"name": d.name, "use_mainbranch": d.use_mainbranch}))
            .collect();

        let production: Vec<Value> = self
            .production
            .iter()
            .map(|p| json!({"enabled": p.enabled, "name": p.name, "use_mainbranch": p.use_mainbranch}))
            .collect();

        let branch_types: Vec<Value> = self
            .branch_types
            .iter()
            .map(|b| json!({"kind": b.kind.as_str(), "enabled": b.enabled, "prefix": b.prefix}))
            .collect();

        json!({
            "branch_types": branch_types,
            "development": development,
            "production": production,
        })
    }

    /// Builds the wire body.
    pub fn expand(&self) -> BranchingModelSettings {
        BranchingModelSettings {
            development: self.development.as_ref().map(|d| DevelopmentBranch {
                is_valid: false,
                name: d.name.clone(),
                use_mainbranch: d.use_mainbranch,
            }),
            production: self.production.as_ref().map(|p| ProductionBranch {
                is_valid: false,
                enabled: p.enabled,
                name: p.name.clone(),
                use_mainbranch: p.use_mainbranch,
            }),
            branch_types: self
                .branch_types
                .iter()
                .map(|b| BranchType {
                    kind: b.kind,
                    enabled: b.enabled,
                    prefix: b.prefix.clone(),
                })
                .collect(),
        }
    }

    /// Maps a decoded wire body back to the block. `is_valid` has no
    /// counterpart in the block and is dropped.
    pub fn flatten(settings: &BranchingModelSettings) -> Self {
        Self {
            development: settings.development.as_ref().map(|d| DevelopmentBranchConfig {
                name: d.name.clone(),
                use_mainbranch: d.use_mainbranch,
            }),
            production: settings.production.as_ref().map(|p| ProductionBranchConfig {
                enabled: p.enabled,
                name: p.name.clone(),
                use_mainbranch: p.use_mainbranch,
            }),
            branch_types: settings
                .branch_types
                .iter()
                .map(|b| BranchTypeConfig {
                    kind: b.kind,
                    enabled: b.enabled,
                    prefix: b.prefix.clone(),
                })
                .collect(),
        }
    }
}
