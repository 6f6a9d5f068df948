//
//  bitbucket-provider
//  resources/repository/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Typed view of a `bitbucket_repository` configuration.

use serde_json::{Map, Value};

use super::branching::BranchingModelConfig;
use super::schema::repository_schema;
use crate::api::cloud::{PipelinesConfig, ProjectKey, Repository};
use crate::schema::{get_block, get_bool, get_string, SchemaError};
use crate::state::ResourceData;

/// Declarative repository configuration, rebuilt from state for every
/// create and update.
#[derive(Debug, Clone, PartialEq)]
pub struct RepositoryConfig {
    pub owner: String,
    pub name: String,
    /// Empty when the slug should be derived from `name`.
    pub slug: String,
    pub scm: String,
    pub is_private: bool,
    pub has_wiki: bool,
    pub has_issues: bool,
    pub website: String,
    pub fork_policy: String,
    pub language: String,
    pub description: String,
    pub project_key: String,
    pub pipelines_enabled: bool,
    pub branching_model: Option<BranchingModelConfig>,
}

impl RepositoryConfig {
    /// Resolves the repository schema against `data` and extracts the result.
    pub fn from_resource_data(data: &dyn ResourceData) -> Result<Self, SchemaError> {
        let attributes = repository_schema().resolve(data)?;
        Self::from_attributes(&attributes)
    }

    /// Extracts the configuration from a schema-resolved attribute map.
    pub fn from_attributes(map: &Map<String, Value>) -> Result<Self, SchemaError> {
        let branching_model = get_block(map, "branching_model_settings")?
            .map(BranchingModelConfig::from_attributes)
            .transpose()?;

        Ok(Self {
            owner: get_string(map, "owner")?,
            name: get_string(map, "name")?,
            slug: get_string(map, "slug")?,
            scm: get_string(map, "scm")?,
            is_private: get_bool(map, "is_private")?,
            has_wiki: get_bool(map, "has_wiki")?,
            has_issues: get_bool(map, "has_issues")?,
            website: get_string(map, "website")?,
            fork_policy: get_string(map, "fork_policy")?,
            language: get_string(map, "language")?,
            description: get_string(map, "description")?,
            project_key: get_string(map, "project_key")?,
            pipelines_enabled: get_bool(map, "pipelines_enabled")?,
            branching_model,
        })
    }

    /// The slug used in resource paths: `slug` when set, `name` otherwise.
    pub fn repo_slug(&self) -> &str {
        if self.slug.is_empty() {
            &self.name
        } else {
            &self.slug
        }
    }

    /// The resource identity, `{owner}/{slug}`.
    pub fn id(&self) -> String {
        format!("{}/{}", self.owner, self.repo_slug())
    }

    /// Body for the primary resource.
    pub fn to_repository(&self) -> Repository {
        Repository {
            scm: self.scm.clone(),
            has_wiki: self.has_wiki,
            has_issues: self.has_issues,
            website: self.website.clone(),
            is_private: self.is_private,
            fork_policy: self.fork_policy.clone(),
            language: self.language.clone(),
            description: self.description.clone(),
            name: self.name.clone(),
            slug: self.slug.clone(),
            project: (!self.project_key.is_empty()).then(|| ProjectKey {
                key: self.project_key.clone(),
            }),
            ..Default::default()
        }
    }

    /// Body for the pipelines sub-resource.
    pub fn to_pipelines_config(&self) -> PipelinesConfig {
        PipelinesConfig {
            enabled: self.pipelines_enabled,
        }
    }
}
