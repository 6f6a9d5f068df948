//
//  bitbucket-provider
//  resources/repository/schema.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Schema of the `bitbucket_repository` resource.

use super::branching::branching_model_schema;
use crate::schema::{Attribute, Schema};

/// Accepted `fork_policy` values.
pub const FORK_POLICIES: [&str; 3] = ["allow_forks", "no_public_forks", "no_forks"];

/// Builds the repository schema.
pub fn repository_schema() -> Schema {
    Schema::new(vec![
        Attribute::string("scm")
            .optional()
            .default("git")
            .describe("Source control kind"),
        Attribute::bool("has_wiki")
            .optional()
            .default(false)
            .describe("Enable the repository wiki"),
        Attribute::bool("has_issues")
            .optional()
            .default(false)
            .describe("Enable the issue tracker"),
        Attribute::string("website")
            .optional()
            .describe("Project website URL"),
        Attribute::string("clone_ssh")
            .computed()
            .describe("SSH clone URL"),
        Attribute::string("clone_https")
            .computed()
            .describe("HTTPS clone URL"),
        Attribute::string("project_key")
            .optional()
            .describe("Key of the project the repository belongs to"),
        Attribute::bool("is_private")
            .optional()
            .default(true)
            .describe("Make the repository private"),
        Attribute::bool("pipelines_enabled")
            .optional()
            .default(false)
            .describe("Turn on Bitbucket Pipelines"),
        Attribute::string("fork_policy")
            .optional()
            .default("allow_forks")
            .one_of(&FORK_POLICIES)
            .describe("Who may fork the repository"),
        Attribute::string("language")
            .optional()
            .describe("Primary language"),
        Attribute::string("description").optional(),
        Attribute::string("owner")
            .required()
            .describe("Workspace or user that owns the repository"),
        Attribute::string("name").required(),
        Attribute::string("slug")
            .optional()
            .computed()
            .describe("URL slug, derived from the name when unset"),
        Attribute::list("branching_model_settings", branching_model_schema())
            .optional()
            .max_items(1)
            .describe("Development/production branches and branch type prefixes"),
    ])
}
