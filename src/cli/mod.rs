//
//  bitbucket-provider
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod repository;
mod schema;

pub use repository::RepositoryCommand;
pub use schema::SchemaCommand;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::ProviderConfig;

/// bbtf - Drive the Bitbucket repository resource from the command line
#[derive(Parser, Debug)]
#[command(
    name = "bbtf",
    version,
    about = "Drive the Bitbucket repository resource from the command line",
    long_about = "bbtf runs a single lifecycle operation of the bitbucket_repository resource \
                  against a JSON state document and prints the resulting state.",
    propagate_version = true,
    after_help = "Use 'bbtf <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Provider configuration file
    #[arg(long, global = true, env = "BBTF_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the API root (e.g. http://localhost:8080/)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

impl GlobalOptions {
    /// Loads provider configuration, honouring `--config` and `--base-url`.
    pub fn provider_config(&self) -> Result<ProviderConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let mut config = ProviderConfig::load_from(path)?;
                config.apply_env(|key| std::env::var(key).ok());
                config
            }
            None => ProviderConfig::load()?,
        };

        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        Ok(config)
    }
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a lifecycle operation on a repository
    #[command(visible_alias = "repo")]
    Repository(RepositoryCommand),

    /// Show the repository schema
    Schema(SchemaCommand),

    /// Print version information
    Version,
}
