//
//  bitbucket-provider
//  cli/repository.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Repository lifecycle commands.
//!
//! Each subcommand loads a state document, runs one operation and prints
//! the resulting document:
//!
//! ```json
//! { "id": "acme/widgets", "attributes": { "owner": "acme", "name": "widgets" } }
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use super::GlobalOptions;
use crate::provider::{Operation, Provider};
use crate::resources::repository::RESOURCE_NAME;
use crate::state::ResourceState;

/// Run a lifecycle operation on a repository
#[derive(Args, Debug)]
pub struct RepositoryCommand {
    #[command(subcommand)]
    pub command: RepositorySubcommand,
}

#[derive(Subcommand, Debug)]
pub enum RepositorySubcommand {
    /// Create the repository described by a state document
    Create(StateArgs),

    /// Refresh a state document from Bitbucket
    Read(StateArgs),

    /// Push the configuration in a state document to Bitbucket
    Update(StateArgs),

    /// Delete the repository described by a state document
    Delete(StateArgs),

    /// Adopt an existing repository by id
    Import(ImportArgs),
}

#[derive(Args, Debug)]
pub struct StateArgs {
    /// State document (JSON)
    #[arg(long, short = 's')]
    pub state: PathBuf,

    /// Write the resulting state back to the document
    #[arg(long)]
    pub in_place: bool,
}

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Repository id in OWNER/SLUG format
    pub id: String,

    /// Write the imported state to this file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

impl RepositoryCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let provider = Provider::new(&global.provider_config()?)?;

        match &self.command {
            RepositorySubcommand::Create(args) => {
                run_with_state(&provider, Operation::Create, args).await
            }
            RepositorySubcommand::Read(args) => {
                run_with_state(&provider, Operation::Read, args).await
            }
            RepositorySubcommand::Update(args) => {
                run_with_state(&provider, Operation::Update, args).await
            }
            RepositorySubcommand::Delete(args) => {
                run_with_state(&provider, Operation::Delete, args).await
            }
            RepositorySubcommand::Import(args) => {
                let mut state = ResourceState::with_id(args.id.clone());
                provider
                    .apply(RESOURCE_NAME, Operation::Import, &mut state)
                    .await?;
                emit(&state, args.output.as_deref())
            }
        }
    }
}

async fn run_with_state(provider: &Provider, operation: Operation, args: &StateArgs) -> Result<()> {
    let mut state = load_state(&args.state)?;
    provider
        .apply(RESOURCE_NAME, operation, &mut state)
        .await
        .with_context(|| format!("{} failed for {}", operation, args.state.display()))?;

    let target = args.in_place.then_some(args.state.as_path());
    emit(&state, target)
}

fn load_state(path: &Path) -> Result<ResourceState> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read state document {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid state document {}", path.display()))
}

fn emit(state: &ResourceState, target: Option<&Path>) -> Result<()> {
    let rendered = serde_json::to_string_pretty(state)?;
    match target {
        Some(path) => std::fs::write(path, rendered + "\n")
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            println!("{}", rendered);
            Ok(())
        }
    }
}
