//
//  bitbucket-provider
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Bitbucket Provider Library
//!
//! Infrastructure-as-code provider pieces for Bitbucket Cloud. The crate
//! exposes a single managed resource, `bitbucket_repository`, whose
//! lifecycle (create, read, update, delete, import) is mapped onto the
//! Bitbucket 2.0 REST API.
//!
//! ## Overview
//!
//! A repository is more than the primary `2.0/repositories/{owner}/{slug}`
//! document. Two sub-resources ride along with it:
//!
//! - the pipelines configuration (`pipelines_enabled`)
//! - the branching-model settings (`branching_model_settings`)
//!
//! The resource writes all three on create and update and reads all three
//! back into state.
//!
//! ## Module Structure
//!
//! - [`api`]: HTTP client and wire documents
//! - [`auth`]: App-password and bearer-token credentials
//! - [`config`]: Provider configuration file and environment overrides
//! - [`schema`]: Attribute schema, defaults and validation
//! - [`state`]: The attribute store a resource reads and writes
//! - [`resources`]: Resource implementations
//! - [`provider`]: Provider descriptor and operation dispatch
//! - [`cli`]: The `bbtf` command-line driver
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use bitbucket_provider::{Operation, Provider, ProviderConfig, ResourceState};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let provider = Provider::new(&ProviderConfig::load()?)?;
//! let mut state = ResourceState::with_id("acme/widgets");
//! provider.apply("bitbucket_repository", Operation::Import, &mut state).await?;
//! println!("{}", serde_json::to_string_pretty(&state)?);
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions.
pub mod cli;

/// API client and wire documents for Bitbucket Cloud.
///
/// The [`api::HttpClient`] trait is the seam resources talk through; the
/// production implementation is [`api::BitbucketClient`].
pub mod api;

/// Authentication credentials.
pub mod auth;

/// Provider configuration.
///
/// Stored in platform-specific locations:
/// - Linux: `~/.config/bbtf/config.toml`
/// - macOS: `~/Library/Application Support/bbtf/config.toml`
/// - Windows: `%APPDATA%\bbtf\config.toml`
pub mod config;

/// Provider descriptor and lifecycle dispatch.
pub mod provider;

/// Managed resource implementations.
pub mod resources;

/// Attribute schema declarations.
pub mod schema;

/// Resource state storage.
pub mod state;

pub use config::ProviderConfig;
pub use provider::{Operation, Provider};
pub use state::{ResourceData, ResourceState};

/// Application name constant.
///
/// The name of the CLI binary, used for display purposes and configuration paths.
pub const APP_NAME: &str = "bbtf";

/// Application version constant, derived from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// - `0`: Success
/// - `1-3`: General errors and usage issues
/// - `4-7`: Authentication-related issues
/// - `8-15`: Resource-related issues
/// - `32+`: External service issues
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error. Check stderr for details.
    pub const ERROR: i32 = 1;

    /// Authentication required or failed.
    ///
    /// Set `BITBUCKET_TOKEN`, or `BITBUCKET_USERNAME` and
    /// `BITBUCKET_PASSWORD`, or add them to the config file.
    pub const AUTH_ERROR: i32 = 4;

    /// The repository does not exist or is not visible to the caller.
    pub const NOT_FOUND: i32 = 8;

    /// The Bitbucket API rate limit has been exceeded.
    pub const RATE_LIMIT: i32 = 32;
}
