//
//  bitbucket-provider
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use bitbucket_provider::api::ApiError;
use bitbucket_provider::cli::{Cli, Commands};
use bitbucket_provider::exit_codes;
use bitbucket_provider::resources::ResourceError;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_code_for(&e));
        }
    }
}

/// Initialize logging based on environment
fn init_logging() {
    let filter = EnvFilter::try_from_env("BBTF_DEBUG")
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn exit_code_for(error: &anyhow::Error) -> i32 {
    let api_error = error.chain().find_map(|cause| {
        cause.downcast_ref::<ApiError>().or_else(|| match cause.downcast_ref::<ResourceError>() {
            Some(ResourceError::Api(inner)) => Some(inner),
            _ => None,
        })
    });
    match api_error {
        Some(ApiError::AuthFailed(_)) | Some(ApiError::Forbidden(_)) => exit_codes::AUTH_ERROR,
        Some(ApiError::NotFound(_)) => exit_codes::NOT_FOUND,
        Some(ApiError::RateLimited) => exit_codes::RATE_LIMIT,
        _ => exit_codes::ERROR,
    }
}

/// Main command dispatcher
async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Repository(cmd) => cmd.run(&cli.global).await,
        Commands::Schema(cmd) => cmd.run(&cli.global).await,
        Commands::Version => {
            println!("{} version {}", bitbucket_provider::APP_NAME, bitbucket_provider::VERSION);
            Ok(())
        }
    }
}
