//
//  bitbucket-provider
//  provider/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Provider
//!
//! The provider is built once per process. It owns the HTTP client and the
//! list of resource types it serves; hosts look resources up by type name.
//!
//! ```rust,no_run
//! use bitbucket_provider::config::ProviderConfig;
//! use bitbucket_provider::provider::Provider;
//!
//! let provider = Provider::new(&ProviderConfig::load()?)?;
//! let repository = provider.resource("bitbucket_repository").unwrap();
//! println!("{} has {} attributes", repository.name(), repository.schema().attributes.len());
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::sync::Arc;

use anyhow::Result;

use crate::api::{BitbucketClient, HttpClient};
use crate::config::ProviderConfig;
use crate::resources::{RepositoryResource, Resource};
use crate::state::ResourceData;

/// Provider descriptor: an HTTP client plus the resource types it manages.
pub struct Provider {
    client: Arc<dyn HttpClient>,
    resources: Vec<Box<dyn Resource>>,
}

impl Provider {
    /// Builds the provider with a [`BitbucketClient`] for `config`.
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let client = BitbucketClient::from_config(config)?;
        Ok(Self::with_client(Arc::new(client)))
    }

    /// Builds the provider around an existing client.
    pub fn with_client(client: Arc<dyn HttpClient>) -> Self {
        Self {
            client,
            resources: vec![Box::new(RepositoryResource::new())],
        }
    }

    /// The shared HTTP client.
    pub fn client(&self) -> &dyn HttpClient {
        self.client.as_ref()
    }

    /// Every resource type, in registration order.
    pub fn resources(&self) -> impl Iterator<Item = &dyn Resource> {
        self.resources.iter().map(|r| r.as_ref())
    }

    /// Looks up a resource type by name.
    pub fn resource(&self, name: &str) -> Option<&dyn Resource> {
        self.resources().find(|r| r.name() == name)
    }

    /// Runs a lifecycle operation against the named resource type.
    pub async fn apply(
        &self,
        resource: &str,
        operation: Operation,
        data: &mut dyn ResourceData,
    ) -> Result<()> {
        let handler = self
            .resource(resource)
            .ok_or_else(|| anyhow::anyhow!("Unknown resource type: {}", resource))?;
        let client = self.client();

        tracing::debug!("{} {}", operation, resource);
        match operation {
            Operation::Create => handler.create(data, client).await?,
            Operation::Read => handler.read(data, client).await?,
            Operation::Update => handler.update(data, client).await?,
            Operation::Delete => handler.delete(data, client).await?,
            Operation::Import => handler.import(data, client).await?,
        }
        Ok(())
    }
}

/// A lifecycle operation requested by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
    Import,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Import => "import",
        };
        f.write_str(name)
    }
}
