//
//  bitbucket-provider
//  resources/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Managed Resources
//!
//! Each resource implements [`Resource`]: a schema plus create, read,
//! update, delete and import driven by the host. Operations receive the
//! host's state object and the HTTP client; they keep no state of their own.
//!
//! - [`repository`]: `bitbucket_repository`

use async_trait::async_trait;
use thiserror::Error;

use crate::api::{ApiError, HttpClient};
use crate::schema::{Schema, SchemaError};
use crate::state::ResourceData;

pub mod repository;

#[cfg(test)]
pub(crate) mod testing;

pub use repository::RepositoryResource;

/// Errors returned by resource lifecycle operations.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// The resource id does not have the expected shape.
    #[error("Incorrect ID format \"{id}\", should match `{expected}`")]
    InvalidId {
        /// The rejected id
        id: String,
        /// Human-readable description of the expected format
        expected: &'static str,
    },

    /// The configuration failed schema validation.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// A request failed in transport or returned an unsuccessful status.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A request body could not be encoded or a response body decoded.
    #[error("Failed to decode API payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A resource type managed by the provider.
#[async_trait]
pub trait Resource: Send + Sync {
    /// The resource type name, e.g. `bitbucket_repository`.
    fn name(&self) -> &'static str;

    /// The attribute schema.
    fn schema(&self) -> Schema;

    /// Creates the remote resource and sets the id on `data`.
    async fn create(
        &self,
        data: &mut dyn ResourceData,
        client: &dyn HttpClient,
    ) -> Result<(), ResourceError>;

    /// Refreshes `data` from the remote resource.
    async fn read(
        &self,
        data: &mut dyn ResourceData,
        client: &dyn HttpClient,
    ) -> Result<(), ResourceError>;

    /// Pushes the full configuration in `data` to the remote resource.
    async fn update(
        &self,
        data: &mut dyn ResourceData,
        client: &dyn HttpClient,
    ) -> Result<(), ResourceError>;

    /// Deletes the remote resource.
    async fn delete(
        &self,
        data: &mut dyn ResourceData,
        client: &dyn HttpClient,
    ) -> Result<(), ResourceError>;

    /// Adopts an existing remote resource. `data` carries only the id.
    ///
    /// The default passes the id straight through to [`Resource::read`].
    async fn import(
        &self,
        data: &mut dyn ResourceData,
        client: &dyn HttpClient,
    ) -> Result<(), ResourceError> {
        self.read(data, client).await
    }
}
