//
//  bitbucket-provider
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! HTTP plumbing and wire types for the Bitbucket Cloud API v2.0.
//!
//! ## Architecture
//!
//! - [`client`]: The [`HttpClient`] contract and the reqwest-backed [`BitbucketClient`]
//! - [`cloud`]: Request/response bodies and resource paths
//! - [`common`]: Shared types ([`ApiError`], [`HttpResponse`])
//!
//! ## Error Handling
//!
//! Transport failures surface as [`ApiError::Network`]. Non-2xx responses are
//! returned as plain [`HttpResponse`] values; callers that treat them as fatal
//! convert them with [`HttpResponse::error_for_status`]:
//!
//! - `AuthFailed`: 401 Unauthorized
//! - `Forbidden`: 403 Forbidden
//! - `NotFound`: 404 Not Found
//! - `RateLimited`: 429 Too Many Requests
//! - `ServerError`: 5xx Server Errors

pub mod client;

pub mod cloud;

pub mod common;

pub use client::{BitbucketClient, HttpClient, DEFAULT_BASE_URL};

pub use common::{format_api_error, ApiError, HttpResponse};
