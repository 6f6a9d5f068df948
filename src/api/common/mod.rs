//
//  bitbucket-provider
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API types shared by the HTTP client and the resources.
//!
//! # Overview
//!
//! - [`ApiError`] - Unified error type for transport failures and non-2xx responses
//! - [`HttpResponse`] - Status and raw body of a completed exchange
//! - [`format_api_error`] - Extracts a readable message from Bitbucket error bodies
//!
//! # Example
//!
//! ```rust
//! use bitbucket_provider::api::common::ApiError;
//!
//! fn handle_result<T>(result: Result<T, ApiError>) {
//!     match result {
//!         Ok(_) => println!("Success!"),
//!         Err(ApiError::AuthFailed(reason)) => println!("Check credentials: {}", reason),
//!         Err(ApiError::NotFound(resource)) => println!("Resource not found: {}", resource),
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Unified error type for all Bitbucket API operations.
///
/// # Variants
///
/// | Variant | Description | HTTP Status |
/// |---------|-------------|-------------|
/// | `AuthFailed` | Invalid or missing credentials | 401 |
/// | `Forbidden` | Insufficient permissions | 403 |
/// | `NotFound` | Requested resource does not exist | 404 |
/// | `BadRequest` | Invalid request parameters | 400 |
/// | `RateLimited` | Too many requests | 429 |
/// | `ServerError` | Internal server error | 5xx |
/// | `Network` | Transport failure | N/A |
/// | `Unknown` | Any other non-2xx status | N/A |
///
/// # Notes
///
/// - The `Network` variant automatically converts from `reqwest::Error`
/// - Nothing in this crate retries; every variant is surfaced to the caller as-is
#[derive(Error, Debug)]
pub enum ApiError {
    /// Authentication failed due to invalid or missing credentials.
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// Access to the resource is forbidden.
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// The requested resource was not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The request was malformed or contained invalid parameters.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// API rate limit has been exceeded.
    #[error("Rate limit exceeded")]
    RateLimited,

    /// An internal server error occurred on the Bitbucket side (HTTP 5xx).
    #[error("Server error: {0}")]
    ServerError(String),

    /// A network-level error occurred during the request.
    ///
    /// Covers connection failures, timeouts, DNS resolution errors,
    /// and other transport-layer issues.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The request URL could not be built from the base URL and path.
    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Any other unsuccessful status.
    #[error("API error ({status}): {message}")]
    Unknown {
        /// The HTTP status returned by the API
        status: StatusCode,
        /// The extracted error message
        message: String,
    },
}

impl ApiError {
    /// Maps an unsuccessful response to the matching error variant.
    ///
    /// The message is extracted with [`format_api_error`], so callers see
    /// Bitbucket's own wording instead of a raw JSON body.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let message = format_api_error(status, body);
        match status {
            StatusCode::UNAUTHORIZED => Self::AuthFailed(message),
            StatusCode::FORBIDDEN => Self::Forbidden(message),
            StatusCode::NOT_FOUND => Self::NotFound(message),
            StatusCode::BAD_REQUEST => Self::BadRequest(message),
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimited,
            s if s.is_server_error() => Self::ServerError(message),
            _ => Self::Unknown { status, message },
        }
    }
}

/// A completed HTTP exchange: the status code and the raw response body.
///
/// Unlike the request helpers that fail on any non-2xx status, an
/// `HttpResponse` is returned for every response that made it back over the
/// wire. Callers decide per call whether a non-2xx status is fatal.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub status: StatusCode,

    /// The raw response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a response from a status and a body.
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns `true` for any 2xx status.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns `true` only for `200 OK`.
    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK
    }

    /// Decodes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Returns the body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Converts a non-2xx response into an [`ApiError`].
    pub fn error_for_status(self) -> Result<Self, ApiError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ApiError::from_response(self.status, &self.text()))
        }
    }
}

/// Parses a Bitbucket API error response and extracts a user-friendly message.
///
/// Bitbucket Cloud returns errors in the format:
/// ```json
/// {"type": "error", "error": {"message": "Human readable message"}}
/// ```
///
/// Some endpoints use `{"error": {"detail": "..."}}` or a bare `{"message": "..."}`.
/// If none of these match, the status and raw body are returned.
pub fn format_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        // Cloud format: {"type": "error", "error": {"message": "..."}}
        if let Some(message) = json
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            return message.to_string();
        }

        // Server format: {"errors": [{"message": "..."}]}
        if let Some(message) = json
            .get("errors")
            .and_then(|e| e.as_array())
            .and_then(|arr| arr.first())
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            return message.to_string();
        }

        if let Some(detail) = json
            .get("error")
            .and_then(|e| e.get("detail"))
            .and_then(|m| m.as_str())
        {
            return detail.to_string();
        }

        if let Some(message) = json.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }

    if body.is_empty() {
        return status.to_string();
    }

    format!("{}: {}", status, body)
}
