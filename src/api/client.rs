//
//  bitbucket-provider
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client for the Bitbucket Cloud API
//!
//! Resources never talk to `reqwest` directly. They depend on the
//! [`HttpClient`] trait, which exposes exactly four verbs taking a path
//! relative to the API root (for example `2.0/repositories/acme/widgets`).
//! [`BitbucketClient`] is the production implementation.
//!
//! ## Features
//!
//! - Authentication header injection
//! - Raw status + body responses, so each caller decides what a non-2xx means
//! - Custom User-Agent header

use async_trait::async_trait;
use reqwest::{Client, Method};
use url::Url;

use super::common::{ApiError, HttpResponse};
use crate::auth::AuthCredential;
use crate::config::ProviderConfig;

/// Default root of the Bitbucket Cloud API. Paths carry the `2.0/` prefix.
pub const DEFAULT_BASE_URL: &str = "https://api.bitbucket.org/";

/// The request surface consumed by resources.
///
/// Every method returns `Ok` for any response that came back over the wire,
/// whatever its status. `Err` is reserved for transport failures.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Issues a GET request.
    async fn get(&self, path: &str) -> Result<HttpResponse, ApiError>;

    /// Issues a POST request with a JSON body.
    async fn post(&self, path: &str, body: Vec<u8>) -> Result<HttpResponse, ApiError>;

    /// Issues a PUT request with a JSON body.
    async fn put(&self, path: &str, body: Vec<u8>) -> Result<HttpResponse, ApiError>;

    /// Issues a DELETE request.
    async fn delete(&self, path: &str) -> Result<HttpResponse, ApiError>;
}

/// The HTTP client for Bitbucket Cloud.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use bitbucket_provider::api::BitbucketClient;
/// use bitbucket_provider::auth::AuthCredential;
///
/// let client = BitbucketClient::cloud()?
///     .with_auth(AuthCredential::bearer("your-token"));
/// # Ok::<(), anyhow::Error>(())
/// ```
pub struct BitbucketClient {
    /// The underlying HTTP client
    http: Client,
    /// API root that relative paths are joined onto
    base_url: Url,
    /// Optional authentication credentials
    auth: Option<AuthCredential>,
}

impl BitbucketClient {
    /// Creates a client targeting `https://api.bitbucket.org/`.
    pub fn cloud() -> anyhow::Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a client targeting a custom API root.
    ///
    /// Used for proxies and for tests against a local mock server. A trailing
    /// slash is added when missing so relative paths join underneath it.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bitbucket_provider::api::BitbucketClient;
    ///
    /// let client = BitbucketClient::with_base_url("http://127.0.0.1:8080")?;
    /// assert_eq!(client.base_url().as_str(), "http://127.0.0.1:8080/");
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn with_base_url(base_url: &str) -> anyhow::Result<Self> {
        let mut base = base_url.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }

        Ok(Self {
            http: Client::builder()
                .user_agent(format!("bbtf/{}", crate::VERSION))
                .build()?,
            base_url: Url::parse(&base)?,
            auth: None,
        })
    }

    /// Creates a client from provider configuration, including credentials.
    pub fn from_config(config: &ProviderConfig) -> anyhow::Result<Self> {
        let client = Self::with_base_url(&config.base_url)?;
        Ok(match config.credential() {
            Some(auth) => client.with_auth(auth),
            None => client,
        })
    }

    /// Sets the authentication credentials for this client.
    pub fn with_auth(mut self, auth: AuthCredential) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Returns the API root.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds the absolute URL for a relative API path.
    pub fn url_for(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<HttpResponse, ApiError> {
        let url = self.url_for(path)?;
        tracing::debug!("{} {}", method, url);

        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body);
        }

        if let Some(auth) = &self.auth {
            tracing::debug!(
                "using {} credentials",
                if auth.is_bearer() { "bearer token" } else { "app password" }
            );
            request = auth.apply_to_request(request);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        tracing::debug!("status {}", status);

        Ok(HttpResponse::new(status, bytes.to_vec()))
    }
}

#[async_trait]
impl HttpClient for BitbucketClient {
    async fn get(&self, path: &str) -> Result<HttpResponse, ApiError> {
        self.send(Method::GET, path, None).await
    }

    async fn post(&self, path: &str, body: Vec<u8>) -> Result<HttpResponse, ApiError> {
        self.send(Method::POST, path, Some(body)).await
    }

    async fn put(&self, path: &str, body: Vec<u8>) -> Result<HttpResponse, ApiError> {
        self.send(Method::PUT, path, Some(body)).await
    }

    async fn delete(&self, path: &str) -> Result<HttpResponse, ApiError> {
        self.send(Method::DELETE, path, None).await
    }
}
