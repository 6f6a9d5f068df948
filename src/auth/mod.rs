//
//  bitbucket-provider
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Credentials attached to every API request.
//!
//! ## Supported Authentication Methods
//!
//! - **App Password**: Username and app password sent as HTTP Basic auth.
//! - **Access Token**: Repository, project or workspace access token sent as a bearer token.
//!
//! ## Example
//!
//! ```rust
//! use bitbucket_provider::auth::AuthCredential;
//!
//! let credential = AuthCredential::app_password("jdoe", "app-password");
//! assert!(!credential.is_bearer());
//! ```

use std::fmt;

use reqwest::RequestBuilder;

/// Authentication credentials understood by the Bitbucket Cloud API.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthCredential {
    /// Username and app password, sent with HTTP Basic authentication.
    AppPassword {
        /// The Bitbucket username.
        username: String,
        /// The app password generated from Bitbucket settings.
        password: String,
    },
    /// Access token, sent in the `Authorization: Bearer` header.
    Bearer {
        /// The token string.
        token: String,
    },
}

impl AuthCredential {
    /// Creates an app password credential.
    pub fn app_password(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::AppPassword {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Creates a bearer token credential.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Returns `true` for token credentials.
    pub fn is_bearer(&self) -> bool {
        matches!(self, Self::Bearer { .. })
    }

    /// Applies the authentication credential to an HTTP request.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use bitbucket_provider::auth::AuthCredential;
    /// use reqwest::Client;
    ///
    /// async fn make_authenticated_request(credential: &AuthCredential) {
    ///     let client = Client::new();
    ///     let request = client.get("https://api.bitbucket.org/2.0/user");
    ///     let response = credential.apply_to_request(request).send().await;
    /// }
    /// ```
    pub fn apply_to_request(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Self::AppPassword { username, password } => {
                request.basic_auth(username, Some(password))
            }
            Self::Bearer { token } => request.bearer_auth(token),
        }
    }
}

// Secrets stay out of logs and `{:?}` output.
impl fmt::Debug for AuthCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AppPassword { username, .. } => f
                .debug_struct("AppPassword")
                .field("username", username)
                .field("password", &"***")
                .finish(),
            Self::Bearer { .. } => f.debug_struct("Bearer").field("token", &"***").finish(),
        }
    }
}
