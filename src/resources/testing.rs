//
//  bitbucket-provider
//  resources/testing.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Scripted [`HttpClient`] for lifecycle tests.

use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

use crate::api::{ApiError, HttpClient, HttpResponse};

/// A request seen by [`MockClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

/// How a route answers.
enum Reply {
    Status(StatusCode, String),
    Transport,
}

/// Answers requests from a fixed route table; unmatched routes get a 404.
#[derive(Default)]
pub struct MockClient {
    routes: Vec<(&'static str, String, Reply)>,
    calls: Mutex<Vec<Call>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a JSON response for `method path`.
    pub fn on(self, method: &'static str, path: &str, status: u16, body: Value) -> Self {
        self.on_raw(method, path, status, &body.to_string())
    }

    /// Registers a response with a verbatim body for `method path`.
    pub fn on_raw(mut self, method: &'static str, path: &str, status: u16, body: &str) -> Self {
        let status = StatusCode::from_u16(status).expect("valid status");
        self.routes
            .push((method, path.to_string(), Reply::Status(status, body.to_string())));
        self
    }

    /// Makes `method path` fail before any response arrives.
    pub fn fail(mut self, method: &'static str, path: &str) -> Self {
        self.routes.push((method, path.to_string(), Reply::Transport));
        self
    }

    /// Every request made so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock").clone()
    }

    /// `"METHOD path"` for every request made so far.
    pub fn call_lines(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .map(|c| format!("{} {}", c.method, c.path))
            .collect()
    }

    fn respond(
        &self,
        method: &'static str,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<HttpResponse, ApiError> {
        let body = body.map(|b| serde_json::from_slice(&b).expect("request body is JSON"));
        self.calls.lock().expect("calls lock").push(Call {
            method,
            path: path.to_string(),
            body,
        });

        match self
            .routes
            .iter()
            .find(|(m, p, _)| *m == method && p == path)
            .map(|(_, _, reply)| reply)
        {
            Some(Reply::Status(status, body)) => Ok(HttpResponse::new(*status, body.clone())),
            Some(Reply::Transport) => Err(transport_error()),
            None => Ok(HttpResponse::new(StatusCode::NOT_FOUND, "")),
        }
    }
}

/// A genuine `reqwest` error, produced without touching the network.
pub fn transport_error() -> ApiError {
    let err = reqwest::Client::new()
        .get("http://")
        .build()
        .expect_err("URL without a host");
    ApiError::Network(err)
}

#[async_trait]
impl HttpClient for MockClient {
    async fn get(&self, path: &str) -> Result<HttpResponse, ApiError> {
        self.respond("GET", path, None)
    }

    async fn post(&self, path: &str, body: Vec<u8>) -> Result<HttpResponse, ApiError> {
        self.respond("POST", path, Some(body))
    }

    async fn put(&self, path: &str, body: Vec<u8>) -> Result<HttpResponse, ApiError> {
        self.respond("PUT", path, Some(body))
    }

    async fn delete(&self, path: &str) -> Result<HttpResponse, ApiError> {
        self.respond("DELETE", path, None)
    }
}
