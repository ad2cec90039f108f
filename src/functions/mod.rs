//! Serverless function handlers.
//!
//! # Data Flow
//! ```text
//! hosting platform / {prefix}/{name} route
//!     → FunctionEvent (method, query parameters, body)
//!     → invoke() (preflight short-circuit, same upstream calls as the proxy routes)
//!     → FunctionResponse (status, CORS headers, JSON body)
//! ```
//!
//! # Design Decisions
//! - Every response carries the configured CORS headers, errors included
//! - `OPTIONS` answers 200 with an empty body before any parameter checks
//! - Success and error bodies are identical to the proxy routes

pub mod handler;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use axum::{
    body::Body,
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
};

use crate::http::ApiError;

pub use handler::{function_handler, invoke};

/// The deployed functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    FetchRepos,
    FetchNews,
    FetchActivism,
    FetchScore,
}

impl Function {
    pub const ALL: [Function; 4] = [
        Function::FetchRepos,
        Function::FetchNews,
        Function::FetchActivism,
        Function::FetchScore,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Function::FetchRepos => "fetch-repos",
            Function::FetchNews => "fetch-news",
            Function::FetchActivism => "fetch-activism",
            Function::FetchScore => "fetch-score",
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Function {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Function::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| ApiError::UnknownFunction(s.to_string()))
    }
}

/// One invocation as delivered by the hosting platform.
#[derive(Debug, Clone, Default)]
pub struct FunctionEvent {
    pub http_method: Method,
    pub query_string_parameters: HashMap<String, String>,
    pub body: Option<String>,
}

impl FunctionEvent {
    pub fn new(http_method: Method) -> Self {
        Self {
            http_method,
            ..Self::default()
        }
    }

    pub fn with_param(mut self, key: &str, value: &str) -> Self {
        self.query_string_parameters
            .insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    fn param(&self, key: &str) -> Option<String> {
        self.query_string_parameters.get(key).cloned()
    }
}

/// What a function hands back to the platform.
#[derive(Debug, Clone)]
pub struct FunctionResponse {
    pub status_code: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl IntoResponse for FunctionResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status_code;
        response.headers_mut().extend(self.headers);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_names_round_trip() {
        for f in Function::ALL {
            assert_eq!(f.name().parse::<Function>().unwrap(), f);
        }
        assert!(matches!(
            "fetch-nothing".parse::<Function>(),
            Err(ApiError::UnknownFunction(name)) if name == "fetch-nothing"
        ));
    }
}
