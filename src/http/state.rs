//! Shared handler state.

use std::sync::Arc;

use arc_swap::ArcSwap;
use axum::http::{
    header::{self, InvalidHeaderValue},
    HeaderMap, HeaderValue,
};
use thiserror::Error;

use crate::config::{CorsConfig, ProxyConfig};
use crate::upstream::{Endpoints, UpstreamClient};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid upstream URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("invalid CORS header value: {0}")]
    Header(#[from] InvalidHeaderValue),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Settings that can change while the server runs.
#[derive(Debug, Clone)]
pub struct Runtime {
    pub endpoints: Endpoints,
    /// Headers attached to every function response.
    pub function_headers: HeaderMap,
}

impl Runtime {
    pub fn from_config(config: &ProxyConfig) -> Result<Self, ServerError> {
        Ok(Self {
            endpoints: Endpoints::from_config(&config.upstream)?,
            function_headers: function_headers(&config.cors)?,
        })
    }
}

fn function_headers(cors: &CorsConfig) -> Result<HeaderMap, InvalidHeaderValue> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_str(&cors.allow_origin)?,
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_str(&cors.allow_headers)?,
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_str(&cors.allow_methods)?,
    );
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    runtime: Arc<ArcSwap<Runtime>>,
    pub upstream: UpstreamClient,
}

impl AppState {
    pub fn new(config: &ProxyConfig) -> Result<Self, ServerError> {
        Ok(Self {
            runtime: Arc::new(ArcSwap::from_pointee(Runtime::from_config(config)?)),
            upstream: UpstreamClient::new(&config.upstream)?,
        })
    }

    /// Snapshot of the current runtime settings.
    pub fn runtime(&self) -> Arc<Runtime> {
        self.runtime.load_full()
    }

    /// Apply a reloaded configuration. The previous settings stay active on error.
    pub fn reload(&self, config: &ProxyConfig) -> Result<(), ServerError> {
        let runtime = Runtime::from_config(config)?;
        self.runtime.store(Arc::new(runtime));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reload_swaps_endpoints() {
        let mut config = ProxyConfig::default();
        let state = AppState::new(&config).unwrap();
        let before = state.runtime();

        config.upstream.api_base_url = "http://127.0.0.1:9999/".into();
        state.reload(&config).unwrap();

        assert_ne!(before.endpoints, state.runtime().endpoints);
    }

    #[test]
    fn test_bad_reload_keeps_previous() {
        let mut config = ProxyConfig::default();
        let state = AppState::new(&config).unwrap();
        let before = state.runtime();

        config.cors.allow_origin = "bad\nvalue".into();
        assert!(state.reload(&config).is_err());
        assert_eq!(before.endpoints, state.runtime().endpoints);
        assert_eq!(state.runtime().function_headers["access-control-allow-origin"], "*");
    }
}
