//! Outbound HTTP client for the scoring service.

use std::time::Duration;

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::config::UpstreamConfig;
use crate::upstream::endpoints::{Endpoints, Resource};

/// Why an upstream call produced no usable JSON.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Upstream answered with a non-2xx status.
    #[error("HTTP error! status: {}", .0.as_u16())]
    Status(StatusCode),

    /// Connection, TLS or timeout failure.
    #[error("{0}")]
    Transport(#[source] reqwest::Error),

    /// Upstream answered 2xx with a body that is not JSON.
    #[error("invalid JSON from upstream: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("invalid upstream URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Shared client for every upstream call. Cheap to clone.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            http: builder.build()?,
        })
    }

    /// Fetch a resource, logging the attempt and its outcome.
    pub async fn fetch(
        &self,
        endpoints: &Endpoints,
        resource: &Resource,
    ) -> Result<Value, UpstreamError> {
        let name = resource.name();
        let url = endpoints.resolve(resource)?;
        tracing::info!(resource = name, url = %url, "Fetching from upstream");

        match self.get_json(url).await {
            Ok(data) => {
                tracing::info!(resource = name, "Successfully fetched data");
                Ok(data)
            }
            Err(e) => {
                tracing::error!(resource = name, error = %e, "Upstream fetch failed");
                Err(e)
            }
        }
    }

    /// Forward a news submission body.
    pub async fn submit_news(
        &self,
        endpoints: &Endpoints,
        body: &Value,
    ) -> Result<Value, UpstreamError> {
        let url = endpoints.news_submission()?;
        tracing::info!(url = %url, "Submitting news item upstream");

        let result = self.post_json(url, body).await;
        if let Err(e) = &result {
            tracing::error!(error = %e, "News submission failed");
        }
        result
    }

    pub async fn get_json(&self, url: Url) -> Result<Value, UpstreamError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(UpstreamError::Transport)?;
        read_json(response).await
    }

    pub async fn post_json(&self, url: Url, body: &Value) -> Result<Value, UpstreamError> {
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(UpstreamError::Transport)?;
        read_json(response).await
    }
}

async fn read_json(response: reqwest::Response) -> Result<Value, UpstreamError> {
    let status = response.status();
    if !status.is_success() {
        return Err(UpstreamError::Status(status));
    }
    response.json().await.map_err(UpstreamError::Decode)
}
