//! Access to the proxy routes or the serverless functions.

use std::future::Future;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use url::Url;

use crate::client::error::ClientError;
use crate::client::model::{NewsFeed, RepoCatalog, SubmitReply};
use crate::client::slug::Slug;
use crate::config::{ApiLayout, ClientConfig};

/// Operations the loaders need from the backend.
pub trait RetakeApi {
    fn repos(&self) -> impl Future<Output = Result<RepoCatalog, ClientError>>;

    fn news(&self, days: u32) -> impl Future<Output = Result<NewsFeed, ClientError>>;

    fn score(&self, slug: &Slug) -> impl Future<Output = Result<Value, ClientError>>;

    fn submit_news(&self, slug: &Slug) -> impl Future<Output = Result<SubmitReply, ClientError>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endpoint {
    Repos,
    News,
    Score,
}

impl Endpoint {
    fn path(self, layout: ApiLayout) -> &'static str {
        match (layout, self) {
            (ApiLayout::Proxy, Endpoint::Repos) => "repos",
            (ApiLayout::Proxy, Endpoint::News) => "news",
            (ApiLayout::Proxy, Endpoint::Score) => "score",
            (ApiLayout::Functions, Endpoint::Repos) => "fetch-repos",
            (ApiLayout::Functions, Endpoint::News) => "fetch-news",
            (ApiLayout::Functions, Endpoint::Score) => "fetch-score",
        }
    }
}

/// [`RetakeApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpApi {
    http: reqwest::Client,
    base: Url,
    layout: ApiLayout,
}

impl HttpApi {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let raw = &config.base_url;
        let base = if raw.ends_with('/') {
            Url::parse(raw)?
        } else {
            Url::parse(&format!("{raw}/"))?
        };
        Ok(Self {
            http: reqwest::Client::new(),
            base,
            layout: config.layout,
        })
    }

    fn url(&self, endpoint: Endpoint, query: Option<(&str, &str)>) -> Result<Url, ClientError> {
        let mut url = self.base.join(endpoint.path(self.layout))?;
        if let Some((key, value)) = query {
            url.query_pairs_mut().append_pair(key, value);
        }
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, ClientError> {
        tracing::debug!(url = %url, "GET");
        let response = self.http.get(url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }
}

impl RetakeApi for HttpApi {
    async fn repos(&self) -> Result<RepoCatalog, ClientError> {
        self.get(self.url(Endpoint::Repos, None)?).await
    }

    async fn news(&self, days: u32) -> Result<NewsFeed, ClientError> {
        let days = days.to_string();
        self.get(self.url(Endpoint::News, Some(("days", &days)))?).await
    }

    async fn score(&self, slug: &Slug) -> Result<Value, ClientError> {
        self.get(self.url(Endpoint::Score, Some(("slug", slug.as_str())))?)
            .await
    }

    async fn submit_news(&self, slug: &Slug) -> Result<SubmitReply, ClientError> {
        let url = self.url(Endpoint::News, None)?;
        tracing::debug!(url = %url, slug = %slug, "POST");
        let response = self
            .http
            .post(url)
            .json(&json!({ "slug": slug.as_str() }))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base_url: &str, layout: ApiLayout) -> HttpApi {
        HttpApi::new(&ClientConfig {
            base_url: base_url.into(),
            layout,
            ..ClientConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_proxy_layout_urls() {
        let api = api("http://localhost:3001/api", ApiLayout::Proxy);
        assert_eq!(
            api.url(Endpoint::News, Some(("days", "7"))).unwrap().as_str(),
            "http://localhost:3001/api/news?days=7"
        );
        assert_eq!(
            api.url(Endpoint::Score, Some(("slug", "a/b"))).unwrap().as_str(),
            "http://localhost:3001/api/score?slug=a%2Fb"
        );
    }

    #[test]
    fn test_functions_layout_urls() {
        let api = api("https://example.org/.netlify/functions/", ApiLayout::Functions);
        assert_eq!(
            api.url(Endpoint::Repos, None).unwrap().as_str(),
            "https://example.org/.netlify/functions/fetch-repos"
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        let api = api("http://127.0.0.1:1/api/", ApiLayout::Proxy);
        assert!(matches!(api.repos().await, Err(ClientError::Transport(_))));
    }
}
