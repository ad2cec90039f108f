//! Upstream resources and the URLs they resolve to.

use url::Url;

use crate::config::UpstreamConfig;

/// Days of news requested when the caller gives none.
pub const DEFAULT_NEWS_DAYS: &str = "7";

/// A read-only resource of the scoring service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    /// `GET {static}/repos.json`
    Repos,
    /// `GET {api}/news/?days=N`
    News { days: String },
    /// `GET {api}/score?slug=S`
    Score { slug: String },
    /// `GET {api}/activism/github_issue?slug=S`
    Activism { slug: String },
}

impl Resource {
    /// News for the given window. Missing or empty values fall back to seven days.
    pub fn news(days: Option<String>) -> Self {
        let days = days
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| DEFAULT_NEWS_DAYS.to_string());
        Resource::News { days }
    }

    /// Score lookup. `None` when the slug is missing or empty.
    pub fn score(slug: Option<String>) -> Option<Self> {
        required(slug).map(|slug| Resource::Score { slug })
    }

    /// Activism issue lookup. `None` when the slug is missing or empty.
    pub fn activism(slug: Option<String>) -> Option<Self> {
        required(slug).map(|slug| Resource::Activism { slug })
    }

    /// Short name used in logs, metrics and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Resource::Repos => "repos",
            Resource::News { .. } => "news",
            Resource::Score { .. } => "score",
            Resource::Activism { .. } => "activism",
        }
    }

    /// Generic message returned to callers when the fetch fails.
    pub fn failure_message(&self) -> String {
        format!("Failed to fetch {} data", self.name())
    }
}

fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Resolved base URLs of the scoring service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    api_base: Url,
    static_base: Url,
}

impl Endpoints {
    pub fn from_config(config: &UpstreamConfig) -> Result<Self, url::ParseError> {
        Ok(Self {
            api_base: base_url(&config.api_base_url)?,
            static_base: base_url(&config.static_base_url)?,
        })
    }

    /// Build the upstream URL for a resource. Query values are passed through as given.
    pub fn resolve(&self, resource: &Resource) -> Result<Url, url::ParseError> {
        let url = match resource {
            Resource::Repos => self.static_base.join("repos.json")?,
            Resource::News { days } => with_query(self.api_base.join("news/")?, "days", days),
            Resource::Score { slug } => with_query(self.api_base.join("score")?, "slug", slug),
            Resource::Activism { slug } => {
                with_query(self.api_base.join("activism/github_issue")?, "slug", slug)
            }
        };
        Ok(url)
    }

    /// Where news submissions are posted.
    pub fn news_submission(&self) -> Result<Url, url::ParseError> {
        self.api_base.join("news/")
    }
}

/// Parse a base URL, making sure relative joins append instead of replacing the last segment.
fn base_url(raw: &str) -> Result<Url, url::ParseError> {
    if raw.ends_with('/') {
        Url::parse(raw)
    } else {
        Url::parse(&format!("{raw}/"))
    }
}

fn with_query(mut url: Url, key: &str, value: &str) -> Url {
    url.set_query(Some(&format!("{key}={value}")));
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints() -> Endpoints {
        Endpoints::from_config(&UpstreamConfig::default()).unwrap()
    }

    #[test]
    fn test_resolves_fixed_upstreams() {
        let e = endpoints();
        assert_eq!(
            e.resolve(&Resource::Repos).unwrap().as_str(),
            "https://static.retaketech.com/repos.json"
        );
        assert_eq!(
            e.resolve(&Resource::news(Some("30".into()))).unwrap().as_str(),
            "https://api.retaketech.com/news/?days=30"
        );
        assert_eq!(
            e.resolve(&Resource::score(Some("owner/repo".into())).unwrap())
                .unwrap()
                .as_str(),
            "https://api.retaketech.com/score?slug=owner/repo"
        );
        assert_eq!(
            e.resolve(&Resource::activism(Some("a/b".into())).unwrap())
                .unwrap()
                .as_str(),
            "https://api.retaketech.com/activism/github_issue?slug=a/b"
        );
        assert_eq!(
            e.news_submission().unwrap().as_str(),
            "https://api.retaketech.com/news/"
        );
    }

    #[test]
    fn test_news_days_default() {
        assert_eq!(Resource::news(None), Resource::News { days: "7".into() });
        assert_eq!(Resource::news(Some(String::new())), Resource::News { days: "7".into() });
    }

    #[test]
    fn test_slug_required() {
        assert_eq!(Resource::score(None), None);
        assert_eq!(Resource::score(Some(String::new())), None);
        assert_eq!(Resource::activism(None), None);
    }

    #[test]
    fn test_base_without_trailing_slash() {
        let config = UpstreamConfig {
            api_base_url: "http://127.0.0.1:9000/v1".into(),
            static_base_url: "http://127.0.0.1:9001".into(),
            ..UpstreamConfig::default()
        };
        let e = Endpoints::from_config(&config).unwrap();
        assert_eq!(
            e.resolve(&Resource::news(None)).unwrap().as_str(),
            "http://127.0.0.1:9000/v1/news/?days=7"
        );
        assert_eq!(
            e.resolve(&Resource::Repos).unwrap().as_str(),
            "http://127.0.0.1:9001/repos.json"
        );
    }

    #[test]
    fn test_failure_message() {
        assert_eq!(Resource::Repos.failure_message(), "Failed to fetch repos data");
    }
}
