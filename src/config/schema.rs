//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy
//! and the terminal client. All types derive Serde traits for
//! deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// External scoring service endpoints.
    pub upstream: UpstreamConfig,

    /// CORS headers attached to function responses.
    pub cors: CorsConfig,

    /// Where the serverless functions are mounted.
    pub functions: FunctionsConfig,

    /// Optional static site directory.
    pub site: SiteConfig,

    /// Request limits.
    pub security: SecurityConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Settings for the terminal client.
    pub client: ClientConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3001").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3001".to_string(),
        }
    }
}

/// Upstream endpoints of the scoring service.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the scoring API (news, score, activism).
    pub api_base_url: String,

    /// Base URL of the static data host (repos.json).
    pub static_base_url: String,

    /// Optional per-request timeout in seconds. Unset means no timeout.
    pub timeout_secs: Option<u64>,

    /// User-Agent sent upstream.
    pub user_agent: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.retaketech.com/".to_string(),
            static_base_url: "https://static.retaketech.com/".to_string(),
            timeout_secs: None,
            user_agent: concat!("retake-proxy/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// CORS header values for function responses.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allow_origin: String,
    pub allow_headers: String,
    pub allow_methods: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_origin: "*".to_string(),
            allow_headers: "Content-Type".to_string(),
            allow_methods: "GET, POST, OPTIONS".to_string(),
        }
    }
}

/// Serverless function mount point.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FunctionsConfig {
    /// Path prefix, functions are served at `{prefix}/{name}`.
    pub prefix: String,
}

impl Default for FunctionsConfig {
    fn default() -> Self {
        Self {
            prefix: "/.netlify/functions".to_string(),
        }
    }
}

/// Static site configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SiteConfig {
    /// Directory served for every path not claimed by a route.
    pub root: Option<String>,
}

/// Request limits.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum request body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 64 * 1024, // 64KB
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error) or a full filter directive.
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Which route layout the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApiLayout {
    /// Long-lived proxy routes (`/api/repos`, `/api/news`, `/api/score`).
    #[default]
    Proxy,
    /// Serverless functions (`/fetch-repos`, `/fetch-news`, `/fetch-score`).
    Functions,
}

/// Terminal client configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL the layout's paths are appended to.
    pub base_url: String,

    pub layout: ApiLayout,

    /// Days of news requested by the news loader.
    pub news_days: u32,

    /// Delay between submission progress messages in milliseconds.
    pub message_interval_ms: u64,

    /// Hold before the submission request is issued in milliseconds.
    pub submit_hold_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3001/api/".to_string(),
            layout: ApiLayout::Proxy,
            news_days: 7,
            message_interval_ms: 2_500,
            submit_hold_ms: 30_000,
        }
    }
}
