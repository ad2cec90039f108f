//! Retake proxy library: the CORS proxy, its serverless-function twin and the
//! client logic of the site built on top of them.

pub mod client;
pub mod config;
pub mod functions;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod upstream;

pub use config::schema::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
