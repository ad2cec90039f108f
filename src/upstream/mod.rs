//! Upstream access subsystem.
//!
//! # Data Flow
//! ```text
//! route / function
//!     → endpoints.rs (Resource → upstream URL, query forwarded verbatim)
//!     → client.rs (one GET or POST, no retry)
//!     → JSON body or UpstreamError
//! ```
//!
//! # Design Decisions
//! - Exactly one outbound request per inbound request
//! - Non-2xx is an error even when the body is JSON
//! - Timeout only when configured

pub mod client;
pub mod endpoints;

pub use client::{UpstreamClient, UpstreamError};
pub use endpoints::{Endpoints, Resource, DEFAULT_NEWS_DAYS};
