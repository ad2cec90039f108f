//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → upstream endpoints + CORS headers shared via ArcSwap
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → watcher.rs forwards it only if upstream URLs or CORS changed
//!     → server swaps its runtime settings atomically
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults to allow minimal configs
//! - Only upstream and CORS settings are hot-reloaded; listener and
//!   route layout changes need a restart

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    ApiLayout, ClientConfig, CorsConfig, ListenerConfig, LogFormat, ObservabilityConfig,
    ProxyConfig, UpstreamConfig,
};
pub use validation::ValidationError;
pub use watcher::{ConfigWatcher, ReloadPlan};
