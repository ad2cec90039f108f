//! Configuration file watcher for hot reload.
//!
//! Only the upstream base URLs and the CORS values can change while the
//! server runs. A reload that leaves them untouched is not forwarded, which
//! also absorbs the duplicate modify events editors and notify produce.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::{parse_config, ConfigError};
use crate::config::schema::ProxyConfig;

/// How a reloaded file relates to the running configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadPlan {
    /// Upstream URLs or CORS values changed and can be applied now.
    pub apply: bool,
    /// Other settings changed; they take effect after a restart.
    pub restart_required: bool,
}

impl ReloadPlan {
    pub fn between(current: &ProxyConfig, next: &ProxyConfig) -> Self {
        let apply = current.upstream.api_base_url != next.upstream.api_base_url
            || current.upstream.static_base_url != next.upstream.static_base_url
            || current.cors != next.cors;

        let restart_required = current.listener != next.listener
            || current.upstream.timeout_secs != next.upstream.timeout_secs
            || current.upstream.user_agent != next.upstream.user_agent
            || current.functions != next.functions
            || current.site != next.site
            || current.security != next.security
            || current.observability != next.observability;

        Self {
            apply,
            restart_required,
        }
    }
}

/// A watcher that monitors the configuration file for changes.
pub struct ConfigWatcher {
    path: PathBuf,
    current: ProxyConfig,
    update_tx: mpsc::UnboundedSender<ProxyConfig>,
}

impl ConfigWatcher {
    /// Create a watcher for `path`, starting from the configuration in effect.
    ///
    /// Returns the watcher and a receiver for applicable configuration updates.
    pub fn new(
        path: &Path,
        current: &ProxyConfig,
    ) -> (Self, mpsc::UnboundedReceiver<ProxyConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                current: current.clone(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Re-read the file and forward it when it changes something applicable.
    ///
    /// An empty file is treated as a write in progress and skipped.
    fn reload(&mut self) -> Result<(), ConfigError> {
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            tracing::debug!(path = ?self.path, "Config file empty, waiting for write to finish");
            return Ok(());
        }

        let next = parse_config(&content)?;
        let plan = ReloadPlan::between(&self.current, &next);
        if plan.restart_required {
            tracing::warn!(
                path = ?self.path,
                "Config changes outside [upstream] URLs and [cors] need a restart"
            );
        }
        if plan.apply {
            tracing::info!(
                api_base_url = %next.upstream.api_base_url,
                static_base_url = %next.upstream.static_base_url,
                "Forwarding reloaded configuration"
            );
            let _ = self.update_tx.send(next.clone());
        } else if !plan.restart_required {
            tracing::debug!(path = ?self.path, "Config unchanged");
        }
        self.current = next;
        Ok(())
    }

    /// Start watching the file in a background thread.
    ///
    /// The returned watcher must be kept alive for as long as reloads are wanted.
    pub fn run(mut self) -> Result<RecommendedWatcher, notify::Error> {
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                    tracing::debug!(path = ?self.path, kind = ?event.kind, "Config file event");
                    if let Err(e) = self.reload() {
                        tracing::error!(
                            error = %e,
                            "Failed to reload config, keeping current configuration"
                        );
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::error!(error = ?e, "Watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?path, "Config watcher started");
        Ok(watcher)
    }
}
