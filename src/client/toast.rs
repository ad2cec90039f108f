//! Transient notifications.

use std::fmt;
use std::time::{Duration, Instant};

/// How long a toast stays visible.
pub const TOAST_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.kind {
            ToastKind::Info => "info",
            ToastKind::Error => "error",
        };
        write!(f, "[{tag}] {}", self.message)
    }
}

/// Holds at most one toast; a new one replaces the current one.
#[derive(Debug, Default)]
pub struct ToastSlot {
    current: Option<(Toast, Instant)>,
}

impl ToastSlot {
    pub fn show(&mut self, toast: Toast) {
        self.show_at(toast, Instant::now());
    }

    pub fn show_at(&mut self, toast: Toast, shown_at: Instant) {
        self.current = Some((toast, shown_at));
    }

    /// The toast still visible at `now`, if any.
    pub fn visible_at(&self, now: Instant) -> Option<&Toast> {
        self.current
            .as_ref()
            .filter(|(_, shown_at)| now.saturating_duration_since(*shown_at) < TOAST_TTL)
            .map(|(toast, _)| toast)
    }

    pub fn visible(&self) -> Option<&Toast> {
        self.visible_at(Instant::now())
    }

    pub fn dismiss(&mut self) -> Option<Toast> {
        self.current.take().map(|(toast, _)| toast)
    }
}
