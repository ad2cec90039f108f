//! Loader lifecycle.

use crate::client::error::ClientError;

/// `Idle → Loading → (Displayed | Failed)`; a new load starts over from `Loading`.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Idle,
    Loading,
    Displayed(T),
    Failed(ClientError),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Idle
    }
}

impl<T> LoadState<T> {
    pub fn displayed(&self) -> Option<&T> {
        match self {
            LoadState::Displayed(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ClientError> {
        match self {
            LoadState::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}
