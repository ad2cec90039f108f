//! News submission with paced progress messages.
//!
//! The request is held back for a fixed duration while progress messages are
//! emitted on a steady cadence. The hold does not shorten when the messages
//! run out early, and the message ticker is cancelled on every exit path.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{interval_at, sleep, Instant};

use crate::client::api::RetakeApi;
use crate::client::error::ClientError;
use crate::client::model::SubmitReply;
use crate::client::slug::Slug;
use crate::config::ClientConfig;

pub const PROGRESS_MESSAGES: [&str; 11] = [
    "Retrieving details of Github project",
    "Analyzing Github source code files",
    "Analyzing project README",
    "Analyzing project description",
    "Looking for Code of Conduct",
    "Looking for Contributor's Guide",
    "Using AI to identify political intent in project",
    "Using AI to identify nature of Code of Conduct",
    "Using AI to generate your writing style",
    "Using AI to generate title and contents of pull request",
    "Using AI to verify generation",
];

pub const SUBMITTING_MESSAGE: &str = "Submitting to API...";
pub const SUCCESS_MESSAGE: &str = "Success! News item submitted successfully.";
pub const FAILURE_MESSAGE: &str = "Error: Failed to submit news. Please try again.";

/// Shortest delay between progress messages.
const MIN_MESSAGE_INTERVAL: Duration = Duration::from_millis(1);

/// Timing of the submission flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Delay between progress messages; the first one appears after one interval.
    /// Values under one millisecond are raised to one millisecond.
    pub message_interval: Duration,
    /// Time between start and the submission request.
    pub hold: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            message_interval: Duration::from_millis(2_500),
            hold: Duration::from_secs(30),
        }
    }
}

impl Pacing {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            message_interval: Duration::from_millis(config.message_interval_ms),
            hold: Duration::from_millis(config.submit_hold_ms),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    Step(&'static str),
    Submitting,
    Succeeded,
    Failed,
}

impl Progress {
    pub fn text(&self) -> &'static str {
        match self {
            Progress::Step(message) => *message,
            Progress::Submitting => SUBMITTING_MESSAGE,
            Progress::Succeeded => SUCCESS_MESSAGE,
            Progress::Failed => FAILURE_MESSAGE,
        }
    }
}

/// Run the submission flow for `slug`, reporting on `progress`.
///
/// A reply without `success: true` is returned as [`ClientError::Rejected`].
pub async fn submit_news<A: RetakeApi>(
    api: &A,
    slug: &Slug,
    pacing: Pacing,
    progress: &mpsc::UnboundedSender<Progress>,
) -> Result<SubmitReply, ClientError> {
    tracing::info!(slug = %slug, hold = ?pacing.hold, "Starting news submission");

    let start = Instant::now();
    let hold = sleep(pacing.hold);
    tokio::pin!(hold);

    let period = pacing.message_interval.max(MIN_MESSAGE_INTERVAL);
    let mut ticker = interval_at(start + period, period);
    let mut steps = PROGRESS_MESSAGES.into_iter();
    let mut ticking = true;

    loop {
        tokio::select! {
            biased;
            _ = &mut hold => break,
            _ = ticker.tick(), if ticking => match steps.next() {
                Some(message) => {
                    let _ = progress.send(Progress::Step(message));
                }
                None => {
                    ticking = false;
                    let _ = progress.send(Progress::Submitting);
                }
            },
        }
    }
    drop(ticker);
    if ticking {
        let _ = progress.send(Progress::Submitting);
    }

    let result = api.submit_news(slug).await.and_then(|reply| {
        if reply.success {
            Ok(reply)
        } else {
            let reason = reply
                .error
                .unwrap_or_else(|| "Failed to submit news".to_string());
            Err(ClientError::Rejected(reason))
        }
    });

    match &result {
        Ok(_) => {
            tracing::info!(slug = %slug, "News item submitted");
            let _ = progress.send(Progress::Succeeded);
        }
        Err(e) => {
            tracing::error!(slug = %slug, error = %e, "Submitting news failed");
            let _ = progress.send(Progress::Failed);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fake::FakeApi;

    fn drain(rx: &mut mpsc::UnboundedReceiver<Progress>) -> Vec<Progress> {
        let mut out = Vec::new();
        while let Ok(p) = rx.try_recv() {
            out.push(p);
        }
        out
    }

    fn slug() -> Slug {
        "owner/repo".parse().unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_request_waits_for_full_hold() {
        let api = FakeApi::default();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let start = Instant::now();

        let reply = submit_news(&api, &slug(), Pacing::default(), &tx).await.unwrap();
        assert!(reply.success);

        let submitted = api.submitted_at();
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0] - start, Duration::from_secs(30));

        let progress = drain(&mut rx);
        let steps: Vec<_> = PROGRESS_MESSAGES.into_iter().map(Progress::Step).collect();
        assert_eq!(&progress[..11], &steps[..]);
        assert_eq!(&progress[11..], [Progress::Submitting, Progress::Succeeded]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fast_messages_do_not_shorten_hold() {
        let api = FakeApi::default();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let pacing = Pacing {
            message_interval: Duration::from_millis(100),
            hold: Duration::from_secs(30),
        };
        let start = Instant::now();

        submit_news(&api, &slug(), pacing, &tx).await.unwrap();

        assert_eq!(api.submitted_at()[0] - start, Duration::from_secs(30));
        let progress = drain(&mut rx);
        assert_eq!(progress.len(), 13);
        assert_eq!(
            progress.iter().filter(|p| **p == Progress::Submitting).count(),
            1
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_interval_is_raised_to_minimum() {
        let api = FakeApi::default();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let pacing = Pacing {
            message_interval: Duration::ZERO,
            hold: Duration::from_secs(1),
        };
        let start = Instant::now();

        submit_news(&api, &slug(), pacing, &tx).await.unwrap();

        assert_eq!(api.submitted_at()[0] - start, Duration::from_secs(1));
        let progress = drain(&mut rx);
        assert_eq!(progress.len(), 13);
        assert_eq!(progress[0], Progress::Step(PROGRESS_MESSAGES[0]));
        assert_eq!(&progress[11..], [Progress::Submitting, Progress::Succeeded]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejected_reply_is_error() {
        let api = FakeApi::default().rejecting("already submitted");
        let (tx, mut rx) = mpsc::unbounded_channel();

        let err = submit_news(&api, &slug(), Pacing::default(), &tx)
            .await
            .unwrap_err();

        assert_eq!(err, ClientError::Rejected("already submitted".into()));
        assert_eq!(drain(&mut rx).last(), Some(&Progress::Failed));
    }

    #[tokio::test(start_paused = true)]
    async fn test_transport_failure_reports_failed() {
        let api = FakeApi::default().failing(ClientError::Transport("reset".into()));
        let (tx, mut rx) = mpsc::unbounded_channel();

        assert!(submit_news(&api, &slug(), Pacing::default(), &tx).await.is_err());
        assert_eq!(drain(&mut rx).last().map(Progress::text), Some(FAILURE_MESSAGE));
    }
}
