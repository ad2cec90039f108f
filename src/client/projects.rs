//! Captured / liberated project tables.

use crate::client::api::RetakeApi;
use crate::client::error::ClientError;
use crate::client::model::{RepoCatalog, Repository};
use crate::client::state::LoadState;
use crate::client::toast::{Toast, ToastSlot};

/// Rows kept per table.
pub const TABLE_SIZE: usize = 20;

pub const FALLBACK_NOTICE: &str =
    "Using fallback data - CORS policy prevents direct API access from browser";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Live,
    Fallback,
}

/// Both tables, each sorted by stars and cut to [`TABLE_SIZE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectBoard {
    /// Repositories classified political.
    pub captured: Vec<Repository>,
    /// Repositories classified neutral.
    pub liberated: Vec<Repository>,
    pub source: DataSource,
}

impl ProjectBoard {
    pub fn from_catalog(catalog: RepoCatalog, source: DataSource) -> Self {
        Self {
            captured: top_by_stars(catalog.political, TABLE_SIZE),
            liberated: top_by_stars(catalog.neutral, TABLE_SIZE),
            source,
        }
    }

    pub fn fallback() -> Self {
        Self::from_catalog(fallback_catalog(), DataSource::Fallback)
    }
}

/// Stable sort by stars, most first, then truncate.
pub fn top_by_stars(mut repos: Vec<Repository>, limit: usize) -> Vec<Repository> {
    repos.sort_by(|a, b| b.stars.cmp(&a.stars));
    repos.truncate(limit);
    repos
}

/// Where the "Submit Issue" action of a captured project leads.
pub fn issue_url(slug: &str) -> String {
    format!("https://github.com/{slug}/issues/new")
}

fn repo(
    slug: &str,
    description: &str,
    date: &str,
    branch: &str,
    has_coc: bool,
    orientation: &str,
    stars: u64,
) -> Repository {
    Repository {
        slug: slug.to_string(),
        url: format!("https://github.com/{slug}"),
        description: Some(description.to_string()),
        date: date.to_string(),
        default_branch_name: branch.to_string(),
        has_coc,
        is_political: false,
        orientation: orientation.to_string(),
        stars,
    }
}

/// Static dataset shown when the live fetch fails.
pub fn fallback_catalog() -> RepoCatalog {
    RepoCatalog {
        political: vec![
            repo(
                "facebook/react",
                "The library for web and native user interfaces.",
                "2025-10-25T18:06:43.377237570Z",
                "main",
                true,
                "political",
                240_044,
            ),
            repo(
                "torvalds/linux",
                "Linux kernel source tree",
                "2025-10-25T18:08:34.123991400Z",
                "master",
                true,
                "political",
                205_665,
            ),
        ],
        neutral: vec![
            repo(
                "microsoft/vscode",
                "Visual Studio Code",
                "2025-10-25T18:06:43.377237570Z",
                "main",
                false,
                "neutral",
                150_000,
            ),
            repo(
                "nodejs/node",
                "Node.js JavaScript runtime",
                "2025-10-25T18:08:34.123991400Z",
                "main",
                true,
                "neutral",
                100_000,
            ),
        ],
    }
}

/// Loads the project tables, substituting the fallback dataset on failure.
#[derive(Debug, Default)]
pub struct ProjectsLoader {
    state: LoadState<ProjectBoard>,
    last_error: Option<ClientError>,
}

impl ProjectsLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LoadState<ProjectBoard> {
        &self.state
    }

    pub fn board(&self) -> Option<&ProjectBoard> {
        self.state.displayed()
    }

    /// The failure that caused the current fallback, if any.
    pub fn last_error(&self) -> Option<&ClientError> {
        self.last_error.as_ref()
    }

    /// Fetch the catalog. Never ends in `Failed`: errors switch to fallback data.
    pub async fn load<A: RetakeApi>(&mut self, api: &A, toasts: &mut ToastSlot) {
        self.state = LoadState::Loading;

        let board = match api.repos().await {
            Ok(catalog) => {
                self.last_error = None;
                ProjectBoard::from_catalog(catalog, DataSource::Live)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Loading projects failed, using fallback data");
                toasts.show(Toast::info(FALLBACK_NOTICE));
                self.last_error = Some(e);
                ProjectBoard::fallback()
            }
        };

        tracing::info!(
            captured = board.captured.len(),
            liberated = board.liberated.len(),
            source = ?board.source,
            "Projects loaded"
        );
        self.state = LoadState::Displayed(board);
    }
}
