//! Client side of the site: loading, rendering and submitting.
//!
//! # Responsibilities
//! - Talk to the proxy (or the serverless functions) through [`RetakeApi`]
//! - Drive the project and news loaders through their [`LoadState`]
//! - Turn records into table rows and carousel cards
//! - Run the paced news submission flow
//!
//! # Data Flow
//! ```text
//! HttpApi ──▶ ProjectsLoader ──▶ ProjectBoard ──▶ render::captured_table / liberated_table
//!         ──▶ NewsLoader     ──▶ NewsBoard    ──▶ render::news_table
//!         ──▶ submit_news    ──▶ Progress (mpsc) ──▶ caller
//! ```
//!
//! # Design Decisions
//! - Loaders are generic over [`RetakeApi`] so tests run against an in-memory fake
//! - Only the projects loader falls back to static data; news failures surface as errors
//! - Toasts live in a single [`ToastSlot`]; a new toast replaces the visible one

pub mod api;
pub mod carousel;
pub mod error;
pub mod model;
pub mod news;
pub mod projects;
pub mod render;
pub mod slug;
pub mod state;
pub mod submit;
pub mod toast;

pub use api::{HttpApi, RetakeApi};
pub use carousel::{Carousel, ExamplesError, PAGE_SIZE};
pub use error::ClientError;
pub use model::{Example, NewsFeed, NewsItem, RepoCatalog, Repository, SubmitReply};
pub use news::{NewsBoard, NewsLoader, NEWS_ERROR_ROW};
pub use projects::{DataSource, ProjectBoard, ProjectsLoader, FALLBACK_NOTICE, TABLE_SIZE};
pub use slug::{Slug, SlugError};
pub use state::LoadState;
pub use submit::{submit_news, Pacing, Progress};
pub use toast::{Toast, ToastKind, ToastSlot};
