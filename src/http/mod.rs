//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → handlers.rs (/api/* pass-through) or functions (CORS-wrapped)
//!     → upstream (one request)
//!     → response.rs (JSON body or error body)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;
pub mod state;

pub use request::X_REQUEST_ID;
pub use response::ApiError;
pub use server::HttpServer;
pub use state::{AppState, Runtime, ServerError};
