//! Pass-through routes.
//!
//! Each route issues exactly one upstream request and relays the JSON body,
//! or an [`ApiError`] describing why it could not.

use axum::{
    body::Bytes,
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::http::response::ApiError;
use crate::http::state::AppState;
use crate::upstream::Resource;

/// Query parameters understood by the pass-through routes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceQuery {
    pub days: Option<String>,
    pub slug: Option<String>,
}

/// `GET /api/repos`
pub async fn get_repos(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    forward(&state, Resource::Repos).await.map(Json)
}

/// `GET /api/news?days=N`
pub async fn get_news(
    State(state): State<AppState>,
    Query(query): Query<ResourceQuery>,
) -> Result<Json<Value>, ApiError> {
    forward(&state, Resource::news(query.days)).await.map(Json)
}

/// `POST /api/news`
pub async fn post_news(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let body = parse_body(&body)?;
    submit(&state, &body).await.map(Json)
}

/// `GET /api/score?slug=owner/repo`
pub async fn get_score(
    State(state): State<AppState>,
    Query(query): Query<ResourceQuery>,
) -> Result<Json<Value>, ApiError> {
    let resource = Resource::score(query.slug).ok_or(ApiError::MissingSlug)?;
    forward(&state, resource).await.map(Json)
}

/// `GET /api/activism?slug=owner/repo`
pub async fn get_activism(
    State(state): State<AppState>,
    Query(query): Query<ResourceQuery>,
) -> Result<Json<Value>, ApiError> {
    let resource = Resource::activism(query.slug).ok_or(ApiError::MissingSlug)?;
    forward(&state, resource).await.map(Json)
}

/// Fetch a resource with the current runtime settings.
pub(crate) async fn forward(state: &AppState, resource: Resource) -> Result<Value, ApiError> {
    let runtime = state.runtime();
    state
        .upstream
        .fetch(&runtime.endpoints, &resource)
        .await
        .map_err(|source| ApiError::upstream(resource.failure_message(), source))
}

/// Forward a news submission with the current runtime settings.
pub(crate) async fn submit(state: &AppState, body: &Value) -> Result<Value, ApiError> {
    let runtime = state.runtime();
    state
        .upstream
        .submit_news(&runtime.endpoints, body)
        .await
        .map_err(|source| ApiError::upstream("Failed to submit news", source))
}

/// Decode a submission body. Anything that is not JSON is [`ApiError::InvalidBody`].
pub(crate) fn parse_body(raw: &[u8]) -> Result<Value, ApiError> {
    serde_json::from_slice(raw).map_err(|e| ApiError::InvalidBody(e.to_string()))
}
