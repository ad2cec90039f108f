//! Function invocation and the HTTP adapter that mounts functions on the server.

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{Method, StatusCode},
};
use serde_json::Value;

use crate::functions::{Function, FunctionEvent, FunctionResponse};
use crate::http::handlers::{forward, parse_body, submit};
use crate::http::{ApiError, AppState};
use crate::upstream::Resource;

/// Run one function invocation.
pub async fn invoke(
    function: Function,
    event: &FunctionEvent,
    state: &AppState,
) -> FunctionResponse {
    if event.http_method == Method::OPTIONS {
        return respond(state, StatusCode::OK, String::new());
    }

    tracing::debug!(function = %function, method = %event.http_method, "Invoking function");

    match dispatch(function, event, state).await {
        Ok(data) => respond(state, StatusCode::OK, data.to_string()),
        Err(e) => {
            tracing::error!(function = %function, error = %e, "Function failed");
            error_response(state, &e)
        }
    }
}

async fn dispatch(
    function: Function,
    event: &FunctionEvent,
    state: &AppState,
) -> Result<Value, ApiError> {
    match function {
        Function::FetchRepos => forward(state, Resource::Repos).await,
        Function::FetchNews if event.http_method == Method::POST => {
            let body = parse_body(event.body.as_deref().unwrap_or_default().as_bytes())?;
            submit(state, &body).await
        }
        Function::FetchNews => forward(state, Resource::news(event.param("days"))).await,
        Function::FetchActivism => {
            let resource = Resource::activism(event.param("slug")).ok_or(ApiError::MissingSlug)?;
            forward(state, resource).await
        }
        Function::FetchScore => {
            let resource = Resource::score(event.param("slug")).ok_or(ApiError::MissingSlug)?;
            forward(state, resource).await
        }
    }
}

fn respond(state: &AppState, status_code: StatusCode, body: String) -> FunctionResponse {
    FunctionResponse {
        status_code,
        headers: state.runtime().function_headers.clone(),
        body,
    }
}

fn error_response(state: &AppState, error: &ApiError) -> FunctionResponse {
    respond(state, error.status(), error.body().to_string())
}

/// `ANY {prefix}/{name}`
pub async fn function_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    method: Method,
    Query(params): Query<HashMap<String, String>>,
    body: Bytes,
) -> FunctionResponse {
    let function = match name.parse::<Function>() {
        Ok(f) => f,
        Err(e) => {
            tracing::warn!(function = %name, "Unknown function requested");
            return error_response(&state, &e);
        }
    };

    let body = match String::from_utf8(body.to_vec()) {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(function = %function, error = %e, "Rejected non-UTF-8 body");
            return error_response(&state, &ApiError::InvalidBody(e.to_string()));
        }
    };

    let event = FunctionEvent {
        http_method: method,
        query_string_parameters: params,
        body: (!body.is_empty()).then_some(body),
    };
    invoke(function, &event, &state).await
}
