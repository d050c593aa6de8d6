//! Handlers for the `/candies` resource.

use axum::{
    body::{to_bytes, Body},
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use crate::http::request::{content_type, request_id};
use crate::http::response::{json_body, ApiError};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::store::NewCandy;

const JSON_CONTENT_TYPE: &str = "application/json";

fn location(id: &str) -> String {
    format!("/candies/{}", id)
}

/// `GET /candies`
pub async fn list(State(state): State<AppState>) -> Result<Response, ApiError> {
    let candies = state.store.list_all();
    json_body(&candies)
}

/// `POST /candies`
///
/// The body is read before the content type is checked, and decoded only
/// once both succeed.
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Body,
) -> Result<Response, ApiError> {
    let bytes = to_bytes(body, state.max_body_size)
        .await
        .map_err(|e| ApiError::BodyRead(e.to_string()))?;

    let ct = content_type(&headers);
    if ct != JSON_CONTENT_TYPE {
        return Err(ApiError::UnsupportedMediaType(ct.to_string()));
    }

    let new: NewCandy = serde_json::from_slice(&bytes).map_err(ApiError::InvalidJson)?;
    let (candy, count) = state.store.insert_counted(new);
    metrics::record_created();

    tracing::info!(
        request_id = %request_id(&headers),
        candy_id = %candy.id,
        records = count,
        "Candy created"
    );

    let body = json_body(&candy)?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location(&candy.id))],
        body,
    )
        .into_response())
}

/// `GET /candies/{id}`
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let candy = state.store.get_by_id(&id)?;
    json_body(&candy)
}

/// `GET /candies/random`
pub async fn random(State(state): State<AppState>) -> Result<Response, ApiError> {
    let id = state.store.random_id()?;
    Ok((StatusCode::FOUND, [(header::LOCATION, location(&id))]).into_response())
}

/// Any other method on `/candies`.
pub async fn method_not_allowed() -> impl IntoResponse {
    (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}
