//! Response construction and error mapping.
//!
//! Every failure a handler can hit is an [`ApiError`]; its `IntoResponse`
//! impl is the single place that decides status codes and bodies.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

/// Errors surfaced to HTTP clients.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Need content-type 'application/json', but got '{0}'")]
    UnsupportedMediaType(String),

    #[error("{0}")]
    InvalidJson(serde_json::Error),

    #[error("not found")]
    NotFound,

    #[error("failed to read request body: {0}")]
    BodyRead(String),

    #[error("failed to serialize response: {0}")]
    Serialization(serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::BodyRead(_) | ApiError::Serialization(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(_: StoreError) -> Self {
        ApiError::NotFound
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::NotFound => status.into_response(),
            err => {
                if status.is_server_error() {
                    tracing::error!(error = %err, "Request failed");
                } else {
                    tracing::debug!(error = %err, status = %status, "Request rejected");
                }
                (status, err.to_string()).into_response()
            }
        }
    }
}

/// Serialize `value` into a `200 application/json` response.
pub fn json_body<T: Serialize + ?Sized>(value: &T) -> Result<Response, ApiError> {
    let bytes = serde_json::to_vec(value).map_err(ApiError::Serialization)?;
    Ok((
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        )],
        bytes,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Candy;

    #[test]
    fn test_status_mapping() {
        let bad_json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(
            ApiError::UnsupportedMediaType("text/plain".into()).status(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        assert_eq!(ApiError::InvalidJson(bad_json).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::BodyRead("reset".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_store_errors_become_not_found() {
        assert!(matches!(ApiError::from(StoreError::Empty), ApiError::NotFound));
        assert!(matches!(
            ApiError::from(StoreError::NotFound("x".into())),
            ApiError::NotFound
        ));
    }

    #[test]
    fn test_media_type_message_echoes_value() {
        let err = ApiError::UnsupportedMediaType("text/plain".into());
        assert_eq!(
            err.to_string(),
            "Need content-type 'application/json', but got 'text/plain'"
        );
    }

    #[test]
    fn test_json_body_sets_content_type() {
        let candy = Candy {
            id: "1".into(),
            name: "gummy".into(),
            kind: "bear".into(),
        };
        let response = json_body(&candy).unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
    }
}
