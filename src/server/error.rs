// src/server/error.rs
//! RFC 7807 error responses for the recipe API

use crate::error::Error;
use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Error response format (RFC 7807)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetails {
    /// Error type URI
    #[serde(rename = "type")]
    pub error_type: String,
    /// Human-readable title
    pub title: String,
    /// HTTP status code
    pub status: u16,
    /// Detailed description
    pub detail: String,
}

impl ProblemDetails {
    pub fn new(error_type: &str, title: &str, status: u16, detail: &str) -> Self {
        Self {
            error_type: format!("urn:chomp:error:{}", error_type),
            title: title.to_string(),
            status,
            detail: detail.to_string(),
        }
    }

    pub fn not_found(detail: &str) -> Self {
        Self::new("not_found", "Not Found", 404, detail)
    }

    pub fn bad_request(detail: &str) -> Self {
        Self::new("bad_request", "Bad Request", 400, detail)
    }

    pub fn internal(detail: &str) -> Self {
        Self::new("internal", "Internal Error", 500, detail)
    }
}

/// Detail returned for every internal failure; the cause goes to the log only
pub const INTERNAL_DETAIL: &str = "Internal error";

/// Wrapper so handlers can return `ApiResult` and use `?`
#[derive(Debug)]
pub struct ApiError(pub ProblemDetails);

impl From<ProblemDetails> for ApiError {
    fn from(err: ProblemDetails) -> Self {
        ApiError(err)
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let detail = err.to_string();
        match err {
            Error::NotFound { .. } => ApiError(ProblemDetails::not_found(&detail)),
            Error::Validation(_) => ApiError(ProblemDetails::bad_request(&detail)),
            _ => {
                tracing::error!("Request failed: {}", detail);
                ApiError(ProblemDetails::internal(INTERNAL_DETAIL))
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(ProblemDetails::bad_request(&rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError(ProblemDetails::bad_request(&rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (
            status,
            [("content-type", "application/problem+json")],
            Json(&self.0),
        )
            .into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EntityKind;

    #[test]
    fn test_error_classes_map_to_status() {
        let err: ApiError = Error::not_found(EntityKind::Recipe, "7").into();
        assert_eq!(err.0.status, 404);
        assert_eq!(err.0.detail, "Recipe not found with id: 7");

        let err: ApiError = Error::Validation("Name is required".to_string()).into();
        assert_eq!(err.0.status, 400);

        let err: ApiError =
            Error::TransientFailure("HTTP 503 from http://users:8081/api/user/u1".to_string())
                .into();
        assert_eq!(err.0.status, 500);
        assert_eq!(err.0.detail, INTERNAL_DETAIL);

        let err: ApiError = Error::IoError("disk full".to_string()).into();
        assert_eq!(err.0.status, 500);
        assert_eq!(err.0.detail, INTERNAL_DETAIL);

        let err: ApiError = Error::Database(rusqlite::Error::QueryReturnedNoRows).into();
        assert_eq!(err.0.status, 500);
        assert_eq!(err.0.detail, INTERNAL_DETAIL);
    }

    #[test]
    fn test_problem_serialization() {
        let problem = ProblemDetails::bad_request("Missing X-User-Email header");
        let json = serde_json::to_value(&problem).unwrap();
        assert_eq!(json["type"], "urn:chomp:error:bad_request");
        assert_eq!(json["title"], "Bad Request");
        assert_eq!(json["status"], 400);
    }

    #[test]
    fn test_response_content_type() {
        let response = ApiError(ProblemDetails::not_found("gone")).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/problem+json"
        );
    }
}
