use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use database::services::schedule::ConflictCheckError;
use log::error;
use sea_orm::DbErr;
use serde_json::json;

/// Application error taxonomy mapped onto HTTP statuses.
///
/// Every handler failure is rendered as a `{"error": ...}` JSON envelope;
/// storage failures log the cause server-side and return a generic message.
#[derive(Debug)]
pub enum ApiError {
    Unauthorized,
    Forbidden,
    InvalidInput(String),
    NotFound(String),
    Storage(DbErr),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "authentication required".to_owned(),
            ),
            ApiError::Forbidden => (StatusCode::FORBIDDEN, "insufficient permissions".to_owned()),
            ApiError::InvalidInput(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::Storage(err) => {
                error!("storage error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_owned(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        ApiError::Storage(err)
    }
}

impl From<ConflictCheckError> for ApiError {
    fn from(err: ConflictCheckError) -> Self {
        match err {
            ConflictCheckError::InvalidInput(message) => ApiError::InvalidInput(message.to_owned()),
            ConflictCheckError::Db(err) => ApiError::Storage(err),
        }
    }
}
