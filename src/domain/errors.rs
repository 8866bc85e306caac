use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

#[derive(Debug)]
pub enum StoreError {
    Unavailable,
}

pub enum ApiError {
    MissingField(&'static str),
    SaveNotFound,
    PayloadTooLarge,
    Unauthorized,
    ServerError,
}

impl From<StoreError> for ApiError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Unavailable => Self::ServerError,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_message) = match self {
            Self::MissingField(field) => (
                StatusCode::BAD_REQUEST,
                format!("Missing required field: {field}"),
            ),
            Self::SaveNotFound => (StatusCode::NOT_FOUND, "No saved game found".to_owned()),
            Self::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "Game state exceeds the maximum allowed size".to_owned(),
            ),
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "Invalid bot token".to_owned()),
            Self::ServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong".to_owned(),
            ),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
