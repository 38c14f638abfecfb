use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rota_core::{CoreError, ValidationErrors};
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    ValidationError(ValidationErrors),
    Anyhow(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::ValidationError(fields) => {
                tracing::debug!("Rejected search params: {}", fields);
                let body = Json(json!({
                    "error": "Invalid search parameters",
                    "fields": fields,
                }));
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            AppError::Anyhow(err) => {
                tracing::error!("Internal Server Error: {}", err);
                let body = Json(json!({
                    "error": "Internal Server Error",
                }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(fields) => AppError::ValidationError(fields),
            other => AppError::Anyhow(other.into()),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Anyhow(err)
    }
}
