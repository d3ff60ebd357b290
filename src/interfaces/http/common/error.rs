//! HTTP mapping of application errors

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use super::ApiResponse;
use crate::shared::AppError;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Request failed: {}", self);
        // Grid setup problems and storage failures are both server-side.
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        (status, Json(ApiResponse::<()>::error(self.to_string()))).into_response()
    }
}
