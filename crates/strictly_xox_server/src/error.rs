//! Mapping of game errors onto HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use derive_more::{Display, Error, From};
use strictly_xox::{XoxError, XoxErrorKind};
use tracing::warn;

/// A game error on its way to the client.
#[derive(Debug, Display, Error, From)]
pub struct ApiError(XoxError);

impl ApiError {
    /// Status code the error is reported with.
    pub fn status(&self) -> StatusCode {
        match self.0.kind() {
            XoxErrorKind::InvalidSetup(_) => StatusCode::BAD_REQUEST,
            XoxErrorKind::GameNotFound(_) => StatusCode::NOT_FOUND,
            XoxErrorKind::UnknownPlayer(_) => StatusCode::NOT_FOUND,
            XoxErrorKind::UnknownAction(_) => StatusCode::BAD_REQUEST,
            XoxErrorKind::NotPlayersTurn(_) => StatusCode::FORBIDDEN,
            XoxErrorKind::GameOver => StatusCode::CONFLICT,
            XoxErrorKind::IllegalMove(_) => StatusCode::CONFLICT,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!(%status, error = %self.0, "Request failed");
        (
            status,
            Json(serde_json::json!({
                "error": self.0.kind().to_string()
            })),
        )
            .into_response()
    }
}
