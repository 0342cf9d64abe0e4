// --- File: crates/ledgerbridge_common/src/http.rs ---
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::{BridgeError, HttpStatusCode};

pub mod client;

/// Extension trait for BridgeError to convert it to an Axum HTTP response.
pub trait IntoHttpResponse {
    /// Converts the error into an Axum HTTP response.
    fn into_http_response(self) -> Response;
}

impl IntoHttpResponse for BridgeError {
    fn into_http_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = Json(json!({
            "error": {
                "message": self.to_string(),
                "code": status_code.as_u16(),
            }
        }));

        (status_code, body).into_response()
    }
}

impl IntoResponse for BridgeError {
    fn into_response(self) -> Response {
        self.into_http_response()
    }
}

/// Render a plain `{"error": message}` body with status 200.
///
/// Used for failures the API reports in-band rather than through the HTTP
/// status (unauthenticated calls, raw upstream error bodies).
pub fn inline_error_response<T: Into<serde_json::Value>>(message: T) -> Response {
    let message: serde_json::Value = message.into();
    (StatusCode::OK, Json(json!({ "error": message }))).into_response()
}
