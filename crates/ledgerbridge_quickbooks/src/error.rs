// --- File: crates/ledgerbridge_quickbooks/src/error.rs ---
use axum::response::{IntoResponse, Response};
use ledgerbridge_common::{
    external_service_error, inline_error_response, BridgeError, HttpStatusCode,
};
use thiserror::Error;
use tracing::{error, warn};

use crate::store::StoreError;

/// QuickBooks-specific error types.
#[derive(Error, Debug)]
pub enum QuickBooksError {
    /// No access token, or no realm id from either the token file or COMPANY_ID.
    #[error("Not authenticated: no access token or realmId available")]
    NotAuthenticated,

    /// REFRESH_TOKEN is not configured.
    #[error("No refresh_token in environment")]
    MissingRefreshToken,

    /// Non-success status from QuickBooks; `body` is the raw response text.
    #[error("QuickBooks API returned status {status}")]
    Upstream { status: u16, body: String },

    /// Invoice payload rejected before contacting QuickBooks.
    #[error("Invalid invoice payload: {0}")]
    Validation(String),

    /// Error occurred during a QuickBooks API request
    #[error("QuickBooks API request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Error parsing a QuickBooks API response
    #[error("Failed to parse QuickBooks API response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Token store error: {0}")]
    Store(#[from] StoreError),
}

/// Convert QuickBooksError to BridgeError
impl From<QuickBooksError> for BridgeError {
    fn from(err: QuickBooksError) -> Self {
        let message = err.to_string();
        match err {
            QuickBooksError::NotAuthenticated => BridgeError::AuthError(message),
            QuickBooksError::MissingRefreshToken => BridgeError::ConfigError(message),
            QuickBooksError::Upstream { status, body } => external_service_error(
                "QuickBooks API",
                format!("Status: {}, Body: {}", status, body),
            ),
            QuickBooksError::Validation(msg) => BridgeError::ValidationError(msg),
            QuickBooksError::Request(e) => {
                BridgeError::HttpError(format!("QuickBooks request error: {}", e))
            }
            QuickBooksError::Parse(e) => {
                BridgeError::ParseError(format!("QuickBooks response parse error: {}", e))
            }
            QuickBooksError::Store(e) => BridgeError::InternalError(format!("Token store: {}", e)),
        }
    }
}

impl HttpStatusCode for QuickBooksError {
    fn status_code(&self) -> u16 {
        match self {
            // Reported in-band as {"error": ...}
            QuickBooksError::NotAuthenticated => 200,
            QuickBooksError::MissingRefreshToken => 200,
            QuickBooksError::Upstream { .. } => 200,
            QuickBooksError::Validation(_) => 422,
            QuickBooksError::Request(_) => 502,
            QuickBooksError::Parse(_) => 502,
            QuickBooksError::Store(_) => 500,
        }
    }
}

impl IntoResponse for QuickBooksError {
    fn into_response(self) -> Response {
        // 200 means the error is reported in-band as {"error": ...}
        if self.status_code() == 200 {
            return match self {
                QuickBooksError::Upstream { status, body } => {
                    warn!("QuickBooks API returned {}: {}", status, body);
                    inline_error_response(body)
                }
                other => {
                    warn!("{}", other);
                    inline_error_response(other.to_string())
                }
            };
        }

        if self.status_code() < 500 {
            warn!("{}", self);
        } else {
            error!("{}", self);
        }
        BridgeError::from(self).into_response()
    }
}
