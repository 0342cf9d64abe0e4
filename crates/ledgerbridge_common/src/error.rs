// --- File: crates/ledgerbridge_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type shared by all Ledgerbridge crates.
///
/// Integration crates keep their own error enums and implement
/// `From<SpecificError> for BridgeError` to reach this common shape.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during authentication or authorization
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Inbound payload did not match the expected schema
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for BridgeError {
    fn status_code(&self) -> u16 {
        match self {
            BridgeError::HttpError(_) => 502,
            BridgeError::ParseError(_) => 502,
            BridgeError::ConfigError(_) => 500,
            BridgeError::AuthError(_) => 401,
            BridgeError::ValidationError(_) => 422,
            BridgeError::ExternalServiceError { .. } => 502,
            BridgeError::InternalError(_) => 500,
        }
    }
}

/// A trait for adding context to errors.
pub trait Context<T, E> {
    /// Adds context to an error.
    fn context<C>(self, context: C) -> Result<T, BridgeError>
    where
        C: fmt::Display + Send + Sync + 'static;

    /// Adds context to an error with a lazy context provider.
    fn with_context<C, F>(self, f: F) -> Result<T, BridgeError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E: std::error::Error + Send + Sync + 'static> Context<T, E> for Result<T, E> {
    fn context<C>(self, context: C) -> Result<T, BridgeError>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|error| BridgeError::InternalError(format!("{}: {}", context, error)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, BridgeError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|error| BridgeError::InternalError(format!("{}: {}", f(), error)))
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> BridgeError {
    BridgeError::ConfigError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> BridgeError {
    BridgeError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(BridgeError::ValidationError("bad".into()).status_code(), 422);
        assert_eq!(config_error("missing").status_code(), 500);
        assert_eq!(external_service_error("QuickBooks", "down").status_code(), 502);
        assert_eq!(BridgeError::AuthError("expired".into()).status_code(), 401);
    }

    #[test]
    fn test_context_wraps_message() {
        let result: Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no such file",
        ));
        let err = result.context("reading token file").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Internal error: reading token file: no such file"
        );
    }
}
