// src/utils/error.rs

use crate::services::sigv4::SigningError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub type AuthResult<T> = Result<T, AuthError>;

/// Custom error details for additional context
pub type ErrorDetails = HashMap<String, serde_json::Value>;

/// Main error type for the edge authenticator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthError {
    pub message: String,
    pub details: Option<Box<ErrorDetails>>,
    pub status: Option<u16>,
    pub error_code: Option<String>,
    pub kind: ErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    ValidationError,
    ConfigurationError,
    CryptoError,
    DeserializationError,
    SerializationError,
    UpstreamError,
    Internal,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AuthError {}

impl AuthError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: None,
            status: None,
            error_code: None,
            kind,
        }
    }

    pub fn with_details(mut self, details: ErrorDetails) -> Self {
        self.details = Some(Box::new(details));
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_code(mut self, error_code: impl Into<String>) -> Self {
        self.error_code = Some(error_code.into());
        self
    }

    /// HTTP status to report, 500 when none was attached.
    pub fn status_code(&self) -> u16 {
        self.status.unwrap_or(500)
    }

    // Convenience constructors for common error types
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ValidationError, message)
            .with_status(400)
            .with_code("VALIDATION_ERROR")
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigurationError, message)
            .with_status(500)
            .with_code("CONFIG_ERROR")
    }

    pub fn missing_config(key: &str) -> Self {
        let mut details = ErrorDetails::new();
        details.insert(
            "key".to_string(),
            serde_json::Value::String(key.to_string()),
        );

        Self::config_error(format!("Missing configuration value: {}", key)).with_details(details)
    }

    pub fn crypto_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CryptoError, message)
            .with_status(500)
            .with_code("CRYPTO_ERROR")
    }

    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DeserializationError, message)
            .with_status(400)
            .with_code("PARSE_ERROR")
    }

    pub fn serialization_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SerializationError, message)
            .with_status(500)
            .with_code("SERIALIZATION_ERROR")
    }

    pub fn upstream_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UpstreamError, message)
            .with_status(502)
            .with_code("UPSTREAM_ERROR")
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
            .with_status(500)
            .with_code("INTERNAL_ERROR")
    }
}

// Implement From conversions for common error types. `?` on serde_json is only used for
// decoding input; encoding failures are mapped to `serialization_error` at the call site.
impl From<serde_json::Error> for AuthError {
    fn from(err: serde_json::Error) -> Self {
        AuthError::parse_error(format!("JSON parsing error: {}", err))
    }
}

impl From<worker::Error> for AuthError {
    fn from(err: worker::Error) -> Self {
        AuthError::internal_error(format!("Worker error: {:?}", err))
    }
}

impl From<url::ParseError> for AuthError {
    fn from(err: url::ParseError) -> Self {
        AuthError::validation_error(format!("URL parse error: {}", err))
    }
}

impl From<hmac::digest::InvalidLength> for AuthError {
    fn from(err: hmac::digest::InvalidLength) -> Self {
        AuthError::crypto_error(format!("Invalid HMAC key: {}", err))
    }
}

impl From<SigningError> for AuthError {
    fn from(err: SigningError) -> Self {
        match err {
            SigningError::MissingHost(url) => {
                AuthError::validation_error(format!("Cannot presign URL without host: {}", url))
            }
            SigningError::InvalidKey(e) => {
                AuthError::crypto_error(format!("Invalid signing key: {}", e))
            }
            SigningError::Url(e) => AuthError::from(e),
        }
    }
}

// Convert AuthError into worker::Error for the fetch entry point
impl From<AuthError> for worker::Error {
    fn from(err: AuthError) -> Self {
        let message = if let Some(status_code) = err.status {
            format!(
                "[Status: {}] AuthError (Kind: {:?}): {}",
                status_code, err.kind, err.message
            )
        } else {
            format!("AuthError (Kind: {:?}): {}", err.kind, err.message)
        };

        worker::Error::RustError(message)
    }
}
