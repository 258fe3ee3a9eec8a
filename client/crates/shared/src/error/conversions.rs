//! Error conversions - From implementations for common error types
//!
//! Provides automatic conversion from common error types to [`NetworkError`].

use super::network_error::NetworkError;

// ============================================================================
// serde_json conversions
// ============================================================================

impl From<serde_json::Error> for NetworkError {
    fn from(err: serde_json::Error) -> Self {
        NetworkError::JsonDecoding(err.to_string())
    }
}

// ============================================================================
// http conversions (feature-gated)
// ============================================================================

#[cfg(feature = "http")]
impl From<http::Error> for NetworkError {
    fn from(_: http::Error) -> Self {
        NetworkError::UrlEncoding
    }
}

#[cfg(feature = "http")]
impl From<http::uri::InvalidUri> for NetworkError {
    fn from(_: http::uri::InvalidUri) -> Self {
        NetworkError::UrlEncoding
    }
}

// ============================================================================
// reqwest conversions (feature-gated)
// ============================================================================

#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            return NetworkError::UrlEncoding;
        }
        if err.is_decode() {
            return NetworkError::JsonDecoding(err.to_string());
        }
        if let Some(status) = err.status() {
            if let Some(classified) = NetworkError::from_status(status.as_u16(), None, "") {
                return classified;
            }
        }
        // Timeouts and connection failures are reported like an unavailable server
        NetworkError::Server
    }
}
