//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::NetworkError` taxonomy.

use kernel::{ErrorKind, NetworkError};
use platform::TokenStoreError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthError {
    /// Transport or backend failure
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// No FCM token has been registered on this device
    #[error("FCM token is not registered")]
    MissingFcmToken,

    /// No refresh token stored (logged out)
    #[error("Refresh token is missing")]
    MissingRefreshToken,

    /// A required onboarding field was never filled in
    #[error("Onboarding is incomplete: {0} is missing")]
    IncompleteOnboarding(&'static str),

    /// Backend answered 2xx without a token pair
    #[error("Token response was empty")]
    EmptyTokenResponse,

    /// Reissue was rejected; the session has been cleared
    #[error("Token reissue failed: {0}")]
    ReissueRejected(NetworkError),

    /// Tokens could not be persisted
    #[error("Token storage failed: {0}")]
    Storage(String),
}

impl From<TokenStoreError> for AuthError {
    fn from(err: TokenStoreError) -> Self {
        AuthError::Storage(err.to_string())
    }
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Network(e) => e.kind(),
            AuthError::MissingFcmToken | AuthError::Storage(_) => ErrorKind::Client,
            AuthError::MissingRefreshToken | AuthError::ReissueRejected(_) => {
                ErrorKind::Unauthorized
            }
            AuthError::IncompleteOnboarding(_) | AuthError::EmptyTokenResponse => {
                ErrorKind::BadCasting
            }
        }
    }

    /// Convert to the kernel taxonomy
    pub fn to_network_error(&self) -> NetworkError {
        match self {
            AuthError::Network(e) => e.clone(),
            AuthError::MissingFcmToken => NetworkError::client("FCM", self.to_string()),
            AuthError::Storage(_) => NetworkError::client("STORAGE", self.to_string()),
            AuthError::MissingRefreshToken | AuthError::ReissueRejected(_) => {
                NetworkError::Unauthorized
            }
            AuthError::IncompleteOnboarding(_) | AuthError::EmptyTokenResponse => {
                NetworkError::BadCasting
            }
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            AuthError::Network(NetworkError::Server) => {
                tracing::error!("Auth backend unavailable");
            }
            AuthError::Network(e) => {
                tracing::warn!(error = %e, "Auth request failed");
            }
            AuthError::ReissueRejected(e) => {
                tracing::warn!(error = %e, "Token reissue rejected");
            }
            AuthError::Storage(e) => {
                tracing::error!(error = %e, "Tokens not persisted");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl From<AuthError> for NetworkError {
    fn from(err: AuthError) -> Self {
        err.log();
        err.to_network_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_conversion() {
        let errors = [
            AuthError::Network(NetworkError::Server),
            AuthError::MissingFcmToken,
            AuthError::MissingRefreshToken,
            AuthError::IncompleteOnboarding("fetal_nickname"),
            AuthError::EmptyTokenResponse,
            AuthError::ReissueRejected(NetworkError::client("401", "expired")),
            AuthError::Storage("disk full".into()),
        ];
        for err in errors {
            assert_eq!(err.kind(), err.to_network_error().kind(), "{err}");
        }
    }

    #[test]
    fn test_reissue_rejection_is_unauthorized() {
        let err: NetworkError = AuthError::ReissueRejected(NetworkError::Server).into();
        assert!(err.is_unauthorized());
    }
}
