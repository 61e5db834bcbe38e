use thiserror::Error;

use crate::account::errors::AccountError;

/// Failures while issuing or validating access tokens.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,

    #[error("Account no longer exists")]
    AccountNotFound,

    #[error("Account is deactivated")]
    AccountInactive,

    #[error("Token generation failed: {0}")]
    TokenGeneration(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<auth::JwtError> for AuthError {
    fn from(err: auth::JwtError) -> Self {
        match err {
            auth::JwtError::InvalidToken => AuthError::InvalidToken,
            auth::JwtError::EncodingFailed(reason) => AuthError::TokenGeneration(reason),
        }
    }
}

impl From<AccountError> for AuthError {
    fn from(err: AccountError) -> Self {
        AuthError::Database(err.to_string())
    }
}
