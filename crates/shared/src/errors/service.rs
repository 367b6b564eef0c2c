use crate::errors::repository::RepositoryError;
use jsonwebtoken::errors::{Error as JwtError, ErrorKind as JwtErrorKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Repository error: {0}")]
    Repo(#[from] RepositoryError),

    #[error("Authentication token is required")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Validation failed: {0:?}")]
    Validation(Vec<String>),

    #[error("Cart is empty")]
    EmptyCart,

    #[error("{0}")]
    NotFound(String),

    /// A collaborator service failed or could not be reached. `status` is the
    /// collaborator's own HTTP status when it answered at all.
    #[error("Upstream error: {message}")]
    Upstream {
        status: Option<u16>,
        message: String,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::Validation(vec![message.into()])
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ServiceError::NotFound(message.into())
    }
}

impl From<JwtError> for ServiceError {
    fn from(err: JwtError) -> Self {
        match err.kind() {
            JwtErrorKind::ExpiredSignature => ServiceError::TokenExpired,
            _ => ServiceError::InvalidToken,
        }
    }
}
