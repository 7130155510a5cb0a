/**
 * Backend Error Types
 *
 * `BackendError` is the one error type HTTP handlers return. Lower layers
 * have their own errors (`DalError`, `TokenError`, `SharedError`) which
 * convert into it with `?`.
 *
 * # Status Code Mapping
 *
 * - 400 - `Validation`, `DuplicateKey`, `EmailAlreadyRegistered`,
 *   `NoFieldsToUpdate`, `AccountInactive`
 * - 401 - `InvalidCredentials`, `Unauthenticated` (with `WWW-Authenticate: Bearer`)
 * - 404 - `NotFound`
 * - 503 - `StoreUnavailable`
 * - 500 - `Internal`, `Serialization`
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::auth::sessions::TokenError;
use crate::backend::database::DalError;
use crate::shared::SharedError;

/// Why a bearer credential was rejected
///
/// Only ever logged. Every kind produces the same response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnauthenticatedReason {
    MissingHeader,
    MalformedHeader,
    InvalidSignature,
    Expired,
    MalformedToken,
    UnknownSubject,
}

/// Backend-specific error types
#[derive(Debug, Error)]
pub enum BackendError {
    /// Request body or parameters failed validation
    #[error("{message}")]
    Validation { field: String, message: String },

    /// A unique index rejected a write
    #[error("A record with the same {index} already exists in {collection}")]
    DuplicateKey { collection: String, index: String },

    #[error("Email already registered")]
    EmailAlreadyRegistered,

    #[error("No fields to update")]
    NoFieldsToUpdate,

    #[error("{resource} not found")]
    NotFound { resource: &'static str },

    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error("Inactive user")]
    AccountInactive,

    /// Any bearer-token failure; the reason is for logs only
    #[error("Could not validate credentials")]
    Unauthenticated(UnauthenticatedReason),

    #[error("Database not available")]
    StoreUnavailable(String),

    #[error("Internal server error")]
    Internal(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BackendError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. }
            | Self::DuplicateKey { .. }
            | Self::EmailAlreadyRegistered
            | Self::NoFieldsToUpdate
            | Self::AccountInactive => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::InvalidCredentials | Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) | Self::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Human-readable message returned to the client
    ///
    /// Internal details (store errors, serialization failures) are not exposed.
    pub fn message(&self) -> String {
        match self {
            Self::Serialization(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }

    /// Whether the response should carry `WWW-Authenticate: Bearer`
    pub fn is_auth_challenge(&self) -> bool {
        matches!(self, Self::InvalidCredentials | Self::Unauthenticated(_))
    }
}

impl From<DalError> for BackendError {
    fn from(err: DalError) -> Self {
        match err {
            DalError::DuplicateKey { collection, index } => Self::DuplicateKey { collection, index },
            DalError::StoreUnavailable(reason) => Self::StoreUnavailable(reason),
            DalError::Serialization(e) => Self::Serialization(e),
            DalError::InvalidRequest(reason) => Self::validation("body", reason),
        }
    }
}

impl From<TokenError> for BackendError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::InvalidSignature => Self::Unauthenticated(UnauthenticatedReason::InvalidSignature),
            TokenError::Expired => Self::Unauthenticated(UnauthenticatedReason::Expired),
            TokenError::Malformed(_) => Self::Unauthenticated(UnauthenticatedReason::MalformedToken),
            TokenError::Encoding(reason) => Self::Internal(reason),
        }
    }
}

impl From<SharedError> for BackendError {
    fn from(err: SharedError) -> Self {
        match err {
            SharedError::ValidationError { field, message } => Self::Validation { field, message },
            SharedError::SerializationError { message } => Self::validation("body", message),
        }
    }
}

impl From<validator::ValidationErrors> for BackendError {
    fn from(errors: validator::ValidationErrors) -> Self {
        SharedError::from(errors).into()
    }
}
