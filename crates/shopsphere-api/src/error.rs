//! # API Error Types
//!
//! Errors returned by the mock backend.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  ValidationError / CoreError (shopsphere-core)                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (this module) ← Adds auth and lookup failures                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AppError (storefront) ← { code, message } for the shell               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use shopsphere_core::{CoreError, ValidationError};
use thiserror::Error;

/// Mock backend errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Entity not found in the store.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Token is missing, malformed or expired.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Token is valid but the user lacks the required role.
    ///
    /// ## When This Occurs
    /// - A customer token is used to create, update or delete a product
    #[error("Forbidden: {action} requires an admin account")]
    Forbidden { action: String },

    /// Unknown username or wrong password. Deliberately does not say which.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Input failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A domain rule rejected the request (stock, empty order, ...).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Anything unexpected (hashing or token encoding failures).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn not_found(entity: &str, id: impl ToString) -> Self {
        ApiError::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }

    pub fn forbidden(action: &str) -> Self {
        ApiError::Forbidden {
            action: action.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }
}

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
