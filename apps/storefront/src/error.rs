//! # App Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in ShopSphere                             │
//! │                                                                         │
//! │  Shell line: "add 7"                                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command handler                                                 │  │
//! │  │  Result<T, AppError>                                             │  │
//! │  │         │                                                        │  │
//! │  │  API error? ──── ApiError::NotFound { .. } ──────────┐           │  │
//! │  │         │                                           │           │  │
//! │  │  Cart rule? ──── CoreError::InsufficientStock ───── AppError ───►│  │
//! │  │         │                                                        │  │
//! │  │  Success ───────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Shell prints: "error [INSUFFICIENT_STOCK] Only 3 left of product 7"   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The coordinator itself never returns errors: its failure modes are silent
//! no-ops or a login prompt. Errors come from the session holders, the form
//! and the shell's command parser.

use serde::Serialize;
use shopsphere_api::ApiError;
use shopsphere_core::{CoreError, ValidationError};

/// Error returned from storefront commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 42"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// No session, or the session token was rejected
    Unauthorized,

    /// Signed in, but not allowed
    Forbidden,

    /// Cart operation failed
    CartError,

    /// Insufficient stock
    InsufficientStock,

    /// The shell could not parse the command
    InvalidCommand,

    /// Internal error
    Internal,
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        AppError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Unauthorized, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Forbidden, message)
    }

    pub fn invalid_command(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::InvalidCommand, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

/// Converts mock API errors to app errors.
impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::NotFound { entity, id } => AppError::not_found(&entity, id),
            ApiError::Unauthorized(reason) => {
                tracing::debug!(%reason, "Token rejected");
                AppError::unauthorized("Your session is not valid. Please log in again.")
            }
            ApiError::Forbidden { action } => {
                AppError::forbidden(format!("Only admins can {}", action))
            }
            ApiError::InvalidCredentials => AppError::unauthorized("Invalid username or password"),
            ApiError::Validation(e) => e.into(),
            ApiError::Core(e) => e.into(),
            ApiError::Internal(e) => {
                // Log the detail, show a generic message
                tracing::error!("Mock API internal error: {}", e);
                AppError::internal("Something went wrong. Please try again.")
            }
        }
    }
}

/// Converts core errors to app errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotInCart(id) => {
                AppError::new(ErrorCode::CartError, format!("Product {} is not in your cart", id))
            }
            CoreError::InsufficientStock {
                product_id,
                available,
                ..
            } => AppError::new(
                ErrorCode::InsufficientStock,
                format!("Only {} left of product {}", available, product_id),
            ),
            CoreError::CartTooLarge { max } => AppError::new(
                ErrorCode::CartError,
                format!("Cart cannot have more than {} items", max),
            ),
            CoreError::QuantityTooLarge { requested, max } => AppError::validation(format!(
                "Quantity {} exceeds maximum allowed ({})",
                requested, max
            )),
            CoreError::EmptyCart => AppError::new(ErrorCode::CartError, "Your cart is empty"),
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}

/// Result type alias for storefront commands.
pub type AppResult<T> = Result<T, AppError>;
