//! # Error Types
//!
//! Domain-specific error types for shopsphere-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shopsphere-core errors (this file)                                    │
//! │  ├── CoreError        - Cart and catalog rule violations               │
//! │  └── ValidationError  - Form / credential input failures               │
//! │                                                                         │
//! │  shopsphere-api errors (separate crate)                                │
//! │  └── ApiError         - Mock backend failures (auth, not found)        │
//! │                                                                         │
//! │  storefront errors (in app)                                            │
//! │  └── AppError         - What the shell prints                          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → AppError → Shell       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Core business logic errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Product is not in the cart.
    #[error("Product {0} is not in the cart")]
    NotInCart(u32),

    /// Not enough stock to satisfy the requested quantity.
    ///
    /// ## User Workflow
    /// ```text
    /// Add to Cart (already 3 in cart)
    ///      │
    ///      ▼
    /// Check stock: available=3
    ///      │
    ///      ▼
    /// InsufficientStock { product_id: 4, available: 3, requested: 4 }
    ///      │
    ///      ▼
    /// Shell shows: "Only 3 of product 4 in stock"
    /// ```
    #[error("Insufficient stock for product {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: u32,
        available: u32,
        requested: u32,
    },

    /// Cart has exceeded maximum allowed distinct products.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Item quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: u32, max: u32 },

    /// An order was requested for an empty cart.
    #[error("Cannot place an order for an empty cart")]
    EmptyCart,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Input validation errors.
///
/// Raised by the admin product form and the login form before anything is
/// sent to the API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Value is above the allowed ceiling.
    #[error("{field} must be at most {max}")]
    TooLarge { field: String, max: String },

    /// Invalid format (e.g., an image url that is not http/https).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            product_id: 4,
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for product 4: available 3, requested 5"
        );
        assert_eq!(
            CoreError::NotInCart(9).to_string(),
            "Product 9 is not in the cart"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::Negative {
            field: "stock".to_string(),
        };
        assert_eq!(err.to_string(), "stock must not be negative");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "category".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
