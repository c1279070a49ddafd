//! # Validation Module
//!
//! Input validation for the admin product form and the login form.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form (storefront app)                                        │
//! │  ├── Parsing typed text into numbers / Money                           │
//! │  └── Immediate feedback                                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Business rules (required fields, lengths, non-negative price)     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Mock API                                                     │
//! │  └── Re-validates every write before touching the store                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shopsphere_core::validation::{validate_product_name, validate_image_url};
//!
//! assert!(validate_product_name("Linen Shirt").is_ok());
//! assert!(validate_image_url("ftp://example.com/a.png").is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Credentials, NewProduct, Product};
use crate::MAX_PRICE_CENTS;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 120;
const MAX_CATEGORY_LEN: usize = 60;
const MAX_URL_LEN: usize = 2048;
const MAX_QUERY_LEN: usize = 100;

fn required(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates a product name: required, at most 120 characters.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    required("name", name, MAX_NAME_LEN)
}

/// Validates a product category: required, at most 60 characters.
pub fn validate_category(category: &str) -> ValidationResult<()> {
    required("category", category, MAX_CATEGORY_LEN)
}

/// Validates a price. Zero is allowed (free items), negative is not, and
/// nothing above [`MAX_PRICE_CENTS`].
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }
    if price.cents() > MAX_PRICE_CENTS {
        return Err(ValidationError::TooLarge {
            field: "price".to_string(),
            max: Money::from_cents(MAX_PRICE_CENTS).to_string(),
        });
    }
    Ok(())
}

/// Validates an image url: required, `http://` or `https://`, no whitespace.
pub fn validate_image_url(url: &str) -> ValidationResult<()> {
    required("imageUrl", url, MAX_URL_LEN)?;

    let url = url.trim();
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .ok_or_else(|| ValidationError::InvalidFormat {
            field: "imageUrl".to_string(),
            reason: "must start with http:// or https://".to_string(),
        })?;

    if rest.is_empty() || rest.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: "imageUrl".to_string(),
            reason: "must be a host followed by an optional path".to_string(),
        });
    }

    Ok(())
}

/// Validates every field of a product about to be created.
pub fn validate_new_product(product: &NewProduct) -> ValidationResult<()> {
    validate_product_name(&product.name)?;
    validate_category(&product.category)?;
    validate_price(product.price)?;
    validate_image_url(&product.image_url)?;
    Ok(())
}

/// Validates every field of a product about to be updated.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_product_name(&product.name)?;
    validate_category(&product.category)?;
    validate_price(product.price)?;
    validate_image_url(&product.image_url)?;
    Ok(())
}

/// Validates login form input before it is sent anywhere.
pub fn validate_credentials(credentials: &Credentials) -> ValidationResult<()> {
    if credentials.username.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "username".to_string(),
        });
    }
    if credentials.password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }
    Ok(())
}

/// Validates a product list search query.
///
/// Empty is fine (shows everything). Returns the trimmed query.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}
