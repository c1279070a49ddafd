//! # Domain Types
//!
//! Core domain types used throughout ShopSphere.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    CartItem     │   │     Order       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (u32)       │   │  Product fields │   │  id (UUID)      │       │
//! │  │  name/category  │◄──│  + quantity     │◄──│  items          │       │
//! │  │  price (Money)  │   │                 │   │  total (Money)  │       │
//! │  │  stock          │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Role       │   │      User       │   │  Credentials    │       │
//! │  │  Customer       │   │  id, username   │   │  username       │       │
//! │  │  Admin          │   │  role           │   │  password       │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Role
// =============================================================================

/// What a signed-in user is allowed to see.
///
/// Anonymous visitors are treated as `Customer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Customer,
    Admin,
}

impl Role {
    #[inline]
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Customer => write!(f, "customer"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "customer" => Ok(Role::Customer),
            "admin" => Ok(Role::Admin),
            other => Err(ValidationError::InvalidFormat {
                field: "role".to_string(),
                reason: format!("unknown role '{}'", other),
            }),
        }
    }
}

// =============================================================================
// User
// =============================================================================

/// A storefront account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u32,
    pub username: String,
    pub role: Role,
}

/// Username/password pair submitted by the login form.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials {
            username: username.into(),
            password: password.into(),
        }
    }
}

// Keeps passwords out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product listed in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier, assigned by the store.
    pub id: u32,

    /// Display name.
    pub name: String,

    /// Category used by the product list filter.
    pub category: String,

    /// Unit price; never negative.
    pub price: Money,

    /// Picture shown on the product card.
    pub image_url: String,

    /// Units available.
    pub stock: u32,
}

impl Product {
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Case-insensitive match of `query` against name or category.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&query) || self.category.to_lowercase().contains(&query)
    }
}

/// Product fields without an id, used when creating a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub price: Money,
    pub image_url: String,
    pub stock: u32,
}

impl NewProduct {
    /// Attaches a store-assigned id.
    pub fn with_id(self, id: u32) -> Product {
        Product {
            id,
            name: self.name,
            category: self.category,
            price: self.price,
            image_url: self.image_url,
            stock: self.stock,
        }
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// A product in the cart together with how many units were added.
///
/// The product fields are a copy taken when the item was first added, so
/// the cart keeps showing the price the customer saw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(flatten)]
    #[ts(flatten)]
    pub product: Product,

    /// Always at least 1.
    pub quantity: u32,
}

impl CartItem {
    pub fn new(product: Product) -> Self {
        CartItem {
            product,
            quantity: 1,
        }
    }

    #[inline]
    pub fn product_id(&self) -> u32 {
        self.product.id
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.product.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Order
// =============================================================================

/// A placed order. There is no payment step; an order records what was in
/// the cart at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub user_id: u32,
    pub items: Vec<CartItem>,
    pub total: Money,
    #[ts(as = "String")]
    pub order_date: DateTime<Utc>,
}

impl Order {
    /// Builds an order for `user_id`, computing the total from the items.
    pub fn place(user_id: u32, items: Vec<CartItem>) -> Self {
        let total = items.iter().map(CartItem::line_total).sum();
        Order {
            id: Uuid::new_v4().to_string(),
            user_id,
            items,
            total,
            order_date: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product {
            id: 3,
            name: "Canvas Tote".to_string(),
            category: "Accessories".to_string(),
            price: Money::from_cents(1800),
            image_url: "https://picsum.photos/seed/tote/400".to_string(),
            stock: 4,
        }
    }

    #[test]
    fn test_role_default_is_customer() {
        assert_eq!(Role::default(), Role::Customer);
        assert!(!Role::Customer.is_admin());
        assert!(Role::Admin.is_admin());
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(" customer ".parse::<Role>().unwrap(), Role::Customer);
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let creds = Credentials::new("admin", "admin123");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("admin"));
        assert!(!debug.contains("admin123"));
    }

    #[test]
    fn test_product_matches_name_or_category() {
        let p = product();
        assert!(p.matches("tote"));
        assert!(p.matches("ACCESS"));
        assert!(p.matches(""));
        assert!(!p.matches("lamp"));
    }

    #[test]
    fn test_cart_item_serializes_flat() {
        let item = CartItem {
            product: product(),
            quantity: 2,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["imageUrl"], "https://picsum.photos/seed/tote/400");
        assert_eq!(json["quantity"], 2);
        assert_eq!(item.line_total().cents(), 3600);
    }

    #[test]
    fn test_order_total() {
        let mut second = product();
        second.id = 4;
        second.price = Money::from_cents(250);

        let order = Order::place(
            2,
            vec![
                CartItem {
                    product: product(),
                    quantity: 1,
                },
                CartItem {
                    product: second,
                    quantity: 4,
                },
            ],
        );
        assert_eq!(order.user_id, 2);
        assert_eq!(order.total.cents(), 2800);
        assert!(Uuid::parse_str(&order.id).is_ok());
    }
}
