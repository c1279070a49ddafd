//! # shopsphere-core: Pure Storefront Logic
//!
//! This crate holds the domain model of the ShopSphere storefront as plain
//! types and pure functions. Nothing in here touches the network, the clock
//! (beyond stamping new orders) or the file system.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       ShopSphere Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Storefront shell (apps/storefront)              │   │
//! │  │   Header ──► Product list ──► Cart drawer ──► Admin dashboard   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ shopsphere-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │   rules   │  │   │
//! │  │   │ Role/User │  │           │  │ CartItem  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                shopsphere-api (mock backend)                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Role, User, Order, ...)
//! - [`money`] - Money type with integer arithmetic
//! - [`cart`] - The cart aggregate (unique items, quantities, totals)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation for forms and credentials
//!
//! ## Example Usage
//!
//! ```rust
//! use shopsphere_core::{Cart, Money, Product};
//!
//! let mug = Product {
//!     id: 7,
//!     name: "Enamel Mug".to_string(),
//!     category: "Kitchen".to_string(),
//!     price: Money::from_cents(1250),
//!     image_url: "https://picsum.photos/seed/mug/400".to_string(),
//!     stock: 10,
//! };
//!
//! let mut cart = Cart::new();
//! cart.add_item(&mug).unwrap();
//! cart.add_item(&mug).unwrap();
//!
//! assert_eq!(cart.item_count(), 1);
//! assert_eq!(cart.subtotal().cents(), 2500);
//! ```

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

pub use cart::Cart;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

/// Maximum number of distinct products allowed in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single product in the cart.
///
/// Guards against typing 1000 when 10 was meant.
pub const MAX_ITEM_QUANTITY: u32 = 999;

/// Highest accepted product price, in cents ($1,000,000.00).
///
/// A full cart at this price (`MAX_CART_ITEMS * MAX_ITEM_QUANTITY` units)
/// still fits in the `i64` behind [`Money`].
pub const MAX_PRICE_CENTS: i64 = 100_000_000;
