//! # Cart
//!
//! The shopping cart aggregate.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  User Action              Cart Method             Effect                │
//! │  ───────────              ───────────             ──────                │
//! │                                                                         │
//! │  "Add to cart" ─────────► add_item() ───────────► push or quantity += 1 │
//! │                                                                         │
//! │  Change quantity ───────► set_quantity() ───────► items[i].qty = n      │
//! │                                           (n = 0) items.remove(i)       │
//! │                                                                         │
//! │  Click remove ──────────► remove_item() ────────► items.remove(i)       │
//! │                                                                         │
//! │  Checkout done ─────────► clear() ──────────────► items.clear()         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CartItem, Product};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by product id (adding the same product increases quantity)
/// - Every quantity is ≥ 1 (setting quantity to 0 removes the item)
/// - Items keep the order in which they were first added
/// - At most [`MAX_CART_ITEMS`] items, each at most [`MAX_ITEM_QUANTITY`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds one unit of `product`, or bumps the quantity if it is already in
    /// the cart.
    ///
    /// Returns the new quantity for that product.
    pub fn add_item(&mut self, product: &Product) -> CoreResult<u32> {
        if let Some(item) = self.items.iter_mut().find(|i| i.product_id() == product.id) {
            let requested = item.quantity + 1;
            check_quantity(product.id, requested, product.stock)?;
            item.quantity = requested;
            return Ok(requested);
        }

        if self.items.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        check_quantity(product.id, 1, product.stock)?;
        self.items.push(CartItem::new(product.clone()));
        Ok(1)
    }

    /// Removes a product from the cart.
    pub fn remove_item(&mut self, product_id: u32) -> CoreResult<()> {
        let initial_len = self.items.len();
        self.items.retain(|i| i.product_id() != product_id);

        if self.items.len() == initial_len {
            Err(CoreError::NotInCart(product_id))
        } else {
            Ok(())
        }
    }

    /// Sets the quantity of a product already in the cart.
    ///
    /// A quantity of zero removes the item. The stock check uses the stock
    /// recorded when the product was added.
    pub fn set_quantity(&mut self, product_id: u32, quantity: u32) -> CoreResult<()> {
        if quantity == 0 {
            return self.remove_item(product_id);
        }

        let item = self
            .items
            .iter_mut()
            .find(|i| i.product_id() == product_id)
            .ok_or(CoreError::NotInCart(product_id))?;

        check_quantity(product_id, quantity, item.product.stock)?;
        item.quantity = quantity;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Items in the order they were first added.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn get(&self, product_id: u32) -> Option<&CartItem> {
        self.items.iter().find(|i| i.product_id() == product_id)
    }

    /// Number of distinct products.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of all quantities.
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn subtotal(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn check_quantity(product_id: u32, requested: u32, available: u32) -> CoreResult<()> {
    if requested > MAX_ITEM_QUANTITY {
        return Err(CoreError::QuantityTooLarge {
            requested,
            max: MAX_ITEM_QUANTITY,
        });
    }
    if requested > available {
        return Err(CoreError::InsufficientStock {
            product_id,
            available,
            requested,
        });
    }
    Ok(())
}
