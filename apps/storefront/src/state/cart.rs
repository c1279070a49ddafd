//! # Cart Session
//!
//! The shopper's cart, observable by the header badge and the cart drawer.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Shell Command            CartSession             Cart Change           │
//! │  ─────────────            ───────────             ───────────           │
//! │                                                                         │
//! │  add 7 ─────────────────► add_item() ───────────► push or qty += 1     │
//! │                                                                         │
//! │  qty 7 3 ───────────────► set_quantity() ───────► items[i].qty = 3     │
//! │  qty 7 0 ───────────────► set_quantity() ───────► items.remove(i)      │
//! │                                                                         │
//! │  remove 7 ──────────────► remove_item() ────────► items.remove(i)      │
//! │                                                                         │
//! │  checkout ──────────────► checkout() ───────────► api order, clear()   │
//! │                                                                         │
//! │  NOTE: subscribers are notified only when the cart actually changed.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use serde::Serialize;
use shopsphere_api::StorefrontApi;
use shopsphere_core::{Cart, CartItem, CoreError, Money, Order, Product};
use tokio::sync::watch;
use tracing::{debug, info};

use super::auth::AuthSession;
use crate::error::{AppError, AppResult};

/// Cart contents with computed totals, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    pub items: Vec<CartItem>,

    /// Distinct products.
    pub item_count: usize,

    /// Sum of quantities, shown on the header badge.
    pub total_quantity: u32,

    pub subtotal: Money,
}

impl CartSnapshot {
    fn of(cart: &Cart) -> Self {
        CartSnapshot {
            items: cart.items().to_vec(),
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            subtotal: cart.subtotal(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Shared handle to the cart. Clones publish to the same channel.
#[derive(Debug, Clone)]
pub struct CartSession {
    tx: Arc<watch::Sender<Cart>>,
}

impl Default for CartSession {
    fn default() -> Self {
        CartSession::new()
    }
}

impl CartSession {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Cart::new());
        CartSession { tx: Arc::new(tx) }
    }

    /// Adds one unit of `product`. Returns the product's new quantity.
    pub fn add_item(&self, product: &Product) -> AppResult<u32> {
        let quantity = self.mutate(|cart| cart.add_item(product))?;
        debug!(product_id = product.id, quantity, "Added to cart");
        Ok(quantity)
    }

    pub fn remove_item(&self, product_id: u32) -> AppResult<()> {
        self.mutate(|cart| cart.remove_item(product_id))?;
        debug!(product_id, "Removed from cart");
        Ok(())
    }

    /// Sets a quantity; zero removes the item.
    pub fn set_quantity(&self, product_id: u32, quantity: u32) -> AppResult<()> {
        self.mutate(|cart| cart.set_quantity(product_id, quantity))?;
        debug!(product_id, quantity, "Cart quantity updated");
        Ok(())
    }

    pub fn clear(&self) {
        self.tx.send_if_modified(|cart| {
            let had_items = !cart.is_empty();
            cart.clear();
            had_items
        });
    }

    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot::of(&self.tx.borrow())
    }

    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.tx.subscribe()
    }

    /// Places an order for the cart contents and empties the cart.
    ///
    /// Requires a signed-in user. The cart is left untouched if the order
    /// is rejected.
    pub async fn checkout(&self, api: &dyn StorefrontApi, auth: &AuthSession) -> AppResult<Order> {
        let token = auth
            .token()
            .ok_or_else(|| AppError::unauthorized("Log in to check out"))?;

        let items = self.tx.borrow().items().to_vec();
        if items.is_empty() {
            return Err(CoreError::EmptyCart.into());
        }

        let order = api.create_order(items, &token).await?;
        self.clear();

        info!(order_id = %order.id, total = %order.total, "Checkout complete");
        Ok(order)
    }

    /// Applies `op` and notifies subscribers only if it succeeded.
    fn mutate<T>(&self, op: impl FnOnce(&mut Cart) -> Result<T, CoreError>) -> AppResult<T> {
        let mut outcome = None;
        self.tx.send_if_modified(|cart| {
            let result = op(cart);
            let changed = result.is_ok();
            outcome = Some(result);
            changed
        });

        match outcome {
            Some(result) => result.map_err(AppError::from),
            None => Err(AppError::internal("cart update did not run")),
        }
    }
}
