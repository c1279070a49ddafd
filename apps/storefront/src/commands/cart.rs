//! # Cart Commands
//!
//! The "add to cart" buttons, the cart drawer and checkout.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────┐  add   ┌──────────┐  cart   ┌──────────┐ checkout ┌──────┐│
//! │  │  Empty   │──────► │ In Cart  │───────► │  Drawer  │────────► │Order ││
//! │  └──────────┘        └──────────┘         └──────────┘          └──────┘│
//! │       ▲                   │ qty <id> 0         │ close-cart        │    │
//! │       │                   │ remove <id>        ▼                   │    │
//! │       └───────────────────┴──────────── (back to browsing) ◄───────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use super::product::find_product;
use super::Outcome;
use crate::error::AppResult;
use crate::shell::Shell;

pub async fn add(shell: &mut Shell, id: u32) -> AppResult<Outcome> {
    let product = find_product(shell, id).await?;
    let quantity = shell.cart.add_item(&product)?;
    Ok(Outcome::message(format!(
        "Added {} (x{}) to your cart.",
        product.name, quantity
    )))
}

pub fn remove(shell: &mut Shell, id: u32) -> AppResult<Outcome> {
    shell.cart.remove_item(id)?;
    Ok(Outcome::silent())
}

pub fn set_quantity(shell: &mut Shell, id: u32, quantity: u32) -> AppResult<Outcome> {
    shell.cart.set_quantity(id, quantity)?;
    Ok(Outcome::silent())
}

pub fn open(shell: &mut Shell) -> AppResult<Outcome> {
    shell.view.open_cart();
    Ok(Outcome::silent())
}

pub fn close(shell: &mut Shell) -> AppResult<Outcome> {
    shell.view.close_cart();
    Ok(Outcome::silent())
}

/// Places the order; stock changes, so the catalog is re-read.
pub async fn checkout(shell: &mut Shell) -> AppResult<Outcome> {
    let order = shell.cart.checkout(shell.api.as_ref(), &shell.auth).await?;
    shell.catalog.invalidate();
    shell.view.close_cart();

    Ok(Outcome::message(format!(
        "Order {} placed: {} item(s), total {}.",
        order.id,
        order.items.len(),
        shell.config.format_currency(order.total)
    )))
}
