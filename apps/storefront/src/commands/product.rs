//! # Product Commands
//!
//! Browsing the product list, plus the admin-only edit and delete buttons
//! on each product card.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Product card                                                           │
//! │  ┌───────────────────────────────┐                                      │
//! │  │  #14  Enamel Mug      $12.50  │                                      │
//! │  │  [add]                        │ ◄── everyone                         │
//! │  │  [edit] [delete]              │ ◄── admins only                      │
//! │  └───────────────────────────────┘                                      │
//! │                                                                         │
//! │  delete 14 ──► confirmation modal ──► confirm ──► background deletion   │
//! │                                   └─► dismiss ──► nothing happens       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use shopsphere_core::Product;

use super::Outcome;
use crate::error::{AppError, AppResult};
use crate::shell::Shell;

/// Looks a product up in the cached list, falling back to the API.
pub(crate) async fn find_product(shell: &Shell, id: u32) -> AppResult<Product> {
    if let Some(product) = shell.catalog.get(id) {
        return Ok(product.clone());
    }
    Ok(shell.api.get_product(id).await?)
}

fn require_admin(shell: &Shell, action: &str) -> AppResult<()> {
    if shell.auth.role().is_admin() {
        Ok(())
    } else {
        Err(AppError::forbidden(format!("Only admins can {}", action)))
    }
}

pub async fn filter(shell: &mut Shell, category: Option<String>) -> AppResult<Outcome> {
    if let Some(wanted) = &category {
        shell.catalog.ensure_fresh(shell.api.as_ref()).await?;
        let known = shell
            .catalog
            .categories()
            .iter()
            .any(|c| c.eq_ignore_ascii_case(wanted));
        if !known {
            return Err(AppError::not_found("Category", wanted));
        }
    }
    shell.catalog.set_category(category);
    Ok(Outcome::silent())
}

/// An empty query clears the search.
pub fn search(shell: &mut Shell, query: &str) -> AppResult<Outcome> {
    shell.catalog.set_query(query)?;
    Ok(Outcome::silent())
}

pub async fn edit(shell: &mut Shell, id: u32) -> AppResult<Outcome> {
    require_admin(shell, "edit products")?;
    let product = find_product(shell, id).await?;
    shell.view.request_edit_product(product);
    Ok(Outcome::silent())
}

/// Opens an empty admin form. Non-admins get the login-required modal.
pub fn create(shell: &mut Shell) -> AppResult<Outcome> {
    shell.view.request_create_product();
    Ok(Outcome::silent())
}

pub fn request_delete(shell: &mut Shell, id: u32) -> AppResult<Outcome> {
    require_admin(shell, "delete products")?;
    shell.view.request_delete(id);
    Ok(Outcome::silent())
}

/// Confirms the pending deletion. The result shows up on a later frame.
pub fn confirm_delete(shell: &mut Shell) -> AppResult<Outcome> {
    let target = shell.view.state().product_to_delete;
    match (shell.view.confirm_delete(), target) {
        (Some(task), Some(id)) => {
            shell.pending.retain(|t| !t.is_finished());
            shell.pending.push(task);
            Ok(Outcome::message(format!("Deleting product {}...", id)))
        }
        _ => Ok(Outcome::silent()),
    }
}

/// Closes whichever modal is open.
pub fn dismiss(shell: &mut Shell) -> AppResult<Outcome> {
    let state = shell.view.state();
    let (deleting, logging_in) = (state.is_delete_modal_open, state.is_login_modal_open);

    if deleting {
        shell.view.cancel_delete();
    } else if logging_in {
        shell.view.close_login_modal();
    } else {
        return Ok(Outcome::message("Nothing to dismiss."));
    }
    Ok(Outcome::silent())
}
