//! # Admin Form Commands
//!
//! Editing the product form on the admin dashboard.

use super::Outcome;
use crate::error::{AppError, AppResult};
use crate::shell::Shell;
use crate::state::{CatalogEvent, FormField, ProductForm};

fn form_mut(shell: &mut Shell) -> AppResult<&mut ProductForm> {
    shell
        .form
        .as_mut()
        .ok_or_else(|| AppError::invalid_command("No product form is open. Use 'new' or 'edit <id>'."))
}

pub fn set_field(shell: &mut Shell, field: FormField, value: String) -> AppResult<Outcome> {
    form_mut(shell)?.set(field, value);
    Ok(Outcome::silent())
}

/// Validates and saves the form, then returns to the product list.
///
/// On failure the form stays open with the admin's input intact.
pub async fn save(shell: &mut Shell) -> AppResult<Outcome> {
    let form = form_mut(shell)?.clone();
    let token = shell
        .auth
        .token()
        .ok_or_else(|| AppError::unauthorized("Log in as an admin to save products"))?;

    let saved = form.submit(shell.api.as_ref(), &token).await?;

    shell.view.announce(CatalogEvent::Saved { id: saved.id });
    shell.view.on_admin_form_submit();

    let verb = if form.is_edit() { "Updated" } else { "Created" };
    Ok(Outcome::message(format!("{} product {} ({}).", verb, saved.id, saved.name)))
}

pub fn cancel(shell: &mut Shell) -> AppResult<Outcome> {
    form_mut(shell)?;
    shell.view.on_admin_form_cancel();
    Ok(Outcome::silent())
}
