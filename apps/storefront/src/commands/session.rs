//! # Session Commands
//!
//! Header navigation and sign-in.

use shopsphere_core::Credentials;
use tracing::info;

use super::Outcome;
use crate::error::AppResult;
use crate::shell::Shell;
use crate::state::NavTarget;

pub fn show_products(shell: &mut Shell) -> AppResult<Outcome> {
    shell.view.request_view_change(NavTarget::Products);
    Ok(Outcome::silent())
}

/// Non-admins get the login-required modal instead.
pub fn show_admin(shell: &mut Shell) -> AppResult<Outcome> {
    shell.view.request_view_change(NavTarget::Admin);
    Ok(Outcome::silent())
}

pub fn show_login_page(shell: &mut Shell) -> AppResult<Outcome> {
    shell.view.request_login_page();
    Ok(Outcome::silent())
}

/// The header's login button.
pub fn open_login(shell: &mut Shell) -> AppResult<Outcome> {
    if shell.auth.is_authenticated() {
        return Ok(Outcome::message("Already logged in. Use 'logout' first."));
    }
    shell.view.open_login_modal();
    Ok(Outcome::silent())
}

pub async fn login(shell: &mut Shell, credentials: Credentials) -> AppResult<Outcome> {
    let session = shell.auth.login(shell.api.as_ref(), &credentials).await?;
    shell.view.on_login_success();

    let name = session
        .user
        .map(|u| u.username)
        .unwrap_or(credentials.username);
    Ok(Outcome::message(format!("Welcome, {} ({}).", name, session.role)))
}

pub fn logout(shell: &mut Shell) -> AppResult<Outcome> {
    if !shell.auth.is_authenticated() {
        return Ok(Outcome::message("Not logged in."));
    }
    shell.auth.logout();
    info!("Shopper logged out");
    Ok(Outcome::message("Logged out."))
}
