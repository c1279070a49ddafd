//! # Auth Session
//!
//! Who is signed in, observable by every part of the storefront.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   new() ──► Loading ──initialize()──► Anonymous ◄──── logout() ──┐     │
//! │                            │              │                      │     │
//! │               stored token │              │ login(ok)            │     │
//! │               verified     ▼              ▼                      │     │
//! │                       SignedIn ◄──────────┘ ─────────────────────┘     │
//! │                                                                         │
//! │   Every transition is published on a watch channel; subscribers see    │
//! │   the latest Session, never a backlog.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `is_loading` is true only between `new()` and the end of `initialize()`.

use std::sync::Arc;

use serde::Serialize;
use shopsphere_api::{AuthGrant, StorefrontApi};
use shopsphere_core::validation::validate_credentials;
use shopsphere_core::{Credentials, Role, User};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::AppResult;

/// Snapshot of the authentication state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub is_authenticated: bool,

    /// Customer unless an admin is signed in.
    pub role: Role,

    /// True only during the startup check.
    pub is_loading: bool,

    #[serde(skip_serializing)]
    pub token: Option<String>,

    pub user: Option<User>,
}

impl Session {
    fn loading() -> Self {
        Session {
            is_loading: true,
            ..Session::anonymous()
        }
    }

    fn anonymous() -> Self {
        Session {
            is_authenticated: false,
            role: Role::Customer,
            is_loading: false,
            token: None,
            user: None,
        }
    }

    fn signed_in(grant: AuthGrant) -> Self {
        Session {
            is_authenticated: true,
            role: grant.user.role,
            is_loading: false,
            token: Some(grant.token),
            user: Some(grant.user),
        }
    }
}

/// Shared handle to the auth session. Clones publish to the same channel.
#[derive(Debug, Clone)]
pub struct AuthSession {
    tx: Arc<watch::Sender<Session>>,
}

impl Default for AuthSession {
    fn default() -> Self {
        AuthSession::new()
    }
}

impl AuthSession {
    /// Creates a session in the loading state.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Session::loading());
        AuthSession { tx: Arc::new(tx) }
    }

    /// The startup check.
    ///
    /// A stored token the API still accepts restores the session. Anything
    /// else, including a rejected token, ends up anonymous. Never fails.
    pub async fn initialize(&self, api: &dyn StorefrontApi, stored_token: Option<String>) {
        let session = match stored_token {
            Some(token) => match api.verify_token(&token).await {
                Ok(user) => {
                    info!(user = %user.username, role = %user.role, "Session restored");
                    Session::signed_in(AuthGrant { user, token })
                }
                Err(e) => {
                    warn!(error = %e, "Stored session token rejected");
                    Session::anonymous()
                }
            },
            None => {
                debug!("No stored session");
                Session::anonymous()
            }
        };

        self.tx.send_replace(session);
    }

    /// Signs in with `credentials`.
    ///
    /// Credentials are checked locally first. On failure the session is left
    /// signed out and the error is returned.
    pub async fn login(
        &self,
        api: &dyn StorefrontApi,
        credentials: &Credentials,
    ) -> AppResult<Session> {
        validate_credentials(credentials)?;

        match api.login(credentials).await {
            Ok(grant) => {
                let session = Session::signed_in(grant);
                self.tx.send_replace(session.clone());
                Ok(session)
            }
            Err(e) => {
                self.tx.send_modify(|s| {
                    *s = Session {
                        is_loading: s.is_loading,
                        ..Session::anonymous()
                    }
                });
                Err(e.into())
            }
        }
    }

    /// Signs out and drops the token.
    pub fn logout(&self) {
        let was = self.tx.send_replace(Session::anonymous());
        if let Some(user) = was.user {
            info!(user = %user.username, "Logged out");
        }
    }

    pub fn snapshot(&self) -> Session {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.tx.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.tx.borrow().is_loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.tx.borrow().is_authenticated
    }

    pub fn role(&self) -> Role {
        self.tx.borrow().role
    }

    pub fn token(&self) -> Option<String> {
        self.tx.borrow().token.clone()
    }
}
