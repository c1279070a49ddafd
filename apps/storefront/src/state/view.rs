//! # View Coordinator
//!
//! Decides which screen and which modals are visible, and sequences the
//! side effects of admin actions.
//!
//! ## Screen Selection
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         render()                                        │
//! │                                                                         │
//! │   session loading? ───yes──► Screen::Loading (nothing else)             │
//! │          │ no                                                           │
//! │          ▼                                                              │
//! │   signed out and view ≠ Products? ───yes──► Screen::Login (inline)      │
//! │          │ no                                                           │
//! │          ▼                                                              │
//! │   view = Admin ──► Screen::Admin { editing }                            │
//! │   otherwise ─────► Screen::Products                                     │
//! │                                                                         │
//! │   + cart drawer, login-required modal, delete confirmation modal        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Delete Flow
//! ```text
//! request_delete(42) ──► modal open, target 42
//!        │
//! confirm_delete() ──► modal closed, target cleared (immediately)
//!        │
//!        └── spawn ──► api.delete_product(42, token)
//!                             │
//!                 ┌───────────┴────────────┐
//!                 ▼ ok                     ▼ err
//!      CatalogEvent::Deleted     CatalogEvent::DeleteFailed
//! ```
//!
//! The coordinator never fails: a missing precondition is a silent no-op and
//! an admin request from a non-admin opens the login-required modal.

use std::sync::Arc;

use serde::Serialize;
use shopsphere_api::StorefrontApi;
use shopsphere_core::Product;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::auth::AuthSession;
use super::cart::{CartSession, CartSnapshot};
use super::catalog::CatalogEvent;

/// Capacity of the catalog event channel. Slow listeners that fall further
/// behind see a lag and re-fetch.
const CATALOG_EVENT_CAPACITY: usize = 32;

/// The requested main screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Products,
    Admin,
    Login,
}

/// Where header navigation can go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    Products,
    Admin,
}

impl From<NavTarget> for View {
    fn from(target: NavTarget) -> Self {
        match target {
            NavTarget::Products => View::Products,
            NavTarget::Admin => View::Admin,
        }
    }
}

/// Everything the coordinator owns.
///
/// ## Invariants
/// - `is_delete_modal_open` implies `product_to_delete.is_some()`
/// - `editing_product.is_some()` implies `view == View::Admin`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub view: View,
    pub is_cart_open: bool,
    pub is_login_modal_open: bool,
    pub is_delete_modal_open: bool,

    /// The product being edited; `None` on Admin means a create.
    pub editing_product: Option<Product>,

    pub product_to_delete: Option<u32>,
}

/// The main area of a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Loading,
    Login,
    Products,
    Admin { editing: Option<Product> },
}

/// One render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub screen: Screen,

    /// Present while the cart drawer is open.
    pub cart_drawer: Option<CartSnapshot>,

    /// The "please log in" modal.
    pub login_modal: bool,

    /// Product awaiting delete confirmation.
    pub delete_modal: Option<u32>,
}

impl Frame {
    fn loading() -> Self {
        Frame {
            screen: Screen::Loading,
            cart_drawer: None,
            login_modal: false,
            delete_modal: None,
        }
    }
}

/// Top-level screen and modal state machine.
pub struct ViewCoordinator {
    state: ViewState,
    auth: AuthSession,
    cart: CartSession,
    api: Arc<dyn StorefrontApi>,
    catalog_tx: broadcast::Sender<CatalogEvent>,
}

impl ViewCoordinator {
    pub fn new(auth: AuthSession, cart: CartSession, api: Arc<dyn StorefrontApi>) -> Self {
        let (catalog_tx, _) = broadcast::channel(CATALOG_EVENT_CAPACITY);
        ViewCoordinator {
            state: ViewState::default(),
            auth,
            cart,
            api,
            catalog_tx,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Receiver for events announced after admin mutations resolve.
    pub fn subscribe_catalog(&self) -> broadcast::Receiver<CatalogEvent> {
        self.catalog_tx.subscribe()
    }

    /// Announces a catalog change made outside the coordinator, such as a
    /// saved admin form.
    pub fn announce(&self, event: CatalogEvent) {
        // No listeners is fine
        let _ = self.catalog_tx.send(event);
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Header navigation. Non-admins asking for Admin get the login modal.
    pub fn request_view_change(&mut self, target: NavTarget) {
        if self.auth.is_loading() {
            debug!(?target, "Session loading, ignoring view change");
            return;
        }

        if target == NavTarget::Admin && !self.auth.role().is_admin() {
            debug!("Admin view requested without admin role");
            self.state.is_login_modal_open = true;
            return;
        }

        self.state.editing_product = None;
        self.state.view = target.into();
    }

    /// Called once a login went through.
    pub fn on_login_success(&mut self) {
        self.state.is_login_modal_open = false;

        if self.auth.is_loading() {
            return;
        }

        if self.auth.role().is_admin() && self.state.view != View::Admin {
            info!("Admin signed in, opening dashboard");
            self.state.view = View::Admin;
        }
    }

    /// The dedicated login page.
    pub fn request_login_page(&mut self) {
        self.state.editing_product = None;
        self.state.view = View::Login;
    }

    // =========================================================================
    // Admin Workflow
    // =========================================================================

    /// Opens the admin form on `product`, from wherever the user is.
    pub fn request_edit_product(&mut self, product: Product) {
        debug!(id = product.id, "Editing product");
        self.state.editing_product = Some(product);
        self.state.view = View::Admin;
    }

    /// Opens the admin form empty. Gated like `request_view_change(Admin)`.
    pub fn request_create_product(&mut self) {
        self.request_view_change(NavTarget::Admin);
    }

    pub fn on_admin_form_submit(&mut self) {
        self.leave_admin_form();
    }

    pub fn on_admin_form_cancel(&mut self) {
        self.leave_admin_form();
    }

    fn leave_admin_form(&mut self) {
        self.state.editing_product = None;
        self.state.view = View::Products;
    }

    pub fn request_delete(&mut self, product_id: u32) {
        self.state.product_to_delete = Some(product_id);
        self.state.is_delete_modal_open = true;
    }

    pub fn cancel_delete(&mut self) {
        self.state.is_delete_modal_open = false;
        self.state.product_to_delete = None;
    }

    /// Closes the confirmation modal and, given a target and a token, starts
    /// the deletion in the background.
    ///
    /// The modal state is reset before the API call starts. When the call
    /// resolves, a [`CatalogEvent`] is broadcast. Returns the task handle so
    /// callers may await completion; dropping it detaches the task.
    ///
    /// Must be called inside a tokio runtime.
    pub fn confirm_delete(&mut self) -> Option<JoinHandle<()>> {
        let target = self.state.product_to_delete.take();
        self.state.is_delete_modal_open = false;

        let (id, token) = match (target, self.auth.token()) {
            (Some(id), Some(token)) => (id, token),
            (target, token) => {
                debug!(?target, has_token = token.is_some(), "Nothing to delete");
                return None;
            }
        };

        info!(id, "Deleting product");
        let api = Arc::clone(&self.api);
        let events = self.catalog_tx.clone();

        Some(tokio::spawn(async move {
            let event = match api.delete_product(id, &token).await {
                Ok(()) => CatalogEvent::Deleted { id },
                Err(e) => {
                    warn!(id, error = %e, "Product deletion failed");
                    CatalogEvent::DeleteFailed {
                        id,
                        reason: e.to_string(),
                    }
                }
            };
            let _ = events.send(event);
        }))
    }

    // =========================================================================
    // Drawer & Modals
    // =========================================================================

    pub fn open_cart(&mut self) {
        self.state.is_cart_open = true;
    }

    pub fn close_cart(&mut self) {
        self.state.is_cart_open = false;
    }

    pub fn open_login_modal(&mut self) {
        self.state.is_login_modal_open = true;
    }

    pub fn close_login_modal(&mut self) {
        self.state.is_login_modal_open = false;
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// What to show right now.
    pub fn render(&self) -> Frame {
        let session = self.auth.snapshot();
        if session.is_loading {
            return Frame::loading();
        }

        let screen = if !session.is_authenticated && self.state.view != View::Products {
            Screen::Login
        } else {
            match self.state.view {
                View::Admin => Screen::Admin {
                    editing: self.state.editing_product.clone(),
                },
                // A signed-in user has no use for the login page
                View::Products | View::Login => Screen::Products,
            }
        };

        Frame {
            screen,
            cart_drawer: self.state.is_cart_open.then(|| self.cart.snapshot()),
            login_modal: self.state.is_login_modal_open,
            delete_modal: self
                .state
                .product_to_delete
                .filter(|_| self.state.is_delete_modal_open),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use shopsphere_api::{ApiError, ApiResult, AuthGrant};
    use shopsphere_core::{CartItem, Credentials, Money, NewProduct, Order, Role, User};
    use std::sync::Mutex;

    /// Fake backend that records deletion calls.
    #[derive(Default)]
    struct RecordingApi {
        deletes: Mutex<Vec<(u32, String)>>,
        fail_deletes: bool,
    }

    impl RecordingApi {
        fn deletes(&self) -> Vec<(u32, String)> {
            self.deletes.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl StorefrontApi for RecordingApi {
        async fn get_products(&self) -> ApiResult<Vec<Product>> {
            Ok(vec![product(42)])
        }

        async fn get_product(&self, id: u32) -> ApiResult<Product> {
            Ok(product(id))
        }

        async fn create_product(&self, draft: NewProduct, _token: &str) -> ApiResult<Product> {
            Ok(draft.with_id(100))
        }

        async fn update_product(&self, product: Product, _token: &str) -> ApiResult<Product> {
            Ok(product)
        }

        async fn delete_product(&self, id: u32, token: &str) -> ApiResult<()> {
            self.deletes.lock().unwrap().push((id, token.to_string()));
            if self.fail_deletes {
                Err(ApiError::not_found("Product", id))
            } else {
                Ok(())
            }
        }

        async fn login(&self, credentials: &Credentials) -> ApiResult<AuthGrant> {
            let role = if credentials.username == "admin" {
                Role::Admin
            } else {
                Role::Customer
            };
            Ok(AuthGrant {
                user: User {
                    id: 1,
                    username: credentials.username.clone(),
                    role,
                },
                token: format!("token-{}", credentials.username),
            })
        }

        async fn verify_token(&self, _token: &str) -> ApiResult<User> {
            Err(ApiError::Unauthorized("fake".to_string()))
        }

        async fn create_order(&self, items: Vec<CartItem>, _token: &str) -> ApiResult<Order> {
            Ok(Order::place(1, items))
        }
    }

    fn product(id: u32) -> Product {
        Product {
            id,
            name: format!("Product {}", id),
            category: "Home".to_string(),
            price: Money::from_cents(1000),
            image_url: format!("https://picsum.photos/seed/{}/400/300", id),
            stock: 5,
        }
    }

    struct Harness {
        api: Arc<RecordingApi>,
        auth: AuthSession,
        view: ViewCoordinator,
    }

    impl Harness {
        fn with_api(api: RecordingApi) -> Self {
            let api = Arc::new(api);
            let auth = AuthSession::new();
            let view = ViewCoordinator::new(auth.clone(), CartSession::new(), api.clone());
            Harness { api, auth, view }
        }

        /// Session check done, nobody signed in.
        async fn anonymous() -> Self {
            let h = Harness::with_api(RecordingApi::default());
            h.auth.initialize(h.api.as_ref(), None).await;
            h
        }

        async fn signed_in(username: &str) -> Self {
            let h = Harness::anonymous().await;
            h.login(username).await;
            h
        }

        async fn login(&self, username: &str) {
            self.auth
                .login(self.api.as_ref(), &Credentials::new(username, "pw"))
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_non_admin_cannot_open_admin_view() {
        for h in [Harness::anonymous().await, Harness::signed_in("customer").await] {
            let mut view = h.view;
            view.request_view_change(NavTarget::Admin);

            assert_eq!(view.state().view, View::Products);
            assert!(view.state().is_login_modal_open);
        }
    }

    #[tokio::test]
    async fn test_admin_view_change_clears_edit_target() {
        let mut h = Harness::signed_in("admin").await;
        h.view.request_edit_product(product(7));
        assert_eq!(h.view.state().view, View::Admin);

        h.view.request_view_change(NavTarget::Admin);
        assert_eq!(h.view.state().view, View::Admin);
        assert!(h.view.state().editing_product.is_none());
        assert!(!h.view.state().is_login_modal_open);
    }

    #[tokio::test]
    async fn test_products_view_clears_edit_target() {
        let mut h = Harness::signed_in("admin").await;
        h.view.request_edit_product(product(7));

        h.view.request_view_change(NavTarget::Products);
        assert_eq!(h.view.state().view, View::Products);
        assert!(h.view.state().editing_product.is_none());
    }

    #[tokio::test]
    async fn test_login_success_as_admin_opens_dashboard() {
        let mut h = Harness::anonymous().await;
        h.view.request_view_change(NavTarget::Admin);
        assert!(h.view.state().is_login_modal_open);
        assert_eq!(h.view.state().view, View::Products);

        h.login("admin").await;
        h.view.on_login_success();

        assert_eq!(h.view.state().view, View::Admin);
        assert!(!h.view.state().is_login_modal_open);
    }

    #[tokio::test]
    async fn test_login_success_as_customer_keeps_view() {
        let mut h = Harness::anonymous().await;
        h.view.open_login_modal();

        h.login("customer").await;
        h.view.on_login_success();

        assert_eq!(h.view.state().view, View::Products);
        assert!(!h.view.state().is_login_modal_open);
    }

    #[tokio::test]
    async fn test_login_success_on_admin_keeps_edit_target() {
        let mut h = Harness::signed_in("admin").await;
        h.view.request_edit_product(product(3));

        h.view.on_login_success();
        assert_eq!(h.view.state().editing_product, Some(product(3)));
    }

    #[tokio::test]
    async fn test_edit_then_cancel_returns_to_products() {
        let mut h = Harness::signed_in("admin").await;
        h.view.request_edit_product(product(9));
        assert_eq!(h.view.state().editing_product, Some(product(9)));

        h.view.on_admin_form_cancel();
        assert_eq!(h.view.state().view, View::Products);
        assert!(h.view.state().editing_product.is_none());
    }

    #[tokio::test]
    async fn test_login_page_drops_edit_target() {
        let mut h = Harness::signed_in("admin").await;
        h.view.request_edit_product(product(9));
        assert_eq!(h.view.state().view, View::Admin);

        h.view.request_login_page();
        assert_eq!(h.view.state().view, View::Login);
        assert!(h.view.state().editing_product.is_none());
        assert_eq!(h.view.render().screen, Screen::Products);
    }

    #[tokio::test]
    async fn test_submit_returns_to_products() {
        let mut h = Harness::signed_in("admin").await;
        h.view.request_create_product();
        assert_eq!(h.view.state().view, View::Admin);

        h.view.on_admin_form_submit();
        assert_eq!(h.view.state().view, View::Products);
    }

    #[tokio::test]
    async fn test_create_product_is_admin_gated() {
        let mut h = Harness::signed_in("customer").await;
        h.view.request_create_product();
        assert_eq!(h.view.state().view, View::Products);
        assert!(h.view.state().is_login_modal_open);
    }

    #[tokio::test]
    async fn test_delete_confirm_issues_single_call() {
        let mut h = Harness::signed_in("admin").await;
        let mut events = h.view.subscribe_catalog();

        h.view.request_delete(42);
        assert!(h.view.state().is_delete_modal_open);
        assert_eq!(h.view.state().product_to_delete, Some(42));
        assert_eq!(h.view.render().delete_modal, Some(42));

        let task = h.view.confirm_delete().expect("deletion should start");
        assert!(!h.view.state().is_delete_modal_open);
        assert!(h.view.state().product_to_delete.is_none());

        task.await.unwrap();
        assert_eq!(h.api.deletes(), vec![(42, "token-admin".to_string())]);
        assert_eq!(events.recv().await.unwrap(), CatalogEvent::Deleted { id: 42 });
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_failed_delete_is_announced() {
        let mut h = Harness::with_api(RecordingApi {
            fail_deletes: true,
            ..RecordingApi::default()
        });
        h.auth.initialize(h.api.as_ref(), None).await;
        h.login("admin").await;
        let mut events = h.view.subscribe_catalog();

        h.view.request_delete(5);
        h.view.confirm_delete().unwrap().await.unwrap();

        match events.recv().await.unwrap() {
            CatalogEvent::DeleteFailed { id, reason } => {
                assert_eq!(id, 5);
                assert!(reason.contains("not found"));
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_confirm_without_token_is_noop() {
        let mut h = Harness::anonymous().await;
        h.view.request_delete(42);

        assert!(h.view.confirm_delete().is_none());
        assert!(!h.view.state().is_delete_modal_open);
        assert!(h.view.state().product_to_delete.is_none());
        assert!(h.api.deletes().is_empty());
    }

    #[tokio::test]
    async fn test_confirm_without_target_is_noop() {
        let mut h = Harness::signed_in("admin").await;

        assert!(h.view.confirm_delete().is_none());
        assert!(!h.view.state().is_delete_modal_open);
        assert!(h.api.deletes().is_empty());
    }

    #[tokio::test]
    async fn test_cancel_delete_clears_target() {
        let mut h = Harness::signed_in("admin").await;
        h.view.request_delete(42);
        h.view.cancel_delete();

        assert!(!h.view.state().is_delete_modal_open);
        assert!(h.view.state().product_to_delete.is_none());
        assert!(h.view.render().delete_modal.is_none());
    }

    #[tokio::test]
    async fn test_loading_renders_placeholder_and_blocks_navigation() {
        let mut h = Harness::with_api(RecordingApi::default());
        h.view.open_cart();
        assert_eq!(h.view.render(), Frame::loading());

        h.view.request_view_change(NavTarget::Admin);
        assert!(!h.view.state().is_login_modal_open);
        assert_eq!(h.view.state().view, View::Products);
    }

    #[tokio::test]
    async fn test_signed_out_non_products_view_renders_login() {
        let mut h = Harness::anonymous().await;
        h.view.request_login_page();
        assert_eq!(h.view.render().screen, Screen::Login);

        h.view.request_view_change(NavTarget::Products);
        assert_eq!(h.view.render().screen, Screen::Products);
    }

    #[tokio::test]
    async fn test_logout_on_admin_renders_login() {
        let mut h = Harness::signed_in("admin").await;
        h.view.request_view_change(NavTarget::Admin);
        assert_eq!(h.view.render().screen, Screen::Admin { editing: None });

        h.auth.logout();
        assert_eq!(h.view.render().screen, Screen::Login);
    }

    #[tokio::test]
    async fn test_signed_in_login_page_shows_products() {
        let mut h = Harness::signed_in("customer").await;
        h.view.request_login_page();
        assert_eq!(h.view.render().screen, Screen::Products);
    }

    #[tokio::test]
    async fn test_cart_drawer_in_frame() {
        let mut h = Harness::anonymous().await;
        assert!(h.view.render().cart_drawer.is_none());

        h.view.open_cart();
        let drawer = h.view.render().cart_drawer.unwrap();
        assert!(drawer.is_empty());

        h.view.close_cart();
        assert!(h.view.render().cart_drawer.is_none());
    }
}
