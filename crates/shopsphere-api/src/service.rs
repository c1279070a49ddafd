//! # Storefront API
//!
//! The [`StorefrontApi`] trait is the seam between the storefront and its
//! backend. [`MockApiService`] implements it in memory.
//!
//! ## Simulated Network
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  caller ──► api.delete_product(42, token)                               │
//! │                  │                                                      │
//! │                  ▼                                                      │
//! │             sleep(latency)        ◄── default 500ms, 0 in tests         │
//! │                  │                                                      │
//! │                  ▼                                                      │
//! │             validate token ──► Forbidden / Unauthorized                 │
//! │                  │                                                      │
//! │                  ▼                                                      │
//! │             ProductRepository::delete(42)                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use shopsphere_core::validation::{validate_credentials, validate_new_product, validate_product};
use shopsphere_core::{CartItem, CoreError, Credentials, NewProduct, Order, Product, User};
use tracing::{debug, info, warn};

use crate::auth::{AuthGrant, TokenManager, UserDirectory};
use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::repository::order::OrderRepository;
use crate::repository::product::ProductRepository;
use crate::seed::demo_catalog;

/// Operations the storefront needs from a backend.
#[async_trait]
pub trait StorefrontApi: Send + Sync {
    /// All products, ordered by id.
    async fn get_products(&self) -> ApiResult<Vec<Product>>;

    async fn get_product(&self, id: u32) -> ApiResult<Product>;

    /// Creates a product. Admin only.
    async fn create_product(&self, product: NewProduct, token: &str) -> ApiResult<Product>;

    /// Replaces a product. Admin only.
    async fn update_product(&self, product: Product, token: &str) -> ApiResult<Product>;

    /// Deletes a product. Admin only.
    async fn delete_product(&self, id: u32, token: &str) -> ApiResult<()>;

    async fn login(&self, credentials: &Credentials) -> ApiResult<AuthGrant>;

    /// Resolves a previously issued token back to its user.
    async fn verify_token(&self, token: &str) -> ApiResult<User>;

    /// Places an order for the token's user and takes the items out of stock.
    async fn create_order(&self, items: Vec<CartItem>, token: &str) -> ApiResult<Order>;
}

/// In-memory backend.
pub struct MockApiService {
    config: ApiConfig,
    products: ProductRepository,
    orders: OrderRepository,
    users: UserDirectory,
    tokens: TokenManager,
}

impl MockApiService {
    /// Builds the mock with the demo users and, unless disabled, the demo
    /// catalog.
    pub fn new(config: ApiConfig) -> ApiResult<Self> {
        let products = if config.seed_catalog {
            ProductRepository::with_products(demo_catalog())
        } else {
            ProductRepository::new()
        };

        let tokens = TokenManager::new(config.jwt_secret.clone(), config.token_lifetime_secs);

        info!(
            latency_ms = config.latency.as_millis() as u64,
            seeded = config.seed_catalog,
            "Mock API ready"
        );

        Ok(MockApiService {
            config,
            products,
            orders: OrderRepository::new(),
            users: UserDirectory::with_demo_users()?,
            tokens,
        })
    }

    /// Direct repository access, bypassing latency and auth.
    pub fn products(&self) -> &ProductRepository {
        &self.products
    }

    pub fn orders(&self) -> &OrderRepository {
        &self.orders
    }

    async fn simulate_latency(&self) {
        if !self.config.latency.is_zero() {
            tokio::time::sleep(self.config.latency).await;
        }
    }
}

#[async_trait]
impl StorefrontApi for MockApiService {
    async fn get_products(&self) -> ApiResult<Vec<Product>> {
        self.simulate_latency().await;
        Ok(self.products.list().await)
    }

    async fn get_product(&self, id: u32) -> ApiResult<Product> {
        self.simulate_latency().await;
        self.products.get(id).await
    }

    async fn create_product(&self, product: NewProduct, token: &str) -> ApiResult<Product> {
        self.simulate_latency().await;
        let claims = self.tokens.validate_admin(token, "create product")?;
        validate_new_product(&product)?;

        let created = self.products.insert(product).await;
        info!(id = created.id, by = %claims.username, "Product created");
        Ok(created)
    }

    async fn update_product(&self, product: Product, token: &str) -> ApiResult<Product> {
        self.simulate_latency().await;
        let claims = self.tokens.validate_admin(token, "update product")?;
        validate_product(&product)?;

        let updated = self.products.update(product).await?;
        info!(id = updated.id, by = %claims.username, "Product updated");
        Ok(updated)
    }

    async fn delete_product(&self, id: u32, token: &str) -> ApiResult<()> {
        self.simulate_latency().await;
        let claims = self.tokens.validate_admin(token, "delete product")?;

        self.products.delete(id).await?;
        info!(id, by = %claims.username, "Product deleted");
        Ok(())
    }

    async fn login(&self, credentials: &Credentials) -> ApiResult<AuthGrant> {
        self.simulate_latency().await;
        validate_credentials(credentials)?;

        let user = match self.users.authenticate(credentials) {
            Ok(user) => user,
            Err(e) => {
                warn!(username = %credentials.username, "Login rejected");
                return Err(e);
            }
        };

        let token = self.tokens.issue(&user)?;
        info!(user = %user.username, role = %user.role, "Login succeeded");
        Ok(AuthGrant { user, token })
    }

    async fn verify_token(&self, token: &str) -> ApiResult<User> {
        self.simulate_latency().await;
        let claims = self.tokens.validate(token)?;

        // The directory, not the token, is authoritative for the role.
        let user = self
            .users
            .find(&claims.username)
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized("unknown user".to_string()))?;

        debug!(user = %user.username, "Token verified");
        Ok(user)
    }

    async fn create_order(&self, items: Vec<CartItem>, token: &str) -> ApiResult<Order> {
        self.simulate_latency().await;
        let claims = self.tokens.validate(token)?;

        if items.is_empty() {
            return Err(CoreError::EmptyCart.into());
        }

        self.products.reserve_stock(&items).await?;

        let order = Order::place(claims.sub, items);
        info!(order_id = %order.id, user = %claims.username, total = %order.total, "Order placed");
        self.orders.insert(order.clone()).await;
        Ok(order)
    }
}
