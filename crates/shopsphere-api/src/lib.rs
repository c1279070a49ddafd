//! # shopsphere-api: Mock Backend for ShopSphere
//!
//! An in-memory stand-in for the storefront backend. The storefront talks to
//! it only through the [`StorefrontApi`] trait, so tests can swap in a fake.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ShopSphere Data Flow                             │
//! │                                                                         │
//! │  ViewCoordinator::confirm_delete()                                     │
//! │       │                                                                 │
//! │       ▼  Arc<dyn StorefrontApi>                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  shopsphere-api (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │MockApiService │    │  Repositories │    │    Auth      │  │   │
//! │  │   │ (service.rs)  │    │ (product.rs)  │    │  (auth.rs)   │  │   │
//! │  │   │               │───►│ ProductRepo   │    │ TokenManager │  │   │
//! │  │   │ latency sleep │    │ OrderRepo     │    │ UserDirectory│  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use shopsphere_api::{ApiConfig, MockApiService, StorefrontApi};
//! use shopsphere_core::Credentials;
//!
//! # async fn demo() -> Result<(), shopsphere_api::ApiError> {
//! let api = MockApiService::new(ApiConfig::default())?;
//! let grant = api.login(&Credentials::new("admin", "admin123")).await?;
//! api.delete_product(1, &grant.token).await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod repository;
pub mod seed;
pub mod service;

pub use auth::{AuthGrant, Claims, TokenManager, UserDirectory};
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use repository::order::OrderRepository;
pub use repository::product::ProductRepository;
pub use service::{MockApiService, StorefrontApi};
