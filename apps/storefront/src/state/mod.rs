//! # State Module
//!
//! Storefront state, split into focused holders instead of one big
//! `AppState`. Each command borrows only the holders it needs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────────────────┐  │
//! │  │ AuthSession  │  │ CartSession  │  │ Arc<dyn StorefrontApi>       │  │
//! │  │ watch<Session│  │ watch<Cart>  │  │ (MockApiService)             │  │
//! │  └──────┬───────┘  └──────┬───────┘  └──────────────┬───────────────┘  │
//! │         │ clone           │ clone                   │ clone            │
//! │         └─────────────────┼─────────────────────────┘                  │
//! │                           ▼                                            │
//! │                 ┌────────────────────┐   broadcast    ┌─────────────┐  │
//! │                 │  ViewCoordinator   │ ─CatalogEvent─►│ProductCatalog│ │
//! │                 │  screens, modals   │                └─────────────┘  │
//! │                 └────────────────────┘                                 │
//! │                                                                         │
//! │  AppConfig: read-only after startup.                                   │
//! │  ProductForm: exists only while the admin screen is shown.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod auth;
mod cart;
mod catalog;
mod config;
mod form;
mod view;

pub use auth::{AuthSession, Session};
pub use cart::{CartSession, CartSnapshot};
pub use catalog::{CatalogEvent, ProductCatalog};
pub use config::{AppConfig, ConfigError, ConfigResult, CurrencyFormat, CONFIG_FILE_NAME};
pub use form::{FormField, ProductForm};
pub use view::{Frame, NavTarget, Screen, View, ViewCoordinator, ViewState};
