//! # Product Catalog
//!
//! The product list the storefront shows, plus its filter and search box.
//!
//! The catalog is a cache of `get_products()`. It never edits products
//! itself: admin mutations go through the API and announce themselves with a
//! [`CatalogEvent`], which marks the cache stale so the next render
//! re-fetches.
//!
//! ```text
//! confirm_delete() ──spawn──► api.delete_product() ──► CatalogEvent::Deleted
//!                                                            │
//!       render ◄── ensure_fresh() ◄── stale = true ◄── apply()┘
//! ```

use serde::Serialize;
use shopsphere_api::StorefrontApi;
use shopsphere_core::validation::validate_search_query;
use shopsphere_core::Product;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, warn};

use crate::error::AppResult;

/// Announced after an admin mutation has resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CatalogEvent {
    Deleted { id: u32 },
    DeleteFailed { id: u32, reason: String },
    Saved { id: u32 },
}

/// Cached product list with the shopper's filter and search.
#[derive(Debug)]
pub struct ProductCatalog {
    products: Vec<Product>,
    stale: bool,
    category: Option<String>,
    query: String,
    notice: Option<String>,
    events: broadcast::Receiver<CatalogEvent>,
}

impl ProductCatalog {
    /// An empty, stale catalog listening on `events`.
    pub fn new(events: broadcast::Receiver<CatalogEvent>) -> Self {
        ProductCatalog {
            products: Vec::new(),
            stale: true,
            category: None,
            query: String::new(),
            notice: None,
            events,
        }
    }

    /// Fetches the product list.
    ///
    /// On failure the previous list is kept and the catalog stays stale.
    pub async fn refresh(&mut self, api: &dyn StorefrontApi) -> AppResult<()> {
        let products = api.get_products().await?;
        debug!(count = products.len(), "Catalog refreshed");
        self.products = products;
        self.stale = false;
        Ok(())
    }

    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Drains pending events, then refreshes if anything made the list stale.
    pub async fn ensure_fresh(&mut self, api: &dyn StorefrontApi) -> AppResult<()> {
        self.sync_events();
        if self.stale {
            self.refresh(api).await?;
        }
        Ok(())
    }

    /// Applies every event queued on the channel.
    pub fn sync_events(&mut self) {
        loop {
            match self.events.try_recv() {
                Ok(event) => self.apply(event),
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "Catalog events lagged, forcing refresh");
                    self.invalidate();
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
    }

    pub fn apply(&mut self, event: CatalogEvent) {
        debug!(?event, "Catalog event");
        match event {
            CatalogEvent::Deleted { id } => {
                self.notice = Some(format!("Product {} deleted", id));
                self.invalidate();
            }
            CatalogEvent::Saved { id } => {
                self.notice = Some(format!("Product {} saved", id));
                self.invalidate();
            }
            CatalogEvent::DeleteFailed { id, reason } => {
                self.notice = Some(format!("Could not delete product {}: {}", id, reason));
                // The product may or may not be gone; re-read to find out.
                self.invalidate();
            }
        }
    }

    /// Takes the latest event message, if any.
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    /// Restricts the list to one category. `None` shows all.
    pub fn set_category(&mut self, category: Option<String>) {
        self.category = category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn set_query(&mut self, query: &str) -> AppResult<()> {
        self.query = validate_search_query(query)?;
        Ok(())
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// All cached products, unfiltered.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: u32) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Products passing the category filter and the search query.
    pub fn visible(&self) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| match &self.category {
                Some(category) => p.category.eq_ignore_ascii_case(category),
                None => true,
            })
            .filter(|p| p.matches(&self.query))
            .collect()
    }

    /// Distinct categories, sorted.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = self.products.iter().map(|p| p.category.as_str()).collect();
        categories.sort_unstable();
        categories.dedup();
        categories
    }
}
