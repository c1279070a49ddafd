//! # Product Repository
//!
//! In-memory product storage.
//!
//! Products live in a `BTreeMap` keyed by id so listing is always in id
//! order, the order the product grid shows them in.

use std::collections::BTreeMap;
use std::sync::Arc;

use shopsphere_core::{CartItem, CoreError, NewProduct, Product};
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{ApiError, ApiResult};

/// Repository for product operations.
///
/// Cloning shares the underlying store.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new();
/// let created = repo.insert(new_product).await;
/// repo.delete(created.id).await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProductRepository {
    products: Arc<RwLock<BTreeMap<u32, Product>>>,
}

impl ProductRepository {
    pub fn new() -> Self {
        ProductRepository::default()
    }

    /// Creates a repository pre-filled with `products`, keeping their ids.
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let map = products.into_iter().map(|p| (p.id, p)).collect();
        ProductRepository {
            products: Arc::new(RwLock::new(map)),
        }
    }

    /// All products ordered by id.
    pub async fn list(&self) -> Vec<Product> {
        self.products.read().await.values().cloned().collect()
    }

    pub async fn get(&self, id: u32) -> ApiResult<Product> {
        self.products
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Product", id))
    }

    /// Inserts a product, assigning the next id (highest existing id + 1).
    pub async fn insert(&self, new_product: NewProduct) -> Product {
        let mut products = self.products.write().await;
        let id = products.keys().next_back().map_or(1, |max| max + 1);
        let product = new_product.with_id(id);

        debug!(id, name = %product.name, "Inserting product");
        products.insert(id, product.clone());
        product
    }

    /// Replaces an existing product.
    pub async fn update(&self, product: Product) -> ApiResult<Product> {
        let mut products = self.products.write().await;
        let slot = products
            .get_mut(&product.id)
            .ok_or_else(|| ApiError::not_found("Product", product.id))?;

        debug!(id = product.id, "Updating product");
        *slot = product.clone();
        Ok(product)
    }

    pub async fn delete(&self, id: u32) -> ApiResult<Product> {
        let removed = self.products.write().await.remove(&id);
        debug!(id, found = removed.is_some(), "Deleting product");
        removed.ok_or_else(|| ApiError::not_found("Product", id))
    }

    pub async fn count(&self) -> usize {
        self.products.read().await.len()
    }

    /// Decrements stock for every item, or for none of them.
    ///
    /// Checks all items against current stock first under a single write
    /// lock, so a failing item leaves every product untouched.
    pub async fn reserve_stock(&self, items: &[CartItem]) -> ApiResult<()> {
        let mut products = self.products.write().await;

        for item in items {
            let product = products
                .get(&item.product_id())
                .ok_or_else(|| ApiError::not_found("Product", item.product_id()))?;

            if product.stock < item.quantity {
                return Err(CoreError::InsufficientStock {
                    product_id: product.id,
                    available: product.stock,
                    requested: item.quantity,
                }
                .into());
            }
        }

        for item in items {
            if let Some(product) = products.get_mut(&item.product_id()) {
                product.stock -= item.quantity;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopsphere_core::Money;

    fn new_product(name: &str, stock: u32) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            category: "Home".to_string(),
            price: Money::from_cents(1500),
            image_url: "https://picsum.photos/seed/x/400".to_string(),
            stock,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let repo = ProductRepository::new();

        let first = repo.insert(new_product("Lamp", 3)).await;
        let second = repo.insert(new_product("Rug", 1)).await;

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(repo.count().await, 2);
    }

    #[tokio::test]
    async fn test_ids_continue_after_highest() {
        let repo = ProductRepository::with_products(vec![new_product("Vase", 2).with_id(41)]);

        let created = repo.insert(new_product("Clock", 2)).await;
        assert_eq!(created.id, 42);

        let ids: Vec<u32> = repo.list().await.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![41, 42]);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let repo = ProductRepository::new();
        let mut product = repo.insert(new_product("Lamp", 3)).await;

        product.stock = 9;
        repo.update(product.clone()).await.unwrap();
        assert_eq!(repo.get(product.id).await.unwrap().stock, 9);

        repo.delete(product.id).await.unwrap();
        assert!(repo.get(product.id).await.unwrap_err().is_not_found());
        assert!(repo.delete(product.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_update_unknown_product() {
        let repo = ProductRepository::new();
        let ghost = new_product("Ghost", 1).with_id(7);
        assert!(repo.update(ghost).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_reserve_stock_is_all_or_nothing() {
        let repo = ProductRepository::new();
        let lamp = repo.insert(new_product("Lamp", 3)).await;
        let rug = repo.insert(new_product("Rug", 1)).await;

        let items = vec![
            CartItem {
                product: lamp.clone(),
                quantity: 2,
            },
            CartItem {
                product: rug.clone(),
                quantity: 2,
            },
        ];
        let err = repo.reserve_stock(&items).await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Core(CoreError::InsufficientStock { product_id, .. }) if product_id == rug.id
        ));
        assert_eq!(repo.get(lamp.id).await.unwrap().stock, 3);

        repo.reserve_stock(&items[..1]).await.unwrap();
        assert_eq!(repo.get(lamp.id).await.unwrap().stock, 1);
    }
}
