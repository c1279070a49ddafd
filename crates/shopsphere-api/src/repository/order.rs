//! # Order Repository
//!
//! Keeps placed orders in memory for the lifetime of the process.

use std::sync::Arc;

use shopsphere_core::Order;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct OrderRepository {
    orders: Arc<RwLock<Vec<Order>>>,
}

impl OrderRepository {
    pub fn new() -> Self {
        OrderRepository::default()
    }

    pub async fn insert(&self, order: Order) {
        debug!(order_id = %order.id, user_id = order.user_id, total = %order.total, "Recording order");
        self.orders.write().await.push(order);
    }

    /// Orders placed by `user_id`, oldest first.
    pub async fn list_for_user(&self, user_id: u32) -> Vec<Order> {
        self.orders
            .read()
            .await
            .iter()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect()
    }
}
