//! # Repository Module
//!
//! In-memory repositories behind the mock API.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  MockApiService                                                        │
//! │       │                                                                 │
//! │       │  self.products.delete(42)                                       │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── list(&self)                                                       │
//! │  ├── get(&self, id)                                                    │
//! │  ├── insert(&self, new_product)                                        │
//! │  ├── update(&self, product)                                            │
//! │  ├── delete(&self, id)                                                 │
//! │  └── reserve_stock(&self, items)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Arc<RwLock<BTreeMap<u32, Product>>>                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - Product CRUD and stock reservation
//! - [`order::OrderRepository`] - Placed orders

pub mod order;
pub mod product;
