//! # ShopSphere Storefront Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ShopSphere Storefront                            │
//! │                                                                         │
//! │  stdin ──► shell ──► commands ──► ViewCoordinator / sessions            │
//! │                                           │                             │
//! │                                           ▼                             │
//! │                                   MockApiService (in memory)            │
//! │                                           │                             │
//! │  stdout ◄── render ◄── Frame ◄────────────┘                             │
//! │  stderr ◄── tracing                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The UI model is single-threaded, so a current-thread runtime is enough.
//! The setup lives in lib.rs so tests can drive the shell directly.

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    shopsphere_storefront::run().await
}
