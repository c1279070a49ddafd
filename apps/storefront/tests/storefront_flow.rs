//! End-to-end shell scenarios against the in-memory mock API.

use std::sync::Arc;

use shopsphere_api::{ApiConfig, MockApiService, StorefrontApi};
use shopsphere_storefront::commands::Outcome;
use shopsphere_storefront::error::ErrorCode;
use shopsphere_storefront::shell::Shell;
use shopsphere_storefront::state::{AppConfig, Screen, View};

async fn shell() -> (Shell, Arc<MockApiService>) {
    let api = Arc::new(MockApiService::new(ApiConfig::instant()).unwrap());
    let shared: Arc<dyn StorefrontApi> = api.clone();
    let mut shell = Shell::new(AppConfig::default(), shared);
    shell.start().await;
    (shell, api)
}

async fn run(shell: &mut Shell, line: &str) -> Outcome {
    shell
        .handle_line(line)
        .await
        .unwrap_or_else(|e| panic!("'{}' failed: {}", line, e))
}

#[tokio::test]
async fn test_admin_request_prompts_login_then_opens_dashboard() {
    let (mut shell, _api) = shell().await;

    run(&mut shell, "admin").await;
    assert!(shell.view().state().is_login_modal_open);
    assert_eq!(shell.view().state().view, View::Products);

    run(&mut shell, "login admin admin123").await;
    assert!(!shell.view().state().is_login_modal_open);
    assert_eq!(shell.view().render().screen, Screen::Admin { editing: None });
    assert!(shell.form().is_some());
}

#[tokio::test]
async fn test_customer_login_stays_on_products() {
    let (mut shell, _api) = shell().await;

    run(&mut shell, "login customer customer123").await;
    assert_eq!(shell.view().state().view, View::Products);

    let err = shell.handle_line("delete 1").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::Forbidden);
    assert!(!shell.view().state().is_delete_modal_open);
}

#[tokio::test]
async fn test_confirmed_delete_refreshes_catalog() {
    let (mut shell, api) = shell().await;
    run(&mut shell, "login admin admin123").await;
    run(&mut shell, "products").await;

    let before = shell.render().await;
    assert!(before.contains("Bluetooth Speaker"));

    run(&mut shell, "delete 2").await;
    assert_eq!(shell.view().render().delete_modal, Some(2));

    let outcome = run(&mut shell, "confirm").await;
    assert_eq!(outcome, Outcome::message("Deleting product 2..."));
    assert!(!shell.view().state().is_delete_modal_open);
    assert!(shell.view().state().product_to_delete.is_none());

    shell.settle().await;
    assert!(api.products().get(2).await.is_err());

    let after = shell.render().await;
    assert!(after.contains("* Product 2 deleted"));
    assert!(!after.contains("Bluetooth Speaker"));
    assert!(shell.catalog().get(2).is_none());
}

#[tokio::test]
async fn test_dismissed_delete_keeps_product() {
    let (mut shell, api) = shell().await;
    run(&mut shell, "login admin admin123").await;

    run(&mut shell, "delete 4").await;
    run(&mut shell, "dismiss").await;
    assert!(shell.view().state().product_to_delete.is_none());

    run(&mut shell, "confirm").await;
    shell.settle().await;
    assert!(api.products().get(4).await.is_ok());
}

#[tokio::test]
async fn test_admin_creates_product() {
    let (mut shell, api) = shell().await;
    run(&mut shell, "login admin admin123").await;
    let count = api.products().count().await;

    run(&mut shell, "new").await;
    run(&mut shell, "set name Travel Mug").await;
    run(&mut shell, "set category Kitchen").await;
    run(&mut shell, "set price 16.50").await;
    run(&mut shell, "set image https://picsum.photos/seed/travel-mug/400/300").await;
    run(&mut shell, "set stock 8").await;
    run(&mut shell, "save").await;

    assert_eq!(api.products().count().await, count + 1);
    assert_eq!(shell.view().state().view, View::Products);
    assert!(shell.form().is_none());

    let frame = shell.render().await;
    assert!(frame.contains("Travel Mug"));
}

#[tokio::test]
async fn test_invalid_form_stays_open() {
    let (mut shell, _api) = shell().await;
    run(&mut shell, "login admin admin123").await;
    run(&mut shell, "products").await;
    run(&mut shell, "edit 5").await;

    run(&mut shell, "set price free").await;
    let err = shell.handle_line("save").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);
    assert_eq!(shell.form().unwrap().price, "free");

    run(&mut shell, "cancel").await;
    assert_eq!(shell.view().state().view, View::Products);
    assert!(shell.view().state().editing_product.is_none());
}

#[tokio::test]
async fn test_shopping_and_checkout() {
    let (mut shell, api) = shell().await;
    shell.render().await;
    let stock = api.products().get(1).await.unwrap().stock;

    run(&mut shell, "add 1").await;
    run(&mut shell, "add 1").await;
    run(&mut shell, "add 3").await;
    run(&mut shell, "qty 3 0").await;
    assert_eq!(shell.cart().snapshot().total_quantity, 2);

    let err = shell.handle_line("checkout").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::Unauthorized);

    run(&mut shell, "login customer customer123").await;
    run(&mut shell, "cart").await;
    assert!(shell.view().render().cart_drawer.is_some());

    run(&mut shell, "checkout").await;
    assert!(shell.cart().snapshot().is_empty());
    assert_eq!(api.products().get(1).await.unwrap().stock, stock - 2);
    assert!(shell.catalog().is_stale());
}

#[tokio::test]
async fn test_sold_out_product_cannot_be_added() {
    let (mut shell, _api) = shell().await;
    shell.render().await;

    let err = shell.handle_line("add 7").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InsufficientStock);
}

#[tokio::test]
async fn test_logout_on_admin_shows_login_screen() {
    let (mut shell, _api) = shell().await;
    run(&mut shell, "login admin admin123").await;
    run(&mut shell, "logout").await;

    assert_eq!(shell.view().render().screen, Screen::Login);
    assert!(shell.render().await.contains("Log in to continue."));
}

#[tokio::test]
async fn test_scripted_session() {
    let (mut shell, _api) = shell().await;
    let script = b"help\nlogin customer customer123\nfilter kitchen\nadd 15\ncart\nfly\nquit\nadd 1\n";
    let mut out = Vec::new();

    shell.run(&script[..], &mut out).await.unwrap();

    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("Navigation:"));
    assert!(out.contains("Welcome, customer (customer)."));
    assert!(out.contains("[Kitchen]"));
    assert!(out.contains("Added Chef's Knife (x1) to your cart."));
    assert!(out.contains("-- Cart --"));
    assert!(out.contains("error: unknown command 'fly'"));
    // Nothing after quit runs
    assert_eq!(shell.cart().snapshot().total_quantity, 1);
}
