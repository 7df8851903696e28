//! Integration tests for inventory events delivered over HTTP.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use rust_decimal::Decimal;
use serde_json::{Value, json};

use catalog_sync_core::{StorefrontProductId, TenantId};
use catalog_sync_integration_tests::{TENANT, TestContext, inventory_product, storefront_product};

async fn onboarded() -> TestContext {
    let ctx = TestContext::new(
        vec![inventory_product(
            22,
            "59",
            "cement 40kg",
            Decimal::from(27),
            Decimal::from(3),
        )],
        vec![storefront_product(
            55,
            "59",
            "cement 40kg",
            Decimal::from(27),
            Decimal::from(3),
        )],
    );
    ctx.onboard().await;
    ctx
}

#[tokio::test]
async fn test_create_product_links_and_notifies() {
    let ctx = onboarded().await;

    let (status, body) = ctx
        .send(
            "POST",
            "/update/createProduct",
            Some(json!({
                "companyId": TENANT,
                "productId": 23,
                "barcode": "60",
                "name": "sand 25kg",
                "uom": "SAC",
                "pricePerUom": 12.5,
            })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let product: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(product["id"], json!(56));
    assert_eq!(product["visible"], json!(false));
    assert_eq!(ctx.store.line_count().await, 2);

    let messages = ctx.notifier.messages().await;
    assert_eq!(messages.len(), 1);
    let (tenant, text) = messages.first().unwrap();
    assert_eq!(*tenant, TenantId::new(TENANT));
    assert!(text.starts_with("Product added to storefront\nID: 56\n"));
    assert!(text.contains("Unit: OTH_ea"));
}

#[tokio::test]
async fn test_create_product_twice_conflicts() {
    let ctx = onboarded().await;
    let command = json!({"companyId": TENANT, "productId": 22, "barcode": "59", "name": "cement"});

    let (status, _) = ctx.send("POST", "/update/createProduct", Some(command)).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(ctx.storefront.calls().await.is_empty());
}

#[tokio::test]
async fn test_unknown_tenant_is_ignored() {
    let ctx = onboarded().await;

    let (status, body) = ctx
        .send(
            "POST",
            "/update/price",
            Some(json!({"companyId": 9, "productId": 22, "pricePerUom": 30})),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
    assert!(ctx.storefront.calls().await.is_empty());
}

#[tokio::test]
async fn test_price_update_reaches_storefront() {
    let ctx = onboarded().await;

    let (status, body) = ctx
        .send(
            "POST",
            "/update/price",
            Some(json!({"companyId": TENANT, "productId": 22, "pricePerUom": "29.5"})),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let product: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(product["id"], json!(55));
    let stored = ctx.storefront.product(StorefrontProductId::new(55)).await.unwrap();
    assert_eq!(stored.price, Some(Decimal::new(295, 1)));
    assert_eq!(stored.stock, Some(Decimal::from(3)));
}

#[tokio::test]
async fn test_stock_update_reaches_storefront() {
    let ctx = onboarded().await;

    let (status, _) = ctx
        .send(
            "POST",
            "/update/stock",
            Some(json!({"companyId": TENANT, "productId": 22, "stock": 600})),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let stored = ctx.storefront.product(StorefrontProductId::new(55)).await.unwrap();
    assert_eq!(stored.stock, Some(Decimal::from(600)));
    assert_eq!(stored.price, Some(Decimal::from(27)));
}

#[tokio::test]
async fn test_storefront_failure_is_accepted() {
    let ctx = onboarded().await;
    ctx.storefront.fail_mutations().await;

    let (status, body) = ctx
        .send(
            "POST",
            "/update/stock",
            Some(json!({"companyId": TENANT, "productId": 22, "stock": 1})),
        )
        .await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_rename_only_notifies() {
    let ctx = onboarded().await;

    let (status, body) = ctx
        .send(
            "POST",
            "/update/name",
            Some(json!({
                "companyId": TENANT,
                "productId": 22,
                "barcode": "59",
                "name": "cement 50kg",
            })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
    assert!(ctx.storefront.calls().await.is_empty());
    let messages = ctx.notifier.messages().await;
    let (_, text) = messages.first().unwrap();
    assert!(text.contains("New name: cement 50kg"));
    assert!(text.contains("Visit https://shop.example to edit"));
}

#[tokio::test]
async fn test_delete_hides_and_unlinks() {
    let ctx = onboarded().await;
    let command = json!({"companyId": TENANT, "productId": 22});

    let (status, body) = ctx
        .send("POST", "/update/deleteProduct", Some(command.clone()))
        .await;

    assert_eq!(status, StatusCode::OK);
    let product: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(product["visible"], json!(false));
    assert_eq!(ctx.store.line_count().await, 0);

    // A repeated delete finds no link and changes nothing
    let (status, body) = ctx.send("POST", "/update/deleteProduct", Some(command)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
    assert_eq!(ctx.storefront.calls().await.len(), 1);
}
