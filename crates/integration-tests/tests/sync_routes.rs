//! Integration tests for onboarding and connection administration.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use rust_decimal::Decimal;
use serde_json::{Value, json};

use catalog_sync_integration_tests::{
    TENANT, TestContext, connection_request, inventory_product, storefront_product,
};

fn cement_context() -> TestContext {
    TestContext::new(
        vec![inventory_product(
            22,
            "59",
            "cement 40kg",
            Decimal::new(295, 1),
            Decimal::from(600),
        )],
        vec![storefront_product(
            55,
            "59",
            "cement 40kg",
            Decimal::from(27),
            Decimal::ZERO,
        )],
    )
}

async fn only_connection_id(ctx: &TestContext) -> i64 {
    let (status, body) = ctx.send("GET", "/sync", None).await;
    assert_eq!(status, StatusCode::OK);
    let list: Vec<Value> = serde_json::from_str(&body).unwrap();
    assert_eq!(list.len(), 1);
    list.first().unwrap()["id"].as_i64().unwrap()
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_endpoints() {
    let ctx = TestContext::new(vec![], vec![]);

    let (status, body) = ctx.send("GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");

    let (status, _) = ctx.send("GET", "/health/ready", None).await;
    assert_eq!(status, StatusCode::OK);
}

// =============================================================================
// Onboarding
// =============================================================================

#[tokio::test]
async fn test_onboarding_returns_plain_text_report() {
    let ctx = cement_context();

    let report = ctx.onboard().await;

    assert!(report.contains("Price of product 55 (barcode 59) changed from 27 to 29.5"));
    assert!(report.contains("Stock of product 55 (barcode 59) changed from 0 to 600"));
    assert!(report.contains("Deactivated products 0/1"));
    assert!(report.contains("Price changes 1/1"));
    assert!(report.contains("Stock changes 1/1"));
    assert!(!report.contains("Failed products"));
}

#[tokio::test]
async fn test_onboarding_missing_field_is_named() {
    let ctx = TestContext::new(vec![], vec![]);
    let mut request = connection_request(TENANT);
    request["websiteUrl"] = json!("");

    let (status, body) = ctx.send("POST", "/sync", Some(request)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body, json!({"websiteUrl": "required"}));
}

#[tokio::test]
async fn test_onboarding_missing_company_is_named() {
    let ctx = TestContext::new(vec![], vec![]);
    let mut request = connection_request(TENANT);
    request.as_object_mut().unwrap().remove("companyId");

    let (status, body) = ctx.send("POST", "/sync", Some(request)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body, json!({"companyId": "required"}));
}

#[tokio::test]
async fn test_second_onboarding_conflicts() {
    let ctx = cement_context();
    ctx.onboard().await;

    let (status, _) = ctx
        .send("POST", "/sync", Some(connection_request(TENANT)))
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    only_connection_id(&ctx).await;
}

#[tokio::test]
async fn test_listing_failure_is_bad_gateway_and_leaves_no_connection() {
    let ctx = cement_context();
    ctx.storefront.fail_listing().await;

    let (status, _) = ctx
        .send("POST", "/sync", Some(connection_request(TENANT)))
        .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let (_, body) = ctx.send("GET", "/sync", None).await;
    assert_eq!(body, "[]");
}

// =============================================================================
// Administration
// =============================================================================

#[tokio::test]
async fn test_listing_connections_hides_credentials() {
    let ctx = cement_context();
    ctx.onboard().await;

    let (status, body) = ctx.send("GET", "/sync", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains("ck_live"));
    assert!(!body.contains("cs_live"));
    let list: Vec<Value> = serde_json::from_str(&body).unwrap();
    let view = list.first().unwrap();
    assert_eq!(view["companyId"], json!(TENANT));
    assert_eq!(view["inventoryServiceUrl"], json!("http://inventory:8080"));
    assert_eq!(view["hasCredentials"], json!(true));
}

#[tokio::test]
async fn test_sync_lines_are_listed_per_connection() {
    let ctx = cement_context();
    ctx.onboard().await;
    let id = only_connection_id(&ctx).await;

    let (status, body) = ctx.send("GET", &format!("/sync/{id}/lines"), None).await;

    assert_eq!(status, StatusCode::OK);
    let lines: Vec<Value> = serde_json::from_str(&body).unwrap();
    assert_eq!(lines.len(), 1);
    let line = lines.first().unwrap();
    assert_eq!(line["productId"], json!(22));
    assert_eq!(line["storefrontId"], json!(55));
}

#[tokio::test]
async fn test_update_connection_urls() {
    let ctx = cement_context();
    ctx.onboard().await;
    let id = only_connection_id(&ctx).await;

    let (status, body) = ctx
        .send(
            "PUT",
            &format!("/sync/{id}"),
            Some(json!({"websiteUrl": "https://new-shop.example/"})),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let view: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(view["websiteUrl"], json!("https://new-shop.example"));
    assert_eq!(view["inventoryServiceUrl"], json!("http://inventory:8080"));
}

#[tokio::test]
async fn test_update_rejects_bad_url() {
    let ctx = cement_context();
    ctx.onboard().await;
    let id = only_connection_id(&ctx).await;

    let (status, body) = ctx
        .send(
            "PUT",
            &format!("/sync/{id}"),
            Some(json!({"inventoryServiceUrl": "not a url"})),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("inventoryServiceUrl"));
}

#[tokio::test]
async fn test_unknown_connection_is_not_found() {
    let ctx = TestContext::new(vec![], vec![]);

    let (status, _) = ctx
        .send("PUT", "/sync/42", Some(json!({"websiteUrl": "https://x.example"})))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = ctx.send("DELETE", "/sync/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = ctx.send("GET", "/sync/42/lines", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_connection_cascades_lines() {
    let ctx = cement_context();
    ctx.onboard().await;
    let id = only_connection_id(&ctx).await;
    assert_eq!(ctx.store.line_count().await, 1);

    let (status, _) = ctx.send("DELETE", &format!("/sync/{id}"), None).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(ctx.store.line_count().await, 0);
    let (status, _) = ctx.send("GET", &format!("/sync/{id}/lines"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The tenant can onboard again afterwards
    ctx.onboard().await;
}
