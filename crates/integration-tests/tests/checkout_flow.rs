//! Checkout submission against a stubbed order service.

use std::sync::Arc;

use httptest::{
    Expectation, Server, all_of,
    matchers::{contains, eq, json_decoded, lowercase, request},
    responders::{json_encoded, status_code},
};
use rust_decimal::Decimal;
use serde_json::json;

use shopfront_client::cart::ProductSnapshot;
use shopfront_client::checkout::{self, CheckoutError, ShippingForm};
use shopfront_client::storage::{MemoryStorage, Storage, keys};
use shopfront_core::types::ProductId;
use shopfront_integration_tests::{order_json, test_app, test_app_with_storage};

fn snapshot(id: i64, price: &str, name: &str) -> ProductSnapshot {
    ProductSnapshot {
        id: ProductId::new(id),
        name: name.to_owned(),
        price: price.parse().expect("valid decimal"),
        image_url: format!("https://cdn.example.com/{id}.jpg"),
        category_name: "General".to_owned(),
        stock_quantity: 10,
    }
}

fn shipping_form() -> ShippingForm {
    ShippingForm {
        first_name: "Jane".to_owned(),
        last_name: "Doe".to_owned(),
        address: "1 Main St".to_owned(),
        city: "Springfield".to_owned(),
        state: "IL".to_owned(),
        zip_code: "62704".to_owned(),
        phone: "555-0100".to_owned(),
    }
}

/// Storage pre-seeded with a logged-in session.
fn logged_in_storage() -> Arc<dyn Storage> {
    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
    storage.set(keys::TOKEN, "tok-checkout");
    storage.set(
        keys::USER,
        &json!({
            "id": 1,
            "username": "jdoe",
            "email": "jdoe@example.com",
            "firstName": "Jane",
            "lastName": "Doe",
            "role": "ROLE_USER"
        })
        .to_string(),
    );
    storage
}

#[tokio::test]
async fn accepted_order_clears_cart_and_persisted_slot() {
    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            request::method_path("POST", "/orders"),
            request::headers(contains((lowercase("authorization"), "Bearer tok-checkout"))),
            request::body(json_decoded(eq(json!({
                "items": [{"productId": 3, "quantity": 2}],
                "shippingAddress": "Jane Doe, 1 Main St, Springfield, IL 62704"
            })))),
        ])
        .respond_with(json_encoded(order_json(12, 53.19))),
    );

    let mut app = test_app_with_storage(&server.url_str("/"), logged_in_storage());
    app.cart.add(snapshot(3, "20.00", "Walnut Desk"), 2);
    assert_eq!(app.cart.total_items(), 2);

    let order = checkout::place_order(&app.api, &app.session, &mut app.cart, &shipping_form())
        .await
        .expect("order accepted");

    assert_eq!(order.id.as_i64(), 12);
    assert_eq!(app.cart.total_items(), 0);
    assert_eq!(app.storage.get(keys::CART).as_deref(), Some("[]"));
}

#[tokio::test]
async fn rejected_order_preserves_cart_and_surfaces_service_message() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("POST", "/orders")).respond_with(
            status_code(400).body(r#"{"message":"Insufficient stock for product: Walnut Desk"}"#),
        ),
    );

    let mut app = test_app_with_storage(&server.url_str("/"), logged_in_storage());
    app.cart.add(snapshot(3, "20.00", "Walnut Desk"), 2);

    let err = checkout::place_order(&app.api, &app.session, &mut app.cart, &shipping_form())
        .await
        .expect_err("order rejected");

    assert_eq!(
        err.display_message(),
        "Insufficient stock for product: Walnut Desk"
    );
    // Cart untouched, ready for retry.
    assert_eq!(app.cart.total_items(), 2);
    assert_eq!(app.cart.total_price(), "40.00".parse::<Decimal>().expect("decimal"));
}

#[tokio::test]
async fn rejection_without_body_message_falls_back_to_generic_text() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("POST", "/orders"))
            .respond_with(status_code(500)),
    );

    let mut app = test_app_with_storage(&server.url_str("/"), logged_in_storage());
    app.cart.add(snapshot(3, "20.00", "Walnut Desk"), 1);

    let err = checkout::place_order(&app.api, &app.session, &mut app.cart, &shipping_form())
        .await
        .expect_err("order rejected");

    assert_eq!(err.display_message(), "Failed to place order. Please try again.");
    assert_eq!(app.cart.total_items(), 1);
}

#[tokio::test]
async fn empty_cart_short_circuits_without_any_network_call() {
    let server = Server::run();
    // No expectations registered: any request would fail the test.

    let mut app = test_app_with_storage(&server.url_str("/"), logged_in_storage());
    let err = checkout::place_order(&app.api, &app.session, &mut app.cart, &shipping_form())
        .await
        .expect_err("empty cart rejected locally");

    assert!(matches!(err, CheckoutError::EmptyCart));
}

#[tokio::test]
async fn unauthenticated_checkout_is_rejected_locally() {
    let server = Server::run();

    let mut app = test_app(&server.url_str("/"));
    app.cart.add(snapshot(3, "20.00", "Walnut Desk"), 1);

    let err = checkout::place_order(&app.api, &app.session, &mut app.cart, &shipping_form())
        .await
        .expect_err("must be logged in");

    assert!(matches!(err, CheckoutError::NotAuthenticated));
    assert_eq!(app.cart.total_items(), 1);
}
