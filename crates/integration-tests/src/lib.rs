//! Shared helpers for Shopfront integration tests.
//!
//! Tests run the real client stack (API client, session manager, cart
//! manager, storage) against an `httptest` server standing in for the
//! remote REST API.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use serde_json::json;

use shopfront_client::api::ApiClient;
use shopfront_client::cart::CartManager;
use shopfront_client::config::ClientConfig;
use shopfront_client::session::SessionManager;
use shopfront_client::storage::{MemoryStorage, Storage};

/// The full client stack wired to one storage instance.
pub struct TestApp {
    pub api: ApiClient,
    pub session: SessionManager,
    pub cart: CartManager,
    pub storage: Arc<dyn Storage>,
}

/// Build a client stack over in-memory storage, pointed at `base_url`.
///
/// # Panics
///
/// Panics when the stub server URL is not a valid base URL; that is a bug
/// in the test itself.
#[must_use]
pub fn test_app(base_url: &str) -> TestApp {
    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
    test_app_with_storage(base_url, storage)
}

/// Build a client stack over the given storage (used for restart tests).
///
/// # Panics
///
/// Panics when the stub server URL is not a valid base URL.
#[must_use]
pub fn test_app_with_storage(base_url: &str, storage: Arc<dyn Storage>) -> TestApp {
    let config =
        ClientConfig::new(base_url, "unused-data-dir").expect("stub server URL must be valid");
    let api = ApiClient::new(&config, Arc::clone(&storage)).expect("client must build");

    let mut session = SessionManager::new(api.clone(), Arc::clone(&storage));
    session.bootstrap();

    let mut cart = CartManager::new(Arc::clone(&storage));
    cart.restore();

    TestApp {
        api,
        session,
        cart,
        storage,
    }
}

/// JWT response body as the identity service sends it.
#[must_use]
pub fn jwt_response_json(token: &str) -> serde_json::Value {
    json!({
        "token": token,
        "type": "Bearer",
        "id": 1,
        "username": "jdoe",
        "email": "jdoe@example.com",
        "firstName": "Jane",
        "lastName": "Doe",
        "role": "ROLE_USER"
    })
}

/// Catalog product body with the envelope fields the service includes.
#[must_use]
pub fn product_json(id: i64, name: &str, price: f64, stock: u32) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "description": format!("{name} description"),
        "price": price,
        "stockQuantity": stock,
        "imageUrl": format!("https://cdn.example.com/{id}.jpg"),
        "category": {
            "id": 1,
            "name": "General",
            "description": "Everything",
            "createdAt": "2024-01-01T10:00:00",
            "updatedAt": "2024-01-01T10:00:00"
        },
        "createdAt": "2024-01-02T09:30:00",
        "updatedAt": "2024-01-02T09:30:00",
        "orderItems": []
    })
}

/// Order record as the order service returns it after acceptance.
#[must_use]
pub fn order_json(id: i64, total: f64) -> serde_json::Value {
    json!({
        "id": id,
        "user": null,
        "orderItems": [],
        "totalAmount": total,
        "status": "PENDING",
        "createdAt": "2024-03-01T12:00:00",
        "updatedAt": "2024-03-01T12:00:00"
    })
}
