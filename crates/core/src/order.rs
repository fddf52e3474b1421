//! Order service wire types.
//!
//! The client submits `{ items, shippingAddress }` and gets back the full
//! order record. Unit prices are deliberately absent from the request; the
//! order service recomputes them from its own catalog.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::auth::User;
use crate::catalog::Product;
use crate::types::{OrderId, OrderItemId, ProductId};

/// One `{ productId, quantity }` pair in an order-creation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineRequest {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Order-creation request for `POST /orders`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub items: Vec<OrderLineRequest>,
    /// Single formatted shipping address line.
    pub shipping_address: String,
}

/// A line item on a placed order, priced server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: OrderItemId,
    pub product: Product,
    pub quantity: u32,
    /// Unit price the order service charged.
    pub price: Decimal,
}

/// A placed order as returned by the order service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user: Option<User>,
    #[serde(default)]
    pub order_items: Vec<OrderItem>,
    pub total_amount: Decimal,
    /// Lifecycle status string (e.g., `PENDING`, `CONFIRMED`).
    pub status: String,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}
