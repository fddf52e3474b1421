//! Order endpoint wrappers.
//!
//! All order endpoints require the bearer token; the order service resolves
//! the purchasing user from it.

use tracing::instrument;

use shopfront_core::order::{Order, OrderRequest};
use shopfront_core::types::OrderId;

use super::{ApiClient, ApiError};

impl ApiClient {
    /// Submit an order. Prices are recomputed server-side from the
    /// submitted `{ productId, quantity }` pairs.
    #[instrument(skip(self, request), fields(lines = request.items.len()))]
    pub async fn create_order(&self, request: &OrderRequest) -> Result<Order, ApiError> {
        self.post_json("/orders", request, true).await
    }

    /// Order history for the authenticated user.
    #[instrument(skip(self))]
    pub async fn my_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.get_json("/orders/my-orders", &[]).await
    }

    /// Fetch a single order by id.
    #[instrument(skip(self))]
    pub async fn order(&self, id: OrderId) -> Result<Order, ApiError> {
        self.get_json(&format!("/orders/{id}"), &[]).await
    }
}
