//! Cart state manager.
//!
//! An ordered collection of line items keyed by product id. Each line
//! holds a read-only snapshot of the product taken at add time, so cart
//! totals never drift when the catalog changes underneath. Every mutation
//! re-serializes the whole collection to the cart storage slot before
//! returning, so a restart restores an equivalent cart.
//!
//! The manager does not enforce the product's stock ceiling; that check
//! stays with the presentation layer, matching the upstream behavior.

use std::fmt;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use shopfront_core::catalog::Product;
use shopfront_core::order::{OrderLineRequest, OrderRequest};
use shopfront_core::types::ProductId;

use crate::storage::{Storage, keys};

/// Captured copy of catalog data at the time of cart insertion.
///
/// Independent of later catalog changes; the price shown in the cart may
/// go stale relative to the live catalog, and that is deliberate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    pub id: ProductId,
    pub name: String,
    /// Unit price at capture time.
    pub price: Decimal,
    pub image_url: String,
    pub category_name: String,
    /// Available stock at capture time (display hint only).
    pub stock_quantity: u32,
}

impl From<&Product> for ProductSnapshot {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            image_url: product.image_url.clone(),
            category_name: product.category.name.clone(),
            stock_quantity: product.stock_quantity,
        }
    }
}

/// One (product snapshot, quantity) pair in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product: ProductSnapshot,
    pub quantity: u32,
}

impl LineItem {
    /// Captured unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// Callback invoked after every cart mutation with the new line items.
pub type CartSubscriber = Box<dyn Fn(&[LineItem]) + Send + Sync>;

/// The in-memory shopping cart, mirrored to durable storage.
pub struct CartManager {
    storage: Arc<dyn Storage>,
    items: Vec<LineItem>,
    subscribers: Vec<CartSubscriber>,
}

impl fmt::Debug for CartManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartManager")
            .field("items", &self.items)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

impl CartManager {
    /// Create an empty cart.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            items: Vec::new(),
            subscribers: Vec::new(),
        }
    }

    /// Restore the persisted cart, if the slot is present and parses.
    ///
    /// Lines with quantity zero are dropped on the way in; an unparseable
    /// slot leaves the cart empty.
    #[instrument(skip(self))]
    pub fn restore(&mut self) {
        let Some(serialized) = self.storage.get(keys::CART) else {
            return;
        };

        match serde_json::from_str::<Vec<LineItem>>(&serialized) {
            Ok(items) => {
                self.items = items.into_iter().filter(|item| item.quantity > 0).collect();
                tracing::debug!(lines = self.items.len(), "Restored persisted cart");
                self.notify();
            }
            Err(e) => {
                tracing::warn!(error = %e, "Persisted cart did not parse; starting empty");
            }
        }
    }

    /// Add `quantity` units of a product.
    ///
    /// Merges into the existing line for the same product id, otherwise
    /// appends a new line. No stock ceiling is enforced here. A zero
    /// quantity changes nothing (line quantities stay >= 1).
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add(&mut self, product: ProductSnapshot, quantity: u32) {
        if quantity == 0 {
            tracing::debug!("Ignoring add of zero quantity");
            return;
        }

        if let Some(item) = self.items.iter_mut().find(|item| item.product.id == product.id) {
            item.quantity = item.quantity.saturating_add(quantity);
        } else {
            self.items.push(LineItem { product, quantity });
        }

        self.persist();
        self.notify();
    }

    /// Set a line's quantity; non-positive values remove the line.
    ///
    /// Unknown product ids are ignored (the slot is still rewritten, as
    /// with every mutating call).
    #[instrument(skip(self))]
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) {
        if quantity <= 0 {
            self.items.retain(|item| item.product.id != product_id);
        } else {
            let clamped = u32::try_from(quantity).unwrap_or(u32::MAX);
            if let Some(item) = self.items.iter_mut().find(|item| item.product.id == product_id) {
                item.quantity = clamped;
            }
        }

        self.persist();
        self.notify();
    }

    /// Delete the line for a product; no-op if absent.
    #[instrument(skip(self))]
    pub fn remove(&mut self, product_id: ProductId) {
        self.items.retain(|item| item.product.id != product_id);
        self.persist();
        self.notify();
    }

    /// Empty the cart.
    #[instrument(skip(self))]
    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
        self.notify();
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of captured unit price times quantity across all lines.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// The current line items, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// True when the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Compose the order-creation request for the current lines.
    ///
    /// Prices are deliberately absent; the order service recomputes them.
    #[must_use]
    pub fn to_order_request(&self, shipping_address: String) -> OrderRequest {
        OrderRequest {
            items: self
                .items
                .iter()
                .map(|item| OrderLineRequest {
                    product_id: item.product.id,
                    quantity: item.quantity,
                })
                .collect(),
            shipping_address,
        }
    }

    /// Register a subscriber notified after every mutation.
    pub fn subscribe(&mut self, subscriber: CartSubscriber) {
        self.subscribers.push(subscriber);
    }

    /// Rewrite the cart storage slot from the current lines.
    ///
    /// Write failures are logged and swallowed; the in-memory cart remains
    /// the source of truth for this process.
    fn persist(&self) {
        match serde_json::to_string(&self.items) {
            Ok(json) => self.storage.set(keys::CART, &json),
            Err(e) => tracing::warn!(error = %e, "Failed to serialize cart"),
        }
    }

    fn notify(&self) {
        for subscriber in &self.subscribers {
            subscriber(&self.items);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn snapshot(id: i64, price: &str) -> ProductSnapshot {
        ProductSnapshot {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: price.parse().unwrap(),
            image_url: format!("https://cdn.example.com/{id}.jpg"),
            category_name: "General".to_owned(),
            stock_quantity: 10,
        }
    }

    fn cart() -> (CartManager, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let cart = CartManager::new(Arc::clone(&storage) as Arc<dyn Storage>);
        (cart, storage)
    }

    #[test]
    fn test_repeated_adds_merge_into_one_line() {
        let (mut cart, _storage) = cart();
        cart.add(snapshot(1, "10.00"), 1);
        cart.add(snapshot(1, "10.00"), 2);
        cart.add(snapshot(1, "10.00"), 4);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 7);
        assert_eq!(cart.total_items(), 7);
    }

    #[test]
    fn test_add_zero_quantity_is_noop() {
        let (mut cart, _storage) = cart();
        cart.add(snapshot(1, "10.00"), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let (mut cart, _storage) = cart();
        cart.add(snapshot(2, "5.00"), 1);
        cart.add(snapshot(1, "3.00"), 1);
        cart.add(snapshot(2, "5.00"), 1);

        let ids: Vec<i64> = cart.items().iter().map(|i| i.product.id.as_i64()).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_update_quantity_sets_value() {
        let (mut cart, _storage) = cart();
        cart.add(snapshot(1, "10.00"), 3);
        cart.update_quantity(ProductId::new(1), 5);
        assert_eq!(cart.items()[0].quantity, 5);
    }

    #[test]
    fn test_update_quantity_nonpositive_removes_line() {
        let (mut cart, _storage) = cart();
        cart.add(snapshot(1, "10.00"), 3);
        cart.add(snapshot(2, "4.00"), 1);

        cart.update_quantity(ProductId::new(1), 0);
        assert_eq!(cart.total_items(), 1);

        cart.update_quantity(ProductId::new(2), -3);
        assert_eq!(cart.total_items(), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_unknown_id_is_noop() {
        let (mut cart, _storage) = cart();
        cart.add(snapshot(1, "10.00"), 3);
        cart.update_quantity(ProductId::new(99), 5);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 3);
    }

    #[test]
    fn test_remove_and_clear() {
        let (mut cart, _storage) = cart();
        cart.add(snapshot(1, "10.00"), 1);
        cart.add(snapshot(2, "4.00"), 2);

        cart.remove(ProductId::new(1));
        assert_eq!(cart.items().len(), 1);

        // Removing an absent id changes nothing.
        cart.remove(ProductId::new(1));
        assert_eq!(cart.items().len(), 1);

        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_total_price_uses_captured_snapshot() {
        let (mut cart, _storage) = cart();
        cart.add(snapshot(1, "19.99"), 2);
        cart.add(snapshot(2, "0.01"), 3);

        assert_eq!(cart.total_price(), "40.01".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_total_price_invariant_under_reordering() {
        let (mut forward, _s1) = cart();
        forward.add(snapshot(1, "19.99"), 2);
        forward.add(snapshot(2, "5.50"), 1);
        forward.add(snapshot(1, "19.99"), 1);

        let (mut reversed, _s2) = cart();
        reversed.add(snapshot(2, "5.50"), 1);
        reversed.add(snapshot(1, "19.99"), 1);
        reversed.add(snapshot(1, "19.99"), 2);

        assert_eq!(forward.total_price(), reversed.total_price());
        assert_eq!(forward.total_items(), reversed.total_items());
    }

    #[test]
    fn test_every_mutation_rewrites_the_slot() {
        let (mut cart, storage) = cart();
        cart.add(snapshot(1, "10.00"), 2);
        let after_add = storage.get(keys::CART).unwrap();
        assert!(after_add.contains("\"quantity\":2"));

        cart.update_quantity(ProductId::new(1), 6);
        let after_update = storage.get(keys::CART).unwrap();
        assert!(after_update.contains("\"quantity\":6"));

        cart.clear();
        assert_eq!(storage.get(keys::CART).unwrap(), "[]");
    }

    #[test]
    fn test_storage_roundtrip_restores_equivalent_cart() {
        let storage = Arc::new(MemoryStorage::new());
        {
            let mut cart = CartManager::new(Arc::clone(&storage) as Arc<dyn Storage>);
            cart.add(snapshot(1, "19.99"), 2);
            cart.add(snapshot(2, "5.50"), 1);
        }

        let mut restored = CartManager::new(Arc::clone(&storage) as Arc<dyn Storage>);
        restored.restore();

        assert_eq!(restored.total_items(), 3);
        assert_eq!(restored.total_price(), "45.48".parse::<Decimal>().unwrap());
        assert_eq!(restored.items().len(), 2);
    }

    #[test]
    fn test_restore_drops_zero_quantity_lines() {
        let storage = Arc::new(MemoryStorage::new());
        let lines = vec![
            LineItem {
                product: snapshot(1, "10.00"),
                quantity: 0,
            },
            LineItem {
                product: snapshot(2, "4.00"),
                quantity: 2,
            },
        ];
        storage.set(keys::CART, &serde_json::to_string(&lines).unwrap());

        let mut cart = CartManager::new(Arc::clone(&storage) as Arc<dyn Storage>);
        cart.restore();
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.total_items(), 2);
    }

    #[test]
    fn test_restore_corrupt_slot_starts_empty() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(keys::CART, "not json at all");

        let mut cart = CartManager::new(Arc::clone(&storage) as Arc<dyn Storage>);
        cart.restore();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_to_order_request_carries_no_prices() {
        let (mut cart, _storage) = cart();
        cart.add(snapshot(3, "12.00"), 2);

        let request = cart.to_order_request("Jane Doe, 1 Main St, Springfield, IL 62704".to_owned());
        assert_eq!(request.items.len(), 1);
        assert_eq!(request.items[0].product_id, ProductId::new(3));
        assert_eq!(request.items[0].quantity, 2);

        let json = serde_json::to_value(&request).unwrap();
        assert!(json["items"][0].get("price").is_none());
    }

    #[test]
    fn test_subscribers_see_each_mutation() {
        use std::sync::Mutex;
        let seen: Arc<Mutex<Vec<u64>>> = Arc::new(Mutex::new(Vec::new()));
        let seen_by_subscriber = Arc::clone(&seen);

        let (mut cart, _storage) = cart();
        cart.subscribe(Box::new(move |items| {
            let total = items.iter().map(|i| u64::from(i.quantity)).sum();
            if let Ok(mut log) = seen_by_subscriber.lock() {
                log.push(total);
            }
        }));

        cart.add(snapshot(1, "10.00"), 2);
        cart.update_quantity(ProductId::new(1), 1);
        cart.clear();

        assert_eq!(*seen.lock().unwrap(), vec![2, 1, 0]);
    }
}
