//! Catalog service wire types.
//!
//! Read-only product and category records as served by the catalog
//! endpoints. Prices are decimal; timestamps arrive without a timezone
//! offset (the service serializes naive local datetimes).

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{CategoryId, ProductId};

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: String,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Unit price in the store currency.
    pub price: Decimal,
    /// Units currently available.
    pub stock_quantity: u32,
    pub image_url: String,
    pub category: Category,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl Product {
    /// Whether the product has any stock left.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock_quantity > 0
    }
}

/// One page of catalog results.
///
/// The service wraps paginated responses in a Spring-style page envelope;
/// only the fields the client consumes are modeled, the rest are ignored
/// during deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    /// Products on this page.
    pub content: Vec<Product>,
    /// Total pages available for the query.
    pub total_pages: u32,
    /// Total matching products across all pages.
    pub total_elements: u64,
    /// Zero-based index of this page.
    pub number: u32,
    /// Requested page size.
    pub size: u32,
    pub first: bool,
    pub last: bool,
}

impl ProductPage {
    /// Whether this page holds no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_page_json() -> &'static str {
        r#"{
            "content": [{
                "id": 1,
                "name": "Walnut Desk",
                "description": "Solid walnut writing desk",
                "price": 249.99,
                "stockQuantity": 4,
                "imageUrl": "https://cdn.example.com/desk.jpg",
                "category": {
                    "id": 2,
                    "name": "Furniture",
                    "description": "Home furniture",
                    "createdAt": "2024-01-01T10:00:00",
                    "updatedAt": "2024-01-01T10:00:00"
                },
                "createdAt": "2024-01-02T09:30:00",
                "updatedAt": "2024-01-02T09:30:00",
                "orderItems": []
            }],
            "pageable": {"pageNumber": 0, "pageSize": 12},
            "totalPages": 1,
            "totalElements": 1,
            "number": 0,
            "size": 12,
            "first": true,
            "last": true,
            "numberOfElements": 1,
            "empty": false
        }"#
    }

    #[test]
    fn test_page_deserializes_ignoring_envelope_noise() {
        let page: ProductPage = serde_json::from_str(sample_page_json()).unwrap();
        assert_eq!(page.total_elements, 1);
        assert!(page.first && page.last);

        let product = page.content.first().unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.price, Decimal::new(24_999, 2));
        assert_eq!(product.category.name, "Furniture");
        assert!(product.in_stock());
    }

    #[test]
    fn test_naive_timestamps_parse() {
        let page: ProductPage = serde_json::from_str(sample_page_json()).unwrap();
        let product = page.content.first().unwrap();
        let created = product.created_at.unwrap();
        assert_eq!(created.to_string(), "2024-01-02 09:30:00");
    }
}
