//! Cache types for catalog API responses.

use shopfront_core::catalog::{Category, Product};
use shopfront_core::types::ProductId;

/// Cache key for catalog reads.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Product(ProductId),
    Categories,
    LatestProducts,
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Box<Product>),
    Categories(Vec<Category>),
    Products(Vec<Product>),
}
