//! Catalog endpoint wrappers.
//!
//! Read-only product and category access: listing, lookup, search,
//! filtering, and pagination. Single-product, category-list, and latest
//! lookups go through the in-process cache; paginated queries always hit
//! the service.

use rust_decimal::Decimal;
use tracing::instrument;

use shopfront_core::catalog::{Category, Product, ProductPage};
use shopfront_core::types::{CategoryId, ProductId};

use super::cache::{CacheKey, CacheValue};
use super::{ApiClient, ApiError};

/// Sort direction for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    const fn as_query(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

/// Product listing parameters. Defaults match the service's own.
#[derive(Debug, Clone)]
pub struct ProductQuery {
    pub page: u32,
    pub size: u32,
    pub sort_by: String,
    pub sort_dir: SortDirection,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: 12,
            sort_by: "id".to_owned(),
            sort_dir: SortDirection::default(),
        }
    }
}

impl ApiClient {
    /// List products, paginated and sorted.
    #[instrument(skip(self))]
    pub async fn products(&self, query: &ProductQuery) -> Result<ProductPage, ApiError> {
        self.get_json(
            "/products",
            &[
                ("page", query.page.to_string()),
                ("size", query.size.to_string()),
                ("sortBy", query.sort_by.clone()),
                ("sortDir", query.sort_dir.as_query().to_owned()),
            ],
        )
        .await
    }

    /// Fetch a single product by id (cached).
    #[instrument(skip(self))]
    pub async fn product(&self, id: ProductId) -> Result<Product, ApiError> {
        if let Some(CacheValue::Product(product)) =
            self.inner.cache.get(&CacheKey::Product(id)).await
        {
            return Ok(*product);
        }

        let product: Product = self.get_json(&format!("/products/{id}"), &[]).await?;
        self.inner
            .cache
            .insert(
                CacheKey::Product(id),
                CacheValue::Product(Box::new(product.clone())),
            )
            .await;
        Ok(product)
    }

    /// List products within a category.
    #[instrument(skip(self))]
    pub async fn products_by_category(
        &self,
        category_id: CategoryId,
        page: u32,
        size: u32,
    ) -> Result<ProductPage, ApiError> {
        self.get_json(
            &format!("/products/category/{category_id}"),
            &[("page", page.to_string()), ("size", size.to_string())],
        )
        .await
    }

    /// Search products by name.
    #[instrument(skip(self))]
    pub async fn search_products(
        &self,
        name: &str,
        page: u32,
        size: u32,
    ) -> Result<ProductPage, ApiError> {
        self.get_json(
            "/products/search",
            &[
                ("name", name.to_owned()),
                ("page", page.to_string()),
                ("size", size.to_string()),
            ],
        )
        .await
    }

    /// List products within a price range.
    #[instrument(skip(self))]
    pub async fn products_by_price_range(
        &self,
        min_price: Decimal,
        max_price: Decimal,
        page: u32,
        size: u32,
    ) -> Result<ProductPage, ApiError> {
        self.get_json(
            "/products/price-range",
            &[
                ("minPrice", min_price.to_string()),
                ("maxPrice", max_price.to_string()),
                ("page", page.to_string()),
                ("size", size.to_string()),
            ],
        )
        .await
    }

    /// Most recently added products (cached).
    #[instrument(skip(self))]
    pub async fn latest_products(&self) -> Result<Vec<Product>, ApiError> {
        if let Some(CacheValue::Products(products)) =
            self.inner.cache.get(&CacheKey::LatestProducts).await
        {
            return Ok(products);
        }

        let products: Vec<Product> = self.get_json("/products/latest", &[]).await?;
        self.inner
            .cache
            .insert(CacheKey::LatestProducts, CacheValue::Products(products.clone()))
            .await;
        Ok(products)
    }

    /// List products that are in stock.
    #[instrument(skip(self))]
    pub async fn available_products(&self, page: u32, size: u32) -> Result<ProductPage, ApiError> {
        self.get_json(
            "/products/available",
            &[("page", page.to_string()), ("size", size.to_string())],
        )
        .await
    }

    /// List all categories (cached).
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        if let Some(CacheValue::Categories(categories)) =
            self.inner.cache.get(&CacheKey::Categories).await
        {
            return Ok(categories);
        }

        let categories: Vec<Category> = self.get_json("/categories", &[]).await?;
        self.inner
            .cache
            .insert(CacheKey::Categories, CacheValue::Categories(categories.clone()))
            .await;
        Ok(categories)
    }

    /// Fetch a single category by id.
    #[instrument(skip(self))]
    pub async fn category(&self, id: CategoryId) -> Result<Category, ApiError> {
        self.get_json(&format!("/categories/{id}"), &[]).await
    }
}
