//! Catalog browsing commands.

use clap::Subcommand;
use rust_decimal::Decimal;

use shopfront_client::api::{ProductQuery, SortDirection};
use shopfront_client::error::Result;
use shopfront_core::catalog::{Product, ProductPage};
use shopfront_core::types::{CategoryId, ProductId};

use super::App;

#[derive(Subcommand)]
pub enum ProductAction {
    /// List products, paginated
    List {
        /// Zero-based page index
        #[arg(long, default_value_t = 0)]
        page: u32,
        /// Page size
        #[arg(long, default_value_t = 12)]
        size: u32,
        /// Field to sort by
        #[arg(long, default_value = "id")]
        sort_by: String,
        /// Sort descending instead of ascending
        #[arg(long)]
        desc: bool,
    },
    /// Show one product
    Show { id: i64 },
    /// Search products by name
    Search {
        name: String,
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = 12)]
        size: u32,
    },
    /// List products within a category
    ByCategory {
        category_id: i64,
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = 12)]
        size: u32,
    },
    /// List products within a price range
    PriceRange {
        min: Decimal,
        max: Decimal,
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = 12)]
        size: u32,
    },
    /// Show the most recently added products
    Latest,
    /// List products that are in stock
    Available {
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = 12)]
        size: u32,
    },
}

#[derive(Subcommand)]
pub enum CategoryAction {
    /// List all categories
    List,
    /// Show one category
    Show { id: i64 },
}

pub async fn run_products(app: &App, action: ProductAction) -> Result<()> {
    match action {
        ProductAction::List {
            page,
            size,
            sort_by,
            desc,
        } => {
            let query = ProductQuery {
                page,
                size,
                sort_by,
                sort_dir: if desc {
                    SortDirection::Descending
                } else {
                    SortDirection::Ascending
                },
            };
            print_page(&app.api.products(&query).await?);
        }
        ProductAction::Show { id } => {
            let product = app.api.product(ProductId::new(id)).await?;
            print_product_detail(&product);
        }
        ProductAction::Search { name, page, size } => {
            print_page(&app.api.search_products(&name, page, size).await?);
        }
        ProductAction::ByCategory {
            category_id,
            page,
            size,
        } => {
            let page = app
                .api
                .products_by_category(CategoryId::new(category_id), page, size)
                .await?;
            print_page(&page);
        }
        ProductAction::PriceRange {
            min,
            max,
            page,
            size,
        } => {
            print_page(&app.api.products_by_price_range(min, max, page, size).await?);
        }
        ProductAction::Latest => {
            for product in app.api.latest_products().await? {
                print_product_row(&product);
            }
        }
        ProductAction::Available { page, size } => {
            print_page(&app.api.available_products(page, size).await?);
        }
    }
    Ok(())
}

pub async fn run_categories(app: &App, action: CategoryAction) -> Result<()> {
    match action {
        CategoryAction::List => {
            for category in app.api.categories().await? {
                println!("{:>4}  {} - {}", category.id, category.name, category.description);
            }
        }
        CategoryAction::Show { id } => {
            let category = app.api.category(CategoryId::new(id)).await?;
            println!("{} (#{})", category.name, category.id);
            println!("{}", category.description);
        }
    }
    Ok(())
}

fn print_page(page: &ProductPage) {
    if page.is_empty() {
        println!("No products found.");
        return;
    }
    for product in &page.content {
        print_product_row(product);
    }
    println!(
        "-- page {}/{} ({} products total)",
        page.number + 1,
        page.total_pages,
        page.total_elements
    );
}

fn print_product_row(product: &Product) {
    let stock = if product.in_stock() {
        format!("{} in stock", product.stock_quantity)
    } else {
        "out of stock".to_owned()
    };
    println!(
        "{:>4}  {:<40} ${:>8}  [{}]  {}",
        product.id, product.name, product.price, product.category.name, stock
    );
}

fn print_product_detail(product: &Product) {
    println!("{} (#{})", product.name, product.id);
    println!("Category: {}", product.category.name);
    println!("Price:    ${}", product.price);
    println!("Stock:    {}", product.stock_quantity);
    println!();
    println!("{}", product.description);
}
