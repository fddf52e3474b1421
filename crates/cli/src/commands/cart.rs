//! Cart commands.
//!
//! The cart lives in the data directory and survives across invocations,
//! so `cart add` in one run and `cart show` in the next see the same lines.

use clap::Subcommand;

use shopfront_client::cart::ProductSnapshot;
use shopfront_client::checkout::PricingQuote;
use shopfront_client::error::Result;
use shopfront_core::types::ProductId;

use super::App;

#[derive(Subcommand)]
pub enum CartAction {
    /// Show the cart with an order summary
    Show,
    /// Add a product to the cart
    Add {
        product_id: i64,
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set the quantity of a cart line (0 removes it)
    Update { product_id: i64, quantity: i64 },
    /// Remove a product from the cart
    Remove { product_id: i64 },
    /// Empty the cart
    Clear,
}

pub async fn run(app: &mut App, action: CartAction) -> Result<()> {
    match action {
        CartAction::Show => show(app),
        CartAction::Add {
            product_id,
            quantity,
        } => {
            // The snapshot is captured from the live catalog once, at add
            // time; later catalog changes do not touch the cart.
            let product = app.api.product(ProductId::new(product_id)).await?;
            if quantity > product.stock_quantity {
                println!(
                    "Note: requested {quantity} but only {} in stock; the order may be rejected.",
                    product.stock_quantity
                );
            }
            app.cart.add(ProductSnapshot::from(&product), quantity);
            println!("Added {} x {}.", quantity, product.name);
        }
        CartAction::Update {
            product_id,
            quantity,
        } => {
            app.cart.update_quantity(ProductId::new(product_id), quantity);
            show(app);
        }
        CartAction::Remove { product_id } => {
            app.cart.remove(ProductId::new(product_id));
            show(app);
        }
        CartAction::Clear => {
            app.cart.clear();
            println!("Cart cleared.");
        }
    }
    Ok(())
}

fn show(app: &App) {
    if app.cart.is_empty() {
        println!("Your cart is empty. Add some products to get started!");
        return;
    }

    println!("Shopping Cart ({} items)", app.cart.total_items());
    for item in app.cart.items() {
        println!(
            "{:>4}  {:<40} {:>3} x ${:>8} = ${}",
            item.product.id,
            item.product.name,
            item.quantity,
            item.product.price,
            item.line_total()
        );
    }

    let quote = PricingQuote::for_cart(&app.cart);
    println!();
    println!("Subtotal: ${}", quote.subtotal);
    if quote.shipping.is_zero() {
        println!("Shipping: FREE");
    } else {
        println!("Shipping: ${}", quote.shipping);
    }
    println!("Tax:      ${}", quote.tax);
    println!("Total:    ${}", quote.total);

    if let Some(gap) = quote.free_shipping_gap() {
        println!();
        println!("Add ${gap} more for free shipping!");
    }
}
