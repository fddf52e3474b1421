//! Checkout command.

use clap::Args;

use shopfront_client::checkout::{self, PricingQuote, ShippingForm};
use shopfront_client::error::Result;

use super::App;

/// Shipping information for the order.
#[derive(Args)]
pub struct CheckoutArgs {
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    /// Street address
    #[arg(long)]
    address: String,
    #[arg(long)]
    city: String,
    #[arg(long)]
    state: String,
    #[arg(long)]
    zip_code: String,
    #[arg(long)]
    phone: String,
}

pub async fn run(app: &mut App, args: CheckoutArgs) -> Result<()> {
    let shipping = ShippingForm {
        first_name: args.first_name,
        last_name: args.last_name,
        address: args.address,
        city: args.city,
        state: args.state,
        zip_code: args.zip_code,
        phone: args.phone,
    };

    let quote = PricingQuote::for_cart(&app.cart);
    let order =
        checkout::place_order(&app.api, &app.session, &mut app.cart, &shipping).await?;

    println!("Order #{} placed successfully! Thank you for your purchase.", order.id);
    println!("Charged total: ${} (subtotal ${}, shipping ${}, tax ${})",
        quote.total, quote.subtotal, quote.shipping, quote.tax);
    println!("This is a demonstration checkout. No real payment was processed.");
    Ok(())
}
