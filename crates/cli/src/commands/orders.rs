//! Order history commands.

use clap::Subcommand;

use shopfront_client::error::Result;
use shopfront_core::order::Order;
use shopfront_core::types::OrderId;

use super::App;

#[derive(Subcommand)]
pub enum OrderAction {
    /// List your orders
    List,
    /// Show one order
    Show { id: i64 },
}

pub async fn run(app: &App, action: OrderAction) -> Result<()> {
    match action {
        OrderAction::List => {
            let orders = app.api.my_orders().await?;
            if orders.is_empty() {
                println!("No orders yet.");
            }
            for order in orders {
                print_order_row(&order);
            }
        }
        OrderAction::Show { id } => {
            let order = app.api.order(OrderId::new(id)).await?;
            print_order_row(&order);
            for item in &order.order_items {
                println!(
                    "      {:<40} {:>3} x ${:>8}",
                    item.product.name, item.quantity, item.price
                );
            }
        }
    }
    Ok(())
}

fn print_order_row(order: &Order) {
    let placed = order
        .created_at
        .map_or_else(|| "-".to_owned(), |t| t.to_string());
    println!(
        "#{:<6} {:<10} ${:>8}  placed {placed}",
        order.id, order.status, order.total_amount
    );
}
