//! Order history command: `orders`.
//!
//! # Usage
//!
//! ```bash
//! marketplace orders
//! ```

#![allow(clippy::print_stdout)]

use std::error::Error;

use tracing::info;

use marketplace_client::Storefront;
use marketplace_client::api::types::Order;

/// Fetch and print the signed-in user's order history.
pub async fn show(storefront: &mut Storefront) -> Result<(), Box<dyn Error>> {
    let orders = storefront.fetch_orders().await?;
    if orders.is_empty() {
        info!("no orders yet");
        return Ok(());
    }
    for order in orders {
        print_row(order);
    }
    Ok(())
}

pub(crate) fn print_row(order: &Order) {
    let total = order.total_price.to_string();
    println!(
        "{:>6}  {}  {total:>10}  {}",
        order.id.as_i64(),
        order.order_date,
        order.product_names
    );
}
