//! Catalog commands: `products list`, `products add`, `products remove`.
//!
//! # Usage
//!
//! ```bash
//! marketplace products list
//! marketplace products list -s key
//! marketplace products add -n Webcam -p 30.00 -d "1080p webcam"
//! marketplace products remove -i 7
//! ```
//!
//! `add` and `remove` require a persisted admin session.

#![allow(clippy::print_stdout)]

use std::error::Error;

use rust_decimal::Decimal;
use tracing::info;

use marketplace_client::Storefront;
use marketplace_client::api::types::{NewProduct, Product};
use marketplace_core::{Price, ProductId};

/// Fetch and print the catalog, optionally filtered by name.
pub async fn list(storefront: &mut Storefront, search: Option<&str>) -> Result<(), Box<dyn Error>> {
    storefront.load_catalog().await?;

    let products = storefront.search(search.unwrap_or(""));
    if products.is_empty() {
        info!("no matching products");
        return Ok(());
    }
    for product in products {
        print_row(product);
    }
    Ok(())
}

/// Create a product.
pub async fn add(
    storefront: &Storefront,
    name: String,
    price: Decimal,
    description: Option<String>,
    image_url: Option<String>,
) -> Result<(), Box<dyn Error>> {
    let product = storefront
        .create_product(NewProduct {
            name,
            price: Price::new(price)?,
            description,
            image_url,
        })
        .await?;

    info!(product_id = %product.id, name = %product.name, "product created");
    Ok(())
}

/// Delete a product by ID.
pub async fn remove(storefront: &Storefront, id: i64) -> Result<(), Box<dyn Error>> {
    storefront.delete_product(ProductId::new(id)).await?;
    info!(product_id = id, "product deleted");
    Ok(())
}

pub(crate) fn print_row(product: &Product) {
    let price = product.price.to_string();
    let id = product.id.as_i64();
    match &product.description {
        Some(description) => {
            println!("{id:>6}  {:<24} {price:>10}  {description}", product.name);
        }
        None => println!("{id:>6}  {:<24} {price:>10}", product.name),
    }
}
