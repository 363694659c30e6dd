//! Interactive shopping session: `shop`.
//!
//! # Usage
//!
//! ```bash
//! marketplace shop
//! ```
//!
//! The cart lives only for the duration of the session; the signed-in
//! identity is the persisted one and survives across runs.

#![allow(clippy::print_stdout)]

use std::error::Error;

use tracing::warn;

use marketplace_client::Storefront;
use marketplace_core::{Email, ProductId};

use super::{orders::print_row as print_order_row, products::print_row as print_product_row};
use super::{prompt, read_password};

const HELP: &str = "\
commands:
  list [query]    show the catalog, optionally filtered
  reload          refetch the catalog
  add <id>        add a product to the cart
  remove <n>      remove cart line n (1-based)
  cart            show the cart
  checkout        submit the cart as an order
  orders          show order history
  login           sign in
  logout          sign out
  help            show this help
  quit            leave the shop";

/// Run the interactive loop until `quit` or end of input.
pub async fn run(storefront: &mut Storefront) -> Result<(), Box<dyn Error>> {
    if let Err(error) = storefront.load_catalog().await {
        warn!(%error, "catalog fetch failed; starting with an empty catalog");
    }
    print_catalog(storefront, "");
    println!("type 'help' for commands");

    loop {
        let Some(line) = prompt("shop")? else { break };
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        let rest = words.collect::<Vec<_>>().join(" ");

        match command {
            "list" => print_catalog(storefront, &rest),
            "reload" => match storefront.load_catalog().await {
                Ok(()) => print_catalog(storefront, ""),
                Err(error) => println!("catalog fetch failed: {error}"),
            },
            "add" => add(storefront, &rest),
            "remove" => remove(storefront, &rest),
            "cart" => {
                storefront.open_cart();
                print_cart(storefront);
            }
            "checkout" => checkout(storefront).await,
            "orders" => orders(storefront).await,
            "login" => {
                if let Err(error) = login(storefront).await {
                    println!("sign-in failed: {error}");
                }
            }
            "logout" => {
                storefront.logout();
                println!("signed out");
            }
            "help" => println!("{HELP}"),
            "quit" | "exit" => break,
            other => println!("unknown command '{other}'; type 'help'"),
        }
    }
    Ok(())
}

fn print_catalog(storefront: &Storefront, query: &str) {
    let products = storefront.search(query);
    if products.is_empty() {
        println!("no matching products");
        return;
    }
    for product in products {
        print_product_row(product);
    }
}

fn add(storefront: &mut Storefront, arg: &str) {
    let Ok(id) = arg.parse::<i64>() else {
        println!("usage: add <product id>");
        return;
    };
    if storefront.add_to_cart(ProductId::new(id)) {
        println!("added; cart total {}", storefront.cart().total());
    } else {
        println!("no product with id {id} in the catalog");
    }
}

fn remove(storefront: &mut Storefront, arg: &str) {
    let Some(index) = arg.parse::<usize>().ok().and_then(|n| n.checked_sub(1)) else {
        println!("usage: remove <line number>");
        return;
    };
    match storefront.remove_from_cart(index) {
        Ok(line) => println!(
            "removed {}; cart total {}",
            line.name,
            storefront.cart().total()
        ),
        Err(error) => println!("{error}"),
    }
}

fn print_cart(storefront: &Storefront) {
    let cart = storefront.cart();
    if cart.is_empty() {
        println!("cart is empty");
        return;
    }
    for (i, line) in cart.lines().iter().enumerate() {
        let price = line.price.to_string();
        println!("{:>4}  {:<24} {price:>10}", i + 1, line.name);
    }
    println!("total: {}", cart.total());
}

async fn checkout(storefront: &mut Storefront) {
    match storefront.checkout().await {
        Ok(receipt) => {
            println!(
                "order {} confirmed, total {}",
                receipt.order.id, receipt.order.total_price
            );
            if receipt.history_refreshed {
                print_orders(storefront);
            } else {
                println!("order history is temporarily unavailable");
            }
        }
        Err(error) if error.requires_login() => println!("sign in first ('login')"),
        Err(error) => println!("checkout failed: {error}"),
    }
}

async fn orders(storefront: &mut Storefront) {
    match storefront.fetch_orders().await.map(|_| ()) {
        Ok(()) => print_orders(storefront),
        Err(error) if error.requires_login() => println!("sign in first ('login')"),
        Err(error) => println!("could not fetch orders: {error}"),
    }
}

fn print_orders(storefront: &Storefront) {
    let history = storefront.orders();
    if history.is_empty() {
        println!("no orders yet");
        return;
    }
    for order in history.orders() {
        print_order_row(order);
    }
}

async fn login(storefront: &mut Storefront) -> Result<(), Box<dyn Error>> {
    let Some(input) = prompt("Email")? else {
        return Ok(());
    };
    let email = Email::parse(&input)?;
    let password = read_password()?;

    let session = storefront.login(&email, &password).await?;
    println!("signed in as {}", session.username);
    Ok(())
}
