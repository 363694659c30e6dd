//! Marketplace storefront client library.
//!
//! Client-side state machine for a marketplace backend: a catalog cache, an
//! ordered cart ledger, a durable session store, a per-user order history
//! cache, and the checkout orchestration that composes them. The HTTP API is
//! an external collaborator consumed through [`api::ApiClient`]; state lives
//! in explicit components owned by the [`storefront::Storefront`] composition
//! root, never in ambient singletons.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod orders;
pub mod session;
pub mod storefront;

pub use api::{ApiClient, ApiError};
pub use cart::CartLedger;
pub use catalog::CatalogCache;
pub use config::{ClientConfig, ConfigError};
pub use error::ClientError;
pub use orders::OrderHistory;
pub use session::{Session, SessionState, SessionStore};
pub use storefront::{CheckoutReceipt, Storefront};
