//! Order history cache: a per-user list of past orders, fetched on demand.

use tracing::{debug, instrument};

use marketplace_core::UserId;

use crate::api::types::Order;
use crate::api::{ApiClient, ApiError};

/// Holds the last fetched order list for a user.
///
/// Orders are created server-side; the client only reads them back, in the
/// order the service returns them. A failed refresh leaves the prior
/// contents untouched.
#[derive(Debug, Default)]
pub struct OrderHistory {
    orders: Vec<Order>,
}

impl OrderHistory {
    /// Create an empty history.
    #[must_use]
    pub const fn new() -> Self {
        Self { orders: Vec::new() }
    }

    /// Fetch all orders for `user_id` and replace the cache.
    ///
    /// The caller is responsible for only invoking this with an
    /// authenticated session's user ID.
    ///
    /// # Errors
    ///
    /// Returns the fetch error and leaves the cache unchanged.
    #[instrument(skip(self, api), fields(user_id = %user_id))]
    pub async fn refresh(&mut self, api: &ApiClient, user_id: UserId) -> Result<(), ApiError> {
        let orders = api.orders_for_user(user_id).await?;
        debug!(count = orders.len(), "order history replaced");
        self.orders = orders;
        Ok(())
    }

    /// Cached orders, in service order.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Number of cached orders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Whether the cache holds no orders.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
