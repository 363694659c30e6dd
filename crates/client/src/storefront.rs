//! Composition root: owns the client's state and orchestrates checkout.
//!
//! All state lives in explicit components held here — no ambient singletons.
//! The checkout orchestrator is the only place that reaches across the cart
//! and session to perform a side-effecting network call.

use secrecy::SecretString;
use tracing::{info, instrument, warn};

use marketplace_core::{Email, ProductId, UserId};

use crate::api::types::{CheckoutRequest, NewProduct, Order, Product};
use crate::api::ApiClient;
use crate::cart::{CartLedger, CartLine};
use crate::catalog::CatalogCache;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::orders::OrderHistory;
use crate::session::{FileSessionStorage, Session, SessionStorage, SessionStore};

/// Which views are open. Mirrors the cart modal and the orders page of the
/// storefront UI; checkout closes the former and opens the latter.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    /// The cart view is open.
    pub cart_open: bool,
    /// The order history view is open (instead of the product list).
    pub orders_open: bool,
}

/// Result of a confirmed checkout.
#[derive(Debug)]
pub struct CheckoutReceipt {
    /// The order as created by the service.
    pub order: Order,
    /// Whether the follow-up order history refresh succeeded. The order is
    /// confirmed either way.
    pub history_refreshed: bool,
}

/// The storefront client: catalog, cart, session, order history, and the
/// service client, composed behind one owner.
pub struct Storefront {
    api: ApiClient,
    catalog: CatalogCache,
    cart: CartLedger,
    session: SessionStore,
    orders: OrderHistory,
    view: ViewState,
}

impl Storefront {
    /// Create a storefront with file-backed session storage, hydrating any
    /// persisted session.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let storage = FileSessionStorage::new(config.session_file.clone());
        Self::with_storage(config, Box::new(storage))
    }

    /// Create a storefront over caller-provided session storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_storage(
        config: ClientConfig,
        storage: Box<dyn SessionStorage>,
    ) -> Result<Self, ClientError> {
        let api = ApiClient::new(&config)?;
        let session = SessionStore::hydrate(storage, config.admin_email.clone());

        Ok(Self {
            api,
            catalog: CatalogCache::new(),
            cart: CartLedger::new(),
            session,
            orders: OrderHistory::new(),
            view: ViewState::default(),
        })
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Fetch the product list into the catalog cache.
    ///
    /// # Errors
    ///
    /// Returns the fetch error; the previous catalog (possibly empty) stays
    /// usable.
    pub async fn load_catalog(&mut self) -> Result<(), ClientError> {
        self.catalog.load(&self.api).await?;
        Ok(())
    }

    /// Filtered view over the cached catalog.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Product> {
        self.catalog.filter(query)
    }

    /// The catalog cache.
    #[must_use]
    pub const fn catalog(&self) -> &CatalogCache {
        &self.catalog
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add a snapshot of the cached product with `product_id` to the cart.
    ///
    /// Returns `false` (and changes nothing) if the catalog holds no such
    /// product.
    pub fn add_to_cart(&mut self, product_id: ProductId) -> bool {
        match self.catalog.find(product_id) {
            Some(product) => {
                self.cart.add(product);
                true
            }
            None => false,
        }
    }

    /// Remove the cart line at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::OutOfRange`] and leaves the cart unchanged if
    /// the position does not exist.
    pub fn remove_from_cart(&mut self, position: usize) -> Result<CartLine, ClientError> {
        Ok(self.cart.remove_at(position)?)
    }

    /// The cart ledger.
    #[must_use]
    pub const fn cart(&self) -> &CartLedger {
        &self.cart
    }

    /// Open the cart view.
    pub fn open_cart(&mut self) {
        self.view.cart_open = true;
    }

    /// Close the cart view.
    pub fn close_cart(&mut self) {
        self.view.cart_open = false;
    }

    /// Leave the orders view and return to the product list.
    pub fn show_catalog(&mut self) {
        self.view.orders_open = false;
    }

    /// The current view flags.
    #[must_use]
    pub const fn view(&self) -> ViewState {
        self.view
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Sign in.
    ///
    /// # Errors
    ///
    /// See [`SessionStore::login`].
    pub async fn login(
        &mut self,
        email: &Email,
        password: &SecretString,
    ) -> Result<Session, ClientError> {
        self.session.login(&self.api, email, password).await
    }

    /// Register and sign in.
    ///
    /// # Errors
    ///
    /// See [`SessionStore::register`].
    pub async fn register(
        &mut self,
        username: &str,
        email: &Email,
        password: &SecretString,
    ) -> Result<Session, ClientError> {
        self.session
            .register(&self.api, username, email, password)
            .await
    }

    /// Sign out and leave the orders view.
    pub fn logout(&mut self) {
        self.session.logout();
        self.view.orders_open = false;
    }

    /// The session store.
    #[must_use]
    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Fetch the signed-in user's order history and open the orders view.
    ///
    /// # Errors
    ///
    /// [`ClientError::AuthenticationRequired`] without a session (no request
    /// is made); otherwise the fetch error, leaving the cached history
    /// untouched.
    pub async fn fetch_orders(&mut self) -> Result<&[Order], ClientError> {
        let user_id = self.current_user_id()?;
        self.orders.refresh(&self.api, user_id).await?;
        self.view.orders_open = true;
        Ok(self.orders.orders())
    }

    /// The order history cache.
    #[must_use]
    pub const fn orders(&self) -> &OrderHistory {
        &self.orders
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Submit the cart as an order.
    ///
    /// Preconditions are checked before any network call: an authenticated
    /// session (else [`ClientError::AuthenticationRequired`], on which the
    /// caller should prompt for sign-in) and a non-empty cart (else
    /// [`ClientError::EmptyCart`]). The submission carries the user ID, the
    /// cart summary (names joined in order, duplicates included), and the
    /// recomputed cart total.
    ///
    /// Only a confirmed success clears the cart, closes the cart view, and
    /// refreshes the order history; on failure the cart is left untouched
    /// and no retry is attempted. Because the cart is cleared only after a
    /// confirmed response, a lost response followed by a manual retry can
    /// create a duplicate order server-side; the service contract offers no
    /// idempotency token to close that gap.
    ///
    /// # Errors
    ///
    /// Precondition failures as above; [`ClientError::Network`] if the
    /// submission fails.
    #[instrument(skip_all)]
    pub async fn checkout(&mut self) -> Result<CheckoutReceipt, ClientError> {
        let user_id = self.current_user_id()?;
        if self.cart.is_empty() {
            return Err(ClientError::EmptyCart);
        }

        let request = CheckoutRequest {
            user_id,
            product_names: self.cart.summary(),
            total_price: self.cart.total(),
        };

        let order = self.api.checkout(&request).await?;
        info!(order_id = %order.id, total = %order.total_price, "order confirmed");

        self.cart.clear();
        self.view.cart_open = false;

        let history_refreshed = match self.orders.refresh(&self.api, user_id).await {
            Ok(()) => {
                self.view.orders_open = true;
                true
            }
            Err(error) => {
                warn!(%error, "order confirmed but history refresh failed");
                false
            }
        };

        Ok(CheckoutReceipt {
            order,
            history_refreshed,
        })
    }

    // =========================================================================
    // Admin catalog mutation
    // =========================================================================

    /// Create a product. Requires the admin capability; the service is
    /// trusted to also enforce this.
    ///
    /// # Errors
    ///
    /// [`ClientError::AuthenticationRequired`] or [`ClientError::AdminRequired`]
    /// before any request; otherwise the request error.
    pub async fn create_product(&self, product: NewProduct) -> Result<Product, ClientError> {
        self.ensure_admin()?;
        Ok(self.api.create_product(&product).await?)
    }

    /// Delete a product. Requires the admin capability.
    ///
    /// # Errors
    ///
    /// See [`Storefront::create_product`].
    pub async fn delete_product(&self, product_id: ProductId) -> Result<(), ClientError> {
        self.ensure_admin()?;
        Ok(self.api.delete_product(product_id).await?)
    }

    fn current_user_id(&self) -> Result<UserId, ClientError> {
        self.session
            .current()
            .map(|session| session.user_id)
            .ok_or(ClientError::AuthenticationRequired)
    }

    fn ensure_admin(&self) -> Result<(), ClientError> {
        match self.session.current() {
            None => Err(ClientError::AuthenticationRequired),
            Some(session) if !session.is_admin => Err(ClientError::AdminRequired),
            Some(_) => Ok(()),
        }
    }
}
