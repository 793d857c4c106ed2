//! Interaction handlers for the storefront page.

use std::cell::RefCell;

use shopfront_cache::{CartStore, Clock, KvStore};
use shopfront_commerce::prelude::*;

use crate::catalog::{CatalogCache, CatalogSource};
use crate::config::StorefrontConfig;
use crate::error::StorefrontError;
use crate::notify::{Toast, ToastKind};
use crate::render::{catalog_cards, CartTable};
use crate::view::StorefrontView;

/// Toast shown when an action names an id the catalog does not have.
pub const PRODUCT_NOT_FOUND_MESSAGE: &str = "Product not found.";

/// Toast shown when checkout is submitted with blank fields.
pub const CHECKOUT_INVALID_MESSAGE: &str = "Please fill out all fields correctly.";

/// Toast shown when a filled-in checkout cannot be completed.
pub const CHECKOUT_FAILED_MESSAGE: &str = "Could not place your order. Please review your cart.";

/// Toast shown after a line is removed from the cart.
pub const ITEM_REMOVED_MESSAGE: &str = "Item removed";

/// A storefront session: the catalog, the persisted cart, the current grid
/// query and the page it draws on.
///
/// Handlers never fail. Catalog and storage errors are logged and the page
/// keeps working with whatever state is left; user mistakes become toasts.
/// A cart read-modify-write never spans an await point.
pub struct Storefront<S, C, V> {
    config: StorefrontConfig,
    catalog: CatalogCache,
    cart: CartStore<S, C>,
    view: V,
    query: RefCell<CatalogQuery>,
}

impl<S: KvStore, C: Clock, V: StorefrontView> Storefront<S, C, V> {
    /// Create a session. The catalog is not fetched until [`Storefront::init`].
    pub fn new(
        config: StorefrontConfig,
        source: impl CatalogSource + 'static,
        store: S,
        clock: C,
        view: V,
    ) -> Result<Self, StorefrontError> {
        config.validate()?;
        let cart = CartStore::new(store, clock)
            .with_key(config.storage_key.clone())
            .with_ttl(config.cart_ttl()?);

        Ok(Self {
            config,
            catalog: CatalogCache::new(source),
            cart,
            view,
            query: RefCell::new(CatalogQuery::default()),
        })
    }

    /// The persisted cart.
    pub fn cart_store(&self) -> &CartStore<S, C> {
        &self.cart
    }

    /// The current search term and sort.
    pub fn query(&self) -> CatalogQuery {
        self.query.borrow().clone()
    }

    /// Page initialization: load the catalog, draw the grid and the cart.
    pub async fn init(&self) {
        tracing::debug!(url = %self.catalog.location(), "initializing storefront");
        self.reload_catalog().await;
        self.refresh_cart();
    }

    /// Fetch the catalog again and redraw the grid.
    ///
    /// On failure the grid is drawn empty.
    pub async fn reload_catalog(&self) {
        match self.catalog.reload().await {
            Ok(products) => {
                tracing::info!(products = products.len(), "catalog ready");
                self.render_products(&products);
            }
            Err(e) => {
                tracing::error!(url = %self.catalog.location(), error = %e, "failed to load catalog");
                self.view.render_catalog(&[]);
            }
        }
    }

    /// Search input changed.
    pub fn search(&self, term: &str) {
        self.query.borrow_mut().term = term.to_string();
        self.render_visible();
    }

    /// Sort selection changed. `value` is the `<select>` value.
    pub fn sort(&self, value: &str) {
        self.query.borrow_mut().sort = SortOption::from_select(value);
        self.render_visible();
    }

    /// Products the grid shows right now.
    pub fn visible_products(&self) -> Vec<Product> {
        match self.catalog.cached() {
            Some(products) => self.query.borrow().apply(&products),
            None => Vec::new(),
        }
    }

    /// Add one unit of a product to the cart.
    pub async fn add_to_cart(&self, id: ProductId) {
        let Some(product) = self.lookup(id).await else {
            return;
        };

        let mut cart = self.current_cart();
        let qty = match cart.add_product(&product) {
            Ok(qty) => qty,
            Err(e) => {
                tracing::warn!(product_id = %id, error = %e, "add to cart rejected");
                self.toast(format!("Cannot add more {}.", product.name), ToastKind::Error);
                return;
            }
        };

        self.persist(&cart);
        tracing::info!(product_id = %id, qty, "added to cart");
        self.draw_cart(&cart);
        self.toast(format!("{} added to cart!", product.name), ToastKind::Success);
    }

    /// Show a product summary. Changes nothing.
    pub async fn view_product(&self, id: ProductId) {
        let Some(product) = self.lookup(id).await else {
            return;
        };
        self.toast(
            format!(
                "Name: {} | {}",
                product.name,
                product.price.display_with(&self.config.currency_label)
            ),
            ToastKind::Info,
        );
    }

    /// Remove a line from the cart.
    ///
    /// Removing an id that is not in the cart still rewrites the record.
    pub fn remove_item(&self, id: ProductId) {
        let mut cart = self.current_cart();
        let removed = cart.remove(id);

        self.persist(&cart);
        tracing::info!(product_id = %id, removed, items = cart.unique_item_count(), "removed from cart");
        self.draw_cart(&cart);
        self.toast(ITEM_REMOVED_MESSAGE, ToastKind::Error);
    }

    /// Submit the checkout form.
    ///
    /// With every field filled in, the cart is cleared, the confirmation is
    /// shown and the form is reset. Blank fields and a cart that cannot be
    /// priced each get their own toast and leave everything as it was.
    pub fn checkout(&self, form: &CheckoutForm) -> Option<PlacedOrder> {
        let items = self.cart.get_cart();
        let order = match form.place_order(&items) {
            Ok(order) => order,
            Err(CommerceError::ValidationError(reason)) => {
                tracing::debug!(%reason, "checkout rejected");
                self.toast(CHECKOUT_INVALID_MESSAGE, ToastKind::Error);
                return None;
            }
            Err(e) => {
                tracing::error!(items = items.len(), error = %e, "failed to place order");
                self.toast(CHECKOUT_FAILED_MESSAGE, ToastKind::Error);
                return None;
            }
        };

        if let Err(e) = self.cart.clear_cart() {
            tracing::error!(key = %self.cart.key(), error = %e, "failed to clear cart");
        }
        tracing::info!(
            items = order.items.len(),
            total = %order.total,
            "order placed"
        );

        self.view.show_confirmation(&order.confirmation_message());
        self.view.reset_checkout_form();
        self.draw_cart(&Cart::default());
        Some(order)
    }

    /// Redraw the cart from storage. Also applies lazy expiry.
    pub fn refresh_cart(&self) {
        let cart = self.current_cart();
        self.draw_cart(&cart);
    }

    /// The cart table for the stored cart.
    pub fn cart_table(&self) -> CartTable {
        CartTable::for_cart(&self.current_cart(), &self.config.currency_label)
    }

    async fn lookup(&self, id: ProductId) -> Option<Product> {
        let products = match self.catalog.products().await {
            Ok(products) => products,
            Err(e) => {
                tracing::error!(product_id = %id, error = %e, "catalog unavailable");
                return None;
            }
        };

        match find_product(&products, id).ok_or(CommerceError::ProductNotFound(id.get())) {
            Ok(product) => Some(product.clone()),
            Err(e) => {
                tracing::warn!(error = %e, "lookup failed");
                self.toast(PRODUCT_NOT_FOUND_MESSAGE, ToastKind::Error);
                None
            }
        }
    }

    fn current_cart(&self) -> Cart {
        Cart::from_items(self.cart.get_cart()).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "stored cart rejected, starting empty");
            Cart::default()
        })
    }

    fn persist(&self, cart: &Cart) {
        if let Err(e) = self.cart.save_cart(cart.items()) {
            tracing::error!(key = %self.cart.key(), error = %e, "failed to save cart");
        }
    }

    fn render_visible(&self) {
        match self.catalog.cached() {
            Some(products) => self.render_products(&products),
            None => tracing::debug!("catalog not loaded, grid left as is"),
        }
    }

    fn render_products(&self, products: &[Product]) {
        let visible = self.query.borrow().apply(products);
        self.view
            .render_catalog(&catalog_cards(&visible, &self.config.currency_label));
    }

    fn draw_cart(&self, cart: &Cart) {
        let table = CartTable::for_cart(cart, &self.config.currency_label);
        if !table.priced {
            tracing::error!(items = table.rows.len(), "cart total overflowed");
        }
        self.view.render_cart(&table);
    }

    fn toast(&self, text: impl Into<String>, kind: ToastKind) {
        self.view
            .notify(Toast::new(text, kind, self.config.toast_duration_ms));
    }
}
