//! Reactive page state and the view the storefront handlers draw on.

use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use leptos::prelude::*;
use leptos::task::spawn_local;
use shopfront_cache::{KvStore, SystemClock};
use shopfront_commerce::CatalogQuery;
use shopfront_core::{CartTable, ProductCard, Storefront, StorefrontView, Toast};

/// The storefront session as the page runs it.
pub type AppStorefront = Storefront<Rc<dyn KvStore>, SystemClock, PageView>;

/// A toast currently on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ShownToast {
    pub id: u64,
    pub toast: Toast,
}

/// Signals backing everything the handlers can change.
#[derive(Clone, Copy)]
pub struct PageState {
    pub cards: RwSignal<Vec<ProductCard>>,
    pub cart: RwSignal<CartTable>,
    pub toasts: RwSignal<Vec<ShownToast>>,
    pub confirmation: RwSignal<Option<String>>,
    pub name: RwSignal<String>,
    pub address: RwSignal<String>,
    pub email: RwSignal<String>,
    next_toast: StoredValue<u64>,
}

impl PageState {
    pub fn new(currency_label: &str) -> Self {
        Self {
            cards: RwSignal::new(Vec::new()),
            cart: RwSignal::new(CartTable::empty(currency_label)),
            toasts: RwSignal::new(Vec::new()),
            confirmation: RwSignal::new(None),
            name: RwSignal::new(String::new()),
            address: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
            next_toast: StoredValue::new(0),
        }
    }

    /// Take a toast off the screen.
    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|toasts| toasts.retain(|t| t.id != id));
    }
}

/// [`StorefrontView`] over [`PageState`].
#[derive(Clone, Copy)]
pub struct PageView(pub PageState);

impl StorefrontView for PageView {
    fn render_catalog(&self, cards: &[ProductCard]) {
        self.0.cards.set(cards.to_vec());
    }

    fn render_cart(&self, table: &CartTable) {
        self.0.cart.set(table.clone());
    }

    fn notify(&self, toast: Toast) {
        let page = self.0;
        let id = page.next_toast.get_value();
        page.next_toast.set_value(id + 1);

        let duration = Duration::from_millis(u64::from(toast.duration_ms));
        page.toasts.update(|toasts| toasts.push(ShownToast { id, toast }));
        set_timeout(move || page.dismiss(id), duration);
    }

    fn show_confirmation(&self, message: &str) {
        self.0.confirmation.set(Some(message.to_string()));
    }

    fn reset_checkout_form(&self) {
        self.0.name.set(String::new());
        self.0.address.set(String::new());
        self.0.email.set(String::new());
    }
}

/// Copyable handle to the storefront for event handlers.
#[derive(Clone, Copy)]
pub struct Shop(StoredValue<Rc<AppStorefront>, LocalStorage>);

impl Shop {
    pub fn new(storefront: Rc<AppStorefront>) -> Self {
        Self(StoredValue::new_local(storefront))
    }

    /// The grid's current search term and sort.
    pub fn query(self) -> CatalogQuery {
        self.0
            .try_get_value()
            .map(|shop| shop.query())
            .unwrap_or_default()
    }

    /// Run a synchronous handler.
    pub fn run(self, f: impl FnOnce(&AppStorefront)) {
        if let Some(shop) = self.0.try_get_value() {
            f(&shop);
        }
    }

    /// Run an async handler on the page's task queue.
    pub fn spawn<Fut>(self, f: impl FnOnce(Rc<AppStorefront>) -> Fut)
    where
        Fut: Future<Output = ()> + 'static,
    {
        if let Some(shop) = self.0.try_get_value() {
            spawn_local(f(shop));
        }
    }
}
