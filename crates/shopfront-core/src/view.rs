//! The seam between the storefront handlers and the page.

use std::rc::Rc;

use crate::notify::Toast;
use crate::render::{CartTable, ProductCard};

/// What the handlers need from the page.
///
/// Every method replaces what was shown before; nothing is appended.
pub trait StorefrontView {
    /// Replace the product grid.
    fn render_catalog(&self, cards: &[ProductCard]);

    /// Replace the cart table, the total and the navigation badge.
    fn render_cart(&self, table: &CartTable);

    /// Show a toast.
    fn notify(&self, toast: Toast);

    /// Show the order confirmation.
    fn show_confirmation(&self, message: &str);

    /// Clear the checkout form fields.
    fn reset_checkout_form(&self);
}

impl<T: StorefrontView + ?Sized> StorefrontView for Rc<T> {
    fn render_catalog(&self, cards: &[ProductCard]) {
        (**self).render_catalog(cards)
    }

    fn render_cart(&self, table: &CartTable) {
        (**self).render_cart(table)
    }

    fn notify(&self, toast: Toast) {
        (**self).notify(toast)
    }

    fn show_confirmation(&self, message: &str) {
        (**self).show_confirmation(message)
    }

    fn reset_checkout_form(&self) {
        (**self).reset_checkout_form()
    }
}
