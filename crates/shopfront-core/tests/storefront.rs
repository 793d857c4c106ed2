//! End-to-end handler behaviour against in-memory storage and a recording page.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use async_trait::async_trait;
use chrono::Duration;
use shopfront_cache::CartRecord;
use shopfront_core::prelude::*;
use shopfront_core::{
    CHECKOUT_FAILED_MESSAGE, CHECKOUT_INVALID_MESSAGE, EMPTY_CART_MESSAGE, ITEM_REMOVED_MESSAGE,
    PRODUCT_NOT_FOUND_MESSAGE, UNPRICED_LABEL,
};

const CATALOG_JSON: &str = r#"[
    {"id": 1, "name": "Pen", "price": 10, "image": "img/pen.png"},
    {"id": 2, "name": "Bag", "price": 500, "image": "img/bag.png"},
    {"id": 3, "name": "Notebook", "price": 45.5, "image": "img/notebook.png"},
    {"id": 4, "name": "pencil", "price": 5, "image": "img/pencil.png"}
]"#;

/// Remembers everything the handlers asked the page to do.
#[derive(Default)]
struct RecordingView {
    catalog: RefCell<Vec<ProductCard>>,
    catalog_renders: Cell<u32>,
    cart: RefCell<Option<CartTable>>,
    toasts: RefCell<Vec<Toast>>,
    confirmation: RefCell<Option<String>>,
    form_resets: Cell<u32>,
}

impl RecordingView {
    fn grid_names(&self) -> Vec<String> {
        self.catalog.borrow().iter().map(|c| c.name.clone()).collect()
    }

    fn cart(&self) -> CartTable {
        self.cart.borrow().clone().expect("cart was never rendered")
    }

    fn last_toast(&self) -> Option<Toast> {
        self.toasts.borrow().last().cloned()
    }
}

impl StorefrontView for RecordingView {
    fn render_catalog(&self, cards: &[ProductCard]) {
        *self.catalog.borrow_mut() = cards.to_vec();
        self.catalog_renders.set(self.catalog_renders.get() + 1);
    }

    fn render_cart(&self, table: &CartTable) {
        *self.cart.borrow_mut() = Some(table.clone());
    }

    fn notify(&self, toast: Toast) {
        self.toasts.borrow_mut().push(toast);
    }

    fn show_confirmation(&self, message: &str) {
        *self.confirmation.borrow_mut() = Some(message.to_string());
    }

    fn reset_checkout_form(&self) {
        self.form_resets.set(self.form_resets.get() + 1);
    }
}

/// Serves a fixed catalog and counts fetches; can be made to fail.
struct CountingSource {
    inner: StaticCatalogSource,
    loads: Cell<u32>,
    offline: Cell<bool>,
}

#[async_trait(?Send)]
impl CatalogSource for CountingSource {
    async fn load(&self) -> Result<Vec<Product>, CatalogError> {
        self.loads.set(self.loads.get() + 1);
        if self.offline.get() {
            return Err(CatalogError::Unavailable {
                url: self.location(),
                reason: "HTTP 404".to_string(),
            });
        }
        self.inner.load().await
    }

    fn location(&self) -> String {
        "test://product.json".to_string()
    }
}

type TestStorefront = Storefront<Rc<MemoryStore>, Rc<ManualClock>, Rc<RecordingView>>;

struct Harness {
    shop: TestStorefront,
    kv: Rc<MemoryStore>,
    clock: Rc<ManualClock>,
    view: Rc<RecordingView>,
    source: Rc<CountingSource>,
}

fn harness_with(config: StorefrontConfig) -> Harness {
    harness_with_catalog(config, CATALOG_JSON)
}

fn harness_with_catalog(config: StorefrontConfig, catalog_json: &str) -> Harness {
    let kv = Rc::new(MemoryStore::new());
    let clock = Rc::new(ManualClock::default());
    let view = Rc::new(RecordingView::default());
    let source = Rc::new(CountingSource {
        inner: StaticCatalogSource::from_json(catalog_json).unwrap(),
        loads: Cell::new(0),
        offline: Cell::new(false),
    });
    let shop = Storefront::new(
        config,
        Rc::clone(&source),
        Rc::clone(&kv),
        Rc::clone(&clock),
        Rc::clone(&view),
    )
    .unwrap();

    Harness {
        shop,
        kv,
        clock,
        view,
        source,
    }
}

async fn ready() -> Harness {
    let h = harness_with(StorefrontConfig::default());
    h.shop.init().await;
    h
}

fn id(n: u64) -> ProductId {
    ProductId::new(n)
}

fn stored_record(kv: &MemoryStore) -> Option<CartRecord> {
    kv.get("cartData")
        .unwrap()
        .map(|raw| serde_json::from_str(&raw).unwrap())
}

#[tokio::test]
async fn test_init_renders_catalog_and_empty_cart() {
    let h = ready().await;

    assert_eq!(h.view.grid_names(), ["Pen", "Bag", "Notebook", "pencil"]);
    assert_eq!(h.view.catalog.borrow()[2].price_label, "Rs.45.5");

    let cart = h.view.cart();
    assert!(cart.empty);
    assert_eq!(cart.total_label, "Total: Rs.0");
    assert_eq!(cart.badge_label, "🛒 Cart");
    assert_eq!(EMPTY_CART_MESSAGE, "Your cart is empty.");
}

#[tokio::test]
async fn test_pen_bag_example() {
    let h = ready().await;

    h.shop.add_to_cart(id(1)).await;
    h.shop.add_to_cart(id(1)).await;

    let items = h.shop.cart_store().get_cart();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id(), id(1));
    assert_eq!(items[0].qty, 2);
    assert_eq!(items[0].product.price, Money::from_units(10));

    let cart = h.view.cart();
    assert_eq!(cart.total_label, "Total: Rs.20");
    assert_eq!(cart.badge_label, "🛒 Cart (2)");
    assert_eq!(cart.item_count, 2);
    assert_eq!(cart.rows[0].line_total_label, "Rs.20");
}

#[tokio::test]
async fn test_add_new_product() {
    let h = ready().await;
    h.shop.add_to_cart(id(1)).await;
    h.shop.add_to_cart(id(2)).await;

    let items = h.shop.cart_store().get_cart();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1].id(), id(2));
    assert_eq!(items[1].qty, 1);

    let toast = h.view.last_toast().unwrap();
    assert_eq!(toast.text, "Bag added to cart!");
    assert_eq!(toast.kind, ToastKind::Success);
    assert_eq!(toast.duration_ms, 3000);
}

#[tokio::test]
async fn test_add_writes_record_with_fresh_expiry() {
    let h = ready().await;
    h.shop.add_to_cart(id(1)).await;

    let record = stored_record(&h.kv).unwrap();
    assert_eq!(
        record.expiry,
        (h.clock.now() + Duration::minutes(30)).timestamp_millis()
    );

    let raw: serde_json::Value =
        serde_json::from_str(&h.kv.get("cartData").unwrap().unwrap()).unwrap();
    assert_eq!(
        raw["cart"],
        serde_json::json!([{"id": 1, "name": "Pen", "price": 10, "image": "img/pen.png", "qty": 1}])
    );
}

#[tokio::test]
async fn test_add_unknown_id() {
    let h = ready().await;
    h.shop.add_to_cart(id(99)).await;

    assert!(h.kv.is_empty());
    let toast = h.view.last_toast().unwrap();
    assert_eq!(toast.text, PRODUCT_NOT_FOUND_MESSAGE);
    assert_eq!(toast.kind, ToastKind::Error);
}

#[tokio::test]
async fn test_add_respects_quantity_cap() {
    let h = ready().await;
    let pen = Product::new(1, "Pen", Money::from_units(10), "img/pen.png");
    let full = CartItem::new(pen, MAX_QUANTITY_PER_ITEM).unwrap();
    h.shop.cart_store().save_cart(&[full]).unwrap();

    h.shop.add_to_cart(id(1)).await;

    assert_eq!(h.shop.cart_store().get_cart()[0].qty, MAX_QUANTITY_PER_ITEM);
    let toast = h.view.last_toast().unwrap();
    assert_eq!(toast.text, "Cannot add more Pen.");
    assert_eq!(toast.kind, ToastKind::Error);
}

#[tokio::test]
async fn test_view_product_is_read_only() {
    let h = ready().await;
    h.shop.add_to_cart(id(1)).await;
    let before = h.kv.get("cartData").unwrap();

    h.clock.advance(Duration::minutes(10));
    h.shop.view_product(id(2)).await;

    assert_eq!(h.kv.get("cartData").unwrap(), before);
    let toast = h.view.last_toast().unwrap();
    assert_eq!(toast.text, "Name: Bag | Rs.500");
    assert_eq!(toast.kind, ToastKind::Info);
}

#[tokio::test]
async fn test_view_unknown_product() {
    let h = ready().await;
    h.shop.view_product(id(42)).await;

    assert_eq!(h.view.last_toast().unwrap().text, PRODUCT_NOT_FOUND_MESSAGE);
}

#[tokio::test]
async fn test_remove_item() {
    let h = ready().await;
    h.shop.add_to_cart(id(1)).await;
    h.shop.add_to_cart(id(2)).await;

    h.shop.remove_item(id(1));

    let items = h.shop.cart_store().get_cart();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id(), id(2));
    assert_eq!(h.view.cart().badge_label, "🛒 Cart (1)");

    let toast = h.view.last_toast().unwrap();
    assert_eq!(toast.text, ITEM_REMOVED_MESSAGE);
    assert_eq!(toast.kind, ToastKind::Error);
}

#[tokio::test]
async fn test_remove_last_item_shows_empty_cart() {
    let h = ready().await;
    h.shop.add_to_cart(id(2)).await;
    h.shop.remove_item(id(2));

    let cart = h.view.cart();
    assert!(cart.empty);
    assert_eq!(cart.badge_label, "🛒 Cart");
    assert_eq!(stored_record(&h.kv).unwrap().cart, Vec::new());
}

#[tokio::test]
async fn test_checkout_with_blank_fields() {
    let h = ready().await;
    h.shop.add_to_cart(id(1)).await;

    let order = h.shop.checkout(&CheckoutForm::new(" ", "", "\n"));

    assert!(order.is_none());
    assert_eq!(h.shop.cart_store().get_cart().len(), 1);
    assert!(h.view.confirmation.borrow().is_none());
    assert_eq!(h.view.form_resets.get(), 0);
    let toast = h.view.last_toast().unwrap();
    assert_eq!(toast.text, CHECKOUT_INVALID_MESSAGE);
    assert_eq!(toast.kind, ToastKind::Error);
}

#[tokio::test]
async fn test_checkout_with_one_missing_field() {
    let h = ready().await;
    h.shop.add_to_cart(id(1)).await;

    assert!(h
        .shop
        .checkout(&CheckoutForm::new("Asha", "12 Hill Rd", ""))
        .is_none());
    assert_eq!(h.shop.cart_store().get_cart().len(), 1);
}

#[tokio::test]
async fn test_checkout_success() {
    let h = ready().await;
    h.shop.add_to_cart(id(1)).await;
    h.shop.add_to_cart(id(2)).await;

    let order = h
        .shop
        .checkout(&CheckoutForm::new("  Asha ", "12 Hill Rd", "asha@example.com"))
        .unwrap();

    assert_eq!(order.items.len(), 2);
    assert_eq!(order.total, Money::from_units(510));
    assert!(h.kv.is_empty());
    assert!(h.shop.cart_store().get_cart().is_empty());
    assert_eq!(
        h.view.confirmation.borrow().as_deref(),
        Some("Thank you for your order, Asha!")
    );
    assert_eq!(h.view.form_resets.get(), 1);
    assert!(h.view.cart().empty);
}

#[tokio::test]
async fn test_search_is_case_insensitive() {
    let h = ready().await;

    h.shop.search("PEN");
    assert_eq!(h.view.grid_names(), ["Pen", "pencil"]);

    h.shop.search("   ");
    assert_eq!(h.view.grid_names().len(), 4);
}

#[tokio::test]
async fn test_search_and_sort_compose() {
    let h = ready().await;

    h.shop.sort("price-desc");
    assert_eq!(h.view.grid_names(), ["Bag", "Notebook", "Pen", "pencil"]);

    h.shop.search("pen");
    assert_eq!(h.view.grid_names(), ["Pen", "pencil"]);

    h.shop.sort("name-desc");
    assert_eq!(h.view.grid_names(), ["pencil", "Pen"]);

    h.shop.search("");
    assert_eq!(h.view.grid_names(), ["pencil", "Pen", "Notebook", "Bag"]);

    assert_eq!(h.shop.query().sort, SortOption::NameDesc);
}

#[tokio::test]
async fn test_query_is_kept_for_redrawn_controls() {
    let h = ready().await;
    h.shop.search("pen");
    h.shop.sort("price-desc");

    h.shop.add_to_cart(id(2)).await;
    h.shop.refresh_cart();

    let query = h.shop.query();
    assert_eq!(query.term, "pen");
    assert_eq!(query.sort, SortOption::PriceDesc);
    assert_eq!(h.view.grid_names(), ["Pen", "pencil"]);
}

#[tokio::test]
async fn test_price_sorts_are_reversed() {
    let h = ready().await;

    h.shop.sort("price-asc");
    let mut ascending = h.view.grid_names();
    h.shop.sort("price-desc");
    ascending.reverse();

    assert_eq!(h.view.grid_names(), ascending);
}

#[tokio::test]
async fn test_unknown_sort_restores_catalog_order() {
    let h = ready().await;

    h.shop.sort("name-asc");
    assert_eq!(h.view.grid_names(), ["Bag", "Notebook", "Pen", "pencil"]);

    h.shop.sort("bogus");
    assert_eq!(h.view.grid_names(), ["Pen", "Bag", "Notebook", "pencil"]);
}

#[tokio::test]
async fn test_search_before_catalog_loaded() {
    let h = harness_with(StorefrontConfig::default());

    h.shop.search("pen");
    assert_eq!(h.view.catalog_renders.get(), 0);
    assert!(h.shop.visible_products().is_empty());

    h.shop.init().await;
    assert_eq!(h.view.grid_names(), ["Pen", "pencil"]);
}

#[tokio::test]
async fn test_catalog_is_fetched_once_per_init() {
    let h = ready().await;

    h.shop.add_to_cart(id(1)).await;
    h.shop.view_product(id(2)).await;
    h.shop.add_to_cart(id(3)).await;
    assert_eq!(h.source.loads.get(), 1);

    h.shop.reload_catalog().await;
    assert_eq!(h.source.loads.get(), 2);
}

#[tokio::test]
async fn test_catalog_failure_leaves_page_usable() {
    let h = harness_with(StorefrontConfig::default());
    h.source.offline.set(true);

    h.shop.init().await;

    assert_eq!(h.view.catalog_renders.get(), 1);
    assert!(h.view.grid_names().is_empty());
    assert!(h.view.cart().empty);

    h.shop.add_to_cart(id(1)).await;
    assert!(h.kv.is_empty());
    assert!(h.view.toasts.borrow().is_empty());

    h.source.offline.set(false);
    h.shop.add_to_cart(id(1)).await;
    assert_eq!(h.shop.cart_store().get_cart().len(), 1);
}

#[tokio::test]
async fn test_expired_cart_is_gone_after_init() {
    let h = ready().await;
    h.shop.add_to_cart(id(1)).await;

    h.clock.advance(Duration::minutes(31));
    h.shop.init().await;

    assert!(h.view.cart().empty);
    assert!(h.kv.is_empty());
}

#[tokio::test]
async fn test_each_write_slides_expiry() {
    let h = ready().await;
    h.shop.add_to_cart(id(1)).await;

    h.clock.advance(Duration::minutes(20));
    h.shop.add_to_cart(id(1)).await;

    h.clock.advance(Duration::minutes(20));
    h.shop.refresh_cart();
    assert_eq!(h.view.cart().item_count, 2);

    h.clock.advance(Duration::minutes(11));
    h.shop.refresh_cart();
    assert!(h.view.cart().empty);
}

#[tokio::test]
async fn test_add_after_expiry_starts_fresh_cart() {
    let h = ready().await;
    h.shop.add_to_cart(id(2)).await;

    h.clock.advance(Duration::hours(1));
    h.shop.add_to_cart(id(1)).await;

    let items = h.shop.cart_store().get_cart();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id(), id(1));
}

#[tokio::test]
async fn test_custom_config() {
    let config = StorefrontConfig::new()
        .with_storage_key("shop:cart")
        .with_currency_label("$")
        .with_toast_duration_ms(1200)
        .with_cart_ttl_minutes(5);
    let h = harness_with(config);
    h.shop.init().await;

    h.shop.add_to_cart(id(3)).await;

    assert!(h.kv.exists("shop:cart").unwrap());
    assert_eq!(h.view.cart().total_label, "Total: $45.5");
    assert_eq!(h.view.last_toast().unwrap().duration_ms, 1200);

    h.clock.advance(Duration::minutes(6));
    h.shop.refresh_cart();
    assert!(h.view.cart().empty);
}

#[test]
fn test_invalid_config_is_rejected() {
    let result = Storefront::new(
        StorefrontConfig::new().with_cart_ttl_minutes(0),
        StaticCatalogSource::default(),
        MemoryStore::new(),
        ManualClock::default(),
        RecordingView::default(),
    );
    assert!(matches!(result, Err(StorefrontError::Config(_))));
}

#[test]
fn test_unrepresentable_ttl_is_rejected() {
    for minutes in [i64::MAX, 200_000_000_000] {
        let result = Storefront::new(
            StorefrontConfig::new().with_cart_ttl_minutes(minutes),
            StaticCatalogSource::default(),
            MemoryStore::new(),
            ManualClock::default(),
            RecordingView::default(),
        );
        assert!(matches!(
            result,
            Err(StorefrontError::Config(ConfigError::Invalid {
                field: "cart_ttl_minutes",
                ..
            }))
        ));
    }
}

#[tokio::test]
async fn test_longest_ttl_still_saves() {
    let config = StorefrontConfig::new().with_cart_ttl_minutes(MAX_CART_TTL_MINUTES);
    let h = harness_with(config);
    h.shop.init().await;

    h.shop.add_to_cart(id(1)).await;

    let record = stored_record(&h.kv).unwrap();
    assert_eq!(
        record.expiry,
        (h.clock.now() + Duration::days(365)).timestamp_millis()
    );
}

#[tokio::test]
async fn test_unpriceable_cart_blocks_checkout_but_keeps_badge() {
    let h = harness_with_catalog(
        StorefrontConfig::default(),
        r#"[{"id": 1, "name": "Vault", "price": 50000000000000000, "image": "img/vault.png"}]"#,
    );
    h.shop.init().await;

    h.shop.add_to_cart(id(1)).await;
    h.shop.add_to_cart(id(1)).await;

    let table = h.view.cart();
    assert!(!table.priced);
    assert_eq!(table.badge_label, "🛒 Cart (2)");
    assert_eq!(table.rows[0].qty, 2);
    assert_eq!(table.total_label, format!("Total: {UNPRICED_LABEL}"));

    let order = h
        .shop
        .checkout(&CheckoutForm::new("Asha", "12 Hill Rd", "asha@example.com"));

    assert!(order.is_none());
    let toast = h.view.last_toast().unwrap();
    assert_eq!(toast.text, CHECKOUT_FAILED_MESSAGE);
    assert_eq!(toast.kind, ToastKind::Error);
    assert_eq!(h.shop.cart_store().get_cart()[0].qty, 2);
    assert!(h.view.confirmation.borrow().is_none());
    assert_eq!(h.view.form_resets.get(), 0);
}

#[tokio::test]
async fn test_cart_table_accessor() {
    let h = ready().await;
    h.shop.add_to_cart(id(3)).await;
    h.shop.add_to_cart(id(3)).await;

    let table = h.shop.cart_table();
    assert_eq!(table.rows[0].unit_price_label, "Rs.45.5");
    assert_eq!(table.total_label, "Total: Rs.91");
}
