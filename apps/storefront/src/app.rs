//! Application components and pages.

use std::rc::Rc;

use anyhow::{anyhow, Context};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;
use shopfront_cache::{KvStore, MemoryStore, SystemClock};
use shopfront_commerce::{CheckoutForm, SortOption};
use shopfront_core::{
    CartRow, HttpCatalogSource, ProductCard, Storefront, StorefrontConfig, CART_COLUMNS,
    EMPTY_CART_MESSAGE,
};

use crate::page::{AppStorefront, PageState, PageView, Shop};

// ============================================================================
// Setup
// ============================================================================

fn build_storefront(config: StorefrontConfig, page: PageState) -> anyhow::Result<AppStorefront> {
    let page_url = window()
        .location()
        .href()
        .map_err(|e| anyhow!("cannot read page URL: {e:?}"))?;
    let source = HttpCatalogSource::resolve(&page_url, &config.catalog_url)
        .context("catalog location is invalid")?;

    Storefront::new(
        config,
        source,
        open_cart_storage(),
        SystemClock,
        PageView(page),
    )
    .context("storefront configuration rejected")
}

fn open_cart_storage() -> Rc<dyn KvStore> {
    #[cfg(target_arch = "wasm32")]
    {
        match shopfront_cache::LocalStorage::open() {
            Ok(store) => return Rc::new(store),
            Err(e) => tracing::warn!(error = %e, "localStorage unavailable, cart will not persist"),
        }
    }
    Rc::new(MemoryStore::new())
}

// ============================================================================
// App Component
// ============================================================================

#[component]
pub fn App(config: StorefrontConfig) -> impl IntoView {
    provide_meta_context();

    let page = PageState::new(&config.currency_label);
    let storefront = match build_storefront(config, page) {
        Ok(storefront) => Rc::new(storefront),
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "storefront failed to start");
            return view! {
                <p class="error">"The shop is unavailable right now."</p>
            }
            .into_any();
        }
    };

    let init = Rc::clone(&storefront);
    leptos::task::spawn_local(async move { init.init().await });
    let shop = Shop::new(storefront);

    view! {
        <Meta name="description" content="Shopfront - browse, add to cart, check out"/>
        <Title text="Shopfront"/>

        <Router>
            <Header page/>
            <main>
                <Routes fallback=|| view! { <NotFound/> }>
                    <Route path=path!("") view=move || view! { <HomePage page shop/> }/>
                    <Route path=path!("/cart") view=move || view! { <CartPage page shop/> }/>
                </Routes>
            </main>
            <Toasts page/>
        </Router>
    }
    .into_any()
}

// ============================================================================
// Layout Components
// ============================================================================

#[component]
fn Header(page: PageState) -> impl IntoView {
    view! {
        <header>
            <h1>"Shopfront"</h1>
            <nav>
                <a href="/">"Home"</a>
                <a id="cart-link" href="/cart">
                    {move || page.cart.with(|table| table.badge_label.clone())}
                </a>
            </nav>
        </header>
    }
}

#[component]
fn Toasts(page: PageState) -> impl IntoView {
    view! {
        <div class="toasts">
            {move || {
                page.toasts
                    .get()
                    .into_iter()
                    .map(|shown| {
                        let id = shown.id;
                        let kind = shown.toast.kind;
                        view! {
                            <div
                                class=format!("toast toast-{}", kind.as_str())
                                style=format!("background: {};", kind.background())
                            >
                                <span>{shown.toast.text}</span>
                                <button class="toast-close" on:click=move |_| page.dismiss(id)>
                                    "✖"
                                </button>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div style="text-align: center; padding: 4rem;">
            <h1>"404"</h1>
            <p>"Page not found"</p>
            <a href="/">"Back to the shop"</a>
        </div>
    }
}

// ============================================================================
// Pages
// ============================================================================

/// Product grid with search and sort.
#[component]
fn HomePage(page: PageState, shop: Shop) -> impl IntoView {
    // The route remounts on every visit; start the controls from the live query.
    let query = shop.query();
    let current_sort = query.sort;

    view! {
        <section class="controls">
            <input
                id="searchInput"
                type="search"
                placeholder="Search products..."
                prop:value=query.term
                on:input=move |ev| shop.run(|s| s.search(&event_target_value(&ev)))
            />
            <select
                id="sortSelect"
                on:change=move |ev| shop.run(|s| s.sort(&event_target_value(&ev)))
            >
                {SortOption::ALL
                    .iter()
                    .map(|option| {
                        view! {
                            <option value=option.as_str() selected=*option == current_sort>
                                {option.display_name()}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </section>

        <div id="product-list" class="product-list">
            {move || {
                page.cards
                    .get()
                    .into_iter()
                    .map(|card| view! { <ProductTile card shop/> })
                    .collect_view()
            }}
        </div>
    }
}

/// Cart table and checkout.
#[component]
fn CartPage(page: PageState, shop: Shop) -> impl IntoView {
    // Storage may have changed (or expired) since the last render.
    Effect::new(move |_| shop.run(|s| s.refresh_cart()));

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let form = CheckoutForm::new(
            page.name.get_untracked(),
            page.address.get_untracked(),
            page.email.get_untracked(),
        );
        shop.run(|s| {
            s.checkout(&form);
        });
    };

    view! {
        <h2>"Your Cart"</h2>
        <table id="cart-items">
            <thead>
                <tr>
                    <th>"Product"</th>
                    <th>"Qty"</th>
                    <th>"Price"</th>
                    <th>"Subtotal"</th>
                    <th></th>
                </tr>
            </thead>
            <tbody>
                {move || {
                    let table = page.cart.get();
                    if table.empty {
                        view! {
                            <tr>
                                <td colspan=CART_COLUMNS.to_string()>{EMPTY_CART_MESSAGE}</td>
                            </tr>
                        }
                        .into_any()
                    } else {
                        table
                            .rows
                            .into_iter()
                            .map(|row| view! { <CartLine row shop/> })
                            .collect_view()
                            .into_any()
                    }
                }}
            </tbody>
        </table>
        <p id="total">{move || page.cart.with(|table| table.total_label.clone())}</p>

        <form id="checkoutForm" on:submit=on_submit>
            <input
                id="name"
                type="text"
                placeholder="Full name"
                prop:value=move || page.name.get()
                on:input=move |ev| page.name.set(event_target_value(&ev))
            />
            <input
                id="address"
                type="text"
                placeholder="Address"
                prop:value=move || page.address.get()
                on:input=move |ev| page.address.set(event_target_value(&ev))
            />
            <input
                id="email"
                type="email"
                placeholder="Email"
                prop:value=move || page.email.get()
                on:input=move |ev| page.email.set(event_target_value(&ev))
            />
            <button type="submit">"Place Order"</button>
        </form>

        <div id="confirmation">
            {move || page.confirmation.get().map(|message| view! { <h2>{message}</h2> })}
        </div>
    }
}

// ============================================================================
// Product Components
// ============================================================================

#[component]
fn ProductTile(card: ProductCard, shop: Shop) -> impl IntoView {
    let id = card.id;

    view! {
        <div class="product">
            <img
                src=card.image
                alt=card.alt
                on:click=move |_| shop.spawn(move |s| async move { s.view_product(id).await })
            />
            <h3>{card.name}</h3>
            <p>{card.price_label}</p>
            <button on:click=move |_| shop.spawn(move |s| async move { s.add_to_cart(id).await })>
                "Add to Cart"
            </button>
        </div>
    }
}

// ============================================================================
// Cart Components
// ============================================================================

#[component]
fn CartLine(row: CartRow, shop: Shop) -> impl IntoView {
    let id = row.id;

    view! {
        <tr>
            <td>{row.name}</td>
            <td>{row.qty}</td>
            <td>{row.unit_price_label}</td>
            <td>{row.line_total_label}</td>
            <td>
                <button on:click=move |_| shop.run(|s| s.remove_item(id))>"Remove"</button>
            </td>
        </tr>
    }
}
