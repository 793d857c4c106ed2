//! Shopfront storefront page
//!
//! Client-side rendered Leptos app over `shopfront-core`:
//! - `/` product grid with search and sort
//! - `/cart` cart table and checkout form
//!
//! Settings are read from `storefront.toml`, embedded at compile time.

mod app;
mod page;

use anyhow::Context;
use leptos::prelude::*;
use shopfront_core::StorefrontConfig;

pub use app::App;

const STOREFRONT_TOML: &str = include_str!("../storefront.toml");

fn load_config() -> anyhow::Result<StorefrontConfig> {
    StorefrontConfig::from_toml_str(STOREFRONT_TOML).context("embedded storefront.toml is invalid")
}

/// Install logging and mount the app on `<body>`.
pub fn start() {
    console_error_panic_hook::set_once();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            leptos::logging::error!("{e:#}");
            StorefrontConfig::default()
        }
    };

    if let Err(e) = shopfront_observability::init(&config.log_config()) {
        leptos::logging::warn!("logging disabled: {e}");
    }

    leptos::mount::mount_to_body(move || view! { <App config/> });
}
