//! Catalog loading and the in-memory catalog cache.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use shopfront_commerce::{dedupe_products, Product};
use url::Url;

use crate::error::CatalogError;

/// Something that can produce the full product catalog.
///
/// Futures are `!Send`: in the browser they run on the page's single thread.
#[async_trait(?Send)]
pub trait CatalogSource {
    /// Fetch and parse the catalog.
    async fn load(&self) -> Result<Vec<Product>, CatalogError>;

    /// Where the catalog comes from, for log lines.
    fn location(&self) -> String;
}

#[async_trait(?Send)]
impl<T: CatalogSource + ?Sized> CatalogSource for Rc<T> {
    async fn load(&self) -> Result<Vec<Product>, CatalogError> {
        (**self).load().await
    }

    fn location(&self) -> String {
        (**self).location()
    }
}

/// Fetches the catalog JSON over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    client: reqwest::Client,
    url: Url,
}

impl HttpCatalogSource {
    /// Create a source for an absolute URL.
    pub fn new(url: &str) -> Result<Self, CatalogError> {
        let url = Url::parse(url).map_err(|e| CatalogError::InvalidUrl(format!("{url}: {e}")))?;
        Ok(Self::from_url(url))
    }

    /// Create a source for `path` resolved against `base`, usually the page
    /// URL. Absolute paths ignore the base.
    pub fn resolve(base: &str, path: &str) -> Result<Self, CatalogError> {
        let base =
            Url::parse(base).map_err(|e| CatalogError::InvalidUrl(format!("{base}: {e}")))?;
        let url = base
            .join(path)
            .map_err(|e| CatalogError::InvalidUrl(format!("{path}: {e}")))?;
        Ok(Self::from_url(url))
    }

    fn from_url(url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }

    /// Resolved catalog URL.
    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait(?Send)]
impl CatalogSource for HttpCatalogSource {
    async fn load(&self) -> Result<Vec<Product>, CatalogError> {
        let url = self.url.to_string();
        let unavailable = |reason: String| CatalogError::Unavailable {
            url: url.clone(),
            reason,
        };

        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| unavailable(e.to_string()))?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(unavailable(format!("HTTP {}", status.as_u16())));
        }

        let body = response
            .text()
            .await
            .map_err(|e| unavailable(e.to_string()))?;

        parse_catalog(&url, &body)
    }

    fn location(&self) -> String {
        self.url.to_string()
    }
}

/// A fixed catalog held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalogSource {
    products: Vec<Product>,
}

impl StaticCatalogSource {
    /// Serve `products` as the catalog.
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Parse a catalog document.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(Self::new(parse_catalog("inline", json)?))
    }
}

#[async_trait(?Send)]
impl CatalogSource for StaticCatalogSource {
    async fn load(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.clone())
    }

    fn location(&self) -> String {
        "static".to_string()
    }
}

fn parse_catalog(url: &str, body: &str) -> Result<Vec<Product>, CatalogError> {
    serde_json::from_str(body).map_err(|e| CatalogError::Parse {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

/// Holds the last successfully loaded catalog.
///
/// The catalog is fetched on first use and then served from memory until
/// [`CatalogCache::reload`] or [`CatalogCache::invalidate`]. No borrow of the
/// cached slot is held across an await, so handlers may interleave freely.
pub struct CatalogCache {
    source: Box<dyn CatalogSource>,
    products: RefCell<Option<Rc<[Product]>>>,
}

impl CatalogCache {
    /// Create an empty cache over `source`.
    pub fn new(source: impl CatalogSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            products: RefCell::new(None),
        }
    }

    /// The cached catalog, loading it first if needed.
    pub async fn products(&self) -> Result<Rc<[Product]>, CatalogError> {
        if let Some(products) = self.cached() {
            tracing::debug!(products = products.len(), "catalog cache hit");
            return Ok(products);
        }
        self.reload().await
    }

    /// The cached catalog without loading.
    pub fn cached(&self) -> Option<Rc<[Product]>> {
        self.products.borrow().clone()
    }

    /// Drop the cached catalog and fetch it again.
    ///
    /// On failure the cache is left empty.
    pub async fn reload(&self) -> Result<Rc<[Product]>, CatalogError> {
        self.invalidate();

        let loaded = self.source.load().await?;
        let (products, dropped) = dedupe_products(loaded);
        if !dropped.is_empty() {
            let ids: Vec<String> = dropped.iter().map(ToString::to_string).collect();
            tracing::warn!(
                url = %self.source.location(),
                dropped = %ids.join(","),
                "catalog has duplicate product ids, keeping first occurrence"
            );
        }

        let products: Rc<[Product]> = products.into();
        tracing::debug!(url = %self.source.location(), products = products.len(), "catalog loaded");
        *self.products.borrow_mut() = Some(Rc::clone(&products));
        Ok(products)
    }

    /// Forget the cached catalog.
    pub fn invalidate(&self) {
        self.products.borrow_mut().take();
    }

    /// Where the catalog comes from.
    pub fn location(&self) -> String {
        self.source.location()
    }
}
