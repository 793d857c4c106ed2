//! The persisted cart record with sliding expiry.

use crate::{Cache, CacheError, Clock, KvStore};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use shopfront_commerce::{Cart, CartItem};

/// Storage key of the cart record.
pub const DEFAULT_CART_KEY: &str = "cartData";

/// Minutes a cart stays alive after its last write.
pub const DEFAULT_CART_TTL_MINUTES: i64 = 30;

/// The cart as stored: `{ "cart": [...], "expiry": <epoch millis> }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartRecord {
    /// Cart lines in insertion order.
    pub cart: Vec<CartItem>,
    /// Expiry instant in milliseconds since the Unix epoch.
    pub expiry: i64,
}

impl CartRecord {
    /// Whether the record is dead at `now`. A record is still live at the
    /// exact expiry instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp_millis() > self.expiry
    }
}

/// Reads and writes the single cart record.
///
/// Expiry is checked lazily: only [`CartStore::get_cart`] notices that a
/// record has lapsed, and it deletes the record when it does. Every write
/// pushes the expiry to `now + ttl`.
pub struct CartStore<S, C> {
    cache: Cache<S>,
    clock: C,
    key: String,
    ttl: Duration,
}

impl<S: KvStore, C: Clock> CartStore<S, C> {
    /// Create a store with the default key and a 30 minute ttl.
    pub fn new(store: S, clock: C) -> Self {
        Self {
            cache: Cache::new(store),
            clock,
            key: DEFAULT_CART_KEY.to_string(),
            ttl: Duration::minutes(DEFAULT_CART_TTL_MINUTES),
        }
    }

    /// Use a different storage key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Use a different expiry window.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Storage key in use.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Expiry window in use.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Read the cart.
    ///
    /// Returns an empty cart when there is no record, when the record has
    /// expired, or when it is malformed. Expired and malformed records are
    /// deleted. Storage failures are logged and also read as empty.
    pub fn get_cart(&self) -> Vec<CartItem> {
        match self.load() {
            Ok(Some(items)) => items,
            Ok(None) => Vec::new(),
            Err(CacheError::MalformedRecord(reason)) => {
                tracing::warn!(key = %self.key, %reason, "discarding malformed cart record");
                if let Err(e) = self.cache.delete(&self.key) {
                    tracing::error!(key = %self.key, error = %e, "failed to delete cart record");
                }
                Vec::new()
            }
            Err(e) => {
                tracing::error!(key = %self.key, error = %e, "failed to read cart record");
                Vec::new()
            }
        }
    }

    fn load(&self) -> Result<Option<Vec<CartItem>>, CacheError> {
        let record: CartRecord = match self.cache.get(&self.key) {
            Ok(Some(record)) => record,
            Ok(None) => return Ok(None),
            Err(CacheError::SerializeError(e)) => {
                return Err(CacheError::MalformedRecord(e.to_string()))
            }
            Err(e) => return Err(e),
        };

        if record.is_expired_at(self.clock.now()) {
            tracing::debug!(key = %self.key, expiry = record.expiry, "cart record expired");
            self.cache.delete(&self.key)?;
            return Ok(None);
        }

        let cart =
            Cart::from_items(record.cart).map_err(|e| CacheError::MalformedRecord(e.to_string()))?;
        Ok(Some(cart.into_items()))
    }

    /// Replace the stored cart with `items` and restart the expiry window.
    ///
    /// Fails without writing if `now + ttl` is not a representable instant.
    pub fn save_cart(&self, items: &[CartItem]) -> Result<(), CacheError> {
        let now = self.clock.now();
        let expiry = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| CacheError::ExpiryOutOfRange(format!("{} + {}", now, self.ttl)))?
            .timestamp_millis();
        let record = CartRecord {
            cart: items.to_vec(),
            expiry,
        };
        self.cache.set(&self.key, &record)?;
        tracing::debug!(key = %self.key, items = items.len(), expiry, "cart saved");
        Ok(())
    }

    /// Delete the cart record unconditionally.
    pub fn clear_cart(&self) -> Result<(), CacheError> {
        self.cache.delete(&self.key)
    }

    /// Expiry of the stored record, if one exists and parses.
    ///
    /// Does not check or clean up expiry.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let record = self.cache.get::<CartRecord>(&self.key).ok()??;
        DateTime::from_timestamp_millis(record.expiry)
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ManualClock, MemoryStore};
    use shopfront_commerce::{Money, Product};
    use std::rc::Rc;

    type TestStore = CartStore<Rc<MemoryStore>, Rc<ManualClock>>;

    fn setup() -> (TestStore, Rc<MemoryStore>, Rc<ManualClock>) {
        let kv = Rc::new(MemoryStore::new());
        let clock = Rc::new(ManualClock::default());
        let store = CartStore::new(Rc::clone(&kv), Rc::clone(&clock));
        (store, kv, clock)
    }

    fn pen_line(qty: u32) -> CartItem {
        let pen = Product::new(1, "Pen", Money::from_units(10), "pen.png");
        CartItem::new(pen, qty).unwrap()
    }

    #[test]
    fn test_missing_record_reads_empty() {
        let (store, _, _) = setup();
        assert!(store.get_cart().is_empty());
    }

    #[test]
    fn test_save_then_get() {
        let (store, _, _) = setup();
        store.save_cart(&[pen_line(2)]).unwrap();

        assert_eq!(store.get_cart(), vec![pen_line(2)]);
    }

    #[test]
    fn test_record_json_shape() {
        let (store, kv, clock) = setup();
        store.save_cart(&[pen_line(1)]).unwrap();

        let raw = kv.get(DEFAULT_CART_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let expected_expiry = (clock.now() + Duration::minutes(30)).timestamp_millis();
        assert_eq!(
            value,
            serde_json::json!({
                "cart": [{"id": 1, "name": "Pen", "price": 10, "image": "pen.png", "qty": 1}],
                "expiry": expected_expiry,
            })
        );
    }

    #[test]
    fn test_expired_record_is_deleted_on_read() {
        let (store, kv, clock) = setup();
        store.save_cart(&[pen_line(1)]).unwrap();

        clock.advance(Duration::minutes(30) + Duration::milliseconds(1));
        assert!(store.get_cart().is_empty());
        assert_eq!(kv.get(DEFAULT_CART_KEY).unwrap(), None);
    }

    #[test]
    fn test_record_live_at_exact_expiry() {
        let (store, _, clock) = setup();
        store.save_cart(&[pen_line(1)]).unwrap();

        clock.advance(Duration::minutes(30));
        assert_eq!(store.get_cart().len(), 1);
    }

    #[test]
    fn test_expiry_is_lazy() {
        let (store, kv, clock) = setup();
        store.save_cart(&[pen_line(1)]).unwrap();

        clock.advance(Duration::hours(2));
        // Nothing has read the record yet, so it is still stored.
        assert!(kv.exists(DEFAULT_CART_KEY).unwrap());
        assert!(store.get_cart().is_empty());
        assert!(!kv.exists(DEFAULT_CART_KEY).unwrap());
    }

    #[test]
    fn test_save_slides_expiry() {
        let (store, _, clock) = setup();
        store.save_cart(&[pen_line(1)]).unwrap();

        clock.advance(Duration::minutes(20));
        store.save_cart(&[pen_line(2)]).unwrap();
        assert_eq!(
            store.expires_at(),
            Some(clock.now() + Duration::minutes(30))
        );

        clock.advance(Duration::minutes(20));
        assert_eq!(store.get_cart(), vec![pen_line(2)]);
    }

    #[test]
    fn test_save_resets_expiry_even_when_later_was_stored() {
        let (store, kv, clock) = setup();
        let far = CartRecord {
            cart: vec![pen_line(1)],
            expiry: (clock.now() + Duration::days(7)).timestamp_millis(),
        };
        kv.set(DEFAULT_CART_KEY, &serde_json::to_string(&far).unwrap())
            .unwrap();

        store.save_cart(&[pen_line(1)]).unwrap();
        assert_eq!(
            store.expires_at(),
            Some(clock.now() + Duration::minutes(30))
        );
    }

    #[test]
    fn test_unparsable_record_is_discarded() {
        let (store, kv, _) = setup();
        kv.set(DEFAULT_CART_KEY, "{\"cart\": 5").unwrap();

        assert!(store.get_cart().is_empty());
        assert_eq!(kv.get(DEFAULT_CART_KEY).unwrap(), None);
    }

    #[test]
    fn test_record_with_duplicate_ids_is_discarded() {
        let (store, kv, clock) = setup();
        let record = CartRecord {
            cart: vec![pen_line(1), pen_line(3)],
            expiry: (clock.now() + Duration::minutes(5)).timestamp_millis(),
        };
        kv.set(DEFAULT_CART_KEY, &serde_json::to_string(&record).unwrap())
            .unwrap();

        assert!(store.get_cart().is_empty());
        assert!(!kv.exists(DEFAULT_CART_KEY).unwrap());
    }

    #[test]
    fn test_clear_cart() {
        let (store, kv, _) = setup();
        store.save_cart(&[pen_line(1)]).unwrap();

        store.clear_cart().unwrap();
        assert!(kv.is_empty());
        assert!(store.get_cart().is_empty());
        store.clear_cart().unwrap();
    }

    #[test]
    fn test_save_with_unrepresentable_expiry_fails() {
        let kv = Rc::new(MemoryStore::new());
        let clock = Rc::new(ManualClock::default());
        let store = CartStore::new(Rc::clone(&kv), Rc::clone(&clock))
            .with_ttl(Duration::days(200_000_000));

        let err = store.save_cart(&[pen_line(1)]).unwrap_err();
        assert!(matches!(err, CacheError::ExpiryOutOfRange(_)));
        assert!(kv.is_empty());
    }

    #[test]
    fn test_custom_key_and_ttl() {
        let kv = Rc::new(MemoryStore::new());
        let clock = Rc::new(ManualClock::default());
        let store = CartStore::new(Rc::clone(&kv), Rc::clone(&clock))
            .with_key("shop:cart")
            .with_ttl(Duration::minutes(1));

        store.save_cart(&[pen_line(1)]).unwrap();
        assert!(kv.exists("shop:cart").unwrap());

        clock.advance(Duration::minutes(2));
        assert!(store.get_cart().is_empty());
    }
}
