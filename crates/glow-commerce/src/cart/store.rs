//! Persistent cart state container.

use glow_cache::{Cache, KvStore};

use crate::cart::{Cart, LineItem, QuantityChange};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;

/// Storage key the cart is saved under.
pub const DEFAULT_CART_KEY: &str = "glowlab-cart";

/// Owns the cart for one page session and mirrors it to storage.
///
/// Restores on construction and rewrites the full item list after every
/// mutation that changed something. Storage failures are logged and
/// never surface as errors; the in-memory cart stays authoritative for
/// the rest of the session.
#[derive(Debug)]
pub struct CartStore<S: KvStore> {
    cart: Cart,
    cache: Cache<S>,
    key: String,
}

impl<S: KvStore> CartStore<S> {
    /// Open the cart saved under [`DEFAULT_CART_KEY`].
    pub fn open(store: S) -> Self {
        Self::open_with_key(store, DEFAULT_CART_KEY)
    }

    /// Open the cart saved under `key`.
    ///
    /// A missing or unreadable entry yields an empty cart.
    pub fn open_with_key(store: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let cache = Cache::new(store);

        let cart = match cache.get::<Vec<LineItem>>(&key) {
            Ok(Some(items)) => Cart::from_items(items),
            Ok(None) => Cart::new(),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "discarding unreadable saved cart");
                Cart::new()
            }
        };

        if !cart.is_empty() {
            tracing::info!(items = cart.unique_item_count(), "cart restored from previous session");
        }

        Self { cart, cache, key }
    }

    /// Add an item, or increase its quantity if already present.
    ///
    /// Returns the line's resulting quantity.
    pub fn add_item(
        &mut self,
        id: impl Into<ProductId>,
        name: impl Into<String>,
        unit_price: Money,
        quantity: i64,
    ) -> Result<i64, CommerceError> {
        let id = id.into();
        let new_quantity = self
            .cart
            .add_item(id.clone(), name, unit_price, quantity)?;
        tracing::debug!(product_id = %id, quantity = new_quantity, "item added");
        self.save();
        Ok(new_quantity)
    }

    /// Remove an item. Removing an absent id is a silent no-op.
    pub fn remove_item(&mut self, id: &ProductId) -> bool {
        let removed = self.cart.remove_item(id);
        if removed {
            tracing::debug!(product_id = %id, "item removed");
            self.save();
        }
        removed
    }

    /// Overwrite an item's quantity; zero or below removes the line.
    pub fn set_quantity(
        &mut self,
        id: &ProductId,
        quantity: i64,
    ) -> Result<QuantityChange, CommerceError> {
        let change = self.cart.set_quantity(id, quantity)?;
        if change != QuantityChange::NotInCart {
            tracing::debug!(product_id = %id, ?change, "quantity changed");
            self.save();
        }
        Ok(change)
    }

    /// Empty the cart. Does nothing when it is already empty.
    pub fn clear(&mut self) -> bool {
        let cleared = self.cart.clear();
        if cleared {
            tracing::debug!("cart cleared");
            self.save();
        }
        cleared
    }

    /// Sum of unit price times quantity; zero for an empty cart.
    ///
    /// Saturates instead of failing on overflow.
    pub fn get_total(&self) -> Money {
        self.cart.total().unwrap_or(Money::new(i64::MAX))
    }

    /// Total number of units across lines.
    pub fn item_count(&self) -> i64 {
        self.cart.item_count()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Get an item by product ID.
    pub fn get_item(&self, id: &ProductId) -> Option<&LineItem> {
        self.cart.get_item(id)
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    /// Borrow the cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Storage key in use.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// End the session and hand back the storage medium.
    pub fn into_store(self) -> S {
        self.cache.into_inner()
    }

    fn save(&mut self) {
        if let Err(e) = self.cache.set(&self.key, &self.cart) {
            tracing::warn!(key = %self.key, error = %e, "failed to persist cart");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glow_cache::{CacheError, MemoryStore};

    fn price(amount: f64) -> Money {
        Money::from_decimal(amount)
    }

    /// Store whose writes always fail.
    #[derive(Debug, Default)]
    struct ReadOnlyStore;

    impl KvStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), CacheError> {
            Err(CacheError::Write("quota exceeded".into()))
        }

        fn delete(&mut self, _key: &str) -> Result<(), CacheError> {
            Ok(())
        }
    }

    #[test]
    fn test_first_visit_is_empty() {
        let store = CartStore::open(MemoryStore::new());
        assert!(store.is_empty());
        assert_eq!(store.get_total(), Money::zero());
    }

    #[test]
    fn test_corrupt_state_is_empty() {
        let store = CartStore::open(MemoryStore::with_entry(DEFAULT_CART_KEY, "{oops"));
        assert!(store.is_empty());

        let store = CartStore::open(MemoryStore::with_entry(DEFAULT_CART_KEY, r#"{"id": 1}"#));
        assert!(store.is_empty());
    }

    #[test]
    fn test_null_fields_do_not_wipe_cart() {
        let saved = r#"[
            {"id": "s1", "name": "Serum", "price": 250, "quantity": 1},
            {"id": "s2", "name": "Cream", "price": null, "quantity": 2},
            {"id": "s3", "name": "Toner", "price": 90, "quantity": null}
        ]"#;
        let store = CartStore::open(MemoryStore::with_entry(DEFAULT_CART_KEY, saved));

        let ids: Vec<_> = store.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["s1", "s2"]);
        assert_eq!(store.get_item(&ProductId::new("s2")).unwrap().unit_price, Money::zero());
        assert_eq!(store.get_total(), Money::new(25000));
    }

    #[test]
    fn test_basic_flow_total() {
        let mut store = CartStore::open(MemoryStore::new());
        store.add_item("s1", "Serum", price(250.0), 1).unwrap();
        store.add_item("s2", "Cream", price(150.0), 2).unwrap();

        assert_eq!(store.get_total(), price(550.0));
        assert_eq!(store.get_total().display_amount(), "550.00");
        assert_eq!(store.item_count(), 3);
    }

    #[test]
    fn test_every_mutation_persists() {
        let mut store = CartStore::open(MemoryStore::new());
        store.add_item("s1", "Serum", price(250.0), 1).unwrap();

        let saved = store.into_store();
        assert_eq!(
            saved.get(DEFAULT_CART_KEY).unwrap().as_deref(),
            Some(r#"[{"id":"s1","name":"Serum","price":250.0,"quantity":1}]"#)
        );

        let mut store = CartStore::open(saved);
        store.set_quantity(&ProductId::new("s1"), 4).unwrap();
        let mut store = CartStore::open(store.into_store());
        assert_eq!(store.item_count(), 4);

        store.clear();
        let saved = store.into_store();
        assert_eq!(saved.get(DEFAULT_CART_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_round_trip_preserves_order_and_fields() {
        let mut store = CartStore::open(MemoryStore::new());
        store.add_item("b", "Toner", price(99.95), 3).unwrap();
        store.add_item("a", "Mask", price(1200.0), 1).unwrap();
        let before = store.items().to_vec();

        let restored = CartStore::open(store.into_store());
        assert_eq!(restored.items(), before.as_slice());
    }

    #[test]
    fn test_noop_mutations_do_not_write() {
        let mut store = CartStore::open(MemoryStore::new());
        assert!(!store.clear());
        assert!(!store.remove_item(&ProductId::new("ghost")));
        assert_eq!(
            store.set_quantity(&ProductId::new("ghost"), 2).unwrap(),
            QuantityChange::NotInCart
        );
        assert!(store.into_store().is_empty());
    }

    #[test]
    fn test_failed_add_leaves_storage_untouched() {
        let mut store = CartStore::open(MemoryStore::new());
        assert!(store.add_item("s1", "Serum", price(10.0), 0).is_err());
        assert!(store.into_store().is_empty());
    }

    #[test]
    fn test_write_failure_is_not_fatal() {
        let mut store = CartStore::open(ReadOnlyStore);
        store.add_item("s1", "Serum", price(250.0), 1).unwrap();
        assert_eq!(store.item_count(), 1);
    }

    #[test]
    fn test_custom_key() {
        let mut store = CartStore::open_with_key(MemoryStore::new(), "other-cart");
        store.add_item("s1", "Serum", price(1.0), 1).unwrap();
        assert_eq!(store.key(), "other-cart");

        let saved = store.into_store();
        assert!(saved.exists("other-cart").unwrap());
        assert!(!saved.exists(DEFAULT_CART_KEY).unwrap());
    }
}
