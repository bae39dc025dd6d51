//! Typed wrapper with automatic serialization.

use crate::{CacheError, KvStore};
use serde::{de::DeserializeOwned, Serialize};

/// Type-safe cache backed by a [`KvStore`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
#[derive(Debug, Clone, Default)]
pub struct Cache<S> {
    store: S,
}

impl<S: KvStore> Cache<S> {
    /// Wrap a raw store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist, and an error if the stored
    /// text is not valid JSON for `T`.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use glow_cache::{Cache, MemoryStore};
    /// let cache = Cache::new(MemoryStore::with_entry("count", "3"));
    /// let count: Option<u32> = cache.get("count").unwrap();
    /// assert_eq!(count, Some(3));
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key)? {
            Some(text) => {
                let value: T = serde_json::from_str(&text)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value in the cache, replacing whatever was stored.
    pub fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), CacheError> {
        let text = serde_json::to_string(value)?;
        self.store.set(key, &text)
    }

    /// Delete a value from the cache.
    pub fn delete(&mut self, key: &str) -> Result<(), CacheError> {
        self.store.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.store.exists(key)
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the cache and return the underlying store.
    pub fn into_inner(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Entry {
        id: String,
        quantity: i64,
    }

    #[test]
    fn test_set_then_get() {
        let mut cache = Cache::new(MemoryStore::new());
        let entries = vec![Entry {
            id: "s1".into(),
            quantity: 2,
        }];

        cache.set("cart", &entries).unwrap();
        let restored: Vec<Entry> = cache.get("cart").unwrap().unwrap();
        assert_eq!(restored, entries);
    }

    #[test]
    fn test_missing_key_is_none() {
        let cache = Cache::new(MemoryStore::new());
        let value: Option<Vec<Entry>> = cache.get("cart").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_corrupt_value_is_error() {
        let cache = Cache::new(MemoryStore::with_entry("cart", "{not json"));
        let result: Result<Option<Vec<Entry>>, _> = cache.get("cart");
        assert!(matches!(result, Err(CacheError::Serialization(_))));
    }

    #[test]
    fn test_stored_as_plain_json_text() {
        let mut cache = Cache::new(MemoryStore::new());
        cache.set("n", &[1, 2]).unwrap();
        assert_eq!(cache.store().get("n").unwrap().as_deref(), Some("[1,2]"));

        cache.delete("n").unwrap();
        assert!(!cache.exists("n").unwrap());
    }
}
