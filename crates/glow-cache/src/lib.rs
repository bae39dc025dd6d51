//! Key-value persistence for the GlowLab storefront.
//!
//! Models the browser's local storage: a string-keyed, string-valued
//! store that survives page reloads. The [`Cache`] wrapper layers JSON
//! serialization on top of any [`KvStore`].
//!
//! # Example
//!
//! ```rust
//! use glow_cache::{Cache, MemoryStore};
//!
//! let mut cache = Cache::new(MemoryStore::new());
//! cache.set("glowlab-cart", &vec![1, 2, 3]).unwrap();
//!
//! let restored: Option<Vec<i32>> = cache.get("glowlab-cart").unwrap();
//! assert_eq!(restored, Some(vec![1, 2, 3]));
//! ```

mod error;
mod kv;
mod store;

pub use error::CacheError;
pub use kv::Cache;
pub use store::{FileStore, KvStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KvStore, MemoryStore};
}
