//! Integration tests for the GoMarketplace cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p gomarketplace-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_operations` - Add/increment/decrement semantics through `CartStore`
//! - `cart_persistence` - Load paths, restarts, and write failures
//! - `cart_concurrency` - Many tasks mutating one store
//!
//! This library holds the fixtures shared by those test files.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use gomarketplace_cart::{
    CartStore, DEFAULT_STORAGE_KEY, KeyValueStore, MemoryStore, StorageError,
};
use gomarketplace_core::{CartCollection, Price, ProductDraft, ProductId, codec};

/// A product draft with predictable fields derived from `id`.
#[must_use]
pub fn draft(id: &str) -> ProductDraft {
    ProductDraft {
        id: pid(id),
        title: format!("Product {id}"),
        image_url: format!("https://cdn.example.com/{id}.png"),
        price: Price::from_cents(999).unwrap(),
    }
}

/// Parse a product ID, panicking on invalid input.
#[must_use]
pub fn pid(id: &str) -> ProductId {
    ProductId::parse(id).unwrap()
}

/// Decode whatever is stored under the default cart key.
pub async fn stored_cart(storage: &dyn KeyValueStore) -> Option<CartCollection> {
    let text = storage.get(DEFAULT_STORAGE_KEY).await.unwrap()?;
    Some(codec::decode(&text).unwrap())
}

/// Build a store over a shared in-memory backend.
pub async fn memory_store() -> (CartStore, Arc<MemoryStore>) {
    let storage = Arc::new(MemoryStore::new());
    let store = CartStore::builder()
        .shared_storage(storage.clone())
        .build()
        .await
        .unwrap();
    (store, storage)
}

/// A store wrapper whose writes fail a configurable number of times.
///
/// Reads always pass through. Writes fail while the failure budget lasts,
/// then pass through to the inner [`MemoryStore`].
#[derive(Debug, Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    failures_left: AtomicU32,
    writes: AtomicU32,
    read_fails: bool,
}

impl FlakyStore {
    /// Fail the next `failures` writes.
    #[must_use]
    pub fn failing_writes(failures: u32) -> Self {
        Self {
            failures_left: AtomicU32::new(failures),
            ..Self::default()
        }
    }

    /// Fail every read.
    #[must_use]
    pub fn failing_reads() -> Self {
        Self {
            read_fails: true,
            ..Self::default()
        }
    }

    /// Write attempts seen, successful or not.
    pub fn writes(&self) -> u32 {
        self.writes.load(Ordering::SeqCst)
    }

    /// Stop failing writes.
    pub fn heal(&self) {
        self.failures_left.store(0, Ordering::SeqCst);
    }
}

#[async_trait]
impl KeyValueStore for FlakyStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.read_fails {
            return Err(StorageError::Unavailable("read refused".to_string()));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let failing = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(StorageError::Unavailable("write refused".to_string()));
        }
        self.inner.set(key, value).await
    }
}
