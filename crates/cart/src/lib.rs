//! GoMarketplace Cart - Persistent shopping cart store.
//!
//! # Architecture
//!
//! - [`CartStore`] owns the authoritative in-memory [`CartCollection`]
//! - Every mutation re-persists the whole collection under one key
//! - Storage is any [`KeyValueStore`]: [`MemoryStore`] or [`FileStore`]
//! - Mutations are serialized through a single writer; reads never wait on I/O
//!
//! # Example
//!
//! ```rust,no_run
//! use gomarketplace_cart::{CartStore, FileStore};
//! use gomarketplace_core::{Price, ProductDraft, ProductId};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let store = CartStore::builder()
//!     .storage(FileStore::new(".gomarketplace"))
//!     .build()
//!     .await?;
//!
//! let id = ProductId::parse("mug")?;
//! store
//!     .add_to_cart(ProductDraft {
//!         id: id.clone(),
//!         title: "Coffee mug".to_string(),
//!         image_url: "https://cdn.example.com/mug.png".to_string(),
//!         price: "12.50".parse()?,
//!     })
//!     .await?;
//! store.increment(&id).await?;
//!
//! assert_eq!(store.products().await.total_quantity(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! [`CartCollection`]: gomarketplace_core::CartCollection

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod storage;
pub mod store;

pub use config::{CartConfig, ConfigError, DEFAULT_STORAGE_KEY, LoadPolicy};
pub use error::{CartError, Result};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use store::{CartStore, CartStoreBuilder, LoadOutcome, Persistence, Receipt};
