//! The cart store: in-memory cart mirrored to key-value storage.
//!
//! # Consistency
//!
//! Mutations are applied one at a time through a writer gate. Each one
//! snapshots the current cart, applies the change, publishes the result to
//! readers, and then writes the *post-mutation* cart to storage before the
//! next mutation starts. The last completed write therefore always matches
//! the latest accepted mutation.
//!
//! Readers never wait on storage I/O: [`CartStore::products`] only clones an
//! `Arc` under a read lock that is never held across a storage call.

use std::sync::Arc;
use std::time::Duration;

use gomarketplace_core::{CartCollection, Change, ProductDraft, ProductId, codec};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, instrument, warn};

use crate::config::{CartConfig, ConfigError, LoadPolicy};
use crate::error::{CartError, Result};
use crate::storage::{KeyValueStore, StorageError};

/// How the store obtained its initial cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing was stored yet.
    Empty,
    /// A stored cart was decoded.
    Restored {
        /// Number of line items restored.
        items: usize,
    },
    /// Stored data was unreadable; the store started empty.
    Recovered {
        /// Why the stored cart was discarded.
        reason: String,
    },
}

/// Whether a mutation reached storage.
#[derive(Debug)]
pub enum Persistence {
    /// Storage now holds the post-mutation cart.
    Saved {
        /// Write attempts used, including the successful one.
        attempts: u32,
    },
    /// Every attempt failed. Storage lags the in-memory cart until the next
    /// successful write.
    Failed {
        /// Write attempts made.
        attempts: u32,
        /// Error from the last attempt.
        error: StorageError,
    },
}

impl Persistence {
    /// Whether the write succeeded.
    #[must_use]
    pub const fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }
}

/// Completion report of a cart mutation.
#[derive(Debug)]
pub struct Receipt {
    /// What the mutation did to the cart.
    pub change: Change,
    /// Whether the resulting cart was persisted.
    pub persistence: Persistence,
}

#[derive(Debug, Clone, Copy)]
struct RetryPolicy {
    attempts: u32,
    backoff: Duration,
}

/// Builder for [`CartStore`].
///
/// A storage backend is required; everything else has defaults matching
/// [`CartConfig::default`].
pub struct CartStoreBuilder {
    storage: Option<Arc<dyn KeyValueStore>>,
    key: String,
    retry: RetryPolicy,
    load_policy: LoadPolicy,
}

impl Default for CartStoreBuilder {
    fn default() -> Self {
        Self::from_config(&CartConfig::default())
    }
}

impl CartStoreBuilder {
    /// Start a builder with default settings and no storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a builder from loaded configuration. Storage must still be set.
    #[must_use]
    pub fn from_config(config: &CartConfig) -> Self {
        Self {
            storage: None,
            key: config.storage_key.clone(),
            retry: RetryPolicy {
                attempts: config.write_attempts,
                backoff: config.write_backoff,
            },
            load_policy: config.load_policy,
        }
    }

    /// Storage backend holding the persisted cart.
    #[must_use]
    pub fn storage(self, storage: impl KeyValueStore + 'static) -> Self {
        self.shared_storage(Arc::new(storage))
    }

    /// Storage backend already behind an `Arc`.
    #[must_use]
    pub fn shared_storage(mut self, storage: Arc<dyn KeyValueStore>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Key of the persisted cart slot (default: `@GoMarketplace:cart`).
    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Attempts per persistence write, including the first.
    #[must_use]
    pub const fn write_attempts(mut self, attempts: u32) -> Self {
        self.retry.attempts = attempts;
        self
    }

    /// Delay before the first write retry; doubled for each further retry.
    #[must_use]
    pub const fn write_backoff(mut self, backoff: Duration) -> Self {
        self.retry.backoff = backoff;
        self
    }

    /// Startup behaviour for unreadable stored data.
    #[must_use]
    pub const fn load_policy(mut self, policy: LoadPolicy) -> Self {
        self.load_policy = policy;
        self
    }

    /// Validate settings, load the stored cart, and return the ready store.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Config` if no storage was set, the key is empty,
    /// or write attempts is zero. Returns `CartError::Load` if the stored
    /// cart is unreadable and the load policy is [`LoadPolicy::Strict`].
    pub async fn build(self) -> Result<CartStore> {
        let storage = self.storage.ok_or(ConfigError::MissingStorage)?;
        if self.key.is_empty() {
            return Err(ConfigError::EmptyKey.into());
        }
        if self.retry.attempts == 0 {
            return Err(ConfigError::ZeroWriteAttempts.into());
        }

        let (cart, load_outcome) = load(&*storage, &self.key, self.load_policy).await?;

        Ok(CartStore {
            inner: Arc::new(CartStoreInner {
                storage,
                key: self.key,
                retry: self.retry,
                load_outcome,
                products: RwLock::new(Arc::new(cart)),
                writer: Mutex::new(()),
            }),
        })
    }
}

/// Read the stored cart, applying the load policy to failures.
async fn load(
    storage: &dyn KeyValueStore,
    key: &str,
    policy: LoadPolicy,
) -> Result<(CartCollection, LoadOutcome)> {
    let decoded = match storage.get(key).await {
        Ok(None) => {
            info!(key, "No stored cart, starting empty");
            return Ok((CartCollection::new(), LoadOutcome::Empty));
        }
        Ok(Some(text)) => codec::decode(&text).map_err(CartError::from),
        Err(e) => Err(CartError::from(e)),
    };

    match decoded {
        Ok(cart) => {
            let items = cart.len();
            info!(key, items, "Restored stored cart");
            Ok((cart, LoadOutcome::Restored { items }))
        }
        Err(e) => match policy {
            LoadPolicy::Strict => Err(CartError::Load {
                key: key.to_string(),
                reason: e.to_string(),
            }),
            LoadPolicy::Recover => {
                warn!(key, error = %e, "Stored cart unreadable, starting empty");
                Ok((
                    CartCollection::new(),
                    LoadOutcome::Recovered {
                        reason: e.to_string(),
                    },
                ))
            }
        },
    }
}

/// Shopping cart state container.
///
/// Cheap to clone; clones share the same cart. Hand a clone to every
/// component that reads or changes the cart.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

struct CartStoreInner {
    storage: Arc<dyn KeyValueStore>,
    key: String,
    retry: RetryPolicy,
    load_outcome: LoadOutcome,
    /// Published cart; replaced wholesale after each accepted mutation
    products: RwLock<Arc<CartCollection>>,
    /// Held for the whole mutate-then-persist sequence
    writer: Mutex<()>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("key", &self.inner.key)
            .field("retry", &self.inner.retry)
            .field("load_outcome", &self.inner.load_outcome)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Start building a store.
    #[must_use]
    pub fn builder() -> CartStoreBuilder {
        CartStoreBuilder::new()
    }

    /// Snapshot of the current cart.
    pub async fn products(&self) -> Arc<CartCollection> {
        Arc::clone(&*self.inner.products.read().await)
    }

    /// How the initial cart was obtained.
    #[must_use]
    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.inner.load_outcome
    }

    /// Key of the persisted cart slot.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.inner.key
    }

    /// Add a product with quantity one. A product already in the cart is
    /// left untouched. The cart is persisted either way.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Codec` if the cart cannot be encoded.
    #[instrument(skip(self, draft), fields(product_id = %draft.id))]
    pub async fn add_to_cart(&self, draft: ProductDraft) -> Result<Receipt> {
        self.mutate(|cart| cart.add(draft)).await
    }

    /// Raise a product's quantity by one. Unknown IDs change nothing. The
    /// cart is persisted either way.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Codec` if the cart cannot be encoded.
    #[instrument(skip(self, id), fields(product_id = %id))]
    pub async fn increment(&self, id: &ProductId) -> Result<Receipt> {
        self.mutate(|cart| cart.increment(id)).await
    }

    /// Lower a product's quantity by one, stopping at one. Unknown IDs
    /// change nothing. The cart is persisted either way.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Codec` if the cart cannot be encoded.
    #[instrument(skip(self, id), fields(product_id = %id))]
    pub async fn decrement(&self, id: &ProductId) -> Result<Receipt> {
        self.mutate(|cart| cart.decrement(id)).await
    }

    async fn mutate(&self, apply: impl FnOnce(&mut CartCollection) -> Change) -> Result<Receipt> {
        let _writer = self.inner.writer.lock().await;

        let mut next = CartCollection::clone(&*self.products().await);
        let change = apply(&mut next);
        let encoded = codec::encode(&next)?;

        if change.is_changed() {
            *self.inner.products.write().await = Arc::new(next);
            info!(?change, "Cart updated");
        } else {
            debug!("Cart unchanged");
        }

        let persistence = self.persist(&encoded).await;
        Ok(Receipt {
            change,
            persistence,
        })
    }

    async fn persist(&self, encoded: &str) -> Persistence {
        let RetryPolicy { attempts, backoff } = self.inner.retry;
        let mut delay = backoff;
        let mut attempt = 1;

        loop {
            match self.inner.storage.set(&self.inner.key, encoded).await {
                Ok(()) => {
                    debug!(attempt, "Cart persisted");
                    return Persistence::Saved { attempts: attempt };
                }
                Err(e) if attempt < attempts => {
                    debug!(error = %e, attempt, "Cart write failed, retrying");
                    tokio::time::sleep(delay).await;
                    delay = delay.saturating_mul(2);
                    attempt += 1;
                }
                Err(e) => {
                    warn!(
                        error = %e,
                        attempts = attempt,
                        key = %self.inner.key,
                        "Cart write failed; stored cart is behind the in-memory cart"
                    );
                    return Persistence::Failed {
                        attempts: attempt,
                        error: e,
                    };
                }
            }
        }
    }
}
