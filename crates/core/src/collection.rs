//! The ordered cart collection.
//!
//! A [`CartCollection`] is a list of [`LineItem`]s in the order they were
//! added, with at most one entry per [`ProductId`]. The three mutations
//! mirror what a shopper can do from the storefront:
//!
//! - [`CartCollection::add`] - put a product in the cart (no-op if present)
//! - [`CartCollection::increment`] - one more unit of a product
//! - [`CartCollection::decrement`] - one fewer unit, never below one
//!
//! Every mutation reports a [`Change`] so callers can log or display what
//! happened without diffing the list.

use serde::{Deserialize, Serialize};

use crate::types::{LineItem, ProductDraft, ProductId, Quantity};

/// Errors that can occur when building a [`CartCollection`] from raw items.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// Two items share the same product ID.
    #[error("duplicate product id in cart: {0}")]
    DuplicateId(ProductId),
}

/// What a mutation did to the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// A new line item was appended.
    Added,
    /// An existing line item now has this quantity.
    Updated {
        /// Quantity after the update
        quantity: Quantity,
    },
    /// Nothing changed (duplicate add, unknown ID, or quantity floor/ceiling).
    Unchanged,
}

impl Change {
    /// Whether the collection was modified.
    #[must_use]
    pub const fn is_changed(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// An insertion-ordered, identifier-unique list of line items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct CartCollection {
    items: Vec<LineItem>,
}

impl CartCollection {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Iterate over line items in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.items.iter()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up a line item by product ID.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Whether the cart holds the given product.
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.position(id).is_some()
    }

    /// Sum of all quantities (the badge count on a cart icon).
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity.get()))
            .sum()
    }

    fn position(&self, id: &ProductId) -> Option<usize> {
        self.items.iter().position(|item| &item.id == id)
    }

    /// Append `draft` with quantity one, unless its ID is already present.
    pub fn add(&mut self, draft: ProductDraft) -> Change {
        if self.contains(&draft.id) {
            return Change::Unchanged;
        }
        self.items.push(draft.into_line_item());
        Change::Added
    }

    /// Raise the quantity of `id` by one, keeping its position.
    ///
    /// Unknown IDs and quantities at `u32::MAX` are left alone.
    pub fn increment(&mut self, id: &ProductId) -> Change {
        self.update_quantity(id, Quantity::incremented)
    }

    /// Lower the quantity of `id` by one, keeping its position.
    ///
    /// An item at quantity one stays in the cart at one. Removing items is
    /// not a decrement.
    pub fn decrement(&mut self, id: &ProductId) -> Change {
        self.update_quantity(id, Quantity::decremented)
    }

    fn update_quantity(
        &mut self,
        id: &ProductId,
        step: impl FnOnce(Quantity) -> Option<Quantity>,
    ) -> Change {
        let Some(item) = self.items.iter_mut().find(|item| &item.id == id) else {
            return Change::Unchanged;
        };
        match step(item.quantity) {
            Some(quantity) => {
                item.quantity = quantity;
                Change::Updated { quantity }
            }
            None => Change::Unchanged,
        }
    }
}

impl TryFrom<Vec<LineItem>> for CartCollection {
    type Error = CollectionError;

    fn try_from(items: Vec<LineItem>) -> Result<Self, Self::Error> {
        let mut seen = std::collections::HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(&item.id) {
                return Err(CollectionError::DuplicateId(item.id.clone()));
            }
        }
        Ok(Self { items })
    }
}

impl From<CartCollection> for Vec<LineItem> {
    fn from(collection: CartCollection) -> Self {
        collection.items
    }
}

impl<'a> IntoIterator for &'a CartCollection {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
