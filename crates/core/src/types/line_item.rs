//! Cart line items.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId, Quantity};

/// A product as offered for adding to the cart: a line item without quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    /// Catalog identifier
    pub id: ProductId,
    /// Display title
    pub title: String,
    /// Product image reference
    pub image_url: String,
    /// Unit price
    pub price: Price,
}

impl ProductDraft {
    /// Turn the draft into a line item holding a single unit.
    #[must_use]
    pub fn into_line_item(self) -> LineItem {
        LineItem {
            id: self.id,
            title: self.title,
            image_url: self.image_url,
            price: self.price,
            quantity: Quantity::ONE,
        }
    }
}

/// One product entry in the cart.
///
/// Field names match the stored JSON records (`image_url`, not `imageUrl`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Catalog identifier, unique within a cart
    pub id: ProductId,
    /// Display title
    pub title: String,
    /// Product image reference
    pub image_url: String,
    /// Unit price
    pub price: Price,
    /// Units in the cart
    pub quantity: Quantity,
}
