//! Core types for GoMarketplace carts.
//!
//! This module provides type-safe wrappers for cart domain concepts.

pub mod id;
pub mod line_item;
pub mod price;
pub mod quantity;

pub use id::{ProductId, ProductIdError};
pub use line_item::{LineItem, ProductDraft};
pub use price::{Price, PriceError};
pub use quantity::{Quantity, QuantityError};
