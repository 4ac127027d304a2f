//! GoMarketplace Core - Cart domain types.
//!
//! This crate provides the types shared by every GoMarketplace cart component:
//! - `cart` - The persistent cart store
//! - `cli` - Command-line consumer of the cart store
//!
//! # Architecture
//!
//! The core crate contains only types and pure operations - no I/O, no storage
//! access, no async runtime. Mutating a [`CartCollection`] is synchronous; the
//! `cart` crate decides when and where the result is persisted.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices, and quantities
//! - [`collection`] - The ordered, identifier-unique cart collection
//! - [`codec`] - Text encoding of a collection for key-value storage

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod codec;
pub mod collection;
pub mod types;

pub use codec::CodecError;
pub use collection::{CartCollection, Change, CollectionError};
pub use types::*;
