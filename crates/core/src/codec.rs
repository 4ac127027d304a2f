//! Text encoding of a [`CartCollection`] for key-value storage.
//!
//! The stored form is a compact JSON array of line item records:
//!
//! ```json
//! [{"id":"1","title":"Mug","image_url":"https://…/mug.png","price":"12.50","quantity":2}]
//! ```
//!
//! Decoding validates every record (non-empty ID, non-negative price,
//! quantity ≥ 1) and rejects duplicate IDs, so a decoded collection always
//! satisfies the cart invariants.

use crate::collection::CartCollection;

/// Errors that can occur when encoding or decoding a cart.
#[derive(thiserror::Error, Debug)]
pub enum CodecError {
    /// Encoding the collection failed.
    #[error("failed to encode cart: {0}")]
    Encode(#[source] serde_json::Error),
    /// The stored text is not a valid cart.
    #[error("malformed stored cart: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Encode a cart into its stored text form.
///
/// # Errors
///
/// Returns `CodecError::Encode` if serialization fails.
pub fn encode(cart: &CartCollection) -> Result<String, CodecError> {
    serde_json::to_string(cart).map_err(CodecError::Encode)
}

/// Decode a cart from its stored text form.
///
/// # Errors
///
/// Returns `CodecError::Decode` if the text is not a JSON array of valid,
/// uniquely identified line items.
pub fn decode(text: &str) -> Result<CartCollection, CodecError> {
    serde_json::from_str(text).map_err(CodecError::Decode)
}
