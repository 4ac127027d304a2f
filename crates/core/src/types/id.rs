//! Product identifier type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`ProductId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductIdError {
    /// The input string is empty.
    #[error("product id cannot be empty")]
    Empty,
}

/// The unique key of a line item in the cart.
///
/// Product IDs come from the catalog as opaque strings. Two line items in a
/// cart never share a `ProductId`. The only constraint is that the ID is
/// non-empty; catalog IDs of any length round-trip through storage.
///
/// ## Examples
///
/// ```
/// use gomarketplace_core::ProductId;
///
/// assert!(ProductId::parse("prod-1").is_ok());
/// assert!(ProductId::parse("").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(String);

impl ProductId {
    /// Parse a `ProductId` from a string.
    ///
    /// # Errors
    ///
    /// Returns `ProductIdError::Empty` if the input is empty.
    pub fn parse(s: &str) -> Result<Self, ProductIdError> {
        Self::validate(s)?;
        Ok(Self(s.to_owned()))
    }

    const fn validate(s: &str) -> Result<(), ProductIdError> {
        if s.is_empty() {
            return Err(ProductIdError::Empty);
        }
        Ok(())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for ProductId {
    type Err = ProductIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ProductId {
    type Error = ProductIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::validate(&s)?;
        Ok(Self(s))
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert!(ProductId::parse("1").is_ok());
        assert!(ProductId::parse("a3f1c0de-9b4e").is_ok());
        assert!(ProductId::parse(" padded ").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(ProductId::parse(""), Err(ProductIdError::Empty));
    }

    #[test]
    fn test_parse_long_id() {
        let long = "x".repeat(4096);
        assert_eq!(ProductId::parse(&long).unwrap().as_str(), long);
    }

    #[test]
    fn test_display() {
        let id = ProductId::parse("sku-42").unwrap();
        assert_eq!(id.to_string(), "sku-42");
    }

    #[test]
    fn test_serde_is_plain_string() {
        let id = ProductId::parse("sku-42").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"sku-42\"");
    }

    #[test]
    fn test_deserialize_long_id() {
        let long = "x".repeat(300);
        let id: ProductId = serde_json::from_str(&format!("\"{long}\"")).unwrap();
        assert_eq!(id.as_str(), long);
    }

    #[test]
    fn test_deserialize_rejects_empty() {
        assert!(serde_json::from_str::<ProductId>("\"\"").is_err());
    }
}
