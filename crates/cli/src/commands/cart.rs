//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart
//! gm-cart show
//!
//! # Add a product
//! gm-cart add --id mug --title "Coffee mug" --image-url https://cdn.example.com/mug.png --price 12.50
//!
//! # Change quantities
//! gm-cart increment mug
//! gm-cart decrement mug
//! ```

use std::fmt::Write as _;

use gomarketplace_cart::{CartError, CartStore, Persistence, Receipt};
use gomarketplace_core::{
    CartCollection, Change, CodecError, PriceError, ProductDraft, ProductId, ProductIdError,
    codec,
};
use thiserror::Error;

/// Errors that can occur while running a cart command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Cart store operation failed.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Product ID argument is invalid.
    #[error("Invalid product id: {0}")]
    InvalidId(#[from] ProductIdError),

    /// Price argument is invalid.
    #[error("Invalid price: {0}")]
    InvalidPrice(#[from] PriceError),

    /// Cart could not be rendered as JSON.
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Print the cart, as a table or as the stored JSON form.
#[allow(clippy::print_stdout)]
pub async fn show(store: &CartStore, json: bool) -> Result<(), CommandError> {
    let cart = store.products().await;
    if json {
        println!("{}", codec::encode(&cart)?);
    } else {
        print!("{}", render_cart(&cart));
    }
    Ok(())
}

/// Add a product to the cart.
#[allow(clippy::print_stdout)]
pub async fn add(
    store: &CartStore,
    id: &str,
    title: String,
    image_url: String,
    price: &str,
) -> Result<(), CommandError> {
    let id = ProductId::parse(id)?;
    let draft = ProductDraft {
        id: id.clone(),
        title,
        image_url,
        price: price.parse()?,
    };

    let receipt = store.add_to_cart(draft).await?;
    println!("{}", describe(&id, &receipt));
    Ok(())
}

/// Add one unit of a product already in the cart.
#[allow(clippy::print_stdout)]
pub async fn increment(store: &CartStore, id: &str) -> Result<(), CommandError> {
    let id = ProductId::parse(id)?;
    let receipt = store.increment(&id).await?;
    println!("{}", describe(&id, &receipt));
    Ok(())
}

/// Remove one unit of a product, keeping at least one.
#[allow(clippy::print_stdout)]
pub async fn decrement(store: &CartStore, id: &str) -> Result<(), CommandError> {
    let id = ProductId::parse(id)?;
    let receipt = store.decrement(&id).await?;
    println!("{}", describe(&id, &receipt));
    Ok(())
}

/// Format the cart as a fixed-width table.
pub fn render_cart(cart: &CartCollection) -> String {
    if cart.is_empty() {
        return "Cart is empty\n".to_string();
    }

    let mut out = format!("{:<24} {:<32} {:>5} {:>10}\n", "ID", "TITLE", "QTY", "PRICE");
    for item in cart {
        // Writing to a String cannot fail
        let _ = writeln!(
            out,
            "{:<24} {:<32} {:>5} {:>10}",
            item.id.as_str(),
            item.title,
            item.quantity.get(),
            item.price.to_string()
        );
    }
    let _ = writeln!(
        out,
        "{} product(s), {} unit(s)",
        cart.len(),
        cart.total_quantity()
    );
    out
}

/// One-line summary of a mutation.
pub fn describe(id: &ProductId, receipt: &Receipt) -> String {
    let change = match receipt.change {
        Change::Added => format!("Added {id}"),
        Change::Updated { quantity } => format!("{id}: quantity {quantity}"),
        Change::Unchanged => format!("{id}: no change"),
    };
    match &receipt.persistence {
        Persistence::Saved { .. } => change,
        Persistence::Failed { error, .. } => format!("{change} (not saved: {error})"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use gomarketplace_cart::{DEFAULT_STORAGE_KEY, KeyValueStore, MemoryStore, StorageError};
    use gomarketplace_core::{Price, Quantity};

    use super::*;

    fn cart_with(ids: &[&str]) -> CartCollection {
        let mut cart = CartCollection::new();
        for id in ids {
            cart.add(ProductDraft {
                id: ProductId::parse(id).unwrap(),
                title: format!("Title {id}"),
                image_url: String::new(),
                price: Price::from_cents(250).unwrap(),
            });
        }
        cart
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_cart(&CartCollection::new()), "Cart is empty\n");
    }

    #[test]
    fn test_render_lists_items_in_order() {
        let output = render_cart(&cart_with(&["b", "a"]));
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("b "));
        assert!(lines[2].starts_with("a "));
        assert!(lines[1].contains("2.50"));
        assert_eq!(lines[3], "2 product(s), 2 unit(s)");
    }

    #[test]
    fn test_describe() {
        let id = ProductId::parse("mug").unwrap();
        let saved = Receipt {
            change: Change::Updated {
                quantity: Quantity::new(3).unwrap(),
            },
            persistence: Persistence::Saved { attempts: 1 },
        };
        assert_eq!(describe(&id, &saved), "mug: quantity 3");

        let failed = Receipt {
            change: Change::Added,
            persistence: Persistence::Failed {
                attempts: 3,
                error: StorageError::Unavailable("disk full".to_string()),
            },
        };
        assert_eq!(
            describe(&id, &failed),
            "Added mug (not saved: Storage unavailable: disk full)"
        );
    }

    #[tokio::test]
    async fn test_add_rejects_bad_input() {
        let store = CartStore::builder()
            .storage(MemoryStore::new())
            .build()
            .await
            .unwrap();

        let err = add(&store, "", "T".into(), "u".into(), "1.00")
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::InvalidId(_)));

        let err = add(&store, "mug", "T".into(), "u".into(), "free")
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::InvalidPrice(_)));

        assert!(store.products().await.is_empty());
    }

    #[tokio::test]
    async fn test_commands_persist_each_step() {
        let storage = Arc::new(MemoryStore::new());
        let store = CartStore::builder()
            .shared_storage(storage.clone())
            .build()
            .await
            .unwrap();

        add(&store, "mug", "Coffee mug".into(), "u".into(), "12.50")
            .await
            .unwrap();
        increment(&store, "mug").await.unwrap();
        increment(&store, "mug").await.unwrap();
        decrement(&store, "mug").await.unwrap();
        increment(&store, "ghost").await.unwrap();
        show(&store, false).await.unwrap();
        show(&store, true).await.unwrap();

        let text = storage.get(DEFAULT_STORAGE_KEY).await.unwrap().unwrap();
        let persisted = codec::decode(&text).unwrap();
        assert_eq!(persisted.len(), 1);
        let mug = persisted.get(&ProductId::parse("mug").unwrap()).unwrap();
        assert_eq!(mug.quantity.get(), 2);
        assert_eq!(mug.price, "12.50".parse::<Price>().unwrap());
        assert_eq!(persisted, *store.products().await);
    }

    #[tokio::test]
    async fn test_decrement_stops_at_one() {
        let storage = Arc::new(MemoryStore::new());
        let store = CartStore::builder()
            .shared_storage(storage.clone())
            .build()
            .await
            .unwrap();

        add(&store, "mug", "Coffee mug".into(), "u".into(), "1")
            .await
            .unwrap();
        decrement(&store, "mug").await.unwrap();
        decrement(&store, "mug").await.unwrap();

        let text = storage.get(DEFAULT_STORAGE_KEY).await.unwrap().unwrap();
        let persisted = codec::decode(&text).unwrap();
        assert_eq!(persisted.items()[0].quantity, Quantity::ONE);
    }
}
