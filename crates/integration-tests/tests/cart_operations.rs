//! Integration tests for cart mutations through `CartStore`.
//!
//! Every test checks both the in-memory cart and what reached storage, since
//! each mutation must leave storage equal to the post-mutation cart.

#![allow(clippy::unwrap_used)]

use gomarketplace_core::{Change, Quantity};
use gomarketplace_integration_tests::{draft, memory_store, pid, stored_cart};

// =============================================================================
// addToCart
// =============================================================================

#[tokio::test]
async fn test_add_twice_keeps_single_item() {
    let (store, storage) = memory_store().await;

    let first = store.add_to_cart(draft("a")).await.unwrap();
    let second = store.add_to_cart(draft("a")).await.unwrap();

    assert_eq!(first.change, Change::Added);
    assert_eq!(second.change, Change::Unchanged);

    let cart = store.products().await;
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.get(&pid("a")).unwrap().quantity, Quantity::ONE);
    assert_eq!(stored_cart(&*storage).await.unwrap(), *cart);
}

#[tokio::test]
async fn test_add_appends_in_order() {
    let (store, storage) = memory_store().await;

    for id in ["c", "a", "b"] {
        store.add_to_cart(draft(id)).await.unwrap();
    }

    let cart = store.products().await;
    let ids: Vec<_> = cart.iter().map(|item| item.id.as_str()).collect();
    assert_eq!(ids, vec!["c", "a", "b"]);
    assert_eq!(stored_cart(&*storage).await.unwrap(), *cart);
}

#[tokio::test]
async fn test_duplicate_add_still_writes() {
    let (store, storage) = memory_store().await;
    store.add_to_cart(draft("a")).await.unwrap();

    let receipt = store.add_to_cart(draft("a")).await.unwrap();
    assert!(receipt.persistence.is_saved());
    assert_eq!(stored_cart(&*storage).await.unwrap().len(), 1);
}

// =============================================================================
// increment
// =============================================================================

#[tokio::test]
async fn test_increment_from_one_to_two() {
    let (store, storage) = memory_store().await;
    store.add_to_cart(draft("a")).await.unwrap();

    let receipt = store.increment(&pid("a")).await.unwrap();
    assert_eq!(
        receipt.change,
        Change::Updated {
            quantity: Quantity::new(2).unwrap()
        }
    );

    let persisted = stored_cart(&*storage).await.unwrap();
    assert_eq!(persisted.get(&pid("a")).unwrap().quantity.get(), 2);
}

#[tokio::test]
async fn test_increment_missing_leaves_cart_unchanged() {
    let (store, storage) = memory_store().await;
    store.add_to_cart(draft("a")).await.unwrap();
    let before = store.products().await;

    let receipt = store.increment(&pid("missing")).await.unwrap();

    assert_eq!(receipt.change, Change::Unchanged);
    assert_eq!(*store.products().await, *before);
    assert_eq!(stored_cart(&*storage).await.unwrap(), *before);
}

#[tokio::test]
async fn test_increment_keeps_position() {
    let (store, _storage) = memory_store().await;
    for id in ["a", "b", "c"] {
        store.add_to_cart(draft(id)).await.unwrap();
    }

    store.increment(&pid("b")).await.unwrap();

    let cart = store.products().await;
    let items = cart.items();
    assert_eq!(items[1].id, pid("b"));
    assert_eq!(items[1].quantity.get(), 2);
}

// =============================================================================
// decrement
// =============================================================================

#[tokio::test]
async fn test_decrement_at_one_keeps_item() {
    let (store, storage) = memory_store().await;
    store.add_to_cart(draft("a")).await.unwrap();

    let receipt = store.decrement(&pid("a")).await.unwrap();

    assert_eq!(receipt.change, Change::Unchanged);
    assert_eq!(store.products().await.get(&pid("a")).unwrap().quantity.get(), 1);
    assert_eq!(stored_cart(&*storage).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_decrement_from_three_to_two() {
    let (store, storage) = memory_store().await;
    store.add_to_cart(draft("a")).await.unwrap();
    store.increment(&pid("a")).await.unwrap();
    store.increment(&pid("a")).await.unwrap();

    store.decrement(&pid("a")).await.unwrap();

    assert_eq!(store.products().await.get(&pid("a")).unwrap().quantity.get(), 2);
    let persisted = stored_cart(&*storage).await.unwrap();
    assert_eq!(persisted.get(&pid("a")).unwrap().quantity.get(), 2);
}

#[tokio::test]
async fn test_decrement_missing_is_noop() {
    let (store, storage) = memory_store().await;

    let receipt = store.decrement(&pid("ghost")).await.unwrap();

    assert_eq!(receipt.change, Change::Unchanged);
    assert!(stored_cart(&*storage).await.unwrap().is_empty());
}

// =============================================================================
// Mixed sequences
// =============================================================================

#[tokio::test]
async fn test_storage_tracks_every_step() {
    let (store, storage) = memory_store().await;

    let script: &[(&str, &str)] = &[
        ("add", "a"),
        ("add", "b"),
        ("inc", "a"),
        ("add", "a"),
        ("dec", "b"),
        ("inc", "b"),
        ("inc", "b"),
        ("dec", "b"),
        ("inc", "zzz"),
    ];

    for (op, id) in script {
        match *op {
            "add" => store.add_to_cart(draft(id)).await.unwrap(),
            "inc" => store.increment(&pid(id)).await.unwrap(),
            _ => store.decrement(&pid(id)).await.unwrap(),
        };
        assert_eq!(
            stored_cart(&*storage).await.unwrap(),
            *store.products().await,
            "storage diverged after {op} {id}"
        );
    }

    let cart = store.products().await;
    assert_eq!(cart.get(&pid("a")).unwrap().quantity.get(), 2);
    assert_eq!(cart.get(&pid("b")).unwrap().quantity.get(), 2);
    assert_eq!(cart.len(), 2);
    assert_eq!(cart.total_quantity(), 4);
}
