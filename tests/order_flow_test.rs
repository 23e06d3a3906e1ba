//! End-to-end tests for the order service flow: validation, batch merge,
//! storage round trips, and identity-key addressing.
//!
//! These run against the in-memory storage engine so they exercise the same
//! code paths as the SQLite and MongoDB deployments without needing a live
//! database.

use orderdesk_backend::errors::AppError;
use orderdesk_backend::models::{DeleteOrderRequest, OrderDraft, UpdateOrderRequest};
use orderdesk_backend::services::order_service;
use orderdesk_backend::storage::{MemoryOrderStore, OrderStorage};

fn draft(client: &str, product: &str, quantity: &str, price: &str, date: &str) -> OrderDraft {
    OrderDraft {
        client: client.to_string(),
        product: product.to_string(),
        quantity: quantity.to_string(),
        price: price.to_string(),
        date: date.to_string(),
    }
}

fn update_req(
    client: &str,
    product: &str,
    date: &str,
    quantity: Option<&str>,
    price: Option<&str>,
) -> UpdateOrderRequest {
    UpdateOrderRequest {
        client: client.to_string(),
        product: product.to_string(),
        date: date.to_string(),
        quantity: quantity.map(str::to_string),
        price: price.map(str::to_string),
    }
}

fn delete_req(client: &str, product: &str, date: &str) -> DeleteOrderRequest {
    DeleteOrderRequest {
        client: client.to_string(),
        product: product.to_string(),
        date: date.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_returns_count_of_submitted_drafts() {
    let store = MemoryOrderStore::new();
    let drafts = vec![
        draft("Acme", "bolts", "2", "10", "2024-03-01"),
        draft("Acme", "nuts", "5", "3", "2024-03-01"),
        draft("Bravo", "screws", "1", "7", "2024-03-02"),
    ];

    let inserted = order_service::create_orders(&store, drafts).await.unwrap();
    assert_eq!(inserted, 3);
}

#[tokio::test]
async fn create_with_empty_batch_is_rejected_before_storage() {
    let store = MemoryOrderStore::new();

    let result = order_service::create_orders(&store, vec![]).await;
    assert!(matches!(result, Err(AppError::Validation(_))));

    // Nothing reached the store.
    assert!(store.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_with_missing_key_field_is_rejected() {
    let store = MemoryOrderStore::new();
    let drafts = vec![
        draft("Acme", "bolts", "2", "10", "2024-03-01"),
        draft("", "nuts", "5", "3", "2024-03-01"),
    ];

    let result = order_service::create_orders(&store, drafts).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
    assert!(store.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_then_list_round_trips_every_field() {
    let store = MemoryOrderStore::new();
    let drafts = vec![
        draft("Acme", "bolts", "2", "₱1,000", "2024-03-01"),
        draft("Bravo", "screws", "1", "N/A", "2024-03-02"),
    ];
    order_service::create_orders(&store, drafts).await.unwrap();

    let orders = order_service::list_orders(&store).await.unwrap();
    assert_eq!(orders.len(), 2);

    assert_eq!(orders[0].client, "Acme");
    assert_eq!(orders[0].product, "bolts");
    assert_eq!(orders[0].quantity, "2");
    assert_eq!(orders[0].price, "₱1,000");
    assert_eq!(orders[0].date, "2024-03-01");

    assert_eq!(orders[1].client, "Bravo");
    assert_eq!(orders[1].price, "N/A");
}

#[tokio::test]
async fn create_merges_drafts_sharing_the_identity_key() {
    let store = MemoryOrderStore::new();
    let drafts = vec![
        draft("Acme", "bolts", "2", "10", "2024-03-01"),
        draft("Acme", "bolts", "3", "12", "2024-03-01"),
        draft("Acme", "nuts", "1", "5", "2024-03-01"),
    ];

    let inserted = order_service::create_orders(&store, drafts).await.unwrap();
    assert_eq!(inserted, 2);

    let orders = order_service::list_orders(&store).await.unwrap();
    let bolts = orders.iter().find(|o| o.product == "bolts").unwrap();
    assert_eq!(bolts.quantity, "5");
    assert_eq!(bolts.price, "12");
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_changes_quantity_and_price_only() {
    let store = MemoryOrderStore::new();
    let drafts = vec![draft("Acme", "bolts", "2", "10", "2024-03-01")];
    order_service::create_orders(&store, drafts).await.unwrap();

    order_service::update_order(
        &store,
        update_req("Acme", "bolts", "2024-03-01", Some("7"), Some("11")),
    )
    .await
    .unwrap();

    let orders = order_service::list_orders(&store).await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].client, "Acme");
    assert_eq!(orders[0].product, "bolts");
    assert_eq!(orders[0].date, "2024-03-01");
    assert_eq!(orders[0].quantity, "7");
    assert_eq!(orders[0].price, "11");
}

#[tokio::test]
async fn update_applies_only_present_patch_fields() {
    let store = MemoryOrderStore::new();
    let drafts = vec![draft("Acme", "bolts", "2", "10", "2024-03-01")];
    order_service::create_orders(&store, drafts).await.unwrap();

    order_service::update_order(
        &store,
        update_req("Acme", "bolts", "2024-03-01", Some("9"), None),
    )
    .await
    .unwrap();

    let orders = order_service::list_orders(&store).await.unwrap();
    assert_eq!(orders[0].quantity, "9");
    assert_eq!(orders[0].price, "10");
}

#[tokio::test]
async fn update_on_missing_triple_is_not_found_and_mutates_nothing() {
    let store = MemoryOrderStore::new();
    let drafts = vec![draft("Acme", "bolts", "2", "10", "2024-03-01")];
    order_service::create_orders(&store, drafts).await.unwrap();
    let before = order_service::list_orders(&store).await.unwrap();

    let result = order_service::update_order(
        &store,
        update_req("Acme", "bolts", "2024-03-02", Some("7"), Some("11")),
    )
    .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    let after = order_service::list_orders(&store).await.unwrap();
    assert_eq!(before.len(), after.len());
    assert_eq!(before[0].quantity, after[0].quantity);
    assert_eq!(before[0].price, after[0].price);
}

#[tokio::test]
async fn update_without_full_key_is_rejected() {
    let store = MemoryOrderStore::new();

    let result =
        order_service::update_order(&store, update_req("Acme", "", "2024-03-01", Some("7"), None))
            .await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn update_key_matching_is_exact_no_trimming() {
    let store = MemoryOrderStore::new();
    let drafts = vec![draft("Acme", "bolts", "2", "10", "2024-03-01")];
    order_service::create_orders(&store, drafts).await.unwrap();

    // Trailing whitespace addresses a different (absent) record.
    let result = order_service::update_order(
        &store,
        update_req("Acme ", "bolts", "2024-03-01", Some("7"), None),
    )
    .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_removes_exactly_the_matching_records() {
    let store = MemoryOrderStore::new();
    let drafts = vec![
        draft("Acme", "bolts", "2", "10", "2024-03-01"),
        draft("Acme", "nuts", "1", "5", "2024-03-01"),
    ];
    order_service::create_orders(&store, drafts).await.unwrap();

    order_service::delete_order(&store, delete_req("Acme", "bolts", "2024-03-01"))
        .await
        .unwrap();

    let orders = order_service::list_orders(&store).await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].product, "nuts");
}

#[tokio::test]
async fn delete_on_missing_triple_is_not_found() {
    let store = MemoryOrderStore::new();

    let result =
        order_service::delete_order(&store, delete_req("Acme", "bolts", "2024-03-01")).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_is_idempotent_without_intervening_writes() {
    let store = MemoryOrderStore::new();
    let drafts = vec![
        draft("Acme", "bolts", "2", "10", "2024-03-01"),
        draft("Bravo", "screws", "1", "N/A", "2024-03-02"),
    ];
    order_service::create_orders(&store, drafts).await.unwrap();

    let first = order_service::list_orders(&store).await.unwrap();
    let second = order_service::list_orders(&store).await.unwrap();

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.client, b.client);
        assert_eq!(a.product, b.product);
        assert_eq!(a.quantity, b.quantity);
        assert_eq!(a.price, b.price);
        assert_eq!(a.date, b.date);
    }
}

// ---------------------------------------------------------------------------
// Derived views over storage
// ---------------------------------------------------------------------------

#[tokio::test]
async fn date_summaries_reflect_stored_orders() {
    let store = MemoryOrderStore::new();
    let drafts = vec![
        draft("Acme", "bolts", "2", "10", "2024-03-01"),
        draft("Bravo", "screws", "1", "N/A", "2024-03-02"),
    ];
    order_service::create_orders(&store, drafts).await.unwrap();

    let summaries = order_service::date_summaries(&store).await.unwrap();
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].date, "2024-03-01");
    assert_eq!(summaries[1].date, "2024-03-02");
}

#[tokio::test]
async fn date_detail_groups_by_client_for_the_requested_date() {
    let store = MemoryOrderStore::new();
    let drafts = vec![
        draft("Acme", "bolts", "2", "100", "2024-03-01"),
        draft("Acme", "nuts", "1", "50", "2024-03-01"),
        draft("Bravo", "screws", "4", "25", "2024-03-01"),
        draft("Acme", "washers", "9", "9", "2024-03-02"),
    ];
    order_service::create_orders(&store, drafts).await.unwrap();

    let detail = order_service::date_detail(&store, "2024-03-01")
        .await
        .unwrap();
    assert_eq!(detail.clients.len(), 2);
    assert_eq!(detail.clients[0].client, "Acme");
    assert_eq!(detail.clients[0].items.len(), 2);
    assert_eq!(detail.clients[1].client, "Bravo");
}
