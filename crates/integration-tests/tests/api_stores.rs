//! Store management API tests.
//!
//! These tests require:
//! - A migrated `PostgreSQL` database
//! - The dashboard running (cargo run -p storedash-admin)

use storedash_client::ClientError;
use storedash_client::endpoint::{Billboards, Categories, Sizes};
use storedash_core::{BillboardInput, CategoryInput, STORE_CONFLICT_MESSAGE, SizeInput};
use storedash_integration_tests::{client_for, owner_with_store, public_client, unique_owner};

#[tokio::test]
#[ignore = "Requires running dashboard server and PostgreSQL"]
async fn test_store_lifecycle() {
    let client = client_for(&unique_owner());
    assert!(client.list_stores().await.expect("list").is_empty());

    let store = client.create_store("Shoes").await.expect("create");
    let renamed = client
        .rename_store(store.id, "Sneakers")
        .await
        .expect("rename");
    assert_eq!(renamed.name, "Sneakers");

    let stores = client.list_stores().await.expect("list");
    assert_eq!(stores.len(), 1);
    assert_eq!(client.get_store(store.id).await.expect("get").name, "Sneakers");

    client.delete_store(store.id).await.expect("delete empty store");
    assert!(matches!(
        client.get_store(store.id).await,
        Err(ClientError::NotFound)
    ));
}

#[tokio::test]
#[ignore = "Requires running dashboard server and PostgreSQL"]
async fn test_store_with_categories_cannot_be_deleted() {
    let (client, store) = owner_with_store().await;
    let billboard = client
        .create::<Billboards>(
            store.id,
            &BillboardInput::new("Hero", "https://example.com/hero.png"),
        )
        .await
        .expect("billboard");
    client
        .create::<Categories>(store.id, &CategoryInput::new("Shirts", billboard.id))
        .await
        .expect("category");

    let err = client.delete_store(store.id).await.expect_err("has categories");
    assert_eq!(err.to_string(), STORE_CONFLICT_MESSAGE);
    client.get_store(store.id).await.expect("store still exists");
}

#[tokio::test]
#[ignore = "Requires running dashboard server and PostgreSQL"]
async fn test_store_with_only_sizes_can_be_deleted() {
    let (client, store) = owner_with_store().await;
    client
        .create::<Sizes>(store.id, &SizeInput::new("Small", "S"))
        .await
        .expect("size");

    client.delete_store(store.id).await.expect("no products or categories");
}

#[tokio::test]
#[ignore = "Requires running dashboard server and PostgreSQL"]
async fn test_foreign_store_is_indistinguishable_from_missing() {
    let (_, store) = owner_with_store().await;
    let intruder = client_for(&unique_owner());

    assert!(matches!(
        intruder.get_store(store.id).await,
        Err(ClientError::NotFound)
    ));
    assert!(matches!(
        intruder.rename_store(store.id, "Mine now").await,
        Err(ClientError::NotFound)
    ));
    assert!(matches!(
        intruder.delete_store(store.id).await,
        Err(ClientError::NotFound)
    ));
}

#[tokio::test]
#[ignore = "Requires running dashboard server and PostgreSQL"]
async fn test_store_routes_require_identity() {
    assert!(matches!(
        public_client().list_stores().await,
        Err(ClientError::Unauthorized)
    ));
}
