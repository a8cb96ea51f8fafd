//! Per-store resource API tests.
//!
//! These tests require:
//! - A migrated `PostgreSQL` database
//! - The dashboard running (cargo run -p storedash-admin)

use storedash_client::endpoint::{Billboards, Categories, Colors, Orders, Products, Sizes};
use storedash_client::{ClientError, ProductQuery};
use storedash_core::{
    BillboardInput, CategoryInput, ColorInput, ImageInput, NumberInput, ProductInput,
    ResourceKind, SizeInput, StoreId,
};
use storedash_integration_tests::{owner_with_store, public_client};

/// Post a raw JSON product, bypassing the client's own validation.
async fn post_product(
    client: &storedash_client::DashboardClient,
    store: StoreId,
    body: &serde_json::Value,
) -> (reqwest::StatusCode, serde_json::Value) {
    let url = client
        .base_url()
        .join(&format!("api/{store}/products"))
        .expect("products url");
    let response = reqwest::Client::new()
        .post(url)
        .header("x-user-id", client.owner().expect("owner"))
        .json(body)
        .send()
        .await
        .expect("request");
    let status = response.status();
    (status, response.json().await.expect("json body"))
}

fn product_input(category: &str, size: &str, color: &str, archived: bool) -> ProductInput {
    ProductInput {
        name: "Linen shirt".to_string(),
        price: Some(NumberInput::Text("19.99".to_string())),
        category_id: category.to_string(),
        size_id: size.to_string(),
        color_id: color.to_string(),
        is_featured: !archived,
        is_archived: archived,
        images: vec![ImageInput {
            url: "https://example.com/shirt.png".to_string(),
        }],
    }
}

#[tokio::test]
#[ignore = "Requires running dashboard server and PostgreSQL"]
async fn test_created_billboard_is_listed_once() {
    let (client, store) = owner_with_store().await;

    let created = client
        .create::<Billboards>(
            store.id,
            &BillboardInput::new("Summer", "https://example.com/summer.png"),
        )
        .await
        .expect("create billboard");

    let listed = public_client()
        .list::<Billboards>(store.id)
        .await
        .expect("list billboards");
    assert_eq!(listed.iter().filter(|b| b.id == created.id).count(), 1);

    let fetched = public_client()
        .get::<Billboards>(store.id, created.id)
        .await
        .expect("get billboard");
    assert_eq!(fetched.label, "Summer");
}

#[tokio::test]
#[ignore = "Requires running dashboard server and PostgreSQL"]
async fn test_update_replaces_fields() {
    let (client, store) = owner_with_store().await;
    let size = client
        .create::<Sizes>(store.id, &SizeInput::new("Small", "S"))
        .await
        .expect("create size");

    let updated = client
        .update::<Sizes>(store.id, size.id, &SizeInput::new("Large", "L"))
        .await
        .expect("update size");

    assert_eq!(updated.id, size.id);
    assert_eq!(updated.name, "Large");
    assert_eq!(updated.value, "L");
}

#[tokio::test]
#[ignore = "Requires running dashboard server and PostgreSQL"]
async fn test_referenced_billboard_cannot_be_deleted() {
    let (client, store) = owner_with_store().await;
    let billboard = client
        .create::<Billboards>(
            store.id,
            &BillboardInput::new("Hero", "https://example.com/hero.png"),
        )
        .await
        .expect("create billboard");
    let category = client
        .create::<Categories>(store.id, &CategoryInput::new("Shirts", billboard.id))
        .await
        .expect("create category");

    let err = client
        .delete::<Billboards>(store.id, billboard.id)
        .await
        .expect_err("billboard is referenced");
    assert!(matches!(
        &err,
        ClientError::Conflict(message) if *message == ResourceKind::Billboards.conflict_message()
    ));

    client
        .get::<Billboards>(store.id, billboard.id)
        .await
        .expect("billboard still exists");
    client
        .get::<Categories>(store.id, category.id)
        .await
        .expect("category still exists");

    client
        .delete::<Categories>(store.id, category.id)
        .await
        .expect("delete category");
    client
        .delete::<Billboards>(store.id, billboard.id)
        .await
        .expect("delete billboard once unreferenced");
}

#[tokio::test]
#[ignore = "Requires running dashboard server and PostgreSQL"]
async fn test_reference_from_another_store_is_rejected() {
    let (client, store) = owner_with_store().await;
    let (other_client, other_store) = owner_with_store().await;
    let foreign_billboard = other_client
        .create::<Billboards>(
            other_store.id,
            &BillboardInput::new("Theirs", "https://example.com/theirs.png"),
        )
        .await
        .expect("create billboard");

    let err = client
        .create::<Categories>(
            store.id,
            &CategoryInput::new("Shirts", foreign_billboard.id),
        )
        .await
        .expect_err("foreign reference");
    assert!(matches!(err, ClientError::InvalidReference(_)));
}

#[tokio::test]
#[ignore = "Requires running dashboard server and PostgreSQL"]
async fn test_foreign_store_writes_are_not_found() {
    let (_, store) = owner_with_store().await;
    let (intruder, _) = owner_with_store().await;

    let err = intruder
        .create::<Colors>(store.id, &ColorInput::new("Red", "#ff0000"))
        .await
        .expect_err("not the owner");
    assert!(matches!(err, ClientError::NotFound));
}

#[tokio::test]
#[ignore = "Requires running dashboard server and PostgreSQL"]
async fn test_unknown_store_is_not_found() {
    let err = public_client()
        .list::<Sizes>(StoreId::generate())
        .await
        .expect_err("no such store");
    assert!(matches!(err, ClientError::NotFound));
}

#[tokio::test]
#[ignore = "Requires running dashboard server and PostgreSQL"]
async fn test_product_filters_and_archived_visibility() {
    let (client, store) = owner_with_store().await;
    let billboard = client
        .create::<Billboards>(
            store.id,
            &BillboardInput::new("Hero", "https://example.com/hero.png"),
        )
        .await
        .expect("billboard");
    let category = client
        .create::<Categories>(store.id, &CategoryInput::new("Shirts", billboard.id))
        .await
        .expect("category");
    let size = client
        .create::<Sizes>(store.id, &SizeInput::new("Medium", "M"))
        .await
        .expect("size");
    let color = client
        .create::<Colors>(store.id, &ColorInput::new("Navy", "#1e3a8a"))
        .await
        .expect("color");

    let (category, size, color) = (
        category.id.to_string(),
        size.id.to_string(),
        color.id.to_string(),
    );
    let visible = client
        .create::<Products>(store.id, &product_input(&category, &size, &color, false))
        .await
        .expect("visible product");
    let archived = client
        .create::<Products>(store.id, &product_input(&category, &size, &color, true))
        .await
        .expect("archived product");
    assert_eq!(visible.price.to_string(), "19.99");

    let public = public_client()
        .list_products(store.id, &ProductQuery::default())
        .await
        .expect("public listing");
    assert!(public.iter().any(|p| p.id == visible.id));
    assert!(public.iter().all(|p| p.id != archived.id));

    let featured = public_client()
        .list_products(
            store.id,
            &ProductQuery {
                is_featured: Some(true),
                ..ProductQuery::default()
            },
        )
        .await
        .expect("featured listing");
    assert!(featured.iter().all(|p| p.is_featured));

    let owned = client
        .list::<Products>(store.id)
        .await
        .expect("owner listing");
    assert!(owned.iter().any(|p| p.id == archived.id));
}

#[tokio::test]
#[ignore = "Requires running dashboard server and PostgreSQL"]
async fn test_orders_are_owner_only() {
    let (client, store) = owner_with_store().await;

    let orders = client.list::<Orders>(store.id).await.expect("owner orders");
    assert!(orders.is_empty());

    let err = public_client()
        .list::<Orders>(store.id)
        .await
        .expect_err("anonymous");
    assert!(matches!(err, ClientError::Unauthorized));
}

#[tokio::test]
#[ignore = "Requires running dashboard server and PostgreSQL"]
async fn test_price_outside_cents_range_is_a_field_error() {
    let (client, store) = owner_with_store().await;
    let billboard = client
        .create::<Billboards>(
            store.id,
            &BillboardInput::new("Hero", "https://example.com/hero.png"),
        )
        .await
        .expect("billboard");
    let category = client
        .create::<Categories>(store.id, &CategoryInput::new("Shirts", billboard.id))
        .await
        .expect("category");
    let size = client
        .create::<Sizes>(store.id, &SizeInput::new("Medium", "M"))
        .await
        .expect("size");
    let color = client
        .create::<Colors>(store.id, &ColorInput::new("Navy", "#1e3a8a"))
        .await
        .expect("color");

    let product = |price: serde_json::Value| {
        serde_json::json!({
            "name": "Linen shirt",
            "price": price,
            "categoryId": category.id.to_string(),
            "sizeId": size.id.to_string(),
            "colorId": color.id.to_string(),
            "images": [{"url": "https://example.com/shirt.png"}],
        })
    };

    let (status, body) = post_product(&client, store.id, &product(100_000_000_000_u64.into())).await;
    assert_eq!(status, reqwest::StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"][0]["field"], "price");
    assert_eq!(body["errors"][0]["message"], "Price must be less than 10000000000");

    let (status, body) = post_product(&client, store.id, &product(1.999.into())).await;
    assert_eq!(status, reqwest::StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"][0]["message"], "Price can have at most 2 decimal places");

    let (status, body) = post_product(&client, store.id, &product("9999999999.99".into())).await;
    assert_eq!(status, reqwest::StatusCode::CREATED);
    assert_eq!(body["price"], "9999999999.99");

    let products = client.list::<Products>(store.id).await.expect("owner listing");
    assert_eq!(products.len(), 1);
}
