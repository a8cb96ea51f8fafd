//! Demo data.
//!
//! Creates a store for the given owner holding one billboard, category,
//! size, color and product, plus a paid order for the product. Inputs go
//! through the same validation as the dashboard forms.

use storedash_admin::db::{
    self, BillboardRepository, CategoryRepository, ColorRepository, NewOrder, OrderRepository,
    ProductRepository, SizeRepository, StoreRepository,
};
use storedash_core::{
    BillboardInput, CategoryInput, ColorInput, ImageInput, NumberInput, OwnerId, ProductInput,
    SizeInput, StoreInput, Validate,
};
use tracing::info;

use super::database_url;

/// Seed a demo store.
///
/// # Errors
///
/// Returns an error if the owner id is invalid, environment variables are
/// missing, or a database operation fails.
pub async fn demo_store(owner: &str, name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let owner = OwnerId::parse(owner)?;
    let pool = db::create_pool(&database_url()?).await?;
    info!("Connected to database");

    let store = StoreRepository::new(&pool)
        .create(&owner, &StoreInput::new(name).validate()?)
        .await?;
    info!(store_id = %store.id, "Created store");

    let billboard = BillboardRepository::new(&pool)
        .create(
            store.id,
            &BillboardInput::new("Summer collection", "https://picsum.photos/seed/summer/1200/400")
                .validate()?,
        )
        .await?;

    let category = CategoryRepository::new(&pool)
        .create(store.id, &CategoryInput::new("Shirts", billboard.id).validate()?)
        .await?;

    let size = SizeRepository::new(&pool)
        .create(store.id, &SizeInput::new("Medium", "M").validate()?)
        .await?;

    let color = ColorRepository::new(&pool)
        .create(store.id, &ColorInput::new("Navy", "#1e3a8a").validate()?)
        .await?;

    let product = ProductInput {
        name: "Linen shirt".to_string(),
        price: Some(NumberInput::Text("49.90".to_string())),
        category_id: category.id.to_string(),
        size_id: size.id.to_string(),
        color_id: color.id.to_string(),
        is_featured: true,
        is_archived: false,
        images: vec![ImageInput {
            url: "https://picsum.photos/seed/shirt/600/600".to_string(),
        }],
    };
    let product = ProductRepository::new(&pool)
        .create(store.id, &product.validate()?)
        .await?;

    let order = OrderRepository::new(&pool)
        .create(
            store.id,
            &NewOrder {
                is_paid: true,
                phone: "+1 555 0100".to_string(),
                address: "1 Market St, Springfield".to_string(),
                product_ids: vec![product.id],
            },
        )
        .await?;

    info!(
        store_id = %store.id,
        product_id = %product.id,
        order_id = %order.id,
        "Demo store seeded"
    );
    Ok(())
}
