//! Product repository.
//!
//! A product owns an ordered list of images. Writes replace the whole list
//! inside the same transaction as the product row, so readers never see a
//! product with half of its images.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};

use storedash_core::{
    CategoryId, ColorId, Image, ImageId, NewProduct, Price, Product, ProductId, SizeId, StoreId,
};

use super::RepositoryError;

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    store_id: StoreId,
    category_id: CategoryId,
    category_name: String,
    size_id: SizeId,
    size_name: String,
    color_id: ColorId,
    color_value: String,
    name: String,
    price: Decimal,
    is_featured: bool,
    is_archived: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_product(self, images: Vec<Image>) -> Result<Product, RepositoryError> {
        let price = Price::new(self.price).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid price for product {}: {e}", self.id))
        })?;

        Ok(Product {
            id: self.id,
            store_id: self.store_id,
            category_id: self.category_id,
            category_name: self.category_name,
            size_id: self.size_id,
            size_name: self.size_name,
            color_id: self.color_id,
            color_value: self.color_value,
            name: self.name,
            price,
            is_featured: self.is_featured,
            is_archived: self.is_archived,
            images,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ImageRow {
    id: ImageId,
    product_id: ProductId,
    url: String,
}

/// Filters for product listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub category_id: Option<CategoryId>,
    pub color_id: Option<ColorId>,
    pub size_id: Option<SizeId>,
    pub is_featured: Option<bool>,
    /// Archived products are hidden from storefronts but listed for owners.
    pub include_archived: bool,
}

impl ProductFilter {
    /// Everything, archived included.
    #[must_use]
    pub fn all() -> Self {
        Self {
            include_archived: true,
            ..Self::default()
        }
    }
}

const SELECT: &str = "SELECT p.id, p.store_id, p.category_id, c.name AS category_name, \
                      p.size_id, s.name AS size_name, p.color_id, co.value AS color_value, \
                      p.name, p.price, p.is_featured, p.is_archived, p.created_at, p.updated_at \
                      FROM dashboard.product p \
                      JOIN dashboard.category c ON c.id = p.category_id \
                      JOIN dashboard.size s ON s.id = p.size_id \
                      JOIN dashboard.color co ON co.id = p.color_id";

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a store's products matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list(
        &self,
        store_id: StoreId,
        filter: ProductFilter,
    ) -> Result<Vec<Product>, RepositoryError> {
        let mut conn = self.pool.acquire().await?;

        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "{SELECT} WHERE p.store_id = $1 \
               AND ($2::uuid IS NULL OR p.category_id = $2) \
               AND ($3::uuid IS NULL OR p.color_id = $3) \
               AND ($4::uuid IS NULL OR p.size_id = $4) \
               AND ($5::boolean IS NULL OR p.is_featured = $5) \
               AND ($6 OR NOT p.is_archived) \
             ORDER BY p.created_at DESC"
        ))
        .bind(store_id)
        .bind(filter.category_id)
        .bind(filter.color_id)
        .bind(filter.size_id)
        .bind(filter.is_featured)
        .bind(filter.include_archived)
        .fetch_all(&mut *conn)
        .await?;

        let ids: Vec<ProductId> = rows.iter().map(|row| row.id).collect();
        let mut images = load_images(&mut *conn, &ids).await?;

        rows.into_iter()
            .map(|row| {
                let product_images = images.remove(&row.id).unwrap_or_default();
                row.into_product(product_images)
            })
            .collect()
    }

    /// Get one product of a store, archived or not.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get(
        &self,
        store_id: StoreId,
        id: ProductId,
    ) -> Result<Option<Product>, RepositoryError> {
        let mut conn = self.pool.acquire().await?;
        load_product(&mut *conn, store_id, id).await
    }

    /// Create a product and its images.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidReference` if the category, size or
    /// color is not in the store.
    pub async fn create(
        &self,
        store_id: StoreId,
        input: &NewProduct,
    ) -> Result<Product, RepositoryError> {
        let id = ProductId::generate();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO dashboard.product \
                 (id, store_id, category_id, size_id, color_id, name, price, is_featured, is_archived) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(id)
        .bind(store_id)
        .bind(input.category_id)
        .bind(input.size_id)
        .bind(input.color_id)
        .bind(&input.name)
        .bind(input.price.amount())
        .bind(input.is_featured)
        .bind(input.is_archived)
        .execute(&mut *tx)
        .await
        .map_err(RepositoryError::on_write)?;

        insert_images(&mut *tx, id, &input.images).await?;
        let product = load_product(&mut *tx, store_id, id)
            .await?
            .ok_or_else(|| RepositoryError::DataCorruption(format!("product {id} vanished")))?;

        tx.commit().await?;
        tracing::debug!(product_id = %id, images = input.images.len(), "Product created");
        Ok(product)
    }

    /// Replace a product's fields and its whole image list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the store has no such product
    /// and `RepositoryError::InvalidReference` if the category, size or
    /// color is not in the store.
    pub async fn update(
        &self,
        store_id: StoreId,
        id: ProductId,
        input: &NewProduct,
    ) -> Result<Product, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "UPDATE dashboard.product SET category_id = $3, size_id = $4, color_id = $5, \
                 name = $6, price = $7, is_featured = $8, is_archived = $9, updated_at = now() \
             WHERE store_id = $1 AND id = $2",
        )
        .bind(store_id)
        .bind(id)
        .bind(input.category_id)
        .bind(input.size_id)
        .bind(input.color_id)
        .bind(&input.name)
        .bind(input.price.amount())
        .bind(input.is_featured)
        .bind(input.is_archived)
        .execute(&mut *tx)
        .await
        .map_err(RepositoryError::on_write)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        sqlx::query("DELETE FROM dashboard.image WHERE product_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        insert_images(&mut *tx, id, &input.images).await?;

        let product = load_product(&mut *tx, store_id, id)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        tx.commit().await?;
        Ok(product)
    }

    /// Delete a product and its images.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` while orders still reference it
    /// and `RepositoryError::NotFound` if the store has no such product.
    pub async fn delete(&self, store_id: StoreId, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM dashboard.product WHERE store_id = $1 AND id = $2")
            .bind(store_id)
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(RepositoryError::on_delete)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

async fn load_product(
    conn: &mut PgConnection,
    store_id: StoreId,
    id: ProductId,
) -> Result<Option<Product>, RepositoryError> {
    let row = sqlx::query_as::<_, ProductRow>(&format!(
        "{SELECT} WHERE p.store_id = $1 AND p.id = $2"
    ))
    .bind(store_id)
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let mut images = load_images(conn, &[id]).await?;
    row.into_product(images.remove(&id).unwrap_or_default())
        .map(Some)
}

async fn load_images(
    conn: &mut PgConnection,
    product_ids: &[ProductId],
) -> Result<HashMap<ProductId, Vec<Image>>, RepositoryError> {
    if product_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let ids: Vec<uuid::Uuid> = product_ids.iter().map(ProductId::as_uuid).collect();
    let rows = sqlx::query_as::<_, ImageRow>(
        "SELECT id, product_id, url FROM dashboard.image \
         WHERE product_id = ANY($1) ORDER BY product_id, position",
    )
    .bind(ids)
    .fetch_all(conn)
    .await?;

    let mut images: HashMap<ProductId, Vec<Image>> = HashMap::new();
    for row in rows {
        images.entry(row.product_id).or_default().push(Image {
            id: row.id,
            url: row.url,
        });
    }
    Ok(images)
}

async fn insert_images(
    conn: &mut PgConnection,
    product_id: ProductId,
    urls: &[String],
) -> Result<(), RepositoryError> {
    for (position, url) in (0_i32..).zip(urls) {
        sqlx::query(
            "INSERT INTO dashboard.image (id, product_id, url, position) VALUES ($1, $2, $3, $4)",
        )
        .bind(ImageId::generate())
        .bind(product_id)
        .bind(url)
        .bind(position)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_all_includes_archived() {
        let filter = ProductFilter::all();
        assert!(filter.include_archived);
        assert!(filter.category_id.is_none());
        assert!(!ProductFilter::default().include_archived);
    }

    #[test]
    fn test_row_with_bad_price_is_corrupt() {
        let now = Utc::now();
        let row = ProductRow {
            id: ProductId::generate(),
            store_id: StoreId::generate(),
            category_id: CategoryId::generate(),
            category_name: "Shirts".to_string(),
            size_id: SizeId::generate(),
            size_name: "Large".to_string(),
            color_id: ColorId::generate(),
            color_value: "#000000".to_string(),
            name: "Tee".to_string(),
            price: Decimal::ZERO,
            is_featured: false,
            is_archived: false,
            created_at: now,
            updated_at: now,
        };
        assert!(matches!(
            row.into_product(Vec::new()),
            Err(RepositoryError::DataCorruption(_))
        ));
    }
}
