//! Category repository.
//!
//! Categories are always read together with the label of their billboard.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use storedash_core::{BillboardId, Category, CategoryId, NewCategory, StoreId};

use super::RepositoryError;

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: CategoryId,
    store_id: StoreId,
    billboard_id: BillboardId,
    billboard_label: String,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            store_id: row.store_id,
            billboard_id: row.billboard_id,
            billboard_label: row.billboard_label,
            name: row.name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Select list over a `c` relation joined with `dashboard.billboard b`.
const SELECT: &str = "SELECT c.id, c.store_id, c.billboard_id, b.label AS billboard_label, \
                      c.name, c.created_at, c.updated_at";

/// Repository for category database operations.
pub struct CategoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a store's categories, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, store_id: StoreId) -> Result<Vec<Category>, RepositoryError> {
        let rows = sqlx::query_as::<_, CategoryRow>(&format!(
            "{SELECT} FROM dashboard.category c \
             JOIN dashboard.billboard b ON b.id = c.billboard_id \
             WHERE c.store_id = $1 ORDER BY c.created_at DESC"
        ))
        .bind(store_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get one category of a store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(
        &self,
        store_id: StoreId,
        id: CategoryId,
    ) -> Result<Option<Category>, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(&format!(
            "{SELECT} FROM dashboard.category c \
             JOIN dashboard.billboard b ON b.id = c.billboard_id \
             WHERE c.store_id = $1 AND c.id = $2"
        ))
        .bind(store_id)
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Create a category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidReference` if the billboard is not
    /// in the store.
    pub async fn create(
        &self,
        store_id: StoreId,
        input: &NewCategory,
    ) -> Result<Category, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(&format!(
            "WITH c AS ( \
                 INSERT INTO dashboard.category (id, store_id, billboard_id, name) \
                 VALUES ($1, $2, $3, $4) RETURNING * \
             ) \
             {SELECT} FROM c JOIN dashboard.billboard b ON b.id = c.billboard_id"
        ))
        .bind(CategoryId::generate())
        .bind(store_id)
        .bind(input.billboard_id)
        .bind(&input.name)
        .fetch_one(self.pool)
        .await
        .map_err(RepositoryError::on_write)?;

        Ok(row.into())
    }

    /// Replace a category's name and billboard.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the store has no such category
    /// and `RepositoryError::InvalidReference` if the billboard is not in
    /// the store.
    pub async fn update(
        &self,
        store_id: StoreId,
        id: CategoryId,
        input: &NewCategory,
    ) -> Result<Category, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(&format!(
            "WITH c AS ( \
                 UPDATE dashboard.category SET name = $3, billboard_id = $4, updated_at = now() \
                 WHERE store_id = $1 AND id = $2 RETURNING * \
             ) \
             {SELECT} FROM c JOIN dashboard.billboard b ON b.id = c.billboard_id"
        ))
        .bind(store_id)
        .bind(id)
        .bind(&input.name)
        .bind(input.billboard_id)
        .fetch_optional(self.pool)
        .await
        .map_err(RepositoryError::on_write)?;

        row.map(Into::into).ok_or(RepositoryError::NotFound)
    }

    /// Delete a category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` while products still use it and
    /// `RepositoryError::NotFound` if the store has no such category.
    pub async fn delete(&self, store_id: StoreId, id: CategoryId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM dashboard.category WHERE store_id = $1 AND id = $2")
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
