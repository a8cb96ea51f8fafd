//! Store repository.
//!
//! Stores are the tenant boundary. Every lookup here is scoped by owner, so a
//! store that exists but belongs to someone else is indistinguishable from a
//! missing one.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use storedash_core::{NewStore, OwnerId, Store, StoreId};

use super::RepositoryError;

#[derive(Debug, sqlx::FromRow)]
struct StoreRow {
    id: StoreId,
    owner_id: String,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<StoreRow> for Store {
    type Error = RepositoryError;

    fn try_from(row: StoreRow) -> Result<Self, Self::Error> {
        let owner_id = OwnerId::parse(&row.owner_id).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid owner id in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            owner_id,
            name: row.name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Number of records of each kind in a store, for the overview page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, sqlx::FromRow)]
pub struct StoreCounts {
    pub billboards: i64,
    pub categories: i64,
    pub sizes: i64,
    pub colors: i64,
    pub products: i64,
    pub orders: i64,
}

impl StoreCounts {
    /// Count for one resource kind.
    #[must_use]
    pub const fn of(&self, kind: storedash_core::ResourceKind) -> i64 {
        use storedash_core::ResourceKind;
        match kind {
            ResourceKind::Billboards => self.billboards,
            ResourceKind::Categories => self.categories,
            ResourceKind::Sizes => self.sizes,
            ResourceKind::Colors => self.colors,
            ResourceKind::Products => self.products,
            ResourceKind::Orders => self.orders,
        }
    }
}

const STORE_COLUMNS: &str = "id, owner_id, name, created_at, updated_at";

/// Repository for store database operations.
pub struct StoreRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StoreRepository<'a> {
    /// Create a new store repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List an owner's stores, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_owner(&self, owner: &OwnerId) -> Result<Vec<Store>, RepositoryError> {
        let rows = sqlx::query_as::<_, StoreRow>(&format!(
            "SELECT {STORE_COLUMNS} FROM dashboard.store WHERE owner_id = $1 ORDER BY created_at"
        ))
        .bind(owner.as_str())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// The owner's oldest store, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn first_for_owner(&self, owner: &OwnerId) -> Result<Option<Store>, RepositoryError> {
        let row = sqlx::query_as::<_, StoreRow>(&format!(
            "SELECT {STORE_COLUMNS} FROM dashboard.store WHERE owner_id = $1 \
             ORDER BY created_at LIMIT 1"
        ))
        .bind(owner.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Get a store if `owner` owns it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_owned(
        &self,
        id: StoreId,
        owner: &OwnerId,
    ) -> Result<Option<Store>, RepositoryError> {
        let row = sqlx::query_as::<_, StoreRow>(&format!(
            "SELECT {STORE_COLUMNS} FROM dashboard.store WHERE id = $1 AND owner_id = $2"
        ))
        .bind(id)
        .bind(owner.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Returns true if the store exists, regardless of owner.
    ///
    /// Public catalogue endpoints use this to tell an empty store from a
    /// missing one.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists(&self, id: StoreId) -> Result<bool, RepositoryError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM dashboard.store WHERE id = $1)")
                .bind(id)
                .fetch_one(self.pool)
                .await?;
        Ok(exists)
    }

    /// Create a store for `owner`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, owner: &OwnerId, input: &NewStore) -> Result<Store, RepositoryError> {
        let row = sqlx::query_as::<_, StoreRow>(&format!(
            "INSERT INTO dashboard.store (id, owner_id, name) VALUES ($1, $2, $3) \
             RETURNING {STORE_COLUMNS}"
        ))
        .bind(StoreId::generate())
        .bind(owner.as_str())
        .bind(&input.name)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// Rename a store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if `owner` has no such store.
    pub async fn rename(
        &self,
        id: StoreId,
        owner: &OwnerId,
        input: &NewStore,
    ) -> Result<Store, RepositoryError> {
        let row = sqlx::query_as::<_, StoreRow>(&format!(
            "UPDATE dashboard.store SET name = $3, updated_at = now() \
             WHERE id = $1 AND owner_id = $2 RETURNING {STORE_COLUMNS}"
        ))
        .bind(id)
        .bind(owner.as_str())
        .bind(&input.name)
        .fetch_optional(self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound)?.try_into()
    }

    /// Delete a store together with its billboards, sizes, colors and orders.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` while the store still has
    /// categories or products, and `RepositoryError::NotFound` if `owner`
    /// has no such store.
    pub async fn delete(&self, id: StoreId, owner: &OwnerId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM dashboard.store WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner.as_str())
            .execute(self.pool)
            .await
            .map_err(RepositoryError::on_delete)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Count the records of every kind in a store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn counts(&self, id: StoreId) -> Result<StoreCounts, RepositoryError> {
        let counts = sqlx::query_as::<_, StoreCounts>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM dashboard.billboard WHERE store_id = $1) AS billboards,
                (SELECT COUNT(*) FROM dashboard.category WHERE store_id = $1) AS categories,
                (SELECT COUNT(*) FROM dashboard.size WHERE store_id = $1) AS sizes,
                (SELECT COUNT(*) FROM dashboard.color WHERE store_id = $1) AS colors,
                (SELECT COUNT(*) FROM dashboard.product WHERE store_id = $1) AS products,
                (SELECT COUNT(*) FROM dashboard."order" WHERE store_id = $1) AS orders
            "#,
        )
        .bind(id)
        .fetch_one(self.pool)
        .await?;

        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_with_blank_owner_is_corrupt() {
        let now = Utc::now();
        let row = StoreRow {
            id: StoreId::generate(),
            owner_id: "  ".to_string(),
            name: "Shop".to_string(),
            created_at: now,
            updated_at: now,
        };
        assert!(matches!(
            Store::try_from(row),
            Err(RepositoryError::DataCorruption(_))
        ));
    }

    #[test]
    fn test_counts_by_kind() {
        let counts = StoreCounts {
            billboards: 1,
            categories: 2,
            sizes: 3,
            colors: 4,
            products: 5,
            orders: 6,
        };
        assert_eq!(counts.of(storedash_core::ResourceKind::Colors), 4);
        assert_eq!(counts.of(storedash_core::ResourceKind::Orders), 6);
    }
}
