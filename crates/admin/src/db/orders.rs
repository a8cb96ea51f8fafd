//! Order repository.
//!
//! The dashboard only reads orders. [`OrderRepository::create`] exists for
//! the storefront checkout and for seeding demo data.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};

use storedash_core::{Order, OrderId, OrderItem, OrderItemId, Price, ProductId, StoreId};

use super::RepositoryError;

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: OrderId,
    store_id: StoreId,
    is_paid: bool,
    phone: String,
    address: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self, items: Vec<OrderItem>) -> Order {
        Order {
            id: self.id,
            store_id: self.store_id,
            is_paid: self.is_paid,
            phone: self.phone,
            address: self.address,
            items,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow {
    id: OrderItemId,
    order_id: OrderId,
    product_id: ProductId,
    product_name: String,
    price: Decimal,
}

/// A new order as placed by a customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub is_paid: bool,
    pub phone: String,
    pub address: String,
    pub product_ids: Vec<ProductId>,
}

const COLUMNS: &str = "id, store_id, is_paid, phone, address, created_at, updated_at";

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a store's orders with their items, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list(&self, store_id: StoreId) -> Result<Vec<Order>, RepositoryError> {
        let mut conn = self.pool.acquire().await?;

        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            r#"SELECT {COLUMNS} FROM dashboard."order" WHERE store_id = $1 ORDER BY created_at DESC"#
        ))
        .bind(store_id)
        .fetch_all(&mut *conn)
        .await?;

        let ids: Vec<OrderId> = rows.iter().map(|row| row.id).collect();
        let mut items = load_items(&mut *conn, &ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let order_items = items.remove(&row.id).unwrap_or_default();
                row.into_order(order_items)
            })
            .collect())
    }

    /// Get one order of a store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get(
        &self,
        store_id: StoreId,
        id: OrderId,
    ) -> Result<Option<Order>, RepositoryError> {
        let mut conn = self.pool.acquire().await?;

        let row = sqlx::query_as::<_, OrderRow>(&format!(
            r#"SELECT {COLUMNS} FROM dashboard."order" WHERE store_id = $1 AND id = $2"#
        ))
        .bind(store_id)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut items = load_items(&mut *conn, &[id]).await?;
        Ok(Some(row.into_order(items.remove(&id).unwrap_or_default())))
    }

    /// Place an order for products of the store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidReference` if a product is not in
    /// the store.
    pub async fn create(&self, store_id: StoreId, input: &NewOrder) -> Result<Order, RepositoryError> {
        let id = OrderId::generate();
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, OrderRow>(&format!(
            r#"INSERT INTO dashboard."order" (id, store_id, is_paid, phone, address)
               VALUES ($1, $2, $3, $4, $5) RETURNING {COLUMNS}"#
        ))
        .bind(id)
        .bind(store_id)
        .bind(input.is_paid)
        .bind(&input.phone)
        .bind(&input.address)
        .fetch_one(&mut *tx)
        .await?;

        for product_id in &input.product_ids {
            sqlx::query(
                "INSERT INTO dashboard.order_item (id, order_id, store_id, product_id) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(OrderItemId::generate())
            .bind(id)
            .bind(store_id)
            .bind(*product_id)
            .execute(&mut *tx)
            .await
            .map_err(RepositoryError::on_write)?;
        }

        let mut items = load_items(&mut *tx, &[id]).await?;
        tx.commit().await?;

        Ok(row.into_order(items.remove(&id).unwrap_or_default()))
    }
}

async fn load_items(
    conn: &mut PgConnection,
    order_ids: &[OrderId],
) -> Result<HashMap<OrderId, Vec<OrderItem>>, RepositoryError> {
    if order_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let ids: Vec<uuid::Uuid> = order_ids.iter().map(OrderId::as_uuid).collect();
    let rows = sqlx::query_as::<_, OrderItemRow>(
        "SELECT oi.id, oi.order_id, oi.product_id, p.name AS product_name, p.price \
         FROM dashboard.order_item oi \
         JOIN dashboard.product p ON p.id = oi.product_id \
         WHERE oi.order_id = ANY($1) \
         ORDER BY p.name",
    )
    .bind(ids)
    .fetch_all(conn)
    .await?;

    let mut items: HashMap<OrderId, Vec<OrderItem>> = HashMap::new();
    for row in rows {
        items.entry(row.order_id).or_default().push(OrderItem {
            id: row.id,
            product_id: row.product_id,
            product_name: row.product_name,
            price: Price::from_trusted(row.price),
        });
    }
    Ok(items)
}
