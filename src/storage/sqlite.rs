use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::models::{Order, OrderKey, OrderPatch};
use crate::storage::{OrderStorage, StorageError};

// Relational-file engine. One table, textual quantity/price columns, and a
// surrogate rowid that is never used for addressing.
pub struct SqliteOrderStore {
    pool: SqlitePool,
}

impl SqliteOrderStore {
    /// Open (or create) the database file and ensure the schema exists.
    /// Safe to call more than once: schema creation is IF NOT EXISTS.
    pub async fn connect(url: &str) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(10)
            .connect_with(options)
            .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS orders (
                 id INTEGER PRIMARY KEY AUTOINCREMENT,
                 client TEXT NOT NULL,
                 product TEXT NOT NULL,
                 quantity TEXT,
                 price TEXT,
                 date TEXT NOT NULL
             )",
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl OrderStorage for SqliteOrderStore {
    async fn insert_many(&self, orders: &[Order]) -> Result<u64, StorageError> {
        if orders.is_empty() {
            return Err(StorageError::EmptyBatch);
        }

        // One transaction for the whole batch: all rows land or none do.
        let mut tx = self.pool.begin().await?;
        for order in orders {
            sqlx::query(
                "INSERT INTO orders (client, product, quantity, price, date)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )
            .bind(&order.client)
            .bind(&order.product)
            .bind(&order.quantity)
            .bind(&order.price)
            .bind(&order.date)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        Ok(orders.len() as u64)
    }

    async fn find_all(&self) -> Result<Vec<Order>, StorageError> {
        let orders = sqlx::query_as::<_, Order>(
            "SELECT client, product, quantity, price, date
             FROM orders
             ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    async fn update_by_key(
        &self,
        key: &OrderKey,
        patch: &OrderPatch,
    ) -> Result<u64, StorageError> {
        // NULL binds keep the existing column value, so only the present
        // patch fields are written.
        let result = sqlx::query(
            "UPDATE orders
             SET quantity = COALESCE(?1, quantity),
                 price = COALESCE(?2, price)
             WHERE client = ?3 AND product = ?4 AND date = ?5",
        )
        .bind(patch.quantity.as_deref())
        .bind(patch.price.as_deref())
        .bind(&key.client)
        .bind(&key.product)
        .bind(&key.date)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete_by_key(&self, key: &OrderKey) -> Result<u64, StorageError> {
        let result = sqlx::query(
            "DELETE FROM orders
             WHERE client = ?1 AND product = ?2 AND date = ?3",
        )
        .bind(&key.client)
        .bind(&key.product)
        .bind(&key.date)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
