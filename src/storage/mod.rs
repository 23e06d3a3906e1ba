use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Order, OrderKey, OrderPatch};

mod memory;
mod mongo;
mod sqlite;

pub use memory::MemoryOrderStore;
pub use mongo::MongoOrderStore;
pub use sqlite::SqliteOrderStore;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("empty order batch")]
    EmptyBatch,
    #[error("sqlite error: {0}")]
    Sqlite(#[from] sqlx::Error),
    #[error("mongodb error: {0}")]
    Mongo(#[from] mongodb::error::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Uniform contract over the interchangeable storage engines. One
/// implementation is selected at startup, wrapped in an `Arc`, and shared for
/// the life of the process; engines are never mixed at runtime.
///
/// The store keeps a flat bag of order records. It does not enforce
/// uniqueness of the (client, product, date) triple: duplicates inserted
/// directly will all be touched by `update_by_key` and `delete_by_key`.
#[async_trait]
pub trait OrderStorage: Send + Sync {
    /// Append every record in the batch and return how many were inserted.
    /// An empty batch is rejected with [`StorageError::EmptyBatch`].
    async fn insert_many(&self, orders: &[Order]) -> Result<u64, StorageError>;

    /// Full scan of the record set. No filtering, no pagination; grouping
    /// happens downstream on the returned snapshot.
    async fn find_all(&self) -> Result<Vec<Order>, StorageError>;

    /// Apply the present patch fields to every record matching the key
    /// exactly. Returns the matched count; 0 means nothing to update.
    async fn update_by_key(&self, key: &OrderKey, patch: &OrderPatch)
        -> Result<u64, StorageError>;

    /// Physically remove every record matching the key exactly. Returns the
    /// deleted count; 0 means nothing matched.
    async fn delete_by_key(&self, key: &OrderKey) -> Result<u64, StorageError>;
}
