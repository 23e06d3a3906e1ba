//! Document-store engine backed by the official MongoDB async driver.
//!
//! Orders are serialized straight from [`Order`] via serde; the
//! driver-generated `_id` stays in the collection and is ignored on read.
//! Unlike the SQLite engine, `insert_many` here carries no batch atomicity
//! guarantee: a mid-batch driver failure can leave earlier documents
//! inserted.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::{Client, Collection};

use crate::models::{Order, OrderKey, OrderPatch};
use crate::storage::{OrderStorage, StorageError};

const DB_NAME: &str = "orderdesk";
const COLLECTION: &str = "orders";

pub struct MongoOrderStore {
    orders: Collection<Order>,
}

impl MongoOrderStore {
    /// Connect using the given URI. The database name comes from the URI's
    /// default database when present, falling back to `orderdesk`.
    pub async fn connect(uri: &str) -> Result<Self, StorageError> {
        let client = Client::with_uri_str(uri).await?;
        let database = client
            .default_database()
            .unwrap_or_else(|| client.database(DB_NAME));

        Ok(Self {
            orders: database.collection::<Order>(COLLECTION),
        })
    }

    fn key_filter(key: &OrderKey) -> Document {
        doc! {
            "client": key.client.as_str(),
            "product": key.product.as_str(),
            "date": key.date.as_str(),
        }
    }
}

#[async_trait]
impl OrderStorage for MongoOrderStore {
    async fn insert_many(&self, orders: &[Order]) -> Result<u64, StorageError> {
        if orders.is_empty() {
            return Err(StorageError::EmptyBatch);
        }

        let result = self.orders.insert_many(orders).await?;
        Ok(result.inserted_ids.len() as u64)
    }

    async fn find_all(&self) -> Result<Vec<Order>, StorageError> {
        let cursor = self.orders.find(doc! {}).await?;
        let orders: Vec<Order> = cursor.try_collect().await?;
        Ok(orders)
    }

    async fn update_by_key(
        &self,
        key: &OrderKey,
        patch: &OrderPatch,
    ) -> Result<u64, StorageError> {
        let filter = Self::key_filter(key);

        let mut set = Document::new();
        if let Some(quantity) = &patch.quantity {
            set.insert("quantity", quantity.as_str());
        }
        if let Some(price) = &patch.price {
            set.insert("price", price.as_str());
        }

        // Nothing to write: report how many records the key addresses so the
        // caller can still distinguish NotFound.
        if set.is_empty() {
            let matched = self.orders.count_documents(filter).await?;
            return Ok(matched);
        }

        let result = self.orders.update_many(filter, doc! { "$set": set }).await?;
        Ok(result.matched_count)
    }

    async fn delete_by_key(&self, key: &OrderKey) -> Result<u64, StorageError> {
        let result = self.orders.delete_many(Self::key_filter(key)).await?;
        Ok(result.deleted_count)
    }
}
