//! In-memory engine for tests and local development. Uses RwLock for
//! thread-safe access; not offered by startup engine selection.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::models::{Order, OrderKey, OrderPatch};
use crate::storage::{OrderStorage, StorageError};

#[derive(Default)]
pub struct MemoryOrderStore {
    orders: RwLock<Vec<Order>>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches_key(order: &Order, key: &OrderKey) -> bool {
    order.client == key.client && order.product == key.product && order.date == key.date
}

#[async_trait]
impl OrderStorage for MemoryOrderStore {
    async fn insert_many(&self, orders: &[Order]) -> Result<u64, StorageError> {
        if orders.is_empty() {
            return Err(StorageError::EmptyBatch);
        }

        let mut store = self
            .orders
            .write()
            .map_err(|_| StorageError::Unavailable("order store lock poisoned".to_string()))?;
        store.extend_from_slice(orders);

        Ok(orders.len() as u64)
    }

    async fn find_all(&self) -> Result<Vec<Order>, StorageError> {
        let store = self
            .orders
            .read()
            .map_err(|_| StorageError::Unavailable("order store lock poisoned".to_string()))?;

        Ok(store.clone())
    }

    async fn update_by_key(
        &self,
        key: &OrderKey,
        patch: &OrderPatch,
    ) -> Result<u64, StorageError> {
        let mut store = self
            .orders
            .write()
            .map_err(|_| StorageError::Unavailable("order store lock poisoned".to_string()))?;

        let mut matched = 0;
        for order in store.iter_mut().filter(|o| matches_key(o, key)) {
            if let Some(quantity) = &patch.quantity {
                order.quantity = quantity.clone();
            }
            if let Some(price) = &patch.price {
                order.price = price.clone();
            }
            matched += 1;
        }

        Ok(matched)
    }

    async fn delete_by_key(&self, key: &OrderKey) -> Result<u64, StorageError> {
        let mut store = self
            .orders
            .write()
            .map_err(|_| StorageError::Unavailable("order store lock poisoned".to_string()))?;

        let before = store.len();
        store.retain(|order| !matches_key(order, key));

        Ok((before - store.len()) as u64)
    }
}
