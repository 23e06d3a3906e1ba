use chrono::{DateTime, Utc};

use crate::errors::AppError;
use crate::models::{
    parse_quantity, DashboardSummary, DateDetail, DateSummary, DeleteOrderRequest, Order,
    OrderDraft, OrderKey, OrderPatch, UpdateOrderRequest, UNPRICED,
};
use crate::services::aggregation;
use crate::storage::OrderStorage;

/// Validate a batch of drafts, collapse same-key lines, and hand the result
/// to storage. The batch never reaches storage when validation fails.
pub async fn create_orders(
    storage: &dyn OrderStorage,
    drafts: Vec<OrderDraft>,
) -> Result<u64, AppError> {
    if drafts.is_empty() {
        return Err(AppError::Validation(
            "Invalid or empty orders array.".to_string(),
        ));
    }
    for draft in &drafts {
        if draft.client.is_empty() || draft.product.is_empty() || draft.date.is_empty() {
            return Err(AppError::Validation(
                "Missing required fields (client, product, date)".to_string(),
            ));
        }
    }

    let orders = merge_drafts(drafts);
    let inserted = storage.insert_many(&orders).await?;
    Ok(inserted)
}

/// Collapse drafts that share the (client, product, date) key: quantities
/// accumulate, the last non-empty price wins, and a line that never names a
/// price is stored as unpriced.
pub fn merge_drafts(drafts: Vec<OrderDraft>) -> Vec<Order> {
    let mut merged: Vec<Order> = Vec::with_capacity(drafts.len());
    for draft in drafts {
        match merged.iter_mut().find(|o| {
            o.client == draft.client && o.product == draft.product && o.date == draft.date
        }) {
            Some(existing) => {
                let combined = parse_quantity(&existing.quantity) + parse_quantity(&draft.quantity);
                existing.quantity = combined.to_string();
                if !draft.price.is_empty() {
                    existing.price = draft.price;
                }
            }
            None => merged.push(Order {
                client: draft.client,
                product: draft.product,
                quantity: draft.quantity,
                price: if draft.price.is_empty() {
                    UNPRICED.to_string()
                } else {
                    draft.price
                },
                date: draft.date,
            }),
        }
    }
    merged
}

pub async fn list_orders(storage: &dyn OrderStorage) -> Result<Vec<Order>, AppError> {
    Ok(storage.find_all().await?)
}

pub async fn update_order(
    storage: &dyn OrderStorage,
    req: UpdateOrderRequest,
) -> Result<(), AppError> {
    if req.client.is_empty() || req.product.is_empty() || req.date.is_empty() {
        return Err(AppError::Validation(
            "Missing required fields (client, product, date)".to_string(),
        ));
    }

    let key = OrderKey {
        client: req.client,
        product: req.product,
        date: req.date,
    };
    let patch = OrderPatch {
        quantity: req.quantity,
        price: req.price,
    };

    let matched = storage.update_by_key(&key, &patch).await?;
    if matched == 0 {
        return Err(AppError::NotFound("No matching order found".to_string()));
    }
    Ok(())
}

pub async fn delete_order(
    storage: &dyn OrderStorage,
    req: DeleteOrderRequest,
) -> Result<(), AppError> {
    if req.client.is_empty() || req.product.is_empty() || req.date.is_empty() {
        return Err(AppError::Validation(
            "Missing required fields (client, product, date)".to_string(),
        ));
    }

    let key = OrderKey {
        client: req.client,
        product: req.product,
        date: req.date,
    };

    let deleted = storage.delete_by_key(&key).await?;
    if deleted == 0 {
        return Err(AppError::NotFound("No matching order found".to_string()));
    }
    Ok(())
}

pub async fn date_summaries(storage: &dyn OrderStorage) -> Result<Vec<DateSummary>, AppError> {
    let orders = storage.find_all().await?;
    Ok(aggregation::date_index(&orders)
        .into_iter()
        .map(|(date, total)| DateSummary { date, total })
        .collect())
}

pub async fn date_detail(storage: &dyn OrderStorage, date: &str) -> Result<DateDetail, AppError> {
    let orders = storage.find_all().await?;
    Ok(aggregation::date_detail(&orders, date))
}

pub async fn dashboard(
    storage: &dyn OrderStorage,
    now: DateTime<Utc>,
) -> Result<DashboardSummary, AppError> {
    let orders = storage.find_all().await?;
    Ok(aggregation::rollups(&orders, now))
}
