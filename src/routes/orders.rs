use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use tracing::info;

use crate::errors::AppError;
use crate::models::{
    DashboardSummary, DateDetail, DateSummary, DeleteOrderRequest, InsertResponse,
    MutationResponse, Order, OrderDraft, UpdateOrderRequest,
};
use crate::services::order_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(create_orders)
                .get(list_orders)
                .patch(update_order)
                .delete(delete_order),
        )
        .route("/summary", get(date_summaries))
        .route("/summary/:date", get(date_detail))
        .route("/dashboard", get(dashboard))
}

pub async fn create_orders(
    State(state): State<AppState>,
    Json(drafts): Json<Vec<OrderDraft>>,
) -> Result<(StatusCode, Json<InsertResponse>), AppError> {
    info!("POST /api/orders - Creating {} draft(s)", drafts.len());

    let inserted = order_service::create_orders(state.storage.as_ref(), drafts).await?;

    Ok((
        StatusCode::CREATED,
        Json(InsertResponse {
            message: "Orders inserted successfully!".to_string(),
            inserted_count: inserted,
        }),
    ))
}

pub async fn list_orders(State(state): State<AppState>) -> Result<Json<Vec<Order>>, AppError> {
    info!("GET /api/orders - Listing orders");

    let orders = order_service::list_orders(state.storage.as_ref()).await?;
    Ok(Json(orders))
}

pub async fn update_order(
    State(state): State<AppState>,
    Json(req): Json<UpdateOrderRequest>,
) -> Result<Json<MutationResponse>, AppError> {
    info!(
        "PATCH /api/orders - Updating order for {}/{}/{}",
        req.client, req.product, req.date
    );

    order_service::update_order(state.storage.as_ref(), req).await?;

    Ok(Json(MutationResponse {
        success: true,
        message: "Order updated successfully".to_string(),
    }))
}

pub async fn delete_order(
    State(state): State<AppState>,
    Json(req): Json<DeleteOrderRequest>,
) -> Result<Json<MutationResponse>, AppError> {
    info!(
        "DELETE /api/orders - Deleting order for {}/{}/{}",
        req.client, req.product, req.date
    );

    order_service::delete_order(state.storage.as_ref(), req).await?;

    Ok(Json(MutationResponse {
        success: true,
        message: "Order deleted successfully".to_string(),
    }))
}

pub async fn date_summaries(
    State(state): State<AppState>,
) -> Result<Json<Vec<DateSummary>>, AppError> {
    info!("GET /api/orders/summary - Listing per-date totals");

    let summaries = order_service::date_summaries(state.storage.as_ref()).await?;
    Ok(Json(summaries))
}

pub async fn date_detail(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<DateDetail>, AppError> {
    info!("GET /api/orders/summary/{} - Building receipt view", date);

    let detail = order_service::date_detail(state.storage.as_ref(), &date).await?;
    Ok(Json(detail))
}

pub async fn dashboard(State(state): State<AppState>) -> Result<Json<DashboardSummary>, AppError> {
    info!("GET /api/orders/dashboard - Computing rollups");

    let summary = order_service::dashboard(state.storage.as_ref(), Utc::now()).await?;
    Ok(Json(summary))
}
