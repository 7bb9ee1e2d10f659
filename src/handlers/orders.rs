use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

use crate::errors::ServiceError;
use crate::services::orders::{
    OrderPreviewResponse, SalesOrderPayload, SalesOrderResponse, SalesOrderSummary,
};
use crate::AppState;

/// List order summaries
#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "Orders",
    responses(
        (status = 200, description = "Orders retrieved successfully", body = [SalesOrderSummary]),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn list_orders(
    State(state): State<AppState>,
) -> Result<Json<Vec<SalesOrderSummary>>, ServiceError> {
    let orders = state.services.orders.list_orders().await?;
    Ok(Json(orders))
}

/// Get a full order with its client and lines
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "Orders",
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order retrieved successfully", body = SalesOrderResponse),
        (status = 404, description = "Order not found", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<SalesOrderResponse>, ServiceError> {
    let order = state.services.orders.get_order(id).await?;
    Ok(Json(order))
}

/// Create a new order
#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "Orders",
    request_body = SalesOrderPayload,
    responses(
        (status = 201, description = "Order created successfully", body = SalesOrderResponse),
        (status = 400, description = "Validation failed", body = crate::errors::ValidationErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn create_order(
    State(state): State<AppState>,
    Json(payload): Json<SalesOrderPayload>,
) -> Result<(StatusCode, Json<SalesOrderResponse>), ServiceError> {
    let order = state.services.orders.create_order(payload).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// Update an order, replacing its entire line collection
#[utoipa::path(
    put,
    path = "/api/orders/{id}",
    tag = "Orders",
    params(("id" = i32, Path, description = "Order id")),
    request_body = SalesOrderPayload,
    responses(
        (status = 204, description = "Order updated successfully"),
        (status = 400, description = "Validation failed", body = crate::errors::ValidationErrorResponse),
        (status = 404, description = "Order not found", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<SalesOrderPayload>,
) -> Result<StatusCode, ServiceError> {
    state.services.orders.update_order(id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete an order and its lines
#[utoipa::path(
    delete,
    path = "/api/orders/{id}",
    tag = "Orders",
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 204, description = "Order deleted successfully"),
        (status = 404, description = "Order not found", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ServiceError> {
    state.services.orders.delete_order(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Compute amounts for an unsaved order without persisting anything
#[utoipa::path(
    post,
    path = "/api/orders/preview",
    tag = "Orders",
    request_body = SalesOrderPayload,
    responses(
        (status = 200, description = "Amounts computed", body = OrderPreviewResponse),
    )
)]
pub async fn preview_order(
    State(state): State<AppState>,
    Json(payload): Json<SalesOrderPayload>,
) -> Json<OrderPreviewResponse> {
    Json(state.services.orders.preview_order(&payload))
}
