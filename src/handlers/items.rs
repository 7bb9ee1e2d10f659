use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::errors::ServiceError;
use crate::services::items::ItemResponse;
use crate::AppState;

/// List all catalog items
#[utoipa::path(
    get,
    path = "/api/items",
    tag = "Items",
    responses(
        (status = 200, description = "Items retrieved successfully", body = [ItemResponse]),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn list_items(
    State(state): State<AppState>,
) -> Result<Json<Vec<ItemResponse>>, ServiceError> {
    let items = state.services.items.list_items().await?;
    Ok(Json(items))
}

/// Get a single catalog item
#[utoipa::path(
    get,
    path = "/api/items/{id}",
    tag = "Items",
    params(("id" = i32, Path, description = "Item id")),
    responses(
        (status = 200, description = "Item retrieved successfully", body = ItemResponse),
        (status = 404, description = "Item not found", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ItemResponse>, ServiceError> {
    let item = state.services.items.get_item(id).await?;
    Ok(Json(item))
}
