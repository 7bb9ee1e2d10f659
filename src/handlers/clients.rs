use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::errors::ServiceError;
use crate::services::clients::ClientResponse;
use crate::AppState;

/// List all clients
#[utoipa::path(
    get,
    path = "/api/clients",
    tag = "Clients",
    responses(
        (status = 200, description = "Clients retrieved successfully", body = [ClientResponse]),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn list_clients(
    State(state): State<AppState>,
) -> Result<Json<Vec<ClientResponse>>, ServiceError> {
    let clients = state.services.clients.list_clients().await?;
    Ok(Json(clients))
}

/// Get a single client
#[utoipa::path(
    get,
    path = "/api/clients/{id}",
    tag = "Clients",
    params(("id" = i32, Path, description = "Client id")),
    responses(
        (status = 200, description = "Client retrieved successfully", body = ClientResponse),
        (status = 404, description = "Client not found", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ClientResponse>, ServiceError> {
    let client = state.services.clients.get_client(id).await?;
    Ok(Json(client))
}
