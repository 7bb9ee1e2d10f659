use crate::{
    db::DbPool,
    entities::client::{self, Entity as ClientEntity, Model as ClientModel},
    errors::ServiceError,
};
use sea_orm::{EntityTrait, QueryOrder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, instrument};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientResponse {
    pub id: i32,
    pub name: String,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub address3: Option<String>,
    pub suburb: Option<String>,
    pub state: Option<String>,
    pub post_code: Option<String>,
}

impl From<ClientModel> for ClientResponse {
    fn from(model: ClientModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
            address1: model.address1,
            address2: model.address2,
            address3: model.address3,
            suburb: model.suburb,
            state: model.state,
            post_code: model.post_code,
        }
    }
}

/// Service for reading the client reference data
#[derive(Clone)]
pub struct ClientService {
    db_pool: Arc<DbPool>,
}

impl ClientService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Lists all clients ordered by name
    #[instrument(skip(self))]
    pub async fn list_clients(&self) -> Result<Vec<ClientResponse>, ServiceError> {
        let db = &*self.db_pool;

        let clients = ClientEntity::find()
            .order_by_asc(client::Column::Name)
            .all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to fetch clients from database");
                ServiceError::Database(e)
            })?;

        Ok(clients.into_iter().map(ClientResponse::from).collect())
    }

    /// Retrieves a single client by id
    #[instrument(skip(self), fields(client_id = client_id))]
    pub async fn get_client(&self, client_id: i32) -> Result<ClientResponse, ServiceError> {
        let db = &*self.db_pool;

        let client = ClientEntity::find_by_id(client_id)
            .one(db)
            .await
            .map_err(|e| {
                error!(error = %e, client_id, "Failed to fetch client from database");
                ServiceError::Database(e)
            })?;

        client.map(ClientResponse::from).ok_or_else(|| {
            ServiceError::NotFound(format!("Client with id {} not found", client_id))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_converts_to_response() {
        let model = ClientModel {
            id: 3,
            name: "Acme Pty Ltd".to_string(),
            address1: Some("12 Harbour St".to_string()),
            address2: None,
            address3: None,
            suburb: Some("Sydney".to_string()),
            state: Some("NSW".to_string()),
            post_code: Some("2000".to_string()),
        };

        let response = ClientResponse::from(model);
        assert_eq!(response.id, 3);
        assert_eq!(response.name, "Acme Pty Ltd");
        assert_eq!(response.suburb.as_deref(), Some("Sydney"));
    }

    #[test]
    fn response_serializes_camel_case() {
        let response = ClientResponse {
            id: 1,
            name: "Acme".to_string(),
            address1: None,
            address2: None,
            address3: None,
            suburb: None,
            state: None,
            post_code: Some("2000".to_string()),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["postCode"], "2000");
        assert!(json.get("post_code").is_none());
    }
}
