use crate::{
    db::DbPool,
    entities::item::{self, Entity as ItemEntity, Model as ItemModel},
    errors::ServiceError,
};
use rust_decimal::Decimal;
use sea_orm::{EntityTrait, QueryOrder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, instrument};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    pub id: i32,
    pub code: String,
    pub description: String,
    pub price: Decimal,
}

impl From<ItemModel> for ItemResponse {
    fn from(model: ItemModel) -> Self {
        Self {
            id: model.id,
            code: model.code,
            description: model.description,
            price: model.price,
        }
    }
}

/// Service for reading the item catalog
#[derive(Clone)]
pub struct ItemService {
    db_pool: Arc<DbPool>,
}

impl ItemService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Lists all catalog items ordered by code
    #[instrument(skip(self))]
    pub async fn list_items(&self) -> Result<Vec<ItemResponse>, ServiceError> {
        let db = &*self.db_pool;

        let items = ItemEntity::find()
            .order_by_asc(item::Column::Code)
            .all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to fetch items from database");
                ServiceError::Database(e)
            })?;

        Ok(items.into_iter().map(ItemResponse::from).collect())
    }

    /// Retrieves a single item by id
    #[instrument(skip(self), fields(item_id = item_id))]
    pub async fn get_item(&self, item_id: i32) -> Result<ItemResponse, ServiceError> {
        let db = &*self.db_pool;

        let item = ItemEntity::find_by_id(item_id).one(db).await.map_err(|e| {
            error!(error = %e, item_id, "Failed to fetch item from database");
            ServiceError::Database(e)
        })?;

        item.map(ItemResponse::from)
            .ok_or_else(|| ServiceError::NotFound(format!("Item with id {} not found", item_id)))
    }
}
