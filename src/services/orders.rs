use crate::{
    db::DbPool,
    entities::client::{self, Entity as ClientEntity, Model as ClientModel},
    entities::item::{self, Entity as ItemEntity, Model as ItemModel},
    entities::sales_order::{
        self, ActiveModel as SalesOrderActiveModel, Entity as SalesOrderEntity,
        Model as SalesOrderModel,
    },
    entities::sales_order_line::{
        self, Entity as SalesOrderLineEntity, Model as SalesOrderLineModel,
    },
    errors::ServiceError,
    events::{Event, EventSender},
    pricing::{line_amounts, order_totals, LineAmounts, OrderTotals},
    services::clients::ClientResponse,
    services::items::ItemResponse,
    validation::{validate_order, LineDraft, OrderDraft, ReferenceIds},
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use utoipa::ToSchema;

/// Deserializes user-entered numeric fields leniently. Anything that does not
/// parse as a number, including null, becomes zero.
fn lenient_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(coerce_decimal(&value))
}

fn coerce_decimal(value: &serde_json::Value) -> Decimal {
    let raw = match value {
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::String(s) => s.trim().to_string(),
        _ => return Decimal::ZERO,
    };
    raw.parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(&raw))
        .unwrap_or(Decimal::ZERO)
}

/// Request/Response types for the order service
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesOrderLinePayload {
    #[serde(default)]
    pub item_id: Option<i32>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub quantity: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub price: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub tax_rate: Decimal,
}

/// Full order payload used by both create and update. Any client-submitted
/// totals are unknown fields to serde and fall away; amounts are always
/// recomputed here.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesOrderPayload {
    #[serde(default)]
    pub client_id: Option<i32>,
    #[serde(default)]
    pub invoice_no: String,
    #[serde(default)]
    pub invoice_date: Option<NaiveDate>,
    #[serde(default)]
    pub reference_no: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub address1: Option<String>,
    #[serde(default)]
    pub address2: Option<String>,
    #[serde(default)]
    pub address3: Option<String>,
    #[serde(default)]
    pub suburb: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub post_code: Option<String>,
    #[serde(default)]
    pub lines: Vec<SalesOrderLinePayload>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesOrderSummary {
    pub id: i32,
    pub invoice_no: String,
    pub invoice_date: NaiveDate,
    pub client_name: String,
    pub total_incl: Decimal,
    pub reference_no: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesOrderLineResponse {
    pub id: i32,
    pub item_id: i32,
    pub item: Option<ItemResponse>,
    pub note: Option<String>,
    pub quantity: Decimal,
    pub price: Decimal,
    pub tax_rate: Decimal,
    pub excl_amount: Decimal,
    pub tax_amount: Decimal,
    pub incl_amount: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesOrderResponse {
    pub id: i32,
    pub invoice_no: String,
    pub invoice_date: NaiveDate,
    pub reference_no: Option<String>,
    pub note: Option<String>,
    pub client_id: i32,
    pub client: Option<ClientResponse>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub address3: Option<String>,
    pub suburb: Option<String>,
    pub state: Option<String>,
    pub post_code: Option<String>,
    pub total_excl: Decimal,
    pub total_tax: Decimal,
    pub total_incl: Decimal,
    pub lines: Vec<SalesOrderLineResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderPreviewResponse {
    pub lines: Vec<LineAmounts>,
    pub totals: OrderTotals,
}

fn draft_from_payload(payload: &SalesOrderPayload) -> OrderDraft {
    OrderDraft {
        client_id: payload.client_id,
        invoice_no: payload.invoice_no.clone(),
        lines: payload
            .lines
            .iter()
            .map(|line| LineDraft {
                item_id: line.item_id,
            })
            .collect(),
    }
}

fn compute_amounts(lines: &[SalesOrderLinePayload]) -> (Vec<LineAmounts>, OrderTotals) {
    let amounts: Vec<LineAmounts> = lines
        .iter()
        .map(|line| line_amounts(line.quantity, line.price, line.tax_rate))
        .collect();
    let totals = order_totals(&amounts);
    (amounts, totals)
}

fn build_order_response(
    order: SalesOrderModel,
    client: Option<ClientModel>,
    lines: Vec<(SalesOrderLineModel, Option<ItemModel>)>,
) -> SalesOrderResponse {
    SalesOrderResponse {
        id: order.id,
        invoice_no: order.invoice_no,
        invoice_date: order.invoice_date,
        reference_no: order.reference_no,
        note: order.note,
        client_id: order.client_id,
        client: client.map(ClientResponse::from),
        address1: order.address1,
        address2: order.address2,
        address3: order.address3,
        suburb: order.suburb,
        state: order.state,
        post_code: order.post_code,
        total_excl: order.total_excl,
        total_tax: order.total_tax,
        total_incl: order.total_incl,
        lines: lines
            .into_iter()
            .map(|(line, item)| SalesOrderLineResponse {
                id: line.id,
                item_id: line.item_id,
                item: item.map(ItemResponse::from),
                note: line.note,
                quantity: line.quantity,
                price: line.price,
                tax_rate: line.tax_rate,
                excl_amount: line.excl_amount,
                tax_amount: line.tax_amount,
                incl_amount: line.incl_amount,
            })
            .collect(),
        created_at: order.created_at,
        updated_at: order.updated_at,
    }
}

async fn insert_lines(
    txn: &DatabaseTransaction,
    order_id: i32,
    lines: &[SalesOrderLinePayload],
    amounts: &[LineAmounts],
) -> Result<(), ServiceError> {
    for (line, computed) in lines.iter().zip(amounts) {
        // Validation has already resolved every line to a known item.
        let item_id = line.item_id.ok_or_else(|| {
            ServiceError::Internal("line item id missing after validation".to_string())
        })?;

        let line_active_model = sales_order_line::ActiveModel {
            sales_order_id: Set(order_id),
            item_id: Set(item_id),
            note: Set(line.note.clone()),
            quantity: Set(line.quantity),
            price: Set(line.price),
            tax_rate: Set(line.tax_rate),
            excl_amount: Set(computed.excl_amount),
            tax_amount: Set(computed.tax_amount),
            incl_amount: Set(computed.incl_amount),
            ..Default::default()
        };

        line_active_model.insert(txn).await.map_err(|e| {
            error!(error = %e, order_id, "Failed to create order line in database");
            ServiceError::Database(e)
        })?;
    }

    Ok(())
}

/// Service for managing sales orders
#[derive(Clone)]
pub struct OrderService {
    db_pool: Arc<DbPool>,
    event_sender: Option<Arc<EventSender>>,
}

impl OrderService {
    /// Creates a new order service instance
    pub fn new(db_pool: Arc<DbPool>, event_sender: Option<Arc<EventSender>>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Fetches the client and item id sets an order may reference.
    async fn reference_ids(&self) -> Result<ReferenceIds, ServiceError> {
        let db = &*self.db_pool;

        let client_ids: Vec<i32> = ClientEntity::find()
            .select_only()
            .column(client::Column::Id)
            .into_tuple()
            .all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to fetch client ids");
                ServiceError::Database(e)
            })?;

        let item_ids: Vec<i32> = ItemEntity::find()
            .select_only()
            .column(item::Column::Id)
            .into_tuple()
            .all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to fetch item ids");
                ServiceError::Database(e)
            })?;

        Ok(ReferenceIds::new(client_ids, item_ids))
    }

    /// Lists order summaries with the owning client's name, newest first
    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<SalesOrderSummary>, ServiceError> {
        let db = &*self.db_pool;

        let orders = SalesOrderEntity::find()
            .find_also_related(ClientEntity)
            .order_by_desc(sales_order::Column::Id)
            .all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to fetch orders from database");
                ServiceError::Database(e)
            })?;

        Ok(orders
            .into_iter()
            .map(|(order, order_client)| SalesOrderSummary {
                id: order.id,
                invoice_no: order.invoice_no,
                invoice_date: order.invoice_date,
                client_name: order_client.map(|c| c.name).unwrap_or_default(),
                total_incl: order.total_incl,
                reference_no: order.reference_no,
                note: order.note,
            })
            .collect())
    }

    /// Retrieves a full order with its client and lines
    #[instrument(skip(self), fields(order_id = order_id))]
    pub async fn get_order(&self, order_id: i32) -> Result<SalesOrderResponse, ServiceError> {
        let db = &*self.db_pool;

        let order = SalesOrderEntity::find_by_id(order_id)
            .one(db)
            .await
            .map_err(|e| {
                error!(error = %e, order_id, "Failed to fetch order from database");
                ServiceError::Database(e)
            })?;

        let order = order.ok_or_else(|| {
            ServiceError::NotFound(format!("Order with id {} not found", order_id))
        })?;

        let order_client = ClientEntity::find_by_id(order.client_id)
            .one(db)
            .await
            .map_err(|e| {
                error!(error = %e, order_id, "Failed to fetch order client from database");
                ServiceError::Database(e)
            })?;

        let lines = SalesOrderLineEntity::find()
            .filter(sales_order_line::Column::SalesOrderId.eq(order_id))
            .order_by_asc(sales_order_line::Column::Id)
            .find_also_related(ItemEntity)
            .all(db)
            .await
            .map_err(|e| {
                error!(error = %e, order_id, "Failed to fetch order lines from database");
                ServiceError::Database(e)
            })?;

        Ok(build_order_response(order, order_client, lines))
    }

    /// Creates a new order with its lines, recomputing all amounts
    #[instrument(skip(self, payload), fields(invoice_no = %payload.invoice_no))]
    pub async fn create_order(
        &self,
        payload: SalesOrderPayload,
    ) -> Result<SalesOrderResponse, ServiceError> {
        let db = &*self.db_pool;

        let refs = self.reference_ids().await?;
        let violations = validate_order(&draft_from_payload(&payload), &refs);
        if !violations.is_empty() {
            return Err(violations.into());
        }

        let client_id = payload.client_id.ok_or_else(|| {
            ServiceError::Internal("client id missing after validation".to_string())
        })?;

        let (amounts, totals) = compute_amounts(&payload.lines);
        let now = Utc::now();
        let invoice_date = payload.invoice_date.unwrap_or_else(|| now.date_naive());

        let txn = db.begin().await.map_err(|e| {
            error!(error = %e, "Failed to start transaction for order creation");
            ServiceError::Database(e)
        })?;

        let order_active_model = SalesOrderActiveModel {
            invoice_no: Set(payload.invoice_no.clone()),
            invoice_date: Set(invoice_date),
            reference_no: Set(payload.reference_no.clone()),
            note: Set(payload.note.clone()),
            client_id: Set(client_id),
            address1: Set(payload.address1.clone()),
            address2: Set(payload.address2.clone()),
            address3: Set(payload.address3.clone()),
            suburb: Set(payload.suburb.clone()),
            state: Set(payload.state.clone()),
            post_code: Set(payload.post_code.clone()),
            total_excl: Set(totals.total_excl),
            total_tax: Set(totals.total_tax),
            total_incl: Set(totals.total_incl),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let order_model = order_active_model.insert(&txn).await.map_err(|e| {
            error!(error = %e, "Failed to create order in database");
            ServiceError::Database(e)
        })?;

        insert_lines(&txn, order_model.id, &payload.lines, &amounts).await?;

        txn.commit().await.map_err(|e| {
            error!(error = %e, order_id = order_model.id, "Failed to commit order creation transaction");
            ServiceError::Database(e)
        })?;

        info!(order_id = order_model.id, "Order created successfully");

        if let Some(event_sender) = &self.event_sender {
            if let Err(e) = event_sender.send(Event::OrderCreated(order_model.id)).await {
                warn!(error = %e, order_id = order_model.id, "Failed to send order created event");
            }
        }

        self.get_order(order_model.id).await
    }

    /// Updates an order in place, replacing its entire line collection
    #[instrument(skip(self, payload), fields(order_id = order_id))]
    pub async fn update_order(
        &self,
        order_id: i32,
        payload: SalesOrderPayload,
    ) -> Result<(), ServiceError> {
        let db = &*self.db_pool;

        let existing = SalesOrderEntity::find_by_id(order_id)
            .one(db)
            .await
            .map_err(|e| {
                error!(error = %e, order_id, "Failed to find order for update");
                ServiceError::Database(e)
            })?;

        let existing = existing.ok_or_else(|| {
            warn!(order_id, "Order not found for update");
            ServiceError::NotFound(format!("Order with id {} not found", order_id))
        })?;

        let refs = self.reference_ids().await?;
        let violations = validate_order(&draft_from_payload(&payload), &refs);
        if !violations.is_empty() {
            return Err(violations.into());
        }

        let client_id = payload.client_id.ok_or_else(|| {
            ServiceError::Internal("client id missing after validation".to_string())
        })?;

        let (amounts, totals) = compute_amounts(&payload.lines);
        let now = Utc::now();

        let txn = db.begin().await.map_err(|e| {
            error!(error = %e, order_id, "Failed to start transaction for order update");
            ServiceError::Database(e)
        })?;

        let mut order_active_model: SalesOrderActiveModel = existing.into();
        order_active_model.invoice_no = Set(payload.invoice_no.clone());
        if let Some(invoice_date) = payload.invoice_date {
            order_active_model.invoice_date = Set(invoice_date);
        }
        order_active_model.reference_no = Set(payload.reference_no.clone());
        order_active_model.note = Set(payload.note.clone());
        order_active_model.client_id = Set(client_id);
        order_active_model.address1 = Set(payload.address1.clone());
        order_active_model.address2 = Set(payload.address2.clone());
        order_active_model.address3 = Set(payload.address3.clone());
        order_active_model.suburb = Set(payload.suburb.clone());
        order_active_model.state = Set(payload.state.clone());
        order_active_model.post_code = Set(payload.post_code.clone());
        order_active_model.total_excl = Set(totals.total_excl);
        order_active_model.total_tax = Set(totals.total_tax);
        order_active_model.total_incl = Set(totals.total_incl);
        order_active_model.updated_at = Set(now);

        order_active_model.update(&txn).await.map_err(|e| {
            error!(error = %e, order_id, "Failed to update order");
            ServiceError::Database(e)
        })?;

        // Full line replacement, not an incremental diff.
        SalesOrderLineEntity::delete_many()
            .filter(sales_order_line::Column::SalesOrderId.eq(order_id))
            .exec(&txn)
            .await
            .map_err(|e| {
                error!(error = %e, order_id, "Failed to delete existing order lines");
                ServiceError::Database(e)
            })?;

        insert_lines(&txn, order_id, &payload.lines, &amounts).await?;

        txn.commit().await.map_err(|e| {
            error!(error = %e, order_id, "Failed to commit order update transaction");
            ServiceError::Database(e)
        })?;

        info!(order_id, "Order updated successfully");

        if let Some(event_sender) = &self.event_sender {
            if let Err(e) = event_sender.send(Event::OrderUpdated(order_id)).await {
                warn!(error = %e, order_id, "Failed to send order updated event");
            }
        }

        Ok(())
    }

    /// Deletes an order and its lines
    #[instrument(skip(self), fields(order_id = order_id))]
    pub async fn delete_order(&self, order_id: i32) -> Result<(), ServiceError> {
        let db = &*self.db_pool;

        let txn = db.begin().await.map_err(|e| {
            error!(error = %e, order_id, "Failed to start transaction for order delete");
            ServiceError::Database(e)
        })?;

        // Lines go first; the schema cascade is not assumed here.
        SalesOrderLineEntity::delete_many()
            .filter(sales_order_line::Column::SalesOrderId.eq(order_id))
            .exec(&txn)
            .await
            .map_err(|e| {
                error!(error = %e, order_id, "Failed to delete order lines");
                ServiceError::Database(e)
            })?;

        let result = SalesOrderEntity::delete_by_id(order_id)
            .exec(&txn)
            .await
            .map_err(|e| {
                error!(error = %e, order_id, "Failed to delete order");
                ServiceError::Database(e)
            })?;

        if result.rows_affected == 0 {
            warn!(order_id, "Order not found for delete");
            return Err(ServiceError::NotFound(format!(
                "Order with id {} not found",
                order_id
            )));
        }

        txn.commit().await.map_err(|e| {
            error!(error = %e, order_id, "Failed to commit order delete transaction");
            ServiceError::Database(e)
        })?;

        info!(order_id, "Order deleted successfully");

        if let Some(event_sender) = &self.event_sender {
            if let Err(e) = event_sender.send(Event::OrderDeleted(order_id)).await {
                warn!(error = %e, order_id, "Failed to send order deleted event");
            }
        }

        Ok(())
    }

    /// Computes line amounts and totals for an unsaved order. Pure; nothing
    /// is validated or persisted.
    pub fn preview_order(&self, payload: &SalesOrderPayload) -> OrderPreviewResponse {
        let (amounts, totals) = compute_amounts(&payload.lines);
        OrderPreviewResponse {
            lines: amounts,
            totals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use sea_orm::DatabaseConnection;
    use serde_json::json;

    fn service() -> OrderService {
        OrderService::new(Arc::new(DatabaseConnection::Disconnected), None)
    }

    #[test]
    fn coerce_decimal_accepts_numbers_and_numeric_strings() {
        assert_eq!(coerce_decimal(&json!(12.5)), dec!(12.5));
        assert_eq!(coerce_decimal(&json!(3)), dec!(3));
        assert_eq!(coerce_decimal(&json!("49.99")), dec!(49.99));
        assert_eq!(coerce_decimal(&json!(" 7 ")), dec!(7));
    }

    #[test]
    fn coerce_decimal_treats_junk_as_zero() {
        assert_eq!(coerce_decimal(&json!("abc")), Decimal::ZERO);
        assert_eq!(coerce_decimal(&json!(null)), Decimal::ZERO);
        assert_eq!(coerce_decimal(&json!(true)), Decimal::ZERO);
        assert_eq!(coerce_decimal(&json!({})), Decimal::ZERO);
    }

    #[test]
    fn line_payload_defaults_missing_numerics_to_zero() {
        let line: SalesOrderLinePayload = serde_json::from_value(json!({
            "itemId": 4,
            "quantity": "junk"
        }))
        .unwrap();

        assert_eq!(line.item_id, Some(4));
        assert_eq!(line.quantity, Decimal::ZERO);
        assert_eq!(line.price, Decimal::ZERO);
        assert_eq!(line.tax_rate, Decimal::ZERO);
    }

    #[test]
    fn payload_ignores_client_submitted_totals() {
        let payload: SalesOrderPayload = serde_json::from_value(json!({
            "clientId": 1,
            "invoiceNo": "INV-9",
            "totalExcl": "999999",
            "totalTax": "999999",
            "totalIncl": "999999",
            "lines": [
                {"itemId": 2, "quantity": 2, "price": 10, "taxRate": 10}
            ]
        }))
        .unwrap();

        let preview = service().preview_order(&payload);
        assert_eq!(preview.totals.total_excl, dec!(20.00));
        assert_eq!(preview.totals.total_tax, dec!(2.00));
        assert_eq!(preview.totals.total_incl, dec!(22.00));
    }

    #[test]
    fn draft_maps_payload_fields() {
        let payload: SalesOrderPayload = serde_json::from_value(json!({
            "clientId": 7,
            "invoiceNo": "INV-3",
            "lines": [{"itemId": 1}, {}]
        }))
        .unwrap();

        let draft = draft_from_payload(&payload);
        assert_eq!(draft.client_id, Some(7));
        assert_eq!(draft.invoice_no, "INV-3");
        assert_eq!(draft.lines.len(), 2);
        assert_eq!(draft.lines[0].item_id, Some(1));
        assert_eq!(draft.lines[1].item_id, None);
    }

    #[test]
    fn preview_computes_per_line_and_total_amounts() {
        let payload: SalesOrderPayload = serde_json::from_value(json!({
            "lines": [
                {"itemId": 1, "quantity": 2, "price": 10, "taxRate": 10},
                {"itemId": 2, "quantity": 3, "price": 49.99, "taxRate": 0}
            ]
        }))
        .unwrap();

        let preview = service().preview_order(&payload);
        assert_eq!(preview.lines.len(), 2);
        assert_eq!(preview.lines[0].incl_amount, dec!(22.00));
        assert_eq!(preview.lines[1].excl_amount, dec!(149.97));
        assert_eq!(preview.totals.total_excl, dec!(169.97));
        assert_eq!(preview.totals.total_tax, dec!(2.00));
        assert_eq!(preview.totals.total_incl, dec!(171.97));
    }
}
