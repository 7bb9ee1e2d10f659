use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sales_orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub invoice_no: String,
    pub invoice_date: Date,
    pub reference_no: Option<String>,
    pub note: Option<String>,
    pub client_id: i32,
    // Address snapshot captured from the client when the order was submitted.
    // Never re-synced from the client row afterward.
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub address3: Option<String>,
    pub suburb: Option<String>,
    pub state: Option<String>,
    pub post_code: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub total_excl: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub total_tax: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub total_incl: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::client::Entity",
        from = "Column::ClientId",
        to = "super::client::Column::Id"
    )]
    Client,
    #[sea_orm(has_many = "super::sales_order_line::Entity")]
    SalesOrderLines,
}

impl Related<super::client::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl Related<super::sales_order_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SalesOrderLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
