use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_clients_table::Migration),
            Box::new(m20240101_000002_create_items_table::Migration),
            Box::new(m20240101_000003_create_sales_orders_table::Migration),
            Box::new(m20240101_000004_create_sales_order_lines_table::Migration),
        ]
    }
}

// Migration implementations

mod m20240101_000001_create_clients_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_clients_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // Create clients table aligned with entities::client Model
            manager
                .create_table(
                    Table::create()
                        .table(Clients::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Clients::Id)
                                .integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Clients::Name).string().not_null())
                        .col(ColumnDef::new(Clients::Address1).string().null())
                        .col(ColumnDef::new(Clients::Address2).string().null())
                        .col(ColumnDef::new(Clients::Address3).string().null())
                        .col(ColumnDef::new(Clients::Suburb).string().null())
                        .col(ColumnDef::new(Clients::State).string().null())
                        .col(ColumnDef::new(Clients::PostCode).string().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_clients_name")
                        .table(Clients::Table)
                        .col(Clients::Name)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Clients::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Clients {
        Table,
        Id,
        Name,
        Address1,
        Address2,
        Address3,
        Suburb,
        State,
        PostCode,
    }
}

mod m20240101_000002_create_items_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_items_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // Create items table aligned with entities::item Model
            manager
                .create_table(
                    Table::create()
                        .table(Items::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Items::Id)
                                .integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Items::Code).string().not_null())
                        .col(ColumnDef::new(Items::Description).string().not_null())
                        .col(
                            ColumnDef::new(Items::Price)
                                .decimal_len(12, 2)
                                .not_null()
                                .default(0),
                        )
                        .to_owned(),
                )
                .await?;

            // Item codes are unique across the catalog
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_items_code")
                        .table(Items::Table)
                        .col(Items::Code)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Items::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Items {
        Table,
        Id,
        Code,
        Description,
        Price,
    }
}

mod m20240101_000003_create_sales_orders_table {

    use sea_orm_migration::prelude::*;

    use super::m20240101_000001_create_clients_table::Clients;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_sales_orders_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // Create sales_orders table aligned with entities::sales_order Model
            manager
                .create_table(
                    Table::create()
                        .table(SalesOrders::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(SalesOrders::Id)
                                .integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(ColumnDef::new(SalesOrders::InvoiceNo).string().not_null())
                        .col(ColumnDef::new(SalesOrders::InvoiceDate).date().not_null())
                        .col(ColumnDef::new(SalesOrders::ReferenceNo).string().null())
                        .col(ColumnDef::new(SalesOrders::Note).string().null())
                        .col(ColumnDef::new(SalesOrders::ClientId).integer().not_null())
                        .col(ColumnDef::new(SalesOrders::Address1).string().null())
                        .col(ColumnDef::new(SalesOrders::Address2).string().null())
                        .col(ColumnDef::new(SalesOrders::Address3).string().null())
                        .col(ColumnDef::new(SalesOrders::Suburb).string().null())
                        .col(ColumnDef::new(SalesOrders::State).string().null())
                        .col(ColumnDef::new(SalesOrders::PostCode).string().null())
                        .col(
                            ColumnDef::new(SalesOrders::TotalExcl)
                                .decimal_len(12, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(SalesOrders::TotalTax)
                                .decimal_len(12, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(SalesOrders::TotalIncl)
                                .decimal_len(12, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(SalesOrders::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(SalesOrders::UpdatedAt).timestamp().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_sales_orders_client_id")
                                .from(SalesOrders::Table, SalesOrders::ClientId)
                                .to(Clients::Table, Clients::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_sales_orders_client_id")
                        .table(SalesOrders::Table)
                        .col(SalesOrders::ClientId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_sales_orders_invoice_no")
                        .table(SalesOrders::Table)
                        .col(SalesOrders::InvoiceNo)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(SalesOrders::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum SalesOrders {
        Table,
        Id,
        InvoiceNo,
        InvoiceDate,
        ReferenceNo,
        Note,
        ClientId,
        Address1,
        Address2,
        Address3,
        Suburb,
        State,
        PostCode,
        TotalExcl,
        TotalTax,
        TotalIncl,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000004_create_sales_order_lines_table {

    use sea_orm_migration::prelude::*;

    use super::m20240101_000002_create_items_table::Items;
    use super::m20240101_000003_create_sales_orders_table::SalesOrders;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000004_create_sales_order_lines_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // Create sales_order_lines table aligned with
            // entities::sales_order_line Model
            manager
                .create_table(
                    Table::create()
                        .table(SalesOrderLines::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(SalesOrderLines::Id)
                                .integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SalesOrderLines::SalesOrderId)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(SalesOrderLines::ItemId).integer().not_null())
                        .col(ColumnDef::new(SalesOrderLines::Note).string().null())
                        .col(
                            ColumnDef::new(SalesOrderLines::Quantity)
                                .decimal_len(12, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(SalesOrderLines::Price)
                                .decimal_len(12, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(SalesOrderLines::TaxRate)
                                .decimal_len(12, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(SalesOrderLines::ExclAmount)
                                .decimal_len(12, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(SalesOrderLines::TaxAmount)
                                .decimal_len(12, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(SalesOrderLines::InclAmount)
                                .decimal_len(12, 2)
                                .not_null()
                                .default(0),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_sales_order_lines_sales_order_id")
                                .from(SalesOrderLines::Table, SalesOrderLines::SalesOrderId)
                                .to(SalesOrders::Table, SalesOrders::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_sales_order_lines_item_id")
                                .from(SalesOrderLines::Table, SalesOrderLines::ItemId)
                                .to(Items::Table, Items::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_sales_order_lines_sales_order_id")
                        .table(SalesOrderLines::Table)
                        .col(SalesOrderLines::SalesOrderId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_sales_order_lines_item_id")
                        .table(SalesOrderLines::Table)
                        .col(SalesOrderLines::ItemId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(SalesOrderLines::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum SalesOrderLines {
        Table,
        Id,
        SalesOrderId,
        ItemId,
        Note,
        Quantity,
        Price,
        TaxRate,
        ExclAmount,
        TaxAmount,
        InclAmount,
    }
}
