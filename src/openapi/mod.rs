use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Sales Orders API",
        version = "1.0.0",
        description = r#"
# Sales Orders API

A small invoicing-style API for managing clients, a catalog of items, and
sales orders with server-computed line amounts and totals.

## Amount computation

All monetary amounts are computed server-side from each line's quantity,
unit price, and tax rate percentage. Client-submitted totals are ignored.
`POST /api/orders/preview` exposes the same computation for unsaved orders.

## Error handling

Validation failures return a field-to-messages mapping:

```json
{
  "error": "Validation failed",
  "errors": {
    "clientId": ["customer required"]
  },
  "request_id": "1f0b2c3d",
  "timestamp": "2024-01-01T00:00:00Z"
}
```
        "#
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "Clients", description = "Client reference data"),
        (name = "Items", description = "Item catalog"),
        (name = "Orders", description = "Sales order management")
    ),
    paths(
        // Clients
        crate::handlers::clients::list_clients,
        crate::handlers::clients::get_client,

        // Items
        crate::handlers::items::list_items,
        crate::handlers::items::get_item,

        // Orders
        crate::handlers::orders::list_orders,
        crate::handlers::orders::get_order,
        crate::handlers::orders::create_order,
        crate::handlers::orders::update_order,
        crate::handlers::orders::delete_order,
        crate::handlers::orders::preview_order,
    ),
    components(
        schemas(
            // Client types
            crate::services::clients::ClientResponse,

            // Item types
            crate::services::items::ItemResponse,

            // Order types
            crate::services::orders::SalesOrderPayload,
            crate::services::orders::SalesOrderLinePayload,
            crate::services::orders::SalesOrderSummary,
            crate::services::orders::SalesOrderResponse,
            crate::services::orders::SalesOrderLineResponse,
            crate::services::orders::OrderPreviewResponse,
            crate::pricing::LineAmounts,
            crate::pricing::OrderTotals,
            crate::validation::Violation,

            // Error types
            crate::errors::ErrorResponse,
            crate::errors::ValidationErrorResponse
        )
    )
)]
pub struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}
