pub mod clients;
pub mod items;
pub mod orders;

use crate::db::DbPool;
use crate::events::EventSender;
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub clients: Arc<crate::services::clients::ClientService>,
    pub items: Arc<crate::services::items::ItemService>,
    pub orders: Arc<crate::services::orders::OrderService>,
}

impl AppServices {
    /// Build the AppServices container backed by the given pool.
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        let clients = Arc::new(crate::services::clients::ClientService::new(db_pool.clone()));
        let items = Arc::new(crate::services::items::ItemService::new(db_pool.clone()));
        let orders = Arc::new(crate::services::orders::OrderService::new(
            db_pool,
            Some(event_sender),
        ));

        Self {
            clients,
            items,
            orders,
        }
    }
}
