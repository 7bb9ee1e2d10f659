// Core services
pub mod clients;
pub mod items;
pub mod orders;
