pub mod client;
pub mod item;
pub mod sales_order;
pub mod sales_order_line;
