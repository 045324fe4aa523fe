use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const ORDER_STATUS_PENDING: &str = "pending";

// Orders carry a fixed shipping address until addresses get their own table.
pub const DEFAULT_ORDER_ADDRESS: &str = "123 Main St";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: i32,
    pub user_id: i32,
    pub total: Decimal,
    pub status: String,
    pub address: String,
    pub created_at: Option<NaiveDateTime>,
}
