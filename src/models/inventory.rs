use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::filters::LogActionType;

/// One timestamped observation of a product's stock quantity and value.
/// Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSnapshot {
    pub id: String,
    pub product_id: String,
    pub quantity: u32,
    pub value: f64,
    pub timestamp: DateTime<Utc>,
}

/// Slim product reference embedded in log entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRef {
    pub id: String,
    pub name: String,
    pub category_name: String,
}

/// One audit entry in the inventory activity log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryLog {
    pub id: String,
    #[serde(default)]
    pub note: String,
    pub action_type: LogActionType,
    /// The backend serializes quantities as strings in log entries.
    pub quantity: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub product: Option<ProductRef>,
}
