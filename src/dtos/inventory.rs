// src/dtos/inventory.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::filters::SortOrder;
use crate::models::inventory::{InventoryLog, StockSnapshot};
use crate::models::pagination::PaginationInfo;

/// One page of the activity log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogPage {
    pub logs: Vec<InventoryLog>,
    pub pagination: PaginationInfo,
}

/// Query for `GET /inventory/snapshots/{productId}`: snapshots newer than
/// `date_from`, ordered by `sort_field`.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotQuery {
    pub date_from: DateTime<Utc>,
    pub sort_order: SortOrder,
    pub sort_field: String,
}

impl SnapshotQuery {
    pub fn since(date_from: DateTime<Utc>) -> Self {
        Self {
            date_from,
            sort_order: SortOrder::Desc,
            sort_field: "timestamp".to_string(),
        }
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("dateFrom", self.date_from.to_rfc3339()),
            ("sortOrder", self.sort_order.as_str().to_string()),
            ("sortField", self.sort_field.clone()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotsResponse {
    pub snapshots: Vec<StockSnapshot>,
}
