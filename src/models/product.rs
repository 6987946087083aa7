use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stock health derived from current stock vs. threshold.
///
/// The tie (`stock == threshold`) is deliberately its own category,
/// distinct from both `Good` and `Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockStatus {
    Good,
    Low,
    Critical,
}

impl StockStatus {
    /// Classify a stock level against its threshold. Unknown stock counts
    /// as `Critical`.
    pub fn classify(stock: Option<u32>, threshold: f64) -> Self {
        let stock = match stock {
            Some(s) => s as f64,
            None => return StockStatus::Critical,
        };
        if stock < threshold {
            StockStatus::Critical
        } else if stock == threshold {
            StockStatus::Low
        } else {
            StockStatus::Good
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::Good => "Good",
            StockStatus::Low => "Low",
            StockStatus::Critical => "Critical",
        }
    }
}

/// Canonical product shape.
///
/// The backend speaks a few dialects for this entity; this is the one
/// schema every call site uses. `value` and `threshold` are prices,
/// `number_of_stocks` is the unit count. Status is always re-derived
/// locally via [`Product::status`], never trusted from the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category_name: String,
    /// Stock price
    pub value: f64,
    /// Threshold price
    pub threshold: f64,
    #[serde(default)]
    pub number_of_stocks: Option<u32>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn status(&self) -> StockStatus {
        StockStatus::classify(self.number_of_stocks, self.threshold)
    }
}
