//! Data-access, caching and analytics layer for the Flippr inventory
//! dashboard.
//!
//! The remote REST API owns all storage; this crate owns everything a UI
//! needs to decide what to render: URL-synced filter state, the response
//! cache with staleness and single-flight deduplication, stock-status
//! classification, snapshot analytics, and mutation coordination with
//! cache invalidation.

pub mod analytics;
pub mod cache;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod dtos;
pub mod error;
pub mod filters;
pub mod http;
pub mod models;
pub mod services;
pub mod session;

pub use analytics::{StockAnalytics, TimeRange};
pub use client::FlipprClient;
pub use config::Config;
pub use dashboard::{Dashboard, ViewState};
pub use error::ApiError;
pub use filters::{LogFilters, ProductFilters, SortField, SortOrder};
pub use models::product::{Product, StockStatus};
pub use session::SessionContext;
