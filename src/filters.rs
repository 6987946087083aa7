// src/filters.rs
//! Filter tuples for list queries, plus the URL query-string codec.
//!
//! The URL is the persisted representation of dashboard filter state:
//! `encode` omits fields equal to their default (keeps URLs short) and
//! `decode` supplies defaults for absent fields. Malformed input is clamped
//! to defaults, never surfaced as an error.

use url::form_urlencoded;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PRODUCT_LIMIT: u32 = 12;
pub const DEFAULT_LOG_LIMIT: u32 = 20;
pub const DEFAULT_CATEGORY: &str = "all";

/// Product list sort key. Wire names match the backend query contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    Name,
    StockPrice,
    ThresholdPrice,
    #[default]
    CreatedAt,
    Category,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::StockPrice => "stockPrice",
            SortField::ThresholdPrice => "thresholdPrice",
            SortField::CreatedAt => "createdAt",
            SortField::Category => "category",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "name" => Some(SortField::Name),
            "stockPrice" => Some(SortField::StockPrice),
            "thresholdPrice" => Some(SortField::ThresholdPrice),
            "createdAt" => Some(SortField::CreatedAt),
            "category" => Some(SortField::Category),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

/// The complete, normalized filter tuple identifying one product-list query.
///
/// `page` and `limit` always resolve to positive integers; absent optional
/// fields mean "no constraint".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFilters {
    pub search: String,
    pub category: String,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
    pub page: u32,
    pub limit: u32,
}

impl Default for ProductFilters {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
            sort_by: SortField::default(),
            sort_order: SortOrder::default(),
            page: DEFAULT_PAGE,
            limit: DEFAULT_PRODUCT_LIMIT,
        }
    }
}

impl ProductFilters {
    /// Encode to a query string, omitting default-valued fields.
    pub fn encode(&self) -> String {
        let defaults = Self::default();
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if self.search != defaults.search {
            serializer.append_pair("search", &self.search);
        }
        if self.category != defaults.category {
            serializer.append_pair("category", &self.category);
        }
        if self.sort_by != defaults.sort_by {
            serializer.append_pair("sortBy", self.sort_by.as_str());
        }
        if self.sort_order != defaults.sort_order {
            serializer.append_pair("sortOrder", self.sort_order.as_str());
        }
        if self.page != defaults.page {
            serializer.append_pair("page", &self.page.to_string());
        }
        if self.limit != defaults.limit {
            serializer.append_pair("limit", &self.limit.to_string());
        }
        serializer.finish()
    }

    /// Decode from a query string. Absent fields take their defaults,
    /// unknown keys are ignored, malformed numerics clamp to defaults.
    pub fn decode(query: &str) -> Self {
        let mut filters = Self::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "search" => filters.search = value.into_owned(),
                "category" => filters.category = value.into_owned(),
                "sortBy" => {
                    if let Some(field) = SortField::parse(&value) {
                        filters.sort_by = field;
                    }
                }
                "sortOrder" => {
                    if let Some(order) = SortOrder::parse(&value) {
                        filters.sort_order = order;
                    }
                }
                "page" => filters.page = parse_positive(&value, DEFAULT_PAGE),
                "limit" => filters.limit = parse_positive(&value, DEFAULT_PRODUCT_LIMIT),
                _ => {}
            }
        }
        filters
    }

    /// Full tuple as query pairs for the wire request.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("search", self.search.clone()),
            ("category", self.category.clone()),
            ("sortBy", self.sort_by.as_str().to_string()),
            ("sortOrder", self.sort_order.as_str().to_string()),
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ]
    }

    // Changing any filter other than `page` resets `page` to 1.

    pub fn with_search(&self, search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            page: DEFAULT_PAGE,
            ..self.clone()
        }
    }

    pub fn with_category(&self, category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            page: DEFAULT_PAGE,
            ..self.clone()
        }
    }

    pub fn with_sort(&self, sort_by: SortField, sort_order: SortOrder) -> Self {
        Self {
            sort_by,
            sort_order,
            page: DEFAULT_PAGE,
            ..self.clone()
        }
    }

    pub fn with_limit(&self, limit: u32) -> Self {
        Self {
            limit: limit.max(1),
            page: DEFAULT_PAGE,
            ..self.clone()
        }
    }

    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }
}

fn parse_positive(value: &str, default: u32) -> u32 {
    match value.parse::<u32>() {
        Ok(n) if n >= 1 => n,
        _ => default,
    }
}

/// Inventory activity-log action filter. `None` on the tuple means "all".
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogActionType {
    Increase,
    Decrease,
}

impl LogActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogActionType::Increase => "INCREASE",
            LogActionType::Decrease => "DECREASE",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "INCREASE" => Some(LogActionType::Increase),
            "DECREASE" => Some(LogActionType::Decrease),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogSortField {
    #[default]
    Date,
    Name,
    Quantity,
}

impl LogSortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogSortField::Date => "DATE",
            LogSortField::Name => "NAME",
            LogSortField::Quantity => "QUANTITY",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "DATE" => Some(LogSortField::Date),
            "NAME" => Some(LogSortField::Name),
            "QUANTITY" => Some(LogSortField::Quantity),
            _ => None,
        }
    }
}

/// Filter tuple for the activity-log viewer. Same codec contract as
/// [`ProductFilters`], including the page-reset rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFilters {
    pub search: String,
    pub action_type: Option<LogActionType>,
    pub sort_field: LogSortField,
    pub sort_order: SortOrder,
    pub page: u32,
    pub limit: u32,
}

impl Default for LogFilters {
    fn default() -> Self {
        Self {
            search: String::new(),
            action_type: None,
            sort_field: LogSortField::default(),
            sort_order: SortOrder::default(),
            page: DEFAULT_PAGE,
            limit: DEFAULT_LOG_LIMIT,
        }
    }
}

impl LogFilters {
    pub fn encode(&self) -> String {
        let defaults = Self::default();
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if self.search != defaults.search {
            serializer.append_pair("search", &self.search);
        }
        if let Some(action) = self.action_type {
            serializer.append_pair("actionType", action.as_str());
        }
        if self.sort_field != defaults.sort_field {
            serializer.append_pair("sortField", self.sort_field.as_str());
        }
        if self.sort_order != defaults.sort_order {
            serializer.append_pair("sortOrder", self.sort_order.as_str());
        }
        if self.page != defaults.page {
            serializer.append_pair("page", &self.page.to_string());
        }
        if self.limit != defaults.limit {
            serializer.append_pair("limit", &self.limit.to_string());
        }
        serializer.finish()
    }

    pub fn decode(query: &str) -> Self {
        let mut filters = Self::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "search" => filters.search = value.into_owned(),
                "actionType" => filters.action_type = LogActionType::parse(&value),
                "sortField" => {
                    if let Some(field) = LogSortField::parse(&value) {
                        filters.sort_field = field;
                    }
                }
                "sortOrder" => {
                    if let Some(order) = SortOrder::parse(&value) {
                        filters.sort_order = order;
                    }
                }
                "page" => filters.page = parse_positive(&value, DEFAULT_PAGE),
                "limit" => filters.limit = parse_positive(&value, DEFAULT_LOG_LIMIT),
                _ => {}
            }
        }
        filters
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("search", self.search.clone())];
        if let Some(action) = self.action_type {
            pairs.push(("actionType", action.as_str().to_string()));
        }
        pairs.push(("sortField", self.sort_field.as_str().to_string()));
        pairs.push(("sortOrder", self.sort_order.as_str().to_string()));
        pairs.push(("page", self.page.to_string()));
        pairs.push(("limit", self.limit.to_string()));
        pairs
    }

    pub fn with_search(&self, search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            page: DEFAULT_PAGE,
            ..self.clone()
        }
    }

    pub fn with_action_type(&self, action_type: Option<LogActionType>) -> Self {
        Self {
            action_type,
            page: DEFAULT_PAGE,
            ..self.clone()
        }
    }

    pub fn with_sort(&self, sort_field: LogSortField, sort_order: SortOrder) -> Self {
        Self {
            sort_field,
            sort_order,
            page: DEFAULT_PAGE,
            ..self.clone()
        }
    }

    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_encode_empty() {
        assert_eq!(ProductFilters::default().encode(), "");
        assert_eq!(LogFilters::default().encode(), "");
    }

    #[test]
    fn test_round_trip_non_defaults() {
        let filters = ProductFilters {
            search: "iphone 15".to_string(),
            category: "Electronics".to_string(),
            sort_by: SortField::Name,
            sort_order: SortOrder::Asc,
            page: 3,
            limit: 24,
        };
        assert_eq!(ProductFilters::decode(&filters.encode()), filters);
    }

    #[test]
    fn test_decode_supplies_defaults() {
        let filters = ProductFilters::decode("category=Books");
        assert_eq!(filters.category, "Books");
        assert_eq!(filters.page, 1);
        assert_eq!(filters.limit, 12);
        assert_eq!(filters.sort_by, SortField::CreatedAt);
        assert_eq!(filters.sort_order, SortOrder::Desc);
        assert_eq!(filters.search, "");
    }

    #[test]
    fn test_decode_clamps_malformed_input() {
        let filters = ProductFilters::decode("page=0&limit=-4&sortBy=price&sortOrder=down");
        assert_eq!(filters, ProductFilters::default());

        let filters = ProductFilters::decode("page=abc");
        assert_eq!(filters.page, 1);
    }

    #[test]
    fn test_decode_ignores_unknown_keys() {
        let filters = ProductFilters::decode("utm_source=mail&page=2");
        assert_eq!(filters.page, 2);
    }

    #[test]
    fn test_changing_category_resets_page() {
        // On page 3, switching category must land back on page 1, so the
        // encoded state omits `page` entirely.
        let filters = ProductFilters::default()
            .with_page(3)
            .with_category("Electronics");
        assert_eq!(filters.page, 1);
        assert_eq!(filters.encode(), "category=Electronics");
    }

    #[test]
    fn test_search_sort_and_limit_reset_page() {
        let on_page_3 = ProductFilters::default().with_page(3);
        assert_eq!(on_page_3.with_search("cable").page, 1);
        assert_eq!(on_page_3.with_sort(SortField::Name, SortOrder::Asc).page, 1);
        assert_eq!(on_page_3.with_limit(48).page, 1);
        assert_eq!(on_page_3.with_page(4).page, 4);
    }

    #[test]
    fn test_search_value_is_percent_encoded() {
        let filters = ProductFilters::default().with_search("mac & cheese");
        let encoded = filters.encode();
        assert!(!encoded.contains(' '));
        assert_eq!(ProductFilters::decode(&encoded).search, "mac & cheese");
    }

    #[test]
    fn test_log_filters_round_trip() {
        let filters = LogFilters {
            search: "restock".to_string(),
            action_type: Some(LogActionType::Decrease),
            sort_field: LogSortField::Quantity,
            sort_order: SortOrder::Asc,
            page: 2,
            limit: 50,
        };
        assert_eq!(LogFilters::decode(&filters.encode()), filters);
    }

    #[test]
    fn test_log_action_type_reset_and_all() {
        let filters = LogFilters::default()
            .with_page(5)
            .with_action_type(Some(LogActionType::Increase));
        assert_eq!(filters.page, 1);
        // "all" is represented by omission
        let all = filters.with_action_type(None);
        assert!(!all.encode().contains("actionType"));
    }
}
