//! Query-string construction shared by every list endpoint.
//!
//! Only parameters the caller actually supplied are sent; absent filters are
//! omitted rather than serialized as empty strings or defaults.

use globalview_core::normalize::normalize_count;
use globalview_core::views::{Page, Pagination};
use serde_json::Value;

use crate::types::RawPagination;

/// Whose figures a leader query covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    SelfOnly,
    Team,
}

impl ViewMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::SelfOnly => "self",
            ViewMode::Team => "team",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Optional filters accepted by list and grid endpoints.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub mode: Option<ViewMode>,
    pub level: Option<u32>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub status: Option<String>,
    pub role_type: Option<String>,
}

impl ListQuery {
    #[must_use]
    pub fn with_range(mut self, start_date: Option<String>, end_date: Option<String>) -> Self {
        self.start_date = start_date;
        self.end_date = end_date;
        self
    }

    #[must_use]
    pub fn with_page(mut self, page: u32, limit: u32) -> Self {
        self.page = Some(page);
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub(crate) fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push_opt("startDate", self.start_date.as_deref());
        params.push_opt("endDate", self.end_date.as_deref());
        params.push_opt("page", self.page);
        params.push_opt("limit", self.limit);
        params.push_opt("search", self.search.as_deref().map(str::trim));
        params.push_opt("mode", self.mode.map(ViewMode::as_str));
        params.push_opt("level", self.level);
        params.push_opt("sortBy", self.sort_by.as_deref());
        params.push_opt("sortOrder", self.sort_order.map(SortOrder::as_str));
        params.push_opt("status", self.status.as_deref());
        params.push_opt("roleType", self.role_type.as_deref());
        params
    }
}

/// Ordered `key=value` pairs; blank values are never recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &'static str, value: impl ToString) -> &mut Self {
        let value = value.to_string();
        if !value.trim().is_empty() {
            self.pairs.push((key, value));
        }
        self
    }

    pub fn push_opt(&mut self, key: &'static str, value: Option<impl ToString>) -> &mut Self {
        if let Some(v) = value {
            self.push(key, v);
        }
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.pairs.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

/// Wraps mapped items in a [`Page`].
///
/// The requested page and limit win over the server's echo of them. Items
/// beyond `limit` are dropped and the current page never exceeds the page
/// count.
pub(crate) fn into_page<T>(mut items: Vec<T>, body: &Value, query: &ListQuery) -> Page<T> {
    let raw = RawPagination::from_body(body);
    let limit = query
        .limit
        .or_else(|| raw.limit.map(|l| normalize_count(Some(l))))
        .filter(|l| *l > 0);
    if let Some(limit) = limit {
        items.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
    }
    let total_count = raw.resolved_total().map_or_else(
        || u64::try_from(items.len()).unwrap_or(u64::MAX),
        |t| u64::from(normalize_count(Some(t))),
    );
    let page = query
        .page
        .or_else(|| raw.resolved_page().map(|p| normalize_count(Some(p))))
        .unwrap_or(1);
    let total_pages = raw.total_pages.map(|p| normalize_count(Some(p)));
    Page {
        items,
        pagination: Pagination::new(page, limit.unwrap_or(0), total_count, total_pages),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(params: &QueryParams) -> Vec<&'static str> {
        params.iter().map(|(k, _)| k).collect()
    }

    #[test]
    fn empty_query_sends_nothing() {
        assert!(ListQuery::default().to_params().is_empty());
    }

    #[test]
    fn only_supplied_filters_are_sent() {
        let query = ListQuery::default()
            .with_range(Some("2025-01-01".into()), None)
            .with_search("ana");
        let params = query.to_params();
        assert_eq!(keys(&params), ["startDate", "search"]);
    }

    #[test]
    fn blank_search_is_omitted() {
        let params = ListQuery::default().with_search("   ").to_params();
        assert!(params.is_empty());
    }

    #[test]
    fn search_is_trimmed() {
        let params = ListQuery::default().with_search("  ana ").to_params();
        assert_eq!(params.iter().next(), Some(("search", "ana")));
    }

    #[test]
    fn enums_serialize_as_wire_values() {
        let query = ListQuery {
            mode: Some(ViewMode::SelfOnly),
            sort_order: Some(SortOrder::Desc),
            ..ListQuery::default()
        };
        let params = query.to_params();
        let pairs: Vec<(&str, &str)> = params.iter().collect();
        assert_eq!(pairs, [("mode", "self"), ("sortOrder", "desc")]);
    }

    #[test]
    fn into_page_truncates_to_requested_limit() {
        let body = serde_json::json!({"pagination": {"page": 1, "total": 40, "totalPages": 4}});
        let query = ListQuery::default().with_page(1, 3);
        let page = into_page(vec![1, 2, 3, 4, 5], &body, &query);
        assert_eq!(page.items, [1, 2, 3]);
        assert_eq!(page.pagination.total_pages, 4);
        assert_eq!(page.pagination.total_count, 40);
    }

    #[test]
    fn into_page_clamps_page_past_the_end() {
        let body = serde_json::json!({"pagination": {"total": 5}});
        let query = ListQuery::default().with_page(7, 10);
        let page = into_page(vec!["a"; 5], &body, &query);
        assert_eq!(page.pagination.current_page, 1);
        assert_eq!(page.pagination.total_pages, 1);
    }

    #[test]
    fn into_page_without_pagination_block_counts_items() {
        let page = into_page(vec![1, 2], &serde_json::json!([]), &ListQuery::default());
        assert_eq!(page.pagination.total_count, 2);
        assert_eq!(page.pagination.current_page, 1);
        assert_eq!(page.pagination.total_pages, 1);
    }

    #[test]
    fn page_and_limit_serialize_as_numbers() {
        let pairs: Vec<(&str, String)> = ListQuery::default()
            .with_page(2, 25)
            .to_params()
            .iter()
            .map(|(k, v)| (k, v.to_owned()))
            .collect();
        assert_eq!(
            pairs,
            [("page", "2".to_owned()), ("limit", "25".to_owned())]
        );
    }
}
