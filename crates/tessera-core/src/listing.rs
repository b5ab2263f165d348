//! List query parameters and the result envelope.

use bson::Document;
use serde::{Deserialize, Serialize};

/// Parameters for a paged, filtered list operation.
///
/// `filter` and `sort` are caller-supplied extended-JSON expressions; a
/// value that fails to parse is ignored rather than failing the request.
/// `skip` and `limit` take effect only when positive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListQuery {
    /// Extended-JSON filter expression, e.g. `{"leave_type": "Casual Leave"}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// Extended-JSON sort expression, e.g. `{"date_time": -1}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    /// Number of rows to skip.
    #[serde(default)]
    pub skip: i64,
    /// Maximum number of rows to return.
    #[serde(default)]
    pub limit: i64,
}

impl ListQuery {
    /// Creates an empty query (no filter, no sort, no pagination).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the filter expression.
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Sets the sort expression.
    #[must_use]
    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Sets the number of rows to skip.
    #[must_use]
    pub const fn with_skip(mut self, skip: i64) -> Self {
        self.skip = skip;
        self
    }

    /// Sets the maximum number of rows to return.
    #[must_use]
    pub const fn with_limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }
}

/// Row counts reported alongside a list page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSummary {
    /// Documents matching the mandatory scope (tenant + not deleted).
    pub total_size: u64,
    /// Documents matching the scoped caller filter.
    pub filtered_size: u64,
    /// Rows actually returned on this page.
    pub result_size: usize,
}

/// A page of loosely-typed rows with its summary counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResult {
    /// Count summary.
    pub summary: ListSummary,
    /// The returned rows.
    pub items: Vec<Document>,
}

impl ListResult {
    /// Creates a result envelope; `result_size` is derived from the rows.
    #[must_use]
    pub fn new(items: Vec<Document>, total_size: u64, filtered_size: u64) -> Self {
        let result_size = items.len();
        Self {
            summary: ListSummary {
                total_size,
                filtered_size,
                result_size,
            },
            items,
        }
    }

    /// Creates an empty envelope.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new(), 0, 0)
    }

    /// Returns true if no rows were returned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of returned rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn test_query_builder() {
        let query = ListQuery::new()
            .with_filter(r#"{"leave_type": "Permission"}"#)
            .with_sort(r#"{"created_at": -1}"#)
            .with_skip(20)
            .with_limit(10);

        assert_eq!(query.filter.as_deref(), Some(r#"{"leave_type": "Permission"}"#));
        assert_eq!(query.sort.as_deref(), Some(r#"{"created_at": -1}"#));
        assert_eq!(query.skip, 20);
        assert_eq!(query.limit, 10);
    }

    #[test]
    fn test_default_query_is_unbounded() {
        let query = ListQuery::new();
        assert!(query.filter.is_none());
        assert!(query.sort.is_none());
        assert_eq!(query.skip, 0);
        assert_eq!(query.limit, 0);
    }

    #[test]
    fn test_result_size_is_derived() {
        let rows = vec![doc! {"staff_id": "stf01"}, doc! {"staff_id": "stf02"}];
        let result = ListResult::new(rows, 10, 5);

        assert_eq!(result.summary.total_size, 10);
        assert_eq!(result.summary.filtered_size, 5);
        assert_eq!(result.summary.result_size, 2);
        assert_eq!(result.len(), 2);
        assert!(!result.is_empty());
    }

    #[test]
    fn test_empty_result() {
        let result = ListResult::empty();
        assert!(result.is_empty());
        assert_eq!(result.summary.result_size, 0);
    }
}
