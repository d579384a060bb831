use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque filter set, passed through to the server as query parameters.
pub type Filters = BTreeMap<String, String>;

/// Query keys owned by pagination; filters may not override them.
pub const RESERVED_KEYS: [&str; 4] = ["limit", "offset", "orderBy", "orderDirection"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One bounded fetch of a server-held collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: usize,
    pub offset: usize,
    pub filters: Filters,
    pub order_by: Option<String>,
    pub order_direction: Option<SortDirection>,
}

impl PageRequest {
    pub fn new(limit: usize, offset: usize, filters: Filters) -> Self {
        Self {
            limit,
            offset,
            filters,
            order_by: None,
            order_direction: None,
        }
    }

    pub fn with_order(mut self, order_by: Option<String>, direction: Option<SortDirection>) -> Self {
        self.order_by = order_by;
        self.order_direction = direction;
        self
    }

    /// Query parameters for this request, pagination keys first.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("limit".to_string(), self.limit.to_string()),
            ("offset".to_string(), self.offset.to_string()),
        ];
        if let Some(order_by) = &self.order_by {
            pairs.push(("orderBy".to_string(), order_by.clone()));
        }
        if let Some(direction) = self.order_direction {
            pairs.push(("orderDirection".to_string(), direction.to_string()));
        }
        for (key, value) in &self.filters {
            if RESERVED_KEYS.contains(&key.as_str()) {
                tracing::warn!(filter = %key, "Ignoring filter that shadows a pagination parameter");
                continue;
            }
            pairs.push((key.clone(), value.clone()));
        }
        pairs
    }
}

/// A page of records plus the server's total match count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult<T> {
    #[serde(alias = "rows")]
    pub items: Vec<T>,
    #[serde(alias = "count")]
    pub total: usize,
}

impl<T> PageResult<T> {
    pub fn new(items: Vec<T>, total: usize) -> Self {
        Self { items, total }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_pairs_carry_pagination_order_and_filters() {
        let mut filters = Filters::new();
        filters.insert("category".to_string(), "sleep".to_string());
        let request = PageRequest::new(10, 20, filters)
            .with_order(Some("createdAt".to_string()), Some(SortDirection::Desc));

        let pairs = request.query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("limit".to_string(), "10".to_string()),
                ("offset".to_string(), "20".to_string()),
                ("orderBy".to_string(), "createdAt".to_string()),
                ("orderDirection".to_string(), "desc".to_string()),
                ("category".to_string(), "sleep".to_string()),
            ]
        );
    }

    #[test]
    fn filters_cannot_override_offset() {
        let mut filters = Filters::new();
        filters.insert("offset".to_string(), "999".to_string());
        let pairs = PageRequest::new(5, 0, filters).query_pairs();
        let offsets: Vec<_> = pairs.iter().filter(|(k, _)| k == "offset").collect();
        assert_eq!(offsets.len(), 1);
        assert_eq!(offsets[0].1, "0");
    }

    #[test]
    fn page_result_accepts_rows_and_count() {
        let page: PageResult<u32> = serde_json::from_str(r#"{"rows": [1, 2], "count": 9}"#).unwrap();
        assert_eq!(page, PageResult::new(vec![1, 2], 9));
        let page: PageResult<u32> = serde_json::from_str(r#"{"items": [], "total": 0}"#).unwrap();
        assert_eq!(page.total, 0);
    }
}
