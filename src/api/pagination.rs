use serde::{Deserialize, Serialize};

use crate::config::ApiConfig;

/// Raw `skip`/`limit` query parameters.
///
/// Kept as strings so malformed values fall back to defaults instead of
/// rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub skip: Option<String>,
    pub limit: Option<String>,
}

/// Normalized paging window applied to a list query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub skip: i64,
    pub limit: i64,
}

impl PageQuery {
    pub fn resolve(&self, api: &ApiConfig) -> PageRequest {
        let skip = parse_number(self.skip.as_deref())
            .filter(|skip| *skip > 0)
            .unwrap_or(0);

        let limit = parse_number(self.limit.as_deref())
            .filter(|limit| *limit > 0)
            .map(|limit| limit.min(api.max_page_limit))
            .unwrap_or(api.default_page_limit);

        PageRequest { skip, limit }
    }
}

/// Accepts integers and truncates finite decimals ("2.7" -> 2)
fn parse_number(raw: Option<&str>) -> Option<i64> {
    let raw = raw?.trim();
    if let Ok(n) = raw.parse::<i64>() {
        return Some(n);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(|n| n.trunc().clamp(i64::MIN as f64, i64::MAX as f64) as i64)
}

/// List envelope returned by every paged endpoint
#[derive(Debug, Serialize)]
pub struct Page<T: Serialize> {
    pub items: Vec<T>,
    pub total: i64,
}

impl<T: Serialize> Page<T> {
    pub fn new(items: Vec<T>, total: i64) -> Self {
        Self { items, total }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn query(skip: Option<&str>, limit: Option<&str>) -> PageRequest {
        let api = AppConfig::development().api;
        PageQuery {
            skip: skip.map(str::to_string),
            limit: limit.map(str::to_string),
        }
        .resolve(&api)
    }

    #[test]
    fn defaults_when_absent() {
        assert_eq!(query(None, None), PageRequest { skip: 0, limit: 10 });
    }

    #[test]
    fn passes_through_valid_values() {
        assert_eq!(query(Some("20"), Some("25")), PageRequest { skip: 20, limit: 25 });
    }

    #[test]
    fn negative_or_garbage_skip_becomes_zero() {
        assert_eq!(query(Some("-5"), None).skip, 0);
        assert_eq!(query(Some("abc"), None).skip, 0);
        assert_eq!(query(Some(""), None).skip, 0);
    }

    #[test]
    fn non_positive_or_garbage_limit_uses_default() {
        assert_eq!(query(None, Some("0")).limit, 10);
        assert_eq!(query(None, Some("-1")).limit, 10);
        assert_eq!(query(None, Some("ten")).limit, 10);
        assert_eq!(query(None, Some("NaN")).limit, 10);
    }

    #[test]
    fn limit_is_clamped_to_maximum() {
        assert_eq!(query(None, Some("1000")).limit, 100);
    }

    #[test]
    fn decimals_are_truncated() {
        assert_eq!(query(Some("2.9"), Some("7.5")), PageRequest { skip: 2, limit: 7 });
    }

    #[test]
    fn page_serializes_items_and_total() {
        let page = Page::new(vec![1, 2, 3], 42);
        assert_eq!(
            serde_json::to_value(page).unwrap(),
            serde_json::json!({ "items": [1, 2, 3], "total": 42 })
        );
    }
}
