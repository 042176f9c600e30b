//! Presence checks for request bodies.
//!
//! Text fields count as missing when absent, null, or blank. Form selects
//! post `""` for "nothing chosen", so id, enum and number fields read a
//! blank string as missing too.

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::{Deserialize, DeserializeOwned, Deserializer, Error as _};
use serde_json::Value;

use crate::error::ApiError;

/// Trimmed text, or `None` when blank
pub fn text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Unwrap a required value or fail with the given 400 message
pub fn require<T>(value: Option<T>, message: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError::bad_request(message))
}

/// Required text field
pub fn require_text(value: Option<String>, message: &str) -> Result<String, ApiError> {
    require(text(value), message)
}

/// `deserialize_with` for optional typed fields: null and blank strings are `None`.
/// Pair with `#[serde(default)]` so an absent key is `None` as well.
pub fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(value) => T::deserialize(value).map(Some).map_err(D::Error::custom),
    }
}

/// `deserialize_with` keeping an explicit null apart from an absent key.
/// With `#[serde(default)]`: absent is `None`, null is `Some(None)`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Case-insensitive `contains` pattern for ILIKE with wildcards escaped
pub fn like_pattern(term: &str) -> String {
    let escaped = term
        .trim()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// RFC 3339 timestamp or a bare `YYYY-MM-DD` date (midnight UTC)
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_missing() {
        assert_eq!(text(None), None);
        assert_eq!(text(Some("   ".to_string())), None);
        assert_eq!(text(Some("  Finance ".to_string())), Some("Finance".to_string()));
    }

    #[test]
    fn require_reports_message() {
        let err = require_text(Some(String::new()), "departmentName and status are required.")
            .unwrap_err();
        assert_eq!(err.message(), "departmentName and status are required.");
        assert_eq!(require(Some(3), "x").unwrap(), 3);
    }

    #[derive(serde::Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Form {
        #[serde(default, deserialize_with = "blank_as_none")]
        parent_id: Option<uuid::Uuid>,
        #[serde(default, deserialize_with = "blank_as_none")]
        status: Option<crate::types::RecordStatus>,
        #[serde(default, deserialize_with = "nullable")]
        remarks: Option<Option<String>>,
    }

    fn form(body: &str) -> Form {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn blank_select_values_are_missing() {
        let parsed = form(r#"{"parentId":"","status":"  "}"#);
        assert!(parsed.parent_id.is_none());
        assert!(parsed.status.is_none());

        let parsed = form(r#"{"parentId":null}"#);
        assert!(parsed.parent_id.is_none());
        assert!(parsed.status.is_none());
    }

    #[test]
    fn filled_select_values_still_parse_strictly() {
        let id = uuid::Uuid::new_v4();
        let parsed = form(&format!(r#"{{"parentId":"{}","status":"ACTIVE"}}"#, id));
        assert_eq!(parsed.parent_id, Some(id));
        assert_eq!(parsed.status, Some(crate::types::RecordStatus::Active));

        assert!(serde_json::from_str::<Form>(r#"{"parentId":"not-a-uuid"}"#).is_err());
        assert!(serde_json::from_str::<Form>(r#"{"status":"ARCHIVED"}"#).is_err());
    }

    #[test]
    fn nullable_separates_null_from_absent() {
        assert_eq!(form("{}").remarks, None);
        assert_eq!(form(r#"{"remarks":null}"#).remarks, Some(None));
        assert_eq!(
            form(r#"{"remarks":"recount"}"#).remarks,
            Some(Some("recount".to_string()))
        );
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("lap"), "%lap%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern(""), "%%");
    }

    #[test]
    fn dates_accept_timestamp_or_day() {
        let ts = parse_date("2024-03-01T10:30:00Z").unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-03-01T10:30:00+00:00");

        let day = parse_date("2024-03-01").unwrap();
        assert_eq!(day.to_rfc3339(), "2024-03-01T00:00:00+00:00");

        assert!(parse_date("yesterday").is_none());
        assert!(parse_date("2024-13-01").is_none());
    }
}
