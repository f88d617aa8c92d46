use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::QueryError;

// Safety limits to bound worst-case work against adversarial input
pub(crate) const MAX_PATH_DEPTH: usize = 32;
pub const MAX_COLUMNS: usize = 200;

/// The closed set of filter operators a predicate clause can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterOperator {
    Equals,
    NotEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
    ContainsIgnoreCase,
    IsEmpty,
    IsNotEmpty,
}

impl FromStr for FilterOperator {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "equals" => Self::Equals,
            "not-equal" => Self::NotEqual,
            "greater-than" => Self::GreaterThan,
            "greater-than-or-equal" => Self::GreaterThanOrEqual,
            "less-than" => Self::LessThan,
            "less-than-or-equal" => Self::LessThanOrEqual,
            "contains" => Self::Contains,
            "not-contains" => Self::NotContains,
            "starts-with" => Self::StartsWith,
            "ends-with" => Self::EndsWith,
            "contains-ignore-case" => Self::ContainsIgnoreCase,
            "is-empty" => Self::IsEmpty,
            "is-not-empty" => Self::IsNotEmpty,
            other => return Err(QueryError::UnknownOperator(other.to_string())),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// One sort directive: an index into [`TableQuery::columns`] plus a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortDirective {
    pub column: usize,
    pub direction: SortDirection,
}

/// One column of the requesting table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Raw data source key as sent by the client. Not interpreted.
    pub data: String,
    /// Field path used to compile predicates and sort keys.
    pub name: String,
    /// Per-column search term.
    pub search_value: Option<String>,
    /// Reserved by the wire protocol; not interpreted by the engine.
    pub use_regex: bool,
    pub searchable: bool,
    pub sortable: bool,
}

/// The query descriptor for one invocation: paging window, search terms,
/// and sort directives. Built once per call and never mutated by the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableQuery {
    /// Opaque token echoed back unchanged so the caller can correlate
    /// asynchronous responses to requests.
    pub draw: i64,
    /// Number of records to skip.
    pub start: usize,
    /// Page size. A value of zero or less means "everything after `start`":
    /// the page is unbounded rather than empty.
    pub length: i64,
    pub columns: Vec<Column>,
    pub sort: Vec<SortDirective>,
    /// When non-empty, overrides every searchable column's own term.
    pub global_search: Option<String>,
    /// Reserved by the wire protocol; not interpreted by the engine.
    pub global_search_regex: bool,
}

/// The response envelope, serialized with the wire field names the
/// requesting table expects.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableResponse<T> {
    pub draw: i64,
    pub records_total: usize,
    pub records_filtered: usize,
    pub data: Vec<T>,
    pub error: Option<String>,
}

impl<T> TableResponse<T> {
    /// An error envelope for boundaries that surface compilation failures
    /// in-band instead of propagating them.
    #[must_use]
    pub fn failure(draw: i64, message: impl Into<String>) -> Self {
        Self { draw, records_total: 0, records_filtered: 0, data: Vec::new(), error: Some(message.into()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_codes_round_trip() {
        for op in [
            FilterOperator::Equals,
            FilterOperator::NotEqual,
            FilterOperator::GreaterThanOrEqual,
            FilterOperator::ContainsIgnoreCase,
            FilterOperator::IsNotEmpty,
        ] {
            let code = serde_json::to_string(&op).unwrap();
            let parsed: FilterOperator = code.trim_matches('"').parse().unwrap();
            assert_eq!(parsed, op);
        }
    }

    #[test]
    fn unknown_operator_code_is_rejected() {
        let err = "matches".parse::<FilterOperator>().unwrap_err();
        assert!(matches!(err, QueryError::UnknownOperator(code) if code == "matches"));
    }

    #[test]
    fn failure_envelope_carries_the_message_and_echoes_draw() {
        let resp = TableResponse::<i32>::failure(5, "boom");
        assert_eq!(resp.draw, 5);
        assert_eq!(resp.records_total, 0);
        assert!(resp.data.is_empty());
        assert_eq!(resp.error.as_deref(), Some("boom"));
    }

    #[test]
    fn response_serializes_with_wire_names() {
        let resp = TableResponse::<i32> {
            draw: 7,
            records_total: 10,
            records_filtered: 3,
            data: vec![1, 2, 3],
            error: None,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["draw"], 7);
        assert_eq!(json["recordsTotal"], 10);
        assert_eq!(json["recordsFiltered"], 3);
        assert!(json["error"].is_null());
    }
}
