use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// The closed set of scalar kinds a resolved field can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    Integer,
    Float,
    Text,
    Boolean,
    DateTime,
}

impl FieldKind {
    /// Kinds that admit ordered comparison operators.
    #[must_use]
    pub fn is_ordered(self) -> bool {
        matches!(self, Self::Integer | Self::Float | Self::DateTime)
    }
}

/// A value extracted from a record, tagged with its kind so operator
/// dispatch never needs unchecked casts.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Boolean(bool),
    DateTime(DateTime<Utc>),
    Null,
}

impl FieldValue {
    #[must_use]
    pub fn kind(&self) -> Option<FieldKind> {
        match self {
            Self::Integer(_) => Some(FieldKind::Integer),
            Self::Float(_) => Some(FieldKind::Float),
            Self::Text(_) => Some(FieldKind::Text),
            Self::Boolean(_) => Some(FieldKind::Boolean),
            Self::DateTime(_) => Some(FieldKind::DateTime),
            Self::Null => None,
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Textual representation used by the text operators. `None` for null.
    #[must_use]
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Null => None,
            other => Some(other.to_string()),
        }
    }

    /// Converts this value to the given kind, or `None` if the conversion
    /// is impossible. Text sources parse; numeric sources widen.
    #[must_use]
    pub fn coerce(&self, kind: FieldKind) -> Option<Self> {
        match (self, kind) {
            (Self::Integer(i), FieldKind::Integer) => Some(Self::Integer(*i)),
            (Self::Text(s), FieldKind::Integer) => s.trim().parse::<i64>().ok().map(Self::Integer),
            #[allow(clippy::cast_precision_loss)]
            (Self::Integer(i), FieldKind::Float) => Some(Self::Float(*i as f64)),
            (Self::Float(f), FieldKind::Float) => Some(Self::Float(*f)),
            (Self::Text(s), FieldKind::Float) => s.trim().parse::<f64>().ok().map(Self::Float),
            (Self::Boolean(b), FieldKind::Boolean) => Some(Self::Boolean(*b)),
            (Self::Text(s), FieldKind::Boolean) => parse_bool(s).map(Self::Boolean),
            (Self::DateTime(t), FieldKind::DateTime) => Some(Self::DateTime(*t)),
            (Self::Text(s), FieldKind::DateTime) => parse_datetime(s).map(Self::DateTime),
            (_, FieldKind::Text) => self.to_text().map(Self::Text),
            _ => None,
        }
    }

    /// Total order over values: null first, numerics cross-compared,
    /// mixed kinds by a fixed kind rank.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        use FieldValue as V;
        #[allow(clippy::cast_precision_loss)]
        fn as_f64(v: &FieldValue) -> Option<f64> {
            match v {
                V::Integer(i) => Some(*i as f64),
                V::Float(f) => Some(*f),
                _ => None,
            }
        }
        if let (Some(a), Some(b)) = (as_f64(self), as_f64(other)) {
            return a.total_cmp(&b);
        }
        match (self, other) {
            (V::Null, V::Null) => Ordering::Equal,
            (V::Text(a), V::Text(b)) => a.cmp(b),
            (V::Boolean(a), V::Boolean(b)) => a.cmp(b),
            (V::DateTime(a), V::DateTime(b)) => a.cmp(b),
            _ => rank(self).cmp(&rank(other)),
        }
    }
}

fn rank(v: &FieldValue) -> u8 {
    match v {
        FieldValue::Null => 0,
        FieldValue::Boolean(_) => 1,
        FieldValue::Integer(_) => 2,
        FieldValue::Float(_) => 3,
        FieldValue::DateTime(_) => 4,
        FieldValue::Text(_) => 5,
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t.with_timezone(&Utc));
    }
    if let Ok(t) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(t.and_utc());
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::DateTime(t) => write!(f, "{}", t.to_rfc3339()),
            Self::Null => f.write_str("null"),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(v: DateTime<Utc>) -> Self {
        Self::DateTime(v)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_text_to_numeric() {
        assert_eq!(FieldValue::from("42").coerce(FieldKind::Integer), Some(FieldValue::Integer(42)));
        assert_eq!(FieldValue::from(" 2.5 ").coerce(FieldKind::Float), Some(FieldValue::Float(2.5)));
        assert_eq!(FieldValue::from("nope").coerce(FieldKind::Integer), None);
    }

    #[test]
    fn coerce_bool_text_is_lenient_about_case() {
        assert_eq!(FieldValue::from("True").coerce(FieldKind::Boolean), Some(FieldValue::Boolean(true)));
        assert_eq!(FieldValue::from(" FALSE ").coerce(FieldKind::Boolean), Some(FieldValue::Boolean(false)));
        assert_eq!(FieldValue::from("yes").coerce(FieldKind::Boolean), None);
    }

    #[test]
    fn coerce_datetime_accepts_date_only() {
        let v = FieldValue::from("2024-03-01").coerce(FieldKind::DateTime).unwrap();
        assert_eq!(v.to_text().unwrap(), "2024-03-01T00:00:00+00:00");
    }

    #[test]
    fn compare_crosses_numeric_kinds() {
        assert_eq!(FieldValue::Integer(2).compare(&FieldValue::Float(2.0)), Ordering::Equal);
        assert_eq!(FieldValue::Integer(1).compare(&FieldValue::Float(1.5)), Ordering::Less);
    }

    #[test]
    fn compare_orders_null_first() {
        assert_eq!(FieldValue::Null.compare(&FieldValue::Integer(0)), Ordering::Less);
        assert_eq!(FieldValue::Null.compare(&FieldValue::Null), Ordering::Equal);
    }
}
