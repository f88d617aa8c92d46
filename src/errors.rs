use thiserror::Error;

use crate::query::FilterOperator;
use crate::record::FieldKind;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("cannot resolve segment `{segment}` in field path `{path}`")]
    FieldResolution { path: String, segment: String },

    #[error("operator {operator:?} is not supported for {kind:?} fields")]
    UnsupportedOperator { operator: FilterOperator, kind: FieldKind },

    #[error("cannot convert `{value}` to {kind:?}")]
    ValueConversion { value: String, kind: FieldKind },

    #[error("predicate group produced no clauses")]
    EmptyPredicateGroup,

    #[error("unknown filter operator: {0}")]
    UnknownOperator(String),

    #[error("sort directive references column {index}, but only {len} columns were supplied")]
    SortColumnOutOfRange { index: usize, len: usize },
}
