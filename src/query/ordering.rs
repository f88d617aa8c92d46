use std::cmp::Ordering;
use std::sync::Arc;

use super::accessor::{self, Accessor};
use super::types::SortDirection;
use crate::errors::QueryError;
use crate::record::{Record, Schema};

/// A compiled sort key: extracts a comparable value from a record. Pure
/// function of the record, safe to share across threads and calls.
#[derive(Debug, Clone)]
pub struct SortKey {
    accessor: Arc<Accessor>,
}

impl SortKey {
    /// Compare two records by this key alone. Null values order first;
    /// direction is applied by the caller.
    #[must_use]
    pub fn compare(&self, a: &dyn Record, b: &dyn Record) -> Ordering {
        self.accessor.extract(a).compare(&self.accessor.extract(b))
    }

    /// Compare with a direction applied.
    #[must_use]
    pub fn compare_directed(
        &self,
        a: &dyn Record,
        b: &dyn Record,
        direction: SortDirection,
    ) -> Ordering {
        let ord = self.compare(a, b);
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

/// Compile a field path into a sort key. Any scalar kind is orderable.
///
/// # Errors
/// `FieldResolution` if the path does not resolve on the schema.
pub fn compile(schema: &Schema, path: &str) -> Result<SortKey, QueryError> {
    Ok(SortKey { accessor: accessor::resolve(schema, path)? })
}

/// Compile a sort key for a concrete record type.
///
/// # Errors
/// See [`compile`].
pub fn compile_for<T: Record>(path: &str) -> Result<SortKey, QueryError> {
    compile(&T::schema(), path)
}
