//! Record abstraction: the seam between the engine and caller-defined types.
//!
//! The engine never sees concrete record shapes. A type opts in by describing
//! itself with a [`Schema`] (used at compile time to validate field paths and
//! operator/kind pairings) and by answering [`Record::field`] lookups with
//! values from the closed [`FieldValue`] variant (used at evaluation time).

mod schema;
mod value;

pub use schema::{FieldType, Schema, SchemaBuilder};
pub use value::{FieldKind, FieldValue};

use std::sync::Arc;

/// One field of a record: either a scalar value or a borrowed nested record.
pub enum Field<'a> {
    Value(FieldValue),
    Nested(&'a dyn Record),
}

/// A queryable record type.
///
/// `field` must answer for every name the schema declares; returning `None`
/// or a mismatched shape at runtime degrades to a null value rather than a
/// failure, since path validity was already checked against the schema.
pub trait Record {
    /// The type descriptor for this record type.
    fn schema() -> Arc<Schema>
    where
        Self: Sized;

    /// Look up one immediate field by name.
    fn field(&self, name: &str) -> Option<Field<'_>>;
}
