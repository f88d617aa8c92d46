//! dyntable: server-side table processing over typed records.
//!
//! Turns a declarative query descriptor (paging window, per-column and
//! global search terms, ordered sort directives) into a filtered, sorted,
//! paginated view of a collection, plus the before/after-filter counts a
//! table UI needs. Field paths are resolved dynamically against a
//! caller-declared schema, so one pipeline serves every entity type.
//!
//! ```
//! use dyntable::query::{self, TableQuery};
//! use dyntable::source::MemorySource;
//! use dyntable::test_support::{sample_accounts, searchable_column};
//!
//! let query = TableQuery {
//!     draw: 1,
//!     length: 10,
//!     columns: vec![searchable_column("name")],
//!     global_search: Some("Am".into()),
//!     ..TableQuery::default()
//! };
//! let response = query::process(MemorySource::new(sample_accounts()), &query).unwrap();
//! assert_eq!(response.records_filtered, 2);
//! ```

pub mod errors;
pub mod logger;
pub mod query;
pub mod record;
pub mod source;
pub mod test_support;

pub use errors::QueryError;
pub use query::{
    Column, FilterBuilder, FilterOperator, SortDirection, SortDirective, TableQuery, TableResponse,
    process,
};
pub use record::{Field, FieldKind, FieldValue, Record, Schema};
pub use source::{DataSource, MemorySource};

/// Initializes the logging system.
///
/// Call once at the beginning of the application's execution, before
/// processing queries.
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    logger::init()?;
    Ok(())
}
