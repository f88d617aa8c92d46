//! Query compilation and execution.
//!
//! `types` holds the descriptor and envelope models, `accessor` resolves
//! dotted field paths, `predicate` and `ordering` compile them into record
//! tests and sort keys, `exec` orchestrates the pipeline, and `decode` maps
//! the flat wire parameter scheme to and from the descriptor.

pub mod accessor;
pub mod decode;
pub mod ordering;
pub mod predicate;
pub mod types;

mod exec;

pub use accessor::{Accessor, resolve, resolve_for};
pub use decode::{ParamSource, decode, encode};
pub use exec::process;
pub use ordering::SortKey;
pub use predicate::{FilterBuilder, FilterExpr, Predicate};
pub use types::{
    Column, FilterOperator, MAX_COLUMNS, SortDirection, SortDirective, TableQuery, TableResponse,
};
