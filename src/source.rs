//! The backing-collection seam.
//!
//! [`DataSource`] describes the four capabilities the executor needs
//! (counting, ordering, filtering, slicing) as consuming combinators that
//! each return a new description of the same abstraction, plus a terminal
//! [`DataSource::materialize`]. An in-memory vector implements it directly;
//! a store-backed source can translate the symbolic predicate and sort key
//! into its native query mechanism instead of materializing everything first.

use crate::query::{Predicate, SortDirection, SortKey};
use crate::record::Record;

pub trait DataSource<T: Record> {
    /// Number of records currently described, without materializing them.
    fn count(&self) -> usize;

    /// Stable full re-sort by a single key.
    #[must_use]
    fn sorted(self, key: &SortKey, direction: SortDirection) -> Self;

    /// Keep only records matching the predicate.
    #[must_use]
    fn filtered(self, predicate: &Predicate) -> Self;

    /// Skip `offset` records, then keep at most `limit` when present.
    #[must_use]
    fn sliced(self, offset: usize, limit: Option<usize>) -> Self;

    /// Terminal enumeration.
    fn materialize(self) -> Vec<T>;
}

/// Vec-backed [`DataSource`], the stand-in for an arbitrary backing
/// collection. Read-only traversal; operations rearrange or drop rows but
/// never mutate them.
#[derive(Debug, Clone, Default)]
pub struct MemorySource<T> {
    rows: Vec<T>,
}

impl<T> MemorySource<T> {
    #[must_use]
    pub fn new(rows: Vec<T>) -> Self {
        Self { rows }
    }
}

impl<T> From<Vec<T>> for MemorySource<T> {
    fn from(rows: Vec<T>) -> Self {
        Self::new(rows)
    }
}

impl<T: Record> DataSource<T> for MemorySource<T> {
    fn count(&self) -> usize {
        self.rows.len()
    }

    fn sorted(mut self, key: &SortKey, direction: SortDirection) -> Self {
        // sort_by is stable, so records equal under this key keep the
        // order established by earlier passes
        self.rows.sort_by(|a, b| key.compare_directed(a, b, direction));
        self
    }

    fn filtered(mut self, predicate: &Predicate) -> Self {
        self.rows.retain(|row| predicate.matches(row));
        self
    }

    fn sliced(mut self, offset: usize, limit: Option<usize>) -> Self {
        self.rows = match limit {
            Some(limit) => self.rows.into_iter().skip(offset).take(limit).collect(),
            None => self.rows.into_iter().skip(offset).collect(),
        };
        self
    }

    fn materialize(self) -> Vec<T> {
        self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{FilterOperator, ordering, predicate};
    use crate::test_support::{UserAccount, sample_accounts};

    #[test]
    fn slicing_clamps_to_available_rows() {
        let source = MemorySource::new(sample_accounts());
        assert_eq!(source.clone().sliced(3, Some(10)).materialize().len(), 2);
        assert_eq!(source.clone().sliced(99, None).materialize().len(), 0);
        assert_eq!(source.sliced(1, None).materialize().len(), 4);
    }

    #[test]
    fn combinators_compose() {
        let key = ordering::compile_for::<UserAccount>("id").unwrap();
        let p =
            predicate::compile_for::<UserAccount>("email", FilterOperator::EndsWith, "test.com")
                .unwrap();
        let rows = MemorySource::new(sample_accounts())
            .sorted(&key, crate::query::SortDirection::Descending)
            .filtered(&p)
            .sliced(0, Some(2))
            .materialize();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Jacky");
    }
}
