use super::ordering::{self, SortKey};
use super::predicate::FilterBuilder;
use super::types::{FilterOperator, SortDirection, TableQuery, TableResponse};
use crate::errors::QueryError;
use crate::record::Record;
use crate::source::DataSource;

/// Run one table query against a source: count, sort, filter, count again,
/// paginate, and assemble the envelope.
///
/// Everything is compiled before the source is enumerated, so a bad
/// descriptor can never yield a partially filtered or partially sorted
/// response. Sort directives whose column is not sortable are skipped; the
/// remaining directives are applied as successive stable full re-sorts in
/// descriptor order, so the last applicable directive determines the final
/// major order. The filter ORs a `Contains` clause per searchable column
/// with an effective term: the global term when non-empty, the column's own
/// term otherwise. No terms means no filter.
///
/// # Errors
/// Any compilation failure from the sort or filter phase; see [`QueryError`].
pub fn process<T, S>(source: S, query: &TableQuery) -> Result<TableResponse<T>, QueryError>
where
    T: Record,
    S: DataSource<T>,
{
    let schema = T::schema();

    let mut sorts: Vec<(SortKey, SortDirection)> = Vec::new();
    for directive in &query.sort {
        let column = query.columns.get(directive.column).ok_or(
            QueryError::SortColumnOutOfRange { index: directive.column, len: query.columns.len() },
        )?;
        if !column.sortable {
            continue;
        }
        sorts.push((ordering::compile(&schema, &column.name)?, directive.direction));
    }

    let use_global = query.global_search.as_deref().is_some_and(|s| !s.is_empty());
    let mut builder = FilterBuilder::new();
    for column in &query.columns {
        if !column.searchable {
            continue;
        }
        let term = if use_global {
            query.global_search.as_deref()
        } else {
            column.search_value.as_deref()
        };
        let Some(term) = term else { continue };
        builder = builder.or(&column.name, FilterOperator::Contains, term);
    }
    let predicate = builder.build(&schema)?;

    let records_total = source.count();
    let mut source = source;
    for (key, direction) in &sorts {
        source = source.sorted(key, *direction);
    }
    if let Some(predicate) = &predicate {
        source = source.filtered(predicate);
    }
    let records_filtered = source.count();

    let limit = usize::try_from(query.length).ok().filter(|_| query.length > 0);
    let data = source.sliced(query.start, limit).materialize();

    log::debug!(
        "processed table query draw={} total={} filtered={} page={}",
        query.draw,
        records_total,
        records_filtered,
        data.len()
    );

    Ok(TableResponse { draw: query.draw, records_total, records_filtered, data, error: None })
}
