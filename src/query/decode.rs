//! Descriptor decoding from an untyped string-keyed parameter source, the
//! flat key scheme interactive tables post for server-side processing
//! (`draw`, `start`, `length`, `search[value]`, `columns[i][...]`,
//! `order[j][...]`).
//!
//! Decoding is deliberately lenient: absent or unparseable values fall back
//! to defaults. Strictness about field paths, operators, and value
//! conversions belongs to compilation, not this boundary.

use std::collections::{BTreeMap, HashMap};

use super::types::{Column, MAX_COLUMNS, SortDirection, SortDirective, TableQuery};

/// Read access to an untyped parameter source (query string, form body).
pub trait ParamSource {
    fn get(&self, key: &str) -> Option<&str>;
}

impl ParamSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<&str> {
        HashMap::get(self, key).map(String::as_str)
    }
}

impl ParamSource for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<&str> {
        BTreeMap::get(self, key).map(String::as_str)
    }
}

impl<P: ParamSource + ?Sized> ParamSource for &P {
    fn get(&self, key: &str) -> Option<&str> {
        (**self).get(key)
    }
}

/// Decode a table query from a parameter source.
#[must_use]
pub fn decode(params: &impl ParamSource) -> TableQuery {
    TableQuery {
        draw: int_or(params, "draw", 0),
        start: usize::try_from(int_or(params, "start", 0)).unwrap_or(0),
        length: int_or(params, "length", 0),
        columns: decode_columns(params),
        sort: decode_sort(params),
        global_search: params.get("search[value]").map(str::to_string),
        global_search_regex: bool_or(params, "search[regex]", false),
    }
}

fn decode_columns(params: &impl ParamSource) -> Vec<Column> {
    let mut columns = Vec::new();
    for i in 0..MAX_COLUMNS {
        // the data key is what marks a column as present
        let Some(data) = params.get(&format!("columns[{i}][data]")) else { break };
        columns.push(Column {
            data: data.to_string(),
            name: params.get(&format!("columns[{i}][name]")).unwrap_or_default().to_string(),
            search_value: params.get(&format!("columns[{i}][search][value]")).map(str::to_string),
            use_regex: bool_or(params, &format!("columns[{i}][search][regex]"), false),
            searchable: bool_or(params, &format!("columns[{i}][searchable]"), false),
            sortable: bool_or(params, &format!("columns[{i}][orderable]"), false),
        });
    }
    columns
}

fn decode_sort(params: &impl ParamSource) -> Vec<SortDirective> {
    let mut sort = Vec::new();
    for j in 0..MAX_COLUMNS {
        let Some(dir) = params.get(&format!("order[{j}][dir]")) else { break };
        let direction =
            if dir == "asc" { SortDirection::Ascending } else { SortDirection::Descending };
        let column = usize::try_from(int_or(params, &format!("order[{j}][column]"), 0)).unwrap_or(0);
        sort.push(SortDirective { column, direction });
    }
    sort
}

fn int_or(params: &impl ParamSource, key: &str, default: i64) -> i64 {
    params.get(key).and_then(|s| s.trim().parse().ok()).unwrap_or(default)
}

fn bool_or(params: &impl ParamSource, key: &str, default: bool) -> bool {
    params.get(key).and_then(|s| s.trim().parse().ok()).unwrap_or(default)
}

/// Encode a table query back into the flat parameter scheme. `decode` of the
/// result reproduces the query field-by-field.
#[must_use]
pub fn encode(query: &TableQuery) -> BTreeMap<String, String> {
    let mut params = BTreeMap::new();
    params.insert("draw".to_string(), query.draw.to_string());
    params.insert("start".to_string(), query.start.to_string());
    params.insert("length".to_string(), query.length.to_string());
    if let Some(global) = &query.global_search {
        params.insert("search[value]".to_string(), global.clone());
    }
    params.insert("search[regex]".to_string(), query.global_search_regex.to_string());
    for (i, column) in query.columns.iter().enumerate() {
        params.insert(format!("columns[{i}][data]"), column.data.clone());
        params.insert(format!("columns[{i}][name]"), column.name.clone());
        if let Some(term) = &column.search_value {
            params.insert(format!("columns[{i}][search][value]"), term.clone());
        }
        params.insert(format!("columns[{i}][search][regex]"), column.use_regex.to_string());
        params.insert(format!("columns[{i}][searchable]"), column.searchable.to_string());
        params.insert(format!("columns[{i}][orderable]"), column.sortable.to_string());
    }
    for (j, directive) in query.sort.iter().enumerate() {
        let dir = match directive.direction {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        };
        params.insert(format!("order[{j}][dir]"), dir.to_string());
        params.insert(format!("order[{j}][column]"), directive.column.to_string());
    }
    params
}
