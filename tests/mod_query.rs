use chrono::{TimeZone, Utc};
use dyntable::errors::QueryError;
use dyntable::query::{self, SortDirection, SortDirective, TableQuery};
use dyntable::source::MemorySource;
use dyntable::test_support::{
    Address, UserAccount, sample_accounts, searchable_column, sortable_column,
};

fn account(id: i64, name: &str) -> UserAccount {
    UserAccount {
        id,
        name: name.to_string(),
        email: format!("{}@test.com", name.to_lowercase()),
        nickname: None,
        active: true,
        balance: 0.0,
        signed_up: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        address: Address { city: "Jakarta".into(), zip: "10000".into() },
    }
}

#[test]
fn global_search_matches_any_searchable_column() {
    let rows = vec![account(1, "Amie"), account(2, "Anna"), account(3, "Amanda")];
    let query = TableQuery {
        draw: 9,
        length: 10,
        columns: vec![searchable_column("name")],
        global_search: Some("Am".into()),
        ..TableQuery::default()
    };
    let resp = query::process(MemorySource::new(rows), &query).unwrap();
    assert_eq!(resp.draw, 9);
    assert_eq!(resp.records_total, 3);
    assert_eq!(resp.records_filtered, 2);
    let names: Vec<_> = resp.data.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["Amie", "Amanda"]);
}

#[test]
fn ascending_sort_with_page_returns_lowest_ids() {
    let rows: Vec<_> = [4, 7, 1, 6, 3, 5, 2].iter().map(|&id| account(id, "user")).collect();
    let query = TableQuery {
        start: 0,
        length: 2,
        columns: vec![sortable_column("id")],
        sort: vec![SortDirective { column: 0, direction: SortDirection::Ascending }],
        ..TableQuery::default()
    };
    let resp = query::process(MemorySource::new(rows), &query).unwrap();
    assert_eq!(resp.records_total, 7);
    assert_eq!(resp.records_filtered, 7);
    let ids: Vec<_> = resp.data.iter().map(|a| a.id).collect();
    assert_eq!(ids, [1, 2]);
}

#[test]
fn no_search_terms_means_identity_filter() {
    let query = TableQuery {
        length: 100,
        columns: vec![searchable_column("name"), searchable_column("email")],
        ..TableQuery::default()
    };
    let resp = query::process(MemorySource::new(sample_accounts()), &query).unwrap();
    assert_eq!(resp.records_filtered, resp.records_total);
    assert_eq!(resp.data.len(), 5);
}

#[test]
fn length_zero_takes_all() {
    let query = TableQuery {
        start: 1,
        length: 0,
        columns: vec![searchable_column("name")],
        ..TableQuery::default()
    };
    let resp = query::process(MemorySource::new(sample_accounts()), &query).unwrap();
    assert_eq!(resp.data.len(), 4);

    let query = TableQuery { length: -1, ..query };
    let resp = query::process(MemorySource::new(sample_accounts()), &query).unwrap();
    assert_eq!(resp.data.len(), 4);
}

#[test]
fn start_beyond_filtered_set_yields_empty_page() {
    let query = TableQuery {
        start: 50,
        length: 10,
        columns: vec![searchable_column("name")],
        ..TableQuery::default()
    };
    let resp = query::process(MemorySource::new(sample_accounts()), &query).unwrap();
    assert!(resp.data.is_empty());
    assert_eq!(resp.records_filtered, 5);
}

#[test]
fn sort_last_applicable_directive_wins() {
    // name ascending, then id descending: the second full re-sort
    // determines the final order
    let query = TableQuery {
        length: 10,
        columns: vec![sortable_column("name"), sortable_column("id")],
        sort: vec![
            SortDirective { column: 0, direction: SortDirection::Ascending },
            SortDirective { column: 1, direction: SortDirection::Descending },
        ],
        ..TableQuery::default()
    };
    let resp = query::process(MemorySource::new(sample_accounts()), &query).unwrap();
    let ids: Vec<_> = resp.data.iter().map(|a| a.id).collect();
    assert_eq!(ids, [5, 4, 3, 2, 1]);
}

#[test]
fn earlier_directives_survive_only_through_stability() {
    // equal cities tie-break by the earlier name sort
    let query = TableQuery {
        length: 10,
        columns: vec![sortable_column("name"), sortable_column("address.city")],
        sort: vec![
            SortDirective { column: 0, direction: SortDirection::Descending },
            SortDirective { column: 1, direction: SortDirection::Ascending },
        ],
        ..TableQuery::default()
    };
    let resp = query::process(MemorySource::new(sample_accounts()), &query).unwrap();
    let cities: Vec<_> = resp.data.iter().map(|a| a.address.city.as_str()).collect();
    assert_eq!(cities, ["Bandung", "Jakarta", "Jakarta", "Medan", "Surabaya"]);
    // both Jakarta rows: Baron before Amie, the descending-name order
    let jakarta: Vec<_> = resp
        .data
        .iter()
        .filter(|a| a.address.city == "Jakarta")
        .map(|a| a.name.as_str())
        .collect();
    assert_eq!(jakarta, ["Baron", "Amie"]);
}

#[test]
fn unsortable_directive_has_no_effect_on_order() {
    let mut plain = sortable_column("name");
    plain.sortable = false;
    let query = TableQuery {
        length: 10,
        columns: vec![plain],
        sort: vec![SortDirective { column: 0, direction: SortDirection::Descending }],
        ..TableQuery::default()
    };
    let resp = query::process(MemorySource::new(sample_accounts()), &query).unwrap();
    let names: Vec<_> = resp.data.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["Amie", "Anna", "Amanda", "Baron", "Jacky"]);
}

#[test]
fn compile_failure_aborts_without_partial_response() {
    let mut id = sortable_column("id");
    id.searchable = true;
    let query = TableQuery {
        length: 10,
        columns: vec![id],
        global_search: Some("Am".into()),
        ..TableQuery::default()
    };
    let err = query::process(MemorySource::new(sample_accounts()), &query).unwrap_err();
    assert!(matches!(err, QueryError::UnsupportedOperator { .. }));
}

#[test]
fn nested_paths_search_and_sort() {
    let query = TableQuery {
        length: 10,
        columns: vec![searchable_column("address.city")],
        global_search: Some("Jakarta".into()),
        sort: vec![],
        ..TableQuery::default()
    };
    let resp = query::process(MemorySource::new(sample_accounts()), &query).unwrap();
    assert_eq!(resp.records_filtered, 2);
    let names: Vec<_> = resp.data.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["Amie", "Baron"]);
}

#[test]
fn envelope_serializes_to_the_wire_shape() {
    let query = TableQuery {
        draw: 2,
        length: 1,
        columns: vec![searchable_column("name")],
        global_search: Some("Anna".into()),
        ..TableQuery::default()
    };
    let resp = query::process(MemorySource::new(sample_accounts()), &query).unwrap();
    let json = serde_json::to_value(&resp).unwrap();
    assert_eq!(json["draw"], 2);
    assert_eq!(json["recordsTotal"], 5);
    assert_eq!(json["recordsFiltered"], 1);
    assert_eq!(json["data"][0]["name"], "Anna");
    assert!(json["error"].is_null());
}
