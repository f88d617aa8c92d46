use chrono::{TimeZone, Utc};
use dyntable::query::{self, SortDirection, SortDirective, TableQuery};
use dyntable::source::MemorySource;
use dyntable::test_support::{Address, UserAccount, searchable_column, sortable_column};
use proptest::prelude::*;

fn account(id: i64, name: String) -> UserAccount {
    UserAccount {
        id,
        email: format!("{name}@example.com"),
        name,
        nickname: None,
        active: id % 2 == 0,
        balance: 0.0,
        signed_up: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        address: Address { city: "X".into(), zip: "0".into() },
    }
}

fn accounts() -> impl Strategy<Value = Vec<UserAccount>> {
    proptest::collection::vec((any::<i64>(), "[a-z]{0,8}"), 0..40)
        .prop_map(|rows| rows.into_iter().map(|(id, name)| account(id, name)).collect())
}

proptest! {
    #[test]
    fn page_never_exceeds_length_or_filtered_count(
        rows in accounts(),
        start in 0usize..50,
        length in 1i64..20,
        term in "[a-z]{0,3}",
    ) {
        let query = TableQuery {
            start,
            length,
            columns: vec![searchable_column("name")],
            global_search: Some(term),
            ..TableQuery::default()
        };
        let total = rows.len();
        let resp = query::process(MemorySource::new(rows), &query).unwrap();
        prop_assert_eq!(resp.records_total, total);
        prop_assert!(resp.records_filtered <= resp.records_total);
        prop_assert!(resp.data.len() <= usize::try_from(length).unwrap());
        prop_assert!(resp.data.len() <= resp.records_filtered);
    }

    #[test]
    fn no_terms_is_the_identity_filter(rows in accounts()) {
        let query = TableQuery {
            length: 0,
            columns: vec![searchable_column("name"), searchable_column("email")],
            ..TableQuery::default()
        };
        let total = rows.len();
        let resp = query::process(MemorySource::new(rows), &query).unwrap();
        prop_assert_eq!(resp.records_filtered, total);
        prop_assert_eq!(resp.data.len(), total);
    }

    #[test]
    fn ascending_id_sort_is_non_decreasing(rows in accounts()) {
        let query = TableQuery {
            length: 0,
            columns: vec![sortable_column("id")],
            sort: vec![SortDirective { column: 0, direction: SortDirection::Ascending }],
            ..TableQuery::default()
        };
        let resp = query::process(MemorySource::new(rows), &query).unwrap();
        for pair in resp.data.windows(2) {
            prop_assert!(pair[0].id <= pair[1].id);
        }
    }

    #[test]
    fn filtered_rows_all_match_the_term(rows in accounts(), term in "[a-z]{1,2}") {
        let query = TableQuery {
            length: 0,
            columns: vec![searchable_column("name")],
            global_search: Some(term.clone()),
            ..TableQuery::default()
        };
        let resp = query::process(MemorySource::new(rows), &query).unwrap();
        prop_assert_eq!(resp.data.len(), resp.records_filtered);
        for row in &resp.data {
            prop_assert!(row.name.contains(&term));
        }
    }
}
