// Property-based tests for sort and filter.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use proptest::prelude::*;
use rostergrid_engine::compare::compare_values;
use rostergrid_engine::{filter_rows, sort_by_column, Row, SortDirection};

fn config_256() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

/// Cell text: mostly numeric, sometimes words, sometimes blank.
fn arb_cell() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => r" ?-?[0-9]{1,4}(\.[0-9]{1,2})? ?",
        2 => r"[a-zA-Z ]{0,8}",
        1 => Just(String::new()),
    ]
}

fn arb_rows() -> impl Strategy<Value = Vec<Row>> {
    proptest::collection::vec(proptest::collection::vec(arb_cell(), 3), 0..40)
        .prop_map(|rows| rows.into_iter().map(Row::from_texts).collect())
}

fn arb_query() -> impl Strategy<Value = String> {
    r"[a-zA-Z0-9 ]{0,6}"
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn sort_returns_permutation(rows in arb_rows(), col in 0usize..3) {
        let out = sort_by_column(&rows, col, None).unwrap();
        let mut seen = out.order.clone();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..rows.len()).collect::<Vec<_>>());
    }

    #[test]
    fn sort_never_touches_cells(rows in arb_rows(), col in 0usize..3) {
        let before = rows.clone();
        let _ = sort_by_column(&rows, col, Some(SortDirection::Ascending)).unwrap();
        prop_assert_eq!(before, rows);
    }

    #[test]
    fn equal_keys_keep_input_order(rows in arb_rows(), col in 0usize..3, asc in any::<bool>()) {
        let previous = if asc { None } else { Some(SortDirection::Ascending) };
        let out = sort_by_column(&rows, col, previous).unwrap();
        for pair in out.order.windows(2) {
            let a = rows[pair[0]].cells()[col].trimmed();
            let b = rows[pair[1]].cells()[col].trimmed();
            if compare_values(a, b).is_eq() {
                prop_assert!(pair[0] < pair[1], "tie {:?} reordered", a);
            }
        }
    }

    #[test]
    fn filter_is_idempotent(rows in arb_rows(), query in arb_query()) {
        prop_assert_eq!(filter_rows(&rows, &query), filter_rows(&rows, &query));
    }

    #[test]
    fn filter_yields_one_flag_per_row(rows in arb_rows(), query in arb_query()) {
        prop_assert_eq!(filter_rows(&rows, &query).len(), rows.len());
    }

    #[test]
    fn empty_query_shows_everything(rows in arb_rows()) {
        prop_assert!(filter_rows(&rows, "").into_iter().all(|v| v));
    }
}
