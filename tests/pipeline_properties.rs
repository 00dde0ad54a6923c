//! Property tests for the ticket projection and the selection set.

use proptest::prelude::*;
use tickets::pipeline::{FilterState, SortDirection, SortState, project};
use tickets::selection::Selection;
use tickets::ticket::{ColumnKey, StatusFilter, Ticket};

fn status_value() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Open".to_string()),
        Just("OPEN".to_string()),
        Just("Closed".to_string()),
        Just("closed".to_string()),
        Just("Pending".to_string()),
        Just("Resolved".to_string()),
    ]
}

prop_compose! {
    // Few distinct values so that sort ties are common.
    fn ticket()(
        id in "#[0-9]{1,3}",
        subject in "[a-c ]{0,4}",
        account in "[A-C]{0,2}",
        category in "[xy]{0,2}",
        created in prop_oneof![Just("Jun 10, 2025"), Just("Jun 9, 2025"), Just("May 1, 2025")],
        status in status_value(),
    ) -> Ticket {
        Ticket::new(&id, &subject, &account, &category, "sub", created, &status)
    }
}

fn column() -> impl Strategy<Value = ColumnKey> {
    proptest::sample::select(ColumnKey::ALL.to_vec())
}

fn status_filter() -> impl Strategy<Value = StatusFilter> {
    proptest::sample::select(StatusFilter::ALL.to_vec())
}

fn visible() -> impl Strategy<Value = Selection> {
    proptest::sample::subsequence(ColumnKey::ALL.to_vec(), 0..=7)
        .prop_map(|cols| Selection::from_keys(cols.iter().map(|c| c.key())))
}

fn sources(rows: &[Ticket], filter: &FilterState, sort: &SortState, visible: &Selection) -> Vec<usize> {
    project(rows, filter, sort, visible).source_indices()
}

proptest! {
    #[test]
    fn status_filter_only_keeps_matching_rows(
        rows in prop::collection::vec(ticket(), 0..20),
        status in status_filter(),
        cols in visible(),
    ) {
        let filter = FilterState::new(status, "");
        for idx in sources(&rows, &filter, &SortState::default(), &cols) {
            if status != StatusFilter::All {
                prop_assert_eq!(rows[idx].status.to_lowercase(), status.key());
            }
        }
    }

    #[test]
    fn whitespace_search_is_a_no_op(
        rows in prop::collection::vec(ticket(), 0..20),
        status in status_filter(),
        term in "[ \t\n]{0,4}",
        cols in visible(),
    ) {
        let with_term = sources(&rows, &FilterState::new(status, &term), &SortState::default(), &cols);
        let without = sources(&rows, &FilterState::new(status, ""), &SortState::default(), &cols);
        prop_assert_eq!(with_term, without);
    }

    #[test]
    fn sort_is_stable(
        rows in prop::collection::vec(ticket(), 0..20),
        col in column(),
        descending in any::<bool>(),
    ) {
        let direction = if descending { SortDirection::Descending } else { SortDirection::Ascending };
        let sorted = sources(&rows, &FilterState::default(), &SortState::new(Some(col), direction), &Selection::empty());
        prop_assert_eq!(sorted.len(), rows.len());
        for pair in sorted.windows(2) {
            let (a, b) = (&rows[pair[0]], &rows[pair[1]]);
            match direction {
                SortDirection::Ascending => prop_assert!(a.field(col) <= b.field(col)),
                SortDirection::Descending => prop_assert!(a.field(col) >= b.field(col)),
            }
            if a.field(col) == b.field(col) {
                prop_assert!(pair[0] < pair[1], "tied rows changed their relative order");
            }
        }
    }

    #[test]
    fn flipping_direction_reverses_the_groups(
        rows in prop::collection::vec(ticket(), 0..20),
        col in column(),
    ) {
        let asc = sources(&rows, &FilterState::default(), &SortState::new(Some(col), SortDirection::Ascending), &Selection::empty());
        let desc = sources(&rows, &FilterState::default(), &SortState::new(Some(col), SortDirection::Descending), &Selection::empty());

        let groups = |order: &[usize]| -> Vec<(String, Vec<usize>)> {
            let mut out: Vec<(String, Vec<usize>)> = Vec::new();
            for &idx in order {
                let value = rows[idx].field(col).to_string();
                match out.last_mut() {
                    Some((v, members)) if *v == value => members.push(idx),
                    _ => out.push((value, vec![idx])),
                }
            }
            out
        };
        let mut asc_groups = groups(&asc);
        asc_groups.reverse();
        prop_assert_eq!(asc_groups, groups(&desc));
    }

    #[test]
    fn projected_columns_follow_canonical_order(
        rows in prop::collection::vec(ticket(), 0..5),
        mut keys in proptest::sample::subsequence(ColumnKey::ALL.to_vec(), 0..=7),
    ) {
        keys.reverse();
        let selection = Selection::from_keys(keys.iter().map(|c| c.key()));
        let p = project(&rows, &FilterState::default(), &SortState::default(), &selection);
        keys.sort();
        prop_assert_eq!(p.columns, keys);
    }

    #[test]
    fn toggle_is_its_own_inverse(
        keys in prop::collection::vec("[a-e]", 0..6),
        key in "[a-g]",
    ) {
        let selection = Selection::from_keys(keys);
        let twice = selection.toggle(&key).toggle(&key);
        prop_assert_eq!(twice.is_selected(&key), selection.is_selected(&key));
        prop_assert_eq!(&twice, &selection);
        if selection.is_selected(&key) {
            prop_assert_eq!(twice.keys().last(), Some(&key));
        }
    }

    #[test]
    fn clear_always_empties(keys in prop::collection::vec("[a-z]{1,3}", 0..8)) {
        prop_assert!(Selection::from_keys(keys).clear().is_empty());
    }
}
