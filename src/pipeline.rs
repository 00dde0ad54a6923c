//! Row projection: status filter, search filter, sort and column projection.
//!
//! Every step works on a vector of row indices into the dataset, the same way a
//! table view keeps a mapping of view rows to data rows. The projection is
//! recomputed from scratch on every call.

use std::cmp::Ordering;

use tracing::trace;

use crate::selection::Selection;
use crate::ticket::{ColumnKey, StatusFilter, Ticket};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Sort indicator shown next to a column header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
    Unsorted,
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub column: Option<ColumnKey>,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(column: Option<ColumnKey>, direction: SortDirection) -> Self {
        Self { column, direction }
    }

    /// Unknown column keys leave the table unsorted.
    pub fn from_key(key: &str, direction: SortDirection) -> Self {
        Self {
            column: ColumnKey::from_key(key),
            direction,
        }
    }

    /// Header click: flip the direction of the sorted column, or sort a new column ascending.
    pub fn click(self, column: ColumnKey) -> Self {
        if self.column == Some(column) {
            Self {
                column: Some(column),
                direction: self.direction.flip(),
            }
        } else {
            Self {
                column: Some(column),
                direction: SortDirection::Ascending,
            }
        }
    }

    pub fn indicator(&self, column: ColumnKey) -> SortIndicator {
        match (self.column, self.direction) {
            (Some(c), SortDirection::Ascending) if c == column => SortIndicator::Ascending,
            (Some(c), SortDirection::Descending) if c == column => SortIndicator::Descending,
            _ => SortIndicator::Unsorted,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub status: StatusFilter,
    pub search_term: String,
}

impl FilterState {
    pub fn new(status: StatusFilter, search_term: &str) -> Self {
        Self {
            status,
            search_term: search_term.to_string(),
        }
    }
}

/// One surviving row with its cells in projected column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedRow<'a> {
    pub source: usize,
    pub cells: Vec<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Projection<'a> {
    pub columns: Vec<ColumnKey>,
    pub rows: Vec<ProjectedRow<'a>>,
}

impl<'a> Projection<'a> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn source_indices(&self) -> Vec<usize> {
        self.rows.iter().map(|r| r.source).collect()
    }

    pub fn cell(&self, row: usize, column: ColumnKey) -> Option<&'a str> {
        let cidx = self.columns.iter().position(|&c| c == column)?;
        self.rows.get(row).and_then(|r| r.cells.get(cidx)).copied()
    }
}

/// Runs the whole pipeline over `rows`.
pub fn project<'a>(
    rows: &'a [Ticket],
    filter: &FilterState,
    sort: &SortState,
    visible: &Selection,
) -> Projection<'a> {
    let columns = visible_columns(visible);

    let all: Vec<usize> = (0..rows.len()).collect();
    let by_status = filter_by_status(rows, all, filter.status);
    let by_search = filter_by_search(rows, by_status, &filter.search_term, &columns);
    let sorted = sort_rows(rows, by_search, sort);

    trace!(
        "Projected {} of {} rows, status {:?}, term {:?}, sort {:?}, {} columns",
        sorted.len(),
        rows.len(),
        filter.status,
        filter.search_term,
        sort,
        columns.len()
    );

    let projected = sorted
        .into_iter()
        .map(|ridx| ProjectedRow {
            source: ridx,
            cells: columns.iter().map(|&c| rows[ridx].field(c)).collect(),
        })
        .collect();

    Projection {
        columns,
        rows: projected,
    }
}

/// Known visible columns in canonical order. Unknown keys are skipped.
pub fn visible_columns(visible: &Selection) -> Vec<ColumnKey> {
    ColumnKey::ALL
        .into_iter()
        .filter(|c| visible.is_selected(c.key()))
        .collect()
}

pub fn filter_by_status(rows: &[Ticket], mask: Vec<usize>, status: StatusFilter) -> Vec<usize> {
    if status == StatusFilter::All {
        return mask;
    }
    mask.into_iter()
        .filter(|&ridx| status.matches(&rows[ridx].status))
        .collect()
}

/// Keeps rows where any of `columns` contains `term`, ignoring case.
pub fn filter_by_search(
    rows: &[Ticket],
    mask: Vec<usize>,
    term: &str,
    columns: &[ColumnKey],
) -> Vec<usize> {
    if term.trim().is_empty() {
        return mask;
    }
    let needle = term.to_lowercase();
    mask.into_iter()
        .filter(|&ridx| {
            columns
                .iter()
                .any(|&c| rows[ridx].field(c).to_lowercase().contains(&needle))
        })
        .collect()
}

/// Stable sort by the plain string value of the sort column.
pub fn sort_rows(rows: &[Ticket], mut mask: Vec<usize>, sort: &SortState) -> Vec<usize> {
    let Some(column) = sort.column else {
        return mask;
    };
    mask.sort_by(|&a, &b| {
        let ord: Ordering = rows[a].field(column).cmp(rows[b].field(column));
        match sort.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    mask
}
