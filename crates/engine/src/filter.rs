//! Sort and Filter - Row View Layer
//!
//! This module maps between:
//! - View space (body rows in the order the user sees them)
//! - Data space (body rows as supplied, 0..N-1)
//!
//! Key invariants:
//! - Sorting permutes `row_order`, filtering rewrites `visible_mask`
//! - Neither touches cell text
//! - visible_mask is indexed by DATA row (not view row)
//! - Sort and filter state are plain values owned by the caller

use std::borrow::Borrow;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::compare::{compare_values, stable_sort_by};
use crate::error::GridError;
use crate::table::Row;

// =============================================================================
// RowView: view order and visibility over body rows
// =============================================================================

#[derive(Debug, Clone)]
pub struct RowView {
    /// view_row -> data_row. Identity until a sort is applied.
    row_order: Vec<usize>,

    /// data_row -> view_row, rebuilt whenever row_order changes
    data_to_view_map: Vec<usize>,

    /// Indexed by DATA row. false = hidden by filter.
    visible_mask: Vec<bool>,

    /// Visible VIEW rows in order, rebuilt on sort or filter
    visible_rows: Vec<usize>,
}

impl Default for RowView {
    fn default() -> Self {
        Self::new(0)
    }
}

impl RowView {
    pub fn new(row_count: usize) -> Self {
        Self {
            row_order: (0..row_count).collect(),
            data_to_view_map: (0..row_count).collect(),
            visible_mask: vec![true; row_count],
            visible_rows: (0..row_count).collect(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.row_order.len()
    }

    pub fn visible_count(&self) -> usize {
        self.visible_rows.len()
    }

    pub fn view_to_data(&self, view_row: usize) -> usize {
        self.row_order[view_row]
    }

    /// None if the data row is hidden by a filter
    pub fn data_to_view(&self, data_row: usize) -> Option<usize> {
        if self.is_data_row_visible(data_row) {
            Some(self.data_to_view_map[data_row])
        } else {
            None
        }
    }

    pub fn is_data_row_visible(&self, data_row: usize) -> bool {
        self.visible_mask.get(data_row).copied().unwrap_or(false)
    }

    pub fn visible_rows(&self) -> &[usize] {
        &self.visible_rows
    }

    pub fn row_order(&self) -> &[usize] {
        &self.row_order
    }

    pub fn visible_mask(&self) -> &[bool] {
        &self.visible_mask
    }

    pub fn is_filtered(&self) -> bool {
        self.visible_count() < self.row_count()
    }

    /// Is the view order different from data order?
    pub fn is_sorted(&self) -> bool {
        self.row_order.iter().enumerate().any(|(i, &d)| i != d)
    }

    /// Install a new view order. `permutation` maps new view_row -> data_row.
    pub fn apply_sort(&mut self, permutation: Vec<usize>) {
        debug_assert_eq!(permutation.len(), self.row_order.len());
        self.row_order = permutation;
        self.rebuild_inverse_map();
        self.rebuild_visible_cache();
    }

    pub fn clear_sort(&mut self) {
        self.row_order = (0..self.row_order.len()).collect();
        self.rebuild_inverse_map();
        self.rebuild_visible_cache();
    }

    /// Install visibility flags indexed by data row.
    pub fn apply_filter(&mut self, visible_mask: Vec<bool>) {
        debug_assert_eq!(visible_mask.len(), self.row_order.len());
        self.visible_mask = visible_mask;
        self.rebuild_visible_cache();
    }

    pub fn clear_filter(&mut self) {
        self.visible_mask = vec![true; self.row_order.len()];
        self.rebuild_visible_cache();
    }

    fn rebuild_inverse_map(&mut self) {
        self.data_to_view_map.resize(self.row_order.len(), 0);
        for (view_row, &data_row) in self.row_order.iter().enumerate() {
            self.data_to_view_map[data_row] = view_row;
        }
    }

    fn rebuild_visible_cache(&mut self) {
        self.visible_rows = self
            .row_order
            .iter()
            .enumerate()
            .filter(|&(_, &data_row)| self.visible_mask.get(data_row).copied().unwrap_or(false))
            .map(|(view_row, _)| view_row)
            .collect();
    }
}

// =============================================================================
// Sorting
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Direction a sort applies after `previous`.
    ///
    /// No previous sort counts as "not ascending", so the first sort of a
    /// table is ascending and later ones alternate.
    pub fn next_after(previous: Option<Self>) -> Self {
        previous.unwrap_or(Self::Descending).toggled()
    }

    /// Header class marking a sorted column
    pub fn marker_class(self) -> &'static str {
        match self {
            Self::Ascending => "sorted-asc",
            Self::Descending => "sorted-desc",
        }
    }
}

/// Per-table sort memory: the last sorted column and the direction used.
///
/// The direction toggles per table, not per column: sorting column 2 right
/// after an ascending sort on column 0 sorts column 2 descending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub active_column: Option<usize>,
    pub direction: Option<SortDirection>,
}

impl SortState {
    /// Sort marker for a header column. Only the active column has one.
    pub fn marker(&self, column: usize) -> Option<SortDirection> {
        if self.active_column == Some(column) {
            self.direction
        } else {
            None
        }
    }

    pub fn record(&mut self, column: usize, direction: SortDirection) {
        self.active_column = Some(column);
        self.direction = Some(direction);
    }
}

/// Result of `sort_by_column`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOutcome {
    /// Input row indices in their new order
    pub order: Vec<usize>,
    /// Direction just applied; pass it back as `previous` next time
    pub direction: SortDirection,
}

/// Sort rows by the trimmed text of one column.
///
/// Pairs whose values both read as numbers compare numerically, all other
/// pairs compare as text. Equal rows keep their input order in both
/// directions. Fails with `ColumnOutOfRange` before doing any work if a row
/// has no cell at `column`.
pub fn sort_by_column<R: Borrow<Row>>(
    rows: &[R],
    column: usize,
    previous: Option<SortDirection>,
) -> Result<SortOutcome, GridError> {
    let mut keys = Vec::with_capacity(rows.len());
    for row in rows {
        let row = row.borrow();
        let cell = row
            .cell(column)
            .ok_or(GridError::ColumnOutOfRange { column, width: row.len() })?;
        keys.push(cell.trimmed());
    }

    let direction = SortDirection::next_after(previous);
    let mut order: Vec<usize> = (0..rows.len()).collect();
    stable_sort_by(&mut order, &mut |&a, &b| {
        let ord = compare_values(keys[a], keys[b]);
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });

    debug!("sorted {} row(s) on column {column} {direction:?}", rows.len());
    Ok(SortOutcome { order, direction })
}

// =============================================================================
// Filtering
// =============================================================================

/// Free-text row filter: every query term must occur in the row text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub query_terms: Vec<String>,
}

impl FilterState {
    /// Lowercase the query and split on single spaces.
    ///
    /// Runs of spaces leave empty terms behind; those match every row.
    pub fn from_query(query: &str) -> Self {
        Self {
            query_terms: query.to_lowercase().split(' ').map(String::from).collect(),
        }
    }

    /// Does the row text contain every term?
    ///
    /// Row text is each lowercased cell followed by one space, trailing
    /// space included, so a term may span two adjacent cells.
    pub fn matches(&self, row: &Row) -> bool {
        let mut text = String::new();
        for cell in row.cells() {
            text.push_str(&cell.text().to_lowercase());
            text.push(' ');
        }
        self.query_terms.iter().all(|term| text.contains(term.as_str()))
    }

    /// Does this filter hide anything at all?
    pub fn is_active(&self) -> bool {
        self.query_terms.iter().any(|t| !t.is_empty())
    }
}

/// One visibility flag per row, in input order.
pub fn filter_rows<R: Borrow<Row>>(rows: &[R], query: &str) -> Vec<bool> {
    let filter = FilterState::from_query(query);
    let flags: Vec<bool> = rows.iter().map(|r| filter.matches(r.borrow())).collect();
    debug!(
        "filter {:?}: {} of {} row(s) visible",
        query,
        flags.iter().filter(|&&v| v).count(),
        flags.len()
    );
    flags
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[&str]]) -> Vec<Row> {
        data.iter().map(|r| Row::from_texts(r.iter().copied())).collect()
    }

    fn column(rows: &[Row], order: &[usize], col: usize) -> Vec<String> {
        order.iter().map(|&i| rows[i].cells()[col].text().to_string()).collect()
    }

    #[test]
    fn test_row_view_identity() {
        let view = RowView::new(5);
        assert_eq!(view.row_count(), 5);
        assert_eq!(view.visible_count(), 5);
        for i in 0..5 {
            assert_eq!(view.view_to_data(i), i);
            assert_eq!(view.data_to_view(i), Some(i));
        }
        assert!(!view.is_sorted());
        assert!(!view.is_filtered());
    }

    #[test]
    fn test_row_view_sort_and_filter() {
        let mut view = RowView::new(5);
        view.apply_sort(vec![4, 3, 2, 1, 0]);
        // Mask is by DATA row: hide data rows 1 and 3
        view.apply_filter(vec![true, false, true, false, true]);

        assert!(view.is_sorted());
        assert!(view.is_filtered());
        assert_eq!(view.data_to_view(4), Some(0));
        assert_eq!(view.data_to_view(1), None);
        assert_eq!(view.visible_rows(), &[0, 2, 4]);

        view.clear_filter();
        view.clear_sort();
        assert!(!view.is_sorted());
        assert_eq!(view.visible_count(), 5);
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let data = rows(&[&["b", "2"], &["a", "2"], &["c", "1"]]);
        let out = sort_by_column(&data, 1, None).unwrap();
        assert_eq!(out.direction, SortDirection::Ascending);
        assert_eq!(column(&data, &out.order, 0), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_sort_descending_keeps_tie_order() {
        let data = rows(&[&["b", "2"], &["a", "2"], &["c", "1"]]);
        let out = sort_by_column(&data, 1, Some(SortDirection::Ascending)).unwrap();
        assert_eq!(out.direction, SortDirection::Descending);
        assert_eq!(column(&data, &out.order, 0), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_sort_accented_names_with_their_base_letter() {
        let data = rows(&[&["Zoe"], &["Émile"], &["adam"], &["Eve"]]);
        let out = sort_by_column(&data, 0, None).unwrap();
        assert_eq!(column(&data, &out.order, 0), vec!["adam", "Émile", "Eve", "Zoe"]);
    }

    #[test]
    fn test_sort_toggles_direction() {
        let data = rows(&[&["3"], &["1"], &["2"]]);
        let mut previous = None;
        let mut seen = Vec::new();
        for _ in 0..4 {
            let out = sort_by_column(&data, 0, previous).unwrap();
            seen.push(out.direction);
            previous = Some(out.direction);
        }
        use SortDirection::*;
        assert_eq!(seen, vec![Ascending, Descending, Ascending, Descending]);
    }

    #[test]
    fn test_sort_numeric_and_text_fallback() {
        let data = rows(&[&["10"], &["9"], &["apple"]]);
        let out = sort_by_column(&data, 0, None).unwrap();
        assert_eq!(column(&data, &out.order, 0), vec!["9", "10", "apple"]);
    }

    #[test]
    fn test_sort_trims_before_comparing() {
        let data = rows(&[&["  20 "], &["3"], &[" 100"]]);
        let out = sort_by_column(&data, 0, None).unwrap();
        assert_eq!(out.order, vec![1, 0, 2]);
    }

    #[test]
    fn test_sort_empty_still_toggles() {
        let data: Vec<Row> = Vec::new();
        let out = sort_by_column(&data, 3, Some(SortDirection::Ascending)).unwrap();
        assert!(out.order.is_empty());
        assert_eq!(out.direction, SortDirection::Descending);
    }

    #[test]
    fn test_sort_column_out_of_range() {
        let data = rows(&[&["a", "b"]]);
        assert_eq!(
            sort_by_column(&data, 2, None),
            Err(GridError::ColumnOutOfRange { column: 2, width: 2 })
        );
    }

    #[test]
    fn test_sort_state_marks_one_column() {
        let mut state = SortState::default();
        assert_eq!(state.marker(0), None);
        state.record(0, SortDirection::Ascending);
        state.record(2, SortDirection::Descending);
        assert_eq!(state.marker(0), None);
        assert_eq!(state.marker(2), Some(SortDirection::Descending));
        assert_eq!(SortDirection::Descending.marker_class(), "sorted-desc");
    }

    #[test]
    fn test_filter_tokens_keep_empty_terms() {
        let filter = FilterState::from_query("10A  Smith");
        assert_eq!(filter.query_terms, vec!["10a", "", "smith"]);
        assert!(filter.is_active());
        assert!(!FilterState::from_query("").is_active());
    }

    #[test]
    fn test_filter_double_space_query() {
        let data = rows(&[&["10a-smith", "2024"], &["10b-jones", "2024"]]);
        assert_eq!(filter_rows(&data, "10a  smith"), vec![true, false]);
    }

    #[test]
    fn test_filter_requires_every_term() {
        let data = rows(&[&["Alice", "Math"], &["Bob", "Math"], &["Alice", "Art"]]);
        assert_eq!(filter_rows(&data, "alice math"), vec![true, false, false]);
        assert_eq!(filter_rows(&data, ""), vec![true, true, true]);
    }

    #[test]
    fn test_filter_trailing_spaces() {
        let data = rows(&[&["Alice", "Math"]]);
        assert_eq!(filter_rows(&data, "math "), vec![true]);
        assert_eq!(filter_rows(&data, "alice  "), vec![true]);
        assert_eq!(filter_rows(&data, "alice  art"), vec![false]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let data = rows(&[&["Alice", "A+"], &["Bob", "B"]]);
        assert_eq!(filter_rows(&data, "b"), filter_rows(&data, "b"));
    }
}
