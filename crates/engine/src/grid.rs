//! Per-table UI state and the id-keyed page of tables.

use std::collections::BTreeMap;

use log::debug;

use crate::error::GridError;
use crate::filter::{filter_rows, sort_by_column, FilterState, RowView, SortDirection, SortState};
use crate::table::{Row, Table};

/// A table plus the sort/filter state the UI keeps for it.
#[derive(Debug, Clone)]
pub struct Grid {
    table: Table,
    view: RowView,
    sort: SortState,
    filter: FilterState,
}

impl Grid {
    pub fn new(table: Table) -> Self {
        let view = RowView::new(table.body().len());
        Self {
            table,
            view,
            sort: SortState::default(),
            filter: FilterState::default(),
        }
    }

    pub fn id(&self) -> &str {
        self.table.id()
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn view(&self) -> &RowView {
        &self.view
    }

    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.filter
    }

    /// Sort the body by `column`, toggling the table's direction.
    ///
    /// Rows are sorted in their current view order, so equal values keep the
    /// order the user last saw. On error nothing changes.
    pub fn sort(&mut self, column: usize) -> Result<SortDirection, GridError> {
        self.table.check_column(column)?;

        let current = self.view.row_order().to_vec();
        let rows: Vec<&Row> = current.iter().map(|&d| &self.table.body()[d]).collect();
        let outcome = sort_by_column(&rows, column, self.sort.direction)?;

        let permutation = outcome.order.iter().map(|&i| current[i]).collect();
        self.view.apply_sort(permutation);
        self.sort.record(column, outcome.direction);
        debug!("table {}: column {column} now {:?}", self.id(), outcome.direction);
        Ok(outcome.direction)
    }

    /// Restore data order and forget the sort.
    pub fn clear_sort(&mut self) {
        self.view.clear_sort();
        self.sort = SortState::default();
    }

    /// Apply a free-text query. Returns the number of visible body rows.
    pub fn filter(&mut self, query: &str) -> usize {
        let mask = filter_rows(self.table.body(), query);
        self.view.apply_filter(mask);
        self.filter = FilterState::from_query(query);
        self.view.visible_count()
    }

    pub fn clear_filter(&mut self) {
        self.view.clear_filter();
        self.filter = FilterState::default();
    }

    /// Body rows in view order, hidden ones included.
    pub fn body_in_view_order(&self) -> impl Iterator<Item = (&Row, bool)> {
        self.view.row_order().iter().map(|&d| (&self.table.body()[d], self.view.is_data_row_visible(d)))
    }

    /// Visible body rows in view order.
    pub fn visible_body(&self) -> Vec<&Row> {
        self.body_in_view_order().filter(|(_, visible)| *visible).map(|(row, _)| row).collect()
    }
}

/// Tables of one page, looked up by element id.
#[derive(Debug, Clone, Default)]
pub struct Page {
    grids: BTreeMap<String, Grid>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table, replacing any table with the same id.
    pub fn insert(&mut self, table: Table) -> Option<Grid> {
        self.grids.insert(table.id().to_string(), Grid::new(table))
    }

    pub fn remove(&mut self, id: &str) -> Option<Grid> {
        self.grids.remove(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.grids.keys().map(String::as_str)
    }

    pub fn grid(&self, id: &str) -> Result<&Grid, GridError> {
        self.grids.get(id).ok_or_else(|| GridError::NotFound(id.to_string()))
    }

    pub fn grid_mut(&mut self, id: &str) -> Result<&mut Grid, GridError> {
        self.grids.get_mut(id).ok_or_else(|| GridError::NotFound(id.to_string()))
    }

    pub fn sort(&mut self, id: &str, column: usize) -> Result<SortDirection, GridError> {
        self.grid_mut(id)?.sort(column)
    }

    pub fn filter(&mut self, id: &str, query: &str) -> Result<usize, GridError> {
        Ok(self.grid_mut(id)?.filter(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn students() -> Table {
        Table::from_text(
            "students",
            &["ID", "Name", "Score"],
            &[
                vec!["S003", "Carol", "88"],
                vec!["S001", "alice", "92"],
                vec!["S002", "Bob", "88"],
                vec!["S004", "Dave", "75"],
            ],
        )
        .unwrap()
    }

    fn names(grid: &Grid) -> Vec<String> {
        grid.body_in_view_order().map(|(r, _)| r.cells()[1].text().to_string()).collect()
    }

    #[test]
    fn test_grid_first_sort_ascending_then_toggles() {
        let mut grid = Grid::new(students());
        assert_eq!(grid.sort(2).unwrap(), SortDirection::Ascending);
        assert_eq!(names(&grid), vec!["Dave", "Carol", "Bob", "alice"]);

        assert_eq!(grid.sort(2).unwrap(), SortDirection::Descending);
        // Ties (Carol, Bob at 88) keep the order they had on screen
        assert_eq!(names(&grid), vec!["alice", "Carol", "Bob", "Dave"]);

        let state = grid.sort_state();
        assert_eq!(state.marker(2), Some(SortDirection::Descending));
        assert_eq!(state.marker(1), None);
    }

    #[test]
    fn test_grid_direction_is_per_table() {
        let mut grid = Grid::new(students());
        grid.sort(0).unwrap();
        assert_eq!(grid.sort(1).unwrap(), SortDirection::Descending);
        assert_eq!(grid.sort_state().marker(0), None);
        assert_eq!(grid.sort_state().marker(1), Some(SortDirection::Descending));
    }

    #[test]
    fn test_grid_sort_out_of_range_leaves_state() {
        let mut grid = Grid::new(students());
        grid.sort(0).unwrap();
        let before = names(&grid);
        let err = grid.sort(3).unwrap_err();
        assert_eq!(err, GridError::ColumnOutOfRange { column: 3, width: 3 });
        assert_eq!(names(&grid), before);
        assert_eq!(grid.sort_state().active_column, Some(0));
    }

    #[test]
    fn test_grid_filter_and_sort_compose() {
        let mut grid = Grid::new(students());
        assert_eq!(grid.filter("88"), 2);
        grid.sort(1).unwrap();
        let visible: Vec<&str> = grid.visible_body().iter().map(|r| r.cells()[1].text()).collect();
        assert_eq!(visible, vec!["Bob", "Carol"]);
        assert_eq!(grid.filter_state().query_terms, vec!["88"]);

        grid.clear_filter();
        grid.clear_sort();
        assert_eq!(grid.visible_body().len(), 4);
        assert_eq!(names(&grid), vec!["Carol", "alice", "Bob", "Dave"]);
    }

    #[test]
    fn test_page_lookup() {
        let mut page = Page::new();
        page.insert(students());
        assert_eq!(page.ids().collect::<Vec<_>>(), vec!["students"]);
        assert_eq!(page.filter("students", "s00").unwrap(), 4);
        assert_eq!(page.sort("courses", 0), Err(GridError::NotFound("courses".into())));
        assert!(page.grid("courses").is_err());
        assert!(page.remove("students").is_some());
    }
}
