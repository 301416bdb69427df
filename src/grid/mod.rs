//! Accessible grid model
//!
//! A `Grid` holds a header schema and rows of cells aligned to it, tracks
//! which cell has keyboard focus, and recomputes the announced description
//! of a cell every time focus lands on it.
//!
//! Rows are always replaced wholesale: `populate_rows` validates the new rows,
//! drops the ones whose length does not match the header count, and swaps the
//! survivors in at once so readers never observe a half-populated grid.

pub mod columns;
pub mod description;
pub mod navigation;

pub use columns::ColumnDef;
pub use description::{describe, Announcement, CellContext};
pub use navigation::{Bounds, FocusPosition, NavOutcome};

use tracing::{trace, warn};

use crate::config::DEFAULT_EMPTY_PLACEHOLDER;
use crate::error::{GridError, GridResult, ProviderError};
use crate::types::Direction;

/// One cell: the raw value plus the description cached on last focus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    value: String,
    description: Option<String>,
}

impl Cell {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            description: None,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Description computed the last time this cell received focus
    pub fn cached_description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Summary of one `populate_rows` call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PopulateReport {
    pub accepted: usize,
    pub rejected: usize,
}

/// A navigable, screen-reader friendly table
#[derive(Debug, Clone)]
pub struct Grid {
    name: String,
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
    focus: FocusPosition,
    announcement: Option<Announcement>,
    rejected: Vec<GridError>,
    placeholder: Option<String>,
    empty_placeholder: String,
    announce_positions: bool,
}

impl Grid {
    /// Create an empty grid with the given accessible name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            headers: Vec::new(),
            rows: Vec::new(),
            focus: FocusPosition::Unfocused,
            announcement: None,
            rejected: Vec::new(),
            placeholder: Some(DEFAULT_EMPTY_PLACEHOLDER.to_string()),
            empty_placeholder: DEFAULT_EMPTY_PLACEHOLDER.to_string(),
            announce_positions: false,
        }
    }

    /// Create a grid whose schema and rows come from typed records
    pub fn from_records<T>(name: impl Into<String>, columns: &[ColumnDef<T>], records: &[T]) -> Self {
        let mut grid = Self::new(name);
        // A fresh grid holds no rows, so setting columns cannot fail.
        grid.headers = columns::headers(columns);
        grid.populate_rows(columns::extract_rows(columns, records));
        grid
    }

    /// Set the text shown when the grid has no rows
    pub fn with_empty_placeholder(mut self, text: impl Into<String>) -> Self {
        self.empty_placeholder = text.into();
        if self.rows.is_empty() {
            self.placeholder = Some(self.empty_placeholder.clone());
        }
        self
    }

    /// Append the cell position to the long-form help channel
    pub fn with_positions(mut self, enabled: bool) -> Self {
        self.announce_positions = enabled;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Accessible description of the table as a whole
    pub fn accessible_description(&self) -> String {
        format!(
            "{} table. Use arrow keys to navigate cells, Tab to enter or exit table.",
            self.name
        )
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether this grid has at least one cell that can take focus
    pub fn is_navigable(&self) -> bool {
        !self.rows.is_empty() && !self.headers.is_empty()
    }

    fn bounds(&self) -> Bounds {
        Bounds {
            rows: self.rows.len(),
            cols: self.headers.len(),
        }
    }

    /// Reset the header schema
    ///
    /// Existing rows were aligned to the previous schema and are discarded.
    /// Clearing the schema while rows exist is a configuration error.
    pub fn set_columns<S: Into<String>>(&mut self, headers: Vec<S>) -> GridResult<()> {
        if headers.is_empty() && !self.rows.is_empty() {
            return Err(GridError::Configuration {
                grid: self.name.clone(),
                rows: self.rows.len(),
            });
        }

        self.headers = headers.into_iter().map(Into::into).collect();
        self.rows.clear();
        self.rejected.clear();
        self.reset_focus();
        self.placeholder = Some(self.empty_placeholder.clone());
        Ok(())
    }

    /// Replace all rows at once
    ///
    /// Rows whose length differs from the header count are dropped and
    /// recorded as `GridError::DataShape`; the remaining rows are kept.
    pub fn populate_rows(&mut self, rows: Vec<Vec<String>>) -> PopulateReport {
        let expected = self.headers.len();
        let mut accepted = Vec::with_capacity(rows.len());
        let mut rejected = Vec::new();

        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != expected {
                let err = GridError::DataShape {
                    grid: self.name.clone(),
                    row: index,
                    expected,
                    found: row.len(),
                };
                warn!("GRID: {}", err);
                rejected.push(err);
                continue;
            }
            accepted.push(row.into_iter().map(Cell::new).collect::<Vec<_>>());
        }

        let report = PopulateReport {
            accepted: accepted.len(),
            rejected: rejected.len(),
        };

        self.rows = accepted;
        self.rejected = rejected;
        self.reset_focus();
        self.placeholder = if self.rows.is_empty() {
            Some(self.empty_placeholder.clone())
        } else {
            None
        };

        trace!(
            "GRID: '{}' populated with {} rows ({} rejected)",
            self.name,
            report.accepted,
            report.rejected
        );
        report
    }

    /// Apply the outcome of a data load
    ///
    /// A failed load leaves an empty grid carrying the placeholder text
    /// rather than surfacing the error to the UI layer.
    pub fn load(&mut self, result: Result<Vec<Vec<String>>, ProviderError>) -> PopulateReport {
        match result {
            Ok(rows) => self.populate_rows(rows),
            Err(e) => {
                warn!("GRID: load for '{}' failed: {}", self.name, e);
                self.clear();
                PopulateReport::default()
            }
        }
    }

    /// Drop all rows and return to `Unfocused`
    pub fn clear(&mut self) {
        self.rows.clear();
        self.rejected.clear();
        self.reset_focus();
        self.placeholder = Some(self.empty_placeholder.clone());
    }

    /// Errors recorded for rows skipped by the last population
    pub fn rejected(&self) -> &[GridError] {
        &self.rejected
    }

    /// Placeholder text while the grid has no rows
    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    /// Value stored at `(row, col)`
    pub fn cell(&self, row: usize, col: usize) -> GridResult<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(Cell::value)
            .ok_or(GridError::Index {
                row,
                col,
                rows: self.rows.len(),
                cols: self.headers.len(),
            })
    }

    /// Row header (column 0) of a row; a lookup, not an ownership link
    pub fn row_header(&self, row: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.first()).map(Cell::value)
    }

    /// Cached description of a cell, if it has ever been focused
    pub fn cached_description(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .and_then(Cell::cached_description)
    }

    pub fn focus(&self) -> FocusPosition {
        self.focus
    }

    pub fn has_focus(&self) -> bool {
        self.focus.is_focused()
    }

    /// Explicitly focus a cell
    ///
    /// Out-of-range requests are rejected and leave the grid `Unfocused`.
    /// Returns whether the grid now holds focus.
    pub fn set_focus(&mut self, row: usize, col: usize) -> bool {
        match navigation::jump(row, col, self.bounds()) {
            FocusPosition::FocusedAt { row, col } => {
                self.focus_cell(row, col);
                true
            }
            FocusPosition::Unfocused => {
                trace!("GRID: '{}' rejected focus request ({}, {})", self.name, row, col);
                self.reset_focus();
                false
            }
        }
    }

    /// Focus the first cell, if any
    pub fn focus_first(&mut self) -> bool {
        self.set_focus(0, 0)
    }

    /// Focus the last cell, if any
    pub fn focus_last(&mut self) -> bool {
        if !self.is_navigable() {
            self.reset_focus();
            return false;
        }
        self.set_focus(self.rows.len() - 1, self.headers.len() - 1)
    }

    /// Return to `Unfocused`
    pub fn clear_focus(&mut self) {
        self.reset_focus();
    }

    /// Apply an arrow key; boundary moves are silent no-ops
    pub fn on_arrow(&mut self, direction: Direction) -> NavOutcome {
        let outcome = navigation::step(self.focus, direction, self.bounds());
        match outcome {
            NavOutcome::Moved { row, col } => self.focus_cell(row, col),
            NavOutcome::Blocked => {
                trace!("GRID: '{}' {:?} blocked at {:?}", self.name, direction, self.focus);
            }
            NavOutcome::Unfocused => {}
        }
        outcome
    }

    /// Description of the focused cell, empty when unfocused
    pub fn current_description(&self) -> &str {
        self.announcement
            .as_ref()
            .map(|a| a.name.as_str())
            .unwrap_or("")
    }

    /// All three announcement channels for the focused cell
    pub fn announcement(&self) -> Option<&Announcement> {
        self.announcement.as_ref()
    }

    fn reset_focus(&mut self) {
        self.focus = FocusPosition::Unfocused;
        self.announcement = None;
    }

    /// Move focus to an in-bounds cell and recompute its description
    fn focus_cell(&mut self, row: usize, col: usize) {
        let rows = self.rows.len();
        let cols = self.headers.len();

        let text = describe(&CellContext {
            row,
            col,
            row_header: self.rows[row][0].value(),
            column_header: &self.headers[col],
            value: self.rows[row][col].value(),
        });

        self.rows[row][col].description = Some(text.clone());

        let announcement = Announcement::new(text);
        self.announcement = Some(if self.announce_positions {
            announcement.with_position(row, rows, col, cols)
        } else {
            announcement
        });
        self.focus = FocusPosition::at(row, col);
        trace!("GRID: '{}' focus ({}, {}): {}", self.name, row, col, self.current_description());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    fn standings_grid() -> Grid {
        let mut grid = Grid::new("Standings");
        grid.set_columns(vec!["Team", "W", "L"]).unwrap();
        grid.populate_rows(rows(&[&["A", "10", "2"], &["B", "8", "4"]]));
        grid
    }

    #[test]
    fn test_new_grid_is_unfocused_and_empty() {
        let grid = Grid::new("Empty");
        assert_eq!(grid.focus(), FocusPosition::Unfocused);
        assert!(grid.is_empty());
        assert_eq!(grid.current_description(), "");
        assert_eq!(grid.placeholder(), Some("No data available"));
    }

    #[test]
    fn test_cell_returns_populated_values() {
        let grid = standings_grid();
        let expected = [["A", "10", "2"], ["B", "8", "4"]];
        for (r, row) in expected.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                assert_eq!(grid.cell(r, c), Ok(*value));
            }
        }
    }

    #[test]
    fn test_cell_out_of_bounds_is_index_error() {
        let grid = standings_grid();
        assert_eq!(
            grid.cell(2, 0),
            Err(GridError::Index { row: 2, col: 0, rows: 2, cols: 3 })
        );
        assert!(matches!(grid.cell(0, 3), Err(GridError::Index { .. })));
    }

    #[test]
    fn test_scenario_initial_focus_then_right() {
        let mut grid = standings_grid();
        assert!(grid.set_focus(0, 0));
        assert_eq!(grid.current_description(), "Team, A");

        assert_eq!(grid.on_arrow(Direction::Right), NavOutcome::Moved { row: 0, col: 1 });
        assert_eq!(grid.focus(), FocusPosition::at(0, 1));
        assert_eq!(grid.current_description(), "A, W, 10");
    }

    #[test]
    fn test_full_context_on_vertical_moves() {
        let mut grid = standings_grid();
        grid.set_focus(0, 2);
        grid.on_arrow(Direction::Down);
        assert_eq!(grid.current_description(), "B, L, 4");
    }

    #[test]
    fn test_boundary_moves_are_silent_no_ops() {
        let mut grid = standings_grid();
        grid.set_focus(0, 0);
        assert_eq!(grid.on_arrow(Direction::Up), NavOutcome::Blocked);
        assert_eq!(grid.on_arrow(Direction::Left), NavOutcome::Blocked);
        assert_eq!(grid.focus(), FocusPosition::at(0, 0));
        assert_eq!(grid.current_description(), "Team, A");
    }

    #[test]
    fn test_arrow_on_unfocused_grid() {
        let mut grid = standings_grid();
        assert_eq!(grid.on_arrow(Direction::Down), NavOutcome::Unfocused);
        assert!(!grid.has_focus());
    }

    #[test]
    fn test_set_focus_out_of_range_unfocuses() {
        let mut grid = standings_grid();
        grid.set_focus(1, 1);
        assert!(!grid.set_focus(5, 0));
        assert_eq!(grid.focus(), FocusPosition::Unfocused);
        assert!(grid.announcement().is_none());
    }

    #[test]
    fn test_description_cached_on_focused_cell() {
        let mut grid = standings_grid();
        assert_eq!(grid.cached_description(1, 2), None);
        grid.set_focus(1, 2);
        assert_eq!(grid.cached_description(1, 2), Some("B, L, 4"));
    }

    #[test]
    fn test_description_idempotent_without_move() {
        let mut grid = standings_grid();
        grid.set_focus(1, 1);
        let first = grid.current_description().to_string();
        grid.set_focus(1, 1);
        assert_eq!(grid.current_description(), first);
    }

    #[test]
    fn test_empty_row_header_falls_back_to_ordinal() {
        let mut grid = Grid::new("Stats");
        grid.set_columns(vec!["Statistic", "Value"]).unwrap();
        grid.populate_rows(rows(&[&["Hits", "9"], &["", "3"]]));
        grid.set_focus(1, 1);
        assert_eq!(grid.current_description(), "Row 2, Value, 3");
    }

    #[test]
    fn test_populate_skips_bad_rows_only() {
        let mut grid = Grid::new("Standings");
        grid.set_columns(vec!["Team", "W", "L"]).unwrap();
        let report = grid.populate_rows(rows(&[
            &["A", "10", "2"],
            &["broken", "1"],
            &["B", "8", "4"],
            &["C", "1", "2", "extra"],
        ]));

        assert_eq!(report, PopulateReport { accepted: 2, rejected: 2 });
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.cell(1, 0), Ok("B"));
        assert_eq!(
            grid.rejected()[0],
            GridError::DataShape {
                grid: "Standings".to_string(),
                row: 1,
                expected: 3,
                found: 2
            }
        );
        assert!(grid.placeholder().is_none());
    }

    #[test]
    fn test_populate_replaces_and_unfocuses() {
        let mut grid = standings_grid();
        grid.set_focus(1, 2);
        grid.populate_rows(rows(&[&["Z", "0", "0"]]));
        assert_eq!(grid.row_count(), 1);
        assert!(!grid.has_focus());
        assert_eq!(grid.cell(0, 0), Ok("Z"));
    }

    #[test]
    fn test_populate_empty_leaves_placeholder() {
        let mut grid = standings_grid();
        grid.populate_rows(Vec::new());
        assert_eq!(grid.row_count(), 0);
        assert!(!grid.is_navigable());
        assert!(!grid.focus_first());
        assert_eq!(grid.placeholder(), Some("No data available"));
    }

    #[test]
    fn test_set_columns_empty_with_data_is_configuration_error() {
        let mut grid = standings_grid();
        let err = grid.set_columns(Vec::<String>::new()).unwrap_err();
        assert_eq!(
            err,
            GridError::Configuration { grid: "Standings".to_string(), rows: 2 }
        );
        // The failed call leaves the grid untouched
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.column_count(), 3);
    }

    #[test]
    fn test_set_columns_empty_without_data_is_allowed() {
        let mut grid = Grid::new("Blank");
        assert!(grid.set_columns(Vec::<String>::new()).is_ok());
    }

    #[test]
    fn test_set_columns_resets_rows() {
        let mut grid = standings_grid();
        grid.set_focus(0, 0);
        grid.set_columns(vec!["Player", "Pos"]).unwrap();
        assert_eq!(grid.row_count(), 0);
        assert!(!grid.has_focus());
    }

    #[test]
    fn test_load_error_leaves_placeholder() {
        let mut grid = standings_grid().with_empty_placeholder("Standings unavailable");
        let report = grid.load(Err(ProviderError::Unavailable("timeout".into())));
        assert_eq!(report, PopulateReport::default());
        assert_eq!(grid.row_count(), 0);
        assert_eq!(grid.placeholder(), Some("Standings unavailable"));
    }

    #[test]
    fn test_focus_last() {
        let mut grid = standings_grid();
        assert!(grid.focus_last());
        assert_eq!(grid.focus(), FocusPosition::at(1, 2));
        assert_eq!(grid.current_description(), "B, L, 4");
    }

    #[test]
    fn test_positions_extend_help_channel() {
        let mut grid = standings_grid().with_positions(true);
        grid.set_focus(0, 1);
        let a = grid.announcement().unwrap();
        assert_eq!(a.name, "A, W, 10");
        assert_eq!(a.hint, "A, W, 10");
        assert_eq!(a.help, "A, W, 10. Row 1 of 2, column 2 of 3");
    }

    #[test]
    fn test_from_records() {
        struct Rec(&'static str, u32);
        let columns = vec![
            ColumnDef::new("Team", |r: &Rec| r.0.to_string()),
            ColumnDef::new("W", |r: &Rec| r.1.to_string()),
        ];
        let grid = Grid::from_records("Teams", &columns, &[Rec("A", 3), Rec("B", 1)]);
        assert_eq!(grid.headers(), &["Team".to_string(), "W".to_string()]);
        assert_eq!(grid.cell(1, 1), Ok("1"));
    }

    #[test]
    fn test_accessible_description() {
        let grid = Grid::new("Injury Report");
        assert!(grid
            .accessible_description()
            .starts_with("Injury Report table."));
    }
}
