use thiserror::Error;

/// Errors raised by the grid model
///
/// Navigation never produces these: blocked moves are reported as
/// `NavOutcome::Blocked` instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Invalid schema setup; fatal to the `set_columns` call only
    #[error("Cannot clear the columns of grid '{grid}' while it holds {rows} rows")]
    Configuration { grid: String, rows: usize },

    /// A row whose length does not match the header count; the row is skipped
    #[error("Grid '{grid}' row {row} has {found} cells, expected {expected}")]
    DataShape {
        grid: String,
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Direct cell access outside the grid
    #[error("Cell ({row}, {col}) is outside a {rows}x{cols} grid")]
    Index {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}

/// Result type for grid operations
pub type GridResult<T> = Result<T, GridError>;

/// Errors reported by an external sports-data provider
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Data source unavailable: {0}")]
    Unavailable(String),

    #[error("No {kind} data for '{id}'")]
    NotFound { kind: String, id: String },

    #[error("Malformed data: {0}")]
    Malformed(String),
}
