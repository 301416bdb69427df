/// Column definitions for building grids from typed records
///
/// A `ColumnDef<T>` pairs a header label with a function extracting that
/// column's cell text from a record, so specialized grids can declare their
/// schema once and populate from normalized records.
///
/// # Example
/// ```ignore
/// use sportgrid::grid::ColumnDef;
///
/// struct Player {
///     name: String,
///     goals: u32,
/// }
///
/// let columns = vec![
///     ColumnDef::new("Player", |p: &Player| p.name.clone()),
///     ColumnDef::new("G", |p: &Player| p.goals.to_string()),
/// ];
/// ```
use std::fmt;

pub struct ColumnDef<T> {
    /// Column header text
    pub header: String,

    /// Function to extract the cell text from row data
    pub cell_fn: Box<dyn Fn(&T) -> String + Send + Sync>,
}

impl<T> ColumnDef<T> {
    pub fn new<F>(header: impl Into<String>, cell_fn: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        Self {
            header: header.into(),
            cell_fn: Box::new(cell_fn),
        }
    }

    /// Extract this column's cell text from a record
    pub fn extract(&self, record: &T) -> String {
        (self.cell_fn)(record)
    }
}

impl<T> fmt::Debug for ColumnDef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDef")
            .field("header", &self.header)
            .field("cell_fn", &"<function>")
            .finish()
    }
}

/// Header labels of a column set
pub fn headers<T>(columns: &[ColumnDef<T>]) -> Vec<String> {
    columns.iter().map(|c| c.header.clone()).collect()
}

/// Extract one row of cell text per record
pub fn extract_rows<T>(columns: &[ColumnDef<T>], records: &[T]) -> Vec<Vec<String>> {
    records
        .iter()
        .map(|record| columns.iter().map(|col| col.extract(record)).collect())
        .collect()
}
