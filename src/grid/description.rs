//! Context descriptions for focused cells
//!
//! Every focus change recomputes the description from scratch. Column 0 acts
//! as the row header for the rest of the row, so a row-header cell only names
//! its column, while any other cell is prefixed with the row header value.
//! Full context is announced for every move direction.

/// Inputs needed to describe one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellContext<'a> {
    pub row: usize,
    pub col: usize,
    pub row_header: &'a str,
    pub column_header: &'a str,
    pub value: &'a str,
}

/// Ordinal fallback used when the row header cell is empty
pub fn ordinal_row_label(row: usize) -> String {
    format!("Row {}", row + 1)
}

/// Compute the announced text for a focused cell
pub fn describe(ctx: &CellContext<'_>) -> String {
    if ctx.col == 0 {
        return format!("{}, {}", ctx.column_header, ctx.value);
    }

    if ctx.row_header.trim().is_empty() {
        format!(
            "{}, {}, {}",
            ordinal_row_label(ctx.row),
            ctx.column_header,
            ctx.value
        )
    } else {
        format!("{}, {}, {}", ctx.row_header, ctx.column_header, ctx.value)
    }
}

/// The three redundant output channels written on every focus change
///
/// Different assistive-technology stacks read different channels, so each
/// one carries the full description.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Announcement {
    /// Primary accessible name
    pub name: String,
    /// Secondary hint
    pub hint: String,
    /// Tertiary long-form help text
    pub help: String,
}

impl Announcement {
    pub fn new(description: impl Into<String>) -> Self {
        let description = description.into();
        Self {
            name: description.clone(),
            hint: description.clone(),
            help: description,
        }
    }

    /// Append the grid position to the long-form help channel
    pub fn with_position(mut self, row: usize, rows: usize, col: usize, cols: usize) -> Self {
        self.help = format!(
            "{}. Row {} of {}, column {} of {}",
            self.help,
            row + 1,
            rows,
            col + 1,
            cols
        );
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx<'a>(row: usize, col: usize, row_header: &'a str, column_header: &'a str, value: &'a str) -> CellContext<'a> {
        CellContext {
            row,
            col,
            row_header,
            column_header,
            value,
        }
    }

    #[test]
    fn test_row_header_cell_never_references_itself() {
        assert_eq!(describe(&ctx(0, 0, "A", "Team", "A")), "Team, A");
    }

    #[test]
    fn test_data_cell_embeds_row_header() {
        assert_eq!(describe(&ctx(0, 1, "A", "W", "10")), "A, W, 10");
    }

    #[test]
    fn test_empty_row_header_uses_ordinal() {
        assert_eq!(describe(&ctx(4, 2, "", "L", "3")), "Row 5, L, 3");
        assert_eq!(describe(&ctx(0, 1, "   ", "W", "1")), "Row 1, W, 1");
    }

    #[test]
    fn test_empty_row_header_cell_itself() {
        assert_eq!(describe(&ctx(2, 0, "", "Team", "")), "Team, ");
    }

    #[test]
    fn test_describe_is_idempotent() {
        let c = ctx(1, 3, "Yankees", "PCT", ".600");
        assert_eq!(describe(&c), describe(&c));
    }

    #[test]
    fn test_announcement_channels_are_redundant() {
        let a = Announcement::new("A, W, 10");
        assert_eq!(a.name, "A, W, 10");
        assert_eq!(a.hint, a.name);
        assert_eq!(a.help, a.name);
    }

    #[test]
    fn test_announcement_with_position() {
        let a = Announcement::new("A, W, 10").with_position(0, 2, 1, 3);
        assert_eq!(a.name, "A, W, 10");
        assert_eq!(a.help, "A, W, 10. Row 1 of 2, column 2 of 3");
    }
}
