//! Focus state machine for a single grid
//!
//! States are `Unfocused` and `FocusedAt(row, col)`. Arrow moves that would
//! leave the grid are silent no-ops: boundaries neither wrap nor error.

use crate::types::Direction;

/// Current focus inside one grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusPosition {
    #[default]
    Unfocused,
    FocusedAt { row: usize, col: usize },
}

impl FocusPosition {
    pub fn at(row: usize, col: usize) -> Self {
        Self::FocusedAt { row, col }
    }

    pub fn is_focused(&self) -> bool {
        matches!(self, Self::FocusedAt { .. })
    }

    /// The `(row, col)` pair, if focused
    pub fn cell(&self) -> Option<(usize, usize)> {
        match self {
            Self::FocusedAt { row, col } => Some((*row, *col)),
            Self::Unfocused => None,
        }
    }
}

/// Result of applying an arrow key to a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// Focus moved to a new cell
    Moved { row: usize, col: usize },
    /// The adjacent cell is out of bounds; nothing changed
    Blocked,
    /// The grid does not hold focus; nothing changed
    Unfocused,
}

/// Grid dimensions used to bounds-check moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub rows: usize,
    pub cols: usize,
}

impl Bounds {
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }
}

/// Compute the target of an arrow move, if it stays in bounds
pub fn step(from: FocusPosition, direction: Direction, bounds: Bounds) -> NavOutcome {
    let Some((row, col)) = from.cell() else {
        return NavOutcome::Unfocused;
    };

    let target = match direction {
        Direction::Up => row.checked_sub(1).map(|r| (r, col)),
        Direction::Down => Some((row + 1, col)),
        Direction::Left => col.checked_sub(1).map(|c| (row, c)),
        Direction::Right => Some((row, col + 1)),
    };

    match target {
        Some((r, c)) if bounds.contains(r, c) => NavOutcome::Moved { row: r, col: c },
        _ => NavOutcome::Blocked,
    }
}

/// Validate an explicit jump; out-of-range requests leave the grid unfocused
pub fn jump(row: usize, col: usize, bounds: Bounds) -> FocusPosition {
    if bounds.contains(row, col) {
        FocusPosition::at(row, col)
    } else {
        FocusPosition::Unfocused
    }
}
