/// Shared types used across the library
///
/// This module contains type definitions that are shared between
/// the grid, focus and play modules and the binary (main.rs).
use serde::Deserialize;
use std::fmt;

/// Sport family, used to pick a play reconstruction strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sport {
    Baseball,
    Football,
    Basketball,
    Hockey,
    Other,
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Baseball => "baseball",
            Self::Football => "football",
            Self::Basketball => "basketball",
            Self::Hockey => "hockey",
            Self::Other => "other",
        };
        f.write_str(name)
    }
}

/// Arrow key direction inside a grid or on a tab bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Direction in which focus leaves a grid (Tab / Shift+Tab)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitDirection {
    Forward,
    Backward,
}
