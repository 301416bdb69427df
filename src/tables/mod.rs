//! Specialized grid variants
//!
//! Each variant declares its column schema once with `ColumnDef` and turns
//! normalized records into one or more grids bound into a `GridGroup`.

pub mod boxscore;
pub mod injuries;
pub mod leaders;
pub mod standings;

use tracing::warn;

use crate::config::ViewConfig;
use crate::data_provider::{RecordSet, SourceKind};
use crate::error::ProviderError;
use crate::focus::GridGroup;
use crate::grid::{ColumnDef, Grid};

pub use boxscore::{boxscore_group, AthleteLine, Boxscore, PlayerStatGroup, StatValue, TeamBox, TeamStatGroup};
pub use injuries::{injuries_group, Injury};
pub use leaders::{leaders_group, Leader, LeaderCategory, LeaderEntry};
pub use standings::{standings_group, TeamStanding};

/// Build a grid from records, applying the per-view settings
pub fn view_grid<T>(view: &ViewConfig, name: impl Into<String>, columns: &[ColumnDef<T>], records: &[T]) -> Grid {
    Grid::from_records(name, columns, records)
        .with_empty_placeholder(view.empty_placeholder.clone())
        .with_positions(view.announce_positions)
}

/// An empty grid with the given headers and per-view settings
pub fn empty_view_grid(view: &ViewConfig, name: impl Into<String>, headers: &[&str]) -> Grid {
    let mut grid = Grid::new(name)
        .with_empty_placeholder(view.empty_placeholder.clone())
        .with_positions(view.announce_positions);
    if let Err(err) = grid.set_columns(headers.to_vec()) {
        warn!("GRID: {}", err);
    }
    grid
}

/// Build the grid view for a finished load
///
/// A failed load yields the variant's empty view with its placeholder.
/// Play feeds are not tabular and yield `None`.
pub fn group_for(view: &ViewConfig, kind: SourceKind, result: Result<RecordSet, ProviderError>) -> Option<GridGroup> {
    let records = match result {
        Ok(records) => records,
        Err(err) => {
            warn!("GRID: {} load for {} failed: {}", kind, view.league, err);
            return match kind {
                SourceKind::Standings => Some(standings_group(view, &[])),
                SourceKind::Leaders => Some(leaders_group(view, &[])),
                SourceKind::Boxscore => Some(boxscore_group(view, &Boxscore::default())),
                SourceKind::Injuries => Some(injuries_group(view, &[])),
                SourceKind::Plays => None,
            };
        }
    };

    match records {
        RecordSet::Standings(teams) => Some(standings_group(view, &teams)),
        RecordSet::Leaders(categories) => Some(leaders_group(view, &categories)),
        RecordSet::Boxscore(boxscore) => Some(boxscore_group(view, &boxscore)),
        RecordSet::Injuries(injuries) => Some(injuries_group(view, &injuries)),
        RecordSet::Plays(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_failed_load_gives_empty_view() {
        let view = ViewConfig::for_league("MLB", &Config::default());
        let group = group_for(
            &view,
            SourceKind::Injuries,
            Err(ProviderError::Unavailable("offline".into())),
        )
        .unwrap();
        let grid = group.grid(0, 0).unwrap();
        assert!(grid.is_empty());
        assert_eq!(grid.placeholder(), Some("No data available"));
        assert_eq!(grid.headers().len(), 7);
    }

    #[test]
    fn test_plays_are_not_tabular() {
        let view = ViewConfig::default();
        assert!(group_for(&view, SourceKind::Plays, Ok(RecordSet::Plays(Vec::new()))).is_none());
        assert!(group_for(&view, SourceKind::Plays, Err(ProviderError::Malformed("x".into()))).is_none());
    }

    #[test]
    fn test_view_grid_applies_positions() {
        let view = ViewConfig {
            announce_positions: true,
            ..ViewConfig::default()
        };
        let columns = vec![ColumnDef::new("Name", |s: &String| s.clone())];
        let names = vec!["Ann".to_string()];
        let mut grid = view_grid(&view, "Names", columns.as_slice(), names.as_slice());
        grid.focus_first();
        let announcement = grid.announcement().unwrap();
        assert_eq!(announcement.name, "Name, Ann");
        assert_eq!(announcement.help, "Name, Ann. Row 1 of 1, column 1 of 1");
    }
}
