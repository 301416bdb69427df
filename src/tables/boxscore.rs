//! Boxscore grids
//!
//! Each team contributes a "{team} Stats" tab holding one grid per team stat
//! group, followed by one tab per player stat group (batting, pitching, ...).
//! Team stat grids list the league's headline stats first, then a separator
//! row, then everything else.

use std::sync::LazyLock;

use serde::Deserialize;
use tracing::debug;

use crate::config::ViewConfig;
use crate::focus::{GridGroup, TabPage};
use crate::grid::ColumnDef;
use crate::types::Sport;

use super::{empty_view_grid, view_grid};

pub const OTHER_STATS_SEPARATOR: &str = "--- Other Stats ---";

const BASEBALL_IMPORTANT: &[&str] = &["runs", "hits", "errors", "homeruns", "runsbattedin"];
const BASEBALL_PITCHING_IMPORTANT: &[&str] = &["earnedruns", "runs", "hits", "strikeouts", "walks", "homeruns"];
const FOOTBALL_IMPORTANT: &[&str] = &["totalyards", "netpassingyards", "rushingyards", "turnovers", "firstdowns"];
const BASKETBALL_IMPORTANT: &[&str] = &["points", "rebounds", "assists", "fieldgoalpct", "turnovers"];
const HOCKEY_IMPORTANT: &[&str] = &["goals", "shots", "powerplaygoals", "hits", "faceoffpercent"];

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatValue {
    /// Machine key, e.g. "homeRuns"
    pub name: String,
    /// Display label, e.g. "Home Runs"
    pub display_name: String,
    pub value: String,
}

impl StatValue {
    pub fn new(name: impl Into<String>, display_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            value: value.into(),
        }
    }

    fn label(&self) -> &str {
        if self.display_name.is_empty() {
            &self.name
        } else {
            &self.display_name
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct TeamStatGroup {
    pub name: String,
    pub stats: Vec<StatValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AthleteLine {
    pub name: String,
    pub position: String,
    pub active: bool,
    pub stats: Vec<String>,
}

impl Default for AthleteLine {
    fn default() -> Self {
        Self {
            name: String::new(),
            position: String::new(),
            active: true,
            stats: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct PlayerStatGroup {
    /// Group kind, e.g. "batting"
    pub kind: String,
    /// Stat column names
    pub names: Vec<String>,
    pub athletes: Vec<AthleteLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct TeamBox {
    pub team: String,
    pub statistics: Vec<TeamStatGroup>,
    pub players: Vec<PlayerStatGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct Boxscore {
    pub teams: Vec<TeamBox>,
}

static TEAM_STAT_COLUMNS: LazyLock<Vec<ColumnDef<StatValue>>> = LazyLock::new(|| {
    vec![
        ColumnDef::new("Statistic", |s: &StatValue| s.label().to_string()),
        ColumnDef::new("Value", |s: &StatValue| s.value.clone()),
    ]
});

fn important_stats(sport: Sport, group: &str) -> &'static [&'static str] {
    match sport {
        Sport::Baseball if group.eq_ignore_ascii_case("pitching") => BASEBALL_PITCHING_IMPORTANT,
        Sport::Baseball => BASEBALL_IMPORTANT,
        Sport::Football => FOOTBALL_IMPORTANT,
        Sport::Basketball => BASKETBALL_IMPORTANT,
        Sport::Hockey => HOCKEY_IMPORTANT,
        Sport::Other => &[],
    }
}

/// Headline stats first, then a separator, then the rest
///
/// A stat is headline when its key contains one of the sport's headline keys.
/// The separator only appears when both parts are non-empty.
pub fn order_team_stats(sport: Sport, group: &TeamStatGroup) -> Vec<StatValue> {
    let important = important_stats(sport, &group.name);
    let (mut first, rest): (Vec<StatValue>, Vec<StatValue>) = group.stats.iter().cloned().partition(|s| {
        let key = s.name.to_lowercase();
        important.iter().any(|k| key.contains(k))
    });

    if !first.is_empty() && !rest.is_empty() {
        first.push(StatValue::new("", OTHER_STATS_SEPARATOR, ""));
    }
    first.extend(rest);
    first
}

fn title_case(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn player_rows(group: &PlayerStatGroup) -> Vec<Vec<String>> {
    group
        .athletes
        .iter()
        .filter(|a| a.active)
        .map(|a| {
            let mut row = vec![a.name.clone(), a.position.clone()];
            row.extend(a.stats.iter().cloned());
            row
        })
        .collect()
}

pub fn boxscore_group(view: &ViewConfig, boxscore: &Boxscore) -> GridGroup {
    let mut tabs = Vec::new();

    for team in &boxscore.teams {
        let stat_grids: Vec<_> = team
            .statistics
            .iter()
            .filter(|g| !g.stats.is_empty())
            .map(|g| {
                view_grid(
                    view,
                    format!("{} {}", team.team, g.name),
                    TEAM_STAT_COLUMNS.as_slice(),
                    &order_team_stats(view.sport, g),
                )
            })
            .collect();
        if !stat_grids.is_empty() {
            tabs.push(TabPage::new(format!("{} Stats", team.team), stat_grids));
        }

        for group in team.players.iter().filter(|g| !g.names.is_empty() && !g.athletes.is_empty()) {
            let title = format!("{} {}", team.team, title_case(&group.kind));
            let mut headers = vec!["Player", "Pos"];
            headers.extend(group.names.iter().map(String::as_str));

            let mut grid = empty_view_grid(view, title.clone(), &headers);
            let report = grid.populate_rows(player_rows(group));
            if report.rejected > 0 {
                debug!("BOXSCORE: '{}' dropped {} malformed player lines", title, report.rejected);
            }
            tabs.push(TabPage::new(title, vec![grid]));
        }
    }

    if tabs.is_empty() {
        let grid = empty_view_grid(view, "Boxscore", &["Statistic", "Value"]);
        tabs.push(TabPage::new("Boxscore", vec![grid]));
    }
    GridGroup::register("Boxscore", tabs)
}
