//! Standings grids
//!
//! Teams are grouped by division and ranked within it by win percentage,
//! then wins. Leagues with divisional standings get one tab per division in
//! the configured order; everything else is a single "League" tab.

use std::cmp::Ordering;
use std::sync::LazyLock;

use serde::Deserialize;
use tracing::debug;

use crate::config::ViewConfig;
use crate::focus::{GridGroup, TabPage};
use crate::grid::ColumnDef;

use super::view_grid;

/// Division name used for teams without one
pub const LEAGUE_DIVISION: &str = "League";

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct TeamStanding {
    pub name: String,
    pub division: Option<String>,
    pub wins: u32,
    pub losses: u32,
    pub win_pct: f64,
    pub games_behind: String,
    pub streak: Option<String>,
    pub record: String,
}

impl TeamStanding {
    pub fn division_name(&self) -> &str {
        self.division
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or(LEAGUE_DIVISION)
    }
}

/// A team with its rank inside its division
#[derive(Debug, Clone)]
pub struct RankedStanding {
    pub pos: usize,
    pub team: TeamStanding,
}

static STANDINGS_COLUMNS: LazyLock<Vec<ColumnDef<RankedStanding>>> = LazyLock::new(|| {
    vec![
        ColumnDef::new("Team", |s: &RankedStanding| s.team.name.clone()),
        ColumnDef::new("Pos", |s: &RankedStanding| s.pos.to_string()),
        ColumnDef::new("W", |s: &RankedStanding| s.team.wins.to_string()),
        ColumnDef::new("L", |s: &RankedStanding| s.team.losses.to_string()),
        ColumnDef::new("PCT", |s: &RankedStanding| format_pct(s.team.win_pct)),
        ColumnDef::new("GB", |s: &RankedStanding| s.team.games_behind.clone()),
        ColumnDef::new("Streak", |s: &RankedStanding| {
            s.team.streak.clone().filter(|v| !v.is_empty()).unwrap_or_else(|| "N/A".to_string())
        }),
        ColumnDef::new("Record", |s: &RankedStanding| s.team.record.clone()),
    ]
});

pub fn standings_columns() -> &'static [ColumnDef<RankedStanding>] {
    &STANDINGS_COLUMNS
}

/// ".600" style winning percentage; a perfect record shows as "1.000"
pub fn format_pct(pct: f64) -> String {
    let text = format!("{:.3}", pct);
    match text.strip_prefix('0') {
        Some(rest) => rest.to_string(),
        None => text,
    }
}

fn by_standing(a: &TeamStanding, b: &TeamStanding) -> Ordering {
    b.win_pct
        .partial_cmp(&a.win_pct)
        .unwrap_or(Ordering::Equal)
        .then_with(|| b.wins.cmp(&a.wins))
}

/// Sort teams best first and number them from 1
pub fn rank(mut teams: Vec<TeamStanding>) -> Vec<RankedStanding> {
    teams.sort_by(by_standing);
    teams
        .into_iter()
        .enumerate()
        .map(|(i, team)| RankedStanding { pos: i + 1, team })
        .collect()
}

/// Group teams by division: configured divisions first, unknown ones after in first-seen order
pub fn group_divisions(teams: &[TeamStanding], order: &[String]) -> Vec<(String, Vec<TeamStanding>)> {
    let mut groups: Vec<(String, Vec<TeamStanding>)> = Vec::new();
    for team in teams {
        let division = team.division_name();
        match groups.iter_mut().find(|(name, _)| name == division) {
            Some((_, members)) => members.push(team.clone()),
            None => groups.push((division.to_string(), vec![team.clone()])),
        }
    }

    let position = |name: &str| order.iter().position(|o| o == name).unwrap_or(usize::MAX);
    // Stable sort keeps first-seen order among unconfigured divisions.
    groups.sort_by_key(|(name, _)| position(name));
    groups
}

/// Build the standings view for one league
pub fn standings_group(view: &ViewConfig, teams: &[TeamStanding]) -> GridGroup {
    let divisional = view.divisional_standings && teams.iter().any(|t| t.division_name() != LEAGUE_DIVISION);

    let tabs: Vec<TabPage> = if divisional {
        group_divisions(teams, &view.division_order)
            .into_iter()
            .map(|(division, members)| {
                let grid = view_grid(view, format!("{} Standings", division), standings_columns(), &rank(members));
                TabPage::new(division, vec![grid])
            })
            .collect()
    } else {
        let grid = view_grid(
            view,
            format!("{} Standings", view.league),
            standings_columns(),
            &rank(teams.to_vec()),
        );
        vec![TabPage::new(LEAGUE_DIVISION, vec![grid])]
    };

    debug!("STANDINGS: {} teams in {} tabs for {}", teams.len(), tabs.len(), view.league);
    GridGroup::register("Standings", tabs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn team(name: &str, division: &str, wins: u32, losses: u32) -> TeamStanding {
        TeamStanding {
            name: name.to_string(),
            division: Some(division.to_string()),
            wins,
            losses,
            win_pct: wins as f64 / (wins + losses) as f64,
            games_behind: "-".to_string(),
            streak: None,
            record: format!("{}-{}", wins, losses),
        }
    }

    #[test]
    fn test_format_pct() {
        assert_eq!(format_pct(0.6), ".600");
        assert_eq!(format_pct(0.0), ".000");
        assert_eq!(format_pct(1.0), "1.000");
    }

    #[test]
    fn test_rank_by_pct_then_wins() {
        let mut a = team("A", "AL East", 10, 10);
        let mut b = team("B", "AL East", 12, 12);
        let c = team("C", "AL East", 15, 5);
        a.win_pct = 0.5;
        b.win_pct = 0.5;

        let ranked = rank(vec![a, b, c]);
        let order: Vec<(&str, usize)> = ranked.iter().map(|r| (r.team.name.as_str(), r.pos)).collect();
        assert_eq!(order, vec![("C", 1), ("B", 2), ("A", 3)]);
    }

    #[test]
    fn test_divisional_tabs_follow_configured_order() {
        let view = ViewConfig::for_league("MLB", &Config::default());
        let teams = vec![
            team("Dodgers", "NL West", 90, 72),
            team("Yankees", "AL East", 94, 68),
            team("Mystery", "Exhibition", 1, 1),
            team("Orioles", "AL East", 91, 71),
        ];
        let group = standings_group(&view, &teams);
        let titles: Vec<&str> = group.tabs().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["AL East", "NL West", "Exhibition"]);

        let al_east = group.grid(0, 0).unwrap();
        assert_eq!(al_east.name(), "AL East Standings");
        assert_eq!(al_east.headers(), &["Team", "Pos", "W", "L", "PCT", "GB", "Streak", "Record"]);
        assert_eq!(al_east.cell(0, 0).unwrap(), "Yankees");
        assert_eq!(al_east.cell(1, 1).unwrap(), "2");
        assert_eq!(al_east.cell(0, 6).unwrap(), "N/A");
    }

    #[test]
    fn test_team_name_is_row_header() {
        let view = ViewConfig::for_league("NBA", &Config::default());
        let mut group = standings_group(&view, &[team("Celtics", "Atlantic", 60, 22)]);
        group.on_tab_forward();
        group.on_arrow(crate::types::Direction::Right);
        assert_eq!(group.announcement(), "Celtics, Pos, 1");
    }

    #[test]
    fn test_non_divisional_league_single_tab() {
        let view = ViewConfig::for_league("NBA", &Config::default());
        let teams = vec![team("Knicks", "Atlantic", 50, 32), team("Celtics", "Atlantic", 60, 22)];
        let group = standings_group(&view, &teams);

        assert_eq!(group.tab_count(), 1);
        assert_eq!(group.tabs()[0].title, "League");
        assert_eq!(group.grid(0, 0).unwrap().cell(0, 0).unwrap(), "Celtics");
    }

    #[test]
    fn test_no_teams_gives_placeholder() {
        let view = ViewConfig::for_league("MLB", &Config::default());
        let group = standings_group(&view, &[]);
        let grid = group.grid(0, 0).unwrap();
        assert!(grid.is_empty());
        assert_eq!(grid.placeholder(), Some("No data available"));
    }
}
