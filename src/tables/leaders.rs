use std::sync::LazyLock;

use serde::Deserialize;

use crate::config::ViewConfig;
use crate::focus::GridGroup;
use crate::grid::ColumnDef;

use super::view_grid;

/// One leader inside a statistical category
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct Leader {
    pub name: String,
    pub team: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct LeaderCategory {
    pub category: String,
    pub leaders: Vec<Leader>,
}

/// One row of the leaders grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderEntry {
    pub category: String,
    pub team: String,
    pub player: String,
    pub value: String,
}

static LEADER_COLUMNS: LazyLock<Vec<ColumnDef<LeaderEntry>>> = LazyLock::new(|| {
    vec![
        ColumnDef::new("Category", |e: &LeaderEntry| e.category.clone()),
        ColumnDef::new("Team", |e: &LeaderEntry| e.team.clone()),
        ColumnDef::new("Player", |e: &LeaderEntry| e.player.clone()),
        ColumnDef::new("Value", |e: &LeaderEntry| e.value.clone()),
    ]
});

/// One entry per leader, categories kept in input order
pub fn flatten(categories: &[LeaderCategory]) -> Vec<LeaderEntry> {
    categories
        .iter()
        .flat_map(|c| {
            c.leaders.iter().map(|l| LeaderEntry {
                category: c.category.clone(),
                team: l.team.clone(),
                player: l.name.clone(),
                value: l.value.clone(),
            })
        })
        .collect()
}

pub fn leaders_group(view: &ViewConfig, categories: &[LeaderCategory]) -> GridGroup {
    let grid = view_grid(
        view,
        format!("{} Leaders", view.league),
        LEADER_COLUMNS.as_slice(),
        &flatten(categories),
    );
    GridGroup::single("Leaders", vec![grid])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn category(name: &str, leaders: &[(&str, &str, &str)]) -> LeaderCategory {
        LeaderCategory {
            category: name.to_string(),
            leaders: leaders
                .iter()
                .map(|(n, t, v)| Leader {
                    name: n.to_string(),
                    team: t.to_string(),
                    value: v.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_one_row_per_leader() {
        let view = ViewConfig::for_league("MLB", &Config::default());
        let data = vec![
            category("Home Runs", &[("Aaron Judge", "NYY", "58"), ("Shohei Ohtani", "LAD", "54")]),
            category("Batting Average", &[("Luis Arraez", "SD", ".314")]),
            category("Saves", &[]),
        ];
        let group = leaders_group(&view, &data);
        let grid = group.grid(0, 0).unwrap();

        assert_eq!(grid.headers(), &["Category", "Team", "Player", "Value"]);
        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.cell(1, 2).unwrap(), "Shohei Ohtani");
        assert_eq!(grid.cell(2, 0).unwrap(), "Batting Average");
    }

    #[test]
    fn test_leader_announcement_uses_category_as_row_header() {
        let view = ViewConfig::for_league("NFL", &Config::default());
        let mut group = leaders_group(&view, &[category("Passing Yards", &[("Joe Burrow", "CIN", "4918")])]);
        group.on_tab_backward();
        assert_eq!(group.announcement(), "Passing Yards, Value, 4918");
    }
}
