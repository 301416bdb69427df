use std::sync::LazyLock;

use serde::Deserialize;

use crate::config::ViewConfig;
use crate::focus::GridGroup;
use crate::grid::ColumnDef;

use super::view_grid;

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Injury {
    pub player: String,
    pub position: String,
    pub team: String,
    pub status: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub details: String,
    pub return_date: Option<String>,
}

static INJURY_COLUMNS: LazyLock<Vec<ColumnDef<Injury>>> = LazyLock::new(|| {
    vec![
        ColumnDef::new("Player", |i: &Injury| i.player.clone()),
        ColumnDef::new("Position", |i: &Injury| i.position.clone()),
        ColumnDef::new("Team", |i: &Injury| i.team.clone()),
        ColumnDef::new("Status", |i: &Injury| i.status.clone()),
        ColumnDef::new("Type", |i: &Injury| i.kind.clone()),
        ColumnDef::new("Details", |i: &Injury| i.details.clone()),
        ColumnDef::new("Return Date", |i: &Injury| {
            i.return_date.clone().unwrap_or_else(|| "N/A".to_string())
        }),
    ]
});

pub fn injuries_group(view: &ViewConfig, injuries: &[Injury]) -> GridGroup {
    let grid = view_grid(view, format!("{} Injuries", view.league), INJURY_COLUMNS.as_slice(), injuries);
    GridGroup::single("Injuries", vec![grid])
}
