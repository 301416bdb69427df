use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};

use crate::plays::{PlayEvent, PlayNode, PlayTree};
use crate::types::Sport;

/// Marker printed in front of scoring nodes and events
const SCORING_MARK: &str = "*";
const INDENT: &str = "  ";

/// Read a JSON array of normalized play events
pub fn read_events(path: &Path) -> Result<Vec<PlayEvent>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read play feed {}", path.display()))?;
    parse_events(&content).with_context(|| format!("Invalid play feed {}", path.display()))
}

pub fn parse_events(content: &str) -> Result<Vec<PlayEvent>> {
    serde_json::from_str(content).context("Expected a JSON array of play events")
}

/// Render a play tree as indented text, one node or event per line
pub fn render_tree(root: &PlayNode) -> String {
    let mut out = String::new();
    for (depth, child) in root.walk() {
        let mark = if child.is_scoring() { SCORING_MARK } else { " " };
        let _ = writeln!(out, "{}{}{}", mark, INDENT.repeat(depth), child.label());
    }
    out
}

/// Print the play tree for a feed file; `sport` of `None` detects it from the feed
pub fn run(path: &Path, sport: Option<Sport>) -> Result<()> {
    let events = read_events(path)?;
    let sport = sport.unwrap_or_else(|| Sport::detect(&events));
    let tree = PlayTree::build(sport, &events);

    println!("{} play-by-play ({} events)", sport, events.len());
    println!();
    print!("{}", render_tree(&tree));
    Ok(())
}
