//! Quarters and drives
//!
//! Events are grouped by period, then by `(drive number, possessing team)` in
//! order of first appearance. Each drive is classified once from its last
//! play when the node is built.

use std::fmt;

use super::{group_by_period, ordinal, period_label, NodeKind, PlayEvent, PlayNode, PlayStrategy};

/// How a drive ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriveResult {
    Touchdown,
    FieldGoal,
    Punt,
    Turnover,
    Safety,
    EndOfPeriod,
    /// No recognizable ending; carries the play count
    Plays(usize),
}

impl DriveResult {
    /// Classify a drive from the text of its last play
    pub fn classify(plays: &[&PlayEvent]) -> Self {
        let Some(last) = plays.last() else {
            return Self::Plays(0);
        };
        let text = last.text.to_lowercase();
        let has = |needles: &[&str]| needles.iter().any(|n| text.contains(n));

        if has(&["touchdown"]) {
            Self::Touchdown
        } else if has(&["field goal"]) {
            Self::FieldGoal
        } else if has(&["punt"]) {
            Self::Punt
        } else if has(&["turnover", "interception", "fumble"]) {
            Self::Turnover
        } else if has(&["safety"]) {
            Self::Safety
        } else if has(&["end of quarter", "end of half", "end of game"]) {
            Self::EndOfPeriod
        } else {
            Self::Plays(plays.len())
        }
    }
}

impl fmt::Display for DriveResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Touchdown => f.write_str("Touchdown"),
            Self::FieldGoal => f.write_str("Field Goal"),
            Self::Punt => f.write_str("Punt"),
            Self::Turnover => f.write_str("Turnover"),
            Self::Safety => f.write_str("Safety"),
            Self::EndOfPeriod => f.write_str("End of Period"),
            Self::Plays(1) => f.write_str("1 play"),
            Self::Plays(n) => write!(f, "{} plays", n),
        }
    }
}

pub struct FootballStrategy;

impl PlayStrategy for FootballStrategy {
    fn build_tree(&self, events: &[PlayEvent]) -> PlayNode {
        let mut root = PlayNode::new("Plays", NodeKind::Root);

        for bucket in group_by_period(events) {
            let label = period_label(&bucket, |n| format!("{} Quarter", ordinal(n)));
            let mut quarter = PlayNode::new(label, NodeKind::Period { number: bucket.number });

            let mut drives: Vec<((Option<u32>, Option<&str>), Vec<&PlayEvent>)> = Vec::new();
            for &idx in &bucket.indices {
                let event = &events[idx];
                let key = (event.drive_number, event.team.as_deref());
                match drives.iter_mut().find(|(k, _)| *k == key) {
                    Some((_, plays)) => plays.push(event),
                    None => drives.push((key, vec![event])),
                }
            }

            for ((number, team), plays) in drives {
                quarter.push_node(build_drive(number, team, &plays));
            }
            root.push_node(quarter);
        }
        root
    }
}

fn build_drive(number: Option<u32>, team: Option<&str>, plays: &[&PlayEvent]) -> PlayNode {
    let result = DriveResult::classify(plays);
    let label = format!(
        "Drive {} ({}): {}",
        number.map(|n| n.to_string()).unwrap_or_else(|| "?".to_string()),
        team.unwrap_or("Unknown"),
        result
    );

    let mut drive = PlayNode::new(
        label,
        NodeKind::Drive {
            number,
            team: team.map(str::to_string),
            result,
        },
    );
    for play in plays {
        drive.push_event((*play).clone());
    }
    drive
}
