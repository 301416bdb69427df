//! Innings, half-innings and at-bats
//!
//! Inside a half-inning, a line "<pitcher> pitches to <batter>" opens an
//! at-bat. Following lines are buffered until one contains an outcome keyword
//! or a token of the batter's name; that line closes the at-bat and becomes
//! its label. The name match is fuzzy and can close an at-bat early on a
//! substitution note that mentions the batter.

use tracing::trace;

use super::{group_by_period, ordinal, period_label, NodeKind, PeriodBucket, PlayEvent, PlayNode, PlayStrategy};

const PITCHES_TO: &str = " pitches to ";

const TRANSITION_PREFIXES: [&str; 4] = ["Top of the", "Bottom of the", "End of the", "Middle of the"];

const OUTCOME_KEYWORDS: [&str; 21] = [
    "struck out",
    "grounded out",
    "flied out",
    "popped out",
    "lined out",
    "fouled out",
    "reached on error",
    "singled",
    "doubled",
    "tripled",
    "homered",
    "walked",
    "hit by pitch",
    "reached on fielder's choice",
    "reached on",
    "grounded into",
    "flied into",
    "popped into",
    "lined into",
    "single to",
    "double to",
];

const PITCH_KEYWORDS: [&str; 5] = ["ball", "strike", "foul", "looking", "swinging"];

/// Name tokens shorter than this never match
const MIN_NAME_TOKEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Half {
    Top,
    Bottom,
}

impl Half {
    /// Anything other than "bottom" counts as the top half
    pub fn from_kind(kind: &str) -> Self {
        if kind.trim().eq_ignore_ascii_case("bottom") {
            Self::Bottom
        } else {
            Self::Top
        }
    }

    fn title(self) -> &'static str {
        match self {
            Self::Top => "Top",
            Self::Bottom => "Bottom",
        }
    }
}

pub struct BaseballStrategy;

impl PlayStrategy for BaseballStrategy {
    fn build_tree(&self, events: &[PlayEvent]) -> PlayNode {
        let running = running_scores(events);
        let mut root = PlayNode::new("Plays", NodeKind::Root);

        for bucket in group_by_period(events) {
            root.push_node(build_inning(&bucket, events, &running));
        }
        root
    }
}

fn build_inning(bucket: &PeriodBucket, events: &[PlayEvent], running: &[(u32, u32)]) -> PlayNode {
    let label = period_label(bucket, |n| format!("{} Inning", ordinal(n)));
    let mut inning = PlayNode::new(label, NodeKind::Period { number: bucket.number });

    for half in [Half::Top, Half::Bottom] {
        let indices: Vec<usize> = bucket
            .indices
            .iter()
            .copied()
            .filter(|&i| {
                let kind = events[i].period.as_ref().map(|p| p.kind.as_str()).unwrap_or("");
                Half::from_kind(kind) == half
            })
            .collect();
        if indices.is_empty() {
            continue;
        }

        let plays: Vec<&PlayEvent> = indices.iter().map(|&i| &events[i]).collect();
        let score = indices.last().map(|&i| running[i]).unwrap_or((0, 0));
        let label = half_label(half, bucket.number, score, pitcher_of(&plays));

        let mut node = PlayNode::new(label, NodeKind::HalfInning { half });
        group_at_bats(&mut node, &plays);
        inning.push_node(node);
    }
    inning
}

/// "Top of the 3rd (2-1) - Cole pitching"
fn half_label(half: Half, number: Option<u32>, score: (u32, u32), pitcher: Option<&str>) -> String {
    let mut label = match number {
        Some(n) => format!("{} of the {}", half.title(), ordinal(n)),
        None => format!("{} half", half.title()),
    };
    let (away, home) = score;
    if away > 0 || home > 0 {
        label.push_str(&format!(" ({}-{})", away, home));
    }
    if let Some(surname) = pitcher.and_then(|p| p.split_whitespace().last()) {
        label.push_str(&format!(" - {} pitching", surname));
    }
    label
}

/// Highest score seen so far, after each event in input order
fn running_scores(events: &[PlayEvent]) -> Vec<(u32, u32)> {
    let mut current = (0, 0);
    events
        .iter()
        .map(|e| {
            current = (current.0.max(e.away_score), current.1.max(e.home_score));
            current
        })
        .collect()
}

fn pitcher_of<'a>(plays: &[&'a PlayEvent]) -> Option<&'a str> {
    plays.iter().find_map(|p| {
        p.text
            .split_once(PITCHES_TO)
            .map(|(pitcher, _)| pitcher.trim())
            .filter(|pitcher| !pitcher.is_empty())
    })
}

fn is_transition(text: &str) -> bool {
    text.trim().is_empty() || TRANSITION_PREFIXES.iter().any(|p| text.starts_with(p))
}

fn is_pitch(text: &str) -> bool {
    let lower = text.to_lowercase();
    text.contains("Pitch") || PITCH_KEYWORDS.iter().any(|k| lower.contains(k))
}

fn closes_at_bat(text: &str, batter: &str) -> bool {
    let lower = text.to_lowercase();
    let name_found = batter
        .split_whitespace()
        .filter(|token| token.chars().count() >= MIN_NAME_TOKEN)
        .any(|token| lower.contains(&token.to_lowercase()));
    name_found || OUTCOME_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// An at-bat under construction
struct OpenAtBat<'a> {
    opener: &'a PlayEvent,
    batter: String,
    buffered: Vec<&'a PlayEvent>,
}

impl<'a> OpenAtBat<'a> {
    fn open(opener: &'a PlayEvent, batter: &str) -> Self {
        Self {
            opener,
            batter: batter.trim().to_string(),
            buffered: Vec::new(),
        }
    }

    /// Close with an explicit summary line
    fn close_with(self, summary: &PlayEvent) -> PlayNode {
        let pitches = self.buffered.iter().filter(|e| is_pitch(&e.text)).count();
        let mut node = PlayNode::new(
            summary.text.clone(),
            NodeKind::AtBat {
                batter: self.batter,
                pitches,
            },
        );
        for event in self.buffered {
            node.push_event(event.clone());
        }
        node.scoring |= summary.scoring;
        node
    }

    /// Close without an outcome line: the last buffered line, or the opener, is the summary
    fn close_unfinished(mut self) -> PlayNode {
        let summary = self.buffered.pop().unwrap_or(self.opener);
        self.close_with(summary)
    }
}

fn group_at_bats(half: &mut PlayNode, plays: &[&PlayEvent]) {
    let mut open: Option<OpenAtBat<'_>> = None;

    for &play in plays.iter().filter(|p| !is_transition(&p.text)) {
        if let Some((_, batter)) = play.text.split_once(PITCHES_TO) {
            if let Some(interrupted) = open.take() {
                trace!("PLAYS: at-bat of '{}' interrupted", interrupted.batter);
                half.push_node(interrupted.close_unfinished());
            }
            open = Some(OpenAtBat::open(play, batter));
            continue;
        }

        match open.take() {
            Some(at_bat) if closes_at_bat(&play.text, &at_bat.batter) => {
                half.push_node(at_bat.close_with(play));
            }
            Some(mut at_bat) => {
                at_bat.buffered.push(play);
                open = Some(at_bat);
            }
            None => half.push_event(play.clone()),
        }
    }

    if let Some(at_bat) = open {
        half.push_node(at_bat.close_unfinished());
    }
}
