//! Hierarchical play reconstruction
//!
//! Turns a flat, chronological list of play events into a tree suitable for a
//! tree view: innings, half-innings and at-bats for baseball; quarters and
//! drives for football; plain periods for everything else. Trees are built
//! once per load and rebuilt wholesale on reload.

pub mod baseball;
pub mod football;
pub mod generic;

use serde::{Deserialize, Deserializer};
use tracing::debug;

use crate::types::Sport;

pub use baseball::{BaseballStrategy, Half};
pub use football::{DriveResult, FootballStrategy};
pub use generic::GenericStrategy;

/// Label of the catch-all bucket for events without usable period data
pub const UNKNOWN_PERIOD: &str = "Unknown Period";

/// Period information attached to a play event
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Period {
    /// 1-based period number; missing or malformed values deserialize as `None`
    #[serde(deserialize_with = "lenient_number")]
    pub number: Option<u32>,
    /// Sub-period kind, e.g. "top" / "bottom" for baseball
    #[serde(rename = "type")]
    pub kind: String,
    /// Display text such as "1st Inning" or "2nd Quarter"
    #[serde(rename = "displayValue")]
    pub display: String,
}

impl Period {
    pub fn new(number: u32, kind: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            number: Some(number),
            kind: kind.into(),
            display: display.into(),
        }
    }

    /// Period number, if it is present and positive
    pub fn valid_number(&self) -> Option<u32> {
        self.number.filter(|n| *n > 0)
    }
}

/// One immutable, normalized play-by-play record
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayEvent {
    pub text: String,
    pub period: Option<Period>,
    #[serde(rename = "scoringPlay")]
    pub scoring: bool,
    pub participants: Vec<String>,
    pub away_score: u32,
    pub home_score: u32,
    /// Football drive number
    pub drive_number: Option<u32>,
    /// Possessing (football) or batting team abbreviation
    pub team: Option<String>,
    pub down: Option<u8>,
    pub distance: Option<u32>,
    pub yard_line: Option<String>,
    /// Baseball pitch speed in mph
    #[serde(deserialize_with = "lenient_speed")]
    pub pitch_velocity: Option<u32>,
    pub pitch_type: Option<PitchType>,
}

/// Pitch classification attached to a baseball pitch event
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PitchType {
    pub text: String,
}

impl PlayEvent {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn in_period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    pub fn scoring(mut self, away: u32, home: u32) -> Self {
        self.scoring = true;
        self.away_score = away;
        self.home_score = home;
        self
    }

    pub fn with_pitch(mut self, velocity: u32, kind: impl Into<String>) -> Self {
        self.pitch_velocity = Some(velocity);
        self.pitch_type = Some(PitchType { text: kind.into() });
        self
    }

    pub fn with_drive(mut self, number: u32, team: impl Into<String>) -> Self {
        self.drive_number = Some(number);
        self.team = Some(team.into());
        self
    }

    /// Text shown for this event in a tree view
    ///
    /// Adds down-and-distance and field position, or pitch speed and type,
    /// when present, and the score after a scoring play.
    pub fn display_text(&self) -> String {
        let mut text = match (self.down, self.distance) {
            (Some(down), Some(distance)) if down > 0 => format!("{} & {}: {}", down, distance, self.text),
            _ => self.text.clone(),
        };
        if let Some(yard_line) = self.yard_line.as_deref().filter(|y| !y.is_empty()) {
            text = format!("{} (at {})", text, yard_line);
        }
        let pitch: Vec<String> = self
            .pitch_velocity
            .filter(|v| *v > 0)
            .map(|v| format!("{} mph", v))
            .into_iter()
            .chain(
                self.pitch_type
                    .as_ref()
                    .map(|t| t.text.trim())
                    .filter(|t| !t.is_empty())
                    .map(str::to_string),
            )
            .collect();
        if !pitch.is_empty() {
            text = format!("{} ({})", text, pitch.join(" "));
        }
        if self.scoring {
            text = format!("{} ({}-{})", text, self.away_score, self.home_score);
        }
        text
    }
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Int(n) => u32::try_from(n).ok(),
        Raw::Text(s) => s.trim().parse().ok(),
        Raw::Other(_) => None,
    })
}

/// Whole miles per hour; fractional speeds are rounded
fn lenient_speed<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    let speed = match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Some(n),
        Raw::Text(s) => s.trim().parse::<f64>().ok(),
        Raw::Other(_) => None,
    };
    Ok(speed
        .filter(|n| n.is_finite() && *n >= 0.0 && *n <= f64::from(u32::MAX))
        .map(|n| n.round() as u32))
}

/// What a tree node stands for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    Period { number: Option<u32> },
    HalfInning { half: Half },
    AtBat { batter: String, pitches: usize },
    Drive {
        number: Option<u32>,
        team: Option<String>,
        result: DriveResult,
    },
}

/// A child of a tree node: either a nested node or a leaf event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayChild {
    Node(PlayNode),
    Event(PlayEvent),
}

impl PlayChild {
    pub fn label(&self) -> String {
        match self {
            Self::Node(node) => node.label.clone(),
            Self::Event(event) => event.display_text(),
        }
    }

    pub fn is_scoring(&self) -> bool {
        match self {
            Self::Node(node) => node.scoring,
            Self::Event(event) => event.scoring,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayNode {
    pub label: String,
    pub kind: NodeKind,
    pub scoring: bool,
    pub children: Vec<PlayChild>,
}

impl PlayNode {
    pub fn new(label: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            label: label.into(),
            kind,
            scoring: false,
            children: Vec::new(),
        }
    }

    pub fn children(&self) -> &[PlayChild] {
        &self.children
    }

    /// Nested nodes only, skipping leaf events
    pub fn child_nodes(&self) -> impl Iterator<Item = &PlayNode> {
        self.children.iter().filter_map(|c| match c {
            PlayChild::Node(node) => Some(node),
            PlayChild::Event(_) => None,
        })
    }

    pub fn push_node(&mut self, node: PlayNode) {
        self.scoring |= node.scoring;
        self.children.push(PlayChild::Node(node));
    }

    pub fn push_event(&mut self, event: PlayEvent) {
        self.scoring |= event.scoring;
        self.children.push(PlayChild::Event(event));
    }

    /// Number of leaf events anywhere below this node
    pub fn event_count(&self) -> usize {
        self.children
            .iter()
            .map(|c| match c {
                PlayChild::Node(node) => node.event_count(),
                PlayChild::Event(_) => 1,
            })
            .sum()
    }

    /// Depth-first walk yielding each descendant with its depth (children at 0)
    pub fn walk(&self) -> Vec<(usize, &PlayChild)> {
        fn visit<'a>(node: &'a PlayNode, depth: usize, out: &mut Vec<(usize, &'a PlayChild)>) {
            for child in &node.children {
                out.push((depth, child));
                if let PlayChild::Node(inner) = child {
                    visit(inner, depth + 1, out);
                }
            }
        }
        let mut out = Vec::new();
        visit(self, 0, &mut out);
        out
    }
}

/// A sport-specific way of grouping flat events into a tree
pub trait PlayStrategy {
    fn build_tree(&self, events: &[PlayEvent]) -> PlayNode;
}

/// Entry point for building play trees
pub struct PlayTree;

impl PlayTree {
    /// Build a tree with the strategy for `sport`
    pub fn build(sport: Sport, events: &[PlayEvent]) -> PlayNode {
        debug!("PLAYS: building {} tree from {} events", sport, events.len());
        strategy_for(sport).build_tree(events)
    }
}

pub fn strategy_for(sport: Sport) -> Box<dyn PlayStrategy> {
    match sport {
        Sport::Baseball => Box::new(BaseballStrategy),
        Sport::Football => Box::new(FootballStrategy),
        _ => Box::new(GenericStrategy),
    }
}

impl Sport {
    /// Guess the sport from the first event's period display text
    pub fn detect(events: &[PlayEvent]) -> Sport {
        let display = events
            .first()
            .and_then(|e| e.period.as_ref())
            .map(|p| p.display.to_lowercase())
            .unwrap_or_default();

        if display.contains("inning") {
            Sport::Baseball
        } else if display.contains("quarter") {
            Sport::Football
        } else {
            Sport::Other
        }
    }
}

/// Events of one period, referenced by index into the input slice
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PeriodBucket {
    pub number: Option<u32>,
    pub display: String,
    pub indices: Vec<usize>,
}

/// Group events by period number, ascending, with the unknown bucket last
///
/// Events whose period is missing or has no positive number land in the
/// unknown bucket; nothing is dropped.
pub(crate) fn group_by_period(events: &[PlayEvent]) -> Vec<PeriodBucket> {
    let mut buckets: Vec<PeriodBucket> = Vec::new();
    let mut unknown: Vec<usize> = Vec::new();

    for (idx, event) in events.iter().enumerate() {
        let Some(period) = event.period.as_ref().filter(|p| p.valid_number().is_some()) else {
            unknown.push(idx);
            continue;
        };
        let number = period.valid_number();
        match buckets.iter_mut().find(|b| b.number == number) {
            Some(bucket) => bucket.indices.push(idx),
            None => buckets.push(PeriodBucket {
                number,
                display: period.display.trim().to_string(),
                indices: vec![idx],
            }),
        }
    }

    buckets.sort_by_key(|b| b.number);
    if !unknown.is_empty() {
        debug!("PLAYS: {} events without a usable period", unknown.len());
        buckets.push(PeriodBucket {
            number: None,
            display: UNKNOWN_PERIOD.to_string(),
            indices: unknown,
        });
    }
    buckets
}

/// Label for a period node, falling back to `fallback(n)` when the feed has no display text
pub(crate) fn period_label(bucket: &PeriodBucket, fallback: impl Fn(u32) -> String) -> String {
    match bucket.number {
        None => UNKNOWN_PERIOD.to_string(),
        Some(_) if !bucket.display.is_empty() => bucket.display.clone(),
        Some(n) => fallback(n),
    }
}

/// English ordinal: 1st, 2nd, 3rd, 4th, 11th, 21st, ...
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinal() {
        assert_eq!(ordinal(1), "1st");
        assert_eq!(ordinal(2), "2nd");
        assert_eq!(ordinal(3), "3rd");
        assert_eq!(ordinal(4), "4th");
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(12), "12th");
        assert_eq!(ordinal(21), "21st");
    }

    #[test]
    fn test_detect_sport() {
        let inning = PlayEvent::new("x").in_period(Period::new(1, "top", "1st Inning"));
        let quarter = PlayEvent::new("x").in_period(Period::new(1, "", "1st Quarter"));
        let half = PlayEvent::new("x").in_period(Period::new(1, "", "1st Half"));

        assert_eq!(Sport::detect(&[inning]), Sport::Baseball);
        assert_eq!(Sport::detect(&[quarter]), Sport::Football);
        assert_eq!(Sport::detect(&[half]), Sport::Other);
        assert_eq!(Sport::detect(&[]), Sport::Other);
    }

    #[test]
    fn test_group_by_period_orders_and_keeps_unknown_last() {
        let events = vec![
            PlayEvent::new("a").in_period(Period::new(2, "", "2nd")),
            PlayEvent::new("b"),
            PlayEvent::new("c").in_period(Period::new(1, "", "1st")),
            PlayEvent::new("d").in_period(Period {
                number: Some(0),
                ..Default::default()
            }),
            PlayEvent::new("e").in_period(Period::new(2, "", "2nd")),
        ];
        let buckets = group_by_period(&events);

        assert_eq!(buckets.len(), 3);
        assert_eq!(buckets[0].number, Some(1));
        assert_eq!(buckets[0].indices, vec![2]);
        assert_eq!(buckets[1].indices, vec![0, 4]);
        assert_eq!(buckets[2].display, UNKNOWN_PERIOD);
        assert_eq!(buckets[2].indices, vec![1, 3]);
    }

    #[test]
    fn test_deserialize_lenient_period() {
        let json = r#"[
            {"text": "a", "period": {"number": 3, "type": "Bottom", "displayValue": "3rd Inning"}, "scoringPlay": true, "awayScore": 1, "homeScore": 2},
            {"text": "b", "period": {"number": "4"}},
            {"text": "c", "period": {"number": "soon"}},
            {"text": "d", "period": {"number": -1}},
            {"text": "e"}
        ]"#;
        let events: Vec<PlayEvent> = serde_json::from_str(json).unwrap();

        assert_eq!(events.len(), 5);
        assert_eq!(events[0].period.as_ref().unwrap().kind, "Bottom");
        assert!(events[0].scoring);
        assert_eq!(events[0].home_score, 2);
        assert_eq!(events[1].period.as_ref().unwrap().number, Some(4));
        assert_eq!(events[2].period.as_ref().unwrap().number, None);
        assert_eq!(events[3].period.as_ref().unwrap().number, None);
        assert!(events[4].period.is_none());
    }

    #[test]
    fn test_display_text_football_context() {
        let mut event = PlayEvent::new("Run for 4 yards");
        event.down = Some(2);
        event.distance = Some(6);
        event.yard_line = Some("NE 35".into());
        assert_eq!(event.display_text(), "2 & 6: Run for 4 yards (at NE 35)");

        let td = PlayEvent::new("Pass for touchdown").scoring(7, 0);
        assert_eq!(td.display_text(), "Pass for touchdown (7-0)");
    }

    #[test]
    fn test_display_text_pitch_details() {
        let pitch = PlayEvent::new("Strike 1 Swinging").with_pitch(97, "Four-seam FB");
        assert_eq!(pitch.display_text(), "Strike 1 Swinging (97 mph Four-seam FB)");

        let mut speed_only = PlayEvent::new("Ball 1");
        speed_only.pitch_velocity = Some(88);
        assert_eq!(speed_only.display_text(), "Ball 1 (88 mph)");
    }

    #[test]
    fn test_deserialize_pitch_details() {
        let json = r#"[
            {"text": "Ball 1", "pitchVelocity": 95.6, "pitchType": {"id": "2", "text": "Sinker"}},
            {"text": "Foul Ball", "pitchVelocity": "84"},
            {"text": "Strike 2", "pitchVelocity": null}
        ]"#;
        let events: Vec<PlayEvent> = serde_json::from_str(json).unwrap();
        assert_eq!(events[0].pitch_velocity, Some(96));
        assert_eq!(events[0].display_text(), "Ball 1 (96 mph Sinker)");
        assert_eq!(events[1].display_text(), "Foul Ball (84 mph)");
        assert_eq!(events[2].pitch_velocity, None);
        assert_eq!(events[2].display_text(), "Strike 2");
    }

    #[test]
    fn test_walk_depths() {
        let mut inner = PlayNode::new("inner", NodeKind::Period { number: Some(1) });
        inner.push_event(PlayEvent::new("leaf").scoring(1, 0));
        let mut root = PlayNode::new("root", NodeKind::Root);
        root.push_node(inner);

        let walked: Vec<(usize, String)> = root.walk().into_iter().map(|(d, c)| (d, c.label())).collect();
        assert_eq!(walked, vec![(0, "inner".to_string()), (1, "leaf (1-0)".to_string())]);
        assert!(root.scoring);
        assert_eq!(root.event_count(), 1);
    }

    #[test]
    fn test_build_dispatches_by_sport() {
        let events = vec![PlayEvent::new("Faceoff won").in_period(Period::new(1, "", "1st Period"))];
        let tree = PlayTree::build(Sport::Hockey, &events);
        assert_eq!(tree.kind, NodeKind::Root);
        assert_eq!(tree.child_nodes().next().unwrap().label, "1st Period");
    }
}
