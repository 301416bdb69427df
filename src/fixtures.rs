//! Deterministic in-memory sports data
//!
//! `FixtureProvider` serves these records through the provider trait, so the
//! demo runs without a network adapter and the tests and benchmarks see
//! stable data.
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use crate::data_provider::SportsDataProvider;
use crate::error::ProviderError;
use crate::plays::{Period, PlayEvent};
use crate::tables::{
    AthleteLine, Boxscore, Injury, Leader, LeaderCategory, PlayerStatGroup, StatValue, TeamBox, TeamStanding,
    TeamStatGroup,
};

/// Game id whose fixture feed is a baseball game
pub const BASEBALL_GAME_ID: &str = "mlb-401";
/// Game id whose fixture feed is a football game
pub const FOOTBALL_GAME_ID: &str = "nfl-101";

fn standing(name: &str, division: Option<&str>, wins: u32, losses: u32, streak: Option<&str>) -> TeamStanding {
    TeamStanding {
        name: name.to_string(),
        division: division.map(str::to_string),
        wins,
        losses,
        win_pct: wins as f64 / (wins + losses).max(1) as f64,
        games_behind: "-".to_string(),
        streak: streak.map(str::to_string),
        record: format!("{}-{}", wins, losses),
    }
}

/// Create mock standings data for a league
pub fn create_mock_standings(league: &str) -> Vec<TeamStanding> {
    match league.trim().to_uppercase().as_str() {
        "MLB" => vec![
            standing("Yankees", Some("AL East"), 94, 68, Some("W2")),
            standing("Orioles", Some("AL East"), 91, 71, Some("L1")),
            standing("Red Sox", Some("AL East"), 81, 81, None),
            standing("Guardians", Some("AL Central"), 92, 69, Some("W1")),
            standing("Royals", Some("AL Central"), 86, 76, Some("L3")),
            standing("Astros", Some("AL West"), 88, 73, Some("W4")),
            standing("Phillies", Some("NL East"), 95, 67, Some("W1")),
            standing("Brewers", Some("NL Central"), 93, 69, Some("L2")),
            standing("Dodgers", Some("NL West"), 98, 64, Some("W5")),
            standing("Padres", Some("NL West"), 93, 69, Some("W1")),
        ],
        "NFL" | "NCAAF" => vec![
            standing("Chiefs", Some("AFC West"), 15, 2, Some("W3")),
            standing("Bills", Some("AFC East"), 13, 4, Some("W1")),
            standing("Lions", Some("NFC North"), 15, 2, Some("W2")),
        ],
        _ => vec![
            standing("Celtics", None, 64, 18, Some("W6")),
            standing("Knicks", None, 50, 32, None),
            standing("Bucks", None, 49, 33, Some("L1")),
        ],
    }
}

/// Create mock statistical leaders for a league
pub fn create_mock_leaders(league: &str) -> Vec<LeaderCategory> {
    let leader = |name: &str, team: &str, value: &str| Leader {
        name: name.to_string(),
        team: team.to_string(),
        value: value.to_string(),
    };
    match league.trim().to_uppercase().as_str() {
        "MLB" => vec![
            LeaderCategory {
                category: "Home Runs".to_string(),
                leaders: vec![leader("Aaron Judge", "NYY", "58"), leader("Shohei Ohtani", "LAD", "54")],
            },
            LeaderCategory {
                category: "Batting Average".to_string(),
                leaders: vec![leader("Luis Arraez", "SD", ".314")],
            },
        ],
        _ => vec![LeaderCategory {
            category: "Points".to_string(),
            leaders: vec![leader("Top Scorer", "BOS", "30.1")],
        }],
    }
}

/// Create a mock boxscore with one team stat group and two player groups per team
pub fn create_mock_boxscore(game_id: &str) -> Boxscore {
    let team = |name: &str, runs: &str, hits: &str| TeamBox {
        team: name.to_string(),
        statistics: vec![TeamStatGroup {
            name: "Batting".to_string(),
            stats: vec![
                StatValue::new("atBats", "At Bats", "34"),
                StatValue::new("runs", "Runs", runs),
                StatValue::new("hits", "Hits", hits),
                StatValue::new("leftOnBase", "Left On Base", "6"),
            ],
        }],
        players: vec![
            PlayerStatGroup {
                kind: "batting".to_string(),
                names: vec!["AB".to_string(), "R".to_string(), "H".to_string()],
                athletes: vec![
                    AthleteLine {
                        name: format!("{} Leadoff", name),
                        position: "CF".to_string(),
                        active: true,
                        stats: vec!["4".to_string(), "1".to_string(), "2".to_string()],
                    },
                    AthleteLine {
                        name: format!("{} Slugger", name),
                        position: "1B".to_string(),
                        active: true,
                        stats: vec!["4".to_string(), runs.to_string(), "1".to_string()],
                    },
                    AthleteLine {
                        name: format!("{} Reserve", name),
                        position: "PH".to_string(),
                        active: false,
                        stats: vec!["0".to_string(), "0".to_string(), "0".to_string()],
                    },
                ],
            },
            PlayerStatGroup {
                kind: "pitching".to_string(),
                names: vec!["IP".to_string(), "ER".to_string(), "K".to_string()],
                athletes: vec![AthleteLine {
                    name: format!("{} Starter", name),
                    position: "SP".to_string(),
                    active: true,
                    stats: vec!["6.0".to_string(), "2".to_string(), "8".to_string()],
                }],
            },
        ],
    };

    info!("FIXTURES: boxscore for {}", game_id);
    Boxscore {
        teams: vec![team("Dodgers", "3", "8"), team("Yankees", "2", "6")],
    }
}

/// Create a mock injury report
pub fn create_mock_injuries(_league: &str) -> Vec<Injury> {
    vec![
        Injury {
            player: "Gerrit Cole".to_string(),
            position: "SP".to_string(),
            team: "NYY".to_string(),
            status: "15-Day IL".to_string(),
            kind: "Elbow".to_string(),
            details: "Nerve inflammation".to_string(),
            return_date: Some("2025-06-01".to_string()),
        },
        Injury {
            player: "Mike Trout".to_string(),
            position: "CF".to_string(),
            team: "LAA".to_string(),
            status: "60-Day IL".to_string(),
            kind: "Knee".to_string(),
            details: "Torn meniscus".to_string(),
            return_date: None,
        },
    ]
}

fn inning(n: u32, half: &str, text: &str) -> PlayEvent {
    let display = format!("{} Inning", crate::plays::ordinal(n));
    PlayEvent::new(text).in_period(Period::new(n, half, display))
}

/// A short baseball feed: one full inning plus a partial second
pub fn create_mock_baseball_plays() -> Vec<PlayEvent> {
    vec![
        inning(1, "top", "Top of the 1st"),
        inning(1, "top", "Walker Buehler pitches to Gleyber Torres"),
        inning(1, "top", "Ball 1").with_pitch(96, "Four-seam FB"),
        inning(1, "top", "Strike 1 Looking").with_pitch(88, "Slider"),
        inning(1, "top", "Torres grounded out to second"),
        inning(1, "top", "Walker Buehler pitches to Juan Soto"),
        inning(1, "top", "Ball 1"),
        inning(1, "top", "Soto homered to right (410 feet)").scoring(1, 0),
        inning(1, "bottom", "Middle of the 1st"),
        inning(1, "bottom", "Gerrit Cole pitches to Mookie Betts"),
        inning(1, "bottom", "Foul Ball").with_pitch(98, "Four-seam FB"),
        inning(1, "bottom", "Betts walked"),
        inning(1, "bottom", "Gerrit Cole pitches to Freddie Freeman"),
        inning(1, "bottom", "Strike 1 Swinging").with_pitch(84, "Knuckle Curve"),
        inning(1, "bottom", "Freeman doubled to left, Betts scores").scoring(1, 1),
        inning(2, "top", "Walker Buehler pitches to Anthony Volpe"),
        inning(2, "top", "Ball 1"),
    ]
}

fn quarter(n: u32, drive: u32, team: &str, text: &str) -> PlayEvent {
    let display = format!("{} Quarter", crate::plays::ordinal(n));
    PlayEvent::new(text)
        .in_period(Period::new(n, "", display))
        .with_drive(drive, team)
}

/// A short football feed: a touchdown drive, a punt and a field goal
pub fn create_mock_football_plays() -> Vec<PlayEvent> {
    vec![
        quarter(1, 1, "KC", "Mahomes pass short right to Kelce for 12 yards"),
        quarter(1, 1, "KC", "Pacheco right tackle for 4 yards"),
        quarter(1, 1, "KC", "Mahomes pass deep left to Rice for 35 yards, TOUCHDOWN").scoring(7, 0),
        quarter(1, 2, "BUF", "Cook left end for 2 yards"),
        quarter(1, 2, "BUF", "Allen pass incomplete"),
        quarter(1, 2, "BUF", "Martin punts 48 yards"),
        quarter(2, 3, "KC", "Butker 44 yard field goal is GOOD").scoring(10, 0),
        PlayEvent::new("Two-minute warning"),
    ]
}

/// Provider that serves fixture data, used by tests, benches and the demo
#[derive(Debug, Clone, Default)]
pub struct FixtureProvider {
    delay: Option<Duration>,
    fail: bool,
}

impl FixtureProvider {
    pub fn new() -> Self {
        info!("Creating FixtureProvider");
        Self::default()
    }

    /// Sleep before answering, to exercise in-flight loads
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Answer every request with `ProviderError::Unavailable`
    pub fn failing() -> Self {
        Self {
            delay: None,
            fail: true,
        }
    }

    async fn answer<T>(&self, what: &str, data: impl FnOnce() -> T) -> Result<T, ProviderError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(ProviderError::Unavailable(format!("fixture {} disabled", what)));
        }
        info!("FixtureProvider: returning mock {}", what);
        Ok(data())
    }
}

#[async_trait]
impl SportsDataProvider for FixtureProvider {
    async fn standings(&self, league: &str) -> Result<Vec<TeamStanding>, ProviderError> {
        self.answer("standings", || create_mock_standings(league)).await
    }

    async fn leaders(&self, league: &str) -> Result<Vec<LeaderCategory>, ProviderError> {
        self.answer("leaders", || create_mock_leaders(league)).await
    }

    async fn boxscore(&self, game_id: &str) -> Result<Boxscore, ProviderError> {
        self.answer("boxscore", || create_mock_boxscore(game_id)).await
    }

    async fn injuries(&self, league: &str) -> Result<Vec<Injury>, ProviderError> {
        self.answer("injuries", || create_mock_injuries(league)).await
    }

    async fn plays(&self, game_id: &str) -> Result<Vec<PlayEvent>, ProviderError> {
        let events = self
            .answer("plays", || match game_id {
                BASEBALL_GAME_ID => Some(create_mock_baseball_plays()),
                FOOTBALL_GAME_ID => Some(create_mock_football_plays()),
                _ => None,
            })
            .await?;
        events.ok_or_else(|| ProviderError::NotFound {
            kind: "plays".to_string(),
            id: game_id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plays::PlayTree;
    use crate::types::Sport;

    #[test]
    fn test_baseball_fixture_builds_expected_tree() {
        let events = create_mock_baseball_plays();
        assert_eq!(Sport::detect(&events), Sport::Baseball);

        let tree = PlayTree::build(Sport::Baseball, &events);
        let innings: Vec<&str> = tree.child_nodes().map(|n| n.label.as_str()).collect();
        assert_eq!(innings, vec!["1st Inning", "2nd Inning"]);

        let first = tree.child_nodes().next().unwrap();
        let halves: Vec<&str> = first.child_nodes().map(|n| n.label.as_str()).collect();
        assert_eq!(
            halves,
            vec!["Top of the 1st (1-0) - Buehler pitching", "Bottom of the 1st (1-1) - Cole pitching"]
        );
        let top_at_bats: Vec<&str> = first
            .child_nodes()
            .next()
            .unwrap()
            .child_nodes()
            .map(|n| n.label.as_str())
            .collect();
        assert_eq!(top_at_bats, vec!["Torres grounded out to second", "Soto homered to right (410 feet)"]);
    }

    #[test]
    fn test_football_fixture_builds_drives() {
        let events = create_mock_football_plays();
        assert_eq!(Sport::detect(&events), Sport::Football);

        let tree = PlayTree::build(Sport::Football, &events);
        let drives: Vec<String> = tree
            .child_nodes()
            .flat_map(|q| q.child_nodes())
            .map(|d| d.label.clone())
            .collect();
        assert_eq!(
            drives,
            vec![
                "Drive 1 (KC): Touchdown",
                "Drive 2 (BUF): Punt",
                "Drive 3 (KC): Field Goal",
                "Drive ? (Unknown): 1 play",
            ]
        );
    }

    #[tokio::test]
    async fn test_fixture_provider_unknown_game() {
        let provider = FixtureProvider::new();
        let err = provider.plays("nope").await.unwrap_err();
        assert_eq!(
            err,
            ProviderError::NotFound {
                kind: "plays".to_string(),
                id: "nope".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_failing_provider() {
        let provider = FixtureProvider::failing();
        assert!(matches!(provider.standings("MLB").await, Err(ProviderError::Unavailable(_))));
    }
}
