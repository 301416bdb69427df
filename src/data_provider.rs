/// Trait for providing normalized sports data, abstracting over real API adapters and fixtures
use std::fmt;

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::plays::PlayEvent;
use crate::tables::{Boxscore, Injury, LeaderCategory, TeamStanding};

/// Which kind of record set a view asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Standings,
    Leaders,
    Boxscore,
    Injuries,
    Plays,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Standings => "standings",
            Self::Leaders => "leaders",
            Self::Boxscore => "boxscore",
            Self::Injuries => "injuries",
            Self::Plays => "plays",
        };
        f.write_str(name)
    }
}

/// Normalized records for one source, ready for a grid variant or the play reconstructor
#[derive(Debug, Clone, PartialEq)]
pub enum RecordSet {
    Standings(Vec<TeamStanding>),
    Leaders(Vec<LeaderCategory>),
    Boxscore(Boxscore),
    Injuries(Vec<Injury>),
    Plays(Vec<PlayEvent>),
}

impl RecordSet {
    pub fn kind(&self) -> SourceKind {
        match self {
            Self::Standings(_) => SourceKind::Standings,
            Self::Leaders(_) => SourceKind::Leaders,
            Self::Boxscore(_) => SourceKind::Boxscore,
            Self::Injuries(_) => SourceKind::Injuries,
            Self::Plays(_) => SourceKind::Plays,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Standings(v) => v.is_empty(),
            Self::Leaders(v) => v.is_empty(),
            Self::Boxscore(b) => b.teams.is_empty(),
            Self::Injuries(v) => v.is_empty(),
            Self::Plays(v) => v.is_empty(),
        }
    }
}

/// Normalization adapter over an upstream sports-data API
///
/// `id` is a league abbreviation for league-wide sources and a game id for
/// per-game sources.
#[async_trait]
pub trait SportsDataProvider: Send + Sync {
    /// Current standings for a league
    async fn standings(&self, league: &str) -> Result<Vec<TeamStanding>, ProviderError>;

    /// Statistical leaders for a league
    async fn leaders(&self, league: &str) -> Result<Vec<LeaderCategory>, ProviderError>;

    /// Boxscore for one game
    async fn boxscore(&self, game_id: &str) -> Result<Boxscore, ProviderError>;

    /// Injury report for a league
    async fn injuries(&self, league: &str) -> Result<Vec<Injury>, ProviderError>;

    /// Flat play-by-play feed for one game
    async fn plays(&self, game_id: &str) -> Result<Vec<PlayEvent>, ProviderError>;

    /// Fetch any row-shaped source by kind
    async fn fetch_records(&self, kind: SourceKind, id: &str) -> Result<RecordSet, ProviderError> {
        Ok(match kind {
            SourceKind::Standings => RecordSet::Standings(self.standings(id).await?),
            SourceKind::Leaders => RecordSet::Leaders(self.leaders(id).await?),
            SourceKind::Boxscore => RecordSet::Boxscore(self.boxscore(id).await?),
            SourceKind::Injuries => RecordSet::Injuries(self.injuries(id).await?),
            SourceKind::Plays => RecordSet::Plays(self.plays(id).await?),
        })
    }

    /// Fetch the event feed for the play reconstructor
    async fn fetch_events(&self, kind: SourceKind, id: &str) -> Result<Vec<PlayEvent>, ProviderError> {
        match kind {
            SourceKind::Plays => self.plays(id).await,
            other => Err(ProviderError::Malformed(format!("{} is not an event source", other))),
        }
    }
}
