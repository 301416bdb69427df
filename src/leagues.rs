//! Static league lookup table
//!
//! Maps a league abbreviation to its sport family and to the order in which
//! its divisions are shown as standings tabs.

use phf::phf_map;

use crate::types::Sport;

/// Static facts about one league
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeagueInfo {
    pub sport: Sport,
    /// Preferred tab order for divisional standings
    pub division_order: &'static [&'static str],
    /// Whether standings are split into one tab per division
    pub divisional_standings: bool,
}

const MLB_DIVISIONS: &[&str] = &[
    "AL East",
    "AL Central",
    "AL West",
    "NL East",
    "NL Central",
    "NL West",
    "League",
];

static LEAGUES: phf::Map<&'static str, LeagueInfo> = phf_map! {
    "MLB" => LeagueInfo { sport: Sport::Baseball, division_order: MLB_DIVISIONS, divisional_standings: true },
    "NFL" => LeagueInfo { sport: Sport::Football, division_order: &[], divisional_standings: false },
    "NCAAF" => LeagueInfo { sport: Sport::Football, division_order: &[], divisional_standings: false },
    "NBA" => LeagueInfo { sport: Sport::Basketball, division_order: &[], divisional_standings: false },
    "WNBA" => LeagueInfo { sport: Sport::Basketball, division_order: &[], divisional_standings: false },
    "NCAAM" => LeagueInfo { sport: Sport::Basketball, division_order: &[], divisional_standings: false },
    "NHL" => LeagueInfo { sport: Sport::Hockey, division_order: &[], divisional_standings: false },
};

/// Look up a league by abbreviation (case-insensitive)
pub fn lookup(abbrev: &str) -> Option<&'static LeagueInfo> {
    LEAGUES.get(abbrev.trim().to_uppercase().as_str())
}

/// Sport family for a league, `Sport::Other` when unknown
pub fn sport_for(abbrev: &str) -> Sport {
    lookup(abbrev).map(|info| info.sport).unwrap_or(Sport::Other)
}

/// All known league abbreviations, sorted
pub fn known() -> Vec<&'static str> {
    let mut leagues: Vec<&'static str> = LEAGUES.keys().copied().collect();
    leagues.sort_unstable();
    leagues
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_league() {
        let mlb = lookup("MLB").unwrap();
        assert_eq!(mlb.sport, Sport::Baseball);
        assert!(mlb.divisional_standings);
        assert_eq!(mlb.division_order.first(), Some(&"AL East"));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(lookup("nfl").map(|l| l.sport), Some(Sport::Football));
        assert_eq!(lookup(" ncaaf ").map(|l| l.sport), Some(Sport::Football));
    }

    #[test]
    fn test_unknown_league_is_other() {
        assert!(lookup("XFL").is_none());
        assert_eq!(sport_for("XFL"), Sport::Other);
    }

    #[test]
    fn test_known_is_sorted() {
        let leagues = known();
        assert_eq!(leagues.len(), 7);
        assert_eq!(leagues.first(), Some(&"MLB"));
        assert!(leagues.windows(2).all(|w| w[0] < w[1]));
    }
}
