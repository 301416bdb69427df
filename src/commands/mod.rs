pub mod demo;
pub mod plays;

use anyhow::{bail, Result};

use crate::leagues;

/// Validate a league abbreviation, defaulting to `fallback`
///
/// Accepts any league known to the league table, case-insensitively.
/// Returns an error naming the known leagues otherwise.
pub fn parse_league(league: Option<String>, fallback: &str) -> Result<String> {
    let league = league.unwrap_or_else(|| fallback.to_string());
    match leagues::lookup(&league) {
        Some(_) => Ok(league.trim().to_uppercase()),
        None => bail!(
            "Unknown league '{}'. Known leagues: {}",
            league,
            leagues::known().join(", ")
        ),
    }
}
