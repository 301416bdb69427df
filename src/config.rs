use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use xdg::BaseDirectories;

use crate::leagues;
use crate::types::Sport;

/// Placeholder announced for a grid that has no rows
pub const DEFAULT_EMPTY_PLACEHOLDER: &str = "No data available";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub log_file: String,
    pub default_league: String,
    pub empty_placeholder: String,
    /// Append "Row r of R, column c of C" to the long-form help channel
    pub announce_positions: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: "info".to_string(),
            log_file: "/dev/null".to_string(),
            default_league: "MLB".to_string(),
            empty_placeholder: DEFAULT_EMPTY_PLACEHOLDER.to_string(),
            announce_positions: false,
        }
    }
}

/// Immutable per-view configuration, built once when a view is constructed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewConfig {
    pub league: String,
    pub sport: Sport,
    pub division_order: Vec<String>,
    pub divisional_standings: bool,
    pub empty_placeholder: String,
    pub announce_positions: bool,
}

impl ViewConfig {
    /// Build the view configuration for a league, using `config` for the shared settings
    pub fn for_league(league: &str, config: &Config) -> Self {
        let info = leagues::lookup(league);
        Self {
            league: league.trim().to_uppercase(),
            sport: leagues::sport_for(league),
            division_order: info
                .map(|i| i.division_order.iter().map(|d| d.to_string()).collect())
                .unwrap_or_default(),
            divisional_standings: info.map(|i| i.divisional_standings).unwrap_or(false),
            empty_placeholder: config.empty_placeholder.clone(),
            announce_positions: config.announce_positions,
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self::for_league("MLB", &Config::default())
    }
}

pub fn get_config_path() -> Option<PathBuf> {
    let pgm = env!("CARGO_PKG_NAME");
    let xdg_dirs = BaseDirectories::with_prefix(pgm);
    let config_home = xdg_dirs.get_config_home()?;
    Some(config_home.join("config.toml"))
}

pub fn read() -> Config {
    let config_path = match get_config_path() {
        Some(path) => path,
        None => return Config::default(),
    };

    if !config_path.exists() {
        return Config::default();
    }

    let content = match fs::read_to_string(&config_path) {
        Ok(content) => content,
        Err(_) => return Config::default(),
    };

    parse(&content)
}

/// Parse configuration text, falling back to defaults on any error
pub fn parse(content: &str) -> Config {
    toml::from_str(content).unwrap_or_else(|e| {
        tracing::warn!("Ignoring invalid configuration: {}", e);
        Config::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.log_file, "/dev/null");
        assert_eq!(config.empty_placeholder, "No data available");
        assert!(!config.announce_positions);
    }

    #[test]
    fn test_config_from_toml_partial() {
        let config = parse(
            r#"
default_league = "NFL"
announce_positions = true
        "#,
        );
        assert_eq!(config.default_league, "NFL");
        assert!(config.announce_positions);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_config_invalid_toml_falls_back() {
        let config = parse("announce_positions = \"maybe\"");
        assert!(!config.announce_positions);
        assert_eq!(config.default_league, "MLB");
    }

    #[test]
    fn test_view_config_for_mlb() {
        let view = ViewConfig::for_league("mlb", &Config::default());
        assert_eq!(view.league, "MLB");
        assert_eq!(view.sport, Sport::Baseball);
        assert!(view.divisional_standings);
        assert_eq!(view.division_order.len(), 7);
    }

    #[test]
    fn test_view_config_unknown_league() {
        let view = ViewConfig::for_league("XFL", &Config::default());
        assert_eq!(view.sport, Sport::Other);
        assert!(view.division_order.is_empty());
        assert!(!view.divisional_standings);
    }
}
