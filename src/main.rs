use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use sportgrid::types::Sport;
use sportgrid::{commands, config};
use tracing_subscriber::EnvFilter;

/// Log target that discards everything; logging stays off unless a file is given
const NULL_LOG_FILE: &str = "/dev/null";

#[derive(Parser)]
#[command(name = "sportgrid", version)]
#[command(about = "Accessible sports data grids", long_about = "Accessible sports data grids\n\nNavigates standings, leaders, boxscores and injury reports by keyboard and prints what a screen reader would announce.")]
struct Cli {
    /// Log filter, e.g. "debug" or "sportgrid::focus=trace" (overrides config)
    #[arg(short = 'L', long, global = true)]
    log_level: Option<String>,

    /// File receiving log output (overrides config)
    #[arg(short = 'F', long, global = true)]
    log_file: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum SportArg {
    /// Detect from the feed's period labels
    Auto,
    Baseball,
    Football,
    /// Group by period only
    Generic,
}

impl SportArg {
    fn to_sport(self) -> Option<Sport> {
        match self {
            SportArg::Auto => None,
            SportArg::Baseball => Some(Sport::Baseball),
            SportArg::Football => Some(Sport::Football),
            SportArg::Generic => Some(Sport::Other),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print a play-by-play feed as a tree
    Plays {
        /// JSON file holding an array of play events
        file: PathBuf,

        /// Sport strategy used to group the plays
        #[arg(short, long, default_value = "auto")]
        sport: SportArg,
    },
    /// Interactive keyboard demo over fixture data
    Demo {
        /// League abbreviation (defaults to the configured league)
        #[arg(short, long)]
        league: Option<String>,
    },
    /// Display current configuration
    Config,
}

/// Send tracing output to `log_file`, filtered by `filter`
///
/// An unparsable filter falls back to "info".
fn init_logging(filter: &str, log_file: &str) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("cannot open log file {}", log_file))?;
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("cannot install tracing subscriber: {}", e))
}

/// Print the effective configuration and where it was read from
fn handle_config_command(cfg: &config::Config) {
    match config::get_config_path() {
        Some(path) if path.exists() => println!("Config file: {}", path.display()),
        Some(path) => println!("Config file: {} (not found, using defaults)", path.display()),
        None => println!("Config file: unavailable (no home directory)"),
    }

    let view = config::ViewConfig::for_league(&cfg.default_league, cfg);
    let settings = [
        ("log_level", cfg.log_level.clone()),
        ("log_file", cfg.log_file.clone()),
        ("default_league", cfg.default_league.clone()),
        ("empty_placeholder", cfg.empty_placeholder.clone()),
        ("announce_positions", cfg.announce_positions.to_string()),
        ("sport", view.sport.to_string()),
        ("divisional_standings", view.divisional_standings.to_string()),
    ];
    println!();
    for (key, value) in settings {
        println!("{:<22}{}", key, value);
    }
    if !view.division_order.is_empty() {
        println!("{:<22}{}", "division_order", view.division_order.join(", "));
    }
}

/// Pick the log filter and file: flags win over the config file
fn resolve_log_config<'a>(cli: &'a Cli, cfg: &'a config::Config) -> (&'a str, &'a str) {
    (
        cli.log_level.as_deref().unwrap_or(&cfg.log_level),
        cli.log_file.as_deref().unwrap_or(&cfg.log_file),
    )
}

/// Run one subcommand
async fn execute_command(config: &config::Config, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Config => {
            handle_config_command(config);
            Ok(())
        }
        Commands::Plays { file, sport } => commands::plays::run(&file, sport.to_sport()),
        Commands::Demo { league } => {
            let league = commands::parse_league(league, &config.default_league)?;
            commands::demo::run(config, Some(league)).await
        }
    }
}

#[tokio::main]
async fn main() {
    let cfg = config::read();
    let cli = Cli::parse();

    let (filter, log_file) = resolve_log_config(&cli, &cfg);
    if log_file != NULL_LOG_FILE {
        if let Err(e) = init_logging(filter, log_file) {
            eprintln!("Warning: {:#}", e);
        }
    }

    if let Err(e) = execute_command(&cfg, cli.command).await {
        tracing::error!("{:#}", e);
        eprintln!("sportgrid: {:#}", e);
        std::process::exit(1);
    }
}
