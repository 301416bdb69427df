/// Interactive accessibility demonstration
///
/// Loads fixture grids in the background and drives them with the keyboard.
/// Every focus change prints the announcement a screen reader would speak:
/// - Arrow keys move inside a grid, or between tabs on the tab bar
/// - Tab / Shift+Tab move between grids and tab bars
/// - `]` loads the next data source, `q` or Esc quits
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::background::{Delivery, Loader, ViewHandle};
use crate::config::{Config, ViewConfig};
use crate::data_provider::{SourceKind, SportsDataProvider};
use crate::fixtures::{FixtureProvider, BASEBALL_GAME_ID, FOOTBALL_GAME_ID};
use crate::focus::{ChainOutcome, GridGroup};
use crate::keys::{self, KeyCommand};
use crate::tables;
use crate::types::Sport;

/// How long to wait for a key before checking for deliveries
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Sources cycled by `]`, in order
const SOURCES: [SourceKind; 4] = [
    SourceKind::Standings,
    SourceKind::Leaders,
    SourceKind::Boxscore,
    SourceKind::Injuries,
];

/// State of one demo session, independent of the terminal
pub struct DemoSession {
    view: ViewConfig,
    handle: ViewHandle,
    source: usize,
    group: Option<GridGroup>,
}

impl DemoSession {
    pub fn new(view: ViewConfig) -> Self {
        Self {
            view,
            handle: ViewHandle::new(1),
            source: 0,
            group: None,
        }
    }

    pub fn source(&self) -> SourceKind {
        SOURCES[self.source]
    }

    pub fn group(&self) -> Option<&GridGroup> {
        self.group.as_ref()
    }

    pub fn handle(&self) -> &ViewHandle {
        &self.handle
    }

    fn source_id(&self) -> String {
        match self.source() {
            SourceKind::Boxscore | SourceKind::Plays => match self.view.sport {
                Sport::Football => FOOTBALL_GAME_ID.to_string(),
                _ => BASEBALL_GAME_ID.to_string(),
            },
            _ => self.view.league.clone(),
        }
    }

    /// Request the current source; earlier requests become stale
    pub fn load(&self, loader: &Loader) {
        loader.request(&self.handle, self.source(), self.source_id());
    }

    /// Move to the next source and request it
    pub fn next_source(&mut self, loader: &Loader) -> String {
        self.source = (self.source + 1) % SOURCES.len();
        self.group = None;
        self.load(loader);
        format!("Loading {}", self.source())
    }

    /// Apply a finished load; returns the line to announce, if the delivery was current
    pub fn apply(&mut self, delivery: Delivery) -> Option<String> {
        let kind = delivery.kind;
        let result = self.handle.take(delivery)?;
        let group = tables::group_for(&self.view, kind, result)?;
        let line = format!(
            "{} loaded. {}",
            group.container(),
            group.announcement()
        );
        self.group = Some(group);
        Some(line)
    }

    /// Apply a key command; returns the line to announce when focus changed
    pub fn handle_command(&mut self, command: KeyCommand) -> Option<String> {
        let group = self.group.as_mut()?;
        match keys::dispatch(group, command) {
            ChainOutcome::Unchanged => None,
            _ => Some(announcement_line(group)),
        }
    }

    /// Tear the view down so that in-flight loads are ignored
    pub fn close(&self) {
        self.handle.close();
    }
}

/// The announcement, followed by the placeholder of an empty active tab
fn announcement_line(group: &GridGroup) -> String {
    let mut line = group.announcement();
    if group.focused_grid().is_none() {
        if let Some(placeholder) = group
            .grid(group.active_tab(), 0)
            .filter(|g| g.is_empty())
            .and_then(|g| g.placeholder())
        {
            line = format!("{}. {}", line, placeholder);
        }
    }
    line
}

/// Restores the terminal when the demo exits, including on error
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

fn say(line: &str) -> Result<()> {
    let mut stdout = io::stdout();
    write!(stdout, "{}\r\n", line)?;
    stdout.flush()?;
    Ok(())
}

fn drain(session: &mut DemoSession, rx: &mut mpsc::Receiver<Delivery>) -> Result<()> {
    while let Ok(delivery) = rx.try_recv() {
        if let Some(line) = session.apply(delivery) {
            say(&line)?;
        }
    }
    Ok(())
}

pub async fn run(config: &Config, league: Option<String>) -> Result<()> {
    let league = league.unwrap_or_else(|| config.default_league.clone());
    let view = ViewConfig::for_league(&league, config);
    info!("Starting demo for {} ({})", view.league, view.sport);

    let provider: Arc<dyn SportsDataProvider> = Arc::new(FixtureProvider::new());
    let (loader, mut rx) = Loader::new(provider);
    let mut session = DemoSession::new(view);

    println!("sportgrid demo for {}", session.view.league);
    println!("Arrows move, Tab/Shift+Tab switch grids, ] next source, q quits");

    let _guard = RawModeGuard::enable()?;
    session.load(&loader);

    loop {
        drain(&mut session, &mut rx)?;

        if !event::poll(POLL_INTERVAL).context("Failed to poll terminal events")? {
            tokio::task::yield_now().await;
            continue;
        }
        let Event::Key(key) = event::read().context("Failed to read terminal event")? else {
            continue;
        };
        if key.kind == KeyEventKind::Press && key.code == KeyCode::Char(']') {
            let line = session.next_source(&loader);
            say(&line)?;
            continue;
        }

        match keys::key_to_command(key) {
            Some(KeyCommand::Quit) => break,
            Some(command) => {
                if let Some(line) = session.handle_command(command) {
                    say(&line)?;
                }
            }
            None => debug!("KEY: unbound {:?}", key.code),
        }
    }

    session.close();
    Ok(())
}
