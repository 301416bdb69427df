//! Cross-widget focus chain
//!
//! A `GridGroup` binds the grids of one tabbed container together so that
//! Tab / Shift+Tab move predictably between grids and tabs. Exactly one focus
//! owner exists at any time: either the tab bar or one cell of one grid.
//! Key events are offered to the current owner first and then forwarded
//! according to the chain rules:
//!
//! - Tab from a grid enters the grid right after it when that grid has rows,
//!   otherwise advances to the next tab and parks on its tab bar.
//! - Tab from the tab bar enters the first grid of the active tab that has rows.
//! - Shift+Tab from a grid enters the previous grid of the same tab that has
//!   rows at its last cell, otherwise returns to the tab bar.
//! - Shift+Tab from the tab bar enters the last grid with rows, searching the
//!   active tab and then earlier tabs for at most one full cycle.
//! - Left/Right on the tab bar cycle tabs without entering a grid.
//!
//! Grids with zero rows are never given focus.

pub mod helpers;

use tracing::debug;

use crate::error::GridResult;
use crate::grid::{Grid, NavOutcome, PopulateReport};
use crate::types::{Direction, ExitDirection};

/// One tab of a tabbed container and the grids shown on it
#[derive(Debug, Clone)]
pub struct TabPage {
    pub title: String,
    pub grids: Vec<Grid>,
}

impl TabPage {
    pub fn new(title: impl Into<String>, grids: Vec<Grid>) -> Self {
        Self {
            title: title.into(),
            grids,
        }
    }

    /// Whether any grid on this tab can take focus
    pub fn has_navigable_grid(&self) -> bool {
        self.grids.iter().any(Grid::is_navigable)
    }
}

/// Whichever widget currently holds keyboard focus within a group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusOwner {
    /// The tab bar of the active tab
    TabBar,
    /// A cell of `grids[grid]` on tab `tab`
    Grid { tab: usize, grid: usize },
}

/// Result of offering a key event to the group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainOutcome {
    /// Focus moved inside the current grid
    MovedInGrid,
    /// Focus entered a (possibly different) grid
    EnteredGrid { tab: usize, grid: usize },
    /// Focus is on the tab bar of `tab`
    OnTabBar { tab: usize },
    /// The event was absorbed without any change
    Unchanged,
}

/// Grids of one tabbed container, chained for keyboard focus
#[derive(Debug, Clone)]
pub struct GridGroup {
    container: String,
    tabs: Vec<TabPage>,
    active_tab: usize,
    owner: FocusOwner,
}

impl GridGroup {
    /// Bind tabs of grids to one tabbed container
    ///
    /// Focus starts on the tab bar of the first tab.
    pub fn register(container: impl Into<String>, tabs: Vec<TabPage>) -> Self {
        let mut tabs = tabs;
        for grid in tabs.iter_mut().flat_map(|t| t.grids.iter_mut()) {
            grid.clear_focus();
        }
        let group = Self {
            container: container.into(),
            tabs,
            active_tab: 0,
            owner: FocusOwner::TabBar,
        };
        debug!(
            "FOCUS: registered group '{}' with {} tabs",
            group.container,
            group.tabs.len()
        );
        group
    }

    /// A container with a single tab holding `grids`
    pub fn single(container: impl Into<String>, grids: Vec<Grid>) -> Self {
        let container = container.into();
        let tab = TabPage::new(container.clone(), grids);
        Self::register(container, vec![tab])
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    pub fn tabs(&self) -> &[TabPage] {
        &self.tabs
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    pub fn active_tab(&self) -> usize {
        self.active_tab
    }

    pub fn owner(&self) -> FocusOwner {
        self.owner
    }

    pub fn grid(&self, tab: usize, grid: usize) -> Option<&Grid> {
        self.tabs.get(tab).and_then(|t| t.grids.get(grid))
    }

    /// The grid that holds focus, if any
    pub fn focused_grid(&self) -> Option<&Grid> {
        match self.owner {
            FocusOwner::Grid { tab, grid } => self.grid(tab, grid),
            FocusOwner::TabBar => None,
        }
    }

    /// Text announced for the current focus owner
    pub fn announcement(&self) -> String {
        match self.owner {
            FocusOwner::TabBar => match self.tabs.get(self.active_tab) {
                Some(tab) => format!(
                    "{} tab, {} of {}",
                    tab.title,
                    self.active_tab + 1,
                    self.tabs.len()
                ),
                None => format!("{}, no tabs", self.container),
            },
            FocusOwner::Grid { .. } => self
                .focused_grid()
                .map(|g| g.current_description().to_string())
                .unwrap_or_default(),
        }
    }

    /// Arrow key entry point
    pub fn on_arrow(&mut self, direction: Direction) -> ChainOutcome {
        match self.owner {
            FocusOwner::TabBar => match direction {
                Direction::Left => self.cycle_tab(helpers::wrap_prev(self.active_tab, self.tabs.len())),
                Direction::Right => self.cycle_tab(helpers::wrap_next(self.active_tab, self.tabs.len())),
                Direction::Up | Direction::Down => ChainOutcome::Unchanged,
            },
            FocusOwner::Grid { tab, grid } => {
                let Some(target) = self.tabs.get_mut(tab).and_then(|t| t.grids.get_mut(grid)) else {
                    return self.park_on_tab_bar();
                };
                match target.on_arrow(direction) {
                    NavOutcome::Moved { .. } => ChainOutcome::MovedInGrid,
                    NavOutcome::Blocked | NavOutcome::Unfocused => ChainOutcome::Unchanged,
                }
            }
        }
    }

    /// Tab key entry point
    pub fn on_tab_forward(&mut self) -> ChainOutcome {
        match self.owner {
            FocusOwner::Grid { .. } => self.exit_grid(ExitDirection::Forward),
            FocusOwner::TabBar => {
                let tab = self.active_tab;
                match self.next_navigable_in_tab(tab, 0) {
                    Some(grid) => self.enter_grid(tab, grid, ExitDirection::Forward),
                    None => self.advance_to_next_tab_bar(),
                }
            }
        }
    }

    /// Shift+Tab entry point
    pub fn on_tab_backward(&mut self) -> ChainOutcome {
        match self.owner {
            FocusOwner::Grid { .. } => self.exit_grid(ExitDirection::Backward),
            FocusOwner::TabBar => self.enter_last_grid_backward(),
        }
    }

    /// Hand a grid's exit transition to the chain
    pub fn exit_grid(&mut self, direction: ExitDirection) -> ChainOutcome {
        let FocusOwner::Grid { tab, grid } = self.owner else {
            return ChainOutcome::Unchanged;
        };

        if let Some(g) = self.tabs.get_mut(tab).and_then(|t| t.grids.get_mut(grid)) {
            g.clear_focus();
        }

        match direction {
            ExitDirection::Forward => match self.grid(tab, grid + 1).filter(|g| g.is_navigable()) {
                Some(_) => self.enter_grid(tab, grid + 1, direction),
                None => self.advance_to_next_tab_bar(),
            },
            ExitDirection::Backward => match self.prev_navigable_in_tab(tab, grid) {
                Some(prev) => self.enter_grid(tab, prev, direction),
                None => self.park_on_tab_bar(),
            },
        }
    }

    /// Activate a tab directly and focus its tab bar
    pub fn select_tab(&mut self, tab: usize) -> ChainOutcome {
        if tab >= self.tabs.len() {
            return ChainOutcome::Unchanged;
        }
        self.release_grid_focus();
        self.active_tab = tab;
        self.park_on_tab_bar()
    }

    /// Replace the rows of one grid
    ///
    /// If the grid held focus and is now empty, focus parks on the tab bar;
    /// otherwise focus is clamped into the new bounds.
    pub fn replace_rows(&mut self, tab: usize, grid: usize, rows: Vec<Vec<String>>) -> Option<PopulateReport> {
        let previous = self.grid(tab, grid)?.focus().cell();
        let target = self.tabs.get_mut(tab)?.grids.get_mut(grid)?;
        let report = target.populate_rows(rows);

        if self.owner == (FocusOwner::Grid { tab, grid }) {
            let (row, col) = previous.unwrap_or((0, 0));
            let refocused = target.is_navigable()
                && target.set_focus(
                    row.min(target.row_count().saturating_sub(1)),
                    col.min(target.column_count().saturating_sub(1)),
                );
            if !refocused {
                self.park_on_tab_bar();
            }
        }
        Some(report)
    }

    /// Replace the header schema of one grid
    pub fn set_columns(&mut self, tab: usize, grid: usize, headers: Vec<String>) -> Option<GridResult<()>> {
        let target = self.tabs.get_mut(tab)?.grids.get_mut(grid)?;
        let result = target.set_columns(headers);
        if result.is_ok() && self.owner == (FocusOwner::Grid { tab, grid }) {
            self.park_on_tab_bar();
        }
        Some(result)
    }

    /// Number of grids currently holding a focused cell
    pub fn focused_grid_count(&self) -> usize {
        self.tabs
            .iter()
            .flat_map(|t| t.grids.iter())
            .filter(|g| g.has_focus())
            .count()
    }

    fn cycle_tab(&mut self, target: Option<usize>) -> ChainOutcome {
        match target {
            Some(tab) if tab != self.active_tab => {
                self.active_tab = tab;
                debug!("FOCUS: '{}' tab bar -> tab {}", self.container, tab);
                ChainOutcome::OnTabBar { tab }
            }
            _ => ChainOutcome::Unchanged,
        }
    }

    fn next_navigable_in_tab(&self, tab: usize, from: usize) -> Option<usize> {
        let grids = &self.tabs.get(tab)?.grids;
        (from..grids.len()).find(|&i| grids[i].is_navigable())
    }

    fn prev_navigable_in_tab(&self, tab: usize, before: usize) -> Option<usize> {
        let grids = &self.tabs.get(tab)?.grids;
        (0..before.min(grids.len())).rev().find(|&i| grids[i].is_navigable())
    }

    fn enter_grid(&mut self, tab: usize, grid: usize, direction: ExitDirection) -> ChainOutcome {
        let Some(target) = self.tabs.get_mut(tab).and_then(|t| t.grids.get_mut(grid)) else {
            return self.park_on_tab_bar();
        };
        let entered = match direction {
            ExitDirection::Forward => target.focus_first(),
            ExitDirection::Backward => target.focus_last(),
        };
        if !entered {
            return self.park_on_tab_bar();
        }

        self.active_tab = tab;
        self.owner = FocusOwner::Grid { tab, grid };
        debug!("FOCUS: '{}' entered grid {} of tab {}", self.container, grid, tab);
        ChainOutcome::EnteredGrid { tab, grid }
    }

    fn advance_to_next_tab_bar(&mut self) -> ChainOutcome {
        if let Some(next) = helpers::wrap_next(self.active_tab, self.tabs.len()) {
            self.active_tab = next;
        }
        self.park_on_tab_bar()
    }

    fn enter_last_grid_backward(&mut self) -> ChainOutcome {
        let found = helpers::ring_backward(self.active_tab, self.tabs.len()).find_map(|tab| {
            self.prev_navigable_in_tab(tab, self.tabs[tab].grids.len())
                .map(|grid| (tab, grid))
        });
        if let Some((tab, grid)) = found {
            return self.enter_grid(tab, grid, ExitDirection::Backward);
        }
        debug!("FOCUS: '{}' has no grid with rows, staying on tab bar", self.container);
        self.park_on_tab_bar()
    }

    fn release_grid_focus(&mut self) {
        if let FocusOwner::Grid { tab, grid } = self.owner {
            if let Some(g) = self.tabs.get_mut(tab).and_then(|t| t.grids.get_mut(grid)) {
                g.clear_focus();
            }
        }
    }

    fn park_on_tab_bar(&mut self) -> ChainOutcome {
        self.release_grid_focus();
        self.owner = FocusOwner::TabBar;
        debug!("FOCUS: '{}' parked on tab bar of tab {}", self.container, self.active_tab);
        ChainOutcome::OnTabBar {
            tab: self.active_tab,
        }
    }
}
