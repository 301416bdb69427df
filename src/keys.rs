/// Keyboard event to command mapping
///
/// Converts crossterm KeyEvents into the focus chain's entry points.
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::trace;

use crate::focus::{ChainOutcome, GridGroup};
use crate::types::Direction;

/// A key press the grid engine understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Arrow(Direction),
    TabForward,
    TabBackward,
    /// Jump to a tab by 0-based index
    SelectTab(usize),
    Quit,
}

/// Map a key event to a command, ignoring releases and unbound keys
pub fn key_to_command(key: KeyEvent) -> Option<KeyCommand> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let command = match key.code {
        KeyCode::Up => KeyCommand::Arrow(Direction::Up),
        KeyCode::Down => KeyCommand::Arrow(Direction::Down),
        KeyCode::Left => KeyCommand::Arrow(Direction::Left),
        KeyCode::Right => KeyCommand::Arrow(Direction::Right),
        KeyCode::BackTab => KeyCommand::TabBackward,
        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => KeyCommand::TabBackward,
        KeyCode::Tab => KeyCommand::TabForward,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyCommand::Quit,
        KeyCode::Char(c @ '1'..='9') if key.modifiers.contains(KeyModifiers::ALT) => {
            KeyCommand::SelectTab(c as usize - '1' as usize)
        }
        _ => return None,
    };
    trace!("KEY: {:?} -> {:?}", key.code, command);
    Some(command)
}

/// Offer a command to a grid group; `Quit` is left to the caller
pub fn dispatch(group: &mut GridGroup, command: KeyCommand) -> ChainOutcome {
    match command {
        KeyCommand::Arrow(direction) => group.on_arrow(direction),
        KeyCommand::TabForward => group.on_tab_forward(),
        KeyCommand::TabBackward => group.on_tab_backward(),
        KeyCommand::SelectTab(index) => group.select_tab(index),
        KeyCommand::Quit => ChainOutcome::Unchanged,
    }
}
