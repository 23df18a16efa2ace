//! Translate terminal key presses into mixer actions

use crate::model::action::{Action, Sides};
use crate::model::channel::Volume;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Step for PageUp/PageDown in percent
const PAGE_STEP: Volume = 10;
/// Step for PageUp/PageDown in raw device units
const PAGE_STEP_EXACT: Volume = 8;
/// Home/End jump far enough to hit either end of any range
const FULL_STEP: Volume = 512;

fn both(v: Volume) -> Action {
    Action::Volume { left: v, right: v }
}

fn left(v: Volume) -> Action {
    Action::Volume { left: v, right: 0 }
}

fn right(v: Volume) -> Action {
    Action::Volume { left: 0, right: v }
}

/// Look up the action for a key event
///
/// `exact` selects the page step, since raw device units are usually
/// much coarser than percentages.
pub fn map_key(key: KeyEvent, exact: bool) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(Action::Interrupt),
            _ => None,
        };
    }

    let page = if exact { PAGE_STEP_EXACT } else { PAGE_STEP };

    let action = match key.code {
        KeyCode::Esc => Action::Quit,
        KeyCode::Tab => Action::ToggleExact,
        KeyCode::Right | KeyCode::Char('n') => Action::FocusNext,
        KeyCode::Left | KeyCode::Char('p') => Action::FocusPrev,
        KeyCode::PageUp => both(page),
        KeyCode::PageDown => both(-page),
        KeyCode::Home => both(FULL_STEP),
        KeyCode::End => both(-FULL_STEP),
        KeyCode::Up => both(2),
        KeyCode::Down => both(-2),
        KeyCode::Insert => Action::ToggleRecord(Sides::Left),
        KeyCode::Delete => Action::ToggleRecord(Sides::Right),
        KeyCode::Char(c) => match c {
            '+' => both(1),
            '-' => both(-1),
            'w' => both(2),
            'W' => both(1),
            'x' => both(-2),
            'X' => both(-1),
            'q' => left(2),
            'Q' => left(1),
            'y' | 'z' => left(-2),
            'Y' | 'Z' => left(-1),
            'e' => right(2),
            'E' => right(1),
            'c' => right(-2),
            'C' => right(-1),
            'm' | 'M' => Action::ToggleMute(Sides::Both),
            '<' | ',' => Action::ToggleMute(Sides::Left),
            '>' | '.' => Action::ToggleMute(Sides::Right),
            'b' | 'B' | '=' => Action::Balance,
            'r' | 'R' => Action::ToggleRecordView,
            'l' | 'L' => Action::Redraw,
            ' ' => Action::ToggleRecord(Sides::Both),
            ';' => Action::ToggleRecord(Sides::Left),
            '\'' => Action::ToggleRecord(Sides::Right),
            '1' => Action::RouteRightToLeft,
            '2' => Action::RouteLeftToRight,
            _ => return None,
        },
        _ => return None,
    };

    Some(action)
}
