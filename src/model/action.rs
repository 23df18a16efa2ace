use crate::model::channel::Volume;

/// Which side(s) of a stereo channel an action touches
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sides {
    Left,
    Right,
    Both,
}

impl Sides {
    pub fn left(self) -> bool {
        matches!(self, Sides::Left | Sides::Both)
    }

    pub fn right(self) -> bool {
        matches!(self, Sides::Right | Sides::Both)
    }
}

/// User requests, as produced by the keymap
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Leave the mixer
    Quit,
    /// Ctrl-C; treated like the interrupt signal
    Interrupt,
    /// Switch between raw device values and percentages
    ToggleExact,
    FocusNext,
    FocusPrev,
    /// Add to the volume of the focused channel
    Volume { left: Volume, right: Volume },
    /// Set both sides to their average
    Balance,
    ToggleMute(Sides),
    ToggleRecord(Sides),
    RouteLeftToRight,
    RouteRightToLeft,
    /// Switch between the playback and record view
    ToggleRecordView,
    /// Clear and repaint the whole screen
    Redraw,
}

/// Which direction volume changes and numbers refer to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Playback,
    Record,
}

impl View {
    pub fn toggled(self) -> Self {
        match self {
            View::Playback => View::Record,
            View::Record => View::Playback,
        }
    }
}

impl Default for View {
    fn default() -> Self {
        View::Playback
    }
}

/// A pending change to the focused channel
///
/// Actions accumulate here until the engine commits them to the device,
/// after which the delta is reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Delta {
    pub left: Volume,
    pub right: Volume,
    pub balance: bool,
    pub mute_left: bool,
    pub mute_right: bool,
    pub record_left: bool,
    pub record_right: bool,
    pub left_to_right: bool,
    pub right_to_left: bool,
}

impl Delta {
    pub fn is_empty(&self) -> bool {
        *self == Delta::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_delta_is_empty() {
        assert!(Delta::default().is_empty());
        let d = Delta {
            balance: true,
            ..Delta::default()
        };
        assert!(!d.is_empty());
    }

    #[test]
    fn sides() {
        assert!(Sides::Both.left() && Sides::Both.right());
        assert!(Sides::Left.left() && !Sides::Left.right());
        assert!(!Sides::Right.left() && Sides::Right.right());
    }
}
