//! The mixer model: what is on screen and what the user asked for
//!
//! The model never talks to the device itself.  Key actions are folded
//! into it with [`MixerModel::update`], which records focus/view changes
//! and accumulates a pending [`Delta`] for the focused channel.  The
//! engine takes that delta, commits it to the hardware and feeds the
//! read-back values into the channel cache.

pub mod action;
pub mod channel;
pub mod delta;
pub mod keymap;
pub mod layout;

use action::{Action, Delta, View};
use channel::{ChannelInfo, ChannelState, Stereo, Volume};
use layout::Layout;

/// What the event loop should do after an action
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Clear the terminal and repaint everything
    Redraw,
    Quit,
    Interrupt,
}

/// Central model of the mixer front end.  Only ever make one of these.
#[derive(Debug)]
pub struct MixerModel {
    pub card_name: String,
    pub chip_name: String,

    channels: Vec<ChannelInfo>,
    states: Vec<ChannelState>,

    focus: usize,
    first_visible: usize,
    exact: bool,
    view: View,
    pending: Delta,

    layout: Layout,
}

impl MixerModel {
    pub fn new(card_name: String, chip_name: String, channels: Vec<ChannelInfo>, exact: bool) -> Self {
        let layout = Layout::compute(0, 0, channels.len());
        Self {
            card_name,
            chip_name,
            states: vec![ChannelState::default(); channels.len()],
            channels,
            focus: 0,
            first_visible: 0,
            exact,
            view: View::Playback,
            pending: Delta::default(),
            layout,
        }
    }

    pub fn update(&mut self, action: Action) -> Flow {
        match action {
            Action::Quit => return Flow::Quit,
            Action::Interrupt => return Flow::Interrupt,
            Action::Redraw => return Flow::Redraw,
            Action::ToggleExact => self.exact = !self.exact,
            Action::FocusNext => self.focus = self.focus.saturating_add(1),
            Action::FocusPrev => self.focus = self.focus.saturating_sub(1),
            Action::Volume { left, right } => {
                self.pending.left += left;
                self.pending.right += right;
            }
            Action::Balance => self.pending.balance = true,
            Action::ToggleMute(sides) => {
                self.view = View::Playback;
                self.pending.mute_left ^= sides.left();
                self.pending.mute_right ^= sides.right();
            }
            Action::ToggleRecord(sides) => {
                self.view = View::Record;
                self.pending.record_left ^= sides.left();
                self.pending.record_right ^= sides.right();
            }
            Action::RouteLeftToRight => {
                self.view = View::Record;
                self.pending.left_to_right ^= true;
            }
            Action::RouteRightToLeft => {
                self.view = View::Record;
                self.pending.right_to_left ^= true;
            }
            Action::ToggleRecordView => self.view = self.view.toggled(),
        }

        self.focus = self.focus.min(self.channels.len().saturating_sub(1));
        self.scroll_to_focus();
        Flow::Continue
    }

    /// Recompute geometry for a new terminal size
    pub fn resize(&mut self, width: u16, height: u16) {
        self.layout = Layout::compute(width, height, self.channels.len());
        self.first_visible = 0;
        self.scroll_to_focus();
    }

    pub fn scroll_to_focus(&mut self) {
        self.first_visible = self.layout.scroll_to(self.first_visible, self.focus);
    }

    /// Hand the pending change over for committing, leaving nothing pending
    pub fn take_delta(&mut self) -> Delta {
        std::mem::take(&mut self.pending)
    }

    pub fn set_state(&mut self, index: usize, state: ChannelState) {
        if let Some(s) = self.states.get_mut(index) {
            *s = state;
        }
    }

    pub fn channels(&self) -> &[ChannelInfo] {
        &self.channels
    }

    pub fn state(&self, index: usize) -> Option<&ChannelState> {
        self.states.get(index)
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn first_visible(&self) -> usize {
        self.first_visible
    }

    /// Indices of the channels currently on screen
    pub fn visible(&self) -> std::ops::Range<usize> {
        let end = (self.first_visible + self.layout.n_visible).min(self.channels.len());
        self.first_visible..end
    }

    pub fn exact(&self) -> bool {
        self.exact
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Raw volume and range for the side of the channel the view shows
    fn viewed(&self, index: usize) -> Option<(channel::Range, Stereo<Volume>)> {
        let info = self.channels.get(index)?;
        let state = self.states.get(index)?;
        match self.view {
            View::Record => Some((info.input.as_ref()?.range, state.input?.volume)),
            View::Playback => Some((info.output.as_ref()?.range, state.output?.volume)),
        }
    }

    /// Numbers printed below a bar: raw in exact mode, else percent
    pub fn display_values(&self, index: usize) -> Stereo<Volume> {
        match self.viewed(index) {
            Some((_, v)) if self.exact => v,
            Some((range, v)) => Stereo {
                left: range.to_percent(v.left),
                right: range.to_percent(v.right),
            },
            None => Stereo::both(0),
        }
    }

    /// Bar fill, always in percent so bars look alike in either mode
    pub fn bar_percent(&self, index: usize) -> Stereo<Volume> {
        match self.viewed(index) {
            Some((range, v)) => Stereo {
                left: range.to_percent(v.left),
                right: range.to_percent(v.right),
            },
            None => Stereo::both(0),
        }
    }
}
