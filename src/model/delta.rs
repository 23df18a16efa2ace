//! Apply a pending [`Delta`] to a channel state read from the device

use crate::model::action::{Delta, View};
use crate::model::channel::{ChannelInfo, ChannelState, Range, Stereo, Volume};

/// Step a single raw value by `delta`, clamped to `range`
///
/// In exact mode the delta is in raw device units. Otherwise it is in
/// percent; a non-zero percent step that rounds back to the same raw
/// value still moves one raw unit so small ranges never get stuck.
fn step(range: Range, raw: Volume, delta: Volume, exact: bool) -> Volume {
    if delta == 0 {
        return raw;
    }
    if exact {
        return range.clamp(raw.saturating_add(delta));
    }

    let percent = (range.to_percent(raw) + delta).clamp(0, 100);
    let stepped = range.from_percent(percent);
    if stepped == raw {
        range.clamp(raw + delta.signum())
    } else {
        stepped
    }
}

fn adjust(range: Range, volume: &mut Stereo<Volume>, delta: &Delta, exact: bool) {
    volume.left = step(range, volume.left, delta.left, exact);
    volume.right = step(range, volume.right, delta.right, exact);
    if delta.balance {
        let avg = (volume.left + volume.right) / 2;
        *volume = Stereo::both(avg);
    }
}

/// Mutate `state` according to `delta`
///
/// Changes that the channel has no capability for are dropped silently.
pub fn apply(info: &ChannelInfo, state: &mut ChannelState, delta: &Delta, view: View, exact: bool) {
    match view {
        View::Record => {
            if let (Some(i), Some(s)) = (&info.input, state.input.as_mut()) {
                if i.has_volume {
                    adjust(i.range, &mut s.volume, delta, exact);
                }
            }
        }
        View::Playback => {
            if let (Some(o), Some(s)) = (&info.output, state.output.as_mut()) {
                if o.has_volume {
                    adjust(o.range, &mut s.volume, delta, exact);
                }
            }
        }
    }

    if let (Some(o), Some(s)) = (&info.output, state.output.as_mut()) {
        if o.has_mute {
            s.muted.left ^= delta.mute_left;
            s.muted.right ^= delta.mute_right;
        }
    }

    if let (Some(i), Some(s)) = (&info.input, state.input.as_mut()) {
        if i.has_record {
            s.record.left ^= delta.record_left;
            s.record.right ^= delta.record_right;
        }
        if i.has_route {
            s.route.left_to_right ^= delta.left_to_right;
            s.route.right_to_left ^= delta.right_to_left;
        }
    }
}
