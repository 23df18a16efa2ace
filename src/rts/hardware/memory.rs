use super::MixerBackend;
use crate::error::HardwareError;
use crate::model::channel::{
    ChannelInfo, ChannelState, InputInfo, InputState, OutputState, Range, Stereo,
};
use tracing::trace;

/// A mixer that only lives in memory
///
/// Used for `--dummy` runs without sound hardware, and by the tests.
/// Writes are clamped to each channel's range the way a driver would.
#[derive(Debug, Default)]
pub struct MemoryMixer {
    card_name: String,
    chip_name: String,
    channels: Vec<ChannelInfo>,
    states: Vec<ChannelState>,
    changed: bool,
    /// Number of writes seen so far
    #[cfg(test)]
    pub writes: usize,
}

fn line_in(range: Range) -> InputInfo {
    InputInfo {
        range,
        has_volume: true,
        has_record: true,
        has_route: true,
    }
}

impl MemoryMixer {
    pub fn new(card_name: &str, chip_name: &str) -> Self {
        Self {
            card_name: card_name.to_owned(),
            chip_name: chip_name.to_owned(),
            ..Self::default()
        }
    }

    /// Add a channel; its state starts at the bottom of every range
    pub fn add_channel(&mut self, info: ChannelInfo) -> &mut Self {
        let state = ChannelState {
            output: info.output.as_ref().map(|o| OutputState {
                volume: Stereo::both(o.range.min),
                muted: Stereo::both(false),
            }),
            input: info.input.as_ref().map(|i| InputState {
                volume: Stereo::both(i.range.min),
                ..InputState::default()
            }),
        };
        self.channels.push(info);
        self.states.push(state);
        self
    }

    /// A small card resembling an old ISA sound chip
    pub fn demo() -> Self {
        let mut m = Self::new("Dummy Sound Card", "Simulated Mixer");
        let r31 = Range::new(0, 31);
        let r15 = Range::new(0, 15);
        m.add_channel(ChannelInfo::playback("Master", r31, true))
            .add_channel(ChannelInfo::playback("Bass", r15, false))
            .add_channel(ChannelInfo::playback("Treble", r15, false))
            .add_channel(ChannelInfo::playback("Synth", r31, true).with_input(line_in(r31)))
            .add_channel(ChannelInfo::playback("PCM", r31, true))
            .add_channel(ChannelInfo::playback("Speaker", Range::new(0, 3), true))
            .add_channel(ChannelInfo::playback("Line", r31, true).with_input(line_in(r31)))
            .add_channel(ChannelInfo::playback("MIC", Range::new(0, 7), true).with_input(InputInfo {
                range: Range::new(0, 7),
                has_volume: false,
                has_record: true,
                has_route: false,
            }))
            .add_channel(ChannelInfo::playback("CD", r31, true).with_input(line_in(r31)))
            .add_channel(ChannelInfo {
                name: "IGain".into(),
                output: None,
                input: Some(InputInfo {
                    range: Range::new(0, 3),
                    has_volume: true,
                    has_record: false,
                    has_route: false,
                }),
            })
            .add_channel(ChannelInfo::playback("OGain", Range::new(0, 3), false));

        for (index, level) in [(0, 24), (1, 8), (2, 8), (4, 20), (6, 16), (8, 16)] {
            if let Some(out) = m.states[index].output.as_mut() {
                out.volume = Stereo::both(level);
            }
        }
        m
    }

    /// Change a channel behind the front end's back, as another program would
    #[cfg(test)]
    pub fn inject(&mut self, index: usize, state: ChannelState) {
        if let Some(s) = self.states.get_mut(index) {
            *s = state;
            self.changed = true;
        }
    }

    fn clamp(info: &ChannelInfo, mut state: ChannelState) -> ChannelState {
        if let (Some(o), Some(s)) = (&info.output, state.output.as_mut()) {
            s.volume.left = o.range.clamp(s.volume.left);
            s.volume.right = o.range.clamp(s.volume.right);
        }
        if let (Some(i), Some(s)) = (&info.input, state.input.as_mut()) {
            s.volume.left = i.range.clamp(s.volume.left);
            s.volume.right = i.range.clamp(s.volume.right);
        }
        // a direction the channel doesn't have can't hold values
        if info.output.is_none() {
            state.output = None;
        }
        if info.input.is_none() {
            state.input = None;
        }
        state
    }
}

impl MixerBackend for MemoryMixer {
    fn card_name(&self) -> &str {
        &self.card_name
    }

    fn chip_name(&self) -> &str {
        &self.chip_name
    }

    fn channels(&self) -> &[ChannelInfo] {
        &self.channels
    }

    fn read(&self, index: usize) -> Result<ChannelState, HardwareError> {
        self.states
            .get(index)
            .copied()
            .ok_or(HardwareError::NoChannel(index))
    }

    fn write(&mut self, index: usize, state: &ChannelState) -> Result<(), HardwareError> {
        let info = self.channels.get(index).ok_or(HardwareError::NoChannel(index))?;
        let state = Self::clamp(info, *state);
        trace!("write #{} {:?}", index, state);
        self.states[index] = state;
        #[cfg(test)]
        {
            self.writes += 1;
        }
        Ok(())
    }

    fn poll_events(&mut self) -> Result<bool, HardwareError> {
        Ok(std::mem::take(&mut self.changed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_card_has_channels() {
        let m = MemoryMixer::demo();
        assert_eq!(m.channels().len(), 11);
        assert_eq!(m.channels()[0].name, "Master");
        let master = m.read(0).unwrap().output.unwrap();
        assert_eq!(master.volume, Stereo::both(24));
        assert!(m.read(9).unwrap().output.is_none());
    }

    #[test]
    fn writes_are_clamped() {
        let mut m = MemoryMixer::demo();
        let mut s = m.read(0).unwrap();
        s.output.as_mut().unwrap().volume = Stereo { left: 99, right: -4 };
        s.input = Some(InputState::default());
        m.write(0, &s).unwrap();

        let back = m.read(0).unwrap();
        assert_eq!(back.output.unwrap().volume, Stereo { left: 31, right: 0 });
        assert_eq!(back.input, None);
        assert_eq!(m.writes, 1);
    }

    #[test]
    fn injected_changes_are_reported_once() {
        let mut m = MemoryMixer::demo();
        assert!(!m.poll_events().unwrap());
        m.inject(1, ChannelState::default());
        assert!(m.poll_events().unwrap());
        assert!(!m.poll_events().unwrap());
    }

    #[test]
    fn unknown_channel() {
        let mut m = MemoryMixer::new("a", "b");
        assert!(matches!(m.read(0), Err(HardwareError::NoChannel(0))));
        assert!(m.write(3, &ChannelState::default()).is_err());
    }
}
