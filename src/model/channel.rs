pub type Volume = i64;

/// Volume bounds as reported by the device
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Range {
    pub min: Volume,
    pub max: Volume,
}

impl Range {
    pub fn new(min: Volume, max: Volume) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    fn span(&self) -> Volume {
        self.max - self.min
    }

    pub fn clamp(&self, v: Volume) -> Volume {
        v.clamp(self.min, self.max)
    }

    /// Map a raw device value onto 0..=100, rounding to nearest
    pub fn to_percent(&self, raw: Volume) -> Volume {
        let span = self.span();
        if span == 0 {
            return 0;
        }
        ((self.clamp(raw) - self.min) * 100 + span / 2) / span
    }

    /// Map a percentage back onto the device range, rounding to nearest
    pub fn from_percent(&self, percent: Volume) -> Volume {
        let percent = percent.clamp(0, 100);
        self.min + (percent * self.span() + 50) / 100
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stereo<T> {
    pub left: T,
    pub right: T,
}

impl<T: Copy> Stereo<T> {
    pub fn both(v: T) -> Self {
        Self { left: v, right: v }
    }
}

/// Playback side of a mixer channel
#[derive(Clone, Debug, PartialEq)]
pub struct OutputInfo {
    pub range: Range,
    pub has_volume: bool,
    pub has_mute: bool,
}

/// Capture side of a mixer channel
#[derive(Clone, Debug, PartialEq)]
pub struct InputInfo {
    pub range: Range,
    pub has_volume: bool,
    /// Channel can be switched in and out of the recording source set
    pub has_record: bool,
    /// Channel supports swapping its capture sides
    pub has_route: bool,
}

/// Struct representing a mixer channel as enumerated from the device.
/// A channel is typically a stereo volume slider with a mute switch,
/// a capture switch, or both.
#[derive(Clone, Debug, PartialEq)]
pub struct ChannelInfo {
    pub name: String,
    pub output: Option<OutputInfo>,
    pub input: Option<InputInfo>,
}

impl ChannelInfo {
    pub fn playback(name: impl Into<String>, range: Range, has_mute: bool) -> Self {
        Self {
            name: name.into(),
            output: Some(OutputInfo {
                range,
                has_volume: true,
                has_mute,
            }),
            input: None,
        }
    }

    pub fn with_input(mut self, input: InputInfo) -> Self {
        self.input = Some(input);
        self
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OutputState {
    pub volume: Stereo<Volume>,
    pub muted: Stereo<bool>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Route {
    pub left_to_right: bool,
    pub right_to_left: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub volume: Stereo<Volume>,
    pub record: Stereo<bool>,
    pub route: Route,
}

impl InputState {
    pub fn is_recording(&self) -> bool {
        self.record.left || self.record.right
    }
}

/// Values read back from (or written to) one channel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChannelState {
    pub output: Option<OutputState>,
    pub input: Option<InputState>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_of_empty_range_is_zero() {
        let r = Range::new(5, 5);
        assert_eq!(r.to_percent(5), 0);
        assert_eq!(r.from_percent(80), 5);
    }

    #[test]
    fn percent_rounds_to_nearest() {
        let r = Range::new(0, 31);
        assert_eq!(r.to_percent(0), 0);
        assert_eq!(r.to_percent(15), 48);
        assert_eq!(r.to_percent(31), 100);
        assert_eq!(r.from_percent(48), 15);
    }

    #[test]
    fn small_ranges_keep_every_step() {
        for (min, max) in [(0, 31), (-10, 10), (0, 3), (0, 100)] {
            let r = Range::new(min, max);
            for raw in min..=max {
                assert_eq!(r.from_percent(r.to_percent(raw)), raw, "{}..{} @ {}", min, max, raw);
            }
        }
    }

    #[test]
    fn large_ranges_keep_every_percent() {
        for (min, max) in [(0, 255), (-6400, 0), (0, 65536)] {
            let r = Range::new(min, max);
            for p in 0..=100 {
                assert_eq!(r.to_percent(r.from_percent(p)), p, "{}..{} @ {}%", min, max, p);
            }
        }
    }

    #[test]
    fn range_is_normalised() {
        let r = Range::new(10, -2);
        assert_eq!(r, Range { min: -2, max: 10 });
        assert_eq!(r.clamp(42), 10);
        assert_eq!(r.clamp(-42), -2);
    }
}
