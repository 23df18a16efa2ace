use super::MixerBackend;
use crate::error::HardwareError;
use crate::model::channel::{
    ChannelInfo, ChannelState, InputInfo, InputState, OutputInfo, OutputState, Range, Route,
    Stereo,
};
use alsa::card::Iter as CardIter;
use alsa::mixer::{Mixer, Selem, SelemChannelId, SelemId};
use alsa::poll::{pollfd, Descriptors};
use alsa::Ctl;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, warn};

/// `hw:N` style card names, optionally with a device suffix
static HW_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^hw:(\d+)(,\d+)?$").unwrap());

/// Turn a user supplied card spec into a card index
///
/// Accepts a plain index, `hw:N`, or the card's id or name as shown in
/// `/proc/asound/cards`.
pub fn resolve_card(spec: &str) -> Result<i32, HardwareError> {
    let spec = spec.trim();
    if let Ok(index) = spec.parse::<i32>() {
        return Ok(index);
    }
    if let Some(caps) = HW_NAME.captures(spec) {
        if let Ok(index) = caps[1].parse::<i32>() {
            return Ok(index);
        }
    }

    for card in CardIter::new() {
        let card = card?;
        let index = card.get_index();
        let name = card.get_name().unwrap_or_default();
        let id = Ctl::from_card(&card, false)
            .and_then(|ctl| ctl.card_info().and_then(|i| i.get_id().map(str::to_owned)))
            .unwrap_or_default();
        debug!("card {}: id {:?}, name {:?}", index, id, name);
        if spec.eq_ignore_ascii_case(&id) || spec.eq_ignore_ascii_case(&name) {
            return Ok(index);
        }
    }

    Err(HardwareError::NoCard(spec.to_owned()))
}

/// ALSA simple mixer backend
///
/// Playback volume and switch make up a channel's output side, capture
/// volume and switch its input side.  The simple mixer API has no notion
/// of swapping capture sides, so routing is never offered.
pub struct AlsaMixer {
    mixer: Mixer,
    card_name: String,
    chip_name: String,
    ids: Vec<SelemId>,
    channels: Vec<ChannelInfo>,
}

impl AlsaMixer {
    pub fn open(device: &str) -> Result<Self, HardwareError> {
        let open_err = |source| HardwareError::Open {
            device: device.to_owned(),
            source,
        };

        let (card_name, chip_name) = match Ctl::new(device, false).and_then(|ctl| {
            let info = ctl.card_info()?;
            Ok((info.get_name()?.to_owned(), info.get_mixername()?.to_owned()))
        }) {
            Ok(names) => names,
            Err(e) => {
                // Plugin devices like "default" have no card behind them
                warn!("No card info for {}: {}", device, e);
                (device.to_owned(), String::new())
            }
        };

        let mixer = Mixer::new(device, false).map_err(open_err)?;

        let mut ids = Vec::new();
        let mut channels = Vec::new();
        for elem in mixer.iter() {
            let selem = match Selem::new(elem) {
                Some(s) => s,
                None => continue,
            };
            let id = selem.get_id();
            let name = id.get_name()?.to_owned();

            match Self::describe(&name, &selem) {
                Some(info) => {
                    debug!("{}: {:?}", name, info);
                    ids.push(SelemId::new(&name, id.get_index()));
                    channels.push(info);
                }
                // enumerated controls, nothing to draw a bar for
                None => debug!("Skipping mixer element {}", name),
            }
        }

        info!(
            "Opened mixer {} ({} / {}) with {} channels",
            device,
            card_name,
            chip_name,
            channels.len()
        );

        Ok(Self {
            mixer,
            card_name,
            chip_name,
            ids,
            channels,
        })
    }

    fn describe(name: &str, s: &Selem) -> Option<ChannelInfo> {
        let output = if s.has_playback_volume() || s.has_playback_switch() {
            let (min, max) = s.get_playback_volume_range();
            Some(OutputInfo {
                range: Range::new(min, max),
                has_volume: s.has_playback_volume(),
                has_mute: s.has_playback_switch(),
            })
        } else {
            None
        };

        let input = if s.has_capture_volume() || s.has_capture_switch() {
            let (min, max) = s.get_capture_volume_range();
            Some(InputInfo {
                range: Range::new(min, max),
                has_volume: s.has_capture_volume(),
                has_record: s.has_capture_switch(),
                has_route: false,
            })
        } else {
            None
        };

        if output.is_none() && input.is_none() {
            return None;
        }

        Some(ChannelInfo {
            name: name.to_owned(),
            output,
            input,
        })
    }

    fn selem(&self, index: usize) -> Result<Selem<'_>, HardwareError> {
        let id = self.ids.get(index).ok_or(HardwareError::NoChannel(index))?;
        self.mixer
            .find_selem(id)
            .ok_or(HardwareError::NoChannel(index))
    }
}

/// Read both sides of a channel; mono elements mirror left into right
fn get_stereo<T: Copy>(
    mono: bool,
    mut get: impl FnMut(SelemChannelId) -> alsa::Result<T>,
) -> alsa::Result<Stereo<T>> {
    let left = get(SelemChannelId::FrontLeft)?;
    let right = if mono {
        left
    } else {
        get(SelemChannelId::FrontRight)?
    };
    Ok(Stereo { left, right })
}

fn set_stereo<T: Copy>(
    mono: bool,
    value: Stereo<T>,
    mut set: impl FnMut(SelemChannelId, T) -> alsa::Result<()>,
) -> alsa::Result<()> {
    set(SelemChannelId::FrontLeft, value.left)?;
    if !mono {
        set(SelemChannelId::FrontRight, value.right)?;
    }
    Ok(())
}

impl MixerBackend for AlsaMixer {
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
        let info = self.channels.get(index).ok_or(HardwareError::NoChannel(index))?;
        let s = self.selem(index)?;

        let output = match &info.output {
            Some(o) => {
                let mono = s.is_playback_mono();
                Some(OutputState {
                    volume: if o.has_volume {
                        get_stereo(mono, |c| s.get_playback_volume(c))?
                    } else {
                        Stereo::both(o.range.min)
                    },
                    muted: if o.has_mute {
                        get_stereo(mono, |c| s.get_playback_switch(c).map(|v| v == 0))?
                    } else {
                        Stereo::both(false)
                    },
                })
            }
            None => None,
        };

        let input = match &info.input {
            Some(i) => {
                let mono = s.is_capture_mono();
                Some(InputState {
                    volume: if i.has_volume {
                        get_stereo(mono, |c| s.get_capture_volume(c))?
                    } else {
                        Stereo::both(i.range.min)
                    },
                    record: if i.has_record {
                        get_stereo(mono, |c| s.get_capture_switch(c).map(|v| v != 0))?
                    } else {
                        Stereo::both(false)
                    },
                    route: Route::default(),
                })
            }
            None => None,
        };

        Ok(ChannelState { output, input })
    }

    fn write(&mut self, index: usize, state: &ChannelState) -> Result<(), HardwareError> {
        let info = self.channels.get(index).ok_or(HardwareError::NoChannel(index))?;
        let s = self.selem(index)?;

        if let (Some(o), Some(v)) = (&info.output, &state.output) {
            let mono = s.is_playback_mono();
            if o.has_volume {
                set_stereo(mono, v.volume, |c, x| s.set_playback_volume(c, x))?;
            }
            if o.has_mute {
                let on = Stereo {
                    left: i32::from(!v.muted.left),
                    right: i32::from(!v.muted.right),
                };
                set_stereo(mono, on, |c, x| s.set_playback_switch(c, x))?;
            }
        }

        if let (Some(i), Some(v)) = (&info.input, &state.input) {
            let mono = s.is_capture_mono();
            if i.has_volume {
                set_stereo(mono, v.volume, |c, x| s.set_capture_volume(c, x))?;
            }
            if i.has_record {
                let on = Stereo {
                    left: i32::from(v.record.left),
                    right: i32::from(v.record.right),
                };
                set_stereo(mono, on, |c, x| s.set_capture_switch(c, x))?;
            }
        }

        Ok(())
    }

    fn poll_events(&mut self) -> Result<bool, HardwareError> {
        let mut fds = self.mixer.get()?;
        if alsa::poll::poll(&mut fds, 0)? == 0 {
            return Ok(false);
        }
        let handled = self.mixer.handle_events()?;
        debug!("Handled {} mixer events", handled);
        Ok(handled > 0)
    }

    fn descriptors(&self) -> Result<Vec<pollfd>, HardwareError> {
        Ok(self.mixer.get()?)
    }
}
