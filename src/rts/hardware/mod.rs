use crate::error::HardwareError;
use crate::model::channel::{ChannelInfo, ChannelState};
use alsa::poll::pollfd;

mod alsa_card;
mod memory;

pub use alsa_card::{resolve_card, AlsaMixer};
pub use memory::MemoryMixer;

/// A mixer device the front end can drive
///
/// Channels are addressed by their position in [`channels()`](Self::channels),
/// which must not change while the backend is alive.
pub trait MixerBackend {
    /// Human readable name of the sound card
    fn card_name(&self) -> &str;
    /// Name of the mixer chip on the card
    fn chip_name(&self) -> &str;
    fn channels(&self) -> &[ChannelInfo];
    /// Read the current values of one channel
    fn read(&self, index: usize) -> Result<ChannelState, HardwareError>;
    /// Write new values to one channel.  The device may adjust them,
    /// so always [`read`](Self::read) back afterwards.
    fn write(&mut self, index: usize, state: &ChannelState) -> Result<(), HardwareError>;
    /// Drain pending change notifications without blocking.
    /// Returns `true` if any channel may have changed.
    fn poll_events(&mut self) -> Result<bool, HardwareError>;
    /// File descriptors that become readable when the device changes
    fn descriptors(&self) -> Result<Vec<pollfd>, HardwareError> {
        Ok(Vec::new())
    }
}
