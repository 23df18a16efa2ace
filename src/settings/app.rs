use serde::{Deserialize, Serialize};

/// almixer application settings tree
///
/// These settings pick the device to open and the initial behaviour of
/// the front end.  Command line flags override them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Card to open: an index, `hw:N`, or the card's id/name
    pub card: Option<String>,
    /// Mixer device name, overrides `card`
    pub device: Option<String>,
    /// Start in exact mode (raw device values instead of percent)
    pub exact: bool,
    /// Use colors when the terminal supports them
    pub color: bool,
    /// How often to check the device for outside changes
    pub poll_interval_ms: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            card: None,
            device: None,
            exact: false,
            color: true,
            poll_interval_ms: 100,
        }
    }
}
