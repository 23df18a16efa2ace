use crate::settings::AppSettings;
use clap::Parser;
use std::path::PathBuf;

/// Terminal mixer for ALSA sound cards
#[derive(Parser, Debug, Default)]
#[command(name = "almixer", version)]
pub struct Args {
    /// Sound card to open: an index, hw:N, or the card's id/name
    #[arg(short, long)]
    pub card: Option<String>,
    /// Mixer device name (defaults to hw:<card>)
    #[arg(short = 'D', long)]
    pub device: Option<String>,
    /// Toggle exact mode (raw device values instead of percent)
    #[arg(short, long)]
    pub exact: bool,
    /// Toggle colors
    #[arg(short = 'g', long)]
    pub no_color: bool,
    /// Drive a simulated card instead of real hardware
    #[arg(long)]
    pub dummy: bool,
    /// Settings file to use instead of the default one
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Lay the command line over the loaded settings
    pub fn merge(&self, mut app: AppSettings) -> AppSettings {
        if self.card.is_some() {
            app.card = self.card.clone();
            // an explicit card beats a device from the settings file
            app.device = None;
        }
        if self.device.is_some() {
            app.device = self.device.clone();
        }
        app.exact ^= self.exact;
        app.color ^= self.no_color;
        app
    }
}
