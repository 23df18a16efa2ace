mod cli;
mod engine;
mod error;
mod log;
mod model;
mod rts;
mod settings;
mod ui;

use clap::Parser;
use cli::Args;
use engine::Engine;
use error::Error;
use rts::hardware::{resolve_card, AlsaMixer, MemoryMixer, MixerBackend};
use settings::{AppSettings, Settings};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::io;
use std::time::Duration;
use tracing::{info, warn};
use ui::{Theme, Tui};

/// Lower bound on the device poll tick
const MIN_TICK_MS: u64 = 10;

fn main() {
    let args = Args::parse();
    log::parse_log_level();

    if let Err(e) = run(&args) {
        log::oops(e.to_string(), e.exit_code());
    }

    info!("almixer exiting, goodbye");
}

fn load_settings(args: &Args) -> Result<AppSettings, Error> {
    if let Some(path) = &args.config {
        return Ok(Settings::init(path)?.app);
    }
    match settings::default_path().map(Settings::init) {
        Some(Ok(s)) => Ok(s.app),
        Some(Err(e)) => {
            warn!("Using default settings: {}", e);
            Ok(AppSettings::default())
        }
        None => Ok(AppSettings::default()),
    }
}

fn run(args: &Args) -> Result<(), Error> {
    let app = args.merge(load_settings(args)?);

    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&shutdown);
    ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))?;

    if args.dummy {
        return drive(MemoryMixer::demo(), &app, &shutdown);
    }

    let device = match (&app.device, &app.card) {
        (Some(device), _) => device.clone(),
        (None, Some(card)) => format!("hw:{}", resolve_card(card)?),
        (None, None) => "hw:0".to_owned(),
    };
    drive(AlsaMixer::open(&device)?, &app, &shutdown)
}

fn drive<B: MixerBackend>(backend: B, app: &AppSettings, shutdown: &AtomicBool) -> Result<(), Error> {
    let tick = Duration::from_millis(app.poll_interval_ms.max(MIN_TICK_MS));
    let mut engine = Engine::new(backend, app.exact, Theme::new(app.color), tick)?;

    let mut tui = Tui::start()?;
    let result = engine.run(&mut tui, shutdown);
    finish(result, tui.stop())
}

/// A failed terminal restore only matters when nothing else went wrong
fn finish(result: Result<(), Error>, restore: io::Result<()>) -> Result<(), Error> {
    match (result, restore) {
        (Err(e), Err(r)) => {
            warn!("Failed to restore terminal: {}", r);
            Err(e)
        }
        (Ok(()), Err(r)) => Err(r.into()),
        (result, Ok(())) => result,
    }
}
