use thiserror::Error;

/// Errors raised while talking to the mixer device
#[derive(Debug, Error)]
pub enum HardwareError {
    #[error("failed to open mixer {device}: {source}")]
    Open {
        device: String,
        #[source]
        source: alsa::Error,
    },
    #[error("function {} failed: {}", .0.func(), std::io::Error::from_raw_os_error(.0.errno()))]
    Function(#[from] alsa::Error),
    #[error("no such card: {0}")]
    NoCard(String),
    #[error("no such mixer channel: #{0}")]
    NoChannel(usize),
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("could not encode settings: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// Everything that ends the program early
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Hardware(#[from] HardwareError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("terminal i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not install signal handler: {0}")]
    SignalHandler(#[from] ctrlc::Error),
    #[error("aborting due to signal `{0}'")]
    Signal(&'static str),
    /// SIGINT, SIGTERM or SIGHUP caught by the handler; which one is unknown
    #[error("aborting due to a termination signal")]
    Terminated,
    #[error("screen size too small ({0}x{1})")]
    WinSize(u16, u16),
}

impl Error {
    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Hardware(HardwareError::Open { .. }) | Error::Hardware(HardwareError::NoCard(_)) => 1,
            Error::Hardware(_) | Error::Settings(_) | Error::Io(_) | Error::SignalHandler(_) => 2,
            Error::Signal(_) | Error::Terminated => 3,
            Error::WinSize(..) => 4,
        }
    }
}
