use crate::error::{Error, HardwareError};
use crate::model::action::Action;
use crate::model::{delta, keymap, layout, Flow, MixerModel};
use crate::rts::hardware::MixerBackend;
use crate::ui::{Dashboard, Theme, Tui};
use alsa::poll::{pollfd, Flags};
use crossterm::event::{self, Event};
use std::io::{self, ErrorKind};
use std::os::unix::io::AsRawFd;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, info, trace};

/// Drives the mixer: keys in, device writes out, dashboard redrawn
pub struct Engine<B: MixerBackend> {
    backend: B,
    model: MixerModel,
    theme: Theme,
    tick: Duration,
}

impl<B: MixerBackend> Engine<B> {
    pub fn new(backend: B, exact: bool, theme: Theme, tick: Duration) -> Result<Self, HardwareError> {
        let model = MixerModel::new(
            backend.card_name().to_owned(),
            backend.chip_name().to_owned(),
            backend.channels().to_vec(),
            exact,
        );

        let mut this = Self {
            backend,
            model,
            theme,
            tick,
        };
        this.refresh()?;
        Ok(this)
    }

    #[cfg(test)]
    pub fn model(&self) -> &MixerModel {
        &self.model
    }

    #[cfg(test)]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[cfg(test)]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Re-read every channel from the device
    pub fn refresh(&mut self) -> Result<(), HardwareError> {
        for index in 0..self.model.channels().len() {
            let state = self.backend.read(index)?;
            self.model.set_state(index, state);
        }
        Ok(())
    }

    /// Fold an action into the model and commit whatever it changed
    pub fn handle(&mut self, action: Action) -> Result<Flow, HardwareError> {
        trace!("action {:?}", action);
        let flow = self.model.update(action);
        self.commit()?;
        Ok(flow)
    }

    /// Apply the pending delta to the focused channel: read, modify,
    /// write, then read back what the device actually took
    fn commit(&mut self) -> Result<(), HardwareError> {
        let pending = self.model.take_delta();
        if pending.is_empty() {
            return Ok(());
        }

        let index = self.model.focus();
        let info = match self.model.channels().get(index) {
            Some(info) => info.clone(),
            None => return Ok(()),
        };

        let mut state = self.backend.read(index)?;
        delta::apply(&info, &mut state, &pending, self.model.view(), self.model.exact());
        self.backend.write(index, &state)?;

        let readback = self.backend.read(index)?;
        debug!("{}: {:?}", info.name, readback);
        self.model.set_state(index, readback);
        Ok(())
    }

    /// Drain device notifications, re-reading channels if anything moved
    pub fn sync_device(&mut self) -> Result<bool, HardwareError> {
        if self.backend.poll_events()? {
            self.refresh()?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Descriptors to sleep on: the device's, then the terminal's
    fn watch_list(&self) -> Result<Vec<pollfd>, HardwareError> {
        let mut fds = self.backend.descriptors()?;
        fds.push(pollfd {
            fd: io::stdin().as_raw_fd(),
            events: Flags::IN.bits(),
            revents: 0,
        });
        Ok(fds)
    }

    /// Sleep until a key arrives, the device changes or the tick runs out.
    /// Returns `true` when a terminal event is ready to be read.
    fn wait(&self) -> Result<bool, Error> {
        // crossterm may already hold parsed events
        if event::poll(Duration::ZERO)? {
            return Ok(true);
        }

        let mut fds = self.watch_list()?;
        let timeout = i32::try_from(self.tick.as_millis()).unwrap_or(i32::MAX);
        if let Err(e) = alsa::poll::poll(&mut fds, timeout) {
            if io::Error::from_raw_os_error(e.errno()).kind() != ErrorKind::Interrupted {
                return Err(HardwareError::from(e).into());
            }
        }
        Ok(event::poll(Duration::ZERO)?)
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        debug!("resize to {}x{}", width, height);
        self.model.resize(width, height);
    }

    /// Run the event loop until the user quits or a signal arrives
    pub fn run(&mut self, tui: &mut Tui, shutdown: &AtomicBool) -> Result<(), Error> {
        let size = tui.terminal().size()?;
        if size.width < layout::MIN_WIDTH || size.height < layout::MIN_HEIGHT {
            return Err(Error::WinSize(size.width, size.height));
        }
        self.resize(size.width, size.height);
        info!(
            "Showing {} of {} channels",
            self.model.layout().n_visible,
            self.model.channels().len()
        );

        loop {
            if shutdown.load(Ordering::SeqCst) {
                return Err(Error::Terminated);
            }

            let model = &self.model;
            let theme = self.theme;
            tui.terminal()
                .draw(|f| f.render_widget(Dashboard::new(model, theme), f.area()))?;

            if self.wait()? {
                match event::read()? {
                    Event::Key(key) => {
                        if let Some(action) = keymap::map_key(key, self.model.exact()) {
                            match self.handle(action)? {
                                Flow::Quit => return Ok(()),
                                Flow::Interrupt => return Err(Error::Signal("SIGINT")),
                                Flow::Redraw => tui.terminal().clear()?,
                                Flow::Continue => {}
                            }
                        }
                    }
                    Event::Resize(width, height) => self.resize(width, height),
                    _ => {}
                }
            }

            self.sync_device()?;
        }
    }
}
