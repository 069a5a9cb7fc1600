//! Bass Engine - Host Adapter
//!
//! Wraps a [`FilterBank`] in the lifecycle an audio host expects:
//!
//! ```text
//!   open(stream, settings) ──▶ process(block) … process(block) ──▶ close()
//!                                   ▲
//!      EngineHandle ──commands──────┘  (applied between blocks only)
//!      EngineHandle ◀──events───────── engine
//! ```
//!
//! The engine is owned by the audio thread. Control threads talk to it
//! through an [`EngineHandle`]; queued commands are drained at the start of
//! each `process` call, so reconfiguration never overlaps a block.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use superbass_dsp::{AudioProcessor, FilterBank, ProcessContext};
use tracing::{debug, info, warn};

use crate::config::{FilterSettings, StreamConfig};
use crate::error::{EngineError, EngineResult};
use crate::message::{Command, Event};

/// Maximum queued commands; further sends fail until a block is processed
pub const COMMAND_QUEUE_DEPTH: usize = 32;

/// Maximum unread events; newer events are dropped while the queue is full
pub const EVENT_QUEUE_DEPTH: usize = 64;

/// Control-side handle to a [`BassEngine`]
///
/// Cheap to clone; every clone feeds the same engine.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    command_sender: Sender<Command>,
    event_receiver: Receiver<Event>,
}

impl EngineHandle {
    /// Replace the filter settings (applied before the next block)
    pub fn configure(&self, settings: FilterSettings) -> EngineResult<()> {
        self.send_command(Command::Configure(settings))
    }

    /// Announce a new stream format (rebuilds the bank before the next block)
    pub fn update_stream(&self, stream: StreamConfig) -> EngineResult<()> {
        self.send_command(Command::UpdateStream(stream))
    }

    /// Clear filter state
    pub fn reset(&self) -> EngineResult<()> {
        self.send_command(Command::Reset)
    }

    /// Bypass all processing
    pub fn set_bypass(&self, bypassed: bool) -> EngineResult<()> {
        self.send_command(Command::SetBypass(bypassed))
    }

    /// Get next event (non-blocking)
    pub fn poll_event(&self) -> Option<Event> {
        self.event_receiver.try_recv().ok()
    }

    /// Queue a command for the engine without blocking
    ///
    /// Commands are only drained by `BassEngine::process`, so a closed or
    /// idle engine fills the queue; the caller gets `CommandQueueFull` then.
    fn send_command(&self, command: Command) -> EngineResult<()> {
        self.command_sender.try_send(command).map_err(|e| match e {
            TrySendError::Full(_) => EngineError::CommandQueueFull(COMMAND_QUEUE_DEPTH),
            TrySendError::Disconnected(_) => EngineError::ChannelSendError,
        })
    }
}

/// Audio-thread side of the bass enhancement filter
pub struct BassEngine {
    /// Handle template given out by `handle()`
    command_sender: Sender<Command>,
    command_receiver: Receiver<Command>,
    event_sender: Sender<Event>,
    event_receiver: Receiver<Event>,

    /// `None` until `open()` and after `close()`
    bank: Option<FilterBank>,
    stream: StreamConfig,
    settings: FilterSettings,
    bypassed: bool,
}

impl BassEngine {
    /// Create a closed engine with default settings
    pub fn new() -> Self {
        let (command_sender, command_receiver) = bounded::<Command>(COMMAND_QUEUE_DEPTH);
        let (event_sender, event_receiver) = bounded::<Event>(EVENT_QUEUE_DEPTH);

        Self {
            command_sender,
            command_receiver,
            event_sender,
            event_receiver,
            bank: None,
            stream: StreamConfig::default(),
            settings: FilterSettings::default(),
            bypassed: false,
        }
    }

    /// Control-side handle for commands and events
    pub fn handle(&self) -> EngineHandle {
        EngineHandle {
            command_sender: self.command_sender.clone(),
            event_receiver: self.event_receiver.clone(),
        }
    }

    /// Build the filter bank for a stream
    ///
    /// Re-opening an open engine rebuilds it from scratch.
    pub fn open(&mut self, stream: StreamConfig, settings: FilterSettings) {
        if let Err(e) = stream.validate() {
            warn!("Stream configuration will be clamped: {}", e);
        }

        self.stream = stream;
        self.settings = settings;
        let (bank, report) = FilterBank::with_report(
            f64::from(stream.sample_rate),
            usize::from(stream.channels),
            settings.into_params(),
        );
        self.bank = Some(bank);

        info!(
            "Bass engine opened: {} Hz, {} channel(s)",
            stream.sample_rate, stream.channels
        );
        self.emit(Event::Opened(stream));
        self.emit(Event::Configured {
            notices: report.notices.iter().map(ToString::to_string).collect(),
        });
    }

    /// Release the filter bank
    pub fn close(&mut self) {
        if self.bank.take().is_some() {
            info!("Bass engine closed");
            self.emit(Event::Closed);
        }
    }

    pub fn is_open(&self) -> bool {
        self.bank.is_some()
    }

    pub fn is_bypassed(&self) -> bool {
        self.bypassed
    }

    pub fn stream(&self) -> StreamConfig {
        self.stream
    }

    pub fn settings(&self) -> FilterSettings {
        self.settings
    }

    /// The live filter bank, if open
    pub fn bank(&self) -> Option<&FilterBank> {
        self.bank.as_ref()
    }

    /// Process one interleaved block in place
    ///
    /// Pending commands are applied first. Fails without touching the buffer
    /// when the engine is closed or the buffer doesn't match the stream.
    pub fn process(&mut self, buffer: &mut [f32]) -> EngineResult<()> {
        self.drain_commands();

        let bank = self.bank.as_mut().ok_or(EngineError::NotOpen)?;
        if self.bypassed {
            return Ok(());
        }

        let context = ProcessContext::new(bank.sample_rate(), bank.channel_count());
        bank.process(buffer, &context)?;
        Ok(())
    }

    /// Clear filter state immediately
    pub fn reset(&mut self) {
        if let Some(bank) = self.bank.as_mut() {
            bank.reset();
            self.emit(Event::Reset);
        }
    }

    /// Apply every queued command
    fn drain_commands(&mut self) {
        while let Ok(command) = self.command_receiver.try_recv() {
            debug!("Applying command: {:?}", command);
            match command {
                Command::Configure(settings) => {
                    self.settings = settings;
                    self.rebuild();
                }
                Command::UpdateStream(stream) => {
                    self.stream = stream;
                    self.rebuild();
                }
                Command::Reset => self.reset(),
                Command::SetBypass(bypassed) => {
                    if self.bypassed != bypassed {
                        self.bypassed = bypassed;
                        info!("Bypass {}", if bypassed { "enabled" } else { "disabled" });
                        self.emit(Event::BypassChanged(bypassed));
                    }
                }
            }
        }
    }

    /// Reconfigure an open bank from the current stream and settings
    fn rebuild(&mut self) {
        let Some(bank) = self.bank.as_mut() else {
            // Closed: nothing to rebuild until the next open()
            return;
        };
        let report = bank.configure(
            f64::from(self.stream.sample_rate),
            usize::from(self.stream.channels),
            self.settings.into_params(),
        );
        let notices = report.notices.iter().map(ToString::to_string).collect();
        self.emit(Event::Configured { notices });
    }

    fn emit(&self, event: Event) {
        // Never block the audio thread on a host that doesn't poll
        if let Err(TrySendError::Full(event)) = self.event_sender.try_send(event) {
            debug!("Event queue full, dropping {:?}", event);
        }
    }
}

impl Default for BassEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for BassEngine {
    fn drop(&mut self) {
        self.close();
    }
}
