//! Engine Error Types

use thiserror::Error;

/// Errors that can occur in the bass engine adapter
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Engine is not open - call open() before processing")]
    NotOpen,

    #[error("DSP error: {0}")]
    DspError(#[from] superbass_dsp::DspError),

    #[error("Channel send error - receiver dropped")]
    ChannelSendError,

    #[error("Command queue full ({0} pending) - process a block to drain it")]
    CommandQueueFull(usize),
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
