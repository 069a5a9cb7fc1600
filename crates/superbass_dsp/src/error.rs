//! DSP Error Types

use thiserror::Error;

/// Errors that can occur during DSP operations
///
/// Only buffer contract violations surface as errors. Invalid filter
/// parameters are clamped at configuration time instead (see `ConfigReport`).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DspError {
    #[error("Channel count mismatch: bank configured for {expected}, got {got}")]
    ChannelCountMismatch { expected: usize, got: usize },

    #[error("Buffer size mismatch: expected {expected} samples, got {got}")]
    BufferSizeMismatch { expected: usize, got: usize },

    #[error("Frame count overflow: {frames} frames x {channels} channels")]
    FrameCountOverflow { frames: usize, channels: usize },
}
