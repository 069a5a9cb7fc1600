//! Message Types for Thread Communication
//!
//! Commands flow from the control thread -> audio thread
//! Events flow from the audio thread -> control thread

use serde::{Deserialize, Serialize};

use crate::config::{FilterSettings, StreamConfig};

/// Commands sent from the control side to the engine
///
/// Applied only at block boundaries, never in the middle of a block.
#[derive(Debug, Clone)]
pub enum Command {
    /// Rebuild every channel's filters with new settings
    Configure(FilterSettings),

    /// Stream format changed (sample rate / channel count)
    UpdateStream(StreamConfig),

    /// Clear filter state, keep coefficients
    Reset,

    /// Pass audio through untouched
    SetBypass(bool),
}

/// Events sent from the engine back to the control side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Event {
    /// Filter bank built for a stream
    Opened(StreamConfig),

    /// Filter bank released
    Closed,

    /// Configuration applied; lists every clamped parameter
    Configured { notices: Vec<String> },

    /// Filter state cleared
    Reset,

    /// Bypass state changed
    BypassChanged(bool),

    /// Error occurred
    Error { message: String },
}

impl Event {
    /// Create an error event from any error type
    pub fn error<E: std::fmt::Display>(err: E) -> Self {
        Event::Error {
            message: err.to_string(),
        }
    }
}
