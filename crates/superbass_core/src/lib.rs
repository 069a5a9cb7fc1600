//! Superbass Core - Host Adapter
//!
//! This crate connects the bass filter engine to an audio host:
//! - Stream format and user-facing filter settings (serde)
//! - Open / process / close lifecycle around a `FilterBank`
//! - Lock-free command queue from control threads, applied between blocks
//! - Event channel reporting lifecycle changes and clamped parameters
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Control Thread                          │
//! │     EngineHandle ──commands──▶ ◀──events── EngineHandle     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │ crossbeam-channel
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Audio Thread                           │
//! │   BassEngine::process ──▶ FilterBank (per-channel chains)   │
//! │              (Zero allocation in this path)                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod engine;
mod error;
mod message;

pub use config::{FilterSettings, StreamConfig};
pub use engine::{BassEngine, EngineHandle, COMMAND_QUEUE_DEPTH, EVENT_QUEUE_DEPTH};
pub use error::{EngineError, EngineResult};
pub use message::{Command, Event};

// Re-export DSP types for convenience
pub use superbass_dsp::{BassParams, ConfigReport, FilterBank, PRESETS};
