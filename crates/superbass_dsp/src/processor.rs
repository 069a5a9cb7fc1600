//! Audio Processor Trait
//!
//! The seam between the filter engine and whatever host drives it. A host
//! adapter only needs `process`/`reset`; it never sees chains or sections.

use crate::bank::FilterBank;
use crate::error::DspError;

/// Context passed to processors containing stream metadata
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessContext {
    pub sample_rate: f64,
    pub channels: usize,
}

impl ProcessContext {
    pub fn new(sample_rate: f64, channels: usize) -> Self {
        Self {
            sample_rate,
            channels,
        }
    }

    /// Whole frames contained in an interleaved buffer of `len` samples
    pub fn frames(&self, len: usize) -> usize {
        len / self.channels.max(1)
    }
}

/// Trait for in-place audio processors
///
/// # Real-time Safety Contract
///
/// Implementors MUST follow these rules in `process()`:
/// - NO heap allocations (no Vec::push, no Box::new, no String)
/// - NO syscalls (no file I/O, no network, no mutex locks)
/// - NO unbounded loops
/// - Constant or O(n) time complexity where n = buffer size
///
/// Violating these rules causes audio dropouts ("glitches").
pub trait AudioProcessor: Send {
    /// Process an interleaved buffer in-place
    ///
    /// Buffer format is interleaved: [c0, c1, ..., cN, c0, c1, ...]
    fn process(&mut self, buffer: &mut [f32], context: &ProcessContext) -> Result<(), DspError>;

    /// Reset internal state (delay lines, envelopes, etc.)
    fn reset(&mut self);

    /// Human-readable name for debugging/UI
    fn name(&self) -> &'static str;
}

impl AudioProcessor for FilterBank {
    fn process(&mut self, buffer: &mut [f32], context: &ProcessContext) -> Result<(), DspError> {
        self.process_block(buffer, context.frames(buffer.len()), context.channels)
    }

    fn reset(&mut self) {
        FilterBank::reset(self);
    }

    fn name(&self) -> &'static str {
        "Super Bass"
    }
}
