//! Multi-Channel Filter Bank
//!
//! Owns one [`ChannelFilterChain`] per channel and walks interleaved
//! buffers (`[f0c0, f0c1, …, f1c0, …]`) in place.
//!
//! # Real-time Safety
//!
//! All chains are built in [`FilterBank::configure`]. The processing path
//! never allocates, locks or blocks, and sanitizes filter state after every
//! block.

use tracing::{debug, info, warn};

use crate::chain::ChannelFilterChain;
use crate::design;
use crate::error::DspError;
use crate::params::{BassParams, ConfigReport};
use crate::sanitize::{finite_sample, Sanitize};

/// Bass enhancement filters for every channel of a stream
#[derive(Debug, Clone)]
pub struct FilterBank {
    chains: Vec<ChannelFilterChain>,
    params: BassParams,
    sample_rate: f64,
    flushed_registers: u64,
}

impl FilterBank {
    /// Create a configured bank; clamp diagnostics are only logged
    pub fn new(sample_rate: f64, channel_count: usize, params: BassParams) -> Self {
        Self::with_report(sample_rate, channel_count, params).0
    }

    /// Create a configured bank along with its clamp diagnostics
    pub fn with_report(
        sample_rate: f64,
        channel_count: usize,
        params: BassParams,
    ) -> (Self, ConfigReport) {
        let mut bank = Self {
            chains: Vec::new(),
            params,
            sample_rate,
            flushed_registers: 0,
        };
        let report = bank.configure(sample_rate, channel_count, params);
        (bank, report)
    }

    /// Rebuild every chain from scratch
    ///
    /// Invalid values are clamped, never rejected. Must not overlap with
    /// block processing; `&mut self` guarantees that within one thread.
    pub fn configure(
        &mut self,
        sample_rate: f64,
        channel_count: usize,
        params: BassParams,
    ) -> ConfigReport {
        let mut report = ConfigReport::default();

        let sample_rate = report.check("sample_rate", sample_rate, design::safe_sample_rate(sample_rate));
        let channel_count = if channel_count == 0 {
            report.check("channel_count", 0.0, 1.0);
            1
        } else {
            channel_count
        };
        let params = params.validated(sample_rate, &mut report);

        self.chains = (0..channel_count)
            .map(|_| ChannelFilterChain::new(&params, sample_rate))
            .collect();
        self.params = params;
        self.sample_rate = sample_rate;
        self.flushed_registers = 0;

        info!(
            "Filter bank configured: {} ch @ {} Hz, LP {}x{} Hz, HP {}x{} Hz, boost {:.2} dB",
            channel_count,
            sample_rate,
            params.lowpass_order,
            params.lowpass_cutoff_hz,
            params.highpass_order,
            params.highpass_floor_hz,
            params.boost_db(),
        );
        if !report.is_clean() {
            warn!("{} parameter(s) clamped during configuration", report.notices.len());
        }

        report
    }

    /// Process an interleaved block in place
    ///
    /// `buffer.len()` must equal `frame_count * channel_count` and
    /// `channel_count` must match the configured bank. On error the buffer is
    /// left untouched.
    ///
    /// # Real-time Safety
    /// No allocations. O(frames × channels × stages).
    pub fn process_block(
        &mut self,
        buffer: &mut [f32],
        frame_count: usize,
        channel_count: usize,
    ) -> Result<(), DspError> {
        if channel_count != self.chains.len() {
            return Err(DspError::ChannelCountMismatch {
                expected: self.chains.len(),
                got: channel_count,
            });
        }
        let expected = frame_count
            .checked_mul(channel_count)
            .ok_or(DspError::FrameCountOverflow {
                frames: frame_count,
                channels: channel_count,
            })?;
        if buffer.len() != expected {
            return Err(DspError::BufferSizeMismatch {
                expected,
                got: buffer.len(),
            });
        }

        self.run(buffer);
        Ok(())
    }

    /// Process an interleaved block, deriving the frame count from its length
    #[inline]
    pub fn process_interleaved(&mut self, buffer: &mut [f32]) -> Result<(), DspError> {
        let channels = self.chains.len();
        if buffer.len() % channels != 0 {
            return Err(DspError::BufferSizeMismatch {
                expected: buffer.len() - buffer.len() % channels,
                got: buffer.len(),
            });
        }
        self.run(buffer);
        Ok(())
    }

    /// Zero all filter state without touching coefficients
    pub fn reset(&mut self) {
        for chain in &mut self.chains {
            chain.reset();
        }
        debug!("Filter bank state reset");
    }

    pub fn channel_count(&self) -> usize {
        self.chains.len()
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Parameters in effect (after clamping)
    pub fn params(&self) -> &BassParams {
        &self.params
    }

    pub fn chain(&self, channel: usize) -> Option<&ChannelFilterChain> {
        self.chains.get(channel)
    }

    /// Registers flushed by the sanitizer since the last configure
    pub fn flushed_registers(&self) -> u64 {
        self.flushed_registers
    }

    /// Validated inner loop: trim, filter, write back, then sanitize
    #[inline]
    fn run(&mut self, buffer: &mut [f32]) {
        let trim = self.params.input_trim;
        for frame in buffer.chunks_exact_mut(self.chains.len()) {
            for (sample, chain) in frame.iter_mut().zip(self.chains.iter_mut()) {
                let input = f64::from(*sample) * trim;
                *sample = finite_sample(chain.process(input));
            }
        }
        self.sanitize();
    }
}

impl Sanitize for FilterBank {
    fn sanitize(&mut self) -> usize {
        let flushed: usize = self.chains.iter_mut().map(|c| c.sanitize()).sum();
        self.flushed_registers += flushed as u64;
        flushed
    }
}
