//! Superbass DSP - Bass Enhancement Filter Engine
//!
//! This crate provides the real-time bass enhancement pipeline:
//! - RBJ cookbook low-pass / high-pass coefficient design
//! - Direct-form-II biquad sections with double-precision state
//! - Per-channel cascades: low-pass band, high-pass floor, boost, dry mix
//! - A multi-channel bank that walks interleaved buffers in place
//! - State sanitization (NaN/Inf/subnormal flush) after every block
//! - FFT-based frequency response measurement
//!
//! # Architecture
//!
//! The processing path follows a strict "no allocation in audio callback"
//! rule. Chains are built at configuration time; parameters are fixed until
//! the next `configure`.

mod bank;
mod chain;
pub mod design;
mod error;
mod params;
mod presets;
mod processor;
mod response;
mod sanitize;
mod section;

pub use bank::FilterBank;
pub use chain::{ChannelFilterChain, Stage, StageRole};
pub use error::DspError;
pub use params::{BassParams, ClampNotice, ConfigReport, MAX_BOOST_GAIN, MAX_ORDER};
pub use presets::{preset, Preset, PRESETS};
pub use processor::{AudioProcessor, ProcessContext};
pub use response::{FrequencyResponse, Path};
pub use sanitize::{finite_sample, flush_state, Sanitize, SUBNORMAL_THRESHOLD};
pub use section::BiquadSection;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crate_exports() {
        // Verify all public types are accessible
        let params = BassParams::default();
        let _bank = FilterBank::new(48000.0, 2, params);
        let _coeffs = design::lowpass(100.0, params.quality_factor, 48000.0);
    }
}
