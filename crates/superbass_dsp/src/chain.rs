//! Per-Channel Filter Chain
//!
//! Isolates the bass band with a cascade of low-pass sections, removes
//! infrasonic rumble from that band with a cascade of high-pass sections,
//! boosts it and adds it back onto the dry signal.
//!
//! ```text
//! x ──┬──▶ LP₁ ▶ … ▶ LPₙ ▶ HP₁ ▶ … ▶ HPₘ ▶ × boost ──┐
//!     │                                               ▼
//!     └──────────────────────────────────────────────▶ + ──▶ y
//! ```

use crate::design;
use crate::params::{BassParams, ConfigReport};
use crate::sanitize::Sanitize;
use crate::section::BiquadSection;

/// What a stage does in the cascade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageRole {
    Lowpass,
    Highpass,
}

/// A biquad section tagged with its role
#[derive(Debug, Clone, Copy)]
pub struct Stage {
    pub role: StageRole,
    pub section: BiquadSection,
}

/// Cascade of biquads for one channel plus the boost/dry mix
///
/// Stage count and order are fixed once built. Low-pass stages always come
/// before high-pass stages.
#[derive(Debug, Clone)]
pub struct ChannelFilterChain {
    stages: Vec<Stage>,
    boost_gain: f64,
}

impl ChannelFilterChain {
    /// Build a chain with zeroed state
    ///
    /// Only the first section of each group is designed; the rest copy its
    /// coefficients. Out-of-range params are clamped the same way
    /// `FilterBank::configure` clamps them.
    pub fn new(params: &BassParams, sample_rate: f64) -> Self {
        let sample_rate = design::safe_sample_rate(sample_rate);
        let params = params.validated(sample_rate, &mut ConfigReport::default());
        let mut stages = Vec::with_capacity(params.lowpass_order + params.highpass_order);

        let lowpass = BiquadSection::lowpass(
            params.lowpass_cutoff_hz,
            params.quality_factor,
            sample_rate,
        );
        push_group(&mut stages, StageRole::Lowpass, &lowpass, params.lowpass_order);

        let highpass = BiquadSection::highpass(
            params.highpass_floor_hz,
            params.quality_factor,
            sample_rate,
        );
        push_group(&mut stages, StageRole::Highpass, &highpass, params.highpass_order);

        Self {
            stages,
            boost_gain: params.boost_gain,
        }
    }

    /// Run only the filtered band (no boost, no dry signal)
    #[inline]
    pub fn filter(&mut self, input: f64) -> f64 {
        self.stages
            .iter_mut()
            .fold(input, |signal, stage| stage.section.process(signal))
    }

    /// Process one sample: boosted band plus the unattenuated input
    ///
    /// # Real-time Safety
    /// No allocations. O(number of stages).
    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        self.filter(input) * self.boost_gain + input
    }

    /// Clear every section's state, keeping coefficients
    pub fn reset(&mut self) {
        for stage in &mut self.stages {
            stage.section.reset();
        }
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn lowpass_order(&self) -> usize {
        self.count(StageRole::Lowpass)
    }

    pub fn highpass_order(&self) -> usize {
        self.count(StageRole::Highpass)
    }

    pub fn boost_gain(&self) -> f64 {
        self.boost_gain
    }

    fn count(&self, role: StageRole) -> usize {
        self.stages.iter().filter(|s| s.role == role).count()
    }
}

impl Sanitize for ChannelFilterChain {
    fn sanitize(&mut self) -> usize {
        self.stages
            .iter_mut()
            .map(|stage| stage.section.sanitize())
            .sum()
    }
}

fn push_group(stages: &mut Vec<Stage>, role: StageRole, template: &BiquadSection, order: usize) {
    for _ in 0..order {
        let mut section = BiquadSection::default();
        section.copy_coefficients_from(template);
        stages.push(Stage { role, section });
    }
}
