//! Bass Filter Parameters
//!
//! One parameter set covers every cascade topology: stage counts, gain and
//! cutoffs are configuration, not separate code paths.

use std::fmt;

use biquad::Q_BUTTERWORTH_F64;
use tracing::warn;

use crate::design;

/// Upper bound on cascaded sections per stage group
pub const MAX_ORDER: usize = 8;

/// Upper bound on the linear boost (+24 dB)
pub const MAX_BOOST_GAIN: f64 = 16.0;

/// Parameters for one bass enhancement configuration
///
/// Fixed for the lifetime of a configuration; change them through
/// `FilterBank::configure` between blocks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BassParams {
    /// Cutoff of the low-pass group that isolates the bass band (Hz)
    pub lowpass_cutoff_hz: f64,
    /// Cutoff of the high-pass group that removes rumble from that band (Hz)
    pub highpass_floor_hz: f64,
    /// Number of cascaded low-pass sections
    pub lowpass_order: usize,
    /// Number of cascaded high-pass sections (0 disables the floor)
    pub highpass_order: usize,
    /// Linear gain applied to the filtered band before mixing
    pub boost_gain: f64,
    /// Q shared by every section
    pub quality_factor: f64,
    /// Linear gain applied to the input before filtering (headroom)
    pub input_trim: f64,
}

impl Default for BassParams {
    fn default() -> Self {
        Self::CLEAN
    }
}

impl BassParams {
    /// Default topology: 100 Hz, two low-pass stages, one 20 Hz floor, +6 dB
    pub const CLEAN: Self = Self {
        lowpass_cutoff_hz: 100.0,
        highpass_floor_hz: 20.0,
        lowpass_order: 2,
        highpass_order: 1,
        boost_gain: 2.0,
        quality_factor: Q_BUTTERWORTH_F64,
        input_trim: 0.5,
    };

    /// Set the boost from a dB value
    /// Formula: gain = 10^(dB/20)
    pub fn with_boost_db(mut self, boost_db: f64) -> Self {
        self.boost_gain = 10.0_f64.powf(boost_db / 20.0);
        self
    }

    /// Boost expressed in dB
    pub fn boost_db(&self) -> f64 {
        20.0 * self.boost_gain.log10()
    }

    /// Clamp every field to a usable value for `sample_rate`
    ///
    /// Never fails. Each adjustment is logged and pushed onto `report`.
    pub fn validated(&self, sample_rate: f64, report: &mut ConfigReport) -> Self {
        let mut params = *self;

        params.lowpass_cutoff_hz = report.check(
            "lowpass_cutoff_hz",
            self.lowpass_cutoff_hz,
            design::safe_cutoff(self.lowpass_cutoff_hz, sample_rate),
        );
        params.highpass_floor_hz = report.check(
            "highpass_floor_hz",
            self.highpass_floor_hz,
            design::safe_cutoff(self.highpass_floor_hz, sample_rate),
        );

        params.quality_factor = report.check(
            "quality_factor",
            self.quality_factor,
            design::safe_q(self.quality_factor),
        );

        params.lowpass_order = report.check_order("lowpass_order", self.lowpass_order);
        params.highpass_order = report.check_order("highpass_order", self.highpass_order);

        params.boost_gain = report.check(
            "boost_gain",
            self.boost_gain,
            clamp_gain(self.boost_gain, MAX_BOOST_GAIN, Self::CLEAN.boost_gain),
        );
        params.input_trim = report.check(
            "input_trim",
            self.input_trim,
            clamp_gain(self.input_trim, 1.0, Self::CLEAN.input_trim),
        );

        params
    }
}

/// Clamp a linear gain into `[0, max]`; NaN takes the default
fn clamp_gain(gain: f64, max: f64, default: f64) -> f64 {
    if gain.is_nan() {
        default
    } else {
        gain.clamp(0.0, max)
    }
}

/// A configuration value that had to be adjusted
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClampNotice {
    pub field: &'static str,
    pub requested: f64,
    pub applied: f64,
}

impl fmt::Display for ClampNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} clamped from {} to {}",
            self.field, self.requested, self.applied
        )
    }
}

/// Diagnostics produced by a (re)configuration
///
/// Clamping is never fatal; callers inspect this to surface the adjustments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigReport {
    pub notices: Vec<ClampNotice>,
}

impl ConfigReport {
    /// True when every requested value was used as given
    pub fn is_clean(&self) -> bool {
        self.notices.is_empty()
    }

    /// Whether `field` was adjusted
    pub fn clamped(&self, field: &str) -> bool {
        self.notices.iter().any(|n| n.field == field)
    }

    /// Record `applied` if it differs from `requested`, returning `applied`
    pub(crate) fn check(&mut self, field: &'static str, requested: f64, applied: f64) -> f64 {
        // NaN never equals itself, so a NaN request is always reported
        if requested != applied {
            warn!("{} clamped from {} to {}", field, requested, applied);
            self.notices.push(ClampNotice {
                field,
                requested,
                applied,
            });
        }
        applied
    }

    fn check_order(&mut self, field: &'static str, requested: usize) -> usize {
        let applied = requested.min(MAX_ORDER);
        self.check(field, requested as f64, applied as f64);
        applied
    }
}
