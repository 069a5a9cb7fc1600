//! Stream and Filter Configuration

use serde::{Deserialize, Serialize};
use superbass_dsp::BassParams;

/// Audio stream format negotiated by the host
///
/// Samples are always interleaved 32-bit float.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Sample rate in Hz (e.g., 44100, 48000, 96000)
    pub sample_rate: u32,

    /// Number of audio channels (1 = mono, 2 = stereo)
    pub channels: u16,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48000,
            channels: 2,
        }
    }
}

impl StreamConfig {
    /// Calculate bytes per frame (for buffer sizing)
    pub fn bytes_per_frame(&self) -> usize {
        // f32 samples * channels
        4 * self.channels as usize
    }

    /// Validate configuration
    ///
    /// The filter bank clamps whatever it is given; this only reports what
    /// will be clamped so the host can log it.
    pub fn validate(&self) -> Result<(), String> {
        if self.sample_rate == 0 {
            return Err(format!("Invalid sample rate: {}", self.sample_rate));
        }
        if self.channels == 0 {
            return Err(format!("Invalid channel count: {}", self.channels));
        }
        Ok(())
    }
}

/// User-facing filter settings
///
/// Every field has a default, so partial JSON such as `{"freq": 80}` is
/// accepted. `freq` is the integer host parameter name for the cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    #[serde(alias = "freq")]
    pub lowpass_cutoff_hz: f64,
    pub highpass_floor_hz: f64,
    pub lowpass_order: usize,
    pub highpass_order: usize,
    pub boost_gain: f64,
    pub quality_factor: f64,
    pub input_trim: f64,
}

impl Default for FilterSettings {
    fn default() -> Self {
        BassParams::default().into()
    }
}

impl FilterSettings {
    /// Settings for a named built-in preset
    pub fn from_preset(name: &str) -> Option<Self> {
        superbass_dsp::preset(name).map(Self::from)
    }

    pub fn into_params(self) -> BassParams {
        BassParams {
            lowpass_cutoff_hz: self.lowpass_cutoff_hz,
            highpass_floor_hz: self.highpass_floor_hz,
            lowpass_order: self.lowpass_order,
            highpass_order: self.highpass_order,
            boost_gain: self.boost_gain,
            quality_factor: self.quality_factor,
            input_trim: self.input_trim,
        }
    }
}

impl From<BassParams> for FilterSettings {
    fn from(params: BassParams) -> Self {
        Self {
            lowpass_cutoff_hz: params.lowpass_cutoff_hz,
            highpass_floor_hz: params.highpass_floor_hz,
            lowpass_order: params.lowpass_order,
            highpass_order: params.highpass_order,
            boost_gain: params.boost_gain,
            quality_factor: params.quality_factor,
            input_trim: params.input_trim,
        }
    }
}
