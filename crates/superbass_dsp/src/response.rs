//! Frequency Response Analysis
//!
//! Measures a chain's magnitude response by driving it with a unit impulse
//! and taking the FFT of the impulse response. Useful for plotting the
//! enhancement curve and for checking cascade slopes.
//!
//! Allocates; keep it out of the audio callback.

use rustfft::{num_complex::Complex, FftPlanner};

use crate::chain::ChannelFilterChain;
use crate::design;
use crate::params::BassParams;

/// Smallest FFT size accepted (rounded up to a power of two otherwise)
pub const MIN_FFT_SIZE: usize = 256;

/// Which signal to measure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Path {
    /// Filtered and boosted band only
    Wet,
    /// Full output: boosted band plus dry signal
    Output,
}

/// Linear magnitude per FFT bin from DC up to Nyquist
#[derive(Debug, Clone)]
pub struct FrequencyResponse {
    magnitudes: Vec<f64>,
    sample_rate: f64,
    fft_size: usize,
}

impl FrequencyResponse {
    /// Measure the response of a freshly built chain
    ///
    /// Params and sample rate are clamped as in `FilterBank::configure`.
    pub fn measure(params: &BassParams, sample_rate: f64, fft_size: usize, path: Path) -> Self {
        let sample_rate = design::safe_sample_rate(sample_rate);
        let fft_size = fft_size.max(MIN_FFT_SIZE).next_power_of_two();
        let mut chain = ChannelFilterChain::new(params, sample_rate);

        let mut buffer: Vec<Complex<f64>> = (0..fft_size)
            .map(|n| {
                let x = if n == 0 { 1.0 } else { 0.0 };
                let y = match path {
                    Path::Wet => chain.filter(x) * chain.boost_gain(),
                    Path::Output => chain.process(x),
                };
                Complex::new(y, 0.0)
            })
            .collect();

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(fft_size);
        fft.process(&mut buffer);

        let magnitudes = buffer[..=fft_size / 2].iter().map(|c| c.norm()).collect();

        Self {
            magnitudes,
            sample_rate,
            fft_size,
        }
    }

    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Bin spacing in Hz
    pub fn resolution(&self) -> f64 {
        self.sample_rate / self.fft_size as f64
    }

    /// Magnitudes from DC (bin 0) to Nyquist (last bin)
    pub fn magnitudes(&self) -> &[f64] {
        &self.magnitudes
    }

    /// Linear magnitude at the bin nearest to `freq_hz`
    pub fn magnitude_at(&self, freq_hz: f64) -> f64 {
        let bin = (freq_hz / self.resolution()).round().max(0.0) as usize;
        self.magnitudes[bin.min(self.magnitudes.len() - 1)]
    }

    /// Magnitude in dB at the bin nearest to `freq_hz`
    pub fn magnitude_db_at(&self, freq_hz: f64) -> f64 {
        20.0 * self.magnitude_at(freq_hz).max(f64::MIN_POSITIVE).log10()
    }

    /// Change in dB from `freq_hz` to one octave above it
    pub fn slope_db_per_octave(&self, freq_hz: f64) -> f64 {
        self.magnitude_db_at(2.0 * freq_hz) - self.magnitude_db_at(freq_hz)
    }
}
