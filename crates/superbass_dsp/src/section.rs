//! Biquad Section
//!
//! Second-order recursive filter in direct form II: two state registers per
//! section, double-precision throughout so long cascades don't drift.

use biquad::Coefficients;

use crate::design;
use crate::sanitize::{flush_in_place, Sanitize};

/// One direct-form-II biquad with normalized coefficients (`a0 = 1`)
#[derive(Debug, Clone, Copy)]
pub struct BiquadSection {
    coeffs: Coefficients<f64>,
    z1: f64,
    z2: f64,
}

impl Default for BiquadSection {
    /// Identity section (passes input through unchanged)
    fn default() -> Self {
        Self::new(Coefficients {
            a1: 0.0,
            a2: 0.0,
            b0: 1.0,
            b1: 0.0,
            b2: 0.0,
        })
    }
}

impl BiquadSection {
    /// Create a section with zeroed state
    pub fn new(coeffs: Coefficients<f64>) -> Self {
        Self {
            coeffs,
            z1: 0.0,
            z2: 0.0,
        }
    }

    /// RBJ low-pass section
    pub fn lowpass(cutoff_hz: f64, q: f64, sample_rate: f64) -> Self {
        Self::new(design::lowpass(cutoff_hz, q, sample_rate))
    }

    /// RBJ high-pass section
    pub fn highpass(cutoff_hz: f64, q: f64, sample_rate: f64) -> Self {
        Self::new(design::highpass(cutoff_hz, q, sample_rate))
    }

    /// Take another section's coefficients, keeping our own state
    ///
    /// Cascades of identical stages are built this way so the trig only runs
    /// once and every stage is bit-identical.
    pub fn copy_coefficients_from(&mut self, other: &BiquadSection) {
        self.coeffs = other.coeffs;
    }

    pub fn coefficients(&self) -> &Coefficients<f64> {
        &self.coeffs
    }

    /// Current `(z1, z2)` state registers
    pub fn state(&self) -> (f64, f64) {
        (self.z1, self.z2)
    }

    /// Process one sample
    ///
    /// # Real-time Safety
    /// No allocations, O(1).
    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        let c = &self.coeffs;
        let w = input - c.a1 * self.z1 - c.a2 * self.z2;
        let output = c.b0 * w + c.b1 * self.z1 + c.b2 * self.z2;
        self.z2 = self.z1;
        self.z1 = w;
        output
    }

    /// Clear the delay registers
    pub fn reset(&mut self) {
        self.z1 = 0.0;
        self.z2 = 0.0;
    }

    /// Magnitude of the transfer function at `freq_hz`
    ///
    /// Evaluates |H(e^jω)| = |B(e^jω)| / |A(e^jω)| directly from the
    /// coefficients; no state involved.
    pub fn magnitude_at(&self, freq_hz: f64, sample_rate: f64) -> f64 {
        let c = &self.coeffs;
        let omega = std::f64::consts::TAU * freq_hz / sample_rate;
        let (sin1, cos1) = omega.sin_cos();
        let (sin2, cos2) = (2.0 * omega).sin_cos();

        let num_re = c.b0 + c.b1 * cos1 + c.b2 * cos2;
        let num_im = -(c.b1 * sin1 + c.b2 * sin2);
        let den_re = 1.0 + c.a1 * cos1 + c.a2 * cos2;
        let den_im = -(c.a1 * sin1 + c.a2 * sin2);

        (num_re.hypot(num_im)) / (den_re.hypot(den_im))
    }

    #[cfg(test)]
    pub(crate) fn set_state(&mut self, z1: f64, z2: f64) {
        self.z1 = z1;
        self.z2 = z2;
    }
}

impl Sanitize for BiquadSection {
    fn sanitize(&mut self) -> usize {
        usize::from(flush_in_place(&mut self.z1)) + usize::from(flush_in_place(&mut self.z2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_identity() {
        let mut section = BiquadSection::default();
        for x in [0.5, -0.25, 1.0, 0.0] {
            assert_eq!(section.process(x), x);
        }
    }

    #[test]
    fn test_difference_equation() {
        let coeffs = Coefficients {
            a1: -0.5,
            a2: 0.25,
            b0: 0.1,
            b1: 0.2,
            b2: 0.3,
        };
        let mut section = BiquadSection::new(coeffs);

        // x = [1, 0, 0]
        // w0 = 1                      y0 = 0.1
        // w1 = 0 + 0.5*1 = 0.5        y1 = 0.1*0.5 + 0.2*1 = 0.25
        // w2 = 0.5*0.5 - 0.25*1 = 0   y2 = 0 + 0.2*0.5 + 0.3*1 = 0.4
        assert!((section.process(1.0) - 0.1).abs() < 1e-15);
        assert!((section.process(0.0) - 0.25).abs() < 1e-15);
        assert!((section.process(0.0) - 0.4).abs() < 1e-15);
        assert_eq!(section.state(), (0.0, 0.5));
    }

    #[test]
    fn test_first_output_is_b0_times_input() {
        let mut section = BiquadSection::lowpass(100.0, 0.707, 44_100.0);
        let b0 = section.coefficients().b0;
        assert_eq!(section.process(0.5), 0.5 * b0);
    }

    #[test]
    fn test_copy_coefficients_keeps_state() {
        let source = BiquadSection::highpass(20.0, 0.707, 48_000.0);
        let mut target = BiquadSection::lowpass(100.0, 0.707, 48_000.0);
        target.process(1.0);
        let state_before = target.state();

        target.copy_coefficients_from(&source);

        assert_eq!(target.coefficients().b0, source.coefficients().b0);
        assert_eq!(target.coefficients().a2, source.coefficients().a2);
        assert_eq!(target.state(), state_before);
    }

    #[test]
    fn test_reset_clears_state() {
        let mut section = BiquadSection::lowpass(100.0, 0.707, 48_000.0);
        for _ in 0..10 {
            section.process(1.0);
        }
        assert_ne!(section.state(), (0.0, 0.0));

        section.reset();
        assert_eq!(section.state(), (0.0, 0.0));
    }

    #[test]
    fn test_sanitize_flushes_bad_registers() {
        let mut section = BiquadSection::lowpass(100.0, 0.707, 48_000.0);

        section.set_state(f64::NAN, 1e-20);
        assert_eq!(section.sanitize(), 2);
        assert_eq!(section.state(), (0.0, 0.0));

        section.set_state(f64::NEG_INFINITY, 0.3);
        assert_eq!(section.sanitize(), 1);
        assert_eq!(section.state(), (0.0, 0.3));

        // Clean state is left alone
        assert_eq!(section.sanitize(), 0);
        assert_eq!(section.state(), (0.0, 0.3));
    }

    #[test]
    fn test_nan_recovery_after_sanitize() {
        let mut section = BiquadSection::lowpass(100.0, 0.707, 48_000.0);
        assert!(section.process(f64::NAN).is_nan());
        assert!(section.process(0.0).is_nan(), "NaN persists in state");

        section.sanitize();
        assert_eq!(section.process(0.0), 0.0);
    }

    #[test]
    fn test_magnitude_response_shape() {
        let lp = BiquadSection::lowpass(1_000.0, std::f64::consts::FRAC_1_SQRT_2, 48_000.0);
        assert!((lp.magnitude_at(0.0, 48_000.0) - 1.0).abs() < 1e-9);
        // Butterworth is -3 dB at cutoff
        let at_cutoff = 20.0 * lp.magnitude_at(1_000.0, 48_000.0).log10();
        assert!((at_cutoff + 3.01).abs() < 0.05, "{} dB at cutoff", at_cutoff);

        let hp = BiquadSection::highpass(20.0, std::f64::consts::FRAC_1_SQRT_2, 48_000.0);
        assert!(hp.magnitude_at(0.0, 48_000.0) < 1e-9);
        assert!((hp.magnitude_at(1_000.0, 48_000.0) - 1.0).abs() < 1e-3);
    }
}
