//! Biquad Coefficient Design
//!
//! Low-pass and high-pass sections from the RBJ (Robert Bristow-Johnson)
//! Audio EQ Cookbook. Every function here is pure: identical inputs give
//! bit-identical coefficients.
//!
//! Inputs are clamped rather than rejected so a bad parameter can never
//! produce an unstable section inside an audio callback.

use biquad::{Coefficients, Q_BUTTERWORTH_F64};

/// Lowest cutoff the designer will use (Hz)
pub const MIN_CUTOFF_HZ: f64 = 1.0;

/// Highest cutoff as a fraction of the sample rate (strictly below Nyquist)
pub const MAX_CUTOFF_RATIO: f64 = 0.49;

/// Q range accepted by the designer
pub const MIN_Q: f64 = 0.1;
pub const MAX_Q: f64 = 10.0;

/// Used in place of a sample rate that is not a positive finite number
pub const DEFAULT_SAMPLE_RATE: f64 = 48_000.0;

/// Replace an unusable sample rate; any positive finite rate is kept as is
pub fn safe_sample_rate(sample_rate: f64) -> f64 {
    if sample_rate.is_finite() && sample_rate > 0.0 {
        sample_rate
    } else {
        DEFAULT_SAMPLE_RATE
    }
}

/// Clamp a cutoff into `[MIN_CUTOFF_HZ, MAX_CUTOFF_RATIO * fs]`
///
/// At absurdly low sample rates the ceiling wins over the 1 Hz floor.
pub fn safe_cutoff(cutoff_hz: f64, sample_rate: f64) -> f64 {
    let ceiling = MAX_CUTOFF_RATIO * safe_sample_rate(sample_rate);
    if cutoff_hz.is_nan() || cutoff_hz <= 0.0 {
        MIN_CUTOFF_HZ.min(ceiling)
    } else {
        cutoff_hz.max(MIN_CUTOFF_HZ).min(ceiling)
    }
}

/// Clamp a quality factor; non-positive values fall back to Butterworth
pub fn safe_q(q: f64) -> f64 {
    if q.is_nan() || q <= 0.0 {
        Q_BUTTERWORTH_F64
    } else {
        q.clamp(MIN_Q, MAX_Q)
    }
}

/// Shared RBJ terms: (cos ω, α)
#[inline]
fn omega_terms(cutoff_hz: f64, q: f64, sample_rate: f64) -> (f64, f64) {
    let fs = safe_sample_rate(sample_rate);
    let f0 = safe_cutoff(cutoff_hz, fs);
    let omega = std::f64::consts::TAU * f0 / fs;
    let (sin_omega, cos_omega) = omega.sin_cos();
    (cos_omega, sin_omega / (2.0 * safe_q(q)))
}

/// Normalize raw RBJ terms by `a0`
#[inline]
fn normalize(b0: f64, b1: f64, b2: f64, a0: f64, a1: f64, a2: f64) -> Coefficients<f64> {
    Coefficients {
        a1: a1 / a0,
        a2: a2 / a0,
        b0: b0 / a0,
        b1: b1 / a0,
        b2: b2 / a0,
    }
}

/// Low-pass section coefficients
pub fn lowpass(cutoff_hz: f64, q: f64, sample_rate: f64) -> Coefficients<f64> {
    let (cos_omega, alpha) = omega_terms(cutoff_hz, q, sample_rate);
    let b1 = 1.0 - cos_omega;
    let b0 = b1 * 0.5;
    normalize(b0, b1, b0, 1.0 + alpha, -2.0 * cos_omega, 1.0 - alpha)
}

/// High-pass section coefficients
pub fn highpass(cutoff_hz: f64, q: f64, sample_rate: f64) -> Coefficients<f64> {
    let (cos_omega, alpha) = omega_terms(cutoff_hz, q, sample_rate);
    let b0 = (1.0 + cos_omega) * 0.5;
    let b1 = -(1.0 + cos_omega);
    normalize(b0, b1, b0, 1.0 + alpha, -2.0 * cos_omega, 1.0 - alpha)
}

#[cfg(test)]
mod tests {
    use super::*;
    use biquad::{ToHertz, Type};

    const TOLERANCE: f64 = 1e-12;

    fn assert_coeffs_close(ours: Coefficients<f64>, reference: Coefficients<f64>) {
        assert!((ours.b0 - reference.b0).abs() < TOLERANCE, "b0 {} vs {}", ours.b0, reference.b0);
        assert!((ours.b1 - reference.b1).abs() < TOLERANCE, "b1 {} vs {}", ours.b1, reference.b1);
        assert!((ours.b2 - reference.b2).abs() < TOLERANCE, "b2 {} vs {}", ours.b2, reference.b2);
        assert!((ours.a1 - reference.a1).abs() < TOLERANCE, "a1 {} vs {}", ours.a1, reference.a1);
        assert!((ours.a2 - reference.a2).abs() < TOLERANCE, "a2 {} vs {}", ours.a2, reference.a2);
    }

    #[test]
    fn test_lowpass_matches_cookbook_reference() {
        for (fc, fs) in [(100.0_f64, 44_100.0_f64), (80.0, 48_000.0), (1_000.0, 96_000.0)] {
            let reference = Coefficients::<f64>::from_params(
                Type::LowPass,
                fs.hz(),
                fc.hz(),
                Q_BUTTERWORTH_F64,
            )
            .unwrap();
            assert_coeffs_close(lowpass(fc, Q_BUTTERWORTH_F64, fs), reference);
        }
    }

    #[test]
    fn test_highpass_matches_cookbook_reference() {
        for (fc, fs) in [(20.0_f64, 44_100.0_f64), (35.0, 48_000.0)] {
            let reference = Coefficients::<f64>::from_params(
                Type::HighPass,
                fs.hz(),
                fc.hz(),
                Q_BUTTERWORTH_F64,
            )
            .unwrap();
            assert_coeffs_close(highpass(fc, Q_BUTTERWORTH_F64, fs), reference);
        }
    }

    #[test]
    fn test_lowpass_unity_gain_at_dc() {
        let c = lowpass(100.0, 0.707, 44_100.0);
        let dc_gain = (c.b0 + c.b1 + c.b2) / (1.0 + c.a1 + c.a2);
        assert!((dc_gain - 1.0).abs() < 1e-9, "DC gain {}", dc_gain);
    }

    #[test]
    fn test_highpass_blocks_dc() {
        let c = highpass(20.0, 0.707, 44_100.0);
        assert!((c.b0 + c.b1 + c.b2).abs() < 1e-12);
    }

    #[test]
    fn test_design_is_deterministic() {
        let a = lowpass(123.4, 0.707, 48_000.0);
        let b = lowpass(123.4, 0.707, 48_000.0);
        assert_eq!(a.b0.to_bits(), b.b0.to_bits());
        assert_eq!(a.a1.to_bits(), b.a1.to_bits());
        assert_eq!(a.a2.to_bits(), b.a2.to_bits());
    }

    #[test]
    fn test_cutoff_clamping() {
        assert_eq!(safe_cutoff(0.0, 48_000.0), MIN_CUTOFF_HZ);
        assert_eq!(safe_cutoff(-50.0, 48_000.0), MIN_CUTOFF_HZ);
        assert_eq!(safe_cutoff(f64::NAN, 48_000.0), MIN_CUTOFF_HZ);
        assert_eq!(safe_cutoff(24_000.0, 48_000.0), 0.49 * 48_000.0);
        assert_eq!(safe_cutoff(f64::INFINITY, 48_000.0), 0.49 * 48_000.0);
        assert_eq!(safe_cutoff(100.0, 48_000.0), 100.0);
    }

    #[test]
    fn test_sample_rate_and_q_clamping() {
        assert_eq!(safe_sample_rate(0.0), DEFAULT_SAMPLE_RATE);
        assert_eq!(safe_sample_rate(-44_100.0), DEFAULT_SAMPLE_RATE);
        assert_eq!(safe_sample_rate(f64::NAN), DEFAULT_SAMPLE_RATE);
        assert_eq!(safe_sample_rate(f64::INFINITY), DEFAULT_SAMPLE_RATE);
        assert_eq!(safe_sample_rate(f64::NEG_INFINITY), DEFAULT_SAMPLE_RATE);
        assert_eq!(safe_sample_rate(44_100.0), 44_100.0);
        // Low but valid rates are never rewritten
        assert_eq!(safe_sample_rate(4_000.0), 4_000.0);
        assert_eq!(safe_sample_rate(1.0), 1.0);

        assert_eq!(safe_q(0.0), Q_BUTTERWORTH_F64);
        assert_eq!(safe_q(-1.0), Q_BUTTERWORTH_F64);
        assert_eq!(safe_q(100.0), MAX_Q);
        assert_eq!(safe_q(0.707), 0.707);
    }

    #[test]
    fn test_low_sample_rate_keeps_requested_cutoff() {
        let fs = 4_000.0_f64;
        assert_eq!(safe_cutoff(100.0, fs), 100.0);

        let c = lowpass(100.0, Q_BUTTERWORTH_F64, fs);
        let reference =
            Coefficients::<f64>::from_params(Type::LowPass, fs.hz(), 100.0_f64.hz(), Q_BUTTERWORTH_F64)
                .unwrap();
        assert_coeffs_close(c, reference);
    }

    #[test]
    fn test_tiny_sample_rate_does_not_panic() {
        // Ceiling 0.49 Hz sits below the 1 Hz floor
        assert_eq!(safe_cutoff(100.0, 1.0), 0.49);
        assert_eq!(safe_cutoff(0.0, 1.0), 0.49);
        let c = lowpass(100.0, 0.707, 1.0);
        assert!(c.a2.abs() < 1.0 && c.a1.abs() < 1.0 + c.a2);
    }

    #[test]
    fn test_degenerate_inputs_give_stable_coefficients() {
        for fc in [0.0, -1.0, 22_049.999, 22_050.0, 1e9, f64::NAN] {
            for c in [lowpass(fc, 0.707, 44_100.0), highpass(fc, 0.0, 44_100.0)] {
                for v in [c.b0, c.b1, c.b2, c.a1, c.a2] {
                    assert!(v.is_finite());
                }
                // Stability triangle for a second-order denominator
                assert!(c.a2.abs() < 1.0, "a2 = {}", c.a2);
                assert!(c.a1.abs() < 1.0 + c.a2, "a1 = {}, a2 = {}", c.a1, c.a2);
            }
        }
    }
}
