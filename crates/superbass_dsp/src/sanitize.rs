//! Filter State Sanitizer
//!
//! Recursive filters that run for hours can decay into subnormal state
//! (which stalls the FPU on many targets) or, after a degenerate input, hold
//! NaN/Inf forever because the state is carried from block to block.
//! The sanitizer flushes such registers back to exactly zero.

/// Registers smaller than this in magnitude are flushed to zero
pub const SUBNORMAL_THRESHOLD: f64 = 1e-15;

/// Something holding recursive filter state that can be cleaned up
pub trait Sanitize {
    /// Flush NaN, infinite and near-subnormal state to zero
    ///
    /// Returns the number of registers that were flushed.
    fn sanitize(&mut self) -> usize;
}

/// Flush a single state register
///
/// NaN, ±Inf and anything with magnitude below [`SUBNORMAL_THRESHOLD`]
/// become exactly `0.0`. Everything else passes through untouched.
#[inline]
pub fn flush_state(value: f64) -> f64 {
    if !value.is_finite() || value.abs() < SUBNORMAL_THRESHOLD {
        0.0
    } else {
        value
    }
}

/// Flush a register in place, reporting whether it changed
#[inline]
pub(crate) fn flush_in_place(register: &mut f64) -> bool {
    let flushed = flush_state(*register);
    // Exact zero is already clean; counting it would make every idle block noisy
    let changed = flushed.to_bits() != register.to_bits() && *register != 0.0;
    *register = flushed;
    changed
}

/// Convert a filter output to an output sample that is always finite
///
/// NaN maps to silence, anything outside the f32 range saturates.
#[inline]
pub fn finite_sample(value: f64) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(f64::from(f32::MIN), f64::from(f32::MAX)) as f32
    }
}
