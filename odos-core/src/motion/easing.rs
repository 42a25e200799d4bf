//! Progress easing
//!
//! Every interpolated primitive goes through the same quadratic
//! ease-in-out so that live and replayed trajectories agree.

/// Clamp a raw progress fraction into [0, 1]
pub fn clamp_fraction(raw: f64) -> f64 {
    if raw.is_nan() {
        0.0
    } else {
        raw.clamp(0.0, 1.0)
    }
}

/// Quadratic ease-in-out of a raw fraction
///
/// `2p²` on the first half, `1 - 2(1 - p)²` on the second half. The input
/// is clamped first.
pub fn ease_in_out(raw: f64) -> f64 {
    let p = clamp_fraction(raw);
    if p < 0.5 {
        2.0 * p * p
    } else {
        let q = 1.0 - p;
        1.0 - 2.0 * q * q
    }
}

/// Raw progress of an elapsed time against a duration
pub fn time_fraction(elapsed_ms: f64, duration_ms: f64) -> f64 {
    if duration_ms <= 0.0 {
        return 1.0;
    }
    clamp_fraction(elapsed_ms / duration_ms)
}
