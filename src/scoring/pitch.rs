//! Pitch-accuracy score: correlation of two F0 contours.

use ndarray::Array1;

use super::contour::PitchFrame;
use super::statistics::pearson;

/// Score how closely the attempt's pitch contour follows the reference's.
///
/// The contours are aligned by frame index and truncated to the shorter one;
/// only frames where both sides are voiced enter the correlation. The
/// Pearson coefficient maps linearly onto [0, 100], so anticorrelated or
/// undefined contours floor at zero rather than going negative.
pub fn score_contours(reference: &[PitchFrame], attempt: &[PitchFrame]) -> u8 {
    let shared = reference.len().min(attempt.len());
    if shared == 0 {
        return 0;
    }

    let mut reference_hz = Vec::with_capacity(shared);
    let mut attempt_hz = Vec::with_capacity(shared);
    for (ref_frame, attempt_frame) in reference[..shared].iter().zip(&attempt[..shared]) {
        if let (Some(r), Some(a)) = (ref_frame.frequency(), attempt_frame.frequency()) {
            reference_hz.push(r);
            attempt_hz.push(a);
        }
    }
    if reference_hz.is_empty() {
        return 0;
    }

    let reference_hz = Array1::from_vec(reference_hz);
    let attempt_hz = Array1::from_vec(attempt_hz);
    match pearson(&reference_hz, &attempt_hz) {
        Some(r) => correlation_to_score(r),
        None => 0,
    }
}

fn correlation_to_score(r: f64) -> u8 {
    (r * 100.0).clamp(0.0, 100.0) as u8
}
