//! Stability score: correlation of the two clips' loudness envelopes.

use ndarray::Array1;

use crate::types::AudioData;

use super::statistics::{min_max_normalize, pearson, resample_linear, rms_envelope};
use super::ScoringConfig;

/// Score how closely the attempt's loudness shape follows the reference's.
///
/// Each clip is reduced to a short-time RMS envelope and min-max normalized
/// on its own, so overall level differences do not matter. The attempt's
/// envelope is then linearly re-gridded onto the reference's time axis,
/// which absorbs duration mismatch, and the two are correlated.
pub(crate) fn score_waveforms(
    reference: &AudioData,
    attempt: &AudioData,
    config: &ScoringConfig,
) -> u8 {
    let reference_env = rms_envelope(&reference.samples, config.frame_length, config.hop_length);
    let attempt_env = rms_envelope(&attempt.samples, config.frame_length, config.hop_length);
    score_envelopes(&reference_env, &attempt_env, config)
}

fn score_envelopes(
    reference: &Array1<f64>,
    attempt: &Array1<f64>,
    config: &ScoringConfig,
) -> u8 {
    if reference.len() < config.min_envelope_frames || attempt.len() < config.min_envelope_frames {
        return 0;
    }
    let reference = min_max_normalize(reference);
    let attempt = min_max_normalize(attempt);
    let warped = resample_linear(&attempt, reference.len());
    match pearson(&reference, &warped) {
        Some(r) => boosted_score(r, config.stability_gain),
        None => 0,
    }
}

/// Square-root boost before scaling; negative correlation floors at zero
/// before the root.
fn boosted_score(r: f64, gain: f64) -> u8 {
    (r.max(0.0).sqrt() * gain).clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ScoringConfig {
        ScoringConfig::default()
    }

    fn envelope(values: &[f64]) -> Array1<f64> {
        Array1::from_vec(values.to_vec())
    }

    #[test]
    fn rescaled_copy_scores_full_marks() {
        let reference = envelope(&[0.1, 0.5, 0.9, 0.5, 0.1]);
        let attempt = reference.mapv(|v| v * 0.3);
        assert_eq!(score_envelopes(&reference, &attempt, &config()), 100);
    }

    #[test]
    fn too_few_frames_scores_zero() {
        let reference = envelope(&[0.1, 0.5, 0.9, 0.5]);
        let attempt = envelope(&[0.1, 0.5, 0.9, 0.5, 0.1]);
        assert_eq!(score_envelopes(&reference, &attempt, &config()), 0);
        assert_eq!(score_envelopes(&attempt, &reference, &config()), 0);
    }

    #[test]
    fn constant_envelope_has_no_shape_to_compare() {
        let reference = envelope(&[0.4; 8]);
        let attempt = envelope(&[0.1, 0.5, 0.9, 0.5, 0.1, 0.2, 0.3, 0.4]);
        assert_eq!(score_envelopes(&reference, &attempt, &config()), 0);
    }

    #[test]
    fn duration_mismatch_is_absorbed_by_the_time_warp() {
        // Same triangular shape, twice as many points on the attempt side.
        let reference = envelope(&[0.0, 0.25, 0.5, 0.75, 1.0, 0.75, 0.5, 0.25, 0.0]);
        let attempt = resample_linear(&reference, 17);
        let score = score_envelopes(&reference, &attempt, &config());
        assert!(score >= 99, "expected near-perfect score, got {score}");
    }

    #[test]
    fn inverted_envelope_floors_at_zero() {
        let reference = envelope(&[0.0, 0.25, 0.5, 0.75, 1.0]);
        let attempt = envelope(&[1.0, 0.75, 0.5, 0.25, 0.0]);
        assert_eq!(score_envelopes(&reference, &attempt, &config()), 0);
    }

    #[test]
    fn moderate_correlation_is_boosted_above_linear() {
        // r = 0.5 maps to sqrt(0.5) * 150 ≈ 106, clamped to 100; linear
        // mapping would have given 50.
        assert_eq!(boosted_score(0.5, 150.0), 100);
        assert_eq!(boosted_score(0.25, 150.0), 75);
        assert_eq!(boosted_score(0.0, 150.0), 0);
        assert_eq!(boosted_score(-0.8, 150.0), 0);
    }

    #[test]
    fn short_waveforms_score_zero_via_the_frame_floor() {
        let reference = AudioData::new(vec![0.5; 1024], 16_000);
        let attempt = AudioData::new(vec![0.5; 16_000], 16_000);
        assert_eq!(score_waveforms(&reference, &attempt, &config()), 0);
    }
}
