//! Boundary to the external pitch-estimation capability.
//!
//! The pYIN estimator is consumed as a black box: mono samples, sample rate,
//! and a search range in; per-frame frequency estimates with voiced flags
//! out. This module only reshapes that output into a contour of
//! [`PitchFrame`] values so unreliable frames cannot leak into arithmetic
//! downstream.

use aus::analysis;

use crate::types::AudioData;

use super::{Result, ScoringConfig, ScoringError};

/// One analysis frame of the fundamental-frequency contour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PitchFrame {
    /// A reliable F0 estimate in Hz.
    Voiced(f64),
    /// No clear periodicity detected in this frame.
    Unvoiced,
}

impl PitchFrame {
    pub fn frequency(self) -> Option<f64> {
        match self {
            PitchFrame::Voiced(hz) => Some(hz),
            PitchFrame::Unvoiced => None,
        }
    }

    pub fn is_voiced(self) -> bool {
        matches!(self, PitchFrame::Voiced(_))
    }
}

/// Estimate the per-frame F0 contour of `audio` within the configured vocal
/// range. An empty clip yields an empty contour.
pub(crate) fn extract_contour(audio: &AudioData, config: &ScoringConfig) -> Result<Vec<PitchFrame>> {
    if audio.is_empty() {
        return Ok(Vec::new());
    }
    if audio.sample_rate == 0 {
        return Err(ScoringError::new(
            "cannot extract a pitch contour from audio with a zero sample rate",
        ));
    }

    let samples: Vec<f64> = audio.samples.iter().map(|&s| s as f64).collect();
    let (_timestamps, pitches, voiced_flags, _confidence) = analysis::pyin_pitch_estimator(
        &samples,
        audio.sample_rate,
        config.min_freq_hz,
        config.max_freq_hz,
        config.frame_length,
    );

    let contour = pitches
        .iter()
        .zip(voiced_flags.iter())
        .map(|(&hz, &voiced)| {
            if voiced && hz.is_finite() && hz > 0.0 {
                PitchFrame::Voiced(hz)
            } else {
                PitchFrame::Unvoiced
            }
        })
        .collect();
    Ok(contour)
}
