//! Comparator pipeline scoring a sung attempt against a reference clip.
//!
//! Both clips are silence-trimmed, then scored along two independent axes:
//! pitch accuracy (correlation of the fundamental-frequency contours) and
//! stability (correlation of the time-warped RMS energy envelopes). Each
//! axis yields an integer in [0, 100]; the total is their plain sum. Every
//! evaluation is a pure, one-shot computation with no cross-call state, and
//! degenerate input (silent, empty, or unvoiced clips) floors the affected
//! score at zero instead of failing.

pub mod contour;
mod pitch;
mod preprocess;
mod stability;
mod statistics;

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::types::AudioData;

pub use contour::PitchFrame;
pub use pitch::score_contours;

/// Convenient alias for results returned by scoring modules.
pub type Result<T> = std::result::Result<T, ScoringError>;

/// Lightweight error type for the scoring pipeline.
#[derive(Debug, Clone)]
pub struct ScoringError {
    message: Arc<str>,
}

impl ScoringError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Arc::from(message.into()),
        }
    }
}

impl Display for ScoringError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for ScoringError {}

/// Policy constants for the comparator. These are tuning knobs, not derived
/// invariants; change them here rather than inside the algorithms.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    /// Leading/trailing frames quieter than this (dB below the clip's peak
    /// RMS) are trimmed before any comparison.
    pub trim_threshold_db: f64,
    /// Lower bound of the F0 search range, musical C2.
    pub min_freq_hz: f64,
    /// Upper bound of the F0 search range, musical C7.
    pub max_freq_hz: f64,
    /// Analysis window length in samples, shared by trim, pitch estimation,
    /// and the energy envelope.
    pub frame_length: usize,
    /// Analysis hop length in samples.
    pub hop_length: usize,
    /// Envelopes shorter than this are too short to compare by shape.
    pub min_envelope_frames: usize,
    /// Gain applied to the square-root-boosted envelope correlation before
    /// clamping to 100.
    pub stability_gain: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            trim_threshold_db: 25.0,
            min_freq_hz: 65.41,
            max_freq_hz: 2093.0,
            frame_length: 2048,
            hop_length: 512,
            min_envelope_frames: 5,
            stability_gain: 150.0,
        }
    }
}

/// The two sub-scores of one evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SegmentScores {
    pub pitch: u8,
    pub stability: u8,
}

impl SegmentScores {
    /// Sum of both axes, range [0, 200]. Deliberately unclamped: the axes
    /// are independent assessments, not halves of a percentage.
    pub fn total(&self) -> u16 {
        self.pitch as u16 + self.stability as u16
    }
}

/// Caller-facing result payload for one evaluated segment.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    pub song: String,
    pub segment: String,
    pub pitch: u8,
    pub stability: u8,
    pub total: u16,
}

impl ScoreReport {
    pub fn new(song: impl Into<String>, segment: impl Into<String>, scores: SegmentScores) -> Self {
        Self {
            song: song.into(),
            segment: segment.into(),
            pitch: scores.pitch,
            stability: scores.stability,
            total: scores.total(),
        }
    }
}

/// Runs the full comparison pipeline over a reference clip and an attempt.
#[derive(Debug, Default)]
pub struct Evaluator {
    config: ScoringConfig,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score `attempt` against `reference`. Both clips must be mono and at
    /// the same analysis sample rate; empty clips are fine and score zero.
    pub fn evaluate(&self, reference: &AudioData, attempt: &AudioData) -> Result<SegmentScores> {
        let cfg = &self.config;
        let reference = preprocess::trim_silence(reference, cfg);
        let attempt = preprocess::trim_silence(attempt, cfg);
        debug!(
            reference_secs = reference.duration_seconds(),
            attempt_secs = attempt.duration_seconds(),
            "clips trimmed"
        );

        let reference_contour = contour::extract_contour(&reference, cfg)?;
        let attempt_contour = contour::extract_contour(&attempt, cfg)?;
        let pitch = pitch::score_contours(&reference_contour, &attempt_contour);

        let stability = stability::score_waveforms(&reference, &attempt, cfg);

        let scores = SegmentScores { pitch, stability };
        info!(
            pitch = scores.pitch,
            stability = scores.stability,
            total = scores.total(),
            "segment evaluated"
        );
        Ok(scores)
    }
}
