//! Peak-relative silence trimming applied to both clips before comparison.

use crate::types::AudioData;

use super::statistics::rms_envelope;
use super::ScoringConfig;

/// Strip leading and trailing frames whose RMS energy sits more than
/// `trim_threshold_db` below the clip's peak RMS. Interior content is left
/// untouched. A fully silent or empty clip trims to empty; that is a valid
/// result, not an error.
pub(crate) fn trim_silence(audio: &AudioData, config: &ScoringConfig) -> AudioData {
    let envelope = rms_envelope(&audio.samples, config.frame_length, config.hop_length);
    let peak = envelope.iter().copied().fold(0.0_f64, f64::max);
    if peak <= 0.0 {
        return AudioData::new(Vec::new(), audio.sample_rate);
    }

    // 20*log10(rms/peak) > -threshold  <=>  rms > peak * 10^(-threshold/20)
    let cutoff = peak * 10.0_f64.powf(-config.trim_threshold_db / 20.0);
    let mut audible = envelope.iter().enumerate().filter(|(_, &rms)| rms > cutoff);
    let first = match audible.next() {
        Some((index, _)) => index,
        None => return AudioData::new(Vec::new(), audio.sample_rate),
    };
    let last = audible.last().map(|(index, _)| index).unwrap_or(first);

    let start = first * config.hop_length;
    let end = ((last + 1) * config.hop_length).min(audio.samples.len());
    AudioData::new(audio.samples[start..end].to_vec(), audio.sample_rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ScoringConfig {
        // Shorter analysis frames keep the test clips small.
        ScoringConfig {
            frame_length: 64,
            hop_length: 16,
            ..ScoringConfig::default()
        }
    }

    fn clip(samples: Vec<f32>) -> AudioData {
        AudioData::new(samples, 16_000)
    }

    #[test]
    fn trims_leading_and_trailing_silence() {
        let mut samples = vec![0.0_f32; 640];
        samples.extend(vec![0.8; 640]);
        samples.extend(vec![0.0; 640]);
        let trimmed = trim_silence(&clip(samples), &config());
        assert!(!trimmed.is_empty());
        assert!(trimmed.samples.len() < 1920);
        // The loud span survives.
        assert!(trimmed.samples.iter().any(|&s| s == 0.8));
        assert!(trimmed.samples.len() >= 640);
    }

    #[test]
    fn loud_clip_is_untouched() {
        let trimmed = trim_silence(&clip(vec![0.7; 640]), &config());
        assert_eq!(trimmed.samples.len(), 640);
    }

    #[test]
    fn silent_clip_trims_to_empty() {
        let trimmed = trim_silence(&clip(vec![0.0; 640]), &config());
        assert!(trimmed.is_empty());
        assert_eq!(trimmed.sample_rate, 16_000);
    }

    #[test]
    fn empty_clip_stays_empty_without_panicking() {
        let trimmed = trim_silence(&clip(Vec::new()), &config());
        assert!(trimmed.is_empty());
    }

    #[test]
    fn quiet_tail_below_threshold_is_removed() {
        let mut samples = vec![0.8_f32; 640];
        // Tail 40 dB under the peak, well past the 25 dB default.
        samples.extend(vec![0.008; 640]);
        let trimmed = trim_silence(&clip(samples), &config());
        assert!(trimmed.samples.len() <= 704);
    }
}
