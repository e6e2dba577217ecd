//! Shared numeric helpers for the scoring stages.

use ndarray::Array1;

/// Keeps min-max normalization finite on a perfectly flat envelope.
pub(crate) const NORMALIZE_EPSILON: f64 = 1e-6;

/// Short-time RMS energy, one value per hop. The final window may be shorter
/// than `frame_length` when the clip does not divide evenly.
pub(crate) fn rms_envelope(samples: &[f32], frame_length: usize, hop_length: usize) -> Array1<f64> {
    if samples.is_empty() || frame_length == 0 || hop_length == 0 {
        return Array1::zeros(0);
    }
    let mut energies = Vec::with_capacity(samples.len() / hop_length + 1);
    let mut start = 0;
    while start < samples.len() {
        let end = (start + frame_length).min(samples.len());
        let frame = &samples[start..end];
        let power: f64 = frame.iter().map(|&s| s as f64 * s as f64).sum();
        energies.push((power / frame.len() as f64).sqrt());
        start += hop_length;
    }
    Array1::from_vec(energies)
}

/// Rescale to [0, 1] by the envelope's own extrema.
pub(crate) fn min_max_normalize(envelope: &Array1<f64>) -> Array1<f64> {
    if envelope.is_empty() {
        return envelope.clone();
    }
    let min = envelope.iter().copied().fold(f64::INFINITY, f64::min);
    let max = envelope.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    envelope.mapv(|v| (v - min) / (max - min + NORMALIZE_EPSILON))
}

/// Linearly re-grid `values` onto `target_len` evenly spaced points over the
/// same normalized time axis. A matching length reproduces the input.
pub(crate) fn resample_linear(values: &Array1<f64>, target_len: usize) -> Array1<f64> {
    match (target_len, values.len()) {
        (0, _) => Array1::zeros(0),
        (count, 0) => Array1::zeros(count),
        (count, len) if count == len => values.clone(),
        (count, len) => {
            let mut output = Vec::with_capacity(count);
            let scale = (len - 1) as f64 / (count - 1).max(1) as f64;
            for i in 0..count {
                let position = i as f64 * scale;
                let lower = position.floor() as usize;
                let upper = position.ceil() as usize;
                if lower == upper {
                    output.push(values[lower]);
                } else {
                    let weight = position - lower as f64;
                    output.push(values[lower] * (1.0 - weight) + values[upper] * weight);
                }
            }
            Array1::from_vec(output)
        }
    }
}

/// Pearson correlation coefficient of two equal-length sequences.
///
/// `None` when the coefficient is undefined: fewer than two points, or zero
/// variance on either side.
pub(crate) fn pearson(xs: &Array1<f64>, ys: &Array1<f64>) -> Option<f64> {
    let n = xs.len();
    if n != ys.len() || n < 2 {
        return None;
    }
    let mean_x = xs.sum() / n as f64;
    let mean_y = ys.sum() / n as f64;
    let mut covariance = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (&x, &y) in xs.iter().zip(ys.iter()) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        covariance += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    let denominator = (var_x * var_y).sqrt();
    if denominator <= f64::EPSILON {
        return None;
    }
    Some(covariance / denominator)
}
