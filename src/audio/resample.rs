use anyhow::{ensure, Result};

/// Linearly resample `samples` from `source_rate` to `target_rate`.
pub fn linear_resample(samples: &[f32], source_rate: u32, target_rate: u32) -> Result<Vec<f32>> {
    ensure!(source_rate > 0, "source sample rate must be positive");
    ensure!(target_rate > 0, "target sample rate must be positive");
    if samples.is_empty() || source_rate == target_rate {
        return Ok(samples.to_vec());
    }

    let step = source_rate as f64 / target_rate as f64;
    let output_len = ((samples.len() as f64 / step).ceil() as usize).max(1);
    let last = samples.len() - 1;

    let mut output = Vec::with_capacity(output_len);
    for i in 0..output_len {
        let position = i as f64 * step;
        let index = (position.floor() as usize).min(last);
        let next = (index + 1).min(last);
        let frac = (position - index as f64) as f32;
        output.push(samples[index] * (1.0 - frac) + samples[next] * frac);
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::linear_resample;

    #[test]
    fn identity_when_rates_match() {
        let input = vec![0.25, -0.5, 0.75];
        let output = linear_resample(&input, 16_000, 16_000).unwrap();
        assert_eq!(output, input);
    }

    #[test]
    fn constant_signal_survives_downsampling() {
        let input = vec![0.5; 480];
        let output = linear_resample(&input, 48_000, 16_000).unwrap();
        assert_eq!(output.len(), 160);
        assert!(output.iter().all(|&sample| (sample - 0.5).abs() < 1e-6));
    }

    #[test]
    fn rejects_zero_rates() {
        assert!(linear_resample(&[0.0], 0, 16_000).is_err());
        assert!(linear_resample(&[0.0], 16_000, 0).is_err());
    }

    #[test]
    fn empty_input_stays_empty() {
        let output = linear_resample(&[], 48_000, 16_000).unwrap();
        assert!(output.is_empty());
    }
}
