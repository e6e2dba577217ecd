use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use singscore::audio::{decoder, resample};
use singscore::catalog::Catalog;
use singscore::scoring::{Evaluator, ScoreReport};
use singscore::types::AudioData;

/// All comparisons run at this rate; both the reference and the recording
/// are resampled to it after decoding.
const ANALYSIS_SAMPLE_RATE: u32 = 16_000;

/// Singscore - sung-attempt scoring tool
///
/// Compares a recorded singing attempt against a catalogued reference
/// segment and reports pitch and stability scores as JSON on stdout.
#[derive(Parser, Debug)]
#[command(name = "singscore")]
#[command(version = "0.1.0")]
#[command(about = "Score a sung recording against a reference segment", long_about = None)]
struct Args {
    /// Recorded attempt (any container/codec symphonia can decode)
    #[arg(value_name = "RECORDING")]
    recording: PathBuf,

    /// Path to the song catalog JSON
    #[arg(long, value_name = "PATH", default_value = "assets/catalog.json")]
    catalog: PathBuf,

    /// Song identifier in the catalog
    #[arg(long)]
    song: String,

    /// Segment identifier within the song
    #[arg(long)]
    segment: String,
}

impl Args {
    /// Validate CLI arguments
    fn validate(&self) -> Result<()> {
        if !self.recording.exists() {
            anyhow::bail!("Recording does not exist: {:?}", self.recording);
        }
        if !self.recording.is_file() {
            anyhow::bail!("Recording path is not a file: {:?}", self.recording);
        }
        if !self.catalog.is_file() {
            anyhow::bail!("Catalog file does not exist: {:?}", self.catalog);
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    args.validate()
        .context("Failed to validate command-line arguments")?;

    let catalog = Catalog::load(&args.catalog)?;
    let resolved = catalog.resolve(&args.song, &args.segment)?;
    info!(
        song = %args.song,
        segment = %args.segment,
        title = %resolved.title,
        reference = %resolved.path.display(),
        "resolved reference segment"
    );

    let reference = load_analysis_audio(&resolved.path)
        .with_context(|| format!("Failed to load reference audio {:?}", resolved.path))?;
    let attempt = load_analysis_audio(&args.recording)
        .with_context(|| format!("Failed to load recording {:?}", args.recording))?;
    info!(
        reference_secs = reference.duration_seconds(),
        attempt_secs = attempt.duration_seconds(),
        "audio loaded at analysis rate"
    );

    let scores = Evaluator::new().evaluate(&reference, &attempt)?;
    let report = ScoreReport::new(args.song, args.segment, scores);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Decode to mono f32 and bring the clip to the fixed analysis rate.
fn load_analysis_audio(path: &Path) -> Result<AudioData> {
    let decoded = decoder::decode_audio(path)?;
    if decoded.sample_rate == ANALYSIS_SAMPLE_RATE {
        return Ok(decoded);
    }
    let samples = resample::linear_resample(
        &decoded.samples,
        decoded.sample_rate,
        ANALYSIS_SAMPLE_RATE,
    )?;
    Ok(AudioData::new(samples, ANALYSIS_SAMPLE_RATE))
}
