//! The full analysis-resynthesis pass.
//!
//! Decode, resample to the configured rate, analyze into tracked partials,
//! resynthesize by overlap-add, and encode the result.

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use senoide_analysis::{PartialTracker, PeakDetector, StftAnalyzer, resample::resample_to};
use senoide_config::{SynthesisConfig, paths::find_config};
use senoide_core::PartialFrame;
use senoide_io::{WavSpec, read_wav, write_wav};
use senoide_synth::{Fader, Resynthesizer};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input audio file (WAV)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output audio file (WAV)
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Config file (TOML); defaults are used when absent
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the number of peaks kept per frame
    #[arg(long)]
    peaks: Option<usize>,

    /// Synthesis fade window (cosine, linear, rect)
    #[arg(long, default_value = "cosine")]
    fader: String,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,

    /// Write the tracked partial frames to a JSON file
    #[arg(long, value_name = "PATH")]
    dump_partials: Option<PathBuf>,
}

#[derive(Serialize)]
struct PartialRecord {
    frequency: f32,
    magnitude: f32,
    phase: f32,
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    // Configuration errors are fatal before any processing starts.
    let mut config = match find_config(args.config.as_deref()) {
        Some(path) => {
            println!("Using config {}", path.display());
            SynthesisConfig::load(&path)?
        }
        None => {
            println!("No config file found, using defaults");
            SynthesisConfig::default()
        }
    };
    if let Some(peaks) = args.peaks {
        config.cosine_waves = peaks;
    }
    config.validate()?;

    let fader = parse_fader(&args.fader);

    println!("Reading {}...", args.input.display());
    let (mut samples, file_rate) = read_wav(&args.input)?;
    println!(
        "  {} samples, {} Hz, {:.2}s",
        samples.len(),
        file_rate,
        samples.len() as f32 / file_rate as f32
    );

    if file_rate != config.sample_rate {
        println!("Resampling {} Hz -> {} Hz...", file_rate, config.sample_rate);
        samples = resample_to(&samples, file_rate, config.sample_rate);
    }

    let sample_rate = config.sample_rate as f32;
    let stft = StftAnalyzer::new(config.n_fft, config.window_len, config.hop_len);
    let detector = PeakDetector::new(sample_rate, config.n_fft, config.cosine_waves);
    let mut tracker = PartialTracker::new(config.freq_tolerance);

    let spectra = stft.analyze(&samples);
    println!(
        "Tracking up to {} partials over {} frames...",
        config.cosine_waves,
        spectra.len()
    );

    let pb = ProgressBar::new(spectra.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap()
            .progress_chars("##-"),
    );

    let mut frames = Vec::with_capacity(spectra.len());
    for (i, spectrum) in spectra.iter().enumerate() {
        // One bad frame fades its partials and moves on; it does not abort
        // the pass.
        let candidates = match detector.detect(spectrum) {
            Ok(peaks) => peaks,
            Err(err) => {
                tracing::warn!(frame = i, %err, "skipping malformed frame");
                Vec::new()
            }
        };
        frames.push(tracker.track(candidates));
        pb.inc(1);
    }
    pb.finish_and_clear();

    if let Some(path) = &args.dump_partials {
        dump_partials(path, &frames)?;
        println!("Wrote partial tracks to {}", path.display());
    }

    let synth = Resynthesizer::new(sample_rate, config.hop_len, config.frame_len, config.n_fft)?
        .with_fader(fader);
    let audio = synth.synthesize(&frames);

    println!(
        "Synthesized {} samples ({:.2}s), peak {:.1} dB",
        audio.len(),
        audio.len() as f32 / sample_rate,
        peak_db(&audio)
    );

    println!("Writing {}...", args.output.display());
    write_wav(
        &args.output,
        &audio,
        WavSpec {
            sample_rate: config.sample_rate,
            bits_per_sample: args.bit_depth,
        },
    )?;
    println!("Done!");

    Ok(())
}

fn parse_fader(name: &str) -> Fader {
    match name.to_lowercase().as_str() {
        "cosine" => Fader::Cosine,
        "linear" => Fader::Linear,
        "rect" | "rectangular" | "none" => Fader::Rectangular,
        _ => {
            eprintln!("Unknown fader '{}', using cosine", name);
            Fader::Cosine
        }
    }
}

fn dump_partials(path: &std::path::Path, frames: &[PartialFrame]) -> anyhow::Result<()> {
    let records: Vec<Vec<PartialRecord>> = frames
        .iter()
        .map(|frame| {
            frame
                .iter()
                .map(|p| PartialRecord {
                    frequency: p.frequency,
                    magnitude: p.magnitude,
                    phase: p.phase,
                })
                .collect()
        })
        .collect();

    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(file, &records)?;
    Ok(())
}

fn peak_db(samples: &[f32]) -> f32 {
    let peak = samples.iter().fold(0.0f32, |acc, &s| acc.max(s.abs()));
    if peak > 0.0 { 20.0 * peak.log10() } else { -120.0 }
}
