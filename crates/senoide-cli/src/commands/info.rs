//! WAV metadata display command.

use clap::Args;
use senoide_io::{WavFormat, read_wav_info};
use std::path::PathBuf;

#[derive(Args)]
pub struct InfoArgs {
    /// WAV file to inspect
    #[arg(value_name = "INPUT")]
    input: PathBuf,
}

pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    let info = read_wav_info(&args.input)?;

    println!("{}", args.input.display());
    println!("  Channels:    {}", info.channels);
    println!("  Sample rate: {} Hz", info.sample_rate);
    println!(
        "  Format:      {}-bit {}",
        info.bits_per_sample,
        match info.format {
            WavFormat::Pcm => "PCM",
            WavFormat::IeeeFloat => "float",
        }
    );
    println!("  Frames:      {}", info.num_frames);
    println!("  Duration:    {:.3}s", info.duration_secs);

    Ok(())
}
