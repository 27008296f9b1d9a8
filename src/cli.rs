use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;

/// Command-line surface. Numeric flags are range-checked here so a bad
/// value is rejected before anything is loaded.
#[derive(Parser, Debug)]
#[command(
    name = "fuzzydraw",
    version,
    about = "Approximate an image by hill climbing with randomly placed filled circles"
)]
pub struct Cli {
    /// Number of draw iterations (default: width * height / 2)
    #[arg(short = 'i', value_name = "N")]
    pub iterations: Option<u64>,

    /// Randomization mode: 0 match, 1 sample-then-relocate, 2 pure random
    #[arg(
        short = 'm',
        value_name = "MODE",
        default_value_t = 1,
        value_parser = clap::value_parser!(u8).range(0..=2)
    )]
    pub mode: u8,

    /// Output filename (default: out-<unixtime>.png)
    #[arg(short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Region-scoring sampling stride: check every Nth pixel (1-10)
    #[arg(
        short = 'q',
        value_name = "STRIDE",
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..=10)
    )]
    pub sample_step: u32,

    /// Seed the random generator for reproducible runs
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Input image path
    #[arg(value_name = "FILE")]
    pub input: PathBuf,
}

/// Default output name, stamped with the current unix time.
pub fn default_output_path() -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    PathBuf::from(format!("out-{stamp}.png"))
}
