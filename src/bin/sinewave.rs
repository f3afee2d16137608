use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;

/// Emits `<index> <value>` sine samples at a fixed cadence. A stand-in data
/// producer for trying out the plotting pipeline without hardware.
#[derive(Debug, Parser)]
#[command(name = "sinewave")]
struct Cli {
    /// Peak deviation from the offset
    #[arg(short, long, default_value_t = 100.0)]
    amplitude: f64,

    /// Vertical offset added to every sample
    #[arg(short, long, default_value_t = 110.0, allow_negative_numbers = true)]
    offset: f64,

    /// Samples per radian; larger values stretch the wave
    #[arg(short, long, default_value_t = 100.0)]
    period: f64,

    /// Milliseconds between samples
    #[arg(short, long, default_value_t = 18.6)]
    interval_ms: f64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let pause = Duration::from_secs_f64(cli.interval_ms / 1000.0);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut index = 0u64;
    loop {
        let value = cli.amplitude * (index as f64 / cli.period).sin() + cli.offset;
        writeln!(out, "{index} {value:.0}")?;
        out.flush()?;
        index += 1;
        thread::sleep(pause);
    }
}
