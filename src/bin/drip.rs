use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;

/// Re-emits stdin one line at a time with a fixed delay. Replays captured
/// data at something like live rates for testing downstream stages.
#[derive(Debug, Parser)]
#[command(name = "drip")]
struct Cli {
    /// Delay between lines, in milliseconds
    #[arg(default_value_t = 20)]
    delay_ms: u64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let pause = Duration::from_millis(cli.delay_ms);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in stdin.lock().lines() {
        writeln!(out, "{}", line?)?;
        out.flush()?;
        thread::sleep(pause);
    }
    Ok(())
}
