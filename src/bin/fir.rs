use std::io::{self, BufRead, Write};

use anyhow::{ensure, Result};
use clap::Parser;
use log::warn;

use pipeplot::chart::RecordParser;
use pipeplot::filter::FirFilter;

/// Runs one stdin column through a finite impulse response filter; the first
/// coefficient weighs the newest sample. Other columns pass through.
#[derive(Debug, Parser)]
#[command(name = "fir")]
struct Cli {
    /// Filter coefficients, newest sample first
    #[arg(required = true, allow_negative_numbers = true)]
    coeffs: Vec<f64>,

    /// 1-indexed column to filter
    #[arg(short, long, default_value_t = 1)]
    ycol: usize,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    ensure!(cli.ycol > 0, "column number must be a positive integer");

    let parser = RecordParser::new(cli.ycol);
    let mut filter = FirFilter::new(cli.coeffs);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in stdin.lock().lines() {
        let line = line?;
        let record = match parser.parse(&line) {
            Ok(Some(record)) => record,
            Ok(None) => continue,
            Err(err) => {
                warn!("{err}");
                continue;
            }
        };
        let filtered = filter.push(record.field(cli.ycol));
        writeln!(out, "{}", record.with_field(cli.ycol, filtered))?;
        out.flush()?;
    }
    Ok(())
}
