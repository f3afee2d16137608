use std::io::{self, BufRead, Write};

use anyhow::{ensure, Result};
use clap::Parser;
use log::warn;

use pipeplot::chart::RecordParser;
use pipeplot::filter::{AverageMethod, RunningAverage};

/// Replaces one stdin column with its running mean or median, preserving the
/// other columns so stages can be chained through pipes.
#[derive(Debug, Parser)]
#[command(name = "smooth")]
struct Cli {
    /// Averaging method
    #[arg(value_enum)]
    method: AverageMethod,

    /// Number of samples averaged together
    samples: usize,

    /// 1-indexed column to smooth
    ycol: usize,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    ensure!(cli.samples > 0, "buffer size must be a positive integer");
    ensure!(cli.ycol > 0, "column number must be a positive integer");

    let parser = RecordParser::new(cli.ycol);
    let mut average = RunningAverage::new(cli.method, cli.samples);
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
        let smoothed = average.push(record.field(cli.ycol));
        writeln!(out, "{}", record.with_field(cli.ycol, smoothed))?;
        out.flush()?;
    }
    Ok(())
}
