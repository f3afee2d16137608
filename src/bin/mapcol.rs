use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use log::warn;

use pipeplot::chart::RecordParser;
use pipeplot::filter::InterpTable;

/// Maps one stdin column through a calibration table (headerless CSV of
/// `value,reading` pairs) using clamped linear interpolation. Turns raw
/// sensor readings into calibrated units mid-pipeline.
#[derive(Debug, Parser)]
#[command(name = "mapcol")]
struct Cli {
    /// Calibration table path
    table: PathBuf,

    /// 1-indexed column to map
    col: usize,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    ensure!(cli.col > 0, "column number must be a positive integer");

    let table = InterpTable::from_csv_path(&cli.table)
        .with_context(|| format!("unable to load calibration table {}", cli.table.display()))?;
    let parser = RecordParser::new(cli.col);
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
        let mapped = table.lookup(record.field(cli.col));
        writeln!(out, "{}", record.with_field(cli.col, mapped))?;
        out.flush()?;
    }
    Ok(())
}
