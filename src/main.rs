use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use pipeplot::chart::{GnuplotSession, StreamLoop};
use pipeplot::cli::Cli;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let config = cli.series_config()?;

    // Ctrl+C flips the flag; the loop drains and releases the renderer
    // instead of dying mid-frame.
    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&interrupted);
    ctrlc::set_handler(move || flag.store(true, Ordering::Relaxed))
        .context("failed to install the interrupt handler")?;

    let session = GnuplotSession::start(&cli.gnuplot)?;
    let stdin = io::stdin();
    let mut stream = StreamLoop::new(
        stdin.lock(),
        session,
        config,
        cli.width,
        cli.freq,
        interrupted,
    )?;
    stream.run()?;
    Ok(())
}
