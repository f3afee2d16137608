use std::io::{self, BufRead, BufReader, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serialport::{DataBits, Parity, StopBits};

/// Relays raw lines from a serial device to stdout, flushing per line, so a
/// sensor can feed a `serialcat ... | pipeplot ...` pipeline.
#[derive(Debug, Parser)]
#[command(name = "serialcat")]
struct Cli {
    /// Serial device path, e.g. /dev/ttyUSB0
    device: String,

    /// Number of lines to relay; omit to stream until the port closes
    lines: Option<u64>,

    /// Baud rate
    #[arg(short, long, default_value_t = 115_200)]
    baud: u32,

    /// Read timeout, in seconds
    #[arg(short, long, default_value_t = 3)]
    timeout: u64,

    /// Parity setting
    #[arg(short, long, value_enum, default_value_t = ParityOpt::None)]
    parity: ParityOpt,

    /// Stop bit setting
    #[arg(short, long, value_enum, default_value_t = StopBitsOpt::One)]
    stopbits: StopBitsOpt,

    /// Number of bits per byte
    #[arg(short = 'y', long, value_enum, default_value_t = DataBitsOpt::Eight)]
    bytesize: DataBitsOpt,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ParityOpt {
    None,
    Even,
    Odd,
}

impl From<ParityOpt> for Parity {
    fn from(opt: ParityOpt) -> Self {
        match opt {
            ParityOpt::None => Parity::None,
            ParityOpt::Even => Parity::Even,
            ParityOpt::Odd => Parity::Odd,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum StopBitsOpt {
    #[value(name = "1")]
    One,
    #[value(name = "2")]
    Two,
}

impl From<StopBitsOpt> for StopBits {
    fn from(opt: StopBitsOpt) -> Self {
        match opt {
            StopBitsOpt::One => StopBits::One,
            StopBitsOpt::Two => StopBits::Two,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum DataBitsOpt {
    #[value(name = "5")]
    Five,
    #[value(name = "6")]
    Six,
    #[value(name = "7")]
    Seven,
    #[value(name = "8")]
    Eight,
}

impl From<DataBitsOpt> for DataBits {
    fn from(opt: DataBitsOpt) -> Self {
        match opt {
            DataBitsOpt::Five => DataBits::Five,
            DataBitsOpt::Six => DataBits::Six,
            DataBitsOpt::Seven => DataBits::Seven,
            DataBitsOpt::Eight => DataBits::Eight,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let port = serialport::new(&cli.device, cli.baud)
        .timeout(Duration::from_secs(cli.timeout))
        .parity(cli.parity.into())
        .stop_bits(cli.stopbits.into())
        .data_bits(cli.bytesize.into())
        .open()
        .with_context(|| format!("unable to open serial port {}", cli.device))?;

    let mut reader = BufReader::new(port);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    // Bytes, not UTF-8: whatever the device sends goes through untouched.
    let mut line = Vec::new();
    let mut relayed = 0u64;
    while cli.lines.map_or(true, |n| relayed < n) {
        line.clear();
        match reader.read_until(b'\n', &mut line) {
            Ok(0) => break,
            Ok(_) => {
                out.write_all(&line)?;
                out.flush()?;
                relayed += 1;
            }
            // The device is simply quiet; keep waiting.
            Err(err) if err.kind() == io::ErrorKind::TimedOut => continue,
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}
