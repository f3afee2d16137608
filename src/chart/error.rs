use std::io;

use thiserror::Error;

/// Fatal failures on the charting path. Everything here either stops the
/// program before the stream loop starts or tears it down mid-stream; the
/// recoverable per-record failures live in [`crate::chart::record::ParseError`].
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("x and y column numbers must be positive")]
    NonPositiveColumn,
    #[error("at least one y column is required")]
    NoSeries,
    #[error("expected {expected} plot style(s), received {actual}")]
    StyleCountMismatch { expected: usize, actual: usize },
    #[error("expected {expected} color(s), received {actual}")]
    ColorCountMismatch { expected: usize, actual: usize },
    #[error("unknown plot style '{0}'")]
    UnknownStyle(char),
    #[error("unknown color symbol '{0}'")]
    UnknownColor(char),
    #[error("maximum y value {max} must exceed minimum y value {min}")]
    InvertedYRange { min: f64, max: f64 },
    #[error("line weight must be a positive integer")]
    NonPositiveWeight,
    #[error("window capacity must be greater than zero")]
    ZeroCapacity,
    #[error("redraw frequency must be greater than zero")]
    ZeroFrequency,
    #[error("failed to launch `{program}`: {source}")]
    RendererLaunch { program: String, source: io::Error },
    #[error("lost the pipe to the renderer: {0}")]
    RendererPipe(io::Error),
    #[error("failed to read from the input stream: {0}")]
    Input(io::Error),
}
