use clap::Parser;

use crate::chart::error::ChartError;
use crate::chart::series::{PlotStyle, SeriesColor, SeriesConfig};

/// Streams whitespace-delimited numeric columns from stdin into a live,
/// auto-scrolling gnuplot chart.
#[derive(Debug, Parser)]
#[command(name = "pipeplot")]
pub struct Cli {
    /// 1-indexed column holding the shared x coordinate
    pub xcol: usize,

    /// 1-indexed y columns, one plotted series each
    #[arg(required = true)]
    pub ycols: Vec<usize>,

    /// Number of redraws per second (in Hz)
    #[arg(short, long, default_value_t = 60)]
    pub freq: u32,

    /// Plot style per y column, in order: 'l' lines, 'p' points, 'b' both
    #[arg(short, long)]
    pub plot: Option<String>,

    /// Color per y column, in order: r, g, b, y, c, or m
    #[arg(short, long)]
    pub color: Option<String>,

    /// Thickness of lines and size of points
    #[arg(short, long, default_value_t = 3)]
    pub size: u32,

    /// Number of samples kept in the scrolling window
    #[arg(short, long, default_value_t = 100)]
    pub width: usize,

    /// Fixed lower y-axis bound
    #[arg(long, default_value_t = -10.0, allow_negative_numbers = true)]
    pub min: f64,

    /// Fixed upper y-axis bound
    #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
    pub max: f64,

    /// X axis label
    #[arg(long, default_value = "")]
    pub xlabel: String,

    /// Y axis label
    #[arg(long, default_value = "")]
    pub ylabel: String,

    /// Renderer executable to drive
    #[arg(long, default_value = "gnuplot")]
    pub gnuplot: String,
}

impl Cli {
    /// Turns the raw flag values into the validated configuration the core
    /// consumes. Any inconsistency is fatal before the loop starts.
    pub fn series_config(&self) -> Result<SeriesConfig, ChartError> {
        let styles = self.plot.as_deref().map(parse_styles).transpose()?;
        let colors = self.color.as_deref().map(parse_colors).transpose()?;
        SeriesConfig::new(
            self.xcol,
            self.ycols.clone(),
            styles,
            colors,
            self.size,
            self.min,
            self.max,
            self.xlabel.clone(),
            self.ylabel.clone(),
        )
    }
}

fn parse_styles(codes: &str) -> Result<Vec<PlotStyle>, ChartError> {
    codes.chars().map(PlotStyle::from_code).collect()
}

fn parse_colors(codes: &str) -> Result<Vec<SeriesColor>, ChartError> {
    codes.chars().map(SeriesColor::from_code).collect()
}
