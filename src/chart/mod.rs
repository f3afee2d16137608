pub mod error;
pub mod gnuplot;
pub mod pipeline;
pub mod record;
pub mod series;
pub mod throttle;
pub mod window;

pub use error::ChartError;
pub use gnuplot::GnuplotSession;
pub use pipeline::{FrameSink, LoopState, StreamLoop};
pub use record::{ParseError, Record, RecordParser};
pub use series::{PlotStyle, SeriesColor, SeriesConfig};
pub use throttle::RenderThrottle;
pub use window::SlidingWindow;
