//! Live charting and stream-transform toolkit for line-oriented numeric
//! pipelines. The `chart` module is the plotting core (parser, sliding
//! window, throttle, gnuplot session, stream loop); `filter` holds the
//! single-column transforms the companion binaries chain through pipes.

pub mod chart;
pub mod cli;
pub mod filter;
