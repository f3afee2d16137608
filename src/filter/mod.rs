pub mod average;
pub mod fir;
pub mod interp;

pub use average::{AverageMethod, RunningAverage};
pub use fir::FirFilter;
pub use interp::{InterpTable, TableError};
