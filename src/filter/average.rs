use std::collections::VecDeque;

use clap::ValueEnum;

/// Which reduction the window collapses to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum AverageMethod {
    Mean,
    Median,
}

/// Running average over the last `capacity` samples of one column. Larger
/// windows give smoother output at the cost of responsiveness.
pub struct RunningAverage {
    method: AverageMethod,
    samples: VecDeque<f64>,
    capacity: usize,
}

impl RunningAverage {
    /// Capacity must be positive; the CLI layer enforces that.
    pub fn new(method: AverageMethod, capacity: usize) -> Self {
        Self {
            method,
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Absorbs one sample and returns the average over the window as it now
    /// stands. Before the window fills, the average covers what has arrived.
    pub fn push(&mut self, value: f64) -> f64 {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(value);
        match self.method {
            AverageMethod::Mean => mean(&self.samples),
            AverageMethod::Median => median(&self.samples),
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

fn mean(samples: &VecDeque<f64>) -> f64 {
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Midpoint of the two central values when the window holds an even count.
fn median(samples: &VecDeque<f64>) -> f64 {
    let mut sorted: Vec<f64> = samples.iter().copied().collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
