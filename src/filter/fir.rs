use std::collections::VecDeque;

/// Finite impulse response filter over the most recent samples of a stream.
/// Coefficient 0 weighs the newest sample; during warm-up, taps that have
/// not arrived yet contribute zero.
pub struct FirFilter {
    coeffs: Vec<f64>,
    taps: VecDeque<f64>,
}

impl FirFilter {
    pub fn new(coeffs: Vec<f64>) -> Self {
        let taps = VecDeque::with_capacity(coeffs.len());
        Self { coeffs, taps }
    }

    pub fn order(&self) -> usize {
        self.coeffs.len()
    }

    /// Absorbs one sample and returns the filtered value.
    pub fn push(&mut self, value: f64) -> f64 {
        self.taps.push_front(value);
        self.taps.truncate(self.coeffs.len());
        self.coeffs
            .iter()
            .zip(&self.taps)
            .map(|(c, v)| c * v)
            .sum()
    }
}
