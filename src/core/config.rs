use serde::{Deserialize, Serialize};

/// An iteration limit paired with the number of iterations used so far.
///
/// Every parameter bundle owns one of these, so two runs never share a counter. The counter only
/// moves forward through [`IterationBudget::next_iteration`] and returns to zero through
/// [`IterationBudget::reset`] at the start of a run or search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IterationBudget {
    max_iterations: usize,
    iterations: usize,
}

impl IterationBudget {
    /// Create a fresh budget allowing `max_iterations` iterations.
    pub const fn new(max_iterations: usize) -> Self {
        Self {
            max_iterations,
            iterations: 0,
        }
    }
    /// The maximum number of iterations.
    pub const fn max_iterations(&self) -> usize {
        self.max_iterations
    }
    /// Set the maximum number of iterations without touching the counter.
    pub fn set_max_iterations(&mut self, max_iterations: usize) {
        self.max_iterations = max_iterations;
    }
    /// The number of iterations completed.
    pub const fn iterations(&self) -> usize {
        self.iterations
    }
    /// Advance the counter by one.
    pub fn next_iteration(&mut self) {
        self.iterations += 1;
    }
    /// Set the counter back to zero.
    pub fn reset(&mut self) {
        self.iterations = 0;
    }
    /// Returns `true` once the counter has reached the maximum.
    pub const fn is_exhausted(&self) -> bool {
        self.iterations >= self.max_iterations
    }
}
