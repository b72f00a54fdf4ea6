/// Module containing gradient-based descent algorithms.
pub mod gradient;
pub use gradient::{GradientDescent, NesterovMomentum, Newton};

/// Module containing step-length searches.
pub mod line_search;
pub use line_search::StepSize;
