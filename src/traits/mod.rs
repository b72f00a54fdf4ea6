/// Module containing the [`Algorithm`] trait.
pub mod algorithm;
/// Module containing the [`Configurable`] and [`Parameters`] traits.
pub mod config;
/// Module containing the [`CostFunction`] and [`Gradient`] traits.
pub mod cost_function;
/// Module containing the [`Observer`] trait and its implementations.
pub mod observer;
/// Module containing the [`StepLength`] trait.
pub mod step_length;

pub use algorithm::Algorithm;
pub use config::{Configurable, Parameters};
pub use cost_function::{CostFunction, Gradient};
pub use observer::Observer;
pub use step_length::StepLength;
