/// [`IterationBudget`] type shared by every parameter bundle.
pub mod config;
/// [`Engine`] type which runs the minimization loop.
pub mod engine;
/// The crate's [`Error`] type.
pub mod error;
/// [`Evaluator`] type which binds an objective to a current point.
pub mod evaluator;
/// [`GradientStatus`] type passed to observers.
pub mod status;
/// [`MinimizationSummary`] type for the result of the minimization.
pub mod summary;
/// Warning controls.
pub mod utils;

pub use config::IterationBudget;
pub use engine::{Engine, Run};
pub use error::Error;
pub use evaluator::Evaluator;
pub use status::GradientStatus;
pub use summary::{MinimizationSummary, Outcome};
pub use utils::{disable_warnings, enable_warnings};
