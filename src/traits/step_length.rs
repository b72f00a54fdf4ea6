use crate::{
    core::{Error, Evaluator},
    DVector, Float,
};

/// A strategy for choosing how far to move along a descent direction.
///
/// Step-length searches are one-dimensional minimizers typically used by
/// [`Algorithm`](crate::traits::Algorithm)s which only provide a direction for the next step.
/// The evaluator's cached value and gradient must describe its current point when `search` is
/// called. A search may evaluate the objective elsewhere but must leave the current point where
/// it found it.
pub trait StepLength<U, E> {
    /// Returns the multiplier $`\lambda`$ for the step $`\vec{x} + \lambda\vec{d}`$.
    ///
    /// Running out of search iterations is not an error: the last trial $`\lambda`$ is returned
    /// and a warning is printed.
    ///
    /// # Errors
    ///
    /// Returns an `Err` if an evaluation fails.
    fn search(
        &mut self,
        evaluator: &mut Evaluator<U, E>,
        direction: &DVector<Float>,
    ) -> Result<Float, Error<E>>;
}
