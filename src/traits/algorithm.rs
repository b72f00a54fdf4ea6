use crate::{
    core::{Error, Evaluator, GradientStatus},
    traits::Configurable,
};

/// A descent strategy run by the [`Engine`](crate::core::Engine).
///
/// The engine owns the loop; an algorithm only contributes its convergence test and its update.
/// On every pass the engine refreshes the evaluator's value and gradient at the current point,
/// reports to observers, checks the iteration budget, and then calls
/// [`Algorithm::check_for_termination`] followed (if not converged) by [`Algorithm::step`].
pub trait Algorithm<U, E>: Configurable {
    /// A short name used in messages and summaries.
    fn name(&self) -> &'static str;

    /// Any setup work done before the loop starts, such as sizing internal state to the problem.
    /// The evaluator has already been positioned at the starting point and evaluated once.
    ///
    /// This is the only place state carried over from a previous run gets cleared.
    ///
    /// # Errors
    ///
    /// Returns an `Err` if an evaluation fails.
    fn initialize(
        &mut self,
        evaluator: &mut Evaluator<U, E>,
        status: &mut GradientStatus,
    ) -> Result<(), Error<E>>;

    /// Returns `true` if the current point satisfies the algorithm's convergence test. Algorithms
    /// should also set a message on the [`GradientStatus`] when they converge.
    ///
    /// # Errors
    ///
    /// Returns an `Err` if an evaluation fails or the test cannot be computed.
    fn check_for_termination(
        &mut self,
        evaluator: &mut Evaluator<U, E>,
        status: &mut GradientStatus,
    ) -> Result<bool, Error<E>>;

    /// Compute the update and move the evaluator to the next point.
    ///
    /// # Errors
    ///
    /// Returns an `Err` if an evaluation fails or the update cannot be computed.
    fn step(
        &mut self,
        evaluator: &mut Evaluator<U, E>,
        status: &mut GradientStatus,
    ) -> Result<(), Error<E>>;
}
