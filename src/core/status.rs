use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{core::Evaluator, DVector, Float};

/// A snapshot of a minimization taken once per pass of the loop.
///
/// This is what [`Observer`](crate::traits::Observer)s receive, and its [`Display`]
/// implementation is the single human-readable line written by the diagnostic sinks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GradientStatus {
    /// A [`String`] message that can be set by [`Algorithm`](crate::traits::Algorithm)s.
    pub message: String,
    /// The iteration counter at the time of the snapshot.
    pub iteration: usize,
    /// The current parameters of the minimization.
    pub x: DVector<Float>,
    /// The current value of the minimization problem function at [`GradientStatus::x`].
    pub fx: Float,
    /// The Euclidean norm of the gradient at [`GradientStatus::x`].
    pub g_norm: Float,
    /// The number of function evaluations.
    pub n_f_evals: usize,
    /// The number of gradient evaluations.
    pub n_g_evals: usize,
    /// The number of Hessian evaluations.
    pub n_h_evals: usize,
    /// Flag that says whether or not the minimization is in a converged state.
    pub converged: bool,
}

impl GradientStatus {
    /// Updates the [`GradientStatus::message`] field.
    pub fn with_message(&mut self, message: &str) {
        self.message = message.to_string();
    }
    /// Sets [`GradientStatus::converged`] to be `true`.
    pub fn set_converged(&mut self) {
        self.converged = true;
    }
    /// Copies the evaluator's current point, value, gradient norm, and counters.
    pub fn sync<U, E>(&mut self, iteration: usize, evaluator: &Evaluator<U, E>) {
        self.iteration = iteration;
        self.x = evaluator.point().clone();
        self.fx = evaluator.value();
        self.g_norm = evaluator.jacobian().norm();
        self.n_f_evals = evaluator.n_f_evals();
        self.n_g_evals = evaluator.n_g_evals();
        self.n_h_evals = evaluator.n_h_evals();
    }
}

impl Display for GradientStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let x = self
            .x
            .iter()
            .map(|xi| format!("{xi:+.6e}"))
            .collect::<Vec<_>>()
            .join(", ");
        write!(
            f,
            "iteration: {:>6}  x: [{}]  f(x): {:+.6e}  |g|: {:.6e}",
            self.iteration, x, self.fx, self.g_norm
        )
    }
}

#[cfg(test)]
mod tests {
    use super::GradientStatus;
    use crate::DVector;

    #[test]
    fn display_is_one_line() {
        let status = GradientStatus {
            iteration: 4,
            x: DVector::from_vec(vec![1.0, -0.5]),
            fx: 2.0,
            g_norm: 0.25,
            ..Default::default()
        };
        let line = status.to_string();
        assert!(!line.contains('\n'));
        assert!(line.starts_with("iteration:      4"));
        assert!(line.contains("x: [+1.000000e0, -5.000000e-1]"));
        assert!(line.contains("|g|: 2.500000e-1"));
    }
}
