use thiserror::Error;

/// Errors that stop a minimization run.
///
/// Running out of iterations is deliberately absent: an exhausted run still returns a
/// [`MinimizationSummary`](crate::core::MinimizationSummary) with the last point.
#[derive(Debug, Error)]
pub enum Error<E> {
    /// The user's objective failed to evaluate.
    #[error("objective evaluation failed")]
    Evaluation(#[source] E),

    /// The Hessian could not be solved against the gradient.
    #[error("singular Hessian at iteration {iteration}")]
    SingularHessian {
        /// The outer iteration at which the solve failed.
        iteration: usize,
    },

    /// An update produced a NaN or infinite coordinate.
    #[error("non-finite point produced at iteration {iteration}")]
    NonFiniteIterate {
        /// The outer iteration whose update produced the point.
        iteration: usize,
    },

    /// A configuration value was out of range.
    #[error("invalid config: {reason}")]
    InvalidConfig {
        /// Which constraint was violated.
        reason: &'static str,
    },

    /// The diagnostic log file could not be opened or written.
    #[error("failed to write diagnostic log")]
    Io(#[from] std::io::Error),
}

impl<E> Error<E> {
    /// Returns `true` if the error came from the user's objective.
    pub const fn is_evaluation(&self) -> bool {
        matches!(self, Self::Evaluation(_))
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use super::Error;

    #[test]
    fn messages_name_the_iteration() {
        let err: Error<Infallible> = Error::SingularHessian { iteration: 3 };
        assert_eq!(err.to_string(), "singular Hessian at iteration 3");
        let err: Error<Infallible> = Error::InvalidConfig {
            reason: "rho must be in (0, 0.5)",
        };
        assert_eq!(err.to_string(), "invalid config: rho must be in (0, 0.5)");
        assert!(!err.is_evaluation());
    }
}
