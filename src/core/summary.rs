use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{core::GradientStatus, Float};

/// How a minimization run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Outcome {
    /// The algorithm's convergence test passed.
    Converged,
    /// The iteration budget ran out first. The point is the best effort, not a verified minimum.
    #[default]
    Exhausted,
}

/// A struct that holds the results of a minimization run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MinimizationSummary {
    /// The name of the algorithm which produced the result.
    pub algorithm: String,
    /// How the run ended.
    pub outcome: Outcome,
    /// A human-readable description of how the run ended.
    pub message: String,
    /// The initial parameters of the minimization.
    pub x0: Vec<Float>,
    /// The final parameters of the minimization.
    pub x: Vec<Float>,
    /// The value of the objective at [`MinimizationSummary::x`].
    pub fx: Float,
    /// The gradient norm at [`MinimizationSummary::x`].
    pub g_norm: Float,
    /// The number of updates applied.
    pub iterations: usize,
    /// The number of function evaluations.
    pub cost_evals: usize,
    /// The number of gradient evaluations.
    pub gradient_evals: usize,
    /// The number of Hessian evaluations.
    pub hessian_evals: usize,
}

impl MinimizationSummary {
    pub(crate) fn from_status(
        algorithm: &str,
        outcome: Outcome,
        x0: &[Float],
        status: &GradientStatus,
    ) -> Self {
        Self {
            algorithm: algorithm.to_string(),
            outcome,
            message: status.message.clone(),
            x0: x0.to_vec(),
            x: status.x.iter().copied().collect(),
            fx: status.fx,
            g_norm: status.g_norm,
            iterations: status.iteration,
            cost_evals: status.n_f_evals,
            gradient_evals: status.n_g_evals,
            hessian_evals: status.n_h_evals,
        }
    }
    /// Returns `true` if the run ended with [`Outcome::Converged`].
    pub fn converged(&self) -> bool {
        self.outcome == Outcome::Converged
    }
}

impl Display for MinimizationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rule = "─".repeat(60);
        writeln!(f, "┌{rule}┐")?;
        writeln!(f, "│{:^60}│", format!("{} RESULTS", self.algorithm.to_uppercase()))?;
        writeln!(f, "├{rule}┤")?;
        writeln!(
            f,
            "│ Status: {:<16} f(x): {:<+14.5e} iters: {:>6}   │",
            match self.outcome {
                Outcome::Converged => "Converged",
                Outcome::Exhausted => "Invalid Minimum",
            },
            self.fx,
            self.iterations,
        )?;
        writeln!(
            f,
            "│ #f(x): {:<8} #∇f(x): {:<8} #∇²f(x): {:<8} |g|: {:<8.2e}│",
            self.cost_evals, self.gradient_evals, self.hessian_evals, self.g_norm,
        )?;
        writeln!(f, "│ Message: {:<50}│", self.message)?;
        writeln!(f, "├{rule}┤")?;
        writeln!(f, "│ {:>5} │ {:>24} │ {:>24} │", "Par #", "Value", "Initial")?;
        for (i, (v, v0)) in self.x.iter().zip(&self.x0).enumerate() {
            writeln!(f, "│ {i:>5} │ {v:>+24.10e} │ {v0:>+24.10e} │")?;
        }
        write!(f, "└{rule}┘")
    }
}
