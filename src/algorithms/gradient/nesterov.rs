use std::path::{Path, PathBuf};

use crate::{
    core::{Error, Evaluator, GradientStatus, IterationBudget},
    traits::{config::check_positive, Algorithm, Configurable, Parameters},
    DVector, Float,
};

/// The internal configuration struct for the [`NesterovMomentum`] algorithm.
#[derive(Clone, Debug)]
pub struct NesterovConfig {
    budget: IterationBudget,
    learning_rate: Float,
    momentum: Float,
    min_gradient: Float,
    verbose: bool,
    log_file: Option<PathBuf>,
}
impl NesterovConfig {
    /// Set the maximum number of iterations (default = `1000`).
    pub fn with_max_iterations(&mut self, value: usize) -> &mut Self {
        self.budget.set_max_iterations(value);
        self
    }
    /// Set the learning rate $`\alpha`$ (default = `0.01`).
    pub const fn with_learning_rate(&mut self, value: Float) -> &mut Self {
        self.learning_rate = value;
        self
    }
    /// Set the momentum factor $`\beta`$ (default = `0.9`).
    ///
    /// With $`\beta = 0`$ the method is plain gradient descent with step $`\alpha`$.
    pub const fn with_momentum(&mut self, value: Float) -> &mut Self {
        self.momentum = value;
        self
    }
    /// Set the tolerance on the gradient norm at the current point (default =
    /// $`\sqrt[3]{\varepsilon}`$).
    pub const fn with_min_gradient(&mut self, value: Float) -> &mut Self {
        self.min_gradient = value;
        self
    }
    /// Print the configuration, one line per iteration, and the result to stdout.
    pub const fn with_verbose(&mut self, value: bool) -> &mut Self {
        self.verbose = value;
        self
    }
    /// Append one line per iteration to the given file.
    pub fn with_log_file<P: AsRef<Path>>(&mut self, path: P) -> &mut Self {
        self.log_file = Some(path.as_ref().to_path_buf());
        self
    }
    /// The learning rate $`\alpha`$.
    pub const fn learning_rate(&self) -> Float {
        self.learning_rate
    }
    /// The momentum factor $`\beta`$.
    pub const fn momentum(&self) -> Float {
        self.momentum
    }
    /// The tolerance on the gradient norm.
    pub const fn min_gradient(&self) -> Float {
        self.min_gradient
    }
}
impl Default for NesterovConfig {
    fn default() -> Self {
        Self {
            budget: IterationBudget::new(1000),
            learning_rate: 0.01,
            momentum: 0.9,
            min_gradient: Float::EPSILON.cbrt(),
            verbose: false,
            log_file: None,
        }
    }
}
impl Parameters for NesterovConfig {
    fn budget(&self) -> &IterationBudget {
        &self.budget
    }
    fn budget_mut(&mut self) -> &mut IterationBudget {
        &mut self.budget
    }
    fn validate(&self) -> Result<(), &'static str> {
        check_positive(self.learning_rate, "nesterov learning_rate must be positive")?;
        if !(0.0..1.0).contains(&self.momentum) {
            return Err("nesterov momentum must be in [0, 1)");
        }
        check_positive(self.min_gradient, "nesterov min_gradient must be positive")
    }
    fn verbose(&self) -> bool {
        self.verbose
    }
    fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }
}

/// Gradient descent with Nesterov momentum.
///
/// The gradient is taken at a lookahead point extrapolated along the previous velocity:
///
/// ```math
/// \begin{aligned}
/// \vec{v}_k &= \beta\vec{v}_{k-1} - \alpha\nabla f(\vec{x}_k + \beta\vec{v}_{k-1}) \\
/// \vec{x}_{k+1} &= \vec{x}_k + \vec{v}_k
/// \end{aligned}
/// ```
///
/// The velocity starts at zero on every run. The convergence test uses the gradient at
/// $`\vec{x}_k`$, not at the lookahead point.
#[derive(Clone, Debug, Default)]
pub struct NesterovMomentum {
    config: NesterovConfig,
    velocity: DVector<Float>,
}

impl NesterovMomentum {
    /// The current velocity.
    pub const fn velocity(&self) -> &DVector<Float> {
        &self.velocity
    }
}

impl Configurable for NesterovMomentum {
    type Config = NesterovConfig;

    fn get_config(&self) -> &Self::Config {
        &self.config
    }
    fn get_config_mut(&mut self) -> &mut Self::Config {
        &mut self.config
    }
}

impl<U, E> Algorithm<U, E> for NesterovMomentum {
    fn name(&self) -> &'static str {
        "Nesterov Momentum"
    }

    fn initialize(
        &mut self,
        evaluator: &mut Evaluator<U, E>,
        _status: &mut GradientStatus,
    ) -> Result<(), Error<E>> {
        self.velocity = DVector::zeros(evaluator.dimension());
        Ok(())
    }

    fn check_for_termination(
        &mut self,
        evaluator: &mut Evaluator<U, E>,
        status: &mut GradientStatus,
    ) -> Result<bool, Error<E>> {
        if evaluator.jacobian().norm() < self.config.min_gradient {
            status.with_message("GRADIENT NORM BELOW TOLERANCE");
            return Ok(true);
        }
        Ok(false)
    }

    fn step(
        &mut self,
        evaluator: &mut Evaluator<U, E>,
        _status: &mut GradientStatus,
    ) -> Result<(), Error<E>> {
        let beta = self.config.momentum;
        let lookahead = evaluator.point() + self.velocity.scale(beta);
        let g_look = evaluator.gradient_at(&lookahead)?;
        self.velocity = self.velocity.scale(beta) - g_look.scale(self.config.learning_rate);
        let x = evaluator.point() + &self.velocity;
        evaluator.set_point(x);
        Ok(())
    }
}
