use std::path::{Path, PathBuf};

use crate::{
    algorithms::line_search::StepSize,
    core::{Error, Evaluator, GradientStatus, IterationBudget},
    traits::{config::check_positive, Algorithm, Configurable, Parameters, StepLength},
    Float,
};

/// The internal configuration struct for the [`GradientDescent`] algorithm.
#[derive(Clone, Debug)]
pub struct GradientDescentConfig {
    budget: IterationBudget,
    min_gradient: Float,
    step_size: StepSize,
    verbose: bool,
    log_file: Option<PathBuf>,
}
impl GradientDescentConfig {
    /// Set the maximum number of iterations (default = `1000`).
    pub fn with_max_iterations(&mut self, value: usize) -> &mut Self {
        self.budget.set_max_iterations(value);
        self
    }
    /// Set the tolerance on the gradient norm (default = $`\sqrt[3]{\varepsilon}`$).
    pub const fn with_min_gradient(&mut self, value: Float) -> &mut Self {
        self.min_gradient = value;
        self
    }
    /// Set the step-length strategy (default = [`StepSize::armijo`]).
    pub fn with_step_size(&mut self, value: StepSize) -> &mut Self {
        self.step_size = value;
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
    /// The tolerance on the gradient norm.
    pub const fn min_gradient(&self) -> Float {
        self.min_gradient
    }
    /// The step-length strategy.
    pub const fn step_size(&self) -> &StepSize {
        &self.step_size
    }
}
impl Default for GradientDescentConfig {
    fn default() -> Self {
        Self {
            budget: IterationBudget::new(1000),
            min_gradient: Float::EPSILON.cbrt(),
            step_size: StepSize::armijo(),
            verbose: false,
            log_file: None,
        }
    }
}
impl Parameters for GradientDescentConfig {
    fn budget(&self) -> &IterationBudget {
        &self.budget
    }
    fn budget_mut(&mut self) -> &mut IterationBudget {
        &mut self.budget
    }
    fn validate(&self) -> Result<(), &'static str> {
        check_positive(
            self.min_gradient,
            "gradient descent min_gradient must be positive",
        )?;
        self.step_size.validate()
    }
    fn verbose(&self) -> bool {
        self.verbose
    }
    fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }
}

/// Steepest descent.
///
/// ```math
/// \vec{x}_{k+1} = \vec{x}_k - \lambda_k \nabla f(\vec{x}_k)
/// ```
///
/// where $`\lambda_k`$ comes from the configured [`StepSize`]. The run converges once the
/// gradient norm drops below the configured tolerance.
#[derive(Clone, Debug, Default)]
pub struct GradientDescent {
    config: GradientDescentConfig,
}

impl Configurable for GradientDescent {
    type Config = GradientDescentConfig;

    fn get_config(&self) -> &Self::Config {
        &self.config
    }
    fn get_config_mut(&mut self) -> &mut Self::Config {
        &mut self.config
    }
}

impl<U, E> Algorithm<U, E> for GradientDescent {
    fn name(&self) -> &'static str {
        "Gradient Descent"
    }

    fn initialize(
        &mut self,
        _evaluator: &mut Evaluator<U, E>,
        _status: &mut GradientStatus,
    ) -> Result<(), Error<E>> {
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
        let direction = -evaluator.jacobian();
        let lambda = self.config.step_size.search(evaluator, &direction)?;
        let x = evaluator.point() + direction.scale(lambda);
        evaluator.set_point(x);
        Ok(())
    }
}
