use std::path::{Path, PathBuf};

use crate::{
    algorithms::line_search::StepSize,
    core::{Error, Evaluator, GradientStatus, IterationBudget},
    traits::{config::check_positive, Algorithm, Configurable, Parameters, StepLength},
    DVector, Float,
};

/// The internal configuration struct for the [`Newton`] algorithm.
#[derive(Clone, Debug)]
pub struct NewtonConfig {
    budget: IterationBudget,
    min_delta_x: Float,
    step_size: StepSize,
    verbose: bool,
    log_file: Option<PathBuf>,
}
impl NewtonConfig {
    /// Set the maximum number of iterations (default = `1000`).
    pub fn with_max_iterations(&mut self, value: usize) -> &mut Self {
        self.budget.set_max_iterations(value);
        self
    }
    /// Set the tolerance on the Newton step norm $`\|\Delta\vec{x}\|`$ (default =
    /// $`\sqrt{\varepsilon}`$).
    pub const fn with_min_delta_x(&mut self, value: Float) -> &mut Self {
        self.min_delta_x = value;
        self
    }
    /// Set the step-length strategy applied along the Newton direction (default =
    /// [`StepSize::Fixed(1.0)`](StepSize::Fixed), the undamped method).
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
    /// The tolerance on the Newton step norm.
    pub const fn min_delta_x(&self) -> Float {
        self.min_delta_x
    }
    /// The step-length strategy.
    pub const fn step_size(&self) -> &StepSize {
        &self.step_size
    }
}
impl Default for NewtonConfig {
    fn default() -> Self {
        Self {
            budget: IterationBudget::new(1000),
            min_delta_x: Float::EPSILON.sqrt(),
            step_size: StepSize::default(),
            verbose: false,
            log_file: None,
        }
    }
}
impl Parameters for NewtonConfig {
    fn budget(&self) -> &IterationBudget {
        &self.budget
    }
    fn budget_mut(&mut self) -> &mut IterationBudget {
        &mut self.budget
    }
    fn validate(&self) -> Result<(), &'static str> {
        check_positive(self.min_delta_x, "newton min_delta_x must be positive")?;
        self.step_size.validate()
    }
    fn verbose(&self) -> bool {
        self.verbose
    }
    fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }
}

/// Newton's method.
///
/// Each iteration solves the Newton system with the Hessian $`H`$ at the current point,
///
/// ```math
/// H(\vec{x}_k)\,\Delta\vec{x} = \nabla f(\vec{x}_k),
/// ```
///
/// and moves to $`\vec{x}_{k+1} = \vec{x}_k - \lambda\Delta\vec{x}`$, where $`\lambda = 1`$
/// unless a [`StepSize`] search is configured. The run converges once $`\|\Delta\vec{x}\|`$ drops
/// below the configured tolerance. On a convex quadratic the undamped method lands on the
/// minimizer in one step.
///
/// The system is solved by LU decomposition. A singular Hessian stops the run with
/// [`Error::SingularHessian`].
#[derive(Clone, Debug, Default)]
pub struct Newton {
    config: NewtonConfig,
    delta_x: DVector<Float>,
}

impl Newton {
    /// The most recent Newton step $`\Delta\vec{x}`$.
    pub const fn delta_x(&self) -> &DVector<Float> {
        &self.delta_x
    }
}

impl Configurable for Newton {
    type Config = NewtonConfig;

    fn get_config(&self) -> &Self::Config {
        &self.config
    }
    fn get_config_mut(&mut self) -> &mut Self::Config {
        &mut self.config
    }
}

impl<U, E> Algorithm<U, E> for Newton {
    fn name(&self) -> &'static str {
        "Newton"
    }

    fn initialize(
        &mut self,
        evaluator: &mut Evaluator<U, E>,
        _status: &mut GradientStatus,
    ) -> Result<(), Error<E>> {
        self.delta_x = DVector::zeros(evaluator.dimension());
        Ok(())
    }

    fn check_for_termination(
        &mut self,
        evaluator: &mut Evaluator<U, E>,
        status: &mut GradientStatus,
    ) -> Result<bool, Error<E>> {
        let iteration = self.config.iterations();
        let hessian = evaluator.hessian()?;
        self.delta_x = hessian
            .lu()
            .solve(evaluator.jacobian())
            .filter(|delta_x| delta_x.iter().all(|d| d.is_finite()))
            .ok_or(Error::SingularHessian { iteration })?;
        if self.delta_x.norm() < self.config.min_delta_x {
            status.with_message("STEP NORM BELOW TOLERANCE");
            return Ok(true);
        }
        Ok(false)
    }

    fn step(
        &mut self,
        evaluator: &mut Evaluator<U, E>,
        _status: &mut GradientStatus,
    ) -> Result<(), Error<E>> {
        let direction = -&self.delta_x;
        let lambda = self.config.step_size.search(evaluator, &direction)?;
        let x = evaluator.point() + direction.scale(lambda);
        evaluator.set_point(x);
        Ok(())
    }
}
