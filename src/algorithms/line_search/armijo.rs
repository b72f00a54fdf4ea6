use crate::{
    core::{utils::maybe_warn, Error, Evaluator, IterationBudget},
    traits::{config::check_positive, Configurable, Parameters, StepLength},
    DVector, Float,
};

/// The internal configuration struct for the [`Armijo`] step-length search.
#[derive(Clone, Debug)]
pub struct ArmijoConfig {
    budget: IterationBudget,
    lower_bound: Float,
    upper_bound: Float,
    init_lambda_factor: Float,
    increase_factor: Float,
    decrease_factor: Float,
    rho: Float,
    mu: Float,
    verbose: bool,
}
impl ArmijoConfig {
    /// Set the maximum number of trial steps per search (default = `100`).
    pub fn with_max_iterations(&mut self, value: usize) -> &mut Self {
        self.budget.set_max_iterations(value);
        self
    }
    /// Set the smallest step the search will shrink to (default = `0.0`).
    pub const fn with_lower_bound(&mut self, value: Float) -> &mut Self {
        self.lower_bound = value;
        self
    }
    /// Set the largest step of the search interval (default = `1.0`).
    pub const fn with_upper_bound(&mut self, value: Float) -> &mut Self {
        self.upper_bound = value;
        self
    }
    /// Set $`\lambda_0`$ (default = `1.0`). The first trial step is $`\lambda_0`$ times the upper
    /// bound.
    pub const fn with_init_lambda_factor(&mut self, value: Float) -> &mut Self {
        self.init_lambda_factor = value;
        self
    }
    /// Set the factor applied when a trial step is too short (default = `1.5`).
    pub const fn with_increase_factor(&mut self, value: Float) -> &mut Self {
        self.increase_factor = value;
        self
    }
    /// Set the factor applied when a trial step does not decrease the objective enough
    /// (default = `0.5`).
    pub const fn with_decrease_factor(&mut self, value: Float) -> &mut Self {
        self.decrease_factor = value;
        self
    }
    /// Set the sufficient-decrease coefficient $`\rho`$ (default = `0.25`).
    pub const fn with_rho(&mut self, value: Float) -> &mut Self {
        self.rho = value;
        self
    }
    /// Set the coefficient $`\mu`$ of the lower acceptance line $`\mu\rho`$ (default = `3.0`).
    pub const fn with_mu(&mut self, value: Float) -> &mut Self {
        self.mu = value;
        self
    }
    /// Print every trial step to stdout (default = `false`).
    pub const fn with_verbose(&mut self, value: bool) -> &mut Self {
        self.verbose = value;
        self
    }
    /// The smallest step the search will shrink to.
    pub const fn lower_bound(&self) -> Float {
        self.lower_bound
    }
    /// The largest step of the search interval.
    pub const fn upper_bound(&self) -> Float {
        self.upper_bound
    }
    /// The initial step factor $`\lambda_0`$.
    pub const fn init_lambda_factor(&self) -> Float {
        self.init_lambda_factor
    }
    /// The factor applied when a trial step is too short.
    pub const fn increase_factor(&self) -> Float {
        self.increase_factor
    }
    /// The factor applied when a trial step is too long.
    pub const fn decrease_factor(&self) -> Float {
        self.decrease_factor
    }
    /// The sufficient-decrease coefficient $`\rho`$.
    pub const fn rho(&self) -> Float {
        self.rho
    }
    /// The lower acceptance coefficient $`\mu`$.
    pub const fn mu(&self) -> Float {
        self.mu
    }
}
impl Default for ArmijoConfig {
    fn default() -> Self {
        Self {
            budget: IterationBudget::new(100),
            lower_bound: 0.0,
            upper_bound: 1.0,
            init_lambda_factor: 1.0,
            increase_factor: 1.5,
            decrease_factor: 0.5,
            rho: 0.25,
            mu: 3.0,
            verbose: false,
        }
    }
}
impl Parameters for ArmijoConfig {
    fn budget(&self) -> &IterationBudget {
        &self.budget
    }
    fn budget_mut(&mut self) -> &mut IterationBudget {
        &mut self.budget
    }
    fn validate(&self) -> Result<(), &'static str> {
        if !(self.decrease_factor > 0.0 && self.decrease_factor < 1.0) {
            return Err("armijo decrease_factor must be in (0, 1)");
        }
        if !(self.increase_factor > 1.0 && self.increase_factor.is_finite()) {
            return Err("armijo increase_factor must be greater than 1");
        }
        if !(self.rho > 0.0 && self.rho < 1.0) {
            return Err("armijo rho must be in (0, 1)");
        }
        if !(self.mu > 1.0 && self.mu * self.rho < 1.0) {
            return Err("armijo mu must be greater than 1 with mu * rho below 1");
        }
        check_positive(
            self.init_lambda_factor,
            "armijo init_lambda_factor must be positive",
        )?;
        if !(self.lower_bound >= 0.0 && self.lower_bound < self.upper_bound)
            || !self.upper_bound.is_finite()
        {
            return Err("armijo bounds must satisfy 0 <= lower_bound < upper_bound");
        }
        Ok(())
    }
    fn verbose(&self) -> bool {
        self.verbose
    }
}

/// An inexact step-length search which accepts the first step satisfying the Goldstein-Armijo
/// conditions
///
/// ```math
/// \mu\rho\lambda\, \nabla f(\vec{x})\cdot\vec{d} \leq f(\vec{x} + \lambda\vec{d}) - f(\vec{x}) \leq \rho\lambda\, \nabla f(\vec{x})\cdot\vec{d}
/// ```
///
/// with $`0 < \rho < 1 < \mu`$ and $`\mu\rho < 1`$. The right inequality asks for sufficient
/// decrease; the left keeps the step from being needlessly short. The search starts from
/// $`\lambda_0`$ times the upper bound, multiplies by the increase factor when only the left
/// inequality fails, and by the decrease factor when the right one fails.
///
/// Both factors are applied as given, so a pair that keeps overshooting in both directions can
/// oscillate. Such a search ends when its own iteration budget runs out, returning the last trial
/// step with a warning.
#[derive(Clone, Debug, Default)]
pub struct Armijo {
    config: ArmijoConfig,
    lambda: Float,
}

impl Armijo {
    /// The most recent trial step.
    pub const fn lambda(&self) -> Float {
        self.lambda
    }
}

impl Configurable for Armijo {
    type Config = ArmijoConfig;

    fn get_config(&self) -> &Self::Config {
        &self.config
    }
    fn get_config_mut(&mut self) -> &mut Self::Config {
        &mut self.config
    }
}

impl<U, E> StepLength<U, E> for Armijo {
    fn search(
        &mut self,
        evaluator: &mut Evaluator<U, E>,
        direction: &DVector<Float>,
    ) -> Result<Float, Error<E>> {
        let config = &mut self.config;
        config.budget.reset();
        self.lambda = config.init_lambda_factor * config.upper_bound;
        let fx = evaluator.value();
        let slope = evaluator.jacobian().dot(direction);
        loop {
            if config.budget.is_exhausted() {
                maybe_warn(&format!(
                    "Armijo search did not find an acceptable step in {} iterations, using {}",
                    config.budget.max_iterations(),
                    self.lambda
                ));
                return Ok(self.lambda);
            }
            config.budget.next_iteration();
            let trial = evaluator.point() + direction.scale(self.lambda);
            let decrease = evaluator.evaluate(&trial)? - fx;
            let upper_line = config.rho * self.lambda * slope;
            if config.verbose {
                println!(
                    "armijo {:>4}: lambda = {:.6e}  f(x + lambda d) - f(x) = {:+.6e}",
                    config.budget.iterations(),
                    self.lambda,
                    decrease
                );
            }
            if decrease <= upper_line {
                if decrease >= config.mu * upper_line {
                    return Ok(self.lambda);
                }
                self.lambda *= config.increase_factor;
            } else {
                self.lambda = (self.lambda * config.decrease_factor).max(config.lower_bound);
            }
        }
    }
}
