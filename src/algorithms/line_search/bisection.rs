use crate::{
    core::{utils::maybe_warn, Error, Evaluator, IterationBudget},
    traits::{config::check_positive, Configurable, Parameters, StepLength},
    DVector, Float,
};

/// The internal configuration struct for the [`Bisection`] search.
#[derive(Clone, Debug)]
pub struct BisectionConfig {
    budget: IterationBudget,
    lower_bound: Float,
    upper_bound: Float,
    epsilon: Float,
    verbose: bool,
}
impl BisectionConfig {
    /// Set the maximum number of halvings per search (default = `100`).
    pub fn with_max_iterations(&mut self, value: usize) -> &mut Self {
        self.budget.set_max_iterations(value);
        self
    }
    /// Set the initial bracket $`[a, b]`$ (default = `[0.0, 1.0]`).
    pub const fn with_bounds(&mut self, lower: Float, upper: Float) -> &mut Self {
        self.lower_bound = lower;
        self.upper_bound = upper;
        self
    }
    /// Set the bracket width below which the search stops (default = `1e-8`).
    pub const fn with_epsilon(&mut self, value: Float) -> &mut Self {
        self.epsilon = value;
        self
    }
    /// Print every midpoint to stdout (default = `false`).
    pub const fn with_verbose(&mut self, value: bool) -> &mut Self {
        self.verbose = value;
        self
    }
    /// The lower end of the initial bracket.
    pub const fn lower_bound(&self) -> Float {
        self.lower_bound
    }
    /// The upper end of the initial bracket.
    pub const fn upper_bound(&self) -> Float {
        self.upper_bound
    }
    /// The bracket width tolerance.
    pub const fn epsilon(&self) -> Float {
        self.epsilon
    }
}
impl Default for BisectionConfig {
    fn default() -> Self {
        Self {
            budget: IterationBudget::new(100),
            lower_bound: 0.0,
            upper_bound: 1.0,
            epsilon: 1e-8,
            verbose: false,
        }
    }
}
impl Parameters for BisectionConfig {
    fn budget(&self) -> &IterationBudget {
        &self.budget
    }
    fn budget_mut(&mut self) -> &mut IterationBudget {
        &mut self.budget
    }
    fn validate(&self) -> Result<(), &'static str> {
        check_positive(self.epsilon, "bisection epsilon must be positive")?;
        if !(self.lower_bound.is_finite()
            && self.upper_bound.is_finite()
            && self.lower_bound < self.upper_bound)
        {
            return Err("bisection bounds must be finite with lower_bound < upper_bound");
        }
        Ok(())
    }
    fn verbose(&self) -> bool {
        self.verbose
    }
}

/// A one-dimensional minimizer which bisects a bracket on the sign of the derivative.
///
/// Given $`\phi'`$ on $`[a, b]`$, the derivative is evaluated at the midpoint $`\lambda`$. The
/// search stops when $`b - a < \varepsilon`$ or when $`\phi'(\lambda)`$ is exactly zero. Otherwise
/// a positive derivative moves $`b`$ to $`\lambda`$ and a negative one moves $`a`$ to
/// $`\lambda`$. The bracket is assumed to contain a sign change of $`\phi'`$; this is not
/// checked. Without one the search walks to an end of the bracket.
///
/// As a [`StepLength`], the search minimizes $`\phi(\lambda) = f(\vec{x} + \lambda\vec{d})`$ with
/// $`\phi'(\lambda) = \nabla f(\vec{x} + \lambda\vec{d})\cdot\vec{d}`$, costing one gradient
/// evaluation per midpoint.
#[derive(Clone, Debug, Default)]
pub struct Bisection {
    config: BisectionConfig,
    lower: Float,
    upper: Float,
    lambda: Float,
}

impl Bisection {
    /// The current bracket.
    pub const fn bracket(&self) -> (Float, Float) {
        (self.lower, self.upper)
    }
    /// The most recent midpoint.
    pub const fn lambda(&self) -> Float {
        self.lambda
    }

    /// Minimize a function of one variable given its derivative `dphi`.
    ///
    /// The bracket and the iteration counter are reset from the configuration on every call. If
    /// the budget runs out first, the current midpoint is returned with a warning.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if `dphi` fails.
    #[allow(clippy::float_cmp)]
    pub fn minimize<E, F>(&mut self, mut dphi: F) -> Result<Float, E>
    where
        F: FnMut(Float) -> Result<Float, E>,
    {
        self.config.budget.reset();
        self.lower = self.config.lower_bound;
        self.upper = self.config.upper_bound;
        loop {
            self.lambda = 0.5 * (self.lower + self.upper);
            let slope = dphi(self.lambda)?;
            if self.config.verbose {
                println!(
                    "bisection {:>4}: lambda = {:.6e}  dphi = {:+.6e}",
                    self.config.budget.iterations(),
                    self.lambda,
                    slope
                );
            }
            if self.upper - self.lower < self.config.epsilon || slope == 0.0 {
                return Ok(self.lambda);
            }
            if self.config.budget.is_exhausted() {
                maybe_warn(&format!(
                    "Bisection did not reach a bracket narrower than {} in {} iterations",
                    self.config.epsilon,
                    self.config.budget.max_iterations()
                ));
                return Ok(self.lambda);
            }
            self.config.budget.next_iteration();
            if slope > 0.0 {
                self.upper = self.lambda;
            } else {
                self.lower = self.lambda;
            }
        }
    }
}

impl Configurable for Bisection {
    type Config = BisectionConfig;

    fn get_config(&self) -> &Self::Config {
        &self.config
    }
    fn get_config_mut(&mut self) -> &mut Self::Config {
        &mut self.config
    }
}

impl<U, E> StepLength<U, E> for Bisection {
    fn search(
        &mut self,
        evaluator: &mut Evaluator<U, E>,
        direction: &DVector<Float>,
    ) -> Result<Float, Error<E>> {
        let x = evaluator.point().clone();
        self.minimize(|lambda| {
            evaluator
                .gradient_at(&(&x + direction.scale(lambda)))
                .map(|g| g.dot(direction))
        })
    }
}
