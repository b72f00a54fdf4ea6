/// Module containing the Goldstein-Armijo inexact step-length search.
pub mod armijo;
pub use armijo::{Armijo, ArmijoConfig};

/// Module containing the bisection search on the directional derivative.
pub mod bisection;
pub use bisection::{Bisection, BisectionConfig};

use crate::{
    core::{Error, Evaluator},
    traits::{config::check_positive, Configurable, Parameters, StepLength},
    DVector, Float,
};

/// How a descent algorithm chooses the length of its step.
#[derive(Clone, Debug)]
pub enum StepSize {
    /// Always use the same multiplier.
    Fixed(Float),
    /// Use an inexact [`Armijo`] search.
    Armijo(Armijo),
    /// Use an exact [`Bisection`] search on the directional derivative.
    Bisection(Bisection),
}

impl Default for StepSize {
    fn default() -> Self {
        Self::Fixed(1.0)
    }
}

impl StepSize {
    /// A default [`Armijo`] search.
    pub fn armijo() -> Self {
        Self::Armijo(Armijo::default())
    }
    /// A default [`Bisection`] search.
    pub fn bisection() -> Self {
        Self::Bisection(Bisection::default())
    }
    /// Checks the fixed step or the wrapped search's configuration.
    ///
    /// # Errors
    ///
    /// Returns the violated constraint as a static message.
    pub fn validate(&self) -> Result<(), &'static str> {
        match self {
            Self::Fixed(step) => check_positive(*step, "fixed step size must be positive"),
            Self::Armijo(search) => search.get_config().validate(),
            Self::Bisection(search) => search.get_config().validate(),
        }
    }
}

impl<U, E> StepLength<U, E> for StepSize {
    fn search(
        &mut self,
        evaluator: &mut Evaluator<U, E>,
        direction: &DVector<Float>,
    ) -> Result<Float, Error<E>> {
        match self {
            Self::Fixed(step) => Ok(*step),
            Self::Armijo(search) => search.search(evaluator, direction),
            Self::Bisection(search) => search.search(evaluator, direction),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::StepSize;
    use crate::Float;

    #[test]
    fn fixed_step_must_be_positive() {
        assert!(StepSize::default().validate().is_ok());
        assert!(StepSize::Fixed(0.0).validate().is_err());
        assert!(StepSize::Fixed(Float::NAN).validate().is_err());
        assert!(StepSize::armijo().validate().is_ok());
        assert!(StepSize::bisection().validate().is_ok());
    }
}
