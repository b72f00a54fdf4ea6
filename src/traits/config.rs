use std::{fmt::Debug, path::Path};

use crate::{core::IterationBudget, Float};

/// A trait used to imply an algorithm or search is configurable.
pub trait Configurable {
    /// The configuration struct for the algorithm.
    type Config: Parameters + Debug;

    /// Convenience method to use chainable methods to setup the configuration struct.
    fn setup_config<F>(&mut self, mut f: F) -> &mut Self
    where
        F: FnMut(&mut Self::Config) -> &mut Self::Config,
        Self: Sized,
    {
        f(self.get_config_mut());
        self
    }
    /// A helper method to get the internal configuration struct.
    fn get_config(&self) -> &Self::Config;
    /// A helper method to get the mutable internal configuration struct.
    fn get_config_mut(&mut self) -> &mut Self::Config;
}

/// The contract shared by every parameter bundle: an iteration budget with its counter, range
/// validation, and diagnostic switches.
pub trait Parameters {
    /// The bundle's [`IterationBudget`].
    fn budget(&self) -> &IterationBudget;
    /// The bundle's mutable [`IterationBudget`].
    fn budget_mut(&mut self) -> &mut IterationBudget;
    /// Checks every value against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns the violated constraint as a static message.
    fn validate(&self) -> Result<(), &'static str>;
    /// Whether per-iteration diagnostics are printed to stdout.
    fn verbose(&self) -> bool {
        false
    }
    /// A file that per-iteration diagnostics are appended to, if any.
    fn log_file(&self) -> Option<&Path> {
        None
    }
    /// The maximum number of iterations.
    fn max_iterations(&self) -> usize {
        self.budget().max_iterations()
    }
    /// The number of iterations completed so far.
    fn iterations(&self) -> usize {
        self.budget().iterations()
    }
    /// Advance the iteration counter by one.
    fn next_iteration(&mut self) {
        self.budget_mut().next_iteration();
    }
}

pub(crate) fn check_positive(value: Float, reason: &'static str) -> Result<(), &'static str> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(reason)
    }
}
