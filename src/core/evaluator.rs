use crate::{
    core::Error,
    traits::Gradient,
    DMatrix, DVector, Float,
};

/// Binds an objective to a current point and caches the value and gradient there.
///
/// The cached value and gradient describe the point passed to the most recent
/// [`Evaluator::set_point`] only after [`Evaluator::update`] (or [`Evaluator::update_value`] for
/// the value alone) has been called. Exactly one component drives the evaluator at a time, which
/// is enforced by handing it out as `&mut`.
pub struct Evaluator<'a, U, E> {
    problem: &'a dyn Gradient<U, E>,
    user_data: &'a mut U,
    x: DVector<Float>,
    fx: Float,
    g: DVector<Float>,
    n_f_evals: usize,
    n_g_evals: usize,
    n_h_evals: usize,
}

impl<'a, U, E> Evaluator<'a, U, E> {
    /// Create an evaluator positioned at `x0`. Nothing is evaluated yet.
    pub fn new(problem: &'a dyn Gradient<U, E>, x0: DVector<Float>, user_data: &'a mut U) -> Self {
        let n = x0.len();
        Self {
            problem,
            user_data,
            x: x0,
            fx: Float::NAN,
            g: DVector::zeros(n),
            n_f_evals: 0,
            n_g_evals: 0,
            n_h_evals: 0,
        }
    }

    /// Move to a new point. The cached value and gradient go stale until the next update.
    pub fn set_point(&mut self, x: DVector<Float>) {
        self.x = x;
    }
    /// The current point.
    pub const fn point(&self) -> &DVector<Float> {
        &self.x
    }
    /// The cached objective value.
    pub const fn value(&self) -> Float {
        self.fx
    }
    /// The cached gradient.
    pub const fn jacobian(&self) -> &DVector<Float> {
        &self.g
    }
    /// The number of free parameters.
    pub fn dimension(&self) -> usize {
        self.x.len()
    }
    /// The user data passed to the objective.
    pub fn user_data(&self) -> &U {
        &*self.user_data
    }

    /// Recompute the cached value at the current point.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Evaluation`] if the objective fails.
    pub fn update_value(&mut self) -> Result<(), Error<E>> {
        self.fx = self.evaluate_at_current()?;
        Ok(())
    }

    /// Recompute the cached value and gradient at the current point.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Evaluation`] if the objective fails.
    pub fn update(&mut self) -> Result<(), Error<E>> {
        self.fx = self.evaluate_at_current()?;
        self.n_g_evals += 1;
        self.g = self
            .problem
            .gradient(&self.x, self.user_data)
            .map_err(Error::Evaluation)?;
        Ok(())
    }

    fn evaluate_at_current(&mut self) -> Result<Float, Error<E>> {
        self.n_f_evals += 1;
        self.problem
            .evaluate(&self.x, self.user_data)
            .map_err(Error::Evaluation)
    }

    /// The objective value at an arbitrary point. The current point and cache are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Evaluation`] if the objective fails.
    pub fn evaluate(&mut self, x: &DVector<Float>) -> Result<Float, Error<E>> {
        self.n_f_evals += 1;
        self.problem
            .evaluate(x, self.user_data)
            .map_err(Error::Evaluation)
    }

    /// The gradient at an arbitrary point. The current point and cache are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Evaluation`] if the objective fails.
    pub fn gradient_at(&mut self, x: &DVector<Float>) -> Result<DVector<Float>, Error<E>> {
        self.n_g_evals += 1;
        self.problem
            .gradient(x, self.user_data)
            .map_err(Error::Evaluation)
    }

    /// The Hessian at the current point.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Evaluation`] if the objective fails.
    pub fn hessian(&mut self) -> Result<DMatrix<Float>, Error<E>> {
        self.n_h_evals += 1;
        self.problem
            .hessian(&self.x, self.user_data)
            .map_err(Error::Evaluation)
    }

    /// Number of objective evaluations so far.
    pub const fn n_f_evals(&self) -> usize {
        self.n_f_evals
    }
    /// Number of gradient evaluations so far.
    pub const fn n_g_evals(&self) -> usize {
        self.n_g_evals
    }
    /// Number of Hessian evaluations so far.
    pub const fn n_h_evals(&self) -> usize {
        self.n_h_evals
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use approx::assert_relative_eq;

    use super::Evaluator;
    use crate::{test_functions::Sphere, DVector};

    #[test]
    fn evaluate_leaves_current_state_alone() -> Result<(), crate::core::Error<Infallible>> {
        let problem = Sphere { n: 2 };
        let mut user_data = ();
        let mut evaluator: Evaluator<(), Infallible> =
            Evaluator::new(&problem, DVector::from_vec(vec![1.0, 2.0]), &mut user_data);
        evaluator.update()?;
        assert_relative_eq!(evaluator.value(), 5.0);

        let elsewhere = evaluator.evaluate(&DVector::from_vec(vec![3.0, 0.0]))?;
        assert_relative_eq!(elsewhere, 9.0);
        assert_relative_eq!(evaluator.value(), 5.0);
        assert_relative_eq!(evaluator.jacobian()[1], 4.0);
        assert_eq!(evaluator.point().as_slice(), &[1.0, 2.0]);
        assert_eq!(evaluator.n_f_evals(), 2);
        assert_eq!(evaluator.n_g_evals(), 1);
        Ok(())
    }

    #[test]
    fn set_point_is_stale_until_update() -> Result<(), crate::core::Error<Infallible>> {
        let problem = Sphere { n: 1 };
        let mut user_data = ();
        let mut evaluator: Evaluator<(), Infallible> =
            Evaluator::new(&problem, DVector::from_vec(vec![2.0]), &mut user_data);
        evaluator.update_value()?;
        evaluator.set_point(DVector::from_vec(vec![3.0]));
        assert_relative_eq!(evaluator.value(), 4.0);
        evaluator.update()?;
        assert_relative_eq!(evaluator.value(), 9.0);
        assert_relative_eq!(evaluator.jacobian()[0], 6.0);
        Ok(())
    }
}
