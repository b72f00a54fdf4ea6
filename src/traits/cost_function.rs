use std::convert::Infallible;

use crate::{DMatrix, DVector, Float};

/// A trait which describes a function $`f(\mathbb{R}^n) \to \mathbb{R}`$
///
/// Such a function may also take a `user_data: &mut U` field which can be used to pass external
/// arguments to the function during minimization, or can be modified by the function itself.
///
/// The `CostFunction` trait takes a generic `U` representing the type of user data/arguments
/// and a generic `E` representing any possible errors that might be returned during function
/// execution.
pub trait CostFunction<U = (), E = Infallible> {
    /// The evaluation of the function at a point `x` with the given arguments/user data.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if the evaluation fails. Users should implement this trait to return a
    /// [`std::convert::Infallible`] if the function evaluation never fails.
    fn evaluate(&self, x: &DVector<Float>, user_data: &mut U) -> Result<Float, E>;
}

/// A [`CostFunction`] with first and second derivatives.
///
/// Both derivatives default to central finite differences with a per-coordinate step of
/// $`\sqrt[3]{\varepsilon}(|x_i| + 1)`$. Override them whenever the exact expressions are known;
/// [`Newton`](crate::algorithms::Newton) in particular is only as good as its Hessian.
pub trait Gradient<U = (), E = Infallible>: CostFunction<U, E> {
    /// The gradient of the function at `x`.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if the evaluation fails. See [`CostFunction::evaluate`] for more
    /// information.
    fn gradient(&self, x: &DVector<Float>, user_data: &mut U) -> Result<DVector<Float>, E> {
        let mut grad = DVector::zeros(x.len());
        let mut shifted = x.clone();
        for i in 0..x.len() {
            let h = difference_step(x[i]);
            shifted[i] = x[i] + h;
            let f_plus = self.evaluate(&shifted, user_data)?;
            shifted[i] = x[i] - h;
            let f_minus = self.evaluate(&shifted, user_data)?;
            shifted[i] = x[i];
            grad[i] = (f_plus - f_minus) / (2.0 * h);
        }
        Ok(grad)
    }

    /// The Hessian of the function at `x`.
    ///
    /// The default differentiates [`Gradient::gradient`] column by column and symmetrizes the
    /// result.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if the evaluation fails. See [`CostFunction::evaluate`] for more
    /// information.
    fn hessian(&self, x: &DVector<Float>, user_data: &mut U) -> Result<DMatrix<Float>, E> {
        let n = x.len();
        let mut jac = DMatrix::zeros(n, n);
        let mut shifted = x.clone();
        for j in 0..n {
            let h = difference_step(x[j]);
            shifted[j] = x[j] + h;
            let g_plus = self.gradient(&shifted, user_data)?;
            shifted[j] = x[j] - h;
            let g_minus = self.gradient(&shifted, user_data)?;
            shifted[j] = x[j];
            jac.set_column(j, &((g_plus - g_minus) / (2.0 * h)));
        }
        Ok((&jac + jac.transpose()) * 0.5)
    }
}

fn difference_step(xi: Float) -> Float {
    Float::EPSILON.cbrt() * (xi.abs() + 1.0)
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use approx::assert_relative_eq;

    use crate::{
        traits::{CostFunction, Gradient},
        DVector, Float,
    };

    struct Bowl;
    impl CostFunction for Bowl {
        fn evaluate(&self, x: &DVector<Float>, _: &mut ()) -> Result<Float, Infallible> {
            Ok(3.0 * x[0].powi(2) + x[0] * x[1] + 2.0 * x[1].powi(2) - x[1])
        }
    }
    impl Gradient for Bowl {}

    #[test]
    fn finite_difference_gradient() -> Result<(), Infallible> {
        let x = DVector::from_vec(vec![1.0, -2.0]);
        let g = Bowl.gradient(&x, &mut ())?;
        assert_relative_eq!(g[0], 6.0 - 2.0, epsilon = Float::EPSILON.sqrt());
        assert_relative_eq!(g[1], 1.0 - 8.0 - 1.0, epsilon = Float::EPSILON.sqrt());
        Ok(())
    }

    #[test]
    fn finite_difference_hessian_is_symmetric() -> Result<(), Infallible> {
        let x = DVector::from_vec(vec![0.5, 0.25]);
        let h = Bowl.hessian(&x, &mut ())?;
        assert_relative_eq!(h[(0, 0)], 6.0, epsilon = 1e-4);
        assert_relative_eq!(h[(1, 1)], 4.0, epsilon = 1e-4);
        assert_relative_eq!(h[(0, 1)], 1.0, epsilon = 1e-4);
        assert_eq!(h[(0, 1)], h[(1, 0)]);
        Ok(())
    }
}
