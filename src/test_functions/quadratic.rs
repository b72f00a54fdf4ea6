use std::convert::Infallible;

use crate::{
    traits::{CostFunction, Gradient},
    DMatrix, DVector, Float,
};

/// A quadratic with constant Hessian.
///
/// ```math
/// f(\vec{x}) = \frac{1}{2}\vec{x}^\intercal A \vec{x} - \vec{b}^\intercal\vec{x}
/// ```
/// For a symmetric positive-definite $`A`$ the minimum is at $`A\vec{x} = \vec{b}`$. Only the
/// symmetric part of $`A`$ is used.
pub struct Quadratic {
    a: DMatrix<Float>,
    b: DVector<Float>,
}
impl Quadratic {
    /// Create the quadratic from a square matrix and a vector of matching dimension.
    ///
    /// # Panics
    ///
    /// Panics if `a` is not square or `b` does not match its dimension.
    pub fn new(a: DMatrix<Float>, b: DVector<Float>) -> Self {
        assert!(
            a.is_square() && a.nrows() == b.len(),
            "Quadratic needs a square matrix matching the vector ({}x{} vs {})",
            a.nrows(),
            a.ncols(),
            b.len()
        );
        let a = (&a + a.transpose()) * 0.5;
        Self { a, b }
    }
}
impl CostFunction for Quadratic {
    fn evaluate(&self, x: &DVector<Float>, _user_data: &mut ()) -> Result<Float, Infallible> {
        Ok(0.5 * x.dot(&(&self.a * x)) - self.b.dot(x))
    }
}
impl Gradient for Quadratic {
    fn gradient(
        &self,
        x: &DVector<Float>,
        _user_data: &mut (),
    ) -> Result<DVector<Float>, Infallible> {
        Ok(&self.a * x - &self.b)
    }
    fn hessian(
        &self,
        _x: &DVector<Float>,
        _user_data: &mut (),
    ) -> Result<DMatrix<Float>, Infallible> {
        Ok(self.a.clone())
    }
}
