use std::convert::Infallible;

use crate::{
    traits::{CostFunction, Gradient},
    DMatrix, DVector, Float,
};

/// The sphere function, the simplest convex test function.
///
/// ```math
/// f(\vec{x}) = \sum_{i=1}^{n} x_i^2
/// ```
/// This function has a minimum at $`f(\vec{0}) = 0`$.
pub struct Sphere {
    /// The number of dimensions of the function.
    pub n: usize,
}
impl CostFunction for Sphere {
    fn evaluate(&self, x: &DVector<Float>, _user_data: &mut ()) -> Result<Float, Infallible> {
        Ok((0..self.n).map(|i| x[i].powi(2)).sum())
    }
}
impl Gradient for Sphere {
    fn gradient(
        &self,
        x: &DVector<Float>,
        _user_data: &mut (),
    ) -> Result<DVector<Float>, Infallible> {
        Ok(x.scale(2.0))
    }
    fn hessian(
        &self,
        _x: &DVector<Float>,
        _user_data: &mut (),
    ) -> Result<DMatrix<Float>, Infallible> {
        Ok(DMatrix::identity(self.n, self.n).scale(2.0))
    }
}
