use std::convert::Infallible;

use crate::{
    traits::{CostFunction, Gradient},
    DMatrix, DVector, Float,
};

/// The Rosenbrock function, a non-convex function with a single minimum.
///
/// ```math
/// f(\vec{x}) = \sum_{i=1}^{n-1} \left[100(x_{i+1} - x_i^2)^2 + (1 - x_i)^2 \right]
/// ```
/// where $`n \geq 2`$. This function has a minimum at $`f(\vec{1}) = 0`$.
pub struct Rosenbrock {
    /// The number of dimensions of the function (must be >= 2).
    pub n: usize,
}
impl CostFunction for Rosenbrock {
    fn evaluate(&self, x: &DVector<Float>, _user_data: &mut ()) -> Result<Float, Infallible> {
        #[allow(clippy::suboptimal_flops)]
        Ok((0..(self.n - 1))
            .map(|i| 100.0 * (x[i + 1] - x[i].powi(2)).powi(2) + (1.0 - x[i]).powi(2))
            .sum())
    }
}
impl Gradient for Rosenbrock {
    fn gradient(
        &self,
        x: &DVector<Float>,
        _user_data: &mut (),
    ) -> Result<DVector<Float>, Infallible> {
        let mut g = DVector::zeros(self.n);
        for i in 0..(self.n - 1) {
            let r = x[i + 1] - x[i].powi(2);
            g[i] += -400.0 * x[i] * r - 2.0 * (1.0 - x[i]);
            g[i + 1] += 200.0 * r;
        }
        Ok(g)
    }
    fn hessian(
        &self,
        x: &DVector<Float>,
        _user_data: &mut (),
    ) -> Result<DMatrix<Float>, Infallible> {
        let mut h = DMatrix::zeros(self.n, self.n);
        for i in 0..(self.n - 1) {
            h[(i, i)] += 1200.0 * x[i].powi(2) - 400.0 * x[i + 1] + 2.0;
            h[(i, i + 1)] -= 400.0 * x[i];
            h[(i + 1, i)] -= 400.0 * x[i];
            h[(i + 1, i + 1)] += 200.0;
        }
        Ok(h)
    }
}
