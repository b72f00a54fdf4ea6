/// Implementation of Newton's method.
pub mod newton;
pub use newton::{Newton, NewtonConfig};

/// Implementation of gradient descent with Nesterov momentum.
pub mod nesterov;
pub use nesterov::{NesterovConfig, NesterovMomentum};

/// Implementation of steepest descent.
pub mod gradient_descent;
pub use gradient_descent::{GradientDescent, GradientDescentConfig};
