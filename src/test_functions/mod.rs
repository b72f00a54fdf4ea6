/// Module containing the Rosenbrock test function.
pub mod rosenbrock;
pub use rosenbrock::Rosenbrock;

/// Module containing the sphere test function.
pub mod sphere;
pub use sphere::Sphere;

/// Module containing a general convex quadratic.
pub mod quadratic;
pub use quadratic::Quadratic;
