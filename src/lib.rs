//! `descent` provides unconstrained function minimization built from interchangeable iterative
//! strategies. An objective is described by implementing [`CostFunction`](traits::CostFunction)
//! and [`Gradient`](traits::Gradient) on a struct. The gradient and Hessian have central
//! finite-difference defaults, so exact derivatives are optional but recommended.
//!
//! # Table of Contents
//! - [Key Features](#key-features)
//! - [Quick Start](#quick-start)
//! - [Step Lengths](#step-lengths)
//! - [Diagnostics](#diagnostics)
//!
//! # Key Features
//! * A single convergence loop ([`Engine`](core::Engine)) drives every descent strategy.
//! * Second-order [`Newton`](algorithms::Newton), momentum-accelerated
//!   [`NesterovMomentum`](algorithms::NesterovMomentum), and plain
//!   [`GradientDescent`](algorithms::GradientDescent).
//! * Pluggable step-length strategies: the inexact Goldstein-Armijo search
//!   ([`Armijo`](algorithms::line_search::Armijo)) and an exact search by bisection on the
//!   directional derivative ([`Bisection`](algorithms::line_search::Bisection)).
//! * Running out of iterations is not an error. The caller always receives the last point along
//!   with a message describing how the run ended.
//!
//! # Quick Start
//!
//! ```rust
//! use std::convert::Infallible;
//! use descent::prelude::*;
//! use descent::algorithms::Newton;
//!
//! struct Parabola;
//! impl CostFunction for Parabola {
//!     fn evaluate(&self, x: &DVector<Float>, _: &mut ()) -> Result<Float, Infallible> {
//!         Ok(x[0] * x[0])
//!     }
//! }
//! impl Gradient for Parabola {
//!     fn gradient(&self, x: &DVector<Float>, _: &mut ()) -> Result<DVector<Float>, Infallible> {
//!         Ok(DVector::from_element(1, 2.0 * x[0]))
//!     }
//!     fn hessian(&self, _: &DVector<Float>, _: &mut ()) -> Result<DMatrix<Float>, Infallible> {
//!         Ok(DMatrix::from_element(1, 1, 2.0))
//!     }
//! }
//!
//! fn main() -> Result<(), Error<Infallible>> {
//!     let mut engine = Engine::new(Newton::default());
//!     engine.setup_algorithm(|a| a.setup_config(|c| c.with_min_delta_x(1e-6)));
//!     let summary = engine.process(&Parabola, &[10.0], &mut ())?;
//!     assert!(summary.converged());
//!     assert_eq!(summary.iterations, 1);
//!     Ok(())
//! }
//! ```
//!
//! # Step Lengths
//!
//! [`Newton`](algorithms::Newton) and [`GradientDescent`](algorithms::GradientDescent) choose how
//! far to move along their descent direction through a
//! [`StepSize`](algorithms::line_search::StepSize).
//! A fixed step is the default. The Goldstein-Armijo search accepts a step $`\lambda`$ when
//!
//! ```math
//! \mu\rho\lambda\, \nabla f(\vec{x})\cdot\vec{d} \leq f(\vec{x} + \lambda\vec{d}) - f(\vec{x}) \leq \rho\lambda\, \nabla f(\vec{x})\cdot\vec{d}
//! ```
//!
//! growing the step when the lower bound fails and shrinking it when the upper bound fails.
//!
//! # Diagnostics
//!
//! Every pass of the loop is reported to the [`Observer`](traits::Observer)s registered on the
//! [`Engine`](core::Engine). Setting `verbose` on an algorithm's configuration prints one line per
//! iteration, and setting a `log_file` appends the same lines to a plain-text file. Warnings
//! (such as running out of iterations) are printed to stderr and can be silenced with
//! [`disable_warnings`](core::utils::disable_warnings) or `DESCENT_WARNINGS=0`.
#![warn(
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::doc_markdown,
    clippy::doc_link_with_quotes,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::perf,
    clippy::style,
    missing_docs
)]

pub use nalgebra::{DMatrix, DVector};

/// The floating-point type used throughout the crate (`f64`, or `f32` with the `f32` feature).
#[cfg(not(feature = "f32"))]
pub type Float = f64;

/// The floating-point type used throughout the crate (`f64`, or `f32` with the `f32` feature).
#[cfg(feature = "f32")]
pub type Float = f32;

/// Module containing the descent algorithms and step-length searches.
pub mod algorithms;
/// Module containing the minimization loop, the objective evaluator, and result types.
pub mod core;
/// Module containing standard functions for testing algorithms.
pub mod test_functions;
/// Module containing the traits used to extend the crate.
pub mod traits;

/// Prelude module containing everything someone should need to use this crate for
/// non-development purposes.
pub mod prelude {
    pub use crate::{
        core::{Engine, Error, GradientStatus, MinimizationSummary, Outcome},
        traits::{Configurable, CostFunction, Gradient, Observer, Parameters},
        DMatrix, DVector, Float,
    };
}
