use std::{convert::Infallible, fs, sync::Arc};

use approx::assert_relative_eq;
use descent::{
    algorithms::{line_search::StepSize, GradientDescent, NesterovMomentum, Newton},
    prelude::*,
};
use parking_lot::RwLock;

struct Parabola;
impl CostFunction for Parabola {
    fn evaluate(&self, x: &DVector<Float>, _user_data: &mut ()) -> Result<Float, Infallible> {
        Ok(x[0].powi(2))
    }
}
impl Gradient for Parabola {
    fn gradient(
        &self,
        x: &DVector<Float>,
        _user_data: &mut (),
    ) -> Result<DVector<Float>, Infallible> {
        Ok(DVector::from_element(1, 2.0 * x[0]))
    }
    fn hessian(
        &self,
        _x: &DVector<Float>,
        _user_data: &mut (),
    ) -> Result<DMatrix<Float>, Infallible> {
        Ok(DMatrix::from_element(1, 1, 2.0))
    }
}

struct Quartic;
impl CostFunction for Quartic {
    fn evaluate(&self, x: &DVector<Float>, _user_data: &mut ()) -> Result<Float, Infallible> {
        Ok(x[0].powi(4))
    }
}
impl Gradient for Quartic {
    fn gradient(
        &self,
        x: &DVector<Float>,
        _user_data: &mut (),
    ) -> Result<DVector<Float>, Infallible> {
        Ok(DVector::from_element(1, 4.0 * x[0].powi(3)))
    }
    fn hessian(
        &self,
        x: &DVector<Float>,
        _user_data: &mut (),
    ) -> Result<DMatrix<Float>, Infallible> {
        Ok(DMatrix::from_element(1, 1, 12.0 * x[0].powi(2)))
    }
}

#[derive(Debug)]
struct Boom;

/// A parabola that refuses to be evaluated below `x = 0.5`.
struct Fragile;
impl CostFunction<(), Boom> for Fragile {
    fn evaluate(&self, x: &DVector<Float>, _user_data: &mut ()) -> Result<Float, Boom> {
        if x[0] < 0.5 {
            return Err(Boom);
        }
        Ok(x[0].powi(2))
    }
}
impl Gradient<(), Boom> for Fragile {
    fn gradient(&self, x: &DVector<Float>, _user_data: &mut ()) -> Result<DVector<Float>, Boom> {
        if x[0] < 0.5 {
            return Err(Boom);
        }
        Ok(DVector::from_element(1, 2.0 * x[0]))
    }
}

/// Counts calls to the user's objective through the user data.
struct Counted;
impl CostFunction<usize> for Counted {
    fn evaluate(&self, x: &DVector<Float>, calls: &mut usize) -> Result<Float, Infallible> {
        *calls += 1;
        Ok(x.norm_squared())
    }
}
impl Gradient<usize> for Counted {
    fn gradient(
        &self,
        x: &DVector<Float>,
        calls: &mut usize,
    ) -> Result<DVector<Float>, Infallible> {
        *calls += 1;
        Ok(x.scale(2.0))
    }
}

#[derive(Default)]
struct Trace(Vec<Float>);
impl<U> Observer<U> for Trace {
    fn observe(&mut self, _iteration: usize, status: &GradientStatus, _user_data: &U) {
        self.0.push(status.x[0]);
    }
}

#[test]
fn newton_solves_parabola_in_one_update() -> Result<(), Error<Infallible>> {
    let mut m = Engine::new(Newton::default());
    m.setup_algorithm(|a| a.setup_config(|c| c.with_min_delta_x(1e-6)));
    let summary = m.process(&Parabola, &[10.0], &mut ())?;
    assert_eq!(summary.outcome, Outcome::Converged);
    assert_eq!(summary.iterations, 1);
    assert_relative_eq!(summary.x[0], 0.0);
    Ok(())
}

#[test]
fn nesterov_solves_parabola_within_budget() -> Result<(), Error<Infallible>> {
    let trace = Arc::new(RwLock::new(Trace::default()));
    let mut m: Engine<NesterovMomentum> = Engine::new(NesterovMomentum::default());
    m.setup_algorithm(|a| {
        a.setup_config(|c| {
            c.with_learning_rate(0.1)
                .with_momentum(0.9)
                .with_min_gradient(1e-4)
                .with_max_iterations(1000)
        })
    })
    .add_observer(trace.clone());
    let summary = m.process(&Parabola, &[10.0], &mut ())?;
    assert!(summary.converged());
    assert!(summary.iterations < 1000);
    assert_relative_eq!(summary.x[0], 0.0, epsilon = 5e-5);

    // the envelope of |x| shrinks once the first oscillation is over
    let trace = trace.read();
    let peaks: Vec<Float> = trace
        .0
        .windows(3)
        .filter(|w| w[1].abs() >= w[0].abs() && w[1].abs() >= w[2].abs())
        .map(|w| w[1].abs())
        .collect();
    assert!(peaks.len() > 2);
    assert!(peaks.windows(2).all(|p| p[1] < p[0]));
    Ok(())
}

#[test]
fn zero_momentum_matches_gradient_descent() -> Result<(), Error<Infallible>> {
    let problem = descent::test_functions::Rosenbrock { n: 3 };
    let x0 = [-1.0, 0.5, 1.5];
    let alpha = 1e-4;

    let nesterov_trace = Arc::new(RwLock::new(Trace::default()));
    let mut nesterov: Engine<NesterovMomentum> = Engine::new(NesterovMomentum::default());
    nesterov
        .setup_algorithm(|a| {
            a.setup_config(|c| {
                c.with_learning_rate(alpha)
                    .with_momentum(0.0)
                    .with_max_iterations(50)
            })
        })
        .add_observer(nesterov_trace.clone());
    let a = nesterov.process(&problem, &x0, &mut ())?;

    let descent_trace = Arc::new(RwLock::new(Trace::default()));
    let mut steepest: Engine<GradientDescent> = Engine::new(GradientDescent::default());
    steepest
        .setup_algorithm(|a| {
            a.setup_config(|c| {
                c.with_step_size(StepSize::Fixed(alpha))
                    .with_max_iterations(50)
            })
        })
        .add_observer(descent_trace.clone());
    let b = steepest.process(&problem, &x0, &mut ())?;

    assert_eq!(nesterov_trace.read().0, descent_trace.read().0);
    assert_eq!(a.x, b.x);
    assert_eq!(a.iterations, b.iterations);
    Ok(())
}

#[test]
fn exhausted_budget_is_not_an_error() -> Result<(), Error<Infallible>> {
    let mut m = Engine::new(Newton::default());
    m.setup_algorithm(|a| a.setup_config(|c| c.with_max_iterations(5)));
    let summary = m.process(&Quartic, &[1.0], &mut ())?;
    assert_eq!(summary.outcome, Outcome::Exhausted);
    assert_eq!(summary.message, "MAX ITERATIONS");
    assert_eq!(summary.iterations, 5);
    assert_eq!(summary.gradient_evals, 6);
    // Newton on x^4 shrinks x by a third each update
    assert_relative_eq!(summary.x[0], (2.0 / 3.0 as Float).powi(5), epsilon = 1e-12);
    Ok(())
}

#[test]
fn user_data_sees_every_evaluation() -> Result<(), Error<Infallible>> {
    let mut calls = 0;
    let mut m = Engine::new(GradientDescent::default());
    m.setup_algorithm(|a| {
        a.setup_config(|c| c.with_step_size(StepSize::Fixed(0.1)).with_max_iterations(10))
    });
    let summary = m.process(&Counted, &[1.0, 2.0], &mut calls)?;
    assert_eq!(calls, summary.cost_evals + summary.gradient_evals);
    Ok(())
}

#[test]
fn singular_hessian_is_reported() {
    let mut m = Engine::new(Newton::default());
    // the Hessian of x^4 vanishes at the origin
    let result = m.process(&Quartic, &[0.0], &mut ());
    assert!(matches!(result, Err(Error::SingularHessian { iteration: 0 })));
}

#[test]
fn diverging_update_is_reported() {
    let mut m: Engine<NesterovMomentum> = Engine::new(NesterovMomentum::default());
    m.setup_algorithm(|a| a.setup_config(|c| c.with_learning_rate(10.0).with_momentum(0.0)));
    // each update cubes the magnitude until it overflows
    let result = m.process(&Quartic, &[10.0], &mut ());
    assert!(matches!(result, Err(Error::NonFiniteIterate { .. })));
}

#[test]
fn objective_errors_are_passed_through() {
    let mut m: Engine<GradientDescent> = Engine::new(GradientDescent::default());
    m.setup_algorithm(|a| a.setup_config(|c| c.with_step_size(StepSize::Fixed(0.4))));
    // x1 = 2 - 0.4 * 4 = 0.4
    let result = m.process(&Fragile, &[2.0], &mut ());
    assert!(matches!(result, Err(Error::Evaluation(Boom))));
}

#[test]
fn invalid_config_is_rejected() {
    let mut m = Engine::new(NesterovMomentum::default());
    m.setup_algorithm(|a| a.setup_config(|c| c.with_momentum(1.5)));
    let result = m.process(&Parabola, &[1.0], &mut ());
    assert!(matches!(result, Err(Error::InvalidConfig { .. })));

    let mut m = Engine::new(GradientDescent::default());
    m.setup_algorithm(|a| {
        let mut armijo = descent::algorithms::line_search::Armijo::default();
        armijo.setup_config(|c| c.with_decrease_factor(1.5));
        a.setup_config(|c| c.with_step_size(StepSize::Armijo(armijo.clone())))
    });
    let result = m.process(&Parabola, &[1.0], &mut ());
    assert!(matches!(result, Err(Error::InvalidConfig { .. })));
}

#[test]
fn log_file_gets_a_line_per_iteration() -> Result<(), Error<Infallible>> {
    let path = std::env::temp_dir().join(format!("descent-e2e-{}.log", std::process::id()));
    let _ = fs::remove_file(&path);
    let mut m = Engine::new(Newton::default());
    m.setup_algorithm(|a| a.setup_config(|c| c.with_log_file(&path)));
    let summary = m.process(&Parabola, &[10.0], &mut ())?;
    let text = fs::read_to_string(&path)?;
    fs::remove_file(&path)?;
    let lines: Vec<&str> = text.lines().collect();
    // one line per pass plus the closing message
    assert_eq!(lines.len(), summary.iterations + 2);
    assert!(lines[0].starts_with("iteration:      0"));
    assert!(lines[lines.len() - 1].starts_with("Converged"));
    Ok(())
}

#[test]
fn unwritable_log_file_is_an_io_error() {
    let path = std::env::temp_dir()
        .join("descent-missing-directory")
        .join("run.log");
    let mut m = Engine::new(Newton::default());
    m.setup_algorithm(|a| a.setup_config(|c| c.with_log_file(&path)));
    let result = m.process(&Parabola, &[10.0], &mut ());
    assert!(matches!(result, Err(Error::Io(_))));
}
