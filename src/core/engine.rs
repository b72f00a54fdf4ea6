use std::sync::Arc;

use parking_lot::RwLock;

use crate::{
    core::{utils::maybe_warn, Error, Evaluator, GradientStatus, MinimizationSummary, Outcome},
    traits::{observer::LogFileObserver, Algorithm, Gradient, Observer, Parameters},
    DVector, Float,
};

/// The main struct used for running [`Algorithm`]s on [`Gradient`] objectives.
///
/// The engine owns the minimization loop. Each pass evaluates the value and gradient at the
/// current point, reports to every [`Observer`], checks the algorithm's iteration budget, checks
/// the algorithm's convergence test, and finally asks the algorithm for an update. Running out of
/// iterations is not an error: the run ends with [`Outcome::Exhausted`] and the last point.
pub struct Engine<A, U = ()> {
    /// The [`GradientStatus`] of the most recent run, usually read after minimization.
    pub status: GradientStatus,
    /// The [`MinimizationSummary`] of the most recent run.
    pub result: MinimizationSummary,

    algorithm: A,
    observers: Vec<Arc<RwLock<dyn Observer<U>>>>,
}

impl<A, U> Engine<A, U> {
    /// Creates a new [`Engine`] with the given [`Algorithm`].
    pub fn new(algorithm: A) -> Self {
        Self {
            status: GradientStatus::default(),
            result: MinimizationSummary::default(),
            algorithm,
            observers: Vec::default(),
        }
    }

    /// Edit the [`Algorithm`], typically to change its configuration.
    ///
    /// ```rust
    /// use descent::prelude::*;
    /// use descent::algorithms::Newton;
    ///
    /// let mut engine: Engine<Newton> = Engine::new(Newton::default());
    /// engine.setup_algorithm(|a| a.setup_config(|c| c.with_max_iterations(20)));
    /// assert_eq!(engine.algorithm().get_config().max_iterations(), 20);
    /// ```
    pub fn setup_algorithm<F>(&mut self, mut f: F) -> &mut Self
    where
        F: FnMut(&mut A) -> &mut A,
    {
        f(&mut self.algorithm);
        self
    }

    /// The wrapped [`Algorithm`].
    pub const fn algorithm(&self) -> &A {
        &self.algorithm
    }

    /// Adds a single [`Observer`] to the [`Engine`].
    pub fn add_observer(&mut self, observer: Arc<RwLock<dyn Observer<U>>>) -> &mut Self {
        self.observers.push(observer);
        self
    }

    /// Bind the engine to a problem and starting point.
    ///
    /// This validates the algorithm's configuration, resets its iteration counter, evaluates the
    /// objective once at `x0`, opens any configured log file, and runs
    /// [`Algorithm::initialize`]. The returned [`Run`] performs the loop.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] before any evaluation if the configuration is out of range,
    /// [`Error::Io`] if the log file cannot be opened, and [`Error::Evaluation`] if the objective
    /// fails.
    pub fn initialize<'a, E>(
        &'a mut self,
        problem: &'a dyn Gradient<U, E>,
        x0: &[Float],
        user_data: &'a mut U,
    ) -> Result<Run<'a, A, U, E>, Error<E>>
    where
        A: Algorithm<U, E>,
    {
        self.algorithm
            .get_config()
            .validate()
            .map_err(|reason| Error::InvalidConfig { reason })?;
        self.algorithm.get_config_mut().budget_mut().reset();
        self.status = GradientStatus {
            x: DVector::from_column_slice(x0),
            ..Default::default()
        };

        let mut evaluator = Evaluator::new(problem, DVector::from_column_slice(x0), user_data);
        evaluator.update_value()?;

        let config = self.algorithm.get_config();
        let verbose = config.verbose();
        let log = match config.log_file() {
            Some(path) => Some(LogFileObserver::create(path)?),
            None => None,
        };
        if verbose {
            println!("{} configuration:\n{:#?}", self.algorithm.name(), config);
        }

        self.algorithm.initialize(&mut evaluator, &mut self.status)?;
        Ok(Run {
            engine: self,
            evaluator,
            x0: x0.to_vec(),
            verbose,
            log,
        })
    }

    /// Minimize `problem` starting at `x0`. Equivalent to [`Engine::initialize`] followed by
    /// [`Run::run`].
    ///
    /// # Errors
    ///
    /// See [`Engine::initialize`] and [`Run::run`].
    pub fn process<E>(
        &mut self,
        problem: &dyn Gradient<U, E>,
        x0: &[Float],
        user_data: &mut U,
    ) -> Result<MinimizationSummary, Error<E>>
    where
        A: Algorithm<U, E>,
    {
        self.initialize(problem, x0, user_data)?.run()
    }
}

/// An [`Engine`] bound to a problem, a starting point, and user data, ready to run.
pub struct Run<'a, A, U, E> {
    engine: &'a mut Engine<A, U>,
    evaluator: Evaluator<'a, U, E>,
    x0: Vec<Float>,
    verbose: bool,
    log: Option<LogFileObserver>,
}

impl<A: Algorithm<U, E>, U, E> Run<'_, A, U, E> {
    /// The evaluator positioned at the current point.
    pub fn evaluator(&self) -> &Evaluator<'_, U, E> {
        &self.evaluator
    }

    /// Run the loop until the algorithm converges or its iteration budget runs out.
    ///
    /// The summary is also stored in [`Engine::result`] and the final snapshot in
    /// [`Engine::status`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Evaluation`] if the objective fails, [`Error::NonFiniteIterate`] if an
    /// update produces a NaN or infinite coordinate, any error raised by the algorithm itself
    /// (such as [`Error::SingularHessian`]), and [`Error::Io`] if the log file could not be
    /// written.
    pub fn run(mut self) -> Result<MinimizationSummary, Error<E>> {
        let outcome = self.drive();
        let flushed = match self.log.as_mut() {
            Some(log) => {
                if let Ok(outcome) = &outcome {
                    log.note(&format!("{outcome:?}: {}", self.engine.status.message));
                }
                log.finish()
            }
            None => Ok(()),
        };
        let outcome = outcome?;
        flushed?;

        let iteration = self.engine.algorithm.get_config().iterations();
        self.engine.status.sync(iteration, &self.evaluator);
        let summary = MinimizationSummary::from_status(
            self.engine.algorithm.name(),
            outcome,
            &self.x0,
            &self.engine.status,
        );
        if self.verbose {
            println!("{summary}");
        }
        self.engine.result = summary.clone();
        Ok(summary)
    }

    fn drive(&mut self) -> Result<Outcome, Error<E>> {
        loop {
            self.evaluator.update()?;
            let iteration = self.engine.algorithm.get_config().iterations();
            self.engine.status.sync(iteration, &self.evaluator);
            self.notify(iteration);

            if self.engine.algorithm.get_config().budget().is_exhausted() {
                maybe_warn(&format!(
                    "{} stopped after {} iterations without converging",
                    self.engine.algorithm.name(),
                    iteration
                ));
                self.engine.status.with_message("MAX ITERATIONS");
                return Ok(Outcome::Exhausted);
            }
            if self
                .engine
                .algorithm
                .check_for_termination(&mut self.evaluator, &mut self.engine.status)?
            {
                self.engine.status.set_converged();
                return Ok(Outcome::Converged);
            }
            self.engine
                .algorithm
                .step(&mut self.evaluator, &mut self.engine.status)?;
            if !self.evaluator.point().iter().all(|xi| xi.is_finite()) {
                return Err(Error::NonFiniteIterate { iteration });
            }
            self.engine.algorithm.get_config_mut().next_iteration();
        }
    }

    fn notify(&mut self, iteration: usize) {
        let status = &self.engine.status;
        let user_data = self.evaluator.user_data();
        for observer in &self.engine.observers {
            observer.write().observe(iteration, status, user_data);
        }
        if self.verbose {
            println!("{status}");
        }
        if let Some(log) = self.log.as_mut() {
            log.observe(iteration, status, user_data);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{convert::Infallible, sync::Arc};

    use approx::assert_relative_eq;
    use parking_lot::RwLock;

    use super::Engine;
    use crate::{
        algorithms::{line_search::StepSize, GradientDescent, Newton},
        core::{Error, GradientStatus, Outcome},
        test_functions::Sphere,
        traits::{Configurable, CostFunction, Gradient, Observer},
        DVector, Float,
    };

    #[derive(Default)]
    struct Recorder {
        iterations: Vec<usize>,
        points: Vec<Float>,
    }
    impl<U> Observer<U> for Recorder {
        fn observe(&mut self, iteration: usize, status: &GradientStatus, _user_data: &U) {
            self.iterations.push(iteration);
            self.points.push(status.x[0]);
        }
    }

    #[test]
    fn observers_see_every_pass() -> Result<(), Error<Infallible>> {
        let recorder = Arc::new(RwLock::new(Recorder::default()));
        let mut engine: Engine<GradientDescent> = Engine::new(GradientDescent::default());
        engine
            .setup_algorithm(|a| {
                a.setup_config(|c| {
                    c.with_max_iterations(4)
                        .with_min_gradient(1e-30)
                        .with_step_size(StepSize::Fixed(0.1))
                })
            })
            .add_observer(recorder.clone());
        let summary = engine.process(&Sphere { n: 1 }, &[1.0], &mut ())?;
        assert_eq!(summary.outcome, Outcome::Exhausted);
        assert_eq!(summary.message, "MAX ITERATIONS");
        assert_eq!(recorder.read().iterations, vec![0, 1, 2, 3, 4]);
        assert_relative_eq!(recorder.read().points[0], 1.0);
        Ok(())
    }

    #[test]
    fn exhaustion_evaluates_once_more_than_the_budget() -> Result<(), Error<Infallible>> {
        let mut engine = Engine::new(GradientDescent::default());
        engine.setup_algorithm(|a| {
            a.setup_config(|c| {
                c.with_max_iterations(7)
                    .with_min_gradient(1e-30)
                    .with_step_size(StepSize::Fixed(0.1))
            })
        });
        let summary = engine.process(&Sphere { n: 3 }, &[1.0, 2.0, 3.0], &mut ())?;
        assert_eq!(summary.iterations, 7);
        assert_eq!(summary.gradient_evals, 8);
        // one extra value evaluation comes from initialization
        assert_eq!(summary.cost_evals, 9);
        Ok(())
    }

    #[test]
    fn invalid_config_fails_before_evaluating() {
        struct Panics;
        impl CostFunction for Panics {
            fn evaluate(
                &self,
                _x: &DVector<Float>,
                _user_data: &mut (),
            ) -> Result<Float, Infallible> {
                panic!("evaluated")
            }
        }
        impl Gradient for Panics {}

        let mut engine = Engine::new(Newton::default());
        engine.setup_algorithm(|a| a.setup_config(|c| c.with_min_delta_x(-1.0)));
        let result = engine.process(&Panics, &[1.0], &mut ());
        assert!(matches!(result, Err(Error::InvalidConfig { .. })));
    }

    #[test]
    fn engine_can_be_reused() -> Result<(), Error<Infallible>> {
        let mut engine = Engine::new(Newton::default());
        let first = engine.process(&Sphere { n: 2 }, &[3.0, -1.0], &mut ())?;
        let second = engine.process(&Sphere { n: 2 }, &[-5.0, 2.0], &mut ())?;
        assert_eq!(first.iterations, second.iterations);
        assert_eq!(engine.result.x0, vec![-5.0, 2.0]);
        assert!(engine.status.converged);
        Ok(())
    }

    #[test]
    fn run_exposes_the_bound_evaluator() -> Result<(), Error<Infallible>> {
        let mut engine = Engine::new(Newton::default());
        let mut user_data = ();
        let run = engine.initialize(&Sphere { n: 2 }, &[1.0, 1.0], &mut user_data)?;
        assert_relative_eq!(run.evaluator().value(), 2.0);
        assert_eq!(run.evaluator().n_f_evals(), 1);
        let summary = run.run()?;
        assert!(summary.converged());
        Ok(())
    }
}
