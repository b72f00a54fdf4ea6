use std::{
    fs::{File, OpenOptions},
    io::{self, BufWriter, Write},
    path::Path,
    sync::Arc,
};

use parking_lot::RwLock;

use crate::core::GradientStatus;

/// A diagnostic sink which is shown the [`GradientStatus`] once per pass of the minimization loop.
///
/// Observers cannot alter the run. They are held as `Arc<RwLock<_>>` so the caller can keep a
/// handle and inspect whatever the observer collected once the run is over.
pub trait Observer<U> {
    /// Called with the iteration counter and a snapshot of the current point.
    fn observe(&mut self, iteration: usize, status: &GradientStatus, user_data: &U);
}

/// A debugging observer which prints one line per iteration to stdout.
///
/// # Usage:
///
/// ```rust
/// use descent::prelude::*;
/// use descent::algorithms::NesterovMomentum;
/// use descent::test_functions::Sphere;
/// use descent::traits::observer::DebugObserver;
///
/// let problem = Sphere { n: 2 };
/// let mut m: Engine<NesterovMomentum> = Engine::new(NesterovMomentum::default());
/// m.add_observer(DebugObserver::build());
/// let summary = m.process(&problem, &[2.3, 3.4], &mut ()).unwrap();
/// // ^ This will print debug messages for each step
/// assert!(summary.converged());
/// ```
pub struct DebugObserver;
impl DebugObserver {
    /// Finalize the [`Observer`] by wrapping it in an [`Arc`] and [`RwLock`]
    pub fn build() -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(Self))
    }
}
impl<U> Observer<U> for DebugObserver {
    fn observe(&mut self, _iteration: usize, status: &GradientStatus, _user_data: &U) {
        println!("{status}");
    }
}

/// An observer which appends one plain-text line per iteration to a file.
///
/// The lines are meant for people, not parsers. Write failures do not interrupt the run; the
/// first one is kept and can be collected with [`LogFileObserver::finish`].
pub struct LogFileObserver {
    writer: BufWriter<File>,
    error: Option<io::Error>,
}

impl LogFileObserver {
    /// Open `path` for appending, creating the file if needed.
    ///
    /// # Errors
    ///
    /// Returns an [`io::Error`] if the file cannot be opened.
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            error: None,
        })
    }
    /// Append a free-form line, such as a final result message.
    pub fn note(&mut self, line: &str) {
        self.write_line(line);
    }
    /// Flush buffered lines and report the first write error, if any occurred.
    ///
    /// # Errors
    ///
    /// Returns the first [`io::Error`] hit while writing or flushing.
    pub fn finish(&mut self) -> io::Result<()> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.writer.flush()
    }

    fn write_line(&mut self, line: &str) {
        if self.error.is_none() {
            if let Err(err) = writeln!(self.writer, "{line}") {
                self.error = Some(err);
            }
        }
    }
}

impl<U> Observer<U> for LogFileObserver {
    fn observe(&mut self, _iteration: usize, status: &GradientStatus, _user_data: &U) {
        self.write_line(&status.to_string());
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, io};

    use super::{LogFileObserver, Observer};
    use crate::{core::GradientStatus, DVector};

    #[test]
    fn log_file_gets_one_line_per_call() -> io::Result<()> {
        let path = std::env::temp_dir()
            .join(format!("descent-observer-{}.txt", std::process::id()));
        let _ = fs::remove_file(&path);
        let mut observer = LogFileObserver::create(&path)?;
        for i in 0..3 {
            let status = GradientStatus {
                iteration: i,
                x: DVector::from_vec(vec![i as crate::Float]),
                ..Default::default()
            };
            observer.observe(i, &status, &());
        }
        observer.note("done");
        observer.finish()?;
        let text = fs::read_to_string(&path)?;
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].starts_with("iteration:      2"));
        assert_eq!(lines[3], "done");
        fs::remove_file(&path)
    }
}
