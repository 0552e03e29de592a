use std::time::{Duration, Instant};

use log::debug;

/// Scoped timer: logs how long an operation took, once, either when
/// `finish` is called or when it goes out of scope.
pub struct Stopwatch {
    label: &'static str,
    started: Instant,
    reported: bool,
}

impl Stopwatch {
    pub fn start(label: &'static str) -> Self {
        Stopwatch {
            label,
            started: Instant::now(),
            reported: false,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn finish(mut self) -> Duration {
        self.report()
    }

    fn report(&mut self) -> Duration {
        let elapsed = self.elapsed();
        if !self.reported {
            self.reported = true;
            debug!("{} took {:.6}s", self.label, elapsed.as_secs_f64());
        }
        elapsed
    }
}

impl Drop for Stopwatch {
    fn drop(&mut self) {
        self.report();
    }
}
