//! Console spinner shown while a long task runs.

use std::{
    fmt::Display,
    io::Write,
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex, PoisonError,
    },
    thread,
    time::Duration,
};

pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Animation {
    #[default]
    Circle,
    Dots,
}
impl Animation {
    fn frames(self) -> &'static [&'static str] {
        match self {
            Self::Circle => &[" /", " |", " \\", " -"],
            Self::Dots => &[" ", " .", " ..", " ..."],
        }
    }
}

/// Sets the flag when dropped, so the renderer stops even if the task panics.
struct StopOnDrop<'a>(&'a AtomicBool);
impl Drop for StopOnDrop<'_> {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Release);
    }
}

/// Runs `task` on the current thread while a second thread animates
/// `message` on `out`. The animation thread is joined before this returns,
/// and the task's result is passed through untouched.
pub fn run<T, E, W, F>(
    message: &str,
    animation: Animation,
    interval: Duration,
    out: W,
    task: F,
) -> Result<T, E>
where
    E: Display,
    W: Write + Send,
    F: FnOnce() -> Result<T, E>,
{
    let stop = AtomicBool::new(false);
    let out = Mutex::new(out);

    let result = thread::scope(|scope| {
        let renderer = scope.spawn(|| animate(message, animation, interval, &stop, &out));
        let result = {
            let _guard = StopOnDrop(&stop);
            task()
        };
        renderer.thread().unpark();
        if renderer.join().is_err() {
            log::warn!("Spinner thread panicked");
        }
        result
    });

    let mut out = out.lock().unwrap_or_else(PoisonError::into_inner);
    // The spinner is cosmetic; a failed write mustn't mask the task's result.
    let _ = match &result {
        Ok(_) => writeln!(out, "\r{message} done!{:10}", ""),
        Err(e) => writeln!(out, "\r{message} failed: {e}{:10}", ""),
    };
    let _ = out.flush();
    result
}

fn animate<W: Write>(
    message: &str,
    animation: Animation,
    interval: Duration,
    stop: &AtomicBool,
    out: &Mutex<W>,
) {
    for frame in animation.frames().iter().cycle() {
        if stop.load(Ordering::Acquire) {
            return;
        }
        {
            let mut out = out.lock().unwrap_or_else(PoisonError::into_inner);
            let _ = write!(out, "\r{message} {frame}");
            let _ = out.flush();
        }
        thread::park_timeout(interval);
    }
}
