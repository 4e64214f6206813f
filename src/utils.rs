use std::time::{Duration, Instant};

/// Logs the time spent in `step` since `last` and returns the new elapsed mark.
pub(crate) fn trace(step: &str, start: Instant, last: Duration) -> Duration {
    let now = start.elapsed();
    log::trace!("TIME | Total={:.2?} | {}={:.2?}", now, step, now - last);
    now
}
