//! Deadline-bounded calls into foreign code.
//!
//! The scheduler must never block forever on an agent. Instead of signal
//! or alarm tricks, a bounded call runs the closure on a worker thread
//! and joins it through a rendezvous channel with a deadline: the caller
//! gets the value, a timeout, or a panic indication, and always gets it
//! within the budget.
//!
//! A timed-out call is *abandoned*, not killed — the worker may run to
//! completion in the background, but its send lands in a channel nobody
//! reads, so an abandoned result can never reach the authoritative state.

use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, RecvTimeoutError};

/// Result of a deadline-bounded call.
#[derive(Debug)]
pub enum CallOutcome<T> {
    /// The call returned within the budget.
    Completed {
        /// The closure's return value.
        value: T,
        /// Wall-clock time the call took; charged against the caller's
        /// cumulative budgets.
        elapsed: Duration,
    },
    /// The deadline elapsed first. The call keeps running detached and
    /// its eventual result is discarded.
    TimedOut,
    /// The closure panicked before producing a value.
    Panicked,
}

impl<T> CallOutcome<T> {
    /// Whether the call completed in time.
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

/// Run `call` on a worker thread, waiting at most `budget` for the result.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use warren_engine::timebox::{call_with_deadline, CallOutcome};
///
/// let outcome = call_with_deadline(Duration::from_secs(1), || 2 + 2);
/// assert!(matches!(outcome, CallOutcome::Completed { value: 4, .. }));
///
/// let outcome = call_with_deadline(Duration::from_millis(10), || {
///     std::thread::sleep(Duration::from_secs(5));
/// });
/// assert!(matches!(outcome, CallOutcome::TimedOut));
/// ```
pub fn call_with_deadline<T, F>(budget: Duration, call: F) -> CallOutcome<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let (tx, rx) = bounded(1);
    let started = Instant::now();
    std::thread::spawn(move || {
        // The receiver may be gone already if the caller timed out.
        let _ = tx.send(call());
    });
    match rx.recv_timeout(budget) {
        Ok(value) => CallOutcome::Completed {
            value,
            elapsed: started.elapsed(),
        },
        Err(RecvTimeoutError::Timeout) => CallOutcome::TimedOut,
        // A panic drops the sender without a send.
        Err(RecvTimeoutError::Disconnected) => CallOutcome::Panicked,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[test]
    fn fast_call_completes() {
        let outcome = call_with_deadline(Duration::from_secs(5), || "done");
        match outcome {
            CallOutcome::Completed { value, elapsed } => {
                assert_eq!(value, "done");
                assert!(elapsed < Duration::from_secs(5));
            }
            other => panic!("expected completion, got {other:?}"),
        }
    }

    #[test]
    fn slow_call_times_out() {
        let outcome = call_with_deadline(Duration::from_millis(20), || {
            std::thread::sleep(Duration::from_millis(500));
            42
        });
        assert!(matches!(outcome, CallOutcome::TimedOut));
    }

    #[test]
    fn panicking_call_is_detected() {
        let outcome: CallOutcome<()> =
            call_with_deadline(Duration::from_secs(5), || panic!("agent bug"));
        assert!(matches!(outcome, CallOutcome::Panicked));
    }

    #[test]
    fn abandoned_call_still_runs_but_result_is_dropped() {
        let finished = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&finished);
        let outcome = call_with_deadline(Duration::from_millis(20), move || {
            std::thread::sleep(Duration::from_millis(150));
            flag.store(true, Ordering::SeqCst);
            7
        });
        assert!(matches!(outcome, CallOutcome::TimedOut));
        // The worker finishes in the background; nothing observes its value.
        std::thread::sleep(Duration::from_millis(300));
        assert!(finished.load(Ordering::SeqCst));
    }
}
