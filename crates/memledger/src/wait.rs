use std::sync::{Condvar, Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// A monitored boolean: threads block until another thread opens the gate.
///
/// `Gate` exposes two distinct wait operations. [`wait`](Gate::wait) blocks
/// indefinitely and is the only way to ask for an unbounded wait;
/// [`wait_timeout`](Gate::wait_timeout) takes an explicit duration and
/// returns as soon as the gate opens or the duration elapses, whichever comes
/// first. Passing a duration too large to represent as a deadline (such as
/// `Duration::MAX` as a "wait forever" sentinel) degrades to an unbounded
/// wait - it can never wrap around into a near-zero timeout. Prefer `wait`
/// when that is what you mean.
///
/// # Examples
///
/// ```rust
/// use memledger::Gate;
/// use std::sync::Arc;
/// use std::thread;
/// use std::time::Duration;
///
/// let gate = Arc::new(Gate::new());
/// let opener = Arc::clone(&gate);
/// thread::spawn(move || opener.open());
///
/// assert!(gate.wait_timeout(Duration::from_secs(5)));
/// assert!(gate.is_open());
/// ```
pub struct Gate {
    opened: Mutex<bool>,
    cv: Condvar,
}

impl Gate {
    pub const fn new() -> Self {
        Self {
            opened: Mutex::new(false),
            cv: Condvar::new(),
        }
    }

    // A poisoned flag cannot be inconsistent, so waiting through a panic on
    // another thread is fine.
    fn lock(&self) -> MutexGuard<'_, bool> {
        self.opened.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Opens the gate and wakes every waiter. Idempotent.
    pub fn open(&self) {
        *self.lock() = true;
        self.cv.notify_all();
    }

    pub fn is_open(&self) -> bool {
        *self.lock()
    }

    /// Blocks until the gate is opened. Returns immediately if it already is.
    pub fn wait(&self) {
        let mut opened = self.lock();
        while !*opened {
            opened = self.cv.wait(opened).unwrap_or_else(|e| e.into_inner());
        }
    }

    /// Blocks until the gate is opened or `timeout` elapses.
    ///
    /// Returns `true` if the gate was open when the wait finished. Spurious
    /// wakeups are absorbed: the remaining time is recomputed against a fixed
    /// deadline on every iteration, so the call waits the full `timeout`
    /// before giving up and returns early only when the gate actually opens.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            // Unrepresentable deadline: saturate to an unbounded wait rather
            // than truncating the timeout toward zero.
            self.wait();
            return true;
        };

        let mut opened = self.lock();
        while !*opened {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            let (guard, _timed_out) = self
                .cv
                .wait_timeout(opened, deadline - now)
                .unwrap_or_else(|e| e.into_inner());
            opened = guard;
        }
        true
    }
}

impl Default for Gate {
    fn default() -> Self {
        Self::new()
    }
}
