use crate::ledger::{Ledger, LedgerSnapshot};

/// Measures the ledger delta of a lexical scope and prints it on drop.
///
/// The guard snapshots the global ledger at construction; when it goes out of
/// scope it prints `<label> #new: .. #delete: .. #bytes: ..` for everything
/// recorded in between. Deltas are computed from snapshots, not from
/// [`Ledger::reset`], so nested guards and guards on different threads do not
/// interfere with each other.
///
/// # Examples
///
/// ```rust
/// use memledger::WindowGuard;
///
/// {
///     let _guard = WindowGuard::new("parse_input");
///     let tokens: Vec<String> = "a b c".split(' ').map(String::from).collect();
///     // line printed when _guard drops
/// }
/// ```
pub struct WindowGuard {
    label: &'static str,
    start: LedgerSnapshot,
}

impl WindowGuard {
    #[inline]
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            start: Ledger::global().snapshot(),
        }
    }

    /// The ledger delta since this guard was created.
    pub fn delta(&self) -> LedgerSnapshot {
        Ledger::global().snapshot() - self.start
    }
}

impl Drop for WindowGuard {
    fn drop(&mut self) {
        // Snapshot first: the println below allocates and must not count
        // itself into the window.
        let delta = self.delta();
        println!("{} {}", self.label, delta);
    }
}

/// Measures the allocations of a code block and prints them when the block
/// finishes.
///
/// Wraps the block in a [`WindowGuard`]; the block's value is returned
/// unchanged.
///
/// # Examples
///
/// ```rust
/// let sum = memledger::track_block!("sum_batch", {
///     (1..=10u32).map(|n| n * n).sum::<u32>()
/// });
/// assert_eq!(sum, 385);
/// ```
#[macro_export]
macro_rules! track_block {
    ($label:expr, $expr:expr) => {{
        let _guard = $crate::WindowGuard::new($label);

        $expr
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_grows_monotonically() {
        let guard = WindowGuard::new("window");
        let first = guard.delta();
        let buf = vec![0u8; 32];
        let second = guard.delta();
        drop(buf);

        assert!(second.allocations >= first.allocations);
        assert!(second.deallocations >= first.deallocations);
        assert!(second.bytes_allocated >= first.bytes_allocated);
    }

    #[test]
    fn block_value_passes_through() {
        let value = track_block!("passthrough", 41 + 1);
        assert_eq!(value, 42);
    }
}
