use std::fmt;
use std::ops::Sub;
use std::sync::atomic::{AtomicU64, Ordering::Relaxed};

use serde::{Deserialize, Serialize};

static GLOBAL_LEDGER: Ledger = Ledger::new();

/// Process-wide allocation ledger.
///
/// A `Ledger` counts allocation requests, deallocation requests and the total
/// number of bytes requested. The process-wide instance returned by
/// [`Ledger::global()`] is fed by [`TrackingAllocator`](crate::TrackingAllocator)
/// once that allocator is registered, and exists from the first heap request
/// (it is a `const`-initialized static, so no code can run before it).
///
/// All counter updates are single lock-free atomic increments - the ledger
/// never takes a lock on the allocation path.
///
/// # Examples
///
/// Standalone ledgers can be driven directly, which is how the recording
/// contract is unit tested:
///
/// ```rust
/// use memledger::Ledger;
///
/// let ledger = Ledger::new();
/// ledger.record_alloc(64);
/// ledger.record_alloc(16);
/// ledger.record_dealloc();
///
/// let snap = ledger.snapshot();
/// assert_eq!(snap.allocations, 2);
/// assert_eq!(snap.deallocations, 1);
/// assert_eq!(snap.bytes_allocated, 80);
/// ```
///
/// Windowed measurement uses snapshot deltas rather than [`reset`](Ledger::reset):
///
/// ```rust
/// use memledger::Ledger;
///
/// let ledger = Ledger::global();
/// let before = ledger.snapshot();
/// let data = vec![0u8; 1024];
/// let delta = ledger.snapshot() - before;
/// // With the `global` feature (or a manually registered TrackingAllocator)
/// // `delta.allocations` now includes the Vec's buffer.
/// drop(data);
/// ```
pub struct Ledger {
    allocations: AtomicU64,
    deallocations: AtomicU64,
    bytes_allocated: AtomicU64,
}

impl Ledger {
    pub const fn new() -> Self {
        Self {
            allocations: AtomicU64::new(0),
            deallocations: AtomicU64::new(0),
            bytes_allocated: AtomicU64::new(0),
        }
    }

    /// The process-wide ledger fed by the tracking allocator.
    pub fn global() -> &'static Ledger {
        &GLOBAL_LEDGER
    }

    /// Records one successful allocation of `size` bytes.
    ///
    /// Called by the interception layer before the pointer is handed back to
    /// the caller. Must not allocate.
    #[inline]
    pub fn record_alloc(&self, size: usize) {
        self.allocations.fetch_add(1, Relaxed);
        self.bytes_allocated.fetch_add(size as u64, Relaxed);
    }

    /// Records one deallocation request.
    #[inline]
    pub fn record_dealloc(&self) {
        self.deallocations.fetch_add(1, Relaxed);
    }

    /// Zeroes all three counters.
    ///
    /// Each field is reset atomically, but the three stores are not a single
    /// transaction: a reset racing in-flight allocations yields an
    /// unspecified window. Callers needing windowed measurement should either
    /// reset at a quiescent point or use snapshot deltas
    /// ([`WindowGuard`](crate::WindowGuard) does the latter).
    pub fn reset(&self) {
        self.allocations.store(0, Relaxed);
        self.deallocations.store(0, Relaxed);
        self.bytes_allocated.store(0, Relaxed);
    }

    /// Returns a read-only copy of the current counters.
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            allocations: self.allocations.load(Relaxed),
            deallocations: self.deallocations.load(Relaxed),
            bytes_allocated: self.bytes_allocated.load(Relaxed),
        }
    }

    /// Prints a one-line summary of the current counters to stdout:
    /// `<label> #new: <allocations> #delete: <deallocations> #bytes: <bytes_allocated>`.
    pub fn summary(&self, label: &str) {
        println!("{} {}", label, self.snapshot());
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

/// A point-in-time copy of the three ledger counters.
///
/// Snapshots subtract to window deltas: `end - start` gives the counts
/// recorded between two snapshots (saturating, in case a reset intervened).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub allocations: u64,
    pub deallocations: u64,
    pub bytes_allocated: u64,
}

impl Sub for LedgerSnapshot {
    type Output = LedgerSnapshot;

    fn sub(self, earlier: LedgerSnapshot) -> LedgerSnapshot {
        LedgerSnapshot {
            allocations: self.allocations.saturating_sub(earlier.allocations),
            deallocations: self.deallocations.saturating_sub(earlier.deallocations),
            bytes_allocated: self.bytes_allocated.saturating_sub(earlier.bytes_allocated),
        }
    }
}

impl fmt::Display for LedgerSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#new: {} #delete: {} #bytes: {}",
            self.allocations, self.deallocations, self.bytes_allocated
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_allocation_sequences() {
        let ledger = Ledger::new();
        for size in [8usize, 16, 32] {
            ledger.record_alloc(size);
        }

        let snap = ledger.snapshot();
        assert_eq!(snap.allocations, 3);
        assert_eq!(snap.deallocations, 0);
        assert_eq!(snap.bytes_allocated, 56);
    }

    #[test]
    fn deallocations_leave_bytes_untouched() {
        let ledger = Ledger::new();
        ledger.record_alloc(100);
        ledger.record_dealloc();
        ledger.record_dealloc();

        let snap = ledger.snapshot();
        assert_eq!(snap.allocations, 1);
        assert_eq!(snap.deallocations, 2);
        assert_eq!(snap.bytes_allocated, 100);
    }

    #[test]
    fn reset_zeroes_every_counter() {
        let ledger = Ledger::new();
        ledger.record_alloc(4096);
        ledger.record_dealloc();
        ledger.reset();

        assert_eq!(ledger.snapshot(), LedgerSnapshot::default());
    }

    #[test]
    fn snapshot_deltas_subtract_per_field() {
        let ledger = Ledger::new();
        ledger.record_alloc(10);
        let start = ledger.snapshot();

        ledger.record_alloc(30);
        ledger.record_dealloc();
        let delta = ledger.snapshot() - start;

        assert_eq!(delta.allocations, 1);
        assert_eq!(delta.deallocations, 1);
        assert_eq!(delta.bytes_allocated, 30);
    }

    #[test]
    fn delta_saturates_across_a_reset() {
        let ledger = Ledger::new();
        ledger.record_alloc(64);
        let start = ledger.snapshot();
        ledger.reset();

        let delta = ledger.snapshot() - start;
        assert_eq!(delta, LedgerSnapshot::default());
    }

    #[test]
    fn display_matches_summary_format() {
        let ledger = Ledger::new();
        ledger.record_alloc(24);
        ledger.record_alloc(12);
        ledger.record_dealloc();

        let line = format!("vec_build {}", ledger.snapshot());
        assert_eq!(line, "vec_build #new: 2 #delete: 1 #bytes: 36");
    }
}
