//! A lightweight process-wide allocation ledger: count every heap allocation
//! and deallocation, measure labeled windows, and verify that code paths
//! allocate through the memory resource you gave them.
//!
//! Register [`TrackingAllocator`] (or enable the `global` feature) and every
//! allocation made anywhere in the process - container buffers, string
//! storage, `Arc` control blocks - is recorded in the [`Ledger`] with no
//! change in observable behavior and no locks on the allocation path.

mod allocator;
mod guard;
mod ledger;
mod output;
mod resource;
mod wait;

pub use allocator::TrackingAllocator;
pub use guard::WindowGuard;
pub use ledger::{Ledger, LedgerSnapshot};
pub use output::{format_bytes, Format, LedgerReport, ReportWindow, Reporter};
pub use resource::{
    FixedBufferResource, MemoryResource, OutOfMemory, ResourceBox, SystemResource,
};
pub use wait::Gate;

cfg_if::cfg_if! {
    if #[cfg(feature = "global")] {
        // Process-wide interception: active from the first heap request.
        #[global_allocator]
        static GLOBAL: TrackingAllocator = TrackingAllocator;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_shared_types_are_send_sync() {
        is_send_sync::<Ledger>();
        is_send_sync::<LedgerSnapshot>();
        is_send_sync::<Gate>();
        is_send_sync::<TrackingAllocator>();
    }
}
