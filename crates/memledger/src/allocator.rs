use std::alloc::{GlobalAlloc, Layout, System};

use crate::ledger::Ledger;

/// Global allocator that records every allocation in the process-wide
/// [`Ledger`] before delegating to [`System`].
///
/// Once registered, every heap request made anywhere in the process - Vec
/// buffers, String storage, Arc control blocks, allocations made deep inside
/// dependencies - passes through this type. Interception is transparent (the
/// returned blocks are exactly what `System` hands out) and total (the
/// zeroed and reallocating entry points are themselves expressed in terms of
/// `alloc`/`dealloc`).
///
/// Enable the `global` feature to let the crate register it, or register it
/// yourself in a binary or integration test:
///
/// ```rust,ignore
/// #[global_allocator]
/// static ALLOC: memledger::TrackingAllocator = memledger::TrackingAllocator;
/// ```
///
/// Only successful allocations are counted. A null result is returned
/// uncounted and the standard library then aborts through
/// `handle_alloc_error`, so a failed request is never observable as a usable
/// pointer. `dealloc` is never called with null per the `GlobalAlloc`
/// contract, so every recorded deallocation corresponds to a real block.
pub struct TrackingAllocator;

unsafe impl GlobalAlloc for TrackingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            Ledger::global().record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        Ledger::global().record_dealloc();

        unsafe {
            System.dealloc(ptr, layout);
        }
    }
}
