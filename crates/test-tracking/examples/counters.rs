use std::error::Error;
use std::hint::black_box;

use memledger::{Format, Ledger, LedgerReport};

// With the tracking-global feature memledger registers the allocator itself.
#[cfg(not(feature = "tracking-global"))]
#[global_allocator]
static ALLOC: memledger::TrackingAllocator = memledger::TrackingAllocator;

fn main() -> Result<(), Box<dyn Error>> {
    let ledger = Ledger::global();
    let mut report = LedgerReport::new();

    // Warm up stdout so its buffer allocation lands outside the windows.
    println!("tracking heap traffic");

    let before = ledger.snapshot();
    let boxed = Box::new(0xdead_beef_u32);
    black_box(&boxed);
    drop(boxed);
    report.record("boxed_u32", ledger.snapshot() - before);

    let before = ledger.snapshot();
    let buf: Vec<u8> = Vec::with_capacity(100);
    black_box(&buf);
    let delta = ledger.snapshot() - before;
    drop(buf);
    report.record("vec_capacity", delta);

    let before = ledger.snapshot();
    let text = String::from("thirty bytes of heap payload..");
    black_box(&text);
    let delta = ledger.snapshot() - before;
    drop(text);
    report.record("string_from", delta);

    report.write(Format::Text)?;

    ledger.reset();
    ledger.summary("after_reset");

    Ok(())
}
