use std::error::Error;
use std::hint::black_box;
use std::sync::Arc;

use memledger::Ledger;

#[cfg(not(feature = "tracking-global"))]
#[global_allocator]
static ALLOC: memledger::TrackingAllocator = memledger::TrackingAllocator;

struct Payload {
    a: u64,
    b: u64,
}

fn main() -> Result<(), Box<dyn Error>> {
    println!("comparing shared-ownership allocation paths");

    let ledger = Ledger::global();

    // Value and control block allocated together.
    let before = ledger.snapshot();
    let aggregate = Arc::new(Payload { a: 1, b: 2 });
    black_box(&aggregate);
    let delta = ledger.snapshot() - before;
    println!("aggregate {}", delta);

    // Value boxed first, then handed to the shared pointer.
    let before = ledger.snapshot();
    let boxed = Box::new(Payload { a: 3, b: 4 });
    let split: Arc<Payload> = Arc::from(boxed);
    black_box(&split);
    let delta = ledger.snapshot() - before;
    println!("split {}", delta);

    // Additional handles are free.
    let before = ledger.snapshot();
    let clones = [aggregate.clone(), aggregate.clone(), aggregate.clone()];
    black_box(&clones);
    let delta = ledger.snapshot() - before;
    println!("clones {}", delta);

    assert_eq!(aggregate.a + split.b, 5);
    Ok(())
}
