use std::hint::black_box;

use memledger::{track_block, WindowGuard};

#[cfg(not(feature = "tracking-global"))]
#[global_allocator]
static ALLOC: memledger::TrackingAllocator = memledger::TrackingAllocator;

fn main() {
    println!("measuring blocks");

    let filled = track_block!("fill_vec", {
        let mut buf: Vec<u8> = Vec::with_capacity(64);
        buf.extend_from_slice(b"0123456789");
        black_box(&buf);
        buf
    });
    assert_eq!(filled.len(), 10);

    {
        let _guard = WindowGuard::new("strings");
        let one = String::from("alpha");
        let two = String::from("beta");
        black_box((&one, &two));
    }
}
