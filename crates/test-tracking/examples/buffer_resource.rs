use std::error::Error;

use memledger::{FixedBufferResource, MemoryResource, ResourceBox};

struct Sensor {
    id: u32,
}

impl Drop for Sensor {
    fn drop(&mut self) {
        println!("sensor {} dropped", self.id);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let res = FixedBufferResource::<256>::new();
    let spare = FixedBufferResource::<256>::new();
    {
        let sensor = ResourceBox::new_in(Sensor { id: 7 }, &res)?;
        println!("contained: {}", res.contains(sensor.as_ptr() as *const u8));
        println!("identity: {}", res.is_equal(&res));
        println!("cross_identity: {}", res.is_equal(&spare));
    }
    println!("allocate_called: {}", res.allocate_called());
    println!("deallocate_called: {}", res.deallocate_called());
    println!("total_allocated: {}", res.total_allocated());

    Ok(())
}
