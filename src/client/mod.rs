mod memory;
mod traits;

pub use memory::MemoryJobClient;
pub use traits::*;
