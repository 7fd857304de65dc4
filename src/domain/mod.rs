pub mod drop_target;
pub mod job;
pub mod schedule_update;

pub use drop_target::*;
pub use job::*;
pub use schedule_update::*;
