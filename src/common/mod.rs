mod deadline;
mod fs;

pub use deadline::Deadline;
pub(crate) use fs::*;
