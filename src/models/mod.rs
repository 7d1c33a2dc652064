pub mod graph;
pub mod record;

pub use graph::*;
pub use record::*;
