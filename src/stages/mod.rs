pub mod stage0_normalize;
pub mod stage1_graph;

pub use stage0_normalize::*;
pub use stage1_graph::*;
