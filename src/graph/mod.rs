pub mod builder;
pub mod ir;

pub use builder::GraphBuilder;
pub use ir::DepGraph;
