//! The KD-tree: the pre-sorted array it is built from, the builder, the nodes and the search.

pub mod builders;
pub mod kd_array;
mod node;
pub mod query_tools;
mod tree;

pub use builders::{KdTreeBuilder, SplitMethod};
pub use kd_array::KdArray;
pub use node::{KdNode, Leaves};
pub use query_tools::{BoundedPriorityQueue, Neighbor};
pub use tree::KdTree;
