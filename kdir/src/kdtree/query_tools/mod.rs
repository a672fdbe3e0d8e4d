//! Tools and data structures for assisting KD-tree queries.

mod bounded_queue;
mod query_items;

pub use bounded_queue::BoundedPriorityQueue;
pub use query_items::Neighbor;
