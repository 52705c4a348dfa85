//! Datasets that are split into partitions and processed in parallel, and the
//! read-only values shared with every partition.

mod broadcast;
mod partitioned;

pub use broadcast::Broadcast;
pub use partitioned::Partitioned;
