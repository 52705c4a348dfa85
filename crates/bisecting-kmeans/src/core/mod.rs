//! The core traits and structs for serving a bisecting k-means tree.

pub mod cluster;
pub mod dataset;
mod error;
pub mod metric;
pub mod search;

pub use cluster::{ClusterNode, Edge, LinkageRow};
pub use dataset::{Broadcast, Partitioned};
pub use error::{Error, Result};
pub use metric::Metric;
