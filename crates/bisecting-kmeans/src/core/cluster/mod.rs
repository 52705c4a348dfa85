//! Provides the `ClusterNode` struct, which stores one cluster of a tree built
//! by bisecting k-means, along with the `Edge` and `LinkageRow` types used to
//! export such a tree to visualization and analysis tools.

mod export;
mod io;
mod node;

pub use export::{Edge, LinkageRow};
pub use node::{Children, ClusterNode};
