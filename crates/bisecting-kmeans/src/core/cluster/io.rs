//! Saving and loading trees of `ClusterNode`s.
//!
//! A tree is serialized as the flat list of its nodes in pre-order, each with
//! a flag for whether it has children, and rebuilt with an explicit stack.
//! Neither direction recurses on the depth of the tree.

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize, Serializer};

use super::ClusterNode;

/// A node as it is written to disk, borrowed from the tree.
#[derive(Serialize)]
struct NodeRef<'a, T> {
    /// See [`ClusterNode::index`].
    index: usize,
    /// See [`ClusterNode::center`].
    center: &'a [T],
    /// See [`ClusterNode::size`].
    size: usize,
    /// See [`ClusterNode::cost`].
    cost: f64,
    /// See [`ClusterNode::height`].
    height: f64,
    /// See [`ClusterNode::weight`].
    weight: f64,
    /// Whether the next nodes in pre-order are the children of this one.
    has_children: bool,
}

impl<'a, T> From<&'a ClusterNode<T>> for NodeRef<'a, T> {
    fn from(node: &'a ClusterNode<T>) -> Self {
        Self {
            index: node.index(),
            center: node.center(),
            size: node.size(),
            cost: node.cost(),
            height: node.height(),
            weight: node.weight(),
            has_children: !node.is_leaf(),
        }
    }
}

/// A node as it is read from disk.
#[derive(Deserialize)]
struct NodeRecord<T> {
    /// See [`ClusterNode::index`].
    index: usize,
    /// See [`ClusterNode::center`].
    center: Vec<T>,
    /// See [`ClusterNode::size`].
    size: usize,
    /// See [`ClusterNode::cost`].
    cost: f64,
    /// See [`ClusterNode::height`].
    height: f64,
    /// See [`ClusterNode::weight`].
    weight: f64,
    /// Whether the next nodes in pre-order are the children of this one.
    has_children: bool,
}

impl<T> NodeRecord<T> {
    /// The node without children, and whether it should have any.
    fn into_detached(self) -> (ClusterNode<T>, bool) {
        let node = ClusterNode::leaf(self.index, self.center)
            .with_size(self.size)
            .with_cost(self.cost)
            .with_height(self.height)
            .with_weight(self.weight);
        (node, self.has_children)
    }
}

impl<T: Serialize> Serialize for ClusterNode<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.subtree().into_iter().map(NodeRef::from))
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ClusterNode<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let records = Vec::<NodeRecord<T>>::deserialize(deserializer)?;
        Self::from_pre_order(records.into_iter().map(NodeRecord::into_detached)).ok_or_else(|| {
            <D::Error as serde::de::Error>::custom("the nodes do not describe one binary tree in pre-order")
        })
    }
}

impl<T: Serialize> ClusterNode<T> {
    /// Saves the subtree of this node to the given location.
    ///
    /// # Errors
    ///
    /// * If the file cannot be created.
    /// * If the tree cannot be serialized.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        ftlog::debug!("Saving a tree of {} nodes to {:?}", self.subtree().len(), path.as_ref());
        let mut writer = BufWriter::new(File::create(path)?);
        bincode::serialize_into(&mut writer, self)?;
        Ok(())
    }
}

impl<T: DeserializeOwned> ClusterNode<T> {
    /// Loads a tree from the given location.
    ///
    /// # Errors
    ///
    /// * If the file cannot be opened.
    /// * If the tree cannot be deserialized.
    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        ftlog::debug!("Loading a tree from {:?}", path.as_ref());
        let reader = BufReader::new(File::open(path)?);
        Ok(bincode::deserialize_from(reader)?)
    }
}
