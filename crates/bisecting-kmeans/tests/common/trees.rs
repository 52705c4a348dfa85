//! Hand-built and random trees for testing.

use bisecting_kmeans::{metric::Euclidean, ClusterNode, LinkageRow, Metric};
use rand::prelude::*;

use super::data_gen;

/// Two leaves with centers at `[0.0]` and `[10.0]`.
pub fn two_leaves() -> ClusterNode<f64> {
    let left = ClusterNode::leaf(1, vec![0.0]).with_weight(5.0);
    let right = ClusterNode::leaf(2, vec![10.0]).with_weight(5.0);
    ClusterNode::internal(0, vec![5.0], 10.0, left, right)
}

/// The root splits into leaf `A` and an internal node that splits into leaves
/// `B` and `C`.
pub fn three_leaves() -> ClusterNode<f64> {
    let a = ClusterNode::leaf(1, vec![0.0, 0.0]).with_size(4).with_weight(6.0);
    let b = ClusterNode::leaf(3, vec![9.0, 0.0]).with_size(2).with_weight(1.0);
    let c = ClusterNode::leaf(4, vec![11.0, 0.0]).with_size(2).with_weight(1.0);
    let bc = ClusterNode::internal(2, vec![10.0, 0.0], 2.0, b, c).with_weight(4.0);
    ClusterNode::internal(0, vec![5.0, 0.0], 10.0, a, bc)
}

/// A random tree with `n_leaves` leaves.
///
/// The leaves have indices `0..n_leaves`, in left-to-right order, and internal
/// nodes have the following indices. Adjacent nodes are merged in a random
/// order, with strictly increasing heights, so the tree is a valid dendrogram.
/// Each node's weight is the distance from its parent's center.
pub fn random(n_leaves: usize, dim: usize, seed: u64) -> ClusterNode<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let centers = data_gen::tabular(n_leaves, dim, -10.0, 10.0, seed);

    let mut nodes = centers
        .into_iter()
        .enumerate()
        .map(|(i, c)| ClusterNode::leaf(i, c).with_size(1))
        .collect::<Vec<_>>();
    let mut next_index = n_leaves;
    let mut height = 0.0;

    while nodes.len() > 1 {
        let i = rng.gen_range(0..nodes.len() - 1);
        let right = nodes.remove(i + 1);
        let left = nodes.remove(i);

        #[allow(clippy::cast_precision_loss)]
        let (l_size, r_size) = (left.size() as f64, right.size() as f64);
        let center = left
            .center()
            .iter()
            .zip(right.center())
            .map(|(l, r)| (l * l_size + r * r_size) / (l_size + r_size))
            .collect::<Vec<_>>();

        let l_weight = Euclidean.distance(center.as_slice(), left.center()).unwrap();
        let r_weight = Euclidean.distance(center.as_slice(), right.center()).unwrap();
        height += rng.gen_range(0.1..1.0);

        let node = ClusterNode::internal(
            next_index,
            center,
            height,
            left.with_weight(l_weight),
            right.with_weight(r_weight),
        );
        next_index += 1;
        nodes.insert(i, node);
    }

    nodes.pop().unwrap()
}

/// A tree in which every internal node has a leaf as its left child, built
/// bottom-up so that nothing recurses on the depth of the tree.
pub fn caterpillar(n_leaves: usize) -> ClusterNode<f64> {
    let mut next_index = n_leaves;
    let mut root = ClusterNode::leaf(n_leaves - 1, vec![(n_leaves - 1) as f64]);
    for i in (0..n_leaves - 1).rev() {
        let leaf = ClusterNode::leaf(i, vec![i as f64]);
        let height = (n_leaves - i) as f64;
        root = ClusterNode::internal(next_index, vec![i as f64 + 0.5], height, leaf, root);
        next_index += 1;
    }
    root
}

/// The number of leaves under the node with the given linkage id.
pub fn linkage_count(rows: &[LinkageRow], n_leaves: usize, id: usize) -> usize {
    if id < n_leaves {
        1
    } else {
        rows[id - n_leaves].count
    }
}
