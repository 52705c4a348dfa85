//! Exporting a tree of `ClusterNode`s as an adjacency list or as a linkage
//! matrix for dendrogram plotting.

use core::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};

use super::ClusterNode;

/// One parent-to-child edge of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// The `index` of the parent node.
    pub parent: usize,
    /// The `index` of the child node.
    pub child: usize,
    /// The `weight` stored on the child node.
    pub weight: f64,
}

impl Edge {
    /// The edge as a row of three numbers, `[parent, child, weight]`.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn to_array(&self) -> [f64; 3] {
        [self.parent as f64, self.child as f64, self.weight]
    }
}

/// One row of a linkage matrix, describing one internal node of the tree.
///
/// The ids follow the usual dendrogram convention: with `n` leaves, the leaf
/// at position `i` in [`ClusterNode::leaves`] has id `i`, and the node merged
/// in row `r` has id `n + r`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinkageRow {
    /// The id of the left child.
    pub left: usize,
    /// The id of the right child.
    pub right: usize,
    /// The dissimilarity at which the two children were merged.
    pub height: f64,
    /// The number of leaves under the merged node.
    pub count: usize,
}

impl LinkageRow {
    /// The row as four numbers, `[left, right, height, count]`.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn to_array(&self) -> [f64; 4] {
        [self.left as f64, self.right as f64, self.height, self.count as f64]
    }
}

/// A node of the tree, flattened into an arena in pre-order.
struct FlatNode<'a, T> {
    /// The node itself.
    node: &'a ClusterNode<T>,
    /// The arena position of the parent.
    parent: Option<usize>,
    /// The arena positions of the left and right children.
    children: Vec<usize>,
}

/// Flattens the subtree of `root` into an arena in pre-order, with left
/// children before right children.
fn flatten<T>(root: &ClusterNode<T>) -> Vec<FlatNode<'_, T>> {
    let mut arena: Vec<FlatNode<'_, T>> = Vec::new();
    let mut stack: Vec<(&ClusterNode<T>, Option<usize>)> = vec![(root, None)];
    while let Some((node, parent)) = stack.pop() {
        let position = arena.len();
        if let Some(p) = parent {
            arena[p].children.push(position);
        }
        arena.push(FlatNode {
            node,
            parent,
            children: Vec::with_capacity(2),
        });
        if let Some([left, right]) = node.children() {
            stack.push((right, Some(position)));
            stack.push((left, Some(position)));
        }
    }
    arena
}

/// An internal node whose children both have linkage ids.
///
/// Ordered so that a `BinaryHeap` pops the lowest height first, and among equal
/// heights, the lowest arena position.
struct Ready {
    /// The merge height of the node.
    height: f64,
    /// The arena position of the node.
    position: usize,
}

impl PartialEq for Ready {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ready {}

impl PartialOrd for Ready {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ready {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .height
            .total_cmp(&self.height)
            .then_with(|| other.position.cmp(&self.position))
    }
}

impl<T> ClusterNode<T> {
    /// Exports the subtree of this node as an adjacency list.
    ///
    /// Each internal node contributes two edges, one per child, in pre-order
    /// with the left child first. Each edge carries the node `index` of the
    /// parent and child, and the `weight` stored on the child.
    pub fn to_adjacency_list(&self) -> Vec<Edge> {
        self.subtree()
            .into_iter()
            .filter_map(|parent| {
                parent.children().map(|[left, right]| {
                    [left, right].map(|child| Edge {
                        parent: parent.index(),
                        child: child.index(),
                        weight: child.weight(),
                    })
                })
            })
            .flatten()
            .collect()
    }

    /// Exports the subtree of this node as a linkage matrix, with one row per
    /// internal node.
    ///
    /// Leaves are numbered by their position in [`leaves`](Self::leaves) and
    /// the node merged in row `r` is numbered `n + r`, where `n` is the number
    /// of leaves. Rows are emitted in ascending order of merge height, except
    /// that a node is never emitted before both of its children; ties go to the
    /// node met first in pre-order.
    pub fn to_linkage_matrix(&self) -> Vec<LinkageRow> {
        let arena = flatten(self);

        let mut ids = vec![None; arena.len()];
        let mut counts = vec![0; arena.len()];
        let leaf_positions = arena
            .iter()
            .enumerate()
            .filter(|(_, f)| f.node.is_leaf())
            .map(|(p, _)| p)
            .collect::<Vec<_>>();
        let n = leaf_positions.len();
        for (id, p) in leaf_positions.into_iter().enumerate() {
            ids[p] = Some(id);
            counts[p] = 1;
        }

        let is_ready = |p: usize, ids: &[Option<usize>]| {
            !arena[p].node.is_leaf() && arena[p].children.iter().all(|&c| ids[c].is_some())
        };

        let mut queue = (0..arena.len())
            .filter(|&p| is_ready(p, &ids))
            .map(|p| Ready {
                height: arena[p].node.height(),
                position: p,
            })
            .collect::<BinaryHeap<_>>();

        let mut rows = Vec::with_capacity(arena.len() - n);
        while let Some(Ready { position, .. }) = queue.pop() {
            let flat = &arena[position];
            let (l, r) = (flat.children[0], flat.children[1]);
            let (Some(left), Some(right)) = (ids[l], ids[r]) else {
                unreachable!("A node is only queued once both of its children have ids.")
            };

            let count = counts[l] + counts[r];
            rows.push(LinkageRow {
                left,
                right,
                height: flat.node.height(),
                count,
            });
            ids[position] = Some(n + rows.len() - 1);
            counts[position] = count;

            if let Some(p) = flat.parent {
                if is_ready(p, &ids) {
                    queue.push(Ready {
                        height: arena[p].node.height(),
                        position: p,
                    });
                }
            }
        }

        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_leaves() -> ClusterNode<f64> {
        let a = ClusterNode::leaf(1, vec![0.0]).with_weight(5.0);
        let b = ClusterNode::leaf(3, vec![9.0]).with_weight(1.0);
        let c = ClusterNode::leaf(4, vec![11.0]).with_weight(1.0);
        let bc = ClusterNode::internal(2, vec![10.0], 2.0, b, c).with_weight(5.0);
        ClusterNode::internal(0, vec![5.0], 10.0, a, bc)
    }

    #[test]
    fn flatten_links_parents_and_children() {
        let root = three_leaves();
        let arena = flatten(&root);
        let indices = arena.iter().map(|f| f.node.index()).collect::<Vec<_>>();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
        assert_eq!(arena[0].children, vec![1, 2]);
        assert_eq!(arena[2].children, vec![3, 4]);
        assert_eq!(arena[3].parent, Some(2));
        assert!(arena[1].children.is_empty());
    }

    #[test]
    fn ready_pops_lowest_height_then_position() {
        let mut heap = BinaryHeap::new();
        heap.push(Ready { height: 3.0, position: 0 });
        heap.push(Ready { height: 1.0, position: 5 });
        heap.push(Ready { height: 1.0, position: 2 });
        let order = core::iter::from_fn(|| heap.pop().map(|r| r.position)).collect::<Vec<_>>();
        assert_eq!(order, vec![2, 5, 0]);
    }

    #[test]
    fn non_monotone_heights_keep_children_first() {
        // The parent is lower than its child, so it must wait for the child.
        let b = ClusterNode::leaf(3, vec![9.0]);
        let c = ClusterNode::leaf(4, vec![11.0]);
        let bc = ClusterNode::internal(2, vec![10.0], 7.0, b, c);
        let a = ClusterNode::leaf(1, vec![0.0]);
        let root = ClusterNode::internal(0, vec![5.0], 1.0, a, bc);

        let rows = root.to_linkage_matrix();
        assert_eq!(rows.len(), 2);
        assert_eq!((rows[0].left, rows[0].right, rows[0].count), (1, 2, 2));
        assert_eq!((rows[1].left, rows[1].right, rows[1].count), (0, 3, 3));
    }
}
