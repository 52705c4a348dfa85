//! A `ClusterNode` is one cluster in a tree built by bisecting k-means.

/// A `ClusterNode` represents one cluster in a tree built by bisecting k-means.
///
/// Every node has an `index` that is unique within its tree and a `center`
/// vector. A node is either a leaf, i.e. one of the final clusters, or it was
/// split into exactly two children during training.
///
/// The tree is built by the training algorithm and is never modified after
/// that. Traversals, comparison, cloning, serialization and dropping all use
/// an explicit stack so that deep, unbalanced trees do not overflow the call
/// stack.
///
/// # Example
///
/// ```rust
/// use bisecting_kmeans::ClusterNode;
///
/// let a = ClusterNode::leaf(1, vec![0.0]);
/// let b = ClusterNode::leaf(3, vec![9.0]);
/// let c = ClusterNode::leaf(4, vec![11.0]);
/// let bc = ClusterNode::internal(2, vec![10.0], 2.0, b, c);
/// let root = ClusterNode::internal(0, vec![20.0 / 3.0], 10.0, a, bc);
///
/// let leaves = root.leaves().into_iter().map(ClusterNode::index).collect::<Vec<_>>();
/// assert_eq!(leaves, vec![1, 3, 4]);
/// assert_eq!(root.num_internal(), 2);
/// assert_eq!(root.max_depth(), 2);
/// ```
#[derive(Debug)]
pub struct ClusterNode<T> {
    /// The identifier of the node, unique within its tree.
    index: usize,
    /// The center of the cluster.
    center: Vec<T>,
    /// The number of training points assigned to the cluster.
    size: usize,
    /// The training cost of the cluster.
    cost: f64,
    /// The dissimilarity at which the children of this node were merged.
    height: f64,
    /// The weight of the edge from the parent of this node to this node.
    weight: f64,
    /// The children of the node, if it was split during training.
    children: Option<Children<T>>,
}

/// The two children of a `ClusterNode` that was split during training.
#[derive(Debug, Clone, PartialEq)]
pub struct Children<T> {
    /// The left child.
    pub(crate) left: Box<ClusterNode<T>>,
    /// The right child.
    pub(crate) right: Box<ClusterNode<T>>,
}

impl<T> ClusterNode<T> {
    /// Creates a new leaf, i.e. one of the final clusters.
    ///
    /// The `height`, `weight`, `size` and `cost` of the leaf start at zero.
    #[must_use]
    pub fn leaf(index: usize, center: Vec<T>) -> Self {
        Self {
            index,
            center,
            size: 0,
            cost: 0.0,
            height: 0.0,
            weight: 0.0,
            children: None,
        }
    }

    /// Creates a new internal node that was split into `left` and `right`
    /// during training.
    ///
    /// # Arguments
    ///
    /// * `index`: The identifier of the node, unique within the tree.
    /// * `center`: The center of the cluster.
    /// * `height`: The dissimilarity at which `left` and `right` were merged.
    /// * `left`: The left child.
    /// * `right`: The right child.
    #[must_use]
    pub fn internal(index: usize, center: Vec<T>, height: f64, left: Self, right: Self) -> Self {
        let size = left.size + right.size;
        Self {
            index,
            center,
            size,
            cost: 0.0,
            height,
            weight: 0.0,
            children: Some(Children {
                left: Box::new(left),
                right: Box::new(right),
            }),
        }
    }

    /// Sets the number of training points assigned to the cluster.
    #[must_use]
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Sets the training cost of the cluster.
    #[must_use]
    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = cost;
        self
    }

    /// Sets the merge height of the node.
    #[must_use]
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    /// Sets the weight of the edge from the parent of this node to this node.
    ///
    /// This is usually the distance from the parent's center to this node's
    /// center. It is exported as-is by
    /// [`to_adjacency_list`](Self::to_adjacency_list).
    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// The identifier of the node, unique within its tree.
    pub const fn index(&self) -> usize {
        self.index
    }

    /// The center of the cluster.
    pub fn center(&self) -> &[T] {
        &self.center
    }

    /// The number of training points assigned to the cluster.
    ///
    /// For internal nodes built with [`internal`](Self::internal) this
    /// defaults to the sum of the sizes of the children.
    pub const fn size(&self) -> usize {
        self.size
    }

    /// The training cost of the cluster.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// The dissimilarity at which the children of this node were merged.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// The weight of the edge from the parent of this node to this node.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Whether this node has no children.
    pub const fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// A 2-slice of references to the left and right children.
    pub fn children(&self) -> Option<[&Self; 2]> {
        self.children.as_ref().map(|c| [c.left.as_ref(), c.right.as_ref()])
    }

    /// The leaves in the subtree of this node, from left to right.
    ///
    /// The order is deterministic: it is the order in which a depth-first
    /// traversal that visits left children before right children meets the
    /// leaves.
    pub fn leaves(&self) -> Vec<&Self> {
        self.subtree().into_iter().filter(|n| n.is_leaf()).collect()
    }

    /// The leaf at `position` in [`leaves`](Self::leaves), found without
    /// collecting the leaves that follow it.
    pub fn leaf_at(&self, position: usize) -> Option<&Self> {
        let mut remaining = position;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node.children() {
                Some([left, right]) => {
                    stack.push(right);
                    stack.push(left);
                }
                None if remaining == 0 => return Some(node),
                None => remaining -= 1,
            }
        }
        None
    }

    /// All nodes in the subtree of this node, including this node, in
    /// pre-order, with left children before right children.
    pub fn subtree(&self) -> Vec<&Self> {
        let mut nodes = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            nodes.push(node);
            if let Some([left, right]) = node.children() {
                stack.push(right);
                stack.push(left);
            }
        }
        nodes
    }

    /// The number of leaves in the subtree of this node.
    pub fn num_leaves(&self) -> usize {
        self.subtree().into_iter().filter(|n| n.is_leaf()).count()
    }

    /// The number of internal nodes in the subtree of this node.
    pub fn num_internal(&self) -> usize {
        self.subtree().into_iter().filter(|n| !n.is_leaf()).count()
    }

    /// The depth of the deepest leaf below this node. A leaf has depth 0.
    pub fn max_depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self, 0)];
        while let Some((node, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            if let Some([left, right]) = node.children() {
                stack.push((right, depth + 1));
                stack.push((left, depth + 1));
            }
        }
        max_depth
    }

    /// The node without its children, and whether it had any.
    pub(crate) fn detached(&self) -> (Self, bool)
    where
        T: Clone,
    {
        let node = Self {
            index: self.index,
            center: self.center.clone(),
            size: self.size,
            cost: self.cost,
            height: self.height,
            weight: self.weight,
            children: None,
        };
        (node, !self.is_leaf())
    }

    /// Rebuilds a tree from its nodes in pre-order, left children first.
    ///
    /// Each node is given without children, along with whether it had
    /// children. Returns `None` if the nodes do not describe exactly one binary
    /// tree.
    pub(crate) fn from_pre_order<I>(nodes: I) -> Option<Self>
    where
        I: IntoIterator<Item = (Self, bool)>,
        I::IntoIter: DoubleEndedIterator,
    {
        // In reverse pre-order, both subtrees of a node are complete, left on
        // top of right, by the time the node itself is reached.
        let mut stack = Vec::new();
        for (mut node, has_children) in nodes.into_iter().rev() {
            if has_children {
                let left = stack.pop()?;
                let right = stack.pop()?;
                node.children = Some(Children {
                    left: Box::new(left),
                    right: Box::new(right),
                });
            }
            stack.push(node);
        }

        let root = stack.pop()?;
        if stack.is_empty() {
            Some(root)
        } else {
            None
        }
    }

    /// Whether two nodes hold the same values, ignoring their children. Floats
    /// are compared bit for bit.
    fn same_values(&self, other: &Self) -> bool
    where
        T: PartialEq,
    {
        self.index == other.index
            && self.center == other.center
            && self.size == other.size
            && self.cost.to_bits() == other.cost.to_bits()
            && self.height.to_bits() == other.height.to_bits()
            && self.weight.to_bits() == other.weight.to_bits()
            && self.is_leaf() == other.is_leaf()
    }
}

impl<T: Clone> Clone for ClusterNode<T> {
    fn clone(&self) -> Self {
        let nodes = self.subtree().into_iter().map(Self::detached).collect::<Vec<_>>();
        match Self::from_pre_order(nodes) {
            Some(root) => root,
            None => unreachable!("A subtree in pre-order always rebuilds into one tree."),
        }
    }
}

impl<T: PartialEq> PartialEq for ClusterNode<T> {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = (self.subtree(), other.subtree());
        a.len() == b.len() && a.into_iter().zip(b).all(|(x, y)| x.same_values(y))
    }
}

impl<T> Drop for ClusterNode<T> {
    fn drop(&mut self) {
        // Unlink the subtree iteratively so that dropping a deep tree does not
        // recurse once per level.
        let mut stack = self.children.take().map_or_else(Vec::new, |c| vec![c.left, c.right]);
        while let Some(mut node) = stack.pop() {
            if let Some(c) = node.children.take() {
                stack.push(c.left);
                stack.push(c.right);
            }
        }
    }
}
