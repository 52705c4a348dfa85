//! The `BisectingKMeansModel` serves a tree built by bisecting k-means.

use std::{collections::HashSet, path::Path, sync::Arc};

use distances::Number;
use rayon::prelude::*;
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    metric::{Euclidean, ParMetric},
    search::{find_closest_center, par_find_closest_center},
    Broadcast, ClusterNode, Edge, Error, LinkageRow, Partitioned, Result,
};

/// A hierarchical clustering model produced by bisecting k-means.
///
/// The model wraps the root of an immutable tree of [`ClusterNode`]s. The
/// centers of the leaves are extracted once, at construction, in the order of
/// [`ClusterNode::leaves`], and every prediction is an index into that order.
/// The same positions are used as leaf ids in
/// [`to_linkage_matrix`](Self::to_linkage_matrix).
///
/// # Type Parameters
///
/// - `T`: The type of the elements of the center vectors and of distances.
/// - `M`: The metric used to assign points to centers.
///
/// # Example
///
/// ```rust
/// use bisecting_kmeans::{metric::Euclidean, BisectingKMeansModel, ClusterNode};
///
/// let left = ClusterNode::leaf(1, vec![0.0]);
/// let right = ClusterNode::leaf(2, vec![10.0]);
/// let root = ClusterNode::internal(0, vec![5.0], 10.0, left, right);
/// let model = BisectingKMeansModel::new(root, Euclidean).unwrap();
///
/// assert_eq!(model.k(), 2);
/// assert_eq!(model.predict(&[1.0]), Ok(0));
/// assert_eq!(model.predict(&[6.0]), Ok(1));
/// assert_eq!(model.predict(&[5.0]), Ok(0));
/// assert_eq!(model.wssse(&[vec![1.0], vec![6.0]]), Ok(5.0));
/// ```
#[derive(Debug)]
pub struct BisectingKMeansModel<T, M = Euclidean> {
    /// The root of the tree.
    root: Arc<ClusterNode<T>>,
    /// The centers of the leaves, from left to right.
    centers: Broadcast<Vec<Vec<T>>>,
    /// The metric used to assign points to centers.
    metric: Arc<M>,
    /// The dimensionality of every center in the tree.
    dimensionality: usize,
}

impl<T, M> Clone for BisectingKMeansModel<T, M> {
    fn clone(&self) -> Self {
        Self {
            root: Arc::clone(&self.root),
            centers: self.centers.clone(),
            metric: Arc::clone(&self.metric),
            dimensionality: self.dimensionality,
        }
    }
}

/// The read-only state shared with every partition of a parallel job.
struct SharedCenters<T, M> {
    /// The centers of the leaves, from left to right.
    centers: Broadcast<Vec<Vec<T>>>,
    /// The metric used to assign points to centers.
    metric: Arc<M>,
}

impl<T: Number, M: ParMetric<T>> SharedCenters<T, M> {
    /// Assigns each point of a partition to its closest center.
    fn predict_partition<P: AsRef<[T]>>(&self, points: &[P]) -> Result<Vec<usize>> {
        points
            .iter()
            .map(|p| find_closest_center(self.metric.as_ref(), self.centers.as_slice(), p.as_ref()).map(|(i, _)| i))
            .collect()
    }

    /// Sums the distances from each point of a partition to its closest center.
    fn cost_partition<P: AsRef<[T]>>(&self, points: &[P]) -> Result<T> {
        points
            .iter()
            .map(|p| find_closest_center(self.metric.as_ref(), self.centers.as_slice(), p.as_ref()).map(|(_, d)| d))
            .sum()
    }
}

impl<T: Number, M: ParMetric<T>> BisectingKMeansModel<T, M> {
    /// Creates a new model from the root of a tree built by bisecting k-means.
    ///
    /// # Errors
    ///
    /// * [`Error::DuplicateIndex`] if two nodes in the tree share an index.
    /// * [`Error::DimensionMismatch`] if the centers in the tree do not all
    ///   have the same dimensionality.
    pub fn new(root: ClusterNode<T>, metric: M) -> Result<Self> {
        Self::from_shared(Arc::new(root), Arc::new(metric))
    }

    /// Creates a new model from a tree and a metric that are already shared.
    ///
    /// # Errors
    ///
    /// See [`new`](Self::new).
    pub fn from_shared(root: Arc<ClusterNode<T>>, metric: Arc<M>) -> Result<Self> {
        let dimensionality = Self::validate(&root)?;
        let centers = root
            .leaves()
            .into_iter()
            .map(|leaf| leaf.center().to_vec())
            .collect::<Vec<_>>();

        ftlog::debug!(
            "Created a model with {} leaves of dimensionality {dimensionality} using the {} metric.",
            centers.len(),
            metric.name()
        );

        Ok(Self {
            root,
            centers: Broadcast::new(centers),
            metric,
            dimensionality,
        })
    }

    /// Checks that node indices are unique and that all centers have the same
    /// dimensionality, returning that dimensionality.
    fn validate(root: &ClusterNode<T>) -> Result<usize> {
        let dimensionality = root.center().len();
        let mut seen = HashSet::new();
        for node in root.subtree() {
            if !seen.insert(node.index()) {
                return Err(Error::DuplicateIndex(node.index()));
            }
            if node.center().len() != dimensionality {
                return Err(Error::DimensionMismatch {
                    expected: dimensionality,
                    found: node.center().len(),
                });
            }
        }
        Ok(dimensionality)
    }

    /// The root of the tree.
    pub fn root(&self) -> &ClusterNode<T> {
        &self.root
    }

    /// The metric used to assign points to centers.
    pub fn metric(&self) -> &M {
        &self.metric
    }

    /// The number of leaf clusters.
    pub fn k(&self) -> usize {
        self.centers.len()
    }

    /// The dimensionality of the centers.
    pub const fn dimensionality(&self) -> usize {
        self.dimensionality
    }

    /// The leaf clusters, from left to right.
    pub fn clusters(&self) -> Vec<&ClusterNode<T>> {
        self.root.leaves()
    }

    /// The centers of the leaf clusters, in the same order as
    /// [`clusters`](Self::clusters).
    pub fn centers(&self) -> &[Vec<T>] {
        self.centers.value()
    }

    /// Assigns a point to its closest leaf cluster.
    ///
    /// # Returns
    ///
    /// The position of the closest cluster in [`clusters`](Self::clusters).
    ///
    /// # Errors
    ///
    /// * [`Error::DimensionMismatch`] if the point does not have the
    ///   dimensionality of the centers.
    pub fn predict(&self, point: &[T]) -> Result<usize> {
        self.predict_with_distance(point).map(|(i, _)| i)
    }

    /// Assigns a point to its closest leaf cluster and returns the distance to
    /// the center of that cluster as well.
    ///
    /// # Errors
    ///
    /// See [`predict`](Self::predict).
    pub fn predict_with_distance(&self, point: &[T]) -> Result<(usize, T)> {
        if self.metric.is_expensive() {
            par_find_closest_center(self.metric.as_ref(), self.centers(), point)
        } else {
            find_closest_center(self.metric.as_ref(), self.centers(), point)
        }
    }

    /// Returns the leaf cluster closest to the point.
    ///
    /// # Errors
    ///
    /// See [`predict`](Self::predict).
    pub fn predict_leaf(&self, point: &[T]) -> Result<&ClusterNode<T>> {
        let position = self.predict(point)?;
        match self.root.leaf_at(position) {
            Some(leaf) => Ok(leaf),
            None => unreachable!("Every prediction is the position of a leaf."),
        }
    }

    /// Returns the leaf cluster closest to each point, preserving the order of
    /// the points.
    ///
    /// # Errors
    ///
    /// See [`predict_many`](Self::predict_many).
    pub fn predict_leaves<P: AsRef<[T]>>(&self, points: &[P]) -> Result<Vec<&ClusterNode<T>>> {
        let positions = self.predict_many(points)?;
        let leaves = self.clusters();
        Ok(positions.into_iter().map(|i| leaves[i]).collect())
    }

    /// Assigns each point to its closest leaf cluster, preserving the order of
    /// the points.
    ///
    /// # Errors
    ///
    /// If any point fails, the whole call fails. See [`predict`](Self::predict).
    pub fn predict_many<P: AsRef<[T]>>(&self, points: &[P]) -> Result<Vec<usize>> {
        points.iter().map(|p| self.predict(p.as_ref())).collect()
    }

    /// Parallel version of [`predict_many`](Self::predict_many).
    ///
    /// # Errors
    ///
    /// See [`predict_many`](Self::predict_many).
    pub fn par_predict_many<P: AsRef<[T]> + Send + Sync>(&self, points: &[P]) -> Result<Vec<usize>> {
        points.par_iter().map(|p| self.predict(p.as_ref())).collect()
    }

    /// Assigns each point in a partitioned dataset to its closest leaf cluster.
    ///
    /// The centers and the metric are shared with every partition once for the
    /// whole job. The partitions are processed in parallel, and the output has
    /// the same partitioning and order as the input.
    ///
    /// # Errors
    ///
    /// If any point in any partition fails, the whole job fails. See
    /// [`predict`](Self::predict).
    pub fn par_predict<P: AsRef<[T]> + Send + Sync>(&self, data: &Partitioned<P>) -> Result<Partitioned<usize>> {
        let shared = self.broadcast(data);
        data.try_map_partitions(|points| shared.predict_partition(points))
    }

    /// The sum of the distances from each point to its closest center.
    ///
    /// Despite the name, the distances are summed as the metric returns them;
    /// they are not squared. With [`Euclidean`] this is the sum of L2 distances.
    /// Use [`SquaredEuclidean`](crate::metric::SquaredEuclidean) for a sum of
    /// squared errors.
    ///
    /// This is zero for an empty dataset.
    ///
    /// # Errors
    ///
    /// See [`predict`](Self::predict).
    pub fn wssse<P: AsRef<[T]>>(&self, data: &[P]) -> Result<T> {
        data.iter()
            .map(|p| self.predict_with_distance(p.as_ref()).map(|(_, d)| d))
            .sum()
    }

    /// Partitioned, parallel version of [`wssse`](Self::wssse).
    ///
    /// # Errors
    ///
    /// See [`predict`](Self::predict).
    pub fn par_wssse<P: AsRef<[T]> + Send + Sync>(&self, data: &Partitioned<P>) -> Result<T> {
        let shared = self.broadcast(data);
        let costs = data.try_aggregate_partitions(|points| shared.cost_partition(points))?;
        Ok(costs.into_iter().sum())
    }

    /// Builds the state that is shared with every partition of `data`.
    fn broadcast<P>(&self, data: &Partitioned<P>) -> Broadcast<SharedCenters<T, M>> {
        ftlog::debug!(
            "Sharing {} centers with {} partitions holding {} points.",
            self.k(),
            data.num_partitions(),
            data.len()
        );
        Broadcast::new(SharedCenters {
            centers: self.centers.clone(),
            metric: Arc::clone(&self.metric),
        })
    }

    /// The tree as an adjacency list. See [`ClusterNode::to_adjacency_list`].
    pub fn to_adjacency_list(&self) -> Vec<Edge> {
        self.root.to_adjacency_list()
    }

    /// The tree as a linkage matrix. See [`ClusterNode::to_linkage_matrix`].
    pub fn to_linkage_matrix(&self) -> Vec<LinkageRow> {
        self.root.to_linkage_matrix()
    }

    /// The adjacency list as rows of `[parent, child, weight]`.
    pub fn adjacency_array(&self) -> Vec<[f64; 3]> {
        self.to_adjacency_list().iter().map(Edge::to_array).collect()
    }

    /// The linkage matrix as rows of `[left, right, height, count]`.
    pub fn linkage_array(&self) -> Vec<[f64; 4]> {
        self.to_linkage_matrix().iter().map(LinkageRow::to_array).collect()
    }
}

impl<T: Number + Serialize, M: ParMetric<T>> BisectingKMeansModel<T, M> {
    /// Saves the tree of the model to the given location. The metric is not
    /// saved.
    ///
    /// # Errors
    ///
    /// See [`ClusterNode::save`].
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.root.save(path)
    }
}

impl<T: Number + DeserializeOwned, M: ParMetric<T>> BisectingKMeansModel<T, M> {
    /// Loads a tree from the given location and serves it with `metric`.
    ///
    /// # Errors
    ///
    /// See [`ClusterNode::load`] and [`new`](Self::new).
    pub fn load<P: AsRef<Path>>(path: P, metric: M) -> Result<Self> {
        Self::new(ClusterNode::load(path)?, metric)
    }
}
