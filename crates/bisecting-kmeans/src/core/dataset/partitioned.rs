//! A `Partitioned` dataset is split into independent partitions that are
//! processed in parallel.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// A dataset of items of type `I`, split into ordered partitions.
///
/// The partitions are processed independently and in parallel by the `map`
/// methods, and the order of items within and across partitions is preserved.
///
/// # Example
///
/// ```rust
/// use bisecting_kmeans::Partitioned;
///
/// let data = Partitioned::from_vec((0..10).collect::<Vec<_>>(), 3);
/// assert_eq!(data.num_partitions(), 3);
/// assert_eq!(data.len(), 10);
///
/// let doubled = data.map_partitions(|p| p.iter().map(|x| x * 2).collect());
/// assert_eq!(doubled.into_vec(), (0..10).map(|x| x * 2).collect::<Vec<_>>());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partitioned<I> {
    /// The partitions, in order.
    partitions: Vec<Vec<I>>,
}

impl<I> Partitioned<I> {
    /// Splits `items` into `num_partitions` contiguous partitions of nearly
    /// equal size.
    ///
    /// A `num_partitions` of zero is treated as one. There may be fewer
    /// non-empty partitions than requested if there are fewer items than
    /// partitions.
    #[must_use]
    pub fn from_vec(items: Vec<I>, num_partitions: usize) -> Self {
        let num_partitions = num_partitions.max(1);
        let (base, extra) = (items.len() / num_partitions, items.len() % num_partitions);

        let mut items = items.into_iter();
        let partitions = (0..num_partitions)
            .map(|i| {
                let size = base + usize::from(i < extra);
                items.by_ref().take(size).collect()
            })
            .collect();

        Self { partitions }
    }

    /// Wraps partitions that were already split.
    #[must_use]
    pub const fn from_partitions(partitions: Vec<Vec<I>>) -> Self {
        Self { partitions }
    }

    /// The number of partitions.
    #[must_use]
    pub fn num_partitions(&self) -> usize {
        self.partitions.len()
    }

    /// The total number of items across all partitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.partitions.iter().map(Vec::len).sum()
    }

    /// Whether there are no items in any partition.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.partitions.iter().all(Vec::is_empty)
    }

    /// The partitions, in order.
    #[must_use]
    pub fn partitions(&self) -> &[Vec<I>] {
        &self.partitions
    }

    /// All items, in order, as a single `Vec`.
    #[must_use]
    pub fn into_vec(self) -> Vec<I> {
        self.partitions.into_iter().flatten().collect()
    }

    /// An iterator over all items, in order.
    pub fn iter(&self) -> impl Iterator<Item = &I> {
        self.partitions.iter().flatten()
    }
}

impl<I: Send + Sync> Partitioned<I> {
    /// Applies `f` to every partition in parallel, keeping the partitioning.
    pub fn map_partitions<O, F>(&self, f: F) -> Partitioned<O>
    where
        O: Send,
        F: Fn(&[I]) -> Vec<O> + Send + Sync,
    {
        let partitions = self.partitions.par_iter().map(|p| f(p)).collect();
        Partitioned { partitions }
    }

    /// Applies the fallible `f` to every partition in parallel, keeping the
    /// partitioning.
    ///
    /// # Errors
    ///
    /// If `f` fails on any partition, the whole job fails with one of the
    /// errors from `f`.
    pub fn try_map_partitions<O, E, F>(&self, f: F) -> Result<Partitioned<O>, E>
    where
        O: Send,
        E: Send,
        F: Fn(&[I]) -> Result<Vec<O>, E> + Send + Sync,
    {
        let partitions = self.partitions.par_iter().map(|p| f(p)).collect::<Result<_, _>>()?;
        Ok(Partitioned { partitions })
    }

    /// Applies the fallible `f` to every partition in parallel and returns
    /// one value per partition.
    ///
    /// # Errors
    ///
    /// If `f` fails on any partition, the whole job fails with one of the
    /// errors from `f`.
    pub fn try_aggregate_partitions<O, E, F>(&self, f: F) -> Result<Vec<O>, E>
    where
        O: Send,
        E: Send,
        F: Fn(&[I]) -> Result<O, E> + Send + Sync,
    {
        self.partitions.par_iter().map(|p| f(p)).collect()
    }
}

impl<I> From<Vec<I>> for Partitioned<I> {
    fn from(items: Vec<I>) -> Self {
        Self::from_vec(items, rayon::current_num_threads())
    }
}

impl<I> FromIterator<I> for Partitioned<I> {
    fn from_iter<It: IntoIterator<Item = I>>(iter: It) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

#[cfg(test)]
mod tests {
    use super::Partitioned;

    #[test]
    fn near_equal_sizes() {
        let data = Partitioned::from_vec((0..11).collect::<Vec<_>>(), 4);
        let sizes = data.partitions().iter().map(Vec::len).collect::<Vec<_>>();
        assert_eq!(sizes, vec![3, 3, 3, 2]);
        assert_eq!(data.into_vec(), (0..11).collect::<Vec<_>>());
    }

    #[test]
    fn zero_partitions() {
        let data = Partitioned::from_vec(vec![1, 2, 3], 0);
        assert_eq!(data.num_partitions(), 1);
        assert_eq!(data.len(), 3);
    }

    #[test]
    fn more_partitions_than_items() {
        let data = Partitioned::from_vec(vec![1, 2], 5);
        assert_eq!(data.num_partitions(), 5);
        assert_eq!(data.len(), 2);
        assert!(!data.is_empty());
        assert_eq!(data.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn map_keeps_partitioning() {
        let data = Partitioned::from_partitions(vec![vec![1, 2], vec![], vec![3]]);
        let doubled = data.map_partitions(|p| p.iter().map(|x| x * 2).collect());
        assert_eq!(doubled.partitions(), &[vec![2, 4], vec![], vec![6]]);

        let sums = data.try_aggregate_partitions(|p| Ok::<_, ()>(p.iter().sum::<i32>()));
        assert_eq!(sums, Ok(vec![3, 0, 3]));
    }

    #[test]
    fn conversions() {
        let data = Partitioned::from((0..10).collect::<Vec<_>>());
        assert_eq!(data.num_partitions(), rayon::current_num_threads());
        assert_eq!(data.len(), 10);

        let collected = (0..10).collect::<Partitioned<_>>();
        assert_eq!(collected, data);
    }

    #[test]
    fn first_error_fails_the_job() {
        let data = Partitioned::from_vec((0..8).collect::<Vec<i32>>(), 4);
        let result = data.try_map_partitions(|p| {
            if p.contains(&5) {
                Err("bad item")
            } else {
                Ok(p.to_vec())
            }
        });
        assert_eq!(result, Err("bad item"));
    }
}
