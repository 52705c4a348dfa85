//! The `SquaredEuclidean` distance function.

use distances::number::Float;

use super::{check_dimensions, Metric};

/// The squared Euclidean distance.
///
/// This is not a metric in the strict sense because it does not obey the
/// triangle inequality, but nearest-center assignments under it are the same
/// as under [`Euclidean`](super::Euclidean). A model served with this metric
/// reports a true sum of squared errors from
/// [`wssse`](crate::BisectingKMeansModel::wssse).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SquaredEuclidean;

impl<T: Float> Metric<T> for SquaredEuclidean {
    fn distance(&self, a: &[T], b: &[T]) -> crate::Result<T> {
        check_dimensions(a, b)?;
        Ok(distances::vectors::euclidean_sq(a, b))
    }

    fn name(&self) -> &str {
        "squared-euclidean"
    }

    fn has_identity(&self) -> bool {
        true
    }

    fn has_non_negativity(&self) -> bool {
        true
    }

    fn has_symmetry(&self) -> bool {
        true
    }

    fn obeys_triangle_inequality(&self) -> bool {
        false
    }

    fn is_expensive(&self) -> bool {
        false
    }
}
