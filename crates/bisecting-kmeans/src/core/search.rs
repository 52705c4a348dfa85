//! Closest-center search.
//!
//! The search is a linear scan over the centers, with ties going to the lowest
//! index. The bisecting structure of the tree is not used to prune the scan;
//! callers flatten the tree to its leaf centers once and reuse that array for
//! every query.

use distances::Number;
use rayon::prelude::*;

use crate::{
    metric::{Metric, ParMetric},
    utils, Error, Result,
};

/// Finds the center closest to the `query`.
///
/// # Returns
///
/// The index of the closest center in `centers` and the distance to it. Among
/// centers at the same distance, the one with the lowest index is returned.
///
/// # Errors
///
/// * [`Error::EmptyCenterSet`] if there are no `centers`.
/// * Any error from the `metric`, e.g. [`Error::DimensionMismatch`].
///
/// # Example
///
/// ```rust
/// use bisecting_kmeans::{metric::Euclidean, search::find_closest_center};
///
/// let centers = vec![vec![0.0], vec![10.0]];
/// assert_eq!(find_closest_center(&Euclidean, &centers, &[1.0]), Ok((0, 1.0)));
/// assert_eq!(find_closest_center(&Euclidean, &centers, &[6.0]), Ok((1, 4.0)));
/// assert_eq!(find_closest_center(&Euclidean, &centers, &[5.0]), Ok((0, 5.0)));
/// ```
pub fn find_closest_center<T, M, C>(metric: &M, centers: &[C], query: &[T]) -> Result<(usize, T)>
where
    T: Number,
    M: Metric<T>,
    C: AsRef<[T]>,
{
    let closest = centers.iter().enumerate().try_fold(None, |best, (i, c)| {
        metric
            .distance(c.as_ref(), query)
            .map(|d| utils::keep_min(best, (i, d)))
    })?;
    closest.ok_or(Error::EmptyCenterSet)
}

/// Parallel version of [`find_closest_center`].
///
/// The distances to the centers are computed in parallel. The result, tie-break
/// included, is the same as for the sequential version.
///
/// # Errors
///
/// See [`find_closest_center`].
pub fn par_find_closest_center<T, M, C>(metric: &M, centers: &[C], query: &[T]) -> Result<(usize, T)>
where
    T: Number,
    M: ParMetric<T>,
    C: AsRef<[T]> + Send + Sync,
{
    let distances = centers
        .par_iter()
        .map(|c| metric.distance(c.as_ref(), query))
        .collect::<Result<Vec<_>>>()?;
    utils::arg_min(distances).ok_or(Error::EmptyCenterSet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::Euclidean;

    #[test]
    fn empty_centers() {
        let centers: Vec<Vec<f64>> = Vec::new();
        assert_eq!(find_closest_center(&Euclidean, &centers, &[1.0]), Err(Error::EmptyCenterSet));
        assert_eq!(
            par_find_closest_center(&Euclidean, &centers, &[1.0]),
            Err(Error::EmptyCenterSet)
        );
    }

    #[test]
    fn duplicate_centers() {
        let centers = vec![vec![1.0, 1.0], vec![0.0, 0.0], vec![0.0, 0.0]];
        assert_eq!(find_closest_center(&Euclidean, &centers, &[0.0, 0.0]), Ok((1, 0.0)));
        assert_eq!(par_find_closest_center(&Euclidean, &centers, &[0.0, 0.0]), Ok((1, 0.0)));
    }

    #[test]
    fn fold_matches_arg_min() {
        let centers = vec![vec![4.0], vec![-2.0], vec![2.0], vec![-2.0], vec![f64::NAN]];
        for query in [-3.0, 0.0, 1.0, 3.0, 100.0] {
            let distances = centers.iter().map(|c| (c[0] - query).abs()).collect::<Vec<_>>();
            let expected = utils::arg_min(distances).unwrap();
            assert_eq!(find_closest_center(&Euclidean, &centers, &[query]), Ok(expected));
            assert_eq!(par_find_closest_center(&Euclidean, &centers, &[query]), Ok(expected));
        }
    }

    #[test]
    fn later_center_fails_the_search() {
        let centers = vec![vec![0.0, 0.0], vec![1.0]];
        assert_eq!(
            find_closest_center(&Euclidean, &centers, &[0.0, 0.0]),
            Err(Error::DimensionMismatch { expected: 1, found: 2 })
        );
    }

    #[test]
    fn mismatch() {
        let centers = vec![vec![1.0, 1.0]];
        assert_eq!(
            find_closest_center(&Euclidean, &centers, &[0.0]),
            Err(Error::DimensionMismatch { expected: 2, found: 1 })
        );
    }
}
