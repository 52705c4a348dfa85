//! The `Metric` trait is used for all distance computations between centers
//! and query points.

use distances::Number;

use super::{Error, Result};

mod euclidean;
mod macros;
mod squared_euclidean;

pub use euclidean::Euclidean;
pub use squared_euclidean::SquaredEuclidean;

/// The `Metric` trait is used for all distance computations between centers
/// and query points.
///
/// Distances are only defined between vectors of the same dimensionality.
/// Implementors must return [`Error::DimensionMismatch`] when asked to compare
/// vectors of different lengths; [`check_dimensions`] does this check.
///
/// # Type Parameters
///
/// - `T`: The type of the elements of the vectors and of the distance values.
///
/// # Example
///
/// The following is an example of a `Metric` implementation for the Chebyshev
/// distance, i.e. the largest absolute difference along any axis.
///
/// ```rust
/// use bisecting_kmeans::metric::{check_dimensions, Metric, ParMetric};
///
/// struct Chebyshev;
///
/// impl Metric<f64> for Chebyshev {
///     fn distance(&self, a: &[f64], b: &[f64]) -> bisecting_kmeans::Result<f64> {
///         check_dimensions(a, b)?;
///         Ok(a.iter().zip(b).map(|(x, y)| (x - y).abs()).fold(0.0, f64::max))
///     }
///
///     fn name(&self) -> &str {
///         "chebyshev"
///     }
///
///     fn has_identity(&self) -> bool {
///         true
///     }
///
///     fn has_non_negativity(&self) -> bool {
///         true
///     }
///
///     fn has_symmetry(&self) -> bool {
///         true
///     }
///
///     fn obeys_triangle_inequality(&self) -> bool {
///         true
///     }
///
///     fn is_expensive(&self) -> bool {
///         false
///     }
/// }
///
/// let metric = Chebyshev;
/// assert_eq!(metric.distance(&[0.0, 1.0], &[3.0, -1.0]), Ok(3.0));
/// assert!(metric.distance(&[0.0], &[3.0, -1.0]).is_err());
/// ```
pub trait Metric<T: Number> {
    /// Call the metric on two vectors.
    ///
    /// # Errors
    ///
    /// * [`Error::DimensionMismatch`] if `a` and `b` have different lengths.
    fn distance(&self, a: &[T], b: &[T]) -> Result<T>;

    /// The name of the metric.
    fn name(&self) -> &str;

    /// Whether the metric provides an identity among the vectors.
    ///
    /// Identity is defined as `d(a, b) = 0` if and only if `a = b`.
    ///
    /// A query equal to a center is then always assigned to that center, or
    /// to the lowest-indexed center equal to it.
    fn has_identity(&self) -> bool;

    /// Whether the metric only produces non-negative values.
    fn has_non_negativity(&self) -> bool;

    /// Whether the metric is symmetric.
    ///
    /// Symmetry is defined as `d(a, b) = d(b, a)` for all vectors `a` and `b`.
    fn has_symmetry(&self) -> bool;

    /// Whether the metric satisfies the triangle inequality.
    ///
    /// The triangle inequality is defined as `d(a, b) + d(b, c) >= d(a, c)` for
    /// all vectors `a`, `b`, and `c`.
    fn obeys_triangle_inequality(&self) -> bool;

    /// Whether the metric is expensive to compute.
    ///
    /// We say that a metric is expensive if it costs more than linear time in
    /// the dimensionality of the vectors.
    fn is_expensive(&self) -> bool;
}

/// A [`Metric`] that may be shared across the threads of a parallel job.
///
/// This is implemented for every `Metric` that is `Send + Sync`.
#[allow(clippy::module_name_repetitions)]
pub trait ParMetric<T: Number>: Metric<T> + Send + Sync {}

impl<T: Number, M: Metric<T> + Send + Sync> ParMetric<T> for M {}

/// Checks that two vectors have the same dimensionality.
///
/// # Errors
///
/// * [`Error::DimensionMismatch`] if `a` and `b` have different lengths.
pub fn check_dimensions<T>(a: &[T], b: &[T]) -> Result<()> {
    if a.len() == b.len() {
        Ok(())
    } else {
        Err(Error::DimensionMismatch {
            expected: a.len(),
            found: b.len(),
        })
    }
}

impl<T: Number> Metric<T> for Box<dyn Metric<T>> {
    macros::impl_metric_block!();
}

impl<T: Number> Metric<T> for Box<dyn Metric<T> + Send + Sync> {
    macros::impl_metric_block!();
}
