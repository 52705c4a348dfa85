//! The `Euclidean` distance metric.

use distances::number::Float;

use super::{check_dimensions, Metric};

/// The `Euclidean` (L2) distance metric.
///
/// This is the metric used by default when serving a bisecting k-means model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Euclidean;

impl<T: Float> Metric<T> for Euclidean {
    fn distance(&self, a: &[T], b: &[T]) -> crate::Result<T> {
        check_dimensions(a, b)?;
        Ok(distances::vectors::euclidean(a, b))
    }

    fn name(&self) -> &str {
        "euclidean"
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
        true
    }

    fn is_expensive(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pythagorean() {
        let d: f64 = Euclidean.distance(&[0.0, 0.0], &[3.0, 4.0]).unwrap();
        assert!((d - 5.0).abs() <= f64::EPSILON);
    }

    #[test]
    fn mismatch() {
        let err = Metric::<f32>::distance(&Euclidean, &[0.0, 0.0], &[3.0]).unwrap_err();
        assert_eq!(err, crate::Error::DimensionMismatch { expected: 2, found: 1 });
    }
}
