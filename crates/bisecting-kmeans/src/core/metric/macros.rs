//! A macro for forwarding `Metric` through boxed trait objects.

/// Implements the body of `Metric` by dereferencing to the inner metric.
macro_rules! impl_metric_block {
    () => {
        fn distance(&self, a: &[T], b: &[T]) -> $crate::Result<T> {
            (**self).distance(a, b)
        }

        fn name(&self) -> &str {
            (**self).name()
        }

        fn has_identity(&self) -> bool {
            (**self).has_identity()
        }

        fn has_non_negativity(&self) -> bool {
            (**self).has_non_negativity()
        }

        fn has_symmetry(&self) -> bool {
            (**self).has_symmetry()
        }

        fn obeys_triangle_inequality(&self) -> bool {
            (**self).obeys_triangle_inequality()
        }

        fn is_expensive(&self) -> bool {
            (**self).is_expensive()
        }
    };
}

pub(crate) use impl_metric_block;
