//! A read-only value shared with every worker of a parallel job.

use std::sync::Arc;

/// A read-only value that is constructed once per parallel job and then shared
/// with every partition, instead of being rebuilt or copied for each item.
///
/// Cloning a `Broadcast` only clones a pointer to the shared value.
///
/// # Example
///
/// ```rust
/// use bisecting_kmeans::Broadcast;
///
/// let centers = Broadcast::new(vec![vec![0.0], vec![10.0]]);
/// let shared = centers.clone();
/// assert!(Broadcast::ptr_eq(&centers, &shared));
/// assert_eq!(shared.value().len(), 2);
/// ```
#[derive(Debug)]
pub struct Broadcast<V> {
    /// The shared value.
    value: Arc<V>,
}

impl<V> Clone for Broadcast<V> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
        }
    }
}

impl<V> Broadcast<V> {
    /// Shares `value` with every worker that receives a clone of this
    /// `Broadcast`.
    pub fn new(value: V) -> Self {
        Self { value: Arc::new(value) }
    }

    /// Shares a value that is already behind an `Arc`, without copying it.
    pub const fn from_arc(value: Arc<V>) -> Self {
        Self { value }
    }

    /// The shared value.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Whether two `Broadcast`s share the same value.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.value, &b.value)
    }
}

impl<V> core::ops::Deref for Broadcast<V> {
    type Target = V;

    fn deref(&self) -> &V {
        &self.value
    }
}
