//! Utility functions for the crate.

use core::cmp::Ordering;

use distances::Number;

/// Return the index and value of the minimum value in the given values.
///
/// Ties are broken in favor of the lowest index. Incomparable values (i.e.
/// NaN) never replace a comparable minimum.
///
/// This will return `None` if there are no values.
pub fn arg_min<T: Number, V: IntoIterator<Item = T>>(values: V) -> Option<(usize, T)> {
    values.into_iter().enumerate().fold(None, keep_min)
}

/// One step of [`arg_min`]: keeps `best` unless `candidate` is strictly less.
///
/// Candidates must be offered in increasing order of index.
pub(crate) fn keep_min<T: Number>(best: Option<(usize, T)>, candidate: (usize, T)) -> Option<(usize, T)> {
    match best {
        Some((_, b)) if !is_strictly_less(candidate.1, b) => best,
        _ => Some(candidate),
    }
}

/// Whether `a` is strictly less than `b`, treating NaN as larger than any
/// other value.
fn is_strictly_less<T: Number>(a: T, b: T) -> bool {
    match a.partial_cmp(&b) {
        Some(ordering) => ordering == Ordering::Less,
        // `a` is NaN or `b` is NaN. Only a NaN `b` is worse than `a`.
        None => b.partial_cmp(&b).is_none() && a.partial_cmp(&a).is_some(),
    }
}
