//! Generalized binary search over sorted slices with a key extractor.

/// Returns the index of the first element whose key is strictly greater
/// than `item`, or `slice.len()` when no such element exists.
#[must_use]
pub fn upper_bound<T, V, F>(slice: &[T], item: V, key: F) -> usize
where
    V: PartialOrd,
    F: Fn(&T) -> V,
{
    let mut lo = 0;
    let mut hi = slice.len();
    while lo < hi {
        let mid = (lo + hi) / 2;
        if item < key(&slice[mid]) {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    lo
}

/// Returns the index of the **last** element whose key is strictly less
/// than `item`, or `-1` when no element qualifies.
///
/// This is one *before* the conventional lower bound (the first element
/// whose key is greater or equal). The shadow-extension scans in
/// [`crate::partition::lines`] pair this with [`upper_bound`] to pick
/// their scan starting points and rely on this exact convention; do not
/// "fix" it to the textbook meaning.
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub fn lower_bound<T, V, F>(slice: &[T], item: V, key: F) -> isize
where
    V: PartialOrd,
    F: Fn(&T) -> V,
{
    let mut lo = 0;
    let mut hi = slice.len();
    while lo < hi {
        let mid = (lo + hi) / 2;
        if item > key(&slice[mid]) {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo as isize - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upper_bound_between_elements() {
        assert_eq!(upper_bound(&[2, 4, 6, 8], 5, |&x| x), 2);
    }

    #[test]
    fn upper_bound_on_element() {
        assert_eq!(upper_bound(&[2, 4, 6, 8], 4, |&x| x), 2);
    }

    #[test]
    fn upper_bound_past_end() {
        assert_eq!(upper_bound(&[2, 4, 6, 8], 9, |&x| x), 4);
    }

    #[test]
    fn upper_bound_before_start() {
        assert_eq!(upper_bound(&[2, 4, 6, 8], 1, |&x| x), 0);
    }

    #[test]
    fn lower_bound_between_elements() {
        assert_eq!(lower_bound(&[2, 4, 6, 8], 5, |&x| x), 1);
    }

    #[test]
    fn lower_bound_on_element() {
        assert_eq!(lower_bound(&[2, 4, 6, 8], 4, |&x| x), 0);
    }

    #[test]
    fn lower_bound_before_start() {
        assert_eq!(lower_bound(&[2, 4, 6, 8], 1, |&x| x), -1);
    }

    #[test]
    fn lower_bound_past_end() {
        assert_eq!(lower_bound(&[2, 4, 6, 8], 9, |&x| x), 3);
    }

    #[test]
    fn bounds_on_empty_slice() {
        let empty: &[i32] = &[];
        assert_eq!(upper_bound(empty, 1, |&x| x), 0);
        assert_eq!(lower_bound(empty, 1, |&x| x), -1);
    }

    #[test]
    fn bounds_with_key_extractor() {
        let pairs = [(2, "a"), (4, "b"), (6, "c")];
        assert_eq!(upper_bound(&pairs, 4, |p| p.0), 2);
        assert_eq!(lower_bound(&pairs, 4, |p| p.0), 0);
    }
}
