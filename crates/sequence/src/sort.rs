//! Stable merge sort driven by a strict less-than predicate.
//!
//! - `less(a, b)` must return true iff `a` sorts strictly before `b`.
//! - Elements for which neither `less(a, b)` nor `less(b, a)` holds keep their
//!   input order.
//! - A predicate that is not a strict weak ordering produces an unspecified
//!   permutation of the input. It never panics and never drops elements.

/// Ranges at or below this length are finished with insertion sort.
pub const INSERTION_THRESHOLD: usize = 24;

/// Sorts `data` in place. Returns `true` when the input was already ordered.
pub(crate) fn stable_sort<T, F>(data: &mut [T], less: &mut F) -> bool
where
    T: Clone,
    F: FnMut(&T, &T) -> bool,
{
    let len = data.len();
    if len < 2 {
        return true;
    }
    if is_ordered(data, less) {
        return true;
    }

    if len <= INSERTION_THRESHOLD {
        insertion_sort(data, less);
        return false;
    }

    // Both buffers hold the same elements on entry to every recursive call.
    let mut scratch = data.to_vec();
    merge_sort_recursive(&mut scratch, data, 0, len, less);
    false
}

pub(crate) fn is_ordered<T, F>(data: &[T], less: &mut F) -> bool
where
    F: FnMut(&T, &T) -> bool,
{
    data.windows(2).all(|pair| !less(&pair[1], &pair[0]))
}

fn insertion_sort<T, F>(data: &mut [T], less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    for i in 1..data.len() {
        let mut j = i;
        while j > 0 && less(&data[j], &data[j - 1]) {
            data.swap(j, j - 1);
            j -= 1;
        }
    }
}

/// Sorts `[left, right)` of `src` into the same range of `dst`.
fn merge_sort_recursive<T, F>(
    src: &mut [T],
    dst: &mut [T],
    left: usize,
    right: usize,
    less: &mut F,
) where
    T: Clone,
    F: FnMut(&T, &T) -> bool,
{
    let len = right - left;
    if len <= INSERTION_THRESHOLD {
        dst[left..right].clone_from_slice(&src[left..right]);
        insertion_sort(&mut dst[left..right], less);
        return;
    }

    let mid = left + (len >> 1);

    merge_sort_recursive(dst, src, left, mid, less);
    merge_sort_recursive(dst, src, mid, right, less);

    if !less(&src[mid], &src[mid - 1]) {
        dst[left..right].clone_from_slice(&src[left..right]);
        return;
    }

    merge_ranges(src, dst, left, mid, right, less);
}

fn merge_ranges<T, F>(
    src: &[T],
    dst: &mut [T],
    left: usize,
    mid: usize,
    right: usize,
    less: &mut F,
) where
    T: Clone,
    F: FnMut(&T, &T) -> bool,
{
    let mut i = left;
    let mut j = mid;
    let mut k = left;

    while i < mid && j < right {
        // Ties take from the left run.
        if less(&src[j], &src[i]) {
            dst[k] = src[j].clone();
            j += 1;
        } else {
            dst[k] = src[i].clone();
            i += 1;
        }
        k += 1;
    }

    if i < mid {
        dst[k..(k + (mid - i))].clone_from_slice(&src[i..mid]);
    } else if j < right {
        dst[k..(k + (right - j))].clone_from_slice(&src[j..right]);
    }
}
