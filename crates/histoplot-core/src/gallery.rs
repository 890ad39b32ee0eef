//! Cycling through a list of images.
//!
//! The caller owns the current position; these helpers only compute what to
//! show next.

/// Pick the item at `index` and return it with the index of the item after
/// it, wrapping to the start of the list.
///
/// An out-of-range `index` wraps as well. Returns `None` for an empty list.
///
/// # Example
/// ```
/// use histoplot_core::select_next;
///
/// let names = ["a.png", "b.png"];
/// assert_eq!(select_next(&names, 1), Some((&"b.png", 0)));
/// ```
pub fn select_next<T>(items: &[T], index: usize) -> Option<(&T, usize)> {
    if items.is_empty() {
        return None;
    }
    let current = index % items.len();
    Some((&items[current], (current + 1) % items.len()))
}
