//! Wrapping index arithmetic for tab bars
//!
//! Tab bars wrap at both ends, unlike grid cells which stop at the edge.

/// Index after `index` in a ring of `len` tabs, or `None` for an empty ring
pub fn wrap_next(index: usize, len: usize) -> Option<usize> {
    (len > 0).then(|| (index + 1) % len)
}

/// Index before `index` in a ring of `len` tabs, or `None` for an empty ring
///
/// An out-of-range `index` is treated as one past the end.
pub fn wrap_prev(index: usize, len: usize) -> Option<usize> {
    (len > 0).then(|| index.min(len).checked_sub(1).unwrap_or(len - 1))
}

/// Every tab index once, walking backward from `start` inclusive
pub fn ring_backward(start: usize, len: usize) -> impl Iterator<Item = usize> {
    let start = if len == 0 { 0 } else { start.min(len - 1) };
    (0..len).map(move |step| (start + len - step) % len)
}
