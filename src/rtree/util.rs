//! Utilities for generating and walking packed RTrees.

/// Calculate the total number of nodes in the tree to allocate space for and the end offset (in
/// `boxes` units, four values per node) of each tree level.
///
/// `num_items` must be non-zero.
pub(crate) fn compute_num_nodes(num_items: usize, node_size: usize) -> (usize, Vec<usize>) {
    debug_assert!(num_items > 0);
    debug_assert!(node_size >= 2);

    let mut n = num_items;
    let mut num_nodes = n;
    let mut level_bounds = vec![n * 4];
    while n != 1 {
        n = n.div_ceil(node_size);
        num_nodes += n;
        level_bounds.push(num_nodes * 4);
    }
    (num_nodes, level_bounds)
}

/// Binary search for the first level bound strictly greater than `value`.
#[inline]
pub(crate) fn upper_bound(value: usize, level_bounds: &[usize]) -> usize {
    let mut i = 0;
    let mut j = level_bounds.len() - 1;

    while i < j {
        let m = (i + j) >> 1;
        if level_bounds[m] > value {
            j = m;
        } else {
            i = m + 1;
        }
    }

    level_bounds[i]
}
