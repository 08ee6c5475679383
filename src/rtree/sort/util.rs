use crate::r#type::IndexableNum;

/// Swap two sort values and their corresponding boxes and indices.
#[inline]
pub(super) fn swap<V: Copy, N: IndexableNum>(
    values: &mut [V],
    boxes: &mut [N],
    indices: &mut [usize],
    i: usize,
    j: usize,
) {
    values.swap(i, j);

    let k = 4 * i;
    let m = 4 * j;
    boxes.swap(k, m);
    boxes.swap(k + 1, m + 1);
    boxes.swap(k + 2, m + 2);
    boxes.swap(k + 3, m + 3);

    indices.swap(i, j);
}

/// Quicksort that stops once a partition fits inside a single node, moving boxes and indices
/// alongside their sort values.
pub(super) fn partial_sort<V: Copy + PartialOrd, N: IndexableNum>(
    values: &mut [V],
    boxes: &mut [N],
    indices: &mut [usize],
    left: usize,
    right: usize,
    node_size: usize,
) {
    debug_assert!(left <= right);

    if left / node_size >= right / node_size {
        return;
    }

    let pivot = median_of_three(values[left], values[(left + right) >> 1], values[right]);
    let mut i = left.wrapping_sub(1);
    let mut j = right.wrapping_add(1);

    loop {
        loop {
            i = i.wrapping_add(1);
            if values[i] >= pivot {
                break;
            }
        }

        loop {
            j = j.wrapping_sub(1);
            if values[j] <= pivot {
                break;
            }
        }

        if i >= j {
            break;
        }

        swap(values, boxes, indices, i, j);
    }

    partial_sort(values, boxes, indices, left, j, node_size);
    partial_sort(values, boxes, indices, j + 1, right, node_size);
}

#[inline]
fn median_of_three<V: Copy + PartialOrd>(a: V, b: V, c: V) -> V {
    if (a <= b) == (b <= c) {
        b
    } else if (b <= a) == (a <= c) {
        a
    } else {
        c
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn groups_values_per_node() {
        let mut values = vec![9u32, 3, 7, 1, 8, 2, 6, 0, 5, 4];
        let mut boxes: Vec<f64> = values
            .iter()
            .flat_map(|v| {
                let v = *v as f64;
                [v, v, v, v]
            })
            .collect();
        let mut indices: Vec<usize> = (0..values.len()).collect();
        let original = values.clone();

        let right = values.len() - 1;
        partial_sort(&mut values, &mut boxes, &mut indices, 0, right, 2);

        // each pair of slots holds the next two smallest values, in any order
        for (node, chunk) in values.chunks(2).enumerate() {
            let mut chunk = chunk.to_vec();
            chunk.sort();
            assert_eq!(chunk, vec![node as u32 * 2, node as u32 * 2 + 1]);
        }
        // boxes and indices moved together with their values
        for (slot, value) in values.iter().enumerate() {
            assert_eq!(boxes[slot * 4], *value as f64);
            assert_eq!(original[indices[slot]], *value);
        }
    }

    #[test]
    fn median_handles_ties() {
        assert_eq!(median_of_three(1, 1, 2), 1);
        assert_eq!(median_of_three(3, 1, 2), 2);
        assert_eq!(median_of_three(2, 3, 1), 2);
    }
}
