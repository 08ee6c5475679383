#[cfg(feature = "rayon")]
use rayon::iter::{IndexedParallelIterator, IntoParallelIterator, ParallelIterator};

use crate::r#type::IndexableNum;
use crate::rtree::sort::util::partial_sort;
use crate::rtree::sort::{Sort, SortParams};

/// Sort-tile-recursive (STR) packing.
///
/// Leaves are sorted into vertical slices by the x coordinate of their centers, then each slice is
/// sorted by y. Derived from [this
/// paper](https://ia600900.us.archive.org/27/items/nasa_techdoc_19970016975/19970016975.pdf).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct STRSort;

impl<N: IndexableNum> Sort<N> for STRSort {
    fn sort(params: &SortParams<N>, boxes: &mut [N], indices: &mut [usize]) {
        let num_items = params.num_items;
        let node_size = params.node_size;

        let mut centers = centers(&boxes[..num_items * 4], 0);
        partial_sort(&mut centers, boxes, indices, 0, num_items - 1, node_size);

        let num_leaf_nodes = num_items.div_ceil(node_size);
        let num_vertical_slices = (num_leaf_nodes as f64).sqrt().ceil() as usize;
        let items_per_slice = num_vertical_slices * node_size;

        // reuse the buffer for the y coordinate of the centers
        let mut centers = centers_into(centers, &boxes[..num_items * 4], 1);

        #[cfg(feature = "rayon")]
        {
            let center_slices: Vec<_> = centers.chunks_mut(items_per_slice).collect();
            let box_slices: Vec<_> = boxes[..num_items * 4]
                .chunks_mut(items_per_slice * 4)
                .collect();
            let index_slices: Vec<_> = indices[..num_items].chunks_mut(items_per_slice).collect();

            center_slices
                .into_par_iter()
                .zip(box_slices)
                .zip(index_slices)
                .for_each(|((center_chunk, box_chunk), index_chunk)| {
                    let right = center_chunk.len() - 1;
                    partial_sort(center_chunk, box_chunk, index_chunk, 0, right, node_size);
                });
        }

        #[cfg(not(feature = "rayon"))]
        {
            for start in (0..num_items).step_by(items_per_slice) {
                let end = (start + items_per_slice).min(num_items);
                partial_sort(&mut centers, boxes, indices, start, end - 1, node_size);
            }
        }
    }
}

/// Box centers along one axis (`0` for x, `1` for y). NaN sorts as zero.
fn centers<N: IndexableNum>(boxes: &[N], axis: usize) -> Vec<f64> {
    centers_into(Vec::with_capacity(boxes.len() / 4), boxes, axis)
}

fn centers_into<N: IndexableNum>(mut buf: Vec<f64>, boxes: &[N], axis: usize) -> Vec<f64> {
    buf.clear();
    buf.extend(boxes.chunks_exact(4).map(|b| {
        let center = (b[axis].as_f64() + b[axis + 2].as_f64()) / 2.;
        if center.is_nan() {
            0.
        } else {
            center
        }
    }));
    buf
}
