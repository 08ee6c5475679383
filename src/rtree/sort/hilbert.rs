use crate::r#type::IndexableNum;
use crate::rtree::sort::util::partial_sort;
use crate::rtree::sort::{Sort, SortParams};

/// Orders leaves along a Hilbert curve through their box centers.
///
/// This is the packing used by [flatbush](https://github.com/mourner/flatbush) and the default for
/// tile indexes: neighbouring tiles along a route tend to share nodes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HilbertSort;

const HILBERT_MAX: f64 = ((1u32 << 16) - 1) as f64;

impl<N: IndexableNum> Sort<N> for HilbertSort {
    fn sort(params: &SortParams<N>, boxes: &mut [N], indices: &mut [usize]) {
        let origin_x = params.bounds.min_x.as_f64();
        let origin_y = params.bounds.min_y.as_f64();
        let width = non_zero(params.bounds.width().as_f64());
        let height = non_zero(params.bounds.height().as_f64());

        // map item centers into Hilbert coordinate space and calculate Hilbert values
        let mut hilbert_values: Vec<u32> = boxes[..params.num_items * 4]
            .chunks_exact(4)
            .map(|b| {
                let center_x = (b[0].as_f64() + b[2].as_f64()) / 2.;
                let center_y = (b[1].as_f64() + b[3].as_f64()) / 2.;
                // float to int casts saturate, NaN becomes 0
                let x = (HILBERT_MAX * (center_x - origin_x) / width).floor() as u32;
                let y = (HILBERT_MAX * (center_y - origin_y) / height).floor() as u32;
                hilbert(x, y)
            })
            .collect();

        partial_sort(
            &mut hilbert_values,
            boxes,
            indices,
            0,
            params.num_items - 1,
            params.node_size,
        );
    }
}

/// All leaves sharing one coordinate would otherwise divide by zero.
#[inline]
fn non_zero(span: f64) -> f64 {
    if span > 0. {
        span
    } else {
        1.
    }
}

/// Hilbert curve index of a cell in a 2^16 x 2^16 grid.
///
/// Fast Hilbert curve algorithm by http://threadlocalmutex.com/, ported from the public domain
/// C++ code at https://github.com/rawrunprotected/hilbert_curves.
#[inline]
fn hilbert(x: u32, y: u32) -> u32 {
    let x = x & 0xFFFF;
    let y = y & 0xFFFF;

    let mut a_1 = x ^ y;
    let mut b_1 = 0xFFFF ^ a_1;
    let mut c_1 = 0xFFFF ^ (x | y);
    let mut d_1 = x & (y ^ 0xFFFF);

    let mut a_2 = a_1 | (b_1 >> 1);
    let mut b_2 = (a_1 >> 1) ^ a_1;
    let mut c_2 = ((c_1 >> 1) ^ (b_1 & (d_1 >> 1))) ^ c_1;
    let mut d_2 = ((a_1 & (c_1 >> 1)) ^ (d_1 >> 1)) ^ d_1;

    a_1 = a_2;
    b_1 = b_2;
    c_1 = c_2;
    d_1 = d_2;
    a_2 = (a_1 & (a_1 >> 2)) ^ (b_1 & (b_1 >> 2));
    b_2 = (a_1 & (b_1 >> 2)) ^ (b_1 & ((a_1 ^ b_1) >> 2));
    c_2 ^= (a_1 & (c_1 >> 2)) ^ (b_1 & (d_1 >> 2));
    d_2 ^= (b_1 & (c_1 >> 2)) ^ ((a_1 ^ b_1) & (d_1 >> 2));

    a_1 = a_2;
    b_1 = b_2;
    c_1 = c_2;
    d_1 = d_2;
    a_2 = (a_1 & (a_1 >> 4)) ^ (b_1 & (b_1 >> 4));
    b_2 = (a_1 & (b_1 >> 4)) ^ (b_1 & ((a_1 ^ b_1) >> 4));
    c_2 ^= (a_1 & (c_1 >> 4)) ^ (b_1 & (d_1 >> 4));
    d_2 ^= (b_1 & (c_1 >> 4)) ^ ((a_1 ^ b_1) & (d_1 >> 4));

    a_1 = a_2;
    b_1 = b_2;
    c_1 = c_2;
    d_1 = d_2;
    c_2 ^= (a_1 & (c_1 >> 8)) ^ (b_1 & (d_1 >> 8));
    d_2 ^= (b_1 & (c_1 >> 8)) ^ ((a_1 ^ b_1) & (d_1 >> 8));

    a_1 = c_2 ^ (c_2 >> 1);
    b_1 = d_2 ^ (d_2 >> 1);

    let i0 = interleave(x ^ y);
    let i1 = interleave(b_1 | (0xFFFF ^ ((x ^ y) | a_1)));

    (i1 << 1) | i0
}

/// Spread the low 16 bits of `v` onto the even bit positions.
#[inline]
fn interleave(mut v: u32) -> u32 {
    v = (v | (v << 8)) & 0x00FF_00FF;
    v = (v | (v << 4)) & 0x0F0F_0F0F;
    v = (v | (v << 2)) & 0x3333_3333;
    (v | (v << 1)) & 0x5555_5555
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn curve_starts_at_origin() {
        assert_eq!(hilbert(0, 0), 0);
    }

    #[test]
    fn curve_is_a_bijection_on_small_grid() {
        // the top-left 4x4 block of the grid maps onto 16 distinct curve positions
        let mut seen: Vec<u32> = (0..4)
            .flat_map(|x| (0..4).map(move |y| hilbert(x, y)))
            .collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 16);
    }

    #[test]
    fn adjacent_cells_are_close_on_curve() {
        // first four cells of the curve form the unit square at the origin
        let mut first: Vec<u32> = [(0, 0), (0, 1), (1, 0), (1, 1)]
            .iter()
            .map(|(x, y)| hilbert(*x, *y))
            .collect();
        first.sort();
        assert_eq!(first, vec![0, 1, 2, 3]);
    }
}
