use crate::error::{Result, RouteTilesError};
use crate::extent::Extent;
use crate::r#type::IndexableNum;
use crate::rtree::index::TileIndex;
use crate::rtree::sort::{Sort, SortParams};
use crate::rtree::util::compute_num_nodes;

/// The default node size used by [`TileIndexBuilder::new`]
pub const DEFAULT_NODE_SIZE: u16 = 16;

/// A builder to create a [`TileIndex`].
///
/// Boxes are stored exactly as given; buffering happens before they reach the builder (see
/// [`build_index`][crate::build_index]).
///
/// ```
/// use route_tiles::rtree::{TileIndexBuilder, HilbertSort};
/// use route_tiles::Extent;
///
/// let mut builder = TileIndexBuilder::<f64>::new();
/// builder.add("a.pcd", Extent::new(0., 0., 2., 2.));
/// builder.add("b.pcd", Extent::new(1., 1., 3., 3.));
/// builder.add("c.pcd", Extent::new(2., 2., 4., 4.));
/// let index = builder.finish::<HilbertSort>();
///
/// let mut found: Vec<&str> = index.tiles_at(1.5, 1.5).collect();
/// found.sort();
/// assert_eq!(found, vec!["a.pcd", "b.pcd"]);
/// ```
#[derive(Debug, Clone)]
pub struct TileIndexBuilder<N: IndexableNum = f64> {
    boxes: Vec<N>,
    ids: Vec<String>,
    node_size: u16,
    bounds: Extent<N>,
    num_inverted: usize,
}

impl<N: IndexableNum> TileIndexBuilder<N> {
    /// Create a new builder with the default node size.
    pub fn new() -> Self {
        Self {
            boxes: vec![],
            ids: vec![],
            node_size: DEFAULT_NODE_SIZE,
            bounds: Extent::empty(),
            num_inverted: 0,
        }
    }

    /// Create a new builder with the provided node size.
    pub fn with_node_size(node_size: u16) -> Result<Self> {
        if node_size < 2 {
            return Err(RouteTilesError::InvalidNodeSize(node_size));
        }
        Ok(Self {
            node_size,
            ..Self::new()
        })
    }

    /// Reserve space for `additional` more tiles.
    pub fn reserve(&mut self, additional: usize) {
        self.boxes.reserve(additional * 4);
        self.ids.reserve(additional);
    }

    /// Add a tile and its (already buffered) extent.
    ///
    /// Returns the insertion index. Identifiers are not deduplicated.
    pub fn add(&mut self, id: impl Into<String>, extent: Extent<N>) -> u32 {
        let index = self.ids.len();
        assert!(index < u32::MAX as usize, "Too many items for a tile index.");

        if extent.is_inverted() {
            self.num_inverted += 1;
        }

        self.boxes
            .extend([extent.min_x, extent.min_y, extent.max_x, extent.max_y]);
        self.ids.push(id.into());
        self.bounds.expand(&extent);

        index as u32
    }

    /// Number of tiles added so far.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Number of tiles added with an inverted extent. They are indexed but match no point.
    pub fn num_inverted(&self) -> usize {
        self.num_inverted
    }

    /// Consume this builder, perfoming the sort and packing the parent levels.
    ///
    /// [`HilbertSort`][crate::rtree::HilbertSort] and [`STRSort`][crate::rtree::STRSort] both
    /// implement [`Sort`].
    pub fn finish<S: Sort<N>>(self) -> TileIndex<N> {
        let Self {
            mut boxes,
            ids,
            node_size,
            bounds,
            ..
        } = self;
        let num_items = ids.len();
        let node_size = node_size as usize;

        if num_items == 0 {
            return TileIndex {
                boxes,
                indices: vec![],
                ids,
                node_size,
                level_bounds: vec![],
            };
        }

        let (num_nodes, level_bounds) = compute_num_nodes(num_items, node_size);
        let mut indices: Vec<usize> = Vec::with_capacity(num_nodes);
        indices.extend(0..num_items);

        if num_items > node_size {
            let params = SortParams {
                num_items,
                node_size,
                bounds,
            };
            S::sort(&params, &mut boxes, &mut indices);
        }

        boxes.reserve_exact((num_nodes - num_items) * 4);

        // generate nodes at each tree level, bottom-up
        let mut pos = 0;
        for &end in &level_bounds[..level_bounds.len() - 1] {
            while pos < end {
                let first_child = pos;
                let mut node = Extent::empty();
                let node_end = (pos + node_size * 4).min(end);
                while pos < node_end {
                    node.expand(&Extent::new(
                        boxes[pos],
                        boxes[pos + 1],
                        boxes[pos + 2],
                        boxes[pos + 3],
                    ));
                    pos += 4;
                }

                // parents point at the box offset of their first child
                indices.push(first_child);
                boxes.extend([node.min_x, node.min_y, node.max_x, node.max_y]);
            }
        }

        debug_assert_eq!(boxes.len(), num_nodes * 4);
        debug_assert_eq!(indices.len(), num_nodes);

        TileIndex {
            boxes,
            indices,
            ids,
            node_size,
            level_bounds,
        }
    }
}

impl<N: IndexableNum> Default for TileIndexBuilder<N> {
    fn default() -> Self {
        Self::new()
    }
}
