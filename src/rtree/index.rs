use tinyvec::TinyVec;

use crate::extent::Extent;
use crate::r#type::IndexableNum;
use crate::rtree::util::upper_bound;

/// A static, packed RTree over tile extents.
///
/// Usually this will be created via [`TileIndexBuilder`][crate::rtree::TileIndexBuilder] or
/// [`build_index`][crate::build_index]. Once built the index is immutable, so a shared reference
/// can be queried from many threads at once.
///
/// Nodes are laid out bottom-up: the leaf boxes first (in sorted order), then each parent level,
/// with the root box last.
#[derive(Debug, Clone, PartialEq)]
pub struct TileIndex<N: IndexableNum = f64> {
    /// Four values (`min_x, min_y, max_x, max_y`) per node.
    pub(crate) boxes: Vec<N>,
    /// For a leaf, its insertion index. For a parent, the `boxes` offset of its first child.
    pub(crate) indices: Vec<usize>,
    /// Tile identifiers by insertion index.
    pub(crate) ids: Vec<String>,
    pub(crate) node_size: usize,
    /// End offset into `boxes` of each level, leaves first.
    pub(crate) level_bounds: Vec<usize>,
}

impl<N: IndexableNum> TileIndex<N> {
    /// The number of tiles in the index.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The maximum number of children of each node.
    pub fn node_size(&self) -> usize {
        self.node_size
    }

    /// The number of tree levels, including the leaves. Zero for an empty index.
    pub fn num_levels(&self) -> usize {
        self.level_bounds.len()
    }

    /// The total number of nodes, including both leaf and parent nodes.
    pub fn num_nodes(&self) -> usize {
        self.indices.len()
    }

    /// The box of the root node, or `None` for an empty index.
    pub fn bounds(&self) -> Option<Extent<N>> {
        let root = self.boxes.len().checked_sub(4)?;
        Some(self.node_extent(root))
    }

    /// The identifier of the tile with the given insertion index.
    pub fn tile_id(&self, index: u32) -> Option<&str> {
        self.ids.get(index as usize).map(String::as_str)
    }

    /// All identifiers, in insertion order.
    pub fn tile_ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Insertion indexes of every tile whose extent intersects `query`, edges inclusive.
    ///
    /// Results are not sorted.
    pub fn search(&self, query: &Extent<N>) -> Vec<u32> {
        let mut results = vec![];
        self.visit(query, |index| results.push(index as u32));
        results
    }

    /// Identifiers of every tile whose extent contains the point, edges inclusive.
    ///
    /// An identifier inserted more than once is yielded once per entry.
    pub fn tiles_at(&self, x: N, y: N) -> impl Iterator<Item = &str> {
        self.search(&Extent::from_point(x, y))
            .into_iter()
            .map(move |index| self.ids[index as usize].as_str())
    }

    /// Call `f` with the insertion index of every tile intersecting `query`.
    ///
    /// Nodes whose box misses the query are pruned together with all their children.
    pub(crate) fn visit(&self, query: &Extent<N>, mut f: impl FnMut(usize)) {
        let Some(root) = self.boxes.len().checked_sub(4) else {
            return;
        };
        let num_leaf_values = self.ids.len() * 4;

        let mut queue: TinyVec<[usize; 32]> = TinyVec::new();
        let mut next = Some(root);

        while let Some(node_pos) = next {
            // the children of a node run until the node size or the end of their level
            let end =
                (node_pos + self.node_size * 4).min(upper_bound(node_pos, &self.level_bounds));

            for pos in (node_pos..end).step_by(4) {
                if !query.intersects(&self.node_extent(pos)) {
                    continue;
                }

                let index = self.indices[pos >> 2];
                if node_pos >= num_leaf_values {
                    queue.push(index);
                } else {
                    f(index);
                }
            }

            next = queue.pop();
        }
    }

    #[inline]
    fn node_extent(&self, pos: usize) -> Extent<N> {
        Extent::new(
            self.boxes[pos],
            self.boxes[pos + 1],
            self.boxes[pos + 2],
            self.boxes[pos + 3],
        )
    }
}
