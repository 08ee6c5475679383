use crate::extent::Extent;
use crate::r#type::IndexableNum;

/// Inputs shared by every [`Sort`] implementation.
pub struct SortParams<N: IndexableNum> {
    pub(crate) num_items: usize,
    pub(crate) node_size: usize,
    /// Union of all leaf boxes.
    pub(crate) bounds: Extent<N>,
}

/// A method for ordering the leaves of a packed RTree.
///
/// Implementations reorder `boxes` (four values per leaf) and `indices` (one insertion index per
/// leaf) together. Items only need to be grouped per node; the order inside a node is irrelevant.
pub trait Sort<N: IndexableNum> {
    fn sort(params: &SortParams<N>, boxes: &mut [N], indices: &mut [usize]);
}
