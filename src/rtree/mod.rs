//! A static packed RTree over buffered tile extents.
//!
//! The layout follows [flatbush](https://github.com/mourner/flatbush): all leaves are sorted
//! along a space-filling order, then grouped `node_size` at a time into parent nodes until a
//! single root remains. Queries descend from the root and skip every node whose box misses the
//! query.

mod builder;
mod index;
pub mod sort;
mod util;

pub use builder::{TileIndexBuilder, DEFAULT_NODE_SIZE};
pub use index::TileIndex;
pub use sort::{HilbertSort, STRSort, Sort};
