//! Sorting implementations for packed RTrees.
//!
//! Leaves are ordered before the parent levels are packed, so that boxes which are close in space
//! end up in the same node.

mod hilbert;
mod str;
mod r#trait;
mod util;

pub use hilbert::HilbertSort;
pub use r#str::STRSort;
pub use r#trait::{Sort, SortParams};
