#![doc = include_str!("../README.md")]

mod build;
mod config;
mod error;
mod extent;
mod matcher;
mod point;
pub mod rtree;
mod select;
pub mod source;
mod tile;
mod r#type;

pub use build::{build_index, build_index_with, build_index_with_config, BuildOutput};
pub use config::{MatchConfig, SortMethod, DEFAULT_BUFFER};
pub use error::{Result, RouteTilesError};
pub use extent::Extent;
#[cfg(feature = "rayon")]
pub use matcher::par_match_points;
pub use matcher::{match_points, MatchSet, TileFilter};
pub use point::QueryPoint;
pub use r#type::IndexableNum;
pub use select::{select_tiles, select_tiles_from_path, Selection, TileCategory};
pub use tile::{SkipReason, SkippedRecord, TileRecord};

#[cfg(test)]
pub(crate) mod test;
