//! Building a tile index from manifest records.

use crate::config::{MatchConfig, SortMethod};
use crate::error::{Result, RouteTilesError};
use crate::r#type::IndexableNum;
use crate::rtree::{HilbertSort, STRSort, Sort, TileIndex, TileIndexBuilder, DEFAULT_NODE_SIZE};
use crate::tile::{SkippedRecord, TileRecord};

/// The result of a build: the index plus every record that could not be parsed.
#[derive(Debug, Clone)]
pub struct BuildOutput<N: IndexableNum = f64> {
    pub index: TileIndex<N>,
    pub skipped: Vec<SkippedRecord>,
    /// Number of indexed tiles whose buffered extent is inverted and can never match.
    pub inverted: usize,
}

/// Buffer each record's extent and pack the results into a [`TileIndex`].
///
/// Records whose coordinates do not parse as finite numbers are skipped and returned in
/// [`BuildOutput::skipped`]; they never fail the build. Only a non-finite `buffer` is an error.
///
/// ```
/// use route_tiles::{build_index, TileRecord};
///
/// let records = vec![
///     TileRecord::new("a.pcd", "0", "0", "10", "10"),
///     TileRecord::new("b.pcd", "x", "0", "10", "10"),
/// ];
/// let output = build_index(records, 5.).unwrap();
/// assert_eq!(output.index.len(), 1);
/// assert_eq!(output.skipped.len(), 1);
/// ```
pub fn build_index(
    records: impl IntoIterator<Item = TileRecord>,
    buffer: f64,
) -> Result<BuildOutput<f64>> {
    build_index_with::<f64, HilbertSort>(records, buffer, DEFAULT_NODE_SIZE)
}

/// Like [`build_index`], using the buffer, node size and sort method of `config`.
pub fn build_index_with_config(
    records: impl IntoIterator<Item = TileRecord>,
    config: &MatchConfig,
) -> Result<BuildOutput<f64>> {
    config.validate()?;
    match config.sort {
        SortMethod::Hilbert => {
            build_index_with::<f64, HilbertSort>(records, config.buffer, config.node_size)
        }
        SortMethod::Str => {
            build_index_with::<f64, STRSort>(records, config.buffer, config.node_size)
        }
    }
}

/// Build an index with an explicit coordinate type, sort method and node size.
///
/// The buffer is applied in `f64` before the extent is narrowed to `N`, and narrowing rounds
/// outward.
pub fn build_index_with<N: IndexableNum, S: Sort<N>>(
    records: impl IntoIterator<Item = TileRecord>,
    buffer: f64,
    node_size: u16,
) -> Result<BuildOutput<N>> {
    if !buffer.is_finite() {
        return Err(RouteTilesError::InvalidBuffer(buffer));
    }

    let records = records.into_iter();
    let mut builder = TileIndexBuilder::<N>::with_node_size(node_size)?;
    builder.reserve(records.size_hint().0);
    let mut skipped = vec![];

    for record in records {
        let extent = match record.extent() {
            Ok(extent) => extent.buffered(buffer),
            Err(skip) => {
                log::warn!("Skipping tile record, {skip}");
                skipped.push(skip);
                continue;
            }
        };

        if extent.is_inverted() {
            log::debug!(
                "Tile {:?} has an inverted extent after buffering and will match nothing",
                record.id
            );
        }
        builder.add(record.id, extent.to_indexable());
    }

    let inverted = builder.num_inverted();
    let index = builder.finish::<S>();
    log::debug!(
        "Built tile index with {} tiles in {} levels ({} skipped)",
        index.len(),
        index.num_levels(),
        skipped.len()
    );

    Ok(BuildOutput {
        index,
        skipped,
        inverted,
    })
}
