//! One full selection run for a tile category: build the index, match the route, report.

use std::fmt;
use std::path::Path;
use std::time::Instant;

use crate::build::build_index_with_config;
use crate::config::MatchConfig;
use crate::error::Result;
use crate::matcher::{match_points, MatchSet};
use crate::point::QueryPoint;
use crate::source::{read_tile_records_path, TileLayout};
use crate::tile::{SkippedRecord, TileRecord};

/// The kinds of tiles a route can need. Each category is indexed independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileCategory {
    PointCloud,
    Vector,
}

impl TileCategory {
    /// The manifest layout this category is published with.
    pub fn layout(&self) -> TileLayout {
        match self {
            TileCategory::PointCloud => TileLayout::POINT_CLOUD,
            TileCategory::Vector => TileLayout::VECTOR,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TileCategory::PointCloud => "point_cloud",
            TileCategory::Vector => "vector",
        }
    }
}

impl fmt::Display for TileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The tiles of one category selected by a route.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub category: TileCategory,
    pub tiles: MatchSet,
    /// Manifest rows dropped while loading or building.
    pub skipped: Vec<SkippedRecord>,
}

/// Build an index over `records` and match `points` against it.
///
/// An empty selection is a valid outcome: the route needs no tiles of this category.
pub fn select_tiles(
    category: TileCategory,
    records: impl IntoIterator<Item = TileRecord>,
    points: &[QueryPoint<f64>],
    config: &MatchConfig,
) -> Result<Selection> {
    let start = Instant::now();
    let built = build_index_with_config(records, config)?;
    log::info!(
        "{category}: build took {:?} ({} tiles)",
        start.elapsed(),
        built.index.len()
    );

    let start = Instant::now();
    let tiles = match_points(&built.index, points.iter().copied(), config.filter.as_deref());
    log::info!("{category}: search took {:?}", start.elapsed());
    log::info!("{category}: tile count {}", tiles.len());
    if tiles.is_empty() {
        log::info!("{category}: no tile found");
    }

    Ok(Selection {
        category,
        tiles,
        skipped: built.skipped,
    })
}

/// Read the manifest at `path` with the category's layout, then [`select_tiles`].
pub fn select_tiles_from_path(
    category: TileCategory,
    path: impl AsRef<Path>,
    points: &[QueryPoint<f64>],
    config: &MatchConfig,
) -> Result<Selection> {
    let loaded = read_tile_records_path(path, &category.layout())?;
    let mut selection = select_tiles(category, loaded.items, points, config)?;
    let mut skipped = loaded.skipped;
    skipped.append(&mut selection.skipped);
    selection.skipped = skipped;
    Ok(selection)
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use super::*;
    use crate::error::RouteTilesError;

    #[test]
    fn category_layouts() {
        assert_eq!(TileCategory::PointCloud.layout(), TileLayout::POINT_CLOUD);
        assert_eq!(TileCategory::Vector.layout(), TileLayout::VECTOR);
        assert_eq!(TileCategory::Vector.to_string(), "vector");
    }

    #[test]
    fn selects_from_manifest_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "path,minx,miny,maxx,maxy").unwrap();
        writeln!(file, "vec/a/sign.shp,0,0,10,10").unwrap();
        writeln!(file, "vec/a/pole.shp,0,0,10,10").unwrap();
        writeln!(file, "vec/b/sign.shp,500,500,510,510").unwrap();

        let config = MatchConfig::default().with_buffer(5.).with_filter("sign");
        let points = [QueryPoint::new(12., 12.), QueryPoint::new(20., 20.)];
        let selection =
            select_tiles_from_path(TileCategory::Vector, file.path(), &points, &config).unwrap();

        assert_eq!(selection.tiles.into_vec(), vec!["vec/a/sign.shp"]);
        // header row
        assert_eq!(selection.skipped.len(), 1);
        assert_eq!(selection.skipped[0].line, 1);
    }

    #[test]
    fn missing_manifest_is_fatal() {
        let err = select_tiles_from_path(
            TileCategory::PointCloud,
            "/nonexistent/map.csv",
            &[],
            &MatchConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, RouteTilesError::SourceUnavailable { .. }));
    }

    #[test]
    fn empty_route_selects_nothing() {
        let records = vec![TileRecord::new("a", "0", "0", "1", "1")];
        let selection =
            select_tiles(TileCategory::PointCloud, records, &[], &MatchConfig::default()).unwrap();
        assert!(selection.tiles.is_empty());
    }
}
