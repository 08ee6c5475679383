//! Reading tile and position manifests from headerless CSV.
//!
//! Rows may have any number of columns. A row that is too short or holds a non-numeric value is
//! skipped with a warning rather than failing the whole load; header lines are skipped the same
//! way. Only a source that cannot be opened or read at all is an error.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::{Result, RouteTilesError};
use crate::point::QueryPoint;
use crate::tile::{parse_coordinate, SkipReason, SkippedRecord, TileRecord};

/// Column positions of the tile identifier and extent fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileLayout {
    pub id: usize,
    pub min_x: usize,
    pub min_y: usize,
    pub max_x: usize,
    pub max_y: usize,
}

impl TileLayout {
    /// `path,minx,miny,_,maxx,maxy,...`
    pub const POINT_CLOUD: TileLayout = TileLayout {
        id: 0,
        min_x: 1,
        min_y: 2,
        max_x: 4,
        max_y: 5,
    };

    /// `path,minx,miny,maxx,maxy,...`
    pub const VECTOR: TileLayout = TileLayout {
        id: 0,
        min_x: 1,
        min_y: 2,
        max_x: 3,
        max_y: 4,
    };

    /// A custom layout. Every field must come from a different column.
    pub fn try_new(
        id: usize,
        min_x: usize,
        min_y: usize,
        max_x: usize,
        max_y: usize,
    ) -> Result<Self> {
        let columns = [id, min_x, min_y, max_x, max_y];
        for (i, column) in columns.iter().enumerate() {
            if columns[i + 1..].contains(column) {
                return Err(RouteTilesError::General(format!(
                    "column {column} is mapped to more than one tile field"
                )));
            }
        }
        Ok(Self {
            id,
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }
}

/// Column positions of a route position's coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionLayout {
    pub x: usize,
    pub y: usize,
}

impl PositionLayout {
    /// `_,_,_,_,x,y,...`
    pub const DEFAULT: PositionLayout = PositionLayout { x: 4, y: 5 };
}

impl Default for PositionLayout {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Rows read from a manifest, plus those that had to be dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    pub items: Vec<T>,
    pub skipped: Vec<SkippedRecord>,
}

impl<T> Default for Loaded<T> {
    fn default() -> Self {
        Self {
            items: vec![],
            skipped: vec![],
        }
    }
}

/// Origin label for readers that have no path.
const READER: &str = "<reader>";

/// Read tile records. Coordinates are parsed later, by the index builder.
pub fn read_tile_records<R: Read>(reader: R, layout: &TileLayout) -> Result<Loaded<TileRecord>> {
    read_tiles_from(reader, layout, Path::new(READER))
}

/// Read tile records from a file.
pub fn read_tile_records_path(
    path: impl AsRef<Path>,
    layout: &TileLayout,
) -> Result<Loaded<TileRecord>> {
    let path = path.as_ref();
    let loaded = read_tiles_from(open(path)?, layout, path)?;
    log::debug!("Read {} tile records from {}", loaded.items.len(), path.display());
    Ok(loaded)
}

/// Read route positions. Rows whose coordinates are not finite numbers are skipped.
pub fn read_positions<R: Read>(
    reader: R,
    layout: &PositionLayout,
) -> Result<Loaded<QueryPoint<f64>>> {
    read_positions_from(reader, layout, Path::new(READER))
}

/// Read route positions from a file.
pub fn read_positions_path(
    path: impl AsRef<Path>,
    layout: &PositionLayout,
) -> Result<Loaded<QueryPoint<f64>>> {
    let path = path.as_ref();
    let loaded = read_positions_from(open(path)?, layout, path)?;
    log::debug!("Read {} positions from {}", loaded.items.len(), path.display());
    Ok(loaded)
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| RouteTilesError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader)
}

fn read_tiles_from<R: Read>(
    reader: R,
    layout: &TileLayout,
    origin: &Path,
) -> Result<Loaded<TileRecord>> {
    let mut loaded = Loaded::default();
    for row in rows(reader, origin) {
        match row? {
            Ok((line, row)) => {
                let field = |column: usize| row.get(column).unwrap_or_default().to_string();
                loaded.items.push(TileRecord {
                    line,
                    id: field(layout.id),
                    min_x: field(layout.min_x),
                    min_y: field(layout.min_y),
                    max_x: field(layout.max_x),
                    max_y: field(layout.max_y),
                });
            }
            Err(skip) => {
                log::warn!("Skipping tile row, {skip}");
                loaded.skipped.push(skip);
            }
        }
    }
    Ok(loaded)
}

fn read_positions_from<R: Read>(
    reader: R,
    layout: &PositionLayout,
    origin: &Path,
) -> Result<Loaded<QueryPoint<f64>>> {
    let mut loaded = Loaded::default();
    for row in rows(reader, origin) {
        let parsed = row?.and_then(|(line, row)| {
            let parse = |field: &'static str, column: usize| {
                let text = row.get(column).unwrap_or_default();
                parse_coordinate(text).map_err(|reason| SkippedRecord {
                    line,
                    id: None,
                    field,
                    value: text.to_string(),
                    reason,
                })
            };
            Ok(QueryPoint::new(parse("x", layout.x)?, parse("y", layout.y)?))
        });

        match parsed {
            Ok(point) => loaded.items.push(point),
            Err(skip) => {
                log::warn!("Skipping position, {skip}");
                loaded.skipped.push(skip);
            }
        }
    }
    Ok(loaded)
}

type Row = std::result::Result<(u64, csv::StringRecord), SkippedRecord>;

/// Iterate the rows of a headerless CSV source.
///
/// The outer `Result` is fatal (the source cannot be read); the inner one is a row that could not
/// be decoded and should be skipped.
fn rows<R: Read>(reader: R, origin: &Path) -> impl Iterator<Item = Result<Row>> {
    let origin: PathBuf = origin.to_path_buf();
    csv_reader(reader)
        .into_records()
        .map(move |result| match result {
            Ok(record) => {
                let line = record.position().map_or(0, csv::Position::line);
                Ok(Ok((line, record)))
            }
            Err(err) => skipped_row(err)
                .map(Err)
                .map_err(|source| RouteTilesError::SourceUnavailable {
                    path: origin.clone(),
                    source,
                }),
        })
}

/// Turn a csv error into a skipped row. I/O failures are handed back, they end the load.
fn skipped_row(err: csv::Error) -> std::result::Result<SkippedRecord, std::io::Error> {
    let line = err.position().map_or(0, csv::Position::line);
    let message = err.to_string();
    let (value, reason) = match err.into_kind() {
        csv::ErrorKind::Io(source) => return Err(source),
        csv::ErrorKind::Utf8 { .. } => (String::new(), SkipReason::InvalidUtf8),
        _ => (message, SkipReason::MalformedRow),
    };
    Ok(SkippedRecord {
        line,
        id: None,
        field: "row",
        value,
        reason,
    })
}
