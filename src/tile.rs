//! Tile records as read from a manifest, and the warnings produced for rows that cannot be used.

use std::fmt;

use crate::extent::Extent;

/// One row of a tile manifest: an identifier and the raw text of its four extent fields.
///
/// Coordinates are kept as text so that a malformed row can be reported with the value that was
/// actually found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileRecord {
    /// 1-based line in the source, or 0 when the record was not read from a file.
    pub line: u64,
    pub id: String,
    pub min_x: String,
    pub min_y: String,
    pub max_x: String,
    pub max_y: String,
}

impl TileRecord {
    pub fn new(
        id: impl Into<String>,
        min_x: impl Into<String>,
        min_y: impl Into<String>,
        max_x: impl Into<String>,
        max_y: impl Into<String>,
    ) -> Self {
        Self {
            line: 0,
            id: id.into(),
            min_x: min_x.into(),
            min_y: min_y.into(),
            max_x: max_x.into(),
            max_y: max_y.into(),
        }
    }

    /// A record built from numeric bounds.
    pub fn from_extent(id: impl Into<String>, extent: Extent<f64>) -> Self {
        Self::new(
            id,
            extent.min_x.to_string(),
            extent.min_y.to_string(),
            extent.max_x.to_string(),
            extent.max_y.to_string(),
        )
    }

    pub fn with_line(mut self, line: u64) -> Self {
        self.line = line;
        self
    }

    /// Parse the unbuffered extent of this tile.
    ///
    /// The extent is returned as found, even if it is inverted.
    pub fn extent(&self) -> Result<Extent<f64>, SkippedRecord> {
        let parse = |field: &'static str, text: &str| {
            parse_coordinate(text).map_err(|reason| SkippedRecord {
                line: self.line,
                id: Some(self.id.clone()),
                field,
                value: text.to_string(),
                reason,
            })
        };

        Ok(Extent::new(
            parse("min_x", &self.min_x)?,
            parse("min_y", &self.min_y)?,
            parse("max_x", &self.max_x)?,
            parse("max_y", &self.max_y)?,
        ))
    }
}

/// Why a row was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The field is absent or empty.
    Missing,
    /// The field is not a number.
    NotANumber,
    /// The field parsed to NaN or an infinity.
    NotFinite,
    /// The row is not valid UTF-8.
    InvalidUtf8,
    /// The row could not be split into fields. The value holds the CSV error.
    MalformedRow,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Missing => write!(f, "is missing"),
            SkipReason::NotANumber => write!(f, "is not a number"),
            SkipReason::NotFinite => write!(f, "is not finite"),
            SkipReason::InvalidUtf8 => write!(f, "is not valid UTF-8"),
            SkipReason::MalformedRow => write!(f, "is malformed"),
        }
    }
}

/// A warning for a row that was dropped while loading or building.
///
/// Skipped rows never abort a run; they are logged and handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// 1-based line in the source, or 0 if unknown.
    pub line: u64,
    /// Tile identifier, `None` for position rows.
    pub id: Option<String>,
    /// Name of the offending field.
    pub field: &'static str,
    /// Raw text of the offending field.
    pub value: String,
    pub reason: SkipReason,
}

impl fmt::Display for SkippedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line > 0 {
            write!(f, "line {}: ", self.line)?;
        }
        if let Some(id) = &self.id {
            write!(f, "tile {id:?}: ")?;
        }
        write!(f, "{} {:?} {}", self.field, self.value, self.reason)
    }
}

/// Parse a coordinate field, which must be a finite real number.
pub(crate) fn parse_coordinate(text: &str) -> Result<f64, SkipReason> {
    let text = text.trim();
    if text.is_empty() {
        return Err(SkipReason::Missing);
    }
    let value: f64 = text.parse().map_err(|_| SkipReason::NotANumber)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SkipReason::NotFinite)
    }
}
