use crate::error::{Result, RouteTilesError};
use crate::rtree::DEFAULT_NODE_SIZE;

/// Buffer applied to tile extents when none is configured, in map units.
pub const DEFAULT_BUFFER: f64 = 50.;

/// Leaf ordering used when packing an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMethod {
    #[default]
    Hilbert,
    Str,
}

/// Settings for one build-and-match run.
///
/// ```
/// use route_tiles::MatchConfig;
///
/// let config = MatchConfig::default().with_buffer(25.).with_filter("sign");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MatchConfig {
    /// Margin added to every side of each tile extent.
    pub buffer: f64,
    /// Maximum children per index node.
    pub node_size: u16,
    pub sort: SortMethod,
    /// Case-insensitive substring a tile identifier must contain to be selected.
    pub filter: Option<String>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            buffer: DEFAULT_BUFFER,
            node_size: DEFAULT_NODE_SIZE,
            sort: SortMethod::default(),
            filter: None,
        }
    }
}

impl MatchConfig {
    pub fn with_buffer(mut self, buffer: f64) -> Self {
        self.buffer = buffer;
        self
    }

    pub fn with_node_size(mut self, node_size: u16) -> Self {
        self.node_size = node_size;
        self
    }

    pub fn with_sort(mut self, sort: SortMethod) -> Self {
        self.sort = sort;
        self
    }

    /// Set the identifier filter. An empty pattern clears it.
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        let filter = filter.into();
        self.filter = (!filter.is_empty()).then_some(filter);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.buffer.is_finite() {
            return Err(RouteTilesError::InvalidBuffer(self.buffer));
        }
        if self.node_size < 2 {
            return Err(RouteTilesError::InvalidNodeSize(self.node_size));
        }
        Ok(())
    }
}
