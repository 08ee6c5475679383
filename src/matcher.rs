//! Matching route positions against a tile index.

use std::collections::btree_set;
use std::collections::BTreeSet;

use geo_traits::CoordTrait;

use crate::extent::Extent;
use crate::r#type::IndexableNum;
use crate::rtree::TileIndex;

/// The deduplicated set of tile identifiers selected by a route.
///
/// Iteration is in lexicographic order so that output built from a match set is reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    ids: BTreeSet<String>,
}

impl MatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an identifier. Returns `false` if it was already present.
    pub fn insert(&mut self, id: &str) -> bool {
        if self.ids.contains(id) {
            return false;
        }
        self.ids.insert(id.to_string())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Move every identifier of `other` into this set.
    pub fn merge(&mut self, mut other: MatchSet) {
        if other.ids.len() > self.ids.len() {
            std::mem::swap(&mut self.ids, &mut other.ids);
        }
        self.ids.append(&mut other.ids);
    }

    /// The identifiers in lexicographic order.
    pub fn into_vec(self) -> Vec<String> {
        self.ids.into_iter().collect()
    }
}

impl IntoIterator for MatchSet {
    type Item = String;
    type IntoIter = btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.into_iter()
    }
}

impl<'a> IntoIterator for &'a MatchSet {
    type Item = &'a String;
    type IntoIter = btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}

impl FromIterator<String> for MatchSet {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

impl Extend<String> for MatchSet {
    fn extend<T: IntoIterator<Item = String>>(&mut self, iter: T) {
        self.ids.extend(iter)
    }
}

/// Case-insensitive substring predicate on tile identifiers.
///
/// An empty pattern accepts every identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileFilter {
    needle: String,
}

impl TileFilter {
    pub fn new(pattern: &str) -> Self {
        Self {
            needle: pattern.to_lowercase(),
        }
    }

    pub fn matches(&self, id: &str) -> bool {
        self.needle.is_empty() || id.to_lowercase().contains(&self.needle)
    }
}

/// Collect every tile whose buffered extent contains at least one of `points`.
///
/// Each point is an inclusive zero-area query against the whole index. When `filter` is given, a
/// tile is only selected if its identifier contains the filter, ignoring case.
///
/// ```
/// use route_tiles::{build_index, match_points, QueryPoint, TileRecord};
///
/// let records = vec![
///     TileRecord::new("area_01/sign.shp", "0", "0", "10", "10"),
///     TileRecord::new("area_01/pole.shp", "0", "0", "10", "10"),
/// ];
/// let index = build_index(records, 5.).unwrap().index;
/// let matched = match_points(&index, [QueryPoint::new(12., 12.)], Some("SIGN"));
/// assert_eq!(matched.into_vec(), vec!["area_01/sign.shp"]);
/// ```
pub fn match_points<N, P>(
    index: &TileIndex<N>,
    points: impl IntoIterator<Item = P>,
    filter: Option<&str>,
) -> MatchSet
where
    N: IndexableNum,
    P: CoordTrait<T = N>,
{
    let filter = filter.map(TileFilter::new);
    let mut matched = MatchSet::new();
    for point in points {
        match_point_into(index, &point, filter.as_ref(), &mut matched);
    }
    matched
}

/// Parallel version of [`match_points`].
///
/// Each rayon worker fills its own [`MatchSet`]; the partial sets are merged once all points are
/// queried. The result is identical to [`match_points`].
#[cfg(feature = "rayon")]
pub fn par_match_points<N, P>(index: &TileIndex<N>, points: &[P], filter: Option<&str>) -> MatchSet
where
    N: IndexableNum,
    P: CoordTrait<T = N> + Sync,
{
    use rayon::prelude::*;

    let filter = filter.map(TileFilter::new);
    points
        .par_iter()
        .fold(MatchSet::new, |mut matched, point| {
            match_point_into(index, point, filter.as_ref(), &mut matched);
            matched
        })
        .reduce(MatchSet::new, |mut left, right| {
            left.merge(right);
            left
        })
}

#[inline]
fn match_point_into<N: IndexableNum>(
    index: &TileIndex<N>,
    point: &impl CoordTrait<T = N>,
    filter: Option<&TileFilter>,
    matched: &mut MatchSet,
) {
    let query = Extent::from_point(point.x(), point.y());
    index.visit(&query, |item| {
        let id = index.ids[item].as_str();
        if matched.contains(id) {
            return;
        }
        if filter.map_or(true, |filter| filter.matches(id)) {
            matched.insert(id);
        }
    });
}
