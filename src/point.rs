use geo_traits::CoordTrait;

use crate::r#type::IndexableNum;

/// A single position along a route.
///
/// Any [`CoordTrait`] implementation can be used to query an index; this is the one produced by
/// the position readers.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct QueryPoint<N: IndexableNum = f64> {
    pub x: N,
    pub y: N,
}

impl<N: IndexableNum> QueryPoint<N> {
    pub fn new(x: N, y: N) -> Self {
        Self { x, y }
    }
}

impl<N: IndexableNum> From<(N, N)> for QueryPoint<N> {
    fn from((x, y): (N, N)) -> Self {
        Self { x, y }
    }
}

impl<N: IndexableNum> From<[N; 2]> for QueryPoint<N> {
    fn from([x, y]: [N; 2]) -> Self {
        Self { x, y }
    }
}

impl<N: IndexableNum> CoordTrait for QueryPoint<N> {
    type T = N;

    fn dim(&self) -> geo_traits::Dimensions {
        geo_traits::Dimensions::Xy
    }

    fn x(&self) -> Self::T {
        self.x
    }

    fn y(&self) -> Self::T {
        self.y
    }

    fn nth_or_panic(&self, n: usize) -> Self::T {
        match n {
            0 => self.x,
            1 => self.y,
            _ => panic!("Invalid index of coord"),
        }
    }
}
