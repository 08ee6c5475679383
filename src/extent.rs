use crate::r#type::IndexableNum;

/// An axis-aligned bounding box.
///
/// No ordering is enforced between the minimum and maximum coordinates. An extent where a minimum
/// exceeds its maximum is *inverted*: it is stored and indexed as-is, and contains no point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent<N: IndexableNum = f64> {
    pub min_x: N,
    pub min_y: N,
    pub max_x: N,
    pub max_y: N,
}

impl<N: IndexableNum> Extent<N> {
    pub fn new(min_x: N, min_y: N, max_x: N, max_y: N) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// A zero-area extent covering exactly one point.
    pub fn from_point(x: N, y: N) -> Self {
        Self::new(x, y, x, y)
    }

    /// An extent that every [`expand`][Self::expand] call will overwrite.
    pub(crate) fn empty() -> Self {
        Self::new(
            N::infinity(),
            N::infinity(),
            N::neg_infinity(),
            N::neg_infinity(),
        )
    }

    /// Grow this extent by `buffer` on every side.
    ///
    /// A negative buffer shrinks the extent and may invert it.
    pub fn buffered(&self, buffer: N) -> Self {
        Self::new(
            self.min_x - buffer,
            self.min_y - buffer,
            self.max_x + buffer,
            self.max_y + buffer,
        )
    }

    /// `true` when a minimum coordinate exceeds its maximum on either axis.
    pub fn is_inverted(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Inclusive containment test. Points on an edge or corner are contained.
    #[inline]
    pub fn contains(&self, x: N, y: N) -> bool {
        self.min_x <= x && x <= self.max_x && self.min_y <= y && y <= self.max_y
    }

    /// Inclusive intersection test against another extent.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        !(other.max_x < self.min_x
            || other.max_y < self.min_y
            || other.min_x > self.max_x
            || other.min_y > self.max_y)
    }

    /// Component-wise union, used for parent node boxes.
    #[inline]
    pub(crate) fn expand(&mut self, other: &Self) {
        if other.min_x < self.min_x {
            self.min_x = other.min_x;
        }
        if other.min_y < self.min_y {
            self.min_y = other.min_y;
        }
        if other.max_x > self.max_x {
            self.max_x = other.max_x;
        }
        if other.max_y > self.max_y {
            self.max_y = other.max_y;
        }
    }

    pub fn width(&self) -> N {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> N {
        self.max_y - self.min_y
    }
}

impl Extent<f64> {
    /// Narrow to the index coordinate type, rounding each side outward.
    pub fn to_indexable<N: IndexableNum>(&self) -> Extent<N> {
        Extent::new(
            N::from_f64_floor(self.min_x),
            N::from_f64_floor(self.min_y),
            N::from_f64_ceil(self.max_x),
            N::from_f64_ceil(self.max_y),
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn buffer_grows_every_side() {
        let extent = Extent::new(0., 0., 10., 10.).buffered(5.);
        assert_eq!(extent, Extent::new(-5., -5., 15., 15.));
        assert!(extent.contains(-5., -5.));
        assert!(extent.contains(15., 15.));
        assert!(!extent.contains(-5.000001, 0.));
    }

    #[test]
    fn negative_buffer_can_invert() {
        let extent = Extent::new(0., 0., 4., 4.).buffered(-3.);
        assert!(extent.is_inverted());
        assert!(!extent.contains(2., 2.));
    }

    #[test]
    fn inverted_input_contains_nothing() {
        let extent = Extent::new(10., 0., 0., 10.);
        assert!(extent.is_inverted());
        for x in [0., 5., 10.] {
            assert!(!extent.contains(x, 5.));
        }
    }

    #[test]
    fn f32_conversion_never_shrinks() {
        let extent = Extent::new(0.1, 0.2, 1000.3, 1000.7);
        let narrowed = extent.to_indexable::<f32>();
        assert!(narrowed.min_x as f64 <= extent.min_x);
        assert!(narrowed.min_y as f64 <= extent.min_y);
        assert!(narrowed.max_x as f64 >= extent.max_x);
        assert!(narrowed.max_y as f64 >= extent.max_y);
    }

    #[test]
    fn expand_unions_boxes() {
        let mut acc = Extent::<f64>::empty();
        acc.expand(&Extent::new(0., 1., 2., 3.));
        acc.expand(&Extent::new(-1., 2., 1., 5.));
        assert_eq!(acc, Extent::new(-1., 1., 2., 5.));
    }
}
