use std::fmt::Debug;

use float_next_after::NextAfter;
use num_traits::Float;

/// A trait for types that can be used for indexed coordinates.
///
/// Manifests are always parsed as `f64`. An index may store its boxes with less precision to save
/// memory, in which case every conversion rounds *outward* so a stored box is never smaller than
/// the box it was built from.
///
/// This trait is sealed and cannot be implemented for external types.
pub trait IndexableNum: private::Sealed + Float + Debug + Default + Send + Sync {
    /// Convert from `f64`, rounding toward negative infinity.
    fn from_f64_floor(value: f64) -> Self;

    /// Convert from `f64`, rounding toward positive infinity.
    fn from_f64_ceil(value: f64) -> Self;

    /// Lossless widening to `f64`.
    fn as_f64(self) -> f64;
}

impl IndexableNum for f32 {
    #[inline]
    fn from_f64_floor(value: f64) -> Self {
        let narrowed = value as f32;
        if (narrowed as f64) > value {
            narrowed.next_after(f32::NEG_INFINITY)
        } else {
            narrowed
        }
    }

    #[inline]
    fn from_f64_ceil(value: f64) -> Self {
        let narrowed = value as f32;
        if (narrowed as f64) < value {
            narrowed.next_after(f32::INFINITY)
        } else {
            narrowed
        }
    }

    #[inline]
    fn as_f64(self) -> f64 {
        self as f64
    }
}

impl IndexableNum for f64 {
    #[inline]
    fn from_f64_floor(value: f64) -> Self {
        value
    }

    #[inline]
    fn from_f64_ceil(value: f64) -> Self {
        value
    }

    #[inline]
    fn as_f64(self) -> f64 {
        self
    }
}

// https://rust-lang.github.io/api-guidelines/future-proofing.html#sealed-traits-protect-against-downstream-implementations-c-sealed
mod private {
    pub trait Sealed {}

    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

#[cfg(test)]
mod test {
    use super::IndexableNum;

    #[test]
    fn f32_rounds_outward() {
        let value = 1.3f64;
        let lower = f32::from_f64_floor(value);
        let upper = f32::from_f64_ceil(value);
        assert!((lower as f64) <= value);
        assert!((upper as f64) >= value);
        assert!(lower < upper);
    }

    #[test]
    fn exact_values_are_unchanged() {
        assert_eq!(f32::from_f64_floor(2.5), 2.5);
        assert_eq!(f32::from_f64_ceil(-4.0), -4.0);
        assert_eq!(f64::from_f64_floor(0.1), 0.1);
    }
}
