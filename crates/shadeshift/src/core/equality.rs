use crate::core::FloatExt;
use crate::{Bits, Float};

/// Test macro for asserting the equality of floating point numbers.
///
/// This macro relies on [`to_eq_bits`] to normalize the two floating point
/// numbers by zeroing out not-a-numbers, reducing resolution, and dropping the
/// sign of negative zeros and then compares the resulting bit strings.
///
/// # Panics
///
/// This macro panics if the normalized bit strings are not identical. Its
/// message places the numbers below each other at the beginning of subsequent
/// lines for easy comparability.
#[macro_export]
macro_rules! assert_close_enough {
    ($f1:expr, $f2:expr $(,)?) => {
        let (f1, f2) = ($f1, $f2);
        let bits1 = $crate::to_eq_bits(f1);
        let bits2 = $crate::to_eq_bits(f2);
        assert_eq!(bits1, bits2, "quantities differ:\n{:?}\n{:?}", f1, f2);
    };
}

/// Test macro for asserting that two floating point numbers are within the
/// given tolerance of each other.
///
/// # Panics
///
/// This macro panics if the absolute difference exceeds the tolerance.
#[macro_export]
macro_rules! assert_within {
    ($f1:expr, $f2:expr, $tolerance:expr $(,)?) => {
        let (f1, f2, tolerance) = ($f1, $f2, $tolerance);
        assert!(
            (f1 - f2).abs() <= tolerance,
            "quantities differ by more than {:?}:\n{:?}\n{:?}",
            tolerance,
            f1,
            f2
        );
    };
}

/// Helper function to normalize a floating point number before hashing or
/// equality testing.
///
/// This function zeros out not-a-number, reduces significant digits after the
/// decimal, and drops the sign of negative zero and returns the result as a bit
/// string. It is only public because the [`assert_close_enough`] test macro
/// uses it.
#[doc(hidden)]
#[inline]
pub fn to_eq_bits(f: Float) -> Bits {
    // Eliminate not-a-number.
    let mut f = if f.is_nan() { 0.0 } else { f };

    // Reduce precision.
    f = (<Float as FloatExt>::ROUNDING_FACTOR * f).round();

    // Too much negativity!
    if f == -0.0 {
        f = 0.0;
    }

    f.to_bits()
}

// --------------------------------------------------------------------------------------------------------------------

/// The chroma below which a color counts as a gray.
///
/// Oklch assigns true grays a small but non-zero chroma and a more or less
/// arbitrary hue. Treating anything below this threshold as achromatic keeps
/// that phantom hue from tinting derived colors or matching hued families.
pub const ACHROMATIC_THRESHOLD: Float = 0.01;

/// Determine whether the chroma is gray-ish.
///
/// This function treats the chroma as gray-ish if it is not-a-number or
/// smaller than [`ACHROMATIC_THRESHOLD`].
#[inline]
pub(crate) fn is_achromatic_chroma(chroma: Float) -> bool {
    chroma.is_nan() || chroma.abs() < ACHROMATIC_THRESHOLD
}
