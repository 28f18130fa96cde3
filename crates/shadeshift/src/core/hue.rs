//! Arithmetic on the hue circle.
//!
//! Hues are angles in degrees. Since the same hue has infinitely many
//! representations modulo 360, every operation here normalizes first and
//! never compares raw angles.

#[cfg(feature = "pyffi")]
use pyo3::prelude::*;

use crate::Float;

/// Normalize the hue to `0..360`.
#[inline]
pub fn normalize_hue(hue: Float) -> Float {
    let hue = hue.rem_euclid(360.0);
    // rem_euclid may round up to the modulus for tiny negative inputs
    if hue >= 360.0 {
        0.0
    } else {
        hue
    }
}

/// Compute the signed difference `to - from` between two hues.
///
/// The result lies in `(-180, 180]`, i.e., it is the shorter way around the
/// hue circle, with positive values meaning counter-clockwise (increasing
/// hue) and exactly opposite hues resolving to `+180`.
#[inline]
pub fn signed_hue_delta(to: Float, from: Float) -> Float {
    let delta = (to - from).rem_euclid(360.0);
    if delta > 180.0 {
        delta - 360.0
    } else {
        delta
    }
}

/// Compute the unsigned distance between two hues.
///
/// The result is symmetric and lies in `0..=180`.
///
/// ```
/// # use shadeshift::hue_delta;
/// assert_eq!(hue_delta(10.0, 350.0), 20.0);
/// assert_eq!(hue_delta(350.0, 10.0), 20.0);
/// ```
#[cfg_attr(feature = "pyffi", pyfunction)]
#[inline]
pub fn hue_delta(hue1: Float, hue2: Float) -> Float {
    signed_hue_delta(hue1, hue2).abs()
}

/// Compute the distance when travelling from one hue to another in
/// increasing direction. The result lies in `0..360`.
#[inline]
pub fn clockwise_distance(from: Float, to: Float) -> Float {
    normalize_hue(to - from)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::assert_close_enough;

    #[test]
    fn test_hue_delta() {
        assert_eq!(hue_delta(10.0, 350.0), 20.0, "wraparound distance");
        assert_eq!(hue_delta(0.0, 180.0), 180.0, "opposite hues");
        assert_eq!(hue_delta(180.0, 0.0), 180.0, "opposite hues, swapped");
        assert_eq!(hue_delta(720.0, 0.0), 0.0, "full rotations");

        for (a, b) in [(0.0, 90.0), (45.0, 300.0), (359.0, 1.0), (123.4, 321.0)] {
            let d1 = hue_delta(a, b);
            let d2 = hue_delta(b, a);
            assert_close_enough!(d1, d2);
            assert!((0.0..=180.0).contains(&d1), "delta {} out of range", d1);
        }
    }

    #[test]
    fn test_signed_hue_delta() {
        assert_eq!(signed_hue_delta(10.0, 350.0), 20.0, "forward across zero");
        assert_eq!(signed_hue_delta(350.0, 10.0), -20.0, "backward across zero");
        assert_eq!(signed_hue_delta(180.0, 0.0), 180.0, "half turn is positive");
        assert_eq!(signed_hue_delta(0.0, 180.0), 180.0, "half turn is positive");
    }

    #[test]
    fn test_clockwise_distance() {
        assert_eq!(clockwise_distance(350.0, 10.0), 20.0, "across zero");
        assert_eq!(clockwise_distance(10.0, 350.0), 340.0, "the long way");
        assert_eq!(clockwise_distance(42.0, 42.0), 0.0, "same hue");
        assert_eq!(normalize_hue(-30.0), 330.0, "negative hue");
        assert_eq!(normalize_hue(360.0), 0.0, "full turn");
    }
}
