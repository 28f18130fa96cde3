#[cfg(feature = "pyffi")]
use pyo3::prelude::*;

use crate::core::conversion::oklch_to_srgb;
use crate::core::math::bisect;
use crate::{Float, Rgb};

/// The slack for gamut tests. Floating point error means that a color right
/// on the gamut boundary may come out a hair beyond it.
pub const GAMUT_EPSILON: Float = 1e-4;

/// The upper bound for chroma searches. No sRGB color has more chroma.
pub const MAX_CHROMA: Float = 0.4;

/// The number of bisection steps for chroma searches. Twelve steps over
/// `0..=0.4` resolve chroma to better than 1e-4.
const CHROMA_ITERATIONS: usize = 12;

/// The step size when scanning lightness for the gamut cusp.
const CUSP_STEP: Float = 0.01;

#[inline]
fn in_gamut_coordinates(coordinates: &[Float; 3]) -> bool {
    coordinates
        .iter()
        .all(|c| -GAMUT_EPSILON <= *c && *c <= 1.0 + GAMUT_EPSILON)
}

#[inline]
fn oklch_in_gamut(l: Float, c: Float, h: Float) -> bool {
    in_gamut_coordinates(&oklch_to_srgb(&[l, c, h]))
}

/// Determine whether the unclamped sRGB color is in gamut.
///
/// A color is in gamut if each component is within `0..=1`, give or take
/// [`GAMUT_EPSILON`].
pub fn in_gamut(color: Rgb) -> bool {
    in_gamut_coordinates(&color.to_array())
}

/// Reduce the chroma of the Oklch color until it is in gamut.
///
/// Holding lightness and hue constant, this function bisects `0..=chroma`
/// for the largest chroma that is in gamut. If the color already is in
/// gamut, this function returns the chroma unchanged. It never returns a
/// larger chroma.
///
/// ```
/// # use shadeshift::{clamp_chroma_to_gamut, in_gamut, oklch_to_rgb_raw, Oklch};
/// let c = clamp_chroma_to_gamut(0.7, 0.35, 140.0);
/// assert!(c < 0.35);
/// assert!(in_gamut(oklch_to_rgb_raw(Oklch::new(0.7, c, 140.0))));
/// ```
#[cfg_attr(feature = "pyffi", pyfunction)]
pub fn clamp_chroma_to_gamut(l: Float, c: Float, h: Float) -> Float {
    if c <= 0.0 || oklch_in_gamut(l, c, h) {
        return c.max(0.0);
    }

    bisect(0.0, c, CHROMA_ITERATIONS, |chroma| oklch_in_gamut(l, chroma, h)).low
}

/// Determine the maximum in-gamut chroma for the given lightness and hue.
#[cfg_attr(feature = "pyffi", pyfunction)]
pub fn max_chroma_at(l: Float, h: Float) -> Float {
    bisect(0.0, MAX_CHROMA, CHROMA_ITERATIONS, |chroma| {
        oklch_in_gamut(l, chroma, h)
    })
    .low
}

/// Determine the lightness of the gamut cusp for the given hue.
///
/// The cusp is the lightness with the largest available chroma. This
/// function scans lightness from 0.01 to 0.99 in steps of 0.01, so the result
/// is accurate to that step size. Ties resolve towards darker lightness.
#[cfg_attr(feature = "pyffi", pyfunction)]
pub fn cusp_lightness(h: Float) -> Float {
    let mut best_lightness = 0.5;
    let mut best_chroma = -1.0;

    for step in 1..100 {
        let l = step as Float * CUSP_STEP;
        let chroma = max_chroma_at(l, h);
        if chroma > best_chroma {
            best_lightness = l;
            best_chroma = chroma;
        }
    }

    best_lightness
}

/// Determine how much more chroma the color could carry while staying in
/// gamut. The result is never negative.
pub(crate) fn gamut_headroom(l: Float, c: Float, h: Float) -> Float {
    (max_chroma_at(l, h) - c).max(0.0)
}
