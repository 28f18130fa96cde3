//! A minimal, forward-only CAM16 color appearance model.
//!
//! Only hue is computed. Oklch is close to perceptually uniform in hue, but
//! not close enough once lightness changes a lot: Dark blues drift towards
//! purple and light yellows towards green. Holding CAM16 hue constant instead
//! compensates for that drift.

#[cfg(feature = "pyffi")]
use pyo3::prelude::*;

use crate::core::conversion::{
    linear_srgb_to_xyz, multiply, oklch_to_linear_srgb, rgb_to_linear_rgb,
};
use crate::core::hue::{normalize_hue, signed_hue_delta};
use crate::core::math::bisect;
use crate::{Float, Oklch, Rgb};

/// The CAM16 matrix from XYZ to the cone-like RGB space.
#[rustfmt::skip]
const XYZ_TO_CAM16_RGB: [[Float; 3]; 3] = [
    [ 0.401288, 0.650173, -0.051461],
    [-0.250268, 1.204414,  0.045854],
    [-0.002079, 0.048952,  0.953127],
];

/// The D65 white point, scaled to a luminance of 100.
pub const D65_WHITE: [Float; 3] = [95.047, 100.0, 108.883];

/// The semi-saturation constant of post-adaptation compression.
const SEMI_SATURATION: Float = 27.13;

/// CAM16 viewing conditions.
///
/// Since only hue is computed, background luminance does not factor into
/// the result and hence is not represented. The defaults are D65 white, an
/// adapting luminance of 64 cd/m², and an average surround.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewingConditions {
    /// The per-channel chromatic adaptation factors.
    d_rgb: [Float; 3],
    /// The luminance-level adaptation factor F<sub>L</sub>.
    fl: Float,
}

impl ViewingConditions {
    /// Create new viewing conditions.
    ///
    /// The white point is in XYZ scaled to a luminance of 100. The adapting
    /// luminance is in cd/m². The surround factor F is 1.0 for average, 0.9
    /// for dim, and 0.8 for dark surrounds.
    pub fn new(white: [Float; 3], adapting_luminance: Float, surround_factor: Float) -> Self {
        let la = adapting_luminance;
        let degree =
            (surround_factor * (1.0 - ((-la - 42.0) / 92.0).exp() / 3.6)).clamp(0.0, 1.0);

        let five_la = 5.0 * la;
        let k = 1.0 / (five_la + 1.0);
        let k4 = k.powi(4);
        let fl = (0.2 * k4).mul_add(five_la, 0.1 * (1.0 - k4).powi(2) * five_la.cbrt());

        let white_rgb = multiply(&XYZ_TO_CAM16_RGB, &white);
        let d_rgb = white_rgb.map(|c| degree * white[1] / c + 1.0 - degree);

        Self { d_rgb, fl }
    }

    /// Get the luminance-level adaptation factor.
    pub fn luminance_adaptation(&self) -> Float {
        self.fl
    }

    /// Compress the adapted response, preserving its sign.
    #[inline]
    fn compress(&self, value: Float) -> Float {
        let x = (self.fl * value.abs() / 100.0).powf(0.42);
        (400.0 * x / (x + SEMI_SATURATION)).copysign(value)
    }

    /// Compute the CAM16 hue for linear sRGB coordinates.
    fn hue_linear(&self, linear: &[Float; 3]) -> Float {
        let xyz = linear_srgb_to_xyz(linear).map(|c| 100.0 * c);
        let [r, g, b] = multiply(&XYZ_TO_CAM16_RGB, &xyz);
        let [dr, dg, db] = self.d_rgb;

        let r = self.compress(r * dr);
        let g = self.compress(g * dg);
        let b = self.compress(b * db);

        let a = b.mul_add(1.0 / 11.0, g.mul_add(-12.0 / 11.0, r));
        let b = b.mul_add(-2.0, r + g) / 9.0;

        normalize_hue(b.atan2(a).to_degrees())
    }
}

impl Default for ViewingConditions {
    fn default() -> Self {
        Self::new(D65_WHITE, 64.0, 1.0)
    }
}

/// Compute the CAM16 hue of the sRGB color under the given viewing
/// conditions.
pub fn cam16_hue(color: Rgb, conditions: &ViewingConditions) -> Float {
    conditions.hue_linear(&rgb_to_linear_rgb(&color.to_array()))
}

// --------------------------------------------------------------------------------------------------------------------

/// Colors with less chroma have no meaningful CAM16 hue.
const MIN_CORRECTION_CHROMA: Float = 0.005;

/// The half-width of the hue window searched for a correction.
const SEARCH_WINDOW: Float = 60.0;

/// The number of bisection steps for hue searches.
const HUE_ITERATIONS: usize = 48;

/// The largest correction applied to a hue.
pub const MAX_HUE_DRIFT: Float = 15.0;

/// Correct the Oklch hue for a color with different lightness and chroma than
/// the anchor, so that both have the same CAM16 hue.
///
/// This function uses the default viewing conditions. See
/// [`corrected_hue_with`] for details.
#[cfg_attr(feature = "pyffi", pyfunction)]
pub fn corrected_hue(anchor: Oklch, target_lightness: Float, target_chroma: Float) -> Float {
    corrected_hue_with(
        anchor,
        target_lightness,
        target_chroma,
        &ViewingConditions::default(),
    )
}

/// Correct the Oklch hue for a color with different lightness and chroma than
/// the anchor, so that both have the same CAM16 hue.
///
/// This function bisects a ±60° window around the anchor's hue. If the anchor
/// or target chroma is too small for a meaningful hue, it returns the
/// anchor's hue. It also caps the correction at [`MAX_HUE_DRIFT`]. The
/// result is normalized to `0..360`.
pub fn corrected_hue_with(
    anchor: Oklch,
    target_lightness: Float,
    target_chroma: Float,
    conditions: &ViewingConditions,
) -> Float {
    if anchor.c < MIN_CORRECTION_CHROMA || target_chroma < MIN_CORRECTION_CHROMA {
        return anchor.h;
    }

    let goal = conditions.hue_linear(&oklch_to_linear_srgb(&anchor.to_array()));
    let hue = bisect(
        anchor.h - SEARCH_WINDOW,
        anchor.h + SEARCH_WINDOW,
        HUE_ITERATIONS,
        |hue| {
            let actual = conditions.hue_linear(&oklch_to_linear_srgb(&[
                target_lightness,
                target_chroma,
                hue,
            ]));
            signed_hue_delta(actual, goal) < 0.0
        },
    )
    .midpoint();

    let drift = signed_hue_delta(hue, anchor.h);
    if drift.abs() > MAX_HUE_DRIFT {
        log::trace!(
            "capping hue drift {:.2}° for anchor hue {:.2}°",
            drift,
            anchor.h
        );
        normalize_hue(anchor.h + MAX_HUE_DRIFT.copysign(drift))
    } else {
        normalize_hue(hue)
    }
}
