#[cfg(feature = "pyffi")]
use pyo3::prelude::*;

use crate::core::conversion::{oklch_to_srgb, srgb_to_linear};
use crate::core::math::bisect;
use crate::{Float, Rgb};

/// Compute the relative luminance of the sRGB color as defined by WCAG 2.
pub fn wcag_luminance(color: Rgb) -> Float {
    let [r, g, b] = color.to_array().map(srgb_to_linear);
    r.mul_add(0.2126, g.mul_add(0.7152, b * 0.0722))
}

/// Compute the WCAG 2 contrast ratio between the two colors.
///
/// The ratio ranges from 1 to 21 and is symmetric in its arguments.
///
/// ```
/// # use shadeshift::{wcag_contrast, Rgb};
/// let ratio = wcag_contrast(Rgb::new(0.0, 0.0, 0.0), Rgb::new(1.0, 1.0, 1.0));
/// assert!((ratio - 21.0).abs() < 1e-9);
/// ```
#[cfg_attr(feature = "pyffi", pyfunction)]
pub fn wcag_contrast(color1: Rgb, color2: Rgb) -> Float {
    let luminance1 = wcag_luminance(color1);
    let luminance2 = wcag_luminance(color2);
    let (lighter, darker) = if luminance1 >= luminance2 {
        (luminance1, luminance2)
    } else {
        (luminance2, luminance1)
    };

    (lighter + 0.05) / (darker + 0.05)
}

// --------------------------------------------------------------------------------------------------------------------

/// The coefficients for computing the contrast luminance for sRGB
/// coordinates.
const SRGB_CONTRAST: &[Float; 3] = &[0.2126729, 0.7151522, 0.0721750];

fn to_contrast_luminance(coordinates: &[Float; 3]) -> Float {
    fn linearize(value: Float) -> Float {
        let magnitude = value.abs();
        magnitude.powf(2.4).copysign(value)
    }

    let [c1, c2, c3] = *SRGB_CONTRAST;
    let [r, g, b] = *coordinates;

    linearize(r).mul_add(c1, linearize(g).mul_add(c2, linearize(b) * c3))
}

const BLACK_THRESHOLD: Float = 0.022;
const BLACK_EXPONENT: Float = 1.414;
const INPUT_CLAMP: Float = 0.0005;
const SCALE: Float = 1.14;
const OFFSET: Float = 0.027;
const OUTPUT_CLAMP: Float = 0.1;

/// Compute the perceptual contrast between text and background luminance,
/// as a fraction.
fn to_contrast(text_luminance: Float, background_luminance: Float) -> Float {
    // Also see https://github.com/w3c/silver/issues/645

    // Make sure the luminance values are legit
    if text_luminance.is_nan()
        || !(0.0..=1.1).contains(&text_luminance)
        || background_luminance.is_nan()
        || !(0.0..=1.1).contains(&background_luminance)
    {
        return 0.0;
    }

    // Soft clip black
    let text_luminance = if text_luminance < BLACK_THRESHOLD {
        text_luminance + (BLACK_THRESHOLD - text_luminance).powf(BLACK_EXPONENT)
    } else {
        text_luminance
    };

    let background_luminance = if background_luminance < BLACK_THRESHOLD {
        background_luminance + (BLACK_THRESHOLD - background_luminance).powf(BLACK_EXPONENT)
    } else {
        background_luminance
    };

    // Clamp small ΔY to zero
    if (text_luminance - background_luminance).abs() < INPUT_CLAMP {
        return 0.0;
    };

    // Compute Lc (lightness contrast)
    if text_luminance < background_luminance {
        // Dark on light
        let contrast = SCALE * (background_luminance.powf(0.56) - text_luminance.powf(0.57));

        if contrast < OUTPUT_CLAMP {
            0.0
        } else {
            contrast - OFFSET
        }
    } else {
        // Light on dark
        let contrast = SCALE * (background_luminance.powf(0.65) - text_luminance.powf(0.62));

        if -OUTPUT_CLAMP < contrast {
            0.0
        } else {
            contrast + OFFSET
        }
    }
}

/// Compute the APCA lightness contrast Lc between text and background.
///
/// Using the [Accessible Perceptual Contrast
/// Algorithm](https://github.com/Myndex/apca-w3), version 0.0.98G-4g, this
/// function computes the perceptual contrast between the given text and
/// background colors. The result is scaled to the customary range of roughly
/// -108 to 106. It is positive for dark text on a light background and
/// negative for light text on a dark background.
///
/// The arguments to this function are *not* interchangeable. The first
/// argument must be the foreground, i.e., text, and the second argument must
/// be the background.
///
/// ```
/// # use shadeshift::{apca_contrast, Rgb};
/// let black = Rgb::new(0.0, 0.0, 0.0);
/// let white = Rgb::new(1.0, 1.0, 1.0);
/// assert!((apca_contrast(black, white) - 106.04).abs() < 0.5);
/// assert!((apca_contrast(white, black) + 107.88).abs() < 0.5);
/// ```
#[cfg_attr(feature = "pyffi", pyfunction)]
pub fn apca_contrast(text: Rgb, background: Rgb) -> Float {
    100.0
        * to_contrast(
            to_contrast_luminance(&text.to_array()),
            to_contrast_luminance(&background.to_array()),
        )
}

// --------------------------------------------------------------------------------------------------------------------

/// The direction in which to search for a fill lightness.
#[cfg_attr(
    feature = "pyffi",
    pyclass(eq, eq_int, frozen, hash, module = "shadeshift")
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FillDirection {
    /// A fill lighter than the text, i.e., dark text on a light fill.
    Lighter,
    /// A fill darker than the text, i.e., light text on a dark fill.
    Darker,
}

/// The number of bisection steps for solving lightness.
const SOLVER_ITERATIONS: usize = 64;

/// Convert the lightness into a neutral fill.
#[inline]
fn neutral_fill(lightness: Float) -> Rgb {
    Rgb::from(oklch_to_srgb(&[lightness, 0.0, 0.0])).clamp()
}

/// Find the Oklch lightness of a neutral fill with the target contrast
/// against the text.
///
/// For [`FillDirection::Lighter`], this function returns the darkest fill
/// whose APCA contrast meets or exceeds the target. For
/// [`FillDirection::Darker`], it returns the lightest fill whose APCA
/// contrast meets or falls below the negated target. The target is a
/// magnitude and hence should be positive. If no fill can meet the target,
/// the result saturates at 1 or 0, respectively.
#[cfg_attr(feature = "pyffi", pyfunction)]
pub fn solve_lightness_for_apca(text: Rgb, target: Float, direction: FillDirection) -> Float {
    match direction {
        FillDirection::Lighter => {
            bisect(0.0, 1.0, SOLVER_ITERATIONS, |lightness| {
                apca_contrast(text, neutral_fill(lightness)) < target
            })
            .high
        }
        FillDirection::Darker => {
            bisect(0.0, 1.0, SOLVER_ITERATIONS, |lightness| {
                apca_contrast(text, neutral_fill(lightness)) <= -target
            })
            .low
        }
    }
}

/// Composite the text color with the given alpha over the background.
///
/// The blend operates on gamma-encoded components, just like browsers do by
/// default. Alpha is clamped to `0..=1`.
#[cfg_attr(feature = "pyffi", pyfunction)]
pub fn composite(text: Rgb, background: Rgb, alpha: Float) -> Rgb {
    let alpha = alpha.clamp(0.0, 1.0);
    let blend = |t: Float, b: Float| t.mul_add(alpha, b * (1.0 - alpha));
    Rgb::new(
        blend(text.r, background.r),
        blend(text.g, background.g),
        blend(text.b, background.b),
    )
}
