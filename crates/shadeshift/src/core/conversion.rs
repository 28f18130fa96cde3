#[cfg(feature = "pyffi")]
use pyo3::prelude::*;

use crate::{Float, Oklch, Rgb};

/// Multiply the 3 by 3 matrix and 3-element vector with each other, producing a
/// new 3-element vector.
#[inline]
pub(crate) fn multiply(matrix: &[[Float; 3]; 3], vector: &[Float; 3]) -> [Float; 3] {
    let [row1, row2, row3] = matrix;

    [
        row1[0].mul_add(vector[0], row1[1].mul_add(vector[1], row1[2] * vector[2])),
        row2[0].mul_add(vector[0], row2[1].mul_add(vector[1], row2[2] * vector[2])),
        row3[0].mul_add(vector[0], row3[1].mul_add(vector[1], row3[2] * vector[2])),
    ]
}

// --------------------------------------------------------------------------------------------------------------------

/// Convert a gamma-encoded sRGB component to linear light.
///
/// This function implements the piecewise sRGB transfer function with its
/// linear segment below 0.04045. Out-of-range components are handled
/// symmetrically, i.e., the sign is preserved.
///
/// ```
/// # use shadeshift::srgb_to_linear;
/// assert_eq!(srgb_to_linear(0.0), 0.0);
/// assert_eq!(srgb_to_linear(1.0), 1.0);
/// ```
#[inline]
pub fn srgb_to_linear(value: Float) -> Float {
    let magnitude = value.abs();
    if magnitude <= 0.04045 {
        value / 12.92
    } else {
        ((magnitude + 0.055) / 1.055).powf(2.4).copysign(value)
    }
}

/// Convert a linear light component to gamma-encoded sRGB. This is the exact
/// inverse of [`srgb_to_linear`], with its linear segment below 0.0031308.
#[inline]
pub fn linear_to_srgb(value: Float) -> Float {
    let magnitude = value.abs();
    if magnitude <= 0.0031308 {
        value * 12.92
    } else {
        magnitude
            .powf(1.0 / 2.4)
            .mul_add(1.055, -0.055)
            .copysign(value)
    }
}

/// Convert coordinates from gamma-corrected sRGB to linear sRGB. This is a
/// one-hop, direct conversion.
#[inline]
pub(crate) fn rgb_to_linear_rgb(value: &[Float; 3]) -> [Float; 3] {
    [
        srgb_to_linear(value[0]),
        srgb_to_linear(value[1]),
        srgb_to_linear(value[2]),
    ]
}

/// Convert coordinates from linear sRGB to gamma-corrected sRGB. This is a
/// one-hop, direct conversion.
#[inline]
pub(crate) fn linear_rgb_to_rgb(value: &[Float; 3]) -> [Float; 3] {
    [
        linear_to_srgb(value[0]),
        linear_to_srgb(value[1]),
        linear_to_srgb(value[2]),
    ]
}

// --------------------------------------------------------------------------------------------------------------------
// https://github.com/color-js/color.js/blob/a77e080a070039c534dda3965a769675aac5f75e/src/spaces/srgb-linear.js

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const LINEAR_SRGB_TO_XYZ: [[Float; 3]; 3] = [
    [ 0.41239079926595934, 0.357584339383878,   0.1804807884018343  ],
    [ 0.21263900587151027, 0.715168678767756,   0.07219231536073371 ],
    [ 0.01933081871559182, 0.11919477979462598, 0.9505321522496607  ],
];

/// Convert coordinates for linear sRGB to XYZ D65 with `Y = 1` for white.
/// This is a one-hop, direct conversion.
#[inline]
pub(crate) fn linear_srgb_to_xyz(value: &[Float; 3]) -> [Float; 3] {
    multiply(&LINEAR_SRGB_TO_XYZ, value)
}

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const XYZ_TO_LINEAR_SRGB: [[Float; 3]; 3] = [
    [  3.2409699419045226,  -1.537383177570094,   -0.4986107602930034  ],
    [ -0.9692436362808796,   1.8759675015077202,   0.04155505740717559 ],
    [  0.05563007969699366, -0.20397695888897652,  1.0569715142428786  ],
];

/// Convert coordinates for XYZ to linear sRGB. This is a one-hop, direct
/// conversion.
#[inline]
fn xyz_to_linear_srgb(value: &[Float; 3]) -> [Float; 3] {
    multiply(&XYZ_TO_LINEAR_SRGB, value)
}

// --------------------------------------------------------------------------------------------------------------------
// https://github.com/color-js/color.js/blob/a77e080a070039c534dda3965a769675aac5f75e/src/spaces/oklab.js

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const OKLAB_TO_OKLMS: [[Float; 3]; 3] = [
    [ 1.0000000000000000,  0.3963377773761749,  0.2158037573099136 ],
    [ 1.0000000000000000, -0.1055613458156586, -0.0638541728258133 ],
    [ 1.0000000000000000, -0.0894841775298119, -1.2914855480194092 ],
];

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const OKLMS_TO_XYZ: [[Float; 3]; 3] = [
    [  1.2268798758459243, -0.5578149944602171,  0.2813910456659647 ],
    [ -0.0405757452148008,  1.1122868032803170, -0.0717110580655164 ],
    [ -0.0763729366746601, -0.4214933324022432,  1.5869240198367816 ],
];

/// Convert coordinates for Oklab to XYZ. This is a one-hop, direct conversion,
/// even though it requires two matrix multiplications and a coordinate-wise
/// exponential.
fn oklab_to_xyz(value: &[Float; 3]) -> [Float; 3] {
    let [l, m, s] = multiply(&OKLAB_TO_OKLMS, value);
    multiply(&OKLMS_TO_XYZ, &[l.powi(3), m.powi(3), s.powi(3)])
}

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const XYZ_TO_OKLMS: [[Float; 3]; 3] = [
    [ 0.8190224379967030, 0.3619062600528904, -0.1288737815209879 ],
    [ 0.0329836539323885, 0.9292868615863434,  0.0361446663506424 ],
    [ 0.0481771893596242, 0.2642395317527308,  0.6335478284694309 ],
];

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const OKLMS_TO_OKLAB: [[Float; 3]; 3] = [
    [ 0.2104542683093140,  0.7936177747023054, -0.0040720430116193 ],
    [ 1.9779985324311684, -2.4285922420485799,  0.4505937096174110 ],
    [ 0.0259040424655478,  0.7827717124575296, -0.8086757549230774 ],
];

/// Convert coordinates for XYZ to Oklab. This is a one-hop, direct conversion,
/// even though it requires two matrix multiplications and a coordinate-wise
/// exponential.
fn xyz_to_oklab(value: &[Float; 3]) -> [Float; 3] {
    let [l, m, s] = multiply(&XYZ_TO_OKLMS, value);
    multiply(&OKLMS_TO_OKLAB, &[l.cbrt(), m.cbrt(), s.cbrt()])
}

// --------------------------------------------------------------------------------------------------------------------

/// Convert coordinates for Oklch to Oklab. This is a one-hop, direct
/// conversion.
#[allow(non_snake_case)]
fn oklch_to_oklab(value: &[Float; 3]) -> [Float; 3] {
    let [L, C, h] = *value;
    let (sin, cos) = h.to_radians().sin_cos();
    [L, C * cos, C * sin]
}

const EPSILON: Float = 0.0002;

/// Convert coordinates for Oklab to Oklch. This is a one-hop, direct
/// conversion. Unlike CSS, which makes the hue of grays powerless, this
/// function normalizes the hue of grays to zero, so that hues always are
/// numbers in `0..360`.
#[allow(non_snake_case)]
fn oklab_to_oklch(value: &[Float; 3]) -> [Float; 3] {
    let [L, a, b] = *value;

    let a_m = a.abs();
    if a_m < EPSILON && b.abs() < EPSILON {
        return [L, 0.0, 0.0];
    }

    // per herbie 2.1
    let C = if a_m < b { b.hypot(a_m) } else { a_m.hypot(b) };

    let h = b.atan2(a).to_degrees();
    let h = if h.is_sign_negative() { h + 360.0 } else { h };

    [L, C, if h >= 360.0 { 0.0 } else { h }]
}

// --------------------------------------------------------------------------------------------------------------------

/// Convert coordinates for sRGB to Oklch. This is a four-hop conversion.
#[inline]
pub(crate) fn srgb_to_oklch(value: &[Float; 3]) -> [Float; 3] {
    let linear = rgb_to_linear_rgb(value);
    let xyz = linear_srgb_to_xyz(&linear);
    oklab_to_oklch(&xyz_to_oklab(&xyz))
}

/// Convert coordinates for Oklch to linear sRGB without gamut mapping. This is
/// a three-hop conversion.
#[inline]
pub(crate) fn oklch_to_linear_srgb(value: &[Float; 3]) -> [Float; 3] {
    let xyz = oklab_to_xyz(&oklch_to_oklab(value));
    xyz_to_linear_srgb(&xyz)
}

/// Convert coordinates for Oklch to sRGB without gamut mapping. This is a
/// four-hop conversion.
#[inline]
pub(crate) fn oklch_to_srgb(value: &[Float; 3]) -> [Float; 3] {
    linear_rgb_to_rgb(&oklch_to_linear_srgb(value))
}

// --------------------------------------------------------------------------------------------------------------------

/// Convert the sRGB color to Oklch.
///
/// ```
/// # use shadeshift::{rgb_to_oklch, Rgb};
/// let blue = rgb_to_oklch(Rgb::new(0.0, 0.0, 1.0));
/// assert!((blue.l - 0.452).abs() < 1e-3);
/// assert!((blue.h - 264.05).abs() < 1e-2);
/// ```
#[cfg_attr(feature = "pyffi", pyfunction)]
pub fn rgb_to_oklch(color: Rgb) -> Oklch {
    Oklch::from(srgb_to_oklch(&color.to_array()))
}

/// Convert the Oklch color to sRGB, clamping each component to `0..=1`.
///
/// Clamping is the crudest form of gamut mapping and changes hue as well as
/// lightness for colors far outside the gamut. Hence, callers that care
/// should reduce chroma with
/// [`clamp_chroma_to_gamut`](crate::clamp_chroma_to_gamut) first.
#[cfg_attr(feature = "pyffi", pyfunction)]
pub fn oklch_to_rgb(color: Oklch) -> Rgb {
    oklch_to_rgb_raw(color).clamp()
}

/// Convert the Oklch color to sRGB without clamping. Components of
/// out-of-gamut colors fall outside `0..=1`, which makes this function the
/// basis for gamut testing.
#[cfg_attr(feature = "pyffi", pyfunction)]
pub fn oklch_to_rgb_raw(color: Oklch) -> Rgb {
    Rgb::from(oklch_to_srgb(&color.to_array()))
}
