//! The two color representations, gamma-encoded sRGB and Oklch.
//!
//! Both are small `Copy` values with public fields. Conversions between them
//! live in free functions, i.e., [`rgb_to_oklch`](crate::rgb_to_oklch) and
//! [`oklch_to_rgb`](crate::oklch_to_rgb).

#[cfg(feature = "pyffi")]
use pyo3::prelude::*;

use crate::core::{hex_to_rgb, normalize_hue, rgb_to_hex};
use crate::error::HexFormatError;
use crate::Float;

/// A gamma-encoded sRGB color.
///
/// Components nominally range over `0..=1`. Intermediate results of gamut
/// mapping may fall outside that range; [`Rgb::clamp`] brings them back.
#[cfg_attr(
    feature = "pyffi",
    pyclass(eq, frozen, get_all, module = "shadeshift")
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
    pub r: Float,
    pub g: Float,
    pub b: Float,
}

#[cfg_attr(feature = "pyffi", pymethods)]
impl Rgb {
    /// Instantiate a new sRGB color.
    #[cfg(feature = "pyffi")]
    #[new]
    #[inline]
    pub const fn new(r: Float, g: Float, b: Float) -> Self {
        Self { r, g, b }
    }

    /// Instantiate a new sRGB color.
    #[cfg(not(feature = "pyffi"))]
    #[inline]
    pub const fn new(r: Float, g: Float, b: Float) -> Self {
        Self { r, g, b }
    }

    /// Parse a 6-digit hexadecimal color. <i class=python-only>Python
    /// only!</i>
    #[cfg(feature = "pyffi")]
    #[staticmethod]
    pub fn from_hex(s: &str) -> Result<Self, HexFormatError> {
        hex_to_rgb(s)
    }

    /// Clamp each component to `0..=1`.
    ///
    /// ```
    /// # use shadeshift::Rgb;
    /// let color = Rgb::new(-0.2, 0.5, 1.3).clamp();
    /// assert_eq!(color, Rgb::new(0.0, 0.5, 1.0));
    /// ```
    #[must_use]
    pub fn clamp(&self) -> Self {
        Self::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
        )
    }

    /// Format this color as uppercase hexadecimal with leading `#`.
    pub fn to_hex(&self) -> String {
        rgb_to_hex(*self)
    }

    /// Get the components as an array.
    pub const fn to_array(&self) -> [Float; 3] {
        [self.r, self.g, self.b]
    }

    /// Convert this color to its debug representation. <i
    /// class=python-only>Python only!</i>
    #[cfg(feature = "pyffi")]
    pub fn __repr__(&self) -> String {
        format!("{:?}", self)
    }
}

impl From<[Float; 3]> for Rgb {
    fn from(value: [Float; 3]) -> Self {
        let [r, g, b] = value;
        Self::new(r, g, b)
    }
}

impl core::str::FromStr for Rgb {
    type Err = HexFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hex_to_rgb(s)
    }
}

impl core::fmt::Display for Rgb {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&rgb_to_hex(*self))
    }
}

// ====================================================================================================================

/// A color in Oklch, the polar form of Oklab.
///
/// Lightness ranges over `0..=1`, chroma is non-negative and, for sRGB
/// colors, at most 0.4, and hue is in degrees `0..360`.
#[cfg_attr(
    feature = "pyffi",
    pyclass(eq, frozen, get_all, module = "shadeshift")
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Oklch {
    pub l: Float,
    pub c: Float,
    pub h: Float,
}

#[cfg_attr(feature = "pyffi", pymethods)]
impl Oklch {
    /// Instantiate a new Oklch color.
    ///
    /// ```
    /// # use shadeshift::Oklch;
    /// let pink = Oklch::new(0.7, 0.22, 3.0);
    /// assert_eq!(pink.to_array(), [0.7, 0.22, 3.0]);
    /// ```
    #[cfg(feature = "pyffi")]
    #[new]
    #[inline]
    pub const fn new(l: Float, c: Float, h: Float) -> Self {
        Self { l, c, h }
    }

    /// Instantiate a new Oklch color.
    ///
    /// ```
    /// # use shadeshift::Oklch;
    /// let pink = Oklch::new(0.7, 0.22, 3.0);
    /// assert_eq!(pink.to_array(), [0.7, 0.22, 3.0]);
    /// ```
    #[cfg(not(feature = "pyffi"))]
    #[inline]
    pub const fn new(l: Float, c: Float, h: Float) -> Self {
        Self { l, c, h }
    }

    /// Create a copy of this color with the given hue, normalized to
    /// `0..360`.
    #[must_use]
    pub fn with_hue(&self, h: Float) -> Self {
        Self::new(self.l, self.c, normalize_hue(h))
    }

    /// Get the coordinates as an array.
    pub const fn to_array(&self) -> [Float; 3] {
        [self.l, self.c, self.h]
    }

    /// Convert this color to its debug representation. <i
    /// class=python-only>Python only!</i>
    #[cfg(feature = "pyffi")]
    pub fn __repr__(&self) -> String {
        format!("{:?}", self)
    }

    /// Convert this color to its CSS representation. <i
    /// class=python-only>Python only!</i>
    #[cfg(feature = "pyffi")]
    pub fn __str__(&self) -> String {
        format!("{}", self)
    }
}

impl From<[Float; 3]> for Oklch {
    fn from(value: [Float; 3]) -> Self {
        let [l, c, h] = value;
        Self::new(l, c, h)
    }
}

impl core::fmt::Display for Oklch {
    /// Format this color in CSS syntax, e.g., `oklch(0.623 0.188 259.8)`.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "oklch({:.3} {:.3} {:.1})", self.l, self.c, self.h)
    }
}
