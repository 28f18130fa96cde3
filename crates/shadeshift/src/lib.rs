//! # Shadeshift
//!
//! Shadeshift generates perceptually uniform color scales and audits palettes
//! of hue families.
#![cfg_attr(
    not(feature = "pyffi"),
    doc = " This version of the API documentation **covers native Rust interfaces
only**. Python integration is available with the `pyffi` feature enabled."
)]
#![cfg_attr(
    feature = "pyffi",
    doc = " This version of the API documentation **covers both Rust and Python
interfaces**."
)]
//!
//!
//! ## 1. Overview
//!
//! Shadeshift's main abstractions are:
//!
//!   * [`Rgb`] and [`Oklch`] are the two **color representations**. Gamma-encoded
//!     sRGB is the exchange format, with hexadecimal strings such as `#3B82F6`
//!     as its textual form. Oklch is the perceptually uniform working space,
//!     with [`in_gamut`], [`clamp_chroma_to_gamut`], and [`max_chroma_at`]
//!     keeping colors within sRGB.
//!   * [`apca_contrast`] and [`wcag_contrast`] measure **contrast** between
//!     text and background, and [`solve_lightness_for_apca`] inverts APCA to
//!     find the gray lightness delivering a given contrast.
//!   * [`corrected_hue`] uses **CAM16** to keep a color's perceived hue
//!     stable when changing its lightness and chroma.
//!   * The [`scale`] module generates **six-shade scales**. A [`TargetCurve`]
//!     fixes each [`ShadeLevel`]'s lightness from its contrast target, and
//!     [`generate_scale`] places an anchor color on that curve.
//!   * The [`reference`] module matches colors against the hue families of
//!     **Tailwind, Radix, and Spectrum**.
//!   * The [`analysis`] module finds **gaps in a palette's hue coverage** and
//!     **audits palettes** for chroma consistency, hue spacing, and anchor
//!     lightness.
//!
//!
//! ## 2. Scales and Audits
//!
//! Build the target curve once and then generate as many scales as needed:
//!
//! ```
//! # use shadeshift::{generate_scale, HexFormatError, ShadeLevel, TargetCurve};
//! let curve = TargetCurve::default();
//! let blue = generate_scale("#3B82F6", "Blue", &curve)?;
//! assert_eq!(blue.shade(ShadeLevel::S300).hex, "#2068D9");
//! assert!((blue.shade(ShadeLevel::S300).oklch.l - curve.anchor_lightness()).abs() < 1e-9);
//! # Ok::<(), HexFormatError>(())
//! ```
//!
//! Auditing a palette works much the same:
//!
//! ```
//! # use shadeshift::{run_palette_audit, Family, HexFormatError, TargetCurve};
//! let palette = [
//!     Family::from_hex("Red", "#EF4444")?,
//!     Family::from_hex("Blue", "#3B82F6")?,
//! ];
//! let audit = run_palette_audit(&palette, &TargetCurve::default());
//! for finding in &audit.findings {
//!     assert!(!finding.message().is_empty());
//! }
//! # Ok::<(), HexFormatError>(())
//! ```
//!
//! Shadeshift does not install a logger. It logs the scale engine's and
//! analyses' decisions through the [log](https://docs.rs/log) facade at debug
//! and trace level.
//!
//!
//! ## 3. Optional Features
//!
//! Shadeshift supports three feature flags:
//!
//!   - **`f64`** selects the eponymous type as floating point type [`Float`]
//!     and `u64` as [`Bits`] instead of `f32` as [`Float`] and `u32` as
//!     [`Bits`]. This feature is enabled by default.
//!   - **`serde`** derives serde's `Serialize` for all results and also
//!     `Deserialize` for colors and configurations. This feature is disabled
//!     by default.
//!   - **`pyffi`** controls shadeshift's Python integration through
//!     [PyO3](https://pyo3.rs/). This feature is disabled by default.
//!

/// The floating point type in use.
#[cfg(feature = "f64")]
pub type Float = f64;
/// The floating point type in use.
#[cfg(not(feature = "f64"))]
pub type Float = f32;

/// [`Float`]'s bits.
#[cfg(feature = "f64")]
pub type Bits = u64;
/// [`Float`]'s bits.
#[cfg(not(feature = "f64"))]
pub type Bits = u32;

pub mod analysis;
mod core;
pub mod error;
mod object;
pub mod reference;
pub mod scale;

#[doc(hidden)]
pub use core::to_eq_bits;

pub use core::{
    apca_contrast, cam16_hue, clamp_chroma_to_gamut, clockwise_distance, composite,
    corrected_hue, corrected_hue_with, cusp_lightness, hex_to_rgb, hex_to_rgba, hue_delta,
    in_gamut, is_valid_hex, linear_to_srgb, max_chroma_at, normalize_hex, normalize_hue,
    oklch_to_rgb, oklch_to_rgb_raw, rgb_to_hex, rgb_to_oklch, rgba_to_hex, signed_hue_delta,
    solve_lightness_for_apca, srgb_to_linear, wcag_contrast, wcag_luminance, FillDirection,
    ViewingConditions, ACHROMATIC_THRESHOLD, D65_WHITE, GAMUT_EPSILON, MAX_CHROMA,
    MAX_HUE_DRIFT,
};
pub use error::{HexFormatError, ShadeLevelError};
pub use object::{Oklch, Rgb};

pub use analysis::{
    analyse_hue_gaps, compute_coverage_stats, run_palette_audit, AuditResult, Balance,
    CoverageStats, Family, Finding, GapSuggestion, HueDot, ScoreBreakdown, Severity,
};
pub use reference::{
    find_closest, find_closest_multi, find_top_matches, Confidence, Match, ReferenceEntry,
    ReferenceSystem,
};
pub use scale::{
    effective_max_chroma, generate_scale, AlphaLevel, ScaleConfig, ScaleResult, Shade,
    ShadeLevel, TargetCurve, TextToken,
};

#[cfg(feature = "pyffi")]
use pyo3::prelude::*;

/// Generate the scale for the hexadecimal color with the default target
/// curve. <i class=python-only>Python only!</i>
///
/// This function returns pairs of shade level and hexadecimal color.
#[cfg(feature = "pyffi")]
#[pyfunction]
#[pyo3(name = "generate_scale")]
fn py_generate_scale(hex: &str) -> PyResult<Vec<(u16, String)>> {
    let scale = generate_scale(hex, "", &TargetCurve::default())?;
    Ok(scale
        .shades
        .iter()
        .map(|shade| (shade.level.value(), shade.hex.clone()))
        .collect())
}

/// Find the closest reference family across all systems. <i
/// class=python-only>Python only!</i>
///
/// This function returns the system, the family name, and the hue delta.
#[cfg(feature = "pyffi")]
#[pyfunction]
#[pyo3(name = "find_closest")]
fn py_find_closest(hex: &str) -> PyResult<Option<(ReferenceSystem, &'static str, Float)>> {
    Ok(find_closest_multi(hex)?.map(|m| (m.system, m.entry.name, m.hue_delta)))
}

/// Audit the palette of name and hexadecimal color pairs with the default
/// target curve. <i class=python-only>Python only!</i>
///
/// This function returns the score and the findings' messages.
#[cfg(feature = "pyffi")]
#[pyfunction]
#[pyo3(name = "run_palette_audit")]
fn py_run_palette_audit(families: Vec<(String, String)>) -> PyResult<(Float, Vec<String>)> {
    let families = families
        .into_iter()
        .map(|(name, hex)| Family::from_hex(name, &hex))
        .collect::<Result<Vec<_>, _>>()?;
    let audit = run_palette_audit(&families, &TargetCurve::default());
    Ok((
        audit.score,
        audit.findings.iter().map(Finding::message).collect(),
    ))
}

#[doc(hidden)]
#[cfg(feature = "pyffi")]
#[pymodule]
pub fn shadeshift(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // --------------------------------------------------------------------------- color
    m.add_class::<Rgb>()?;
    m.add_class::<Oklch>()?;
    m.add_function(wrap_pyfunction!(hue_delta, m)?)?;
    m.add_function(wrap_pyfunction!(is_valid_hex, m)?)?;
    m.add_function(wrap_pyfunction!(normalize_hex, m)?)?;
    m.add_function(wrap_pyfunction!(hex_to_rgb, m)?)?;
    m.add_function(wrap_pyfunction!(rgb_to_hex, m)?)?;
    m.add_function(wrap_pyfunction!(rgb_to_oklch, m)?)?;
    m.add_function(wrap_pyfunction!(oklch_to_rgb, m)?)?;
    m.add_function(wrap_pyfunction!(oklch_to_rgb_raw, m)?)?;
    m.add_function(wrap_pyfunction!(clamp_chroma_to_gamut, m)?)?;
    m.add_function(wrap_pyfunction!(max_chroma_at, m)?)?;
    m.add_function(wrap_pyfunction!(cusp_lightness, m)?)?;

    // ------------------------------------------------------------------------ contrast
    m.add_class::<FillDirection>()?;
    m.add_function(wrap_pyfunction!(wcag_contrast, m)?)?;
    m.add_function(wrap_pyfunction!(apca_contrast, m)?)?;
    m.add_function(wrap_pyfunction!(composite, m)?)?;
    m.add_function(wrap_pyfunction!(solve_lightness_for_apca, m)?)?;
    m.add_function(wrap_pyfunction!(corrected_hue, m)?)?;

    // --------------------------------------------------------------------------- scale
    m.add_class::<ShadeLevel>()?;
    m.add_class::<TextToken>()?;
    m.add_class::<AlphaLevel>()?;
    m.add_function(wrap_pyfunction!(effective_max_chroma, m)?)?;
    m.add_function(wrap_pyfunction!(py_generate_scale, m)?)?;

    // ------------------------------------------------------------------------ analysis
    m.add_class::<ReferenceSystem>()?;
    m.add_class::<Confidence>()?;
    m.add_class::<analysis::HueZone>()?;
    m.add_class::<Balance>()?;
    m.add_class::<Severity>()?;
    m.add_function(wrap_pyfunction!(py_find_closest, m)?)?;
    m.add_function(wrap_pyfunction!(py_run_palette_audit, m)?)?;

    Ok(())
}
