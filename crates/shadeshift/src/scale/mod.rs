//! Six-shade scale generation.
//!
//! A [`TargetCurve`] fixes each shade's lightness from the contrast it needs
//! against its text token. [`generate_scale`] then places an anchor color on
//! that curve. Building the curve is comparatively expensive, so it is an
//! explicit value to be built once and shared.

mod curve;
mod engine;

pub use curve::{
    AlphaLevel, CurvePoint, ScaleConfig, ShadeLevel, ShadeSpec, TargetCurve, TextToken,
};
pub use engine::{effective_max_chroma, generate_scale, ContrastScore, ScaleResult, Shade};
