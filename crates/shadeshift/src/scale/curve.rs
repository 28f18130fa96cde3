#[cfg(feature = "pyffi")]
use pyo3::prelude::*;

use crate::core::solve_lightness_for_apca;
use crate::error::ShadeLevelError;
use crate::{FillDirection, Float, Rgb};

/// A shade level, from lightest to darkest.
///
/// Shade 300 is the anchor. It carries the chroma of the color the scale is
/// generated from. Shades 50 through 200 are fills for dark text in light
/// mode, shades 300 through 500 fills for light text in dark mode.
#[cfg_attr(
    feature = "pyffi",
    pyclass(eq, eq_int, frozen, hash, ord, module = "shadeshift")
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShadeLevel {
    S50,
    S100,
    S200,
    S300,
    S400,
    S500,
}

impl ShadeLevel {
    /// All shade levels, from lightest to darkest.
    pub const ALL: [ShadeLevel; 6] = [
        Self::S50,
        Self::S100,
        Self::S200,
        Self::S300,
        Self::S400,
        Self::S500,
    ];
}

#[cfg_attr(feature = "pyffi", pymethods)]
impl ShadeLevel {
    /// Get this level's number, e.g., 300 for [`ShadeLevel::S300`].
    pub const fn value(&self) -> u16 {
        match *self {
            Self::S50 => 50,
            Self::S100 => 100,
            Self::S200 => 200,
            Self::S300 => 300,
            Self::S400 => 400,
            Self::S500 => 500,
        }
    }

    /// Get this level's index into [`ShadeLevel::ALL`].
    pub const fn index(&self) -> usize {
        match *self {
            Self::S50 => 0,
            Self::S100 => 1,
            Self::S200 => 2,
            Self::S300 => 3,
            Self::S400 => 4,
            Self::S500 => 5,
        }
    }

    /// Determine whether this level is the anchor.
    pub const fn is_anchor(&self) -> bool {
        matches!(*self, Self::S300)
    }

    /// Determine whether this level is a light fill.
    pub const fn is_light(&self) -> bool {
        matches!(*self, Self::S50 | Self::S100 | Self::S200)
    }

    /// Determine the text token whose contrast this level is designed for.
    pub const fn active_token(&self) -> TextToken {
        if self.is_light() {
            TextToken::Grey750
        } else {
            TextToken::Grey50
        }
    }
}

impl TryFrom<u16> for ShadeLevel {
    type Error = ShadeLevelError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let level = match value {
            50 => Self::S50,
            100 => Self::S100,
            200 => Self::S200,
            300 => Self::S300,
            400 => Self::S400,
            500 => Self::S500,
            _ => return Err(ShadeLevelError { value }),
        };

        Ok(level)
    }
}

impl core::fmt::Display for ShadeLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.value())
    }
}

// --------------------------------------------------------------------------------------------------------------------

/// The text tokens shades are rated against.
#[cfg_attr(
    feature = "pyffi",
    pyclass(eq, eq_int, frozen, hash, module = "shadeshift")
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TextToken {
    /// Dark text for light mode, by default `#1F1F1F`.
    Grey750,
    /// Light text for dark mode, by default `#F7F7F7`.
    Grey50,
}

impl TextToken {
    /// Both text tokens.
    pub const ALL: [TextToken; 2] = [Self::Grey750, Self::Grey50];
}

#[cfg_attr(feature = "pyffi", pymethods)]
impl TextToken {
    /// Get this token's human-readable name.
    pub const fn name(&self) -> &'static str {
        match *self {
            Self::Grey750 => "Grey 750",
            Self::Grey50 => "Grey 50",
        }
    }

    /// Get this token's default color.
    pub const fn default_color(&self) -> Rgb {
        match *self {
            Self::Grey750 => Rgb::new(31.0 / 255.0, 31.0 / 255.0, 31.0 / 255.0),
            Self::Grey50 => Rgb::new(247.0 / 255.0, 247.0 / 255.0, 247.0 / 255.0),
        }
    }

    /// Determine in which direction fills for this token lie.
    pub const fn fill_direction(&self) -> FillDirection {
        match *self {
            Self::Grey750 => FillDirection::Lighter,
            Self::Grey50 => FillDirection::Darker,
        }
    }
}

/// The opacity of text.
#[cfg_attr(
    feature = "pyffi",
    pyclass(eq, eq_int, frozen, hash, module = "shadeshift")
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AlphaLevel {
    Primary,
    Secondary,
    Tertiary,
}

impl AlphaLevel {
    /// All alpha levels, from most to least opaque.
    pub const ALL: [AlphaLevel; 3] = [Self::Primary, Self::Secondary, Self::Tertiary];
}

#[cfg_attr(feature = "pyffi", pymethods)]
impl AlphaLevel {
    /// Get the alpha value.
    pub const fn alpha(&self) -> Float {
        match *self {
            Self::Primary => 1.0,
            Self::Secondary => 0.7,
            Self::Tertiary => 0.5,
        }
    }
}

// ====================================================================================================================

/// The configuration of a single shade.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadeSpec {
    /// The APCA contrast magnitude against the shade's active text token.
    pub target_contrast: Float,
    /// The offset added to the solved lightness.
    pub headroom: Float,
    /// The chroma as fraction of the hue's effective maximum. The anchor
    /// has none, since it keeps the input chroma.
    pub relative_chroma: Option<Float>,
    /// The absolute upper bound on chroma, if any.
    pub chroma_ceiling: Option<Float>,
}

impl ShadeSpec {
    const fn new(
        target_contrast: Float,
        headroom: Float,
        relative_chroma: Option<Float>,
        chroma_ceiling: Option<Float>,
    ) -> Self {
        Self {
            target_contrast,
            headroom,
            relative_chroma,
            chroma_ceiling,
        }
    }
}

/// The configuration of scale generation.
///
/// The default configuration targets APCA Lc 75 for all shades but shade
/// 200, which targets Lc 60, with the default text tokens. Headroom pushes
/// light shades lighter and dark shades darker than strictly necessary.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleConfig {
    /// The text color for light mode, i.e., [`TextToken::Grey750`].
    pub light_mode_text: Rgb,
    /// The text color for dark mode, i.e., [`TextToken::Grey50`].
    pub dark_mode_text: Rgb,
    /// The per-shade configuration, in [`ShadeLevel::ALL`] order.
    pub shades: [ShadeSpec; 6],
    /// The Helmholtz-Kohlrausch coefficient, i.e., the lightness reduction
    /// per unit chroma.
    pub helmholtz_kohlrausch: Float,
    /// The smallest lightness of any shade.
    pub min_lightness: Float,
    /// The largest lightness of any shade.
    pub max_lightness: Float,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            light_mode_text: TextToken::Grey750.default_color(),
            dark_mode_text: TextToken::Grey50.default_color(),
            shades: [
                ShadeSpec::new(75.0, 0.12, Some(0.2), Some(0.06)),
                ShadeSpec::new(75.0, 0.07, Some(0.4), Some(0.10)),
                ShadeSpec::new(60.0, 0.03, Some(0.6), None),
                ShadeSpec::new(75.0, 0.0, None, None),
                ShadeSpec::new(75.0, -0.11, Some(0.8), None),
                ShadeSpec::new(75.0, -0.21, Some(0.6), None),
            ],
            helmholtz_kohlrausch: 0.04,
            min_lightness: 0.05,
            max_lightness: 0.985,
        }
    }
}

// --------------------------------------------------------------------------------------------------------------------

/// A point on the target curve.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurvePoint {
    pub level: ShadeLevel,
    /// The target lightness, including headroom.
    pub lightness: Float,
    /// The lightness solved for, before adding headroom.
    pub solved_lightness: Float,
    pub target_contrast: Float,
    pub relative_chroma: Option<Float>,
    pub chroma_ceiling: Option<Float>,
}

/// The target curve for scale generation.
///
/// A target curve fixes each shade's lightness by solving for the lightness
/// of a neutral fill with the configured APCA contrast against the shade's
/// active text token. Since solving takes a few hundred contrast
/// computations, a curve should be built once and then reused for any
/// number of scales.
///
/// ```
/// # use shadeshift::{ShadeLevel, TargetCurve};
/// let curve = TargetCurve::default();
/// let lightness = curve.point(ShadeLevel::S300).lightness;
/// assert!((lightness - 0.5407).abs() < 1e-3);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct TargetCurve {
    light_mode_text: Rgb,
    dark_mode_text: Rgb,
    points: [CurvePoint; 6],
    helmholtz_kohlrausch: Float,
}

impl TargetCurve {
    /// Build the target curve for the given configuration.
    pub fn build(config: &ScaleConfig) -> Self {
        let text = |token: TextToken| match token {
            TextToken::Grey750 => config.light_mode_text,
            TextToken::Grey50 => config.dark_mode_text,
        };

        let points = ShadeLevel::ALL.map(|level| {
            let spec = config.shades[level.index()];
            let token = level.active_token();
            let solved_lightness = solve_lightness_for_apca(
                text(token),
                spec.target_contrast,
                token.fill_direction(),
            );
            let lightness = (solved_lightness + spec.headroom)
                .clamp(config.min_lightness, config.max_lightness);

            log::debug!(
                "shade {} targets lightness {:.4} (solved {:.4} for Lc {})",
                level,
                lightness,
                solved_lightness,
                spec.target_contrast
            );

            CurvePoint {
                level,
                lightness,
                solved_lightness,
                target_contrast: spec.target_contrast,
                relative_chroma: spec.relative_chroma,
                chroma_ceiling: spec.chroma_ceiling,
            }
        });

        Self {
            light_mode_text: config.light_mode_text,
            dark_mode_text: config.dark_mode_text,
            points,
            helmholtz_kohlrausch: config.helmholtz_kohlrausch,
        }
    }

    /// Get the point for the given level.
    pub fn point(&self, level: ShadeLevel) -> &CurvePoint {
        &self.points[level.index()]
    }

    /// Get all points, from lightest to darkest.
    pub fn points(&self) -> &[CurvePoint; 6] {
        &self.points
    }

    /// Get the anchor's lightness.
    pub fn anchor_lightness(&self) -> Float {
        self.point(ShadeLevel::S300).lightness
    }

    /// Get the color of the given text token.
    pub fn text(&self, token: TextToken) -> Rgb {
        match token {
            TextToken::Grey750 => self.light_mode_text,
            TextToken::Grey50 => self.dark_mode_text,
        }
    }

    /// Get the Helmholtz-Kohlrausch coefficient.
    pub fn helmholtz_kohlrausch(&self) -> Float {
        self.helmholtz_kohlrausch
    }
}

impl Default for TargetCurve {
    fn default() -> Self {
        Self::build(&ScaleConfig::default())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::assert_within;

    #[test]
    fn test_levels() -> Result<(), ShadeLevelError> {
        for (index, level) in ShadeLevel::ALL.iter().enumerate() {
            assert_eq!(level.index(), index, "index of {}", level);
            assert_eq!(ShadeLevel::try_from(level.value())?, *level, "round trip");
        }

        assert_eq!(ShadeLevel::try_from(250), Err(ShadeLevelError { value: 250 }), "250");
        assert!(ShadeLevel::S300.is_anchor(), "anchor");
        assert_eq!(ShadeLevel::S200.active_token(), TextToken::Grey750, "light mode");
        assert_eq!(ShadeLevel::S300.active_token(), TextToken::Grey50, "dark mode");
        Ok(())
    }

    #[test]
    fn test_default_curve() {
        let curve = TargetCurve::default();
        let expected = [0.9713, 0.9213, 0.7950, 0.5407, 0.4307, 0.3307];

        for (point, lightness) in curve.points().iter().zip(expected) {
            assert_within!(point.lightness, lightness, 1e-3);
        }

        assert_within!(curve.point(ShadeLevel::S200).solved_lightness, 0.7650, 1e-3);
        assert_eq!(curve.point(ShadeLevel::S300).relative_chroma, None, "anchor");
        assert_eq!(curve.anchor_lightness(), curve.point(ShadeLevel::S300).lightness, "anchor");
    }

    #[test]
    fn test_clamped_curve() {
        let mut config = ScaleConfig::default();
        config.shades[0].headroom = 0.5;
        config.shades[5].headroom = -0.9;

        let curve = TargetCurve::build(&config);
        assert_eq!(curve.point(ShadeLevel::S50).lightness, 0.985, "upper bound");
        assert_eq!(curve.point(ShadeLevel::S500).lightness, 0.05, "lower bound");
    }
}
