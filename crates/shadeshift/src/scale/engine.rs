#[cfg(feature = "pyffi")]
use pyo3::prelude::*;

use super::curve::{AlphaLevel, ShadeLevel, TargetCurve, TextToken};
use crate::core::{
    apca_contrast, bisect, clamp_chroma_to_gamut, composite, corrected_hue, cusp_lightness,
    gamut_headroom, hex_to_rgb, is_achromatic_chroma, max_chroma_at, oklch_to_rgb, rgb_to_hex,
    rgb_to_oklch, wcag_contrast,
};
use crate::error::HexFormatError;
use crate::{Float, Oklch, Rgb};

/// The base of the cusp damping factor.
const DAMPING_BASE: Float = 0.55;

/// The increase of the cusp damping factor per unit lightness distance from
/// the cusp.
const DAMPING_SLOPE: Float = 1.0;

/// Determine the effective maximum chroma for the given lightness and hue.
///
/// Close to the gamut cusp, the maximum chroma makes for garish colors.
/// Hence this function dampens the maximum chroma by a factor that starts at
/// 0.55 at the cusp and grows with the distance from the cusp, reaching 1.0
/// at a distance of 0.45.
#[cfg_attr(feature = "pyffi", pyfunction)]
pub fn effective_max_chroma(l: Float, h: Float) -> Float {
    let distance = (l - cusp_lightness(h)).abs();
    let damping = DAMPING_SLOPE.mul_add(distance, DAMPING_BASE).clamp(0.1, 1.0);
    max_chroma_at(l, h) * damping
}

/// The number of bisection steps for the contrast guard.
const GUARD_ITERATIONS: usize = 32;

/// Chroma counts as reduced if it falls short of the target by more.
const CHROMA_TOLERANCE: Float = 1e-4;

// --------------------------------------------------------------------------------------------------------------------

/// The contrast of a text token with some alpha against a shade.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContrastScore {
    pub token: TextToken,
    pub alpha: AlphaLevel,
    /// The APCA lightness contrast Lc.
    pub apca: Float,
    /// The WCAG 2 contrast ratio.
    pub wcag: Float,
}

/// A shade of a generated scale.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Shade {
    pub level: ShadeLevel,
    pub hex: String,
    pub oklch: Oklch,
    pub rgb: Rgb,
    /// The scores for both text tokens at all alpha levels.
    pub scores: Vec<ContrastScore>,
    pub active_token: TextToken,
    /// The chroma still available before leaving the gamut.
    pub gamut_headroom: Float,
    /// Whether the lightness differs from the target curve's.
    pub lightness_adjusted: bool,
    /// Whether the gamut forced chroma below its target.
    pub chroma_reduced: bool,
}

impl Shade {
    /// Look up the score for the given token and alpha.
    pub fn score(&self, token: TextToken, alpha: AlphaLevel) -> Option<&ContrastScore> {
        self.scores
            .iter()
            .find(|score| score.token == token && score.alpha == alpha)
    }

    /// Get the APCA contrast of the fully opaque active text token.
    pub fn active_apca(&self) -> Float {
        self.score(self.active_token, AlphaLevel::Primary)
            .map_or(0.0, |score| score.apca)
    }
}

/// A generated scale.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleResult {
    /// The normalized hex of the color the scale was generated from.
    pub anchor_hex: String,
    pub name: String,
    /// Whether the anchor is gray-ish, resulting in a neutral scale.
    pub achromatic: bool,
    /// The shades, from lightest to darkest.
    pub shades: [Shade; 6],
}

impl ScaleResult {
    /// Get the shade for the given level.
    pub fn shade(&self, level: ShadeLevel) -> &Shade {
        &self.shades[level.index()]
    }

    /// Get the hexadecimal colors of all shades, from lightest to darkest.
    pub fn hexes(&self) -> Vec<&str> {
        self.shades.iter().map(|shade| shade.hex.as_str()).collect()
    }
}

// --------------------------------------------------------------------------------------------------------------------

/// Adjust the lightness until the text meets the target contrast.
///
/// If the text already meets the target contrast, this function returns the
/// lightness unchanged. Otherwise, it moves the lightness away from the text
/// token, lighter for light fills and darker for dark fills, by bisecting for
/// the smallest adjustment meeting the target. Chroma is re-clamped for every
/// probed lightness.
fn meet_contrast(text: Rgb, level: ShadeLevel, target: Float, color: Oklch) -> Float {
    let Oklch { l, c, h } = color;
    let contrast_at = |lightness: Float| {
        let chroma = clamp_chroma_to_gamut(lightness, c, h);
        apca_contrast(text, oklch_to_rgb(Oklch::new(lightness, chroma, h))).abs()
    };

    if contrast_at(l) >= target {
        return l;
    }

    let adjusted = if level.is_light() {
        bisect(l, 1.0, GUARD_ITERATIONS, |lightness| contrast_at(lightness) < target).high
    } else {
        bisect(0.0, l, GUARD_ITERATIONS, |lightness| contrast_at(lightness) >= target).low
    };

    log::debug!(
        "shade {} moves from lightness {:.4} to {:.4} to meet Lc {}",
        level,
        l,
        adjusted,
        target
    );
    adjusted
}

/// Rate the shade against both text tokens at all alpha levels.
fn rate(curve: &TargetCurve, fill: Rgb) -> Vec<ContrastScore> {
    let mut scores = Vec::with_capacity(TextToken::ALL.len() * AlphaLevel::ALL.len());
    for token in TextToken::ALL {
        for alpha in AlphaLevel::ALL {
            let text = composite(curve.text(token), fill, alpha.alpha());
            scores.push(ContrastScore {
                token,
                alpha,
                apca: apca_contrast(text, fill),
                wcag: wcag_contrast(text, fill),
            });
        }
    }
    scores
}

/// Generate the six-shade scale for the given color.
///
/// The color must be a 6-digit hexadecimal color. Shade 300 keeps the color's
/// chroma and hue but takes its lightness from the target curve. All other
/// shades derive their chroma from the hue's effective maximum chroma, as
/// configured for the curve, compensate for the Helmholtz-Kohlrausch effect,
/// and correct for CAM16 hue drift relative to shade 300. Finally, a shade
/// whose contrast against its active text token falls short of the target is
/// moved away from the text token until it does meet the target.
///
/// ```
/// # use shadeshift::{generate_scale, HexFormatError, ShadeLevel, TargetCurve};
/// let curve = TargetCurve::default();
/// let scale = generate_scale("#3B82F6", "Blue", &curve)?;
/// assert_eq!(scale.shade(ShadeLevel::S300).hex, "#2068D9");
/// assert!(scale.shade(ShadeLevel::S200).active_apca() >= 59.5);
/// # Ok::<(), HexFormatError>(())
/// ```
pub fn generate_scale(
    hex: &str,
    name: &str,
    curve: &TargetCurve,
) -> Result<ScaleResult, HexFormatError> {
    let rgb = hex_to_rgb(hex)?;
    let input = rgb_to_oklch(rgb);
    let achromatic = is_achromatic_chroma(input.c);
    let hue = input.h;

    let anchor_lightness = curve.anchor_lightness();
    let anchor = if achromatic {
        Oklch::new(anchor_lightness, 0.0, hue)
    } else {
        Oklch::new(
            anchor_lightness,
            clamp_chroma_to_gamut(anchor_lightness, input.c, hue),
            hue,
        )
    };

    log::debug!(
        "generating scale {:?} for {} with anchor {}, achromatic: {}",
        name,
        hex,
        anchor,
        achromatic
    );

    let kohlrausch = curve.helmholtz_kohlrausch();
    let shades = ShadeLevel::ALL.map(|level| {
        let point = curve.point(level);
        let target_lightness = point.lightness;

        // Determine target chroma, lightness, and hue
        let (target_chroma, color) = if achromatic {
            (0.0, Oklch::new(target_lightness, 0.0, hue))
        } else if level.is_anchor() {
            let chroma = clamp_chroma_to_gamut(target_lightness, input.c, hue);
            (input.c, Oklch::new(target_lightness, chroma, hue))
        } else {
            let naive = point
                .relative_chroma
                .map_or(input.c, |relative| {
                    relative * effective_max_chroma(target_lightness, hue)
                });
            let naive = point.chroma_ceiling.map_or(naive, |ceiling| naive.min(ceiling));

            let chroma = clamp_chroma_to_gamut(target_lightness, naive, hue);
            let lightness = (-kohlrausch).mul_add(chroma, target_lightness);
            let chroma = clamp_chroma_to_gamut(lightness, chroma, hue);
            let corrected = corrected_hue(anchor, lightness, chroma);
            let chroma = clamp_chroma_to_gamut(lightness, chroma, corrected);
            (naive, Oklch::new(lightness, chroma, corrected))
        };

        // Guard contrast against the active text token
        let token = level.active_token();
        let lightness = meet_contrast(curve.text(token), level, point.target_contrast, color);
        let chroma = clamp_chroma_to_gamut(lightness, color.c, color.h);
        let oklch = Oklch::new(lightness, chroma, color.h);

        let rgb = oklch_to_rgb(oklch);
        let shade = Shade {
            level,
            hex: rgb_to_hex(rgb),
            oklch,
            rgb,
            scores: rate(curve, rgb),
            active_token: token,
            gamut_headroom: gamut_headroom(lightness, chroma, oklch.h),
            lightness_adjusted: (lightness - target_lightness).abs() > 1e-9,
            chroma_reduced: chroma < target_chroma - CHROMA_TOLERANCE,
        };

        log::trace!(
            "shade {} is {} with {} and Lc {:.2}",
            level,
            shade.hex,
            shade.oklch,
            shade.active_apca()
        );
        shade
    });

    Ok(ScaleResult {
        anchor_hex: rgb_to_hex(rgb),
        name: name.to_string(),
        achromatic,
        shades,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::assert_within;

    #[test]
    fn test_effective_max_chroma() {
        for h in (0..360).step_by(20) {
            let h = h as Float;
            for l in [0.2, 0.5, 0.8] {
                let effective = effective_max_chroma(l, h);
                let max = max_chroma_at(l, h);
                assert!(effective <= max, "effective chroma exceeds maximum");
                assert!(effective >= max.mul_add(0.55, -1e-12), "damped too much");
            }
        }
    }

    #[test]
    fn test_blue_scale() -> Result<(), HexFormatError> {
        let curve = TargetCurve::default();
        let scale = generate_scale("#3b82f6", "Blue", &curve)?;

        assert_eq!(scale.anchor_hex, "#3B82F6", "normalized anchor");
        assert!(!scale.achromatic, "blue is not gray");
        assert_eq!(
            scale.hexes(),
            ["#F4F5F7", "#E2E4EE", "#AFBBDB", "#2068D9", "#324D84", "#243456"],
            "hexes"
        );

        let anchor = scale.shade(ShadeLevel::S300);
        assert_within!(anchor.oklch.l, 0.5407, 1e-3);
        assert_within!(anchor.oklch.c, 0.18801, 1e-4);
        assert!(!anchor.lightness_adjusted, "anchor sits on the curve");
        assert!(!anchor.chroma_reduced, "anchor chroma fits");

        for shade in &scale.shades {
            let target = curve.point(shade.level).target_contrast;
            assert!(
                shade.active_apca().abs() >= target - 0.5,
                "shade {} has Lc {}",
                shade.level,
                shade.active_apca()
            );
            assert_eq!(shade.scores.len(), 6, "two tokens at three alphas");
            assert!(shade.gamut_headroom >= 0.0, "negative headroom");
        }
        Ok(())
    }

    #[test]
    fn test_gray_scale() -> Result<(), HexFormatError> {
        let scale = generate_scale("#808080", "Gray", &TargetCurve::default())?;
        assert!(scale.achromatic, "gray is gray");
        assert_eq!(
            scale.hexes(),
            ["#F5F5F5", "#E5E5E5", "#BCBCBC", "#6F6F6F", "#505050", "#353535"],
            "hexes"
        );
        for shade in &scale.shades {
            assert_eq!(shade.oklch.c, 0.0, "chroma of shade {}", shade.level);
        }
        Ok(())
    }

    #[test]
    fn test_monotone_lightness() -> Result<(), HexFormatError> {
        let curve = TargetCurve::default();
        for hex in ["#EF4444", "#F59E0B", "#22C55E", "#06B6D4", "#A855F7", "#FFFF00"] {
            let scale = generate_scale(hex, "Test", &curve)?;
            for pair in scale.shades.windows(2) {
                assert!(
                    pair[0].oklch.l > pair[1].oklch.l,
                    "{} shade {} is not lighter than shade {}",
                    hex,
                    pair[0].level,
                    pair[1].level
                );
            }
        }
        Ok(())
    }

    #[test]
    fn test_errors() {
        let curve = TargetCurve::default();
        assert_eq!(
            generate_scale("#12345", "Broken", &curve),
            Err(HexFormatError::UnexpectedLength(5)),
            "length"
        );
        assert_eq!(
            generate_scale("#3B82F6FF", "Alpha", &curve),
            Err(HexFormatError::UnexpectedAlpha),
            "alpha"
        );
    }
}
