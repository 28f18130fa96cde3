#[cfg(feature = "pyffi")]
use pyo3::prelude::*;

use super::gaps::{
    analyse_hue_gaps, compute_coverage_stats, dynamic_gap_threshold, find_hue_gaps,
    CoverageStats, GapSuggestion, HueDot, HueGap,
};
use crate::core::{
    clamp_chroma_to_gamut, clockwise_distance, hex_to_rgb, hue_delta, is_achromatic_chroma,
    median, normalize_hue, oklch_to_rgb, rgb_to_hex, rgb_to_oklch, Accumulator,
};
use crate::error::HexFormatError;
use crate::scale::{effective_max_chroma, TargetCurve};
use crate::{Float, Oklch};

/// Relative chroma deviations above this are reported.
const CHROMA_DEVIATION: Float = 0.05;

/// Relative chroma deviations above this also cost points.
const SEVERE_CHROMA_DEVIATION: Float = 0.10;

/// Families closer than this many degrees collide.
const COLLISION_DELTA: Float = 5.0;

/// Families closer than this many degrees are crowded.
const CROWDING_DELTA: Float = 10.0;

/// Anchor lightness may deviate this much from the target curve.
const LIGHTNESS_TOLERANCE: Float = 0.06;

/// Gaps larger than this multiple of the gap threshold are large.
const LARGE_GAP_FACTOR: Float = 1.5;

/// The relative chroma assumed for palettes without chromatic families.
const DEFAULT_RELATIVE_CHROMA: Float = 0.5;

/// A family of a palette, represented by its anchor color.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Family {
    pub name: String,
    pub hex: String,
    pub oklch: Oklch,
}

impl Family {
    /// Create a new family from its name and anchor color in hexadecimal.
    pub fn from_hex<S: Into<String>>(name: S, hex: &str) -> Result<Self, HexFormatError> {
        let rgb = hex_to_rgb(hex)?;
        Ok(Self {
            name: name.into(),
            hex: rgb_to_hex(rgb),
            oklch: rgb_to_oklch(rgb),
        })
    }

    /// Create a new family from its name and anchor color in Oklch.
    pub fn from_oklch<S: Into<String>>(name: S, oklch: Oklch) -> Self {
        Self {
            name: name.into(),
            hex: rgb_to_hex(oklch_to_rgb(oklch)),
            oklch,
        }
    }

    fn is_achromatic(&self) -> bool {
        is_achromatic_chroma(self.oklch.c)
    }
}

// --------------------------------------------------------------------------------------------------------------------

/// The severity of a finding.
#[cfg_attr(
    feature = "pyffi",
    pyclass(eq, eq_int, frozen, hash, ord, module = "shadeshift")
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

/// The specifics of a finding.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub enum FindingKind {
    /// A family's relative chroma deviates from the palette's median.
    ChromaDeviation {
        relative_chroma: Float,
        target: Float,
        suggested_chroma: Float,
        suggested_hex: String,
    },
    /// Two families have nearly the same hue and should be merged.
    HueCollision { other: String, hue_delta: Float },
    /// Two families have similar hues and one should be shifted.
    HueCrowding {
        other: String,
        hue_delta: Float,
        shifted_family: String,
        shifted_hue: Float,
        shifted_hex: String,
    },
    /// A family's anchor would benefit from different lightness or chroma.
    AnchorTweak {
        lightness: Float,
        target_lightness: Float,
        suggested: Oklch,
        suggested_hex: String,
    },
    /// No family covers an arc of the hue circle.
    HueGap { gap: HueGap, large: bool },
}

/// A finding of a palette audit.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Finding {
    pub severity: Severity,
    /// The family the finding is about, if any.
    pub family: Option<String>,
    pub kind: FindingKind,
}

impl Finding {
    /// Get a human-readable message for this finding.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl core::fmt::Display for Finding {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let family = self.family.as_deref().unwrap_or("palette");

        match self.kind {
            FindingKind::ChromaDeviation {
                relative_chroma,
                target,
                suggested_chroma,
                ref suggested_hex,
            } => write!(
                f,
                "{} has relative chroma {:.2}, {:+.2} off the palette's {:.2}; \
                 try chroma {:.3} ({})",
                family,
                relative_chroma,
                relative_chroma - target,
                target,
                suggested_chroma,
                suggested_hex
            ),
            FindingKind::HueCollision {
                ref other,
                hue_delta,
            } => write!(
                f,
                "{} and {} are only {:.1}° apart; consider merging them",
                family, other, hue_delta
            ),
            FindingKind::HueCrowding {
                ref other,
                hue_delta,
                ref shifted_family,
                shifted_hue,
                ref shifted_hex,
            } => write!(
                f,
                "{} and {} are {:.1}° apart; shift {} to {:.1}° ({})",
                family, other, hue_delta, shifted_family, shifted_hue, shifted_hex
            ),
            FindingKind::AnchorTweak {
                lightness,
                target_lightness,
                suggested,
                ref suggested_hex,
            } => write!(
                f,
                "{} has anchor lightness {:.3} for a target of {:.3}; try {} ({})",
                family, lightness, target_lightness, suggested, suggested_hex
            ),
            FindingKind::HueGap { gap, large } => write!(
                f,
                "{} hue gap of {:.1}° from {:.1}° to {:.1}°",
                if large { "large" } else { "medium" },
                gap.size,
                gap.start,
                gap.end
            ),
        }
    }
}

/// One additive contribution to the audit score.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoreBreakdown {
    pub label: &'static str,
    /// The number of occurrences contributing.
    pub count: usize,
    pub points: Float,
}

/// A family's chroma relative to the effective maximum for its hue and
/// lightness.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct ChromaEntry {
    pub name: String,
    pub relative_chroma: Float,
    /// The signed difference from the palette's median.
    pub deviation: Float,
    pub flagged: bool,
}

/// The result of a palette audit.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct AuditResult {
    /// The score in `0..=100`.
    pub score: Float,
    /// The contributions summing up to the score.
    pub breakdown: Vec<ScoreBreakdown>,
    /// The findings, from critical to informational.
    pub findings: Vec<Finding>,
    /// The median relative chroma.
    pub chroma_target: Float,
    pub chroma: Vec<ChromaEntry>,
    pub coverage: CoverageStats,
    pub gaps: Vec<HueGap>,
    /// Reference families for filling the gaps.
    pub suggestions: Vec<GapSuggestion>,
}

// --------------------------------------------------------------------------------------------------------------------

/// A tally of the score.
#[derive(Debug, Default)]
struct Tally {
    entries: Vec<ScoreBreakdown>,
    total: Accumulator,
}

impl Tally {
    fn add(&mut self, label: &'static str, count: usize, points: Float) {
        if points == 0.0 {
            return;
        }
        self.entries.push(ScoreBreakdown {
            label,
            count,
            points,
        });
        self.total += points;
    }

    fn add_each(&mut self, label: &'static str, count: usize, points_each: Float) {
        self.add(label, count, count as Float * points_each);
    }

    /// Clamp the score to `0..=100`, recording any adjustment.
    fn finish(mut self) -> (Float, Vec<ScoreBreakdown>) {
        let total = self.total.total();
        let score = total.clamp(0.0, 100.0);
        self.add("clamped to range", 1, score - total);
        (score, self.entries)
    }
}

/// Analyze the relative chroma of chromatic families.
fn analyse_chroma(families: &[&Family]) -> (Float, Vec<ChromaEntry>) {
    let relative: Vec<Float> = families
        .iter()
        .map(|family| {
            let Oklch { l, c, h } = family.oklch;
            let available = effective_max_chroma(l, h);
            if available > 0.0 {
                c / available
            } else {
                0.0
            }
        })
        .collect();

    let target = median(&relative).unwrap_or(DEFAULT_RELATIVE_CHROMA);
    let entries = families
        .iter()
        .zip(relative)
        .map(|(family, relative_chroma)| {
            let deviation = relative_chroma - target;
            ChromaEntry {
                name: family.name.clone(),
                relative_chroma,
                deviation,
                flagged: deviation.abs() > CHROMA_DEVIATION,
            }
        })
        .collect();

    (target, entries)
}

/// Analyze adjacent pairs of chromatic families, which must be sorted by
/// hue. This function returns the findings and the number of collisions and
/// crowded pairs.
fn analyse_proximity(sorted: &[&Family]) -> (Vec<Finding>, usize, usize) {
    let count = sorted.len();
    let pairs = match count {
        0 | 1 => 0,
        2 => 1,
        _ => count,
    };

    let mut findings = Vec::new();
    let (mut collisions, mut crowded) = (0, 0);
    for index in 0..pairs {
        let first = sorted[index];
        let second = sorted[(index + 1) % count];
        let delta = hue_delta(first.oklch.h, second.oklch.h);

        if delta < COLLISION_DELTA {
            collisions += 1;
            findings.push(Finding {
                severity: Severity::Critical,
                family: Some(first.name.clone()),
                kind: FindingKind::HueCollision {
                    other: second.name.clone(),
                    hue_delta: delta,
                },
            });
        } else if delta < CROWDING_DELTA {
            crowded += 1;

            // The room on the side facing away from the other family
            let before = sorted[(index + count - 1) % count];
            let after = sorted[(index + 2) % count];
            let first_room = clockwise_distance(before.oklch.h, first.oklch.h);
            let second_room = clockwise_distance(second.oklch.h, after.oklch.h);

            let (shifted, hue) = if first_room > second_room {
                (first, first_room.mul_add(-0.5, first.oklch.h))
            } else {
                (second, second_room.mul_add(0.5, second.oklch.h))
            };
            let Oklch { l, c, .. } = shifted.oklch;
            let hue = normalize_hue(hue);
            let color = Oklch::new(l, clamp_chroma_to_gamut(l, c, hue), hue);

            findings.push(Finding {
                severity: Severity::Warning,
                family: Some(first.name.clone()),
                kind: FindingKind::HueCrowding {
                    other: second.name.clone(),
                    hue_delta: delta,
                    shifted_family: shifted.name.clone(),
                    shifted_hue: hue,
                    shifted_hex: rgb_to_hex(oklch_to_rgb(color)),
                },
            });
        }
    }

    (findings, collisions, crowded)
}

/// Audit the palette.
///
/// The audit analyzes the families' relative chroma, the proximity of their
/// hues, their anchor lightness, and the gaps between their hues. Gray-ish
/// families have no meaningful hue and only take part in the lightness
/// analysis. The score starts out at 100 and is adjusted for each issue,
/// with [`AuditResult::breakdown`] listing every adjustment.
///
/// ```
/// # use shadeshift::{run_palette_audit, Family, HexFormatError, TargetCurve};
/// let palette = [
///     Family::from_hex("Red", "#EF4444")?,
///     Family::from_hex("Green", "#22C55E")?,
///     Family::from_hex("Blue", "#3B82F6")?,
/// ];
/// let audit = run_palette_audit(&palette, &TargetCurve::default());
/// assert!((0.0..=100.0).contains(&audit.score));
/// let total: f64 = audit.breakdown.iter().map(|entry| entry.points).sum();
/// assert!((total - audit.score).abs() < 1e-9);
/// # Ok::<(), HexFormatError>(())
/// ```
pub fn run_palette_audit(families: &[Family], curve: &TargetCurve) -> AuditResult {
    let mut chromatic: Vec<&Family> = families.iter().filter(|f| !f.is_achromatic()).collect();
    chromatic.sort_by(|f1, f2| f1.oklch.h.total_cmp(&f2.oklch.h));

    let mut findings = Vec::new();
    let mut tally = Tally::default();
    tally.add("base", 1, 100.0);

    // Chroma
    let (chroma_target, chroma) = analyse_chroma(&chromatic);
    let mut severe = 0;
    for (family, entry) in chromatic.iter().zip(&chroma) {
        if !entry.flagged {
            continue;
        }

        let Oklch { l, h, .. } = family.oklch;
        let suggested_chroma =
            clamp_chroma_to_gamut(l, chroma_target * effective_max_chroma(l, h), h);
        let is_severe = entry.deviation.abs() > SEVERE_CHROMA_DEVIATION;
        if is_severe {
            severe += 1;
        }

        findings.push(Finding {
            severity: if is_severe {
                Severity::Warning
            } else {
                Severity::Info
            },
            family: Some(family.name.clone()),
            kind: FindingKind::ChromaDeviation {
                relative_chroma: entry.relative_chroma,
                target: chroma_target,
                suggested_chroma,
                suggested_hex: rgb_to_hex(oklch_to_rgb(Oklch::new(l, suggested_chroma, h))),
            },
        });
    }
    tally.add_each("chroma deviations", severe, -3.0);

    // Proximity
    let (proximity, collisions, crowded) = analyse_proximity(&chromatic);
    findings.extend(proximity);
    tally.add_each("hue collisions", collisions, -15.0);
    tally.add_each("crowded hues", crowded, -5.0);

    // Anchor tweaks; names may repeat, so flagged families match by address
    let flagged: Vec<&Family> = chromatic
        .iter()
        .zip(&chroma)
        .filter(|&(_, entry)| entry.flagged)
        .map(|(family, _)| *family)
        .collect();
    let target_lightness = curve.anchor_lightness();
    let mut lightness_tweaks = 0;
    for family in families {
        let Oklch { l, c, h } = family.oklch;
        let adjust_lightness = (l - target_lightness).abs() > LIGHTNESS_TOLERANCE;
        let adjust_chroma = flagged.iter().any(|&other| core::ptr::eq(other, family));
        if !adjust_lightness && !adjust_chroma {
            continue;
        }

        let lightness = if adjust_lightness { target_lightness } else { l };
        let target_chroma = if adjust_chroma {
            chroma_target * effective_max_chroma(lightness, h)
        } else {
            c
        };
        let suggested = Oklch::new(
            lightness,
            clamp_chroma_to_gamut(lightness, target_chroma, h),
            h,
        );

        if adjust_lightness {
            lightness_tweaks += 1;
        }
        findings.push(Finding {
            severity: if adjust_lightness {
                Severity::Warning
            } else {
                Severity::Info
            },
            family: Some(family.name.clone()),
            kind: FindingKind::AnchorTweak {
                lightness: l,
                target_lightness,
                suggested,
                suggested_hex: rgb_to_hex(oklch_to_rgb(suggested)),
            },
        });
    }
    tally.add_each("lightness tweaks", lightness_tweaks, -5.0);

    // Gaps
    let dots: Vec<HueDot> = chromatic
        .iter()
        .zip(&chroma)
        .map(|(family, entry)| {
            HueDot::new(family.name.as_str(), family.oklch.h)
                .with_relative_chroma(entry.relative_chroma)
        })
        .collect();
    let gaps = find_hue_gaps(&dots);
    let large_gap = LARGE_GAP_FACTOR * dynamic_gap_threshold(dots.len());
    let (mut large, mut medium) = (0, 0);
    for gap in &gaps {
        let is_large = gap.size > large_gap;
        if is_large {
            large += 1;
        } else {
            medium += 1;
        }
        findings.push(Finding {
            severity: Severity::Info,
            family: None,
            kind: FindingKind::HueGap {
                gap: *gap,
                large: is_large,
            },
        });
    }
    tally.add_each("large gaps", large, -3.0);
    tally.add_each("medium gaps", medium, -1.0);

    // Coverage
    let coverage = compute_coverage_stats(&dots);
    if coverage.family_count > 0 {
        let unevenness = (coverage.gap_std_dev / coverage.ideal_gap).min(1.0);
        tally.add("uneven spacing", 1, -10.0 * unevenness);
    }
    if coverage.balance.is_imbalanced() {
        tally.add("warm/cool imbalance", 1, -3.0);
    }

    // Size
    let count = families.len();
    if (16..=20).contains(&count) {
        tally.add("palette size", count, 5.0);
    } else if count < 12 {
        tally.add("palette size", count, -5.0);
    }

    let (score, breakdown) = tally.finish();
    findings.sort_by_key(|finding| finding.severity);
    let suggestions = analyse_hue_gaps(&dots, curve);

    log::debug!(
        "audit of {} families scores {:.1} with {} findings",
        count,
        score,
        findings.len()
    );

    AuditResult {
        score,
        breakdown,
        findings,
        chroma_target,
        chroma,
        coverage,
        gaps,
        suggestions,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::assert_within;
    use crate::core::{in_gamut, oklch_to_rgb_raw};

    fn total(result: &AuditResult) -> Float {
        result.breakdown.iter().map(|entry| entry.points).sum()
    }

    fn count(result: &AuditResult, severity: Severity) -> usize {
        result
            .findings
            .iter()
            .filter(|finding| finding.severity == severity)
            .count()
    }

    #[test]
    fn test_empty_palette() {
        let result = run_palette_audit(&[], &TargetCurve::default());
        assert_eq!(result.score, 95.0, "only the size penalty");
        assert!(result.findings.is_empty(), "no findings");
        assert!(result.gaps.is_empty(), "no gaps");
        assert_eq!(result.chroma_target, 0.5, "default chroma");
        assert_eq!(result.coverage.balance, crate::analysis::Balance::Balanced, "balanced");
        assert_within!(total(&result), result.score, 1e-9);
    }

    #[test]
    fn test_single_family() -> Result<(), HexFormatError> {
        let palette = [Family::from_hex("Blue", "#3b82f6")?];
        let result = run_palette_audit(&palette, &TargetCurve::default());

        assert_eq!(palette[0].hex, "#3B82F6", "normalized hex");
        // Large gap, lightness tweak, small palette
        assert_within!(result.score, 87.0, 1e-9);
        assert_within!(total(&result), result.score, 1e-9);
        assert_eq!(result.gaps.len(), 1, "one gap");
        assert_eq!(count(&result, Severity::Warning), 1, "lightness tweak");
        assert!(!result.suggestions.is_empty(), "suggestions");
        Ok(())
    }

    #[test]
    fn test_collision_and_crowding() {
        let curve = TargetCurve::default();
        let l = curve.anchor_lightness();
        let family = |name: &str, h: Float| Family::from_oklch(name, Oklch::new(l, 0.1, h));

        let colliding = [family("A", 100.0), family("B", 103.0), family("C", 220.0)];
        let result = run_palette_audit(&colliding, &curve);
        assert_eq!(count(&result, Severity::Critical), 1, "collision");
        assert_eq!(result.findings[0].severity, Severity::Critical, "critical first");

        let crowded = [family("A", 100.0), family("B", 107.0), family("C", 220.0)];
        let result = run_palette_audit(&crowded, &curve);
        let shift = result.findings.iter().find_map(|finding| match finding.kind {
            FindingKind::HueCrowding {
                ref shifted_family,
                shifted_hue,
                ..
            } => Some((shifted_family.clone(), shifted_hue)),
            _ => None,
        });

        // A has 240° of room before it, B only 113° after it
        let (name, hue) = shift.unwrap_or_default();
        assert_eq!(name, "A", "shifted family");
        assert_within!(hue, 340.0, 1e-9);
    }

    #[test]
    fn test_chroma_deviation() {
        let curve = TargetCurve::default();
        let l = curve.anchor_lightness();
        let family = |name: &str, h: Float, relative: Float| {
            Family::from_oklch(name, Oklch::new(l, relative * effective_max_chroma(l, h), h))
        };

        let palette = [
            family("Low", 30.0, 0.2),
            family("Mid", 150.0, 0.5),
            family("High", 270.0, 0.8),
        ];
        let result = run_palette_audit(&palette, &curve);
        assert_within!(result.chroma_target, 0.5, 1e-9);

        let flagged: Vec<&str> = result
            .chroma
            .iter()
            .filter(|entry| entry.flagged)
            .map(|entry| entry.name.as_str())
            .collect();
        assert_eq!(flagged, ["Low", "High"], "flagged families");

        for finding in &result.findings {
            if let FindingKind::ChromaDeviation {
                suggested_chroma, ..
            } = finding.kind
            {
                assert!(suggested_chroma > 0.0, "suggested chroma");
            }
            if let FindingKind::AnchorTweak { suggested, .. } = finding.kind {
                assert!(in_gamut(oklch_to_rgb_raw(suggested)), "suggestion out of gamut");
            }
        }

        let deviations = result
            .breakdown
            .iter()
            .find(|entry| entry.label == "chroma deviations");
        assert_eq!(deviations.map(|entry| entry.points), Some(-6.0), "penalty");
    }

    #[test]
    fn test_repeated_names() {
        let curve = TargetCurve::default();
        let l = curve.anchor_lightness();
        let family = |name: &str, h: Float, relative: Float| {
            Family::from_oklch(name, Oklch::new(l, relative * effective_max_chroma(l, h), h))
        };

        let palette = [
            family("Accent", 30.0, 0.2),
            family("Mid", 150.0, 0.5),
            family("Accent", 270.0, 0.5),
            family("Other", 200.0, 0.5),
        ];
        let result = run_palette_audit(&palette, &curve);

        let tweaked: Vec<Float> = result
            .findings
            .iter()
            .filter_map(|finding| match finding.kind {
                FindingKind::AnchorTweak { suggested, .. } => Some(suggested.h),
                _ => None,
            })
            .collect();
        assert_eq!(tweaked, [30.0], "only the off-target family is tweaked");
    }

    #[test]
    fn test_achromatic_family() -> Result<(), HexFormatError> {
        let palette = [
            Family::from_hex("Gray", "#808080")?,
            Family::from_hex("Blue", "#3B82F6")?,
        ];
        let result = run_palette_audit(&palette, &TargetCurve::default());
        assert_eq!(result.chroma.len(), 1, "gray has no relative chroma");
        assert_eq!(result.coverage.family_count, 1, "gray has no hue");
        Ok(())
    }

    #[test]
    fn test_score_bounds() {
        let curve = TargetCurve::default();
        let palette: Vec<Family> = (0..6)
            .map(|index| {
                Family::from_oklch(format!("F{}", index), Oklch::new(0.2, 0.05, index as Float))
            })
            .collect();

        let result = run_palette_audit(&palette, &curve);
        assert!((0.0..=100.0).contains(&result.score), "score in range");
        assert_eq!(result.score, 0.0, "everything collides");
        assert_within!(total(&result), result.score, 1e-9);
        for finding in &result.findings {
            assert!(!finding.message().is_empty(), "message");
        }
    }
}
