#[cfg(feature = "pyffi")]
use pyo3::prelude::*;

use crate::core::{clockwise_distance, hue_delta, mean, median, normalize_hue, std_dev};
use crate::reference::{ReferenceEntry, ReferenceSystem};
use crate::scale::{effective_max_chroma, TargetCurve};
use crate::Float;

/// The largest number of families in a palette.
pub const MAX_PALETTE_SIZE: usize = 24;

/// Candidates must be further away from every existing family.
const MIN_CANDIDATE_DISTANCE: Float = 10.0;

/// The relative chroma difference at which chroma fit drops to zero.
const CHROMA_FIT_RANGE: Float = 0.3;

/// The relative chroma assumed for palettes without any.
const DEFAULT_RELATIVE_CHROMA: Float = 0.5;

const CENTRALITY_WEIGHT: Float = 0.40;
const CHROMA_WEIGHT: Float = 0.35;
const BALANCE_WEIGHT: Float = 0.25;

/// Determine the smallest hue distance between adjacent families that
/// counts as a gap.
///
/// The threshold is 1.5 times the ideal, even spacing for the number of
/// families, clamped to `15..=40` degrees. Fewer families hence tolerate
/// larger distances.
pub fn dynamic_gap_threshold(family_count: usize) -> Float {
    if family_count == 0 {
        return 40.0;
    }
    (1.5 * 360.0 / family_count as Float).clamp(15.0, 40.0)
}

// --------------------------------------------------------------------------------------------------------------------

/// A family's position on the hue circle.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct HueDot {
    pub name: String,
    pub hue: Float,
    /// The family's chroma as fraction of its effective maximum chroma, if
    /// known.
    pub relative_chroma: Option<Float>,
}

impl HueDot {
    /// Create a new hue dot without relative chroma.
    pub fn new<S: Into<String>>(name: S, hue: Float) -> Self {
        Self {
            name: name.into(),
            hue: normalize_hue(hue),
            relative_chroma: None,
        }
    }

    /// Create a copy of this dot with the given relative chroma.
    #[must_use]
    pub fn with_relative_chroma(self, relative_chroma: Float) -> Self {
        Self {
            relative_chroma: Some(relative_chroma),
            ..self
        }
    }
}

/// An arc of the hue circle without families.
///
/// The arc runs in increasing direction from `start` to `end`, wrapping
/// around at 360°.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HueGap {
    pub start: Float,
    pub end: Float,
    /// The arc's length in degrees.
    pub size: Float,
}

impl HueGap {
    /// Get the hue in the middle of this gap.
    pub fn midpoint(&self) -> Float {
        normalize_hue(self.size.mul_add(0.5, self.start))
    }

    /// Determine whether the hue lies strictly inside this gap.
    pub fn contains(&self, hue: Float) -> bool {
        let offset = clockwise_distance(self.start, hue);
        0.0 < offset && offset < self.size
    }

    /// Determine how central the hue is, from 1 at the midpoint to 0 at
    /// either edge.
    fn centrality(&self, hue: Float) -> Float {
        let half = 0.5 * self.size;
        let offset = clockwise_distance(self.start, hue);
        (1.0 - (offset - half).abs() / half).max(0.0)
    }
}

/// Determine the distances between adjacent hues, which must be sorted and
/// normalized. The last distance wraps around from the last to the first hue.
fn adjacent_distances(hues: &[Float]) -> Vec<Float> {
    let (Some(first), Some(last)) = (hues.first(), hues.last()) else {
        return Vec::new();
    };

    let mut distances: Vec<Float> = hues.windows(2).map(|pair| pair[1] - pair[0]).collect();
    distances.push(360.0 - (last - first));
    distances
}

fn sorted_hues(dots: &[HueDot]) -> Vec<Float> {
    let mut hues: Vec<Float> = dots.iter().map(|dot| normalize_hue(dot.hue)).collect();
    hues.sort_by(Float::total_cmp);
    hues
}

/// Find the gaps between the dots.
///
/// A single dot leaves one gap spanning the entire hue circle. Without dots,
/// there are no gaps.
pub fn find_hue_gaps(dots: &[HueDot]) -> Vec<HueGap> {
    let hues = sorted_hues(dots);
    let threshold = dynamic_gap_threshold(hues.len());
    let distances = adjacent_distances(&hues);

    let mut gaps = Vec::new();
    for (index, (start, size)) in hues.iter().zip(distances).enumerate() {
        if threshold < size {
            let end = hues
                .get(index + 1)
                .or_else(|| hues.first())
                .copied()
                .unwrap_or(*start);
            gaps.push(HueGap {
                start: *start,
                end,
                size,
            });
        }
    }
    gaps
}

// --------------------------------------------------------------------------------------------------------------------

/// A region of the hue circle by color temperature.
#[cfg_attr(
    feature = "pyffi",
    pyclass(eq, eq_int, frozen, hash, module = "shadeshift")
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HueZone {
    /// Reds, oranges, and magentas: below 60° or from 300°.
    Warm,
    /// Greens through blues: from 120° and below 270°.
    Cool,
    /// Yellows, yellow-greens, and violets in between.
    Neutral,
}

impl HueZone {
    /// Classify the hue.
    pub fn of(hue: Float) -> Self {
        let hue = normalize_hue(hue);
        if !(60.0..300.0).contains(&hue) {
            Self::Warm
        } else if (120.0..270.0).contains(&hue) {
            Self::Cool
        } else {
            Self::Neutral
        }
    }
}

/// The balance between warm and cool families.
#[cfg_attr(
    feature = "pyffi",
    pyclass(eq, eq_int, frozen, hash, module = "shadeshift")
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Balance {
    #[default]
    Balanced,
    WarmHeavy,
    CoolHeavy,
}

impl Balance {
    /// Classify the balance for the given counts.
    ///
    /// With at least four families, a palette is warm-heavy if it has at
    /// least twice as many warm as cool families, counting no cool families
    /// as one, and vice versa.
    pub fn classify(warm: usize, cool: usize, total: usize) -> Self {
        if total < 4 {
            Self::Balanced
        } else if warm >= 2 * cool.max(1) {
            Self::WarmHeavy
        } else if cool >= 2 * warm.max(1) {
            Self::CoolHeavy
        } else {
            Self::Balanced
        }
    }

    /// Determine whether the palette is imbalanced.
    pub fn is_imbalanced(&self) -> bool {
        !matches!(*self, Self::Balanced)
    }

    /// Determine how well a candidate in the given zone restores balance.
    fn fit(&self, zone: HueZone) -> Float {
        let opposite = match *self {
            Self::Balanced => return 0.5,
            Self::WarmHeavy => HueZone::Cool,
            Self::CoolHeavy => HueZone::Warm,
        };

        if zone == opposite {
            1.0
        } else if zone == HueZone::Neutral {
            0.7
        } else {
            0.2
        }
    }
}

/// Statistics on a palette's coverage of the hue circle.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct CoverageStats {
    pub family_count: usize,
    /// The number of families that can still be added.
    pub remaining_capacity: usize,
    /// The distance between evenly spaced families.
    pub ideal_gap: Float,
    pub mean_gap: Float,
    pub largest_gap: Float,
    /// The population standard deviation of distances between adjacent
    /// families.
    pub gap_std_dev: Float,
    pub warm: usize,
    pub cool: usize,
    pub neutral: usize,
    pub balance: Balance,
}

impl Default for CoverageStats {
    fn default() -> Self {
        Self {
            family_count: 0,
            remaining_capacity: MAX_PALETTE_SIZE,
            ideal_gap: 360.0,
            mean_gap: 0.0,
            largest_gap: 0.0,
            gap_std_dev: 0.0,
            warm: 0,
            cool: 0,
            neutral: 0,
            balance: Balance::Balanced,
        }
    }
}

/// Compute coverage statistics for the dots.
pub fn compute_coverage_stats(dots: &[HueDot]) -> CoverageStats {
    if dots.is_empty() {
        return CoverageStats::default();
    }

    let count = dots.len();
    let distances = adjacent_distances(&sorted_hues(dots));

    let (mut warm, mut cool, mut neutral) = (0, 0, 0);
    for dot in dots {
        match HueZone::of(dot.hue) {
            HueZone::Warm => warm += 1,
            HueZone::Cool => cool += 1,
            HueZone::Neutral => neutral += 1,
        }
    }

    CoverageStats {
        family_count: count,
        remaining_capacity: MAX_PALETTE_SIZE.saturating_sub(count),
        ideal_gap: 360.0 / count as Float,
        mean_gap: mean(&distances).unwrap_or(0.0),
        largest_gap: distances.iter().copied().fold(0.0, Float::max),
        gap_std_dev: std_dev(&distances),
        warm,
        cool,
        neutral,
        balance: Balance::classify(warm, cool, count),
    }
}

// --------------------------------------------------------------------------------------------------------------------

/// A reference family suggested for filling a gap.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct GapSuggestion {
    pub name: &'static str,
    pub system: ReferenceSystem,
    pub hue: Float,
    pub chroma: Float,
    pub lightness: Float,
    pub hex: String,
    /// The gap the family falls into.
    pub gap: HueGap,
    pub centrality: Float,
    pub chroma_fit: Float,
    pub balance_fit: Float,
    /// The weighted sum of centrality, chroma fit, and balance fit.
    pub score: Float,
}

/// Determine the relative chroma of the reference family when placed at the
/// anchor lightness. Since the family cannot exceed the available chroma,
/// the result is at most one.
fn natural_relative_chroma(entry: &ReferenceEntry, curve: &TargetCurve) -> Float {
    let available = effective_max_chroma(curve.anchor_lightness(), entry.hue);
    if available <= 0.0 {
        0.0
    } else {
        entry.chroma.min(available) / available
    }
}

/// Suggest reference families for filling the gaps between the dots.
///
/// Every reference family that lies strictly inside a gap and more than 10°
/// away from every dot is a candidate. Candidates are scored by how central
/// they are within their gap, how well their chroma fits the palette's
/// median relative chroma, and how well they restore a warm/cool imbalance.
/// The result is sorted by decreasing score and holds no more families than
/// the palette has room for.
pub fn analyse_hue_gaps(dots: &[HueDot], curve: &TargetCurve) -> Vec<GapSuggestion> {
    let capacity = MAX_PALETTE_SIZE.saturating_sub(dots.len());
    let gaps = find_hue_gaps(dots);
    if capacity == 0 || gaps.is_empty() {
        return Vec::new();
    }

    let known: Vec<Float> = dots.iter().filter_map(|dot| dot.relative_chroma).collect();
    let median_chroma = median(&known).unwrap_or(DEFAULT_RELATIVE_CHROMA);
    let balance = compute_coverage_stats(dots).balance;

    log::debug!(
        "{} gaps for {} dots, median relative chroma {:.3}, {:?}",
        gaps.len(),
        dots.len(),
        median_chroma,
        balance
    );

    let mut suggestions: Vec<GapSuggestion> = Vec::new();
    for gap in &gaps {
        for system in ReferenceSystem::ALL {
            for entry in system.entries() {
                if !gap.contains(entry.hue)
                    || dots
                        .iter()
                        .any(|dot| hue_delta(dot.hue, entry.hue) <= MIN_CANDIDATE_DISTANCE)
                {
                    continue;
                }

                let centrality = gap.centrality(entry.hue);
                let relative_chroma = natural_relative_chroma(entry, curve);
                let chroma_fit =
                    (1.0 - (relative_chroma - median_chroma).abs() / CHROMA_FIT_RANGE).max(0.0);
                let balance_fit = balance.fit(HueZone::of(entry.hue));
                let score = CENTRALITY_WEIGHT.mul_add(
                    centrality,
                    CHROMA_WEIGHT.mul_add(chroma_fit, BALANCE_WEIGHT * balance_fit),
                );

                let existing = suggestions
                    .iter_mut()
                    .find(|s| s.name == entry.name && s.system == system);
                match existing {
                    Some(existing) if existing.score >= score => {}
                    Some(existing) => {
                        existing.gap = *gap;
                        existing.centrality = centrality;
                        existing.score = score;
                    }
                    None => suggestions.push(GapSuggestion {
                        name: entry.name,
                        system,
                        hue: entry.hue,
                        chroma: entry.chroma,
                        lightness: entry.lightness,
                        hex: entry.hex(),
                        gap: *gap,
                        centrality,
                        chroma_fit,
                        balance_fit,
                        score,
                    }),
                }
            }
        }
    }

    // Stable sort, so equal scores keep gap and table order
    suggestions.sort_by(|s1, s2| s2.score.total_cmp(&s1.score));
    suggestions.truncate(capacity);
    suggestions
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::assert_within;

    fn dots(hues: &[Float]) -> Vec<HueDot> {
        hues.iter()
            .enumerate()
            .map(|(index, hue)| HueDot::new(format!("Family {}", index), *hue))
            .collect()
    }

    #[test]
    fn test_threshold() {
        assert_eq!(dynamic_gap_threshold(0), 40.0, "no families");
        assert_eq!(dynamic_gap_threshold(2), 40.0, "capped");
        assert_eq!(dynamic_gap_threshold(18), 30.0, "eighteen");
        assert_eq!(dynamic_gap_threshold(40), 15.0, "floor");
    }

    #[test]
    fn test_find_gaps() {
        assert!(find_hue_gaps(&[]).is_empty(), "no dots");

        let single = find_hue_gaps(&dots(&[42.0]));
        assert_eq!(single.len(), 1, "single dot");
        assert_eq!(single[0].size, 360.0, "full circle");

        let opposite = find_hue_gaps(&dots(&[0.0, 180.0]));
        assert_eq!(opposite.len(), 2, "two halves");
        assert!(opposite.iter().all(|gap| gap.size == 180.0), "even halves");

        let wrapped = find_hue_gaps(&dots(&[350.0, 10.0, 100.0]));
        assert_eq!(wrapped.len(), 2, "two gaps");
        assert_eq!((wrapped[0].start, wrapped[0].end), (10.0, 100.0), "first gap");
        assert_eq!((wrapped[1].start, wrapped[1].end), (100.0, 350.0), "second gap");

        let same = find_hue_gaps(&dots(&[120.0, 120.0]));
        assert_eq!(same.len(), 1, "identical hues");
        assert_eq!(same[0].size, 360.0, "full circle");
    }

    #[test]
    fn test_gap_geometry() {
        let gap = HueGap {
            start: 300.0,
            end: 60.0,
            size: 120.0,
        };
        assert_eq!(gap.midpoint(), 0.0, "midpoint wraps");
        assert!(gap.contains(330.0) && gap.contains(30.0), "inside");
        assert!(!gap.contains(300.0) && !gap.contains(60.0), "edges");
        assert!(!gap.contains(180.0), "outside");
        assert_within!(gap.centrality(0.0), 1.0, 1e-12);
        assert_within!(gap.centrality(330.0), 0.5, 1e-12);
    }

    #[test]
    fn test_zones_and_balance() {
        assert_eq!(HueZone::of(10.0), HueZone::Warm, "red");
        assert_eq!(HueZone::of(300.0), HueZone::Warm, "magenta");
        assert_eq!(HueZone::of(90.0), HueZone::Neutral, "yellow");
        assert_eq!(HueZone::of(120.0), HueZone::Cool, "green");
        assert_eq!(HueZone::of(270.0), HueZone::Neutral, "violet");

        assert_eq!(Balance::classify(3, 0, 3), Balance::Balanced, "too few");
        assert_eq!(Balance::classify(4, 0, 4), Balance::WarmHeavy, "no cool");
        assert_eq!(Balance::classify(4, 2, 6), Balance::WarmHeavy, "twice");
        assert_eq!(Balance::classify(3, 2, 5), Balance::Balanced, "close");
        assert_eq!(Balance::classify(1, 3, 5), Balance::CoolHeavy, "cool");
    }

    #[test]
    fn test_coverage() {
        assert_eq!(compute_coverage_stats(&[]), CoverageStats::default(), "empty");

        let stats = compute_coverage_stats(&dots(&[0.0, 90.0, 180.0, 270.0]));
        assert_eq!(stats.remaining_capacity, 20, "capacity");
        assert_eq!(stats.ideal_gap, 90.0, "ideal");
        assert_within!(stats.mean_gap, 90.0, 1e-12);
        assert_eq!(stats.largest_gap, 90.0, "largest");
        assert_within!(stats.gap_std_dev, 0.0, 1e-12);
        assert_eq!((stats.warm, stats.cool, stats.neutral), (1, 1, 2), "zones");
        assert_eq!(stats.balance, Balance::Balanced, "balance");
    }

    #[test]
    fn test_opposite_dots() {
        let curve = TargetCurve::default();
        let suggestions = analyse_hue_gaps(&dots(&[0.0, 180.0]), &curve);

        assert!(!suggestions.is_empty(), "suggestions");
        assert!(suggestions.len() <= MAX_PALETTE_SIZE - 2, "capacity");
        for suggestion in &suggestions {
            assert!(
                hue_delta(suggestion.hue, 0.0) > 10.0 && hue_delta(suggestion.hue, 180.0) > 10.0,
                "{} too close to existing families",
                suggestion.name
            );
            assert!((0.0..=1.0).contains(&suggestion.score), "score range");
        }
        for pair in suggestions.windows(2) {
            assert!(pair[0].score >= pair[1].score, "sorted by score");
        }
    }

    #[test]
    fn test_evenly_spaced_dots() {
        let hues: Vec<Float> = (0..18).map(|index| 20.0 * index as Float).collect();
        assert!(
            analyse_hue_gaps(&dots(&hues), &TargetCurve::default()).is_empty(),
            "no gaps"
        );
    }

    #[test]
    fn test_warm_palette() {
        let curve = TargetCurve::default();
        let warm = dots(&[0.0, 20.0, 40.0, 330.0, 350.0]);
        let suggestions = analyse_hue_gaps(&warm, &curve);

        let best = suggestions.first().map(|s| HueZone::of(s.hue));
        assert_eq!(best, Some(HueZone::Cool), "best suggestion restores balance");
        assert!(suggestions.len() <= 19, "capacity");
    }

    #[test]
    fn test_chroma_fit() {
        let curve = TargetCurve::default();
        let saturated: Vec<HueDot> = dots(&[0.0, 180.0])
            .into_iter()
            .map(|dot| dot.with_relative_chroma(1.0))
            .collect();

        let suggestions = analyse_hue_gaps(&saturated, &curve);
        assert!(
            suggestions.iter().any(|s| s.chroma_fit > 0.9),
            "saturated families fit a saturated palette"
        );
    }

    #[test]
    fn test_full_palette() {
        // Crowded into one corner of the hue circle, leaving a huge gap
        let hues: Vec<Float> = (0..MAX_PALETTE_SIZE).map(|index| 2.0 * index as Float).collect();
        let crowded = dots(&hues);
        assert_eq!(find_hue_gaps(&crowded).len(), 1, "one gap");
        assert!(
            analyse_hue_gaps(&crowded, &TargetCurve::default()).is_empty(),
            "no capacity"
        );
    }
}
