#[cfg(feature = "pyffi")]
use pyo3::prelude::*;

use super::data::{ReferenceEntry, ReferenceSystem};
use crate::core::{hex_to_rgb, hue_delta, is_achromatic_chroma, rgb_to_oklch};
use crate::error::HexFormatError;
use crate::{Float, Oklch};

/// Hue deltas below this many degrees are exact matches.
pub const EXACT_THRESHOLD: Float = 8.0;

/// Hue deltas below this many degrees are close matches.
pub const CLOSE_THRESHOLD: Float = 15.0;

/// Hue deltas below this many degrees are approximate matches.
pub const APPROXIMATE_THRESHOLD: Float = 30.0;

/// How well a color matches a reference family.
#[cfg_attr(
    feature = "pyffi",
    pyclass(eq, eq_int, frozen, hash, ord, module = "shadeshift")
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Confidence {
    Exact,
    Close,
    Approximate,
    Distant,
}

impl Confidence {
    /// Classify the hue delta.
    pub fn from_hue_delta(delta: Float) -> Self {
        if delta < EXACT_THRESHOLD {
            Self::Exact
        } else if delta < CLOSE_THRESHOLD {
            Self::Close
        } else if delta < APPROXIMATE_THRESHOLD {
            Self::Approximate
        } else {
            Self::Distant
        }
    }
}

#[cfg_attr(feature = "pyffi", pymethods)]
impl Confidence {
    /// Get a lowercase name for this confidence.
    pub const fn name(&self) -> &'static str {
        match *self {
            Self::Exact => "exact",
            Self::Close => "close",
            Self::Approximate => "approximate",
            Self::Distant => "distant",
        }
    }
}

/// A match between a color and a reference family.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Match {
    pub system: ReferenceSystem,
    pub entry: ReferenceEntry,
    /// The unsigned hue difference in degrees.
    pub hue_delta: Float,
    pub confidence: Confidence,
}

impl Match {
    fn new(system: ReferenceSystem, entry: ReferenceEntry, color: &Oklch) -> Self {
        let delta = hue_delta(color.h, entry.hue);
        Self {
            system,
            entry,
            hue_delta: delta,
            confidence: Confidence::from_hue_delta(delta),
        }
    }
}

/// Convert the hex color to Oklch, unless it is gray-ish.
fn chromatic(hex: &str) -> Result<Option<Oklch>, HexFormatError> {
    let color = rgb_to_oklch(hex_to_rgb(hex)?);
    if is_achromatic_chroma(color.c) {
        log::trace!("{} is achromatic and matches no reference family", hex);
        Ok(None)
    } else {
        Ok(Some(color))
    }
}

fn closest_in(system: ReferenceSystem, color: &Oklch) -> Option<Match> {
    let mut best: Option<Match> = None;
    for entry in system.entries() {
        let candidate = Match::new(system, *entry, color);
        // Strictly smaller, so that the first of equally close entries wins
        if best.map_or(true, |best| candidate.hue_delta < best.hue_delta) {
            best = Some(candidate);
        }
    }
    best
}

/// Find the family of the reference system whose hue is closest to the
/// color's.
///
/// Gray-ish colors have no meaningful hue and hence match no family. The
/// first of several equally close families wins.
///
/// ```
/// # use shadeshift::{find_closest, Confidence, HexFormatError, ReferenceSystem};
/// let blue = find_closest("#3B82F6", ReferenceSystem::Tailwind)?;
/// assert_eq!(blue.map(|m| (m.entry.name, m.confidence)), Some(("Blue", Confidence::Exact)));
/// assert_eq!(find_closest("#808080", ReferenceSystem::Tailwind)?, None);
/// # Ok::<(), HexFormatError>(())
/// ```
pub fn find_closest(hex: &str, system: ReferenceSystem) -> Result<Option<Match>, HexFormatError> {
    Ok(chromatic(hex)?.and_then(|color| closest_in(system, &color)))
}

/// Find the family closest to the color across all reference systems.
///
/// Ties between systems resolve in [`ReferenceSystem::ALL`] order.
pub fn find_closest_multi(hex: &str) -> Result<Option<Match>, HexFormatError> {
    let Some(color) = chromatic(hex)? else {
        return Ok(None);
    };

    let mut best: Option<Match> = None;
    for system in ReferenceSystem::ALL {
        if let Some(candidate) = closest_in(system, &color) {
            if best.map_or(true, |best| candidate.hue_delta < best.hue_delta) {
                best = Some(candidate);
            }
        }
    }
    Ok(best)
}

/// Find the families closest to the color across all reference systems.
///
/// The result is sorted by increasing hue delta, with ties retaining table
/// order, and holds at most `limit` matches. Each family appears at most
/// once.
pub fn find_top_matches(hex: &str, limit: usize) -> Result<Vec<Match>, HexFormatError> {
    let Some(color) = chromatic(hex)? else {
        return Ok(Vec::new());
    };

    let mut matches: Vec<Match> = ReferenceSystem::ALL
        .iter()
        .flat_map(|system| {
            system
                .entries()
                .iter()
                .map(move |entry| Match::new(*system, *entry, &color))
        })
        .collect();
    matches.sort_by(|m1, m2| m1.hue_delta.total_cmp(&m2.hue_delta));

    // After sorting, the first occurrence of a family is the closer one
    let mut seen: Vec<(ReferenceSystem, &'static str)> = Vec::new();
    matches.retain(|m| {
        let key = (m.system, m.entry.name);
        if seen.contains(&key) {
            false
        } else {
            seen.push(key);
            true
        }
    });

    matches.truncate(limit);
    Ok(matches)
}
