//! Matching colors against the hue families of published design systems.

mod data;
mod matcher;

pub use data::{ReferenceEntry, ReferenceSystem};
pub use matcher::{
    find_closest, find_closest_multi, find_top_matches, Confidence, Match,
    APPROXIMATE_THRESHOLD, CLOSE_THRESHOLD, EXACT_THRESHOLD,
};
