//! Analyzing palettes of hue families.
//!
//! [`analyse_hue_gaps`] locates the arcs of the hue circle a palette leaves
//! uncovered and suggests reference families for filling them.
//! [`run_palette_audit`] goes further and checks a palette's chroma
//! consistency, hue spacing, and anchor lightness, summarizing the results
//! as a score with actionable findings.

mod audit;
mod gaps;

pub use audit::{
    run_palette_audit, AuditResult, ChromaEntry, Family, Finding, FindingKind, ScoreBreakdown,
    Severity,
};
pub use gaps::{
    analyse_hue_gaps, compute_coverage_stats, dynamic_gap_threshold, find_hue_gaps, Balance,
    CoverageStats, GapSuggestion, HueDot, HueGap, HueZone, MAX_PALETTE_SIZE,
};
