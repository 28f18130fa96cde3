#![allow(clippy::print_stdout)]

use shadeshift::{
    find_closest_multi, generate_scale, run_palette_audit, Family, HexFormatError, TargetCurve,
};

const PALETTE: [(&str, &str); 6] = [
    ("Red", "#EF4444"),
    ("Amber", "#F59E0B"),
    ("Green", "#22C55E"),
    ("Teal", "#14B8A6"),
    ("Blue", "#3B82F6"),
    ("Indigo", "#6366F1"),
];

fn main() -> Result<(), HexFormatError> {
    let curve = TargetCurve::default();

    // 1. Scales
    println!("\nScales");
    for &(name, hex) in &PALETTE {
        let scale = generate_scale(hex, name, &curve)?;
        let matched = find_closest_multi(hex)?
            .map(|m| format!("{} {} ({:.1}°)", m.system, m.entry.name, m.hue_delta))
            .unwrap_or_default();

        print!("    {:<8}", name);
        for shade in &scale.shades {
            print!(" {}:{}", shade.level, shade.hex);
        }
        println!("  ~ {}", matched);
    }

    // 2. Audit
    let families = PALETTE
        .iter()
        .map(|&(name, hex)| Family::from_hex(name, hex))
        .collect::<Result<Vec<_>, _>>()?;
    let audit = run_palette_audit(&families, &curve);

    println!("\nAudit score {:.1}", audit.score);
    for entry in &audit.breakdown {
        println!("    {:>+6.1}  {} ({})", entry.points, entry.label, entry.count);
    }

    println!("\nFindings");
    for finding in &audit.findings {
        println!("    {:?}: {}", finding.severity, finding);
    }

    println!("\nSuggested families");
    for suggestion in audit.suggestions.iter().take(5) {
        println!(
            "    {} {} at {:.1}° ({}), score {:.2}",
            suggestion.system, suggestion.name, suggestion.hue, suggestion.hex, suggestion.score
        );
    }
    println!();

    Ok(())
}
