use shadeshift::{
    analyse_hue_gaps, apca_contrast, clamp_chroma_to_gamut, find_closest, generate_scale,
    hue_delta, in_gamut, linear_to_srgb, oklch_to_rgb, oklch_to_rgb_raw, rgb_to_hex,
    rgb_to_oklch, run_palette_audit, solve_lightness_for_apca, srgb_to_linear, Family,
    FillDirection, HexFormatError, HueDot, Oklch, ReferenceSystem, Rgb, Severity, ShadeLevel,
    TargetCurve, TextToken,
};

#[test]
fn round_trip() {
    for color in [
        Rgb::new(1.0, 0.0, 0.0),
        Rgb::new(0.0, 1.0, 0.0),
        Rgb::new(0.0, 0.0, 1.0),
        Rgb::new(0.5, 0.5, 0.5),
        Rgb::new(0.2, 0.6, 0.4),
        Rgb::new(0.9, 0.7, 0.1),
    ] {
        let back = oklch_to_rgb(rgb_to_oklch(color));
        for (c1, c2) in color.to_array().into_iter().zip(back.to_array()) {
            assert!((c1 - c2).abs() < 0.02, "{} round-trips to {}", color, back);
        }
    }

    assert_eq!(srgb_to_linear(0.0), 0.0, "black");
    assert_eq!(srgb_to_linear(1.0), 1.0, "white");
    for value in [0.01, 0.04, 0.25, 0.5, 0.75] {
        assert!(
            (linear_to_srgb(srgb_to_linear(value)) - value).abs() < 1e-6,
            "transfer function at {}",
            value
        );
    }
}

#[test]
fn gamut_invariant() {
    for l in [0.1, 0.3, 0.5, 0.7, 0.9] {
        for h in (0..12).map(|index| 30.0 * index as f64) {
            for c in [0.05, 0.15, 0.3] {
                let clamped = clamp_chroma_to_gamut(l, c, h);
                assert!(clamped <= c, "clamping increased chroma");
                assert!(
                    in_gamut(oklch_to_rgb_raw(Oklch::new(l, clamped, h))),
                    "oklch({} {} {}) is out of gamut",
                    l,
                    clamped,
                    h
                );
            }
        }
    }
}

#[test]
fn apca_solver_accuracy() {
    for (token, direction) in [
        (TextToken::Grey750, FillDirection::Lighter),
        (TextToken::Grey50, FillDirection::Darker),
    ] {
        let text = token.default_color();
        for target in [45.0, 60.0, 75.0, 90.0] {
            let l = solve_lightness_for_apca(text, target, direction);
            let fill = oklch_to_rgb(Oklch::new(l, 0.0, 0.0));
            let contrast = apca_contrast(text, fill).abs();
            assert!(
                (contrast - target).abs() < 0.5,
                "{} reaches Lc {} instead of {}",
                token.name(),
                contrast,
                target
            );
        }
    }
}

#[test]
fn achromatic_handling() -> Result<(), HexFormatError> {
    for system in ReferenceSystem::ALL {
        assert!(find_closest("#808080", system)?.is_none(), "gray matches {}", system);
    }

    let scale = generate_scale("#808080", "Gray", &TargetCurve::default())?;
    for shade in &scale.shades {
        assert!(shade.oklch.c < 0.001, "shade {} has chroma", shade.level);
    }
    Ok(())
}

#[test]
fn hue_delta_correctness() {
    assert_eq!(hue_delta(10.0, 350.0), 20.0, "wraps around");
    for (h1, h2) in [(0.0, 0.0), (10.0, 200.0), (359.0, 1.0), (90.0, 270.0), (45.0, 300.0)] {
        let delta = hue_delta(h1, h2);
        assert_eq!(delta, hue_delta(h2, h1), "symmetric");
        assert!((0.0..=180.0).contains(&delta), "in range");
    }
}

#[test]
fn gap_analysis_boundaries() {
    let curve = TargetCurve::default();

    let opposite = [HueDot::new("Red", 0.0), HueDot::new("Cyan", 180.0)];
    let suggestions = analyse_hue_gaps(&opposite, &curve);
    assert!(!suggestions.is_empty(), "suggestions between opposite dots");
    for suggestion in &suggestions {
        let hue = suggestion.hue;
        assert!(
            (0.0 < hue && hue < 180.0) || (180.0 < hue && hue < 360.0),
            "{} lies on a dot",
            suggestion.name
        );
        assert!(
            hue_delta(hue, 0.0) > 10.0 && hue_delta(hue, 180.0) > 10.0,
            "{} at {} is too close to an existing family",
            suggestion.name,
            hue
        );
    }

    let even: Vec<HueDot> = (0..18)
        .map(|index| HueDot::new(format!("F{}", index), 20.0 * index as f64))
        .collect();
    assert!(analyse_hue_gaps(&even, &curve).is_empty(), "evenly spaced");
}

#[test]
fn audit_score_bounds() -> Result<(), HexFormatError> {
    let curve = TargetCurve::default();

    let empty = run_palette_audit(&[], &curve);
    assert!((0.0..=100.0).contains(&empty.score), "empty score");
    assert!(empty.findings.is_empty(), "empty findings");

    let palettes: [&[&str]; 3] = [
        &["#3B82F6"],
        &["#EF4444", "#F59E0B", "#22C55E", "#06B6D4", "#3B82F6", "#A855F7"],
        &["#3B82F6", "#3B83F6", "#3A82F5", "#808080", "#000000", "#FFFFFF"],
    ];
    for palette in palettes {
        let families = palette
            .iter()
            .enumerate()
            .map(|(index, hex)| Family::from_hex(format!("F{}", index), hex))
            .collect::<Result<Vec<_>, _>>()?;
        let audit = run_palette_audit(&families, &curve);
        assert!((0.0..=100.0).contains(&audit.score), "score {}", audit.score);

        let total: f64 = audit.breakdown.iter().map(|entry| entry.points).sum();
        assert!((total - audit.score).abs() < 1e-9, "breakdown sums to score");
        for pair in audit.findings.windows(2) {
            assert!(pair[0].severity <= pair[1].severity, "sorted by severity");
        }
    }

    let duplicates = [Family::from_hex("A", "#3B82F6")?, Family::from_hex("B", "#3B83F6")?];
    let audit = run_palette_audit(&duplicates, &curve);
    assert_eq!(
        audit.findings.first().map(|finding| finding.severity),
        Some(Severity::Critical),
        "near-identical hues collide"
    );
    Ok(())
}

#[test]
fn blue_end_to_end() -> Result<(), HexFormatError> {
    let curve = TargetCurve::default();
    let scale = generate_scale("#3B82F6", "Blue", &curve)?;

    let anchor = scale.shade(ShadeLevel::S300);
    assert!((anchor.oklch.l - 0.54).abs() < 0.01, "anchor lightness");
    assert_eq!(anchor.hex, rgb_to_hex(oklch_to_rgb(anchor.oklch)), "anchor hex");
    assert_eq!(anchor.hex, "#2068D9", "anchor color");

    for shade in &scale.shades {
        let minimum = if shade.level == ShadeLevel::S200 { 60.0 } else { 75.0 };
        assert!(
            shade.active_apca().abs() >= minimum - 0.5,
            "shade {} has Lc {}",
            shade.level,
            shade.active_apca()
        );
    }
    Ok(())
}

#[test]
fn idempotence() -> Result<(), HexFormatError> {
    let curve = TargetCurve::default();
    for hex in ["#3B82F6", "#EF4444", "#808080", "#FFFF00"] {
        let first = generate_scale(hex, "Test", &curve)?;
        let second = generate_scale(hex, "Test", &curve)?;
        assert_eq!(first.hexes(), second.hexes(), "{} is deterministic", hex);
    }
    Ok(())
}

#[cfg(feature = "serde")]
#[test]
fn serialization() -> Result<(), Box<dyn std::error::Error>> {
    use shadeshift::ScaleConfig;

    let curve = TargetCurve::default();
    let scale = generate_scale("#3B82F6", "Blue", &curve)?;
    let json = serde_json::to_value(&scale)?;
    assert_eq!(json["name"], "Blue", "name");
    assert_eq!(json["shades"][3]["hex"], "#2068D9", "anchor");
    assert_eq!(json["shades"][3]["level"], "S300", "level");

    let color: Rgb = serde_json::from_str(r#"{"r": 1.0, "g": 0.5, "b": 0.0}"#)?;
    assert_eq!(color, Rgb::new(1.0, 0.5, 0.0), "deserialized color");

    let config = ScaleConfig::default();
    let text = serde_json::to_string(&config)?;
    assert_eq!(serde_json::from_str::<ScaleConfig>(&text)?, config, "config");

    let palette = [Family::from_hex("Blue", "#3B82F6")?];
    let audit = serde_json::to_value(run_palette_audit(&palette, &curve))?;
    assert!(audit["score"].is_number(), "score");
    assert!(audit["findings"].is_array(), "findings");
    Ok(())
}
