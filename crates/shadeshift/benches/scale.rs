use criterion::{black_box, criterion_group, criterion_main, Criterion};
use shadeshift::{generate_scale, run_palette_audit, Family, ScaleConfig, TargetCurve};

const PALETTE: [(&str, &str); 8] = [
    ("Red", "#EF4444"),
    ("Orange", "#F97316"),
    ("Amber", "#F59E0B"),
    ("Green", "#22C55E"),
    ("Cyan", "#06B6D4"),
    ("Blue", "#3B82F6"),
    ("Purple", "#A855F7"),
    ("Pink", "#EC4899"),
];

pub fn run_benchmarks(c: &mut Criterion) {
    let config = ScaleConfig::default();
    let curve = TargetCurve::build(&config);
    let families: Vec<Family> = PALETTE
        .iter()
        .filter_map(|&(name, hex)| Family::from_hex(name, hex).ok())
        .collect();

    let mut group = c.benchmark_group("scale");
    group.bench_function("target-curve", |b| {
        b.iter(|| TargetCurve::build(black_box(&config)))
    });
    group.bench_function("blue", |b| {
        b.iter(|| generate_scale(black_box("#3B82F6"), "Blue", &curve))
    });
    group.bench_function("gray", |b| {
        b.iter(|| generate_scale(black_box("#808080"), "Gray", &curve))
    });
    group.finish();

    let mut group = c.benchmark_group("audit");
    group.sample_size(20);
    group.bench_function("eight-families", |b| {
        b.iter(|| run_palette_audit(black_box(&families), &curve))
    });
    group.finish();
}

criterion_group!(benches, run_benchmarks);
criterion_main!(benches);
