use criterion::{Criterion, black_box, criterion_group, criterion_main};
use sizhu_search::{
    ChartConfig, DEFAULT_YEAR_RANGE, ManualEntry, analyze, derive_chart_from_parts,
    parse_manual_pillars, project,
};
use sizhu_time::BirthMoment;

fn chart_bench(c: &mut Criterion) {
    let moment = BirthMoment::from_parts(1990, 5, 18, Some(8), Some(30)).unwrap();
    let approx = ChartConfig::approximate();
    let precise = ChartConfig::precise();

    let mut group = c.benchmark_group("chart");
    group.bench_function("derive_approx", |b| {
        b.iter(|| sizhu_search::derive_chart(black_box(&moment), &approx))
    });
    group.bench_function("derive_precise", |b| {
        b.iter(|| sizhu_search::derive_chart(black_box(&moment), &precise))
    });
    group.bench_function("derive_from_parts", |b| {
        b.iter(|| derive_chart_from_parts(black_box(2024), 2, 10, Some(12), None, &approx))
    });
    group.finish();
}

fn analysis_bench(c: &mut Criterion) {
    let four = parse_manual_pillars(&ManualEntry::new("庚午", "辛巳", "癸未", "丙辰")).unwrap();
    let result = analyze(&four);
    let (start, end) = (*DEFAULT_YEAR_RANGE.start(), *DEFAULT_YEAR_RANGE.end());

    let mut group = c.benchmark_group("analysis");
    group.bench_function("analyze_four", |b| b.iter(|| analyze(black_box(&four))));
    group.bench_function("project_favorable", |b| {
        b.iter(|| project(black_box(&result.favorable), start, end, 2026))
    });
    group.finish();
}

criterion_group!(benches, chart_bench, analysis_bench);
criterion_main!(benches);
