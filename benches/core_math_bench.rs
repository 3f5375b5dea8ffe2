use chrono::{NaiveDate, NaiveDateTime};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use timeline_rs::api::{TimelineEngine, TimelineEngineConfig};
use timeline_rs::core::{
    DateToPixelMapper, Granularity, Lane, PeriodBox, TimePeriod, TimelineDocument,
    TimelineViewState, Viewport, build_grid, pack_rows,
};
use timeline_rs::render::NullRenderer;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .expect("valid date")
}

fn bench_month_grid_build(c: &mut Criterion) {
    let state = TimelineViewState::new(ymd(1900, 1, 1), 960.0, Granularity::Month, 12.0);

    c.bench_function("month_grid_build_1920px", |b| {
        b.iter(|| {
            let grid = build_grid(black_box(1920.0), black_box(&state));
            black_box(grid.len())
        })
    });
}

fn bench_date_mapping_10k(c: &mut Criterion) {
    let state = TimelineViewState::new(ymd(1900, 1, 1), 960.0, Granularity::Year, 40.0);
    let grid = build_grid(1920.0, &state);
    let mapper = DateToPixelMapper::default();
    let dates: Vec<NaiveDateTime> = (0..10_000)
        .map(|i| ymd(1850 + i % 100, 1 + (i % 12) as u32, 1 + (i % 28) as u32))
        .collect();

    c.bench_function("date_mapping_10k", |b| {
        b.iter(|| {
            let sum: f64 = dates
                .iter()
                .map(|date| mapper.to_pixel_x(black_box(&grid), *date))
                .sum();
            black_box(sum)
        })
    });
}

fn bench_row_packing_5k(c: &mut Criterion) {
    let boxes: Vec<PeriodBox> = (0..5_000)
        .map(|i| {
            let start = f64::from(i * 37 % 20_000);
            PeriodBox::new(start, start + f64::from(i % 400), 60.0, 20.0)
        })
        .collect();

    c.bench_function("row_packing_5k", |b| {
        b.iter(|| black_box(pack_rows(black_box(&boxes), 2.0).row_count()))
    });
}

fn bench_lane_layout_2k(c: &mut Criterion) {
    let periods: Vec<TimePeriod> = (0..2_000)
        .map(|i| {
            let year = 1800 + i % 200;
            TimePeriod::new(format!("period {i}"), ymd(year, 1, 1), ymd(year + 1 + i % 7, 1, 1))
        })
        .collect();
    let document = TimelineDocument::new("bench", Granularity::Year, 40.0, ymd(1900, 1, 1), 960.0)
        .with_lane(Lane::new("bench", periods));
    let config = TimelineEngineConfig::new(Viewport::new(1920, 1080));
    let mut engine =
        TimelineEngine::new(NullRenderer::default(), config, document).expect("engine init");

    c.bench_function("lane_layout_2k", |b| {
        b.iter(|| black_box(engine.layout_lanes().total_height))
    });
}

criterion_group!(
    benches,
    bench_month_grid_build,
    bench_date_mapping_10k,
    bench_row_packing_5k,
    bench_lane_layout_2k
);
criterion_main!(benches);
