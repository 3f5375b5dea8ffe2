use chrono::{NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use timeline_rs::api::{TimelineEngine, TimelineEngineConfig};
use timeline_rs::core::{
    Granularity, Lane, PeriodBox, ScaleTransition, ScaleTransitionConfig, ScaleTransitionController,
    TimePeriod, TimelineDocument, TimelineViewState, Viewport, advance, build_grid, pack_rows,
};
use timeline_rs::render::NullRenderer;

fn date(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .expect("valid generated date")
}

fn granularity() -> impl Strategy<Value = Granularity> {
    (0usize..10).prop_map(|index| Granularity::ALL[index])
}

fn any_finite() -> impl Strategy<Value = f64> {
    prop_oneof![
        -5_000.0f64..5_000.0,
        prop::num::f64::NORMAL | prop::num::f64::SUBNORMAL | prop::num::f64::ZERO,
    ]
}

fn focus_date() -> impl Strategy<Value = NaiveDateTime> {
    (-3_000i32..3_000, 1u32..=12, 1u32..=28, 0u32..24, 0u32..60)
        .prop_map(|(year, month, day, hour, minute)| date(year, month, day, hour, minute))
}

proptest! {
    #[test]
    fn grid_lines_are_monotonic_evenly_spaced_and_cover_the_viewport(
        granularity in granularity(),
        focus in focus_date(),
        unit_px in 20.0f64..300.0,
        width in 100.0f64..1_600.0,
        focus_ratio in 0.0f64..=1.0
    ) {
        let focus_x = width * focus_ratio;
        let state = TimelineViewState::new(focus, focus_x, granularity, unit_px);
        let grid = build_grid(width, &state);
        let lines = grid.lines();

        prop_assert!(lines.len() >= 2);
        for pair in lines.windows(2) {
            prop_assert!(pair[0].x < pair[1].x);
            prop_assert!(pair[0].date < pair[1].date);
            prop_assert!(((pair[1].x - pair[0].x) - unit_px).abs() <= 1e-6);
        }
        prop_assert!(lines[0].x <= 0.0);
        prop_assert!(lines[lines.len() - 1].x >= width);

        let aligned = advance(focus, granularity, 0).expect("aligned focus");
        let focus_line = lines.iter().find(|line| line.x == focus_x);
        prop_assert_eq!(focus_line.map(|line| line.date), Some(aligned));
    }

    #[test]
    fn grid_builds_for_any_finite_focus_position(
        granularity in granularity(),
        focus in focus_date(),
        focus_x in any_finite(),
        unit_px in 20.0f64..300.0,
        width in 0.0f64..1_600.0
    ) {
        let state = TimelineViewState::new(focus, focus_x, granularity, unit_px);
        let grid = build_grid(width, &state);

        prop_assert!(!grid.is_empty());
        for pair in grid.lines().windows(2) {
            prop_assert!(pair[0].x <= pair[1].x);
        }
    }

    #[test]
    fn any_finite_pan_keeps_the_engine_renderable(
        granularity in granularity(),
        focus in focus_date(),
        delta in any_finite()
    ) {
        let document = TimelineDocument::new("pan", granularity, 100.0, focus, 500.0)
            .with_lane(Lane::new("lane", vec![TimePeriod::new("p", focus, focus)]));
        let config = TimelineEngineConfig::new(Viewport::new(1_000, 600));
        let mut engine = TimelineEngine::new(NullRenderer::default(), config, document)
            .expect("engine init");

        engine.pan_horizontal(delta).expect("finite pan");
        prop_assert!((0.0..=1_000.0).contains(&engine.focus_x()));
        prop_assert!(!engine.grid().is_empty());
        engine.render().expect("render");
    }

    #[test]
    fn advancing_composes(
        granularity in granularity(),
        focus in focus_date(),
        a in -100i64..100,
        b in -100i64..100
    ) {
        let stepwise = advance(focus, granularity, a)
            .and_then(|mid| advance(mid, granularity, b))
            .expect("stepwise");
        let direct = advance(focus, granularity, a + b).expect("direct");
        prop_assert_eq!(stepwise, direct);
    }

    #[test]
    fn rescale_steps_at_most_one_granularity_and_stays_in_band(
        granularity in granularity(),
        focus in focus_date(),
        unit_px in 0.0f64..400.0,
        delta in -400.0f64..400.0,
        pivot_x in 0.0f64..1_000.0
    ) {
        let controller = ScaleTransitionController::default();
        let mut state = TimelineViewState::new(focus, 500.0, granularity, unit_px);
        controller.clamp_state(&mut state);
        let grid = build_grid(1_000.0, &state);
        let step = grid.step_px();

        let transition = controller
            .rescale(&mut state, &grid, delta, pivot_x)
            .expect("finite input");

        let moved = state.granularity().index() as i64 - granularity.index() as i64;
        prop_assert!(moved.abs() <= 1);
        match transition {
            ScaleTransition::Finer { .. } => prop_assert_eq!(moved, 1),
            ScaleTransition::Coarser { .. } => prop_assert_eq!(moved, -1),
            ScaleTransition::Stayed | ScaleTransition::Clamped => prop_assert_eq!(moved, 0),
        }

        let bounds = ScaleTransitionConfig::default().bounds(state.granularity());
        if transition != ScaleTransition::Stayed {
            prop_assert!(state.unit_px() >= bounds.min_unit_px);
            prop_assert!(state.unit_px() < bounds.max_unit_px);
        }

        // The focus moved onto the old grid line nearest the pivot.
        prop_assert!((state.focus_x() - pivot_x).abs() <= step / 2.0 + 1e-9);
    }

    #[test]
    fn entering_a_granularity_never_bounces_back(
        granularity in granularity(),
        focus in focus_date(),
        delta in -400.0f64..400.0
    ) {
        let controller = ScaleTransitionController::default();
        let mut state = TimelineViewState::new(focus, 500.0, granularity, 100.0);
        controller.clamp_state(&mut state);
        let grid = build_grid(1_000.0, &state);
        let transition = controller
            .rescale(&mut state, &grid, delta, 500.0)
            .expect("finite input");

        if transition != ScaleTransition::Stayed {
            let grid = build_grid(1_000.0, &state);
            let settled = controller
                .rescale(&mut state, &grid, 0.0, 500.0)
                .expect("finite input");
            prop_assert_eq!(settled, ScaleTransition::Stayed);
        }
    }

    #[test]
    fn packed_rows_never_overlap(
        spans in prop::collection::vec((-2_000.0f64..2_000.0, 0.0f64..600.0, 0.0f64..200.0), 0..60),
        gap in 0.0f64..10.0
    ) {
        let boxes: Vec<PeriodBox> = spans
            .iter()
            .map(|&(start, length, label)| PeriodBox::new(start, start + length, label, 20.0))
            .collect();
        let packing = pack_rows(&boxes, gap);

        prop_assert_eq!(packing.row_of.len(), boxes.len());
        let placed: usize = packing.rows.iter().map(|row| row.periods.len()).sum();
        prop_assert_eq!(placed, boxes.len());

        for (i, left) in boxes.iter().enumerate() {
            for (j, right) in boxes.iter().enumerate().skip(i + 1) {
                if packing.row_of[i] != packing.row_of[j] {
                    continue;
                }
                let disjoint = left.box_end_x() + gap <= right.start_x
                    || right.box_end_x() + gap <= left.start_x;
                prop_assert!(disjoint, "boxes {} and {} overlap in row {}", i, j, packing.row_of[i]);
            }
        }

        // Rows are opened one at a time, in order.
        let mut opened = 0;
        for &row in &packing.row_of {
            prop_assert!(row <= opened);
            opened = opened.max(row + 1);
        }
        prop_assert_eq!(opened, packing.row_count());
    }

    #[test]
    fn lane_layout_is_idempotent(
        starts in prop::collection::vec((1_900i32..1_990, 1i32..30), 0..25),
        unit_px in 20.0f64..199.0
    ) {
        let periods: Vec<TimePeriod> = starts
            .iter()
            .enumerate()
            .map(|(index, &(year, length))| {
                TimePeriod::new(
                    format!("period {index}"),
                    date(year, 1, 1, 0, 0),
                    date(year + length, 6, 1, 0, 0),
                )
            })
            .collect();
        let document = TimelineDocument::new("prop", Granularity::Year, unit_px, date(1950, 1, 1, 0, 0), 500.0)
            .with_lane(Lane::new("lane", periods));
        let config = TimelineEngineConfig::new(Viewport::new(1_000, 600));
        let mut engine = TimelineEngine::new(NullRenderer::default(), config, document)
            .expect("engine init");

        let first = engine.layout_lanes().clone();
        let geometry = engine.lane(0).expect("lane").geometry().clone();
        let second = engine.layout_lanes().clone();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&geometry, engine.lane(0).expect("lane").geometry());

        let lane = &first.lanes[0];
        for (i, left) in lane.periods.iter().enumerate() {
            for right in lane.periods.iter().skip(i + 1) {
                if left.row == right.row {
                    prop_assert!(
                        left.start_x + left.box_width <= right.start_x
                            || right.start_x + right.box_width <= left.start_x
                    );
                }
            }
        }
        engine.render().expect("render");
    }
}
