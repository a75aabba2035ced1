//! Unit tests for filtering, metrics and the dashboard pipeline

use std::collections::BTreeSet;

use chrono::{DateTime, TimeZone, Utc};

use super::*;
use crate::dataset::fixtures::{at, row, row_with_counts, sample_rows};

fn dashboard() -> Dashboard {
    Dashboard::new(Dataset::from_rows(sample_rows()))
}

fn ids(rows: &[&Row]) -> Vec<String> {
    rows.iter().map(|r| r.video_id.clone()).collect()
}

// =============================================================================
// Filter engine
// =============================================================================

#[test]
fn test_full_range_keeps_everything_in_order() {
    let dash = dashboard();
    let axis = dash.axis().unwrap();
    assert_eq!(axis.len(), 5);

    let rows = dash.select_rows(&FilterSelection::all(axis)).unwrap();
    assert_eq!(ids(&rows), vec!["a", "b", "c", "d", "e", "f", "g", "h"]);
}

#[test]
fn test_single_month_selection() {
    let dash = dashboard();
    // 2021-03 holds rows published on the 14th and the 31st
    let rows = dash.select_rows(&FilterSelection::new(2, 2, [])).unwrap();
    assert_eq!(ids(&rows), vec!["d", "e"]);
}

#[test]
fn test_every_window_is_subset_within_bounds() {
    let dash = dashboard();
    let axis = dash.axis().unwrap();
    let all = dash.dataset().rows();

    for lo in 0..axis.len() {
        for hi in lo..axis.len() {
            let rows = dash.select_rows(&FilterSelection::new(lo, hi, [])).unwrap();
            let start = axis.get(lo).unwrap();
            let end = axis.get(hi).unwrap();
            for row in &rows {
                assert!(all.iter().any(|r| std::ptr::eq(r, *row)), "Row not from dataset");
                let month = floor_to_month(&row.published_at.unwrap());
                assert!(start <= month && month <= end, "{} outside {}..={}", month, start, end);
            }
            // Every in-window row is kept
            let expected = all
                .iter()
                .filter(|r| {
                    let m = floor_to_month(&r.published_at.unwrap());
                    start <= m && m <= end
                })
                .count();
            assert_eq!(rows.len(), expected);
        }
    }
}

#[test]
fn test_three_rows_one_outside_window() {
    let data = Dataset::from_rows(vec![
        row("in1", 1, "A", (2022, 1, 10)),
        row("out", 2, "B", (2022, 4, 2)),
        row("in2", 2, "B", (2022, 2, 27)),
    ]);
    let dash = Dashboard::new(data);
    let axis = dash.axis().unwrap();
    assert_eq!(axis.len(), 4);

    // 2022-01 ..= 2022-02
    let rows = dash.select_rows(&FilterSelection::new(0, 1, [])).unwrap();
    assert_eq!(ids(&rows), vec!["in1", "in2"]);
}

#[test]
fn test_end_bound_covers_whole_end_month() {
    let stamped = |id: &str, ts: DateTime<Utc>| {
        let mut r = row(id, 1, "A", (2021, 1, 1));
        r.published_at = Some(ts);
        r
    };
    let utc = |y, m, d, h, min, sec| Utc.with_ymd_and_hms(y, m, d, h, min, sec).unwrap();

    let dash = Dashboard::new(Dataset::from_rows(vec![
        stamped("feb", utc(2021, 2, 28, 23, 59, 59)),
        stamped("mar_first", utc(2021, 3, 1, 0, 0, 0)),
        stamped("mar_last", utc(2021, 3, 31, 23, 59, 59)),
        stamped("apr_first", utc(2021, 4, 1, 0, 0, 0)),
    ]));
    let axis = dash.axis().unwrap();
    assert_eq!(axis.len(), 3);

    // axis[1] is 2021-03-01, yet the end of March is still inside the window
    let end = axis.get(1).unwrap().and_hms_opt(0, 0, 0).unwrap().and_utc();
    let rows = dash.select_rows(&FilterSelection::new(1, 1, [])).unwrap();
    assert_eq!(ids(&rows), vec!["mar_first", "mar_last"]);
    assert!(rows[1].published_at.unwrap() > end);

    let rows = dash.select_rows(&FilterSelection::new(0, 1, [])).unwrap();
    assert_eq!(ids(&rows), vec!["feb", "mar_first", "mar_last"]);
}

#[test]
fn test_empty_category_set_equals_full_set() {
    let dash = dashboard();
    let all_ids: Vec<u32> = dash.categories().ids().collect();
    assert_eq!(all_ids, vec![10, 20, 24]);

    for (lo, hi) in [(0, 4), (1, 3), (4, 4)] {
        let none = dash.select_rows(&FilterSelection::new(lo, hi, [])).unwrap();
        let full = dash
            .select_rows(&FilterSelection::new(lo, hi, all_ids.clone()))
            .unwrap();
        assert_eq!(ids(&none), ids(&full));
    }
}

#[test]
fn test_category_filter() {
    let dash = dashboard();
    let rows = dash.select_rows(&FilterSelection::new(0, 4, [20])).unwrap();
    assert_eq!(ids(&rows), vec!["c", "f"]);

    let rows = dash.select_rows(&FilterSelection::new(0, 2, [10, 20])).unwrap();
    assert_eq!(ids(&rows), vec!["a", "c", "d"]);
}

#[test]
fn test_unknown_category_filters_to_nothing() {
    let dash = dashboard();
    let rows = dash.select_rows(&FilterSelection::new(0, 4, [999])).unwrap();
    assert!(rows.is_empty());
}

#[test]
fn test_rows_without_publish_date_never_selected() {
    let mut undated = row("x", 10, "Music", (2021, 1, 1));
    undated.published_at = None;
    let mut rows = sample_rows();
    rows.push(undated);

    let dash = Dashboard::new(Dataset::from_rows(rows));
    let axis = dash.axis().unwrap();
    let selected = dash.select_rows(&FilterSelection::all(axis)).unwrap();
    assert_eq!(selected.len(), 8);
    assert!(selected.iter().all(|r| r.video_id != "x"));
}

#[test]
fn test_out_of_range_selection() {
    let dash = dashboard();
    assert_eq!(
        dash.select_rows(&FilterSelection::new(3, 1, [])).unwrap_err(),
        SelectionError::OutOfRange { lo: 3, hi: 1, max: 4 }
    );
    assert!(dash.select_rows(&FilterSelection::new(0, 5, [])).is_err());
}

#[test]
fn test_empty_dataset_selects_nothing() {
    let dash = Dashboard::new(Dataset::from_rows(Vec::new()));
    assert!(dash.axis().is_none());
    assert!(dash.categories().is_empty());
    let rows = dash.select_rows(&FilterSelection::new(0, 0, [])).unwrap();
    assert!(rows.is_empty());
}

// =============================================================================
// Derived metrics
// =============================================================================

#[test]
fn test_days_to_trend() {
    let mut r = row("a", 1, "A", (2021, 1, 1));
    assert_eq!(days_to_trend(&r), Some(2));

    r.trending_date = Some(at(2021, 1, 1) + chrono::Duration::hours(30));
    assert_eq!(days_to_trend(&r), Some(1));

    // Trending before publishing is passed through, rounded down
    r.trending_date = Some(at(2020, 12, 30) + chrono::Duration::hours(1));
    assert_eq!(days_to_trend(&r), Some(-2));

    r.trending_date = None;
    assert_eq!(days_to_trend(&r), None);
}

#[test]
fn test_category_sums_sorted_by_name() {
    let rows = sample_rows();
    let refs: Vec<&Row> = rows.iter().collect();
    let sums = category_sums(&refs);

    let names: Vec<&str> = sums.iter().map(|s| s.category.as_str()).collect();
    assert_eq!(names, vec!["Entertainment", "Gaming", "Music"]);

    let music = &sums[2];
    assert_eq!(music.rows, 3);
    assert_eq!(
        music.totals,
        Totals {
            views: 1_030_000,
            likes: 52_400,
            comments: 4_180,
            dislikes: 965,
        }
    );
}

#[test]
fn test_category_sums_conservation() {
    let dash = dashboard();
    for selection in [
        FilterSelection::new(0, 4, []),
        FilterSelection::new(1, 3, []),
        FilterSelection::new(0, 4, [10, 24]),
    ] {
        let rows = dash.select_rows(&selection).unwrap();
        let sums = category_sums(&rows);

        let regrouped = sums.iter().fold(Totals::default(), |mut acc, s| {
            acc.views += s.totals.views;
            acc.likes += s.totals.likes;
            acc.comments += s.totals.comments;
            acc.dislikes += s.totals.dislikes;
            acc
        });
        assert_eq!(regrouped, Totals::of(rows.iter().copied()));
        assert_eq!(sums.iter().map(|s| s.rows).sum::<usize>(), rows.len());
    }
}

#[test]
fn test_totals_saturate_instead_of_overflowing() {
    let rows = vec![
        row_with_counts("a", 1, "A", (2021, 1, 1), (u64::MAX, u64::MAX, u64::MAX, u64::MAX)),
        row_with_counts("b", 1, "A", (2021, 1, 2), (1, 1, 1, 1)),
    ];
    let refs: Vec<&Row> = rows.iter().collect();

    let max = Totals {
        views: u64::MAX,
        likes: u64::MAX,
        comments: u64::MAX,
        dislikes: u64::MAX,
    };
    assert_eq!(Totals::of(&rows), max);

    let sums = category_sums(&refs);
    assert_eq!(sums.len(), 1);
    assert_eq!(sums[0].rows, 2);
    assert_eq!(sums[0].totals, max);
}

#[test]
fn test_category_sums_empty() {
    assert!(category_sums(&[]).is_empty());
    assert_eq!(Totals::of(std::iter::empty()), Totals::default());
}

// =============================================================================
// Full pipeline
// =============================================================================

#[test]
fn test_update_dispatches_by_mode() {
    let dash = dashboard();
    let axis = dash.axis().unwrap();
    let selection = FilterSelection::all(axis);

    assert!(matches!(
        dash.update(VisualizationMode::ViewsToLikes, &selection).map(|u| u.chart),
        Ok(ChartSpec::Scatter(_))
    ));
    assert!(matches!(
        dash.update(VisualizationMode::EngagementPerCategory, &selection)
            .map(|u| u.chart),
        Ok(ChartSpec::GroupedBars(_))
    ));
    assert!(matches!(
        dash.update(VisualizationMode::LikesVsDislikes, &selection).map(|u| u.chart),
        Ok(ChartSpec::DivergingBars(_))
    ));
    assert!(matches!(
        dash.update(VisualizationMode::TopChannels, &selection).map(|u| u.chart),
        Ok(ChartSpec::Sunburst(_))
    ));
    assert_eq!(
        dash.update(VisualizationMode::TopChannels, &selection)
            .unwrap()
            .matched_rows,
        8
    );
}

#[test]
fn test_update_is_idempotent() {
    let dash = dashboard();
    let selection = FilterSelection::new(1, 4, [10, 24]);
    for mode in VisualizationMode::ALL {
        let first = dash.update(mode, &selection).unwrap();
        let second = dash.update(mode, &selection).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first.chart).unwrap(),
            serde_json::to_string(&second.chart).unwrap()
        );
    }
}

#[test]
fn test_update_does_not_touch_dataset() {
    let dash = dashboard();
    let before = dash.dataset().rows().to_vec();
    for mode in VisualizationMode::ALL {
        dash.update(mode, &FilterSelection::new(0, 4, [20])).unwrap();
    }
    assert_eq!(dash.dataset().rows(), before.as_slice());
}

#[test]
fn test_zero_row_selection_gives_empty_charts() {
    let dash = dashboard();
    let selection = FilterSelection::new(0, 4, BTreeSet::from([12345]));
    for mode in VisualizationMode::ALL {
        let update = dash.update(mode, &selection).unwrap();
        assert_eq!(update.matched_rows, 0);
        assert!(update.chart.is_empty(), "{} should be empty", mode);
    }
}

#[test]
fn test_dashboard_is_shareable() {
    fn assert_sync<T: Send + Sync>() {}
    assert_sync::<Dashboard>();
}

