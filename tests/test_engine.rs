//! Aggregation engine tests over hand-built snapshots.

mod common;

use agrimarket::engine;
use agrimarket::PriceReport;
use chrono::NaiveDate;
use common::{ms, report};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ---------------------------------------------------------------------------
// crop_keys
// ---------------------------------------------------------------------------

#[test]
fn crop_keys_are_sorted_and_distinct() {
    let reports = vec![
        report(1, "teff", 90.0, ms(2024, 1, 1, 8, 0)),
        report(2, "Maize", 10.0, ms(2024, 1, 1, 9, 0)),
        report(3, "coffee", 50.0, ms(2024, 1, 2, 9, 0)),
        report(4, "maize", 12.0, ms(2024, 1, 3, 9, 0)),
        report(5, "teff", 95.0, ms(2024, 1, 3, 10, 0)),
    ];

    assert_eq!(engine::crop_keys(&reports), vec!["coffee", "maize", "teff"]);
}

#[test]
fn crop_keys_empty_for_empty_snapshot() {
    assert!(engine::crop_keys(&[]).is_empty());
}

#[test]
fn crop_keys_are_stable_across_calls_and_orderings() {
    let mut reports = vec![
        report(1, "wheat", 30.0, ms(2024, 1, 1, 8, 0)),
        report(2, "barley", 25.0, ms(2024, 1, 1, 9, 0)),
        report(3, "sesame", 140.0, ms(2024, 1, 2, 9, 0)),
    ];
    let first = engine::crop_keys(&reports);
    assert_eq!(first, engine::crop_keys(&reports));

    reports.reverse();
    assert_eq!(first, engine::crop_keys(&reports));
}

// ---------------------------------------------------------------------------
// crop_average
// ---------------------------------------------------------------------------

#[test]
fn average_is_sum_over_count() {
    let reports = vec![
        report(1, "maize", 10.0, ms(2024, 1, 1, 8, 0)),
        report(2, "maize", 15.0, ms(2024, 1, 2, 8, 0)),
        report(3, "teff", 100.0, ms(2024, 1, 2, 8, 0)),
        report(4, "maize", 20.0, ms(2024, 1, 3, 8, 0)),
    ];

    let avg = engine::crop_average(&reports, "maize").unwrap();
    assert_eq!(avg.crop_key, "maize");
    assert_eq!(avg.count, 3);
    assert!(close(avg.average, 15.0));
}

#[test]
fn average_is_none_not_zero_without_matches() {
    let reports = vec![report(1, "teff", 90.0, ms(2024, 1, 1, 8, 0))];
    assert!(engine::crop_average(&reports, "maize").is_none());
    assert!(engine::crop_average(&[], "maize").is_none());
}

#[test]
fn adding_a_report_shifts_average_by_its_contribution() {
    let mut reports = vec![
        report(1, "maize", 10.0, ms(2024, 1, 1, 8, 0)),
        report(2, "maize", 20.0, ms(2024, 1, 1, 9, 0)),
    ];
    let old = engine::crop_average(&reports, "maize").unwrap();

    reports.push(report(3, "maize", 40.0, ms(2024, 1, 2, 9, 0)));
    let new = engine::crop_average(&reports, "maize").unwrap();

    let expected = (old.average * old.count as f64 + 40.0) / (old.count + 1) as f64;
    assert_eq!(new.count, old.count + 1);
    assert!(close(new.average, expected));
}

#[test]
fn average_does_not_depend_on_input_order() {
    let mut reports: Vec<PriceReport> = [0.1, 0.7, 0.2, 1e6, 0.3, 3.3]
        .iter()
        .enumerate()
        .map(|(i, p)| report(i as i64, "coffee", *p, ms(2024, 2, 1, i as u32, 0)))
        .collect();
    let forward = engine::crop_average(&reports, "coffee").unwrap();

    reports.reverse();
    let backward = engine::crop_average(&reports, "coffee").unwrap();

    assert_eq!(forward.average.to_bits(), backward.average.to_bits());
}

#[test]
fn rounded_average_keeps_two_decimals() {
    let reports = vec![
        report(1, "lentil", 10.0, ms(2024, 1, 1, 8, 0)),
        report(2, "lentil", 10.0, ms(2024, 1, 1, 9, 0)),
        report(3, "lentil", 11.0, ms(2024, 1, 1, 10, 0)),
    ];
    let avg = engine::crop_average(&reports, "lentil").unwrap();
    assert!(close(avg.average, 31.0 / 3.0));
    assert_eq!(avg.rounded_average(), 10.33);
}

// ---------------------------------------------------------------------------
// daily_series
// ---------------------------------------------------------------------------

#[test]
fn same_day_reports_share_one_bucket() {
    let reports = vec![
        report(1, "maize", 10.0, ms(2024, 3, 5, 0, 1)),
        report(2, "maize", 14.0, ms(2024, 3, 5, 23, 59)),
    ];

    let series = engine::daily_series(&reports);
    assert_eq!(series.len(), 1);
    assert_eq!(series[0].date, date(2024, 3, 5));
    assert!(close(series[0].value, 12.0));
}

#[test]
fn single_report_day_yields_its_price() {
    let reports = vec![report(1, "maize", 17.25, ms(2024, 3, 5, 12, 0))];
    let series = engine::daily_series(&reports);
    assert_eq!(series.len(), 1);
    assert_eq!(series[0].value, 17.25);
}

#[test]
fn series_is_sorted_by_date_regardless_of_input_order() {
    let reports = vec![
        report(1, "maize", 30.0, ms(2024, 3, 7, 8, 0)),
        report(2, "maize", 10.0, ms(2023, 12, 31, 8, 0)),
        report(3, "maize", 20.0, ms(2024, 3, 5, 8, 0)),
    ];

    let dates: Vec<String> = engine::daily_series(&reports)
        .iter()
        .map(|p| p.label())
        .collect();
    assert_eq!(dates, vec!["2023-12-31", "2024-03-05", "2024-03-07"]);
}

#[test]
fn empty_input_gives_empty_series() {
    let reports: Vec<PriceReport> = Vec::new();
    assert!(engine::daily_series(&reports).is_empty());
}

#[test]
fn unrepresentable_timestamp_is_left_out_of_series_only() {
    let reports = vec![
        report(1, "maize", 10.0, ms(2024, 3, 5, 8, 0)),
        report(2, "maize", 30.0, i64::MAX),
    ];

    let series = engine::daily_series(&reports);
    assert_eq!(series.len(), 1);
    assert_eq!(series[0].value, 10.0);

    let avg = engine::crop_average(&reports, "maize").unwrap();
    assert_eq!(avg.count, 2);
    assert!(close(avg.average, 20.0));
}

// ---------------------------------------------------------------------------
// aggregate
// ---------------------------------------------------------------------------

#[test]
fn scenario_a_daily_means_and_overall_average() {
    let reports = vec![
        report(1, "maize", 10.0, ms(2024, 5, 1, 8, 0)),
        report(2, "maize", 20.0, ms(2024, 5, 1, 16, 30)),
        report(3, "maize", 30.0, ms(2024, 5, 2, 9, 0)),
    ];

    let view = engine::aggregate(&reports, Some("maize"));
    assert_eq!(view.crop_keys, vec!["maize"]);
    assert_eq!(view.selected.as_deref(), Some("maize"));
    assert_eq!(view.total_reports, 3);

    let avg = view.average.as_ref().unwrap();
    assert_eq!(avg.rounded_average(), 20.0);
    assert_eq!(view.series.len(), 2);
    assert_eq!(view.series[0].date, date(2024, 5, 1));
    assert_eq!(view.series[0].rounded_value(), 15.0);
    assert_eq!(view.series[1].date, date(2024, 5, 2));
    assert_eq!(view.series[1].rounded_value(), 30.0);
}

#[test]
fn scenario_b_empty_snapshot() {
    let view = engine::aggregate(&[], Some("maize"));
    assert!(view.crop_keys.is_empty());
    assert!(view.average.is_none());
    assert!(view.series.is_empty());
    assert_eq!(view.total_reports, 0);
}

#[test]
fn scenario_c_unknown_crop_still_lists_known_crops() {
    let reports = vec![
        report(1, "teff", 90.0, ms(2024, 5, 1, 8, 0)),
        report(2, "teff", 92.0, ms(2024, 5, 2, 8, 0)),
    ];

    let view = engine::aggregate(&reports, Some("maize"));
    assert_eq!(view.crop_keys, vec!["teff"]);
    assert!(view.average.is_none());
    assert!(view.series.is_empty());
    assert!(!view.has_data());
}

#[test]
fn scenario_d_utc_date_splits_late_night_reports() {
    let reports = vec![
        report(1, "coffee", 50.0, ms(2024, 1, 1, 23, 0)),
        report(2, "coffee", 60.0, ms(2024, 1, 2, 1, 0)),
    ];

    let view = engine::aggregate(&reports, Some("coffee"));
    assert_eq!(view.series.len(), 2);
    assert_eq!(view.series[0].label(), "2024-01-01");
    assert_eq!(view.series[0].value, 50.0);
    assert_eq!(view.series[1].label(), "2024-01-02");
    assert_eq!(view.series[1].value, 60.0);
    assert!(close(view.average.unwrap().average, 55.0));
}

#[test]
fn no_selection_lists_keys_only() {
    let reports = vec![report(1, "teff", 90.0, ms(2024, 5, 1, 8, 0))];

    for selected in [None, Some(""), Some("   ")] {
        let view = engine::aggregate(&reports, selected);
        assert_eq!(view.crop_keys, vec!["teff"]);
        assert!(view.selected.is_none());
        assert!(view.average.is_none());
        assert!(view.series.is_empty());
    }
}

#[test]
fn selection_is_normalized_like_crop_keys() {
    let reports = vec![report(1, "teff", 90.0, ms(2024, 5, 1, 8, 0))];
    let view = engine::aggregate(&reports, Some("  Teff "));
    assert_eq!(view.selected.as_deref(), Some("teff"));
    assert_eq!(view.average.unwrap().count, 1);
}

#[test]
fn aggregate_is_idempotent() {
    let reports = vec![
        report(1, "maize", 10.5, ms(2024, 5, 1, 8, 0)),
        report(2, "teff", 91.0, ms(2024, 5, 1, 9, 0)),
        report(3, "maize", 11.25, ms(2024, 5, 3, 9, 0)),
    ];
    assert_eq!(
        engine::aggregate(&reports, Some("maize")),
        engine::aggregate(&reports, Some("maize"))
    );
}

#[test]
fn aggregate_view_serializes_no_data_as_null() {
    let view = engine::aggregate(&[], None);
    let json = serde_json::to_value(&view).unwrap();
    assert!(json["average"].is_null());
    assert_eq!(json["series"], serde_json::json!([]));
}

#[test]
fn daily_points_serialize_dates_as_iso_strings() {
    let reports = vec![report(1, "maize", 10.0, ms(2024, 5, 1, 8, 0))];
    let view = engine::aggregate(&reports, Some("maize"));
    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["series"][0]["date"], "2024-05-01");
    assert_eq!(json["series"][0]["value"], 10.0);
}

// ---------------------------------------------------------------------------
// price_trend
// ---------------------------------------------------------------------------

#[test]
fn price_trend_summarizes_one_crop() {
    let reports = vec![
        report(1, "sesame", 140.0, ms(2024, 2, 10, 8, 0)),
        report(2, "sesame", 120.0, ms(2024, 1, 5, 8, 0)),
        report(3, "teff", 90.0, ms(2023, 1, 1, 8, 0)),
        report(4, "sesame", 160.0, ms(2024, 3, 1, 8, 0)),
    ];

    let trend = engine::price_trend(&reports, "sesame").unwrap();
    assert_eq!(trend.data_points, 3);
    assert_eq!(trend.min_price, 120.0);
    assert_eq!(trend.max_price, 160.0);
    assert!(close(trend.avg_price, 140.0));
    assert_eq!(trend.first_date, Some(date(2024, 1, 5)));
    assert_eq!(trend.last_date, Some(date(2024, 3, 1)));
}

#[test]
fn price_trend_none_for_unknown_crop() {
    let reports = vec![report(1, "teff", 90.0, ms(2024, 1, 1, 8, 0))];
    assert!(engine::price_trend(&reports, "maize").is_none());
}
