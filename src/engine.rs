//! Aggregation and time-series derivation over a snapshot of price reports.
//!
//! Every function here is pure: it takes a borrowed snapshot, never touches
//! the record store, and returns freshly computed values. Dates are always
//! bucketed in UTC regardless of the host time zone.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::models::{AggregateView, CropAggregate, DailyPoint, PriceReport, PriceTrend};
use crate::validation::normalize_crop_key;

/// Distinct crop keys present in the snapshot, ascending, without duplicates.
pub fn crop_keys(reports: &[PriceReport]) -> Vec<String> {
    reports
        .iter()
        .map(|r| r.crop_key.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Reports whose crop key equals `crop_key`.
pub fn reports_for<'a>(
    reports: &'a [PriceReport],
    crop_key: &'a str,
) -> impl Iterator<Item = &'a PriceReport> + 'a {
    reports.iter().filter(move |r| r.crop_key == crop_key)
}

/// Mean price of the reports for `crop_key`, or `None` when there are none.
pub fn crop_average(reports: &[PriceReport], crop_key: &str) -> Option<CropAggregate> {
    let prices: Vec<f64> = reports_for(reports, crop_key).map(|r| r.price).collect();
    let average = mean(prices)?;
    Some(CropAggregate {
        crop_key: crop_key.to_string(),
        count: reports_for(reports, crop_key).count(),
        average,
    })
}

/// Group already filtered reports by UTC calendar date and average each day.
///
/// The result is ordered by ascending date. An empty input gives an empty
/// series. Reports whose timestamp cannot be placed on a calendar are skipped.
pub fn daily_series<'a, I>(reports: I) -> Vec<DailyPoint>
where
    I: IntoIterator<Item = &'a PriceReport>,
{
    let mut buckets: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
    for report in reports {
        if let Some(date) = report.date() {
            buckets.entry(date).or_default().push(report.price);
        }
    }

    buckets
        .into_iter()
        .filter_map(|(date, prices)| mean(prices).map(|value| DailyPoint { date, value }))
        .collect()
}

/// Derive crop keys, the selected crop's average and its daily series.
///
/// The selection is normalized the same way crop keys are; a blank selection
/// counts as no selection.
pub fn aggregate(reports: &[PriceReport], selected: Option<&str>) -> AggregateView {
    let crop_keys = crop_keys(reports);
    let selected = selected
        .map(normalize_crop_key)
        .filter(|key| !key.is_empty());

    let (average, series) = match selected.as_deref() {
        Some(key) => match crop_average(reports, key) {
            Some(avg) => (Some(avg), daily_series(reports_for(reports, key))),
            None => (None, Vec::new()),
        },
        None => (None, Vec::new()),
    };

    tracing::debug!(
        total = reports.len(),
        crops = crop_keys.len(),
        selected = selected.as_deref().unwrap_or(""),
        points = series.len(),
        "aggregate computed"
    );

    AggregateView {
        crop_keys,
        selected,
        total_reports: reports.len(),
        average,
        series,
    }
}

/// Min/max/mean and date range for one crop, or `None` without reports.
pub fn price_trend(reports: &[PriceReport], crop_key: &str) -> Option<PriceTrend> {
    let matching: Vec<&PriceReport> = reports_for(reports, crop_key).collect();
    let avg_price = mean(matching.iter().map(|r| r.price).collect())?;

    let min_price = matching.iter().map(|r| r.price).fold(f64::INFINITY, f64::min);
    let max_price = matching
        .iter()
        .map(|r| r.price)
        .fold(f64::NEG_INFINITY, f64::max);
    let dates = matching.iter().filter_map(|r| r.date());

    Some(PriceTrend {
        crop_key: crop_key.to_string(),
        min_price,
        max_price,
        avg_price,
        first_date: dates.clone().min(),
        last_date: dates.max(),
        data_points: matching.len(),
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Arithmetic mean, summed in ascending order so the result does not depend
/// on the order the snapshot arrived in.
fn mean(mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let sum: f64 = values.iter().sum();
    Some(sum / values.len() as f64)
}
