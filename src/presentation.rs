//! Formatting of engine output and records for display.
//!
//! Nothing here computes aggregates; it only turns values into text, select
//! options, chart series and export rows. The no-data marker is always
//! rendered as a placeholder, never as a zero price.

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

use crate::config;
use crate::models::aggregate::round2;
use crate::models::{AggregateView, CropAggregate, Listing, PriceReport};

/// One entry of the crop selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Labeled series handed to a chart renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub series_name: String,
    /// `YYYY-MM-DD` dates, ascending.
    pub labels: Vec<String>,
    /// Daily means with two decimals, aligned with `labels`.
    pub values: Vec<String>,
}

/// Upper-case the first character.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `"12.50 ETB/kg"`
///
/// Halfway cases round away from zero, the same as
/// [`CropAggregate::rounded_average`].
pub fn format_price(value: f64) -> String {
    format!("{} {}", two_decimals(value), config::PRICE_UNIT)
}

/// Average for display, or the placeholder when there is no data.
pub fn format_average(average: Option<&CropAggregate>) -> String {
    match average {
        Some(agg) => format_price(agg.average),
        None => config::NO_DATA.to_string(),
    }
}

/// Quantities print without a trailing `.0` (`100`, `12.5`).
pub fn format_quantity(quantity: f64) -> String {
    format!("{}", quantity)
}

pub fn format_cost(cost: f64) -> String {
    format!("{} {}", two_decimals(cost), config::CURRENCY)
}

fn two_decimals(value: f64) -> String {
    format!("{:.2}", round2(value))
}

pub fn crop_options(crop_keys: &[String]) -> Vec<SelectOption> {
    crop_keys
        .iter()
        .map(|key| SelectOption {
            value: key.clone(),
            label: capitalize(key),
        })
        .collect()
}

/// Chart input for the selected crop, or `None` when there is nothing to plot
/// and the renderer should show its empty state.
pub fn chart_series(view: &AggregateView) -> Option<ChartSeries> {
    if view.series.is_empty() {
        return None;
    }
    let series_name = view
        .selected
        .as_deref()
        .map(capitalize)
        .unwrap_or_else(|| "Average Price".to_string());

    Some(ChartSeries {
        series_name,
        labels: view.series.iter().map(|p| p.label()).collect(),
        values: view.series.iter().map(|p| two_decimals(p.value)).collect(),
    })
}

/// Text for sharing the selected crop's average, or `None` without a selection.
pub fn share_average_text(view: &AggregateView) -> Option<String> {
    let crop = view.selected.as_deref()?;
    let count = view.average.as_ref().map(|a| a.count).unwrap_or(0);
    Some(format!(
        "Average price for {}: {} (based on {} local reports).",
        capitalize(crop),
        format_average(view.average.as_ref()),
        count
    ))
}

/// Message a buyer can paste into SMS or WhatsApp.
pub fn contact_message(listing: &Listing) -> String {
    format!(
        "Hello, I saw your listing for {}{} of {} at {} {}. I'm interested. Contact: (your phone).",
        format_quantity(listing.quantity),
        config::QUANTITY_UNIT,
        listing.crop_display,
        listing.ask_price,
        config::PRICE_UNIT
    )
}

pub fn listing_summary(listing: &Listing) -> String {
    let posted = listing
        .posted_at()
        .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_default();
    format!(
        "#{} {} ({}) {} {}\n    Asking: {} \u{2014} Contact: {}",
        listing.id,
        listing.crop_display,
        posted,
        format_quantity(listing.quantity),
        config::QUANTITY_UNIT,
        format_price(listing.ask_price),
        listing.contact
    )
}

pub fn report_summary(report: &PriceReport) -> String {
    let recorded = report
        .recorded_at()
        .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_default();
    let mut line = format!(
        "#{} {} {} @ {} ({})",
        report.id,
        recorded,
        report.crop_display,
        format_price(report.price),
        report.market
    );
    if !report.note.is_empty() {
        line.push_str(&format!(" \u{2014} {}", report.note));
    }
    line
}

// ---------------------------------------------------------------------------
// CSV export
// ---------------------------------------------------------------------------

/// Render reports as CSV with every cell quoted.
///
/// Timestamps are ISO-8601 UTC with millisecond precision.
pub fn reports_to_csv(reports: &[PriceReport]) -> String {
    let mut rows: Vec<String> = Vec::with_capacity(reports.len() + 1);
    rows.push(csv_row(config::CSV_HEADER.iter().map(|h| h.to_string())));

    for report in reports {
        let ts = report
            .recorded_at()
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
            .unwrap_or_default();
        rows.push(csv_row([
            report.id.to_string(),
            report.crop_display.clone(),
            report.price.to_string(),
            report.market.clone(),
            report.note.clone(),
            ts,
        ]));
    }

    rows.join("\n")
}

fn csv_row<I: IntoIterator<Item = String>>(cells: I) -> String {
    cells
        .into_iter()
        .map(|v| format!("\"{}\"", v.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(",")
}
