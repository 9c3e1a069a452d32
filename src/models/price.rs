use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::ValidPriceReport;

// ---------------------------------------------------------------------------
// PriceReport — One observed price at one point in time
// ---------------------------------------------------------------------------

/// A single price observation.
///
/// Field names on disk follow the browser app's storage layout (`crop`, `ts`), so
/// exported data from earlier versions loads unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceReport {
    pub id: i64,
    /// Normalized (trimmed, lowercased) crop identifier used for grouping.
    #[serde(rename = "crop")]
    pub crop_key: String,
    pub crop_display: String,
    /// Price in ETB/kg.
    pub price: f64,
    pub market: String,
    #[serde(default)]
    pub note: String,
    /// Creation instant in milliseconds since the Unix epoch.
    #[serde(rename = "ts")]
    pub timestamp: i64,
}

impl PriceReport {
    /// Build a report from an already validated form.
    pub fn new(id: i64, timestamp: i64, valid: ValidPriceReport) -> Self {
        Self {
            id,
            crop_key: valid.crop_key,
            crop_display: valid.crop_display,
            price: valid.price,
            market: valid.market,
            note: valid.note,
            timestamp,
        }
    }

    /// The creation instant, or `None` if the stored timestamp is outside the
    /// representable calendar range.
    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }

    /// UTC calendar date of the report (time of day discarded).
    pub fn date(&self) -> Option<NaiveDate> {
        self.recorded_at().map(|dt| dt.date_naive())
    }
}

// ---------------------------------------------------------------------------
// PriceTrend — Aggregated price trend data for one crop
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PriceTrend {
    pub crop_key: String,
    pub min_price: f64,
    pub max_price: f64,
    pub avg_price: f64,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub data_points: usize,
}
