use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// CropAggregate — Count and mean price for one crop
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropAggregate {
    pub crop_key: String,
    pub count: usize,
    /// Full-precision arithmetic mean.
    pub average: f64,
}

impl CropAggregate {
    /// The mean rounded to two decimal places, for display.
    pub fn rounded_average(&self) -> f64 {
        round2(self.average)
    }
}

// ---------------------------------------------------------------------------
// DailyPoint — Mean price of one UTC calendar day
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPoint {
    /// Serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub value: f64,
}

impl DailyPoint {
    pub fn label(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn rounded_value(&self) -> f64 {
        round2(self.value)
    }
}

// ---------------------------------------------------------------------------
// AggregateView — Everything derived from one snapshot
// ---------------------------------------------------------------------------

/// Output of one aggregation pass.
///
/// `average` is `None` when no crop is selected or the selected crop has no
/// reports; it is never a stand-in zero. `series` is empty in the same cases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateView {
    pub crop_keys: Vec<String>,
    pub selected: Option<String>,
    pub total_reports: usize,
    pub average: Option<CropAggregate>,
    pub series: Vec<DailyPoint>,
}

impl AggregateView {
    pub fn has_data(&self) -> bool {
        self.average.is_some()
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
