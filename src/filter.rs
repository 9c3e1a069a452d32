//! In-memory report filter with chained construction.
//!
//! Builder methods return `&mut Self` for chaining. The filter never mutates
//! the snapshot it is applied to; it returns a new, ordered selection.
//!
//! # Example
//!
//! ```rust
//! use agrimarket::ReportFilter;
//! use chrono::NaiveDate;
//!
//! let mut filter = ReportFilter::new();
//! filter
//!     .crop("Maize")
//!     .date_from(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
//!     .newest_first()
//!     .limit(10);
//! assert!(filter.apply(&[]).is_empty());
//! ```

use chrono::NaiveDate;

use crate::models::PriceReport;
use crate::validation::normalize_crop_key;

/// Selects, orders and windows price reports.
///
/// All conditions are ANDed. Dates are inclusive UTC calendar dates.
#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    crop_key: Option<String>,
    market_like: Option<String>,
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
    newest_first: bool,
    limit_val: Option<usize>,
    offset_val: usize,
}

impl ReportFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only reports for this crop (normalized like a crop key).
    pub fn crop(&mut self, crop: &str) -> &mut Self {
        self.crop_key = Some(normalize_crop_key(crop));
        self
    }

    /// Keep only reports whose market contains `market`, case-insensitively.
    pub fn market_like(&mut self, market: &str) -> &mut Self {
        self.market_like = Some(market.trim().to_lowercase());
        self
    }

    /// Keep reports recorded on or after this UTC date.
    pub fn date_from(&mut self, date: NaiveDate) -> &mut Self {
        self.date_from = Some(date);
        self
    }

    /// Keep reports recorded on or before this UTC date.
    pub fn date_to(&mut self, date: NaiveDate) -> &mut Self {
        self.date_to = Some(date);
        self
    }

    /// Order by descending timestamp instead of the default ascending order.
    pub fn newest_first(&mut self) -> &mut Self {
        self.newest_first = true;
        self
    }

    /// Set the maximum number of reports to return.
    pub fn limit(&mut self, n: usize) -> &mut Self {
        self.limit_val = Some(n);
        self
    }

    /// Set the number of reports to skip after ordering.
    pub fn offset(&mut self, n: usize) -> &mut Self {
        self.offset_val = n;
        self
    }

    /// Whether a single report satisfies every condition.
    pub fn matches(&self, report: &PriceReport) -> bool {
        if let Some(key) = &self.crop_key {
            if &report.crop_key != key {
                return false;
            }
        }
        if let Some(market) = &self.market_like {
            if !report.market.to_lowercase().contains(market.as_str()) {
                return false;
            }
        }
        if self.date_from.is_some() || self.date_to.is_some() {
            let Some(date) = report.date() else {
                return false;
            };
            if self.date_from.is_some_and(|from| date < from) {
                return false;
            }
            if self.date_to.is_some_and(|to| date > to) {
                return false;
            }
        }
        true
    }

    /// Apply the filter, ordering and window to a snapshot.
    ///
    /// Ties on timestamp are broken by id so the order is fully deterministic.
    pub fn apply(&self, reports: &[PriceReport]) -> Vec<PriceReport> {
        let mut selected: Vec<PriceReport> = reports
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect();

        selected.sort_by_key(|r| (r.timestamp, r.id));
        if self.newest_first {
            selected.reverse();
        }

        selected
            .into_iter()
            .skip(self.offset_val)
            .take(self.limit_val.unwrap_or(usize::MAX))
            .collect()
    }
}
