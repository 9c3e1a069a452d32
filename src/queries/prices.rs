//! Price report submission, lookup and export.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::engine;
use crate::error::{AgriMarketError, Result};
use crate::filter::ReportFilter;
use crate::models::{PriceReport, PriceTrend};
use crate::presentation;
use crate::store::{next_id, RecordStore};
use crate::validation::{normalize_crop_key, PriceReportForm};

// ---------------------------------------------------------------------------
// PriceQuery
// ---------------------------------------------------------------------------

/// Query interface for crop price reports.
pub struct PriceQuery<'a> {
    store: &'a RecordStore,
}

impl<'a> PriceQuery<'a> {
    /// Create a new `PriceQuery` bound to the given store.
    pub fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    /// Validate and record a price report stamped with the current time.
    pub fn submit(&self, form: &PriceReportForm) -> Result<PriceReport> {
        self.submit_at(form, Utc::now())
    }

    /// Validate and record a price report stamped with `at`.
    ///
    /// Nothing is written when validation fails.
    pub fn submit_at(&self, form: &PriceReportForm, at: DateTime<Utc>) -> Result<PriceReport> {
        let valid = form.validate()?;

        let mut reports = self.store.load_prices();
        let timestamp = at.timestamp_millis();
        let id = next_id(reports.iter().map(|r| r.id), timestamp);
        let report = PriceReport::new(id, timestamp, valid);

        reports.push(report.clone());
        self.store.save_prices(&reports)?;

        tracing::info!(
            id,
            crop = %report.crop_key,
            price = report.price,
            market = %report.market,
            "price report submitted"
        );
        Ok(report)
    }

    /// Every stored report, in insertion order.
    pub fn all(&self) -> Vec<PriceReport> {
        self.store.load_prices()
    }

    pub fn count(&self) -> usize {
        self.store.load_prices().len()
    }

    /// Reports for one crop, oldest first.
    pub fn for_crop(&self, crop: &str) -> Vec<PriceReport> {
        let mut filter = ReportFilter::new();
        filter.crop(crop);
        filter.apply(&self.store.load_prices())
    }

    pub fn search(&self, filter: &ReportFilter) -> Vec<PriceReport> {
        filter.apply(&self.store.load_prices())
    }

    /// Remove a report by id. Returns `false` if no report had that id.
    pub fn remove(&self, id: i64) -> Result<bool> {
        let mut reports = self.store.load_prices();
        let before = reports.len();
        reports.retain(|r| r.id != id);
        if reports.len() == before {
            return Ok(false);
        }
        self.store.save_prices(&reports)?;
        tracing::info!(id, "price report removed");
        Ok(true)
    }

    /// Delete all price reports.
    pub fn clear(&self) -> Result<()> {
        self.store.clear_prices()?;
        tracing::info!("all price reports cleared");
        Ok(())
    }

    /// All reports as CSV text.
    ///
    /// Fails with `NotFound` when there is nothing to export.
    pub fn export_csv(&self) -> Result<String> {
        let reports = self.exportable()?;
        Ok(presentation::reports_to_csv(&reports))
    }

    /// Write the CSV export to `path` and return the number of reports written.
    pub fn export_csv_to<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let reports = self.exportable()?;
        fs::write(path.as_ref(), presentation::reports_to_csv(&reports))?;
        tracing::info!(path = %path.as_ref().display(), rows = reports.len(), "price reports exported");
        Ok(reports.len())
    }

    fn exportable(&self) -> Result<Vec<PriceReport>> {
        let reports = self.store.load_prices();
        if reports.is_empty() {
            return Err(AgriMarketError::NotFound("no reports to export".to_string()));
        }
        Ok(reports)
    }

    /// Min/max/mean and date range for a crop.
    pub fn trend(&self, crop: &str) -> Option<PriceTrend> {
        engine::price_trend(&self.store.load_prices(), &normalize_crop_key(crop))
    }
}
