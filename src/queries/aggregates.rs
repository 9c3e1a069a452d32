//! Per-crop aggregates computed from a fresh snapshot on every call.

use crate::engine;
use crate::error::{AgriMarketError, Result};
use crate::models::{AggregateView, CropAggregate, DailyPoint};
use crate::presentation;
use crate::store::RecordStore;
use crate::validation::normalize_crop_key;

// ---------------------------------------------------------------------------
// AggregateQuery
// ---------------------------------------------------------------------------

/// Query interface over the aggregation engine.
///
/// Each method loads the current price reports and hands the snapshot to the
/// engine; nothing is cached between calls.
pub struct AggregateQuery<'a> {
    store: &'a RecordStore,
}

impl<'a> AggregateQuery<'a> {
    /// Create a new `AggregateQuery` bound to the given store.
    pub fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    /// Distinct crop keys, ascending.
    pub fn crop_keys(&self) -> Vec<String> {
        engine::crop_keys(&self.store.load_prices())
    }

    pub fn average(&self, crop: &str) -> Option<CropAggregate> {
        engine::crop_average(&self.store.load_prices(), &normalize_crop_key(crop))
    }

    /// Daily averages for a crop, oldest day first.
    pub fn series(&self, crop: &str) -> Vec<DailyPoint> {
        let reports = self.store.load_prices();
        let key = normalize_crop_key(crop);
        engine::daily_series(engine::reports_for(&reports, &key))
    }

    /// Crop keys, average and series for the selected crop in one pass.
    pub fn view(&self, selected: Option<&str>) -> AggregateView {
        engine::aggregate(&self.store.load_prices(), selected)
    }

    /// Shareable summary of the selected crop's average.
    pub fn share_text(&self, selected: Option<&str>) -> Result<String> {
        presentation::share_average_text(&self.view(selected)).ok_or_else(|| {
            AgriMarketError::InvalidArgument(
                "select a crop to share its average price".to_string(),
            )
        })
    }
}
