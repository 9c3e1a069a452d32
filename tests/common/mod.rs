//! Shared test fixtures for the AgriMarket integration tests.
//!
//! Provides in-memory and file-backed contexts plus helpers for building
//! price reports at fixed UTC instants.

use agrimarket::{AgriMarket, PriceReport, PriceReportForm};
use chrono::{DateTime, TimeZone, Utc};

/// A context whose records live only in memory.
pub fn memory_market() -> AgriMarket {
    AgriMarket::builder().in_memory().build().unwrap()
}

/// Create an `AgriMarket` backed by a temporary data directory.
///
/// Returns `(AgriMarket, tempfile::TempDir)`. The caller must keep the
/// `TempDir` alive for the duration of the test so the directory is not
/// deleted prematurely.
pub fn file_market() -> (AgriMarket, tempfile::TempDir) {
    let tmp_dir = tempfile::tempdir().unwrap();
    let market = AgriMarket::builder().data_dir(tmp_dir.path()).build().unwrap();
    (market, tmp_dir)
}

/// A fixed UTC instant.
pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0).unwrap()
}

/// Milliseconds since the epoch for a fixed UTC instant.
pub fn ms(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> i64 {
    utc(year, month, day, hour, minute).timestamp_millis()
}

/// Build a report directly, bypassing the store.
pub fn report(id: i64, crop: &str, price: f64, timestamp: i64) -> PriceReport {
    PriceReport {
        id,
        crop_key: crop.trim().to_lowercase(),
        crop_display: crop.trim().to_string(),
        price,
        market: "Merkato".to_string(),
        note: String::new(),
        timestamp,
    }
}

/// Submit `(crop, price, instant)` rows through the public API.
pub fn seed(market: &AgriMarket, rows: &[(&str, &str, DateTime<Utc>)]) {
    for (crop, price, at) in rows {
        market
            .prices()
            .submit_at(&PriceReportForm::new(crop, price), *at)
            .unwrap();
    }
}
