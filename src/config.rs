use std::path::PathBuf;

/// Storage key holding the serialized list of price reports.
pub const STORAGE_PRICES: &str = "agri_prices_v1";
/// Storage key holding the serialized list of listings.
pub const STORAGE_LISTINGS: &str = "agri_listings_v1";

pub const CURRENCY: &str = "ETB";
pub const PRICE_UNIT: &str = "ETB/kg";
pub const QUANTITY_UNIT: &str = "kg";

/// Market label used when a report is submitted without one.
pub const UNKNOWN_MARKET: &str = "Unknown";

/// Placeholder shown wherever a value has no data behind it.
pub const NO_DATA: &str = "\u{2014}";

/// Suggestions offered before any crop has been reported.
pub const COMMON_CROPS: &[&str] = &[
    "Maize", "Teff", "Wheat", "Barley", "Coffee", "Sesame", "Chickpea", "Lentil",
];

// Transport estimator
pub const DEFAULT_RATE_PER_KM: f64 = 5.0;
pub const WEIGHT_SURCHARGE_THRESHOLD_KG: f64 = 1000.0;
pub const WEIGHT_SURCHARGE_STEP_KG: f64 = 500.0;
pub const WEIGHT_SURCHARGE_PER_STEP: f64 = 200.0;
pub const LONG_DISTANCE_THRESHOLD_KM: f64 = 100.0;
pub const LONG_DISTANCE_MULTIPLIER: f64 = 1.1;

pub const CSV_HEADER: &[&str] = &["ID", "Crop", "Price (ETB/kg)", "Market", "Note", "Timestamp"];

pub fn default_data_dir() -> PathBuf {
    if let Some(data) = dirs::data_dir() {
        data.join("agrimarket")
    } else {
        PathBuf::from(".agrimarket-data")
    }
}
