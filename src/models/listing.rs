use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::ValidListing;

// ---------------------------------------------------------------------------
// Listing — An open offer to sell produce
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: i64,
    /// Crop name as entered (trimmed, not normalized).
    #[serde(rename = "crop")]
    pub crop_display: String,
    /// Quantity on offer in kg.
    #[serde(rename = "qty")]
    pub quantity: f64,
    pub contact: String,
    /// Asking price in ETB/kg.
    #[serde(rename = "price")]
    pub ask_price: f64,
    #[serde(rename = "ts")]
    pub timestamp: i64,
}

impl Listing {
    pub fn new(id: i64, timestamp: i64, valid: ValidListing) -> Self {
        Self {
            id,
            crop_display: valid.crop_display,
            quantity: valid.quantity,
            contact: valid.contact,
            ask_price: valid.ask_price,
            timestamp,
        }
    }

    pub fn posted_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}
