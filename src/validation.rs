//! Input validation boundary.
//!
//! Raw form input (strings, as typed by a user) is checked here before any
//! record is created. Nothing that fails validation reaches the record store,
//! so the aggregation engine only ever sees positive, finite prices and
//! non-empty crop keys.

use crate::config;
use crate::error::{AgriMarketError, Result};

/// Normalize a crop name into the key used for grouping and equality.
pub fn normalize_crop_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

// ---------------------------------------------------------------------------
// Price report form
// ---------------------------------------------------------------------------

/// Raw input for a price report.
#[derive(Debug, Clone, Default)]
pub struct PriceReportForm {
    pub crop: String,
    pub price: String,
    pub market: String,
    pub note: String,
}

impl PriceReportForm {
    pub fn new(crop: &str, price: &str) -> Self {
        Self {
            crop: crop.to_string(),
            price: price.to_string(),
            ..Self::default()
        }
    }

    pub fn market(mut self, market: &str) -> Self {
        self.market = market.to_string();
        self
    }

    pub fn note(mut self, note: &str) -> Self {
        self.note = note.to_string();
        self
    }

    pub fn validate(&self) -> Result<ValidPriceReport> {
        let crop_display = self.crop.trim();
        if crop_display.is_empty() {
            return Err(AgriMarketError::InvalidCrop(
                "crop name must not be blank".to_string(),
            ));
        }
        let price = parse_positive(&self.price)
            .ok_or_else(|| AgriMarketError::InvalidPrice(self.price.trim().to_string()))?;
        let market = match self.market.trim() {
            "" => config::UNKNOWN_MARKET.to_string(),
            m => m.to_string(),
        };

        Ok(ValidPriceReport {
            crop_key: normalize_crop_key(crop_display),
            crop_display: crop_display.to_string(),
            price,
            market,
            note: self.note.trim().to_string(),
        })
    }
}

/// A price report form that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidPriceReport {
    pub crop_key: String,
    pub crop_display: String,
    pub price: f64,
    pub market: String,
    pub note: String,
}

// ---------------------------------------------------------------------------
// Listing form
// ---------------------------------------------------------------------------

/// Raw input for a produce listing.
#[derive(Debug, Clone, Default)]
pub struct ListingForm {
    pub crop: String,
    pub quantity: String,
    pub contact: String,
    pub ask_price: String,
}

impl ListingForm {
    pub fn new(crop: &str, quantity: &str, contact: &str, ask_price: &str) -> Self {
        Self {
            crop: crop.to_string(),
            quantity: quantity.to_string(),
            contact: contact.to_string(),
            ask_price: ask_price.to_string(),
        }
    }

    pub fn validate(&self) -> Result<ValidListing> {
        let crop_display = self.crop.trim();
        if crop_display.is_empty() {
            return Err(AgriMarketError::InvalidCrop(
                "crop name must not be blank".to_string(),
            ));
        }
        let quantity = parse_positive(&self.quantity)
            .ok_or_else(|| AgriMarketError::InvalidQuantity(self.quantity.trim().to_string()))?;
        let contact = self.contact.trim();
        if contact.is_empty() {
            return Err(AgriMarketError::MissingContact);
        }
        let ask_price = parse_positive(&self.ask_price)
            .ok_or_else(|| AgriMarketError::InvalidPrice(self.ask_price.trim().to_string()))?;

        Ok(ValidListing {
            crop_display: crop_display.to_string(),
            quantity,
            contact: contact.to_string(),
            ask_price,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidListing {
    pub crop_display: String,
    pub quantity: f64,
    pub contact: String,
    pub ask_price: f64,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a strictly positive, finite decimal number.
///
/// `f64::from_str` accepts `inf` and `NaN`; both are rejected here.
pub fn parse_positive(raw: &str) -> Option<f64> {
    parse_finite(raw).filter(|v| *v > 0.0)
}

/// Parse a finite decimal number that may be zero but not negative.
pub fn parse_non_negative(raw: &str) -> Option<f64> {
    parse_finite(raw).filter(|v| *v >= 0.0)
}

fn parse_finite(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
