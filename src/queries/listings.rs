//! Produce listings: post, browse, remove.
//!
//! Listings are kept newest first, matching the order they are shown in.

use chrono::{DateTime, Utc};

use crate::error::{AgriMarketError, Result};
use crate::models::Listing;
use crate::presentation;
use crate::store::{next_id, RecordStore};
use crate::validation::ListingForm;

// ---------------------------------------------------------------------------
// ListingQuery
// ---------------------------------------------------------------------------

/// Query interface for open sell offers.
pub struct ListingQuery<'a> {
    store: &'a RecordStore,
}

impl<'a> ListingQuery<'a> {
    /// Create a new `ListingQuery` bound to the given store.
    pub fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    pub fn post(&self, form: &ListingForm) -> Result<Listing> {
        self.post_at(form, Utc::now())
    }

    /// Validate and store a listing stamped with `at`, ahead of older ones.
    pub fn post_at(&self, form: &ListingForm, at: DateTime<Utc>) -> Result<Listing> {
        let valid = form.validate()?;

        let mut listings = self.store.load_listings();
        let timestamp = at.timestamp_millis();
        let id = next_id(listings.iter().map(|l| l.id), timestamp);
        let listing = Listing::new(id, timestamp, valid);

        listings.insert(0, listing.clone());
        self.store.save_listings(&listings)?;

        tracing::info!(id, crop = %listing.crop_display, qty = listing.quantity, "listing posted");
        Ok(listing)
    }

    /// All listings, newest first.
    pub fn list(&self) -> Vec<Listing> {
        self.store.load_listings()
    }

    pub fn count(&self) -> usize {
        self.store.load_listings().len()
    }

    pub fn get(&self, id: i64) -> Option<Listing> {
        self.store.load_listings().into_iter().find(|l| l.id == id)
    }

    /// Listings whose crop name contains `crop`, case-insensitively.
    pub fn search(&self, crop: &str) -> Vec<Listing> {
        let needle = crop.trim().to_lowercase();
        self.store
            .load_listings()
            .into_iter()
            .filter(|l| l.crop_display.to_lowercase().contains(&needle))
            .collect()
    }

    /// Remove a listing by id. Returns `false` if no listing had that id.
    pub fn remove(&self, id: i64) -> Result<bool> {
        let mut listings = self.store.load_listings();
        let before = listings.len();
        listings.retain(|l| l.id != id);
        if listings.len() == before {
            return Ok(false);
        }
        self.store.save_listings(&listings)?;
        tracing::info!(id, "listing removed");
        Ok(true)
    }

    pub fn clear(&self) -> Result<()> {
        self.store.clear_listings()?;
        tracing::info!("all listings cleared");
        Ok(())
    }

    /// Ready-to-send message for the listing with `id`.
    pub fn contact_message(&self, id: i64) -> Result<String> {
        let listing = self
            .get(id)
            .ok_or_else(|| AgriMarketError::NotFound(format!("listing {}", id)))?;
        Ok(presentation::contact_message(&listing))
    }
}
