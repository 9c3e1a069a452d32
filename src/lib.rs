//! AgriMarket for Rust.
//!
//! A local-only marketplace utility: record crop price observations, post and
//! browse produce listings, and derive per-crop price aggregates. All state is
//! kept in a local key-value store; there is no server and no sync.
//!
//! # Quick start
//!
//! ```no_run
//! use agrimarket::{AgriMarket, PriceReportForm};
//!
//! let market = AgriMarket::builder().build().unwrap();
//!
//! // Record a price
//! market
//!     .prices()
//!     .submit(&PriceReportForm::new("Maize", "12.5").market("Merkato"))
//!     .unwrap();
//!
//! // Average and daily series for the selected crop
//! let view = market.aggregates().view(Some("maize"));
//! println!("{:?}", view.average);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod filter;
pub mod models;
pub mod presentation;
pub mod queries;
pub mod store;
pub mod transport;
pub mod validation;

pub use error::{AgriMarketError, Result};
pub use filter::ReportFilter;
pub use models::{AggregateView, CropAggregate, DailyPoint, Listing, PriceReport, PriceTrend};
pub use store::{FileBackend, MemoryBackend, RecordStore, StorageBackend};
pub use transport::TransportEstimator;
pub use validation::{ListingForm, PriceReportForm};

use std::fmt;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// AgriMarketBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AgriMarket`] instance.
///
/// Use [`AgriMarket::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](AgriMarketBuilder::build) to create the
/// context.
pub struct AgriMarketBuilder {
    data_dir: Option<PathBuf>,
    in_memory: bool,
    rate_per_km: f64,
}

impl Default for AgriMarketBuilder {
    fn default() -> Self {
        Self {
            data_dir: None,
            in_memory: false,
            rate_per_km: config::DEFAULT_RATE_PER_KM,
        }
    }
}

impl AgriMarketBuilder {
    /// Set a custom data directory.
    ///
    /// If not set, the platform-appropriate data directory is used
    /// (e.g. `~/.local/share/agrimarket` on Linux).
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Keep all records in memory only. Overrides [`data_dir`](Self::data_dir).
    pub fn in_memory(mut self) -> Self {
        self.in_memory = true;
        self
    }

    /// Default transport rate in ETB per km. Defaults to 5.
    pub fn rate_per_km(mut self, rate: f64) -> Self {
        self.rate_per_km = rate;
        self
    }

    /// Build the context, creating the data directory if needed.
    pub fn build(self) -> Result<AgriMarket> {
        let store = if self.in_memory {
            RecordStore::in_memory()
        } else {
            RecordStore::open(self.data_dir.unwrap_or_else(config::default_data_dir))?
        };
        Ok(AgriMarket::with_store(store, self.rate_per_km))
    }
}

// ---------------------------------------------------------------------------
// AgriMarket
// ---------------------------------------------------------------------------

/// The context object every operation goes through.
///
/// Owns the [`RecordStore`] and exposes domain-specific query interfaces as
/// lightweight borrowing wrappers.
pub struct AgriMarket {
    store: RecordStore,
    transport: TransportEstimator,
}

impl AgriMarket {
    /// Create a new builder for configuring the context.
    pub fn builder() -> AgriMarketBuilder {
        AgriMarketBuilder::default()
    }

    /// Wrap an existing store, e.g. one built on a custom [`StorageBackend`].
    pub fn with_store(store: RecordStore, rate_per_km: f64) -> Self {
        Self {
            store,
            transport: TransportEstimator::new(rate_per_km),
        }
    }

    // -- Query accessors ---------------------------------------------------

    /// Access the price report interface.
    pub fn prices(&self) -> queries::PriceQuery<'_> {
        queries::PriceQuery::new(&self.store)
    }

    /// Access the listing interface.
    pub fn listings(&self) -> queries::ListingQuery<'_> {
        queries::ListingQuery::new(&self.store)
    }

    /// Access the aggregate interface.
    ///
    /// Every call recomputes from the current records.
    pub fn aggregates(&self) -> queries::AggregateQuery<'_> {
        queries::AggregateQuery::new(&self.store)
    }

    /// The transport estimator configured for this context.
    pub fn transport(&self) -> &TransportEstimator {
        &self.transport
    }

    /// Return a reference to the underlying [`RecordStore`].
    pub fn store(&self) -> &RecordStore {
        &self.store
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for AgriMarket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AgriMarket(backend={}, reports={}, listings={})",
            self.store.backend_type(),
            self.store.load_prices().len(),
            self.store.load_listings().len()
        )
    }
}
