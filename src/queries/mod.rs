//! Query modules for the AgriMarket context.
//!
//! Each module provides a query struct that borrows the
//! [`RecordStore`](crate::store::RecordStore) and exposes methods over a
//! fresh snapshot of its records.

pub mod aggregates;
pub mod listings;
pub mod prices;

pub use aggregates::AggregateQuery;
pub use listings::ListingQuery;
pub use prices::PriceQuery;
