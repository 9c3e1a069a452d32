pub mod aggregate;
pub mod listing;
pub mod price;

pub use aggregate::*;
pub use listing::*;
pub use price::*;
