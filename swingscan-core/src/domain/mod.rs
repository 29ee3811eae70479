//! Domain types for SwingScan

pub mod bar;
pub mod series;

pub use bar::PriceBar;
pub use series::{PriceSeries, SeriesError};

/// Ticker identifier as reported by the universe provider (e.g. `RELIANCE.NS`).
pub type Ticker = String;
