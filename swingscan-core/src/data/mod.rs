//! Market data: provider traits and the concrete universe/bar sources.

pub mod circuit_breaker;
pub mod nse;
pub mod provider;
pub mod synthetic;
pub mod universe;
pub mod yahoo;

pub use circuit_breaker::CircuitBreaker;
pub use nse::{NseIndexProvider, NSE_SUFFIX};
pub use provider::{BarProvider, DataError, HistoryRequest, Interval, UniverseProvider};
pub use synthetic::SyntheticProvider;
pub use universe::StaticUniverse;
pub use yahoo::YahooProvider;
