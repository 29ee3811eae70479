//! Signal scoring.
//!
//! Eight boolean signals are evaluated per ticker: five from the indicator
//! snapshot and three injected by an [`AltDataProvider`]. The count of true
//! signals is the composite score; confidence is its share of the maximum.

pub mod altdata;
pub mod params;
pub mod scorer;
pub mod signal;

pub use altdata::{AltDataProvider, AltSignals, NoAltData, StaticAltData};
pub use params::SignalParams;
pub use scorer::{confidence_percentage, explain, score, ScoreCard, MAX_SCORE, NO_SIGNAL};
pub use signal::{Signal, SignalSet};
