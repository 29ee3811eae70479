//! SwingScan Core: indicators, signal scoring, trade parameters, sizing, market data.
//!
//! This crate contains the per-ticker engine:
//! - Domain types (price bars, validated price series)
//! - Indicator library (momentum oscillator, volatility range, moving averages)
//! - The eight-signal battery, composite score and confidence
//! - Stop-loss / target / risk:reward derivation
//! - Lot sizing
//! - Universe and bar providers (NSE, Yahoo Finance, static, synthetic)

pub mod data;
pub mod domain;
pub mod indicators;
pub mod scoring;
pub mod sizing;
pub mod trade;

/// Round to two decimals for presentation.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: everything a worker thread touches is Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::PriceBar>();
        require_sync::<domain::PriceBar>();
        require_send::<domain::PriceSeries>();
        require_sync::<domain::PriceSeries>();
        require_send::<indicators::IndicatorSnapshot>();
        require_sync::<indicators::IndicatorSnapshot>();
        require_send::<scoring::SignalSet>();
        require_sync::<scoring::SignalSet>();
        require_send::<scoring::SignalParams>();
        require_sync::<scoring::SignalParams>();
        require_send::<trade::TradeRules>();
        require_sync::<trade::TradeRules>();
        require_send::<data::HistoryRequest>();
        require_sync::<data::HistoryRequest>();
        require_send::<data::CircuitBreaker>();
        require_sync::<data::CircuitBreaker>();
        require_send::<data::DataError>();
    }

    #[test]
    fn round2_rounds_half_away_from_zero() {
        assert_eq!(round2(1.333_333), 1.33);
        assert_eq!(round2(62.5), 62.5);
        assert_eq!(round2(2.675_1), 2.68);
    }

    /// Providers are shared across the worker pool behind `&dyn`.
    #[test]
    fn providers_are_object_safe() {
        fn _bars(_: &dyn data::BarProvider) {}
        fn _universe(_: &dyn data::UniverseProvider) {}
        fn _alt(_: &dyn scoring::AltDataProvider) {}
    }
}
