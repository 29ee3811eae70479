//! Property tests for engine invariants.
//!
//! Uses proptest to verify:
//! 1. Momentum oscillator stays within [0, 100]
//! 2. Risk:reward is never negative, and zero whenever stop >= entry
//! 3. Lot size never spends more than the available capital
//! 4. Confidence is exactly 100 * score / 8

use chrono::NaiveDate;
use proptest::prelude::*;
use swingscan_core::domain::{PriceBar, PriceSeries};
use swingscan_core::indicators::{momentum_oscillator, volatility_range};
use swingscan_core::scoring::{confidence_percentage, score, Signal, SignalSet, MAX_SCORE};
use swingscan_core::sizing::lot_size;
use swingscan_core::trade::TradeRules;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_closes() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(1.0..1000.0_f64, 2..80)
}

fn arb_price() -> impl Strategy<Value = f64> {
    (0.01..50_000.0_f64).prop_map(|p| (p * 100.0).round() / 100.0 + 0.01)
}

fn series_from_closes(closes: &[f64]) -> PriceSeries {
    let base = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            PriceBar {
                date: base + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) * 1.01,
                low: open.min(close) * 0.99,
                close,
                volume: 10_000,
            }
        })
        .collect();
    PriceSeries::new("PROP", bars).unwrap()
}

// ── 1. Oscillator bounds ─────────────────────────────────────────────

proptest! {
    #[test]
    fn oscillator_is_bounded(closes in arb_closes(), period in 1usize..20) {
        let series = series_from_closes(&closes);
        for v in momentum_oscillator(&series, period) {
            if !v.is_nan() {
                prop_assert!((0.0..=100.0).contains(&v), "oscillator out of range: {v}");
            }
        }
    }

    #[test]
    fn volatility_is_non_negative(closes in arb_closes(), period in 1usize..20) {
        let series = series_from_closes(&closes);
        for v in volatility_range(&series, period) {
            if !v.is_nan() {
                prop_assert!(v >= 0.0);
            }
        }
    }
}

// ── 2. Risk:reward ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn risk_reward_is_non_negative(
        price in arb_price(),
        atr in 0.0..500.0_f64,
        stop_multiple in -2.0..4.0_f64,
        target_multiple in -2.0..4.0_f64,
    ) {
        let rules = TradeRules { stop_multiple, target_multiple, ..TradeRules::default() };
        let params = rules.derive(price, atr);
        prop_assert!(params.risk_reward >= 0.0);
        if params.stop_loss >= price {
            prop_assert_eq!(params.risk_reward, 0.0);
        }
    }
}

// ── 3. Lot size ──────────────────────────────────────────────────────

proptest! {
    #[test]
    fn lot_size_fits_capital(capital in 0.0..10_000_000.0_f64, price in arb_price()) {
        let lots = lot_size(capital, price).unwrap();
        prop_assert!(lots as f64 * price <= capital);
        prop_assert!((lots + 1) as f64 * price > capital * (1.0 - 1e-12));
    }
}

// ── 4. Confidence ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn confidence_matches_score(mask in 0u8..=255) {
        let set: SignalSet = Signal::ALL
            .into_iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, s)| s)
            .collect();
        let card = score(&set);
        prop_assert_eq!(card.score as u32, mask.count_ones());
        prop_assert_eq!(card.confidence, 100.0 * f64::from(card.score) / 8.0);
        prop_assert_eq!(card.confidence, confidence_percentage(card.score, MAX_SCORE));
    }
}
