//! The fixed battery of eight boolean signals.

use serde::{Deserialize, Serialize};

use super::altdata::AltSignals;
use super::params::SignalParams;
use crate::indicators::IndicatorSnapshot;

/// Signal names in definition order. Explanations always follow this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Signal {
    VolumeSpike,
    PriceBreakout,
    MomentumFavorable,
    VolatilityElevated,
    DeliveryStrength,
    InstitutionalFlow,
    SectorSentiment,
    TrendAlignment,
}

impl Signal {
    pub const ALL: [Signal; 8] = [
        Signal::VolumeSpike,
        Signal::PriceBreakout,
        Signal::MomentumFavorable,
        Signal::VolatilityElevated,
        Signal::DeliveryStrength,
        Signal::InstitutionalFlow,
        Signal::SectorSentiment,
        Signal::TrendAlignment,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Signal::VolumeSpike => "volume-spike",
            Signal::PriceBreakout => "price-breakout",
            Signal::MomentumFavorable => "momentum-favorable",
            Signal::VolatilityElevated => "volatility-elevated",
            Signal::DeliveryStrength => "delivery-strength",
            Signal::InstitutionalFlow => "institutional-flow",
            Signal::SectorSentiment => "sector-sentiment",
            Signal::TrendAlignment => "trend-alignment",
        }
    }

    /// Label used in trigger explanations.
    pub fn label(self) -> &'static str {
        match self {
            Signal::VolumeSpike => "Volume spike",
            Signal::PriceBreakout => "Price breakout",
            Signal::MomentumFavorable => "RSI favorable",
            Signal::VolatilityElevated => "ATR high",
            Signal::DeliveryStrength => "Strong delivery",
            Signal::InstitutionalFlow => "Institutional buying",
            Signal::SectorSentiment => "Sector positive",
            Signal::TrendAlignment => "Short MA > Long MA",
        }
    }

    /// True for the signals supplied by an [`AltDataProvider`](super::AltDataProvider).
    pub fn is_external(self) -> bool {
        matches!(
            self,
            Signal::DeliveryStrength | Signal::InstitutionalFlow | Signal::SectorSentiment
        )
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Truth value of every signal for one ticker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalSet {
    flags: [bool; 8],
}

impl SignalSet {
    /// Evaluate the five price-derived signals from the snapshot and take the
    /// three external ones verbatim from `alt`.
    pub fn evaluate(snapshot: &IndicatorSnapshot, params: &SignalParams, alt: AltSignals) -> Self {
        let mut set = Self::default();

        set.set(
            Signal::VolumeSpike,
            snapshot
                .avg_volume
                .is_some_and(|avg| snapshot.volume as f64 > params.volume_spike_multiple * avg),
        );
        set.set(
            Signal::PriceBreakout,
            snapshot.recent_high.is_some_and(|high| snapshot.close > high),
        );
        set.set(
            Signal::MomentumFavorable,
            snapshot.momentum.is_some_and(|m| m < params.overbought_level),
        );
        set.set(
            Signal::VolatilityElevated,
            match (snapshot.volatility, snapshot.prior_volatility_mean) {
                (Some(current), Some(prior)) => current > prior,
                _ => false,
            },
        );
        set.set(Signal::DeliveryStrength, alt.delivery_strength);
        set.set(Signal::InstitutionalFlow, alt.institutional_flow);
        set.set(Signal::SectorSentiment, alt.sector_sentiment);
        set.set(
            Signal::TrendAlignment,
            match (snapshot.short_ma, snapshot.long_ma) {
                (Some(short), Some(long)) => short > long,
                _ => false,
            },
        );

        set
    }

    pub fn get(&self, signal: Signal) -> bool {
        self.flags[signal.index()]
    }

    pub fn set(&mut self, signal: Signal, value: bool) {
        self.flags[signal.index()] = value;
    }

    /// True signals, in definition order.
    pub fn active(&self) -> impl Iterator<Item = Signal> + '_ {
        Signal::ALL.into_iter().filter(|s| self.get(*s))
    }

    pub fn count(&self) -> usize {
        self.flags.iter().filter(|f| **f).count()
    }

    /// Count of true price-derived signals only.
    pub fn derived_count(&self) -> usize {
        self.active().filter(|s| !s.is_external()).count()
    }
}

impl FromIterator<Signal> for SignalSet {
    fn from_iter<I: IntoIterator<Item = Signal>>(iter: I) -> Self {
        let mut set = Self::default();
        for signal in iter {
            set.set(signal, true);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> IndicatorSnapshot {
        IndicatorSnapshot {
            close: 110.0,
            momentum: Some(55.0),
            volatility: Some(3.0),
            prior_volatility_mean: Some(2.0),
            short_ma: Some(105.0),
            long_ma: Some(100.0),
            volume: 3_000,
            avg_volume: Some(1_000.0),
            recent_high: Some(108.0),
        }
    }

    #[test]
    fn all_derived_signals_fire() {
        let set = SignalSet::evaluate(&snapshot(), &SignalParams::default(), AltSignals::default());
        assert_eq!(set.derived_count(), 5);
        assert_eq!(set.count(), 5);
        assert!(!set.get(Signal::DeliveryStrength));
    }

    #[test]
    fn undefined_values_are_false() {
        let snap = IndicatorSnapshot {
            momentum: None,
            volatility: None,
            short_ma: Some(105.0),
            long_ma: None,
            avg_volume: None,
            recent_high: None,
            ..snapshot()
        };
        let set = SignalSet::evaluate(&snap, &SignalParams::default(), AltSignals::default());
        assert_eq!(set.count(), 0);
    }

    #[test]
    fn overbought_momentum_is_not_favorable() {
        let snap = IndicatorSnapshot {
            momentum: Some(70.0),
            ..snapshot()
        };
        let set = SignalSet::evaluate(&snap, &SignalParams::default(), AltSignals::default());
        assert!(!set.get(Signal::MomentumFavorable));
    }

    #[test]
    fn volume_exactly_at_multiple_is_not_a_spike() {
        let snap = IndicatorSnapshot {
            volume: 2_000,
            ..snapshot()
        };
        let set = SignalSet::evaluate(&snap, &SignalParams::default(), AltSignals::default());
        assert!(!set.get(Signal::VolumeSpike));
    }

    #[test]
    fn external_signals_pass_through() {
        let alt = AltSignals {
            delivery_strength: true,
            institutional_flow: false,
            sector_sentiment: true,
        };
        let set = SignalSet::evaluate(&snapshot(), &SignalParams::default(), alt);
        assert!(set.get(Signal::DeliveryStrength));
        assert!(!set.get(Signal::InstitutionalFlow));
        assert!(set.get(Signal::SectorSentiment));
        assert_eq!(set.count(), 7);
    }

    #[test]
    fn active_follows_definition_order() {
        let set: SignalSet = [Signal::TrendAlignment, Signal::VolumeSpike]
            .into_iter()
            .collect();
        let active: Vec<_> = set.active().collect();
        assert_eq!(active, vec![Signal::VolumeSpike, Signal::TrendAlignment]);
    }
}
