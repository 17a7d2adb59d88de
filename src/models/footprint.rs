use serde::{Deserialize, Serialize};

use crate::config::FOOTPRINT;
use crate::domain::PriceBar;

/// Which side, if any, dominates a price level
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, Default, Debug, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Imbalance {
    Bid,
    Ask,
    #[default]
    None,
}

impl Imbalance {
    pub fn classify(bid: u64, ask: u64) -> Self {
        let cfg = &FOOTPRINT.imbalance;
        if ask > cfg.ratio.saturating_mul(bid) && ask > cfg.min_volume {
            Imbalance::Ask
        } else if bid > cfg.ratio.saturating_mul(ask) && bid > cfg.min_volume {
            Imbalance::Bid
        } else {
            Imbalance::None
        }
    }
}

/// Volume traded at one price step of a footprint candle.
/// `volume` and `delta` are derived from `bid`/`ask`; call `refresh` after touching either.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootprintLevel {
    pub price: f64,
    pub bid: u64,
    pub ask: u64,
    pub volume: u64,
    pub delta: i64,
    pub imbalance: Imbalance,
}

impl FootprintLevel {
    pub fn new(price: f64, bid: u64, ask: u64) -> Self {
        let mut level = FootprintLevel {
            price,
            bid,
            ask,
            volume: 0,
            delta: 0,
            imbalance: Imbalance::None,
        };
        level.refresh();
        level
    }

    pub fn refresh(&mut self) {
        self.volume = self.bid + self.ask;
        self.delta = self.ask as i64 - self.bid as i64;
        self.imbalance = Imbalance::classify(self.bid, self.ask);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootprintCandle {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    /// Price increment the levels were laid out on.
    ///
    /// A flat candle gets a single level at `low`, and this field still holds
    /// the lookup tick for a zero range (`0.005`), never 0. The synthesizer's
    /// distance weighting divides by it.
    pub tick: f64,
    /// Sorted by ascending price.
    pub levels: Vec<FootprintLevel>,
    pub delta: i64,
    /// Running delta across a series. Left at 0.0 by the synthesizer; see `CumulativeDelta`.
    pub cumulative_delta: f64,
}

impl FootprintCandle {
    pub fn level_volume_sum(&self) -> u64 {
        self.levels.iter().map(|l| l.volume).sum()
    }

    pub fn total_bid(&self) -> u64 {
        self.levels.iter().map(|l| l.bid).sum()
    }

    pub fn total_ask(&self) -> u64 {
        self.levels.iter().map(|l| l.ask).sum()
    }

    pub fn level_delta_sum(&self) -> i64 {
        self.levels.iter().map(|l| l.delta).sum()
    }
}

impl PriceBar for FootprintCandle {
    fn time(&self) -> i64 {
        self.time
    }

    fn open(&self) -> f64 {
        self.open
    }

    fn high(&self) -> f64 {
        self.high
    }

    fn low(&self) -> f64 {
        self.low
    }

    fn close(&self) -> f64 {
        self.close
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_derived_fields() {
        let level = FootprintLevel::new(100.0, 30, 70);
        assert_eq!(level.volume, 100);
        assert_eq!(level.delta, 40);
        assert_eq!(level.imbalance, Imbalance::None);
    }

    #[test]
    fn test_imbalance_thresholds() {
        // Ratio met but ask not above the absolute floor
        assert_eq!(Imbalance::classify(10, 50), Imbalance::None);
        assert_eq!(Imbalance::classify(10, 51), Imbalance::Ask);
        // Exactly 3x is not enough
        assert_eq!(Imbalance::classify(20, 60), Imbalance::None);
        assert_eq!(Imbalance::classify(61, 20), Imbalance::Bid);
        assert_eq!(Imbalance::classify(0, 0), Imbalance::None);
    }

    #[test]
    fn test_imbalance_display_and_serde() {
        assert_eq!(Imbalance::Ask.to_string(), "ask");
        assert_eq!(
            serde_json::to_string(&Imbalance::None).expect("serialize"),
            "\"none\""
        );
    }

    #[test]
    fn test_refresh_after_adjustment() {
        let mut level = FootprintLevel::new(1.0, 5, 5);
        level.ask += 100;
        level.refresh();
        assert_eq!(level.volume, 110);
        assert_eq!(level.delta, 100);
        assert_eq!(level.imbalance, Imbalance::Ask);
    }
}
