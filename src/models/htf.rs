use serde::{Deserialize, Serialize};

use crate::domain::PriceBar;

/// Merged volume at one price across every candle in a higher-timeframe bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HtfProfileLevel {
    pub price: f64,
    pub volume: u64,
    pub bid: u64,
    pub ask: u64,
}

impl HtfProfileLevel {
    pub fn delta(&self) -> i64 {
        self.ask as i64 - self.bid as i64
    }
}

/// A finalized higher-timeframe candle with its merged volume profile.
/// Immutable once emitted by the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HtfCandle {
    /// Bucket start, epoch seconds.
    pub time: i64,
    /// Bucket start + period length.
    pub end_time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    /// Sorted by ascending price.
    pub levels: Vec<HtfProfileLevel>,
    /// Price of the highest-volume level (lowest price on ties).
    pub poc_price: f64,
    /// Only populated when the aggregator is asked for a value area.
    pub value_area_high: Option<f64>,
    pub value_area_low: Option<f64>,
}

impl HtfCandle {
    pub fn delta(&self) -> i64 {
        self.levels.iter().map(|l| l.delta()).sum()
    }

    pub fn level_volume_sum(&self) -> u64 {
        self.levels.iter().map(|l| l.volume).sum()
    }
}

impl PriceBar for HtfCandle {
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
