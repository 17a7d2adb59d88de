use serde::{Deserialize, Serialize};

use crate::config::{FOOTPRINT, HTF};
use crate::error::{EngineError, Result};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CandleType {
    Bullish,
    Bearish,
    Doji,
}

/// Read-only OHLC view shared by raw, footprint and higher-timeframe candles.
/// Indicators are computed over anything implementing it.
pub trait PriceBar {
    fn time(&self) -> i64;
    fn open(&self) -> f64;
    fn high(&self) -> f64;
    fn low(&self) -> f64;
    fn close(&self) -> f64;
}

/// OHLCV candle as supplied by the data feed. `time` is in epoch seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: Option<f64>,
}

impl Candle {
    pub fn new(time: i64, open: f64, high: f64, low: f64, close: f64, volume: Option<f64>) -> Self {
        Candle {
            time,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    pub fn get_type(&self) -> CandleType {
        if self.close > self.open {
            CandleType::Bullish
        } else if self.close < self.open {
            CandleType::Bearish
        } else {
            CandleType::Doji
        }
    }

    /// Strictly rising candle. A doji is not bullish.
    pub fn is_bullish(&self) -> bool {
        self.get_type() == CandleType::Bullish
    }

    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    // Returns the low and high of the candle body as a tuple
    pub fn body_range(&self) -> (f64, f64) {
        (self.open.min(self.close), self.open.max(self.close))
    }

    /// Reject candles the synthesizer cannot discretize.
    ///
    /// `open`/`close` outside `[low, high]` is tolerated: feeds do emit such
    /// candles and the grid is derived from `low`/`high` only. Prices beyond
    /// `HTF.max_abs_price` and volumes beyond `FOOTPRINT.max_volume` are
    /// rejected, as their level keys or volume sums would not fit.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
        ] {
            if !value.is_finite() || value.abs() > HTF.max_abs_price {
                return Err(EngineError::InvalidPrice { field, value });
            }
        }

        if self.high < self.low {
            return Err(EngineError::InvalidRange {
                high: self.high,
                low: self.low,
            });
        }

        if let Some(volume) = self.volume
            && (!volume.is_finite() || volume < 0.0 || volume > FOOTPRINT.max_volume)
        {
            return Err(EngineError::InvalidVolume { value: volume });
        }

        Ok(())
    }
}

impl PriceBar for Candle {
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
