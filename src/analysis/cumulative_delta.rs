use crate::models::FootprintCandle;

/// Running delta across a footprint series.
///
/// The synthesizer leaves `cumulative_delta` at zero because it sees one
/// candle at a time; the caller owns the running total and decides where it
/// resets (e.g. at a session open).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CumulativeDelta {
    running: f64,
}

impl CumulativeDelta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the candle's delta and stamp the new running total onto it.
    pub fn apply(&mut self, candle: &mut FootprintCandle) -> f64 {
        self.running += candle.delta as f64;
        candle.cumulative_delta = self.running;
        self.running
    }

    pub fn value(&self) -> f64 {
        self.running
    }

    pub fn reset(&mut self) {
        self.running = 0.0;
    }
}

/// Fill `cumulative_delta` across a whole series, starting from zero.
pub fn accumulate_cumulative_delta(candles: &mut [FootprintCandle]) -> f64 {
    let mut acc = CumulativeDelta::new();
    for candle in candles.iter_mut() {
        acc.apply(candle);
    }
    acc.value()
}
