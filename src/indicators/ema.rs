use crate::domain::PriceBar;
use crate::error::{EngineError, Result};
use crate::models::IndicatorPoint;

/// Exponential Moving Average, incremental computation.
///
/// Behaviour:
///   bars 0..window-1 → collected, no value yet
///   bar window-1     → value = SMA of the first `window` prices
///   bar window+      → value = (price − prev)·α + prev   where α = 2/(window+1)
#[derive(Debug, Clone)]
pub struct Ema {
    alpha: f64,
    window: usize,
    count: usize,
    seed_sum: f64,
    value: Option<f64>,
}

impl Ema {
    pub fn new(window: usize) -> Self {
        Self {
            alpha: 2.0 / (window as f64 + 1.0),
            window,
            count: 0,
            seed_sum: 0.0,
            value: None,
        }
    }

    /// Feed one price; returns the EMA once warm.
    pub fn update(&mut self, price: f64) -> Option<f64> {
        self.count += 1;
        self.value = match self.value {
            Some(prev) => Some((price - prev) * self.alpha + prev),
            None => {
                self.seed_sum += price;
                (self.count >= self.window).then(|| self.seed_sum / self.window as f64)
            }
        };
        self.value
    }

    pub fn is_warm(&self) -> bool {
        self.value.is_some()
    }
}

/// EMA of closes, seeded with the SMA of the first `period` closes.
///
/// Unlike SMA/RSI a short series is an error: there is no seed to start from.
pub fn compute_ema<B: PriceBar>(data: &[B], period: usize) -> Result<Vec<IndicatorPoint>> {
    if period == 0 {
        return Err(EngineError::InvalidPeriod { period: 0 });
    }
    if data.len() < period {
        return Err(EngineError::InsufficientData {
            needed: period,
            available: data.len(),
        });
    }

    let mut ema = Ema::new(period);
    Ok(data
        .iter()
        .filter_map(|bar| {
            ema.update(bar.close())
                .map(|value| IndicatorPoint::new(bar.time(), value))
        })
        .collect())
}
