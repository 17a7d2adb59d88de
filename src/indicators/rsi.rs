use crate::domain::PriceBar;
use crate::error::{EngineError, Result};
use crate::models::IndicatorPoint;

/// RSI (Relative Strength Index): Wilder smoothing of avg gain/loss.
///
/// The first value appears after `window` price changes, i.e. on the
/// `window + 1`-th price. A zero average loss reports exactly 100.
#[derive(Debug, Clone)]
pub struct RsiIndicator {
    window: usize,
    prev_close: Option<f64>,
    avg_gain: f64,
    avg_loss: f64,
    count: usize,
    gain_sum: f64,
    loss_sum: f64,
    warm: bool,
}

impl RsiIndicator {
    pub fn new(window: usize) -> Self {
        Self {
            window,
            prev_close: None,
            avg_gain: 0.0,
            avg_loss: 0.0,
            count: 0,
            gain_sum: 0.0,
            loss_sum: 0.0,
            warm: false,
        }
    }

    pub fn update(&mut self, close: f64) -> Option<f64> {
        let prev = self.prev_close.replace(close)?;

        let change = close - prev;
        let gain = change.max(0.0);
        let loss = (-change).max(0.0);

        if self.warm {
            let w = self.window as f64;
            self.avg_gain = (self.avg_gain * (w - 1.0) + gain) / w;
            self.avg_loss = (self.avg_loss * (w - 1.0) + loss) / w;
        } else {
            self.gain_sum += gain;
            self.loss_sum += loss;
            self.count += 1;
            if self.count < self.window {
                return None;
            }
            self.avg_gain = self.gain_sum / self.window as f64;
            self.avg_loss = self.loss_sum / self.window as f64;
            self.warm = true;
        }

        Some(rsi_from_averages(self.avg_gain, self.avg_loss))
    }

    pub fn is_warm(&self) -> bool {
        self.warm
    }
}

/// `100 - 100 / (1 + RS)`, saturating to 100 when there were no losses.
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}

/// RSI of closes. A series of `period` candles or fewer gives an empty result.
pub fn compute_rsi<B: PriceBar>(data: &[B], period: usize) -> Result<Vec<IndicatorPoint>> {
    if period == 0 {
        return Err(EngineError::InvalidPeriod { period: 0 });
    }
    if data.len() <= period {
        return Ok(Vec::new());
    }

    let mut rsi = RsiIndicator::new(period);
    Ok(data
        .iter()
        .filter_map(|bar| {
            rsi.update(bar.close())
                .map(|value| IndicatorPoint::new(bar.time(), value))
        })
        .collect())
}
