use crate::domain::PriceBar;
use crate::error::{EngineError, Result};
use crate::models::IndicatorPoint;

/// Simple moving average of closes.
///
/// One point per index from `period - 1` onwards; a series shorter than
/// `period` gives an empty result.
pub fn compute_sma<B: PriceBar>(data: &[B], period: usize) -> Result<Vec<IndicatorPoint>> {
    if period == 0 {
        return Err(EngineError::InvalidPeriod { period: 0 });
    }
    if data.len() < period {
        return Ok(Vec::new());
    }

    let mut points = Vec::with_capacity(data.len() - period + 1);
    for (i, window) in data.windows(period).enumerate() {
        let sum: f64 = window.iter().map(|bar| bar.close()).sum();
        points.push(IndicatorPoint::new(
            data[i + period - 1].time(),
            sum / period as f64,
        ));
    }
    Ok(points)
}
