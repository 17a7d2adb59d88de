//! Adaptive price discretization for footprint candles.
//!
//! A candle's `[low, high]` range is cut into at most roughly
//! `FOOTPRINT.max_levels` steps. The step (tick) comes from a lookup by
//! range magnitude and is widened when the lookup would produce too many
//! levels.

use crate::config::{DEBUG_FLAGS, FOOTPRINT};
use crate::utils::maths_utils::canonical_price;

/// Price steps chosen for one candle.
#[derive(Debug, Clone, PartialEq)]
pub struct TickGrid {
    pub tick: f64,
    /// Ascending, canonicalised level prices. Never empty.
    pub prices: Vec<f64>,
}

impl TickGrid {
    /// Lowest grid price, `floor(low / tick) * tick`.
    pub fn start_price(&self) -> f64 {
        self.prices[0]
    }

    /// Highest grid price, `ceil(high / tick) * tick`.
    pub fn end_price(&self) -> f64 {
        self.prices[self.prices.len() - 1]
    }
}

/// Tick for a candle range.
///
/// Looks the range up in `FOOTPRINT.tick_table`; if that tick would split the
/// range into more than `max_levels` steps, the range is divided evenly
/// instead.
pub fn tick_size_for_range(range: f64) -> f64 {
    let base_tick = FOOTPRINT
        .tick_table
        .iter()
        .find(|(ceiling, _)| range < *ceiling)
        .map(|(_, tick)| *tick)
        .unwrap_or(FOOTPRINT.fallback_tick);

    let max_levels = FOOTPRINT.max_levels as f64;
    if range / base_tick > max_levels {
        range / max_levels
    } else {
        base_tick
    }
}

/// Lay out the level prices for a candle spanning `[low, high]`.
///
/// Candidates run from `floor(low/tick)*tick` to `ceil(high/tick)*tick`.
/// Interior candidates strictly outside `[low, high]` are dropped; the first
/// and last candidates are always kept so the grid can never be empty.
/// Callers must have checked `high >= low`.
pub fn build_grid(low: f64, high: f64) -> TickGrid {
    let range = high - low;
    let tick = tick_size_for_range(range);

    // Flat candle: one level at the traded price. The reported tick stays the
    // lookup tick so it is never zero.
    if range <= 0.0 {
        return TickGrid {
            tick,
            prices: vec![canonical_price(low)],
        };
    }

    // Work in whole tick units so float drift cannot drop the last step.
    let start_idx = (low / tick).floor() as i64;
    let end_idx = (high / tick).ceil() as i64;
    let step_count = (end_idx - start_idx + 1).max(1) as usize;
    let last = step_count - 1;

    let prices: Vec<f64> = (0..step_count)
        .filter_map(|i| {
            let price = (start_idx + i as i64) as f64 * tick;
            let inside = price >= low && price <= high;
            (i == 0 || i == last || inside).then(|| canonical_price(price))
        })
        .collect();

    if DEBUG_FLAGS.print_tick_grid {
        log::debug!(
            "Tick grid for [{}, {}]: tick {} -> {} levels ({} candidates)",
            low,
            high,
            tick,
            prices.len(),
            step_count
        );
    }

    TickGrid { tick, prices }
}
