//! Synthetic footprint generation from plain OHLCV candles.
//!
//! A candle carries no order flow, so the per-level breakdown is an
//! approximation: volume is spread over the tick grid with random weights
//! biased towards the open/close prices, then split into bid/ask with a
//! skew that follows the candle's direction. A final reconciliation pass
//! puts the volume lost to integer flooring back so that the levels always
//! sum to the candle volume exactly.
//!
//! Randomness is injected. Pass a seeded `StdRng` for reproducible output.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::analysis::tick_grid::{TickGrid, build_grid};
use crate::config::{DEBUG_FLAGS, FOOTPRINT};
use crate::domain::Candle;
use crate::error::Result;
use crate::models::{FootprintCandle, FootprintLevel};
use crate::utils::maths_utils::{first_max_index, normalize_manhattan};

/// Build a footprint candle from `candle`, drawing all randomness from `rng`.
pub fn synthesize<R: Rng + ?Sized>(candle: &Candle, rng: &mut R) -> Result<FootprintCandle> {
    candle.validate()?;

    let total_volume = resolve_volume(candle, rng);
    let grid = build_grid(candle.low, candle.high);

    let mut levels = distribute_volume(candle, &grid, total_volume, rng);
    reconcile_volume(&mut levels, total_volume);

    let delta = levels.iter().map(|l| l.delta).sum();

    Ok(FootprintCandle {
        time: candle.time,
        open: candle.open,
        high: candle.high,
        low: candle.low,
        close: candle.close,
        volume: total_volume,
        tick: grid.tick,
        levels,
        delta,
        cumulative_delta: 0.0,
    })
}

/// Same as [`synthesize`] with a freshly seeded generator. Not reproducible.
pub fn synthesize_unseeded(candle: &Candle) -> Result<FootprintCandle> {
    let mut rng = StdRng::from_entropy();
    synthesize(candle, &mut rng)
}

/// Synthesize a whole series in parallel.
///
/// Candle `i` gets its own generator seeded from `seed + i`, so the output
/// is identical for a given seed regardless of how rayon schedules the work.
/// Fails on the first invalid candle; no partial series is returned.
pub fn synthesize_series(candles: &[Candle], seed: u64) -> Result<Vec<FootprintCandle>> {
    candles
        .par_iter()
        .enumerate()
        .map(|(idx, candle)| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(idx as u64));
            synthesize(candle, &mut rng)
        })
        .collect()
}

/// Real volume is rounded to whole units; a missing volume gets a placeholder.
fn resolve_volume<R: Rng + ?Sized>(candle: &Candle, rng: &mut R) -> u64 {
    match candle.volume {
        Some(volume) => volume.round() as u64,
        None => {
            let (start, end) = FOOTPRINT.placeholder_volume;
            rng.gen_range(start..end)
        }
    }
}

/// Spread `total_volume` across the grid and split each level into bid/ask.
///
/// Level weight is `rand / (distance to nearer of open/close + tick)`, so
/// prices near the body's ends collect more volume. Per-level volumes are
/// floored; the shortfall is handled by `reconcile_volume`.
fn distribute_volume<R: Rng + ?Sized>(
    candle: &Candle,
    grid: &TickGrid,
    total_volume: u64,
    rng: &mut R,
) -> Vec<FootprintLevel> {
    let tick = grid.tick;
    let raw_weights: Vec<f64> = grid
        .prices
        .iter()
        .map(|&price| {
            let distance = (price - candle.open).abs().min((price - candle.close).abs());
            rng.r#gen::<f64>() / (distance + tick)
        })
        .collect();
    let weights = normalize_manhattan(&raw_weights);

    let split = &FOOTPRINT.split;
    let bias = if candle.is_bullish() {
        split.bullish_bias
    } else {
        split.bearish_bias
    };

    grid.prices
        .iter()
        .zip(weights)
        .map(|(&price, weight)| {
            let level_volume = (weight * total_volume as f64).floor() as u64;
            let ask_share = rng.r#gen::<f64>() * split.bias_spread + bias;
            let ask = ((level_volume as f64 * ask_share).floor() as u64).min(level_volume);
            FootprintLevel::new(price, level_volume - ask, ask)
        })
        .collect()
}

/// Restore `sum(levels.volume) == total_volume`.
///
/// The difference goes to the first level with the largest volume. A
/// surplus is added to its ask side; a deficit comes out of whichever side
/// can cover it, and anything the level cannot cover is drained from the
/// remaining levels in ascending price order. Always recomputes the target
/// level, even when there is nothing to move.
pub(crate) fn reconcile_volume(levels: &mut [FootprintLevel], total_volume: u64) {
    let Some(target) = first_max_index(levels.iter().map(|l| l.volume)) else {
        return;
    };

    let allocated: u64 = levels.iter().map(|l| l.volume).sum();
    let diff = total_volume as i128 - allocated as i128;

    if DEBUG_FLAGS.print_reconciliation && diff != 0 {
        log::debug!(
            "Reconciling {} units at level {:.8} (allocated {} of {})",
            diff,
            levels[target].price,
            allocated,
            total_volume
        );
    }

    if diff >= 0 {
        levels[target].ask += diff as u64;
        levels[target].refresh();
        return;
    }

    let mut deficit = diff.unsigned_abs() as u64;
    {
        let level = &mut levels[target];
        if level.ask >= deficit {
            level.ask -= deficit;
            deficit = 0;
        } else if level.bid >= deficit {
            level.bid -= deficit;
            deficit = 0;
        } else {
            drain_level(level, &mut deficit);
        }
        level.refresh();
    }

    if deficit > 0 {
        log::warn!(
            "Reconciliation deficit of {} exceeds largest level; draining neighbours",
            deficit
        );
        for level in levels.iter_mut() {
            if deficit == 0 {
                break;
            }
            drain_level(level, &mut deficit);
            level.refresh();
        }
    }
}

fn drain_level(level: &mut FootprintLevel, deficit: &mut u64) {
    let from_ask = level.ask.min(*deficit);
    level.ask -= from_ask;
    *deficit -= from_ask;

    let from_bid = level.bid.min(*deficit);
    level.bid -= from_bid;
    *deficit -= from_bid;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Imbalance;
    use crate::utils::maths_utils::price_to_key;

    fn seeded(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    fn sample_candles() -> Vec<Candle> {
        vec![
            Candle::new(0, 100.0, 112.0, 100.0, 110.0, Some(1_000.0)),
            Candle::new(60, 100.3, 104.9, 100.3, 101.0, Some(57.0)),
            Candle::new(120, 0.52, 0.58, 0.50, 0.51, Some(12_345.0)),
            Candle::new(180, 25_000.0, 25_900.0, 24_100.0, 25_500.0, Some(3.0)),
            Candle::new(240, 10.0, 10.0, 10.0, 10.0, Some(500.0)),
            Candle::new(300, 50.0, 55.0, 45.0, 46.0, None),
            Candle::new(360, 1.0, 2.0, 0.5, 1.5, Some(0.0)),
        ]
    }

    #[test]
    fn test_volume_conservation() {
        for seed in 0..50 {
            let mut rng = seeded(seed);
            for candle in sample_candles() {
                let fp = synthesize(&candle, &mut rng).expect("valid candle");
                assert_eq!(
                    fp.level_volume_sum(),
                    fp.volume,
                    "level volumes must sum to candle volume (seed {seed}, t={})",
                    candle.time
                );
                assert_eq!(fp.total_bid() + fp.total_ask(), fp.volume);
            }
        }
    }

    #[test]
    fn test_delta_consistency() {
        let mut rng = seeded(7);
        for candle in sample_candles() {
            let fp = synthesize(&candle, &mut rng).expect("valid candle");
            for level in &fp.levels {
                assert_eq!(level.volume, level.bid + level.ask);
                assert_eq!(level.delta, level.ask as i64 - level.bid as i64);
                assert_eq!(level.imbalance, Imbalance::classify(level.bid, level.ask));
            }
            assert_eq!(fp.delta, fp.level_delta_sum());
            assert_eq!(fp.cumulative_delta, 0.0);
        }
    }

    #[test]
    fn test_level_bounds_and_order() {
        let mut rng = seeded(11);
        for candle in sample_candles() {
            let fp = synthesize(&candle, &mut rng).expect("valid candle");
            let lower = (candle.low / fp.tick).floor() * fp.tick;
            let upper = (candle.high / fp.tick).ceil() * fp.tick;
            assert!(!fp.levels.is_empty());
            assert!(fp.levels.windows(2).all(|w| w[0].price < w[1].price));
            for level in &fp.levels {
                assert!(level.price >= lower - 1e-8 && level.price <= upper + 1e-8);
            }
        }
    }

    #[test]
    fn test_outer_grid_candidates_present() {
        let candle = Candle::new(0, 101.0, 104.9, 100.3, 104.0, Some(800.0));
        let fp = synthesize(&candle, &mut seeded(3)).expect("valid candle");
        let first = fp.levels.first().expect("levels");
        let last = fp.levels.last().expect("levels");
        assert_eq!(price_to_key(first.price), price_to_key(100.0));
        assert_eq!(price_to_key(last.price), price_to_key(105.0));
    }

    #[test]
    fn test_flat_candle_gets_single_level() {
        let candle = Candle::new(0, 10.0, 10.0, 10.0, 10.0, Some(500.0));
        let fp = synthesize(&candle, &mut seeded(1)).expect("valid candle");
        assert_eq!(fp.levels.len(), 1);
        assert_eq!(fp.levels[0].price, 10.0);
        assert_eq!(fp.levels[0].volume, 500);
    }

    #[test]
    fn test_flat_candle_reports_nonzero_tick() {
        let candle = Candle::new(0, 10.0, 10.0, 10.0, 10.0, Some(500.0));
        let fp = synthesize(&candle, &mut seeded(2)).expect("valid candle");
        assert_eq!(fp.tick, 0.005);
        assert!(fp.levels.iter().all(|l| l.price == candle.low));
    }

    #[test]
    fn test_large_prices_keep_distinct_levels() {
        let candle = Candle::new(0, 9.5e9, 9.905e9, 9.41e9, 9.8e9, Some(2_000.0));
        let fp = synthesize(&candle, &mut seeded(9)).expect("valid candle");
        assert!(fp.levels.len() > 1);
        assert!(fp.levels.windows(2).all(|w| w[0].price < w[1].price));
        assert!(fp.levels[0].price > candle.low - fp.tick);
        assert!(fp.levels[fp.levels.len() - 1].price < candle.high + fp.tick);
        assert_eq!(fp.level_volume_sum(), 2_000);
    }

    #[test]
    fn test_price_beyond_key_range_rejected() {
        let candle = Candle::new(0, 2.0e11, 2.05e11, 1.95e11, 2.01e11, Some(2_000.0));
        assert!(matches!(
            synthesize(&candle, &mut seeded(1)),
            Err(crate::error::EngineError::InvalidPrice { field: "open", .. })
        ));
    }

    #[test]
    fn test_volume_bounds() {
        let at_limit = Candle::new(0, 100.0, 112.0, 100.0, 110.0, Some(1e12));
        let fp = synthesize(&at_limit, &mut seeded(4)).expect("valid candle");
        assert_eq!(fp.volume, 1_000_000_000_000);
        assert_eq!(fp.level_volume_sum(), fp.volume);

        let too_big = Candle::new(0, 100.0, 112.0, 100.0, 110.0, Some(1e20));
        assert_eq!(
            synthesize(&too_big, &mut seeded(4)),
            Err(crate::error::EngineError::InvalidVolume { value: 1e20 })
        );
    }

    #[test]
    fn test_inverted_range_rejected() {
        let candle = Candle::new(0, 10.0, 9.0, 11.0, 10.0, Some(500.0));
        assert!(matches!(
            synthesize(&candle, &mut seeded(1)),
            Err(crate::error::EngineError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_placeholder_volume_range() {
        let candle = Candle::new(0, 50.0, 55.0, 45.0, 46.0, None);
        for seed in 0..200 {
            let fp = synthesize(&candle, &mut seeded(seed)).expect("valid candle");
            assert!((100..1100).contains(&fp.volume), "volume {} out of range", fp.volume);
        }
    }

    #[test]
    fn test_real_volume_is_rounded() {
        let candle = Candle::new(0, 50.0, 55.0, 45.0, 46.0, Some(1234.6));
        let fp = synthesize(&candle, &mut seeded(5)).expect("valid candle");
        assert_eq!(fp.volume, 1235);
    }

    #[test]
    fn test_bullish_candle_leans_to_ask() {
        let candle = Candle::new(0, 100.0, 112.0, 99.0, 111.0, Some(10_000.0));
        for seed in 0..20 {
            let fp = synthesize(&candle, &mut seeded(seed)).expect("valid candle");
            assert!(fp.total_ask() > fp.total_bid());
            assert!(fp.delta > 0);
        }
    }

    #[test]
    fn test_same_seed_same_footprint() {
        let candle = Candle::new(0, 100.0, 112.0, 99.0, 111.0, None);
        let a = synthesize(&candle, &mut seeded(99)).expect("valid candle");
        let b = synthesize(&candle, &mut seeded(99)).expect("valid candle");
        assert_eq!(a, b);
    }

    #[test]
    fn test_series_reproducible_and_ordered() {
        let candles = sample_candles();
        let a = synthesize_series(&candles, 42).expect("valid series");
        let b = synthesize_series(&candles, 42).expect("valid series");
        assert_eq!(a, b);
        assert_eq!(a.len(), candles.len());
        for (fp, candle) in a.iter().zip(&candles) {
            assert_eq!(fp.time, candle.time);
        }

        // Candle i is synthesized exactly as a standalone call seeded with 42 + i
        let third = synthesize(&candles[2], &mut seeded(44)).expect("valid candle");
        assert_eq!(a[2], third);
    }

    #[test]
    fn test_series_fails_without_partial_output() {
        let mut candles = sample_candles();
        candles.push(Candle::new(999, 1.0, 0.5, 2.0, 1.0, Some(10.0)));
        assert!(synthesize_series(&candles, 1).is_err());
    }

    #[test]
    fn test_reconcile_surplus_goes_to_first_max() {
        let mut levels = vec![
            FootprintLevel::new(1.0, 5, 5),
            FootprintLevel::new(2.0, 10, 10),
            FootprintLevel::new(3.0, 0, 20),
        ];
        // Allocated 50; the two 20-volume levels tie and the lower price wins
        reconcile_volume(&mut levels, 53);
        assert_eq!(levels[1].ask, 13);
        assert_eq!(levels[1].volume, 23);
        assert_eq!(levels[1].delta, 3);
        assert_eq!(levels[2].volume, 20);
    }

    #[test]
    fn test_reconcile_noop_when_balanced() {
        let mut levels = vec![FootprintLevel::new(1.0, 5, 5), FootprintLevel::new(2.0, 1, 1)];
        let before = levels.clone();
        reconcile_volume(&mut levels, 12);
        assert_eq!(levels, before);
    }

    #[test]
    fn test_reconcile_deficit_uses_side_that_fits() {
        // ask 2 cannot absorb 4, bid 8 can
        let mut levels = vec![FootprintLevel::new(1.0, 8, 2), FootprintLevel::new(2.0, 1, 1)];
        reconcile_volume(&mut levels, 8);
        assert_eq!(levels[0].bid, 4);
        assert_eq!(levels[0].ask, 2);
        assert_eq!(levels.iter().map(|l| l.volume).sum::<u64>(), 8);
    }

    #[test]
    fn test_reconcile_deficit_drains_neighbours() {
        let mut levels = vec![
            FootprintLevel::new(1.0, 3, 3),
            FootprintLevel::new(2.0, 4, 4),
            FootprintLevel::new(3.0, 2, 2),
        ];
        reconcile_volume(&mut levels, 5);
        assert_eq!(levels.iter().map(|l| l.volume).sum::<u64>(), 5);
        assert!(levels.iter().all(|l| l.volume == l.bid + l.ask));
    }
}
