//! Higher-timeframe roll-up of footprint candles.
//!
//! A single left-to-right scan: candles are grouped by
//! `floor(time / period) * period`, and each group becomes one `HtfCandle`
//! with the constituent levels merged into a price-keyed volume profile.
//! The scan is order dependent and must run sequentially; it can sit behind
//! the synthesizer as a streaming consumer via [`HtfAggregator::push`].

use std::collections::BTreeMap;

use crate::analysis::value_area::value_area;
use crate::config::DEBUG_FLAGS;
use crate::domain::HtfPeriod;
use crate::error::{EngineError, Result};
use crate::models::{FootprintCandle, HtfCandle, HtfProfileLevel};
use crate::utils::maths_utils::{first_max_index, key_to_price, price_to_key};
use crate::utils::time_utils::epoch_sec_to_utc;

/// Roll `candles` up into `period_minutes` buckets.
///
/// Input must be in ascending time order for the buckets to be meaningful.
/// Empty input yields an empty output.
pub fn aggregate(candles: &[FootprintCandle], period_minutes: i64) -> Result<Vec<HtfCandle>> {
    let period = HtfPeriod::from_minutes(period_minutes)?;
    Ok(run(HtfAggregator::new(period), candles))
}

/// As [`aggregate`], also filling each candle's value area at `target_pct`.
pub fn aggregate_with_value_area(
    candles: &[FootprintCandle],
    period_minutes: i64,
    target_pct: f64,
) -> Result<Vec<HtfCandle>> {
    let period = HtfPeriod::from_minutes(period_minutes)?;
    let aggregator = HtfAggregator::new(period).with_value_area(target_pct)?;
    Ok(run(aggregator, candles))
}

fn run(mut aggregator: HtfAggregator, candles: &[FootprintCandle]) -> Vec<HtfCandle> {
    let mut finished: Vec<HtfCandle> = candles
        .iter()
        .filter_map(|candle| aggregator.push(candle))
        .collect();
    finished.extend(aggregator.finish());
    finished
}

/// Streaming aggregator holding at most one open bucket.
#[derive(Debug, Clone)]
pub struct HtfAggregator {
    period: HtfPeriod,
    value_area_pct: Option<f64>,
    current: Option<Bucket>,
}

impl HtfAggregator {
    pub fn new(period: HtfPeriod) -> Self {
        Self {
            period,
            value_area_pct: None,
            current: None,
        }
    }

    /// Compute a value area covering `target_pct` of each bucket's volume.
    pub fn with_value_area(mut self, target_pct: f64) -> Result<Self> {
        if !(target_pct > 0.0 && target_pct <= 1.0) {
            return Err(EngineError::InvalidValueAreaPct { pct: target_pct });
        }
        self.value_area_pct = Some(target_pct);
        Ok(self)
    }

    pub fn period(&self) -> HtfPeriod {
        self.period
    }

    /// Feed the next candle. Returns the previous bucket once a candle from a
    /// different bucket arrives.
    pub fn push(&mut self, candle: &FootprintCandle) -> Option<HtfCandle> {
        let bucket_start = self.period.bucket_start(candle.time);

        if let Some(bucket) = self.current.as_mut()
            && bucket.start == bucket_start
        {
            bucket.absorb(candle);
            return None;
        }

        let finished = self.current.take().map(|bucket| {
            if bucket_start < bucket.start {
                log::warn!(
                    "Candle at {} falls before open bucket {}; input is out of order",
                    epoch_sec_to_utc(candle.time),
                    epoch_sec_to_utc(bucket.start)
                );
            }
            self.finalize(bucket)
        });

        let mut bucket = Bucket::seed(bucket_start, candle);
        bucket.absorb(candle);
        self.current = Some(bucket);

        finished
    }

    /// Close the open bucket at end of stream.
    pub fn finish(&mut self) -> Option<HtfCandle> {
        self.current.take().map(|bucket| self.finalize(bucket))
    }

    fn finalize(&self, bucket: Bucket) -> HtfCandle {
        let candle = bucket.into_candle(self.period, self.value_area_pct);

        if DEBUG_FLAGS.print_htf_buckets {
            log::debug!(
                "HTF {} bucket {}: {} levels, volume {}, POC {:.8}",
                self.period.label(),
                epoch_sec_to_utc(candle.time),
                candle.levels.len(),
                candle.volume,
                candle.poc_price
            );
        }

        candle
    }
}

/// An open bucket. Levels are keyed by canonical integer price so that
/// grid prices from candles with different ticks merge without float
/// equality issues; the ordered map also yields them price-ascending.
#[derive(Debug, Clone)]
struct Bucket {
    start: i64,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
    levels: BTreeMap<i64, HtfProfileLevel>,
}

impl Bucket {
    fn seed(start: i64, candle: &FootprintCandle) -> Self {
        Bucket {
            start,
            open: candle.open,
            high: candle.high,
            low: candle.low,
            close: candle.close,
            volume: 0,
            levels: BTreeMap::new(),
        }
    }

    fn absorb(&mut self, candle: &FootprintCandle) {
        self.high = self.high.max(candle.high);
        self.low = self.low.min(candle.low);
        self.close = candle.close;
        self.volume += candle.volume;

        for level in &candle.levels {
            let key = price_to_key(level.price);
            let merged = self.levels.entry(key).or_insert_with(|| HtfProfileLevel {
                price: key_to_price(key),
                volume: 0,
                bid: 0,
                ask: 0,
            });
            merged.volume += level.volume;
            merged.bid += level.bid;
            merged.ask += level.ask;
        }
    }

    fn into_candle(self, period: HtfPeriod, value_area_pct: Option<f64>) -> HtfCandle {
        let levels: Vec<HtfProfileLevel> = self.levels.into_values().collect();

        // An empty profile has no POC; fall back to the bucket close.
        let poc_price = first_max_index(levels.iter().map(|l| l.volume))
            .map(|idx| levels[idx].price)
            .unwrap_or(self.close);

        let area = value_area_pct.and_then(|pct| value_area(&levels, pct).ok().flatten());

        HtfCandle {
            time: self.start,
            end_time: period.bucket_end(self.start),
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
            volume: self.volume,
            levels,
            poc_price,
            value_area_high: area.map(|a| a.high),
            value_area_low: area.map(|a| a.low),
        }
    }
}
