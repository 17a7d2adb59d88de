//! Technical indicators over a close-price series.
//!
//! All functions are pure and restartable: recomputing over any sub-window
//! of a series gives the values that window alone implies. Output points are
//! aligned to the tail of the input and carry the time of the candle they
//! were computed at.

pub mod ema;
pub mod rsi;
pub mod sma;

pub use ema::{Ema, compute_ema};
pub use rsi::{RsiIndicator, compute_rsi};
pub use sma::compute_sma;

use serde::{Deserialize, Serialize};

use crate::config::INDICATORS;
use crate::domain::PriceBar;
use crate::error::Result;
use crate::models::IndicatorPoint;

#[derive(
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Debug,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorKind {
    Sma,
    Ema,
    Rsi,
}

impl IndicatorKind {
    pub fn default_period(&self) -> usize {
        match self {
            IndicatorKind::Sma => INDICATORS.default_sma_period,
            IndicatorKind::Ema => INDICATORS.default_ema_period,
            IndicatorKind::Rsi => INDICATORS.default_rsi_period,
        }
    }
}

pub fn compute_indicator<B: PriceBar>(
    kind: IndicatorKind,
    data: &[B],
    period: usize,
) -> Result<Vec<IndicatorPoint>> {
    match kind {
        IndicatorKind::Sma => compute_sma(data, period),
        IndicatorKind::Ema => compute_ema(data, period),
        IndicatorKind::Rsi => compute_rsi(data, period),
    }
}


#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;
    use crate::models::{HtfCandle, HtfProfileLevel};

    #[test]
    fn test_kind_parsing_and_display() {
        assert_eq!(IndicatorKind::from_str("rsi").unwrap(), IndicatorKind::Rsi);
        assert_eq!(IndicatorKind::from_str("EMA").unwrap(), IndicatorKind::Ema);
        assert!(IndicatorKind::from_str("macd").is_err());
        let labels: Vec<String> = IndicatorKind::iter().map(|k| k.to_string()).collect();
        assert_eq!(labels, vec!["sma", "ema", "rsi"]);
    }

    #[test]
    fn test_dispatch_matches_direct_call() {
        let data = test_support::closes(&[1.0, 3.0, 2.0, 5.0, 4.0, 6.0]);
        assert_eq!(
            compute_indicator(IndicatorKind::Sma, &data, 2).unwrap(),
            compute_sma(&data, 2).unwrap()
        );
        assert_eq!(
            compute_indicator(IndicatorKind::Rsi, &data, 3).unwrap(),
            compute_rsi(&data, 3).unwrap()
        );
        assert_eq!(IndicatorKind::Rsi.default_period(), 14);
    }

    #[test]
    fn test_restartable_on_sub_window() {
        let data = test_support::closes(&[4.0, 8.0, 6.0, 10.0, 12.0, 7.0, 9.0]);
        let full = compute_sma(&data, 3).unwrap();
        let tail = compute_sma(&data[2..], 3).unwrap();
        assert_eq!(&full[2..], tail.as_slice());
    }

    #[test]
    fn test_runs_on_htf_candles() {
        let htf: Vec<HtfCandle> = [10.0, 20.0, 30.0]
            .iter()
            .enumerate()
            .map(|(i, &close)| HtfCandle {
                time: i as i64 * 3600,
                end_time: (i as i64 + 1) * 3600,
                open: close,
                high: close,
                low: close,
                close,
                volume: 1,
                levels: vec![HtfProfileLevel {
                    price: close,
                    volume: 1,
                    bid: 0,
                    ask: 1,
                }],
                poc_price: close,
                value_area_high: None,
                value_area_low: None,
            })
            .collect();
        let sma = compute_sma(&htf, 3).unwrap();
        assert_eq!(sma, vec![IndicatorPoint::new(7200, 20.0)]);
    }
}
