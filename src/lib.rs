//! Market microstructure and multi-timeframe aggregation engine.
//!
//! Turns plain OHLCV candles into synthetic footprint candles (per-price
//! bid/ask volume), rolls those up into higher-timeframe volume-profile
//! candles with a point of control, and computes SMA/EMA/RSI over any
//! candle series.

#![allow(clippy::collapsible_if)]

// Core modules
pub mod analysis;
pub mod config;
pub mod domain;
pub mod error;
pub mod indicators;
pub mod models;
pub mod utils;

// Re-export commonly used types
pub use analysis::{
    CumulativeDelta, HtfAggregator, accumulate_cumulative_delta, aggregate,
    aggregate_with_value_area, synthesize, synthesize_series, synthesize_unseeded,
};
pub use domain::{Candle, HtfPeriod, PriceBar};
pub use error::{EngineError, Result};
pub use indicators::{IndicatorKind, compute_ema, compute_indicator, compute_rsi, compute_sma};
pub use models::{FootprintCandle, FootprintLevel, HtfCandle, HtfProfileLevel, Imbalance, IndicatorPoint};

// CLI argument parsing
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// JSON file holding an array of candles (reads stdin when omitted)
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Higher-timeframe period in minutes
    #[arg(long, default_value_t = config::HTF.default_period_minutes)]
    pub period_minutes: i64,

    /// Seed for footprint synthesis (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Indicator to compute over the input closes (sma, ema, rsi)
    #[arg(long)]
    pub indicator: Option<IndicatorKind>,

    /// Indicator period (defaults per indicator)
    #[arg(long)]
    pub indicator_period: Option<usize>,

    /// Fill value area high/low on each higher-timeframe candle
    #[arg(long, default_value_t = false)]
    pub value_area: bool,

    /// Print machine-readable JSON instead of a summary
    #[arg(long, default_value_t = false)]
    pub json: bool,
}
