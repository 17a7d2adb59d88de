//! Footprint synthesis configuration

/// Bid/ask split settings
pub struct SplitSettings {
    // Baseline ask share when close > open
    pub bullish_bias: f64,
    // Baseline ask share otherwise
    pub bearish_bias: f64,
    // Width of the random component added on top of the bias
    pub bias_spread: f64,
}

/// Imbalance flag thresholds
pub struct ImbalanceSettings {
    // One side must exceed `ratio` times the other side...
    pub ratio: u64,
    // ...and be strictly larger than this absolute floor
    pub min_volume: u64,
}

/// The Master Footprint Configuration
pub struct FootprintConfig {
    // Upper bound on the number of price steps across a candle's range
    pub max_levels: usize,
    // (exclusive range ceiling, tick) pairs, checked in order
    pub tick_table: &'static [(f64, f64)],
    // Tick used when the range exceeds every ceiling in `tick_table`
    pub fallback_tick: f64,
    // Placeholder volume drawn when a candle carries none: [start, end)
    pub placeholder_volume: (u64, u64),
    // Largest accepted candle volume; leaves headroom for u64 bucket sums
    pub max_volume: f64,

    // Sub-groups
    pub split: SplitSettings,
    pub imbalance: ImbalanceSettings,
}

pub const FOOTPRINT: FootprintConfig = FootprintConfig {
    max_levels: 12,
    tick_table: &[
        (0.1, 0.005),
        (1.0, 0.05),
        (10.0, 0.5),
        (100.0, 2.0),
        (1000.0, 10.0),
    ],
    fallback_tick: 25.0,
    placeholder_volume: (100, 1100),
    max_volume: 1e12,

    split: SplitSettings {
        bullish_bias: 0.6,
        bearish_bias: 0.4,
        bias_spread: 0.4,
    },

    imbalance: ImbalanceSettings {
        ratio: 3,
        min_volume: 50,
    },
};
