//! Higher-timeframe aggregation configuration

pub struct HtfConfig {
    // Period used by the CLI when none is given
    pub default_period_minutes: i64,
    // Share of bucket volume the value area must cover
    pub value_area_pct: f64,
    // Scale applied to prices to build canonical integer level keys (1e-8 precision)
    pub price_key_scale: f64,
    // Largest accepted |price|; keeps every grid price's key well inside i64
    pub max_abs_price: f64,
}

pub const HTF: HtfConfig = HtfConfig {
    default_period_minutes: 60,
    value_area_pct: 0.70,
    price_key_scale: 1e8,
    max_abs_price: 1e10,
};
