//! Indicator defaults

pub struct IndicatorConfig {
    pub default_rsi_period: usize,
    pub default_sma_period: usize,
    pub default_ema_period: usize,
}

pub const INDICATORS: IndicatorConfig = IndicatorConfig {
    default_rsi_period: 14,
    default_sma_period: 20,
    default_ema_period: 20,
};
