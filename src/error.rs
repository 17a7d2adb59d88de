//! Crate-level error types.
//!
//! [`EngineError`] covers every way a synthesis, aggregation or indicator
//! call can be rejected. All public operations validate their inputs up
//! front and return one of these variants instead of producing partial
//! output.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// A candle's high is below its low.
    #[error("invalid range: high {high} is below low {low}")]
    InvalidRange { high: f64, low: f64 },

    /// A price field is NaN or infinite.
    #[error("invalid price: {field} = {value}")]
    InvalidPrice { field: &'static str, value: f64 },

    /// A supplied volume is negative or not finite.
    #[error("invalid volume: {value}")]
    InvalidVolume { value: f64 },

    /// An aggregation or indicator period is zero or negative.
    #[error("invalid period: {period}")]
    InvalidPeriod { period: i64 },

    /// The series is shorter than the calculation needs.
    #[error("insufficient data: need at least {needed} candles, got {available}")]
    InsufficientData { needed: usize, available: usize },

    /// Value area target must lie in (0, 1].
    #[error("invalid value area percentage: {pct}")]
    InvalidValueAreaPct { pct: f64 },
}
