// Domain types and value objects
pub mod candle;
pub mod htf_period;

// Re-export commonly used types
pub use candle::{Candle, CandleType, PriceBar};
pub use htf_period::HtfPeriod;
