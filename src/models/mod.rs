// Output models for footprint synthesis, HTF aggregation and indicators.
// Plain data: the algorithms that fill them live in `analysis` and `indicators`.

pub mod footprint;
pub mod htf;
pub mod indicator;

// Re-export key types for convenience
pub use footprint::{FootprintCandle, FootprintLevel, Imbalance};
pub use htf::{HtfCandle, HtfProfileLevel};
pub use indicator::IndicatorPoint;
