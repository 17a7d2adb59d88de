// Footprint synthesis and higher-timeframe aggregation
pub mod cumulative_delta;
pub mod footprint_synth;
pub mod htf_aggregator;
pub mod tick_grid;
pub mod value_area;

// Re-export commonly used functions
pub use cumulative_delta::{CumulativeDelta, accumulate_cumulative_delta};
pub use footprint_synth::{synthesize, synthesize_series, synthesize_unseeded};
pub use htf_aggregator::{HtfAggregator, aggregate, aggregate_with_value_area};
pub use tick_grid::{TickGrid, build_grid, tick_size_for_range};
pub use value_area::{ValueArea, value_area};
