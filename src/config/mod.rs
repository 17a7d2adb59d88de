//! Configuration module for the footprint engine.

pub mod aggregation;
pub mod footprint;
pub mod indicators;

mod debug; // Private: files use crate::config::DEBUG_FLAGS, not crate::config::debug::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

// Re-export commonly used items
pub use aggregation::HTF;
pub use footprint::FOOTPRINT;
pub use indicators::INDICATORS;
