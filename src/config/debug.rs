//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep them `false` by default so the
//! library stays quiet even when the host application logs at `debug`.

pub struct DebugFlags {
    /// Emit the volume correction applied by footprint reconciliation.
    pub print_reconciliation: bool,
    /// Emit tick size and grid bounds chosen for each synthesized candle.
    pub print_tick_grid: bool,
    /// Emit a line for every finalized higher-timeframe bucket.
    pub print_htf_buckets: bool,
    /// Emit value area expansion results.
    pub print_value_area: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_reconciliation: false,
    print_tick_grid: false,
    print_htf_buckets: false,
    print_value_area: false,
};
