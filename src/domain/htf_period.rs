use crate::error::{EngineError, Result};
use crate::utils::TimeUtils;

/// A validated, strictly positive higher-timeframe period.
/// The length in seconds is fixed at construction and always fits an `i64`.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub struct HtfPeriod {
    minutes: i64,
    seconds: i64,
}

impl HtfPeriod {
    pub fn from_minutes(minutes: i64) -> Result<Self> {
        if minutes <= 0 {
            return Err(EngineError::InvalidPeriod { period: minutes });
        }
        let seconds = minutes
            .checked_mul(TimeUtils::SECS_IN_MIN)
            .ok_or(EngineError::InvalidPeriod { period: minutes })?;
        Ok(Self { minutes, seconds })
    }

    pub fn minutes(&self) -> i64 {
        self.minutes
    }

    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    /// Start of the bucket containing `time` (epoch seconds).
    ///
    /// Floors towards negative infinity, so pre-epoch timestamps land in the
    /// bucket below. Saturates at `i64::MIN` when that bucket would start
    /// before it.
    pub fn bucket_start(&self, time: i64) -> i64 {
        time.saturating_sub(time.rem_euclid(self.seconds))
    }

    /// Exclusive end of the bucket starting at `start`, saturating at `i64::MAX`.
    pub fn bucket_end(&self, start: i64) -> i64 {
        start.saturating_add(self.seconds)
    }

    pub fn label(&self) -> String {
        TimeUtils::period_minutes_to_string(self.minutes)
    }
}

impl std::fmt::Display for HtfPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} ({} min)", self.label(), self.minutes)
    }
}
