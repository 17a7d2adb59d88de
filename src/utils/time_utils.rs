use chrono::DateTime;

pub struct TimeUtils;

impl TimeUtils {
    pub const SECS_IN_MIN: i64 = 60;
    pub const SECS_IN_H: i64 = Self::SECS_IN_MIN * 60;
    pub const SECS_IN_D: i64 = Self::SECS_IN_H * 24;
    pub const SECS_IN_W: i64 = Self::SECS_IN_D * 7;
    pub const MINS_IN_H: i64 = 60;
    pub const MINS_IN_D: i64 = Self::MINS_IN_H * 24;
    pub const MINS_IN_W: i64 = Self::MINS_IN_D * 7;
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

    /// Convert a period in minutes to a shorthand label (e.g. `15m`, `4h`, `1d`).
    ///
    /// Whole weeks, days and hours collapse to the largest unit; anything
    /// else is reported in minutes.
    pub fn period_minutes_to_string(minutes: i64) -> String {
        match minutes {
            m if m > 0 && m % Self::MINS_IN_W == 0 => format!("{}w", m / Self::MINS_IN_W),
            m if m > 0 && m % Self::MINS_IN_D == 0 => format!("{}d", m / Self::MINS_IN_D),
            m if m > 0 && m % Self::MINS_IN_H == 0 => format!("{}h", m / Self::MINS_IN_H),
            m => format!("{}m", m),
        }
    }
}

pub fn epoch_sec_to_utc(epoch_sec: i64) -> String {
    // Used for display purposes
    match DateTime::from_timestamp(epoch_sec, 0) {
        Some(dt) => dt.format(TimeUtils::STANDARD_TIME_FORMAT).to_string(),
        None => format!("<invalid ts {}>", epoch_sec),
    }
}
