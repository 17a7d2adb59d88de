//! Value area around the point of control.
//!
//! Starts at the POC level and grows one level at a time towards whichever
//! neighbour (above or below) carries more volume, until the covered volume
//! reaches the target share of the profile. Ties grow upwards. When one side
//! runs out of levels the other side keeps growing.

use serde::{Deserialize, Serialize};

use crate::config::DEBUG_FLAGS;
use crate::error::{EngineError, Result};
use crate::models::HtfProfileLevel;
use crate::utils::maths_utils::first_max_index;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueArea {
    pub low: f64,
    pub high: f64,
    /// Volume inside `[low, high]`.
    pub volume: u64,
}

/// Compute the value area of a price-ascending profile.
///
/// Returns `Ok(None)` for an empty profile or one with no volume.
pub fn value_area(levels: &[HtfProfileLevel], target_pct: f64) -> Result<Option<ValueArea>> {
    if !(target_pct > 0.0 && target_pct <= 1.0) {
        return Err(EngineError::InvalidValueAreaPct { pct: target_pct });
    }

    let total: u64 = levels.iter().map(|l| l.volume).sum();
    let Some(poc) = first_max_index(levels.iter().map(|l| l.volume)) else {
        return Ok(None);
    };
    if total == 0 {
        return Ok(None);
    }

    // Small epsilon so 0.7 * 100 does not ceil to 71.
    let target = ((target_pct * total as f64 - 1e-9).ceil() as u64).min(total);

    let (mut lo, mut hi) = (poc, poc);
    let mut covered = levels[poc].volume;

    while covered < target {
        let below = lo.checked_sub(1).map(|i| levels[i].volume);
        let above = levels.get(hi + 1).map(|l| l.volume);

        match (below, above) {
            (Some(b), Some(a)) if b > a => {
                lo -= 1;
                covered += b;
            }
            (_, Some(a)) => {
                hi += 1;
                covered += a;
            }
            (Some(b), None) => {
                lo -= 1;
                covered += b;
            }
            (None, None) => break,
        }
    }

    if DEBUG_FLAGS.print_value_area {
        log::debug!(
            "Value area {:.8}..{:.8} covers {} of {} (target {})",
            levels[lo].price,
            levels[hi].price,
            covered,
            total,
            target
        );
    }

    Ok(Some(ValueArea {
        low: levels[lo].price,
        high: levels[hi].price,
        volume: covered,
    }))
}
