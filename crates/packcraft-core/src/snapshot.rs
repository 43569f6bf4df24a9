//! Weight checkpoint
//!
//! A single saved (weight, time) pair, overwritten on each save. Not a
//! history log.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightSnapshot {
    pub total_g: f64,
    #[serde(with = "time::serde::timestamp")]
    pub taken_at: OffsetDateTime,
}

impl WeightSnapshot {
    pub fn now(total_g: f64) -> Self {
        Self {
            total_g,
            taken_at: OffsetDateTime::now_utc(),
        }
    }

    /// Signed weight change since this checkpoint (negative = lighter)
    pub fn delta_from(&self, current_total_g: f64) -> f64 {
        current_total_g - self.total_g
    }
}
