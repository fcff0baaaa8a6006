//! Arena tuning
//!
//! Defaults mirror [`crate::consts`]. Deserializable so a host page or the
//! native runner can override individual fields from JSON.

use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Friendly speed before the speed multiplier (units per second)
    pub base_speed: f32,
    /// Melee reach
    pub attack_range: f32,
    /// Approach stops once within `approach_factor * attack_range`
    pub approach_factor: f32,
    /// Damage per second before the damage multiplier
    pub base_damage_per_second: f32,
    /// Minimum interval between stat pushes (ms)
    pub stat_refresh_interval_ms: f64,
    /// Upper bound on a single frame's elapsed time (ms). `None` keeps raw deltas,
    /// so a tab resuming from the background can produce one very large step.
    pub max_frame_delta_ms: Option<f64>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            base_speed: BASE_BOT_SPEED,
            attack_range: ATTACK_RANGE,
            approach_factor: APPROACH_FACTOR,
            base_damage_per_second: BASE_DAMAGE_PER_SECOND,
            stat_refresh_interval_ms: STAT_REFRESH_INTERVAL_MS,
            max_frame_delta_ms: None,
        }
    }
}

impl ArenaConfig {
    /// Distance beyond which a friendly keeps closing in
    #[inline]
    pub fn approach_threshold(&self) -> f32 {
        self.attack_range * self.approach_factor
    }

    /// Parse a (possibly partial) JSON override
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Apply the optional frame-delta cap
    pub fn frame_delta_ms(&self, raw_ms: f64) -> f64 {
        let raw_ms = raw_ms.max(0.0);
        match self.max_frame_delta_ms {
            Some(cap) => raw_ms.min(cap),
            None => raw_ms,
        }
    }
}
