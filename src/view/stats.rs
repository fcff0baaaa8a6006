//! Aggregate stats shown under the arena

use crate::sim::ArenaState;

/// Counter values pushed to the display
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ArenaStats {
    pub total_damage: f64,
    pub enemies_defeated: u32,
    pub elapsed_seconds: f64,
}

impl ArenaStats {
    pub fn capture(state: &ArenaState) -> Self {
        Self {
            total_damage: state.total_damage,
            enemies_defeated: state.enemies_defeated,
            elapsed_seconds: state.elapsed_secs,
        }
    }

    /// (label, value) rows in display order
    pub fn rows(&self) -> [(&'static str, String); 3] {
        [
            ("Damage dealt", format_damage(self.total_damage)),
            ("Enemies defeated", self.enemies_defeated.to_string()),
            ("Simulation time", format_elapsed(self.elapsed_seconds)),
        ]
    }
}

/// Rounded damage with space-grouped thousands, e.g. `12 345 HP`
pub fn format_damage(total: f64) -> String {
    let rounded = total.round().max(0.0) as u64;
    let digits = rounded.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    format!("{} HP", grouped)
}

pub fn format_elapsed(seconds: f64) -> String {
    format!("{:.1} s", seconds)
}

/// Lets stats through at most once per interval
#[derive(Debug, Clone)]
pub struct StatThrottle {
    interval_ms: f64,
    last_update_ms: f64,
}

impl StatThrottle {
    pub fn new(interval_ms: f64, start_ms: f64) -> Self {
        Self {
            interval_ms,
            last_update_ms: start_ms,
        }
    }

    /// True (and restarts the interval) when an update is due at `now_ms`
    pub fn ready(&mut self, now_ms: f64) -> bool {
        if now_ms - self.last_update_ms >= self.interval_ms {
            self.last_update_ms = now_ms;
            true
        } else {
            false
        }
    }
}
