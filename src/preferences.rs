//! User preferences
//!
//! The damage multiplier and speed category, each mirrored to its own storage key.

use crate::persistence::{KeyValueStore, Persistent};
use crate::settings::{
    DEFAULT_DAMAGE_MULTIPLIER, DEFAULT_SPEED_SETTING, SpeedSetting, is_known_damage_multiplier,
    resolve_damage_label, resolve_speed_label,
};

pub const DAMAGE_KEY: &str = "smartteammates:damageMultiplier";
pub const SPEED_KEY: &str = "smartteammates:speedSetting";

/// Multipliers read by the simulation once per tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreferenceSnapshot {
    pub damage_multiplier: f32,
    pub speed_multiplier: f32,
}

impl Default for PreferenceSnapshot {
    fn default() -> Self {
        Self::new(DEFAULT_DAMAGE_MULTIPLIER, DEFAULT_SPEED_SETTING)
    }
}

impl PreferenceSnapshot {
    pub fn new(damage_multiplier: f32, speed: SpeedSetting) -> Self {
        Self {
            damage_multiplier,
            speed_multiplier: speed.multiplier(),
        }
    }
}

/// Both preferences plus the store they persist to
#[derive(Debug)]
pub struct PreferenceStore<S> {
    store: S,
    damage: Persistent<f32>,
    speed: Persistent<SpeedSetting>,
}

impl<S: KeyValueStore> PreferenceStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            damage: Persistent::new(DAMAGE_KEY, DEFAULT_DAMAGE_MULTIPLIER),
            speed: Persistent::new(SPEED_KEY, DEFAULT_SPEED_SETTING),
        }
    }

    /// Load both values from the store
    pub fn hydrate(&mut self) {
        self.damage.hydrate(&self.store);
        self.speed.hydrate(&self.store);

        let mut damage = *self.damage.value();
        if !(damage.is_finite() && damage > 0.0) {
            log::warn!(
                "Stored damage multiplier {} is not a positive number; using {}",
                damage,
                DEFAULT_DAMAGE_MULTIPLIER
            );
            damage = DEFAULT_DAMAGE_MULTIPLIER;
            self.damage.set(damage);
        } else if !is_known_damage_multiplier(damage) {
            log::warn!(
                "Stored damage multiplier {} is not a catalogue option; using it as-is",
                damage
            );
        }
        log::info!(
            "Preferences hydrated: damage {}, speed {}",
            damage,
            self.speed.value().as_str()
        );
    }

    pub fn is_hydrated(&self) -> bool {
        self.damage.is_hydrated() && self.speed.is_hydrated()
    }

    /// Write pending changes. Errors are logged, never returned.
    pub fn flush(&mut self) {
        self.damage.persist(&mut self.store);
        self.speed.persist(&mut self.store);
    }

    pub fn has_pending_writes(&self) -> bool {
        self.damage.is_dirty() || self.speed.is_dirty()
    }

    /// Damage multiplier to display and simulate with (default until hydrated)
    pub fn damage_multiplier(&self) -> f32 {
        *self.damage.effective()
    }

    /// Speed category to display and simulate with (default until hydrated)
    pub fn speed_setting(&self) -> SpeedSetting {
        *self.speed.effective()
    }

    pub fn set_damage_multiplier(&mut self, value: f32) {
        self.damage.set(value);
    }

    pub fn update_damage_multiplier(&mut self, f: impl FnOnce(&f32) -> f32) {
        self.damage.update(f);
    }

    pub fn set_speed_setting(&mut self, value: SpeedSetting) {
        self.speed.set(value);
    }

    pub fn update_speed_setting(&mut self, f: impl FnOnce(&SpeedSetting) -> SpeedSetting) {
        self.speed.update(f);
    }

    pub fn snapshot(&self) -> PreferenceSnapshot {
        PreferenceSnapshot::new(self.damage_multiplier(), self.speed_setting())
    }

    /// One-line description of the active configuration
    pub fn summary(&self) -> String {
        format!(
            "Active: {} damage, {} speed",
            resolve_damage_label(self.damage_multiplier()),
            resolve_speed_label(self.speed_setting())
        )
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
