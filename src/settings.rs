//! Mod option catalogue
//!
//! The damage multipliers and speed categories offered to the user.

use serde::{Deserialize, Serialize};

/// A selectable damage multiplier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageMultiplierOption {
    pub label: &'static str,
    pub value: f32,
}

pub const DAMAGE_MULTIPLIER_OPTIONS: [DamageMultiplierOption; 4] = [
    DamageMultiplierOption {
        label: "1.0× (In step)",
        value: 1.0,
    },
    DamageMultiplierOption {
        label: "1.5× (Rapid fire)",
        value: 1.5,
    },
    DamageMultiplierOption {
        label: "2.0× (Assault mode)",
        value: 2.0,
    },
    DamageMultiplierOption {
        label: "2.5× (Emergency damage)",
        value: 2.5,
    },
];

pub const DEFAULT_DAMAGE_MULTIPLIER: f32 = DAMAGE_MULTIPLIER_OPTIONS[0].value;

/// Movement speed category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SpeedSetting {
    #[default]
    Standard,
    Fast,
    VeryFast,
}

pub const DEFAULT_SPEED_SETTING: SpeedSetting = SpeedSetting::Standard;

impl SpeedSetting {
    pub const ALL: [SpeedSetting; 3] = [
        SpeedSetting::Standard,
        SpeedSetting::Fast,
        SpeedSetting::VeryFast,
    ];

    /// Stored/wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            SpeedSetting::Standard => "standard",
            SpeedSetting::Fast => "fast",
            SpeedSetting::VeryFast => "very-fast",
        }
    }

    /// Factor applied to the base movement speed
    pub fn multiplier(&self) -> f32 {
        match self {
            SpeedSetting::Standard => 1.0,
            SpeedSetting::Fast => 1.4,
            SpeedSetting::VeryFast => 1.85,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SpeedSetting::Standard => "Standard",
            SpeedSetting::Fast => "Fast",
            SpeedSetting::VeryFast => "Very fast",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SpeedSetting::Standard => "Baseline movement speed for smart teammates.",
            SpeedSetting::Fast => "Increased speed for aggressive pursuit.",
            SpeedSetting::VeryFast => "Maximum reaction speed and flanking pressure.",
        }
    }
}

/// Whether `value` is one of the catalogue multipliers
pub fn is_known_damage_multiplier(value: f32) -> bool {
    DAMAGE_MULTIPLIER_OPTIONS.iter().any(|o| o.value == value)
}

/// Display label for a damage multiplier, falling back to `"{value:.1}×"`
pub fn resolve_damage_label(multiplier: f32) -> String {
    DAMAGE_MULTIPLIER_OPTIONS
        .iter()
        .find(|o| o.value == multiplier)
        .map(|o| o.label.to_string())
        .unwrap_or_else(|| format!("{:.1}×", multiplier))
}

pub fn resolve_speed_label(setting: SpeedSetting) -> &'static str {
    setting.label()
}
