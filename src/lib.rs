//! SmartTeammates - mod settings with a live arena preview
//!
//! Core modules:
//! - `sim`: Arena simulation (targeting, movement, melee damage, respawn)
//! - `renderer`: Draw command generation and canvas backends
//! - `platform`: Browser/native clock and loop cancellation
//! - `persistence`: Key-value stores and persisted values
//! - `preferences`: The two user preferences and their hydration
//! - `settings`: Catalogue of damage/speed options
//! - `view`: Arena view, frame loop and stat throttling

pub mod config;
pub mod persistence;
pub mod platform;
pub mod preferences;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod view;

pub use config::ArenaConfig;
pub use preferences::{PreferenceSnapshot, PreferenceStore};
pub use settings::SpeedSetting;

/// Arena configuration constants
pub mod consts {
    /// Logical drawing surface size
    pub const CANVAS_WIDTH: f32 = 720.0;
    pub const CANVAS_HEIGHT: f32 = 420.0;

    /// Friendly movement speed before the speed multiplier (units per second)
    pub const BASE_BOT_SPEED: f32 = 110.0;
    /// Melee reach (units)
    pub const ATTACK_RANGE: f32 = 34.0;
    /// Friendlies stop closing in once within this fraction of the attack range
    pub const APPROACH_FACTOR: f32 = 0.65;
    /// Damage per second before the damage multiplier
    pub const BASE_DAMAGE_PER_SECOND: f32 = 22.0;
    /// Minimum interval between stat pushes to the display (ms)
    pub const STAT_REFRESH_INTERVAL_MS: f64 = 180.0;

    /// Population sizes
    pub const FRIENDLY_COUNT: usize = 4;
    pub const HOSTILE_COUNT: usize = 4;
    /// Id assigned to the first hostile; later hostiles count up from here
    pub const FIRST_HOSTILE_ID: u32 = 100;

    /// Friendly defaults
    pub const FRIENDLY_RADIUS: f32 = 16.0;
    pub const FRIENDLY_MAX_HEALTH: f32 = 150.0;

    /// Hostile defaults
    pub const HOSTILE_RADIUS: f32 = 18.0;
    pub const HOSTILE_MIN_HEALTH: f32 = 120.0;
    pub const HOSTILE_MAX_HEALTH: f32 = 170.0;

    /// Grid spacing for the background
    pub const GRID_SPACING: f32 = 60.0;
}
