//! Arena simulation module
//!
//! All combat logic lives here. This module must stay free of rendering and
//! platform dependencies:
//! - Variable timestep, driven by the caller
//! - Seeded RNG only (owned by `ArenaState`)
//! - Stable iteration order (friendlies in id order, hostiles by slot)

pub mod state;
pub mod steering;
pub mod tick;

pub use state::{ArenaState, HOSTILE_RESPAWN_REGION, HOSTILE_SPAWN_REGION, SpawnRegion, Unit};
pub use steering::{clamp_to_arena, nearest_living, step_toward};
pub use tick::{TickSummary, tick};
