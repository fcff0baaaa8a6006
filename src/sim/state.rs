//! Arena state and unit types

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Friendly palette, cycled by index
pub const FRIENDLY_COLORS: [u32; 4] = [0x38bdf8, 0xa855f7, 0x34d399, 0xfacc15];
pub const HOSTILE_COLOR: u32 = 0xf87171;

/// A circular combatant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    /// 0xRRGGBB
    pub color: u32,
    pub max_health: f32,
    pub health: f32,
}

impl Unit {
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Remaining health in [0, 1]
    pub fn health_ratio(&self) -> f32 {
        self.health.max(0.0) / self.max_health
    }
}

/// Axis-aligned area hostiles appear in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRegion {
    pub min: Vec2,
    pub max: Vec2,
}

impl SpawnRegion {
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn sample(&self, rng: &mut Pcg32) -> Vec2 {
        Vec2::new(
            rng.random_range(self.min.x..self.max.x),
            rng.random_range(self.min.y..self.max.y),
        )
    }
}

/// Where the opening hostiles are placed
pub const HOSTILE_SPAWN_REGION: SpawnRegion = SpawnRegion {
    min: Vec2::new(CANVAS_WIDTH * 0.55, CANVAS_HEIGHT * 0.1),
    max: Vec2::new(CANVAS_WIDTH * 0.92, CANVAS_HEIGHT * 0.9),
};

/// Where replacements for defeated hostiles are placed
pub const HOSTILE_RESPAWN_REGION: SpawnRegion = SpawnRegion {
    min: Vec2::new(CANVAS_WIDTH * 0.45, CANVAS_HEIGHT * 0.1),
    max: Vec2::new(CANVAS_WIDTH * 0.9, CANVAS_HEIGHT * 0.9),
};

/// Everything one arena view mutates per tick
#[derive(Debug, Clone)]
pub struct ArenaState {
    /// Fixed population, never replaced
    pub friendlies: Vec<Unit>,
    /// Fixed population, defeated members replaced in place
    pub hostiles: Vec<Unit>,
    pub total_damage: f64,
    pub enemies_defeated: u32,
    pub elapsed_secs: f64,
    next_hostile_id: u32,
    rng: Pcg32,
}

impl ArenaState {
    /// Opening layout: friendlies in a column on the left, hostiles scattered right
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);

        let friendlies = (0..FRIENDLY_COUNT)
            .map(|i| Unit {
                id: i as u32,
                pos: Vec2::new(
                    CANVAS_WIDTH * 0.18,
                    CANVAS_HEIGHT * 0.22
                        + i as f32 * (CANVAS_HEIGHT * 0.18)
                        + rng.random_range(-18.0f32..18.0),
                ),
                radius: FRIENDLY_RADIUS,
                color: FRIENDLY_COLORS[i % FRIENDLY_COLORS.len()],
                max_health: FRIENDLY_MAX_HEALTH,
                health: FRIENDLY_MAX_HEALTH,
            })
            .collect();

        let mut state = Self {
            friendlies,
            hostiles: Vec::with_capacity(HOSTILE_COUNT),
            total_damage: 0.0,
            enemies_defeated: 0,
            elapsed_secs: 0.0,
            next_hostile_id: FIRST_HOSTILE_ID,
            rng,
        };
        for _ in 0..HOSTILE_COUNT {
            let hostile = state.spawn_hostile(&HOSTILE_SPAWN_REGION);
            state.hostiles.push(hostile);
        }
        state
    }

    /// Arena with a caller-chosen population
    pub fn from_units(friendlies: Vec<Unit>, hostiles: Vec<Unit>, seed: u64) -> Self {
        let next_hostile_id = hostiles
            .iter()
            .map(|h| h.id + 1)
            .max()
            .unwrap_or(FIRST_HOSTILE_ID)
            .max(FIRST_HOSTILE_ID);
        Self {
            friendlies,
            hostiles,
            total_damage: 0.0,
            enemies_defeated: 0,
            elapsed_secs: 0.0,
            next_hostile_id,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Allocate a hostile id
    pub fn next_hostile_id(&mut self) -> u32 {
        let id = self.next_hostile_id;
        self.next_hostile_id += 1;
        id
    }

    /// Id the next spawned hostile will receive
    pub fn peek_hostile_id(&self) -> u32 {
        self.next_hostile_id
    }

    /// A full-health hostile at a random spot in `region`
    pub fn spawn_hostile(&mut self, region: &SpawnRegion) -> Unit {
        let id = self.next_hostile_id();
        let pos = region.sample(&mut self.rng);
        let max_health = self
            .rng
            .random_range(HOSTILE_MIN_HEALTH..HOSTILE_MAX_HEALTH);
        Unit {
            id,
            pos,
            radius: HOSTILE_RADIUS,
            color: HOSTILE_COLOR,
            max_health,
            health: max_health,
        }
    }
}
