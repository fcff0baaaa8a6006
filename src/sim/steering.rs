//! Target search and movement helpers

use glam::Vec2;

use super::state::Unit;
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};

/// Index and distance of the closest living unit to `from`.
/// Ties keep the earliest slot.
pub fn nearest_living(units: &[Unit], from: Vec2) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    for (i, unit) in units.iter().enumerate() {
        if !unit.is_alive() {
            continue;
        }
        let distance = unit.pos.distance(from);
        match best {
            Some((_, d)) if distance >= d => {}
            _ => best = Some((i, distance)),
        }
    }
    best
}

/// Keep a circle of `radius` fully inside the arena
#[inline]
pub fn clamp_to_arena(pos: Vec2, radius: f32) -> Vec2 {
    Vec2::new(
        pos.x.clamp(radius, CANVAS_WIDTH - radius),
        pos.y.clamp(radius, CANVAS_HEIGHT - radius),
    )
}

/// Move from `pos` toward `target` by at most `max_step`, never overshooting
pub fn step_toward(pos: Vec2, target: Vec2, max_step: f32) -> Vec2 {
    let delta = target - pos;
    let distance = delta.length();
    let step = max_step.min(distance);
    // Coincident points have no direction; divide by 1 to stay finite
    let dir = delta / if distance > 0.0 { distance } else { 1.0 };
    pos + dir * step
}
