//! Variable timestep arena tick
//!
//! Friendlies pick the nearest living hostile, close in, and deal damage once
//! in range. Defeated hostiles are replaced after every friendly has acted.

use super::state::{ArenaState, HOSTILE_RESPAWN_REGION};
use super::steering::{clamp_to_arena, nearest_living, step_toward};
use crate::config::ArenaConfig;
use crate::preferences::PreferenceSnapshot;

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickSummary {
    /// Damage dealt this tick
    pub damage: f64,
    /// Ids of hostiles defeated this tick
    pub defeated: Vec<u32>,
    /// Ids of the hostiles that replaced them
    pub spawned: Vec<u32>,
}

/// Advance the arena by `dt` seconds
pub fn tick(
    state: &mut ArenaState,
    prefs: &PreferenceSnapshot,
    config: &ArenaConfig,
    dt: f32,
) -> TickSummary {
    let mut summary = TickSummary::default();
    state.elapsed_secs += dt as f64;

    let speed = config.base_speed * prefs.speed_multiplier;
    let approach_threshold = config.approach_threshold();

    for bot in state.friendlies.iter_mut() {
        let Some((target_idx, distance)) = nearest_living(&state.hostiles, bot.pos) else {
            continue;
        };
        let target = &mut state.hostiles[target_idx];

        // Approach
        if distance > approach_threshold {
            let next = step_toward(bot.pos, target.pos, speed * dt);
            bot.pos = clamp_to_arena(next, bot.radius);
        }

        // Attack (range measured before this tick's movement)
        if distance <= config.attack_range {
            let damage = (config.base_damage_per_second * dt * prefs.damage_multiplier).max(0.0);
            target.health -= damage;
            state.total_damage += damage as f64;
            summary.damage += damage as f64;

            if target.health <= 0.0 {
                state.enemies_defeated += 1;
                summary.defeated.push(target.id);
            }
        }
    }

    // Respawn defeated hostiles in place
    for i in 0..state.hostiles.len() {
        if state.hostiles[i].is_alive() {
            continue;
        }
        let fresh = state.spawn_hostile(&HOSTILE_RESPAWN_REGION);
        log::debug!(
            "Hostile {} defeated, respawned as {} at ({:.0}, {:.0})",
            state.hostiles[i].id,
            fresh.id,
            fresh.pos.x,
            fresh.pos.y
        );
        summary.spawned.push(fresh.id);
        state.hostiles[i] = fresh;
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::settings::{DAMAGE_MULTIPLIER_OPTIONS, SpeedSetting};
    use crate::sim::state::{FRIENDLY_COLORS, HOSTILE_COLOR, Unit};
    use glam::Vec2;
    use proptest::prelude::*;

    fn friendly(x: f32, y: f32) -> Unit {
        Unit {
            id: 0,
            pos: Vec2::new(x, y),
            radius: FRIENDLY_RADIUS,
            color: FRIENDLY_COLORS[0],
            max_health: FRIENDLY_MAX_HEALTH,
            health: FRIENDLY_MAX_HEALTH,
        }
    }

    fn hostile(id: u32, x: f32, y: f32, health: f32) -> Unit {
        Unit {
            id,
            pos: Vec2::new(x, y),
            radius: HOSTILE_RADIUS,
            color: HOSTILE_COLOR,
            max_health: 150.0,
            health,
        }
    }

    /// One friendly and one hostile `distance` apart along x
    fn duel(distance: f32, hostile_health: f32) -> ArenaState {
        ArenaState::from_units(
            vec![friendly(200.0, 200.0)],
            vec![hostile(100, 200.0 + distance, 200.0, hostile_health)],
            1,
        )
    }

    #[test]
    fn test_assault_fast_one_second_scenario() {
        let mut state = duel(10.0, 150.0);
        let prefs = PreferenceSnapshot::new(2.0, SpeedSetting::Fast);

        let summary = tick(&mut state, &prefs, &ArenaConfig::default(), 1.0);

        assert_eq!(state.total_damage, 44.0);
        assert_eq!(summary.damage, 44.0);
        assert_eq!(state.hostiles[0].health, 106.0);
        assert_eq!(state.enemies_defeated, 0);
        // Inside the approach threshold: no movement
        assert_eq!(state.friendlies[0].pos, Vec2::new(200.0, 200.0));
    }

    #[test]
    fn test_non_positive_multiplier_never_heals() {
        for multiplier in [-2.0f32, 0.0, f32::NAN] {
            let mut state = duel(10.0, 120.0);
            let prefs = PreferenceSnapshot::new(multiplier, SpeedSetting::Standard);
            tick(&mut state, &prefs, &ArenaConfig::default(), 1.0);
            assert_eq!(state.hostiles[0].health, 120.0);
            assert_eq!(state.total_damage, 0.0);
        }
    }

    #[test]
    fn test_damage_for_each_multiplier() {
        let config = ArenaConfig::default();
        for option in DAMAGE_MULTIPLIER_OPTIONS {
            for dt in [0.016f32, 0.1, 1.0] {
                let mut state = duel(10.0, 1000.0);
                let prefs = PreferenceSnapshot::new(option.value, SpeedSetting::Standard);
                tick(&mut state, &prefs, &config, dt);

                let expected = BASE_DAMAGE_PER_SECOND * dt * option.value;
                assert_eq!(state.total_damage, expected as f64);
                assert_eq!(state.hostiles[0].health, 1000.0 - expected);
            }
        }
    }

    #[test]
    fn test_attack_at_exact_range() {
        let mut state = duel(ATTACK_RANGE, 150.0);
        tick(&mut state, &PreferenceSnapshot::default(), &ArenaConfig::default(), 0.5);
        assert!(state.total_damage > 0.0);
    }

    #[test]
    fn test_no_attack_just_beyond_range() {
        let mut state = duel(ATTACK_RANGE + 0.5, 150.0);
        tick(&mut state, &PreferenceSnapshot::default(), &ArenaConfig::default(), 0.001);
        assert_eq!(state.total_damage, 0.0);
        assert!(state.friendlies[0].pos.x > 200.0);
    }

    #[test]
    fn test_no_approach_at_exact_threshold() {
        let config = ArenaConfig::default();
        // Friendly at x = 0 so the separation is exactly the threshold
        let mut state = ArenaState::from_units(
            vec![friendly(0.0, 200.0)],
            vec![hostile(100, config.approach_threshold(), 200.0, 150.0)],
            1,
        );
        tick(&mut state, &PreferenceSnapshot::default(), &config, 0.1);
        assert_eq!(state.friendlies[0].pos, Vec2::new(0.0, 200.0));
        assert!(state.total_damage > 0.0);
    }

    #[test]
    fn test_approach_just_beyond_threshold_and_attack() {
        let config = ArenaConfig::default();
        let mut state = duel(config.approach_threshold() + 1.0, 150.0);
        tick(&mut state, &PreferenceSnapshot::default(), &config, 0.001);
        assert!(state.friendlies[0].pos.x > 200.0);
        assert!(state.total_damage > 0.0);
    }

    #[test]
    fn test_dead_band_with_approach_factor_above_one() {
        let config = ArenaConfig {
            approach_factor: 1.2,
            ..Default::default()
        };
        // Beyond attack range, inside the widened approach threshold
        let mut state = duel(ATTACK_RANGE + 2.0, 150.0);
        tick(&mut state, &PreferenceSnapshot::default(), &config, 0.5);
        assert_eq!(state.friendlies[0].pos, Vec2::new(200.0, 200.0));
        assert_eq!(state.total_damage, 0.0);
    }

    #[test]
    fn test_movement_per_speed_setting() {
        let config = ArenaConfig::default();
        for setting in SpeedSetting::ALL {
            let mut state = duel(300.0, 150.0);
            let prefs = PreferenceSnapshot::new(1.0, setting);
            tick(&mut state, &prefs, &config, 0.1);

            let expected = BASE_BOT_SPEED * setting.multiplier() * 0.1;
            assert_eq!(state.friendlies[0].pos, Vec2::new(200.0 + expected, 200.0));
        }
    }

    #[test]
    fn test_movement_stops_at_target() {
        let mut state = duel(30.0, 150.0);
        let prefs = PreferenceSnapshot::new(1.0, SpeedSetting::VeryFast);
        tick(&mut state, &prefs, &ArenaConfig::default(), 10.0);
        assert!((state.friendlies[0].pos.x - 230.0).abs() < 1e-4);
    }

    #[test]
    fn test_movement_clamped_to_bounds() {
        let mut state = ArenaState::from_units(
            vec![friendly(CANVAS_WIDTH - 60.0, 100.0)],
            // Hostile past the right wall
            vec![hostile(100, CANVAS_WIDTH + 40.0, 100.0, 150.0)],
            1,
        );
        tick(&mut state, &PreferenceSnapshot::default(), &ArenaConfig::default(), 5.0);
        assert_eq!(state.friendlies[0].pos.x, CANVAS_WIDTH - FRIENDLY_RADIUS);
    }

    #[test]
    fn test_idle_when_no_living_hostiles() {
        let mut state = ArenaState::from_units(vec![friendly(200.0, 200.0)], Vec::new(), 1);
        let summary = tick(&mut state, &PreferenceSnapshot::default(), &ArenaConfig::default(), 1.0);
        assert_eq!(summary, TickSummary::default());
        assert_eq!(state.friendlies[0].pos, Vec2::new(200.0, 200.0));
        assert_eq!(state.elapsed_secs, 1.0);
    }

    #[test]
    fn test_defeat_and_respawn() {
        let mut state = duel(10.0, 5.0);
        let prefs = PreferenceSnapshot::new(2.5, SpeedSetting::Standard);
        let summary = tick(&mut state, &prefs, &ArenaConfig::default(), 1.0);

        assert_eq!(state.enemies_defeated, 1);
        assert_eq!(summary.defeated, vec![100]);
        assert_eq!(state.hostiles.len(), 1);

        let fresh = &state.hostiles[0];
        assert_eq!(fresh.id, 101);
        assert_eq!(summary.spawned, vec![101]);
        assert!(HOSTILE_RESPAWN_REGION.contains(fresh.pos));
        assert_eq!(fresh.health, fresh.max_health);
        assert!(fresh.max_health >= HOSTILE_MIN_HEALTH && fresh.max_health < HOSTILE_MAX_HEALTH);
    }

    #[test]
    fn test_kill_counted_once_with_several_attackers() {
        let mut state = ArenaState::from_units(
            vec![friendly(200.0, 200.0), friendly(200.0, 210.0)],
            vec![hostile(100, 210.0, 205.0, 1.0)],
            9,
        );
        tick(&mut state, &PreferenceSnapshot::default(), &ArenaConfig::default(), 1.0);
        // The second friendly finds no living target once the first lands the kill
        assert_eq!(state.enemies_defeated, 1);
        assert_eq!(state.total_damage, 22.0);
    }

    #[test]
    fn test_default_arena_runs_with_invariants() {
        let mut state = ArenaState::new(2024);
        let prefs = PreferenceSnapshot::new(2.5, SpeedSetting::VeryFast);
        let config = ArenaConfig::default();
        let mut last_damage = 0.0;
        let mut last_defeated = 0;

        for _ in 0..3_000 {
            tick(&mut state, &prefs, &config, 1.0 / 60.0);
            assert_eq!(state.friendlies.len(), FRIENDLY_COUNT);
            assert_eq!(state.hostiles.len(), HOSTILE_COUNT);
            for unit in state.friendlies.iter().chain(&state.hostiles) {
                assert!(unit.health <= unit.max_health);
                assert!(unit.health >= 0.0);
            }
            assert!(state.total_damage >= last_damage);
            assert!(state.enemies_defeated >= last_defeated);
            last_damage = state.total_damage;
            last_defeated = state.enemies_defeated;
        }
        assert!(state.enemies_defeated > 0);
    }

    #[test]
    fn test_determinism() {
        let prefs = PreferenceSnapshot::new(1.5, SpeedSetting::Fast);
        let config = ArenaConfig::default();
        let mut a = ArenaState::new(77);
        let mut b = ArenaState::new(77);
        for _ in 0..600 {
            tick(&mut a, &prefs, &config, 1.0 / 60.0);
            tick(&mut b, &prefs, &config, 1.0 / 60.0);
        }
        assert_eq!(a.friendlies, b.friendlies);
        assert_eq!(a.hostiles, b.hostiles);
        assert_eq!(a.total_damage, b.total_damage);
    }

    proptest! {
        #[test]
        fn prop_damage_scales_with_multiplier_and_dt(
            option_idx in 0usize..DAMAGE_MULTIPLIER_OPTIONS.len(),
            dt in 0.001f32..1.0,
            distance in 0.0f32..30.0,
        ) {
            let multiplier = DAMAGE_MULTIPLIER_OPTIONS[option_idx].value;
            let mut state = duel(distance, 10_000.0);
            let prefs = PreferenceSnapshot::new(multiplier, SpeedSetting::Standard);
            tick(&mut state, &prefs, &ArenaConfig::default(), dt);

            let expected = BASE_DAMAGE_PER_SECOND * dt * multiplier;
            prop_assert_eq!(state.total_damage, expected as f64);
            prop_assert_eq!(state.hostiles[0].health, 10_000.0 - expected);
        }

        #[test]
        fn prop_step_bounded_by_speed_and_remaining_distance(
            angle in 0.0f32..std::f32::consts::TAU,
            distance in 30.0f32..150.0,
            dt in 0.001f32..0.5,
            speed_idx in 0usize..3,
        ) {
            let setting = SpeedSetting::ALL[speed_idx];
            let start = Vec2::new(360.0, 210.0);
            let target = start + Vec2::new(angle.cos(), angle.sin()) * distance;
            let mut state = ArenaState::from_units(
                vec![friendly(start.x, start.y)],
                vec![hostile(100, target.x, target.y, 150.0)],
                1,
            );
            let prefs = PreferenceSnapshot::new(1.0, setting);
            tick(&mut state, &prefs, &ArenaConfig::default(), dt);

            let moved = state.friendlies[0].pos.distance(start);
            let max_step = BASE_BOT_SPEED * setting.multiplier() * dt;
            let remaining = target.distance(start);
            prop_assert!(moved <= max_step.min(remaining) + 1e-3);
            prop_assert!((moved - max_step.min(remaining)).abs() < 1e-3);
        }
    }
}
