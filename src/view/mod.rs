//! Arena view
//!
//! Owns one arena for the lifetime of a view: advances it with the real time
//! between frames, draws it, and hands out throttled stats.

#[cfg(not(target_arch = "wasm32"))]
mod headless;
mod stats;

#[cfg(not(target_arch = "wasm32"))]
pub use headless::HeadlessLoop;
pub use stats::{ArenaStats, StatThrottle, format_damage, format_elapsed};

use crate::config::ArenaConfig;
use crate::platform::CancelToken;
use crate::preferences::PreferenceSnapshot;
use crate::renderer::{Surface, build_frame, scene};
use crate::sim::{ArenaState, TickSummary, tick};

pub struct ArenaView {
    state: ArenaState,
    config: ArenaConfig,
    throttle: StatThrottle,
    last_timestamp_ms: f64,
    cancel: CancelToken,
}

impl ArenaView {
    /// Fresh arena whose clock starts at `now_ms`
    pub fn new(seed: u64, config: ArenaConfig, now_ms: f64) -> Self {
        log::info!("Arena view started with seed {}", seed);
        Self {
            state: ArenaState::new(seed),
            throttle: StatThrottle::new(config.stat_refresh_interval_ms, now_ms),
            config,
            last_timestamp_ms: now_ms,
            cancel: CancelToken::new(),
        }
    }

    pub fn state(&self) -> &ArenaState {
        &self.state
    }

    /// Token the frame loop checks before every frame
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Stop further frames
    pub fn teardown(&self) {
        if !self.cancel.is_cancelled() {
            log::info!(
                "Arena view torn down after {:.1} s",
                self.state.elapsed_secs
            );
        }
        self.cancel.cancel();
    }

    /// Fresh arena and clock, e.g. when a torn-down page is shown again.
    /// Tokens handed out before the restart stay cancelled.
    pub fn restart(&mut self, seed: u64, now_ms: f64) {
        log::info!("Arena view restarted with seed {}", seed);
        self.state = ArenaState::new(seed);
        self.throttle = StatThrottle::new(self.config.stat_refresh_interval_ms, now_ms);
        self.last_timestamp_ms = now_ms;
        self.cancel = CancelToken::new();
    }

    /// Draw just the background, before the first frame
    pub fn draw_background<S: Surface>(&self, surface: &mut S) {
        let mut commands = Vec::new();
        scene::background(&mut commands);
        surface.draw(&commands);
    }

    /// Advance to `now_ms`, draw, and return stats when the throttle allows.
    /// Does nothing once cancelled.
    pub fn frame<S: Surface>(
        &mut self,
        now_ms: f64,
        prefs: &PreferenceSnapshot,
        surface: &mut S,
    ) -> Option<ArenaStats> {
        if self.cancel.is_cancelled() {
            return None;
        }

        let summary = self.advance(now_ms, prefs);
        if !summary.defeated.is_empty() {
            log::trace!("Defeated hostiles {:?}", summary.defeated);
        }

        surface.draw(&build_frame(&self.state));

        self.throttle
            .ready(now_ms)
            .then(|| ArenaStats::capture(&self.state))
    }

    /// Simulation half of a frame
    pub fn advance(&mut self, now_ms: f64, prefs: &PreferenceSnapshot) -> TickSummary {
        let delta_ms = self.config.frame_delta_ms(now_ms - self.last_timestamp_ms);
        self.last_timestamp_ms = now_ms;
        let dt = (delta_ms / 1000.0) as f32;
        tick(&mut self.state, prefs, &self.config, dt)
    }
}
