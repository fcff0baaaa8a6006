//! Native frame loop without a display

use std::thread;
use std::time::Duration;

use super::{ArenaStats, ArenaView};
use crate::platform::now_ms;
use crate::preferences::PreferenceSnapshot;
use crate::renderer::Surface;

/// Drives an [`ArenaView`] at a fixed pace until cancelled or out of frames
#[derive(Debug, Clone)]
pub struct HeadlessLoop {
    /// Target frame spacing (ms)
    pub frame_interval_ms: f64,
    /// Stop after this many frames
    pub max_frames: Option<u64>,
    /// Sleep between frames and read the wall clock; otherwise simulate the clock
    pub realtime: bool,
}

impl Default for HeadlessLoop {
    fn default() -> Self {
        Self {
            frame_interval_ms: 1000.0 / 60.0,
            max_frames: None,
            realtime: true,
        }
    }
}

impl HeadlessLoop {
    /// Run frames, reading preferences before each one. Returns frames run.
    pub fn run<S, P, F>(
        &self,
        view: &mut ArenaView,
        start_ms: f64,
        mut prefs: P,
        surface: &mut S,
        mut on_stats: F,
    ) -> u64
    where
        S: Surface,
        P: FnMut() -> PreferenceSnapshot,
        F: FnMut(&ArenaStats),
    {
        let cancel = view.cancel_token();
        let mut frames = 0u64;

        loop {
            if cancel.is_cancelled() {
                break;
            }
            if self.max_frames.is_some_and(|max| frames >= max) {
                view.teardown();
                break;
            }

            let now = if self.realtime {
                thread::sleep(Duration::from_secs_f64(self.frame_interval_ms / 1000.0));
                now_ms()
            } else {
                start_ms + (frames + 1) as f64 * self.frame_interval_ms
            };

            if let Some(stats) = view.frame(now, &prefs(), surface) {
                on_stats(&stats);
            }
            frames += 1;
        }

        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ArenaConfig;
    use crate::renderer::CommandRecorder;
    use crate::settings::SpeedSetting;

    fn simulated(max_frames: u64) -> HeadlessLoop {
        HeadlessLoop {
            frame_interval_ms: 20.0,
            max_frames: Some(max_frames),
            realtime: false,
        }
    }

    #[test]
    fn test_runs_requested_frames_then_tears_down() {
        let mut view = ArenaView::new(11, ArenaConfig::default(), 0.0);
        let mut surface = CommandRecorder::new();
        let mut stats = Vec::new();

        let frames = simulated(50).run(
            &mut view,
            0.0,
            PreferenceSnapshot::default,
            &mut surface,
            |s| stats.push(*s),
        );

        assert_eq!(frames, 50);
        assert_eq!(surface.frames, 50);
        assert!(view.is_cancelled());
        // 1 s of frames at 20 ms, stats no more often than every 180 ms
        assert_eq!(stats.len(), 5);
        assert!(stats.windows(2).all(|w| w[1].elapsed_seconds > w[0].elapsed_seconds));
    }

    #[test]
    fn test_cancelled_view_runs_nothing() {
        let mut view = ArenaView::new(11, ArenaConfig::default(), 0.0);
        view.teardown();
        let mut surface = CommandRecorder::new();
        let frames = simulated(10).run(
            &mut view,
            0.0,
            PreferenceSnapshot::default,
            &mut surface,
            |_| {},
        );
        assert_eq!(frames, 0);
        assert_eq!(surface.frames, 0);
    }

    #[test]
    fn test_preference_change_applies_next_frame() {
        let config = ArenaConfig::default();
        let mut slow = ArenaView::new(4, config.clone(), 0.0);
        let mut fast = ArenaView::new(4, config, 0.0);
        let mut surface = CommandRecorder::new();

        simulated(1).run(&mut slow, 0.0, PreferenceSnapshot::default, &mut surface, |_| {});
        simulated(1).run(
            &mut fast,
            0.0,
            || PreferenceSnapshot::new(1.0, SpeedSetting::VeryFast),
            &mut surface,
            |_| {},
        );

        let start = ArenaView::new(4, ArenaConfig::default(), 0.0).state().friendlies[0].pos;
        let slow_moved = slow.state().friendlies[0].pos.distance(start);
        let fast_moved = fast.state().friendlies[0].pos.distance(start);
        assert!(fast_moved > slow_moved);
    }
}
