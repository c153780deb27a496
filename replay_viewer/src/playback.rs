//! Playback transport: Idle / Paused / Playing over the loaded frame list.

use std::time::Duration;

use bevy::prelude::*;

use crate::config::DEFAULT_TARGET_FPS;

/// Frame rates offered by the speed selector.
pub const FPS_OPTIONS: [u32; 7] = [1, 5, 10, 15, 24, 30, 60];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackPhase {
    /// Nothing loaded yet.
    Idle,
    Paused,
    Playing,
}

/// Ask the frame renderer to show the frame at this index.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShowFrame(pub usize);

/// Transport state. `next_tick` is the pending advance; dropping it cancels playback.
#[derive(Resource, Debug)]
pub struct PlaybackState {
    phase: PlaybackPhase,
    current: usize,
    frame_count: usize,
    target_fps: u32,
    next_tick: Option<Timer>,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::with_target_fps(DEFAULT_TARGET_FPS)
    }
}

impl PlaybackState {
    pub fn with_target_fps(target_fps: u32) -> Self {
        Self {
            phase: PlaybackPhase::Idle,
            current: 0,
            frame_count: 0,
            target_fps: target_fps.max(1),
            next_tick: None,
        }
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn target_fps(&self) -> u32 {
        self.target_fps
    }

    pub fn is_loaded(&self) -> bool {
        self.phase != PlaybackPhase::Idle
    }

    pub fn is_playing(&self) -> bool {
        self.phase == PlaybackPhase::Playing
    }

    /// Transport controls are usable once a replay is loaded.
    pub fn controls_enabled(&self) -> bool {
        self.is_loaded()
    }

    pub fn has_pending_tick(&self) -> bool {
        self.next_tick.is_some()
    }

    pub fn last_index(&self) -> usize {
        self.frame_count.saturating_sub(1)
    }

    /// Delay between advances at the current target rate.
    pub fn frame_delay(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.target_fps as f64)
    }

    /// A new replay with `frame_count` frames was loaded: paused at index 0.
    pub fn load(&mut self, frame_count: usize) {
        if frame_count == 0 {
            self.unload();
            return;
        }
        self.phase = PlaybackPhase::Paused;
        self.current = 0;
        self.frame_count = frame_count;
        self.next_tick = None;
    }

    pub fn unload(&mut self) {
        self.phase = PlaybackPhase::Idle;
        self.current = 0;
        self.frame_count = 0;
        self.next_tick = None;
    }

    /// Flip Playing and Paused. Starting playback advances immediately;
    /// returns the index to show when that happens.
    pub fn toggle(&mut self) -> Option<usize> {
        match self.phase {
            PlaybackPhase::Idle => None,
            PlaybackPhase::Playing => {
                self.pause();
                None
            }
            PlaybackPhase::Paused => {
                self.phase = PlaybackPhase::Playing;
                self.advance()
            }
        }
    }

    pub fn pause(&mut self) {
        if self.phase == PlaybackPhase::Playing {
            self.phase = PlaybackPhase::Paused;
        }
        self.next_tick = None;
    }

    pub fn step_forward(&mut self) -> Option<usize> {
        if !self.is_loaded() || self.current >= self.last_index() {
            return None;
        }
        self.current += 1;
        Some(self.current)
    }

    pub fn step_back(&mut self) -> Option<usize> {
        if !self.is_loaded() || self.current == 0 {
            return None;
        }
        self.current -= 1;
        Some(self.current)
    }

    /// Jump straight to `index`. Ignored unless loaded and the frame exists.
    pub fn scrub(&mut self, index: usize) -> Option<usize> {
        if !self.is_loaded() || index >= self.frame_count {
            return None;
        }
        self.current = index;
        Some(index)
    }

    /// Takes effect when the next tick is scheduled; a pending tick keeps its delay.
    pub fn set_target_fps(&mut self, fps: u32) {
        self.target_fps = fps.max(1);
    }

    /// Advance the pending tick by `delta`. Returns the new index when a frame advance fires.
    pub fn tick(&mut self, delta: Duration) -> Option<usize> {
        if !self.is_playing() {
            return None;
        }
        let fired = match self.next_tick.as_mut() {
            Some(timer) => timer.tick(delta).finished(),
            None => true,
        };
        if fired {
            self.advance()
        } else {
            None
        }
    }

    /// One playback step: move forward and schedule the next, or stop at the end.
    fn advance(&mut self) -> Option<usize> {
        if self.current >= self.last_index() {
            self.pause();
            return None;
        }
        self.current += 1;
        self.next_tick = Some(Timer::new(self.frame_delay(), TimerMode::Once));
        Some(self.current)
    }
}

pub fn playback_plugin(app: &mut App) {
    app.init_resource::<PlaybackState>()
        .add_event::<ShowFrame>()
        .add_systems(Update, playback_system);
}

pub fn playback_system(
    time: Res<Time>,
    mut state: ResMut<PlaybackState>,
    mut show: EventWriter<ShowFrame>,
) {
    let was_playing = state.is_playing();
    if let Some(index) = state.tick(time.delta()) {
        show.send(ShowFrame(index));
    } else if was_playing && !state.is_playing() {
        info!("reached end of replay, playback paused");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(frames: usize) -> PlaybackState {
        let mut state = PlaybackState::default();
        state.load(frames);
        state
    }

    #[test]
    fn idle_ignores_transport() {
        let mut state = PlaybackState::default();

        assert_eq!(state.toggle(), None);
        assert_eq!(state.step_forward(), None);
        assert_eq!(state.step_back(), None);
        assert_eq!(state.scrub(0), None);
        assert_eq!(state.phase(), PlaybackPhase::Idle);
        assert!(!state.controls_enabled());
    }

    #[test]
    fn load_pauses_at_first_frame() {
        let state = loaded(5);

        assert_eq!(state.phase(), PlaybackPhase::Paused);
        assert_eq!(state.current(), 0);
        assert!(state.controls_enabled());
    }

    #[test]
    fn loading_nothing_stays_idle() {
        let state = loaded(0);
        assert_eq!(state.phase(), PlaybackPhase::Idle);
    }

    #[test]
    fn steps_stay_in_bounds() {
        let mut state = loaded(3);

        assert_eq!(state.step_back(), None);
        assert_eq!(state.step_forward(), Some(1));
        assert_eq!(state.step_forward(), Some(2));
        assert_eq!(state.step_forward(), None);
        assert_eq!(state.current(), 2);
        assert_eq!(state.step_back(), Some(1));
    }

    #[test]
    fn scrub_rejects_missing_frames() {
        let mut state = loaded(4);

        assert_eq!(state.scrub(3), Some(3));
        assert_eq!(state.scrub(4), None);
        assert_eq!(state.scrub(usize::MAX), None);
        assert_eq!(state.current(), 3);
    }

    #[test]
    fn index_never_leaves_range_under_mixed_input() {
        let mut state = loaded(6);
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;

        for _ in 0..2_000 {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            match seed % 5 {
                0 => {
                    state.step_forward();
                }
                1 => {
                    state.step_back();
                }
                2 => {
                    state.scrub((seed >> 8) as usize % 10);
                }
                3 => {
                    state.toggle();
                }
                _ => {
                    state.tick(Duration::from_millis(40));
                }
            }
            assert!(state.current() <= state.last_index());
        }
    }

    #[test]
    fn toggle_advances_immediately_and_schedules() {
        let mut state = loaded(3);

        assert_eq!(state.toggle(), Some(1));
        assert!(state.is_playing());
        assert!(state.has_pending_tick());

        assert_eq!(state.tick(Duration::from_millis(10)), None);
        assert_eq!(state.tick(Duration::from_millis(30)), Some(2));
    }

    #[test]
    fn end_of_replay_pauses_once() {
        let mut state = loaded(2);
        let step = state.frame_delay();

        assert_eq!(state.toggle(), Some(1));
        assert_eq!(state.tick(step), None);
        assert_eq!(state.phase(), PlaybackPhase::Paused);
        assert!(!state.has_pending_tick());

        for _ in 0..10 {
            assert_eq!(state.tick(step), None);
        }
        assert_eq!(state.current(), 1);
        assert_eq!(state.phase(), PlaybackPhase::Paused);
    }

    #[test]
    fn pause_cancels_pending_tick() {
        let mut state = loaded(10);

        state.toggle();
        assert!(state.has_pending_tick());
        assert_eq!(state.toggle(), None);
        assert!(!state.has_pending_tick());
        assert_eq!(state.tick(Duration::from_secs(1)), None);
        assert_eq!(state.current(), 1);
    }

    #[test]
    fn fps_change_applies_to_next_tick() {
        let mut state = loaded(10);

        state.toggle();
        state.set_target_fps(1);

        // The pending tick was scheduled at 30 fps.
        assert_eq!(state.tick(Duration::from_millis(34)), Some(2));
        assert_eq!(state.tick(Duration::from_millis(500)), None);
        assert_eq!(state.tick(Duration::from_millis(500)), Some(3));
    }

    #[test]
    fn reload_resets_transport() {
        let mut state = loaded(10);
        state.toggle();
        state.scrub(7);

        state.load(4);

        assert_eq!(state.phase(), PlaybackPhase::Paused);
        assert_eq!(state.current(), 0);
        assert_eq!(state.frame_count(), 4);
        assert!(!state.has_pending_tick());
    }

    #[test]
    fn playback_system_keeps_pending_tick() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins).add_plugins(playback_plugin);
        app.world_mut().resource_mut::<PlaybackState>().load(3);
        let first = app.world_mut().resource_mut::<PlaybackState>().toggle();
        assert_eq!(first, Some(1));

        app.update();

        let state = app.world().resource::<PlaybackState>();
        assert!(state.is_playing());
        assert!(state.has_pending_tick());
        assert!(state.current() >= 1);
    }
}
