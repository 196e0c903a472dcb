//! Timeline playback
//!
//! [`PlaybackController`] owns the loaded [`Timeline`] and the cursor into it,
//! and runs a small state machine:
//!
//! ```text
//! Idle → Paused ⇄ Playing → AtEnd
//! ```
//!
//! # Ticks
//!
//! Auto-play is a chain of deferred [`Tick`]s rather than a thread. Each tick
//! carries the generation it was armed in; every load, pause, step, seek and
//! reset bumps the generation, so a tick that outlives its loop is rejected as
//! [`TickOutcome::Stale`] and changes nothing. The owner drives the chain by
//! calling [`PlaybackController::poll`] from its event loop.

use crate::error::{Error, Result};
use crate::snapshot::{Snapshot, Timeline};
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::debug;

/// Delay between ticks at 1x speed
pub const BASE_TICK_MS: u64 = 800;

/// Slowest accepted speed multiplier
pub const MIN_SPEED: f64 = 0.25;

/// Fastest accepted speed multiplier
pub const MAX_SPEED: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlaybackState {
    /// Nothing loaded
    Idle,
    Paused,
    Playing,
    /// Auto-play ran to the last snapshot
    AtEnd,
}

/// One scheduled cursor advance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    generation: u64,
    due: Instant,
}

impl Tick {
    pub fn due(&self) -> Instant {
        self.due
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What firing a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No tick was due
    Waiting,
    /// The tick belonged to a cancelled loop and was ignored
    Stale,
    /// Cursor moved to this index and the next tick is armed
    Advanced(usize),
    /// Cursor moved to the last index and playback stopped
    ReachedEnd(usize),
}

/// Play/pause/step/seek/speed over a [`Timeline`]
#[derive(Debug)]
pub struct PlaybackController {
    timeline: Timeline,
    cursor: usize,
    state: PlaybackState,
    speed: f64,
    base_tick: Duration,
    generation: u64,
    pending: Option<Tick>,
}

impl PlaybackController {
    pub fn new(base_tick: Duration) -> Self {
        PlaybackController {
            timeline: Timeline::default(),
            cursor: 0,
            state: PlaybackState::Idle,
            speed: 1.0,
            base_tick,
            generation: 0,
            pending: None,
        }
    }

    /// Replace the timeline and rewind to its first snapshot
    pub fn load(&mut self, timeline: Timeline) {
        self.cancel();
        self.timeline = timeline;
        self.cursor = 0;
        self.state = if self.timeline.is_empty() {
            PlaybackState::Idle
        } else {
            PlaybackState::Paused
        };
        debug!(
            snapshots = self.timeline.len(),
            generation = self.generation,
            "timeline loaded"
        );
    }

    /// Drop the timeline entirely
    pub fn reset(&mut self) {
        self.load(Timeline::default());
    }

    /// Start auto-play from the current cursor.
    ///
    /// Returns false (and does nothing) when there is nothing left to play.
    pub fn play(&mut self, now: Instant) -> bool {
        if self.state == PlaybackState::Playing {
            return true;
        }
        match self.timeline.last_index() {
            Some(last) if self.cursor < last => {}
            _ => return false,
        }
        self.cancel();
        self.state = PlaybackState::Playing;
        self.arm(now);
        debug!(cursor = self.cursor, generation = self.generation, "playback started");
        true
    }

    pub fn pause(&mut self) {
        if self.state == PlaybackState::Idle {
            return;
        }
        self.cancel();
        self.state = self.resting_state();
    }

    pub fn step_forward(&mut self) {
        if let Some(last) = self.timeline.last_index() {
            self.move_to((self.cursor + 1).min(last));
        }
    }

    pub fn step_backward(&mut self) {
        if !self.timeline.is_empty() {
            self.move_to(self.cursor.saturating_sub(1));
        }
    }

    /// Jump to `index`, clamped into range. Always leaves playback paused.
    pub fn seek(&mut self, index: usize) {
        if let Some(last) = self.timeline.last_index() {
            self.cancel();
            self.cursor = index.min(last);
            self.state = PlaybackState::Paused;
        }
    }

    /// Set the speed multiplier, returning the value actually applied.
    ///
    /// Takes effect when the next tick is armed; a tick that is already
    /// scheduled keeps its due time.
    pub fn set_speed(&mut self, multiplier: f64) -> Result<f64> {
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(Error::InvalidSpeed(multiplier));
        }
        self.speed = multiplier.clamp(MIN_SPEED, MAX_SPEED);
        debug!(speed = self.speed, "playback speed changed");
        Ok(self.speed)
    }

    /// Current delay between ticks
    pub fn tick_delay(&self) -> Duration {
        let nanos = self.base_tick.as_nanos() as f64 / self.speed;
        Duration::from_nanos(nanos.round() as u64)
    }

    /// The tick the loop is waiting on, if any
    pub fn pending_tick(&self) -> Option<Tick> {
        self.pending
    }

    /// Fire the pending tick if it is due
    pub fn poll(&mut self, now: Instant) -> TickOutcome {
        match self.pending {
            Some(tick) if now >= tick.due => self.fire(tick, now),
            _ => TickOutcome::Waiting,
        }
    }

    /// Run one tick of the loop.
    ///
    /// A tick is honored only if it is exactly the one currently pending in
    /// the current generation while playing; anything else is stale.
    pub fn fire(&mut self, tick: Tick, now: Instant) -> TickOutcome {
        let current = tick.generation == self.generation
            && self.pending == Some(tick)
            && self.state == PlaybackState::Playing;
        if !current {
            debug!(
                tick_generation = tick.generation,
                generation = self.generation,
                "stale tick ignored"
            );
            return TickOutcome::Stale;
        }

        self.pending = None;
        let last = match self.timeline.last_index() {
            Some(last) => last,
            None => {
                self.state = PlaybackState::Idle;
                return TickOutcome::Stale;
            }
        };

        if self.cursor < last {
            self.cursor += 1;
        }
        if self.cursor >= last {
            self.state = PlaybackState::AtEnd;
            debug!(cursor = self.cursor, "playback reached end");
            TickOutcome::ReachedEnd(self.cursor)
        } else {
            self.arm(now);
            TickOutcome::Advanced(self.cursor)
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Snapshot under the cursor
    pub fn current(&self) -> Option<&Snapshot> {
        self.timeline.get(self.cursor)
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Invalidate any in-flight tick
    fn cancel(&mut self) {
        self.generation += 1;
        self.pending = None;
    }

    fn arm(&mut self, now: Instant) {
        self.pending = Some(Tick {
            generation: self.generation,
            due: now + self.tick_delay(),
        });
    }

    /// Stop the loop and put the cursor at `index`.
    ///
    /// A step that cannot move and interrupts nothing leaves the state alone.
    fn move_to(&mut self, index: usize) {
        let was_playing = self.is_playing();
        self.cancel();
        if index != self.cursor || was_playing {
            self.cursor = index;
            self.state = self.resting_state();
        }
    }

    fn resting_state(&self) -> PlaybackState {
        match self.timeline.last_index() {
            None => PlaybackState::Idle,
            Some(last) if self.cursor >= last => PlaybackState::AtEnd,
            Some(_) => PlaybackState::Paused,
        }
    }
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new(Duration::from_millis(BASE_TICK_MS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{DsaKind, OpKind, Operation};
    use crate::simulator::simulate;

    fn timeline(len: usize) -> Timeline {
        let ops: Vec<Operation> = (0..len)
            .map(|i| Operation::new(OpKind::Push, vec![i.to_string()], i + 1))
            .collect();
        simulate(DsaKind::Stack, &ops)
    }

    fn loaded(len: usize) -> PlaybackController {
        let mut playback = PlaybackController::default();
        playback.load(timeline(len));
        playback
    }

    #[test]
    fn test_load_states() {
        let mut playback = PlaybackController::default();
        assert_eq!(playback.state(), PlaybackState::Idle);

        playback.load(timeline(3));
        assert_eq!(playback.state(), PlaybackState::Paused);
        assert_eq!(playback.cursor(), 0);

        playback.load(Timeline::default());
        assert_eq!(playback.state(), PlaybackState::Idle);
        assert!(playback.current().is_none());
    }

    #[test]
    fn test_play_runs_to_end() {
        let mut playback = loaded(4);
        let start = Instant::now();
        assert!(playback.play(start));
        assert_eq!(playback.state(), PlaybackState::Playing);

        let mut now = start;
        let mut outcomes = Vec::new();
        while let Some(tick) = playback.pending_tick() {
            now = tick.due();
            outcomes.push(playback.poll(now));
        }
        assert_eq!(
            outcomes,
            vec![
                TickOutcome::Advanced(1),
                TickOutcome::Advanced(2),
                TickOutcome::ReachedEnd(3)
            ]
        );
        assert_eq!(playback.state(), PlaybackState::AtEnd);
        assert_eq!(playback.cursor(), 3);
        assert!(now > start);
    }

    #[test]
    fn test_play_at_last_index_is_noop() {
        let mut playback = loaded(1);
        assert!(!playback.play(Instant::now()));
        assert_eq!(playback.state(), PlaybackState::Paused);
        assert!(playback.pending_tick().is_none());

        let mut idle = PlaybackController::default();
        assert!(!idle.play(Instant::now()));
        assert_eq!(idle.state(), PlaybackState::Idle);
    }

    #[test]
    fn test_poll_before_due_waits() {
        let mut playback = loaded(3);
        let now = Instant::now();
        playback.play(now);
        assert_eq!(playback.poll(now), TickOutcome::Waiting);
        assert_eq!(playback.cursor(), 0);
    }

    #[test]
    fn test_tick_after_pause_is_stale() {
        let mut playback = loaded(3);
        let now = Instant::now();
        playback.play(now);
        let tick = playback.pending_tick().unwrap();
        playback.pause();
        assert_eq!(playback.state(), PlaybackState::Paused);
        assert_eq!(playback.fire(tick, tick.due()), TickOutcome::Stale);
        assert_eq!(playback.cursor(), 0);
    }

    #[test]
    fn test_tick_after_load_is_stale() {
        let mut playback = loaded(3);
        let now = Instant::now();
        playback.play(now);
        let tick = playback.pending_tick().unwrap();

        playback.load(timeline(5));
        playback.play(now);
        assert_eq!(playback.fire(tick, tick.due()), TickOutcome::Stale);
        assert_eq!(playback.cursor(), 0);
        assert!(playback.is_playing());
    }

    #[test]
    fn test_tick_fired_twice_advances_once() {
        let mut playback = loaded(5);
        let now = Instant::now();
        playback.play(now);
        let tick = playback.pending_tick().unwrap();
        assert_eq!(playback.fire(tick, tick.due()), TickOutcome::Advanced(1));
        assert_eq!(playback.fire(tick, tick.due()), TickOutcome::Stale);
        assert_eq!(playback.cursor(), 1);
    }

    #[test]
    fn test_pause_at_end_is_at_end() {
        let mut playback = loaded(3);
        playback.seek(2);
        assert_eq!(playback.state(), PlaybackState::Paused);
        playback.pause();
        assert_eq!(playback.state(), PlaybackState::AtEnd);
    }

    #[test]
    fn test_steps_clamp_and_cancel() {
        let mut playback = loaded(3);
        playback.step_backward();
        assert_eq!(playback.cursor(), 0);

        let now = Instant::now();
        playback.play(now);
        let tick = playback.pending_tick().unwrap();
        playback.step_forward();
        assert_eq!(playback.cursor(), 1);
        assert_eq!(playback.state(), PlaybackState::Paused);
        assert_eq!(playback.fire(tick, tick.due()), TickOutcome::Stale);

        playback.step_forward();
        playback.step_forward();
        assert_eq!(playback.cursor(), 2);
        assert_eq!(playback.state(), PlaybackState::AtEnd);
    }

    #[test]
    fn test_blocked_step_keeps_state() {
        let mut playback = loaded(1);
        playback.step_backward();
        assert_eq!(playback.state(), PlaybackState::Paused);
        playback.step_forward();
        assert_eq!(playback.state(), PlaybackState::Paused);
        assert_eq!(playback.cursor(), 0);

        let mut playback = loaded(3);
        playback.seek(2);
        playback.step_forward();
        assert_eq!(playback.state(), PlaybackState::Paused);
        playback.step_backward();
        assert_eq!(playback.cursor(), 1);
        assert_eq!(playback.state(), PlaybackState::Paused);
    }

    #[test]
    fn test_seek_is_idempotent() {
        let mut playback = loaded(10);
        playback.play(Instant::now());
        playback.seek(4);
        playback.seek(4);
        assert_eq!(playback.cursor(), 4);
        assert_eq!(playback.state(), PlaybackState::Paused);
        assert!(playback.pending_tick().is_none());

        playback.seek(400);
        assert_eq!(playback.cursor(), 9);
    }

    #[test]
    fn test_speed_scales_delay() {
        let mut playback = PlaybackController::default();
        playback.set_speed(1.0).unwrap();
        let normal = playback.tick_delay();
        playback.set_speed(2.0).unwrap();
        assert_eq!(playback.tick_delay() * 2, normal);
        assert_eq!(normal, Duration::from_millis(BASE_TICK_MS));
    }

    #[test]
    fn test_speed_validation() {
        let mut playback = PlaybackController::default();
        assert!(matches!(playback.set_speed(0.0), Err(Error::InvalidSpeed(_))));
        assert!(matches!(playback.set_speed(-2.0), Err(Error::InvalidSpeed(_))));
        assert!(playback.set_speed(f64::NAN).is_err());
        assert_eq!(playback.set_speed(10.0).unwrap(), MAX_SPEED);
        assert_eq!(playback.set_speed(0.01).unwrap(), MIN_SPEED);
    }

    #[test]
    fn test_speed_change_applies_to_next_tick() {
        let mut playback = loaded(5);
        let now = Instant::now();
        playback.play(now);
        let first = playback.pending_tick().unwrap();
        playback.set_speed(2.0).unwrap();
        assert_eq!(playback.pending_tick(), Some(first));

        playback.fire(first, first.due());
        let second = playback.pending_tick().unwrap();
        assert_eq!(
            second.due() - first.due(),
            Duration::from_millis(BASE_TICK_MS / 2)
        );
    }
}
