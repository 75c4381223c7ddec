//! Pointer tracking and moving/idle classification.
//!
//! The tracker is pure state: it never schedules anything itself. The engine
//! arms the still timer after each move and calls [`PointerTracker::settle`]
//! when it fires.

use crate::constants::VELOCITY_SCALE;
use glam::Vec2;
use std::time::Duration;

/// Authoritative pointer location in viewport pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
}

impl PointerSample {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

impl From<Vec2> for PointerSample {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MotionState {
    pub is_visible: bool,
    pub is_moving: bool,
}

impl MotionState {
    /// Visible but not moving.
    #[inline]
    pub fn is_idle(self) -> bool {
        self.is_visible && !self.is_moving
    }
}

/// Result of feeding an event to the tracker, used to re-arm motion-dependent timers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    None,
    StartedMoving,
    StoppedMoving,
}

#[derive(Clone, Debug, Default)]
pub struct PointerTracker {
    sample: PointerSample,
    last_move_at: Option<Duration>,
    velocity: Vec2,
    visible: bool,
    moving: bool,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_move(&mut self, sample: PointerSample, now: Duration) -> Transition {
        match self.last_move_at {
            Some(prev) if self.visible && now > prev => {
                let dt_ms = (now - prev).as_secs_f32() * 1000.0;
                let delta = sample.to_vec2() - self.sample.to_vec2();
                self.velocity = delta / dt_ms * VELOCITY_SCALE;
            }
            Some(_) if self.visible => {}
            _ => self.velocity = Vec2::ZERO,
        }
        let was_moving = self.moving;
        self.sample = sample;
        self.last_move_at = Some(now);
        self.visible = true;
        self.moving = true;
        if was_moving {
            Transition::None
        } else {
            Transition::StartedMoving
        }
    }

    pub fn on_leave(&mut self) -> Transition {
        let was_moving = self.moving;
        self.visible = false;
        self.moving = false;
        self.velocity = Vec2::ZERO;
        if was_moving {
            Transition::StoppedMoving
        } else {
            Transition::None
        }
    }

    /// Flip to idle once `still_window` has elapsed since the last move.
    pub fn settle(&mut self, now: Duration, still_window: Duration) -> Transition {
        if !self.moving {
            return Transition::None;
        }
        match self.since_last_move(now) {
            Some(elapsed) if elapsed >= still_window => {
                self.moving = false;
                self.velocity = Vec2::ZERO;
                Transition::StoppedMoving
            }
            _ => Transition::None,
        }
    }

    /// Time since the last move, `None` before the first one.
    pub fn since_last_move(&self, now: Duration) -> Option<Duration> {
        self.last_move_at.map(|t| now.saturating_sub(t))
    }

    pub fn last_move_at(&self) -> Option<Duration> {
        self.last_move_at
    }

    pub fn sample(&self) -> PointerSample {
        self.sample
    }

    pub fn motion(&self) -> MotionState {
        MotionState {
            is_visible: self.visible,
            is_moving: self.moving,
        }
    }

    /// Velocity in px per 100 ms.
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Forget everything, as if the pointer never entered.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn first_move_has_no_velocity() {
        let mut t = PointerTracker::new();
        assert_eq!(t.on_move(PointerSample::new(100.0, 100.0), ms(0)), Transition::StartedMoving);
        assert_eq!(t.velocity(), Vec2::ZERO);
        assert!(t.motion().is_visible && t.motion().is_moving);
    }

    #[test]
    fn velocity_is_scaled_per_100ms() {
        let mut t = PointerTracker::new();
        t.on_move(PointerSample::new(100.0, 100.0), ms(0));
        assert_eq!(t.on_move(PointerSample::new(110.0, 95.0), ms(10)), Transition::None);
        let v = t.velocity();
        assert!((v.x - 100.0).abs() < 1e-3);
        assert!((v.y + 50.0).abs() < 1e-3);
    }

    #[test]
    fn settle_respects_still_window() {
        let mut t = PointerTracker::new();
        t.on_move(PointerSample::new(1.0, 1.0), ms(50));
        assert_eq!(t.settle(ms(149), ms(100)), Transition::None);
        assert!(t.motion().is_moving);
        assert_eq!(t.settle(ms(150), ms(100)), Transition::StoppedMoving);
        assert!(t.motion().is_idle());
    }

    #[test]
    fn leave_is_immediate() {
        let mut t = PointerTracker::new();
        t.on_move(PointerSample::new(1.0, 1.0), ms(0));
        assert_eq!(t.on_leave(), Transition::StoppedMoving);
        assert_eq!(t.motion(), MotionState::default());
        assert_eq!(t.on_leave(), Transition::None);
    }

    #[test]
    fn reentry_does_not_inherit_velocity() {
        let mut t = PointerTracker::new();
        t.on_move(PointerSample::new(0.0, 0.0), ms(0));
        t.on_leave();
        t.on_move(PointerSample::new(500.0, 500.0), ms(10));
        assert_eq!(t.velocity(), Vec2::ZERO);
    }
}
