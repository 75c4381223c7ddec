//! Floating ornaments spawned around the resting pointer.
//!
//! They carry no physics: the stored position is fixed at spawn and the
//! presentation layer derives the orbit from `phase` and time since `born`.

use crate::constants::AMBIENT_RADIUS_PX;
use crate::particles::centered;
use crate::population::ElementId;
use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq)]
pub struct FloatingElement {
    pub id: ElementId,
    pub position: Vec2,
    pub variant: usize,
    /// Orbit offset in [0, 2π), fixed at spawn.
    pub phase: f32,
    /// Engine time at spawn.
    pub born: Duration,
}

impl FloatingElement {
    /// Draw order: x offset, y offset, variant, phase.
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        id: ElementId,
        anchor: Vec2,
        palette_len: usize,
        born: Duration,
    ) -> Self {
        let offset = Vec2::new(
            centered(rng) * AMBIENT_RADIUS_PX * 2.0,
            centered(rng) * AMBIENT_RADIUS_PX * 2.0,
        );
        let variant = rng.gen_range(0..palette_len.max(1));
        let phase = rng.gen::<f32>() * TAU;
        Self {
            id,
            position: anchor + offset,
            variant,
            phase: if phase >= TAU { 0.0 } else { phase },
            born,
        }
    }

    /// Seconds since spawn at engine time `now`.
    pub fn age_secs(&self, now: Duration) -> f32 {
        now.saturating_sub(self.born).as_secs_f32()
    }
}
