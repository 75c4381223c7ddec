//! Short-lived particles emitted while the pointer moves, and the fixed-step
//! integrator that ages them.

use crate::constants::*;
use crate::population::{ElementId, Population};
use glam::Vec2;
use rand::Rng;

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub id: ElementId,
    pub position: Vec2,
    pub velocity: Vec2,
    pub variant: usize,
    /// Remaining life in [0, 1].
    pub life: f32,
    pub max_life: f32,
}

/// Per-step physics tuning.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsParams {
    pub drag: f32,
    pub gravity: f32,
    pub life_decay: f32,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            drag: DRAG,
            gravity: GRAVITY,
            life_decay: LIFE_DECAY_PER_STEP,
        }
    }
}

impl Particle {
    /// Spawn near `origin` with jitter, a random variant and a slightly upward velocity.
    ///
    /// Draw order is fixed (x jitter, y jitter, variant, vx, vy) so a
    /// deterministic random source yields a reproducible particle.
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        id: ElementId,
        origin: Vec2,
        palette_len: usize,
    ) -> Self {
        let jitter = Vec2::new(
            centered(rng) * PARTICLE_JITTER_PX * 2.0,
            centered(rng) * PARTICLE_JITTER_PX * 2.0,
        );
        let variant = rng.gen_range(0..palette_len.max(1));
        let velocity = Vec2::new(
            centered(rng) * PARTICLE_SPEED_SPREAD * 2.0,
            centered(rng) * PARTICLE_SPEED_SPREAD * 2.0 - PARTICLE_UPWARD_BIAS,
        );
        Self {
            id,
            position: origin + jitter,
            velocity,
            variant,
            life: 1.0,
            max_life: 1.0,
        }
    }

    /// Advance one fixed step. Returns `true` while the particle is still alive.
    pub fn step(&mut self, params: &PhysicsParams) -> bool {
        self.position += self.velocity;
        self.velocity *= params.drag;
        self.velocity.y += params.gravity;
        self.life = (self.life - params.life_decay).max(0.0);
        self.is_alive()
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    /// Life as a fraction of the life at spawn.
    #[inline]
    pub fn life_fraction(&self) -> f32 {
        if self.max_life > 0.0 {
            (self.life / self.max_life).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Step every particle once and drop the spent ones. Returns the number removed.
pub fn integrate(particles: &mut Population<Particle>, params: &PhysicsParams) -> usize {
    for p in particles.iter_mut() {
        p.step(params);
    }
    particles.retain(Particle::is_alive)
}

/// Uniform sample in [-0.5, 0.5).
#[inline]
pub(crate) fn centered<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.gen::<f32>() - 0.5
}
