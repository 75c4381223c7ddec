//! Presentation mapping: a pure function from a [`Snapshot`] to positioned,
//! styled visual nodes. Looping animations are closed-form functions of
//! elapsed time, so painting never feeds anything back into the engine.

use crate::constants::*;
use crate::engine::Snapshot;
use crate::palette::{Palette, SAFETY_ZONE_RGB, SPARKLE_RGB};
use glam::Vec2;
use smallvec::SmallVec;
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    SafetyZone,
    Floating,
    Particle,
    PulseRing,
    DashedRing,
    Indicator,
    Sparkle,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VisualNode {
    pub kind: NodeKind,
    pub center: Vec2,
    /// Unscaled radius in px; painters draw at `radius * scale`.
    pub radius: f32,
    pub scale: f32,
    pub opacity: f32,
    /// Radians.
    pub rotation: f32,
    pub rgb: [u8; 3],
    pub glyph: Option<char>,
    /// Glyph size relative to the disc, from the variant's size class.
    pub glyph_scale: f32,
}

/// Nodes in paint order, back to front.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    pub nodes: Vec<VisualNode>,
}

impl Scene {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn count(&self, kind: NodeKind) -> usize {
        self.nodes.iter().filter(|n| n.kind == kind).count()
    }

    pub fn first(&self, kind: NodeKind) -> Option<&VisualNode> {
        self.nodes.iter().find(|n| n.kind == kind)
    }
}

struct Sparkle {
    offset: Vec2,
    period: f32,
    delay: f32,
    peak_scale: f32,
    peak_opacity: f32,
    inverted: bool,
    turns: f32,
    radius: f32,
}

const SPARKLES: [Sparkle; 3] = [
    Sparkle {
        offset: Vec2::new(30.0, -25.0),
        period: 1.2,
        delay: 0.0,
        peak_scale: 1.0,
        peak_opacity: 1.0,
        inverted: false,
        turns: 1.0,
        radius: 4.0,
    },
    Sparkle {
        offset: Vec2::new(-35.0, 20.0),
        period: 1.8,
        delay: 0.3,
        peak_scale: 1.0,
        peak_opacity: 1.0,
        inverted: true,
        turns: -1.0,
        radius: 3.0,
    },
    Sparkle {
        offset: Vec2::new(15.0, 35.0),
        period: 1.5,
        delay: 0.6,
        peak_scale: 1.5,
        peak_opacity: 0.8,
        inverted: false,
        turns: 1.5,
        radius: 2.0,
    },
];

pub fn compose(snapshot: &Snapshot, palette: &Palette) -> Scene {
    let motion = snapshot.motion;
    if !motion.is_visible {
        return Scene::default();
    }
    let t = snapshot.elapsed.as_secs_f32();
    let pointer = snapshot.pointer.to_vec2();
    let moving = motion.is_moving;
    let mut nodes = Vec::with_capacity(snapshot.particles.len() + snapshot.floating.len() + 8);

    nodes.push(safety_zone(pointer, moving, t));

    if motion.is_idle() {
        for (i, f) in snapshot.floating.iter().enumerate() {
            let period = FLOATING_BASE_PERIOD_SEC + FLOATING_PERIOD_STEP_SEC * i as f32;
            let p = cycle(f.age_secs(snapshot.elapsed), period);
            let k = ease_in_out(ping_pong(p));
            let orbit = Vec2::new(
                FLOATING_ORBIT_X_PX * f.phase.sin(),
                FLOATING_ORBIT_Y_PX * f.phase.cos(),
            );
            let (lo, hi) = FLOATING_SCALE_RANGE;
            let variant = palette.get(f.variant);
            nodes.push(VisualNode {
                kind: NodeKind::Floating,
                center: f.position + orbit * k,
                radius: FLOATING_RADIUS_PX,
                scale: lo + (hi - lo) * k,
                opacity: 1.0,
                rotation: TAU * p,
                rgb: variant.rgb,
                glyph: Some(variant.glyph),
                glyph_scale: variant.size.factor(),
            });
        }
    }

    let particle_spin = TAU * cycle(t, PARTICLE_SPIN_SEC);
    for particle in &snapshot.particles {
        let life = particle.life_fraction();
        let variant = palette.get(particle.variant);
        nodes.push(VisualNode {
            kind: NodeKind::Particle,
            center: particle.position,
            radius: PARTICLE_RADIUS_PX,
            scale: PARTICLE_MIN_SCALE + (1.0 - PARTICLE_MIN_SCALE) * life,
            opacity: life,
            rotation: particle_spin,
            rgb: variant.rgb,
            glyph: Some(variant.glyph),
            glyph_scale: variant.size.factor(),
        });
    }

    if !snapshot.dormant {
        nodes.extend(indicator(pointer, palette, snapshot.variant, moving, t));
    }

    if moving {
        for (sparkle, rgb) in SPARKLES.iter().zip(SPARKLE_RGB) {
            let p = cycle((t - sparkle.delay).max(0.0), sparkle.period);
            let mut k = ease_in_out(ping_pong(p));
            if sparkle.inverted {
                k = 1.0 - k;
            }
            nodes.push(VisualNode {
                kind: NodeKind::Sparkle,
                center: pointer + sparkle.offset,
                radius: sparkle.radius,
                scale: sparkle.peak_scale * k,
                opacity: sparkle.peak_opacity * k,
                rotation: TAU * sparkle.turns * p,
                rgb,
                glyph: None,
                glyph_scale: 1.0,
            });
        }
    }

    Scene { nodes }
}

fn safety_zone(pointer: Vec2, moving: bool, t: f32) -> VisualNode {
    let (turns, period, scale) = if moving {
        SAFETY_ZONE_MOVING
    } else {
        SAFETY_ZONE_IDLE
    };
    VisualNode {
        kind: NodeKind::SafetyZone,
        center: pointer,
        radius: SAFETY_ZONE_RADIUS_PX,
        scale,
        opacity: 0.2,
        rotation: TAU * turns * cycle(t, period),
        rgb: SAFETY_ZONE_RGB[0],
        glyph: None,
        glyph_scale: 1.0,
    }
}

/// Main indicator plus its two rings, rings first.
fn indicator(
    pointer: Vec2,
    palette: &Palette,
    variant: usize,
    moving: bool,
    t: f32,
) -> SmallVec<[VisualNode; 3]> {
    let v = palette.get(variant);
    let (spin, (wx, wx_period), (wy, wy_period), scale, pulse, dashed) = if moving {
        (
            INDICATOR_SPIN_MOVING_SEC,
            WOBBLE_X_MOVING,
            WOBBLE_Y_MOVING,
            INDICATOR_SCALE_MOVING,
            PULSE_RING_MOVING,
            DASHED_RING_MOVING,
        )
    } else {
        (
            INDICATOR_SPIN_IDLE_SEC,
            WOBBLE_X_IDLE,
            WOBBLE_Y_IDLE,
            INDICATOR_SCALE_IDLE,
            PULSE_RING_IDLE,
            DASHED_RING_IDLE,
        )
    };
    let wobble = Vec2::new(
        wx * (TAU * cycle(t, wx_period)).sin(),
        -wy * (TAU * cycle(t, wy_period)).sin(),
    );
    let center = pointer + wobble;

    let ring = |kind: NodeKind, (peak, period, base): (f32, f32, f32), spins: bool| {
        let p = cycle(t, period);
        let k = ping_pong(p);
        VisualNode {
            kind,
            center,
            radius: INDICATOR_RADIUS_PX,
            scale: 1.0 + (peak - 1.0) * k,
            opacity: base * (1.0 - k),
            rotation: if spins { TAU * p } else { 0.0 },
            rgb: v.rgb,
            glyph: None,
            glyph_scale: 1.0,
        }
    };

    let mut group = SmallVec::new();
    group.push(ring(NodeKind::PulseRing, pulse, false));
    group.push(ring(NodeKind::DashedRing, dashed, true));
    group.push(VisualNode {
        kind: NodeKind::Indicator,
        center,
        radius: INDICATOR_RADIUS_PX,
        scale,
        opacity: 1.0,
        rotation: TAU * cycle(t, spin),
        rgb: v.rgb,
        glyph: Some(v.glyph),
        glyph_scale: v.size.factor(),
    });
    group
}

/// Position within a repeating period, in [0, 1).
#[inline]
pub fn cycle(t: f32, period: f32) -> f32 {
    if period <= 0.0 {
        0.0
    } else {
        (t / period).rem_euclid(1.0)
    }
}

/// 0 -> 1 -> 0 over one cycle.
#[inline]
pub fn ping_pong(p: f32) -> f32 {
    1.0 - (2.0 * p - 1.0).abs()
}

#[inline]
pub fn ease_in_out(x: f32) -> f32 {
    let x = x.clamp(0.0, 1.0);
    x * x * (3.0 - 2.0 * x)
}
