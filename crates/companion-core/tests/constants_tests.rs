// Sanity checks on tuning constants and their relationships.

use companion_core::constants::*;
use companion_core::VARIANTS;

#[test]
#[allow(clippy::assertions_on_constants)]
fn periods_are_positive_and_above_minimum() {
    for period in [
        STILL_WINDOW_MS,
        SPAWN_RECENCY_MS,
        HIDE_TIMEOUT_MS,
        PHYSICS_STEP_MS,
        PARTICLE_SPAWN_PERIOD_MS,
        AMBIENT_SPAWN_PERIOD_MS,
        ICON_PERIOD_MOVING_MS,
        ICON_PERIOD_IDLE_MS,
    ] {
        assert!(period >= MIN_PERIOD_MS);
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn timing_relationships_hold() {
    // Integration is finer than emission
    assert!(PHYSICS_STEP_MS < PARTICLE_SPAWN_PERIOD_MS);
    // The spawn recency window outlasts the idle debounce
    assert!(SPAWN_RECENCY_MS > STILL_WINDOW_MS);
    // The indicator cycles faster while moving
    assert!(ICON_PERIOD_MOVING_MS < ICON_PERIOD_IDLE_MS);
    assert!(HIDE_TIMEOUT_MS > STILL_WINDOW_MS);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn physics_constants_are_stable() {
    assert!(DRAG > 0.0 && DRAG < 1.0);
    assert!(GRAVITY > 0.0);
    assert!(LIFE_DECAY_PER_STEP > 0.0 && LIFE_DECAY_PER_STEP < 1.0);
    assert!(PARTICLE_MIN_SCALE > 0.0 && PARTICLE_MIN_SCALE < 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn caps_and_palette_are_sane() {
    assert!(MAX_PARTICLES > MAX_FLOATING);
    assert!(MAX_FLOATING > 0);
    assert_eq!(VARIANTS.len(), 7);
    let mut names: Vec<&str> = VARIANTS.iter().map(|v| v.name).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), VARIANTS.len());
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn rings_expand_beyond_indicator() {
    assert!(PULSE_RING_MOVING.0 > PULSE_RING_IDLE.0);
    assert!(DASHED_RING_MOVING.0 > DASHED_RING_IDLE.0);
    assert!(INDICATOR_SCALE_MOVING > INDICATOR_SCALE_IDLE);
    assert!(SAFETY_ZONE_RADIUS_PX > INDICATOR_RADIUS_PX);
}
