// Bounded populations evict by spawn order, never by age or life.

use companion_core::particles::integrate;
use companion_core::population::IdSource;
use companion_core::{ElementId, Particle, PhysicsParams, Population};
use glam::Vec2;

fn particle(id: ElementId, life: f32) -> Particle {
    Particle {
        id,
        position: Vec2::ZERO,
        velocity: Vec2::ZERO,
        variant: 0,
        life,
        max_life: 1.0,
    }
}

#[test]
fn oldest_is_evicted_even_with_most_life() {
    let mut ids = IdSource::default();
    let mut pop = Population::new(3);
    pop.push(particle(ids.next_id(), 1.0));
    pop.push(particle(ids.next_id(), 0.1));
    pop.push(particle(ids.next_id(), 0.2));

    let evicted = pop.push(particle(ids.next_id(), 0.5)).unwrap();
    assert_eq!(evicted.id, ElementId(0));
    assert_eq!(evicted.life, 1.0);
    let lives: Vec<f32> = pop.iter().map(|p| p.life).collect();
    assert_eq!(lives, vec![0.1, 0.2, 0.5]);
}

#[test]
fn integration_removes_only_expired() {
    let mut ids = IdSource::default();
    let mut pop = Population::new(16);
    pop.push(particle(ids.next_id(), 0.01));
    pop.push(particle(ids.next_id(), 0.9));
    pop.push(particle(ids.next_id(), 0.015));

    let removed = integrate(&mut pop, &PhysicsParams::default());
    assert_eq!(removed, 2);
    assert_eq!(pop.len(), 1);
    assert_eq!(pop.oldest().map(|p| p.id), Some(ElementId(1)));
}

#[test]
fn ids_are_unique_and_increasing() {
    let mut ids = IdSource::default();
    let a = ids.next_id();
    let b = ids.next_id();
    assert!(b > a);
}
