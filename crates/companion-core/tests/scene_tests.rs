// Presentation mapping: snapshots in, visual nodes out.

use companion_core::{
    compose, Companion, CompanionConfig, ElementId, FloatingElement, MotionState, NodeKind,
    Palette, Particle, PointerSample, SizeClass, Snapshot, VARIANTS,
};
use glam::Vec2;
use std::time::Duration;

fn snapshot(moving: bool) -> Snapshot {
    Snapshot {
        pointer: PointerSample::new(400.0, 300.0),
        motion: MotionState {
            is_visible: true,
            is_moving: moving,
        },
        dormant: false,
        variant: 3,
        velocity: Vec2::ZERO,
        particles: vec![Particle {
            id: ElementId(0),
            position: Vec2::new(410.0, 290.0),
            velocity: Vec2::new(0.5, -1.0),
            variant: 1,
            life: 0.5,
            max_life: 1.0,
        }],
        floating: vec![
            FloatingElement {
                id: ElementId(1),
                position: Vec2::new(350.0, 250.0),
                variant: 2,
                phase: 1.0,
                born: Duration::from_millis(1000),
            },
            FloatingElement {
                id: ElementId(2),
                position: Vec2::new(450.0, 380.0),
                variant: 4,
                phase: 4.0,
                born: Duration::from_millis(3000),
            },
        ],
        elapsed: Duration::from_millis(4250),
    }
}

#[test]
fn invisible_pointer_draws_nothing() {
    let mut s = snapshot(true);
    s.motion = MotionState::default();
    assert!(compose(&s, &Palette::default()).is_empty());
}

#[test]
fn moving_scene_has_sparkles_but_no_floating() {
    let scene = compose(&snapshot(true), &Palette::default());
    assert_eq!(scene.count(NodeKind::Indicator), 1);
    assert_eq!(scene.count(NodeKind::PulseRing), 1);
    assert_eq!(scene.count(NodeKind::DashedRing), 1);
    assert_eq!(scene.count(NodeKind::SafetyZone), 1);
    assert_eq!(scene.count(NodeKind::Sparkle), 3);
    assert_eq!(scene.count(NodeKind::Particle), 1);
    assert_eq!(scene.count(NodeKind::Floating), 0);

    let indicator = scene.first(NodeKind::Indicator).unwrap();
    assert_eq!(indicator.scale, 1.2);
    assert!((indicator.center - Vec2::new(400.0, 300.0)).length() <= 4.0);
    assert_eq!(indicator.glyph, Some(VARIANTS[3].glyph));
    assert_eq!(indicator.rgb, VARIANTS[3].rgb);
    assert_eq!(indicator.glyph_scale, VARIANTS[3].size.factor());
}

#[test]
fn glyph_scale_follows_size_class() {
    let scene = compose(&snapshot(false), &Palette::default());
    let floating: Vec<f32> = scene
        .nodes
        .iter()
        .filter(|n| n.kind == NodeKind::Floating)
        .map(|n| n.glyph_scale)
        .collect();
    // eye is small, alert is medium
    assert_eq!(floating, vec![SizeClass::Small.factor(), SizeClass::Medium.factor()]);
    let particle = scene.first(NodeKind::Particle).unwrap();
    assert_eq!(particle.glyph_scale, VARIANTS[1].size.factor());
    for node in scene.nodes.iter().filter(|n| n.glyph.is_none()) {
        assert_eq!(node.glyph_scale, 1.0);
    }
}

#[test]
fn idle_scene_orbits_floating_elements() {
    let s = snapshot(false);
    let scene = compose(&s, &Palette::default());
    assert_eq!(scene.count(NodeKind::Sparkle), 0);
    assert_eq!(scene.count(NodeKind::Floating), 2);
    assert_eq!(scene.first(NodeKind::Indicator).unwrap().scale, 1.0);

    let floating: Vec<_> = scene
        .nodes
        .iter()
        .filter(|n| n.kind == NodeKind::Floating)
        .collect();
    for (node, element) in floating.iter().zip(&s.floating) {
        let d = node.center - element.position;
        assert!(d.x.abs() <= 20.0 + 1e-4 && d.y.abs() <= 15.0 + 1e-4);
        assert!(node.scale >= 0.8 && node.scale <= 1.2);
        assert_eq!(node.rgb, VARIANTS[element.variant].rgb);
    }
}

#[test]
fn particles_fade_and_shrink_with_life() {
    let scene = compose(&snapshot(true), &Palette::default());
    let p = scene.first(NodeKind::Particle).unwrap();
    assert_eq!(p.center, Vec2::new(410.0, 290.0));
    assert!((p.opacity - 0.5).abs() < 1e-6);
    assert!((p.scale - 0.65).abs() < 1e-6);
}

#[test]
fn dormant_hides_indicator_but_keeps_effects() {
    let mut s = snapshot(false);
    s.dormant = true;
    let scene = compose(&s, &Palette::default());
    assert_eq!(scene.count(NodeKind::Indicator), 0);
    assert_eq!(scene.count(NodeKind::PulseRing), 0);
    assert_eq!(scene.count(NodeKind::Floating), 2);
    assert_eq!(scene.count(NodeKind::Particle), 1);
}

#[test]
fn paint_order_is_back_to_front() {
    let scene = compose(&snapshot(true), &Palette::default());
    let kinds: Vec<NodeKind> = scene.nodes.iter().map(|n| n.kind).collect();
    assert_eq!(kinds.first(), Some(&NodeKind::SafetyZone));
    let indicator = kinds.iter().position(|k| *k == NodeKind::Indicator).unwrap();
    let particle = kinds.iter().position(|k| *k == NodeKind::Particle).unwrap();
    assert!(particle < indicator);
    assert_eq!(kinds.last(), Some(&NodeKind::Sparkle));
}

#[test]
fn compose_is_pure() {
    let s = snapshot(false);
    let copy = s.clone();
    let a = compose(&s, &Palette::default());
    let b = compose(&s, &Palette::default());
    assert_eq!(a, b);
    assert_eq!(s, copy);
}

#[test]
fn every_node_is_drawable() {
    let mut c = Companion::with_seed(CompanionConfig::default(), 9);
    for t in (0..3000u64).step_by(16) {
        if t < 1200 {
            c.pointer_move(Duration::from_millis(t), 100.0 + t as f32 * 0.2, 200.0);
        } else {
            c.advance(Duration::from_millis(t));
        }
        let scene = compose(&c.snapshot(), c.palette());
        for node in &scene.nodes {
            assert!(node.center.is_finite());
            assert!(node.opacity >= 0.0 && node.opacity <= 1.0);
            assert!(node.scale >= 0.0 && node.scale.is_finite());
            assert!(node.radius > 0.0);
        }
    }
}
