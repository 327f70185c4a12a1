//! Integration tests for the particle field's behavioural guarantees.

use glam::Vec2;
use particlebg::particle::Particle;
use particlebg::prelude::*;
use particlebg::proximity;
use particlebg::spawn::{Spawner, CLICK_SCATTER_RADIUS};

/// Draw target that only counts what it is asked to paint.
#[derive(Default)]
struct CountingSurface {
    clears: usize,
    circles: usize,
    lines: usize,
}

impl DrawSurface for CountingSurface {
    fn clear(&mut self) {
        self.clears += 1;
        self.circles = 0;
        self.lines = 0;
    }
    fn set_fill_color(&mut self, _: Color) {}
    fn set_stroke_color(&mut self, _: Color) {}
    fn set_line_width(&mut self, _: f32) {}
    fn set_global_alpha(&mut self, _: f32) {}
    fn fill_circle(&mut self, _: Vec2, _: f32) {
        self.circles += 1;
    }
    fn stroke_line(&mut self, _: Vec2, _: Vec2) {
        self.lines += 1;
    }
}

const BOUNDS: Vec2 = Vec2::new(800.0, 600.0);

fn free_config() -> ParticleConfig {
    ParticleConfig::default()
        .with_speed_range(0.0, 10.0)
        .with_repulse_radius(100.0)
}

// ============================================================================
// Particle
// ============================================================================

#[test]
fn test_positions_stay_in_bounds_under_any_updates() {
    let config = ParticleConfig::interactive();
    let mut spawner = Spawner::from_seed(42);
    let mut particles: Vec<Particle> = (0..200)
        .map(|_| Particle::create(BOUNDS, &config, None, &mut spawner))
        .collect();

    // Sweep the pointer around so repulsion keeps shoving particles at walls.
    for frame in 0..2_000 {
        let t = frame as f32 * 0.05;
        let pointer = Vec2::new(400.0 + 380.0 * t.cos(), 300.0 + 280.0 * t.sin());
        for p in &mut particles {
            p.update(Some(pointer), &config, BOUNDS);
            assert!(p.is_within(BOUNDS), "escaped at frame {}: {:?}", frame, p);
        }
    }
}

#[test]
fn test_bounce_points_velocity_back_inside() {
    let config = free_config();

    let mut right = Particle::new(Vec2::new(799.0, 300.0), Vec2::new(5.0, 0.0));
    right.update(None, &config, BOUNDS);
    assert_eq!(right.position.x, 800.0);
    assert!(right.velocity.x < 0.0);

    let mut top = Particle::new(Vec2::new(400.0, 1.0), Vec2::new(0.0, -5.0));
    top.update(None, &config, BOUNDS);
    assert_eq!(top.position.y, 0.0);
    assert!(top.velocity.y > 0.0);
}

#[test]
fn test_bounce_forces_sign_even_when_already_inward() {
    // Outside the edge but already moving back in: the sign must stay inward.
    let mut p = Particle::new(Vec2::new(-3.0, 300.0), Vec2::new(2.0, 0.0));
    p.bounce(BOUNDS);
    assert_eq!(p.position.x, 0.0);
    assert_eq!(p.velocity.x, 2.0);
}

#[test]
fn test_repulsion_pushes_outward_inside_radius() {
    let config = free_config();
    let pointer = Vec2::new(400.0, 300.0);

    let mut near = Particle::new(Vec2::new(430.0, 340.0), Vec2::ZERO);
    near.update(Some(pointer), &config, BOUNDS);
    let outward = (Vec2::new(430.0, 340.0) - pointer).normalize();
    assert!(near.velocity.dot(outward) > 0.0);
}

#[test]
fn test_repulsion_ignored_outside_radius() {
    let pointer = Vec2::new(400.0, 300.0);
    let velocity = Vec2::new(0.3, -0.2);

    let mut far = Particle::new(Vec2::new(500.0, 300.0), velocity);
    far.apply_repulsion(pointer, 100.0);
    assert_eq!(far.velocity, velocity);

    let mut disabled = Particle::new(Vec2::new(401.0, 300.0), velocity);
    disabled.apply_repulsion(pointer, 0.0);
    assert_eq!(disabled.velocity, velocity);
}

// ============================================================================
// Proximity lines
// ============================================================================

#[test]
fn test_line_opacity_matches_distance() {
    let config = ParticleConfig::default().with_proximity_threshold(150.0);
    let points = [Vec2::new(100.0, 100.0), Vec2::new(160.0, 100.0)];

    let mut surface = RecordingSurface::new();
    proximity::draw_particle(&mut surface, points[0], Some(0), points, &config);

    let lines = surface.lines();
    assert_eq!(lines.len(), 1);
    assert!((lines[0].alpha - (1.0 - 60.0 / 150.0)).abs() < 1e-6);
    assert_eq!(surface.current_alpha(), 1.0);
}

#[test]
fn test_no_line_at_or_beyond_threshold() {
    let config = ParticleConfig::default().with_proximity_threshold(100.0);
    let points = [Vec2::ZERO, Vec2::new(100.0, 0.0), Vec2::new(0.0, 250.0)];

    let mut surface = RecordingSurface::new();
    proximity::draw_particle(&mut surface, points[0], Some(0), points, &config);
    assert!(surface.lines().is_empty());
    assert_eq!(surface.circles().len(), 1);
}

#[test]
fn test_zero_threshold_disables_lines() {
    let config = ParticleConfig::default().with_proximity_threshold(0.0);
    let points = [Vec2::ZERO, Vec2::new(1.0, 0.0)];

    let mut surface = RecordingSurface::new();
    proximity::draw_particle(&mut surface, points[0], Some(0), points, &config);
    assert!(surface.lines().is_empty());
}

#[test]
fn test_each_pair_drawn_from_both_ends() {
    let config = ParticleConfig::default()
        .with_particle_count(2)
        .with_speed_range(0.0, 0.0)
        .with_proximity_threshold(10_000.0);
    let mut sim = Simulation::new(config).with_seed(8);
    sim.resize(100, 100);

    let mut surface = RecordingSurface::new();
    sim.step(&mut surface);
    assert_eq!(surface.circles().len(), 2);
    assert_eq!(surface.lines().len(), 2);
}

#[test]
fn test_interleaved_lines_mix_moved_and_unmoved_positions() {
    let config = ParticleConfig::default()
        .with_particle_count(2)
        .with_speed_range(1.0, 1.0)
        .with_proximity_threshold(10_000.0);
    let mut sim = Simulation::new(config).with_seed(31);
    sim.resize(400, 400);
    let old: Vec<Vec2> = sim.particles().iter().map(|p| p.position).collect();

    let mut surface = RecordingSurface::new();
    sim.step(&mut surface);
    let new: Vec<Vec2> = sim.particles().iter().map(|p| p.position).collect();
    assert_ne!(old[1], new[1]);

    // Particle 0 moves and draws before particle 1 has moved; particle 1
    // then draws against particle 0's new position.
    let lines = surface.lines();
    assert_eq!(lines.len(), 2);
    assert_eq!((lines[0].from, lines[0].to), (new[0], old[1]));
    assert_eq!((lines[1].from, lines[1].to), (new[1], new[0]));
}

// ============================================================================
// Simulation
// ============================================================================

#[test]
fn test_click_spawns_k_particles_near_click() {
    let config = ParticleConfig::default()
        .with_particle_count(40)
        .with_spawn_on_click(7);
    let mut sim = Simulation::new(config).with_seed(13);
    sim.resize(800, 600);
    let before: Vec<Particle> = sim.particles().to_vec();

    let click = Vec2::new(200.0, 150.0);
    assert_eq!(sim.on_click(click.x, click.y), 7);

    assert_eq!(sim.len(), 47);
    assert_eq!(&sim.particles()[..40], &before[..]);
    for p in &sim.particles()[40..] {
        assert!(p.position.distance(click) < CLICK_SCATTER_RADIUS + 1e-3);
    }
}

#[test]
fn test_repeated_clicks_grow_without_cap() {
    let config = ParticleConfig::default()
        .with_particle_count(10)
        .with_spawn_on_click(5);
    let mut sim = Simulation::new(config).with_seed(2);
    sim.resize(400, 400);
    for _ in 0..20 {
        sim.on_click(200.0, 200.0);
    }
    assert_eq!(sim.len(), 110);
}

#[test]
fn test_config_replacement_rebuilds_from_scratch() {
    let config = ParticleConfig::interactive().with_particle_count(150);
    let mut sim = Simulation::new(config.clone()).with_seed(99);
    sim.resize(1024, 768);
    sim.on_click(10.0, 10.0);
    let old: Vec<Vec2> = sim.particles().iter().map(|p| p.position).collect();
    assert_eq!(old.len(), 155);

    assert!(sim.set_config(config.with_particle_count(50)));
    assert_eq!(sim.len(), 50);
    assert!(sim.particles().iter().all(|p| !old.contains(&p.position)));
}

#[test]
fn test_soak_ten_thousand_frames() {
    let config = ParticleConfig::interactive();
    let mut sim = Simulation::new(config).with_seed(2024);
    sim.resize(800, 600);
    sim.on_pointer_move(400.0, 300.0);

    let mut surface = CountingSurface::default();
    let bounds = sim.dimensions().as_vec2();
    for _ in 0..10_000 {
        sim.step(&mut surface);
    }

    assert_eq!(sim.len(), 150);
    assert_eq!(surface.clears, 10_000);
    assert_eq!(surface.circles, 150);
    for p in sim.particles() {
        assert!(p.position.is_finite() && p.velocity.is_finite());
        assert!(p.is_within(bounds));
        assert!(p.speed() <= 2.0 + 1e-4);
    }
}

#[test]
fn test_zero_config_values_reproduce_plain_field() {
    // No repulsion and no click spawning: pointer and clicks change nothing.
    let config = ParticleConfig::default().with_particle_count(20);
    let mut a = Simulation::new(config.clone()).with_seed(77);
    let mut b = Simulation::new(config).with_seed(77);
    a.resize(500, 500);
    b.resize(500, 500);

    b.on_pointer_move(250.0, 250.0);
    assert_eq!(b.on_click(250.0, 250.0), 0);

    let mut sa = CountingSurface::default();
    let mut sb = CountingSurface::default();
    for _ in 0..100 {
        a.step(&mut sa);
        b.step(&mut sb);
    }
    assert_eq!(a.particles(), b.particles());
}
