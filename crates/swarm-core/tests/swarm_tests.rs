// Swarm controller behaviour: population control, targeting, pulse budget,
// view blend and drawing.

use proptest::prelude::*;
use rand::rngs::mock::StepRng;
use swarm_core::{
    LifeState, Mode, PulseState, Shape, Sprite, SpriteBuffer, Stroke, Surface, Swarm,
    SwarmConfig, Vector2, Viewport,
};

fn small_config() -> SwarmConfig {
    SwarmConfig {
        initial_count: 60,
        min_count: 12,
        max_count: 200,
        density: 40.0,
        pulse_probability: 0.0,
        ..SwarmConfig::default()
    }
}

fn segment(a: Vector2, b: Vector2) -> Shape {
    Shape::from_strokes([Stroke::new(a, b, 100.0)])
}

fn diagonal() -> Vec<Shape> {
    vec![segment(Vector2::new(-1.0, -1.0), Vector2::new(1.0, 1.0))]
}

fn tick_n<R: rand::Rng>(swarm: &mut Swarm<R>, n: u32) {
    for _ in 0..n {
        swarm.tick();
    }
}

#[test]
fn new_swarm_fades_in_initial_population() {
    let cfg = small_config();
    let mut swarm = Swarm::new(cfg.clone(), 1);
    assert_eq!(swarm.mode(), Mode::Wander);
    assert_eq!(swarm.live_count(), cfg.initial_count);
    assert!(swarm
        .particles()
        .iter()
        .all(|p| p.life() == LifeState::Appearing { frame: 0 }));

    tick_n(&mut swarm, cfg.life_frames);
    assert!(swarm.particles().iter().all(|p| p.life() == LifeState::Normal));
    assert_eq!(swarm.particles().len(), cfg.initial_count);
}

#[test]
fn empty_shapes_return_to_wander() {
    let cfg = small_config();
    let mut swarm = Swarm::new(cfg.clone(), 2);
    swarm.on_shapes_changed(&diagonal());
    assert_eq!(swarm.mode(), Mode::Align);
    assert!(swarm.live_count() > cfg.initial_count);
    tick_n(&mut swarm, 10);

    swarm.on_shapes_changed(&[]);
    assert_eq!(swarm.mode(), Mode::Wander);
    assert_eq!(swarm.view_blend_target(), 0.0);
    assert!(swarm.particles().iter().all(|p| p.target().is_none()));

    tick_n(&mut swarm, cfg.life_frames);
    assert_eq!(swarm.live_count(), cfg.initial_count);
    assert_eq!(swarm.particles().len(), cfg.initial_count);
}

#[test]
fn population_converges_after_one_fade() {
    let cfg = small_config();
    let mut swarm = Swarm::new(cfg.clone(), 3);
    for target in [0usize, 5, 60, 150, 5_000, 17] {
        swarm.set_entity_count(target);
        let expected = target.min(cfg.max_count);
        assert_eq!(swarm.live_count(), expected, "live count right after resize");
        tick_n(&mut swarm, cfg.life_frames);
        assert_eq!(swarm.live_count(), expected);
        assert_eq!(
            swarm.particles().len(),
            expected,
            "faded particles are removed after {} ticks",
            cfg.life_frames
        );
    }
}

#[test]
fn shrinking_keeps_particles_until_they_fade() {
    let cfg = small_config();
    let mut swarm = Swarm::new(cfg.clone(), 4);
    swarm.set_entity_count(10);
    assert_eq!(swarm.particles().len(), cfg.initial_count, "no synchronous removal");
    tick_n(&mut swarm, cfg.life_frames - 1);
    assert_eq!(swarm.particles().len(), cfg.initial_count);
    swarm.tick();
    assert_eq!(swarm.particles().len(), 10);
}

#[test]
fn three_particles_on_a_diagonal_take_the_three_samples() {
    let cfg = SwarmConfig {
        min_count: 3,
        max_count: 3,
        ..small_config()
    };
    let mut swarm = Swarm::new(cfg, 5);
    swarm.on_shapes_changed(&diagonal());
    assert_eq!(swarm.live_count(), 3);

    let mut targets: Vec<Vector2> = swarm
        .particles()
        .iter()
        .filter(|p| p.is_live())
        .map(|p| p.target().expect("every live particle is targeted"))
        .collect();
    targets.sort_by(|a, b| a.x.total_cmp(&b.x));
    let expected = [
        Vector2::new(-1.0, -1.0),
        Vector2::new(0.0, 0.0),
        Vector2::new(1.0, 1.0),
    ];
    for (got, want) in targets.iter().zip(expected) {
        assert!((*got - want).length() < 1e-5, "got {got:?}, want {want:?}");
    }
}

#[test]
fn particles_settle_on_a_straight_path() {
    let cfg = small_config();
    let mut swarm = Swarm::new(cfg.clone(), 6);
    let line = vec![segment(Vector2::new(-0.5, 0.0), Vector2::new(0.5, 0.0))];
    swarm.on_shapes_changed(&line);
    assert_eq!(swarm.live_count(), 40, "one unit of length at density 40");

    for p in swarm.particles().iter().filter(|p| p.is_live()) {
        let t = p.target().expect("targeted");
        assert!(t.y.abs() < 1e-6 && (-0.5..=0.5).contains(&t.x), "target {t:?} off the path");
    }

    tick_n(&mut swarm, cfg.align_frames);
    for p in swarm.particles().iter().filter(|p| p.is_live()) {
        assert_eq!(Some(p.pos()), p.target(), "settled exactly on target");
    }
}

#[test]
fn long_path_is_capped_at_max_count() {
    let cfg = small_config();
    let mut swarm = Swarm::new(cfg.clone(), 7);
    let zigzag: Vec<Shape> = (0..20)
        .map(|i| {
            let y = -1.0 + i as f32 * 0.1;
            segment(Vector2::new(-1.0, y), Vector2::new(1.0, y))
        })
        .collect();
    swarm.on_shapes_changed(&zigzag);
    assert_eq!(swarm.live_count(), cfg.max_count);
}

#[test]
fn inverted_population_bounds_settle_on_max_count() {
    let cfg = SwarmConfig {
        initial_count: 5,
        min_count: 50,
        max_count: 10,
        ..small_config()
    };
    let mut swarm = Swarm::new(cfg, 13);
    let stroke = vec![segment(Vector2::new(-1.0, 0.0), Vector2::new(1.0, 0.0))];
    swarm.on_shapes_changed(&stroke);
    assert_eq!(swarm.live_count(), 10);

    let mut dot = Shape::new();
    dot.add_point(0.0, 0.0, 1.0);
    swarm.on_shapes_changed(&[dot]);
    assert_eq!(swarm.live_count(), 10, "cluster size is capped too");
}

#[test]
fn single_point_gathers_a_cluster() {
    let cfg = small_config();
    let mut swarm = Swarm::new(cfg.clone(), 8);
    let mut dot = Shape::new();
    dot.add_point(0.3, -0.2, 1.0);
    swarm.on_shapes_changed(&[dot]);

    assert_eq!(swarm.mode(), Mode::Align);
    assert_eq!(swarm.live_count(), cfg.min_count);
    let anchor = Vector2::new(0.3, -0.2);
    for p in swarm.particles().iter().filter(|p| p.is_live()) {
        let t = p.target().expect("targeted");
        assert!(t.distance(anchor) <= cfg.cluster_radius + 1e-6);
    }
}

#[test]
fn pulse_budget_is_never_exceeded() {
    let cfg = SwarmConfig {
        pulse_probability: 0.5,
        pulse_hold_frames: 40,
        ..small_config()
    };
    let mut swarm = Swarm::new(cfg.clone(), 9);
    let mut peak = 0;
    for i in 0..2_000 {
        if i == 700 {
            swarm.on_shapes_changed(&diagonal());
        }
        if i == 1_400 {
            swarm.set_entity_count(3);
        }
        swarm.tick();
        let enlarged = swarm.enlarged_count();
        assert!(enlarged <= cfg.max_pulse, "tick {i}: {enlarged} enlarged");
        let holding_slots = swarm
            .particles()
            .iter()
            .filter(|p| p.pulse().is_active())
            .count();
        assert_eq!(swarm.active_pulses(), holding_slots, "tick {i}: slot leak");
        peak = peak.max(enlarged);
    }
    assert_eq!(peak, cfg.max_pulse, "budget is reached under heavy demand");
}

#[test]
fn retiring_pulsing_particles_frees_their_slots() {
    let cfg = SwarmConfig {
        pulse_probability: 1.0,
        ..small_config()
    };
    let mut swarm = Swarm::new(cfg.clone(), 10);
    swarm.tick();
    assert_eq!(swarm.active_pulses(), cfg.max_pulse);

    swarm.set_entity_count(0);
    assert_eq!(swarm.active_pulses(), 0);
    assert!(swarm
        .particles()
        .iter()
        .all(|p| p.pulse() == PulseState::Idle));
}

#[test]
fn constant_generator_gives_exact_transitions() {
    let cfg = SwarmConfig {
        initial_count: 8,
        pulse_probability: 1.0,
        ..small_config()
    };
    let mut swarm = Swarm::with_rng(cfg.clone(), StepRng::new(0, 0));
    swarm.tick();
    let states: Vec<PulseState> = swarm.particles().iter().map(|p| p.pulse()).collect();
    assert!(states[..cfg.max_pulse]
        .iter()
        .all(|s| matches!(s, PulseState::Growing { frame: 0, .. })));
    assert!(states[cfg.max_pulse..].iter().all(|s| *s == PulseState::Idle));

    tick_n(&mut swarm, cfg.pulse_anim_frames);
    assert!(swarm.particles()[..cfg.max_pulse]
        .iter()
        .all(|p| matches!(p.pulse(), PulseState::Holding { frame: 0, .. })));
}

#[test]
fn view_blend_eases_and_snaps() {
    let cfg = small_config();
    let mut swarm = Swarm::new(cfg, 11);
    swarm.on_shapes_changed(&diagonal());
    assert_eq!(swarm.view_blend_target(), 1.0);

    let mut prev = swarm.view_blend();
    let mut ticks = 0;
    while swarm.view_blend() < 1.0 {
        swarm.tick();
        assert!(swarm.view_blend() > prev, "blend must keep rising");
        prev = swarm.view_blend();
        ticks += 1;
        assert!(ticks < 200, "blend never reached its target");
    }
    assert_eq!(swarm.view_blend(), 1.0);

    swarm.on_shapes_changed(&[]);
    tick_n(&mut swarm, 200);
    assert_eq!(swarm.view_blend(), 0.0);
}

#[derive(Default)]
struct Unloaded {
    calls: usize,
}

impl Surface for Unloaded {
    fn sprite_ready(&self, _variant: usize) -> bool {
        false
    }

    fn draw_sprite(&mut self, _sprite: &Sprite) {
        self.calls += 1;
    }
}

#[test]
fn draw_skips_invisible_and_unloaded_particles() {
    let cfg = small_config();
    let mut swarm = Swarm::new(cfg.clone(), 12);
    let viewport = Viewport::new(640.0, 480.0);

    let mut buffer = SpriteBuffer::default();
    swarm.draw(&mut buffer, viewport);
    assert!(buffer.sprites.is_empty(), "newborn particles are fully faded");

    swarm.tick();
    swarm.draw(&mut buffer, viewport);
    assert_eq!(buffer.sprites.len(), cfg.initial_count);
    for s in &buffer.sprites {
        assert!(s.opacity > 0.0 && s.opacity <= cfg.opacity);
        assert!(s.position_px.x >= -50.0 && s.position_px.x <= 690.0);
    }

    let mut unloaded = Unloaded::default();
    swarm.draw(&mut unloaded, viewport);
    assert_eq!(unloaded.calls, 0);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn wandering_never_leaves_the_margin(seed in any::<u64>()) {
        let cfg = SwarmConfig { initial_count: 40, ..small_config() };
        let limit = 1.0 + cfg.boundary_margin;
        let mut swarm = Swarm::new(cfg, seed);
        for _ in 0..600 {
            swarm.tick();
            for p in swarm.particles() {
                prop_assert!(p.pos().x.abs() <= limit && p.pos().y.abs() <= limit);
            }
        }
    }
}
