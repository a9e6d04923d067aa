//! Swarm controller.
//!
//! Keeps the particle population and targets consistent with the current
//! shapes. Population changes never touch the array directly: new particles
//! fade in, surplus particles are told to fade out and are dropped by the
//! tick that sees them die.

use crate::config::SwarmConfig;
use crate::constants::VIEW_BLEND_SNAP;
use crate::particle::{Mode, Particle, PulseCounter};
use crate::path::Shape;
use crate::projection::{Projection, Viewport};
use crate::render::Surface;
use crate::sampling::{cluster_targets, degenerate_anchor, sample_arc_length, total_distance};
use crate::vector::Vector2;
use rand::prelude::*;

pub struct Swarm<R: Rng = StdRng> {
    config: SwarmConfig,
    particles: Vec<Particle>,
    pulses: PulseCounter,
    mode: Mode,
    view_blend: f32,
    view_blend_target: f32,
    rng: R,
}

impl Swarm<StdRng> {
    /// Swarm with a seeded generator, holding `initial_count` particles.
    pub fn new(config: SwarmConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Swarm<R> {
    /// Swarm drawing every random decision from `rng`.
    pub fn with_rng(config: SwarmConfig, rng: R) -> Self {
        let mut swarm = Self {
            pulses: PulseCounter::new(config.max_pulse),
            particles: Vec::with_capacity(config.max_count),
            mode: Mode::Wander,
            view_blend: 0.0,
            view_blend_target: 0.0,
            rng,
            config,
        };
        swarm.set_entity_count(swarm.config.initial_count);
        swarm
    }

    pub fn config(&self) -> &SwarmConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Particles neither fading out nor dead.
    pub fn live_count(&self) -> usize {
        self.particles.iter().filter(|p| p.is_live()).count()
    }

    /// Particles currently growing or held large.
    pub fn enlarged_count(&self) -> usize {
        self.particles
            .iter()
            .filter(|p| p.pulse().is_enlarged())
            .count()
    }

    /// Pulse slots in use.
    pub fn active_pulses(&self) -> usize {
        self.pulses.active()
    }

    pub fn view_blend(&self) -> f32 {
        self.view_blend
    }

    pub fn view_blend_target(&self) -> f32 {
        self.view_blend_target
    }

    /// Re-derive mode, population and targets from the shapes.
    pub fn on_shapes_changed(&mut self, shapes: &[Shape]) {
        if shapes.is_empty() {
            self.mode = Mode::Wander;
            self.view_blend_target = 0.0;
            for p in &mut self.particles {
                p.clear_target();
            }
            self.set_entity_count(self.config.initial_count);
            log::debug!("shapes cleared, wandering with {}", self.live_count());
            return;
        }

        self.mode = Mode::Align;
        self.view_blend_target = 1.0;

        let total = total_distance(shapes);
        if total < self.config.short_path_epsilon {
            let anchor = degenerate_anchor(shapes);
            self.set_entity_count(self.config.min_count);
            let targets = cluster_targets(
                anchor,
                self.live_count(),
                self.config.cluster_radius,
                &mut self.rng,
            );
            self.assign_targets(targets);
            log::debug!(
                "point at ({:.3}, {:.3}), clustering {}",
                anchor.x,
                anchor.y,
                self.live_count()
            );
        } else {
            let count = self.config.count_for_distance(total);
            self.set_entity_count(count);
            let mut targets = sample_arc_length(shapes, self.live_count());
            targets.shuffle(&mut self.rng);
            self.assign_targets(targets);
            log::debug!(
                "{} shapes, distance {:.3}, aligning {}",
                shapes.len(),
                total,
                count
            );
        }
    }

    fn assign_targets(&mut self, targets: Vec<Vector2>) {
        let live = self.particles.iter_mut().filter(|p| p.is_live());
        for (particle, target) in live.zip(targets) {
            particle.set_target(target);
        }
    }

    /// Move the live population towards `target` (capped at `max_count`).
    /// Growth spawns fading-in particles; shrinkage fades out a random subset.
    pub fn set_entity_count(&mut self, target: usize) {
        let target = target.min(self.config.max_count);
        let live = self.live_count();

        if target > live {
            for _ in live..target {
                let pos = Vector2::new(
                    self.rng.gen::<f32>() * 2.0 - 1.0,
                    self.rng.gen::<f32>() * 2.0 - 1.0,
                );
                let particle = Particle::spawn(pos, &mut self.rng, &self.config);
                self.particles.push(particle);
            }
            log::trace!("spawned {} particles", target - live);
        } else if target < live {
            let mut candidates: Vec<usize> = self
                .particles
                .iter()
                .enumerate()
                .filter(|(_, p)| p.is_live())
                .map(|(i, _)| i)
                .collect();
            candidates.shuffle(&mut self.rng);
            for &i in &candidates[..live - target] {
                self.particles[i].begin_disappearing(&mut self.pulses);
            }
            log::trace!("retiring {} particles", live - target);
        }
    }

    /// One simulation step: view blend, every particle, then removal of the
    /// particles that died during this step.
    pub fn tick(&mut self) {
        self.step_view_blend();

        let mode = self.mode;
        for particle in &mut self.particles {
            particle.update(mode, &mut self.pulses, &mut self.rng, &self.config);
        }
        self.particles.retain(|p| !p.is_dead());
    }

    fn step_view_blend(&mut self) {
        self.view_blend += (self.view_blend_target - self.view_blend) * self.config.view_blend_rate;
        if (self.view_blend_target - self.view_blend).abs() < VIEW_BLEND_SNAP {
            self.view_blend = self.view_blend_target;
        }
    }

    /// Current camera framing for a surface of the given size.
    pub fn projection(&self, viewport: Viewport) -> Projection {
        Projection::new(viewport, self.config.align_aspect, self.view_blend)
    }

    /// Hand every visible particle to the surface. Does not change state.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, viewport: Viewport) {
        let projection = self.projection(viewport);
        for particle in &self.particles {
            particle.draw(surface, &projection, &self.config);
        }
    }
}
