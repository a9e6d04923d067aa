//! One swarm member and its four independent state machines.
//!
//! Per tick a particle advances, in order: life, then either wander or align,
//! then the size pulse. Each machine is a small enum whose transition
//! function returns the next variant.

use crate::config::SwarmConfig;
use crate::ease::{ease_out, frame_phase};
use crate::projection::Projection;
use crate::render::{Sprite, Surface};
use crate::vector::{from_angle, Vector2, Vector2Ext};
use rand::Rng;
use std::f32::consts::TAU;

/// Behaviour requested by the controller for the whole swarm.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Wander,
    Align,
}

/// Shared budget of particles allowed in a pulse at the same time.
///
/// A slot is taken on entry to `Growing` and handed back on return to `Idle`,
/// or when a pulsing particle is reclaimed by a population shrink.
#[derive(Clone, Debug)]
pub struct PulseCounter {
    active: usize,
    max: usize,
}

impl PulseCounter {
    pub fn new(max: usize) -> Self {
        Self { active: 0, max }
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn max(&self) -> usize {
        self.max
    }

    #[inline]
    pub fn has_room(&self) -> bool {
        self.active < self.max
    }

    fn acquire(&mut self) -> bool {
        if self.has_room() {
            self.active += 1;
            true
        } else {
            false
        }
    }

    fn release(&mut self) {
        self.active = self.active.saturating_sub(1);
    }
}

/// Continuous heading oscillation. A segment eases the heading from
/// `angle_start` to `angle_target` over `duration` ticks.
#[derive(Clone, Debug)]
pub struct WanderState {
    pub angle: f32,
    pub angle_start: f32,
    pub angle_target: f32,
    pub frame: u32,
    pub duration: u32,
    pub speed: f32,
}

impl WanderState {
    fn new<R: Rng + ?Sized>(rng: &mut R, cfg: &SwarmConfig) -> Self {
        let angle = rng.gen::<f32>() * TAU;
        let duration = sample_frames(rng, cfg.wander_frames_min, cfg.wander_frames_max);
        Self {
            angle,
            angle_start: angle,
            angle_target: angle,
            // a finished segment, so the first tick rolls a fresh one
            frame: duration,
            duration,
            speed: cfg.wander_speed.sample(rng),
        }
    }

    #[inline]
    fn finished(&self) -> bool {
        self.frame >= self.duration
    }

    fn begin_segment<R: Rng + ?Sized>(&mut self, rng: &mut R, cfg: &SwarmConfig) {
        self.angle_start = self.angle_target;
        let delta = (rng.gen::<f32>() - 0.5) * 2.0 * cfg.wander_turn_max;
        self.angle_target = self.angle_start + delta;
        self.speed = cfg.wander_speed.sample(rng);
        self.duration = sample_frames(rng, cfg.wander_frames_min, cfg.wander_frames_max);
        self.frame = 0;
    }

    /// Advance one tick and return the velocity for it.
    fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R, cfg: &SwarmConfig) -> Vector2 {
        if self.finished() {
            self.begin_segment(rng, cfg);
        }
        self.frame = (self.frame + 1).min(self.duration);
        let t = ease_out(frame_phase(self.frame, self.duration));
        self.angle = self.angle_start + (self.angle_target - self.angle_start) * t;
        from_angle(self.angle, self.speed)
    }

    /// Restart from a fixed heading after a wall bounce; the next tick rolls
    /// a new segment from there.
    fn restart_from(&mut self, heading: f32) {
        self.angle = heading;
        self.angle_start = heading;
        self.angle_target = heading;
        self.frame = self.duration;
    }
}

/// Approach then hover around an assigned target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AlignState {
    Approaching { start: Vector2, frame: u32 },
    Hovering { time: u32 },
}

/// Per-particle elliptical drift used once settled on a target.
#[derive(Clone, Copy, Debug)]
pub struct Hover {
    pub radius: f32,
    pub speed_x: f32,
    pub speed_y: f32,
    pub phase: f32,
}

impl Hover {
    fn new<R: Rng + ?Sized>(rng: &mut R, cfg: &SwarmConfig) -> Self {
        Self {
            radius: cfg.hover_radius.sample(rng),
            speed_x: cfg.hover_speed.sample(rng),
            speed_y: cfg.hover_speed.sample(rng),
            phase: rng.gen::<f32>() * TAU,
        }
    }

    #[inline]
    pub fn offset(&self, time: u32) -> Vector2 {
        let t = time as f32;
        Vector2::new(
            (t * self.speed_x + self.phase).sin(),
            (t * self.speed_y + self.phase * crate::constants::HOVER_PHASE_Y_RATIO).cos(),
        ) * self.radius
    }
}

/// Grow, hold, shrink size animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PulseState {
    Idle,
    Growing { frame: u32, target: f32 },
    Holding { frame: u32, target: f32 },
    Shrinking { frame: u32, from: f32 },
}

impl PulseState {
    /// True while the particle holds a pulse slot.
    #[inline]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// True in the states bounded by the pulse budget.
    #[inline]
    pub fn is_enlarged(&self) -> bool {
        matches!(self, Self::Growing { .. } | Self::Holding { .. })
    }

    fn size(&self, base: f32, cfg: &SwarmConfig) -> f32 {
        match *self {
            Self::Idle => base,
            Self::Growing { frame, target } => {
                lerp(base, target, ease_out(frame_phase(frame, cfg.pulse_anim_frames)))
            }
            Self::Holding { target, .. } => target,
            Self::Shrinking { frame, from } => {
                lerp(from, base, ease_out(frame_phase(frame, cfg.pulse_anim_frames)))
            }
        }
    }

    fn next<R: Rng + ?Sized>(
        self,
        may_start: bool,
        pulses: &mut PulseCounter,
        rng: &mut R,
        cfg: &SwarmConfig,
    ) -> Self {
        match self {
            Self::Idle => {
                if may_start
                    && pulses.has_room()
                    && rng.gen::<f32>() < cfg.pulse_probability
                    && pulses.acquire()
                {
                    let target =
                        cfg.base_size.sample(rng) * cfg.pulse_size_multiplier * cfg.size_unit_px;
                    log::trace!("pulse start, {} active", pulses.active());
                    Self::Growing { frame: 0, target }
                } else {
                    Self::Idle
                }
            }
            Self::Growing { frame, target } => {
                let frame = frame + 1;
                if frame >= cfg.pulse_anim_frames {
                    Self::Holding { frame: 0, target }
                } else {
                    Self::Growing { frame, target }
                }
            }
            Self::Holding { frame, target } => {
                let frame = frame + 1;
                if frame >= cfg.pulse_hold_frames {
                    Self::Shrinking {
                        frame: 0,
                        from: target,
                    }
                } else {
                    Self::Holding { frame, target }
                }
            }
            Self::Shrinking { frame, from } => {
                let frame = frame + 1;
                if frame >= cfg.pulse_anim_frames {
                    pulses.release();
                    log::trace!("pulse end, {} active", pulses.active());
                    Self::Idle
                } else {
                    Self::Shrinking { frame, from }
                }
            }
        }
    }
}

/// Birth and death fades.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifeState {
    Appearing { frame: u32 },
    Normal,
    Disappearing { frame: u32 },
    Dead,
}

impl LifeState {
    fn next(self, frames: u32) -> Self {
        match self {
            Self::Appearing { frame } => {
                let frame = frame + 1;
                if frame >= frames {
                    Self::Normal
                } else {
                    Self::Appearing { frame }
                }
            }
            Self::Disappearing { frame } => {
                let frame = frame + 1;
                if frame >= frames {
                    Self::Dead
                } else {
                    Self::Disappearing { frame }
                }
            }
            other => other,
        }
    }

    /// Multiplier applied to rendered size and opacity.
    pub fn scale(&self, frames: u32) -> f32 {
        match *self {
            Self::Appearing { frame } => ease_out(frame_phase(frame, frames)),
            Self::Normal => 1.0,
            Self::Disappearing { frame } => ease_out(1.0 - frame_phase(frame, frames)),
            Self::Dead => 0.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Particle {
    pos: Vector2,
    vel: Vector2,
    target: Option<Vector2>,
    base_size: f32,
    size: f32,
    variant: usize,
    wander: WanderState,
    align: AlignState,
    hover: Hover,
    pulse: PulseState,
    life: LifeState,
}

impl Particle {
    /// New particle at `pos`, fading in.
    pub fn spawn<R: Rng + ?Sized>(pos: Vector2, rng: &mut R, cfg: &SwarmConfig) -> Self {
        let vel = from_angle(rng.gen::<f32>() * TAU, cfg.spawn_speed.sample(rng));
        let base_size = cfg.base_size.sample(rng) * cfg.size_unit_px;
        let variant = pick_index(rng, cfg.variant_count);
        let wander = WanderState::new(rng, cfg);
        let hover = Hover::new(rng, cfg);
        Self {
            pos,
            vel,
            target: None,
            base_size,
            size: base_size,
            variant,
            wander,
            align: AlignState::Approaching {
                start: pos,
                frame: 0,
            },
            hover,
            pulse: PulseState::Idle,
            life: LifeState::Appearing { frame: 0 },
        }
    }

    pub fn pos(&self) -> Vector2 {
        self.pos
    }

    pub fn vel(&self) -> Vector2 {
        self.vel
    }

    pub fn target(&self) -> Option<Vector2> {
        self.target
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn base_size(&self) -> f32 {
        self.base_size
    }

    pub fn variant(&self) -> usize {
        self.variant
    }

    pub fn wander(&self) -> &WanderState {
        &self.wander
    }

    pub fn align(&self) -> AlignState {
        self.align
    }

    pub fn hover(&self) -> &Hover {
        &self.hover
    }

    pub fn pulse(&self) -> PulseState {
        self.pulse
    }

    pub fn life(&self) -> LifeState {
        self.life
    }

    pub fn is_dead(&self) -> bool {
        self.life == LifeState::Dead
    }

    /// Neither fading out nor gone.
    pub fn is_live(&self) -> bool {
        !matches!(self.life, LifeState::Disappearing { .. } | LifeState::Dead)
    }

    /// Assign a target and restart the approach from the current position.
    pub fn set_target(&mut self, target: Vector2) {
        self.target = Some(target);
        self.align = AlignState::Approaching {
            start: self.pos,
            frame: 0,
        };
    }

    pub fn clear_target(&mut self) {
        self.target = None;
    }

    /// Start the fade out. Any running pulse is cut and its slot returned.
    /// Returns false if the particle was already leaving.
    pub fn begin_disappearing(&mut self, pulses: &mut PulseCounter) -> bool {
        if !self.is_live() {
            return false;
        }
        self.life = LifeState::Disappearing { frame: 0 };
        if self.pulse.is_active() {
            pulses.release();
            self.pulse = PulseState::Idle;
            self.size = self.base_size;
        }
        true
    }

    /// Advance all state machines by one tick.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        mode: Mode,
        pulses: &mut PulseCounter,
        rng: &mut R,
        cfg: &SwarmConfig,
    ) {
        self.life = self.life.next(cfg.life_frames);
        if self.is_dead() {
            return;
        }

        match (mode, self.target) {
            (Mode::Align, Some(target)) => self.step_align(target, cfg),
            _ => self.step_wander(rng, cfg),
        }

        let may_start = self.is_live();
        self.pulse = self.pulse.next(may_start, pulses, rng, cfg);
        self.size = self.pulse.size(self.base_size, cfg);
    }

    fn step_wander<R: Rng + ?Sized>(&mut self, rng: &mut R, cfg: &SwarmConfig) {
        self.vel = self.wander.advance(rng, cfg);
        self.pos += self.vel;

        let limit = 1.0 + cfg.boundary_margin;
        let mut bounced = false;
        if self.pos.x < -limit {
            self.pos.x = -limit;
            self.vel.x = -self.vel.x;
            bounced = true;
        } else if self.pos.x > limit {
            self.pos.x = limit;
            self.vel.x = -self.vel.x;
            bounced = true;
        }
        if self.pos.y < -limit {
            self.pos.y = -limit;
            self.vel.y = -self.vel.y;
            bounced = true;
        } else if self.pos.y > limit {
            self.pos.y = limit;
            self.vel.y = -self.vel.y;
            bounced = true;
        }

        if bounced {
            self.wander.restart_from(self.vel.heading());
        }
    }

    fn step_align(&mut self, target: Vector2, cfg: &SwarmConfig) {
        self.align = match self.align {
            AlignState::Approaching { start, frame } => {
                let frame = frame + 1;
                if frame >= cfg.align_frames {
                    self.pos = target;
                    AlignState::Hovering { time: 0 }
                } else {
                    let t = ease_out(frame_phase(frame, cfg.align_frames));
                    self.pos = start;
                    self.pos.lerp_to(target, t);
                    AlignState::Approaching { start, frame }
                }
            }
            AlignState::Hovering { time } => {
                let time = time + 1;
                self.pos = target + self.hover.offset(time);
                AlignState::Hovering { time }
            }
        };
    }

    /// Draw record for this tick, or `None` when fully faded.
    pub fn sprite(&self, projection: &Projection, cfg: &SwarmConfig) -> Option<Sprite> {
        let scale = self.life.scale(cfg.life_frames);
        if scale <= 0.0 {
            return None;
        }
        Some(Sprite {
            position_px: projection.to_pixels(self.pos),
            size_px: self.size * cfg.scale_for_variant(self.variant) * scale,
            opacity: cfg.opacity * scale,
            variant: self.variant,
        })
    }

    /// Submit this particle to the renderer. Skipped while its sprite
    /// variant is not ready or the particle is invisible.
    pub fn draw<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        projection: &Projection,
        cfg: &SwarmConfig,
    ) {
        if !surface.sprite_ready(self.variant) {
            return;
        }
        if let Some(sprite) = self.sprite(projection, cfg) {
            surface.draw_sprite(&sprite);
        }
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Uniform index in `0..n` drawn from a float, so a constant generator
/// still terminates.
#[inline]
pub(crate) fn pick_index<R: Rng + ?Sized>(rng: &mut R, n: usize) -> usize {
    if n <= 1 {
        return 0;
    }
    ((rng.gen::<f32>() * n as f32) as usize).min(n - 1)
}

#[inline]
fn sample_frames<R: Rng + ?Sized>(rng: &mut R, min: u32, max: u32) -> u32 {
    let min = min.max(1);
    if max <= min {
        return min;
    }
    let span = (max - min + 1) as f32;
    (min + (rng.gen::<f32>() * span) as u32).min(max)
}
