//! Runtime tuning for the swarm.
//!
//! Every knob is a plain number with a default taken from [`crate::constants`].
//! Hosts may load a partial JSON document; missing fields keep their default.

use crate::constants::*;
use crate::error::ConfigError;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Closed interval that per-particle parameters are drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Uniform draw in `[min, max]`.
    #[inline]
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        self.min + (self.max - self.min) * rng.gen::<f32>()
    }

    fn check(&self, field: &'static str) -> Result<(), ConfigError> {
        if !(self.min.is_finite() && self.max.is_finite()) || self.min > self.max {
            return Err(ConfigError::EmptyRange {
                field,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// All recognised swarm options.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwarmConfig {
    pub initial_count: usize,
    pub min_count: usize,
    pub max_count: usize,
    pub density: f32,

    pub short_path_epsilon: f32,
    pub cluster_radius: f32,
    pub radius_duration_floor: f32,

    pub boundary_margin: f32,
    pub wander_turn_max: f32,
    pub wander_frames_min: u32,
    pub wander_frames_max: u32,
    pub wander_speed: Span,
    pub spawn_speed: Span,

    pub align_frames: u32,
    pub hover_radius: Span,
    pub hover_speed: Span,

    pub max_pulse: usize,
    pub pulse_probability: f32,
    pub pulse_anim_frames: u32,
    pub pulse_hold_frames: u32,
    pub pulse_size_multiplier: f32,

    pub size_unit_px: f32,
    pub base_size: Span,
    pub opacity: f32,
    pub variant_count: usize,
    /// Per-variant draw size factor; variants past the end draw at 1.
    pub variant_scale: Vec<f32>,

    pub life_frames: u32,

    pub view_blend_rate: f32,
    pub align_aspect: f32,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            initial_count: INITIAL_COUNT,
            min_count: MIN_COUNT,
            max_count: MAX_COUNT,
            density: DENSITY,
            short_path_epsilon: SHORT_PATH_EPSILON,
            cluster_radius: CLUSTER_RADIUS,
            radius_duration_floor: RADIUS_DURATION_FLOOR,
            boundary_margin: BOUNDARY_MARGIN,
            wander_turn_max: WANDER_TURN_MAX,
            wander_frames_min: WANDER_FRAMES_MIN,
            wander_frames_max: WANDER_FRAMES_MAX,
            wander_speed: Span::new(WANDER_SPEED_MIN, WANDER_SPEED_MAX),
            spawn_speed: Span::new(SPAWN_SPEED_MIN, SPAWN_SPEED_MAX),
            align_frames: ALIGN_FRAMES,
            hover_radius: Span::new(HOVER_RADIUS_MIN, HOVER_RADIUS_MAX),
            hover_speed: Span::new(HOVER_SPEED_MIN, HOVER_SPEED_MAX),
            max_pulse: MAX_PULSE,
            pulse_probability: PULSE_PROBABILITY,
            pulse_anim_frames: PULSE_ANIM_FRAMES,
            pulse_hold_frames: PULSE_HOLD_FRAMES,
            pulse_size_multiplier: PULSE_SIZE_MULTIPLIER,
            size_unit_px: SIZE_UNIT_PX,
            base_size: Span::new(BASE_SIZE_MIN, BASE_SIZE_MAX),
            opacity: PARTICLE_OPACITY,
            variant_count: VARIANT_COUNT,
            variant_scale: Vec::new(),
            life_frames: LIFE_FRAMES,
            view_blend_rate: VIEW_BLEND_RATE,
            align_aspect: ALIGN_ASPECT,
        }
    }
}

impl SwarmConfig {
    /// Check every knob for positivity and every range for order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("density", self.density)?;
        positive("short_path_epsilon", self.short_path_epsilon)?;
        positive("cluster_radius", self.cluster_radius)?;
        positive("radius_duration_floor", self.radius_duration_floor)?;
        positive("wander_turn_max", self.wander_turn_max)?;
        positive("pulse_size_multiplier", self.pulse_size_multiplier)?;
        positive("size_unit_px", self.size_unit_px)?;
        positive("align_aspect", self.align_aspect)?;
        positive("view_blend_rate", self.view_blend_rate)?;
        if !(self.boundary_margin.is_finite() && self.boundary_margin >= 0.0) {
            return Err(ConfigError::NotPositive {
                field: "boundary_margin",
                value: self.boundary_margin,
            });
        }

        unit("pulse_probability", self.pulse_probability)?;
        unit("opacity", self.opacity)?;
        unit("view_blend_rate", self.view_blend_rate)?;

        for (field, frames) in [
            ("wander_frames_min", self.wander_frames_min),
            ("align_frames", self.align_frames),
            ("pulse_anim_frames", self.pulse_anim_frames),
            ("life_frames", self.life_frames),
        ] {
            if frames == 0 {
                return Err(ConfigError::NotPositive { field, value: 0.0 });
            }
        }
        if self.wander_frames_min > self.wander_frames_max {
            return Err(ConfigError::EmptyRange {
                field: "wander_frames",
                min: self.wander_frames_min as f32,
                max: self.wander_frames_max as f32,
            });
        }
        if self.variant_count == 0 {
            return Err(ConfigError::NotPositive {
                field: "variant_count",
                value: 0.0,
            });
        }

        self.wander_speed.check("wander_speed")?;
        self.spawn_speed.check("spawn_speed")?;
        self.hover_radius.check("hover_radius")?;
        self.hover_speed.check("hover_speed")?;
        self.base_size.check("base_size")?;

        for &scale in &self.variant_scale {
            positive("variant_scale", scale)?;
        }

        if self.min_count > self.max_count {
            return Err(ConfigError::CountBounds {
                min: self.min_count,
                max: self.max_count,
            });
        }
        Ok(())
    }

    /// Population for a path of the given arc length. `max_count` wins
    /// over `min_count` when the two are inverted.
    pub fn count_for_distance(&self, distance: f32) -> usize {
        let wanted = (distance * self.density).round().max(0.0) as usize;
        wanted.max(self.min_count).min(self.max_count)
    }

    /// Draw size factor for a sprite variant.
    pub fn scale_for_variant(&self, variant: usize) -> f32 {
        self.variant_scale.get(variant).copied().unwrap_or(1.0)
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn unit(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfUnitRange { field, value })
    }
}
