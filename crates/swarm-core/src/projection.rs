//! Normalized `[-1, 1]` space to pixel mapping.
//!
//! Two framings exist: the wander framing stretches the square over the full
//! canvas, the align framing fits it into a centered region of fixed aspect
//! ratio. The swarm's view blend mixes the two linearly.

use crate::vector::Vector2;

/// Drawing surface size in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }
}

/// Axis-aligned pixel rectangle the normalized square is mapped onto.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub origin: Vector2,
    pub size: Vector2,
}

impl Frame {
    /// Whole canvas.
    pub fn full(viewport: Viewport) -> Self {
        Self {
            origin: Vector2::ZERO,
            size: Vector2::new(viewport.width, viewport.height),
        }
    }

    /// Largest centered region with `width / height == aspect`.
    pub fn centered(viewport: Viewport, aspect: f32) -> Self {
        let aspect = if aspect > 0.0 { aspect } else { 1.0 };
        let (w, h) = if viewport.width / viewport.height > aspect {
            (viewport.height * aspect, viewport.height)
        } else {
            (viewport.width, viewport.width / aspect)
        };
        Self {
            origin: Vector2::new((viewport.width - w) * 0.5, (viewport.height - h) * 0.5),
            size: Vector2::new(w, h),
        }
    }

    #[inline]
    pub fn to_pixels(&self, p: Vector2) -> Vector2 {
        self.origin + (p + Vector2::ONE) * 0.5 * self.size
    }
}

/// Blend of the wander and align framings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub wander: Frame,
    pub align: Frame,
    pub blend: f32,
}

impl Projection {
    pub fn new(viewport: Viewport, align_aspect: f32, blend: f32) -> Self {
        Self {
            wander: Frame::full(viewport),
            align: Frame::centered(viewport, align_aspect),
            blend: blend.clamp(0.0, 1.0),
        }
    }

    /// Pure wander framing.
    pub fn wander(viewport: Viewport) -> Self {
        Self::new(viewport, 1.0, 0.0)
    }

    #[inline]
    pub fn to_pixels(&self, p: Vector2) -> Vector2 {
        self.wander
            .to_pixels(p)
            .lerp(self.align.to_pixels(p), self.blend)
    }
}
