//! Boundary to the concrete drawing backend.

use crate::vector::Vector2;

/// Everything the backend needs to rasterize one particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    /// Center in canvas pixels.
    pub position_px: Vector2,
    /// Diameter in pixels, already scaled by the life fade.
    pub size_px: f32,
    pub opacity: f32,
    /// Which image/shape to draw; chosen per particle at birth.
    pub variant: usize,
}

/// A 2-D drawing target.
pub trait Surface {
    /// Whether the asset for `variant` is loaded. Particles with a missing
    /// asset are skipped for the frame.
    fn sprite_ready(&self, _variant: usize) -> bool {
        true
    }

    fn draw_sprite(&mut self, sprite: &Sprite);
}

/// Surface that keeps every draw call, for hosts that batch and for tests.
#[derive(Clone, Debug, Default)]
pub struct SpriteBuffer {
    pub sprites: Vec<Sprite>,
}

impl SpriteBuffer {
    pub fn clear(&mut self) {
        self.sprites.clear();
    }
}

impl Surface for SpriteBuffer {
    fn draw_sprite(&mut self, sprite: &Sprite) {
        self.sprites.push(*sprite);
    }
}
