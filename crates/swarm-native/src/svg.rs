//! SVG snapshot surface. Each sprite becomes a translucent circle coloured by
//! its variant.

use std::fmt::Write;
use swarm_core::{Sprite, Surface, Viewport};

const BACKGROUND: &str = "#0b0d17";
const PALETTE: [&str; 6] = [
    "#f6c177", "#eb6f92", "#9ccfd8", "#c4a7e7", "#31748f", "#e0def4",
];

#[derive(Debug)]
pub struct SvgSurface {
    viewport: Viewport,
    variants: usize,
    sprites: Vec<Sprite>,
}

impl SvgSurface {
    /// Surface with `variants` loaded sprite kinds; larger variant indices
    /// are reported as not ready.
    pub fn new(viewport: Viewport, variants: usize) -> Self {
        Self {
            viewport,
            variants: variants.min(PALETTE.len()),
            sprites: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.sprites.clear();
    }

    pub fn sprite_count(&self) -> usize {
        self.sprites.len()
    }

    pub fn to_svg_string(&self) -> String {
        let (w, h) = (self.viewport.width, self.viewport.height);
        let mut out = String::new();
        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
        let _ = writeln!(out, r#"viewBox="0 0 {w} {h}" width="{w}" height="{h}">"#);
        let _ = writeln!(out, r#"  <rect width="{w}" height="{h}" fill="{BACKGROUND}"/>"#);
        for s in &self.sprites {
            let _ = writeln!(
                out,
                r#"  <circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}" fill-opacity="{:.3}"/>"#,
                s.position_px.x,
                s.position_px.y,
                s.size_px * 0.5,
                PALETTE[s.variant % PALETTE.len()],
                s.opacity
            );
        }
        out.push_str("</svg>\n");
        out
    }
}

impl Surface for SvgSurface {
    fn sprite_ready(&self, variant: usize) -> bool {
        variant < self.variants
    }

    fn draw_sprite(&mut self, sprite: &Sprite) {
        self.sprites.push(*sprite);
    }
}
