//! Arc-length sampling over a list of shapes.
//!
//! Shapes are treated as one concatenated path. Samples are spaced by equal
//! path distance, independent of how densely the input points were recorded
//! or how long each stroke took to draw.

use crate::path::{Shape, Stroke};
use crate::vector::Vector2;
use rand::Rng;
use std::f32::consts::TAU;

/// Sum of the arc lengths of all shapes.
pub fn total_distance(shapes: &[Shape]) -> f32 {
    shapes.iter().map(Shape::distance).sum()
}

/// `count` points spread evenly by arc length from the start of the first
/// shape to the end of the last, in path order. A single sample sits at the
/// midpoint.
pub fn sample_arc_length(shapes: &[Shape], count: usize) -> Vec<Vector2> {
    let total = total_distance(shapes);
    let mut walker = ArcWalker::new(shapes);
    (0..count)
        .map(|i| {
            let d = if count == 1 {
                total * 0.5
            } else if i + 1 == count {
                total
            } else {
                total * i as f32 / (count - 1) as f32
            };
            walker.point_at(d)
        })
        .collect()
}

/// Point to gather on when the path has no usable length: the last input
/// point, else the last stroke end, else the origin.
pub fn degenerate_anchor(shapes: &[Shape]) -> Vector2 {
    shapes
        .iter()
        .rev()
        .find_map(Shape::last_point)
        .or_else(|| {
            shapes
                .iter()
                .rev()
                .find_map(|shape| shape.strokes().last().map(|s| s.to))
        })
        .unwrap_or(Vector2::ZERO)
}

/// `count` points uniformly distributed by area inside a disc.
pub fn cluster_targets<R: Rng + ?Sized>(
    center: Vector2,
    count: usize,
    radius: f32,
    rng: &mut R,
) -> Vec<Vector2> {
    (0..count)
        .map(|_| {
            let r = radius * rng.gen::<f32>().sqrt();
            let theta = TAU * rng.gen::<f32>();
            center + Vector2::new(theta.cos(), theta.sin()) * r
        })
        .collect()
}

/// Cursor over the concatenated path. Queries must come in non-decreasing
/// distance order, which lets a full sampling pass run in a single sweep.
struct ArcWalker<'a> {
    shapes: &'a [Shape],
    shape_idx: usize,
    shape_start: f32,
    stroke_idx: usize,
    stroke_start: f32,
}

impl<'a> ArcWalker<'a> {
    fn new(shapes: &'a [Shape]) -> Self {
        Self {
            shapes,
            shape_idx: 0,
            shape_start: 0.0,
            stroke_idx: 0,
            stroke_start: 0.0,
        }
    }

    fn point_at(&mut self, d: f32) -> Vector2 {
        while let Some(shape) = self.shapes.get(self.shape_idx) {
            if !shape.is_empty() && d <= self.shape_start + shape.distance() {
                return self.point_in_shape(shape.strokes(), d - self.shape_start);
            }
            self.shape_start += shape.distance();
            self.shape_idx += 1;
            self.stroke_idx = 0;
            self.stroke_start = 0.0;
        }
        self.fallback()
    }

    fn point_in_shape(&mut self, strokes: &[Stroke], local: f32) -> Vector2 {
        while let Some(stroke) = strokes.get(self.stroke_idx) {
            let len = stroke.length();
            if local <= self.stroke_start + len {
                let rel = (local - self.stroke_start) / if len > 0.0 { len } else { 1.0 };
                return stroke.pos_at(rel);
            }
            self.stroke_start += len;
            self.stroke_idx += 1;
        }
        // accumulated stroke lengths fell short of the shape's distance
        strokes.last().map_or(Vector2::ZERO, |s| s.to)
    }

    /// Ran past every shape: end of the last recorded stroke, else the origin.
    fn fallback(&self) -> Vector2 {
        self.shapes
            .iter()
            .rev()
            .find_map(|shape| shape.strokes().last())
            .map_or(Vector2::ZERO, |s| s.to)
    }
}
