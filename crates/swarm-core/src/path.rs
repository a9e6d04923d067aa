//! Path model: time-stamped strokes grouped into shapes.
//!
//! A [`Shape`] is one continuous gesture. It grows one [`Stroke`] per input
//! point and keeps its arc length and total duration up to date on every
//! append, so neither needs a rescan.

use crate::constants::MIN_STROKE_DURATION;
use crate::vector::{sub, Vector2};

/// One straight segment of a gesture.
///
/// `duration` weights the segment for time-based playback. It is never below
/// [`MIN_STROKE_DURATION`], which keeps phase maths free of division by zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub from: Vector2,
    pub to: Vector2,
    pub duration: f32,
}

impl Stroke {
    pub fn new(from: Vector2, to: Vector2, duration: f32) -> Self {
        Self {
            from,
            to,
            duration: clamp_duration(duration),
        }
    }

    /// Euclidean length of the segment.
    #[inline]
    pub fn length(&self) -> f32 {
        sub(self.to, self.from).length()
    }

    /// Linear interpolation `from -> to`, with `phase` clamped to `[0, 1]`.
    #[inline]
    pub fn pos_at(&self, phase: f32) -> Vector2 {
        let p = phase.clamp(0.0, 1.0);
        self.from + sub(self.to, self.from) * p
    }
}

#[inline]
fn clamp_duration(duration: f32) -> f32 {
    if duration.is_finite() {
        duration.max(MIN_STROKE_DURATION)
    } else {
        MIN_STROKE_DURATION
    }
}

/// Ordered, append-only sequence of contiguous strokes.
#[derive(Clone, Debug, Default)]
pub struct Shape {
    strokes: Vec<Stroke>,
    total_duration: f32,
    distance: f32,
    last_point: Option<Vector2>,
}

impl Shape {
    /// Empty shape, as created when a new gesture begins.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a shape from already recorded strokes.
    pub fn from_strokes<I: IntoIterator<Item = Stroke>>(strokes: I) -> Self {
        let mut shape = Self::new();
        for stroke in strokes {
            shape.push_stroke(Stroke::new(stroke.from, stroke.to, stroke.duration));
        }
        shape
    }

    /// Record an input point. The first call only remembers the starting
    /// point; every later call appends a stroke from the previous point.
    pub fn add_point(&mut self, x: f32, y: f32, duration: f32) {
        let point = Vector2::new(x, y);
        if let Some(prev) = self.last_point {
            self.push_stroke(Stroke::new(prev, point, duration));
        }
        self.last_point = Some(point);
    }

    fn push_stroke(&mut self, stroke: Stroke) {
        self.total_duration += stroke.duration;
        self.distance += stroke.length();
        self.last_point = Some(stroke.to);
        self.strokes.push(stroke);
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// Number of strokes.
    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Sum of stroke lengths.
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Sum of stroke durations.
    pub fn total_duration(&self) -> f32 {
        self.total_duration
    }

    /// Most recent input point, including a lone starting point.
    pub fn last_point(&self) -> Option<Vector2> {
        self.last_point
    }

    /// Position at a global phase, wrapped into `[0, 1)`. Each stroke owns a
    /// share of the phase proportional to its duration.
    pub fn pos_at_phase(&self, phase: f32) -> Vector2 {
        if self.total_duration <= 0.0 || !phase.is_finite() {
            return self.start_or_origin();
        }
        let p = phase.rem_euclid(1.0);
        self.locate(p * self.total_duration)
    }

    /// Position after `time` of playback, wrapping modulo the total duration.
    pub fn pos_at_time(&self, time: f32) -> Vector2 {
        if self.total_duration <= 0.0 || !time.is_finite() {
            return self.start_or_origin();
        }
        self.locate(time.rem_euclid(self.total_duration))
    }

    /// Walk strokes by accumulated duration until `t` falls inside one.
    fn locate(&self, t: f32) -> Vector2 {
        let last = self.strokes.len().saturating_sub(1);
        let mut acc = 0.0;
        for (i, stroke) in self.strokes.iter().enumerate() {
            let next = acc + stroke.duration;
            if t <= next || i == last {
                return stroke.pos_at((t - acc) / stroke.duration);
            }
            acc = next;
        }
        self.start_or_origin()
    }

    fn start_or_origin(&self) -> Vector2 {
        self.strokes
            .first()
            .map_or(Vector2::ZERO, |stroke| stroke.from)
    }
}
