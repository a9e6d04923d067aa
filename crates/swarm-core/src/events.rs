//! Shape-update vocabulary exchanged with the transport, and the shape list
//! it edits.
//!
//! Messages are JSON objects of the form `{"event": "<name>", "data": ...}`.
//! Coordinates are expected to be normalized already; anything non-finite is
//! dropped here, before it can reach the path model.

use crate::constants::RADIUS_DURATION_FLOOR;
use crate::error::EventError;
use crate::path::{Shape, Stroke};
use crate::vector::Vector2;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    pub x: f32,
    pub y: f32,
}

impl PointRecord {
    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<PointRecord> for Vector2 {
    fn from(p: PointRecord) -> Self {
        Vector2::new(p.x, p.y)
    }
}

impl From<Vector2> for PointRecord {
    fn from(v: Vector2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

/// Serialized stroke, as carried by `sync`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrokeRecord {
    pub from: PointRecord,
    pub to: PointRecord,
    #[serde(default = "default_duration")]
    pub duration: f32,
}

fn default_duration() -> f32 {
    1.0
}

impl From<&Stroke> for StrokeRecord {
    fn from(s: &Stroke) -> Self {
        Self {
            from: s.from.into(),
            to: s.to.into(),
            duration: s.duration,
        }
    }
}

/// Payload of `addpoint`. `r` (pen radius) or `t` (elapsed ms) weights the
/// new stroke.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AddPoint {
    pub x: f32,
    pub y: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t: Option<f32>,
}

impl AddPoint {
    /// Stroke weight: the radius floored at `radius_floor`, else the elapsed
    /// time, else 1.
    pub fn duration(&self, radius_floor: f32) -> f32 {
        match (self.r, self.t) {
            (Some(r), _) if r.is_finite() => r.max(radius_floor),
            (Some(_), _) => radius_floor,
            (None, Some(t)) => t,
            (None, None) => default_duration(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "lowercase")]
pub enum ShapeEvent {
    /// Replace every shape.
    Sync(Vec<Vec<StrokeRecord>>),
    /// Start a new, empty shape.
    NewShape,
    /// Extend the most recent shape.
    AddPoint(AddPoint),
    /// Ask the host to reload; does not touch the shapes.
    Refresh,
}

impl ShapeEvent {
    pub fn from_json(text: &str) -> Result<Self, EventError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String, EventError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// What an event did to the drawing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Applied {
    ShapesChanged,
    ReloadRequested,
    Ignored,
}

/// Ordered list of shapes mirrored from the drawing display.
#[derive(Clone, Debug)]
pub struct Drawing {
    shapes: Vec<Shape>,
    radius_floor: f32,
}

impl Default for Drawing {
    fn default() -> Self {
        Self::new(RADIUS_DURATION_FLOOR)
    }
}

impl Drawing {
    pub fn new(radius_floor: f32) -> Self {
        Self {
            shapes: Vec::new(),
            radius_floor,
        }
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn apply(&mut self, event: &ShapeEvent) -> Applied {
        match event {
            ShapeEvent::Sync(shapes) => {
                self.sync(shapes);
                Applied::ShapesChanged
            }
            ShapeEvent::NewShape => {
                self.shapes.push(Shape::new());
                Applied::ShapesChanged
            }
            ShapeEvent::AddPoint(point) => self.add_point(point),
            ShapeEvent::Refresh => Applied::ReloadRequested,
        }
    }

    /// Replace all shapes with the given records.
    pub fn sync(&mut self, records: &[Vec<StrokeRecord>]) {
        self.shapes = records
            .iter()
            .map(|strokes| {
                Shape::from_strokes(strokes.iter().filter_map(|s| {
                    if s.from.is_finite() && s.to.is_finite() {
                        Some(Stroke::new(s.from.into(), s.to.into(), s.duration))
                    } else {
                        log::warn!("sync: dropping stroke with non-finite coordinates");
                        None
                    }
                }))
            })
            .collect();
        log::debug!("sync: {} shapes", self.shapes.len());
    }

    fn add_point(&mut self, point: &AddPoint) -> Applied {
        if !(point.x.is_finite() && point.y.is_finite()) {
            log::warn!("addpoint: discarding non-finite point ({}, {})", point.x, point.y);
            return Applied::Ignored;
        }
        let duration = point.duration(self.radius_floor);
        match self.shapes.last_mut() {
            Some(shape) => {
                shape.add_point(point.x, point.y, duration);
                Applied::ShapesChanged
            }
            None => {
                log::debug!("addpoint before any newshape, ignored");
                Applied::Ignored
            }
        }
    }

    /// Records for a `sync` message reproducing the current shapes.
    pub fn to_records(&self) -> Vec<Vec<StrokeRecord>> {
        self.shapes
            .iter()
            .map(|shape| shape.strokes().iter().map(StrokeRecord::from).collect())
            .collect()
    }
}
