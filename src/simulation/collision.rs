//! Axis-aligned bounding-box collision test

use super::config::CollisionBuffer;
use super::vehicle::Vehicle;

/// An axis-aligned box in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aabb {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Aabb {
    pub fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn from_rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// Box of a vehicle after applying the collision buffer
    pub fn for_vehicle(vehicle: &Vehicle, buffer: CollisionBuffer) -> Self {
        let body = Self::from_rect(vehicle.x, vehicle.y, vehicle.width, vehicle.height);
        match buffer {
            CollisionBuffer::TrimFarEdges(trim) => body.trim_far_edges(trim),
            CollisionBuffer::Expand(margin) => body.expand_by(margin),
        }
    }

    pub fn trim_far_edges(mut self, trim: f32) -> Self {
        self.max_x -= trim;
        self.max_y -= trim;
        self
    }

    pub fn expand_by(mut self, margin: f32) -> Self {
        self.min_x -= margin;
        self.min_y -= margin;
        self.max_x += margin;
        self.max_y += margin;
        self
    }

    /// Strict overlap on both axes; touching edges do not count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min_x < other.max_x
            && self.max_x > other.min_x
            && self.min_y < other.max_y
            && self.max_y > other.min_y
    }
}

/// Collision predicate between two vehicles
pub fn collides(a: &Vehicle, b: &Vehicle, buffer: CollisionBuffer) -> bool {
    Aabb::for_vehicle(a, buffer).overlaps(&Aabb::for_vehicle(b, buffer))
}
