//! Vehicle motion logic for the highway simulation
//!
//! Standalone implementation that doesn't depend on Bevy.

use super::config::{HighwayConfig, VehicleSpec};
use super::types::{LaneIndex, Position, Rgba, VehicleId};

/// Result of one lane-change step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneChangeStep {
    /// Vehicle is not changing lanes
    Idle,
    /// Vehicle moved one step towards the target lane
    Moving,
    /// Vehicle snapped onto the target lane's center this tick
    Arrived(LaneIndex),
}

/// A vehicle on the highway
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub id: VehicleId,
    pub label: &'static str,
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: Rgba,
    /// Horizontal pixels per tick
    pub speed: f32,
    pub lane: LaneIndex,
    pub is_overtaking: bool,
    pub target_lane: LaneIndex,
}

impl Vehicle {
    /// Build a vehicle from its literal starting values, resting on its lane center
    pub fn from_spec(id: VehicleId, spec: &VehicleSpec, config: &HighwayConfig) -> Self {
        Self {
            id,
            label: spec.label,
            x: spec.x,
            y: config.lane_center_y(spec.lane, spec.height),
            width: spec.width,
            height: spec.height,
            color: spec.color,
            speed: spec.speed,
            lane: spec.lane,
            is_overtaking: false,
            target_lane: spec.lane,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    /// Move forward by one tick of speed
    pub fn advance(&mut self) {
        self.x += self.speed;
    }

    /// Begin a lane change towards `target`
    pub fn begin_overtake(&mut self, target: LaneIndex) {
        self.is_overtaking = true;
        self.target_lane = target;
    }

    /// Move one step towards the target lane's center
    ///
    /// Once within one step of the target the vehicle snaps onto it exactly
    /// and its lane is updated.
    pub fn step_lane_change(&mut self, config: &HighwayConfig) -> LaneChangeStep {
        if !self.is_overtaking {
            return LaneChangeStep::Idle;
        }

        let target_y = config.lane_center_y(self.target_lane, self.height);
        let step = config.lane_change_step;

        if (self.y - target_y).abs() > step {
            self.y += if self.y < target_y { step } else { -step };
            LaneChangeStep::Moving
        } else if self.lane != self.target_lane || self.y != target_y {
            self.y = target_y;
            self.lane = self.target_lane;
            LaneChangeStep::Arrived(self.lane)
        } else {
            LaneChangeStep::Idle
        }
    }

    /// Re-enter from the left edge once fully past the right edge
    ///
    /// Returns true if the vehicle wrapped.
    pub fn wrap_around(&mut self, canvas_width: f32) -> bool {
        if self.x > canvas_width {
            self.x = -self.width;
            true
        } else {
            false
        }
    }

    pub fn stop(&mut self) {
        self.speed = 0.0;
    }
}
