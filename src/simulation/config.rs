//! Literal configuration of the highway animation
//!
//! Every constant the animation depends on lives in [`HighwayConfig`]. The
//! three shipped variants are presets of that one structure.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, ensure, Result};

use super::types::{palette, LaneIndex, Rgba, VehicleId};

/// Shipped animation presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// 1000x600, shrinking collision boxes, no end transition
    #[default]
    Classic,
    /// 1200x600, growing collision boxes, damped particles, ends after 3s
    Widescreen,
    /// 1100x600, narrow lanes, ends after 2s
    Rush,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Classic, Variant::Widescreen, Variant::Rush];

    pub fn name(&self) -> &'static str {
        match self {
            Variant::Classic => "classic",
            Variant::Widescreen => "widescreen",
            Variant::Rush => "rush",
        }
    }

    pub fn config(&self) -> HighwayConfig {
        match self {
            Variant::Classic => HighwayConfig::classic(),
            Variant::Widescreen => HighwayConfig::widescreen(),
            Variant::Rush => HighwayConfig::rush(),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "classic" => Ok(Variant::Classic),
            "widescreen" => Ok(Variant::Widescreen),
            "rush" => Ok(Variant::Rush),
            other => bail!("unknown variant {other:?} (expected classic, widescreen or rush)"),
        }
    }
}

/// How the collision boxes are adjusted before the overlap test
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionBuffer {
    /// Pull the right and bottom edges of each box inwards by this many pixels
    TrimFarEdges(f32),
    /// Push every edge of each box outwards by this many pixels
    Expand(f32),
}

/// Starting values of one vehicle
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleSpec {
    pub label: &'static str,
    pub x: f32,
    pub width: f32,
    pub height: f32,
    pub color: Rgba,
    pub speed: f32,
    pub lane: LaneIndex,
}

/// Parameters of the particle explosion
#[derive(Debug, Clone, PartialEq)]
pub struct ExplosionConfig {
    pub particle_count: usize,
    /// Width of the box around the impact point that fragments spawn in
    pub spread_x: f32,
    /// Height of the box around the impact point that fragments spawn in
    pub spread_y: f32,
    /// Each velocity component is drawn from `[-range/2, range/2)`
    pub velocity_range: f32,
    /// Life lost per tick
    pub decay: f32,
    /// Velocity multiplier applied every tick
    pub damping: Option<f32>,
}

/// Full literal configuration of one animation variant
#[derive(Debug, Clone, PartialEq)]
pub struct HighwayConfig {
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Top edge of the roadway
    pub highway_y: f32,
    pub lane_width: f32,
    pub lane_count: usize,
    pub vehicles: Vec<VehicleSpec>,
    /// Vehicle that performs the scripted lane change
    pub overtaker: VehicleId,
    pub overtake_target_lane: LaneIndex,
    /// The overtake starts on the first frame strictly greater than this
    pub overtake_after_frames: u64,
    /// Vertical pixels moved per tick during a lane change
    pub lane_change_step: f32,
    /// The pair tested for collision; the test runs right after the first one moves
    pub collision_pair: (VehicleId, VehicleId),
    pub collision_buffer: CollisionBuffer,
    pub explosion: ExplosionConfig,
    /// Delay between the collision and the terminal "ended" state
    pub end_delay: Option<Duration>,
}

impl Default for HighwayConfig {
    fn default() -> Self {
        Self::classic()
    }
}

impl HighwayConfig {
    /// Truck in the center lane, a fast red car in the right lane that pulls
    /// left to overtake, and a green car in the left lane.
    pub fn classic() -> Self {
        Self {
            canvas_width: 1000.0,
            canvas_height: 600.0,
            highway_y: 150.0,
            lane_width: 120.0,
            lane_count: 3,
            vehicles: vec![
                VehicleSpec {
                    label: "Truck",
                    x: 200.0,
                    width: 80.0,
                    height: 40.0,
                    color: palette::TRUCK_BLUE,
                    speed: 2.0,
                    lane: LaneIndex(1),
                },
                VehicleSpec {
                    label: "Car 1",
                    x: 120.0,
                    width: 50.0,
                    height: 30.0,
                    color: palette::CAR_RED,
                    speed: 3.5,
                    lane: LaneIndex(2),
                },
                VehicleSpec {
                    label: "Car 2",
                    x: 250.0,
                    width: 50.0,
                    height: 30.0,
                    color: palette::CAR_GREEN,
                    speed: 2.5,
                    lane: LaneIndex(0),
                },
            ],
            overtaker: VehicleId(1),
            overtake_target_lane: LaneIndex(0),
            overtake_after_frames: 120,
            lane_change_step: 3.0,
            collision_pair: (VehicleId(1), VehicleId(2)),
            collision_buffer: CollisionBuffer::TrimFarEdges(5.0),
            explosion: ExplosionConfig {
                particle_count: 30,
                spread_x: 80.0,
                spread_y: 60.0,
                velocity_range: 15.0,
                decay: 0.015,
                damping: None,
            },
            end_delay: None,
        }
    }

    pub fn widescreen() -> Self {
        Self {
            canvas_width: 1200.0,
            canvas_height: 600.0,
            highway_y: 150.0,
            lane_width: 120.0,
            lane_count: 3,
            vehicles: vec![
                VehicleSpec {
                    label: "Truck",
                    x: 260.0,
                    width: 90.0,
                    height: 45.0,
                    color: palette::TRUCK_BLUE,
                    speed: 2.5,
                    lane: LaneIndex(1),
                },
                VehicleSpec {
                    label: "Car 1",
                    x: 150.0,
                    width: 55.0,
                    height: 30.0,
                    color: palette::CAR_RED,
                    speed: 4.0,
                    lane: LaneIndex(2),
                },
                VehicleSpec {
                    label: "Car 2",
                    x: 500.0,
                    width: 55.0,
                    height: 30.0,
                    color: palette::CAR_GREEN,
                    speed: 2.5,
                    lane: LaneIndex(0),
                },
            ],
            overtaker: VehicleId(1),
            overtake_target_lane: LaneIndex(0),
            overtake_after_frames: 60,
            lane_change_step: 4.0,
            collision_pair: (VehicleId(1), VehicleId(2)),
            collision_buffer: CollisionBuffer::Expand(2.0),
            explosion: ExplosionConfig {
                particle_count: 50,
                spread_x: 100.0,
                spread_y: 70.0,
                velocity_range: 12.0,
                decay: 0.02,
                damping: Some(0.95),
            },
            end_delay: Some(Duration::from_secs(3)),
        }
    }

    pub fn rush() -> Self {
        Self {
            canvas_width: 1100.0,
            canvas_height: 600.0,
            highway_y: 150.0,
            lane_width: 100.0,
            lane_count: 3,
            vehicles: vec![
                VehicleSpec {
                    label: "Truck",
                    x: 220.0,
                    width: 85.0,
                    height: 40.0,
                    color: palette::TRUCK_BLUE,
                    speed: 2.0,
                    lane: LaneIndex(1),
                },
                VehicleSpec {
                    label: "Car 1",
                    x: 100.0,
                    width: 50.0,
                    height: 28.0,
                    color: palette::CAR_RED,
                    speed: 3.5,
                    lane: LaneIndex(2),
                },
                VehicleSpec {
                    label: "Car 2",
                    x: 420.0,
                    width: 50.0,
                    height: 28.0,
                    color: palette::CAR_GREEN,
                    speed: 2.0,
                    lane: LaneIndex(0),
                },
            ],
            overtaker: VehicleId(1),
            overtake_target_lane: LaneIndex(0),
            overtake_after_frames: 90,
            lane_change_step: 2.5,
            collision_pair: (VehicleId(1), VehicleId(2)),
            collision_buffer: CollisionBuffer::TrimFarEdges(3.0),
            explosion: ExplosionConfig {
                particle_count: 40,
                spread_x: 80.0,
                spread_y: 60.0,
                velocity_range: 14.0,
                decay: 0.018,
                damping: Some(0.97),
            },
            end_delay: Some(Duration::from_secs(2)),
        }
    }

    /// Total height of the roadway
    pub fn road_height(&self) -> f32 {
        self.lane_width * self.lane_count as f32
    }

    /// Resting top edge of a vehicle of the given height in the given lane
    pub fn lane_center_y(&self, lane: LaneIndex, vehicle_height: f32) -> f32 {
        self.highway_y + lane.0 as f32 * self.lane_width + (self.lane_width - vehicle_height) / 2.0
    }

    /// Check that the configuration describes a runnable animation
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.canvas_width > 0.0 && self.canvas_height > 0.0,
            "canvas must have a positive size, got {}x{}",
            self.canvas_width,
            self.canvas_height
        );
        ensure!(self.lane_count > 0, "roadway needs at least one lane");
        ensure!(self.lane_width > 0.0, "lane width must be positive");
        ensure!(
            self.highway_y >= 0.0 && self.highway_y + self.road_height() <= self.canvas_height,
            "roadway [{}, {}] does not fit in a canvas of height {}",
            self.highway_y,
            self.highway_y + self.road_height(),
            self.canvas_height
        );
        ensure!(!self.vehicles.is_empty(), "at least one vehicle is required");

        for spec in &self.vehicles {
            ensure!(
                spec.lane.0 < self.lane_count,
                "{} starts in lane {} but the roadway has {} lanes",
                spec.label,
                spec.lane.0,
                self.lane_count
            );
            ensure!(
                spec.width > 0.0 && spec.height > 0.0,
                "{} must have a positive size",
                spec.label
            );
            ensure!(
                spec.height <= self.lane_width,
                "{} is taller than a lane",
                spec.label
            );
        }

        let count = self.vehicles.len();
        ensure!(
            self.overtaker.0 < count,
            "overtaker index {} out of range for {count} vehicles",
            self.overtaker.0
        );
        ensure!(
            self.overtake_target_lane.0 < self.lane_count,
            "overtake target lane {} out of range",
            self.overtake_target_lane.0
        );
        ensure!(
            self.lane_change_step > 0.0,
            "lane change step must be positive"
        );

        let (a, b) = self.collision_pair;
        ensure!(
            a.0 < count && b.0 < count,
            "collision pair ({}, {}) out of range for {count} vehicles",
            a.0,
            b.0
        );
        ensure!(a != b, "collision pair must name two different vehicles");

        let explosion = &self.explosion;
        ensure!(
            explosion.decay > 0.0 && explosion.decay <= 1.0,
            "particle decay must be in (0, 1], got {}",
            explosion.decay
        );
        if let Some(damping) = explosion.damping {
            ensure!(
                (0.0..=1.0).contains(&damping),
                "particle damping must be in [0, 1], got {damping}"
            );
        }

        Ok(())
    }
}
