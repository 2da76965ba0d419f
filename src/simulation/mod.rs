//! Standalone highway simulation module
//!
//! This module contains all the animation logic: state, per-frame update,
//! render pass and control state machine. It runs without the Bevy game
//! engine and can be tested without a window.

mod collision;
mod config;
mod control;
mod particle;
mod render;
mod types;
mod vehicle;
mod world;

pub use collision::{collides, Aabb};
pub use config::{CollisionBuffer, ExplosionConfig, HighwayConfig, Variant, VehicleSpec};
pub use control::{AnimationController, AnimationState, FrameOutcome, TimerToken};
pub use particle::{Particle, ParticleSystem};
pub use render::{
    render_frame, DrawCommand, FrameRecorder, LineStyle, Surface, TextStyle, COLLISION_BANNER,
    ENDED_BANNER,
};
pub use types::{
    palette, LaneIndex, Position, Rgba, VehicleId, LANE_DASH, PARTICLE_SIZE, WHEEL_SIZE,
    WINDOW_INSET,
};
pub use vehicle::{LaneChangeStep, Vehicle};
pub use world::{CollisionEvent, HighwayWorld, TickReport};
