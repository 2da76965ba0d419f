//! Highway Collision Simulation Library
//!
//! A scripted highway overtaking animation that can run headless or with a Bevy UI.

pub mod simulation;

#[cfg(feature = "ui")]
pub mod ui;
