//! UI module that shows the animation in a Bevy window
//!
//! This module is purely a host - all animation logic is in the `simulation` module.
//! The UI drives `AnimationController` once per Bevy frame and paints the
//! recorded draw calls as 2D sprites.

mod canvas;
mod components;
mod controls;
mod input;
mod world;

use bevy::prelude::*;

pub use components::AnimationResource;

use canvas::{drive_animation, paint_canvas};
use controls::{handle_control_buttons, setup_controls, update_controls};
use input::handle_input;
use world::setup_world;

use crate::simulation::{AnimationController, Variant};

/// Plugin to register all UI systems
pub struct HighwaySimUIPlugin {
    pub variant: Variant,
    pub seed: Option<u64>,
}

impl Plugin for HighwaySimUIPlugin {
    fn build(&self, app: &mut App) {
        let controller = match AnimationController::from_config(self.variant.config(), self.seed) {
            Ok(controller) => controller,
            Err(err) => {
                error!("Cannot start the {} animation: {err:#}", self.variant);
                return;
            }
        };

        app.insert_resource(ClearColor(Color::srgb(0.95, 0.95, 0.95)))
            .insert_resource(AnimationResource::new(controller))
            .add_systems(Startup, (setup_world, setup_controls))
            .add_systems(
                Update,
                (
                    handle_input,
                    handle_control_buttons,
                    drive_animation,
                    paint_canvas,
                    update_controls,
                )
                    .chain(),
            );
    }
}
