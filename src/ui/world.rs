//! Startup system for the camera and the initial scene

use bevy::prelude::*;

use super::components::{AnimationResource, MainCamera};

/// System to spawn the 2D camera and paint the freshly reset scene
pub fn setup_world(mut commands: Commands, mut animation: ResMut<AnimationResource>) {
    commands.spawn((MainCamera, Camera2d));

    animation.reset();
}
