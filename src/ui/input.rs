//! Keyboard shortcuts for the animation controls

use bevy::prelude::*;

use super::components::AnimationResource;

/// Space toggles Play/Pause, R resets, Escape quits
pub fn handle_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut animation: ResMut<AnimationResource>,
    mut exit: MessageWriter<AppExit>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
    if keyboard.just_pressed(KeyCode::Space) {
        animation.toggle();
    }
    if keyboard.just_pressed(KeyCode::KeyR) {
        animation.reset();
    }
}
