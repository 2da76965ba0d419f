//! UI components and resources linking Bevy entities to the animation state

use bevy::prelude::*;

use crate::simulation::{AnimationController, FrameRecorder, Rgba};

/// Height of the control bar below the canvas
pub const CONTROL_BAR_HEIGHT: f32 = 80.0;

/// Resource wrapper for the animation controller and its recorded frame
#[derive(Resource)]
pub struct AnimationResource {
    pub controller: AnimationController,
    /// Draw calls of the most recent frame
    pub surface: FrameRecorder,
    /// Set when `surface` holds a frame that has not been painted yet
    pub dirty: bool,
}

impl AnimationResource {
    pub fn new(controller: AnimationController) -> Self {
        Self {
            controller,
            surface: FrameRecorder::new(),
            dirty: false,
        }
    }

    /// Reset the animation and record the initial scene
    pub fn reset(&mut self) {
        self.controller.reset(Some(&mut self.surface));
        self.dirty = true;
    }

    /// Play/Pause button behaviour, ignored while disabled
    pub fn toggle(&mut self) {
        if self.controller.can_toggle_play() {
            self.controller.toggle();
        }
    }

    pub fn canvas_size(&self) -> Vec2 {
        let config = self.controller.world().config();
        Vec2::new(config.canvas_width, config.canvas_height)
    }
}

/// Marker component for the canvas camera
#[derive(Component)]
pub struct MainCamera;

/// Marker for entities painted from the recorded frame; replaced every frame
#[derive(Component)]
pub struct CanvasItem;

/// The two buttons of the control bar
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlButton {
    PlayPause,
    Reset,
}

/// Marker for the label inside the Play/Pause button
#[derive(Component)]
pub struct PlayPauseLabel;

/// Marker for the status line next to the buttons
#[derive(Component)]
pub struct StatusText;

pub fn to_bevy_color(color: Rgba) -> Color {
    Color::srgba_u8(
        color.r,
        color.g,
        color.b,
        (color.a.clamp(0.0, 1.0) * 255.0).round() as u8,
    )
}
