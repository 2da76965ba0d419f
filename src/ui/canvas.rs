//! Paints the recorded frame as 2D sprites and text

use bevy::prelude::*;

use super::components::{to_bevy_color, AnimationResource, CanvasItem, CONTROL_BAR_HEIGHT};
use crate::simulation::{DrawCommand, LineStyle, Position};

/// Maps canvas pixels (top-left origin, y down) to world space (centered, y up)
#[derive(Debug, Clone, Copy)]
struct CanvasTransform {
    size: Vec2,
}

impl CanvasTransform {
    fn point(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(
            x - self.size.x / 2.0,
            self.size.y / 2.0 + CONTROL_BAR_HEIGHT / 2.0 - y,
        )
    }
}

/// System to advance the animation: end timer first, then one frame if requested
pub fn drive_animation(time: Res<Time>, mut animation: ResMut<AnimationResource>) {
    let AnimationResource {
        controller,
        surface,
        dirty,
    } = &mut *animation;

    if let Some(token) = controller.advance_timers(time.delta()) {
        if controller.fire_timer(token, Some(&mut *surface)) {
            *dirty = true;
        }
    }

    if controller.frame_requested() {
        controller.on_frame(Some(&mut *surface));
        *dirty = true;
    }
}

/// System to replace the canvas sprites with the latest recorded frame
pub fn paint_canvas(
    mut commands: Commands,
    mut animation: ResMut<AnimationResource>,
    items: Query<Entity, With<CanvasItem>>,
) {
    if !animation.dirty {
        return;
    }
    animation.dirty = false;

    for entity in items.iter() {
        commands.entity(entity).despawn();
    }

    let canvas = CanvasTransform {
        size: animation.canvas_size(),
    };

    // Later commands paint over earlier ones
    let mut z = 0.0;
    let mut next_z = || {
        z += 0.01;
        z
    };

    for command in animation.surface.commands() {
        match command {
            DrawCommand::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => {
                let center = canvas.point(x + width / 2.0, y + height / 2.0);
                commands.spawn((
                    CanvasItem,
                    Sprite::from_color(to_bevy_color(*color), Vec2::new(*width, *height)),
                    Transform::from_xyz(center.x, center.y, next_z()),
                ));
            }
            DrawCommand::Line { from, to, style } => {
                for (start, end) in dash_segments(*from, *to, style) {
                    spawn_segment(&mut commands, &canvas, start, end, style, next_z());
                }
            }
            DrawCommand::Text {
                text,
                anchor,
                style,
            } => {
                // Text is centered on its anchor, so lift it off the baseline
                let center = canvas.point(anchor.x, anchor.y - style.size * 0.35);
                if let Some((outline, width)) = style.outline {
                    let z = next_z();
                    for (dx, dy) in [(-width, 0.0), (width, 0.0), (0.0, -width), (0.0, width)] {
                        commands.spawn((
                            CanvasItem,
                            Text2d::new(text.clone()),
                            TextFont {
                                font_size: style.size,
                                ..default()
                            },
                            TextColor(to_bevy_color(outline)),
                            Transform::from_xyz(center.x + dx, center.y + dy, z),
                        ));
                    }
                }
                commands.spawn((
                    CanvasItem,
                    Text2d::new(text.clone()),
                    TextFont {
                        font_size: style.size,
                        ..default()
                    },
                    TextColor(to_bevy_color(style.fill)),
                    Transform::from_xyz(center.x, center.y, next_z()),
                ));
            }
        }
    }
}

/// Split a line into its visible dashes
fn dash_segments(from: Position, to: Position, style: &LineStyle) -> Vec<(Position, Position)> {
    let Some([on, off]) = style.dash else {
        return vec![(from, to)];
    };

    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let length = (dx * dx + dy * dy).sqrt();
    if length <= 0.0 || on <= 0.0 {
        return vec![(from, to)];
    }

    let (ux, uy) = (dx / length, dy / length);
    let mut segments = Vec::new();
    let mut travelled = 0.0;
    while travelled < length {
        let end = (travelled + on).min(length);
        segments.push((
            Position::new(from.x + ux * travelled, from.y + uy * travelled),
            Position::new(from.x + ux * end, from.y + uy * end),
        ));
        travelled = end + off;
    }
    segments
}

fn spawn_segment(
    commands: &mut Commands,
    canvas: &CanvasTransform,
    start: Position,
    end: Position,
    style: &LineStyle,
    z: f32,
) {
    let a = canvas.point(start.x, start.y);
    let b = canvas.point(end.x, end.y);
    let delta = b - a;
    let center = (a + b) / 2.0;

    commands.spawn((
        CanvasItem,
        Sprite::from_color(
            to_bevy_color(style.color),
            Vec2::new(delta.length(), style.width),
        ),
        Transform::from_xyz(center.x, center.y, z)
            .with_rotation(Quat::from_rotation_z(delta.y.atan2(delta.x))),
    ));
}
