//! Play/Pause and Reset buttons below the canvas

use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::prelude::*;

use super::components::{
    AnimationResource, ControlButton, PlayPauseLabel, StatusText, CONTROL_BAR_HEIGHT,
};
use crate::simulation::AnimationState;

const PLAY_COLOR: Color = Color::srgb(0.15, 0.39, 0.92);
const RESET_COLOR: Color = Color::srgb(0.3, 0.3, 0.3);
const DISABLED_COLOR: Color = Color::srgb(0.45, 0.45, 0.45);

/// System to setup the control bar
pub fn setup_controls(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Px(CONTROL_BAR_HEIGHT),
                position_type: PositionType::Absolute,
                bottom: Val::Px(0.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                column_gap: Val::Px(16.0),
                ..default()
            },
            BackgroundColor(Color::srgb(0.95, 0.95, 0.95)),
        ))
        .with_children(|parent| {
            spawn_control_button(parent, ControlButton::PlayPause, "Play", PLAY_COLOR);
            spawn_control_button(parent, ControlButton::Reset, "Reset", RESET_COLOR);

            parent.spawn((
                StatusText,
                Text::new("Ready"),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.2, 0.2, 0.2)),
            ));
        });
}

fn spawn_control_button(
    parent: &mut ChildSpawnerCommands,
    button: ControlButton,
    text: &str,
    color: Color,
) {
    parent
        .spawn((
            button,
            Button,
            Node {
                padding: UiRect::axes(Val::Px(20.0), Val::Px(10.0)),
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BorderColor::all(Color::WHITE),
            BackgroundColor(color),
        ))
        .with_children(|label| {
            let mut entity = label.spawn((
                Text::new(text),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
            if button == ControlButton::PlayPause {
                entity.insert(PlayPauseLabel);
            }
        });
}

/// System to handle control button clicks
pub fn handle_control_buttons(
    mut animation: ResMut<AnimationResource>,
    mut interaction_query: Query<
        (&Interaction, &ControlButton, &mut BorderColor),
        Changed<Interaction>,
    >,
) {
    for (interaction, button, mut border_color) in interaction_query.iter_mut() {
        match *interaction {
            Interaction::Pressed => match button {
                ControlButton::PlayPause => animation.toggle(),
                ControlButton::Reset => animation.reset(),
            },
            Interaction::Hovered => {
                *border_color = BorderColor::all(Color::srgb(1.0, 1.0, 0.0));
            }
            Interaction::None => {
                *border_color = BorderColor::all(Color::WHITE);
            }
        }
    }
}

/// System to keep the button label, enabled look and status line in sync
pub fn update_controls(
    animation: Res<AnimationResource>,
    mut label_query: Query<&mut Text, (With<PlayPauseLabel>, Without<StatusText>)>,
    mut status_query: Query<&mut Text, (With<StatusText>, Without<PlayPauseLabel>)>,
    mut button_query: Query<(&ControlButton, &mut BackgroundColor)>,
) {
    if !animation.is_changed() {
        return;
    }
    let controller = &animation.controller;

    for mut text in label_query.iter_mut() {
        **text = controller.play_label().to_string();
    }

    for (button, mut background) in button_query.iter_mut() {
        if *button == ControlButton::PlayPause {
            background.0 = if controller.can_toggle_play() {
                PLAY_COLOR
            } else {
                DISABLED_COLOR
            };
        }
    }

    let world = controller.world();
    let status = match controller.state() {
        AnimationState::Idle => "Ready".to_string(),
        AnimationState::Running => format!("Frame {}", world.frame),
        AnimationState::Paused => format!("Paused at frame {}", world.frame),
        AnimationState::Collided => match world.collision {
            Some(event) => format!("Collision at frame {}", event.frame),
            None => "Collision".to_string(),
        },
        AnimationState::Ended => "Ended - press Reset".to_string(),
    };
    for mut text in status_query.iter_mut() {
        **text = status.clone();
    }
}
