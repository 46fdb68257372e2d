//! Debug domain: controller readout overlay.

use bevy::prelude::*;

use crate::movement::{MovementController, TimerId};

/// Marker for the controller readout
#[derive(Component, Debug)]
pub struct DebugInfoOverlay;

pub(crate) fn spawn_debug_info_overlay(commands: &mut Commands) {
    commands.spawn((
        DebugInfoOverlay,
        Text::new("Loading..."),
        TextFont {
            font_size: 12.0,
            ..default()
        },
        TextColor(Color::srgb(0.8, 0.9, 0.8)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(20.0),
            bottom: Val::Px(20.0),
            padding: UiRect::all(Val::Px(8.0)),
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
        ZIndex(500),
    ));
}

/// One readout block for a controller.
pub fn format_controller_info(
    controller: &MovementController,
    position: Vec2,
    velocity: Vec2,
) -> String {
    let timers = controller.timers();
    format!(
        "Pos: ({:.0}, {:.0})  Vel: ({:.0}, {:.0})\n\
         State: {:?}  Facing: {:?}\n\
         Grounded: {}  Wall: {:?}\n\
         Jumped: {}  Double: {}  Dashed: {}\n\
         Coyote: {:.3}  Buffer: {:.3}  Cooldown: {:.3}\n\
         Wall lock: {:.3}  Hitstop: {:.3}  Control: {:.2}",
        position.x,
        position.y,
        velocity.x,
        velocity.y,
        controller.motion_state(),
        controller.facing(),
        controller.is_grounded(),
        controller.wall_state(),
        controller.has_jumped(),
        controller.has_double_jumped(),
        controller.has_dashed(),
        timers.remaining(TimerId::Coyote),
        timers.remaining(TimerId::JumpBuffer),
        timers.remaining(TimerId::StrikeCooldown),
        timers.remaining(TimerId::WallJumpLock),
        timers.remaining(TimerId::Hitstop),
        controller.control_authority(),
    )
}
