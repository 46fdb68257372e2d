//! Debug domain: hotkeys, controller readout and probe gizmos.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::debug::state::DebugState;
use crate::debug::ui::{DebugInfoOverlay, format_controller_info, spawn_debug_info_overlay};
use crate::movement::{
    DamageEvent, Facing, MovementController, PLAYER_SIZE, PROBE_DISTANCE, Player, SpawnPoint,
};

/// Toggle the readout with F1 or backtick, probe gizmos with F2
pub(crate) fn toggle_debug_views(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
) {
    if keyboard.just_pressed(KeyCode::F1) || keyboard.just_pressed(KeyCode::Backquote) {
        debug_state.show_info = !debug_state.show_info;
    }
    if keyboard.just_pressed(KeyCode::F2) {
        debug_state.show_probes = !debug_state.show_probes;
    }
}

/// Handle keyboard shortcuts for debug actions
pub(crate) fn handle_debug_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
    mut damage_events: MessageWriter<DamageEvent>,
    mut player_query: Query<
        (
            Entity,
            &mut MovementController,
            &SpawnPoint,
            &mut Transform,
            &mut LinearVelocity,
        ),
        With<Player>,
    >,
) {
    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    if !ctrl {
        return;
    }

    // Ctrl+R: Respawn
    if keyboard.just_pressed(KeyCode::KeyR) {
        for (_, mut controller, spawn, mut transform, mut velocity) in &mut player_query {
            controller.interrupt();
            transform.translation = spawn.0.extend(transform.translation.z);
            velocity.0 = Vec2::ZERO;
        }
        info!("Debug: player respawned");
        debug_state.set_message("Respawned", 2.0);
    }

    // Ctrl+D: Refill dash
    if keyboard.just_pressed(KeyCode::KeyD) {
        for (_, mut controller, ..) in &mut player_query {
            controller.refill_dash();
        }
        debug_state.set_message("Dash refilled", 2.0);
    }

    // Ctrl+H: Take a test hit
    if keyboard.just_pressed(KeyCode::KeyH) {
        for (entity, controller, ..) in &player_query {
            damage_events.write(DamageEvent {
                target: entity,
                knockback: Vec2::new(-controller.facing().sign() * 300.0, 400.0),
            });
        }
        debug_state.set_message("Test hit", 2.0);
    }
}

/// Update status message timer and fade out
pub(crate) fn update_status_message(time: Res<Time>, mut debug_state: ResMut<DebugState>) {
    if let Some((_, ref mut duration)) = debug_state.status_message {
        *duration -= time.delta_secs();
        if *duration <= 0.0 {
            debug_state.status_message = None;
        }
    }
}

/// Update the readout with the current controller state
pub(crate) fn update_debug_info_overlay(
    mut commands: Commands,
    debug_state: Res<DebugState>,
    player_query: Query<(&Transform, &LinearVelocity, &MovementController), With<Player>>,
    mut overlay_query: Query<&mut Text, With<DebugInfoOverlay>>,
    existing_overlay: Query<Entity, With<DebugInfoOverlay>>,
) {
    if !debug_state.show_info {
        // Cleanup overlay if it exists
        for entity in &existing_overlay {
            commands.entity(entity).despawn();
        }
        return;
    }

    // Ensure overlay exists
    if existing_overlay.is_empty() {
        spawn_debug_info_overlay(&mut commands);
        return;
    }

    if let (Some((transform, velocity, controller)), Ok(mut text)) =
        (player_query.iter().next(), overlay_query.single_mut())
    {
        let mut info =
            format_controller_info(controller, transform.translation.truncate(), velocity.0);
        if let Some((message, _)) = &debug_state.status_message {
            info.push('\n');
            info.push_str(message);
        }
        **text = info;
    }
}

/// Line segments for every probe the controller casts.
pub fn probe_segments(
    position: Vec2,
    half_extents: Vec2,
    facing: Facing,
    strike_range: f32,
) -> Vec<(Vec2, Vec2)> {
    let feet = position - Vec2::new(0.0, half_extents.y);
    let inset = half_extents.x * 0.9;
    let reach = half_extents.x + PROBE_DISTANCE;

    let mut segments: Vec<(Vec2, Vec2)> = [0.0, -inset, inset]
        .into_iter()
        .map(|offset| {
            let origin = feet + Vec2::new(offset, 0.0);
            (origin, origin - Vec2::new(0.0, PROBE_DISTANCE))
        })
        .collect();
    segments.push((position, position - Vec2::new(reach, 0.0)));
    segments.push((position, position + Vec2::new(reach, 0.0)));
    segments.push((position, position + facing.as_vec2() * strike_range));
    segments
}

pub(crate) fn draw_probes(
    mut gizmos: Gizmos,
    player_query: Query<(&Transform, &MovementController), With<Player>>,
) {
    let probe_color = Color::srgb(0.3, 1.0, 0.4);
    let grounded_color = Color::srgb(1.0, 0.9, 0.2);
    let strike_color = Color::srgb(1.0, 0.4, 0.3);

    for (transform, controller) in &player_query {
        let segments = probe_segments(
            transform.translation.truncate(),
            PLAYER_SIZE * 0.5,
            controller.facing(),
            controller.tuning().strike_range,
        );
        let last = segments.len() - 1;
        for (i, (start, end)) in segments.into_iter().enumerate() {
            let color = if i == last {
                strike_color
            } else if i < 3 && controller.is_grounded() {
                grounded_color
            } else {
                probe_color
            };
            gizmos.line_2d(start, end, color);
        }
    }
}
