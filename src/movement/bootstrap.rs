//! Movement domain: player bootstrap from loaded tuning.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{
    Attachment, GameLayer, MovementController, MovementTuning, Player, SpawnPoint,
};

/// Where the player starts in the test room.
pub const PLAYER_SPAWN: Vec2 = Vec2::new(0.0, 100.0);
/// Player collider size in pixels.
pub const PLAYER_SIZE: Vec2 = Vec2::new(24.0, 48.0);

/// Spawn the player with a controller built from the tuning resource.
pub(crate) fn spawn_player(
    mut commands: Commands,
    tuning: Res<MovementTuning>,
    existing_player: Query<Entity, With<Player>>,
) {
    // Don't spawn if player already exists
    if !existing_player.is_empty() {
        info!("Player already exists, skipping spawn");
        return;
    }

    let controller = match MovementController::new((*tuning).clone()) {
        Ok(controller) => controller,
        Err(errors) => {
            for e in &errors {
                error!("Cannot build movement controller: {}", e);
            }
            return;
        }
    };

    info!(
        "Spawning player: walk_speed={}, jump_force={}, dash={}, strike={}, barrage={}, walls=({}, {}, {})",
        tuning.walk_speed,
        tuning.jump_force,
        tuning.capabilities.dash,
        tuning.capabilities.strike,
        tuning.capabilities.barrage,
        tuning.capabilities.wall_jump,
        tuning.capabilities.wall_slide,
        tuning.capabilities.wall_grab,
    );

    commands.spawn((
        // Identity & Movement
        (
            Player,
            controller,
            Attachment::default(),
            SpawnPoint(PLAYER_SPAWN),
        ),
        // Rendering
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.9),
            custom_size: Some(PLAYER_SIZE),
            ..default()
        },
        Transform::from_xyz(PLAYER_SPAWN.x, PLAYER_SPAWN.y, 0.0),
        // Physics
        (
            RigidBody::Dynamic,
            Collider::rectangle(PLAYER_SIZE.x, PLAYER_SIZE.y),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            GravityScale(tuning.gravity_scale),
            Friction::new(0.0),
            CollisionEventsEnabled,
            CollisionLayers::new(
                GameLayer::Player,
                [GameLayer::Ground, GameLayer::Wall, GameLayer::Sensor],
            ),
        ),
    ));
}
