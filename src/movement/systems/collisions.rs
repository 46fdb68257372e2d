//! Movement domain: platform riding and trigger volumes.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::effects::{EffectKind, EffectRequest};
use crate::movement::{
    Attachment, DamageEvent, DashRefill, Hazard, KillZone, MovementController, Patrol, Player,
    SpawnPoint,
};

/// Carry attached players along with whatever they are riding.
pub(crate) fn follow_attachments(
    mut players: Query<(&mut Transform, &mut Attachment), With<Player>>,
    targets: Query<&Transform, Without<Player>>,
) {
    for (mut transform, mut attachment) in &mut players {
        let Some(target) = attachment.target else {
            continue;
        };

        let Ok(target_transform) = targets.get(target) else {
            debug!("Attachment target {:?} is gone, detaching", target);
            attachment.target = None;
            attachment.last_target_position = None;
            continue;
        };

        let current = target_transform.translation.truncate();
        if let Some(previous) = attachment.last_target_position {
            let delta = current - previous;
            if delta != Vec2::ZERO {
                transform.translation += delta.extend(0.0);
            }
        }
        attachment.last_target_position = Some(current);
    }
}

/// Drive kinematic platforms along their patrol path.
pub(crate) fn patrol_platforms(
    time: Res<Time>,
    physics_time: Res<Time<Physics>>,
    mut query: Query<(&Patrol, &Transform, &mut LinearVelocity)>,
) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }

    // Platforms hold still during hitstop like everything else
    if physics_time.is_paused() {
        return;
    }

    let t = physics_time.elapsed_secs();
    for (patrol, transform, mut velocity) in &mut query {
        let target_x = patrol.origin.x + patrol.extent * (patrol.phase + t * patrol.speed).sin();
        velocity.x = (target_x - transform.translation.x) / dt;
        velocity.y = (patrol.origin.y - transform.translation.y) / dt;
    }
}

/// Dash refills, hazards and kill zones.
pub(crate) fn handle_volumes(
    mut collision_events: MessageReader<CollisionStart>,
    mut damage_events: MessageWriter<DamageEvent>,
    mut effects: MessageWriter<EffectRequest>,
    mut players: Query<
        (
            &mut MovementController,
            &SpawnPoint,
            &mut Transform,
            &mut LinearVelocity,
            &mut Attachment,
        ),
        With<Player>,
    >,
    refills: Query<(), With<DashRefill>>,
    hazards: Query<(&Hazard, &Transform), Without<Player>>,
    kill_zones: Query<(), With<KillZone>>,
) {
    for event in collision_events.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];

        for (player_entity, volume) in pairs {
            let Ok((mut controller, spawn, mut transform, mut velocity, mut attachment)) =
                players.get_mut(player_entity)
            else {
                continue;
            };

            if refills.contains(volume) {
                if controller.has_dashed() {
                    debug!("Dash refilled by {:?}", volume);
                    controller.refill_dash();
                }
            } else if let Ok((hazard, hazard_transform)) = hazards.get(volume) {
                let away = if transform.translation.x >= hazard_transform.translation.x {
                    1.0
                } else {
                    -1.0
                };
                damage_events.write(DamageEvent {
                    target: player_entity,
                    knockback: Vec2::new(hazard.knockback.x * away, hazard.knockback.y),
                });
            } else if kill_zones.contains(volume) {
                let position = transform.translation.truncate();
                info!("Player fell into kill zone at {}, respawning", position);
                effects.write(EffectRequest::Play {
                    kind: EffectKind::Death,
                    position,
                    orientation: Vec2::Y,
                });

                controller.interrupt();
                transform.translation = spawn.0.extend(transform.translation.z);
                velocity.0 = Vec2::ZERO;
                attachment.target = None;
                attachment.last_target_position = None;
            }
        }
    }
}
