//! Movement domain: fixed-step controller driving and damage interrupts.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::core::TimeScaleRequest;
use crate::effects::EffectRequest;
use crate::movement::{
    Attachment, AvianBody, AvianSensor, ControllerEvent, DamageEvent, DashStarted, DashStopped,
    GroundedChanged, JumpExecuted, MotionState, MovementController, MovementInput, PROBE_DISTANCE,
    Player, StrikeEnded, StrikeHit, StrikeStarted, TickReport, WallGrabChanged, WallSlideChanged,
};

/// Everything a controller tick can publish.
#[derive(SystemParam)]
pub(crate) struct ControllerOutputs<'w> {
    grounded: MessageWriter<'w, GroundedChanged>,
    jumps: MessageWriter<'w, JumpExecuted>,
    dash_started: MessageWriter<'w, DashStarted>,
    dash_stopped: MessageWriter<'w, DashStopped>,
    strike_started: MessageWriter<'w, StrikeStarted>,
    strike_hits: MessageWriter<'w, StrikeHit>,
    strike_ended: MessageWriter<'w, StrikeEnded>,
    wall_slide: MessageWriter<'w, WallSlideChanged>,
    wall_grab: MessageWriter<'w, WallGrabChanged>,
    effects: MessageWriter<'w, EffectRequest>,
    time_scale: MessageWriter<'w, TimeScaleRequest>,
}

impl ControllerOutputs<'_> {
    fn dispatch(&mut self, entity: Entity, report: TickReport) {
        for event in report.events {
            match event {
                ControllerEvent::GroundedChanged { grounded } => {
                    self.grounded.write(GroundedChanged { entity, grounded });
                }
                ControllerEvent::JumpExecuted { kind } => {
                    self.jumps.write(JumpExecuted { entity, kind });
                }
                ControllerEvent::DashStarted { direction } => {
                    self.dash_started.write(DashStarted { entity, direction });
                }
                ControllerEvent::DashStopped => {
                    self.dash_stopped.write(DashStopped { entity });
                }
                ControllerEvent::StrikeStarted => {
                    self.strike_started.write(StrikeStarted { entity });
                }
                ControllerEvent::StrikeHit { point, target } => {
                    self.strike_hits.write(StrikeHit {
                        entity,
                        point,
                        target,
                    });
                }
                ControllerEvent::StrikeEnded => {
                    self.strike_ended.write(StrikeEnded { entity });
                }
                ControllerEvent::WallSlideChanged { sliding } => {
                    self.wall_slide.write(WallSlideChanged { entity, sliding });
                }
                ControllerEvent::WallGrabChanged { grabbing } => {
                    self.wall_grab.write(WallGrabChanged { entity, grabbing });
                }
            }
        }

        for effect in report.effects {
            self.effects.write(effect);
        }

        if let Some(request) = report.time_scale {
            self.time_scale.write(request);
        }
    }
}

pub(crate) fn drive_controllers(
    time: Res<Time>,
    spatial_query: SpatialQuery,
    mut input: ResMut<MovementInput>,
    mut query: Query<
        (
            Entity,
            &Transform,
            &Collider,
            &mut MovementController,
            &mut LinearVelocity,
            &mut GravityScale,
            &mut Attachment,
        ),
        With<Player>,
    >,
    mut outputs: ControllerOutputs,
) {
    let dt = time.delta_secs();
    let snapshot = input.take_snapshot();

    for (
        entity,
        transform,
        collider,
        mut controller,
        mut velocity,
        mut gravity_scale,
        mut attachment,
    ) in &mut query
    {
        let half_extents = match collider.shape_scaled().as_cuboid() {
            Some(c) => Vec2::new(c.half_extents.x, c.half_extents.y),
            None => Vec2::new(12.0, 24.0),
        };

        let sensor = AvianSensor {
            spatial_query: &spatial_query,
            owner: entity,
            half_extents,
            probe_distance: PROBE_DISTANCE,
        };
        let mut body = AvianBody {
            position: transform.translation.truncate(),
            velocity: &mut velocity,
            gravity_scale: &mut gravity_scale,
            attachment: &mut attachment,
            dt,
        };

        let report = controller.tick(&snapshot, &mut body, &sensor, dt);
        outputs.dispatch(entity, report);
    }
}

/// Damage cancels whatever the controller was doing and applies knockback.
pub(crate) fn apply_damage(
    mut damage_events: MessageReader<DamageEvent>,
    mut query: Query<(&mut MovementController, &mut LinearVelocity)>,
) {
    for event in damage_events.read() {
        let Ok((mut controller, mut velocity)) = query.get_mut(event.target) else {
            continue;
        };

        controller.interrupt();
        velocity.0 = event.knockback;
        debug!(
            "Damage interrupt on {:?}: knockback={}",
            event.target, event.knockback
        );
    }
}

/// Tint the placeholder sprite by what the controller is doing.
pub(crate) fn tint_player(mut query: Query<(&MovementController, &mut Sprite), With<Player>>) {
    for (controller, mut sprite) in &mut query {
        sprite.color = match controller.motion_state() {
            MotionState::Idle => Color::srgb(0.9, 0.9, 0.9),
            MotionState::Jumping => Color::srgb(0.85, 0.9, 1.0),
            MotionState::Dashing => Color::srgb(0.4, 0.8, 1.0),
            MotionState::Striking => Color::srgb(1.0, 0.85, 0.5),
            MotionState::WallSliding => Color::srgb(0.7, 0.7, 0.85),
            MotionState::WallGrabbing => Color::srgb(0.6, 0.6, 0.95),
        };
    }
}
