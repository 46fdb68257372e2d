//! Movement domain: walking, jumping and fall shaping.

use bevy::prelude::*;

use crate::effects::{EffectKind, EffectRequest};
use crate::movement::body::PhysicsBody;
use crate::movement::controller::{
    MovementController, SPEED_EPSILON, TickReport, Trigger, WallState,
};
use crate::movement::events::{ControllerEvent, JumpKind};
use crate::movement::timers::TimerId;
use crate::movement::{Facing, InputSnapshot, WallSide};

impl MovementController {
    pub(crate) fn evaluate_jump(
        &mut self,
        input: &InputSnapshot,
        trigger: Trigger,
        body: &mut impl PhysicsBody,
        report: &mut TickReport,
    ) {
        if input.jump_pressed {
            self.timers
                .reset(TimerId::JumpBuffer, self.tuning.jump_input_window);
        }

        // Dash and strike win over jumping; the buffer survives them
        if trigger != Trigger::None || self.action.suppresses_locomotion() {
            return;
        }
        if !self.timers.is_active(TimerId::JumpBuffer) {
            return;
        }

        let caps = self.tuning.capabilities;

        // A grab always jumps off the wall, even with feet on the floor
        if caps.wall_jump {
            let side = match (self.wall, self.wall_touch) {
                (WallState::Grabbing(side), _) => Some(side),
                (_, Some(touch)) if !self.grounded => Some(touch.side),
                _ => None,
            };
            if let Some(side) = side {
                self.wall_jump(side, body, report);
                return;
            }
        }

        let coyote = self.timers.is_active(TimerId::Coyote);
        if (self.grounded || coyote) && !self.has_jumped {
            let kind = if self.grounded {
                JumpKind::Ground
            } else {
                JumpKind::Coyote
            };
            self.execute_jump(kind, body, report);
        } else if !self.grounded && caps.double_jump && !self.has_double_jumped {
            self.has_double_jumped = true;
            self.execute_jump(JumpKind::Air, body, report);
        }
    }

    fn execute_jump(&mut self, kind: JumpKind, body: &mut impl PhysicsBody, report: &mut TickReport) {
        // Without wall jumps a grab is simply let go; the lock keeps the held
        // grab from catching the wall again and eating the impulse
        if self.wall.is_grabbing() {
            self.timers
                .reset(TimerId::WallJumpLock, self.tuning.wall_jump_lock);
            self.release_wall(body, report);
        }

        // Falling speed would eat into the impulse otherwise
        let vertical = body.velocity().y;
        let impulse = self.tuning.jump_force - vertical.min(0.0);
        body.add_impulse(Vec2::new(0.0, impulse));

        self.has_jumped = true;
        self.timers.clear(TimerId::JumpBuffer);
        self.timers.clear(TimerId::Coyote);

        report.events.push(ControllerEvent::JumpExecuted { kind });
        report.effects.push(EffectRequest::Play {
            kind: EffectKind::Jump,
            position: body.position(),
            orientation: Vec2::Y,
        });
        debug!(
            "{:?} jump: impulse={:.1}, has_double_jumped={}",
            kind, impulse, self.has_double_jumped
        );
    }

    fn wall_jump(&mut self, side: WallSide, body: &mut impl PhysicsBody, report: &mut TickReport) {
        let force = self.tuning.jump_force;
        let away = -side.sign();
        body.set_velocity(Vec2::new(away * force, force));

        self.timers
            .reset(TimerId::WallJumpLock, self.tuning.wall_jump_lock);
        self.timers.clear(TimerId::JumpBuffer);
        self.control_authority = self.tuning.wall_jump_control;
        self.has_jumped = true;
        self.has_double_jumped = false;
        self.facing = if away > 0.0 {
            Facing::Right
        } else {
            Facing::Left
        };
        self.release_wall(body, report);

        report.events.push(ControllerEvent::JumpExecuted {
            kind: JumpKind::Wall,
        });
        report.effects.push(EffectRequest::Play {
            kind: EffectKind::Jump,
            position: body.position(),
            orientation: Vec2::new(away, 1.0).normalize(),
        });
        debug!("Wall jump off {:?} wall", side);
    }

    pub(crate) fn apply_horizontal(
        &mut self,
        input: &InputSnapshot,
        trigger: Trigger,
        body: &mut impl PhysicsBody,
    ) {
        if trigger != Trigger::None || self.action.suppresses_locomotion() || self.wall.is_grabbing()
        {
            return;
        }

        let tuning = &self.tuning;
        let target = input.move_axis.x * tuning.walk_speed;
        let current = body.velocity().x;
        let has_target = target.abs() > SPEED_EPSILON;

        let mut rate = if has_target {
            tuning.acceleration
        } else {
            tuning.deceleration
        };

        if !self.grounded {
            rate *= tuning.air_multiplier;
            // Keep launch momentum (wall jumps, dash exits) in the air
            if has_target && current.signum() == target.signum() && current.abs() > target.abs() {
                rate = 0.0;
            }
        }

        let force = (target - current) * rate * self.control_authority;
        body.add_force(Vec2::new(force, 0.0));
    }

    pub(crate) fn shape_gravity(
        &mut self,
        input: &InputSnapshot,
        body: &mut impl PhysicsBody,
        dt: f32,
    ) {
        if self.action.suspends_gravity() || self.wall.is_grabbing() {
            body.set_gravity_scale(0.0);
            return;
        }

        let tuning = &self.tuning;
        body.set_gravity_scale(tuning.gravity_scale);

        if self.grounded || self.action.is_striking() {
            return;
        }

        let velocity = body.velocity();
        let released_while_rising = velocity.y > 0.0 && !input.jump_held;
        if velocity.y >= tuning.jump_velocity_falloff && !released_while_rising {
            return;
        }

        let floor = -tuning.max_fall_speed;
        if velocity.y <= floor {
            return;
        }

        let extra = tuning.gravity * tuning.gravity_scale * tuning.fall_multiplier * dt;
        body.set_velocity(Vec2::new(velocity.x, (velocity.y - extra).max(floor)));
    }
}
