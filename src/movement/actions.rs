//! Movement domain: dash, strike and wall actions.

use bevy::prelude::*;

use crate::core::TimeScaleRequest;
use crate::effects::{EffectKind, EffectRequest};
use crate::movement::body::PhysicsBody;
use crate::movement::controller::{
    AXIS_DEADZONE, ActionState, DashPhase, MovementController, StrikePhase, TickReport, Trigger,
    WallState,
};
use crate::movement::events::ControllerEvent;
use crate::movement::sensor::ContactSensor;
use crate::movement::timers::{TimerId, count_down};
use crate::movement::InputSnapshot;

/// How long a strike impact spark stays on screen.
const STRIKE_IMPACT_LIFETIME: f32 = 0.2;

impl MovementController {
    pub(crate) fn evaluate_actions(
        &mut self,
        input: &InputSnapshot,
        trigger: Trigger,
        body: &mut impl PhysicsBody,
        sensor: &impl ContactSensor,
        dt: f32,
        report: &mut TickReport,
    ) {
        // A freshly started action does not consume this tick's time
        let mut elapsed = dt;
        match trigger {
            Trigger::Dash => {
                self.start_dash(input, body, report);
                elapsed = 0.0;
            }
            Trigger::Strike => {
                if self.start_strike(body, report) {
                    // Wait for the freeze-frame before winding up
                    self.update_wall(input, body, report);
                    return;
                }
                elapsed = 0.0;
            }
            Trigger::None => {}
        }

        self.advance_dash(body, elapsed, report);
        self.advance_strike(input, body, sensor, elapsed, report);
        self.update_wall(input, body, report);
    }

    fn request_hitstop(&mut self, duration: f32, report: &mut TickReport) {
        if duration <= 0.0 {
            return;
        }
        self.timers.reset(TimerId::Hitstop, duration);
        report.time_scale = Some(TimeScaleRequest::Freeze { duration });
    }

    fn start_dash(
        &mut self,
        input: &InputSnapshot,
        body: &mut impl PhysicsBody,
        report: &mut TickReport,
    ) {
        let direction = match input.move_axis.try_normalize() {
            Some(direction) => direction,
            None => self.facing.as_vec2(),
        };

        self.has_dashed = true;
        self.release_wall(body, report);
        self.action = ActionState::Dashing(DashPhase::Attack {
            remaining: self.tuning.dash_attack_timeout,
            direction,
        });
        body.set_gravity_scale(0.0);
        body.set_velocity(direction * self.tuning.dash_force);
        self.request_hitstop(self.tuning.dash_freeze_time, report);

        report.events.push(ControllerEvent::DashStarted { direction });
        report.effects.push(EffectRequest::Play {
            kind: EffectKind::DashBurst,
            position: body.position(),
            orientation: direction,
        });
        debug!("Dash started: direction={}", direction);
    }

    fn advance_dash(&mut self, body: &mut impl PhysicsBody, dt: f32, report: &mut TickReport) {
        let ActionState::Dashing(phase) = self.action else {
            return;
        };

        match phase {
            DashPhase::Attack {
                mut remaining,
                direction,
            } => {
                if !count_down(&mut remaining, dt) {
                    body.set_velocity(direction * self.tuning.dash_force);
                    self.action = ActionState::Dashing(DashPhase::Attack {
                        remaining,
                        direction,
                    });
                    return;
                }

                // Exit speed along the dash, without launching upward
                let mut exit = direction * self.tuning.dash_end_speed;
                exit.y = exit.y.min(self.tuning.dash_exit_max_rise);
                body.set_velocity(exit);
                body.set_gravity_scale(self.tuning.gravity_scale);
                report.events.push(ControllerEvent::DashStopped);
                debug!("Dash attack phase over, exit velocity={}", exit);

                let mut end = self.tuning.dash_end_timeout;
                if count_down(&mut end, 0.0) {
                    self.finish_dash();
                } else {
                    self.action = ActionState::Dashing(DashPhase::End {
                        remaining: end,
                        direction,
                    });
                }
            }
            DashPhase::End {
                mut remaining,
                direction,
            } => {
                if count_down(&mut remaining, dt) {
                    self.finish_dash();
                } else {
                    self.action = ActionState::Dashing(DashPhase::End {
                        remaining,
                        direction,
                    });
                }
            }
        }
    }

    fn finish_dash(&mut self) {
        self.action = ActionState::Idle;
        // Dashing along the floor never produces a landing, so refill here
        if self.grounded {
            self.has_dashed = false;
        }
    }

    /// Returns true when the strike waits on a freeze-frame first.
    fn start_strike(&mut self, body: &mut impl PhysicsBody, report: &mut TickReport) -> bool {
        self.action = ActionState::Striking(StrikePhase::Windup {
            remaining: self.tuning.strike_start_delay,
        });

        report.events.push(ControllerEvent::StrikeStarted);
        report.effects.push(EffectRequest::Play {
            kind: EffectKind::StrikeSwing,
            position: body.position(),
            orientation: self.facing.as_vec2(),
        });
        debug!("Strike started facing {:?}", self.facing);

        self.request_hitstop(self.tuning.strike_freeze_time, report);
        self.is_frozen()
    }

    fn advance_strike(
        &mut self,
        input: &InputSnapshot,
        body: &mut impl PhysicsBody,
        sensor: &impl ContactSensor,
        dt: f32,
        report: &mut TickReport,
    ) {
        let ActionState::Striking(mut phase) = self.action else {
            return;
        };

        let max_hits = if self.tuning.capabilities.barrage {
            self.tuning.striker_count.max(1)
        } else {
            1
        };
        let mut dt = dt;

        // Zero-length phases fall through within the same tick
        loop {
            match phase {
                StrikePhase::Windup { mut remaining } => {
                    if !count_down(&mut remaining, dt) {
                        phase = StrikePhase::Windup { remaining };
                        break;
                    }
                    dt = 0.0;
                    self.fire_strike_probe(body, sensor, report);
                    phase = if max_hits > 1 && input.strike_held {
                        StrikePhase::Barrage {
                            next_in: self.tuning.strike_rate,
                            hits: 1,
                        }
                    } else {
                        StrikePhase::Recovery {
                            remaining: self.tuning.strike_end_delay,
                        }
                    };
                }
                StrikePhase::Barrage { mut next_in, hits } => {
                    if !input.strike_held || hits >= max_hits {
                        phase = StrikePhase::Recovery {
                            remaining: self.tuning.strike_end_delay,
                        };
                        continue;
                    }
                    if !count_down(&mut next_in, dt) {
                        phase = StrikePhase::Barrage { next_in, hits };
                        break;
                    }
                    dt = 0.0;
                    self.fire_strike_probe(body, sensor, report);
                    phase = StrikePhase::Barrage {
                        next_in: self.tuning.strike_rate,
                        hits: hits + 1,
                    };
                }
                StrikePhase::Recovery { mut remaining } => {
                    if !count_down(&mut remaining, dt) {
                        phase = StrikePhase::Recovery { remaining };
                        break;
                    }
                    self.action = ActionState::Idle;
                    self.timers
                        .reset(TimerId::StrikeCooldown, self.tuning.strike_cooldown);
                    report.events.push(ControllerEvent::StrikeEnded);
                    debug!("Strike ended, cooldown={:.2}", self.tuning.strike_cooldown);
                    return;
                }
            }
        }

        self.action = ActionState::Striking(phase);
    }

    fn fire_strike_probe(
        &mut self,
        body: &mut impl PhysicsBody,
        sensor: &impl ContactSensor,
        report: &mut TickReport,
    ) {
        let origin = body.position();
        let direction = self.facing.as_vec2();

        match sensor.cast_hit(origin, direction, self.tuning.strike_range) {
            Ok(Some(contact)) => {
                report.events.push(ControllerEvent::StrikeHit {
                    point: contact.point,
                    target: contact.entity,
                });
                report.effects.push(EffectRequest::Transient {
                    kind: EffectKind::StrikeImpact,
                    position: contact.point,
                    lifetime: STRIKE_IMPACT_LIFETIME,
                });
                debug!("Strike connected at {}", contact.point);
            }
            Ok(None) => {}
            Err(e) => warn!("Strike probe failed, counting as a miss: {}", e),
        }
    }

    fn update_wall(
        &mut self,
        input: &InputSnapshot,
        body: &mut impl PhysicsBody,
        report: &mut TickReport,
    ) {
        let caps = self.tuning.capabilities;
        let dashing = self.action.is_dashing();

        let next = match self.wall_touch {
            Some(touch) if !dashing => {
                let grab = caps.wall_grab
                    && input.grab_held
                    && !self.timers.is_active(TimerId::WallJumpLock);
                let pushing = input.move_axis.x * touch.side.sign() > AXIS_DEADZONE;
                if grab {
                    WallState::Grabbing(touch.side)
                } else if caps.wall_slide && pushing && !self.grounded {
                    WallState::Sliding(touch.side)
                } else {
                    WallState::None
                }
            }
            _ => WallState::None,
        };

        if next != self.wall {
            self.change_wall_state(next, body, report);
        }

        match self.wall {
            WallState::Grabbing(_) => {
                let climb = input.move_axis.y;
                let factor = if climb < 0.0 {
                    1.0
                } else {
                    self.tuning.grab_climb_factor
                };
                body.set_gravity_scale(0.0);
                body.set_velocity(Vec2::new(0.0, climb * self.tuning.slide_speed * factor));
            }
            WallState::Sliding(_) => {
                // Only slow a fall, never cancel a jump taken against the wall
                let velocity = body.velocity();
                if velocity.y < -self.tuning.slide_speed {
                    body.set_velocity(Vec2::new(velocity.x, -self.tuning.slide_speed));
                }
            }
            WallState::None => {}
        }
    }

    /// Leave any wall state, e.g. when jumping or dashing away.
    pub(crate) fn release_wall(&mut self, body: &mut impl PhysicsBody, report: &mut TickReport) {
        if self.wall != WallState::None {
            self.change_wall_state(WallState::None, body, report);
        }
    }

    fn change_wall_state(
        &mut self,
        next: WallState,
        body: &mut impl PhysicsBody,
        report: &mut TickReport,
    ) {
        let previous = self.wall;
        self.wall = next;
        let position = body.position();

        if previous.is_grabbing() && !next.is_grabbing() {
            body.set_gravity_scale(self.tuning.gravity_scale);
            report
                .events
                .push(ControllerEvent::WallGrabChanged { grabbing: false });
            report.effects.push(EffectRequest::Play {
                kind: EffectKind::WallRelease,
                position,
                orientation: Vec2::Y,
            });
        }
        if previous.is_sliding() && !next.is_sliding() {
            report
                .events
                .push(ControllerEvent::WallSlideChanged { sliding: false });
        }

        match next {
            WallState::Grabbing(side) | WallState::Sliding(side) => {
                if let Some(wall) = self.wall_touch.and_then(|touch| touch.body) {
                    body.attach_to(wall);
                }
                let (event, kind) = if next.is_grabbing() {
                    (
                        ControllerEvent::WallGrabChanged { grabbing: true },
                        EffectKind::WallGrab,
                    )
                } else {
                    (
                        ControllerEvent::WallSlideChanged { sliding: true },
                        EffectKind::WallSlide,
                    )
                };
                if previous.is_grabbing() != next.is_grabbing()
                    || previous.is_sliding() != next.is_sliding()
                {
                    report.events.push(event);
                    report.effects.push(EffectRequest::Play {
                        kind,
                        position: position + Vec2::new(side.sign() * 12.0, 0.0),
                        orientation: Vec2::new(-side.sign(), 0.0),
                    });
                }
                debug!("Wall state {:?} -> {:?}", previous, next);
            }
            WallState::None => {
                match self.ground_body {
                    Some(ground) if self.grounded => body.attach_to(ground),
                    _ => body.detach(),
                }
                debug!("Wall state {:?} -> None", previous);
            }
        }
    }
}
