//! Movement domain: the per-tick movement state machine.
//!
//! A [`MovementController`] owns everything that persists between fixed steps
//! (timers, one-shot flags, action phases). [`MovementController::tick`] runs
//! the fixed pipeline once:
//!
//! sensors -> timers -> jump -> horizontal -> gravity -> actions -> facing
//!
//! and talks to the outside world only through the [`PhysicsBody`] and
//! [`ContactSensor`] seams plus the returned [`TickReport`].

use bevy::prelude::*;

use crate::content::{ValidationError, validate_tuning};
use crate::core::TimeScaleRequest;
use crate::effects::{EffectKind, EffectRequest};
use crate::movement::body::PhysicsBody;
use crate::movement::events::ControllerEvent;
use crate::movement::sensor::{Contact, ContactSensor};
use crate::movement::timers::{TimerBank, TimerId};
use crate::movement::{Facing, InputSnapshot, MovementTuning, WallSide};

/// Stick deflection below this is treated as no horizontal intent.
pub const AXIS_DEADZONE: f32 = 0.1;
/// Target speeds below this count as "stop".
pub const SPEED_EPSILON: f32 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DashPhase {
    /// Velocity locked to `direction * dash_force`, gravity off
    Attack { remaining: f32, direction: Vec2 },
    /// Locomotion back on, dash still spent
    End { remaining: f32, direction: Vec2 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrikePhase {
    Windup { remaining: f32 },
    /// Repeating probes while strike stays held
    Barrage { next_in: f32, hits: u32 },
    Recovery { remaining: f32 },
}

/// Timed actions. Dashing and striking exclude each other.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ActionState {
    #[default]
    Idle,
    Dashing(DashPhase),
    Striking(StrikePhase),
}

impl ActionState {
    pub fn is_dashing(&self) -> bool {
        matches!(self, ActionState::Dashing(_))
    }

    pub fn is_striking(&self) -> bool {
        matches!(self, ActionState::Striking(_))
    }

    /// Dash attack phase and strikes take over from walking and jumping.
    pub fn suppresses_locomotion(&self) -> bool {
        matches!(
            self,
            ActionState::Dashing(DashPhase::Attack { .. }) | ActionState::Striking(_)
        )
    }

    pub fn suspends_gravity(&self) -> bool {
        matches!(self, ActionState::Dashing(DashPhase::Attack { .. }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WallState {
    #[default]
    None,
    Sliding(WallSide),
    Grabbing(WallSide),
}

impl WallState {
    pub fn is_grabbing(&self) -> bool {
        matches!(self, WallState::Grabbing(_))
    }

    pub fn is_sliding(&self) -> bool {
        matches!(self, WallState::Sliding(_))
    }
}

/// Coarse summary for animation and audio consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionState {
    Idle,
    Jumping,
    Dashing,
    Striking,
    WallSliding,
    WallGrabbing,
}

/// A wall currently within probe range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallTouch {
    pub side: WallSide,
    pub body: Option<Entity>,
}

/// Which timed action the current input starts, by priority dash > strike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Trigger {
    None,
    Dash,
    Strike,
}

/// Everything a tick asks of the environment besides body commands.
#[derive(Debug, Default)]
pub struct TickReport {
    pub events: Vec<ControllerEvent>,
    pub effects: Vec<EffectRequest>,
    pub time_scale: Option<TimeScaleRequest>,
}

#[derive(Component, Debug, Clone)]
pub struct MovementController {
    pub(crate) tuning: MovementTuning,
    pub(crate) timers: TimerBank,
    pub(crate) action: ActionState,
    pub(crate) wall: WallState,
    pub(crate) facing: Facing,
    pub(crate) grounded: bool,
    pub(crate) ground_body: Option<Entity>,
    pub(crate) wall_touch: Option<WallTouch>,
    pub(crate) has_jumped: bool,
    pub(crate) has_double_jumped: bool,
    pub(crate) has_dashed: bool,
    /// Scales horizontal force; dropped by wall jumps
    pub(crate) control_authority: f32,
    /// Gameplay seconds simulated so far (frozen during hitstop)
    pub(crate) clock: f32,
    pub(crate) last_grounded_at: Option<f32>,
    /// Vertical speed at the end of the previous tick, for landing impacts
    pub(crate) previous_vertical_speed: f32,
    /// Press edges that arrived during hitstop
    queued_edges: InputSnapshot,
    release_time_scale: bool,
    /// Stop event owed for an action cut short by `interrupt`
    pending_cancel: Option<ControllerEvent>,
}

impl MovementController {
    /// Build a controller, rejecting negative durations and magnitudes.
    pub fn new(tuning: MovementTuning) -> Result<Self, Vec<ValidationError>> {
        let errors = validate_tuning(&tuning);
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Self {
            tuning,
            timers: TimerBank::default(),
            action: ActionState::Idle,
            wall: WallState::None,
            facing: Facing::Right,
            grounded: false,
            ground_body: None,
            wall_touch: None,
            has_jumped: false,
            has_double_jumped: false,
            has_dashed: false,
            control_authority: 1.0,
            clock: 0.0,
            last_grounded_at: None,
            previous_vertical_speed: 0.0,
            queued_edges: InputSnapshot::default(),
            release_time_scale: false,
            pending_cancel: None,
        })
    }

    pub fn tuning(&self) -> &MovementTuning {
        &self.tuning
    }

    pub fn timers(&self) -> &TimerBank {
        &self.timers
    }

    pub fn action(&self) -> ActionState {
        self.action
    }

    pub fn wall_state(&self) -> WallState {
        self.wall
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn has_jumped(&self) -> bool {
        self.has_jumped
    }

    pub fn has_double_jumped(&self) -> bool {
        self.has_double_jumped
    }

    pub fn has_dashed(&self) -> bool {
        self.has_dashed
    }

    pub fn control_authority(&self) -> f32 {
        self.control_authority
    }

    pub fn last_grounded_at(&self) -> Option<f32> {
        self.last_grounded_at
    }

    pub fn is_frozen(&self) -> bool {
        self.timers.is_active(TimerId::Hitstop)
    }

    pub fn motion_state(&self) -> MotionState {
        match (self.action, self.wall) {
            (ActionState::Dashing(_), _) => MotionState::Dashing,
            (ActionState::Striking(_), _) => MotionState::Striking,
            (_, WallState::Grabbing(_)) => MotionState::WallGrabbing,
            (_, WallState::Sliding(_)) => MotionState::WallSliding,
            _ if !self.grounded && self.has_jumped => MotionState::Jumping,
            _ => MotionState::Idle,
        }
    }

    /// Damage interrupt. Cancels dash and strike and clears every timer that
    /// belongs to them, so the next tick starts from a consistent state.
    ///
    /// The next tick reports `DashStopped` or `StrikeEnded` for the cancelled
    /// action, so every start event still gets its matching end.
    pub fn interrupt(&mut self) {
        let was_frozen = self.is_frozen();
        if self.action != ActionState::Idle {
            debug!("Controller interrupted during {:?}", self.action);
        }

        self.pending_cancel = match self.action {
            ActionState::Dashing(DashPhase::Attack { .. }) => Some(ControllerEvent::DashStopped),
            ActionState::Striking(_) => Some(ControllerEvent::StrikeEnded),
            // End phase already reported DashStopped
            _ => self.pending_cancel.take(),
        };

        self.action = ActionState::Idle;
        self.has_dashed = false;
        self.timers.clear(TimerId::Hitstop);
        self.timers.clear(TimerId::StrikeCooldown);
        self.timers.clear(TimerId::WallJumpLock);
        self.queued_edges = InputSnapshot::default();
        if was_frozen {
            self.release_time_scale = true;
        }
    }

    /// Give back a spent dash without touching anything else.
    pub fn refill_dash(&mut self) {
        self.has_dashed = false;
    }

    /// Advance the controller by one fixed step.
    pub fn tick(
        &mut self,
        input: &InputSnapshot,
        body: &mut impl PhysicsBody,
        sensor: &impl ContactSensor,
        dt: f32,
    ) -> TickReport {
        let mut report = TickReport::default();
        if std::mem::take(&mut self.release_time_scale) {
            report.time_scale = Some(TimeScaleRequest::Release);
        }
        if let Some(event) = self.pending_cancel.take() {
            report.events.push(event);
        }

        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        // Freeze-frame: gameplay holds still, presses are kept for later
        if self.is_frozen() {
            self.timers.tick_one(TimerId::Hitstop, dt);
            self.queued_edges = self.queued_edges.with_edges_from(input);
            return report;
        }

        let input = if self.queued_edges.has_edges() {
            let merged = input.with_edges_from(&self.queued_edges);
            self.queued_edges = InputSnapshot::default();
            merged
        } else {
            *input
        };

        self.clock += dt;
        self.update_sensors(body, sensor, &mut report);
        self.update_timers(dt);

        let trigger = self.resolve_trigger(&input);
        self.evaluate_jump(&input, trigger, body, &mut report);
        self.apply_horizontal(&input, trigger, body);
        self.shape_gravity(&input, body, dt);
        self.evaluate_actions(&input, trigger, body, sensor, dt, &mut report);
        self.update_facing(&input);

        self.previous_vertical_speed = body.velocity().y;
        report
    }

    fn update_sensors(
        &mut self,
        body: &mut impl PhysicsBody,
        sensor: &impl ContactSensor,
        report: &mut TickReport,
    ) {
        let position = body.position();

        let ground = sensor.sense_ground(position).unwrap_or_else(|e| {
            warn!("Ground probe failed, treating as airborne: {}", e);
            None
        });

        match (self.grounded, ground) {
            (false, Some(contact)) => self.land(contact, body, report),
            (true, None) => self.leave_ground(body, report),
            _ => {}
        }
        self.grounded = ground.is_some();
        self.ground_body = ground.and_then(|c| c.entity);

        self.wall_touch = [WallSide::Left, WallSide::Right]
            .into_iter()
            .find_map(|side| match sensor.sense_wall(position, side) {
                Ok(Some(contact)) => Some(WallTouch {
                    side,
                    body: contact.entity,
                }),
                Ok(None) => None,
                Err(e) => {
                    warn!("Wall probe ({:?}) failed, treating as clear: {}", side, e);
                    None
                }
            });
    }

    fn land(&mut self, contact: Contact, body: &mut impl PhysicsBody, report: &mut TickReport) {
        self.has_jumped = false;
        self.has_double_jumped = false;
        self.has_dashed = false;
        self.control_authority = 1.0;
        self.timers.reset(TimerId::Coyote, self.tuning.coyote_time);

        if let Some(ground) = contact.entity
            && self.wall == WallState::None
        {
            body.attach_to(ground);
        }

        let impact_speed = -self.previous_vertical_speed;
        if impact_speed > self.tuning.min_impact_speed {
            report.effects.push(EffectRequest::Play {
                kind: EffectKind::Land,
                position: contact.point,
                orientation: contact.normal,
            });
        }

        report
            .events
            .push(ControllerEvent::GroundedChanged { grounded: true });
        debug!("Landed: impact_speed={:.1}", impact_speed);
    }

    fn leave_ground(&mut self, body: &mut impl PhysicsBody, report: &mut TickReport) {
        self.last_grounded_at = Some(self.clock);
        if self.wall == WallState::None {
            body.detach();
        }
        report
            .events
            .push(ControllerEvent::GroundedChanged { grounded: false });
        debug!(
            "Left ground: has_jumped={}, coyote={:.3}",
            self.has_jumped,
            self.timers.remaining(TimerId::Coyote)
        );
    }

    fn update_timers(&mut self, dt: f32) {
        self.timers.tick(dt);

        // Coyote time only starts counting once the ground is gone
        if self.grounded {
            self.timers.reset(TimerId::Coyote, self.tuning.coyote_time);
        }

        if self.control_authority < 1.0 {
            self.control_authority =
                (self.control_authority + self.tuning.control_restore_rate * dt).min(1.0);
        }
    }

    pub(crate) fn resolve_trigger(&self, input: &InputSnapshot) -> Trigger {
        if self.can_dash(input) {
            Trigger::Dash
        } else if self.can_strike(input) {
            Trigger::Strike
        } else {
            Trigger::None
        }
    }

    fn can_dash(&self, input: &InputSnapshot) -> bool {
        self.tuning.capabilities.dash
            && input.dash_pressed
            && !self.has_dashed
            && !self.action.suppresses_locomotion()
    }

    fn can_strike(&self, input: &InputSnapshot) -> bool {
        self.tuning.capabilities.strike
            && input.strike_pressed
            && !self.action.is_striking()
            && !self.action.is_dashing()
            && !self.has_dashed
            && !self.timers.is_active(TimerId::StrikeCooldown)
    }

    fn update_facing(&mut self, input: &InputSnapshot) {
        if self.action.is_dashing() || self.action.is_striking() {
            return;
        }

        let x = input.move_axis.x;
        if x > AXIS_DEADZONE {
            self.facing = Facing::Right;
        } else if x < -AXIS_DEADZONE {
            self.facing = Facing::Left;
        }
    }
}
