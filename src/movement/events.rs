//! Movement domain: controller events and the messages they become.

use bevy::ecs::message::Message;
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKind {
    Ground,
    /// Taken during the coyote window after walking off a ledge
    Coyote,
    Air,
    Wall,
}

/// What happened inside one controller tick, in the order it happened.
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerEvent {
    GroundedChanged { grounded: bool },
    JumpExecuted { kind: JumpKind },
    DashStarted { direction: Vec2 },
    DashStopped,
    StrikeStarted,
    StrikeHit { point: Vec2, target: Option<Entity> },
    StrikeEnded,
    WallSlideChanged { sliding: bool },
    WallGrabChanged { grabbing: bool },
}

/// Fired when a controller lands or leaves the ground
#[derive(Debug)]
pub struct GroundedChanged {
    pub entity: Entity,
    pub grounded: bool,
}

impl Message for GroundedChanged {}

#[derive(Debug)]
pub struct JumpExecuted {
    pub entity: Entity,
    pub kind: JumpKind,
}

impl Message for JumpExecuted {}

#[derive(Debug)]
pub struct DashStarted {
    pub entity: Entity,
    pub direction: Vec2,
}

impl Message for DashStarted {}

/// Fired when the locked part of a dash ends
#[derive(Debug)]
pub struct DashStopped {
    pub entity: Entity,
}

impl Message for DashStopped {}

#[derive(Debug)]
pub struct StrikeStarted {
    pub entity: Entity,
}

impl Message for StrikeStarted {}

/// Fired for every strike probe that connects
#[derive(Debug)]
pub struct StrikeHit {
    pub entity: Entity,
    pub point: Vec2,
    pub target: Option<Entity>,
}

impl Message for StrikeHit {}

#[derive(Debug)]
pub struct StrikeEnded {
    pub entity: Entity,
}

impl Message for StrikeEnded {}

#[derive(Debug)]
pub struct WallSlideChanged {
    pub entity: Entity,
    pub sliding: bool,
}

impl Message for WallSlideChanged {}

#[derive(Debug)]
pub struct WallGrabChanged {
    pub entity: Entity,
    pub grabbing: bool,
}

impl Message for WallGrabChanged {}

/// External hit on a controller. Cancels dash and strike.
#[derive(Debug)]
pub struct DamageEvent {
    pub target: Entity,
    pub knockback: Vec2,
}

impl Message for DamageEvent {}
