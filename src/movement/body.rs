//! Movement domain: the physics body seam the controller drives.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::Attachment;

/// Commands the controller may issue to the rigid body it steers.
///
/// Forces and impulses are mass-normalized (acceleration and velocity change),
/// so tuning values behave the same whatever the body weighs.
pub trait PhysicsBody {
    fn position(&self) -> Vec2;
    fn velocity(&self) -> Vec2;
    fn set_velocity(&mut self, velocity: Vec2);
    /// Accelerate over the current step.
    fn add_force(&mut self, force: Vec2);
    /// Instantaneous velocity change.
    fn add_impulse(&mut self, impulse: Vec2);
    fn set_gravity_scale(&mut self, scale: f32);
    fn attach_to(&mut self, body: Entity);
    fn detach(&mut self);
}

/// [`PhysicsBody`] over an avian2d dynamic body.
///
/// Forces are integrated straight into [`LinearVelocity`] for the current fixed
/// step, which matches how the rest of the game writes velocity directly.
pub struct AvianBody<'a> {
    pub position: Vec2,
    pub velocity: &'a mut LinearVelocity,
    pub gravity_scale: &'a mut GravityScale,
    pub attachment: &'a mut Attachment,
    pub dt: f32,
}

impl PhysicsBody for AvianBody<'_> {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn velocity(&self) -> Vec2 {
        self.velocity.0
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity.0 = velocity;
    }

    fn add_force(&mut self, force: Vec2) {
        self.velocity.0 += force * self.dt;
    }

    fn add_impulse(&mut self, impulse: Vec2) {
        self.velocity.0 += impulse;
    }

    fn set_gravity_scale(&mut self, scale: f32) {
        if self.gravity_scale.0 != scale {
            self.gravity_scale.0 = scale;
        }
    }

    fn attach_to(&mut self, body: Entity) {
        if self.attachment.target != Some(body) {
            self.attachment.target = Some(body);
            self.attachment.last_target_position = None;
        }
    }

    fn detach(&mut self) {
        self.attachment.target = None;
        self.attachment.last_target_position = None;
    }
}
