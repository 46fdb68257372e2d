//! Movement domain: platformer controller plugin wiring and public exports.

mod actions;
mod body;
mod bootstrap;
mod components;
mod controller;
mod dev;
mod events;
mod locomotion;
mod resources;
mod sensor;
mod systems;
mod timers;


pub use body::{AvianBody, PhysicsBody};
pub use bootstrap::{PLAYER_SIZE, PLAYER_SPAWN};
pub use components::{
    Attachment, DashRefill, Facing, GameLayer, Ground, Hazard, Hittable, KillZone, Patrol,
    Player, SpawnPoint, Wall, WallSide,
};
pub use controller::{
    ActionState, DashPhase, MotionState, MovementController, StrikePhase, TickReport, WallState,
    WallTouch,
};
pub use events::{
    ControllerEvent, DamageEvent, DashStarted, DashStopped, GroundedChanged, JumpExecuted,
    JumpKind, StrikeEnded, StrikeHit, StrikeStarted, WallGrabChanged, WallSlideChanged,
};
pub use resources::{Capabilities, InputSnapshot, MovementInput, MovementTuning};
pub use sensor::{AvianSensor, Contact, ContactSensor, PROBE_DISTANCE, SensorError};
pub use timers::{TIMER_EPSILON, TimerBank, TimerId};

use bevy::prelude::*;

use crate::core::HitstopSet;
use crate::movement::bootstrap::spawn_player;
use crate::movement::dev::spawn_test_room;
use crate::movement::systems::{
    apply_damage, drive_controllers, follow_attachments, handle_volumes, patrol_platforms,
    read_input, tint_player,
};

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementInput>()
            .add_message::<GroundedChanged>()
            .add_message::<JumpExecuted>()
            .add_message::<DashStarted>()
            .add_message::<DashStopped>()
            .add_message::<StrikeStarted>()
            .add_message::<StrikeHit>()
            .add_message::<StrikeEnded>()
            .add_message::<WallSlideChanged>()
            .add_message::<WallGrabChanged>()
            .add_message::<DamageEvent>()
            .add_systems(Startup, (spawn_test_room, spawn_player))
            .add_systems(Update, (read_input, tint_player))
            .add_systems(
                FixedUpdate,
                (
                    patrol_platforms,
                    follow_attachments,
                    handle_volumes,
                    apply_damage,
                    drive_controllers,
                )
                    .chain()
                    .before(HitstopSet),
            );
    }
}
