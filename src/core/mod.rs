//! Core domain: camera, world gravity and hitstop.

mod hitstop;

pub use hitstop::{Hitstop, HitstopSet, TimeScaleRequest};

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::core::hitstop::apply_time_scale_requests;
use crate::movement::MovementTuning;

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Hitstop>()
            .add_message::<TimeScaleRequest>()
            .add_systems(Startup, (setup_camera, setup_gravity))
            .add_systems(FixedUpdate, apply_time_scale_requests.in_set(HitstopSet));
    }
}

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// World gravity comes from tuning; the controller only scales it.
pub(crate) fn setup_gravity(mut commands: Commands, tuning: Res<MovementTuning>) {
    commands.insert_resource(Gravity(Vec2::NEG_Y * tuning.gravity));
}
