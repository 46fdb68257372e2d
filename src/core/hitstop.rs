//! Core domain: freeze-frames driven by controller time-scale requests.

use avian2d::prelude::*;
use bevy::ecs::message::{Message, MessageReader};
use bevy::prelude::*;

use crate::movement::TIMER_EPSILON;

/// Asks the environment to stop or resume the physics clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeScaleRequest {
    /// Hold physics for `duration` seconds of fixed-step time
    Freeze { duration: f32 },
    /// Resume immediately, e.g. after a damage interrupt
    Release,
}

impl Message for TimeScaleRequest {}

/// Remaining physics freeze.
///
/// Counted down in the same fixed steps, and with the same epsilon, as the
/// controller's own hitstop timer, so physics resumes on the step the
/// controller goes live again.
#[derive(Resource, Debug, Default)]
pub struct Hitstop {
    pub remaining: f32,
}

impl Hitstop {
    pub fn is_active(&self) -> bool {
        self.remaining > TIMER_EPSILON
    }

    /// Overlapping freezes extend to the longest one.
    pub fn apply(&mut self, request: TimeScaleRequest) {
        match request {
            TimeScaleRequest::Freeze { duration } => {
                self.remaining = self.remaining.max(duration.max(0.0));
            }
            TimeScaleRequest::Release => self.remaining = 0.0,
        }
    }

    /// Returns true on the step the freeze runs out.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.is_active() {
            return false;
        }
        self.remaining = (self.remaining - dt).max(0.0);
        !self.is_active()
    }
}

/// Runs in `FixedUpdate` after the controllers have ticked.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct HitstopSet;

pub(crate) fn apply_time_scale_requests(
    mut requests: MessageReader<TimeScaleRequest>,
    mut hitstop: ResMut<Hitstop>,
    time: Res<Time>,
    mut physics_time: ResMut<Time<Physics>>,
) {
    let mut changed = false;
    for request in requests.read() {
        hitstop.apply(*request);
        changed = true;
    }

    if !changed && hitstop.tick(time.delta_secs()) {
        debug!("Hitstop over, resuming physics");
        physics_time.unpause();
        return;
    }

    if !changed {
        return;
    }

    if hitstop.is_active() && !physics_time.is_paused() {
        debug!("Hitstop: freezing physics for {:.3}s", hitstop.remaining);
        physics_time.pause();
    } else if !hitstop.is_active() && physics_time.is_paused() {
        debug!("Hitstop released early, resuming physics");
        physics_time.unpause();
    }
}
