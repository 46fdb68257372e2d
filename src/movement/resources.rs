//! Movement domain: tuning and input resources.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Optional controller features. Each one replaces what used to be a separate
/// controller variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Reflect)]
#[serde(default)]
pub struct Capabilities {
    pub double_jump: bool,
    pub dash: bool,
    pub strike: bool,
    /// Strike repeats its probe while held, up to `striker_count` times
    pub barrage: bool,
    pub wall_jump: bool,
    pub wall_slide: bool,
    pub wall_grab: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            double_jump: true,
            dash: true,
            strike: true,
            barrage: false,
            wall_jump: true,
            wall_slide: true,
            wall_grab: true,
        }
    }
}

impl Capabilities {
    /// Plain run-and-jump controller with every optional action disabled.
    pub fn minimal() -> Self {
        Self {
            double_jump: false,
            dash: false,
            strike: false,
            barrage: false,
            wall_jump: false,
            wall_slide: false,
            wall_grab: false,
        }
    }
}

/// Immutable parameter set for a movement controller.
///
/// Forces and impulses derived from these values are mass-normalized: a force
/// is an acceleration and an impulse is a velocity change.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize, Reflect)]
#[serde(default)]
pub struct MovementTuning {
    // Walking
    pub walk_speed: f32,
    pub acceleration: f32,
    pub deceleration: f32,
    pub air_multiplier: f32,

    // Gravity
    /// World gravity magnitude the physics engine applies at scale 1
    pub gravity: f32,
    pub gravity_scale: f32,
    pub fall_multiplier: f32,
    pub max_fall_speed: f32,
    /// Vertical speed below which extra fall gravity kicks in
    pub jump_velocity_falloff: f32,

    // Jumping
    pub jump_force: f32,
    pub jump_input_window: f32,
    pub coyote_time: f32,

    // Dash
    pub dash_force: f32,
    pub dash_freeze_time: f32,
    pub dash_attack_timeout: f32,
    pub dash_end_timeout: f32,
    pub dash_end_speed: f32,
    /// Upward speed cap applied when the attack phase ends
    pub dash_exit_max_rise: f32,

    // Strike
    pub strike_freeze_time: f32,
    pub strike_start_delay: f32,
    pub strike_end_delay: f32,
    pub strike_cooldown: f32,
    pub strike_range: f32,
    pub striker_count: u32,
    pub strike_rate: f32,

    // Walls
    pub wall_jump_lock: f32,
    /// Horizontal control authority right after a wall jump (1.0 = full)
    pub wall_jump_control: f32,
    /// Authority regained per second after a wall jump
    pub control_restore_rate: f32,
    pub slide_speed: f32,
    pub grab_climb_factor: f32,

    // Landing
    pub min_impact_speed: f32,

    pub capabilities: Capabilities,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            walk_speed: 320.0,
            acceleration: 18.0,
            deceleration: 22.0,
            air_multiplier: 0.5,
            gravity: 1800.0,
            gravity_scale: 1.0,
            fall_multiplier: 1.2,
            max_fall_speed: 900.0,
            jump_velocity_falloff: 120.0,
            jump_force: 680.0,
            jump_input_window: 0.12,
            coyote_time: 0.12,
            dash_force: 900.0,
            dash_freeze_time: 0.05,
            dash_attack_timeout: 0.16,
            dash_end_timeout: 0.12,
            dash_end_speed: 300.0,
            dash_exit_max_rise: 150.0,
            strike_freeze_time: 0.04,
            strike_start_delay: 0.06,
            strike_end_delay: 0.12,
            strike_cooldown: 0.35,
            strike_range: 56.0,
            striker_count: 3,
            strike_rate: 0.1,
            wall_jump_lock: 0.25,
            wall_jump_control: 0.05,
            control_restore_rate: 2.5,
            slide_speed: 100.0,
            grab_climb_factor: 0.8,
            min_impact_speed: 700.0,
            capabilities: Capabilities::default(),
        }
    }
}

impl MovementTuning {
    /// Apex height of a single grounded jump: h = v² / (2g).
    pub fn single_jump_height(&self) -> f32 {
        let g = self.gravity * self.gravity_scale;
        if g <= 0.0 {
            return f32::INFINITY;
        }
        self.jump_force * self.jump_force / (2.0 * g)
    }

    /// Distance covered by the locked part of a dash.
    pub fn dash_distance(&self) -> f32 {
        self.dash_force * self.dash_attack_timeout
    }
}

/// Frozen per-tick view of player intent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    pub move_axis: Vec2,
    pub jump_held: bool,
    pub jump_pressed: bool,
    pub dash_held: bool,
    pub dash_pressed: bool,
    pub strike_held: bool,
    pub strike_pressed: bool,
    pub grab_held: bool,
}

impl InputSnapshot {
    /// Snapshot holding only a movement axis, clamped to [-1, 1] per component.
    pub fn moving(axis: Vec2) -> Self {
        Self {
            move_axis: axis.clamp(Vec2::NEG_ONE, Vec2::ONE),
            ..default()
        }
    }

    /// Edge flags merged from `other` on top of these levels.
    pub(crate) fn with_edges_from(mut self, other: &InputSnapshot) -> Self {
        self.jump_pressed |= other.jump_pressed;
        self.dash_pressed |= other.dash_pressed;
        self.strike_pressed |= other.strike_pressed;
        self
    }

    pub(crate) fn has_edges(&self) -> bool {
        self.jump_pressed || self.dash_pressed || self.strike_pressed
    }
}

/// Input gathered between fixed ticks.
///
/// Levels are overwritten every frame. Press edges accumulate until the next
/// fixed tick consumes them with [`MovementInput::take_snapshot`], so a press
/// is seen exactly once no matter how frames and fixed steps interleave.
#[derive(Resource, Debug, Default)]
pub struct MovementInput {
    pub axis: Vec2,
    pub jump_held: bool,
    pub dash_held: bool,
    pub strike_held: bool,
    pub grab_held: bool,
    pending_jump: bool,
    pending_dash: bool,
    pending_strike: bool,
}

impl MovementInput {
    pub fn press_jump(&mut self) {
        self.pending_jump = true;
    }

    pub fn press_dash(&mut self) {
        self.pending_dash = true;
    }

    pub fn press_strike(&mut self) {
        self.pending_strike = true;
    }

    /// Freeze the current levels and drain queued edges.
    pub fn take_snapshot(&mut self) -> InputSnapshot {
        InputSnapshot {
            move_axis: self.axis.clamp(Vec2::NEG_ONE, Vec2::ONE),
            jump_held: self.jump_held,
            jump_pressed: std::mem::take(&mut self.pending_jump),
            dash_held: self.dash_held,
            dash_pressed: std::mem::take(&mut self.pending_dash),
            strike_held: self.strike_held,
            strike_pressed: std::mem::take(&mut self.pending_strike),
            grab_held: self.grab_held,
        }
    }
}
