//! Validation for movement tuning values.

use crate::movement::MovementTuning;

/// Most strike probes a single barrage may fire.
pub const MAX_STRIKER_COUNT: u32 = 16;

/// A tuning value that cannot drive the controller.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: &'static str,
    pub value: f32,
    pub problem: &'static str,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "tuning field '{}' = {} {}",
            self.field, self.value, self.problem
        )
    }
}

impl std::error::Error for ValidationError {}

/// Helper macro for checking one field is a usable non-negative number
macro_rules! check_non_negative {
    ($errors:expr, $tuning:expr, $($field:ident),+ $(,)?) => {
        $(
            let value = $tuning.$field;
            if !value.is_finite() {
                $errors.push(ValidationError {
                    field: stringify!($field),
                    value,
                    problem: "is not a finite number",
                });
            } else if value < 0.0 {
                $errors.push(ValidationError {
                    field: stringify!($field),
                    value,
                    problem: "must not be negative",
                });
            }
        )+
    };
}

/// Validate every duration, speed and factor in the tuning.
/// Returns a list of validation errors, empty if the tuning is usable.
pub fn validate_tuning(tuning: &MovementTuning) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    // Locomotion
    check_non_negative!(
        errors,
        tuning,
        walk_speed,
        acceleration,
        deceleration,
        air_multiplier,
    );

    // Gravity and jumping
    check_non_negative!(
        errors,
        tuning,
        gravity,
        gravity_scale,
        fall_multiplier,
        max_fall_speed,
        jump_velocity_falloff,
        jump_force,
        jump_input_window,
        coyote_time,
    );

    // Dash
    check_non_negative!(
        errors,
        tuning,
        dash_force,
        dash_freeze_time,
        dash_attack_timeout,
        dash_end_timeout,
        dash_end_speed,
        dash_exit_max_rise,
    );

    // Strike
    check_non_negative!(
        errors,
        tuning,
        strike_freeze_time,
        strike_start_delay,
        strike_end_delay,
        strike_cooldown,
        strike_range,
        strike_rate,
    );

    // Walls and effects
    check_non_negative!(
        errors,
        tuning,
        wall_jump_lock,
        wall_jump_control,
        control_restore_rate,
        slide_speed,
        grab_climb_factor,
        min_impact_speed,
    );

    if tuning.striker_count > MAX_STRIKER_COUNT {
        errors.push(ValidationError {
            field: "striker_count",
            value: tuning.striker_count as f32,
            problem: "exceeds the barrage limit",
        });
    }

    // A zero rate would fire the whole barrage inside one tick
    if tuning.capabilities.barrage && tuning.striker_count > 1 && tuning.strike_rate <= 0.0 {
        errors.push(ValidationError {
            field: "strike_rate",
            value: tuning.strike_rate,
            problem: "must be positive when barrage is enabled",
        });
    }

    if tuning.wall_jump_control > 1.0 {
        errors.push(ValidationError {
            field: "wall_jump_control",
            value: tuning.wall_jump_control,
            problem: "must not exceed full control (1.0)",
        });
    }

    errors
}
