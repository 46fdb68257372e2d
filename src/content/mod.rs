//! Content domain: data-driven movement tuning loaded from RON.

mod loader;
#[cfg(test)]
mod tests;
mod validation;

pub use loader::{ContentLoadError, load_tuning, parse_tuning};
pub use validation::{MAX_STRIKER_COUNT, ValidationError, validate_tuning};

use std::path::Path;

use bevy::prelude::*;

use crate::movement::{Capabilities, MovementTuning};

/// Where the tuning file lives relative to the working directory.
pub const TUNING_PATH: &str = "assets/data/movement.ron";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<MovementTuning>()
            .register_type::<Capabilities>()
            .add_systems(PreStartup, load_movement_tuning);
    }
}

/// Load tuning from disk, falling back to defaults on any problem.
pub(crate) fn load_movement_tuning(mut commands: Commands) {
    let tuning = resolve_tuning(load_tuning(Path::new(TUNING_PATH)));
    info!(
        "Movement tuning: walk_speed={}, jump_height={:.1}, dash_distance={:.1}",
        tuning.walk_speed,
        tuning.single_jump_height(),
        tuning.dash_distance()
    );
    commands.insert_resource(tuning);
}

/// Accept a loaded tuning only if it validates.
pub fn resolve_tuning(loaded: Result<MovementTuning, ContentLoadError>) -> MovementTuning {
    let tuning = match loaded {
        Ok(tuning) => tuning,
        Err(e) => {
            error!("{}; using default movement tuning", e);
            return MovementTuning::default();
        }
    };

    let errors = validate_tuning(&tuning);
    if errors.is_empty() {
        return tuning;
    }

    for e in &errors {
        error!("Invalid movement tuning: {}", e);
    }
    warn!(
        "{} invalid tuning value(s), using default movement tuning",
        errors.len()
    );
    MovementTuning::default()
}
