//! Debug domain: movement dev tools (readout, probe gizmos, hotkeys).
//!
//! Only compiled with the `dev-tools` feature.
//!
//! - F1 / `: controller readout
//! - F2: probe gizmos
//! - Ctrl+R respawn, Ctrl+D refill dash, Ctrl+H test hit

mod state;
mod systems;
mod ui;

pub use state::DebugState;
pub use systems::probe_segments;
pub use ui::format_controller_info;

use bevy::prelude::*;

use crate::debug::systems::{
    draw_probes, handle_debug_hotkeys, toggle_debug_views, update_debug_info_overlay,
    update_status_message,
};

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .add_systems(
                Update,
                (
                    toggle_debug_views,
                    handle_debug_hotkeys,
                    update_status_message,
                    update_debug_info_overlay,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                draw_probes.run_if(|state: Res<DebugState>| state.show_probes),
            );
    }
}
