//! Debug domain: state for movement dev tooling.

use bevy::prelude::*;

/// Resource tracking debug mode state
#[derive(Resource, Debug, Default)]
pub struct DebugState {
    /// Whether the controller readout is visible
    pub show_info: bool,
    /// Whether ground, wall and strike probes are drawn
    pub show_probes: bool,
    /// Message to display temporarily in the readout
    pub status_message: Option<(String, f32)>,
}

impl DebugState {
    /// Set a status message that will fade after a duration
    pub fn set_message(&mut self, message: impl Into<String>, duration: f32) {
        self.status_message = Some((message.into(), duration));
    }
}
