//! Movement domain: system modules for locomotion updates.

pub(crate) mod collisions;
pub(crate) mod input;
pub(crate) mod movement;

pub(crate) use collisions::{follow_attachments, handle_volumes, patrol_platforms};
pub(crate) use input::read_input;
pub(crate) use movement::{apply_damage, drive_controllers, tint_player};
