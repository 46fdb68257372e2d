//! Movement domain: components and physics layers for locomotion.

use avian2d::prelude::*;
use bevy::prelude::*;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Ground surfaces (floors, platforms)
    Ground,
    /// Wall surfaces
    Wall,
    /// Player character
    Player,
    /// Things a strike probe can connect with
    Hittable,
    /// Trigger volumes (refills, hazards, kill zones) - never block movement
    Sensor,
}

#[derive(Component, Debug)]
pub struct Player;

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Marker for wall colliders
#[derive(Component, Debug)]
pub struct Wall;

/// Marker for strike targets
#[derive(Component, Debug)]
pub struct Hittable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.sign(), 0.0)
    }
}

/// Which side of the body a wall is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum WallSide {
    Left,
    Right,
}

impl WallSide {
    /// Unit x direction pointing into the wall
    pub fn sign(self) -> f32 {
        match self {
            WallSide::Left => -1.0,
            WallSide::Right => 1.0,
        }
    }

    pub fn direction(self) -> Dir2 {
        match self {
            WallSide::Left => Dir2::NEG_X,
            WallSide::Right => Dir2::X,
        }
    }
}

/// Body the player is riding (ground platform or wall).
///
/// Stands in for scene-graph parenting: the carried entity follows the
/// target's frame-to-frame translation.
#[derive(Component, Debug, Default)]
pub struct Attachment {
    pub target: Option<Entity>,
    pub last_target_position: Option<Vec2>,
}

/// Where the player comes back after a kill volume.
#[derive(Component, Debug, Clone, Copy)]
pub struct SpawnPoint(pub Vec2);

/// Restores a used dash when touched.
#[derive(Component, Debug)]
pub struct DashRefill;

/// Damages (and interrupts) the player on contact.
#[derive(Component, Debug)]
pub struct Hazard {
    pub knockback: Vec2,
}

/// Instantly respawns the player.
#[derive(Component, Debug)]
pub struct KillZone;

/// Horizontal back-and-forth motion for moving platforms.
#[derive(Component, Debug)]
pub struct Patrol {
    pub origin: Vec2,
    pub extent: f32,
    pub speed: f32,
    pub phase: f32,
}
