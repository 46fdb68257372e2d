//! Movement domain: ground, wall and strike probes.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{GameLayer, WallSide};

/// How far past the collider edge ground and walls still count as touching.
pub const PROBE_DISTANCE: f32 = 4.0;

/// A probe result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Body that was touched, if the backend knows it
    pub entity: Option<Entity>,
    pub point: Vec2,
    pub normal: Vec2,
}

/// A probe that could not be evaluated this tick.
#[derive(Debug, Clone, PartialEq)]
pub enum SensorError {
    NonFiniteOrigin(Vec2),
    InvalidDirection(Vec2),
}

impl std::fmt::Display for SensorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SensorError::NonFiniteOrigin(origin) => {
                write!(f, "probe origin {} is not finite", origin)
            }
            SensorError::InvalidDirection(direction) => {
                write!(f, "probe direction {} cannot be normalized", direction)
            }
        }
    }
}

impl std::error::Error for SensorError {}

/// World queries the controller runs each tick.
pub trait ContactSensor {
    fn sense_ground(&self, position: Vec2) -> Result<Option<Contact>, SensorError>;

    fn sense_wall(&self, position: Vec2, side: WallSide) -> Result<Option<Contact>, SensorError>;

    /// Strike probe: first hittable body along `direction` within `range`.
    fn cast_hit(
        &self,
        origin: Vec2,
        direction: Vec2,
        range: f32,
    ) -> Result<Option<Contact>, SensorError>;
}

/// Short rays cast from the edges of the player's box collider.
pub struct AvianSensor<'a, 'w, 's> {
    pub spatial_query: &'a SpatialQuery<'w, 's>,
    /// The probing body itself
    pub owner: Entity,
    pub half_extents: Vec2,
    /// How far past the collider edge a surface still counts as touching
    pub probe_distance: f32,
}

impl AvianSensor<'_, '_, '_> {
    fn cast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: GameLayer,
    ) -> Result<Option<Contact>, SensorError> {
        if !origin.is_finite() {
            return Err(SensorError::NonFiniteOrigin(origin));
        }
        let Ok(dir) = Dir2::new(direction) else {
            return Err(SensorError::InvalidDirection(direction));
        };

        let filter = SpatialQueryFilter::from_mask(mask).with_excluded_entities([self.owner]);
        let hit = self
            .spatial_query
            .cast_ray(origin, dir, max_distance, true, &filter);

        Ok(hit.map(|hit| Contact {
            entity: Some(hit.entity),
            point: origin + *dir * hit.distance,
            normal: hit.normal,
        }))
    }
}

impl ContactSensor for AvianSensor<'_, '_, '_> {
    fn sense_ground(&self, position: Vec2) -> Result<Option<Contact>, SensorError> {
        // Feet center first, then both corners so ledges still count
        let feet = position - Vec2::new(0.0, self.half_extents.y);
        let inset = self.half_extents.x * 0.9;
        for offset in [0.0, -inset, inset] {
            let origin = feet + Vec2::new(offset, 0.0);
            if let Some(contact) =
                self.cast(origin, Vec2::NEG_Y, self.probe_distance, GameLayer::Ground)?
            {
                return Ok(Some(contact));
            }
        }
        Ok(None)
    }

    fn sense_wall(&self, position: Vec2, side: WallSide) -> Result<Option<Contact>, SensorError> {
        self.cast(
            position,
            *side.direction(),
            self.half_extents.x + self.probe_distance,
            GameLayer::Wall,
        )
    }

    fn cast_hit(
        &self,
        origin: Vec2,
        direction: Vec2,
        range: f32,
    ) -> Result<Option<Contact>, SensorError> {
        self.cast(origin, direction, range, GameLayer::Hittable)
    }
}
