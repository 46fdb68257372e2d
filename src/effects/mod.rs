//! Effects domain: placeholder particle bursts for movement feedback.


use bevy::ecs::message::{Message, MessageReader};
use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    Jump,
    Land,
    DashBurst,
    StrikeSwing,
    StrikeImpact,
    WallSlide,
    WallGrab,
    WallRelease,
    Death,
}

/// Visual feedback requested by gameplay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EffectRequest {
    /// Fire-and-forget burst oriented along `orientation`
    Play {
        kind: EffectKind,
        position: Vec2,
        orientation: Vec2,
    },
    /// Single marker that stays for `lifetime` seconds
    Transient {
        kind: EffectKind,
        position: Vec2,
        lifetime: f32,
    },
}

impl Message for EffectRequest {}

/// How a burst looks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectStyle {
    pub color: Color,
    pub particles: u32,
    pub speed: f32,
    /// Half-angle of the spray cone in radians
    pub spread: f32,
    pub lifetime: f32,
    pub size: f32,
}

pub fn effect_style(kind: EffectKind) -> EffectStyle {
    match kind {
        EffectKind::Jump => EffectStyle {
            color: Color::srgb(0.85, 0.85, 0.8),
            particles: 6,
            speed: 120.0,
            spread: 0.9,
            lifetime: 0.25,
            size: 4.0,
        },
        EffectKind::Land => EffectStyle {
            color: Color::srgb(0.7, 0.65, 0.55),
            particles: 10,
            speed: 160.0,
            spread: 1.4,
            lifetime: 0.3,
            size: 5.0,
        },
        EffectKind::DashBurst => EffectStyle {
            color: Color::srgb(0.4, 0.8, 1.0),
            particles: 12,
            speed: 220.0,
            spread: 0.4,
            lifetime: 0.2,
            size: 4.0,
        },
        EffectKind::StrikeSwing => EffectStyle {
            color: Color::srgb(1.0, 0.95, 0.7),
            particles: 5,
            speed: 180.0,
            spread: 0.6,
            lifetime: 0.12,
            size: 3.0,
        },
        EffectKind::StrikeImpact => EffectStyle {
            color: Color::srgb(1.0, 0.6, 0.3),
            particles: 1,
            speed: 0.0,
            spread: 0.0,
            lifetime: 0.2,
            size: 14.0,
        },
        EffectKind::WallSlide => EffectStyle {
            color: Color::srgb(0.6, 0.6, 0.7),
            particles: 4,
            speed: 60.0,
            spread: 0.5,
            lifetime: 0.2,
            size: 3.0,
        },
        EffectKind::WallGrab => EffectStyle {
            color: Color::srgb(0.75, 0.75, 0.9),
            particles: 4,
            speed: 40.0,
            spread: 0.8,
            lifetime: 0.15,
            size: 3.0,
        },
        EffectKind::WallRelease => EffectStyle {
            color: Color::srgb(0.75, 0.75, 0.9),
            particles: 3,
            speed: 80.0,
            spread: 0.8,
            lifetime: 0.15,
            size: 3.0,
        },
        EffectKind::Death => EffectStyle {
            color: Color::srgb(0.9, 0.2, 0.2),
            particles: 16,
            speed: 260.0,
            spread: std::f32::consts::PI,
            lifetime: 0.5,
            size: 6.0,
        },
    }
}

/// Deterministic jitter source so effect spray is reproducible per seed.
#[derive(Resource, Debug)]
pub struct EffectRng(pub ChaCha8Rng);

impl Default for EffectRng {
    fn default() -> Self {
        Self(ChaCha8Rng::seed_from_u64(0x5eed))
    }
}

/// Seconds until an effect entity despawns.
#[derive(Component, Debug)]
pub struct EffectLifetime(pub f32);

/// Constant velocity of a particle.
#[derive(Component, Debug)]
pub struct Drift(pub Vec2);

/// Jittered particle velocities for a burst.
pub fn burst_velocities(style: &EffectStyle, orientation: Vec2, rng: &mut impl Rng) -> Vec<Vec2> {
    let base = orientation.try_normalize().unwrap_or(Vec2::Y);
    (0..style.particles)
        .map(|_| {
            let angle = if style.spread > 0.0 {
                rng.random_range(-style.spread..=style.spread)
            } else {
                0.0
            };
            let speed = if style.speed > 0.0 {
                style.speed * rng.random_range(0.6..=1.0)
            } else {
                0.0
            };
            Vec2::from_angle(angle).rotate(base) * speed
        })
        .collect()
}

pub struct EffectsPlugin;

impl Plugin for EffectsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EffectRng>()
            .add_message::<EffectRequest>()
            .add_systems(
                Update,
                (spawn_effects, drift_particles, expire_effects).chain(),
            );
    }
}

pub(crate) fn spawn_effects(
    mut commands: Commands,
    mut requests: MessageReader<EffectRequest>,
    mut rng: ResMut<EffectRng>,
) {
    for request in requests.read() {
        match *request {
            EffectRequest::Play {
                kind,
                position,
                orientation,
            } => {
                let style = effect_style(kind);
                for velocity in burst_velocities(&style, orientation, &mut rng.0) {
                    commands.spawn((
                        EffectLifetime(style.lifetime),
                        Drift(velocity),
                        Sprite {
                            color: style.color,
                            custom_size: Some(Vec2::splat(style.size)),
                            ..default()
                        },
                        Transform::from_xyz(position.x, position.y, 5.0),
                    ));
                }
            }
            EffectRequest::Transient {
                kind,
                position,
                lifetime,
            } => {
                let style = effect_style(kind);
                commands.spawn((
                    EffectLifetime(lifetime),
                    Sprite {
                        color: style.color,
                        custom_size: Some(Vec2::splat(style.size)),
                        ..default()
                    },
                    Transform::from_xyz(position.x, position.y, 5.0),
                ));
            }
        }
    }
}

pub(crate) fn drift_particles(time: Res<Time>, mut query: Query<(&Drift, &mut Transform)>) {
    let dt = time.delta_secs();
    for (drift, mut transform) in &mut query {
        transform.translation += (drift.0 * dt).extend(0.0);
    }
}

pub(crate) fn expire_effects(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut EffectLifetime)>,
) {
    let dt = time.delta_secs();
    for (entity, mut lifetime) in &mut query {
        lifetime.0 -= dt;
        if lifetime.0 <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}
