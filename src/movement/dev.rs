//! Movement domain: test room for exercising every movement feature.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{
    DashRefill, GameLayer, Ground, Hazard, Hittable, KillZone, Patrol, Wall,
};

pub(crate) fn spawn_test_room(mut commands: Commands) {
    let wall_color = Color::srgb(0.3, 0.3, 0.4);
    let ground_color = Color::srgb(0.4, 0.5, 0.4);
    let platform_color = Color::srgb(0.5, 0.4, 0.3);

    let ground_layers = CollisionLayers::new(GameLayer::Ground, [GameLayer::Player]);
    let wall_layers = CollisionLayers::new(GameLayer::Wall, [GameLayer::Player]);
    let sensor_layers = CollisionLayers::new(GameLayer::Sensor, [GameLayer::Player]);

    // Ground, with a gap on the right over the kill zone
    commands.spawn((
        Ground,
        Sprite {
            color: ground_color,
            custom_size: Some(Vec2::new(600.0, 40.0)),
            ..default()
        },
        Transform::from_xyz(-100.0, -200.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(600.0, 40.0),
        ground_layers,
    ));

    commands.spawn((
        Ground,
        Sprite {
            color: ground_color,
            custom_size: Some(Vec2::new(80.0, 40.0)),
            ..default()
        },
        Transform::from_xyz(360.0, -200.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(80.0, 40.0),
        ground_layers,
    ));

    // Left wall
    commands.spawn((
        Wall,
        Sprite {
            color: wall_color,
            custom_size: Some(Vec2::new(40.0, 500.0)),
            ..default()
        },
        Transform::from_xyz(-420.0, 50.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(40.0, 500.0),
        wall_layers,
    ));

    // Right wall
    commands.spawn((
        Wall,
        Sprite {
            color: wall_color,
            custom_size: Some(Vec2::new(40.0, 500.0)),
            ..default()
        },
        Transform::from_xyz(420.0, 50.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(40.0, 500.0),
        wall_layers,
    ));

    // Platform 1 - left side
    commands.spawn((
        Ground,
        Sprite {
            color: platform_color,
            custom_size: Some(Vec2::new(150.0, 20.0)),
            ..default()
        },
        Transform::from_xyz(-250.0, -50.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(150.0, 20.0),
        ground_layers,
    ));

    // Platform 2 - moving, carries the player along
    commands.spawn((
        Ground,
        Patrol {
            origin: Vec2::new(150.0, 40.0),
            extent: 120.0,
            speed: 0.8,
            phase: 0.0,
        },
        Sprite {
            color: platform_color,
            custom_size: Some(Vec2::new(120.0, 20.0)),
            ..default()
        },
        Transform::from_xyz(150.0, 40.0, 0.0),
        RigidBody::Kinematic,
        Collider::rectangle(120.0, 20.0),
        ground_layers,
    ));

    // Platform 3 - center, highest
    commands.spawn((
        Ground,
        Sprite {
            color: platform_color,
            custom_size: Some(Vec2::new(120.0, 20.0)),
            ..default()
        },
        Transform::from_xyz(0.0, 150.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(120.0, 20.0),
        ground_layers,
    ));

    // Small pillar for wall jumping practice
    commands.spawn((
        Wall,
        Sprite {
            color: wall_color,
            custom_size: Some(Vec2::new(30.0, 200.0)),
            ..default()
        },
        Transform::from_xyz(-100.0, -80.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(30.0, 200.0),
        wall_layers,
    ));

    // Strike dummies
    for x in [-320.0, 60.0] {
        commands.spawn((
            Hittable,
            Sprite {
                color: Color::srgb(0.8, 0.5, 0.5),
                custom_size: Some(Vec2::new(20.0, 40.0)),
                ..default()
            },
            Transform::from_xyz(x, -160.0, -1.0),
            RigidBody::Static,
            Collider::rectangle(20.0, 40.0),
            CollisionLayers::new(GameLayer::Hittable, LayerMask::NONE),
        ));
    }

    // Dash refill crystal above the gap
    commands.spawn((
        DashRefill,
        Sprite {
            color: Color::srgb(0.4, 0.9, 1.0),
            custom_size: Some(Vec2::new(16.0, 16.0)),
            ..default()
        },
        Transform::from_xyz(270.0, -80.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(16.0, 16.0),
        Sensor,
        sensor_layers,
    ));

    // Spikes on the floor
    commands.spawn((
        Hazard {
            knockback: Vec2::new(350.0, 450.0),
        },
        Sprite {
            color: Color::srgb(0.9, 0.3, 0.2),
            custom_size: Some(Vec2::new(60.0, 12.0)),
            ..default()
        },
        Transform::from_xyz(-200.0, -174.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(60.0, 12.0),
        Sensor,
        sensor_layers,
    ));

    // Kill zone below the gap
    commands.spawn((
        KillZone,
        Transform::from_xyz(0.0, -400.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(1200.0, 40.0),
        Sensor,
        sensor_layers,
    ));
}
