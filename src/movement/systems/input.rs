//! Movement domain: input sampling for locomotion.

use bevy::prelude::*;

use crate::movement::MovementInput;

pub(crate) fn read_input(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<MovementInput>) {
    // Horizontal axis
    let mut x = 0.0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        x += 1.0;
    }

    // Vertical axis (dash aim, wall climbing)
    let mut y = 0.0;
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        y += 1.0;
    }

    input.axis = Vec2::new(x, y);
    input.jump_held = keyboard.any_pressed([KeyCode::Space, KeyCode::KeyK]);
    input.dash_held = keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::KeyJ]);
    input.strike_held = keyboard.any_pressed([KeyCode::KeyL, KeyCode::KeyX]);
    input.grab_held = keyboard.any_pressed([KeyCode::KeyI, KeyCode::KeyC]);

    // Edges stay queued until the next fixed tick picks them up
    if keyboard.any_just_pressed([KeyCode::Space, KeyCode::KeyK]) {
        input.press_jump();
    }
    if keyboard.any_just_pressed([KeyCode::ShiftLeft, KeyCode::KeyJ]) {
        input.press_dash();
    }
    if keyboard.any_just_pressed([KeyCode::KeyL, KeyCode::KeyX]) {
        input.press_strike();
    }
}
