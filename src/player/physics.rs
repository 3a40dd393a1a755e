//! Player physics: walking, gravity, jumping, and ground detection.
//!
//! Turns the movement input queued by the character into horizontal
//! velocity capped at `max_walk_speed`, applies gravity and jumping, and
//! keeps the eye `PLAYER_HEIGHT` above the ground plane at `y = 0`.
//! Register `player_physics` as a system to run it each frame.

use crate::player::Player;
use bevy::prelude::*;

pub const GRAVITY: f32 = -32.0;
pub const JUMP_VELOCITY: f32 = 8.0;
/// Eye height above the feet.
pub const PLAYER_HEIGHT: f32 = 1.7;
const TERMINAL_VELOCITY: f32 = -50.0;

/// Step the player for one frame.
///
/// Extracted helper so systems and benchmarks exercise identical logic.
pub fn physics_step(tf: &mut Transform, player: &mut Player, dt: f32) {
    let wish = player.movement_input.clamp_length_max(1.0) * player.max_walk_speed;
    player.velocity.x = wish.x;
    player.velocity.z = wish.z;
    player.movement_input = Vec3::ZERO;

    player.velocity.y += GRAVITY * dt;
    if player.velocity.y < TERMINAL_VELOCITY {
        player.velocity.y = TERMINAL_VELOCITY;
    }

    if player.jump_held && player.on_ground {
        player.velocity.y = JUMP_VELOCITY;
        player.on_ground = false;
    }

    tf.translation += player.velocity * dt;

    let feet_y = tf.translation.y - PLAYER_HEIGHT;
    if feet_y <= 0.0 && player.velocity.y <= 0.0 {
        tf.translation.y = PLAYER_HEIGHT;
        player.velocity.y = 0.0;
        player.on_ground = true;
    } else {
        player.on_ground = false;
    }
}

#[allow(clippy::needless_pass_by_value)]
pub fn player_physics(time: Res<Time>, mut q: Query<(&mut Transform, &mut Player)>) {
    let Ok((mut tf, mut player)) = q.get_single_mut() else {
        return;
    };
    physics_step(&mut tf, &mut player, time.delta_seconds());
}
