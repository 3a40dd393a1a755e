//! Debug gizmos for the grab and dash mechanics (F2 by default).
//!
//! Draws the grab trace out to the pickup radius, marks what it would hit,
//! and draws the grab anchor coloured by dash state: yellow while dashing,
//! fading from red to green as the cooldown runs out.
use crate::physics::{raycast, Collider, PhysicsBody};
use crate::player::{CharacterController, GrabAnchor, Player};
use crate::settings::Settings;
use bevy::prelude::*;
use std::time::Duration;

/// Whether the debug gizmos are drawn.
#[derive(Resource, Default)]
pub struct DebugGizmosVisible(pub bool);

#[allow(clippy::needless_pass_by_value)]
pub fn toggle_debug_gizmos(
    mut visible: ResMut<DebugGizmosVisible>,
    input: Res<ButtonInput<KeyCode>>,
    settings: Res<Settings>,
) {
    if input.just_pressed(settings.key_for("toggle_debug", KeyCode::F2)) {
        visible.0 = !visible.0;
    }
}

/// Yellow while dashing, otherwise red fading to green with the cooldown.
fn dash_color(active: bool, remaining: Duration, cooldown: Duration) -> Color {
    if active {
        return Color::srgb(1.0, 1.0, 0.0);
    }
    let left = if cooldown.is_zero() {
        0.0
    } else {
        (remaining.as_secs_f32() / cooldown.as_secs_f32()).clamp(0.0, 1.0)
    };
    Color::srgb(left, 1.0 - left, 0.0)
}

#[allow(clippy::needless_pass_by_value)]
pub fn draw_debug_gizmos(
    visible: Res<DebugGizmosVisible>,
    time: Res<Time>,
    mut gizmos: Gizmos,
    players: Query<(&Transform, &GrabAnchor, &CharacterController), With<Player>>,
    props: Query<(Entity, &Transform, Option<&PhysicsBody>, &Collider), Without<Player>>,
) {
    if !visible.0 {
        return;
    }
    let Ok((view, anchor, controller)) = players.get_single() else {
        return;
    };
    let character = &controller.character;

    let start = view.translation;
    let end = start + view.forward().as_vec3() * character.tunables().grab.pickup_radius;
    let hit = raycast(
        start,
        end,
        props
            .iter()
            .map(|(entity, tf, body, collider)| (entity, tf.translation, collider.half_extents, body.is_some())),
    );

    match hit {
        Some(hit) => {
            let color = if hit.object.is_some() {
                Color::srgb(0.0, 1.0, 0.0)
            } else {
                Color::srgb(0.6, 0.6, 0.6)
            };
            gizmos.line(start, hit.point, color);
            gizmos.sphere(hit.point, Quat::IDENTITY, 0.1, color);
        }
        None => gizmos.line(start, end, Color::srgb(0.3, 0.3, 1.0)),
    }

    let anchor_color = dash_color(
        character.dash().is_active(),
        character.dash().cooldown_remaining(time.elapsed()),
        character.tunables().dash.cooldown,
    );
    let (anchor_position, anchor_rotation) = anchor.world_pose(view);
    gizmos.sphere(anchor_position, anchor_rotation, 0.15, anchor_color);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dash_color_tracks_cooldown() {
        let cooldown = Duration::from_secs(4);
        assert_eq!(dash_color(true, Duration::ZERO, cooldown), Color::srgb(1.0, 1.0, 0.0));
        assert_eq!(dash_color(false, cooldown, cooldown), Color::srgb(1.0, 0.0, 0.0));
        assert_eq!(dash_color(false, Duration::from_secs(1), cooldown), Color::srgb(0.25, 0.75, 0.0));
        assert_eq!(dash_color(false, Duration::ZERO, cooldown), Color::srgb(0.0, 1.0, 0.0));
    }
}
