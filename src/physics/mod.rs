//! Minimal rigid bodies for grabbable props.
//!
//! Props are axis-aligned boxes (`Collider`) with an optional `PhysicsBody`.
//! A collider without a body is static geometry: it blocks traces but can't
//! be grabbed. Simulated bodies fall under gravity and bounce on the ground
//! plane at `y = 0`; bodies that are not simulating, or are attached to a
//! grab anchor, are left where they are.

use crate::character::TraceHit;
use crate::player::{GrabAnchor, Player};
use bevy::prelude::*;

pub const GRAVITY: f32 = -9.81;
/// Fraction of vertical speed kept when a prop bounces off the ground.
pub const RESTITUTION: f32 = 0.3;
/// Fraction of horizontal speed kept per ground contact.
pub const GROUND_FRICTION: f32 = 0.9;

/// Dynamic state of a prop.
#[derive(Component, Debug, Clone)]
pub struct PhysicsBody {
    pub velocity: Vec3,
    pub mass: f32,
    /// Whether gravity and velocity are integrated for this body.
    pub simulate: bool,
    /// Whether the body is carried at a grab anchor.
    pub attached: bool,
}

impl PhysicsBody {
    #[must_use]
    pub fn new(mass: f32) -> Self {
        Self {
            velocity: Vec3::ZERO,
            mass,
            simulate: true,
            attached: false,
        }
    }

    /// Apply an impulse. A `velocity_change` impulse ignores mass.
    pub fn apply_impulse(&mut self, impulse: Vec3, velocity_change: bool) {
        if velocity_change || self.mass <= 0.0 {
            self.velocity += impulse;
        } else {
            self.velocity += impulse / self.mass;
        }
    }
}

/// Axis-aligned box collider centred on the entity's translation.
#[derive(Component, Debug, Clone, Copy)]
pub struct Collider {
    pub half_extents: Vec3,
}

/// Distance along `dir` (unit) from `origin` to the box, if it is hit
/// within `max_distance`. A ray starting inside the box hits at 0.
#[must_use]
pub fn ray_aabb(origin: Vec3, dir: Vec3, max_distance: f32, center: Vec3, half_extents: Vec3) -> Option<f32> {
    let min = center - half_extents;
    let max = center + half_extents;
    let mut t_near = 0.0_f32;
    let mut t_far = max_distance;

    for axis in 0..3 {
        let o = origin[axis];
        let d = dir[axis];
        if d.abs() < f32::EPSILON {
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }
        let inv = 1.0 / d;
        let (t0, t1) = {
            let a = (min[axis] - o) * inv;
            let b = (max[axis] - o) * inv;
            if a <= b { (a, b) } else { (b, a) }
        };
        t_near = t_near.max(t0);
        t_far = t_far.min(t1);
        if t_near > t_far {
            return None;
        }
    }

    Some(t_near)
}

/// Nearest hit along `start..end` over `colliders`.
///
/// Each item is `(entity, center, half_extents, has_body)`; hits on items
/// without a body report `object: None`.
pub fn raycast<I>(start: Vec3, end: Vec3, colliders: I) -> Option<TraceHit<Entity>>
where
    I: IntoIterator<Item = (Entity, Vec3, Vec3, bool)>,
{
    let span = end - start;
    let length = span.length();
    let dir = span.normalize_or_zero();
    if dir == Vec3::ZERO {
        return None;
    }

    colliders
        .into_iter()
        .filter_map(|(entity, center, half, has_body)| {
            ray_aabb(start, dir, length, center, half).map(|t| (t, entity, has_body))
        })
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(distance, entity, has_body)| TraceHit {
            point: start + dir * distance,
            distance,
            object: has_body.then_some(entity),
        })
}

/// Integrate one simulated body for `dt` seconds against the ground plane.
pub fn step_body(tf: &mut Transform, body: &mut PhysicsBody, half_extents: Vec3, dt: f32) {
    if !body.simulate || body.attached {
        return;
    }

    body.velocity.y += GRAVITY * dt;
    tf.translation += body.velocity * dt;

    let rest_y = half_extents.y;
    if tf.translation.y < rest_y {
        tf.translation.y = rest_y;
        if body.velocity.y < 0.0 {
            body.velocity.y = -body.velocity.y * RESTITUTION;
            if body.velocity.y < 0.5 {
                body.velocity.y = 0.0;
            }
        }
        body.velocity.x *= GROUND_FRICTION;
        body.velocity.z *= GROUND_FRICTION;
    }
}

/// Step every simulated prop.
#[allow(clippy::needless_pass_by_value)]
pub fn integrate_bodies(time: Res<Time>, mut bodies: Query<(&mut Transform, &mut PhysicsBody, &Collider)>) {
    let dt = time.delta_seconds();
    for (mut tf, mut body, collider) in &mut bodies {
        step_body(&mut tf, &mut body, collider.half_extents, dt);
    }
}

/// Keep attached props snapped to the player's grab anchor.
#[allow(clippy::needless_pass_by_value)]
pub fn follow_grab_anchor(
    players: Query<(&Transform, &GrabAnchor), With<Player>>,
    mut bodies: Query<(&mut Transform, &PhysicsBody), Without<Player>>,
) {
    let Ok((view, anchor)) = players.get_single() else {
        return;
    };
    let (anchor_position, anchor_rotation) = anchor.world_pose(view);

    for (mut tf, body) in &mut bodies {
        if body.attached {
            tf.translation = anchor_position;
            tf.rotation = anchor_rotation;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_hits_box_in_front() {
        let t = ray_aabb(Vec3::ZERO, Vec3::NEG_Z, 100.0, Vec3::new(0.0, 0.0, -10.0), Vec3::splat(1.0));
        assert_eq!(t, Some(9.0));
    }

    #[test]
    fn ray_misses_box_behind_or_beyond_range() {
        let behind = ray_aabb(Vec3::ZERO, Vec3::NEG_Z, 100.0, Vec3::new(0.0, 0.0, 10.0), Vec3::splat(1.0));
        let far = ray_aabb(Vec3::ZERO, Vec3::NEG_Z, 5.0, Vec3::new(0.0, 0.0, -10.0), Vec3::splat(1.0));
        let beside = ray_aabb(Vec3::ZERO, Vec3::NEG_Z, 100.0, Vec3::new(3.0, 0.0, -10.0), Vec3::splat(1.0));
        assert_eq!(behind, None);
        assert_eq!(far, None);
        assert_eq!(beside, None);
    }

    #[test]
    fn raycast_reports_nearest_and_static_hits_have_no_object() {
        let wall = Entity::from_raw(1);
        let prop = Entity::from_raw(2);
        let colliders = [
            (prop, Vec3::new(0.0, 0.0, -20.0), Vec3::splat(1.0), true),
            (wall, Vec3::new(0.0, 0.0, -5.0), Vec3::splat(1.0), false),
        ];

        let hit = raycast(Vec3::ZERO, Vec3::new(0.0, 0.0, -40.0), colliders).unwrap();

        assert_eq!(hit.distance, 4.0);
        assert_eq!(hit.object, None);
        assert_eq!(hit.point, Vec3::new(0.0, 0.0, -4.0));
    }

    #[test]
    fn raycast_returns_prop_entity() {
        let prop = Entity::from_raw(7);
        let colliders = [(prop, Vec3::new(0.0, 0.0, -20.0), Vec3::splat(1.0), true)];

        let hit = raycast(Vec3::ZERO, Vec3::new(0.0, 0.0, -40.0), colliders).unwrap();

        assert_eq!(hit.object, Some(prop));
        assert!(raycast(Vec3::ZERO, Vec3::new(0.0, 0.0, -10.0), colliders).is_none());
    }

    #[test]
    fn frozen_and_attached_bodies_do_not_move() {
        let mut tf = Transform::from_xyz(0.0, 5.0, 0.0);
        let mut body = PhysicsBody::new(1.0);
        body.velocity = Vec3::X;
        body.simulate = false;
        step_body(&mut tf, &mut body, Vec3::splat(0.5), 0.1);
        assert_eq!(tf.translation, Vec3::new(0.0, 5.0, 0.0));

        body.simulate = true;
        body.attached = true;
        step_body(&mut tf, &mut body, Vec3::splat(0.5), 0.1);
        assert_eq!(tf.translation, Vec3::new(0.0, 5.0, 0.0));
    }

    #[test]
    fn simulated_body_falls_and_rests_on_ground() {
        let mut tf = Transform::from_xyz(0.0, 2.0, 0.0);
        let mut body = PhysicsBody::new(1.0);
        for _ in 0..600 {
            step_body(&mut tf, &mut body, Vec3::splat(0.5), 1.0 / 60.0);
        }
        assert!((tf.translation.y - 0.5).abs() < 0.05);
        assert!(body.velocity.y.abs() < 0.5);
    }

    #[test]
    fn velocity_change_impulse_ignores_mass() {
        let mut body = PhysicsBody::new(4.0);
        body.apply_impulse(Vec3::new(8.0, 0.0, 0.0), true);
        assert_eq!(body.velocity, Vec3::new(8.0, 0.0, 0.0));
        body.apply_impulse(Vec3::new(8.0, 0.0, 0.0), false);
        assert_eq!(body.velocity, Vec3::new(10.0, 0.0, 0.0));
    }
}
