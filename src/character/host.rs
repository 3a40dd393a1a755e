//! The host contract consumed by the character controller.
//!
//! Everything the gameplay logic needs from the engine (transforms, the
//! movement component, ray queries and prop physics) goes through
//! `CharacterHost`. The Bevy implementation lives in `crate::player::movement`;
//! tests use the fake in `crate::character::test_support`.

use bevy::math::Vec3;
use std::fmt::Debug;

/// Result of a single nearest-hit trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceHit<O> {
    /// World-space impact point.
    pub point: Vec3,
    /// Distance from the trace start to `point`.
    pub distance: f32,
    /// The physics-capable object that was hit, or `None` for static geometry.
    pub object: Option<O>,
}

/// Engine-side services for a first-person character.
///
/// Angles passed to `add_yaw_input`/`add_pitch_input` are degrees. Positive
/// yaw turns right, positive pitch looks up.
pub trait CharacterHost {
    /// Non-owning handle to a physics object in the host's world.
    type Object: Copy + Eq + Debug;

    /// Current world position of the character.
    fn location(&self) -> Vec3;

    /// Current linear velocity of the character.
    fn velocity(&self) -> Vec3;

    /// Whether the character currently has a nonzero velocity.
    fn is_moving(&self) -> bool {
        self.velocity() != Vec3::ZERO
    }

    /// World position of the first-person viewpoint.
    fn view_location(&self) -> Vec3;

    /// Unit forward vector of the first-person viewpoint (includes pitch).
    fn view_forward(&self) -> Vec3;

    /// Unit forward vector of the character body (horizontal).
    fn actor_forward(&self) -> Vec3;

    /// Unit right vector of the character body (horizontal).
    fn actor_right(&self) -> Vec3;

    /// Max walk speed of the movement subsystem.
    fn max_walk_speed(&self) -> f32;

    fn set_max_walk_speed(&mut self, speed: f32);

    /// Nearest visibility hit along `start..end`, ignoring the character itself.
    fn line_trace(&self, start: Vec3, end: Vec3) -> Option<TraceHit<Self::Object>>;

    fn set_simulate_physics(&mut self, object: Self::Object, simulate: bool);

    /// Attach `object` to the grab anchor, snapping location and rotation
    /// to it while keeping the object's own scale.
    fn attach_to_anchor(&mut self, object: Self::Object);

    /// Detach `object` from whatever it is attached to, keeping its world transform.
    fn detach(&mut self, object: Self::Object);

    /// Apply an instantaneous impulse. With `velocity_change` the impulse is
    /// a velocity delta and ignores mass.
    fn add_impulse(&mut self, object: Self::Object, impulse: Vec3, velocity_change: bool);

    /// Queue movement along `direction` scaled by `scale` for this frame.
    fn add_movement_input(&mut self, direction: Vec3, scale: f32);

    fn add_yaw_input(&mut self, degrees: f32);

    fn add_pitch_input(&mut self, degrees: f32);

    /// Launch the character. Each override flag replaces that part of the
    /// current velocity instead of adding to it.
    fn launch(&mut self, velocity: Vec3, override_horizontal: bool, override_vertical: bool);

    fn jump(&mut self);

    fn stop_jumping(&mut self);
}
