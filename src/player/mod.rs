//! Player components and systems (camera, movement, physics).
//!
//! The player is a single camera entity carrying `Player`, `PlayerLook`,
//! `GrabAnchor` and `CharacterController`. The gameplay itself lives in
//! `crate::character`; this module is the Bevy side of the host contract.
//!
//! # Example:
//!
//! ```no_run
//! use bevy::prelude::*;
//! use streamline::player::{spawn_player, PlayerSet};
//! use streamline::settings::Settings;
//!
//! fn setup(mut commands: Commands, settings: Res<Settings>) {
//!     spawn_player(&mut commands, &settings, Vec3::new(0.0, 1.7, 5.0));
//! }
//!
//! let mut app = App::new();
//! app.insert_resource(Settings::default());
//! app.add_systems(Startup, setup);
//! app.configure_sets(Update, (PlayerSet::Input, PlayerSet::Physics).chain());
//! ```
pub mod camera;
pub mod movement;
pub mod physics;

use crate::character::{FirstPersonCharacter, Tunables};
use crate::settings::Settings;
use bevy::prelude::*;

pub use camera::*;
pub use movement::*;
pub use physics::*;

/// Walk speed of a freshly spawned player, in metres per second.
pub const PLAYER_WALK_SPEED: f32 = 6.0;

/// System ordering for the player: input and gameplay first, then physics.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum PlayerSet {
    Input,
    Physics,
}

/// Component tracking player state used by movement and physics systems.
#[derive(Component, Debug, Clone)]
pub struct Player {
    /// Current player velocity in world units per second.
    pub velocity: Vec3,
    /// Whether the player is currently considered on the ground.
    pub on_ground: bool,
    /// Horizontal speed reached at full movement input.
    pub max_walk_speed: f32,
    /// Movement input queued this frame, consumed by physics.
    pub movement_input: Vec3,
    /// Whether jump is being held.
    pub jump_held: bool,
}

impl Player {
    #[must_use]
    pub fn new(max_walk_speed: f32) -> Self {
        Self {
            velocity: Vec3::ZERO,
            on_ground: false,
            max_walk_speed,
            movement_input: Vec3::ZERO,
            jump_held: false,
        }
    }
}

/// Where carried props sit relative to the view.
#[derive(Component, Debug, Clone, Copy)]
pub struct GrabAnchor {
    /// Offset in view space (x right, y up, -z forward).
    pub offset: Vec3,
}

impl GrabAnchor {
    /// World position and rotation of the anchor for a view transform.
    #[must_use]
    pub fn world_pose(&self, view: &Transform) -> (Vec3, Quat) {
        (view.translation + view.rotation * self.offset, view.rotation)
    }
}

/// The gameplay controller attached to the player entity.
#[derive(Component, Debug, Clone)]
pub struct CharacterController {
    pub character: FirstPersonCharacter<Entity>,
    spawned: bool,
}

impl CharacterController {
    #[must_use]
    pub fn new(tunables: Tunables) -> Self {
        Self {
            character: FirstPersonCharacter::new(tunables),
            spawned: false,
        }
    }
}

/// Spawn the player camera with its controller, snapshotting gameplay
/// tunables from `settings`.
pub fn spawn_player(commands: &mut Commands, settings: &Settings, position: Vec3) -> Entity {
    let [x, y, z] = settings.grab.anchor_offset;
    commands
        .spawn((
            Camera3dBundle {
                transform: Transform::from_translation(position),
                ..default()
            },
            Player::new(PLAYER_WALK_SPEED),
            PlayerLook::default(),
            GrabAnchor { offset: Vec3::new(x, y, z) },
            CharacterController::new(Tunables::from(settings)),
        ))
        .id()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_follows_view_rotation() {
        let anchor = GrabAnchor { offset: Vec3::new(0.0, 0.0, -2.0) };
        let view = Transform::from_xyz(1.0, 2.0, 3.0)
            .with_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));

        let (position, rotation) = anchor.world_pose(&view);

        assert!((position - Vec3::new(-1.0, 2.0, 3.0)).length() < 1e-5);
        assert_eq!(rotation, view.rotation);
    }
}
