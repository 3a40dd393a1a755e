//! Startup system that builds the test range.
//!
//! Spawns the ground, a light, a static wall, a row of grabbable crates and
//! the player camera. Crate positions are fixed so the range looks the same
//! every run.
use bevy::prelude::*;
use streamline::physics::{Collider, PhysicsBody};
use streamline::player::{spawn_player, PLAYER_HEIGHT};
use streamline::settings::Settings;

const GROUND_HALF_SIZE: f32 = 50.0;
const CRATE_HALF: f32 = 0.4;

/// Spawn the scene and the player.
///
/// # Arguments
/// - `commands`: Commands for spawning entities.
/// - `meshes`: Mesh storage for the ground, wall and crate meshes.
/// - `materials`: Material storage for their colours.
/// - `settings`: Loaded settings; gameplay tunables are snapshotted into the player here.
#[allow(clippy::needless_pass_by_value)]
pub fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<Settings>,
) {
    commands.spawn((
        PbrBundle {
            mesh: meshes.add(Cuboid::new(GROUND_HALF_SIZE * 2.0, 1.0, GROUND_HALF_SIZE * 2.0)),
            material: materials.add(Color::srgb(0.35, 0.4, 0.35)),
            transform: Transform::from_xyz(0.0, -0.5, 0.0),
            ..default()
        },
        Collider { half_extents: Vec3::new(GROUND_HALF_SIZE, 0.5, GROUND_HALF_SIZE) },
    ));

    commands.spawn(DirectionalLightBundle {
        directional_light: DirectionalLight {
            shadows_enabled: true,
            illuminance: 8_000.0,
            ..default()
        },
        transform: Transform::from_xyz(10.0, 20.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
        ..default()
    });

    // Static wall: blocks the grab trace but can't be picked up.
    commands.spawn((
        PbrBundle {
            mesh: meshes.add(Cuboid::new(8.0, 3.0, 0.5)),
            material: materials.add(Color::srgb(0.5, 0.45, 0.4)),
            transform: Transform::from_xyz(0.0, 1.5, -20.0),
            ..default()
        },
        Collider { half_extents: Vec3::new(4.0, 1.5, 0.25) },
    ));

    let crate_mesh = meshes.add(Cuboid::new(CRATE_HALF * 2.0, CRATE_HALF * 2.0, CRATE_HALF * 2.0));
    let crate_material = materials.add(Color::srgb(0.8, 0.55, 0.25));
    for i in 0..5 {
        #[allow(clippy::cast_precision_loss)]
        let x = (i as f32 - 2.0) * 2.0;
        commands.spawn((
            PbrBundle {
                mesh: crate_mesh.clone(),
                material: crate_material.clone(),
                transform: Transform::from_xyz(x, CRATE_HALF, -8.0),
                ..default()
            },
            PhysicsBody::new(10.0),
            Collider { half_extents: Vec3::splat(CRATE_HALF) },
        ));
    }

    spawn_player(&mut commands, &settings, Vec3::new(0.0, PLAYER_HEIGHT, 0.0));
}
