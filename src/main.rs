use bevy::diagnostic::{FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin};
use bevy::prelude::*;
use bevy::window::{PresentMode, Window, WindowPlugin};
use streamline::debug::{draw_debug_gizmos, toggle_debug_gizmos, DebugGizmosVisible};
use streamline::physics::{follow_grab_anchor, integrate_bodies};
use streamline::player::{cursor_grab, player_physics, read_character_input, spawn_characters, PlayerSet};
use streamline::settings::loader as settings_loader;

mod app;
use app::{setup, apply_graphics_settings};

fn main() {
    let settings = settings_loader::load_settings_from_dir(settings_loader::SETTINGS_DIR);
    let settings_watcher = settings_loader::setup_settings_watcher(settings_loader::SETTINGS_DIR)
        .unwrap_or_else(|_| settings_loader::SettingsWatcher::stub());

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "streamline".to_string(),
                position: WindowPosition::Centered(MonitorSelection::Primary),
                present_mode: PresentMode::AutoNoVsync,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(FrameTimeDiagnosticsPlugin)
        .add_plugins(LogDiagnosticsPlugin::default());

    app.insert_resource(settings);
    app.insert_resource(settings_watcher);
    app.insert_resource(DebugGizmosVisible::default());

    app.configure_sets(Update, (PlayerSet::Input, PlayerSet::Physics).chain());

    app.add_systems(Startup, setup);
    app.add_systems(Update, settings_loader::check_settings_changes);
    app.add_systems(Update, apply_graphics_settings);
    app.add_systems(
        Update,
        (spawn_characters, read_character_input, cursor_grab)
            .chain()
            .in_set(PlayerSet::Input),
    );
    app.add_systems(
        Update,
        (player_physics, integrate_bodies, follow_grab_anchor)
            .chain()
            .in_set(PlayerSet::Physics),
    );
    app.add_systems(Update, (toggle_debug_gizmos, draw_debug_gizmos).after(PlayerSet::Physics));

    app.run();
}
