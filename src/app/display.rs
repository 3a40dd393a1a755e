//! Applies the `graphics` section of the settings to the primary window.
use bevy::prelude::*;
use bevy::window::{PresentMode, PrimaryWindow};
use streamline::settings::{GraphicsSettings, Settings};

fn present_mode(graphics: &GraphicsSettings) -> PresentMode {
    if graphics.vsync { PresentMode::Fifo } else { PresentMode::AutoNoVsync }
}

/// Push graphics settings into the window whenever the resource changes,
/// including the first frame and every hot reload.
#[allow(clippy::needless_pass_by_value)]
pub fn apply_graphics_settings(
    settings: Res<Settings>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    if !settings.is_changed() {
        return;
    }
    let mode = present_mode(&settings.graphics);
    for mut window in &mut windows {
        if window.present_mode != mode {
            info!("present mode -> {:?}", mode);
            window.present_mode = mode;
        }
    }
}
