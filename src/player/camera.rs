//! Camera look state and cursor helpers.
//!
//! `PlayerLook` stores yaw/pitch and produces the view rotation; mouse motion
//! is turned into the character's `Turn`/`LookUp` axes by `mouse_look_axes`.
//! `cursor_grab` toggles cursor lock/visibility in response to input.

use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};

use crate::settings::ControlsSettings;

// Centralized camera tuning constants, shared by the live systems and benchmarks.
const CAMERA_MAX_PITCH_DEG: f32 = 85.0;
const MOUSE_DEGREES_PER_PIXEL: f32 = 0.1;

/// Stores the player's look orientation (yaw and pitch) in radians.
///
/// - `yaw`: horizontal rotation around the Y axis.
/// - `pitch`: vertical rotation around the X axis and clamped to a safe range.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct PlayerLook {
    /// Horizontal angle (radians).
    pub yaw: f32,
    /// Vertical angle (radians).
    pub pitch: f32,
}

impl PlayerLook {
    /// Turn by `degrees`; positive turns right.
    pub fn add_yaw_degrees(&mut self, degrees: f32) {
        self.yaw -= degrees.to_radians();
    }

    /// Pitch by `degrees`; positive looks up. Clamped short of straight up/down.
    pub fn add_pitch_degrees(&mut self, degrees: f32) {
        let max_pitch = CAMERA_MAX_PITCH_DEG.to_radians();
        self.pitch = (self.pitch + degrees.to_radians()).clamp(-max_pitch, max_pitch);
    }

    /// View rotation: yaw around Y, then pitch around X.
    #[must_use]
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(bevy::math::EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }
}

/// Convert a raw mouse delta into `(turn, look_up)` axis values in degrees.
///
/// Screen-space Y grows downward, so moving the mouse down looks down.
#[must_use]
pub fn mouse_look_axes(delta: Vec2, controls: &ControlsSettings) -> Vec2 {
    let scale = controls.mouse_sensitivity * MOUSE_DEGREES_PER_PIXEL;
    let mut turn = delta.x * scale;
    let mut look_up = -delta.y * scale;
    if controls.invert_x {
        turn = -turn;
    }
    if controls.invert_y {
        look_up = -look_up;
    }
    Vec2::new(turn, look_up)
}

/// Toggle cursor grab and visibility.
///
/// Left click locks the cursor; the mapped pause key releases it.
#[allow(clippy::needless_pass_by_value)]
pub fn cursor_grab(
    mut wq: Query<&mut Window, With<PrimaryWindow>>,
    mb: Res<ButtonInput<MouseButton>>,
    kb: Res<ButtonInput<KeyCode>>,
    settings: Res<crate::settings::Settings>,
) {
    let Ok(mut w) = wq.get_single_mut() else { return };
    if mb.just_pressed(MouseButton::Left) {
        w.cursor.grab_mode = CursorGrabMode::Locked;
        w.cursor.visible = false;
    }

    let pause_kc = settings.key_for("pause", KeyCode::Escape);
    if kb.just_pressed(pause_kc) {
        w.cursor.grab_mode = CursorGrabMode::None;
        w.cursor.visible = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_yaw_turns_right() {
        let mut look = PlayerLook::default();
        look.add_yaw_degrees(90.0);
        let forward = look.rotation() * Vec3::NEG_Z;
        assert!((forward - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn positive_pitch_looks_up_and_is_clamped() {
        let mut look = PlayerLook::default();
        look.add_pitch_degrees(30.0);
        let forward = look.rotation() * Vec3::NEG_Z;
        assert!(forward.y > 0.49 && forward.y < 0.51);

        look.add_pitch_degrees(500.0);
        assert!((look.pitch - 85.0_f32.to_radians()).abs() < 1e-6);
        look.add_pitch_degrees(-1000.0);
        assert!((look.pitch + 85.0_f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn mouse_axes_respect_sensitivity_and_inversion() {
        let mut controls = ControlsSettings::default();
        controls.mouse_sensitivity = 2.0;
        let axes = mouse_look_axes(Vec2::new(10.0, 5.0), &controls);
        assert!((axes - Vec2::new(2.0, -1.0)).length() < 1e-5);

        controls.invert_x = true;
        controls.invert_y = true;
        let axes = mouse_look_axes(Vec2::new(10.0, 5.0), &controls);
        assert!((axes - Vec2::new(-2.0, 1.0)).length() < 1e-5);
    }
}
