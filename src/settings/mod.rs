//! Settings, types and defaults.
//!
//! Settings are stored as a RON file under `data/settings/` and are hot-reloadable
//! using the RON watcher utilities (see `ron::setup_ron_watcher`).
//!
//! World units are metres. Gameplay sections (`dash`, `grab`, `jetpack` and
//! `controls.turn_rate`) are copied into the character when it spawns, so a
//! reload only changes them for the next spawn.
use bevy::log::warn;
use bevy::prelude::{KeyCode, Resource};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Dash ability tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashSettings {
    #[serde(default = "DashSettings::default_speed_multiplier")]
    pub speed_multiplier: f32, // Factor applied to walk speed while dashing.
    #[serde(default = "DashSettings::default_distance")]
    pub distance: f32, // Distance travelled before the dash ends.
    #[serde(default = "DashSettings::default_cooldown_secs")]
    pub cooldown_secs: f32, // Seconds after a dash starts before the next one is allowed.
}

impl DashSettings {
    pub const MIN_COOLDOWN_SECS: f32 = 1.0;
    pub const MAX_COOLDOWN_SECS: f32 = 100.0;

    fn default_speed_multiplier() -> f32 { 10.0 }
    fn default_distance() -> f32 { 5.0 }
    fn default_cooldown_secs() -> f32 { 3.0 }

    /// Cooldown as a `Duration`, held to the allowed range even when the
    /// settings were never sanitized.
    #[must_use]
    pub fn cooldown(&self) -> Duration {
        let secs = if self.cooldown_secs.is_nan() {
            Self::MIN_COOLDOWN_SECS
        } else {
            self.cooldown_secs.clamp(Self::MIN_COOLDOWN_SECS, Self::MAX_COOLDOWN_SECS)
        };
        Duration::from_secs_f32(secs)
    }
}

impl Default for DashSettings {
    fn default() -> Self {
        Self {
            speed_multiplier: Self::default_speed_multiplier(),
            distance: Self::default_distance(),
            cooldown_secs: Self::default_cooldown_secs(),
        }
    }
}

/// Grab-and-throw tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrabSettings {
    #[serde(default = "GrabSettings::default_firing_force")]
    pub firing_force: f32, // Speed given to a thrown prop.
    #[serde(default = "GrabSettings::default_pickup_radius")]
    pub pickup_radius: f32, // How far the grab trace reaches.
    #[serde(default = "GrabSettings::default_anchor_offset")]
    pub anchor_offset: [f32; 3], // Where a carried prop sits, in view space (x right, y up, -z forward).
}

impl GrabSettings {
    fn default_firing_force() -> f32 { 30.0 }
    fn default_pickup_radius() -> f32 { 40.0 }
    fn default_anchor_offset() -> [f32; 3] { [0.3, -0.2, -1.5] }
}

impl Default for GrabSettings {
    fn default() -> Self {
        Self {
            firing_force: Self::default_firing_force(),
            pickup_radius: Self::default_pickup_radius(),
            anchor_offset: Self::default_anchor_offset(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JetpackSettings {
    #[serde(default = "JetpackSettings::default_max_speed")]
    pub max_speed: f32, // Upward speed at full thrust.
}

impl JetpackSettings {
    fn default_max_speed() -> f32 { 5.0 }
}

impl Default for JetpackSettings {
    fn default() -> Self {
        Self { max_speed: Self::default_max_speed() }
    }
}

/// Controls / input settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlsSettings {
    #[serde(default)]
    pub invert_y: bool, // Invert mouse Y axis
    #[serde(default)]
    pub invert_x: bool, // Invert mouse X axis
    #[serde(default = "ControlsSettings::default_sensitivity")]
    pub mouse_sensitivity: f32, // Mouse sensitivity multiplier
    #[serde(default = "ControlsSettings::default_turn_rate")]
    pub turn_rate: f32, // Degrees per second for key/gamepad turning at full deflection
    #[serde(default = "ControlsSettings::default_keybinds")]
    pub keybinds: HashMap<String, String>, // Map of action names to key identifiers (editable by user)
}

impl ControlsSettings {
    fn default_sensitivity() -> f32 { 1.0 }
    fn default_turn_rate() -> f32 { 45.0 }

    fn default_keybinds() -> HashMap<String, String> {
        let mut m = HashMap::new();
        m.insert("forward".to_string(), "W".to_string());
        m.insert("back".to_string(), "S".to_string());
        m.insert("left".to_string(), "A".to_string());
        m.insert("right".to_string(), "D".to_string());
        m.insert("jump".to_string(), "Space".to_string());
        m.insert("dash".to_string(), "LShift".to_string());
        m.insert("jetpack".to_string(), "E".to_string());
        m.insert("turn_left".to_string(), "Left".to_string());
        m.insert("turn_right".to_string(), "Right".to_string());
        m.insert("look_up".to_string(), "Up".to_string());
        m.insert("look_down".to_string(), "Down".to_string());
        m.insert("pause".to_string(), "Escape".to_string());
        m.insert("toggle_debug".to_string(), "F2".to_string());
        m
    }
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            invert_y: false,
            invert_x: false,
            mouse_sensitivity: Self::default_sensitivity(),
            turn_rate: Self::default_turn_rate(),
            keybinds: Self::default_keybinds(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphicsSettings {
    #[serde(default = "GraphicsSettings::default_vsync")]
    pub vsync: bool, // Enable vertical sync to cap FPS to the display refresh rate.
}

impl GraphicsSettings {
    fn default_vsync() -> bool { true }
}

impl Default for GraphicsSettings {
    fn default() -> Self {
        Self { vsync: Self::default_vsync() }
    }
}

/// Top-level Settings
#[derive(Resource, Clone, Debug, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub dash: DashSettings,
    #[serde(default)]
    pub grab: GrabSettings,
    #[serde(default)]
    pub jetpack: JetpackSettings,
    #[serde(default)]
    pub controls: ControlsSettings,
    #[serde(default)]
    pub graphics: GraphicsSettings,
}

/// Clamp `value` into `min..=max`, warning when it was out of range.
fn clamp_logged(name: &str, value: f32, min: f32, max: f32) -> f32 {
    let clamped = if value.is_nan() { min } else { value.clamp(min, max) };
    if clamped != value {
        warn!("setting {name}={value} out of range {min}..={max}, using {clamped}");
    }
    clamped
}

impl Settings {
    #[must_use]
    pub fn defaults() -> Self { Settings::default() }

    /// Return a copy with every gameplay tunable clamped to its allowed range.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        self.dash.speed_multiplier =
            clamp_logged("dash.speed_multiplier", self.dash.speed_multiplier, 0.0, 10_000.0);
        self.dash.distance = clamp_logged("dash.distance", self.dash.distance, 0.0, 1_000.0);
        self.dash.cooldown_secs =
            clamp_logged(
            "dash.cooldown_secs",
            self.dash.cooldown_secs,
            DashSettings::MIN_COOLDOWN_SECS,
            DashSettings::MAX_COOLDOWN_SECS,
        );
        self.grab.firing_force =
            clamp_logged("grab.firing_force", self.grab.firing_force, 1.0, 10_000.0);
        self.grab.pickup_radius =
            clamp_logged("grab.pickup_radius", self.grab.pickup_radius, 1.0, 10_000.0);
        self.jetpack.max_speed =
            clamp_logged("jetpack.max_speed", self.jetpack.max_speed, 1.0, 10_000.0);
        self.controls.turn_rate =
            clamp_logged("controls.turn_rate", self.controls.turn_rate, 0.0, 360.0);
        self
    }

    /// Resolve the key bound to `action`, falling back to `default` when the
    /// bind is missing or unrecognised.
    #[must_use]
    pub fn key_for(&self, action: &str, default: KeyCode) -> KeyCode {
        self.controls
            .keybinds
            .get(action)
            .and_then(|s| Self::keycode_from_str(s))
            .unwrap_or(default)
    }

    /// Convert a string key identifier (e.g., from `controls.keybinds`) into a `KeyCode` that
    /// can be used with Bevy's input system.
    ///
    /// # Arguments
    /// * `name` - The string key identifier to convert (e.g., "W", "Space", "F1").
    ///
    /// # Returns
    /// An `Option<KeyCode>` corresponding to the provided string, or `None` if the string
    /// does not match any known key.
    #[must_use]
    pub fn keycode_from_str(name: &str) -> Option<KeyCode> {
        let s = name.to_ascii_uppercase();
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            let letter = match c {
                'A' => Some(KeyCode::KeyA),
                'B' => Some(KeyCode::KeyB),
                'C' => Some(KeyCode::KeyC),
                'D' => Some(KeyCode::KeyD),
                'E' => Some(KeyCode::KeyE),
                'F' => Some(KeyCode::KeyF),
                'G' => Some(KeyCode::KeyG),
                'H' => Some(KeyCode::KeyH),
                'I' => Some(KeyCode::KeyI),
                'J' => Some(KeyCode::KeyJ),
                'K' => Some(KeyCode::KeyK),
                'L' => Some(KeyCode::KeyL),
                'M' => Some(KeyCode::KeyM),
                'N' => Some(KeyCode::KeyN),
                'O' => Some(KeyCode::KeyO),
                'P' => Some(KeyCode::KeyP),
                'Q' => Some(KeyCode::KeyQ),
                'R' => Some(KeyCode::KeyR),
                'S' => Some(KeyCode::KeyS),
                'T' => Some(KeyCode::KeyT),
                'U' => Some(KeyCode::KeyU),
                'V' => Some(KeyCode::KeyV),
                'W' => Some(KeyCode::KeyW),
                'X' => Some(KeyCode::KeyX),
                'Y' => Some(KeyCode::KeyY),
                'Z' => Some(KeyCode::KeyZ),
                '0' => Some(KeyCode::Digit0),
                '1' => Some(KeyCode::Digit1),
                '2' => Some(KeyCode::Digit2),
                '3' => Some(KeyCode::Digit3),
                '4' => Some(KeyCode::Digit4),
                '5' => Some(KeyCode::Digit5),
                '6' => Some(KeyCode::Digit6),
                '7' => Some(KeyCode::Digit7),
                '8' => Some(KeyCode::Digit8),
                '9' => Some(KeyCode::Digit9),
                _ => None,
            };
            if letter.is_some() {
                return letter;
            }
        }

        Some(match s.as_str() {
            // Function keys
            "F1" => KeyCode::F1,
            "F2" => KeyCode::F2,
            "F3" => KeyCode::F3,
            "F4" => KeyCode::F4,
            "F5" => KeyCode::F5,
            "F6" => KeyCode::F6,
            "F7" => KeyCode::F7,
            "F8" => KeyCode::F8,
            "F9" => KeyCode::F9,
            "F10" => KeyCode::F10,
            "F11" => KeyCode::F11,
            "F12" => KeyCode::F12,

            // Arrows / navigation
            "LEFT" | "ARROWLEFT" => KeyCode::ArrowLeft,
            "RIGHT" | "ARROWRIGHT" => KeyCode::ArrowRight,
            "UP" | "ARROWUP" => KeyCode::ArrowUp,
            "DOWN" | "ARROWDOWN" => KeyCode::ArrowDown,

            // Whitespace / control
            "ESC" | "ESCAPE" => KeyCode::Escape,
            "SPACE" => KeyCode::Space,
            "TAB" => KeyCode::Tab,
            "ENTER" | "RETURN" => KeyCode::Enter,

            // Modifiers
            "LSHIFT" | "SHIFT" => KeyCode::ShiftLeft,
            "RSHIFT" => KeyCode::ShiftRight,
            "LCTRL" | "CTRL" | "CONTROL" => KeyCode::ControlLeft,
            "RCTRL" => KeyCode::ControlRight,
            "LALT" | "ALT" => KeyCode::AltLeft,
            "RALT" => KeyCode::AltRight,

            _ => return None,
        })
    }
}

pub mod loader;
