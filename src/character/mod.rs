//! Engine-independent first-person character gameplay.
//!
//! `FirstPersonCharacter` owns the dash and grab state and turns input
//! events into calls on a `CharacterHost`. The host drives it:
//!
//! - `on_spawn` once, before the first update,
//! - `on_action` for every press/release,
//! - `on_axis` once per axis per frame,
//! - `on_update` once per frame, after input.
//!
//! ```
//! use streamline::character::{FirstPersonCharacter, Tunables};
//! use streamline::settings::Settings;
//!
//! let character: FirstPersonCharacter<u32> =
//!     FirstPersonCharacter::new(Tunables::from(&Settings::defaults()));
//! assert!(character.grab().grabbed().is_none());
//! ```

pub mod dash;
pub mod grab;
pub mod host;
pub mod input;

#[cfg(test)]
pub(crate) mod test_support;

pub use dash::{Dash, DashTuning};
pub use grab::{Grab, GrabTuning};
pub use host::{CharacterHost, TraceHit};
pub use input::{InputAction, InputAxis, InputPhase};

use crate::settings::Settings;
use bevy::log::info;
use bevy::math::Vec3;
use std::time::Duration;

/// World up axis used by the jetpack.
pub const UP: Vec3 = Vec3::Y;

/// Gameplay tunables, copied from `Settings` when the character is created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tunables {
    pub dash: DashTuning,
    pub grab: GrabTuning,
    /// Upward launch speed at full jetpack thrust.
    pub max_jet_speed: f32,
    /// Degrees per second at full turn/look rate.
    pub turn_rate: f32,
}

impl From<&Settings> for Tunables {
    fn from(settings: &Settings) -> Self {
        Self {
            dash: DashTuning {
                speed_multiplier: settings.dash.speed_multiplier,
                max_distance: settings.dash.distance,
                cooldown: settings.dash.cooldown(),
            },
            grab: GrabTuning {
                firing_force: settings.grab.firing_force,
                pickup_radius: settings.grab.pickup_radius,
            },
            max_jet_speed: settings.jetpack.max_speed,
            turn_rate: settings.controls.turn_rate,
        }
    }
}

/// A first-person character with dash, jetpack and grab-and-throw.
#[derive(Debug, Clone)]
pub struct FirstPersonCharacter<O> {
    tunables: Tunables,
    dash: Dash,
    grab: Grab<O>,
}

impl<O: Copy + Eq + std::fmt::Debug> FirstPersonCharacter<O> {
    #[must_use]
    pub fn new(tunables: Tunables) -> Self {
        Self {
            dash: Dash::new(tunables.dash, 0.0),
            grab: Grab::new(tunables.grab),
            tunables,
        }
    }

    #[must_use]
    pub fn tunables(&self) -> &Tunables {
        &self.tunables
    }

    #[must_use]
    pub fn dash(&self) -> &Dash {
        &self.dash
    }

    #[must_use]
    pub fn grab(&self) -> &Grab<O> {
        &self.grab
    }

    /// Capture the host's walk speed as the speed a dash returns to.
    pub fn on_spawn<H: CharacterHost<Object = O>>(&mut self, host: &H) {
        self.dash.set_base_speed(host.max_walk_speed());
        info!(
            "character spawned: walk speed {:.2}, dash x{:.2} over {:.2}",
            self.dash.base_speed(),
            self.tunables.dash.speed_multiplier,
            self.tunables.dash.max_distance
        );
    }

    /// Per-frame update.
    pub fn on_update<H: CharacterHost<Object = O>>(&mut self, host: &mut H) {
        self.dash.advance(host);
    }

    /// Dispatch a discrete input event. `now` is the host's elapsed time.
    pub fn on_action<H: CharacterHost<Object = O>>(
        &mut self,
        host: &mut H,
        action: InputAction,
        phase: InputPhase,
        now: Duration,
    ) {
        match (action, phase) {
            (InputAction::Jump, InputPhase::Pressed) => host.jump(),
            (InputAction::Jump, InputPhase::Released) => host.stop_jumping(),
            (InputAction::Dash, InputPhase::Pressed) => {
                self.dash.request(host, now);
            }
            (InputAction::Fire, InputPhase::Pressed) => self.grab.on_fire(host),
            (InputAction::Fire, InputPhase::Released) => self.grab.end_fire(host),
            (InputAction::Dash, InputPhase::Released) => {}
        }
    }

    /// Apply one axis value for this frame. `delta` is the frame time in seconds.
    pub fn on_axis<H: CharacterHost<Object = O>>(
        &mut self,
        host: &mut H,
        axis: InputAxis,
        value: f32,
        delta: f32,
    ) {
        match axis {
            InputAxis::MoveForward => self.move_forward(host, value),
            InputAxis::MoveRight => self.move_right(host, value),
            InputAxis::Turn => host.add_yaw_input(value),
            InputAxis::LookUp => host.add_pitch_input(value),
            InputAxis::TurnRate => self.turn_at_rate(host, value, delta),
            InputAxis::LookUpRate => self.look_up_at_rate(host, value, delta),
            InputAxis::JetPack => self.jet_pack(host, value),
        }
    }

    pub fn move_forward<H: CharacterHost<Object = O>>(&self, host: &mut H, value: f32) {
        if value != 0.0 {
            let forward = host.actor_forward();
            host.add_movement_input(forward, value);
        }
    }

    pub fn move_right<H: CharacterHost<Object = O>>(&self, host: &mut H, value: f32) {
        if value != 0.0 {
            let right = host.actor_right();
            host.add_movement_input(right, value);
        }
    }

    /// Turn at a normalized rate, 1.0 being the full turn rate.
    pub fn turn_at_rate<H: CharacterHost<Object = O>>(&self, host: &mut H, rate: f32, delta: f32) {
        host.add_yaw_input(rate * self.tunables.turn_rate * delta);
    }

    /// Look up/down at a normalized rate, 1.0 being the full turn rate.
    pub fn look_up_at_rate<H: CharacterHost<Object = O>>(&self, host: &mut H, rate: f32, delta: f32) {
        host.add_pitch_input(rate * self.tunables.turn_rate * delta);
    }

    /// Push the character upward; the vertical velocity is replaced, the
    /// horizontal velocity kept.
    pub fn jet_pack<H: CharacterHost<Object = O>>(&self, host: &mut H, value: f32) {
        if value != 0.0 {
            let jet = UP * self.tunables.max_jet_speed;
            host.launch(jet * value, false, true);
        }
    }
}
