//! Dash ability: a distance-bounded walk-speed boost with a cooldown.
//!
//! A successful `request` records where the dash started and arms a cooldown
//! deadline. Every frame `advance` keeps the host's max walk speed at
//! `base_speed * speed_multiplier` until the character has travelled
//! `max_distance` from the start, then restores `base_speed`.
//!
//! The cooldown is an orthogonal gate: it runs on its own deadline and is
//! never cancelled, so it can expire before or after the dash itself ends.

use crate::character::host::CharacterHost;
use bevy::log::debug;
use bevy::math::Vec3;
use std::time::Duration;

/// Dash tuning, fixed once the character spawns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashTuning {
    /// Factor applied to the base walk speed while dashing.
    pub speed_multiplier: f32,
    /// Distance from the start position at which the dash ends.
    pub max_distance: f32,
    /// Time after activation before another dash is allowed.
    pub cooldown: Duration,
}

/// Runtime dash state.
#[derive(Debug, Clone)]
pub struct Dash {
    tuning: DashTuning,
    base_speed: f32,
    active: bool,
    start_position: Vec3,
    ready_at: Option<Duration>,
}

impl Dash {
    #[must_use]
    pub fn new(tuning: DashTuning, base_speed: f32) -> Self {
        Self {
            tuning,
            base_speed,
            active: false,
            start_position: Vec3::ZERO,
            ready_at: None,
        }
    }

    /// Walk speed restored when a dash ends.
    #[must_use]
    pub fn base_speed(&self) -> f32 {
        self.base_speed
    }

    pub fn set_base_speed(&mut self, base_speed: f32) {
        self.base_speed = base_speed;
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Position captured by the last successful request.
    #[must_use]
    pub fn start_position(&self) -> Vec3 {
        self.start_position
    }

    /// Whether the cooldown has elapsed at simulated time `now`.
    #[must_use]
    pub fn is_cooldown_ready(&self, now: Duration) -> bool {
        self.ready_at.is_none_or(|ready_at| now >= ready_at)
    }

    /// Time left on the cooldown at `now`, zero when ready.
    #[must_use]
    pub fn cooldown_remaining(&self, now: Duration) -> Duration {
        self.ready_at
            .map_or(Duration::ZERO, |ready_at| ready_at.saturating_sub(now))
    }

    /// Try to start a dash. Ignored when the character is standing still or
    /// the cooldown has not elapsed. Returns whether the dash started.
    pub fn request<H: CharacterHost>(&mut self, host: &H, now: Duration) -> bool {
        if !host.is_moving() || !self.is_cooldown_ready(now) {
            return false;
        }

        self.active = true;
        self.ready_at = Some(now + self.tuning.cooldown);
        self.start_position = host.location();
        debug!("dash started at {:?}", self.start_position);
        true
    }

    /// Per-frame dash update.
    pub fn advance<H: CharacterHost>(&mut self, host: &mut H) {
        if !self.active {
            return;
        }

        let current_distance = host.location().distance(self.start_position);
        debug!("dash distance: {current_distance:.2}");

        if current_distance < self.tuning.max_distance {
            host.set_max_walk_speed(self.base_speed * self.tuning.speed_multiplier);
        } else {
            host.set_max_walk_speed(self.base_speed);
            self.active = false;
        }
    }
}
