//! Grab-and-throw interaction (the "gravity gun").
//!
//! Pressing fire traces forward from the viewpoint. A physics prop within
//! `pickup_radius` stops simulating and is carried at the grab anchor.
//! Releasing fire lets it go and throws it along the view direction.
//!
//! Only a handle to the carried prop is kept; the host owns the prop.

use crate::character::host::CharacterHost;
use bevy::log::debug;

/// Grab tuning, fixed once the character spawns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrabTuning {
    /// Velocity change applied to a released prop, along the view direction.
    pub firing_force: f32,
    /// Trace length used to find a prop.
    pub pickup_radius: f32,
}

#[derive(Debug, Clone)]
pub struct Grab<O> {
    tuning: GrabTuning,
    grabbed: Option<O>,
}

impl<O: Copy + Eq + std::fmt::Debug> Grab<O> {
    #[must_use]
    pub fn new(tuning: GrabTuning) -> Self {
        Self { tuning, grabbed: None }
    }

    /// The prop currently carried, if any.
    #[must_use]
    pub fn grabbed(&self) -> Option<O> {
        self.grabbed
    }

    /// Trace for a prop and pick it up.
    ///
    /// Firing while already carrying a prop replaces the handle without
    /// releasing the previous prop, which stays attached and frozen.
    pub fn on_fire<H: CharacterHost<Object = O>>(&mut self, host: &mut H) {
        let start = host.view_location();
        let end = start + host.view_forward() * self.tuning.pickup_radius;

        let Some(hit) = host.line_trace(start, end) else {
            return;
        };
        if let Some(object) = hit.object {
            debug!("grabbed {object:?} at {:.2}", hit.distance);
            self.set_grabbed_object(host, Some(object));
        }
    }

    /// Release the carried prop and throw it along the view direction.
    pub fn end_fire<H: CharacterHost<Object = O>>(&mut self, host: &mut H) {
        let Some(object) = self.grabbed else {
            return;
        };

        let shoot_velocity = host.view_forward() * self.tuning.firing_force;

        host.detach(object);
        host.set_simulate_physics(object, true);
        host.add_impulse(object, shoot_velocity, true);
        debug!("threw {object:?} with {shoot_velocity:?}");

        self.set_grabbed_object(host, None);
    }

    /// Store `object` as the carried prop. A `Some` handle is frozen and
    /// snapped to the grab anchor; `None` just clears the handle.
    pub fn set_grabbed_object<H: CharacterHost<Object = O>>(
        &mut self,
        host: &mut H,
        object: Option<O>,
    ) {
        self.grabbed = object;

        if let Some(object) = self.grabbed {
            host.set_simulate_physics(object, false);
            host.attach_to_anchor(object);
        }
    }
}
