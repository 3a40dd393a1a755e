//! In-memory `CharacterHost` for unit tests.
//!
//! Trace targets are placed along the view direction at a given distance, so
//! a test only has to say how far away a prop or wall is.

use crate::character::host::{CharacterHost, TraceHit};
use bevy::math::Vec3;
use std::cell::Cell;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Prop(pub u32);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhysicsCall {
    Simulate(Prop, bool),
    Attach(Prop),
    Detach(Prop),
    Impulse(Prop, Vec3, bool),
}

#[derive(Debug, Clone, Copy)]
struct PropState {
    simulating: bool,
    attached: bool,
}

pub struct FakeHost {
    pub location: Vec3,
    pub velocity: Vec3,
    pub view_location: Vec3,
    pub view_forward: Vec3,
    pub actor_forward: Vec3,
    pub actor_right: Vec3,
    pub max_walk_speed: f32,
    pub speed_writes: usize,
    pub physics_calls: Vec<PhysicsCall>,
    pub last_trace: Cell<Option<(Vec3, Vec3)>>,
    pub movement_inputs: Vec<(Vec3, f32)>,
    pub yaw_inputs: Vec<f32>,
    pub pitch_inputs: Vec<f32>,
    pub launches: Vec<(Vec3, bool, bool)>,
    pub jumping: bool,
    targets: Vec<(f32, Option<Prop>)>,
    props: HashMap<Prop, PropState>,
    next_prop: u32,
}

impl FakeHost {
    pub fn new() -> Self {
        Self {
            location: Vec3::ZERO,
            velocity: Vec3::ZERO,
            view_location: Vec3::ZERO,
            view_forward: Vec3::NEG_Z,
            actor_forward: Vec3::NEG_Z,
            actor_right: Vec3::X,
            max_walk_speed: 6.0,
            speed_writes: 0,
            physics_calls: Vec::new(),
            last_trace: Cell::new(None),
            movement_inputs: Vec::new(),
            yaw_inputs: Vec::new(),
            pitch_inputs: Vec::new(),
            launches: Vec::new(),
            jumping: false,
            targets: Vec::new(),
            props: HashMap::new(),
            next_prop: 1,
        }
    }

    /// Put a simulating prop `distance` units along the view direction.
    pub fn add_prop(&mut self, distance: f32) -> Prop {
        let prop = Prop(self.next_prop);
        self.next_prop += 1;
        self.targets.push((distance, Some(prop)));
        self.props.insert(prop, PropState { simulating: true, attached: false });
        prop
    }

    /// Put non-physics geometry `distance` units along the view direction.
    pub fn add_static_wall(&mut self, distance: f32) {
        self.targets.push((distance, None));
    }

    /// Take a prop out of the trace path, keeping its physics state.
    pub fn remove_prop(&mut self, prop: Prop) {
        self.targets.retain(|(_, object)| *object != Some(prop));
    }

    pub fn is_simulating(&self, prop: Prop) -> bool {
        self.props.get(&prop).is_some_and(|state| state.simulating)
    }

    pub fn is_attached(&self, prop: Prop) -> bool {
        self.props.get(&prop).is_some_and(|state| state.attached)
    }

    fn prop_mut(&mut self, prop: Prop) -> &mut PropState {
        self.props
            .entry(prop)
            .or_insert(PropState { simulating: true, attached: false })
    }
}

impl CharacterHost for FakeHost {
    type Object = Prop;

    fn location(&self) -> Vec3 {
        self.location
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn view_location(&self) -> Vec3 {
        self.view_location
    }

    fn view_forward(&self) -> Vec3 {
        self.view_forward
    }

    fn actor_forward(&self) -> Vec3 {
        self.actor_forward
    }

    fn actor_right(&self) -> Vec3 {
        self.actor_right
    }

    fn max_walk_speed(&self) -> f32 {
        self.max_walk_speed
    }

    fn set_max_walk_speed(&mut self, speed: f32) {
        self.speed_writes += 1;
        self.max_walk_speed = speed;
    }

    fn line_trace(&self, start: Vec3, end: Vec3) -> Option<TraceHit<Prop>> {
        self.last_trace.set(Some((start, end)));
        let length = (end - start).length();
        let dir = (end - start).normalize_or_zero();
        self.targets
            .iter()
            .filter(|(distance, _)| *distance <= length)
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|&(distance, object)| TraceHit {
                point: start + dir * distance,
                distance,
                object,
            })
    }

    fn set_simulate_physics(&mut self, object: Prop, simulate: bool) {
        self.physics_calls.push(PhysicsCall::Simulate(object, simulate));
        self.prop_mut(object).simulating = simulate;
    }

    fn attach_to_anchor(&mut self, object: Prop) {
        self.physics_calls.push(PhysicsCall::Attach(object));
        self.prop_mut(object).attached = true;
    }

    fn detach(&mut self, object: Prop) {
        self.physics_calls.push(PhysicsCall::Detach(object));
        self.prop_mut(object).attached = false;
    }

    fn add_impulse(&mut self, object: Prop, impulse: Vec3, velocity_change: bool) {
        self.physics_calls
            .push(PhysicsCall::Impulse(object, impulse, velocity_change));
    }

    fn add_movement_input(&mut self, direction: Vec3, scale: f32) {
        self.movement_inputs.push((direction, scale));
    }

    fn add_yaw_input(&mut self, degrees: f32) {
        self.yaw_inputs.push(degrees);
    }

    fn add_pitch_input(&mut self, degrees: f32) {
        self.pitch_inputs.push(degrees);
    }

    fn launch(&mut self, velocity: Vec3, override_horizontal: bool, override_vertical: bool) {
        self.launches.push((velocity, override_horizontal, override_vertical));
    }

    fn jump(&mut self) {
        self.jumping = true;
    }

    fn stop_jumping(&mut self) {
        self.jumping = false;
    }
}
