//! Bevy host for the character controller, and the systems that drive it.
//!
//! `WorldHost` implements `CharacterHost` over the player's components and
//! the prop query. `read_character_input` samples keyboard and mouse each
//! frame, feeds actions and axes to the controller, then runs its update.

use crate::character::{CharacterHost, InputAction, InputAxis, InputPhase, TraceHit};
use crate::physics::{raycast, Collider, PhysicsBody};
use crate::player::{mouse_look_axes, CharacterController, GrabAnchor, Player, PlayerLook};
use crate::settings::Settings;
use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};

/// Props and static geometry the player can trace against.
pub type PropQuery<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static mut Transform,
        Option<&'static mut PhysicsBody>,
        &'static Collider,
    ),
    Without<Player>,
>;

/// `CharacterHost` backed by the player's components for one frame.
pub struct WorldHost<'a, 'w, 's> {
    pub transform: &'a mut Transform,
    pub player: &'a mut Player,
    pub look: &'a mut PlayerLook,
    pub anchor: GrabAnchor,
    pub props: &'a mut PropQuery<'w, 's>,
}

impl WorldHost<'_, '_, '_> {
    fn horizontal(v: Vec3) -> Vec3 {
        Vec3::new(v.x, 0.0, v.z).normalize_or_zero()
    }

    fn with_body(&mut self, object: Entity, f: impl FnOnce(&mut Transform, &mut PhysicsBody)) {
        if let Ok((_, mut tf, Some(mut body), _)) = self.props.get_mut(object) {
            f(&mut *tf, &mut *body);
        }
    }
}

impl CharacterHost for WorldHost<'_, '_, '_> {
    type Object = Entity;

    fn location(&self) -> Vec3 {
        self.transform.translation
    }

    fn velocity(&self) -> Vec3 {
        self.player.velocity
    }

    fn view_location(&self) -> Vec3 {
        self.transform.translation
    }

    fn view_forward(&self) -> Vec3 {
        self.transform.forward().as_vec3()
    }

    fn actor_forward(&self) -> Vec3 {
        Self::horizontal(self.transform.forward().as_vec3())
    }

    fn actor_right(&self) -> Vec3 {
        Self::horizontal(self.transform.right().as_vec3())
    }

    fn max_walk_speed(&self) -> f32 {
        self.player.max_walk_speed
    }

    fn set_max_walk_speed(&mut self, speed: f32) {
        self.player.max_walk_speed = speed;
    }

    fn line_trace(&self, start: Vec3, end: Vec3) -> Option<TraceHit<Entity>> {
        raycast(
            start,
            end,
            self.props.iter().map(|(entity, tf, body, collider)| {
                (entity, tf.translation, collider.half_extents, body.is_some())
            }),
        )
    }

    fn set_simulate_physics(&mut self, object: Entity, simulate: bool) {
        self.with_body(object, |_, body| {
            body.simulate = simulate;
            if !simulate {
                body.velocity = Vec3::ZERO;
            }
        });
    }

    fn attach_to_anchor(&mut self, object: Entity) {
        let (position, rotation) = self.anchor.world_pose(&*self.transform);
        self.with_body(object, |tf, body| {
            body.attached = true;
            tf.translation = position;
            tf.rotation = rotation;
        });
    }

    fn detach(&mut self, object: Entity) {
        self.with_body(object, |_, body| body.attached = false);
    }

    fn add_impulse(&mut self, object: Entity, impulse: Vec3, velocity_change: bool) {
        self.with_body(object, |_, body| body.apply_impulse(impulse, velocity_change));
    }

    fn add_movement_input(&mut self, direction: Vec3, scale: f32) {
        self.player.movement_input += direction * scale;
    }

    fn add_yaw_input(&mut self, degrees: f32) {
        self.look.add_yaw_degrees(degrees);
        self.transform.rotation = self.look.rotation();
    }

    fn add_pitch_input(&mut self, degrees: f32) {
        self.look.add_pitch_degrees(degrees);
        self.transform.rotation = self.look.rotation();
    }

    fn launch(&mut self, velocity: Vec3, override_horizontal: bool, override_vertical: bool) {
        let v = &mut self.player.velocity;
        if override_horizontal {
            v.x = velocity.x;
            v.z = velocity.z;
        } else {
            v.x += velocity.x;
            v.z += velocity.z;
        }
        if override_vertical {
            v.y = velocity.y;
        } else {
            v.y += velocity.y;
        }
        if v.y > 0.0 {
            self.player.on_ground = false;
        }
    }

    fn jump(&mut self) {
        self.player.jump_held = true;
    }

    fn stop_jumping(&mut self) {
        self.player.jump_held = false;
    }
}

/// Axis value from a pair of opposing keys.
fn key_axis(kb: &ButtonInput<KeyCode>, positive: KeyCode, negative: KeyCode) -> f32 {
    let mut value = 0.0;
    if kb.pressed(positive) {
        value += 1.0;
    }
    if kb.pressed(negative) {
        value -= 1.0;
    }
    value
}

/// Everything `read_character_input` needs, bundled to keep the system
/// signature readable.
#[derive(bevy::ecs::system::SystemParam)]
pub struct CharacterInputCtx<'w, 's> {
    pub keyboard: Res<'w, ButtonInput<KeyCode>>,
    pub mouse_button: Res<'w, ButtonInput<MouseButton>>,
    pub motion_events: Res<'w, Events<MouseMotion>>,
    pub settings: Res<'w, Settings>,
    pub time: Res<'w, Time>,
    pub window_query: Query<'w, 's, &'static Window, With<PrimaryWindow>>,
    pub player_query: Query<
        'w,
        's,
        (
            &'static mut Transform,
            &'static mut Player,
            &'static mut PlayerLook,
            &'static GrabAnchor,
            &'static mut CharacterController,
        ),
    >,
    pub props: PropQuery<'w, 's>,
}

impl CharacterInputCtx<'_, '_> {
    fn action_edges(&self, action: InputAction) -> (bool, bool) {
        match action {
            InputAction::Fire => (
                self.mouse_button.just_pressed(MouseButton::Left),
                self.mouse_button.just_released(MouseButton::Left),
            ),
            InputAction::Jump | InputAction::Dash => {
                let default = if action == InputAction::Jump { KeyCode::Space } else { KeyCode::ShiftLeft };
                let key = self.settings.key_for(action.bind_name(), default);
                (self.keyboard.just_pressed(key), self.keyboard.just_released(key))
            }
        }
    }

    fn axes(&self, cursor_locked: bool) -> [(InputAxis, f32); 7] {
        let s = &self.settings;
        let kb = &*self.keyboard;

        let mut mouse = Vec2::ZERO;
        if cursor_locked {
            for ev in self.motion_events.iter_current_update_events() {
                mouse += ev.delta;
            }
        }
        let look = mouse_look_axes(mouse, &s.controls);

        let jet = if kb.pressed(s.key_for("jetpack", KeyCode::KeyE)) { 1.0 } else { 0.0 };

        [
            (
                InputAxis::MoveForward,
                key_axis(kb, s.key_for("forward", KeyCode::KeyW), s.key_for("back", KeyCode::KeyS)),
            ),
            (
                InputAxis::MoveRight,
                key_axis(kb, s.key_for("right", KeyCode::KeyD), s.key_for("left", KeyCode::KeyA)),
            ),
            (InputAxis::Turn, look.x),
            (InputAxis::LookUp, look.y),
            (
                InputAxis::TurnRate,
                key_axis(
                    kb,
                    s.key_for("turn_right", KeyCode::ArrowRight),
                    s.key_for("turn_left", KeyCode::ArrowLeft),
                ),
            ),
            (
                InputAxis::LookUpRate,
                key_axis(
                    kb,
                    s.key_for("look_up", KeyCode::ArrowUp),
                    s.key_for("look_down", KeyCode::ArrowDown),
                ),
            ),
            (InputAxis::JetPack, jet),
        ]
    }
}

/// Call `on_spawn` once for every newly spawned controller.
pub fn spawn_characters(
    mut players: Query<(
        &mut Transform,
        &mut Player,
        &mut PlayerLook,
        &GrabAnchor,
        &mut CharacterController,
    )>,
    mut props: PropQuery,
) {
    for (mut transform, mut player, mut look, anchor, mut controller) in &mut players {
        if controller.spawned {
            continue;
        }
        let host = WorldHost {
            transform: &mut *transform,
            player: &mut *player,
            look: &mut *look,
            anchor: *anchor,
            props: &mut props,
        };
        controller.character.on_spawn(&host);
        controller.spawned = true;
    }
}

/// Feed this frame's input to the character, then run its update.
///
/// Presses of gameplay actions are ignored while the cursor is free;
/// releases always go through so a carried prop is never stuck.
pub fn read_character_input(mut ctx: CharacterInputCtx) {
    let cursor_locked = ctx
        .window_query
        .get_single()
        .is_ok_and(|w| w.cursor.grab_mode == CursorGrabMode::Locked);

    let now = ctx.time.elapsed();
    let dt = ctx.time.delta_seconds();
    let mut events = Vec::new();
    for action in InputAction::ALL {
        let (pressed, released) = ctx.action_edges(action);
        if pressed && cursor_locked {
            events.push((action, InputPhase::Pressed));
        }
        if released {
            events.push((action, InputPhase::Released));
        }
    }
    let axes = ctx.axes(cursor_locked);

    let CharacterInputCtx { player_query, props, .. } = &mut ctx;
    let Ok((mut transform, mut player, mut look, anchor, mut controller)) = player_query.get_single_mut()
    else {
        return;
    };
    if !controller.spawned {
        return;
    }

    let mut host = WorldHost {
        transform: &mut *transform,
        player: &mut *player,
        look: &mut *look,
        anchor: *anchor,
        props,
    };
    let character = &mut controller.character;

    for (action, phase) in events {
        character.on_action(&mut host, action, phase, now);
    }
    for (axis, value) in axes {
        character.on_axis(&mut host, axis, value, dt);
    }
    character.on_update(&mut host);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Tunables;
    use crate::physics::{follow_grab_anchor, PhysicsBody};
    use bevy::ecs::system::RunSystemOnce;

    fn world_with_player() -> (World, Entity) {
        let mut world = World::new();
        let settings = Settings::default();
        let player = world
            .spawn((
                Transform::from_xyz(0.0, 1.7, 0.0),
                Player::new(6.0),
                PlayerLook::default(),
                GrabAnchor { offset: Vec3::new(0.0, 0.0, -1.5) },
                CharacterController::new(Tunables::from(&settings)),
            ))
            .id();
        world.run_system_once(spawn_characters);
        (world, player)
    }

    fn spawn_prop(world: &mut World, position: Vec3) -> Entity {
        world
            .spawn((
                Transform::from_translation(position),
                PhysicsBody::new(1.0),
                Collider { half_extents: Vec3::splat(0.5) },
            ))
            .id()
    }

    /// Run `f` against the character and a `WorldHost` built from `world`.
    fn with_host(
        world: &mut World,
        f: impl FnOnce(&mut crate::character::FirstPersonCharacter<Entity>, &mut WorldHost) + Send + Sync + 'static,
    ) {
        let f = std::sync::Mutex::new(Some(f));
        world.run_system_once(
            move |mut players: Query<(
                &mut Transform,
                &mut Player,
                &mut PlayerLook,
                &GrabAnchor,
                &mut CharacterController,
            )>,
                  mut props: PropQuery| {
                let (mut transform, mut player, mut look, anchor, mut controller) = players.single_mut();
                let mut host = WorldHost {
                    transform: &mut *transform,
                    player: &mut *player,
                    look: &mut *look,
                    anchor: *anchor,
                    props: &mut props,
                };
                if let Some(f) = f.lock().unwrap().take() {
                    f(&mut controller.character, &mut host);
                }
            },
        );
    }

    #[test]
    fn spawn_captures_player_walk_speed() {
        let (world, player) = world_with_player();
        let controller = world.get::<CharacterController>(player).unwrap();
        assert!(controller.spawned);
        assert_eq!(controller.character.dash().base_speed(), 6.0);
    }

    #[test]
    fn grab_and_throw_through_world_host() {
        let (mut world, _) = world_with_player();
        let prop = spawn_prop(&mut world, Vec3::new(0.0, 1.7, -10.0));

        with_host(&mut world, |character, host| {
            character.on_action(host, InputAction::Fire, InputPhase::Pressed, Default::default());
        });
        {
            let body = world.get::<PhysicsBody>(prop).unwrap();
            assert!(!body.simulate);
            assert!(body.attached);
            let tf = world.get::<Transform>(prop).unwrap();
            assert!((tf.translation - Vec3::new(0.0, 1.7, -1.5)).length() < 1e-5);
        }

        with_host(&mut world, |character, host| {
            character.on_action(host, InputAction::Fire, InputPhase::Released, Default::default());
        });
        let body = world.get::<PhysicsBody>(prop).unwrap();
        assert!(body.simulate);
        assert!(!body.attached);
        assert!((body.velocity - Vec3::new(0.0, 0.0, -30.0)).length() < 1e-4);
    }

    #[test]
    fn static_geometry_is_not_grabbed() {
        let (mut world, _) = world_with_player();
        world.spawn((
            Transform::from_xyz(0.0, 1.7, -5.0),
            Collider { half_extents: Vec3::splat(1.0) },
        ));
        let prop = spawn_prop(&mut world, Vec3::new(0.0, 1.7, -10.0));

        with_host(&mut world, |character, host| {
            character.on_action(host, InputAction::Fire, InputPhase::Pressed, Default::default());
            assert_eq!(character.grab().grabbed(), None);
        });

        assert!(world.get::<PhysicsBody>(prop).unwrap().simulate);
    }

    #[test]
    fn carried_prop_follows_the_view() {
        let (mut world, player) = world_with_player();
        let prop = spawn_prop(&mut world, Vec3::new(0.0, 1.7, -10.0));
        with_host(&mut world, |character, host| {
            character.on_action(host, InputAction::Fire, InputPhase::Pressed, Default::default());
        });

        world.get_mut::<Transform>(player).unwrap().translation = Vec3::new(4.0, 1.7, 0.0);
        world.run_system_once(follow_grab_anchor);

        let tf = world.get::<Transform>(prop).unwrap();
        assert!((tf.translation - Vec3::new(4.0, 1.7, -1.5)).length() < 1e-5);
    }

    #[test]
    fn jetpack_replaces_vertical_velocity_only() {
        let (mut world, player) = world_with_player();
        world.get_mut::<Player>(player).unwrap().velocity = Vec3::new(2.0, -3.0, 0.0);

        with_host(&mut world, |character, host| {
            character.on_axis(host, InputAxis::JetPack, 1.0, 0.016);
        });

        let p = world.get::<Player>(player).unwrap();
        assert_eq!(p.velocity, Vec3::new(2.0, 5.0, 0.0));
        assert!(!p.on_ground);
    }

    #[test]
    fn rate_turn_rotates_the_view() {
        let (mut world, player) = world_with_player();

        with_host(&mut world, |character, host| {
            character.on_axis(host, InputAxis::TurnRate, 1.0, 2.0);
        });

        let tf = world.get::<Transform>(player).unwrap();
        assert!((tf.forward().as_vec3() - Vec3::X).length() < 1e-5);
    }
}
