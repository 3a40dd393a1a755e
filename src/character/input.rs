//! Input vocabulary understood by the character.
//!
//! Discrete actions arrive as press/release events; axes arrive once per
//! frame with a scalar value. Mapping physical keys to these names is the
//! host's job (see `crate::player::movement::read_character_input`).

/// Discrete press/release actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    Jump,
    Dash,
    /// Grab on press, throw on release.
    Fire,
}

impl InputAction {
    pub const ALL: [Self; 3] = [Self::Jump, Self::Dash, Self::Fire];

    /// Name used for this action in `controls.keybinds`.
    #[must_use]
    pub fn bind_name(self) -> &'static str {
        match self {
            Self::Jump => "jump",
            Self::Dash => "dash",
            Self::Fire => "fire",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputPhase {
    Pressed,
    Released,
}

/// Continuous per-frame axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAxis {
    /// Forward (+) / backward (-).
    MoveForward,
    /// Right (+) / left (-).
    MoveRight,
    /// Absolute yaw delta in degrees, e.g. from a mouse.
    Turn,
    /// Absolute pitch delta in degrees, e.g. from a mouse.
    LookUp,
    /// Normalized yaw rate; 1.0 turns at the full turn rate.
    TurnRate,
    /// Normalized pitch rate; 1.0 looks up at the full turn rate.
    LookUpRate,
    /// Jetpack thrust, 0..1.
    JetPack,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_names_are_unique() {
        let mut names: Vec<_> = InputAction::ALL.iter().map(|a| a.bind_name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), InputAction::ALL.len());
    }
}
