pub mod character;
pub mod physics;
pub mod player;
pub mod ron;
pub mod settings;
pub mod debug;
