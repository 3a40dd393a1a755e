pub mod display;
pub mod setup;

pub use display::apply_graphics_settings;
pub use setup::setup;
