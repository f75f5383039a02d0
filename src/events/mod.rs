pub mod cards;
pub mod pointer;
pub mod resize;

pub use cards::wire_card_handlers;
pub use pointer::{wire_orbit_input, OrbitWiring};
pub use resize::{wire_window_resize, ResizeWiring};
