pub mod camera;
pub mod cards;
pub mod config;
pub mod constants;
pub mod controls;
pub mod error;
pub mod hotspot;
pub mod loading;
pub mod raycast;
pub mod viewport;

pub use camera::*;
pub use cards::*;
pub use config::*;
pub use constants::*;
pub use controls::*;
pub use error::ViewerError;
pub use hotspot::*;
pub use loading::*;
pub use raycast::*;
pub use viewport::*;
