pub mod config;
pub mod host;

pub use astraledit_location::{Direction, LocationBuilder, LocationError, WorldResolver};
