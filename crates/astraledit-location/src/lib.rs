use std::fmt::{self, Display};

pub mod direction;
mod float;
pub mod location;
pub mod resolver;

pub use direction::Direction;
pub use location::LocationBuilder;
pub use resolver::WorldResolver;

/// Errors produced while building, converting or restoring locations
#[derive(Debug)]
pub enum LocationError {
    /// The host handed us no location at all
    MissingLocation,
    /// The host location has no world attached
    MissingWorld,
    UnknownDirection(String),
    /// A serialized location is missing a key or has a key of the wrong type
    InvalidData(String),
}

impl Display for LocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationError::MissingLocation => f.write_str("Location cannot be null!"),
            LocationError::MissingWorld => f.write_str("Location has no world"),
            LocationError::UnknownDirection(direction) => write!(f, "Unknown direction: {}", direction),
            LocationError::InvalidData(reason) => write!(f, "Invalid location data: {}", reason),
        }
    }
}

impl std::error::Error for LocationError {}
