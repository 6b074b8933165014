use std::str::FromStr;

use crate::LocationError;

/// Directions a [`LocationBuilder`](crate::LocationBuilder) can be moved in,
/// relative to its yaw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backwards,
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::Forward,
        Direction::Backwards,
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];
}

impl FromStr for Direction {
    type Err = LocationError;

    /// Parses a direction name as typed in a command (case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "forward" => Ok(Direction::Forward),
            "backward" | "backwards" => Ok(Direction::Backwards),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            _ => Err(LocationError::UnknownDirection(s.to_string())),
        }
    }
}
