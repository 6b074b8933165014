use std::{fmt::{self, Display}, hash::{Hash, Hasher}};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{float, Direction, LocationError, WorldResolver};

/// Mutable position in a named world, with a facing direction
///
/// Setters return `&mut Self` so calls can be chained:
/// ```rs
/// let mut location = LocationBuilder::at("world", 10.0, 64.0, -3.5);
/// location.set_rotation(90.0, 0.0).relative_position(2.0, Direction::Forward);
/// ```
///
/// Two builders compare equal when they point at the same block, i.e. when
/// their truncated x, y and z match. World and rotation are not compared.
///
/// Field order is also the persisted key order (`x, y, z, yaw, pitch, worldname`).
/// NaN and infinite values are persisted as `"NaN"`, `"Infinity"` and `"-Infinity"`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationBuilder {
    #[serde(with = "crate::float")]
    x: f64,
    #[serde(with = "crate::float")]
    y: f64,
    #[serde(with = "crate::float")]
    z: f64,
    #[serde(with = "crate::float")]
    yaw: f64,
    #[serde(with = "crate::float")]
    pitch: f64,
    #[serde(rename = "worldname", default)]
    world: Option<String>,
}

impl LocationBuilder {
    /// Creates a builder with no world at 0, 0, 0
    pub fn new() -> LocationBuilder {
        LocationBuilder::default()
    }

    pub fn with_rotation(world: impl Into<String>, x: f64, y: f64, z: f64, yaw: f64, pitch: f64) -> LocationBuilder {
        LocationBuilder {
            x,
            y,
            z,
            yaw,
            pitch,
            world: Some(world.into()),
        }
    }

    /// Creates a builder at the given coordinates, facing yaw 0 and pitch 0
    pub fn at(world: impl Into<String>, x: f64, y: f64, z: f64) -> LocationBuilder {
        LocationBuilder::with_rotation(world, x, y, z, 0.0, 0.0)
    }

    // ====< Setters >====
    pub fn set_coordinates(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        self.x = x;
        self.y = y;
        self.z = z;
        self
    }

    pub fn set_rotation(&mut self, yaw: f64, pitch: f64) -> &mut Self {
        self.yaw = yaw;
        self.pitch = pitch;
        self
    }

    /// Adds the given offsets to the coordinates (negative values subtract)
    pub fn add_coordinates(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        self.x += x;
        self.y += y;
        self.z += z;
        self
    }

    pub fn set_world_name(&mut self, world: impl Into<String>) -> &mut Self {
        self.world = Some(world.into());
        self
    }

    pub fn set_x(&mut self, x: f64) -> &mut Self {
        self.x = x;
        self
    }

    pub fn set_y(&mut self, y: f64) -> &mut Self {
        self.y = y;
        self
    }

    pub fn set_z(&mut self, z: f64) -> &mut Self {
        self.z = z;
        self
    }

    pub fn set_yaw(&mut self, yaw: f64) -> &mut Self {
        self.yaw = yaw;
        self
    }

    pub fn set_pitch(&mut self, pitch: f64) -> &mut Self {
        self.pitch = pitch;
        self
    }

    // ====< Getters >====
    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    pub fn yaw(&self) -> f64 {
        self.yaw
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    pub fn world_name(&self) -> Option<&str> {
        self.world.as_deref()
    }

    /// X coordinate truncated toward zero
    pub fn block_x(&self) -> i32 {
        self.x as i32
    }

    /// Y coordinate truncated toward zero
    pub fn block_y(&self) -> i32 {
        self.y as i32
    }

    /// Z coordinate truncated toward zero
    pub fn block_z(&self) -> i32 {
        self.z as i32
    }

    /// Returns an independent copy of this builder
    pub fn copy(&self) -> LocationBuilder {
        self.clone()
    }

    /// Moves the builder `distance` blocks in the given direction
    ///
    /// Horizontal directions are taken relative to the current yaw (degrees).
    /// Pitch is ignored, `Up` and `Down` only change y.
    pub fn relative_position(&mut self, distance: f64, direction: Direction) -> &mut Self {
        let forward = (self.yaw + 90.0).to_radians();
        let sideways = self.yaw.to_radians();
        match direction {
            Direction::Forward => {
                self.x += distance * forward.cos();
                self.z += distance * forward.sin();
            }
            Direction::Backwards => {
                self.x -= distance * forward.cos();
                self.z -= distance * forward.sin();
            }
            Direction::Left => {
                self.x += distance * sideways.cos();
                self.z += distance * sideways.sin();
            }
            Direction::Right => {
                self.x -= distance * sideways.cos();
                self.z -= distance * sideways.sin();
            }
            Direction::Up => self.y += distance,
            Direction::Down => self.y -= distance,
        }
        self
    }

    /// Returns a displayable view of this builder
    ///
    /// The world is looked up in `resolver` while formatting, an unknown
    /// (or missing) world is shown as `unloaded`. There is no space before the
    /// closing brace: `location { w world x 1 y 64 z -3}`.
    pub fn display<'a, R: WorldResolver + ?Sized>(&'a self, resolver: &'a R) -> LocationDisplay<'a, R> {
        LocationDisplay {
            location: self,
            resolver,
        }
    }

    /// Serializes the location into an ordered map for persistence
    pub fn serialize(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert(String::from("x"), float::to_value(self.x));
        map.insert(String::from("y"), float::to_value(self.y));
        map.insert(String::from("z"), float::to_value(self.z));
        map.insert(String::from("yaw"), float::to_value(self.yaw));
        map.insert(String::from("pitch"), float::to_value(self.pitch));
        map.insert(String::from("worldname"), match &self.world {
            Some(world) => Value::String(world.clone()),
            None => Value::Null,
        });
        map
    }

    /// Restores a location from a map produced by [`serialize`](LocationBuilder::serialize)
    pub fn deserialize(map: &Map<String, Value>) -> Result<LocationBuilder, LocationError> {
        serde_json::from_value(Value::Object(map.clone())).map_err(|e| {
            log::debug!(target: "astraledit-location", "Failed to restore location from {:?}: {}", map, e);
            LocationError::InvalidData(e.to_string())
        })
    }
}

impl PartialEq for LocationBuilder {
    fn eq(&self, other: &Self) -> bool {
        self.block_x() == other.block_x() && self.block_y() == other.block_y() && self.block_z() == other.block_z()
    }
}

impl Eq for LocationBuilder {}

// Must agree with `eq`, so only block coordinates are hashed
impl Hash for LocationBuilder {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.block_x().hash(state);
        self.block_y().hash(state);
        self.block_z().hash(state);
    }
}

/// Helper returned by [`LocationBuilder::display`]
pub struct LocationDisplay<'a, R: WorldResolver + ?Sized> {
    location: &'a LocationBuilder,
    resolver: &'a R,
}

impl<R: WorldResolver + ?Sized> Display for LocationDisplay<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let world = match self.location.world_name() {
            Some(world) if self.resolver.is_loaded(world) => world,
            _ => "unloaded",
        };
        write!(
            f,
            "location {{ w {} x {} y {} z {}}}",
            world,
            self.location.block_x(),
            self.location.block_y(),
            self.location.block_z()
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use serde_json::json;

    use super::*;

    const EPSILON: f64 = 1e-9;

    fn only_world(world: &str) -> bool {
        world == "world"
    }

    #[test]
    fn chained_setters() {
        let mut location = LocationBuilder::new();
        location
            .set_world_name("world")
            .set_coordinates(1.0, 2.0, 3.0)
            .add_coordinates(0.5, -1.0, 2.0)
            .set_rotation(45.0, 10.0)
            .set_pitch(-30.0);

        assert_eq!(location.world_name(), Some("world"));
        assert_eq!(location.x(), 1.5);
        assert_eq!(location.y(), 1.0);
        assert_eq!(location.z(), 5.0);
        assert_eq!(location.yaw(), 45.0);
        assert_eq!(location.pitch(), -30.0);
    }

    #[test]
    fn copy_is_independent() {
        let original = LocationBuilder::with_rotation("world", 1.25, 2.5, 3.75, 10.1, 20.2);
        let mut copy = original.copy();

        assert_eq!(copy.world_name(), original.world_name());
        assert_eq!(copy.x(), original.x());
        assert_eq!(copy.y(), original.y());
        assert_eq!(copy.z(), original.z());
        assert_eq!(copy.yaw(), original.yaw());
        assert_eq!(copy.pitch(), original.pitch());

        copy.set_x(100.0).set_world_name("nether").set_yaw(0.0);
        assert_eq!(original.x(), 1.25);
        assert_eq!(original.world_name(), Some("world"));
        assert_eq!(original.yaw(), 10.1);
    }

    #[test]
    fn up_and_down_cancel_out() {
        let mut location = LocationBuilder::at("world", 0.0, 64.3, 0.0);
        for distance in [0.0, 1.0, 2.5, -7.0, 1234.5] {
            location.relative_position(distance, Direction::Up);
            location.relative_position(distance, Direction::Down);
            assert!((location.y() - 64.3).abs() < EPSILON);
        }
        assert_eq!(location.x(), 0.0);
        assert_eq!(location.z(), 0.0);
    }

    #[test]
    fn forward_and_backwards_cancel_out() {
        for yaw in [0.0, 37.0, 90.0, 180.0, -135.0, 359.0] {
            let mut location = LocationBuilder::with_rotation("world", 10.0, 64.0, -5.0, yaw, 0.0);
            location
                .relative_position(3.5, Direction::Forward)
                .relative_position(3.5, Direction::Backwards);
            assert!((location.x() - 10.0).abs() < EPSILON);
            assert!((location.z() + 5.0).abs() < EPSILON);
        }
    }

    #[test]
    fn forward_follows_yaw() {
        // yaw 0 faces +z
        let mut location = LocationBuilder::at("world", 0.0, 0.0, 0.0);
        location.relative_position(2.0, Direction::Forward);
        assert!(location.x().abs() < EPSILON);
        assert!((location.z() - 2.0).abs() < EPSILON);

        // yaw 90 faces -x
        let mut location = LocationBuilder::with_rotation("world", 0.0, 0.0, 0.0, 90.0, 0.0);
        location.relative_position(2.0, Direction::Forward);
        assert!((location.x() + 2.0).abs() < EPSILON);
        assert!(location.z().abs() < EPSILON);
    }

    #[test]
    fn left_and_right_are_perpendicular() {
        let mut location = LocationBuilder::at("world", 0.0, 0.0, 0.0);
        location.relative_position(1.0, Direction::Left);
        assert!((location.x() - 1.0).abs() < EPSILON);
        assert!(location.z().abs() < EPSILON);

        location.relative_position(2.0, Direction::Right);
        assert!((location.x() + 1.0).abs() < EPSILON);
        assert!(location.z().abs() < EPSILON);
        assert_eq!(location.y(), 0.0);
    }

    #[test]
    fn equality_uses_truncated_blocks() {
        let a = LocationBuilder::at("world", 1.9, 2.9, 3.9);
        let b = LocationBuilder::with_rotation("nether", 1.1, 2.1, 3.1, 90.0, 45.0);
        assert_eq!(a, b);

        let c = LocationBuilder::at("world", 2.0, 2.9, 3.9);
        assert_ne!(a, c);

        // Truncation goes toward zero, so -0.5 and 0.5 share block 0
        assert_eq!(LocationBuilder::at("world", -0.5, 0.0, 0.0), LocationBuilder::at("world", 0.5, 0.0, 0.0));
    }

    #[test]
    fn hash_agrees_with_equality() {
        let mut set = HashSet::new();
        set.insert(LocationBuilder::at("world", 1.9, 2.9, 3.9));
        assert!(set.contains(&LocationBuilder::at("other", 1.1, 2.1, 3.1)));
        assert!(!set.contains(&LocationBuilder::at("world", 2.0, 2.9, 3.9)));
    }

    #[test]
    fn display_loaded_world() {
        let location = LocationBuilder::at("world", 1.9, -2.9, 3.0);
        assert_eq!(location.display(&only_world).to_string(), "location { w world x 1 y -2 z 3}");
    }

    #[test]
    fn display_unloaded_world() {
        let location = LocationBuilder::at("w", 1.0, 2.0, 3.0);
        let text = location.display(&only_world).to_string();
        assert!(text.contains("w unloaded"));
        assert_eq!(text, "location { w unloaded x 1 y 2 z 3}");

        let nowhere = LocationBuilder::new();
        assert!(nowhere.display(&|_: &str| true).to_string().contains("w unloaded"));
    }

    #[test]
    fn serialize_keeps_key_order() {
        let location = LocationBuilder::with_rotation("w", 1.0, 2.0, 3.0, 10.0, 20.0);
        let map = location.serialize();

        let keys = map.keys().map(|k| k.as_str()).collect::<Vec<&str>>();
        assert_eq!(keys, ["x", "y", "z", "yaw", "pitch", "worldname"]);
        assert_eq!(
            Value::Object(map),
            json!({ "x": 1.0, "y": 2.0, "z": 3.0, "yaw": 10.0, "pitch": 20.0, "worldname": "w" })
        );
    }

    #[test]
    fn serde_matches_serialize() {
        let location = LocationBuilder::with_rotation("w", 1.0, 2.0, 3.0, 10.0, 20.0);
        let text = serde_json::to_string(&location).unwrap();
        assert_eq!(text, r#"{"x":1.0,"y":2.0,"z":3.0,"yaw":10.0,"pitch":20.0,"worldname":"w"}"#);
    }

    #[test]
    fn deserialize_restores_every_field() {
        let location = LocationBuilder::with_rotation("w", 1.5, 2.0, -3.25, 10.0, 20.0);
        let restored = LocationBuilder::deserialize(&location.serialize()).unwrap();
        assert_eq!(restored.world_name(), Some("w"));
        assert_eq!(restored.x(), 1.5);
        assert_eq!(restored.z(), -3.25);
        assert_eq!(restored.yaw(), 10.0);
        assert_eq!(restored.pitch(), 20.0);
    }

    #[test]
    fn deserialize_accepts_integers_and_missing_world() {
        let map = json!({ "x": 1, "y": 2, "z": 3, "yaw": 0, "pitch": 0 });
        let restored = LocationBuilder::deserialize(map.as_object().unwrap()).unwrap();
        assert_eq!(restored.world_name(), None);
        assert_eq!(restored.y(), 2.0);
    }

    #[test]
    fn serialize_nonfinite_round_trips() {
        let mut location = LocationBuilder::with_rotation("w", f64::INFINITY, 2.0, 3.0, f64::NAN, 0.0);
        location.relative_position(f64::INFINITY, Direction::Down);

        let map = location.serialize();
        assert_eq!(map["x"], json!("Infinity"));
        assert_eq!(map["y"], json!("-Infinity"));
        assert_eq!(map["yaw"], json!("NaN"));
        assert_eq!(map["pitch"], json!(0.0));

        let restored = LocationBuilder::deserialize(&map).unwrap();
        assert_eq!(restored.x(), f64::INFINITY);
        assert_eq!(restored.y(), f64::NEG_INFINITY);
        assert_eq!(restored.z(), 3.0);
        assert!(restored.yaw().is_nan());
        assert_eq!(restored.world_name(), Some("w"));

        let text = serde_json::to_string(&location).unwrap();
        assert_eq!(text, r#"{"x":"Infinity","y":"-Infinity","z":3.0,"yaw":"NaN","pitch":0.0,"worldname":"w"}"#);
        let parsed: LocationBuilder = serde_json::from_str(&text).unwrap();
        assert!(parsed.yaw().is_nan());
        assert_eq!(parsed.y(), f64::NEG_INFINITY);
    }

    #[test]
    fn deserialize_rejects_bad_data() {
        let missing = json!({ "x": 1.0, "y": 2.0, "yaw": 0.0, "pitch": 0.0, "worldname": "w" });
        assert!(matches!(
            LocationBuilder::deserialize(missing.as_object().unwrap()),
            Err(LocationError::InvalidData(_))
        ));

        let wrong_type = json!({ "x": "one", "y": 2.0, "z": 3.0, "yaw": 0.0, "pitch": 0.0, "worldname": "w" });
        assert!(matches!(
            LocationBuilder::deserialize(wrong_type.as_object().unwrap()),
            Err(LocationError::InvalidData(_))
        ));
    }
}
