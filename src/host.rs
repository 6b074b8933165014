use std::{collections::BTreeMap, sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard}};

use astraledit_location::{LocationBuilder, LocationError, WorldResolver};

/// A world known to the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct World {
    pub name: String,
}

impl World {
    pub fn new(name: impl Into<String>) -> World {
        World {
            name: name.into(),
        }
    }
}

/// Worlds currently loaded by the host
///
/// Cloning the registry is cheap and every clone sees the same worlds, so it can
/// be handed to whatever needs to resolve locations (including other threads).
#[derive(Debug, Clone, Default)]
pub struct WorldRegistry {
    worlds: Arc<RwLock<BTreeMap<String, World>>>,
}

impl WorldRegistry {
    pub fn new() -> WorldRegistry {
        WorldRegistry::default()
    }

    /// Loads a world, returning it (loading an already loaded world is a no-op)
    pub fn load_world(&self, name: impl Into<String>) -> World {
        let name = name.into();
        let mut worlds = self.wl();
        if let Some(world) = worlds.get(&name) {
            return world.clone();
        }

        log::debug!(target: "astraledit", "Loading world {}", name);
        let world = World::new(name.clone());
        worlds.insert(name, world.clone());
        world
    }

    /// Unloads a world, returning it if it was loaded
    pub fn unload_world(&self, name: &str) -> Option<World> {
        let world = self.wl().remove(name);
        if world.is_some() {
            log::debug!(target: "astraledit", "Unloaded world {}", name);
        }
        world
    }

    pub fn get_world(&self, name: &str) -> Option<World> {
        self.rl().get(name).cloned()
    }

    /// Names of all loaded worlds (sorted)
    pub fn loaded_worlds(&self) -> Vec<String> {
        self.rl().keys().cloned().collect()
    }

    // Acquires read lock (equivalent to `self.worlds.read().unwrap()`)
    fn rl(&self) -> RwLockReadGuard<BTreeMap<String, World>> {
        self.worlds.read().unwrap()
    }

    // Acquires write lock (equivalent to `self.worlds.write().unwrap()`)
    fn wl(&self) -> RwLockWriteGuard<BTreeMap<String, World>> {
        self.worlds.write().unwrap()
    }
}

impl WorldResolver for WorldRegistry {
    fn is_loaded(&self, world: &str) -> bool {
        self.rl().contains_key(world)
    }
}

/// Location as the host represents it (rotation is single precision)
#[derive(Debug, Clone, PartialEq)]
pub struct HostLocation {
    pub world: Option<World>,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f32,
    pub pitch: f32,
}

impl HostLocation {
    pub fn new(world: World, x: f64, y: f64, z: f64, yaw: f32, pitch: f32) -> HostLocation {
        HostLocation {
            world: Some(world),
            x,
            y,
            z,
            yaw,
            pitch,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Rotation around the x, y and z axes (radians)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EulerAngle {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Builds a [`LocationBuilder`] from a location handed over by the host
///
/// Fails with [`LocationError::MissingLocation`] if there is none.
pub fn from_host_location(location: Option<&HostLocation>) -> Result<LocationBuilder, LocationError> {
    let location = location.ok_or(LocationError::MissingLocation)?;
    LocationBuilder::try_from(location)
}

impl TryFrom<&HostLocation> for LocationBuilder {
    type Error = LocationError;

    fn try_from(location: &HostLocation) -> Result<Self, Self::Error> {
        let world = location.world.as_ref().ok_or(LocationError::MissingWorld)?;
        Ok(LocationBuilder::with_rotation(
            world.name.clone(),
            location.x,
            location.y,
            location.z,
            location.yaw as f64,
            location.pitch as f64,
        ))
    }
}

/// Conversions between [`LocationBuilder`] and host types
pub trait HostAdapter {
    /// Sets the world of the builder
    fn set_world(&mut self, world: &World) -> &mut Self;

    /// Looks up the builder's world (`None` if it's not loaded)
    fn world(&self, registry: &WorldRegistry) -> Option<World>;

    /// Converts the builder to a host location (`None` if its world is not loaded)
    fn to_location(&self, registry: &WorldRegistry) -> Option<HostLocation>;

    fn to_vector(&self) -> Vector;

    /// Converts the builder to an angle, using x, y and z as the rotation around each axis
    fn to_angle(&self) -> EulerAngle;
}

impl HostAdapter for LocationBuilder {
    fn set_world(&mut self, world: &World) -> &mut Self {
        self.set_world_name(world.name.clone())
    }

    fn world(&self, registry: &WorldRegistry) -> Option<World> {
        registry.get_world(self.world_name()?)
    }

    fn to_location(&self, registry: &WorldRegistry) -> Option<HostLocation> {
        let world = match self.world(registry) {
            Some(world) => world,
            None => {
                log::debug!(target: "astraledit", "Cannot convert location, world {:?} is not loaded", self.world_name());
                return None;
            }
        };

        Some(HostLocation::new(world, self.x(), self.y(), self.z(), self.yaw() as f32, self.pitch() as f32))
    }

    fn to_vector(&self) -> Vector {
        Vector {
            x: self.x(),
            y: self.y(),
            z: self.z(),
        }
    }

    fn to_angle(&self) -> EulerAngle {
        EulerAngle {
            x: self.x(),
            y: self.y(),
            z: self.z(),
        }
    }
}
