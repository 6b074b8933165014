use astraledit::{config::HostConfig, host::HostAdapter};
use astraledit_location::{Direction, LocationBuilder};

fn main() {
    std::env::set_var("RUST_LOG", "debug");
    env_logger::init();

    let config = match HostConfig::load("config.json") {
        Ok(config) => config,
        Err(e) => {
            log::error!(target: "astraledit-test", "Failed to load config: {}", e);
            return;
        }
    };
    let registry = config.registry();

    // Walk a few blocks in every direction, printing where we end up
    let mut location = LocationBuilder::at(config.default_world.clone(), 0.5, 64.0, 0.5);
    location.set_rotation(45.0, 0.0);
    for direction in Direction::ALL {
        location.relative_position(3.0, direction);
        println!("{:?}: {}", direction, location.display(&registry));
    }

    match location.to_location(&registry) {
        Some(host) => println!("Host location: {:?}", host),
        None => println!("World {} is not loaded", config.default_world),
    }

    // Round-trip through the persisted form
    let saved = location.serialize();
    println!("Saved: {}", serde_json::Value::Object(saved.clone()));
    match LocationBuilder::deserialize(&saved) {
        Ok(restored) => println!("Restored same block: {}", restored == location),
        Err(e) => log::error!(target: "astraledit-test", "Failed to restore location: {}", e),
    }

    registry.unload_world(&config.default_world);
    println!("After unload: {}", location.display(&registry));
}
