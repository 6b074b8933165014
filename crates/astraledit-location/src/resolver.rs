/// Looks up worlds in the host environment
///
/// The lookup happens every time it is needed, so a world that was unloaded
/// after a location was built is reported as unloaded.
pub trait WorldResolver {
    fn is_loaded(&self, world: &str) -> bool;
}

impl<F: Fn(&str) -> bool> WorldResolver for F {
    fn is_loaded(&self, world: &str) -> bool {
        self(world)
    }
}
