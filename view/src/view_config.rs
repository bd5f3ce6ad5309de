/// Contains View configuration options
#[derive(Clone, Debug)]
pub struct ViewConfig {
    /// Whether `add` inserts the entity when it is not in the View yet. When
    /// false, adding a component to an unknown entity fails with
    /// `EntityNotFound` and the entity must be added explicitly first.
    pub auto_spawn_entities: bool,
    /// Whether payloads are checked with `Component::validate()` before they
    /// are stored or forwarded as update requests
    pub validate_payloads: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            auto_spawn_entities: true,
            validate_payloads: true,
        }
    }
}
