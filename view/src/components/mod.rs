use crate::registry::{Registry, RegistryPlugin};

pub mod client;
pub mod light;
pub mod model;
pub mod position;

use client::Client;
use light::Light;
use model::Model;
use position::Position;

/// Registers the component kinds every worker understands
pub struct DefaultComponentsPlugin;

impl RegistryPlugin for DefaultComponentsPlugin {
    fn build(&self, registry: &mut Registry) {
        registry
            .add_component::<Position>()
            .add_component::<Light>()
            .add_component::<Model>()
            .add_component::<Client>();
    }
}

pub(crate) fn check_finite(
    component: &'static str,
    field: &'static str,
    values: &[f64],
) -> Result<(), crate::ComponentError> {
    if values.iter().all(|value| value.is_finite()) {
        Ok(())
    } else {
        Err(crate::ComponentError::invalid_field(
            component,
            field,
            "must be finite",
        ))
    }
}
