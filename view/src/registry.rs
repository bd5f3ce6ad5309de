use thiserror::Error;

use crate::{
    components::DefaultComponentsPlugin,
    world::component::{component::Component, component_kinds::ComponentKinds},
};

/// Errors that can occur while building a Registry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Registry is locked and cannot be modified
    #[error("Registry is already locked and cannot be modified. A View has been built from it, or Registry.lock() has been called")]
    AlreadyLocked,

    /// The component type was registered twice
    #[error("Component {component_name} is already registered")]
    AlreadyRegistered { component_name: &'static str },

    /// A different component type already uses this name
    #[error("Another component is already registered under the name {component_name}")]
    NameCollision { component_name: &'static str },
}

// Registry Plugin
pub trait RegistryPlugin {
    fn build(&self, registry: &mut Registry);
}

// Registry
pub struct Registry {
    pub component_kinds: ComponentKinds,
    locked: bool,
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            component_kinds: ComponentKinds::new(),
            locked: false,
        }
    }
}

impl Registry {
    pub fn builder() -> Self {
        Self::default()
    }

    pub fn add_plugin<P: RegistryPlugin>(&mut self, plugin: P) -> &mut Self {
        self.check_lock();
        plugin.build(self);
        self
    }

    /// Registers Position, Light, Model and Client
    pub fn add_default_components(&mut self) -> &mut Self {
        self.add_plugin(DefaultComponentsPlugin)
    }

    pub fn add_component<C: Component>(&mut self) -> &mut Self {
        self.check_lock();
        if let Err(error) = self.component_kinds.add_component::<C>() {
            panic!("{}", error);
        }
        self
    }

    // Non-panicking builder methods

    pub fn try_add_plugin<P: RegistryPlugin>(&mut self, plugin: P) -> Result<&mut Self, RegistryError> {
        self.try_check_lock()?;
        plugin.build(self);
        Ok(self)
    }

    pub fn try_add_component<C: Component>(&mut self) -> Result<&mut Self, RegistryError> {
        self.try_check_lock()?;
        self.component_kinds.add_component::<C>()?;
        Ok(self)
    }

    pub fn try_lock(&mut self) -> Result<(), RegistryError> {
        self.try_check_lock()?;
        self.locked = true;
        Ok(())
    }

    pub fn lock(&mut self) {
        self.check_lock();
        self.locked = true;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Checks if registry is locked without panicking
    pub fn try_check_lock(&self) -> Result<(), RegistryError> {
        if self.locked {
            Err(RegistryError::AlreadyLocked)
        } else {
            Ok(())
        }
    }

    /// Checks if registry is locked, panics if it is
    pub fn check_lock(&self) {
        if self.locked {
            panic!("Registry already locked!");
        }
    }

    pub fn build(&mut self) -> Self {
        std::mem::take(self)
    }
}
