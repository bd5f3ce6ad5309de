use std::{any::TypeId, collections::HashMap};

use crate::{registry::RegistryError, world::component::component::Component};

/// ComponentKind - Tag identifying a [`Component`] type
#[derive(Eq, Hash, Copy, Clone, PartialEq, Debug)]
pub struct ComponentKind {
    type_id: TypeId,
}

impl ComponentKind {
    pub fn of<C: Component>() -> Self {
        Self {
            type_id: TypeId::of::<C>(),
        }
    }
}

/// ComponentKinds - The set of component kinds known to a View
pub struct ComponentKinds {
    kind_map: HashMap<ComponentKind, &'static str>,
    name_map: HashMap<&'static str, ComponentKind>,
}

impl ComponentKinds {
    pub fn new() -> Self {
        Self {
            kind_map: HashMap::new(),
            name_map: HashMap::new(),
        }
    }

    pub fn add_component<C: Component>(&mut self) -> Result<(), RegistryError> {
        let kind = C::kind();
        if self.kind_map.contains_key(&kind) {
            return Err(RegistryError::AlreadyRegistered {
                component_name: C::NAME,
            });
        }
        if self.name_map.contains_key(C::NAME) {
            return Err(RegistryError::NameCollision {
                component_name: C::NAME,
            });
        }

        self.kind_map.insert(kind, C::NAME);
        self.name_map.insert(C::NAME, kind);
        Ok(())
    }

    pub fn contains(&self, kind: &ComponentKind) -> bool {
        self.kind_map.contains_key(kind)
    }

    pub fn kind_to_name(&self, kind: &ComponentKind) -> Option<&'static str> {
        self.kind_map.get(kind).copied()
    }

    pub fn name_to_kind(&self, name: &str) -> Option<ComponentKind> {
        self.name_map.get(name).copied()
    }

    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.name_map.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.kind_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kind_map.is_empty()
    }
}

impl Default for ComponentKinds {
    fn default() -> Self {
        Self::new()
    }
}
