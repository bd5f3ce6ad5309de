use std::collections::HashMap;

use crate::{
    types::EntityId,
    world::{
        component::{
            component::{Component, DynComponent},
            component_kinds::ComponentKind,
        },
        error::ViewError,
    },
};

struct EntityRecord {
    /// Reserved locally, not yet confirmed by the backend
    pending: bool,
    components: HashMap<ComponentKind, Box<dyn DynComponent>>,
}

impl EntityRecord {
    fn new(pending: bool) -> Self {
        Self {
            pending,
            components: HashMap::new(),
        }
    }
}

/// EntityTable - owns entity existence and the component values attached to
/// each entity. It is a plain store: nothing here notifies anyone or knows
/// about authority.
pub struct EntityTable {
    entities: HashMap<EntityId, EntityRecord>,
}

impl EntityTable {
    pub fn new() -> Self {
        Self {
            entities: HashMap::new(),
        }
    }

    // Entities

    pub fn add_entity(&mut self, entity: EntityId) -> Result<(), ViewError> {
        self.insert_record(entity, false)
    }

    /// Inserts an entity that is known locally but not yet confirmed
    pub fn reserve_entity(&mut self, entity: EntityId) -> Result<(), ViewError> {
        self.insert_record(entity, true)
    }

    /// Marks a reserved entity as confirmed. Confirming an already confirmed
    /// entity is a no-op.
    pub fn confirm_entity(&mut self, entity: &EntityId) -> Result<(), ViewError> {
        let record = self.record_mut(entity)?;
        record.pending = false;
        Ok(())
    }

    /// Removes the entity with all of its components, returning the removed
    /// component values sorted by component name
    pub fn remove_entity(&mut self, entity: &EntityId) -> Result<Vec<Box<dyn DynComponent>>, ViewError> {
        let record = self
            .entities
            .remove(entity)
            .ok_or(ViewError::EntityNotFound { entity: *entity })?;

        let mut removed: Vec<Box<dyn DynComponent>> = record.components.into_values().collect();
        removed.sort_unstable_by_key(|component| component.component_name());
        Ok(removed)
    }

    pub fn has_entity(&self, entity: &EntityId) -> bool {
        self.entities.contains_key(entity)
    }

    pub fn is_pending(&self, entity: &EntityId) -> bool {
        self.entities
            .get(entity)
            .map(|record| record.pending)
            .unwrap_or(false)
    }

    pub fn entities(&self) -> Vec<EntityId> {
        let mut entities: Vec<EntityId> = self.entities.keys().copied().collect();
        entities.sort_unstable();
        entities
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    // Components

    pub fn add_component<C: Component>(&mut self, entity: &EntityId, component: C) -> Result<(), ViewError> {
        let record = self.record_mut(entity)?;
        let kind = C::kind();
        if record.components.contains_key(&kind) {
            return Err(ViewError::ComponentAlreadyExists {
                entity: *entity,
                component: C::NAME,
            });
        }

        record.components.insert(kind, Box::new(component));
        Ok(())
    }

    /// Replaces the stored value, returning the previous one
    pub fn update_component<C: Component>(&mut self, entity: &EntityId, component: C) -> Result<C, ViewError> {
        let stored = self.component_mut::<C>(entity)?;
        Ok(std::mem::replace(stored, component))
    }

    pub fn remove_component<C: Component>(&mut self, entity: &EntityId) -> Result<C, ViewError> {
        let removed = self.remove_component_of_kind(entity, &C::kind(), C::NAME)?;
        Ok(removed.unbox::<C>())
    }

    pub fn remove_component_of_kind(
        &mut self,
        entity: &EntityId,
        kind: &ComponentKind,
        component_name: &'static str,
    ) -> Result<Box<dyn DynComponent>, ViewError> {
        let record = self.record_mut(entity)?;
        record
            .components
            .remove(kind)
            .ok_or(ViewError::ComponentNotFound {
                entity: *entity,
                component: component_name,
            })
    }

    pub fn component<C: Component>(&self, entity: &EntityId) -> Option<&C> {
        self.component_of_kind(entity, &C::kind())
            .and_then(|component| component.downcast_ref::<C>())
    }

    pub fn component_of_kind(
        &self,
        entity: &EntityId,
        kind: &ComponentKind,
    ) -> Option<&(dyn DynComponent + 'static)> {
        self.entities
            .get(entity)
            .and_then(|record| record.components.get(kind))
            .map(|component| component.as_ref())
    }

    pub fn has_component<C: Component>(&self, entity: &EntityId) -> bool {
        self.has_component_of_kind(entity, &C::kind())
    }

    pub fn has_component_of_kind(&self, entity: &EntityId, kind: &ComponentKind) -> bool {
        self.entities
            .get(entity)
            .map(|record| record.components.contains_key(kind))
            .unwrap_or(false)
    }

    pub fn component_kinds(&self, entity: &EntityId) -> Vec<ComponentKind> {
        self.entities
            .get(entity)
            .map(|record| record.components.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Number of components attached to the entity, zero if it is absent
    pub fn component_count(&self, entity: &EntityId) -> usize {
        self.entities
            .get(entity)
            .map(|record| record.components.len())
            .unwrap_or(0)
    }

    pub fn total_component_count(&self) -> usize {
        self.entities
            .values()
            .map(|record| record.components.len())
            .sum()
    }

    // Internal

    fn insert_record(&mut self, entity: EntityId, pending: bool) -> Result<(), ViewError> {
        if self.entities.contains_key(&entity) {
            return Err(ViewError::EntityAlreadyExists { entity });
        }
        self.entities.insert(entity, EntityRecord::new(pending));
        Ok(())
    }

    fn record_mut(&mut self, entity: &EntityId) -> Result<&mut EntityRecord, ViewError> {
        self.entities
            .get_mut(entity)
            .ok_or(ViewError::EntityNotFound { entity: *entity })
    }

    fn component_mut<C: Component>(&mut self, entity: &EntityId) -> Result<&mut C, ViewError> {
        let record = self.record_mut(entity)?;
        record
            .components
            .get_mut(&C::kind())
            .and_then(|component| component.downcast_mut::<C>())
            .ok_or(ViewError::ComponentNotFound {
                entity: *entity,
                component: C::NAME,
            })
    }
}

impl Default for EntityTable {
    fn default() -> Self {
        Self::new()
    }
}
