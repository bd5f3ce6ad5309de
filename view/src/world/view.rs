use std::{any::Any, rc::Rc};

use log::{info, trace};

use crate::{
    diagnostics::{DiagnosticsSink, LogDiagnostics},
    registry::Registry,
    roles::RoleTable,
    types::EntityId,
    view_config::ViewConfig,
    world::{
        component::{
            component::{Component, DynComponent},
            component_kinds::ComponentKind,
        },
        delegation::{
            authority_state::AuthorityState, authority_tracker::AuthorityTracker,
            update_request::{forward_update_request, UpdateRequestHandler},
        },
        entity::entity_table::EntityTable,
        error::ViewError,
        observer::{ComponentEvent, ObserverHandle, Observers},
    },
};

/// View - the local cache of replicated entity/component state.
///
/// Backend-confirmed changes arrive through `add`, `update` and `remove`.
/// Local write attempts arrive through `request_update`, which only reaches
/// the transport when the component is delegated and never changes the
/// stored value. The confirmed value comes back later as an `update`.
///
/// Every failed operation returns an error, leaves the View as it was, and
/// is reported to the View's [`DiagnosticsSink`].
pub struct View {
    config: ViewConfig,
    registry: Registry,
    entity_table: EntityTable,
    authority: AuthorityTracker,
    observers: Observers,
    roles: RoleTable,
    diagnostics: Box<dyn DiagnosticsSink>,
}

impl Default for View {
    fn default() -> Self {
        Self::new(
            ViewConfig::default(),
            Registry::builder().add_default_components().build(),
        )
    }
}

impl View {
    /// Creates a View that accepts the component kinds of `registry`. The
    /// registry is locked, no kinds can be added afterwards.
    pub fn new(config: ViewConfig, mut registry: Registry) -> Self {
        if !registry.is_locked() {
            registry.lock();
        }

        Self {
            config,
            registry,
            entity_table: EntityTable::new(),
            authority: AuthorityTracker::new(),
            observers: Observers::new(),
            roles: RoleTable::new(),
            diagnostics: Box::new(LogDiagnostics),
        }
    }

    pub fn with_diagnostics<D: DiagnosticsSink + 'static>(mut self, diagnostics: D) -> Self {
        self.diagnostics = Box::new(diagnostics);
        self
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    // Entities

    pub fn add_entity(&mut self, entity: EntityId) -> Result<(), ViewError> {
        let result = self.entity_table.add_entity(entity);
        if result.is_ok() {
            trace!("added entity {}", entity);
        }
        self.report("add_entity", result)
    }

    /// Adds an entity created locally, before the backend has confirmed it.
    /// The first `add` of a component from the backend confirms it.
    pub fn reserve_entity(&mut self, entity: EntityId) -> Result<(), ViewError> {
        let result = self.entity_table.reserve_entity(entity);
        if result.is_ok() {
            trace!("reserved entity {}", entity);
        }
        self.report("reserve_entity", result)
    }

    /// Removes a reserved entity the backend never confirmed
    pub fn cancel_reservation(&mut self, entity: EntityId) -> Result<usize, ViewError> {
        let result = if !self.entity_table.has_entity(&entity) {
            Err(ViewError::EntityNotFound { entity })
        } else if !self.entity_table.is_pending(&entity) {
            Err(ViewError::EntityNotPending { entity })
        } else {
            self.despawn(entity)
        };
        self.report("cancel_reservation", result)
    }

    /// Removes the entity together with all of its components, authority and
    /// observers. Returns the number of components removed.
    pub fn remove_entity(&mut self, entity: EntityId) -> Result<usize, ViewError> {
        let result = self.despawn(entity);
        self.report("remove_entity", result)
    }

    pub fn has_entity(&self, entity: EntityId) -> bool {
        self.entity_table.has_entity(&entity)
    }

    pub fn is_pending(&self, entity: EntityId) -> bool {
        self.entity_table.is_pending(&entity)
    }

    pub fn entities(&self) -> Vec<EntityId> {
        self.entity_table.entities()
    }

    pub fn entity_count(&self) -> usize {
        self.entity_table.entity_count()
    }

    // Components

    /// Inserts a backend-confirmed component, adding the entity if needed
    pub fn add<C: Component>(&mut self, entity: EntityId, component: C) -> Result<(), ViewError> {
        let result = self.add_component(entity, component);
        self.report("add", result)
    }

    /// Replaces the stored value with a backend-confirmed one
    pub fn update<C: Component>(&mut self, entity: EntityId, component: C) -> Result<(), ViewError> {
        let result = self.update_component(entity, component);
        self.report("update", result)
    }

    /// Removes the component and any authority held over it, returning the
    /// removed value
    pub fn remove<C: Component>(&mut self, entity: EntityId) -> Result<C, ViewError> {
        let result = self.remove_component::<C>(entity);
        self.report("remove", result)
    }

    /// Grants the local process authority over the component. `handler`
    /// receives every update request until the component is undelegated or
    /// removed, and is dropped then.
    pub fn delegate<C: Component, H: UpdateRequestHandler<C>>(
        &mut self,
        entity: EntityId,
        handler: H,
    ) -> Result<(), ViewError> {
        let result = self.delegate_component::<C, H>(entity, handler);
        self.report("delegate", result)
    }

    pub fn undelegate<C: Component>(&mut self, entity: EntityId) -> Result<(), ViewError> {
        let result = self.undelegate_component::<C>(entity);
        self.report("undelegate", result)
    }

    /// Asks the backend, through the delegation's handler, to change the
    /// component. The stored value is left as it is.
    pub fn request_update<C: Component>(&mut self, entity: EntityId, proposed: C) -> Result<(), ViewError> {
        let result = self.check_registered::<C>().and_then(|_| {
            forward_update_request(
                &mut self.authority,
                entity,
                &proposed,
                self.config.validate_payloads,
            )
        });
        self.report("request_update", result)
    }

    pub fn component<C: Component>(&self, entity: EntityId) -> Option<&C> {
        self.entity_table.component::<C>(&entity)
    }

    pub fn has_component<C: Component>(&self, entity: EntityId) -> bool {
        self.entity_table.has_component::<C>(&entity)
    }

    pub fn component_count(&self, entity: EntityId) -> usize {
        self.entity_table.component_count(&entity)
    }

    /// Names of the entity's components, sorted
    pub fn component_names(&self, entity: EntityId) -> Vec<&'static str> {
        self.names_of(self.entity_table.component_kinds(&entity))
    }

    // Authority

    pub fn is_delegated<C: Component>(&self, entity: EntityId) -> bool {
        self.authority.is_delegated(&entity, &C::kind())
    }

    pub fn authority_state<C: Component>(&self, entity: EntityId) -> AuthorityState {
        self.authority.authority_state(&entity, &C::kind())
    }

    /// Names of the entity's delegated components, sorted
    pub fn delegated_components(&self, entity: EntityId) -> Vec<&'static str> {
        self.names_of(self.authority.delegated_kinds(&entity))
    }

    pub fn delegation_count(&self) -> usize {
        self.authority.delegation_count()
    }

    // Observers

    /// Registers `observer` for changes to the entity's `C` component. The
    /// observer lives until `unobserve` or until the entity is removed.
    pub fn observe<C, F>(&mut self, entity: EntityId, observer: F) -> Result<ObserverHandle, ViewError>
    where
        C: Component,
        F: FnMut(ComponentEvent, &C) + 'static,
    {
        let result = self.check_registered::<C>().and_then(|_| {
            if self.entity_table.has_entity(&entity) {
                Ok(self.observers.add::<C, F>(entity, observer))
            } else {
                Err(ViewError::EntityNotFound { entity })
            }
        });
        self.report("observe", result)
    }

    pub fn unobserve(&mut self, handle: ObserverHandle) -> Result<(), ViewError> {
        let result = if self.observers.remove(&handle) {
            Ok(())
        } else {
            Err(ViewError::ObserverNotFound { handle })
        };
        self.report("unobserve", result)
    }

    pub fn observer_count(&self, entity: EntityId) -> usize {
        self.observers.count(&entity)
    }

    // Roles

    /// Binds `target` to the role, returning the previous holder
    pub fn set_role<T: Any>(&mut self, name: &str, target: Rc<T>) -> Option<Rc<dyn Any>> {
        info!("setting role {}", name);
        self.roles.set_role(name, target)
    }

    pub fn role<T: Any>(&self, name: &str) -> Option<Rc<T>> {
        self.roles.role::<T>(name)
    }

    pub fn has_role(&self, name: &str) -> bool {
        self.roles.has_role(name)
    }

    pub fn clear_role(&mut self, name: &str) -> Option<Rc<dyn Any>> {
        self.roles.clear_role(name)
    }

    pub fn roles(&self) -> &RoleTable {
        &self.roles
    }

    // Internal

    fn add_component<C: Component>(&mut self, entity: EntityId, component: C) -> Result<(), ViewError> {
        self.check_registered::<C>()?;
        self.check_payload(entity, &component)?;

        if self.entity_table.has_component::<C>(&entity) {
            return Err(ViewError::ComponentAlreadyExists {
                entity,
                component: C::NAME,
            });
        }
        if !self.entity_table.has_entity(&entity) {
            if !self.config.auto_spawn_entities {
                return Err(ViewError::EntityNotFound { entity });
            }
            self.entity_table.add_entity(entity)?;
            trace!("added entity {}", entity);
        } else if self.entity_table.is_pending(&entity) {
            self.entity_table.confirm_entity(&entity)?;
            trace!("confirmed reserved entity {}", entity);
        }

        self.entity_table.add_component(&entity, component)?;
        trace!("added {} to entity {}", C::NAME, entity);
        self.notify::<C>(entity, ComponentEvent::Added);
        Ok(())
    }

    fn update_component<C: Component>(&mut self, entity: EntityId, component: C) -> Result<(), ViewError> {
        self.check_registered::<C>()?;
        self.check_payload(entity, &component)?;

        self.entity_table.update_component(&entity, component)?;
        trace!("updated {} of entity {}", C::NAME, entity);
        self.notify::<C>(entity, ComponentEvent::Updated);
        Ok(())
    }

    fn remove_component<C: Component>(&mut self, entity: EntityId) -> Result<C, ViewError> {
        self.check_registered::<C>()?;

        let kind = C::kind();
        let removed = self.entity_table.remove_component::<C>(&entity)?;
        if self.authority.clear_component(&entity, &kind) {
            info!("dropped authority over removed {} of entity {}", C::NAME, entity);
            self.observers
                .notify(&entity, &kind, ComponentEvent::Undelegated, &removed);
        }
        trace!("removed {} from entity {}", C::NAME, entity);
        self.observers
            .notify(&entity, &kind, ComponentEvent::Removed, &removed);
        Ok(removed)
    }

    fn delegate_component<C: Component, H: UpdateRequestHandler<C>>(
        &mut self,
        entity: EntityId,
        handler: H,
    ) -> Result<(), ViewError> {
        self.check_registered::<C>()?;
        self.check_present::<C>(entity)?;

        self.authority.delegate::<C, H>(entity, handler)?;
        self.notify::<C>(entity, ComponentEvent::Delegated);
        Ok(())
    }

    fn undelegate_component<C: Component>(&mut self, entity: EntityId) -> Result<(), ViewError> {
        self.check_registered::<C>()?;

        self.authority.undelegate::<C>(entity)?;
        self.notify::<C>(entity, ComponentEvent::Undelegated);
        Ok(())
    }

    fn despawn(&mut self, entity: EntityId) -> Result<usize, ViewError> {
        let removed = self.entity_table.remove_entity(&entity)?;
        let delegated = self.authority.delegated_kinds(&entity);
        let delegations = self.authority.clear_entity(&entity);
        for component in &removed {
            let kind = component.component_kind();
            if delegated.contains(&kind) {
                self.observers.notify(
                    &entity,
                    &kind,
                    ComponentEvent::Undelegated,
                    component.as_any(),
                );
            }
            self.observers
                .notify(&entity, &kind, ComponentEvent::Removed, component.as_any());
        }
        self.observers.clear_entity(&entity);

        info!(
            "removed entity {} with {} components, {} of them delegated",
            entity,
            removed.len(),
            delegations
        );
        Ok(removed.len())
    }

    /// Notifies the component's observers, passing the stored value
    fn notify<C: Component>(&mut self, entity: EntityId, event: ComponentEvent) {
        let kind = C::kind();
        if let Some(component) = self.entity_table.component_of_kind(&entity, &kind) {
            self.observers
                .notify(&entity, &kind, event, component.as_any());
        }
    }

    fn check_registered<C: Component>(&self) -> Result<(), ViewError> {
        if self.registry.component_kinds.contains(&C::kind()) {
            Ok(())
        } else {
            Err(ViewError::ComponentNotRegistered { component: C::NAME })
        }
    }

    fn check_payload<C: Component>(&self, entity: EntityId, component: &C) -> Result<(), ViewError> {
        if !self.config.validate_payloads {
            return Ok(());
        }
        component
            .validate()
            .map_err(|source| ViewError::InvalidPayload {
                entity,
                component: C::NAME,
                source,
            })
    }

    fn check_present<C: Component>(&self, entity: EntityId) -> Result<(), ViewError> {
        if !self.entity_table.has_entity(&entity) {
            return Err(ViewError::EntityNotFound { entity });
        }
        if !self.entity_table.has_component::<C>(&entity) {
            return Err(ViewError::ComponentNotFound {
                entity,
                component: C::NAME,
            });
        }
        Ok(())
    }

    fn names_of(&self, kinds: Vec<ComponentKind>) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = kinds
            .iter()
            .filter_map(|kind| self.registry.component_kinds.kind_to_name(kind))
            .collect();
        names.sort_unstable();
        names
    }

    fn report<T>(&mut self, operation: &'static str, result: Result<T, ViewError>) -> Result<T, ViewError> {
        if let Err(error) = &result {
            self.diagnostics.report(operation, error);
        }
        result
    }
}
