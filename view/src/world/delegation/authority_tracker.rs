use std::collections::HashMap;

use log::info;

use crate::{
    types::EntityId,
    world::{
        component::{component::Component, component_kinds::ComponentKind},
        delegation::{
            authority_state::AuthorityState,
            update_request::{
                DynUpdateRequestHandler, TypedUpdateRequestHandler, UpdateRequestHandler,
            },
        },
        error::ViewError,
    },
};

/// AuthorityTracker - records which (entity, component) pairs are delegated
/// to the local process, together with the handler that receives update
/// requests for each of them.
///
/// A pair has a handler if and only if it is `Delegated`. Dropping the
/// delegation drops the handler and whatever it captured.
pub struct AuthorityTracker {
    delegations: HashMap<EntityId, HashMap<ComponentKind, Box<dyn DynUpdateRequestHandler>>>,
}

impl AuthorityTracker {
    pub fn new() -> Self {
        Self {
            delegations: HashMap::new(),
        }
    }

    /// `Undelegated -> Delegated`
    ///
    /// Returns an error if the pair is already delegated, the existing
    /// handler is kept.
    pub fn delegate<C: Component, H: UpdateRequestHandler<C>>(
        &mut self,
        entity: EntityId,
        handler: H,
    ) -> Result<(), ViewError> {
        let kind = C::kind();
        let handlers = self.delegations.entry(entity).or_default();
        if handlers.contains_key(&kind) {
            return Err(ViewError::AlreadyDelegated {
                entity,
                component: C::NAME,
            });
        }

        handlers.insert(kind, Box::new(TypedUpdateRequestHandler::<C, H>::new(handler)));
        info!("delegated {} of entity {}", C::NAME, entity);
        Ok(())
    }

    /// `Delegated -> Undelegated`
    pub fn undelegate<C: Component>(&mut self, entity: EntityId) -> Result<(), ViewError> {
        if !self.clear_component(&entity, &C::kind()) {
            return Err(ViewError::NotDelegated {
                entity,
                component: C::NAME,
            });
        }

        info!("undelegated {} of entity {}", C::NAME, entity);
        Ok(())
    }

    pub fn authority_state(&self, entity: &EntityId, kind: &ComponentKind) -> AuthorityState {
        if self.is_delegated(entity, kind) {
            AuthorityState::Delegated
        } else {
            AuthorityState::Undelegated
        }
    }

    pub fn is_delegated(&self, entity: &EntityId, kind: &ComponentKind) -> bool {
        self.delegations
            .get(entity)
            .map(|handlers| handlers.contains_key(kind))
            .unwrap_or(false)
    }

    pub fn delegated_kinds(&self, entity: &EntityId) -> Vec<ComponentKind> {
        self.delegations
            .get(entity)
            .map(|handlers| handlers.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Number of delegated pairs across all entities
    pub fn delegation_count(&self) -> usize {
        self.delegations.values().map(|handlers| handlers.len()).sum()
    }

    /// Drops any authority held over the pair, whatever its state. Returns
    /// whether the pair was delegated.
    pub fn clear_component(&mut self, entity: &EntityId, kind: &ComponentKind) -> bool {
        let Some(handlers) = self.delegations.get_mut(entity) else {
            return false;
        };
        let removed = handlers.remove(kind).is_some();
        if handlers.is_empty() {
            self.delegations.remove(entity);
        }
        removed
    }

    /// Drops all authority held over the entity's components. Returns the
    /// number of pairs that were delegated.
    pub fn clear_entity(&mut self, entity: &EntityId) -> usize {
        self.delegations
            .remove(entity)
            .map(|handlers| handlers.len())
            .unwrap_or(0)
    }

    pub(crate) fn handler_mut(
        &mut self,
        entity: &EntityId,
        kind: &ComponentKind,
    ) -> Option<&mut Box<dyn DynUpdateRequestHandler>> {
        self.delegations
            .get_mut(entity)
            .and_then(|handlers| handlers.get_mut(kind))
    }
}

impl Default for AuthorityTracker {
    fn default() -> Self {
        Self::new()
    }
}
