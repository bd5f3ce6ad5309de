use std::{any::Any, collections::HashMap, marker::PhantomData};

use crate::{
    types::EntityId,
    world::component::{component::Component, component_kinds::ComponentKind},
};

/// What happened to an observed component
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComponentEvent {
    Added,
    Updated,
    Removed,
    Delegated,
    Undelegated,
}

/// Identifies a registered observer, returned by `View::observe()`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverHandle {
    id: u64,
    entity: EntityId,
    kind: ComponentKind,
}

impl ObserverHandle {
    pub fn entity(&self) -> EntityId {
        self.entity
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }
}

trait DynObserver {
    fn notify(&mut self, event: ComponentEvent, component: &dyn Any);
}

struct TypedObserver<C: Component, F: FnMut(ComponentEvent, &C) + 'static> {
    observer: F,
    phantom: PhantomData<fn(&C)>,
}

impl<C: Component, F: FnMut(ComponentEvent, &C) + 'static> DynObserver for TypedObserver<C, F> {
    fn notify(&mut self, event: ComponentEvent, component: &dyn Any) {
        if let Some(component) = component.downcast_ref::<C>() {
            (self.observer)(event, component);
        }
    }
}

/// Observers - per (entity, component) listeners, notified in registration
/// order
pub(crate) struct Observers {
    next_id: u64,
    observers: HashMap<EntityId, HashMap<ComponentKind, Vec<(u64, Box<dyn DynObserver>)>>>,
}

impl Observers {
    pub(crate) fn new() -> Self {
        Self {
            next_id: 0,
            observers: HashMap::new(),
        }
    }

    pub(crate) fn add<C, F>(&mut self, entity: EntityId, observer: F) -> ObserverHandle
    where
        C: Component,
        F: FnMut(ComponentEvent, &C) + 'static,
    {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);

        let kind = C::kind();
        let observer: Box<dyn DynObserver> = Box::new(TypedObserver::<C, F> {
            observer,
            phantom: PhantomData,
        });
        self.observers
            .entry(entity)
            .or_default()
            .entry(kind)
            .or_default()
            .push((id, observer));

        ObserverHandle { id, entity, kind }
    }

    pub(crate) fn remove(&mut self, handle: &ObserverHandle) -> bool {
        let Some(kinds) = self.observers.get_mut(&handle.entity) else {
            return false;
        };
        let Some(observers) = kinds.get_mut(&handle.kind) else {
            return false;
        };
        let Some(index) = observers.iter().position(|(id, _)| *id == handle.id) else {
            return false;
        };

        observers.remove(index);
        if observers.is_empty() {
            kinds.remove(&handle.kind);
        }
        if kinds.is_empty() {
            self.observers.remove(&handle.entity);
        }
        true
    }

    pub(crate) fn notify(
        &mut self,
        entity: &EntityId,
        kind: &ComponentKind,
        event: ComponentEvent,
        component: &dyn Any,
    ) {
        let Some(observers) = self
            .observers
            .get_mut(entity)
            .and_then(|kinds| kinds.get_mut(kind))
        else {
            return;
        };
        for (_, observer) in observers.iter_mut() {
            observer.notify(event, component);
        }
    }

    /// Drops every observer of the entity, returning how many there were
    pub(crate) fn clear_entity(&mut self, entity: &EntityId) -> usize {
        self.observers
            .remove(entity)
            .map(|kinds| kinds.values().map(|observers| observers.len()).sum())
            .unwrap_or(0)
    }

    pub(crate) fn count(&self, entity: &EntityId) -> usize {
        self.observers
            .get(entity)
            .map(|kinds| kinds.values().map(|observers| observers.len()).sum())
            .unwrap_or(0)
    }
}
