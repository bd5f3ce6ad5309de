use std::{any::Any, marker::PhantomData};

use log::trace;

use crate::{
    types::EntityId,
    world::{
        component::component::Component, delegation::authority_tracker::AuthorityTracker,
        error::ViewError,
    },
};

/// Receives update requests for a delegated component.
///
/// Implemented by the transport, which turns each request into an outbound
/// message. The View's stored value is not touched: the backend's
/// acknowledgment is expected to come back later as a regular `update`.
///
/// Implemented for every `FnMut(EntityId, &C)`.
pub trait UpdateRequestHandler<C: Component>: 'static {
    fn request_update(&mut self, entity: EntityId, proposed: &C);
}

impl<C, F> UpdateRequestHandler<C> for F
where
    C: Component,
    F: FnMut(EntityId, &C) + 'static,
{
    fn request_update(&mut self, entity: EntityId, proposed: &C) {
        self(entity, proposed)
    }
}

// Type-erased handler, stored by the AuthorityTracker
pub(crate) trait DynUpdateRequestHandler {
    /// Returns false if `proposed` is not of the handler's component type
    fn dispatch(&mut self, entity: EntityId, proposed: &dyn Any) -> bool;
}

pub(crate) struct TypedUpdateRequestHandler<C: Component, H: UpdateRequestHandler<C>> {
    handler: H,
    phantom: PhantomData<fn(&C)>,
}

impl<C: Component, H: UpdateRequestHandler<C>> TypedUpdateRequestHandler<C, H> {
    pub(crate) fn new(handler: H) -> Self {
        Self {
            handler,
            phantom: PhantomData,
        }
    }
}

impl<C: Component, H: UpdateRequestHandler<C>> DynUpdateRequestHandler
    for TypedUpdateRequestHandler<C, H>
{
    fn dispatch(&mut self, entity: EntityId, proposed: &dyn Any) -> bool {
        let Some(proposed) = proposed.downcast_ref::<C>() else {
            return false;
        };
        self.handler.request_update(entity, proposed);
        true
    }
}

/// Hands an authorized update request to the handler registered for the
/// (entity, component) pair. Invokes the handler exactly once on success and
/// never otherwise.
pub(crate) fn forward_update_request<C: Component>(
    tracker: &mut AuthorityTracker,
    entity: EntityId,
    proposed: &C,
    validate: bool,
) -> Result<(), ViewError> {
    let Some(handler) = tracker.handler_mut(&entity, &C::kind()) else {
        return Err(ViewError::NotAuthorized {
            entity,
            component: C::NAME,
        });
    };

    if validate {
        proposed
            .validate()
            .map_err(|source| ViewError::InvalidPayload {
                entity,
                component: C::NAME,
                source,
            })?;
    }

    trace!("forwarding {} update request for entity {}", C::NAME, entity);
    if !handler.dispatch(entity, proposed) {
        unreachable!("update request handler registered under the kind of a different type");
    }
    Ok(())
}
