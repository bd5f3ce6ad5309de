use std::{any::Any, cell::RefCell, collections::VecDeque, rc::Rc};

use worker_view::{Component, EntityId, UpdateRequestHandler, View, ViewError};

/// An update request the View handed to the transport, waiting for the
/// backend to acknowledge it
pub struct OutboundRequest {
    pub entity: EntityId,
    pub component: &'static str,
    value: Box<dyn Any>,
    confirm: Box<dyn FnOnce(&mut View) -> Result<(), ViewError>>,
}

impl OutboundRequest {
    pub fn value<C: Component>(&self) -> Option<&C> {
        self.value.downcast_ref::<C>()
    }

    /// Applies the request to the View the way the backend's acknowledgment
    /// would, as a confirmed `update`
    pub fn acknowledge(self, view: &mut View) -> Result<(), ViewError> {
        (self.confirm)(view)
    }
}

/// Stand-in for the transport collaborator. Handlers created by `handler()`
/// queue outbound requests; the test decides when the backend acknowledges
/// or loses them.
#[derive(Default)]
pub struct TestTransport {
    outbox: Rc<RefCell<VecDeque<OutboundRequest>>>,
    // One strong reference per live handler
    handler_token: Rc<()>,
}

impl TestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handler to pass to `View::delegate()` for a `C` component
    pub fn handler<C: Component>(&self) -> impl UpdateRequestHandler<C> {
        let outbox = self.outbox.clone();
        let token = self.handler_token.clone();
        move |entity: EntityId, proposed: &C| {
            let _token = &token;
            let confirmed = proposed.clone();
            outbox.borrow_mut().push_back(OutboundRequest {
                entity,
                component: C::NAME,
                value: Box::new(proposed.clone()),
                confirm: Box::new(move |view: &mut View| view.update(entity, confirmed)),
            });
        }
    }

    pub fn pending(&self) -> usize {
        self.outbox.borrow().len()
    }

    /// Values of the queued `C` requests, oldest first
    pub fn sent<C: Component>(&self) -> Vec<(EntityId, C)> {
        self.outbox
            .borrow()
            .iter()
            .filter_map(|request| {
                request
                    .value::<C>()
                    .map(|value| (request.entity, value.clone()))
            })
            .collect()
    }

    pub fn next_request(&self) -> Option<OutboundRequest> {
        self.outbox.borrow_mut().pop_front()
    }

    /// Acknowledges every queued request in order. Returns how many were
    /// applied, stopping at the first the View rejects.
    pub fn acknowledge_all(&self, view: &mut View) -> Result<usize, ViewError> {
        let requests: Vec<OutboundRequest> = self.outbox.borrow_mut().drain(..).collect();
        let mut applied = 0;
        for request in requests {
            request.acknowledge(view)?;
            applied += 1;
        }
        Ok(applied)
    }

    /// Loses every queued request, as a dropped connection would
    pub fn drop_all(&self) -> usize {
        let mut outbox = self.outbox.borrow_mut();
        let dropped = outbox.len();
        outbox.clear();
        dropped
    }

    /// Number of handlers created by this transport that are still alive
    pub fn handler_count(&self) -> usize {
        Rc::strong_count(&self.handler_token) - 1
    }
}
